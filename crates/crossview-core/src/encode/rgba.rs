//! Lossless RGBA encoders: PNG, BMP and TIFF.
//!
//! These formats keep the composite's alpha channel, so the transparent
//! canvas around the two copies survives the export.

use image::codecs::bmp::BmpEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::{validate_buffer, EncodeError, ExportFormat};

/// Encode RGBA pixel data in one of the alpha-capable formats.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` / `InvalidPixelData` for a bad
/// buffer and `EncodeError::UnsupportedFormat` when asked for JPEG.
pub fn encode_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: ExportFormat,
) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, 4)?;

    let mut buffer = Cursor::new(Vec::new());
    let color = ExtendedColorType::Rgba8;

    let result = match format {
        ExportFormat::Png => PngEncoder::new(&mut buffer).write_image(pixels, width, height, color),
        ExportFormat::Bmp => BmpEncoder::new(&mut buffer).write_image(pixels, width, height, color),
        ExportFormat::Tiff => {
            TiffEncoder::new(&mut buffer).write_image(pixels, width, height, color)
        }
        ExportFormat::Jpeg => return Err(EncodeError::UnsupportedFormat(format.extension())),
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
