//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Picking an output format from a file extension
//! - Encoding the RGBA composite to PNG, BMP or TIFF
//! - Flattening and encoding to JPEG
//!
//! Everything is encoded into memory; writing to disk lives in
//! [`crate::export`].
//!
//! # Examples
//!
//! ```ignore
//! use crossview_core::encode::{encode_composite, ExportFormat};
//!
//! let bytes = encode_composite(&composite, ExportFormat::Png).unwrap();
//! ```

mod jpeg;
mod rgba;

use thiserror::Error;

use crate::composite::CompositeImage;

pub use jpeg::{encode_jpeg, JPEG_EXPORT_QUALITY};
pub use rgba::encode_rgba;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder cannot produce this format for the given buffer
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(&'static str),

    /// The underlying codec failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output formats the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl ExportFormat {
    /// Every format, in the order the save dialog lists them.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Png,
        ExportFormat::Jpeg,
        ExportFormat::Bmp,
        ExportFormat::Tiff,
    ];

    /// Match a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "bmp" => Some(ExportFormat::Bmp),
            "tif" | "tiff" => Some(ExportFormat::Tiff),
            _ => None,
        }
    }

    /// Canonical extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
            ExportFormat::Tiff => "tiff",
        }
    }

    /// All extensions accepted for this format, for dialog filters.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ExportFormat::Png => &["png"],
            ExportFormat::Jpeg => &["jpg", "jpeg"],
            ExportFormat::Bmp => &["bmp"],
            ExportFormat::Tiff => &["tiff", "tif"],
        }
    }

    /// Dialog filter label.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG Files",
            ExportFormat::Jpeg => "JPEG Files",
            ExportFormat::Bmp => "BMP Files",
            ExportFormat::Tiff => "TIFF Files",
        }
    }

    /// Whether the format stores an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, ExportFormat::Jpeg)
    }
}

/// Encode the full-resolution composite in the requested format.
pub fn encode_composite(
    composite: &CompositeImage,
    format: ExportFormat,
) -> Result<Vec<u8>, EncodeError> {
    if format.supports_alpha() {
        encode_rgba(&composite.pixels, composite.width, composite.height, format)
    } else {
        encode_jpeg(
            &composite.to_rgb_pixels(),
            composite.width,
            composite.height,
            JPEG_EXPORT_QUALITY,
        )
    }
}

/// Check dimensions and buffer length before handing data to a codec.
fn validate_buffer(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * channels;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
