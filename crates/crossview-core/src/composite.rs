//! Side-by-side compositing onto a transparent RGBA canvas.
//!
//! ## Layout
//! ```text
//! width  = left.width + spacing + right.width
//! height = max(left.height, right.height)
//!
//! left  at (0,                      (height - left.height) / 2)
//! right at (left.width + spacing,   (height - right.height) / 2)
//! ```
//! Pasting is an opaque overwrite: the RGB values replace the canvas and
//! alpha becomes 255 wherever a source pixel lands. Everything else stays
//! transparent white.

use crate::decode::DecodedImage;
use crate::pipeline::PipelineError;

/// Largest canvas the compositor will allocate (256 megapixels, 1 GiB RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Canvas fill before anything is pasted.
const BACKGROUND: [u8; 4] = [255, 255, 255, 0];

/// The finished composite, RGBA8 in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeImage {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl CompositeImage {
    /// Create a canvas filled with a single RGBA value.
    fn filled(width: u32, height: u32, fill: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: fill.repeat(width as usize * height as usize),
        }
    }

    /// Create a CompositeImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for resizing or encoding.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Read one pixel. Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Drop the alpha channel. Transparent pixels keep their stored RGB,
    /// which is white on untouched canvas.
    pub fn to_rgb_pixels(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    /// Paste an RGB image with its top-left corner at `(x, y)`.
    ///
    /// Rows or columns that fall outside the canvas are skipped.
    fn paste_opaque(&mut self, image: &DecodedImage, x: u32, y: u32) {
        let canvas_w = self.width as usize;
        let cols = (image.width as usize).min(canvas_w.saturating_sub(x as usize));
        let rows = (image.height as usize).min((self.height as usize).saturating_sub(y as usize));

        for row in 0..rows {
            let src_start = row * image.width as usize * 3;
            let src_row = &image.pixels[src_start..src_start + cols * 3];
            let dst_start = ((y as usize + row) * canvas_w + x as usize) * 4;
            let dst_row = &mut self.pixels[dst_start..dst_start + cols * 4];

            for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(3)) {
                dst[..3].copy_from_slice(src);
                dst[3] = 255;
            }
        }
    }
}

/// Compute the canvas size for two sides and a gap.
///
/// # Errors
///
/// Returns `PipelineError::CanvasTooLarge` if the width overflows `u32` or the
/// pixel count exceeds `max_pixels`.
pub fn canvas_dimensions(
    left: (u32, u32),
    right: (u32, u32),
    spacing: u32,
    max_pixels: u64,
) -> Result<(u32, u32), PipelineError> {
    let width = left
        .0
        .checked_add(right.0)
        .and_then(|w| w.checked_add(spacing))
        .ok_or(PipelineError::CanvasTooLarge {
            width: u64::from(left.0) + u64::from(right.0) + u64::from(spacing),
            height: u64::from(left.1.max(right.1)),
        })?;
    let height = left.1.max(right.1);

    if u64::from(width) * u64::from(height) > max_pixels {
        return Err(PipelineError::CanvasTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        });
    }

    Ok((width, height))
}

/// Lay two images side by side on a fresh transparent canvas, capped at
/// [`MAX_CANVAS_PIXELS`].
pub fn composite_side_by_side(
    left: &DecodedImage,
    right: &DecodedImage,
    spacing: u32,
) -> Result<CompositeImage, PipelineError> {
    composite_side_by_side_within(left, right, spacing, MAX_CANVAS_PIXELS)
}

/// Lay two images side by side on a canvas of at most `max_pixels`.
///
/// # Errors
///
/// Returns `PipelineError::EmptyImage` if either side has no pixels, or
/// `PipelineError::CanvasTooLarge` from [`canvas_dimensions`].
pub fn composite_side_by_side_within(
    left: &DecodedImage,
    right: &DecodedImage,
    spacing: u32,
    max_pixels: u64,
) -> Result<CompositeImage, PipelineError> {
    if left.is_empty() {
        return Err(PipelineError::EmptyImage("left"));
    }
    if right.is_empty() {
        return Err(PipelineError::EmptyImage("right"));
    }

    let (width, height) = canvas_dimensions(
        (left.width, left.height),
        (right.width, right.height),
        spacing,
        max_pixels,
    )?;

    let mut canvas = CompositeImage::filled(width, height, BACKGROUND);
    canvas.paste_opaque(left, 0, (height - left.height) / 2);
    canvas.paste_opaque(right, left.width + spacing, (height - right.height) / 2);

    Ok(canvas)
}
