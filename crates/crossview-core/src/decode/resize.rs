//! Image resizing for the per-side scale step and the preview box.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodedImage, FilterType};

/// Largest scale accepted by [`scale_dimensions`], in percent.
pub const MAX_SCALE_PERCENT: u8 = 100;

/// Resize an image to exact dimensions.
///
/// Zero target dimensions are raised to 1 so the result always has area.
pub fn resize(image: &DecodedImage, width: u32, height: u32, filter: FilterType) -> DecodedImage {
    let (width, height) = (width.max(1), height.max(1));

    if image.width == width && image.height == height {
        return image.clone();
    }

    match image.to_rgb_image() {
        Some(rgb_image) => DecodedImage::from_rgb_image(image::imageops::resize(
            &rgb_image,
            width,
            height,
            filter.to_image_filter(),
        )),
        // A malformed buffer has nothing meaningful to resample; fall back to black.
        None => DecodedImage::new(width, height, vec![0; width as usize * height as usize * 3]),
    }
}

/// Resize an image by a percentage of its own size on both axes.
///
/// `percent` is clamped to `0..=100`. See [`scale_dimensions`] for how the
/// target size is derived.
pub fn resize_by_percent(image: &DecodedImage, percent: u8, filter: FilterType) -> DecodedImage {
    let (width, height) = scale_dimensions(image.width, image.height, percent);
    resize(image, width, height, filter)
}

/// Compute `round(dim * percent / 100)` for both dimensions.
///
/// Each dimension is floored at 1 pixel, so 0% yields a 1x1 image instead of
/// an empty one.
pub fn scale_dimensions(width: u32, height: u32, percent: u8) -> (u32, u32) {
    let factor = f64::from(percent.min(MAX_SCALE_PERCENT)) / 100.0;
    let scale = |dim: u32| ((f64::from(dim) * factor).round() as u32).max(1);
    (scale(width), scale(height))
}

/// Calculate dimensions that fit inside `max_width x max_height` while
/// preserving aspect ratio.
///
/// Images that already fit are returned at their own size (never upscaled).
pub fn calculate_fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = (f64::from(max_width) / f64::from(width))
        .min(f64::from(max_height) / f64::from(height));

    let new_width = ((f64::from(width) * ratio).round() as u32).clamp(1, max_width.max(1));
    let new_height = ((f64::from(height) * ratio).round() as u32).clamp(1, max_height.max(1));
    (new_width, new_height)
}
