//! Display-sized copies of the composite.
//!
//! The preview is always a fresh buffer. The full-resolution composite held
//! by the session is borrowed read-only and is what gets saved.

use crate::composite::CompositeImage;
use crate::decode::{calculate_fit_dimensions, FilterType};

/// Preview box width in pixels.
pub const PREVIEW_MAX_WIDTH: u32 = 800;

/// Preview box height in pixels.
pub const PREVIEW_MAX_HEIGHT: u32 = 400;

const PREVIEW_FILTER: FilterType = FilterType::Bilinear;

/// Downsample the composite to fit the default 800x400 preview box.
pub fn render_preview(composite: &CompositeImage) -> CompositeImage {
    render_preview_within(composite, PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT)
}

/// Downsample the composite to fit inside `max_width x max_height`.
///
/// Aspect ratio is preserved and small composites are copied as-is.
pub fn render_preview_within(
    composite: &CompositeImage,
    max_width: u32,
    max_height: u32,
) -> CompositeImage {
    let (width, height) =
        calculate_fit_dimensions(composite.width, composite.height, max_width, max_height);

    if (width, height) == (composite.width, composite.height) {
        return composite.clone();
    }

    match composite.to_rgba_image() {
        Some(rgba) => CompositeImage::from_rgba_image(image::imageops::resize(
            &rgba,
            width,
            height,
            PREVIEW_FILTER.to_image_filter(),
        )),
        None => composite.clone(),
    }
}
