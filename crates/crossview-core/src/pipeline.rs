//! The per-side transform and the full render.
//!
//! ## Order
//! For each side, independently:
//! 1. Resize by `scale_percent` (Lanczos3, floored at 1 px per axis)
//! 2. Tilt by `rotation_degrees` (bicubic, canvas expanded)
//! 3. Channel offsets
//!
//! Then both results go to the compositor. Nothing is cached: the same source
//! and parameters always rebuild a byte-identical composite.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::adjustments::apply_channel_offsets;
use crate::composite::{composite_side_by_side_within, CompositeImage, MAX_CANVAS_PIXELS};
use crate::decode::{resize_by_percent, DecodedImage, FilterType};
use crate::transform::apply_rotation;
use crate::{CompositeParameters, SideParameters};

/// Errors raised while building a composite.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input image has zero width or height.
    #[error("Cannot composite an empty {0} image")]
    EmptyImage(&'static str),

    /// The canvas would exceed the allocation limit.
    #[error("Composite of {width}x{height} pixels is too large")]
    CanvasTooLarge { width: u64, height: u64 },
}

/// Resampling filter for the scale step.
const SCALE_FILTER: FilterType = FilterType::Lanczos3;

/// Produce one transformed copy of the source.
///
/// The source is not modified; the returned buffer is new.
pub fn transform_side(source: &DecodedImage, params: &SideParameters) -> DecodedImage {
    let scaled = resize_by_percent(source, params.scale_percent, SCALE_FILTER);
    let mut tilted = apply_rotation(&scaled, params.rotation_degrees);
    apply_channel_offsets(&mut tilted.pixels, params.offsets);

    debug!(
        scale = params.scale_percent,
        angle = params.rotation_degrees,
        scaled_w = scaled.width,
        scaled_h = scaled.height,
        out_w = tilted.width,
        out_h = tilted.height,
        "side transformed"
    );
    tilted
}

/// Run both side transforms and composite them.
///
/// # Errors
///
/// Returns `PipelineError::EmptyImage` for an empty source and propagates
/// canvas errors from the compositor.
pub fn render_composite(
    source: &DecodedImage,
    params: &CompositeParameters,
) -> Result<CompositeImage, PipelineError> {
    render_composite_within(source, params, MAX_CANVAS_PIXELS)
}

/// [`render_composite`] with an explicit canvas pixel budget.
pub fn render_composite_within(
    source: &DecodedImage,
    params: &CompositeParameters,
    max_pixels: u64,
) -> Result<CompositeImage, PipelineError> {
    if source.is_empty() {
        return Err(PipelineError::EmptyImage("source"));
    }

    let started = Instant::now();
    let params = params.clamped();

    let left = transform_side(source, &params.left);
    let right = transform_side(source, &params.right);
    let composite = composite_side_by_side_within(&left, &right, params.spacing, max_pixels)?;

    info!(
        width = composite.width,
        height = composite.height,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "composite rendered"
    );
    Ok(composite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::scale_dimensions;
    use crate::transform::compute_rotated_bounds;
    use crate::{ChannelOffsets, Side};

    /// Gradient so resampling has something to chew on.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(((x + y) % 256) as u8);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_reference_scenario_dimensions() {
        let source = test_image(400, 300);
        let mut params = CompositeParameters::new();
        params.left.scale_percent = 50;
        params.right.scale_percent = 100;
        params.spacing = 50;

        let left = transform_side(&source, &params.left);
        let right = transform_side(&source, &params.right);

        assert_eq!(scale_dimensions(400, 300, 50), (200, 150));
        assert_eq!((left.width, left.height), compute_rotated_bounds(200, 150, -0.7));
        assert_eq!((right.width, right.height), compute_rotated_bounds(400, 300, 0.7));

        let composite = render_composite(&source, &params).unwrap();
        assert_eq!(composite.width, left.width + right.width + 50);
        assert_eq!(composite.height, left.height.max(right.height));
        // Rotation only adds a few pixels
        assert!((650..=660).contains(&composite.width));
    }

    #[test]
    fn test_full_red_offset_on_left_only() {
        let source = DecodedImage::new(60, 40, [200u8, 150, 100].repeat(60 * 40));
        let mut params = CompositeParameters::new();
        params.left.offsets = ChannelOffsets::new(-255, 0, 0);

        let left = transform_side(&source, &params.left);
        assert!(left.pixels.chunks_exact(3).all(|px| px[0] == 0));

        let right = transform_side(&source, &params.right);
        let center = right.pixel(right.width / 2, right.height / 2);
        assert_eq!(center, [200, 150, 100]);
    }

    #[test]
    fn test_zero_scale_yields_small_side() {
        let source = test_image(400, 300);
        let mut params = SideParameters::for_side(Side::Left);
        params.scale_percent = 0;

        let side = transform_side(&source, &params);
        assert!(side.width >= 1 && side.width <= 2);
        assert!(side.height >= 1 && side.height <= 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = test_image(64, 48);
        let mut params = CompositeParameters::new();
        params.left.scale_percent = 37;
        params.right.offsets = ChannelOffsets::new(-10, -200, -3);
        params.spacing = 13;

        let a = render_composite(&source, &params).unwrap();
        let b = render_composite(&source, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_source_is_not_modified() {
        let source = test_image(32, 32);
        let before = source.clone();
        let mut params = CompositeParameters::new();
        params.left.offsets = ChannelOffsets::new(-255, -255, -255);

        render_composite(&source, &params).unwrap();
        assert_eq!(source, before);
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let empty = DecodedImage::new(0, 0, vec![]);
        let result = render_composite(&empty, &CompositeParameters::new());
        assert!(matches!(result, Err(PipelineError::EmptyImage("source"))));
    }

    #[test]
    fn test_pixel_budget_rejects_wide_canvas() {
        let source = test_image(20, 10);
        let mut params = CompositeParameters::new();
        params.spacing = 200;

        let result = render_composite_within(&source, &params, 1_000);
        assert!(matches!(result, Err(PipelineError::CanvasTooLarge { .. })));
    }

    #[test]
    fn test_overridden_tilt_is_ignored() {
        let source = test_image(40, 30);
        let mut tilted = CompositeParameters::new();
        tilted.left.rotation_degrees = 45.0;
        tilted.right.rotation_degrees = 45.0;

        let expected = render_composite(&source, &CompositeParameters::new()).unwrap();
        assert_eq!(render_composite(&source, &tilted).unwrap(), expected);
    }

    #[test]
    fn test_out_of_range_parameters_are_clamped() {
        let source = test_image(20, 10);
        let mut params = CompositeParameters::new();
        params.spacing = 10_000;

        let composite = render_composite(&source, &params).unwrap();
        let left = transform_side(&source, &params.left);
        let right = transform_side(&source, &params.right);
        assert_eq!(composite.width, left.width + right.width + crate::MAX_SPACING);
    }
}
