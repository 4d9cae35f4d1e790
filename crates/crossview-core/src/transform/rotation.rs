//! Image rotation with canvas expansion and bicubic sampling.
//!
//! Sampling uses the 4x4 Keys cubic convolution kernel (a = -0.5) with taps
//! clamped to the image edge.
//!
//! # Algorithm
//!
//! Inverse mapping: for each output pixel center we rotate back into source
//! space and interpolate there. Angles are in degrees, positive is
//! counter-clockwise on screen (y grows downward):
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y = dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//! where `(dx, dy)` is the output pixel center relative to the output center.
//! Output pixels whose center maps outside the source are black.

use crate::decode::DecodedImage;

/// Keys cubic convolution parameter, matching common photo tools.
const BICUBIC_A: f64 = -0.5;

/// Below this many degrees a rotation is treated as the identity.
const ANGLE_EPSILON: f64 = 0.001;

/// Slack subtracted before rounding bounds up, so float noise on an exact
/// integer extent does not add a column.
const BOUNDS_EPSILON: f64 = 1e-6;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// The box is `ceil(w*|cos| + h*|sin|) x ceil(w*|sin| + h*|cos|)`, so every
/// corner of the rotated image lies inside it.
///
/// # Example
///
/// ```
/// use crossview_core::transform::compute_rotated_bounds;
///
/// let (w, h) = compute_rotated_bounds(100, 50, 90.0);
/// assert_eq!((w, h), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let abs_angle = (angle_degrees % 360.0).abs();

    // Exact multiples of 90 degrees keep or swap dimensions
    if abs_angle < ANGLE_EPSILON || (360.0 - abs_angle).abs() < ANGLE_EPSILON {
        return (width, height);
    }
    if (abs_angle - 90.0).abs() < ANGLE_EPSILON || (abs_angle - 270.0).abs() < ANGLE_EPSILON {
        return (height, width);
    }
    if (abs_angle - 180.0).abs() < ANGLE_EPSILON {
        return (width, height);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = f64::from(width);
    let h = f64::from(height);

    let new_w = (w * cos + h * sin - BOUNDS_EPSILON).ceil() as u32;
    let new_h = (w * sin + h * cos - BOUNDS_EPSILON).ceil() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image around its center, expanding the canvas so nothing is
/// clipped.
///
/// # Example
///
/// ```ignore
/// use crossview_core::transform::apply_rotation;
///
/// let tilted = apply_rotation(&image, -0.7);
/// ```
pub fn apply_rotation(image: &DecodedImage, angle_degrees: f64) -> DecodedImage {
    if angle_degrees.abs() < ANGLE_EPSILON || image.is_empty() {
        return image.clone();
    }

    let (src_w, src_h) = (f64::from(image.width), f64::from(image.height));
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = f64::from(dst_w) / 2.0;
    let dst_cy = f64::from(dst_h) / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * 3];

    for dst_y in 0..dst_h {
        let dy = f64::from(dst_y) + 0.5 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = f64::from(dst_x) + 0.5 - dst_cx;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            if src_x < 0.0 || src_x >= src_w || src_y < 0.0 || src_y >= src_h {
                continue;
            }

            // Pixel centers sit at integer + 0.5
            let (sx, sy) = (src_x - 0.5, src_y - 0.5);
            let pixel = sample_bicubic(image, sx, sy);

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 3;
            output[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
        }
    }

    DecodedImage {
        width: dst_w,
        height: dst_h,
        pixels: output,
    }
}

/// Get a pixel as [f64; 3], clamping coordinates to the image edge.
#[inline]
fn get_pixel_clamped(image: &DecodedImage, px: i64, py: i64) -> [f64; 3] {
    let x = px.clamp(0, i64::from(image.width) - 1) as usize;
    let y = py.clamp(0, i64::from(image.height) - 1) as usize;
    let idx = (y * image.width as usize + x) * 3;
    [
        f64::from(image.pixels[idx]),
        f64::from(image.pixels[idx + 1]),
        f64::from(image.pixels[idx + 2]),
    ]
}

/// Sample a pixel with the separable bicubic kernel.
///
/// Taps run from `floor(x) - 1` to `floor(x) + 2`; out-of-range taps reuse the
/// nearest edge pixel.
fn sample_bicubic(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    const RADIUS: i64 = 2;

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in (1 - RADIUS)..=RADIUS {
        let py = y0 + ky;
        let wy = bicubic_weight(y - py as f64);
        if wy == 0.0 {
            continue;
        }
        for kx in (1 - RADIUS)..=RADIUS {
            let px = x0 + kx;
            let w = bicubic_weight(x - px as f64) * wy;
            if w == 0.0 {
                continue;
            }
            let pixel = get_pixel_clamped(image, px, py);
            sum[0] += pixel[0] * w;
            sum[1] += pixel[1] * w;
            sum[2] += pixel[2] * w;
            weight_sum += w;
        }
    }

    let mut result = [0u8; 3];
    if weight_sum.abs() > f64::EPSILON {
        for i in 0..3 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }
    result
}

/// Keys cubic convolution kernel.
fn bicubic_weight(x: f64) -> f64 {
    let x = x.abs();
    let a = BICUBIC_A;
    if x <= 1.0 {
        ((a + 2.0) * x - (a + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((a * x - 5.0 * a) * x + 8.0 * a) * x - 4.0 * a
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 8) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
        let pixels = rgb.repeat((width * height) as usize);
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_no_rotation() {
        let img = test_image(100, 50);
        let result = apply_rotation(&img, 0.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_tiny_rotation_fast_path() {
        let img = test_image(100, 50);
        let result = apply_rotation(&img, 0.0001);
        assert_eq!((result.width, result.height), (100, 50));
    }

    #[test]
    fn test_90_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 270.0), (50, 100));
    }

    #[test]
    fn test_180_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
    }

    #[test]
    fn test_45_degree_rotation_bounds() {
        let (w, h) = compute_rotated_bounds(100, 100, 45.0);
        // Diagonal of 100x100 square is ~141.4, rounded up
        assert_eq!((w, h), (142, 142));
    }

    #[test]
    fn test_tilt_bounds_for_reference_image() {
        // 400*cos(0.7) + 300*sin(0.7) = 399.97 + 3.67 -> 404
        // 400*sin(0.7) + 300*cos(0.7) = 4.89 + 299.98 -> 305
        assert_eq!(compute_rotated_bounds(400, 300, 0.7), (404, 305));
        assert_eq!(compute_rotated_bounds(400, 300, -0.7), (404, 305));
    }

    #[test]
    fn test_negative_rotation_bounds() {
        assert_eq!(
            compute_rotated_bounds(100, 50, 30.0),
            compute_rotated_bounds(100, 50, -30.0)
        );
    }

    #[test]
    fn test_large_rotation_angles() {
        assert_eq!(compute_rotated_bounds(100, 50, 720.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 450.0), (50, 100));
    }

    #[test]
    fn test_complementary_rotations() {
        // 30 and 150 share |cos| and |sin|
        let (w1, h1) = compute_rotated_bounds(100, 50, 30.0);
        let (w2, h2) = compute_rotated_bounds(100, 50, 150.0);
        assert!((w1 as i32 - w2 as i32).abs() <= 1);
        assert!((h1 as i32 - h2 as i32).abs() <= 1);
    }

    #[test]
    fn test_bounds_never_zero() {
        for angle in [1.0, 15.0, 45.0, 89.0, 90.0, 135.0, 179.0, 180.0, 270.0, 359.0] {
            let (w, h) = compute_rotated_bounds(10, 10, angle);
            assert!(w > 0, "Width should be > 0 for angle {}", angle);
            assert!(h > 0, "Height should be > 0 for angle {}", angle);
        }
    }

    #[test]
    fn test_rotation_expands_canvas() {
        let img = test_image(100, 100);
        let result = apply_rotation(&img, 45.0);
        assert!(result.width > img.width);
        assert!(result.height > img.height);
        assert_eq!(
            result.pixels.len(),
            result.width as usize * result.height as usize * 3
        );
    }

    #[test]
    fn test_positive_angle_is_counter_clockwise() {
        // White marker at the middle of the right edge of a 3x3 image
        let mut img = solid_image(3, 3, [0, 0, 0]);
        let idx = (3 + 2) * 3;
        img.pixels[idx..idx + 3].copy_from_slice(&[255, 255, 255]);

        let result = apply_rotation(&img, 90.0);

        // Counter-clockwise quarter turn moves the right edge to the top
        assert_eq!((result.width, result.height), (3, 3));
        assert_eq!(result.pixel(1, 0), [255, 255, 255]);
        assert_eq!(result.pixel(2, 1), [0, 0, 0]);
    }

    #[test]
    fn test_solid_interior_survives_tilt() {
        let img = solid_image(40, 30, [90, 160, 220]);
        for angle in [0.7, -0.7] {
            let result = apply_rotation(&img, angle);
            let center = result.pixel(result.width / 2, result.height / 2);
            assert_eq!(center, [90, 160, 220], "angle {}", angle);
        }
    }

    #[test]
    fn test_tilt_leaves_black_corners() {
        let img = solid_image(200, 100, [255, 255, 255]);
        let result = apply_rotation(&img, -0.7);

        assert_eq!(result.pixel(0, 0), [0, 0, 0]);
        assert_eq!(result.pixel(result.width - 1, result.height - 1), [0, 0, 0]);
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = solid_image(1, 1, [128, 128, 128]);
        let result = apply_rotation(&img, 0.7);
        // 1*cos + 1*sin is just over 1, so the canvas grows to 2x2
        assert_eq!((result.width, result.height), (2, 2));
        assert_eq!(result.pixels.len(), 2 * 2 * 3);
    }

    #[test]
    fn test_very_thin_image_rotation() {
        let img = test_image(100, 1);
        let result = apply_rotation(&img, -0.7);
        assert!(result.width >= 100);
        assert!(result.height >= 1);
    }

    #[test]
    fn test_bicubic_weight_properties() {
        assert!((bicubic_weight(0.0) - 1.0).abs() < f64::EPSILON);
        assert!(bicubic_weight(1.0).abs() < 1e-12);
        assert!(bicubic_weight(2.0).abs() < 1e-12);
        assert!((bicubic_weight(0.5) - bicubic_weight(-0.5)).abs() < 1e-12);
        // Partition of unity at any phase
        let t = 0.3;
        let sum: f64 = [-1.0, 0.0, 1.0, 2.0].iter().map(|k| bicubic_weight(t - k)).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
