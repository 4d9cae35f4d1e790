//! Per-channel color offsets.
//!
//! Each side of the composite can darken its red, green and blue channels
//! independently. For every pixel and channel:
//!
//! ```text
//! new = clamp(old + offset, 0, 255)
//! ```
//!
//! The offset is applied through a 256-entry lookup table per channel, so the
//! cost per pixel is three table reads.

use crate::ChannelOffsets;

/// Apply channel offsets to RGB pixel data in place.
///
/// # Arguments
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `offsets` - Additive offset per channel
///
/// # Example
/// ```
/// use crossview_core::{ChannelOffsets, adjustments::apply_channel_offsets};
///
/// let mut pixels = vec![200, 100, 50];
/// apply_channel_offsets(&mut pixels, ChannelOffsets::new(-255, -20, 0));
/// assert_eq!(pixels, vec![0, 80, 50]);
/// ```
pub fn apply_channel_offsets(pixels: &mut [u8], offsets: ChannelOffsets) {
    if offsets.is_zero() {
        return;
    }

    let red = offset_lut(offsets.red);
    let green = offset_lut(offsets.green);
    let blue = offset_lut(offsets.blue);

    for chunk in pixels.chunks_exact_mut(3) {
        chunk[0] = red[chunk[0] as usize];
        chunk[1] = green[chunk[1] as usize];
        chunk[2] = blue[chunk[2] as usize];
    }
}

/// Add `offset` to a single channel value, clamping to `0..=255`.
#[inline]
pub fn offset_channel(value: u8, offset: i16) -> u8 {
    (i16::from(value) + offset).clamp(0, 255) as u8
}

/// Build the lookup table for one channel.
fn offset_lut(offset: i16) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (value, out) in lut.iter_mut().enumerate() {
        *out = offset_channel(value as u8, offset);
    }
    lut
}
