//! Crossview Core - image pipeline for tilted side-by-side composites
//!
//! This crate loads a photograph, produces two independently scaled and
//! oppositely tilted copies, darkens their channels, and lays them out on a
//! single RGBA canvas that can be previewed and exported.

pub mod adjustments;
pub mod composite;
pub mod decode;
pub mod encode;
pub mod export;
pub mod pipeline;
pub mod preview;
pub mod session;
pub mod transform;

pub use composite::{composite_side_by_side, CompositeImage, MAX_CANVAS_PIXELS};
pub use pipeline::{render_composite, render_composite_within, transform_side, PipelineError};
pub use session::{Session, SessionError};

/// Tilt applied to the left copy, in degrees (clockwise on screen).
pub const LEFT_TILT_DEGREES: f64 = -0.7;

/// Tilt applied to the right copy, in degrees (counter-clockwise on screen).
pub const RIGHT_TILT_DEGREES: f64 = 0.7;

/// Upper bound of the spacing slider, in pixels.
pub const MAX_SPACING: u32 = 200;

/// Spacing used when a session starts.
pub const DEFAULT_SPACING: u32 = 50;

/// Which copy of the photograph a parameter set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The fixed tilt for this side.
    pub fn tilt_degrees(self) -> f64 {
        match self {
            Side::Left => LEFT_TILT_DEGREES,
            Side::Right => RIGHT_TILT_DEGREES,
        }
    }

    /// Human-readable label for UI headings and log lines.
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Additive offsets for the red, green and blue channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelOffsets {
    /// Red channel offset (-255 to 0)
    pub red: i16,
    /// Green channel offset (-255 to 0)
    pub green: i16,
    /// Blue channel offset (-255 to 0)
    pub blue: i16,
}

impl ChannelOffsets {
    /// Most negative offset a channel accepts.
    pub const MIN: i16 = -255;
    /// Largest offset a channel accepts; offsets only darken.
    pub const MAX: i16 = 0;

    /// Create offsets, clamping each channel into `MIN..=MAX`.
    pub fn new(red: i16, green: i16, blue: i16) -> Self {
        Self {
            red: red.clamp(Self::MIN, Self::MAX),
            green: green.clamp(Self::MIN, Self::MAX),
            blue: blue.clamp(Self::MIN, Self::MAX),
        }
    }

    /// Check if all channels are zero (no adjustment)
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Copy with every channel clamped into range.
    pub fn clamped(self) -> Self {
        Self::new(self.red, self.green, self.blue)
    }
}

/// Slider state for one side of the composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideParameters {
    /// Scale relative to the source (0 to 100 percent)
    pub scale_percent: u8,
    /// Tilt in degrees; fixed per side
    pub rotation_degrees: f64,
    /// Channel offsets applied after the tilt
    pub offsets: ChannelOffsets,
}

impl SideParameters {
    /// Defaults for the given side: full size, no offsets, the side's tilt.
    pub fn for_side(side: Side) -> Self {
        Self {
            scale_percent: decode::MAX_SCALE_PERCENT,
            rotation_degrees: side.tilt_degrees(),
            offsets: ChannelOffsets::default(),
        }
    }

    /// Copy with scale and offsets clamped into their slider ranges and the
    /// tilt reset to the fixed angle for `side`.
    pub fn clamped(self, side: Side) -> Self {
        Self {
            scale_percent: self.scale_percent.min(decode::MAX_SCALE_PERCENT),
            rotation_degrees: side.tilt_degrees(),
            offsets: self.offsets.clamped(),
        }
    }
}

/// Complete slider state for a composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeParameters {
    pub left: SideParameters,
    pub right: SideParameters,
    /// Horizontal gap between the two copies (0 to 200 pixels)
    pub spacing: u32,
}

impl Default for CompositeParameters {
    fn default() -> Self {
        Self {
            left: SideParameters::for_side(Side::Left),
            right: SideParameters::for_side(Side::Right),
            spacing: DEFAULT_SPACING,
        }
    }
}

impl CompositeParameters {
    /// Create the default slider state
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for one side.
    pub fn side(&self, side: Side) -> &SideParameters {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Mutable parameters for one side.
    pub fn side_mut(&mut self, side: Side) -> &mut SideParameters {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Copy with every field clamped into its slider range.
    ///
    /// The tilt is not a slider: whatever angle a side carries, the result
    /// has [`LEFT_TILT_DEGREES`] on the left and [`RIGHT_TILT_DEGREES`] on the
    /// right.
    pub fn clamped(self) -> Self {
        Self {
            left: self.left.clamped(Side::Left),
            right: self.right.clamped(Side::Right),
            spacing: self.spacing.min(MAX_SPACING),
        }
    }
}
