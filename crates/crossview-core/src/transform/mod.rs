//! Geometric transforms applied to each side of the composite.
//!
//! # Transform Order
//!
//! For each side, the pipeline applies:
//! 1. Resize by the side's scale percentage
//! 2. Tilt (fixed small rotation, canvas expanded)
//! 3. Channel offsets
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Origin is top-left corner, y grows downward

mod rotation;

pub use rotation::{apply_rotation, compute_rotated_bounds};
