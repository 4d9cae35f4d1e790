//! Image decoding for Crossview.
//!
//! This module provides functionality for:
//! - Decoding the user's photograph (JPEG, PNG, BMP, TIFF) into RGB8
//! - Applying EXIF orientation so camera shots load upright
//! - Resizing by percentage and fitting into a bounding box
//!
//! # Architecture
//!
//! All operations are synchronous and run on the caller's thread. The loaded
//! image becomes the session's source and is never mutated afterwards.
//!
//! # Examples
//!
//! ```ignore
//! use crossview_core::decode::{load_image, DecodedImage};
//!
//! let image = load_image(std::path::Path::new("photo.jpg")).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod resize;
mod types;

pub use raster::{decode_image, load_image, SUPPORTED_EXTENSIONS};
pub use resize::{
    calculate_fit_dimensions, resize, resize_by_percent, scale_dimensions, MAX_SCALE_PERCENT,
};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
