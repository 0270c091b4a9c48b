#![deny(missing_docs)]
//! Image types backed by `rgbd-tensor`, and their conversion to the legacy byte layout.

/// image buffer capability shared by composite geometries.
pub mod buffer;

/// Error types for the image module.
pub mod error;

/// image representation for computer vision purposes.
pub mod image;

/// legacy (byte buffer) image representation.
pub mod legacy;

pub use crate::buffer::ImageBuffer;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::legacy::LegacyImage;
