#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Geometry traits shared by images and image pairs.
pub mod geometry;

/// 2D geometry implementation for single images.
pub mod image;

/// Legacy (byte buffer) RGBD pair.
pub mod legacy;

/// Registered color and depth image pair.
pub mod rgbd;

pub use crate::geometry::{Geometry, Geometry2D, GeometryType};
pub use crate::legacy::LegacyRgbdImage;
pub use crate::rgbd::RgbdImage;
