#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use rgbd_tensor as tensor;

#[doc(inline)]
pub use rgbd_image as image;

#[doc(inline)]
pub use rgbd_geometry as geometry;
