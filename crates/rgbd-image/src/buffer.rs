use rgbd_tensor::{Device, Dtype, SafeTensorType, TensorAllocator};

use crate::{error::ImageError, image::Image, legacy::LegacyImage};

/// Capabilities an image buffer exposes to composite geometries.
///
/// Composites such as an RGB-D pair only need to query the extent of their
/// buffers, release them, and hand them over to legacy consumers.
pub trait ImageBuffer {
    /// Number of rows (image height).
    fn rows(&self) -> usize;

    /// Number of columns (image width).
    fn cols(&self) -> usize;

    /// Number of channels per pixel.
    fn num_channels(&self) -> usize;

    /// Runtime pixel type.
    fn dtype(&self) -> Dtype;

    /// Device holding the pixel data.
    fn device(&self) -> Device;

    /// Release the pixel data, leaving an empty buffer.
    fn clear(&mut self);

    /// Returns true when the buffer holds no pixels.
    fn is_empty(&self) -> bool;

    /// Convert the buffer into the legacy byte layout.
    fn to_legacy_image(&self) -> Result<LegacyImage, ImageError>;
}

impl<T: SafeTensorType, const C: usize, A: TensorAllocator> ImageBuffer for Image<T, C, A> {
    fn rows(&self) -> usize {
        Image::rows(self)
    }

    fn cols(&self) -> usize {
        Image::cols(self)
    }

    fn num_channels(&self) -> usize {
        Image::num_channels(self)
    }

    fn dtype(&self) -> Dtype {
        Image::dtype(self)
    }

    fn device(&self) -> Device {
        Image::device(self)
    }

    fn clear(&mut self) {
        Image::clear(self)
    }

    fn is_empty(&self) -> bool {
        Image::is_empty(self)
    }

    fn to_legacy_image(&self) -> Result<LegacyImage, ImageError> {
        Image::to_legacy_image(self)
    }
}
