use rgbd_tensor::{Dtype, TensorError};

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the number of pixel channels of the image size overflows `usize`.
    #[error("Image size {0}x{1} with {2} channels overflows usize")]
    ImageSizeOverflow(usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// The element type has no legacy byte representation.
    #[error("Legacy images only support UInt8, UInt16 and Float32 pixels, got {0}")]
    UnsupportedLegacyDtype(Dtype),

    /// The channel count has no legacy representation.
    #[error("Legacy images only support 1, 3 or 4 channels, got {0}")]
    UnsupportedLegacyChannels(usize),

    /// The legacy byte buffer does not match the declared geometry.
    #[error("Legacy data length ({0}) does not match the image layout ({1})")]
    InvalidLegacyDataLength(usize, usize),

    /// The byte size of the legacy layout overflows `usize`.
    #[error("Legacy layout {0}x{1}, {2} channels, {3} bytes per channel overflows usize")]
    LegacyLayoutOverflow(usize, usize, usize, usize),

    /// Error from the underlying tensor.
    #[error(transparent)]
    TensorError(#[from] TensorError),
}
