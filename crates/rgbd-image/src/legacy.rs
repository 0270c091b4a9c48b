use crate::error::ImageError;

/// Image stored as a plain byte buffer, as consumed by non tensor-backed code.
///
/// Pixels are laid out row-major and channel-interleaved. Each channel takes
/// `bytes_per_channel` bytes in native byte order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Number of channels per pixel
    pub num_of_channels: usize,
    /// Number of bytes per channel
    pub bytes_per_channel: usize,
    /// Raw pixel bytes
    pub data: Vec<u8>,
}

impl LegacyImage {
    /// Create a new legacy image from its raw bytes.
    ///
    /// # Errors
    ///
    /// If the data length does not match `width * height * num_of_channels * bytes_per_channel`,
    /// or that product overflows `usize`.
    pub fn new(
        width: usize,
        height: usize,
        num_of_channels: usize,
        bytes_per_channel: usize,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(num_of_channels))
            .and_then(|n| n.checked_mul(bytes_per_channel))
            .ok_or(ImageError::LegacyLayoutOverflow(
                width,
                height,
                num_of_channels,
                bytes_per_channel,
            ))?;
        if data.len() != expected {
            return Err(ImageError::InvalidLegacyDataLength(data.len(), expected));
        }

        Ok(Self {
            width,
            height,
            num_of_channels,
            bytes_per_channel,
            data,
        })
    }

    /// Number of bytes in one row of pixels.
    pub fn bytes_per_line(&self) -> usize {
        self.width * self.num_of_channels * self.bytes_per_channel
    }

    /// Returns true when the image has no pixel data.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Raw bytes of the pixel at `(x, y)`, covering all of its channels.
    pub fn pixel_bytes(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let pixel_len = self.num_of_channels * self.bytes_per_channel;
        let start = y * self.bytes_per_line() + x * pixel_len;
        self.data.get(start..start + pixel_len)
    }
}

impl std::fmt::Display for LegacyImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LegacyImage of size {}x{}, with {} channels and {} bytes per channel",
            self.width, self.height, self.num_of_channels, self.bytes_per_channel
        )
    }
}
