use std::ops;

use rgbd_tensor::{CpuAllocator, Device, Dtype, SafeTensorType, Tensor3, TensorAllocator};

use crate::{error::ImageError, legacy::LegacyImage};

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use rgbd_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixel channels in an image of this size with `channels` channels.
    ///
    /// # Errors
    ///
    /// If the product overflows `usize`.
    pub fn checked_numel(&self, channels: usize) -> Result<usize, ImageError> {
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(ImageError::ImageSizeOverflow(
                self.width,
                self.height,
                channels,
            ))
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The image is represented as a 3D Tensor with shape (H, W, C), where H is the height of the image,
/// W the width and C the number of channels. An image with zero pixels is considered empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T: SafeTensorType, const C: usize, A: TensorAllocator = CpuAllocator>(
    pub Tensor3<T, A>,
);

/// helper to deference the inner tensor
impl<T: SafeTensorType, const C: usize, A: TensorAllocator> ops::Deref for Image<T, C, A> {
    type Target = Tensor3<T, A>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// helper to deference the inner tensor
impl<T: SafeTensorType, const C: usize, A: TensorAllocator> ops::DerefMut for Image<T, C, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: SafeTensorType, const C: usize, A: TensorAllocator> Image<T, C, A> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image, row-major and channel interleaved.
    /// * `alloc` - The allocator that owns the pixel memory.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgbd_image::{Image, ImageSize};
    /// use rgbd_tensor::CpuAllocator;
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    ///     CpuAllocator,
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>, alloc: A) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        let numel = size.checked_numel(C)?;
        if data.len() != numel {
            return Err(ImageError::InvalidChannelShape(data.len(), numel));
        }

        Ok(Self(Tensor3::from_shape_vec(
            [size.height, size.width, C],
            data,
            alloc,
        )?))
    }

    /// Create a new image with the given size and every pixel channel set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgbd_image::{Image, ImageSize};
    /// use rgbd_tensor::CpuAllocator;
    ///
    /// let depth = Image::<u16, 1>::from_size_val(
    ///     ImageSize { width: 4, height: 2 },
    ///     1000,
    ///     CpuAllocator,
    /// ).unwrap();
    ///
    /// assert_eq!(depth.rows(), 2);
    /// assert_eq!(depth.cols(), 4);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T, alloc: A) -> Result<Self, ImageError> {
        size.checked_numel(C)?;
        Ok(Self(Tensor3::from_shape_val(
            [size.height, size.width, C],
            val,
            alloc,
        )))
    }

    /// Create a new image by copying pixel data into memory obtained from `alloc`.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size or the allocation fails.
    pub fn from_size_slice(size: ImageSize, data: &[T], alloc: A) -> Result<Self, ImageError> {
        let numel = size.checked_numel(C)?;
        if data.len() != numel {
            return Err(ImageError::InvalidChannelShape(data.len(), numel));
        }

        Ok(Self(Tensor3::from_shape_slice(
            [size.height, size.width, C],
            data,
            alloc,
        )?))
    }

    /// Create an empty (0x0) image.
    pub fn empty(alloc: A) -> Self {
        Self(Tensor3::from_shape_val([0, 0, C], T::default(), alloc))
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.shape[1],
            height: self.shape[0],
        }
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.shape[1]
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.shape[0]
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        C
    }

    /// Get the runtime pixel type.
    pub fn dtype(&self) -> Dtype {
        T::DTYPE
    }

    /// Get the device holding the pixel data.
    pub fn device(&self) -> Device {
        self.0.device()
    }

    /// Returns true when the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Release the pixel data, leaving a 0x0 image on the same allocator.
    pub fn clear(&mut self) {
        let alloc = self.storage.alloc().clone();
        *self = Self::empty(alloc);
    }

    /// Get a pixel channel value.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<&T, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= C {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, C));
        }

        self.get([y, x, ch])
            .ok_or(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ))
    }

    /// Convert the image into the legacy byte layout.
    ///
    /// The pixels are copied in row-major, channel-interleaved order using the
    /// native byte order of each element.
    ///
    /// # Errors
    ///
    /// If the pixel type is not `u8`, `u16` or `f32`, or the channel count is not 1, 3 or 4.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgbd_image::{Image, ImageSize};
    /// use rgbd_tensor::CpuAllocator;
    ///
    /// let image = Image::<u16, 1>::from_size_val(ImageSize { width: 2, height: 3 }, 7, CpuAllocator).unwrap();
    /// let legacy = image.to_legacy_image().unwrap();
    ///
    /// assert_eq!(legacy.bytes_per_channel, 2);
    /// assert_eq!(legacy.data.len(), 2 * 3 * 2);
    /// ```
    pub fn to_legacy_image(&self) -> Result<LegacyImage, ImageError> {
        let dtype = T::DTYPE;
        if !matches!(dtype, Dtype::UInt8 | Dtype::UInt16 | Dtype::Float32) {
            return Err(ImageError::UnsupportedLegacyDtype(dtype));
        }

        if !matches!(C, 1 | 3 | 4) {
            return Err(ImageError::UnsupportedLegacyChannels(C));
        }

        let mut data = Vec::with_capacity(self.numel() * dtype.byte_size());
        for value in self.as_slice() {
            value.append_ne_bytes(&mut data);
        }

        LegacyImage::new(self.width(), self.height(), C, dtype.byte_size(), data)
    }
}

impl<T: SafeTensorType, const C: usize, A: TensorAllocator + Default> Default for Image<T, C, A> {
    fn default() -> Self {
        Self::empty(A::default())
    }
}

impl<T: SafeTensorType, const C: usize, A: TensorAllocator> std::fmt::Display for Image<T, C, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Image[size={}x{}, channels={}, {}, {}]",
            self.rows(),
            self.cols(),
            C,
            self.dtype(),
            self.device()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(ImageSize::from([10, 20]), image_size);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
            CpuAllocator,
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.cols(), 10);
        assert_eq!(image.rows(), 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.dtype(), Dtype::UInt8);
        assert!(!image.is_empty());
        Ok(())
    }

    #[test]
    fn image_invalid_size() {
        let res = Image::<u8, 3>::new(ImageSize::from([2, 2]), vec![0u8; 5], CpuAllocator);
        assert_eq!(res.err(), Some(ImageError::InvalidChannelShape(5, 12)));

        let res = Image::<u8, 1>::from_size_slice(ImageSize::from([2, 2]), &[0u8; 3], CpuAllocator);
        assert_eq!(res.err(), Some(ImageError::InvalidChannelShape(3, 4)));
    }

    #[test]
    fn image_size_overflow() {
        let size = ImageSize::from([usize::MAX, 2]);
        let overflow = Some(ImageError::ImageSizeOverflow(usize::MAX, 2, 3));

        let res = Image::<u8, 3>::new(size, vec![], CpuAllocator);
        assert_eq!(res.err(), overflow);

        let res = Image::<u8, 3>::from_size_slice(size, &[], CpuAllocator);
        assert_eq!(res.err(), overflow);

        let res = Image::<u8, 3>::from_size_val(size, 0, CpuAllocator);
        assert_eq!(res.err(), overflow);
    }

    #[test]
    fn image_get_pixel() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 4],
            CpuAllocator,
        )?;
        assert_eq!(image.get_pixel(0, 0, 1)?, &2);
        assert_eq!(image.get_pixel(1, 0, 0)?, &3);
        assert_eq!(
            image.get_pixel(2, 0, 0).err(),
            Some(ImageError::PixelIndexOutOfBounds(2, 0, 2, 1))
        );
        assert_eq!(
            image.get_pixel(0, 0, 2).err(),
            Some(ImageError::ChannelIndexOutOfBounds(2, 2))
        );
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn image_from_decoded_tensor() -> Result<(), Box<dyn std::error::Error>> {
        let json = r#"{"data":[1,2],"shape":[2,1,1],"strides":[50,1,1]}"#;
        let res: Result<Tensor3<u8>, _> = serde_json::from_str(json);
        assert!(res.is_err());

        let json = r#"{"data":[1,2],"shape":[2,1,1],"strides":[1,1,1]}"#;
        let image: Image<u8, 1> = Image(serde_json::from_str(json)?);
        assert_eq!(image.get_pixel(0, 1, 0)?, &2);
        Ok(())
    }

    #[test]
    fn image_default_is_empty() {
        let image = Image::<f32, 1>::default();
        assert!(image.is_empty());
        assert_eq!(image.size(), ImageSize::default());
        assert_eq!(image.shape, [0, 0, 1]);
    }

    #[test]
    fn image_clear() -> Result<(), ImageError> {
        let mut image = Image::<u16, 1>::from_size_val(ImageSize::from([4, 3]), 500, CpuAllocator)?;
        assert!(!image.is_empty());
        image.clear();
        assert!(image.is_empty());
        assert_eq!(image.rows(), 0);
        assert_eq!(image.cols(), 0);
        image.clear();
        assert!(image.is_empty());
        Ok(())
    }

    #[test]
    fn image_display() -> Result<(), ImageError> {
        let image = Image::<u16, 1>::from_size_val(ImageSize::from([640, 480]), 0, CpuAllocator)?;
        assert_eq!(image.to_string(), "Image[size=480x640, channels=1, UInt16, CPU:0]");
        Ok(())
    }

    #[test]
    fn image_to_legacy_u8() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(ImageSize::from([2, 1]), vec![1, 2, 3, 4, 5, 6], CpuAllocator)?;
        let legacy = image.to_legacy_image()?;
        assert_eq!(legacy.width, 2);
        assert_eq!(legacy.height, 1);
        assert_eq!(legacy.num_of_channels, 3);
        assert_eq!(legacy.bytes_per_channel, 1);
        assert_eq!(legacy.data, vec![1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    fn image_to_legacy_f32() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(ImageSize::from([2, 1]), vec![0.25, 1.5], CpuAllocator)?;
        let legacy = image.to_legacy_image()?;
        assert_eq!(legacy.bytes_per_channel, 4);

        let restored: Vec<f32> = legacy
            .data
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        approx::assert_relative_eq!(restored[0], 0.25);
        approx::assert_relative_eq!(restored[1], 1.5);
        Ok(())
    }

    #[test]
    fn image_to_legacy_unsupported() -> Result<(), ImageError> {
        let image = Image::<f64, 1>::from_size_val(ImageSize::from([2, 2]), 1.0, CpuAllocator)?;
        assert_eq!(
            image.to_legacy_image().err(),
            Some(ImageError::UnsupportedLegacyDtype(Dtype::Float64))
        );

        let image = Image::<u8, 2>::from_size_val(ImageSize::from([2, 2]), 1, CpuAllocator)?;
        assert_eq!(
            image.to_legacy_image().err(),
            Some(ImageError::UnsupportedLegacyChannels(2))
        );
        Ok(())
    }

    #[test]
    fn image_to_legacy_empty() -> Result<(), ImageError> {
        let legacy = Image::<u8, 3>::default().to_legacy_image()?;
        assert!(legacy.is_empty());
        assert_eq!(legacy.num_of_channels, 3);
        Ok(())
    }
}
