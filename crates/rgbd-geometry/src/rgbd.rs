use rgbd_image::{Image, ImageBuffer, ImageError};
use rgbd_tensor::Tensor1;

use crate::{
    geometry::{Geometry, Geometry2D, GeometryType},
    legacy::LegacyRgbdImage,
};

/// A pair of registered color and depth images, viewed from the same view.
///
/// Both images are expected to share one resolution. This is not checked: a
/// misaligned pair is kept as given and [`RgbdImage::are_aligned`] reports it.
///
/// # Examples
///
/// ```
/// use rgbd_geometry::{Geometry, Geometry2D, RgbdImage};
/// use rgbd_image::{Image, ImageSize};
/// use rgbd_tensor::CpuAllocator;
///
/// let size = ImageSize { width: 640, height: 480 };
/// let color = Image::<u8, 3>::from_size_val(size, 0, CpuAllocator).unwrap();
/// let depth = Image::<u16, 1>::from_size_val(size, 1000, CpuAllocator).unwrap();
///
/// let mut rgbd = RgbdImage::new(color, depth);
/// assert_eq!(rgbd.max_bound().as_slice(), &[1280, 480]);
///
/// assert!(rgbd.clear().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RgbdImage<C = Image<u8, 3>, D = Image<u16, 1>> {
    /// The color image.
    pub color: C,
    /// The depth image.
    pub depth: D,
}

impl<C: ImageBuffer, D: ImageBuffer> RgbdImage<C, D> {
    /// Create a pair from a color and a depth image.
    ///
    /// # Arguments
    ///
    /// * `color` - The color image.
    /// * `depth` - The depth image, expected at the color resolution.
    pub fn new(color: C, depth: D) -> Self {
        let rgbd = Self { color, depth };
        if !rgbd.are_aligned() {
            log::debug!(
                "RGBD pair built from misaligned images: color {}x{}, depth {}x{}",
                rgbd.color.cols(),
                rgbd.color.rows(),
                rgbd.depth.cols(),
                rgbd.depth.rows()
            );
        }
        rgbd
    }

    /// Returns true if color and depth have the same number of rows and columns.
    pub fn are_aligned(&self) -> bool {
        self.color.rows() == self.depth.rows() && self.color.cols() == self.depth.cols()
    }

    /// Consume the pair and return the color and depth images.
    pub fn into_parts(self) -> (C, D) {
        (self.color, self.depth)
    }

    /// Convert to the legacy RGBD image format.
    ///
    /// # Errors
    ///
    /// The first failing image conversion, color before depth.
    pub fn to_legacy_rgbd_image(&self) -> Result<LegacyRgbdImage, ImageError> {
        Ok(LegacyRgbdImage::new(
            self.color.to_legacy_image()?,
            self.depth.to_legacy_image()?,
        ))
    }
}

impl<C: ImageBuffer, D: ImageBuffer> Geometry for RgbdImage<C, D> {
    /// Clear both images.
    fn clear(&mut self) -> &mut Self {
        log::debug!("Clearing RGBD pair");
        self.color.clear();
        self.depth.clear();
        self
    }

    /// The pair is empty only when both images are empty.
    fn is_empty(&self) -> bool {
        self.color.is_empty() && self.depth.is_empty()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::RgbdImage
    }

    fn dimension(&self) -> usize {
        2
    }
}

impl<C: ImageBuffer, D: ImageBuffer> Geometry2D for RgbdImage<C, D> {
    /// Always `(0, 0)`.
    fn min_bound(&self) -> Tensor1<i64> {
        Tensor1::from([0, 0])
    }

    /// Bound of color and depth laid out side by side.
    ///
    /// The height is the color height; the depth height is not taken into
    /// account even when it differs.
    fn max_bound(&self) -> Tensor1<i64> {
        Tensor1::from([
            (self.color.cols() + self.depth.cols()) as i64,
            self.color.rows() as i64,
        ])
    }
}

impl<C: ImageBuffer, D: ImageBuffer> std::fmt::Display for RgbdImage<C, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "RGBD Image pair [{}]",
            if self.are_aligned() {
                "Aligned"
            } else {
                "Not Aligned"
            }
        )?;
        writeln!(
            f,
            "Color [size=({},{}), channels={}, format={}, device={}]",
            self.color.cols(),
            self.color.rows(),
            self.color.num_channels(),
            self.color.dtype(),
            self.color.device()
        )?;
        write!(
            f,
            "Depth [size=({},{}), channels={}, format={}, device={}]",
            self.depth.cols(),
            self.depth.rows(),
            self.depth.num_channels(),
            self.depth.dtype(),
            self.depth.device()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgbd_image::ImageSize;
    use rgbd_tensor::{CpuAllocator, Dtype};

    fn make_pair(
        color: [usize; 2],
        depth: [usize; 2],
    ) -> Result<RgbdImage<Image<u8, 3>, Image<u16, 1>>, ImageError> {
        Ok(RgbdImage::new(
            Image::from_size_val(ImageSize::from(color), 128, CpuAllocator)?,
            Image::from_size_val(ImageSize::from(depth), 1000, CpuAllocator)?,
        ))
    }

    #[test]
    fn rgbd_default_is_empty() {
        let rgbd = RgbdImage::<Image<u8, 3>, Image<u16, 1>>::default();
        assert!(rgbd.is_empty());
        assert_eq!(rgbd.min_bound().as_slice(), &[0, 0]);
        assert_eq!(rgbd.max_bound().as_slice(), &[0, 0]);
        assert_eq!(rgbd.geometry_type(), GeometryType::RgbdImage);
        assert_eq!(rgbd.dimension(), 2);
    }

    #[test]
    fn rgbd_aligned_bounds() -> Result<(), ImageError> {
        let rgbd = make_pair([640, 480], [640, 480])?;
        assert!(!rgbd.is_empty());
        assert!(rgbd.are_aligned());
        assert_eq!(rgbd.min_bound().as_slice(), &[0, 0]);
        assert_eq!(rgbd.max_bound().as_slice(), &[1280, 480]);
        Ok(())
    }

    #[test]
    fn rgbd_misaligned_bounds_use_color_rows() -> Result<(), ImageError> {
        let rgbd = make_pair([320, 240], [160, 120])?;
        assert!(!rgbd.are_aligned());
        assert_eq!(rgbd.max_bound().as_slice(), &[480, 240]);
        assert_eq!(rgbd.min_bound().as_slice(), &[0, 0]);
        Ok(())
    }

    #[test]
    fn rgbd_clear_is_chainable_and_idempotent() -> Result<(), ImageError> {
        let mut rgbd = make_pair([8, 6], [8, 6])?;
        assert!(rgbd.clear().is_empty());
        assert!(rgbd.clear().clear().is_empty());
        assert_eq!(rgbd.max_bound().as_slice(), &[0, 0]);
        assert_eq!(rgbd.min_bound().as_slice(), &[0, 0]);
        Ok(())
    }

    #[test]
    fn rgbd_half_empty_is_not_empty() -> Result<(), ImageError> {
        let color = Image::<u8, 3>::from_size_val(ImageSize::from([4, 2]), 0, CpuAllocator)?;
        let rgbd = RgbdImage::new(color, Image::<u16, 1>::default());
        assert!(!rgbd.is_empty());
        assert_eq!(rgbd.max_bound().as_slice(), &[4, 2]);
        Ok(())
    }

    #[test]
    fn rgbd_into_parts() -> Result<(), ImageError> {
        let rgbd = make_pair([3, 2], [3, 2])?;
        let (color, depth) = rgbd.into_parts();
        assert_eq!(color.dtype(), Dtype::UInt8);
        assert_eq!(depth.get_pixel(2, 1, 0)?, &1000);
        Ok(())
    }

    #[test]
    fn rgbd_display() -> Result<(), ImageError> {
        let rgbd = make_pair([4, 3], [2, 3])?;
        assert_eq!(
            rgbd.to_string(),
            "RGBD Image pair [Not Aligned]\n\
             Color [size=(4,3), channels=3, format=UInt8, device=CPU:0]\n\
             Depth [size=(2,3), channels=1, format=UInt16, device=CPU:0]"
        );

        let empty = RgbdImage::<Image<u8, 3>, Image<u16, 1>>::default();
        assert_eq!(
            empty.to_string(),
            "RGBD Image pair [Aligned]\n\
             Color [size=(0,0), channels=3, format=UInt8, device=CPU:0]\n\
             Depth [size=(0,0), channels=1, format=UInt16, device=CPU:0]"
        );
        Ok(())
    }

    #[test]
    fn rgbd_to_legacy() -> Result<(), ImageError> {
        let rgbd = make_pair([4, 3], [4, 3])?;
        let legacy = rgbd.to_legacy_rgbd_image()?;
        assert_eq!(legacy.color, rgbd.color.to_legacy_image()?);
        assert_eq!(legacy.depth, rgbd.depth.to_legacy_image()?);
        assert_eq!(legacy.depth.bytes_per_channel, 2);
        Ok(())
    }

    #[test]
    fn rgbd_to_legacy_propagates_error() -> Result<(), ImageError> {
        let color = Image::<u8, 3>::from_size_val(ImageSize::from([2, 2]), 0, CpuAllocator)?;
        let depth = Image::<f64, 1>::from_size_val(ImageSize::from([2, 2]), 1.0, CpuAllocator)?;
        let rgbd = RgbdImage::new(color, depth);
        assert_eq!(
            rgbd.to_legacy_rgbd_image().err(),
            Some(ImageError::UnsupportedLegacyDtype(Dtype::Float64))
        );
        Ok(())
    }
}
