use rgbd_tensor::Tensor1;

/// Kind of a geometry, known at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryType {
    /// A single image.
    Image,
    /// A registered color and depth image pair.
    RgbdImage,
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryType::Image => "Image",
            GeometryType::RgbdImage => "RGBDImage",
        };
        write!(f, "{name}")
    }
}

/// Lifecycle shared by every geometry.
pub trait Geometry {
    /// Release all the stored data. Returns the geometry to chain calls.
    fn clear(&mut self) -> &mut Self;

    /// Returns true if the geometry holds no usable data.
    fn is_empty(&self) -> bool;

    /// Kind of the geometry.
    fn geometry_type(&self) -> GeometryType;

    /// Number of spatial dimensions the geometry lives in.
    fn dimension(&self) -> usize;
}

/// A geometry living on the integer image plane.
///
/// Bounds are returned as `i64` tensors of shape `[2]` holding `(x, y)`.
pub trait Geometry2D: Geometry {
    /// Minimum `(x, y)` coordinate covered by the geometry.
    fn min_bound(&self) -> Tensor1<i64>;

    /// Maximum `(x, y)` coordinate covered by the geometry.
    fn max_bound(&self) -> Tensor1<i64>;
}
