use rgbd_image::Image;
use rgbd_tensor::{SafeTensorType, Tensor1, TensorAllocator};

use crate::geometry::{Geometry, Geometry2D, GeometryType};

impl<T: SafeTensorType, const C: usize, A: TensorAllocator> Geometry for Image<T, C, A> {
    fn clear(&mut self) -> &mut Self {
        Image::clear(self);
        self
    }

    fn is_empty(&self) -> bool {
        Image::is_empty(self)
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::Image
    }

    fn dimension(&self) -> usize {
        2
    }
}

impl<T: SafeTensorType, const C: usize, A: TensorAllocator> Geometry2D for Image<T, C, A> {
    fn min_bound(&self) -> Tensor1<i64> {
        Tensor1::from([0, 0])
    }

    fn max_bound(&self) -> Tensor1<i64> {
        Tensor1::from([self.cols() as i64, self.rows() as i64])
    }
}
