use thiserror::Error;

use crate::{
    allocator::{CpuAllocator, TensorAllocator, TensorAllocatorError},
    device::Device,
    dtype::{Dtype, SafeTensorType},
    storage::TensorStorage,
};

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// The number of elements of the shape does not fit in `usize`.
    #[error("Shape {0:?} overflows the addressable number of elements")]
    ShapeOverflow(Vec<usize>),

    /// Underlying storage operation failed.
    #[error("Storage error: {0}")]
    StorageError(#[from] TensorAllocatorError),
}

impl TensorError {
    /// Creates an InvalidShape error.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }
}

/// Returns the number of elements of `shape`, or `None` if the product overflows.
///
/// # Examples
///
/// ```rust
/// use rgbd_tensor::tensor::checked_numel;
///
/// assert_eq!(checked_numel([480, 640, 3]), Some(921_600));
/// assert_eq!(checked_numel([usize::MAX, 2]), None);
/// ```
pub fn checked_numel<const N: usize>(shape: [usize; N]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// # Examples
///
/// ```rust
/// use rgbd_tensor::tensor::get_strides_from_shape;
///
/// let strides = get_strides_from_shape([2, 3, 4]);
/// assert_eq!(strides, [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride = stride.saturating_mul(shape[i]);
    }
    strides
}

/// A multi-dimensional array (tensor) with owned data.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions
/// * `A` - The allocator that owns the memory
///
/// The data is always stored in row-major (C-contiguous) layout.
///
/// # Examples
///
/// ```rust
/// use rgbd_tensor::{Tensor2, CpuAllocator};
///
/// let data: Vec<u8> = vec![1, 2, 3, 4];
/// let t = Tensor2::<u8, CpuAllocator>::from_shape_vec([2, 2], data, CpuAllocator).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// assert_eq!(t.get([1, 0]), Some(&3));
/// ```
pub struct Tensor<T: SafeTensorType, const N: usize, A: TensorAllocator = CpuAllocator> {
    /// The storage of the tensor.
    pub storage: TensorStorage<T, A>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T: SafeTensorType, const N: usize, A: TensorAllocator> Tensor<T, N, A> {
    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor,
    /// or the shape overflows `usize`, an error is returned.
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>, alloc: A) -> Result<Self, TensorError> {
        let numel = checked_numel(shape).ok_or(TensorError::ShapeOverflow(shape.to_vec()))?;
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            storage: TensorStorage::from_vec(data, alloc),
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` by copying a slice into memory obtained from `alloc`.
    ///
    /// # Errors
    ///
    /// If the number of elements does not match the shape or the allocation fails.
    pub fn from_shape_slice(shape: [usize; N], data: &[T], alloc: A) -> Result<Self, TensorError> {
        let numel = checked_numel(shape).ok_or(TensorError::ShapeOverflow(shape.to_vec()))?;
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            storage: TensorStorage::from_slice(data, alloc)?,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` with every element set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if the number of elements of `shape` overflows `usize`.
    pub fn from_shape_val(shape: [usize; N], value: T, alloc: A) -> Self {
        let numel = shape.iter().product::<usize>();
        Self {
            storage: TensorStorage::from_vec(vec![value; numel], alloc),
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new tensor with all elements set to zero.
    pub fn zeros(shape: [usize; N], alloc: A) -> Self
    where
        T: num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero(), alloc)
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Get the data of the tensor as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Get the data of the tensor as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Copies the elements of the tensor into a vector.
    pub fn into_vec(self) -> Vec<T> {
        self.storage.to_vec()
    }

    /// Returns the runtime element type.
    #[inline]
    pub fn dtype(&self) -> Dtype {
        T::DTYPE
    }

    /// Returns the device where the tensor is allocated.
    #[inline]
    pub fn device(&self) -> Device {
        Device::Cpu
    }

    /// Returns the memory offset of the element at `index`, if within bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Returns a reference to the element at `index`, or `None` when out of bounds.
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index)
            .and_then(|offset| self.as_slice().get(offset))
    }

    /// Returns a reference to the element at `index` without bounds checking the shape.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is outside the storage.
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        let offset = index
            .iter()
            .zip(self.strides)
            .fold(0, |acc, (&idx, stride)| acc + idx * stride);
        &self.as_slice()[offset]
    }
}

impl<T: SafeTensorType, const M: usize> From<[T; M]> for Tensor<T, 1, CpuAllocator> {
    /// Builds a 1-D tensor of shape `[M]` from a fixed-size array.
    fn from(values: [T; M]) -> Self {
        Self {
            storage: TensorStorage::from_vec(values.to_vec(), CpuAllocator),
            shape: [M],
            strides: [1],
        }
    }
}

impl<T: SafeTensorType, const N: usize, A: TensorAllocator> Clone for Tensor<T, N, A> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape,
            strides: self.strides,
        }
    }
}

impl<T: SafeTensorType, const N: usize, A: TensorAllocator> std::fmt::Debug for Tensor<T, N, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("data", &self.as_slice())
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .finish()
    }
}

impl<T, const N: usize, A> PartialEq for Tensor<T, N, A>
where
    T: SafeTensorType + PartialEq,
    A: TensorAllocator,
{
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.as_slice() == other.as_slice()
    }
}
