#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `rgbd-tensor` provides the owned, row-major buffers that the image buffers of
//! an RGB-D pair are built on, plus the small integer vectors used to report
//! 2D bounds.
//!
//! - **Tensor**: shape and stride information over an owned storage
//! - **TensorStorage**: contiguous memory released through a [`TensorAllocator`]
//! - **Dtype**: runtime tag of the element type, used by legacy conversions
//!
//! ```rust
//! use rgbd_tensor::{CpuAllocator, Tensor1, Tensor2};
//!
//! let t = Tensor2::<u8, CpuAllocator>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6], CpuAllocator).unwrap();
//! assert_eq!(t.get([1, 2]), Some(&6));
//!
//! let bound = Tensor1::<i64>::from([640, 480]);
//! assert_eq!(bound.as_slice(), &[640, 480]);
//! ```

/// Allocator module containing memory management utilities.
pub mod allocator;

/// Bincode module for binary serialization and deserialization.
#[cfg(feature = "bincode")]
pub mod bincode;

/// Device module containing device abstraction.
pub mod device;

/// Runtime element type tags.
pub mod dtype;

/// Serde module for JSON/other format serialization and deserialization.
#[cfg(feature = "serde")]
pub mod serde;

/// Storage module containing low-level memory buffer implementations.
pub mod storage;

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::allocator::{CpuAllocator, TensorAllocator, TensorAllocatorError};
pub use crate::device::Device;
pub use crate::dtype::{Dtype, SafeTensorType};
pub use crate::storage::TensorStorage;
pub use crate::tensor::{Tensor, TensorError};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T, A = CpuAllocator> = Tensor<T, 1, A>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T, A = CpuAllocator> = Tensor<T, 2, A>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T, A = CpuAllocator> = Tensor<T, 3, A>;

/// Type alias for a 4-dimensional tensor.
pub type Tensor4<T, A = CpuAllocator> = Tensor<T, 4, A>;

/// Type alias for a 2-dimensional tensor with CPU allocator.
pub type CpuTensor2<T> = Tensor2<T, CpuAllocator>;
