use std::alloc;
use std::alloc::Layout;

use thiserror::Error;

/// An error type for tensor allocator operations.
#[derive(Debug, Error, PartialEq)]
pub enum TensorAllocatorError {
    /// The requested layout overflows or is otherwise invalid.
    #[error("Invalid tensor layout {0}")]
    LayoutError(core::alloc::LayoutError),

    /// The allocator returned a null pointer.
    #[error("Null pointer")]
    NullPointer,
}

/// A trait for allocating and deallocating memory for tensors.
///
/// # Safety
///
/// Memory handed to [`TensorAllocator::dealloc`] may come either from
/// [`TensorAllocator::alloc`] or from a `Vec` adopted by the storage.
/// Implementors must allocate from and release to the global allocator.
pub unsafe trait TensorAllocator: Clone {
    /// Allocates memory for a tensor with the given layout.
    fn alloc(&self, layout: Layout) -> Result<*mut u8, TensorAllocatorError>;

    /// Deallocates memory for a tensor with the given layout.
    fn dealloc(&self, ptr: *mut u8, layout: Layout);
}

/// A tensor allocator that uses the system allocator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuAllocator;

// SAFETY: both methods forward to the global allocator.
unsafe impl TensorAllocator for CpuAllocator {
    /// Allocates memory for a tensor with the given layout.
    ///
    /// # Arguments
    ///
    /// * `layout` - The layout of the tensor. Must have a non-zero size.
    ///
    /// # Returns
    ///
    /// A non-null pointer to the allocated memory if successful, otherwise an error.
    fn alloc(&self, layout: Layout) -> Result<*mut u8, TensorAllocatorError> {
        let ptr = unsafe { alloc::alloc(layout) };
        if ptr.is_null() {
            Err(TensorAllocatorError::NullPointer)?
        }
        Ok(ptr)
    }

    /// Deallocates memory for a tensor with the given layout.
    ///
    /// # Arguments
    ///
    /// * `ptr` - A non-null pointer to the allocated memory.
    /// * `layout` - The layout of the tensor.
    #[allow(clippy::not_unsafe_ptr_arg_deref)]
    fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if !ptr.is_null() && layout.size() != 0 {
            unsafe { alloc::dealloc(ptr, layout) }
        }
    }
}
