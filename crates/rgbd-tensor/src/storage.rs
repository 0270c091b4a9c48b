use std::{alloc::Layout, ptr::NonNull};

use crate::{
    allocator::{TensorAllocator, TensorAllocatorError},
    dtype::SafeTensorType,
};

/// Owned contiguous memory region holding the elements of a tensor.
///
/// The buffer is either adopted from a `Vec` without copying or allocated
/// through the [`TensorAllocator`]. In both cases it is released through the
/// allocator when the storage is dropped.
///
/// # Fields
///
/// * `ptr` - Pointer to the first element. Dangling when nothing was allocated.
/// * `len` - The number of initialized elements.
/// * `layout` - The layout of the allocation, used to release it.
/// * `alloc` - The allocator that owns the memory.
pub struct TensorStorage<T: SafeTensorType, A: TensorAllocator> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
    alloc: A,
}

impl<T: SafeTensorType, A: TensorAllocator> TensorStorage<T, A> {
    /// Creates a new tensor storage from a vector without copying the data.
    ///
    /// # Arguments
    ///
    /// * `vec` - The vector whose buffer is adopted by the storage.
    /// * `alloc` - The allocator that releases the buffer.
    pub fn from_vec(vec: Vec<T>, alloc: A) -> Self {
        let mut vec = std::mem::ManuallyDrop::new(vec);
        let len = vec.len();
        let capacity = vec.capacity();

        // SAFETY: the pointer of a Vec is never null, only dangling when empty.
        let ptr = unsafe { NonNull::new_unchecked(vec.as_mut_ptr()) };

        // SAFETY: the Vec allocated exactly `capacity` elements of `T`, so this
        // layout is the one it was created with.
        let layout = unsafe {
            Layout::from_size_align_unchecked(
                capacity * std::mem::size_of::<T>(),
                std::mem::align_of::<T>(),
            )
        };

        Self {
            ptr,
            len,
            layout,
            alloc,
        }
    }

    /// Creates a new tensor storage by allocating through `alloc` and copying `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid or the allocation fails.
    pub fn from_slice(data: &[T], alloc: A) -> Result<Self, TensorAllocatorError> {
        let layout = Layout::array::<T>(data.len()).map_err(TensorAllocatorError::LayoutError)?;
        if layout.size() == 0 {
            return Ok(Self::from_vec(Vec::new(), alloc));
        }

        let raw_ptr = alloc.alloc(layout)?;
        let ptr = NonNull::new(raw_ptr as *mut T).ok_or(TensorAllocatorError::NullPointer)?;

        // SAFETY: `ptr` is a fresh allocation sized and aligned for `data.len()`
        // elements, so the regions do not overlap.
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), ptr.as_ptr(), data.len());
        }

        Ok(Self {
            ptr,
            len: data.len(),
            layout,
            alloc,
        })
    }

    /// Returns the allocator used to allocate the tensor storage.
    #[inline]
    pub fn alloc(&self) -> &A {
        &self.alloc
    }

    /// Returns the number of elements in the storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the tensor storage holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the data pointer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Return the data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is valid and aligned for `len` initialized elements.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Return the data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Copies the elements out into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

// SAFETY: the storage exclusively owns its buffer, like a `Vec<T>`.
unsafe impl<T: SafeTensorType, A: TensorAllocator + Send> Send for TensorStorage<T, A> {}

// SAFETY: shared references only hand out `&[T]`.
unsafe impl<T: SafeTensorType, A: TensorAllocator + Sync> Sync for TensorStorage<T, A> {}

impl<T: SafeTensorType, A: TensorAllocator> Drop for TensorStorage<T, A> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            self.alloc
                .dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
        }
    }
}

impl<T: SafeTensorType, A: TensorAllocator> Clone for TensorStorage<T, A> {
    /// Deep copies the elements into a new buffer.
    fn clone(&self) -> Self {
        Self::from_vec(self.to_vec(), self.alloc.clone())
    }
}

impl<T: SafeTensorType, A: TensorAllocator> std::fmt::Debug for TensorStorage<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("layout", &self.layout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::CpuAllocator;

    type CpuStorage<T> = TensorStorage<T, CpuAllocator>;

    #[test]
    fn test_tensor_storage_from_vec() {
        let storage = CpuStorage::<u8>::from_vec(vec![0, 1, 2, 3, 4, 5], CpuAllocator);
        assert_eq!(storage.len(), 6);
        assert!(!storage.is_empty());
        assert_eq!(storage.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_tensor_storage_from_slice() -> Result<(), TensorAllocatorError> {
        let storage = CpuStorage::<u16>::from_slice(&[7, 8, 9], CpuAllocator)?;
        assert_eq!(storage.as_slice(), &[7, 8, 9]);
        assert!(!storage.as_ptr().is_null());
        Ok(())
    }

    #[test]
    fn test_tensor_storage_empty() -> Result<(), TensorAllocatorError> {
        let storage = CpuStorage::<f32>::from_slice(&[], CpuAllocator)?;
        assert!(storage.is_empty());
        assert_eq!(storage.as_slice(), &[] as &[f32]);

        let storage = CpuStorage::<f32>::from_vec(Vec::new(), CpuAllocator);
        assert!(storage.is_empty());
        Ok(())
    }

    #[test]
    fn test_tensor_storage_mutability() {
        let mut storage = CpuStorage::<i32>::from_vec(vec![1, 2, 3, 4], CpuAllocator);
        storage.as_mut_slice()[0] = 10;
        assert_eq!(storage.as_slice(), &[10, 2, 3, 4]);
    }

    #[test]
    fn test_tensor_storage_clone_is_deep() {
        let mut storage = CpuStorage::<i32>::from_vec(vec![1, 2, 3], CpuAllocator);
        let copy = storage.clone();
        storage.as_mut_slice()[1] = 20;
        assert_eq!(copy.as_slice(), &[1, 2, 3]);
        assert_ne!(copy.as_ptr(), storage.as_ptr());
    }

    #[test]
    fn test_tensor_storage_with_capacity() {
        let mut vec = Vec::with_capacity(16);
        vec.extend_from_slice(&[1u8, 2, 3]);
        let storage = CpuStorage::<u8>::from_vec(vec, CpuAllocator);
        assert_eq!(storage.len(), 3);
        assert_eq!(storage.to_vec(), vec![1, 2, 3]);
    }

    #[derive(Clone, Default)]
    struct CountingAllocator {
        frees: std::rc::Rc<std::cell::Cell<usize>>,
    }

    // SAFETY: forwards to the global allocator through `CpuAllocator`.
    unsafe impl TensorAllocator for CountingAllocator {
        fn alloc(&self, layout: Layout) -> Result<*mut u8, TensorAllocatorError> {
            CpuAllocator.alloc(layout)
        }

        fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            self.frees.set(self.frees.get() + 1);
            CpuAllocator.dealloc(ptr, layout)
        }
    }

    #[test]
    fn test_tensor_storage_custom_allocator() -> Result<(), TensorAllocatorError> {
        let alloc = CountingAllocator::default();
        {
            let adopted = TensorStorage::<u16, _>::from_vec(vec![1, 2, 3], alloc.clone());
            let copied = TensorStorage::<u16, _>::from_slice(&[4, 5], alloc.clone())?;
            let cloned = adopted.clone();
            assert_eq!(cloned.as_slice(), &[1, 2, 3]);
            assert_eq!(copied.as_slice(), &[4, 5]);
        }
        assert_eq!(alloc.frees.get(), 3);
        Ok(())
    }
}
