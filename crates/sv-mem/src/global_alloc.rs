use alloc::alloc::{Layout, alloc, dealloc};

use core::{
    mem,
    ptr::NonNull,
};

use crate::errors::ArrayError::{self, AllocFailed, CapacityOverflow};

/// Obtains uninitialized storage for `count` values of `T`.
///
/// Zero slots, or slots of a zero-sized `T`, succeed without touching the
/// allocator.
pub fn allocate_uninit<T>(count: usize) -> Result<NonNull<T>, ArrayError> {
    if count == 0 || mem::size_of::<T>() == 0 {
        return Ok(NonNull::dangling())
    }
    let layout = Layout::array::<T>(count)
        .map_err(|_| CapacityOverflow { requested: count })?;
    let ptr = unsafe { alloc(layout) };
    NonNull::new(ptr.cast::<T>())
        .ok_or(AllocFailed { new_capacity: count })
}

/// Releases storage obtained from [`allocate_uninit`] without dropping anything in it.
///
/// # Safety
/// `ptr` must come from `allocate_uninit::<T>(count)` and not have been freed.
pub unsafe fn free_uninit<T>(ptr: NonNull<T>, count: usize) {
    if count == 0 || mem::size_of::<T>() == 0 {
        return
    }
    let layout = match Layout::array::<T>(count) {
        Ok(l) => l,
        Err(_) => return,
    };
    unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout) }
}
