use core::{
    iter::FusedIterator,
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
};

use crate::global_alloc;

#[inline(always)]
const fn is_zero_sized<T>() -> bool {
    mem::size_of::<T>() == 0
}

/// Position `len` elements past `ptr`.
///
/// Zero-sized elements all live at one address, so their count is carried
/// in the address of the end position instead.
#[inline(always)]
unsafe fn offset_end<T>(ptr: NonNull<T>, len: usize) -> NonNull<T> {
    if is_zero_sized::<T>() {
        unsafe { NonNull::new_unchecked(ptr.as_ptr().wrapping_byte_add(len)) }
    }
    else {
        unsafe { ptr.add(len) }
    }
}

#[inline(always)]
unsafe fn step_back<T>(end: NonNull<T>) -> NonNull<T> {
    if is_zero_sized::<T>() {
        unsafe { NonNull::new_unchecked(end.as_ptr().wrapping_byte_sub(1)) }
    }
    else {
        unsafe { end.sub(1) }
    }
}

#[inline(always)]
fn distance<T>(ptr: NonNull<T>, end: NonNull<T>) -> usize {
    if is_zero_sized::<T>() {
        return (end.as_ptr() as usize).wrapping_sub(ptr.as_ptr() as usize)
    }
    unsafe { end.offset_from(ptr) as usize }
}

macro_rules! cursor_iter {
    ($name:ident $(, $mutability:tt)?) => {

        /// Cursor pair over the live range of an array, from `begin` to `end`.
        pub struct $name<'a, T> {
            ptr: NonNull<T>,
            end: NonNull<T>,
            _marker: PhantomData<&'a $($mutability)? T>,
        }

        impl<'a, T> $name<'a, T> {

            /// # Safety
            /// `len` live elements starting at `ptr` must be borrowed for `'a`.
            #[inline(always)]
            pub(crate) unsafe fn new(ptr: NonNull<T>, len: usize) -> Self {
                Self {
                    ptr,
                    end: unsafe { offset_end(ptr, len) },
                    _marker: PhantomData,
                }
            }

            /// Raw position of the next element.
            #[inline(always)]
            pub fn begin(&self) -> *const T {
                self.ptr.as_ptr()
            }

            /// Raw position one past the last element.
            #[inline(always)]
            pub fn end(&self) -> *const T {
                self.end.as_ptr()
            }
        }

        impl<'a, T> Iterator for $name<'a, T> {

            type Item = &'a $($mutability)? T;

            #[inline(always)]
            fn next(&mut self) -> Option<Self::Item> {
                if self.ptr == self.end {
                    None
                }
                else {
                    let current = self.ptr;
                    if is_zero_sized::<T>() {
                        self.end = unsafe { step_back(self.end) };
                    }
                    else {
                        self.ptr = unsafe { self.ptr.add(1) };
                    }
                    Some(unsafe { &$($mutability)? *current.as_ptr() })
                }
            }

            #[inline(always)]
            fn size_hint(&self) -> (usize, Option<usize>) {
                let len = distance(self.ptr, self.end);
                (len, Some(len))
            }
        }

        impl<'a, T> DoubleEndedIterator for $name<'a, T> {

            #[inline(always)]
            fn next_back(&mut self) -> Option<Self::Item> {
                if self.ptr == self.end {
                    None
                }
                else {
                    self.end = unsafe { step_back(self.end) };
                    let current = if is_zero_sized::<T>() { self.ptr } else { self.end };
                    Some(unsafe { &$($mutability)? *current.as_ptr() })
                }
            }
        }

        impl<'a, T> ExactSizeIterator for $name<'a, T> {}

        impl<'a, T> FusedIterator for $name<'a, T> {}
    };
}

cursor_iter!(Iter);
cursor_iter!(IterMut, mut);

unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}
unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}
unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}
unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {

    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            end: self.end,
            _marker: PhantomData,
        }
    }
}

/// Owning iterator; releases the buffer once dropped.
pub struct IntoIter<T> {
    buf: NonNull<T>,
    capacity: usize,
    ptr: NonNull<T>,
    end: NonNull<T>,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {

    /// # Safety
    /// The caller gives up `buf`, which holds `len` live elements in
    /// `capacity` slots obtained from `global_alloc`.
    #[inline(always)]
    pub(crate) unsafe fn new(buf: NonNull<T>, capacity: usize, len: usize) -> Self {
        Self {
            buf,
            capacity,
            ptr: buf,
            end: unsafe { offset_end(buf, len) },
            _marker: PhantomData,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), distance(self.ptr, self.end)) }
    }
}

impl<T> Iterator for IntoIter<T> {

    type Item = T;

    #[inline(always)]
    fn next(&mut self) -> Option<T> {
        if self.ptr == self.end {
            None
        }
        else {
            let current = self.ptr;
            if is_zero_sized::<T>() {
                self.end = unsafe { step_back(self.end) };
            }
            else {
                self.ptr = unsafe { self.ptr.add(1) };
            }
            Some(unsafe { current.read() })
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = distance(self.ptr, self.end);
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<T> {
        if self.ptr == self.end {
            None
        }
        else {
            self.end = unsafe { step_back(self.end) };
            let current = if is_zero_sized::<T>() { self.ptr } else { self.end };
            Some(unsafe { current.read() })
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {

    fn drop(&mut self) {
        let remaining = distance(self.ptr, self.end);
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), remaining));
            global_alloc::free_uninit(self.buf, self.capacity);
        }
    }
}
