use core::{
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut, Index, IndexMut, Range},
    ptr::{self, NonNull},
    slice,
};

use crate::{
    capacity_policy::{CapacityPolicy, Doubling, Fixed},
    errors::ArrayError::{self, FixedCapacity, OutOfRange},
    global_alloc,
    Result,
};

use super::{CapacityHint, Iter, IterMut, IntoIter};

/// A growable contiguous array that manages its own storage.
///
/// Slots `[0, len)` hold live elements and `[len, capacity)` are
/// uninitialized. The buffer is only allocated while `capacity != 0`.
///
/// Operations that build a new buffer (`reserve`, growing `resize`,
/// `push_back`/`insert` at capacity, `try_clone`) give the strong guarantee:
/// on error the array is left exactly as it was. Operations that work in
/// place (`resize` filling slots, `clear`, `truncate`) only keep the array
/// valid if an element constructor or destructor panics part way through.
pub struct DynamicArray<T, P = Doubling>
    where
        P: CapacityPolicy,
{
    data: NonNull<T>,
    capacity: usize,
    len: usize,
    _markers: PhantomData<(T, fn() -> P)>,
}

pub type FixedArray<T> = DynamicArray<T, Fixed>;

const_assert!(size_of!(DynamicArray<u32>) == size_of!(Option<DynamicArray<u32>>));

unsafe impl<T: Send, P: CapacityPolicy> Send for DynamicArray<T, P> {}
unsafe impl<T: Sync, P: CapacityPolicy> Sync for DynamicArray<T, P> {}

#[cold]
#[track_caller]
fn fail(err: ArrayError) -> ! {
    panic!("{}", err)
}

impl<T, P> DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            len: 0,
            _markers: PhantomData,
        }
    }

    fn with_capacity_exact(capacity: usize) -> Result<Self> {
        let data = global_alloc::allocate_uninit(capacity)?;
        Ok(Self {
            data,
            capacity,
            len: 0,
            _markers: PhantomData,
        })
    }

    /// `len` default-constructed elements in a buffer of exactly `len` slots.
    pub fn with_len(len: usize) -> Result<Self>
        where
            T: Default,
    {
        Self::with_len_with(len, T::default)
    }

    pub fn with_len_with<F>(len: usize, mut f: F) -> Result<Self>
        where
            F: FnMut() -> T,
    {
        let mut array = Self::with_capacity_exact(len)?;
        for _ in 0..len {
            unsafe { array.push_unchecked(f()); }
        }
        Ok(array)
    }

    /// `len` copies of `value` in a buffer of exactly `len` slots.
    pub fn from_elem(len: usize, value: T) -> Result<Self>
        where
            T: Clone,
    {
        let mut array = Self::with_capacity_exact(len)?;
        if len != 0 {
            for _ in 1..len {
                unsafe { array.push_unchecked(value.clone()); }
            }
            unsafe { array.push_unchecked(value); }
        }
        Ok(array)
    }

    /// Moves the items of a literal sequence in order, with no spare capacity.
    pub fn from_array<const N: usize>(items: [T; N]) -> Result<Self> {
        let mut array = Self::with_capacity_exact(N)?;
        let items = ManuallyDrop::new(items);
        unsafe {
            ptr::copy_nonoverlapping(items.as_ptr(), array.data.as_ptr(), N);
        }
        array.len = N;
        Ok(array)
    }

    /// An empty array whose buffer already holds `hint.capacity()` slots.
    pub fn with_hint(hint: CapacityHint) -> Result<Self> {
        let mut array = Self::new();
        array.reserve(hint.capacity())?;
        Ok(array)
    }

    /// Deep copy with the same capacity as `self`, headroom included.
    pub fn try_clone(&self) -> Result<Self>
        where
            T: Clone,
    {
        let mut array = Self::with_capacity_exact(self.capacity)?;
        for value in self.iter() {
            unsafe { array.push_unchecked(value.clone()); }
        }
        Ok(array)
    }

    /// Replaces the contents of `self` with a copy of `source`.
    ///
    /// The copy is built first and swapped in, so a failed allocation or a
    /// panicking `clone` leaves `self` untouched.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<()>
        where
            T: Clone,
    {
        let mut copy = source.try_clone()?;
        self.swap_with(&mut copy);
        Ok(())
    }

    /// Moves the whole buffer out, leaving `self` empty and unallocated.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Drops the current contents and adopts the buffer of `from`, which is
    /// left empty and unallocated. No element is moved or copied.
    pub fn move_from(&mut self, from: &mut Self) {
        let adopted = from.take();
        *self = adopted;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// Raw `begin..end` positions of the live range.
    #[inline(always)]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        let begin = self.data.as_ptr() as *const T;
        begin..unsafe { begin.add(self.len) }
    }

    #[inline(always)]
    pub fn as_mut_ptr_range(&mut self) -> Range<*mut T> {
        let begin = self.data.as_ptr();
        begin..unsafe { begin.add(self.len) }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    /// Checked access.
    #[inline(always)]
    pub fn at(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(OutOfRange { index, len: self.len })
        }
        Ok(unsafe { self.data.add(index).as_ref() })
    }

    #[inline(always)]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(OutOfRange { index, len: self.len })
        }
        Ok(unsafe { self.data.add(index).as_mut() })
    }

    /// # Safety
    /// `index` must be less than `len`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {} out of bounds for length {}", index, self.len);
        unsafe { self.data.add(index).as_ref() }
    }

    /// # Safety
    /// `index` must be less than `len`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {} out of bounds for length {}", index, self.len);
        unsafe { self.data.add(index).as_mut() }
    }

    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            None
        }
        else {
            unsafe {
                Some(
                    self.data.add(self.len - 1).as_ref()
                )
            }
        }
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        }
        else {
            unsafe {
                Some(
                    self.data.add(self.len - 1).as_mut()
                )
            }
        }
    }

    /// Writes `value` into the first uninitialized slot.
    ///
    /// # Safety
    /// `len` must be less than `capacity`.
    #[inline(always)]
    unsafe fn push_unchecked(&mut self, value: T) -> NonNull<T> {
        debug_assert!(self.len < self.capacity);
        unsafe {
            let ptr = self.data.add(self.len);
            ptr.write(value);
            self.len += 1;
            ptr
        }
    }

    /// Frees the buffer without dropping anything in it.
    ///
    /// # Safety
    /// The live elements must already be moved out or dropped, and the
    /// buffer must be replaced before `self` is used again.
    #[inline(always)]
    unsafe fn release(&mut self) {
        unsafe { global_alloc::free_uninit(self.data, self.capacity); }
    }

    fn realloc_exact(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(self.len <= new_capacity);
        let new_data = global_alloc::allocate_uninit::<T>(new_capacity)?;
        unsafe {
            ptr::copy_nonoverlapping(self.data.as_ptr(), new_data.as_ptr(), self.len);
            self.release();
        }
        self.data = new_data;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Moves every element of `staged` to the end of `self`, reserving
    /// exactly the room they need.
    fn adopt_exact<Q: CapacityPolicy>(&mut self, mut staged: DynamicArray<T, Q>) -> Result<()> {
        let count = staged.len;
        if count == 0 {
            return Ok(())
        }
        let required = self.len
            .checked_add(count)
            .ok_or(ArrayError::CapacityOverflow { requested: usize::MAX })?;
        self.reserve(required)?;
        unsafe {
            ptr::copy_nonoverlapping(staged.data.as_ptr(), self.data.as_ptr().add(self.len), count);
        }
        staged.len = 0;
        self.len = required;
        Ok(())
    }

    /// Grows the buffer to exactly `new_capacity` slots.
    ///
    /// Does nothing when `new_capacity <= capacity`; element addresses stay
    /// put in that case. Strong guarantee.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity {
            return Ok(())
        }
        if !P::can_reallocate(self.capacity) {
            return Err(FixedCapacity { capacity: self.capacity })
        }
        self.realloc_exact(new_capacity)
    }

    /// Appends `value`, growing the buffer by the capacity policy when full.
    ///
    /// Strong guarantee: on error the array is unchanged and `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<&mut T> {
        if self.len == self.capacity {
            let new_capacity = P::grow(self.capacity)?;
            self.realloc_exact(new_capacity)?;
        }
        unsafe {
            let mut ptr = self.push_unchecked(value);
            Ok(ptr.as_mut())
        }
    }

    /// Drops the last element. The buffer is kept.
    ///
    /// # Panics
    /// Panics if the array is empty.
    #[track_caller]
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            panic!("pop_back on an empty array")
        }
        self.len -= 1;
        unsafe { self.data.add(self.len).drop_in_place(); }
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None
        }
        self.len -= 1;
        Some(unsafe { self.data.add(self.len).read() })
    }

    /// Inserts `value` at `index`, shifting the suffix one slot right, and
    /// returns the index the value now lives at.
    ///
    /// A full buffer is replaced by a larger one built as prefix, value,
    /// suffix; on error the array is unchanged and `value` is dropped.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize> {
        if index > self.len {
            panic!("insertion index {} is out of bounds for length {}", index, self.len)
        }
        if self.len == self.capacity {
            let new_capacity = P::grow(self.capacity)?;
            let new_data = global_alloc::allocate_uninit::<T>(new_capacity)?;
            unsafe {
                let src = self.data.as_ptr();
                let dst = new_data.as_ptr();
                ptr::copy_nonoverlapping(src, dst, index);
                dst.add(index).write(value);
                ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), self.len - index);
                self.release();
            }
            self.data = new_data;
            self.capacity = new_capacity;
        }
        else {
            unsafe {
                let slot = self.data.as_ptr().add(index);
                ptr::copy(slot, slot.add(1), self.len - index);
                slot.write(value);
            }
        }
        self.len += 1;
        Ok(index)
    }

    /// Removes and returns the element at `index`, shifting the suffix left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        if index >= self.len {
            panic!("removal index {} is out of bounds for length {}", index, self.len)
        }
        unsafe {
            let slot = self.data.as_ptr().add(index);
            let removed = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            removed
        }
    }

    /// Drops the element at `index` and returns the index of the element that
    /// took its place (`len` if the last one was erased).
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Removes the element at `index` by moving the last element into its slot.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn swap_remove(&mut self, index: usize) -> T {
        if index >= self.len {
            panic!("removal index {} is out of bounds for length {}", index, self.len)
        }
        unsafe {
            let removed = self.data.add(index).read();
            self.len -= 1;
            if index != self.len {
                self.data.add(index).write(self.data.add(self.len).read());
            }
            removed
        }
    }

    /// Drops every element past `len`. The buffer is kept.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return
        }
        let tail = self.len - len;
        self.len = len;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data.as_ptr().add(len), tail));
        }
    }

    /// Drops every element. Capacity and buffer are kept.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Sets the length to `len`, default-constructing new trailing elements
    /// and dropping excluded ones.
    ///
    /// Growing past capacity reallocates to exactly `len` first (strong
    /// guarantee); filling slots afterwards is only basic.
    pub fn resize(&mut self, len: usize) -> Result<()>
        where
            T: Default,
    {
        self.resize_with(len, T::default)
    }

    pub fn resize_with<F>(&mut self, len: usize, mut f: F) -> Result<()>
        where
            F: FnMut() -> T,
    {
        if len > self.len {
            self.reserve(len)?;
            while self.len < len {
                unsafe { self.push_unchecked(f()); }
            }
        }
        else {
            self.truncate(len);
        }
        Ok(())
    }

    /// Exchanges buffers with `other` without touching any element.
    #[inline(always)]
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.data, &mut other.data);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.data, self.len) }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.data, self.len) }
    }
}

impl<T, P> Drop for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data.as_ptr(), self.len));
            self.release();
        }
    }
}

impl<T, P> Default for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> Clone for DynamicArray<T, P>
    where
        T: Clone,
        P: CapacityPolicy,
{

    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| fail(err))
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            fail(err)
        }
    }
}

impl<T, P> Debug for DynamicArray<T, P>
    where
        T: Debug,
        P: CapacityPolicy,
{

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, P> Hash for DynamicArray<T, P>
    where
        T: Hash,
        P: CapacityPolicy,
{

    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T, P> Index<usize> for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    type Output = T;

    #[inline(always)]
    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.data.add(index).as_ref() }
    }
}

impl<T, P> IndexMut<usize> for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    #[inline(always)]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.data.add(index).as_mut() }
    }
}

impl<T, P> AsRef<[T]> for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, P> AsMut<[T]> for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, P> Deref for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, P> DerefMut for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, P, const N: usize> From<[T; N]> for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    fn from(items: [T; N]) -> Self {
        Self::from_array(items).unwrap_or_else(|err| fail(err))
    }
}

impl<T, P> TryFrom<CapacityHint> for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    type Error = ArrayError;

    fn try_from(hint: CapacityHint) -> Result<Self> {
        Self::with_hint(hint)
    }
}

impl<T, P> Extend<T> for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    /// Panics if storage cannot be obtained, or if the items do not fit a
    /// policy that cannot grow.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        if !P::GROWS && self.capacity == 0 && upper != Some(lower) {
            let staged: DynamicArray<T> = iter.collect();
            if let Err(err) = self.adopt_exact(staged) {
                fail(err)
            }
            return
        }
        if self.capacity - self.len < lower && P::can_reallocate(self.capacity) {
            let required = self.len.saturating_add(lower);
            if let Err(err) = self.reserve(required) {
                fail(err)
            }
        }
        for value in iter {
            if let Err(err) = self.push_back(value) {
                fail(err)
            }
        }
    }
}

impl<T, P> FromIterator<T> for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T, P> IntoIterator for DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let array = ManuallyDrop::new(self);
        unsafe { IntoIter::new(array.data, array.capacity, array.len) }
    }
}

impl<'a, T, P> IntoIterator for &'a DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, P> IntoIterator for &'a mut DynamicArray<T, P>
    where
        P: CapacityPolicy,
{

    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
