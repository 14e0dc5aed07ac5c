/// A one-shot request to pre-size a [`DynamicArray`](crate::DynamicArray)
/// without creating any elements.
///
/// Produced by [`reserve`] and consumed by
/// [`DynamicArray::with_hint`](crate::DynamicArray::with_hint). It is neither
/// `Clone` nor `Copy`, so each hint sizes exactly one array.
#[derive(Debug)]
pub struct CapacityHint {
    capacity: usize,
}

impl CapacityHint {

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[inline(always)]
pub fn reserve(capacity: usize) -> CapacityHint {
    CapacityHint { capacity }
}
