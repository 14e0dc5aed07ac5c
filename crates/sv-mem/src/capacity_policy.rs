use crate::errors::ArrayError;

/// Decides how a [`DynamicArray`](crate::DynamicArray) buffer may change size.
pub trait CapacityPolicy {

    /// Whether a full buffer can ever grow past its current size.
    const GROWS: bool;

    /// Whether an explicit request (`reserve`, growing `resize`) may move a
    /// buffer that currently holds `current` slots.
    fn can_reallocate(current: usize) -> bool;

    /// Capacity to move to when `push_back` or `insert` finds the buffer full.
    fn grow(current: usize) -> Result<usize, ArrayError>;
}

/// Lazy doubling: 1 slot for an empty buffer, twice the current size otherwise.
pub struct Doubling {}

impl CapacityPolicy for Doubling {

    const GROWS: bool = true;

    #[inline(always)]
    fn can_reallocate(_: usize) -> bool {
        true
    }

    #[inline(always)]
    fn grow(current: usize) -> Result<usize, ArrayError> {
        if current == 0 {
            Ok(1)
        }
        else {
            current
                .checked_mul(2)
                .ok_or(ArrayError::CapacityOverflow { requested: usize::MAX })
        }
    }
}

/// The buffer is sized once, while it is still unallocated, and never moves.
pub struct Fixed {}

impl CapacityPolicy for Fixed {

    const GROWS: bool = false;

    #[inline(always)]
    fn can_reallocate(current: usize) -> bool {
        current == 0
    }

    #[inline(always)]
    fn grow(current: usize) -> Result<usize, ArrayError> {
        Err(ArrayError::FixedCapacity { capacity: current })
    }
}
