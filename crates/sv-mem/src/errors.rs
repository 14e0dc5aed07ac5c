#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayError {
    OutOfRange {
        index: usize,
        len: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
    CapacityOverflow {
        requested: usize,
    },
    FixedCapacity {
        capacity: usize,
    },
}

impl ArrayError {

    /// Returns true for the errors that mean storage could not be obtained.
    #[inline(always)]
    pub fn is_alloc_failure(&self) -> bool {
        matches!(self, Self::AllocFailed { .. } | Self::CapacityOverflow { .. })
    }
}

impl core::fmt::Display for ArrayError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {} was out of range of len {}", index, len)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
            Self::CapacityOverflow { requested } => {
                write!(f, "requested capacity {} overflows the address space", requested)
            },
            Self::FixedCapacity { capacity } => {
                write!(f, "exceeded fixed capacity of {}", capacity)
            },
        }
    }
}

impl core::error::Error for ArrayError {}
