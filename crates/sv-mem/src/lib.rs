#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod capacity_policy;
pub mod vec_types;

mod errors;
mod global_alloc;

pub use errors::ArrayError;
pub use capacity_policy::{CapacityPolicy, Doubling, Fixed};
pub use vec_types::{
    DynamicArray, FixedArray,
    CapacityHint, reserve,
    Iter, IterMut, IntoIter,
};

pub type Result<T> = core::result::Result<T, ArrayError>;
