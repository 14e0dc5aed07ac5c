mod hint;
mod iter;
mod cmp;
mod dynamic_array;

pub use hint::{CapacityHint, reserve};
pub use iter::{Iter, IterMut, IntoIter};
pub use dynamic_array::{DynamicArray, FixedArray};
