#[macro_export]
macro_rules! const_assert {
    ($check:expr $(,$msg:tt)*) => {
        const _: () = assert!($check $(,$msg)*);
    };
}

#[macro_export]
macro_rules! size_of {
    ($t:ty) => {
        ::core::mem::size_of::<$t>()
    };
}

/// Builds a [`DynamicArray`](crate::DynamicArray) the way `vec!` builds a `Vec`.
///
/// Panics if the storage cannot be obtained.
#[macro_export]
macro_rules! dynamic_array {
    () => {
        <$crate::DynamicArray<_>>::new()
    };
    ($elem:expr; $n:expr) => {
        <$crate::DynamicArray<_>>::from_elem($n, $elem)
            .unwrap_or_else(|err| ::core::panic!("{}", err))
    };
    ($($x:expr),+ $(,)?) => {
        <$crate::DynamicArray<_>>::from([$($x),+])
    };
}
