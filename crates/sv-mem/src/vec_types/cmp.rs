use core::cmp::Ordering;

use crate::capacity_policy::CapacityPolicy;

use super::DynamicArray;

impl<T, U, P, Q> PartialEq<DynamicArray<U, Q>> for DynamicArray<T, P>
    where
        T: PartialEq<U>,
        P: CapacityPolicy,
        Q: CapacityPolicy,
{

    fn eq(&self, other: &DynamicArray<U, Q>) -> bool {
        if self.len() != other.len() {
            return false
        }
        self.iter()
            .zip(other.iter())
            .all(|(lhs, rhs)| lhs == rhs)
    }
}

impl<T, P> Eq for DynamicArray<T, P>
    where
        T: Eq,
        P: CapacityPolicy,
{}

impl<T, U, P, const N: usize> PartialEq<[U; N]> for DynamicArray<T, P>
    where
        T: PartialEq<U>,
        P: CapacityPolicy,
{

    #[inline(always)]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, P> PartialEq<[U]> for DynamicArray<T, P>
    where
        T: PartialEq<U>,
        P: CapacityPolicy,
{

    #[inline(always)]
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, P> PartialEq<&[U]> for DynamicArray<T, P>
    where
        T: PartialEq<U>,
        P: CapacityPolicy,
{

    #[inline(always)]
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

/// Lexicographic: the first differing element decides, and a shorter array
/// whose elements are a prefix of the longer one sorts first.
impl<T, P> PartialOrd for DynamicArray<T, P>
    where
        T: PartialOrd,
        P: CapacityPolicy,
{

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let common = self.len().min(other.len());
        for i in 0..common {
            match self[i].partial_cmp(&other[i]) {
                Some(Ordering::Equal) => {},
                non_eq => return non_eq,
            }
        }
        self.len().partial_cmp(&other.len())
    }
}

impl<T, P> Ord for DynamicArray<T, P>
    where
        T: Ord,
        P: CapacityPolicy,
{

    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.len().min(other.len());
        for i in 0..common {
            match self[i].cmp(&other[i]) {
                Ordering::Equal => {},
                non_eq => return non_eq,
            }
        }
        self.len().cmp(&other.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::{DynamicArray, FixedArray};

    #[test]
    fn equality_checks_length_and_order() {
        let a: DynamicArray<i32> = dynamic_array![1, 2, 3];
        assert_eq!(a, dynamic_array![1, 2, 3]);
        assert_ne!(dynamic_array![1, 2], a);
        assert_ne!(a, dynamic_array![3, 2, 1]);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn equality_is_symmetric() {
        let a: DynamicArray<i32> = dynamic_array![4, 5];
        let b: DynamicArray<i32> = dynamic_array![4, 5];
        assert!(a == b && b == a);
        let c: DynamicArray<i32> = dynamic_array![4];
        assert!(a != c && c != a);
    }

    #[test]
    fn equality_ignores_capacity() {
        let mut a: DynamicArray<u8> = dynamic_array![7, 8];
        a.reserve(32).unwrap();
        let b: DynamicArray<u8> = dynamic_array![7, 8];
        assert_ne!(a.capacity(), b.capacity());
        assert_eq!(a, b);
    }

    #[test]
    fn equality_across_policies() {
        let a: DynamicArray<i32> = dynamic_array![1, 2];
        let b = FixedArray::<i32>::from([1, 2]);
        assert!(a == b);
    }

    #[test]
    fn compares_against_arrays_and_slices() {
        let a: DynamicArray<i32> = dynamic_array![1, 2, 3];
        assert_eq!(a, [1, 2, 3]);
        assert_eq!(a, &[1, 2, 3][..]);
        assert!(a != [1, 2]);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        let short: DynamicArray<i32> = dynamic_array![1, 2];
        let long: DynamicArray<i32> = dynamic_array![1, 2, 3];
        assert!(short < long);
        assert!(short <= long);
        assert!(long > short);
        assert!(long >= short);
    }

    #[test]
    fn first_difference_decides() {
        let a: DynamicArray<i32> = dynamic_array![1, 3];
        let b: DynamicArray<i32> = dynamic_array![1, 2, 9];
        assert!(!(a < b));
        assert!(a > b);
        assert_eq!(a.cmp(&b), core::cmp::Ordering::Greater);
    }

    #[test]
    fn equal_arrays_are_not_less() {
        let a: DynamicArray<i32> = dynamic_array![1, 2];
        let b: DynamicArray<i32> = dynamic_array![1, 2];
        assert!(!(a < b));
        assert!(a <= b && a >= b);
        let empty: DynamicArray<i32> = DynamicArray::new();
        assert!(empty < a);
    }

    #[test]
    fn sorts_like_slices() {
        let mut arrays: DynamicArray<DynamicArray<i32>> = dynamic_array![
            dynamic_array![2],
            dynamic_array![1, 5],
            DynamicArray::new(),
            dynamic_array![1],
        ];
        arrays.sort();
        let expected: [&[i32]; 4] = [&[], &[1], &[1, 5], &[2]];
        for (array, expected) in arrays.iter().zip(expected) {
            assert_eq!(array.as_slice(), expected);
        }
    }
}
