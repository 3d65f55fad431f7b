//! Fixed-length integer arrays that can be shared between threads.
//!
//! See [`CowArray`].
mod cow;
pub use self::cow::{CowArray, StagedWrite};
mod mutex;
pub use self::mutex::MutexArray;
mod rcu;
pub use self::rcu::RcuArray;

use crate::error::{ArrayError, Result};

/// The immutable contents of a copy-on-write array at one instant.
type Snapshot = Box<[i64]>;

/// A fixed-length array of integers, shared between threads.
pub trait ConcurrentArray {
    /// Creates an array of `length` zeros.
    fn new(length: usize) -> Self;

    /// Returns the number of elements in the array.
    ///
    /// This never changes after the array is created.
    fn len(&self) -> usize;

    /// Returns `true` if the array has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the element at `index`.
    fn get(&self, index: usize) -> Result<i64>;

    /// Sets the element at `index` to the specified value.
    fn set(&self, index: usize, value: i64) -> Result<()>;

    /// Returns a copy of every element in the array.
    fn to_vec(&self) -> Result<Vec<i64>>;
}

/// Checks that `index` lies in `[0, length)`.
fn check_index(index: usize, length: usize) -> Result<()> {
    if index >= length {
        return Err(ArrayError::IndexOutOfRange { index, length });
    }
    Ok(())
}

// Shares a suite of single-threaded tests between the implementations.
#[cfg(all(test, not(feature = "shuttle")))]
macro_rules! array_tests {
    ($($name:ident: $type:ty,)*) => {
    $(
        mod $name {
            use super::*;

            #[test]
            fn new_is_zero_filled() {
                let array = <$type>::new(8);
                for i in 0..8 {
                    assert_eq!(array.get(i), Ok(0));
                }
            }

            #[test]
            fn get_returns_previously_set_value() {
                let array = <$type>::new(5);
                array.set(2, 42).unwrap();
                assert_eq!(array.get(2), Ok(42));
            }

            #[test]
            fn set_leaves_other_elements_alone() {
                let array = <$type>::new(3);
                array.set(0, -7).unwrap();
                array.set(2, 9).unwrap();
                assert_eq!(array.to_vec(), Ok(vec![-7, 0, 9]));
            }

            #[test]
            fn get_out_of_range() {
                let array = <$type>::new(5);
                assert_eq!(
                    array.get(10),
                    Err(ArrayError::IndexOutOfRange { index: 10, length: 5 })
                );
                assert_eq!(
                    array.get(5),
                    Err(ArrayError::IndexOutOfRange { index: 5, length: 5 })
                );
            }

            #[test]
            fn set_out_of_range_changes_nothing() {
                let array = <$type>::new(2);
                assert_eq!(
                    array.set(2, 1),
                    Err(ArrayError::IndexOutOfRange { index: 2, length: 2 })
                );
                assert_eq!(array.to_vec(), Ok(vec![0, 0]));
            }

            #[test]
            fn len_is_fixed() {
                let array = <$type>::new(4);
                assert_eq!(array.len(), 4);
                for i in 0..4 {
                    array.set(i, i as i64).unwrap();
                }
                assert_eq!(array.len(), 4);
                assert!(!array.is_empty());
            }

            #[test]
            fn zero_length() {
                let array = <$type>::new(0);
                assert!(array.is_empty());
                assert_eq!(array.to_vec(), Ok(vec![]));
                assert_eq!(
                    array.get(0),
                    Err(ArrayError::IndexOutOfRange { index: 0, length: 0 })
                );
            }
        }
    )*
    }
}
