//! A fixed-length array of integers for lock-free concurrent access.
//!
//! The main object is [`CowArray`], which keeps its contents in an immutable
//! snapshot behind an atomically replaceable reference. Reads load the current
//! snapshot and copy one element out of it. Writes copy the whole snapshot,
//! change one element in the private copy, and publish the copy with a single
//! atomic store.
//!
//! Publication is unconditional, so two writes that overlap in time race at the
//! granularity of the whole array: whichever publishes last wins, and the other
//! write is lost even if it touched a different index. For an array that never
//! loses a write, see [`RcuArray`]. For a linearizable, lock-based reference
//! implementation, see [`MutexArray`].
//!
//! # Examples
//!
//! ```
//! use carray::{ArrayError, ConcurrentArray, CowArray};
//!
//! let array = CowArray::new(5);
//! assert_eq!(array.get(0), Ok(0));
//!
//! array.set(2, 42).unwrap();
//! assert_eq!(array.get(2), Ok(42));
//!
//! assert_eq!(
//!     array.get(10),
//!     Err(ArrayError::IndexOutOfRange { index: 10, length: 5 })
//! );
//! assert_eq!(array.len(), 5);
//! ```
pub mod array;
pub mod error;
pub(crate) mod sync;

pub use array::{ConcurrentArray, CowArray, MutexArray, RcuArray, StagedWrite};
pub use error::{ArrayError, Result};
