use std::fmt;

use tracing::debug;

use crate::error::{ArrayError, Result};
use crate::sync::Mutex;

use super::{check_index, ConcurrentArray};

/// An array backed by a [`Mutex`].
///
/// This object uses a mutex to protect against concurrent memory
/// access, and writes in place. It is linearizable, but it is **not**
/// lock-free. It is mostly useful as a point of comparison.
///
/// If a thread panics while holding the lock, every later operation
/// fails with `ArrayError::InvalidState`.
///
/// # Examples
///
/// ```
/// use carray::{ConcurrentArray, MutexArray};
///
/// let array = MutexArray::new(3);
/// array.set(1, 123).unwrap();
/// assert_eq!(array.to_vec(), Ok(vec![0, 123, 0]));
/// ```
pub struct MutexArray {
    length: usize,
    mutex: Mutex<Box<[i64]>>,
}

impl ConcurrentArray for MutexArray {
    fn new(length: usize) -> Self {
        debug!(length, "creating mutex array");
        Self {
            length,
            mutex: Mutex::new(vec![0; length].into_boxed_slice()),
        }
    }

    fn len(&self) -> usize {
        self.length
    }

    fn get(&self, index: usize) -> Result<i64> {
        check_index(index, self.length)?;
        let data = self.mutex.lock().map_err(|_| ArrayError::InvalidState)?;
        Ok(data[index])
    }

    fn set(&self, index: usize, value: i64) -> Result<()> {
        check_index(index, self.length)?;
        let mut data = self.mutex.lock().map_err(|_| ArrayError::InvalidState)?;
        data[index] = value;
        Ok(())
    }

    fn to_vec(&self) -> Result<Vec<i64>> {
        let data = self.mutex.lock().map_err(|_| ArrayError::InvalidState)?;
        Ok(data.to_vec())
    }
}

impl fmt::Debug for MutexArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexArray")
            .field("length", &self.length)
            .field("contents", &self.to_vec())
            .finish()
    }
}
