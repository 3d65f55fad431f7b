use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{ArrayError, Result};
use crate::sync::SnapshotCell;

use super::{check_index, ConcurrentArray, Snapshot};

/// A lock-free copy-on-write array that never loses a write.
///
/// Like `CowArray`, the contents live in an immutable snapshot that is
/// replaced atomically on every write. Unlike `CowArray`, the new snapshot is
/// only published if the snapshot it was copied from is still current. If some
/// other write got there first, the copy is rebuilt from the newer snapshot
/// and the publish is tried again (read-copy-update).
///
/// Reads are wait-free. Writes are lock-free but **not** wait-free: under
/// heavy contention, a write may be retried any number of times, and every
/// attempt costs a copy of the whole array.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use carray::{ConcurrentArray, RcuArray};
///
/// const N: usize = 8;
///
/// let array = Arc::new(RcuArray::new(N));
/// let handles: Vec<_> = (0..N)
///     .map(|i| {
///         let array = array.clone();
///         thread::spawn(move || array.set(i, 1).unwrap())
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// // Every thread wrote to a different index, and every write was kept.
/// assert_eq!(array.to_vec(), Ok(vec![1; N]));
/// ```
pub struct RcuArray {
    length: usize,
    snapshot: SnapshotCell<Snapshot>,
}

impl RcuArray {
    fn current(&self) -> Result<Arc<Snapshot>> {
        self.snapshot.load().ok_or(ArrayError::InvalidState)
    }
}

impl ConcurrentArray for RcuArray {
    /// Creates an array of `length` zeros, published before returning.
    fn new(length: usize) -> Self {
        debug!(length, "creating read-copy-update array");
        Self {
            length,
            snapshot: SnapshotCell::new(Arc::new(vec![0; length].into_boxed_slice())),
        }
    }

    fn len(&self) -> usize {
        self.length
    }

    fn get(&self, index: usize) -> Result<i64> {
        check_index(index, self.length)?;
        Ok(self.current()?[index])
    }

    fn set(&self, index: usize, value: i64) -> Result<()> {
        check_index(index, self.length)?;
        let mut current = self.current()?;
        loop {
            let mut contents = Snapshot::from(&current[..]);
            contents[index] = value;
            // Holding `current` keeps its allocation alive, so a successful
            // comparison cannot be fooled by a recycled address.
            if self.snapshot.compare_and_swap(&current, Arc::new(contents)) {
                trace!(index, "publishing snapshot");
                return Ok(());
            }
            trace!(index, "snapshot replaced during write, retrying");
            current = self.current()?;
        }
    }

    fn to_vec(&self) -> Result<Vec<i64>> {
        Ok(self.current()?.to_vec())
    }
}

impl fmt::Debug for RcuArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RcuArray")
            .field("length", &self.length)
            .field("snapshot", &self.snapshot.load())
            .finish()
    }
}
