use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{ArrayError, Result};
use crate::sync::SnapshotCell;

use super::{check_index, ConcurrentArray, Snapshot};

/// A lock-free array that publishes every write as a new snapshot.
///
/// The contents of the array live in an immutable snapshot, which is never
/// modified once it has been published. A write copies the current snapshot,
/// changes one element of the private copy, and then atomically replaces the
/// current snapshot with the copy. Readers always see one complete snapshot.
///
/// Reads are wait-free. Writes are lock-free and finish in a bounded number
/// of steps, but cost a copy of the whole array.
///
/// # Lost Writes
///
/// The final store of a write is unconditional. If two writes overlap, both
/// copy the same snapshot and each publishes a copy containing only its own
/// change. Whichever publishes last wins, and the change made by the other is
/// discarded, even when the two writes targeted different indices.
///
/// For an array in which every completed write is retained, see `RcuArray`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use carray::{ConcurrentArray, CowArray};
///
/// let array = Arc::new(CowArray::new(4));
///
/// let writer = {
///     let array = array.clone();
///     thread::spawn(move || array.set(3, 7).unwrap())
/// };
/// writer.join().unwrap();
///
/// assert_eq!(array.get(3), Ok(7));
/// ```
pub struct CowArray {
    length: usize,
    snapshot: SnapshotCell<Snapshot>,
}

impl CowArray {
    /// Creates an array that has not yet published any contents.
    #[cfg(test)]
    pub(crate) fn unpublished(length: usize) -> Self {
        Self {
            length,
            snapshot: SnapshotCell::empty(),
        }
    }

    fn current(&self) -> Result<Arc<Snapshot>> {
        self.snapshot.load().ok_or(ArrayError::InvalidState)
    }

    /// Prepares, but does not publish, a write of `value` at `index`.
    ///
    /// The returned write holds a private copy of the current contents with
    /// the element at `index` replaced. Nothing is visible to other threads
    /// until [`StagedWrite::publish`] is called, and dropping the write
    /// discards it.
    ///
    /// `set(i, v)` is exactly `stage(i, v)?.publish()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use carray::{ConcurrentArray, CowArray};
    ///
    /// let array = CowArray::new(2);
    /// let first = array.stage(0, 1).unwrap();
    /// let second = array.stage(1, 2).unwrap();
    ///
    /// first.publish();
    /// second.publish();
    ///
    /// // Both writes copied the same snapshot, so the second one to be
    /// // published overwrote the first.
    /// assert_eq!(array.to_vec(), Ok(vec![0, 2]));
    /// ```
    pub fn stage(&self, index: usize, value: i64) -> Result<StagedWrite<'_>> {
        check_index(index, self.length)?;
        let current = self.current()?;
        let mut contents = Snapshot::from(&current[..]);
        contents[index] = value;
        Ok(StagedWrite {
            array: self,
            index,
            contents,
        })
    }
}

impl ConcurrentArray for CowArray {
    /// Creates an array of `length` zeros, published before returning.
    fn new(length: usize) -> Self {
        debug!(length, "creating copy-on-write array");
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
        self.stage(index, value)?.publish();
        Ok(())
    }

    /// Returns a copy of a single snapshot of the array.
    fn to_vec(&self) -> Result<Vec<i64>> {
        Ok(self.current()?.to_vec())
    }
}

impl fmt::Debug for CowArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CowArray")
            .field("length", &self.length)
            .field("snapshot", &self.snapshot.load())
            .finish()
    }
}

/// A write to a [`CowArray`] that has been prepared but not yet published.
#[must_use = "a staged write does nothing until it is published"]
#[derive(Debug)]
pub struct StagedWrite<'a> {
    array: &'a CowArray,
    index: usize,
    contents: Snapshot,
}

impl StagedWrite<'_> {
    /// Makes the staged contents the current snapshot of the array.
    ///
    /// This replaces whatever snapshot is current at this instant, including
    /// any published since this write was staged.
    pub fn publish(self) {
        trace!(index = self.index, "publishing snapshot");
        self.array.snapshot.store(Arc::new(self.contents));
    }
}
