//! Synchronization primitives used by the arrays.
//!
//! With the `shuttle` feature enabled, these are swapped for primitives that
//! the `shuttle` schedulers can control, so that tests can explore the
//! interleavings of concurrent operations.
use std::sync::Arc;

#[cfg(feature = "shuttle")]
pub(crate) use shuttle::sync::Mutex;
#[cfg(not(feature = "shuttle"))]
pub(crate) use std::sync::Mutex;

/// An atomically replaceable, possibly empty, shared reference.
///
/// Every operation acts on the reference as a whole: a `load` observes either
/// the value before a `store` or the value after it, never anything in between.
#[cfg(not(feature = "shuttle"))]
pub(crate) struct SnapshotCell<T> {
    inner: arc_swap::ArcSwapOption<T>,
}

#[cfg(not(feature = "shuttle"))]
impl<T> SnapshotCell<T> {
    /// Creates a cell that holds nothing.
    pub(crate) fn empty() -> Self {
        Self {
            inner: arc_swap::ArcSwapOption::empty(),
        }
    }

    /// Creates a cell holding `value`.
    pub(crate) fn new(value: Arc<T>) -> Self {
        Self {
            inner: arc_swap::ArcSwapOption::new(Some(value)),
        }
    }

    /// Returns the value currently held, if any.
    pub(crate) fn load(&self) -> Option<Arc<T>> {
        self.inner.load_full()
    }

    /// Replaces whatever is held with `value`.
    pub(crate) fn store(&self, value: Arc<T>) {
        self.inner.store(Some(value));
    }

    /// Replaces the held value with `new`, but only if it is still `current`.
    ///
    /// Returns whether the replacement happened. Values are compared by
    /// identity, not by contents.
    pub(crate) fn compare_and_swap(&self, current: &Arc<T>, new: Arc<T>) -> bool {
        let previous = self.inner.compare_and_swap(current, Some(new));
        match &*previous {
            Some(previous) => Arc::ptr_eq(previous, current),
            None => false,
        }
    }
}

/// An atomically replaceable, possibly empty, shared reference.
///
/// The lock is only ever held for the duration of a single pointer load,
/// store or comparison, so every operation is still atomic with respect to
/// the others, while giving the scheduler a point at which to preempt.
#[cfg(feature = "shuttle")]
pub(crate) struct SnapshotCell<T> {
    inner: shuttle::sync::RwLock<Option<Arc<T>>>,
}

#[cfg(feature = "shuttle")]
impl<T> SnapshotCell<T> {
    pub(crate) fn empty() -> Self {
        Self {
            inner: shuttle::sync::RwLock::new(None),
        }
    }

    pub(crate) fn new(value: Arc<T>) -> Self {
        Self {
            inner: shuttle::sync::RwLock::new(Some(value)),
        }
    }

    pub(crate) fn load(&self) -> Option<Arc<T>> {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.clone()
    }

    pub(crate) fn store(&self, value: Arc<T>) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(value);
    }

    pub(crate) fn compare_and_swap(&self, current: &Arc<T>, new: Arc<T>) -> bool {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match &*guard {
            Some(held) if Arc::ptr_eq(held, current) => {
                *guard = Some(new);
                true
            }
            _ => false,
        }
    }
}
