//! Errors returned by array operations.
use thiserror::Error;

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;

/// The ways an array operation can fail.
///
/// Both kinds are detected before anything is read or written, and are
/// returned straight to the caller. Nothing is retried internally.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ArrayError {
    /// The index is outside of `[0, length)`.
    #[error("index {index} out of range [0,{length})")]
    IndexOutOfRange { index: usize, length: usize },

    /// The array has no published contents.
    ///
    /// Arrays built with `new` always publish their contents before
    /// returning, so this signals a programming error rather than a
    /// transient condition.
    #[error("invalid array state: no snapshot has been published")]
    InvalidState,
}
