//! Error kinds shared by the containers.

use thiserror::Error;

/// Failure of a key-based lookup or deletion on a map or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The requested key is not stored in the container.
    #[error("key not found")]
    NotFound,
}

/// Failure of an index- or value-based operation on a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeqError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("sequence is empty")]
    Empty,
    #[error("value not found in sequence")]
    ValueNotFound,
}
