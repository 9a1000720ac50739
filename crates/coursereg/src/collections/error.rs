//! Error types for the bounded collections.

use thiserror::Error;

/// Errors returned by [`BoundedUniqueSequence`](super::BoundedUniqueSequence)
/// and [`BoundedFifoQueue`](super::BoundedFifoQueue).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Index outside the valid range for the operation
    #[error("Index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// An equal element is already stored
    #[error("Element is already present")]
    DuplicateElement,

    /// The collection is full
    #[error("Capacity of {capacity} has been reached")]
    CapacityExceeded { capacity: usize },

    /// Requested capacity is smaller than the current number of elements
    #[error("Capacity {requested} is smaller than current size {len}")]
    InvalidCapacity { requested: usize, len: usize },

    /// Attempted to take an element from an empty queue
    #[error("No element to remove")]
    Empty,
}

impl CollectionError {
    /// Returns true if the error was caused by the collection being full.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, CollectionError::CapacityExceeded { .. })
    }
}
