//! Fixed-capacity first-in-first-out queue.

use std::collections::VecDeque;

use super::error::CollectionError;

/// A FIFO queue with a maximum size.
///
/// The queue orders elements but does not police identity: the same value may
/// be enqueued twice. Callers that need uniqueness check [`contains`](Self::contains)
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedFifoQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedFifoQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds `value` at the tail.
    pub fn enqueue(&mut self, value: T) -> Result<(), CollectionError> {
        if self.is_full() {
            return Err(CollectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.items.push_back(value);
        Ok(())
    }

    /// Removes and returns the head.
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.items.pop_front().ok_or(CollectionError::Empty)
    }

    /// Returns the head without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), CollectionError> {
        if capacity < self.items.len() {
            return Err(CollectionError::InvalidCapacity {
                requested: capacity,
                len: self.items.len(),
            });
        }
        self.capacity = capacity;
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Iterates from head to tail without disturbing the order.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: PartialEq> BoundedFifoQueue<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.items.iter().any(|item| item == value)
    }

    /// Removes the first element equal to `value`.
    ///
    /// Everything else keeps its relative position.
    ///
    /// # Returns
    /// * `Some(T)` - The removed element
    /// * `None` - If no element matched
    pub fn remove_first(&mut self, value: &T) -> Option<T> {
        let index = self.items.iter().position(|item| item == value)?;
        self.items.remove(index)
    }
}
