//! Fixed-capacity ordered sequence that rejects duplicate elements.

use super::error::CollectionError;

/// An ordered list with a maximum size that never holds two equal elements.
///
/// Capacity is enforced at the container boundary, so callers can check
/// [`is_full`](Self::is_full) before choosing where an element goes instead
/// of reacting to a failed insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedUniqueSequence<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: PartialEq> BoundedUniqueSequence<T> {
    /// Creates an empty sequence that holds at most `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Changes the maximum size.
    ///
    /// # Returns
    /// * `Err(InvalidCapacity)` - If `capacity` is below the current length
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
        self.items.len() == self.capacity
    }

    /// Inserts `value` at `index`, shifting later elements toward the back.
    ///
    /// Checks run in a fixed order: index, duplicate, capacity.
    ///
    /// # Arguments
    /// * `index` - Position in `0..=len()`
    /// * `value` - Element to store
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        if index > self.items.len() {
            return Err(CollectionError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if self.contains(&value) {
            return Err(CollectionError::DuplicateElement);
        }
        if self.is_full() {
            return Err(CollectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Appends `value` to the back.
    pub fn push(&mut self, value: T) -> Result<(), CollectionError> {
        self.insert(self.items.len(), value)
    }

    /// Removes and returns the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        if index >= self.items.len() {
            return Err(CollectionError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// Replacing an element with an equal value is rejected as a duplicate,
    /// matching the insert rules.
    pub fn replace(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        if index >= self.items.len() {
            return Err(CollectionError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if self.contains(&value) {
            return Err(CollectionError::DuplicateElement);
        }
        Ok(std::mem::replace(&mut self.items[index], value))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.iter().any(|item| item == value)
    }

    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    /// Removes every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a BoundedUniqueSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
