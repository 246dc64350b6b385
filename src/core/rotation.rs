//! Circular turn order.
//!
//! A `Rotation` cycles forever over a fixed, non-empty list. Players cannot
//! join or leave once it is built.
//!
//! ```
//! use turn_engine::core::Rotation;
//!
//! let mut seats = Rotation::new(vec!['a', 'b', 'c']).unwrap();
//! assert_eq!(*seats.advance(), 'a');
//! assert_eq!(*seats.advance(), 'b');
//! assert_eq!(*seats.advance(), 'c');
//! assert_eq!(*seats.advance(), 'a');
//! ```

use crate::error::ConfigError;

/// Infinite round-robin over a fixed collection.
#[derive(Clone, Debug)]
pub struct Rotation<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> Rotation<T> {
    /// Build a rotation starting at the first item.
    ///
    /// Fails with `ConfigError::EmptyRotation` if `items` is empty.
    pub fn new(items: impl IntoIterator<Item = T>) -> Result<Self, ConfigError> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Err(ConfigError::EmptyRotation);
        }
        Ok(Self { items, cursor: 0 })
    }

    /// Return the current item and move the cursor to the next one,
    /// wrapping after the last.
    pub fn advance(&mut self) -> &T {
        let current = self.cursor;
        self.cursor = (self.cursor + 1) % self.items.len();
        &self.items[current]
    }

    /// Move the cursor back to the first item.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// The item `advance` will return next.
    #[must_use]
    pub fn peek(&self) -> &T {
        &self.items[self.cursor]
    }

    /// Index of the item `advance` will return next.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of items in the cycle. Never zero.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// All items in registration order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone> Iterator for Rotation<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.advance().clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_item_once_then_wrap() {
        let mut rotation = Rotation::new(0..4).unwrap();
        let first_lap: Vec<_> = (0..4).map(|_| *rotation.advance()).collect();
        assert_eq!(first_lap, vec![0, 1, 2, 3]);
        assert_eq!(*rotation.advance(), 0);
    }

    #[test]
    fn test_single_item() {
        let mut rotation = Rotation::new(["solo"]).unwrap();
        assert_eq!(rotation.len(), 1);
        assert_eq!(*rotation.advance(), "solo");
        assert_eq!(*rotation.advance(), "solo");
    }

    #[test]
    fn test_empty_is_rejected() {
        let result = Rotation::<u8>::new(Vec::new());
        assert_eq!(result.unwrap_err(), ConfigError::EmptyRotation);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut rotation = Rotation::new(vec![1, 2]).unwrap();
        assert_eq!(*rotation.peek(), 1);
        assert_eq!(rotation.position(), 0);
        rotation.advance();
        assert_eq!(*rotation.peek(), 2);
        assert_eq!(rotation.position(), 1);
    }

    #[test]
    fn test_iterator_cycles() {
        let rotation = Rotation::new(vec!['x', 'o']).unwrap();
        let taken: String = rotation.take(5).collect();
        assert_eq!(taken, "xoxox");
    }
}
