//! Per-variant card index.
//!
//! Maps a card identifier to its position in the owning pack's card
//! sequence. Inserting an identifier that is already present replaces the
//! earlier position, so the latest declaration wins.

use rustc_hash::FxHashMap;

use super::definition::CardId;

/// Index of card positions keyed by identifier.
///
/// ## Example
///
/// ```
/// use party_cards::cards::{CardId, CardIndex};
///
/// let mut index = CardIndex::new();
/// assert_eq!(index.insert(CardId::new("w1"), 0), None);
/// assert_eq!(index.insert(CardId::new("w1"), 3), Some(0));
///
/// assert_eq!(index.get("w1"), Some(3));
/// assert_eq!(index.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardIndex {
    positions: FxHashMap<CardId, usize>,
}

impl CardIndex {
    /// Create a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` at `position`.
    ///
    /// Returns the position it replaced, if any.
    pub fn insert(&mut self, id: CardId, position: usize) -> Option<usize> {
        self.positions.insert(id, position)
    }

    /// Position of a card by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Check if an identifier is indexed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All indexed positions in ascending order.
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        let mut positions: Vec<_> = self.positions.values().copied().collect();
        positions.sort_unstable();
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut index = CardIndex::new();
        index.insert(CardId::new("b1"), 1);

        assert_eq!(index.get("b1"), Some(1));
        assert!(index.contains("b1"));
        assert_eq!(index.get("b2"), None);
        assert!(!index.contains("b2"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut index = CardIndex::new();
        assert_eq!(index.insert(CardId::new("w1"), 0), None);
        assert_eq!(index.insert(CardId::new("w1"), 2), Some(0));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("w1"), Some(2));
    }

    #[test]
    fn test_positions_sorted() {
        let mut index = CardIndex::new();
        index.insert(CardId::new("c"), 7);
        index.insert(CardId::new("a"), 1);
        index.insert(CardId::new("b"), 4);

        assert_eq!(index.positions(), vec![1, 4, 7]);
    }

    #[test]
    fn test_empty() {
        let index = CardIndex::new();
        assert!(index.is_empty());
        assert!(index.positions().is_empty());
    }
}
