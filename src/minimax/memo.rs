//! Position memo and its plain-data snapshot.
//!
//! Scores are stored per position, from the point of view of the player to
//! move there, so an entry is valid no matter which move order reached it.
//! Entries are never evicted one by one; a bounded solver clears the whole
//! memo between searches instead.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::rules::Score;

/// Memoized position scores.
#[derive(Clone, Debug)]
pub struct PositionMemo<G> {
    scores: FxHashMap<G, Score>,
}

impl<G> Default for PositionMemo<G> {
    fn default() -> Self {
        Self {
            scores: FxHashMap::default(),
        }
    }
}

impl<G: Eq + Hash> PositionMemo<G> {
    /// Create an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored score for `position`.
    #[must_use]
    pub fn get(&self, position: &G) -> Option<Score> {
        self.scores.get(position).copied()
    }

    /// Store (or overwrite) the score of `position`.
    pub fn insert(&mut self, position: G, score: Score) {
        self.scores.insert(position, score);
    }

    /// Number of memoized positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if nothing is memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Forget every position.
    pub fn clear(&mut self) {
        self.scores.clear();
    }

    /// Copy every entry out as plain data.
    #[must_use]
    pub fn snapshot(&self) -> MemoSnapshot<G>
    where
        G: Clone,
    {
        MemoSnapshot {
            entries: self
                .scores
                .iter()
                .map(|(position, score)| (position.clone(), *score))
                .collect(),
        }
    }

    /// Merge a snapshot in; snapshot entries win on conflict.
    pub fn restore(&mut self, snapshot: MemoSnapshot<G>) {
        self.scores.extend(snapshot.entries);
    }
}

/// Serializable copy of a `PositionMemo`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoSnapshot<G> {
    /// Position and score pairs, in no particular order.
    pub entries: Vec<(G, Score)>,
}

impl<G> MemoSnapshot<G> {
    /// Number of positions in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<G: Serialize> MemoSnapshot<G> {
    /// Encode with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SearchError> {
        bincode::serialize(self).map_err(|err| SearchError::Snapshot {
            message: err.to_string(),
        })
    }
}

impl<G: DeserializeOwned> MemoSnapshot<G> {
    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SearchError> {
        bincode::deserialize(bytes).map_err(|err| SearchError::Snapshot {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut memo = PositionMemo::new();
        assert!(memo.is_empty());
        memo.insert("a", 5);
        memo.insert("a", -3);
        assert_eq!(memo.get(&"a"), Some(-3));
        assert_eq!(memo.get(&"b"), None);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_snapshot_bytes_restore() {
        let mut memo = PositionMemo::new();
        memo.insert(7u32, 999);
        memo.insert(8u32, 0);

        let bytes = memo.snapshot().to_bytes().unwrap();
        let snapshot: MemoSnapshot<u32> = MemoSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(snapshot.len(), 2);

        let mut restored = PositionMemo::new();
        restored.restore(snapshot);
        assert_eq!(restored.get(&7), Some(999));
        assert_eq!(restored.get(&8), Some(0));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = MemoSnapshot::<u64>::from_bytes(&[0xff]);
        assert!(matches!(result, Err(SearchError::Snapshot { .. })));
    }
}
