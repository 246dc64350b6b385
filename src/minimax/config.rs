//! Solver configuration parameters.

use serde::{Deserialize, Serialize};

/// Minimax solver configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum memoized positions (`None` = unbounded).
    /// When reached, the memo is cleared before the next search.
    pub memo_capacity: Option<usize>,
}

impl SolverConfig {
    /// Bound the position memo.
    #[must_use]
    pub fn with_memo_capacity(mut self, capacity: usize) -> Self {
        self.memo_capacity = Some(capacity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.memo_capacity, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SolverConfig::default().with_memo_capacity(4096);
        assert_eq!(config.memo_capacity, Some(4096));
    }

    #[test]
    fn test_serialization() {
        let config = SolverConfig::default().with_memo_capacity(10);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
