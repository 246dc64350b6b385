//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during the most recent search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Interior positions fully evaluated (every child scored).
    pub positions_evaluated: u32,

    /// Children whose score came straight from the memo.
    pub memo_hits: u32,

    /// Terminal positions reached (no legal actions).
    pub terminal_positions: u32,

    /// Deepest ply pushed onto the search stack.
    pub max_depth: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of child lookups answered by the memo.
    #[must_use]
    pub fn memo_hit_rate(&self) -> f64 {
        let lookups = self.memo_hits + self.positions_evaluated + self.terminal_positions;
        if lookups == 0 {
            0.0
        } else {
            self.memo_hits as f64 / lookups as f64
        }
    }

    /// Evaluated positions per second.
    #[must_use]
    pub fn positions_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.positions_evaluated as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.positions_evaluated, 0);
        assert_eq!(stats.memo_hit_rate(), 0.0);
    }

    #[test]
    fn test_positions_per_second() {
        let mut stats = SearchStats::new();
        stats.positions_evaluated = 500;
        stats.time_us = 500_000;
        assert_eq!(stats.positions_per_second(), 1000.0);
    }

    #[test]
    fn test_memo_hit_rate() {
        let mut stats = SearchStats::new();
        stats.memo_hits = 3;
        stats.positions_evaluated = 1;
        assert_eq!(stats.memo_hit_rate(), 0.75);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.memo_hits = 100;
        stats.max_depth = 7;

        stats.reset();

        assert_eq!(stats, SearchStats::default());
    }
}
