//! Compact sets of discrete values stored as disjoint half-open ranges.
//!
//! Games describe their legal moves as an `IntervalSet`: a handful of
//! `[begin, end)` runs instead of one entry per move. Consumers that need
//! individual moves walk the set with `IntervalSet::values`.

pub mod interval_set;
pub mod step;

pub use interval_set::{Interval, IntervalSet, Values};
pub use step::Step;
