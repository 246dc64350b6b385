//! Minimal set of disjoint half-open ranges.
//!
//! ## Invariant
//!
//! Stored ranges never overlap and never touch: inserting `[5, 8)` next to
//! `[0, 5)` leaves a single `[0, 8)`. Iteration is in ascending `begin` order.
//!
//! ```
//! use turn_engine::ranges::IntervalSet;
//!
//! let mut set = IntervalSet::new();
//! set.insert(0, 10);
//! set.insert(20, 30);
//! set.insert(25, 40);
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(&0));
//! assert!(!set.contains(&10));
//! assert!(set.contains(&39));
//! assert!(!set.contains(&40));
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use super::step::Step;

/// A half-open range `[begin, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval<T> {
    /// First value covered.
    pub begin: T,
    /// First value past the range.
    pub end: T,
}

impl<T: Ord> Interval<T> {
    /// Create an interval, swapping the bounds if they are reversed.
    #[must_use]
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { begin: b, end: a }
        } else {
            Self { begin: a, end: b }
        }
    }

    /// Check if `value` lies in `[begin, end)`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.begin <= *value && *value < self.end
    }

    /// Check if the interval covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }
}

/// Ordered set of disjoint half-open ranges keyed by their start.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Ord + Deserialize<'de>"
))]
pub struct IntervalSet<T> {
    /// begin -> end
    ranges: BTreeMap<T, T>,
}

impl<T> Default for IntervalSet<T> {
    fn default() -> Self {
        Self {
            ranges: BTreeMap::new(),
        }
    }
}

impl<T: Ord + Clone> IntervalSet<T> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `[min(b, e), max(b, e))`, merging every range it overlaps or touches.
    ///
    /// An empty range (`b == e`) adds nothing.
    pub fn insert(&mut self, b: T, e: T) {
        let Interval { mut begin, mut end } = Interval::new(b, e);
        if begin == end {
            return;
        }

        // A range starting before `begin` can still reach it.
        let start = match self.ranges.range::<T, _>(..&begin).next_back() {
            Some((b, e)) if *e >= begin => b.clone(),
            _ => begin.clone(),
        };

        let mut merged: SmallVec<[T; 4]> = SmallVec::new();
        for (b, e) in self.ranges.range::<T, _>(&start..) {
            if *b > end {
                break;
            }
            if *b < begin {
                begin = b.clone();
            }
            if *e > end {
                end = e.clone();
            }
            merged.push(b.clone());
        }

        for key in &merged {
            self.ranges.remove(key);
        }
        self.ranges.insert(begin, end);
    }

    /// Check if some stored range contains `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.ranges
            .range::<T, _>(..=value)
            .next_back()
            .is_some_and(|(_, end)| value < end)
    }

    /// Check if any stored range overlaps `[min(b, e), max(b, e))`.
    #[must_use]
    pub fn intersects(&self, b: &T, e: &T) -> bool {
        let (begin, end) = if e < b { (e, b) } else { (b, e) };
        if begin == end {
            return false;
        }
        // Only the last range starting before `end` can reach past `begin`.
        self.ranges
            .range::<T, _>(..end)
            .next_back()
            .is_some_and(|(_, stored_end)| stored_end > begin)
    }

    /// Number of stored ranges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the set covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Stored ranges in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Interval<T>> + ExactSizeIterator + '_ {
        self.ranges.iter().map(|(begin, end)| Interval {
            begin: begin.clone(),
            end: end.clone(),
        })
    }

    /// Smallest covered value.
    #[must_use]
    pub fn first_value(&self) -> Option<T> {
        self.ranges.first_key_value().map(|(begin, _)| begin.clone())
    }

    /// Remove every range.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}

impl<T: Step> IntervalSet<T> {
    /// Lazily enumerate every covered value in ascending order.
    ///
    /// Calling this again restarts the walk from the smallest value.
    pub fn values(&self) -> Values<'_, T> {
        Values {
            ranges: self.ranges.iter(),
            next: None,
            end: None,
        }
    }

    /// Number of covered values.
    #[must_use]
    pub fn count_values(&self) -> usize {
        self.values().count()
    }
}

impl<T: Ord + Clone> From<std::ops::Range<T>> for IntervalSet<T> {
    fn from(range: std::ops::Range<T>) -> Self {
        let mut set = Self::new();
        set.insert(range.start, range.end);
        set
    }
}

/// Adds each value as the one-point range `[value, successor)`.
///
/// The greatest value of `T` has no successor, so no half-open range can
/// hold it; such a value is skipped.
impl<T: Step> Extend<T> for IntervalSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            match value.successor() {
                Some(next) => self.insert(value, next),
                None => warn!("greatest value cannot be stored in a half-open range, skipped"),
            }
        }
    }
}

impl<T: Step> FromIterator<T> for IntervalSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Iterator over every value covered by an `IntervalSet`.
#[derive(Clone, Debug)]
pub struct Values<'a, T> {
    ranges: btree_map::Iter<'a, T, T>,
    next: Option<T>,
    end: Option<&'a T>,
}

impl<T: Step> Iterator for Values<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let (Some(value), Some(end)) = (self.next.take(), self.end) {
                if value < *end {
                    self.next = value.successor();
                    return Some(value);
                }
            }
            let (begin, end) = self.ranges.next()?;
            self.next = Some(begin.clone());
            self.end = Some(end);
        }
    }
}

impl<T: Step> FusedIterator for Values<'_, T> {}
