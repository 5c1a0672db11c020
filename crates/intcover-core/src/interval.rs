//! Closed integer intervals and covers built from them.

use crate::error::CoverError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of integer points `{low, ..., high}`.
///
/// Serialized as a `[low, high]` pair; deserialization re-checks `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct Interval {
    low: i64,
    high: i64,
}

impl Interval {
    /// Create an interval, rejecting `low > high`.
    pub fn new(low: i64, high: i64) -> Result<Self, CoverError> {
        if low > high {
            return Err(CoverError::InvalidArgument {
                reason: format!("interval low ({low}) > high ({high})"),
            });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    /// Number of integer points in the interval.
    pub fn len(&self) -> u64 {
        self.high.abs_diff(self.low).saturating_add(1)
    }

    /// Always false; an interval holds at least one point.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, point: i64) -> bool {
        self.low <= point && point <= self.high
    }

    /// Smallest interval containing both `self` and `other`.
    pub fn span(&self, other: &Interval) -> Interval {
        Interval {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }
}

impl TryFrom<(i64, i64)> for Interval {
    type Error = CoverError;

    fn try_from((low, high): (i64, i64)) -> Result<Self, Self::Error> {
        Interval::new(low, high)
    }
}

impl From<Interval> for (i64, i64) {
    fn from(interval: Interval) -> Self {
        (interval.low, interval.high)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Intervals selected from a family to cover a universe. Order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cover {
    intervals: Vec<Interval>,
}

impl Cover {
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }

    /// Number of selected intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Min-low/max-high envelope of the selection.
    pub fn envelope(&self) -> Option<Interval> {
        crate::validate::envelope(&self.intervals)
    }
}

impl From<Vec<Interval>> for Cover {
    fn from(intervals: Vec<Interval>) -> Self {
        Self::new(intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(low: i64, high: i64) -> Interval {
        Interval::new(low, high).unwrap()
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        let err = Interval::new(5, 4).unwrap_err();
        assert_eq!(err.code(), "GENERATE_INVALID_ARGUMENT");
        assert!(Interval::new(4, 4).is_ok());
    }

    #[test]
    fn len_counts_points() {
        assert_eq!(iv(3, 3).len(), 1);
        assert_eq!(iv(-2, 2).len(), 5);
        assert_eq!(iv(i64::MIN, i64::MAX).len(), u64::MAX);
    }

    #[test]
    fn contains_is_inclusive() {
        let interval = iv(2, 6);
        assert!(interval.contains(2));
        assert!(interval.contains(6));
        assert!(!interval.contains(7));
        assert!(!interval.contains(1));
    }

    #[test]
    fn span_is_envelope() {
        assert_eq!(iv(0, 3).span(&iv(7, 9)), iv(0, 9));
        assert_eq!(iv(2, 8).span(&iv(3, 4)), iv(2, 8));
    }

    #[test]
    fn serde_uses_pairs_and_validates() {
        let json = serde_json::to_string(&iv(1, 4)).unwrap();
        assert_eq!(json, "[1,4]");
        assert_eq!(serde_json::from_str::<Interval>("[1,4]").unwrap(), iv(1, 4));
        assert!(serde_json::from_str::<Interval>("[4,1]").is_err());

        let cover = Cover::new(vec![iv(0, 2), iv(3, 5)]);
        assert_eq!(serde_json::to_string(&cover).unwrap(), "[[0,2],[3,5]]");
    }

    #[test]
    fn cover_envelope() {
        assert_eq!(Cover::default().envelope(), None);
        let cover = Cover::from(vec![iv(4, 9), iv(0, 5)]);
        assert_eq!(cover.envelope(), Some(iv(0, 9)));
        assert_eq!(cover.len(), 2);
        assert_eq!(iv(0, 9).to_string(), "[0, 9]");
    }
}
