//! Coverage checks.
//!
//! [`validate`] is the envelope check: the selection's min low and max high
//! must equal the universe. It does not see holes between disjoint intervals.
//! [`validate_gap_free`] is the sorted-merge scan the solvers run on their own
//! output: every universe point must be covered, and intervals may reach past
//! either end. [`validate_contiguous`] is both checks together.

use crate::error::CoverError;
use crate::interval::Interval;

/// Min-low/max-high envelope of a set of intervals.
pub fn envelope(intervals: &[Interval]) -> Option<Interval> {
    intervals
        .iter()
        .copied()
        .reduce(|acc, interval| acc.span(&interval))
}

/// Accept `cover` iff its envelope equals `universe`.
pub fn validate(universe: Interval, cover: &[Interval]) -> Result<(), CoverError> {
    let envelope = envelope(cover);
    if envelope == Some(universe) {
        Ok(())
    } else {
        Err(CoverError::IncompleteCover {
            expected: universe,
            envelope,
            first_gap: None,
        })
    }
}

/// First point of `universe` not contained in any interval of `cover`.
pub fn first_gap(universe: Interval, cover: &[Interval]) -> Option<i64> {
    let mut sorted = cover.to_vec();
    sorted.sort_unstable_by_key(|interval| interval.low());

    let mut next = universe.low();
    for interval in sorted {
        if interval.high() < next {
            continue;
        }
        if interval.low() > next {
            return Some(next);
        }
        if interval.high() >= universe.high() {
            return None;
        }
        next = interval.high() + 1;
    }
    Some(next)
}

/// Accept `cover` iff every point of `universe` lies in one of its intervals.
///
/// Parts of the cover outside `universe` are ignored.
pub fn validate_gap_free(universe: Interval, cover: &[Interval]) -> Result<(), CoverError> {
    match first_gap(universe, cover) {
        None => Ok(()),
        Some(point) => Err(CoverError::IncompleteCover {
            expected: universe,
            envelope: envelope(cover),
            first_gap: Some(point),
        }),
    }
}

/// Envelope check plus an explicit gap scan.
pub fn validate_contiguous(universe: Interval, cover: &[Interval]) -> Result<(), CoverError> {
    validate(universe, cover)?;
    validate_gap_free(universe, cover)
}
