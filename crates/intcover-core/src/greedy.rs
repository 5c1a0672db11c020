//! Left-to-right greedy interval cover.
//!
//! Keep the leftmost uncovered point; among the intervals starting at or before
//! it, take the one reaching furthest right. On a line this is optimal.

use crate::error::CoverError;
use crate::interval::{Cover, Interval};
use crate::validate::validate_gap_free;
use std::time::Instant;
use tracing::{debug, trace};

/// Greedy minimum cover of `universe` by intervals of `family`.
///
/// `family` is not modified; a stable-sorted copy (ascending `low`, input order
/// on ties) is swept once with a cursor. Among candidates with equal `high` the
/// first one in that order wins. Family intervals may reach past the
/// universe; only the universe's points have to be covered.
///
/// # Errors
///
/// [`CoverError::UncoverablePoint`] when some point of the universe lies in no
/// interval of the family.
pub fn greedy_cover(universe: Interval, family: &[Interval]) -> Result<Cover, CoverError> {
    let started = Instant::now();
    let mut sorted = family.to_vec();
    sorted.sort_by_key(Interval::low);

    let mut selected = Vec::new();
    let mut cursor = 0;
    let mut leftmost = universe.low();
    loop {
        let mut best: Option<Interval> = None;
        while let Some(candidate) = sorted.get(cursor).filter(|c| c.low() <= leftmost) {
            if candidate.high() >= leftmost && best.is_none_or(|b| candidate.high() > b.high()) {
                best = Some(*candidate);
            }
            cursor += 1;
        }

        let Some(chosen) = best else {
            debug!(
                component = "greedy",
                operation = "cover",
                status = "error",
                point = leftmost,
                selected = selected.len(),
                "No interval covers point"
            );
            return Err(CoverError::UncoverablePoint { point: leftmost });
        };
        trace!(
            component = "greedy",
            operation = "select",
            low = chosen.low(),
            high = chosen.high(),
            "Selected interval"
        );
        selected.push(chosen);

        if chosen.high() >= universe.high() {
            break;
        }
        leftmost = chosen.high() + 1;
    }

    validate_gap_free(universe, &selected)?;
    debug!(
        component = "greedy",
        operation = "cover",
        status = "success",
        family = family.len(),
        cover = selected.len(),
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Greedy cover complete"
    );
    Ok(Cover::new(selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(low: i64, high: i64) -> Interval {
        Interval::new(low, high).unwrap()
    }

    #[test]
    fn picks_minimum_on_known_family() {
        let universe = iv(0, 9);
        let family = [iv(0, 4), iv(3, 7), iv(5, 9)];
        let cover = greedy_cover(universe, &family).unwrap();
        assert_eq!(cover.intervals(), &[iv(0, 4), iv(5, 9)]);
    }

    #[test]
    fn unsorted_input_is_not_mutated() {
        let universe = iv(0, 9);
        let family = vec![iv(5, 9), iv(3, 7), iv(0, 4)];
        let before = family.clone();
        let cover = greedy_cover(universe, &family).unwrap();
        assert_eq!(cover.len(), 2);
        assert_eq!(family, before);
    }

    #[test]
    fn fails_on_gap() {
        let err = greedy_cover(iv(0, 6), &[iv(0, 2), iv(4, 6)]).unwrap_err();
        assert_eq!(err, CoverError::UncoverablePoint { point: 3 });
    }

    #[test]
    fn fails_when_universe_start_is_uncovered() {
        let err = greedy_cover(iv(0, 6), &[iv(1, 6)]).unwrap_err();
        assert_eq!(err, CoverError::UncoverablePoint { point: 0 });
        let err = greedy_cover(iv(0, 6), &[]).unwrap_err();
        assert_eq!(err, CoverError::UncoverablePoint { point: 0 });
    }

    #[test]
    fn fails_when_universe_end_is_uncovered() {
        let err = greedy_cover(iv(0, 6), &[iv(0, 3), iv(2, 5)]).unwrap_err();
        assert_eq!(err, CoverError::UncoverablePoint { point: 6 });
    }

    #[test]
    fn ties_keep_family_order() {
        let universe = iv(0, 5);
        let first = iv(0, 5);
        let family = [iv(0, 2), first, iv(0, 5)];
        let cover = greedy_cover(universe, &family).unwrap();
        assert_eq!(cover.len(), 1);
        assert_eq!(cover.intervals()[0], first);
    }

    #[test]
    fn overhanging_intervals_are_accepted() {
        let universe = iv(10, 20);
        let cover = greedy_cover(universe, &[iv(0, 12), iv(11, 30)]).unwrap();
        assert_eq!(cover.intervals(), &[iv(0, 12), iv(11, 30)]);

        let cover = greedy_cover(universe, &[iv(12, 40), iv(-5, 25)]).unwrap();
        assert_eq!(cover.intervals(), &[iv(-5, 25)]);
    }

    #[test]
    fn prefers_long_reach_over_many_short_steps() {
        let universe = iv(0, 99);
        let mut family: Vec<_> = (0..100).step_by(5).map(|low| iv(low, low + 5)).collect();
        family.push(iv(0, 60));
        family.push(iv(55, 99));
        let cover = greedy_cover(universe, &family).unwrap();
        assert_eq!(cover.intervals(), &[iv(0, 60), iv(55, 99)]);
    }
}
