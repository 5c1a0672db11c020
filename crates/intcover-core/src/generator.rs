//! Random interval families that are guaranteed to cover their universe.

use crate::error::CoverError;
use crate::interval::Interval;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

/// A universe and the family of candidate intervals generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub universe: Interval,
    pub family: Vec<Interval>,
}

/// Instance generator over an explicit random source.
#[derive(Debug)]
pub struct IntervalGenerator<R> {
    rng: R,
}

impl<R: Rng> IntervalGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a universe `[start, end]` and a family of roughly `num_subsets`
    /// intervals.
    ///
    /// The family is two concatenated halves. The first tiles `[start, end]`;
    /// the second tiles the shifted window
    /// `[start + min_cover - 1, end - min_cover - 1]` so that solvers see
    /// redundant, overlapping candidates. The shifted half is skipped when that
    /// window is too small for its share.
    ///
    /// # Errors
    ///
    /// [`CoverError::InvalidArgument`] unless `0 <= start < end` and
    /// `num_subsets > 0`; [`CoverError::TooManySubsets`] when
    /// `end - start < num_subsets`.
    pub fn generate(
        &mut self,
        start: i64,
        end: i64,
        num_subsets: i64,
    ) -> Result<Instance, CoverError> {
        check_arguments(start, end, num_subsets)?;
        let started = Instant::now();

        let universe = Interval::new(start, end)?;
        let min_cover = subset_width(start, end, num_subsets);
        let shifted_share = num_subsets / 2;
        let full_share = num_subsets - shifted_share;

        let mut family = self.tile(start, end, full_share)?;
        let full_len = family.len();

        if shifted_share > 0 {
            let window_start = start + min_cover - 1;
            let window_end = end - min_cover - 1;
            match check_arguments(window_start, window_end, shifted_share) {
                Ok(()) => family.extend(self.tile(window_start, window_end, shifted_share)?),
                Err(err) => debug!(
                    component = "generator",
                    operation = "generate",
                    status = "skip",
                    window_start,
                    window_end,
                    shifted_share,
                    reason = %err,
                    "Skipping shifted half"
                ),
            }
        }

        debug!(
            component = "generator",
            operation = "generate",
            status = "success",
            start,
            end,
            num_subsets,
            min_cover,
            full_half = full_len,
            shifted_half = family.len() - full_len,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Generated interval family"
        );

        Ok(Instance { universe, family })
    }

    /// Walk `[start, end]` left to right in steps of `min_cover`, drawing each
    /// interval's end in `[s + min_cover, s + 2 * min_cover]` clamped to `end`.
    ///
    /// Consecutive intervals touch or overlap and the last one closes at `end`,
    /// so the union is exactly `[start, end]`.
    fn tile(
        &mut self,
        start: i64,
        end: i64,
        num_subsets: i64,
    ) -> Result<Vec<Interval>, CoverError> {
        let min_cover = subset_width(start, end, num_subsets);
        let mut intervals = Vec::new();
        let mut set_start = start;
        loop {
            let max_end = set_start
                .saturating_add(min_cover.saturating_mul(2))
                .min(end);
            let min_end = set_start.saturating_add(min_cover).min(max_end);
            let set_end = self.rng.random_range(min_end..=max_end);
            intervals.push(Interval::new(set_start, set_end)?);
            trace!(
                component = "generator",
                operation = "tile",
                low = set_start,
                high = set_end,
                "Drew interval"
            );

            if max_end == end {
                if let Some(last_start) = set_start.checked_add(min_cover).filter(|s| *s <= end) {
                    intervals.push(Interval::new(last_start, end)?);
                }
                break;
            }
            set_start += min_cover;
        }
        Ok(intervals)
    }
}

/// `(end - start + 1) / num_subsets`, saturating at `i64::MAX` for the one
/// universe whose size does not fit (`[0, i64::MAX]` split once).
fn subset_width(start: i64, end: i64, num_subsets: i64) -> i64 {
    let points = i128::from(end) - i128::from(start) + 1;
    i64::try_from(points / i128::from(num_subsets)).unwrap_or(i64::MAX)
}

fn check_arguments(start: i64, end: i64, num_subsets: i64) -> Result<(), CoverError> {
    if start < 0 || end <= 0 || start >= end || num_subsets <= 0 {
        return Err(CoverError::InvalidArgument {
            reason: format!("start={start}, end={end}, num_subsets={num_subsets}"),
        });
    }
    if end - start < num_subsets {
        return Err(CoverError::TooManySubsets {
            requested: num_subsets,
            available: end - start,
        });
    }
    Ok(())
}
