//! Randomized rounding of a fractional cover.

use crate::error::CoverError;
use crate::interval::{Cover, Interval};
use crate::relax::LpRelaxation;
use crate::validate::{first_gap, validate_gap_free};
use intcover_lp::SolverStatus;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

/// Aggregate over repeated rounding trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub trials: usize,
    /// Cover size of each trial, in trial order.
    pub sizes: Vec<usize>,
    pub mean_size: f64,
    pub min_size: usize,
    pub max_size: usize,
    /// Rounds summed over every trial.
    pub total_rounds: usize,
}

impl TrialSummary {
    fn from_trials(sizes: Vec<usize>, total_rounds: usize) -> Self {
        let trials = sizes.len();
        let mean_size = if trials == 0 {
            0.0
        } else {
            sizes.iter().sum::<usize>() as f64 / trials as f64
        };
        Self {
            trials,
            min_size: sizes.iter().copied().min().unwrap_or(0),
            max_size: sizes.iter().copied().max().unwrap_or(0),
            mean_size,
            sizes,
            total_rounds,
        }
    }
}

/// Samples covers using LP values as selection probabilities.
#[derive(Debug)]
pub struct RandomizedRounder<R> {
    rng: R,
}

impl<R: Rng> RandomizedRounder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one cover.
    ///
    /// Each round flips a coin per remaining interval, selecting it when its LP
    /// value beats a fresh uniform draw. Rounds continue until the selection
    /// covers `universe` without gaps.
    ///
    /// # Errors
    ///
    /// - [`CoverError::InvalidArgument`] when `relaxation` was built for a
    ///   family of a different length.
    /// - [`CoverError::OptimizationFailed`] when it carries no solution.
    /// - [`CoverError::ExhaustedCandidates`] when every interval with a
    ///   positive value is selected and a point is still uncovered.
    pub fn sample(
        &mut self,
        universe: Interval,
        family: &[Interval],
        relaxation: &LpRelaxation,
    ) -> Result<Cover, CoverError> {
        self.sample_counted(universe, family, relaxation)
            .map(|(cover, _)| cover)
    }

    /// Run `trials` independent samples and summarize their sizes.
    ///
    /// Stops at the first failing trial.
    pub fn sample_trials(
        &mut self,
        universe: Interval,
        family: &[Interval],
        relaxation: &LpRelaxation,
        trials: usize,
    ) -> Result<TrialSummary, CoverError> {
        let started = Instant::now();
        let mut sizes = Vec::with_capacity(trials);
        let mut total_rounds = 0;
        for _ in 0..trials {
            let (cover, rounds) = self.sample_counted(universe, family, relaxation)?;
            sizes.push(cover.len());
            total_rounds += rounds;
        }

        let summary = TrialSummary::from_trials(sizes, total_rounds);
        debug!(
            component = "rounding",
            operation = "sample_trials",
            status = "success",
            trials,
            mean_size = summary.mean_size,
            min_size = summary.min_size,
            max_size = summary.max_size,
            total_rounds,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Rounding trials complete"
        );
        Ok(summary)
    }

    fn sample_counted(
        &mut self,
        universe: Interval,
        family: &[Interval],
        relaxation: &LpRelaxation,
    ) -> Result<(Cover, usize), CoverError> {
        if relaxation.len() != family.len() {
            return Err(CoverError::InvalidArgument {
                reason: format!(
                    "relaxation has {} variables for a family of {} intervals",
                    relaxation.len(),
                    family.len()
                ),
            });
        }
        if !relaxation.has_solution() {
            return Err(CoverError::OptimizationFailed {
                status: match relaxation.status() {
                    SolverStatus::Optimal => SolverStatus::Unknown,
                    status => status,
                },
                detail: Some("relaxation carries no solution".to_string()),
            });
        }

        let mut remaining: Vec<(Interval, f64)> = family
            .iter()
            .copied()
            .zip(relaxation.values().iter().copied())
            .filter(|(_, probability)| *probability > 0.0)
            .collect();

        let mut selected = Vec::new();
        let mut rounds = 0;
        let mut uncovered = first_gap(universe, &selected);
        while let Some(point) = uncovered {
            if remaining.is_empty() {
                debug!(
                    component = "rounding",
                    operation = "sample",
                    status = "error",
                    rounds,
                    selected = selected.len(),
                    first_uncovered = point,
                    "Ran out of candidates"
                );
                return Err(CoverError::ExhaustedCandidates {
                    first_uncovered: point,
                });
            }

            rounds += 1;
            let mut idx = 0;
            while idx < remaining.len() {
                let (interval, probability) = remaining[idx];
                if probability > self.rng.random::<f64>() {
                    selected.push(interval);
                    remaining.swap_remove(idx);
                } else {
                    idx += 1;
                }
            }
            uncovered = first_gap(universe, &selected);
            trace!(
                component = "rounding",
                operation = "round",
                round = rounds,
                selected = selected.len(),
                remaining = remaining.len(),
                "Round finished"
            );
        }

        validate_gap_free(universe, &selected)?;
        Ok((Cover::new(selected), rounds))
    }
}

/// Run `trials` independent samples, each on its own `StdRng` seeded from `rng`.
///
/// The per-trial seeds are drawn up front, so the summary is the same whether
/// the trials run on the rayon pool (feature `parallel`) or one after another.
pub fn sample_trials_seeded<R: Rng + ?Sized>(
    universe: Interval,
    family: &[Interval],
    relaxation: &LpRelaxation,
    trials: usize,
    rng: &mut R,
) -> Result<TrialSummary, CoverError> {
    let started = Instant::now();
    let seeds: Vec<u64> = (0..trials).map(|_| rng.random()).collect();
    let run_trial = |seed: u64| {
        RandomizedRounder::new(StdRng::seed_from_u64(seed))
            .sample_counted(universe, family, relaxation)
            .map(|(cover, rounds)| (cover.len(), rounds))
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<(usize, usize)> = {
        use rayon::prelude::*;
        seeds
            .into_par_iter()
            .map(run_trial)
            .collect::<Result<_, _>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<(usize, usize)> = seeds
        .into_iter()
        .map(run_trial)
        .collect::<Result<_, _>>()?;

    let total_rounds = outcomes.iter().map(|(_, rounds)| rounds).sum();
    let sizes = outcomes.into_iter().map(|(size, _)| size).collect();
    let summary = TrialSummary::from_trials(sizes, total_rounds);
    debug!(
        component = "rounding",
        operation = "sample_trials_seeded",
        status = "success",
        trials,
        parallel = cfg!(feature = "parallel"),
        mean_size = summary.mean_size,
        total_rounds,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Rounding trials complete"
    );
    Ok(summary)
}
