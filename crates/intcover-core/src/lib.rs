//! Interval set cover.
//!
//! Given a universe `[start, end]` of integer points and a family of candidate
//! sub-intervals, pick as few intervals as possible whose union is the universe.
//!
//! - [`generator`]: random, guaranteed-coverable instances
//! - [`greedy`]: the classic left-to-right greedy, optimal on a line
//! - [`relax`]: LP relaxation built on [`intcover_lp`] and solved by any engine
//! - [`rounding`]: randomized rounding of the fractional solution, with
//!   trials on the rayon pool under the `parallel` feature
//! - [`validate`]: coverage checks every solver runs on its output
//! - [`experiment`]: the end-to-end approximation experiment

pub mod error;
pub mod experiment;
pub mod generator;
pub mod greedy;
pub mod interval;
pub mod relax;
pub mod rounding;
pub mod validate;

pub use error::CoverError;
pub use experiment::{ExperimentParams, ExperimentReport, Stage, StageObserver, run_experiment};
pub use generator::{Instance, IntervalGenerator};
pub use greedy::greedy_cover;
pub use interval::{Cover, Interval};
pub use relax::{
    IntervalBinding, LpRelaxation, MAX_UNIVERSE_POINTS, build_and_solve, build_model,
};
pub use rounding::{RandomizedRounder, TrialSummary, sample_trials_seeded};
pub use validate::{envelope, first_gap, validate, validate_contiguous, validate_gap_free};
