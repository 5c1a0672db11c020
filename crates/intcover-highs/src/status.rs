//! Status conversions between HiGHS and the engine-agnostic layer.

use crate::ffi::HighsStatus;
use intcover_lp::SolverStatus;

pub(crate) fn highs_to_solver_status(status: HighsStatus) -> SolverStatus {
    match status {
        HighsStatus::Optimal => SolverStatus::Optimal,
        HighsStatus::Infeasible => SolverStatus::Infeasible,
        HighsStatus::Unbounded => SolverStatus::Unbounded,
        HighsStatus::UnboundedOrInfeasible => SolverStatus::Unknown,
        HighsStatus::ReachedTimeLimit => SolverStatus::TimeLimit,
        HighsStatus::ReachedIterationLimit => SolverStatus::IterationLimit,
        HighsStatus::Unknown => SolverStatus::Unknown,
    }
}

pub(crate) fn highs_has_solution(status: HighsStatus) -> bool {
    matches!(
        status,
        HighsStatus::Optimal | HighsStatus::ReachedTimeLimit | HighsStatus::ReachedIterationLimit
    )
}
