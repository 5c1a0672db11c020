//! Engine trait and the solver-agnostic solution it returns.
//!
//! Backends (HiGHS today) implement [`LpEngine`]; the covering pipeline only
//! ever sees this module.

use crate::LpModel;
use crate::ids::VariableId;
use std::collections::BTreeMap;

/// How an engine run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Stopped on the time limit; primal values may still be available.
    TimeLimit,
    /// Stopped on the iteration limit; primal values may still be available.
    IterationLimit,
    Unknown,
}

impl SolverStatus {
    pub fn is_optimal(self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }

    /// Optimal, or stopped on a limit with an incumbent.
    pub fn has_solution(self) -> bool {
        matches!(
            self,
            SolverStatus::Optimal | SolverStatus::TimeLimit | SolverStatus::IterationLimit
        )
    }

    /// Snake-case name used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::TimeLimit => "time_limit",
            SolverStatus::IterationLimit => "iteration_limit",
            SolverStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons an engine could not produce an [`LpSolution`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    EmptyModel,
    NoObjective,
    /// The backend library could not be loaded or initialised.
    SolverNotAvailable(String),
    /// The engine finished without primal values.
    SolveFailure { status: SolverStatus },
    /// A [`SolverConfig`](crate::SolverConfig) value the backend would reject.
    InvalidConfig { option: &'static str, value: f64 },
    SolverSpecific(String),
}

impl SolverError {
    /// Stable code for matching on the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EmptyModel => "SOLVER_EMPTY_MODEL",
            SolverError::NoObjective => "SOLVER_NO_OBJECTIVE",
            SolverError::SolverNotAvailable(_) => "SOLVER_NOT_AVAILABLE",
            SolverError::SolveFailure { status } => match status {
                SolverStatus::Infeasible => "SOLVER_INFEASIBLE",
                SolverStatus::Unbounded => "SOLVER_UNBOUNDED",
                _ => "SOLVER_SOLVE_FAILURE",
            },
            SolverError::InvalidConfig { .. } => "SOLVER_INVALID_CONFIG",
            SolverError::SolverSpecific(_) => "SOLVER_SPECIFIC",
        }
    }

    /// Terminal status carried by the error, if the engine reported one.
    pub fn status(&self) -> Option<SolverStatus> {
        match self {
            SolverError::SolveFailure { status } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.code())?;
        match self {
            SolverError::EmptyModel => f.write_str("Nothing to solve: the model has no variables"),
            SolverError::NoObjective => f.write_str("The model has no objective to optimize"),
            SolverError::SolverNotAvailable(msg) => write!(f, "Engine unavailable: {msg}"),
            SolverError::SolveFailure { status } => {
                write!(f, "Engine stopped with status {status} and no solution")
            }
            SolverError::InvalidConfig { option, value } => {
                write!(f, "Option {option} cannot be {value}")
            }
            SolverError::SolverSpecific(msg) => write!(f, "Engine error: {msg}"),
        }
    }
}

impl std::error::Error for SolverError {}

/// Primal solution returned by an engine, indexed by [`VariableId`].
#[derive(Debug, Clone)]
pub struct LpSolution {
    pub primal_values: Vec<f64>,
    pub objective_value: f64,
    pub status: SolverStatus,
    pub solve_time_seconds: f64,
    /// Backend counters such as row and column counts.
    pub metadata: BTreeMap<String, f64>,
}

impl LpSolution {
    pub fn value_of(&self, var: VariableId) -> Option<f64> {
        self.primal_values.get(var.index()).copied()
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    pub fn status_string(&self) -> &'static str {
        self.status.as_str()
    }
}

/// An LP backend.
pub trait LpEngine {
    /// Short backend name for logs and reports.
    fn name(&self) -> &'static str;

    /// Solve the model.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SolveFailure`] when the engine terminates without
    /// primal values (infeasible, unbounded, ...), and other variants when the
    /// model cannot be handed to the engine at all.
    fn solve(&mut self, model: &LpModel) -> Result<LpSolution, SolverError>;
}

impl<E: LpEngine + ?Sized> LpEngine for &mut E {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&mut self, model: &LpModel) -> Result<LpSolution, SolverError> {
        (**self).solve(model)
    }
}
