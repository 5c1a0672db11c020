//! Linear program modelling layer for intcover.
//!
//! The covering algorithms never talk to a solver library directly. They build
//! an [`LpModel`] out of opaque [`VariableId`] / [`ConstraintId`] handles and hand
//! it to any [`LpEngine`] implementation.
//!
//! - [`ids`]: handle types
//! - [`expr`]: linear expressions and comparison constraints
//! - [`types`]: bounds, variable kinds, objective sense
//! - [`model`]: the model builder and its errors
//! - [`engine`]: engine trait, solution, status, solver errors
//! - [`config`]: engine-agnostic solver options

pub mod config;
pub mod engine;
pub mod expr;
pub mod ids;
pub mod model;
pub mod types;

pub use config::SolverConfig;
pub use engine::{LpEngine, LpSolution, SolverError, SolverStatus};
pub use expr::{ComparisonSense, ConstraintExpr, LinearExpr};
pub use ids::{ConstraintId, VariableId};
pub use model::{LpModel, ModelError};
pub use types::{Bounds, Constraint, Sense, Variable, VariableKind};
