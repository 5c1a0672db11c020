//! Model error types.

use crate::ids::{ConstraintId, VariableId};

/// Rejected model edits. The model is left unchanged when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A handle from another model, or one never issued.
    InvalidVariableId(VariableId),
    /// NaN bound or `lower > upper`.
    InvalidVariableBounds { lower: f64, upper: f64 },
    InvalidConstraintId(ConstraintId),
    InvalidConstraintBounds { lower: f64, upper: f64 },
    InvalidCoefficient { coefficient: f64 },
    MultipleObjectives,
    /// More variables or rows than a `u32` handle can address.
    CapacityExceeded { kind: &'static str },
}

impl ModelError {
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::InvalidConstraintBounds { .. } => "CONSTRAINT_INVALID_BOUNDS",
            ModelError::InvalidCoefficient { .. } => "COEFFICIENT_INVALID",
            ModelError::MultipleObjectives => "OBJECTIVE_ALREADY_SET",
            ModelError::CapacityExceeded { .. } => "MODEL_CAPACITY_EXCEEDED",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidVariableId(id) => write!(
                f,
                "[{}] Variable ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidConstraintId(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidConstraintBounds { lower, upper } => write!(
                f,
                "[{}] Constraint bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidCoefficient { coefficient } => write!(
                f,
                "[{}] Coefficient must be finite (got {})",
                self.code(),
                coefficient
            ),
            ModelError::MultipleObjectives => write!(
                f,
                "[{}] Model already has an objective",
                self.code()
            ),
            ModelError::CapacityExceeded { kind } => write!(
                f,
                "[{}] Model cannot hold more than {} {}",
                self.code(),
                u32::MAX,
                kind
            ),
        }
    }
}

impl std::error::Error for ModelError {}
