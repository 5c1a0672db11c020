//! Model builder methods for adding variables, constraints, and the objective.

use crate::expr::{ComparisonSense, ConstraintExpr, LinearExpr};
use crate::ids::{ConstraintId, VariableId};
use crate::types::{Bounds, Constraint, Variable};

use super::LpModel;
use super::error::ModelError;

impl LpModel {
    /// Add a variable to the model.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        if !variable.bounds.is_valid() {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }

        let id = VariableId::new(next_handle(self.variables.len(), "variables")?);
        self.variables.push(variable);
        Ok(id)
    }

    /// Add a variable and attach a name to it.
    pub fn add_named_variable(
        &mut self,
        name: impl Into<String>,
        variable: Variable,
    ) -> Result<VariableId, ModelError> {
        let id = self.add_variable(variable)?;
        self.variable_names
            .get_or_insert_with(Default::default)
            .insert(id, name.into());
        Ok(id)
    }

    /// Add a row with explicit bounds.
    pub fn add_expr_constraint(
        &mut self,
        expr: LinearExpr,
        bounds: Bounds,
    ) -> Result<ConstraintId, ModelError> {
        if !bounds.is_valid() {
            return Err(ModelError::InvalidConstraintBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }
        let id = ConstraintId::new(next_handle(self.constraints.len(), "constraints")?);
        let row = self.normalize_terms(expr.into_terms())?;

        self.constraints.push(Constraint { bounds });
        self.rows.push(row);
        Ok(id)
    }

    /// Add a row from a comparison expression (e.g., `x + y >= 1`).
    pub fn add_constraint(
        &mut self,
        constraint: ConstraintExpr,
    ) -> Result<ConstraintId, ModelError> {
        let (expr, sense, rhs) = constraint.into_parts();
        let bounds = match sense {
            ComparisonSense::LessEqual => Bounds::new(f64::NEG_INFINITY, rhs),
            ComparisonSense::GreaterEqual => Bounds::at_least(rhs),
            ComparisonSense::Equal => Bounds::new(rhs, rhs),
        };
        self.add_expr_constraint(expr, bounds)
    }

    /// Set the objective expression; the sense was fixed when the model was created.
    ///
    /// Returns an error if the model already has an objective.
    pub fn set_objective(&mut self, expr: LinearExpr) -> Result<(), ModelError> {
        if self.objective.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        let terms = self.normalize_terms(expr.into_terms())?;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = self.sense().as_str(),
            terms = terms.len(),
            "Set objective function"
        );
        self.objective = Some(terms);
        Ok(())
    }
}

/// Handle for the entry about to be pushed at position `len`.
fn next_handle(len: usize, kind: &'static str) -> Result<u32, ModelError> {
    u32::try_from(len).map_err(|_| ModelError::CapacityExceeded { kind })
}
