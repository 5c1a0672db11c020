//! Storage access methods for the model.

use crate::ids::{ConstraintId, VariableId};
use crate::types::{Constraint, Variable};

use super::LpModel;
use super::error::ModelError;

impl LpModel {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get the number of non-zero row coefficients in the model.
    pub fn num_coefficients(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Get a variable by ID.
    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(id.index())
            .ok_or(ModelError::InvalidVariableId(id))
    }

    /// Get a constraint by ID.
    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(id.index())
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Name attached with [`LpModel::add_named_variable`], if any.
    pub fn variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names
            .as_ref()
            .and_then(|names| names.get(&id))
            .map(String::as_str)
    }

    /// Coefficients of one row, sorted by variable.
    pub fn row(&self, id: ConstraintId) -> Result<&[(VariableId, f64)], ModelError> {
        self.ensure_constraint_exists(id)?;
        Ok(&self.rows[id.index()])
    }

    /// Iterate over all variables in handle order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(index, var)| (VariableId::new(index as u32), var))
    }

    /// Iterate over all rows in handle order.
    pub fn rows(&self) -> impl Iterator<Item = (ConstraintId, &Constraint, &[(VariableId, f64)])> {
        self.constraints
            .iter()
            .zip(&self.rows)
            .enumerate()
            .map(|(index, (constraint, row))| {
                (ConstraintId::new(index as u32), constraint, row.as_slice())
            })
    }

    /// Normalized objective terms, or `None` when no objective was set.
    pub fn objective(&self) -> Option<&[(VariableId, f64)]> {
        self.objective.as_deref()
    }

    /// Dense objective vector aligned with variable handles.
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coeffs = vec![0.0; self.variables.len()];
        for (var_id, coeff) in self.objective.iter().flatten() {
            if let Some(slot) = coeffs.get_mut(var_id.index()) {
                *slot += *coeff;
            }
        }
        coeffs
    }
}
