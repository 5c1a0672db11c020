//! The [`LpModel`] builder.
//!
//! - [`error`]: model error types
//! - [`builder`]: adding variables, rows and the objective
//! - [`storage`]: read access for engines

mod builder;
mod error;
mod storage;

use crate::ids::{ConstraintId, VariableId};
use crate::types::{Constraint, Sense, Variable};
use std::collections::BTreeMap;
use std::time::Instant;

pub use error::ModelError;

/// A named linear program under construction.
///
/// Variables and rows live in dense vectors indexed by their handles. Rows are
/// stored row-first since every consumer in this workspace builds constraints
/// one row at a time.
#[derive(Debug, Clone)]
pub struct LpModel {
    name: String,
    sense: Sense,
    pub(crate) variables: Vec<Variable>,
    pub(crate) constraints: Vec<Constraint>,
    // Row-first sparse storage: constraint index -> (variable_id, coefficient)
    pub(crate) rows: Vec<Vec<(VariableId, f64)>>,
    pub(crate) objective: Option<Vec<(VariableId, f64)>>,
    // Lazy-allocated names
    pub(crate) variable_names: Option<BTreeMap<VariableId, String>>,
}

impl LpModel {
    /// Create an empty problem with the given name and objective sense.
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        Self {
            name: name.into(),
            sense,
            variables: Vec::new(),
            constraints: Vec::new(),
            rows: Vec::new(),
            objective: None,
            variable_names: None,
        }
    }

    /// Create an empty problem with pre-sized storage.
    pub fn with_capacities(
        name: impl Into<String>,
        sense: Sense,
        variables: usize,
        constraints: usize,
    ) -> Self {
        Self {
            variables: Vec::with_capacity(variables),
            constraints: Vec::with_capacity(constraints),
            rows: Vec::with_capacity(constraints),
            ..Self::new(name, sense)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if id.index() < self.variables.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if id.index() < self.constraints.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    /// Validate, merge duplicate variables and drop zero coefficients.
    pub(crate) fn normalize_terms(
        &self,
        terms: Vec<(VariableId, f64)>,
    ) -> Result<Vec<(VariableId, f64)>, ModelError> {
        let started = Instant::now();
        let terms_in = terms.len();

        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var_id, coeff) in terms {
            self.ensure_variable_exists(var_id)?;
            if !coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient { coefficient: coeff });
            }
            if coeff == 0.0 {
                continue;
            }
            *merged.entry(var_id).or_insert(0.0) += coeff;
        }

        let normalized: Vec<(VariableId, f64)> = merged
            .into_iter()
            .filter(|(_, coeff)| *coeff != 0.0)
            .collect();

        tracing::trace!(
            component = "model",
            operation = "lower_expr",
            status = "success",
            expr_terms_in = terms_in,
            expr_terms_out = normalized.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Lowered linear expression"
        );

        Ok(normalized)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::expr::LinearExpr;
    use crate::types::Bounds;

    #[test]
    fn test_new_model_is_empty() {
        let model = LpModel::new("empty", Sense::Minimize);
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.num_constraints(), 0);
        assert_eq!(model.name(), "empty");
        assert!(model.objective().is_none());
    }

    #[test]
    fn test_add_variable() {
        let mut model = LpModel::new("m", Sense::Minimize);
        let var = Variable::continuous(Bounds::new(0.0, 10.0));

        let id = model.add_variable(var).unwrap();
        assert_eq!(model.num_variables(), 1);
        assert_eq!(model.get_variable(id).unwrap(), &var);
    }

    #[test]
    fn test_named_variable_lookup() {
        let mut model = LpModel::new("m", Sense::Minimize);
        let unnamed = model.add_variable(Variable::binary()).unwrap();
        let named = model
            .add_named_variable("x_3_7", Variable::continuous(Bounds::unit()))
            .unwrap();

        assert_eq!(model.variable_name(named), Some("x_3_7"));
        assert_eq!(model.variable_name(unnamed), None);
    }

    #[test]
    fn test_variable_bounds_validation() {
        let mut model = LpModel::new("m", Sense::Minimize);
        let result = model.add_variable(Variable::continuous(Bounds::new(5.0, 1.0)));
        assert!(matches!(
            result,
            Err(ModelError::InvalidVariableBounds { .. })
        ));
        assert_eq!(model.num_variables(), 0);
    }

    #[test]
    fn test_constraint_merges_duplicate_terms() {
        let mut model = LpModel::new("m", Sense::Minimize);
        let x = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();
        let y = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();

        let mut expr = LinearExpr::new();
        expr.push(y, 1.0);
        expr.push(x, 1.0);
        expr.push(y, 2.0);
        expr.push(x, 0.0);
        let row = model.add_constraint(expr.geq(1.0)).unwrap();

        assert_eq!(model.row(row).unwrap(), &[(x, 1.0), (y, 3.0)]);
        let stored = model.get_constraint(row).unwrap();
        assert_eq!(stored.bounds.lower, 1.0);
        assert!(stored.bounds.upper.is_infinite());
    }

    #[test]
    fn test_constraint_with_unknown_variable_fails() {
        let mut model = LpModel::new("m", Sense::Minimize);
        let result = model.add_constraint(LinearExpr::term(VariableId::new(9), 1.0).leq(1.0));
        assert_eq!(result, Err(ModelError::InvalidVariableId(VariableId::new(9))));
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn test_non_finite_coefficient_rejected() {
        let mut model = LpModel::new("m", Sense::Minimize);
        let x = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();
        let result = model.set_objective(LinearExpr::term(x, f64::INFINITY));
        assert!(matches!(result, Err(ModelError::InvalidCoefficient { .. })));
    }

    #[test]
    fn test_multiple_objectives_rejected() {
        let mut model = LpModel::new("m", Sense::Minimize);
        let x = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();

        model.set_objective(LinearExpr::term(x, 1.0)).unwrap();
        let result = model.set_objective(LinearExpr::term(x, 2.0));
        assert_eq!(result, Err(ModelError::MultipleObjectives));
        assert_eq!(model.objective().unwrap(), &[(x, 1.0)]);
    }

    #[test]
    fn test_objective_coefficients_are_dense() {
        let mut model = LpModel::new("m", Sense::Minimize);
        let x = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();
        let _y = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();
        let z = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();
        model
            .set_objective(LinearExpr::from_terms(vec![(z, 3.0), (x, 1.5)]))
            .unwrap();

        assert_eq!(model.objective_coefficients(), vec![1.5, 0.0, 3.0]);
    }

    #[test]
    fn test_num_coefficients_counts_all_rows() {
        let mut model = LpModel::with_capacities("m", Sense::Minimize, 2, 2);
        let x = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();
        let y = model.add_variable(Variable::continuous(Bounds::unit())).unwrap();
        model.add_constraint(LinearExpr::sum([x, y]).geq(1.0)).unwrap();
        model.add_constraint(LinearExpr::sum([y]).equals(1.0)).unwrap();

        assert_eq!(model.num_constraints(), 2);
        assert_eq!(model.num_coefficients(), 3);
        assert_eq!(model.rows().count(), 2);
    }
}
