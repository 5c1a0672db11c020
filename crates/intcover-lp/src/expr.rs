//! Linear expressions and the comparison constraints built from them.

use crate::ids::VariableId;

/// A linear expression `sum(coeff * var)`.
///
/// Duplicate variables are allowed here; the model merges them when the
/// expression is lowered into an objective or a row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VariableId, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-term expression.
    pub fn term(var: VariableId, coeff: f64) -> Self {
        Self {
            terms: vec![(var, coeff)],
        }
    }

    pub fn from_terms(terms: Vec<(VariableId, f64)>) -> Self {
        Self { terms }
    }

    /// Unit-coefficient sum over the given variables.
    pub fn sum<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = VariableId>,
    {
        vars.into_iter().collect()
    }

    pub fn push(&mut self, var: VariableId, coeff: f64) {
        self.terms.push((var, coeff));
    }

    pub fn terms(&self) -> &[(VariableId, f64)] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<(VariableId, f64)> {
        self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `self >= rhs`
    pub fn geq(self, rhs: f64) -> ConstraintExpr {
        ConstraintExpr::new(self, ComparisonSense::GreaterEqual, rhs)
    }

    /// `self <= rhs`
    pub fn leq(self, rhs: f64) -> ConstraintExpr {
        ConstraintExpr::new(self, ComparisonSense::LessEqual, rhs)
    }

    /// `self == rhs`
    pub fn equals(self, rhs: f64) -> ConstraintExpr {
        ConstraintExpr::new(self, ComparisonSense::Equal, rhs)
    }
}

impl FromIterator<VariableId> for LinearExpr {
    fn from_iter<T: IntoIterator<Item = VariableId>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().map(|var| (var, 1.0)).collect(),
        }
    }
}

impl FromIterator<(VariableId, f64)> for LinearExpr {
    fn from_iter<T: IntoIterator<Item = (VariableId, f64)>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::GreaterEqual => "ge",
            ComparisonSense::Equal => "eq",
        }
    }
}

/// Linear expression compared against a right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintExpr {
    expr: LinearExpr,
    sense: ComparisonSense,
    rhs: f64,
}

impl ConstraintExpr {
    pub fn new(expr: LinearExpr, sense: ComparisonSense, rhs: f64) -> Self {
        Self { expr, sense, rhs }
    }

    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn into_parts(self) -> (LinearExpr, ComparisonSense, f64) {
        (self.expr, self.sense, self.rhs)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn sum_uses_unit_coefficients() {
        let expr = LinearExpr::sum([VariableId::new(0), VariableId::new(3)]);
        assert_eq!(
            expr.terms(),
            &[(VariableId::new(0), 1.0), (VariableId::new(3), 1.0)]
        );
    }

    #[test]
    fn geq_builds_constraint() {
        let constraint = LinearExpr::term(VariableId::new(1), 2.0).geq(1.0);
        assert_eq!(constraint.sense(), ComparisonSense::GreaterEqual);
        assert_eq!(constraint.rhs(), 1.0);
        assert_eq!(constraint.expr().len(), 1);
    }

    #[test]
    fn empty_sum_is_empty() {
        let expr = LinearExpr::sum(std::iter::empty());
        assert!(expr.is_empty());
        assert_eq!(ComparisonSense::Equal.as_str(), "eq");
    }
}
