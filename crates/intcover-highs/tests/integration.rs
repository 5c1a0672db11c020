#![allow(clippy::float_cmp)]

use intcover_highs::{HighsEngine, HighsModel, HighsStatus, ObjectiveSense};
use intcover_lp::{
    Bounds, LinearExpr, LpEngine, LpModel, Sense, SolverConfig, SolverError, SolverStatus,
    Variable,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// minimize 2x + 3y subject to x + y >= 5, x,y >= 0
#[test]
fn test_simple_lp() {
    init_tracing();
    let mut model = LpModel::new("simple", Sense::Minimize);
    let x = model
        .add_variable(Variable::continuous(Bounds::at_least(0.0)))
        .unwrap();
    let y = model
        .add_variable(Variable::continuous(Bounds::at_least(0.0)))
        .unwrap();
    model.add_constraint(LinearExpr::sum([x, y]).geq(5.0)).unwrap();
    model
        .set_objective(LinearExpr::from_terms(vec![(x, 2.0), (y, 3.0)]))
        .unwrap();

    let solution = HighsEngine::new().solve(&model).expect("solve failed");

    assert_eq!(solution.status, SolverStatus::Optimal);
    assert!(
        (solution.objective_value - 10.0).abs() < 1e-6,
        "Expected objective value 10.0, got {}",
        solution.objective_value
    );
    assert!((solution.value_of(x).unwrap() - 5.0).abs() < 1e-6);
    assert!(solution.value_of(y).unwrap().abs() < 1e-6);
}

/// Three unit-bounded intervals over points 0..=9: [0,4], [3,7], [5,9].
/// Points 0..=2 force a=1 and points 8..=9 force c=1, so the LP optimum is 2.
#[test]
fn test_interval_covering_lp_optimum() {
    init_tracing();
    let mut model = LpModel::new("cover", Sense::Minimize);
    let intervals = [(0, 4), (3, 7), (5, 9)];
    let vars: Vec<_> = intervals
        .iter()
        .map(|_| model.add_variable(Variable::continuous(Bounds::unit())).unwrap())
        .collect();
    model.set_objective(LinearExpr::sum(vars.iter().copied())).unwrap();
    for point in 0..=9 {
        let covering = intervals
            .iter()
            .zip(&vars)
            .filter(|((low, high), _)| *low <= point && point <= *high)
            .map(|(_, var)| *var);
        model.add_constraint(LinearExpr::sum(covering).geq(1.0)).unwrap();
    }

    let solution = HighsEngine::with_config(SolverConfig::new().with_threads(1))
        .solve(&model)
        .expect("solve failed");

    assert!(solution.is_optimal());
    assert!((solution.objective_value - 2.0).abs() < 1e-6);
    assert!((solution.value_of(vars[0]).unwrap() - 1.0).abs() < 1e-6);
    assert!((solution.value_of(vars[2]).unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn test_infeasible_model_reports_status() {
    init_tracing();
    let mut model = LpModel::new("infeasible", Sense::Minimize);
    let x = model
        .add_variable(Variable::continuous(Bounds::unit()))
        .unwrap();
    model.set_objective(LinearExpr::term(x, 1.0)).unwrap();
    model.add_constraint(LinearExpr::term(x, 1.0).geq(2.0)).unwrap();

    let err = HighsEngine::new().solve(&model).unwrap_err();
    assert!(
        matches!(err, SolverError::SolveFailure { status } if !status.has_solution()),
        "unexpected error {err}"
    );
}

#[test]
fn test_empty_row_with_positive_rhs_is_infeasible() {
    let mut model = LpModel::new("gap", Sense::Minimize);
    let x = model
        .add_variable(Variable::continuous(Bounds::unit()))
        .unwrap();
    model.set_objective(LinearExpr::term(x, 1.0)).unwrap();
    model.add_constraint(LinearExpr::new().geq(1.0)).unwrap();

    let err = HighsEngine::new().solve(&model).unwrap_err();
    assert!(matches!(err, SolverError::SolveFailure { .. }));
}

#[test]
fn test_integer_variable_is_enforced() {
    init_tracing();
    let mut highs = HighsModel::new();
    let x = highs.add_col(0.0, 10.0, 1.0, true);
    highs
        .add_row(f64::NEG_INFINITY, 1.5, &[(x, 1.0)])
        .expect("failed to add row");
    highs.set_objective_sense(ObjectiveSense::Maximize);

    let status = highs.solve();
    assert_eq!(status, HighsStatus::Optimal);

    let values = highs.col_values().expect("missing solution");
    assert!(
        (values[x] - 1.0).abs() < 1e-6,
        "Expected integer x = 1.0, got {}",
        values[x]
    );
}
