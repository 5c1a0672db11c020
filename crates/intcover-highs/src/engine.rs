//! [`LpEngine`] implementation backed by HiGHS.

use crate::ffi::{HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense};
use crate::status::{highs_has_solution, highs_to_solver_status};
use intcover_lp::{LpEngine, LpModel, LpSolution, Sense, SolverConfig, SolverError};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// HiGHS-backed LP engine. Holds only configuration, so one engine can solve
/// any number of models.
#[derive(Debug, Clone, Default)]
pub struct HighsEngine {
    config: SolverConfig,
}

impl HighsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }
}

impl LpEngine for HighsEngine {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&mut self, model: &LpModel) -> Result<LpSolution, SolverError> {
        self.config.validate()?;
        if model.num_variables() == 0 {
            return Err(SolverError::EmptyModel);
        }
        if model.objective().is_none() {
            return Err(SolverError::NoObjective);
        }

        let started = Instant::now();
        let mut highs = HighsModel::new();
        configure(&mut highs, &self.config);
        lower_model(model, &mut highs)?;
        debug!(
            component = "highs",
            operation = "lower",
            status = "success",
            problem = model.name(),
            columns = highs.columns(),
            rows = highs.rows(),
            nnz = model.num_coefficients(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Lowered model into HiGHS"
        );

        let status = highs.solve();
        let elapsed = started.elapsed();
        if !highs_has_solution(status) {
            warn!(
                component = "highs",
                operation = "solve",
                status = "warn",
                problem = model.name(),
                model_status = ?status,
                duration_ms = elapsed.as_secs_f64() * 1000.0,
                "No primal solution"
            );
            return Err(SolverError::SolveFailure {
                status: highs_to_solver_status(status),
            });
        }
        if status != HighsStatus::Optimal {
            warn!(
                component = "highs",
                operation = "solve",
                status = "warn",
                problem = model.name(),
                model_status = ?status,
                "Limit reached; returning best solution found"
            );
        }

        let primal_values = highs.col_values().map_err(specific)?;
        let objective_value = highs.objective_value().map_err(specific)?;
        debug!(
            component = "highs",
            operation = "solve",
            status = "success",
            problem = model.name(),
            model_status = ?status,
            objective_value,
            duration_ms = elapsed.as_secs_f64() * 1000.0,
            "Solve finished"
        );

        let metadata = BTreeMap::from([
            ("rows".to_string(), model.num_constraints() as f64),
            ("cols".to_string(), model.num_variables() as f64),
            ("nnz".to_string(), model.num_coefficients() as f64),
        ]);
        Ok(LpSolution {
            primal_values,
            objective_value,
            status: highs_to_solver_status(status),
            solve_time_seconds: elapsed.as_secs_f64(),
            metadata,
        })
    }
}

fn specific(err: HighsModelError) -> SolverError {
    SolverError::SolverSpecific(err.to_string())
}

/// Map [`SolverConfig`] fields onto HiGHS option names.
///
/// HiGHS aborts on out-of-range values, so the config must have passed
/// [`SolverConfig::validate`].
fn configure(highs: &mut HighsModel, config: &SolverConfig) {
    highs.set_verbose(config.log_to_console.unwrap_or(false));
    if let Some(seconds) = config.time_limit {
        highs.set_option("time_limit", HighsOption::Float(seconds));
    }
    if let Some(presolve) = config.presolve {
        let value = if presolve { "on" } else { "off" };
        highs.set_option("presolve", HighsOption::Str(value.to_string()));
    }
    if let Some(threads) = config.threads {
        let threads = i32::try_from(threads).unwrap_or(i32::MAX);
        highs.set_option("threads", HighsOption::Int(threads));
    }
    if let Some(tolerance) = config.tolerance {
        for name in ["primal_feasibility_tolerance", "dual_feasibility_tolerance"] {
            highs.set_option(name, HighsOption::Float(tolerance));
        }
    }
}

/// Columns in handle order (so column `i` is variable `i`), then rows.
fn lower_model(model: &LpModel, highs: &mut HighsModel) -> Result<(), SolverError> {
    highs.set_objective_sense(match model.sense() {
        Sense::Minimize => ObjectiveSense::Minimize,
        Sense::Maximize => ObjectiveSense::Maximize,
    });

    let costs = model.objective_coefficients();
    for ((id, var), cost) in model.variables().zip(costs) {
        let column = highs.add_col(var.bounds.lower, var.bounds.upper, cost, var.is_integer());
        trace!(
            component = "highs",
            operation = "add_col",
            var = id.inner(),
            column,
            cost,
            "Added column"
        );
    }

    let mut entries: Vec<(usize, f64)> = Vec::new();
    for (_, constraint, row) in model.rows() {
        entries.clear();
        entries.extend(row.iter().map(|(id, coeff)| (id.index(), *coeff)));
        highs
            .add_row(constraint.bounds.lower, constraint.bounds.upper, &entries)
            .map_err(specific)?;
    }
    Ok(())
}
