//! LP relaxation of interval cover.
//!
//! One continuous `[0, 1]` variable per family interval, a unit-cost
//! objective, and one `>= 1` row per universe point summing the variables of
//! every interval containing it.

use crate::error::CoverError;
use crate::interval::Interval;
use intcover_lp::{
    Bounds, LinearExpr, LpEngine, LpModel, ModelError, Sense, SolverStatus, Variable, VariableId,
};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A family interval and the LP variable standing for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalBinding {
    pub interval: Interval,
    pub variable: VariableId,
}

/// Outcome of one relaxation solve.
///
/// Values are indexed by family position. A non-optimal terminal status is
/// kept as data; call [`LpRelaxation::require_optimal`] to turn it into an
/// error.
#[derive(Debug, Clone)]
pub struct LpRelaxation {
    bindings: Vec<IntervalBinding>,
    values: Vec<f64>,
    status: SolverStatus,
    objective_value: Option<f64>,
    num_constraints: usize,
    build_time: Duration,
    solve_time: Duration,
}

impl LpRelaxation {
    /// Relaxation with hand-picked values, one per family interval.
    ///
    /// Mostly useful to drive the rounder without an engine. The status is
    /// optimal and the objective is the value sum.
    pub fn with_values(family: &[Interval], values: Vec<f64>) -> Result<Self, CoverError> {
        if family.len() != values.len() {
            return Err(CoverError::InvalidArgument {
                reason: format!(
                    "{} values for a family of {} intervals",
                    values.len(),
                    family.len()
                ),
            });
        }
        let bindings = family
            .iter()
            .enumerate()
            .map(|(idx, interval)| {
                Ok(IntervalBinding {
                    interval: *interval,
                    variable: variable_for(idx)?,
                })
            })
            .collect::<Result<_, CoverError>>()?;
        Ok(Self {
            bindings,
            objective_value: Some(values.iter().sum()),
            values,
            status: SolverStatus::Optimal,
            num_constraints: 0,
            build_time: Duration::ZERO,
            solve_time: Duration::ZERO,
        })
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Whether the engine delivered primal values.
    pub fn has_solution(&self) -> bool {
        self.objective_value.is_some() && self.values.len() == self.bindings.len()
    }

    /// Fail with [`CoverError::OptimizationFailed`] unless the solve was optimal.
    pub fn require_optimal(&self) -> Result<&Self, CoverError> {
        if self.is_optimal() {
            Ok(self)
        } else {
            Err(CoverError::OptimizationFailed {
                status: self.status,
                detail: None,
            })
        }
    }

    /// Fractional values by family position; empty without a solution.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value_of(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Value of the first family interval equal to `interval`.
    pub fn value_for(&self, interval: Interval) -> Option<f64> {
        self.bindings
            .iter()
            .position(|binding| binding.interval == interval)
            .and_then(|idx| self.value_of(idx))
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    pub fn bindings(&self) -> &[IntervalBinding] {
        &self.bindings
    }

    /// Number of family intervals (and LP variables).
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Coverage rows in the solved model.
    pub fn num_constraints(&self) -> usize {
        self.num_constraints
    }

    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    pub fn solve_time(&self) -> Duration {
        self.solve_time
    }
}

/// Most universe points one model can hold: rows are addressed by `u32`.
pub const MAX_UNIVERSE_POINTS: u64 = u32::MAX as u64;

/// Rows reserved up front; larger models grow as rows are added.
const ROW_RESERVE: usize = 1 << 20;

/// Build the covering LP for `universe` and `family`.
///
/// Variable `i` belongs to `family[i]`; rows are emitted for every universe
/// point in increasing order. A point no interval contains yields an empty
/// `>= 1` row, which makes the model infeasible rather than failing here.
///
/// # Errors
///
/// [`CoverError::InvalidArgument`] when the universe has more than
/// [`MAX_UNIVERSE_POINTS`] points.
pub fn build_model(
    universe: Interval,
    family: &[Interval],
) -> Result<(LpModel, Vec<IntervalBinding>), CoverError> {
    let num_points = universe.len();
    if num_points > MAX_UNIVERSE_POINTS {
        return Err(CoverError::InvalidArgument {
            reason: format!(
                "universe {universe} has {num_points} points; one model holds at most {MAX_UNIVERSE_POINTS}"
            ),
        });
    }
    let reserve = usize::try_from(num_points).map_or(ROW_RESERVE, |n| n.min(ROW_RESERVE));
    let mut model =
        LpModel::with_capacities("interval_cover", Sense::Minimize, family.len(), reserve);

    let mut bindings = Vec::with_capacity(family.len());
    for (idx, interval) in family.iter().enumerate() {
        let name = format!("x{}_{}_{}", idx, interval.low(), interval.high());
        let variable = model
            .add_named_variable(name, Variable::continuous(Bounds::unit()))
            .map_err(model_failure)?;
        bindings.push(IntervalBinding {
            interval: *interval,
            variable,
        });
    }
    model
        .set_objective(LinearExpr::sum(bindings.iter().map(|b| b.variable)))
        .map_err(model_failure)?;

    let mut sorted = bindings.clone();
    sorted.sort_by_key(|binding| binding.interval.low());

    let mut cursor = 0;
    let mut active: Vec<IntervalBinding> = Vec::new();
    let mut uncovered = 0usize;
    for point in universe.low()..=universe.high() {
        while let Some(binding) = sorted.get(cursor).filter(|b| b.interval.low() <= point) {
            active.push(*binding);
            cursor += 1;
        }
        active.retain(|binding| binding.interval.high() >= point);
        if active.is_empty() {
            uncovered += 1;
        }

        let row = LinearExpr::sum(active.iter().map(|b| b.variable));
        model.add_constraint(row.geq(1.0)).map_err(model_failure)?;
    }

    if uncovered > 0 {
        warn!(
            component = "relax",
            operation = "build_model",
            status = "warn",
            uncovered,
            "Universe points outside every interval; model is infeasible"
        );
    }
    debug!(
        component = "relax",
        operation = "build_model",
        status = "success",
        variables = model.num_variables(),
        constraints = model.num_constraints(),
        coefficients = model.num_coefficients(),
        "Built covering LP"
    );
    Ok((model, bindings))
}

/// Build the covering LP and solve it with `engine`.
///
/// # Errors
///
/// [`CoverError::OptimizationFailed`] when the model cannot be built or the
/// engine fails outright. An engine that terminates without a solution
/// (infeasible and the like) is not an error here: the relaxation comes back
/// with that status and no values.
pub fn build_and_solve<E: LpEngine + ?Sized>(
    universe: Interval,
    family: &[Interval],
    engine: &mut E,
) -> Result<LpRelaxation, CoverError> {
    let build_started = Instant::now();
    let (model, bindings) = build_model(universe, family)?;
    let build_time = build_started.elapsed();
    let num_constraints = model.num_constraints();

    let solve_started = Instant::now();
    let outcome = engine.solve(&model);
    let solve_time = solve_started.elapsed();

    let (values, status, objective_value) = match outcome {
        Ok(solution) => {
            let values = bindings
                .iter()
                .map(|binding| solution.value_of(binding.variable).unwrap_or(0.0))
                .collect();
            (values, solution.status, Some(solution.objective_value))
        }
        Err(intcover_lp::SolverError::SolveFailure { status }) => {
            warn!(
                component = "relax",
                operation = "solve",
                status = "warn",
                engine = engine.name(),
                solver_status = status.as_str(),
                "Relaxation solved without a usable solution"
            );
            (Vec::new(), status, None)
        }
        Err(err) => {
            return Err(CoverError::OptimizationFailed {
                status: err.status().unwrap_or(SolverStatus::Unknown),
                detail: Some(err.to_string()),
            });
        }
    };

    debug!(
        component = "relax",
        operation = "solve",
        status = "success",
        engine = engine.name(),
        solver_status = status.as_str(),
        objective = objective_value,
        build_ms = build_time.as_secs_f64() * 1000.0,
        solve_ms = solve_time.as_secs_f64() * 1000.0,
        "Relaxation solved"
    );
    Ok(LpRelaxation {
        bindings,
        values,
        status,
        objective_value,
        num_constraints,
        build_time,
        solve_time,
    })
}

fn variable_for(index: usize) -> Result<VariableId, CoverError> {
    u32::try_from(index)
        .map(VariableId::new)
        .map_err(|_| CoverError::InvalidArgument {
            reason: format!("family position {index} does not fit a variable handle"),
        })
}

fn model_failure(err: ModelError) -> CoverError {
    CoverError::OptimizationFailed {
        status: SolverStatus::Unknown,
        detail: Some(err.to_string()),
    }
}
