//! Safe layer over the `highs` crate's row-oriented problem.
//!
//! Columns are added first, then rows referencing them by position. A solve
//! consumes the pending problem and keeps the solved model around for value
//! queries. The only unsafe code reads the library version string.
#![allow(unsafe_code)]

use highs::{Col, HighsModelStatus, RowProblem, Sense as HighsSense, SolvedModel};
use std::ffi::CStr;
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Terminal model status reported by HiGHS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Presolve proved one of the two without telling which.
    UnboundedOrInfeasible,
    ReachedTimeLimit,
    ReachedIterationLimit,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighsModelError {
    UnknownColumn { column: usize, num_columns: usize },
    NotSolved { query: &'static str },
}

impl HighsModelError {
    pub fn code(&self) -> &'static str {
        match self {
            HighsModelError::UnknownColumn { .. } => "HIGHS_UNKNOWN_COLUMN",
            HighsModelError::NotSolved { .. } => "HIGHS_NOT_SOLVED",
        }
    }
}

impl fmt::Display for HighsModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsModelError::UnknownColumn {
                column,
                num_columns,
            } => write!(
                f,
                "[{}] Row references column {} but only {} exist",
                self.code(),
                column,
                num_columns
            ),
            HighsModelError::NotSolved { query } => {
                write!(f, "[{}] {} requires a solved model", self.code(), query)
            }
        }
    }
}

impl std::error::Error for HighsModelError {}

/// Typed value for a HiGHS option.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsOption {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

/// A HiGHS problem under construction, or the result of its last solve.
pub struct HighsModel {
    pending: RowProblem,
    sense: ObjectiveSense,
    columns: Vec<Col>,
    num_rows: usize,
    verbose: bool,
    options: Vec<(String, HighsOption)>,
    solved: Option<SolvedModel>,
}

impl HighsModel {
    pub fn new() -> Self {
        HighsModel {
            pending: RowProblem::default(),
            sense: ObjectiveSense::Minimize,
            columns: Vec::new(),
            num_rows: 0,
            verbose: false,
            options: Vec::new(),
            solved: None,
        }
    }

    /// Append a column with bounds `[lower, upper]` and objective cost `cost`;
    /// returns its position.
    pub fn add_col(&mut self, lower: f64, upper: f64, cost: f64, integer: bool) -> usize {
        self.solved = None;
        let col = if integer {
            self.pending.add_integer_column(cost, lower..=upper)
        } else {
            self.pending.add_column(cost, lower..=upper)
        };
        self.columns.push(col);
        self.columns.len() - 1
    }

    /// Append a row `lower <= sum(coeff * column) <= upper`; returns its position.
    ///
    /// # Errors
    ///
    /// [`HighsModelError::UnknownColumn`] if an entry names a column that was
    /// never added. The row is not added in that case.
    pub fn add_row(
        &mut self,
        lower: f64,
        upper: f64,
        entries: &[(usize, f64)],
    ) -> Result<usize, HighsModelError> {
        let num_columns = self.columns.len();
        let factors = entries
            .iter()
            .map(|&(column, coeff)| {
                self.columns
                    .get(column)
                    .map(|col| (*col, coeff))
                    .ok_or(HighsModelError::UnknownColumn {
                        column,
                        num_columns,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.solved = None;
        self.pending.add_row(lower..=upper, factors);
        self.num_rows += 1;
        Ok(self.num_rows - 1)
    }

    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    /// Let HiGHS print its own log during the next solve.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Queue an option for the next solve. Later values for the same name win.
    pub fn set_option(&mut self, name: impl Into<String>, value: HighsOption) {
        self.options.push((name.into(), value));
    }

    /// Solve the pending problem.
    ///
    /// Afterwards the builder is empty again: new columns and rows start a
    /// fresh problem, and queued options are spent.
    pub fn solve(&mut self) -> HighsStatus {
        debug!(
            component = "highs",
            operation = "solve",
            status = "start",
            columns = self.columns.len(),
            rows = self.num_rows,
            sense = ?self.sense,
            options = self.options.len(),
            "Handing problem to HiGHS"
        );

        let sense = match self.sense {
            ObjectiveSense::Minimize => HighsSense::Minimise,
            ObjectiveSense::Maximize => HighsSense::Maximise,
        };
        let mut model = std::mem::take(&mut self.pending).optimise(sense);
        if self.verbose {
            model.set_option("output_flag", true);
            model.set_option("log_to_console", true);
        } else {
            model.make_quiet();
        }
        for (name, value) in self.options.drain(..) {
            let name = name.as_str();
            match value {
                HighsOption::Bool(v) => model.set_option(name, v),
                HighsOption::Int(v) => model.set_option(name, v),
                HighsOption::Float(v) => model.set_option(name, v),
                HighsOption::Str(v) => model.set_option(name, v.as_str()),
            }
        }

        let solved = model.solve();
        let status = map_status(solved.status());
        trace!(
            component = "highs",
            operation = "solve",
            status = "success",
            model_status = ?status,
            "HiGHS returned"
        );
        self.solved = Some(solved);
        self.columns.clear();
        self.num_rows = 0;
        status
    }

    /// Columns added since the last solve.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Rows added since the last solve.
    pub fn rows(&self) -> usize {
        self.num_rows
    }

    pub fn objective_value(&self) -> Result<f64, HighsModelError> {
        self.solved_model("objective_value")
            .map(SolvedModel::objective_value)
    }

    /// Primal value of every column of the last solved problem, by position.
    pub fn col_values(&self) -> Result<Vec<f64>, HighsModelError> {
        self.solved_model("col_values")
            .map(|solved| solved.get_solution().columns().to_vec())
    }

    fn solved_model(&self, query: &'static str) -> Result<&SolvedModel, HighsModelError> {
        self.solved
            .as_ref()
            .ok_or(HighsModelError::NotSolved { query })
    }
}

impl Default for HighsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HighsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighsModel")
            .field("columns", &self.columns.len())
            .field("rows", &self.num_rows)
            .field("sense", &self.sense)
            .field("solved", &self.solved.is_some())
            .finish_non_exhaustive()
    }
}

/// Version string of the linked HiGHS library.
pub fn highs_version() -> Option<String> {
    // SAFETY: Highs_version returns a pointer to a static NUL-terminated string
    // owned by the library, or null.
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            return None;
        }
        CStr::from_ptr(ptr).to_str().ok().map(str::to_owned)
    }
}

fn map_status(status: HighsModelStatus) -> HighsStatus {
    match status {
        HighsModelStatus::Optimal => HighsStatus::Optimal,
        HighsModelStatus::Infeasible => HighsStatus::Infeasible,
        HighsModelStatus::Unbounded => HighsStatus::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => HighsStatus::UnboundedOrInfeasible,
        HighsModelStatus::ReachedTimeLimit => HighsStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => HighsStatus::ReachedIterationLimit,
        _ => HighsStatus::Unknown,
    }
}
