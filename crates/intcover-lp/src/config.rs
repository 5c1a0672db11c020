//! Engine-independent solver settings.

use crate::engine::SolverError;

/// Knobs an [`LpEngine`](crate::LpEngine) may honour.
///
/// Unset fields keep the backend's own default. Build with the `with_*`
/// methods:
///
/// ```
/// use intcover_lp::SolverConfig;
///
/// let config = SolverConfig::new().with_time_limit(30.0).with_threads(1);
/// assert_eq!(config.threads, Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds.
    pub time_limit: Option<f64>,
    pub presolve: Option<bool>,
    pub threads: Option<u32>,
    /// Primal and dual feasibility tolerance.
    pub tolerance: Option<f64>,
    /// Let the backend print its own log.
    pub log_to_console: Option<bool>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    /// True when every setting is left to the backend.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject values no backend accepts: a negative or NaN time limit, and a
    /// tolerance that is not a positive finite number.
    pub fn validate(&self) -> Result<(), SolverError> {
        if let Some(seconds) = self.time_limit.filter(|s| s.is_nan() || *s < 0.0) {
            return Err(SolverError::InvalidConfig {
                option: "time_limit",
                value: seconds,
            });
        }
        if let Some(tolerance) = self
            .tolerance
            .filter(|t| !t.is_finite() || *t <= 0.0)
        {
            return Err(SolverError::InvalidConfig {
                option: "tolerance",
                value: tolerance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_leaves_everything_to_backend() {
        assert!(SolverConfig::new().is_empty());
        assert!(!SolverConfig::new().with_presolve(false).is_empty());
    }

    #[test]
    fn builders_set_their_field_only() {
        let config = SolverConfig::new().with_time_limit(2.5).with_tolerance(1e-7);
        assert_eq!(config.time_limit, Some(2.5));
        assert_eq!(config.tolerance, Some(1e-7));
        assert_eq!(config.threads, None);
        assert_eq!(config.presolve, None);

        let config = config.with_log_to_console(true).with_threads(8);
        assert_eq!(config.log_to_console, Some(true));
        assert_eq!(config.threads, Some(8));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(SolverConfig::new().validate().is_ok());
        assert!(SolverConfig::new().with_time_limit(0.0).validate().is_ok());
        assert!(
            SolverConfig::new()
                .with_time_limit(f64::INFINITY)
                .validate()
                .is_ok()
        );

        let err = SolverConfig::new().with_time_limit(-1.0).validate().unwrap_err();
        assert_eq!(
            err,
            SolverError::InvalidConfig {
                option: "time_limit",
                value: -1.0
            }
        );
        assert_eq!(err.code(), "SOLVER_INVALID_CONFIG");
        assert!(SolverConfig::new().with_time_limit(f64::NAN).validate().is_err());

        for tolerance in [0.0, -1e-9, f64::NAN, f64::INFINITY] {
            let err = SolverConfig::new()
                .with_tolerance(tolerance)
                .validate()
                .unwrap_err();
            assert!(err.to_string().starts_with("[SOLVER_INVALID_CONFIG] Option tolerance"));
        }
    }
}
