//! Error taxonomy shared by every covering path.

use crate::interval::Interval;
use intcover_lp::SolverStatus;

/// Errors raised by generation, solving, rounding and validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverError {
    /// Malformed parameters or intervals.
    InvalidArgument { reason: String },
    /// More subsets requested than there are points to distribute.
    TooManySubsets { requested: i64, available: i64 },
    /// Greedy found a point no interval of the family can cover.
    UncoverablePoint { point: i64 },
    /// The LP engine did not deliver a usable solution.
    OptimizationFailed {
        status: SolverStatus,
        detail: Option<String>,
    },
    /// Randomized rounding ran out of candidates before covering the universe.
    ExhaustedCandidates { first_uncovered: i64 },
    /// A proposed cover does not cover the universe.
    IncompleteCover {
        expected: Interval,
        envelope: Option<Interval>,
        first_gap: Option<i64>,
    },
}

impl CoverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            CoverError::InvalidArgument { .. } => "GENERATE_INVALID_ARGUMENT",
            CoverError::TooManySubsets { .. } => "GENERATE_TOO_MANY_SUBSETS",
            CoverError::UncoverablePoint { .. } => "GREEDY_UNCOVERABLE_POINT",
            CoverError::OptimizationFailed { .. } => "LP_OPTIMIZATION_FAILED",
            CoverError::ExhaustedCandidates { .. } => "ROUNDING_EXHAUSTED_CANDIDATES",
            CoverError::IncompleteCover { .. } => "COVER_INCOMPLETE",
        }
    }

    /// Whether re-running the same operation may succeed.
    ///
    /// Only rounding is randomized; every other failure is deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoverError::ExhaustedCandidates { .. })
    }
}

impl std::fmt::Display for CoverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverError::InvalidArgument { reason } => {
                write!(f, "[{}] Invalid arguments: {}", self.code(), reason)
            }
            CoverError::TooManySubsets {
                requested,
                available,
            } => write!(
                f,
                "[{}] Too many subsets requested: {} subsets for {} points",
                self.code(),
                requested,
                available
            ),
            CoverError::UncoverablePoint { point } => write!(
                f,
                "[{}] No interval covers point {}",
                self.code(),
                point
            ),
            CoverError::OptimizationFailed { status, detail } => match detail {
                Some(detail) => write!(
                    f,
                    "[{}] LP relaxation ended with status {}: {}",
                    self.code(),
                    status,
                    detail
                ),
                None => write!(
                    f,
                    "[{}] LP relaxation ended with status {}",
                    self.code(),
                    status
                ),
            },
            CoverError::ExhaustedCandidates { first_uncovered } => write!(
                f,
                "[{}] Rounding ran out of candidates; point {} is uncovered",
                self.code(),
                first_uncovered
            ),
            CoverError::IncompleteCover {
                expected,
                envelope,
                first_gap,
            } => {
                write!(f, "[{}] Cover does not cover {}", self.code(), expected)?;
                match envelope {
                    Some(envelope) => write!(f, " (envelope {envelope}")?,
                    None => write!(f, " (empty cover")?,
                }
                if let Some(point) = first_gap {
                    write!(f, ", first uncovered point {point}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl std::error::Error for CoverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            CoverError::UncoverablePoint { point: 3 }.code(),
            "GREEDY_UNCOVERABLE_POINT"
        );
        assert_eq!(
            CoverError::ExhaustedCandidates { first_uncovered: 0 }.code(),
            "ROUNDING_EXHAUSTED_CANDIDATES"
        );
        assert_eq!(
            CoverError::TooManySubsets {
                requested: 10,
                available: 5
            }
            .code(),
            "GENERATE_TOO_MANY_SUBSETS"
        );
    }

    #[test]
    fn display_prefixes_error_code() {
        let rendered = CoverError::OptimizationFailed {
            status: SolverStatus::Infeasible,
            detail: None,
        }
        .to_string();
        assert_eq!(
            rendered,
            "[LP_OPTIMIZATION_FAILED] LP relaxation ended with status infeasible"
        );
    }

    #[test]
    fn incomplete_cover_mentions_gap() {
        let rendered = CoverError::IncompleteCover {
            expected: Interval::new(0, 9).unwrap(),
            envelope: Some(Interval::new(0, 9).unwrap()),
            first_gap: Some(5),
        }
        .to_string();
        assert!(rendered.starts_with("[COVER_INCOMPLETE]"));
        assert!(rendered.contains("first uncovered point 5"));
    }

    #[test]
    fn only_rounding_is_retryable() {
        assert!(CoverError::ExhaustedCandidates { first_uncovered: 1 }.is_retryable());
        assert!(!CoverError::UncoverablePoint { point: 1 }.is_retryable());
    }
}
