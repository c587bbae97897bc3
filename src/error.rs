//! Error types for distribution construction, queries and numerics.

use thiserror::Error;

/// Result type alias using [`DistributionError`].
pub type Result<T> = std::result::Result<T, DistributionError>;

/// Errors raised by distributions, special functions and the root finder.
///
/// Undefined moments (e.g. the Cauchy mean) are reported as `NaN` values,
/// never through this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// A constructor argument lies outside its domain.
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Violated constraint
        reason: &'static str,
    },

    /// An interval whose lower end is not below its upper end.
    #[error("invalid bounds: lower {lower} must be below upper {upper}")]
    InvalidBounds {
        /// Lower end
        lower: f64,
        /// Upper end
        upper: f64,
    },

    /// Parallel inputs of different lengths.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Vector or component dimensionality mismatch.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        got: usize,
    },

    /// An empty value table or component list.
    #[error("input must not be empty")]
    EmptyInput,

    /// Weights or probabilities summing to zero.
    #[error("weights sum to zero")]
    ZeroWeightSum,

    /// Weights or probabilities whose sum is not finite.
    #[error("weight sum overflows: {sum}")]
    WeightSumOverflow {
        /// The non-finite sum
        sum: f64,
    },

    /// Covariance matrix that is not symmetric positive definite.
    #[error("matrix is not positive definite (pivot {index} = {pivot})")]
    NonPositiveDefinite {
        /// Row of the failing pivot
        index: usize,
        /// Value of the failing pivot
        pivot: f64,
    },

    /// Inverse-CDF query with a probability outside `[0, 1]`.
    #[error("probability {p} is outside [0, 1]")]
    ProbabilityOutOfRange {
        /// Offending probability
        p: f64,
    },

    /// Request for zero samples.
    #[error("number of samples must be positive, got {n}")]
    InvalidSampleCount {
        /// Requested count
        n: usize,
    },

    /// A series or continued fraction exhausted its iteration budget.
    #[error("{function} did not converge within {iterations} iterations")]
    MaxIterationsExceeded {
        /// Name of the special function
        function: &'static str,
        /// Iteration cap that was hit
        iterations: usize,
    },

    /// The function does not change sign over the bracket.
    #[error("no sign change in [{lower}, {upper}]: f(lower) = {f_lower}, f(upper) = {f_upper}")]
    NoBracketing {
        /// Lower end of the bracket
        lower: f64,
        /// Upper end of the bracket
        upper: f64,
        /// Function value at the lower end
        f_lower: f64,
        /// Function value at the upper end
        f_upper: f64,
    },

    /// The root finder exhausted its evaluation budget.
    #[error("root finder did not converge in [{lower}, {upper}] after {evaluations} evaluations")]
    NoConvergence {
        /// Lower end of the last bracket
        lower: f64,
        /// Upper end of the last bracket
        upper: f64,
        /// Evaluations performed
        evaluations: usize,
    },
}

impl DistributionError {
    /// Returns `true` for failures of a numerical method rather than of the caller's input.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(
            self,
            DistributionError::MaxIterationsExceeded { .. }
                | DistributionError::NoBracketing { .. }
                | DistributionError::NoConvergence { .. }
        )
    }
}

/// Validates that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "must be finite and > 0",
        })
    }
}

/// Validates that `value` is finite.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

/// Validates that `value` is a probability in `[0, 1]`.
pub(crate) fn require_probability(name: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "must lie in [0, 1]",
        })
    }
}

/// Checks an inverse-CDF argument.
pub(crate) fn check_probability(p: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(DistributionError::ProbabilityOutOfRange { p })
    }
}
