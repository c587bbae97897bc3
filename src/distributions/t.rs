//! Student's t-distribution.

use std::f64::consts::PI;

use rand::rngs::SmallRng;

use super::{ContinuousDistribution, Support, DEFAULT_INVERSE_ABSOLUTE_ACCURACY};
use crate::error::{require_positive, Result};
use crate::random::{entropy_rng, RandomSource};
use crate::special::{ln_gamma, regularized_beta};

/// Student's t-distribution with ν degrees of freedom.
///
/// # Mathematical Definition
/// - PDF: f(x) = Γ((ν+1)/2) / (√(νπ)·Γ(ν/2)) · (1 + x²/ν)^{−(ν+1)/2}
/// - CDF: with t = I_{ν/(ν+x²)}(ν/2, ½), F(x) = t/2 for x < 0 and
///   1 − t/2 otherwise
/// - Mean: 0 for ν > 1, otherwise undefined (`NaN`)
/// - Variance: ν/(ν−2) for ν > 2, `+∞` for 1 < ν ≤ 2, otherwise `NaN`
#[derive(Debug, Clone)]
pub struct TDistribution<R = SmallRng> {
    degrees_of_freedom: f64,
    log_normalization: f64,
    inverse_accuracy: f64,
    rng: R,
}

impl TDistribution {
    /// Creates a t-distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` unless `degrees_of_freedom` is finite and positive.
    pub fn new(degrees_of_freedom: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), degrees_of_freedom)
    }
}

impl<R: RandomSource> TDistribution<R> {
    /// Creates a t-distribution drawing from `rng`.
    pub fn with_rng(rng: R, degrees_of_freedom: f64) -> Result<Self> {
        let n = require_positive("degrees_of_freedom", degrees_of_freedom)?;
        Ok(Self {
            degrees_of_freedom: n,
            log_normalization: ln_gamma((n + 1.0) / 2.0) - 0.5 * (n * PI).ln() - ln_gamma(n / 2.0),
            inverse_accuracy: DEFAULT_INVERSE_ABSOLUTE_ACCURACY,
            rng,
        })
    }

    /// Sets the absolute accuracy of the numerical inverse CDF.
    ///
    /// # Errors
    /// Returns `Err` unless `accuracy` is finite and positive.
    pub fn with_inverse_accuracy(mut self, accuracy: f64) -> Result<Self> {
        self.inverse_accuracy = require_positive("inverse_accuracy", accuracy)?;
        Ok(self)
    }

    pub fn degrees_of_freedom(&self) -> f64 {
        self.degrees_of_freedom
    }
}

impl<R: RandomSource> ContinuousDistribution for TDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        self.log_density(x).exp()
    }

    fn log_density(&self, x: f64) -> f64 {
        let n = self.degrees_of_freedom;
        self.log_normalization - (n + 1.0) / 2.0 * (x * x / n).ln_1p()
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        if x == 0.0 {
            return Ok(0.5);
        }
        let n = self.degrees_of_freedom;
        let t = regularized_beta(n / (n + x * x), 0.5 * n, 0.5)?;
        Ok(if x < 0.0 { 0.5 * t } else { 1.0 - 0.5 * t })
    }

    fn solver_absolute_accuracy(&self) -> f64 {
        self.inverse_accuracy
    }

    fn numerical_mean(&self) -> f64 {
        if self.degrees_of_freedom > 1.0 {
            0.0
        } else {
            f64::NAN
        }
    }

    fn numerical_variance(&self) -> f64 {
        let n = self.degrees_of_freedom;
        if n > 2.0 {
            n / (n - 2.0)
        } else if n > 1.0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }

    fn support(&self) -> Support<f64> {
        Support::real_line()
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }
}
