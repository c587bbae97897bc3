//! Degenerate distribution with all mass on one value.

use rand::rngs::SmallRng;

use super::{ContinuousDistribution, Support};
use crate::error::{check_probability, require_finite, Result};
use crate::random::{entropy_rng, RandomSource};

/// Point mass at a single real value.
///
/// The density is reported as 1 at the value and 0 elsewhere; the CDF is a
/// unit step. Sampling always returns the value and never consumes the
/// random source.
#[derive(Debug, Clone)]
pub struct ConstantRealDistribution<R = SmallRng> {
    value: f64,
    rng: R,
}

impl ConstantRealDistribution {
    /// Creates a point mass at `value`.
    ///
    /// # Errors
    /// Returns `Err` if `value` is not finite.
    pub fn new(value: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), value)
    }
}

impl<R: RandomSource> ConstantRealDistribution<R> {
    pub fn with_rng(rng: R, value: f64) -> Result<Self> {
        Ok(Self {
            value: require_finite("value", value)?,
            rng,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl<R: RandomSource> ContinuousDistribution for ConstantRealDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        if x == self.value {
            1.0
        } else {
            0.0
        }
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        Ok(if x < self.value { 0.0 } else { 1.0 })
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        Ok(self.value)
    }

    fn numerical_mean(&self) -> f64 {
        self.value
    }

    fn numerical_variance(&self) -> f64 {
        0.0
    }

    fn support(&self) -> Support<f64> {
        Support::closed(self.value, self.value)
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }

    fn sample(&mut self) -> Result<f64> {
        Ok(self.value)
    }
}
