//! Chi-squared distribution.

use rand::rngs::SmallRng;

use super::{ContinuousDistribution, GammaDistribution, Support};
use crate::error::{require_positive, Result};
use crate::random::{entropy_rng, RandomSource};

/// Chi-squared distribution with k degrees of freedom.
///
/// Evaluated as a gamma distribution with shape k/2 and scale 2, so
/// F(x) = P(k/2, x/2), mean k and variance 2k.
#[derive(Debug, Clone)]
pub struct ChiSquaredDistribution<R = SmallRng> {
    degrees_of_freedom: f64,
    gamma: GammaDistribution<R>,
}

impl ChiSquaredDistribution {
    /// Creates a chi-squared distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` unless `degrees_of_freedom` is finite and positive.
    pub fn new(degrees_of_freedom: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), degrees_of_freedom)
    }
}

impl<R: RandomSource> ChiSquaredDistribution<R> {
    /// Creates a chi-squared distribution drawing from `rng`.
    pub fn with_rng(rng: R, degrees_of_freedom: f64) -> Result<Self> {
        let degrees_of_freedom = require_positive("degrees_of_freedom", degrees_of_freedom)?;
        Ok(Self {
            degrees_of_freedom,
            gamma: GammaDistribution::with_rng(rng, degrees_of_freedom / 2.0, 2.0)?,
        })
    }

    /// Sets the absolute accuracy of the numerical inverse CDF.
    ///
    /// # Errors
    /// Returns `Err` unless `accuracy` is finite and positive.
    pub fn with_inverse_accuracy(self, accuracy: f64) -> Result<Self> {
        Ok(Self {
            degrees_of_freedom: self.degrees_of_freedom,
            gamma: self.gamma.with_inverse_accuracy(accuracy)?,
        })
    }

    pub fn degrees_of_freedom(&self) -> f64 {
        self.degrees_of_freedom
    }
}

impl<R: RandomSource> ContinuousDistribution for ChiSquaredDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        self.gamma.density(x)
    }

    fn log_density(&self, x: f64) -> f64 {
        self.gamma.log_density(x)
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        self.gamma.cumulative_probability(x)
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        self.gamma.inverse_cumulative_probability(p)
    }

    fn solver_absolute_accuracy(&self) -> f64 {
        self.gamma.solver_absolute_accuracy()
    }

    fn numerical_mean(&self) -> f64 {
        self.degrees_of_freedom
    }

    fn numerical_variance(&self) -> f64 {
        2.0 * self.degrees_of_freedom
    }

    fn support(&self) -> Support<f64> {
        self.gamma.support()
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        self.gamma.random_source()
    }
}
