//! Discrete uniform distribution.

use rand::rngs::SmallRng;

use super::{DiscreteDistribution, Support};
use crate::error::{DistributionError, Result};
use crate::random::{entropy_rng, RandomSource};

/// Uniform distribution over the integers `lower..=upper`.
///
/// # Mathematical Definition
/// With n = upper − lower + 1:
/// - PMF: 1/n
/// - CDF: (x − lower + 1)/n
/// - Mean: (lower + upper)/2
/// - Variance: (n² − 1)/12
#[derive(Debug, Clone)]
pub struct UniformIntegerDistribution<R = SmallRng> {
    lower: i32,
    upper: i32,
    rng: R,
}

impl UniformIntegerDistribution {
    /// Creates a discrete uniform distribution with an entropy-seeded
    /// generator.
    ///
    /// # Errors
    /// [`DistributionError::InvalidBounds`] if `lower > upper`.
    pub fn new(lower: i32, upper: i32) -> Result<Self> {
        Self::with_rng(entropy_rng(), lower, upper)
    }
}

impl<R: RandomSource> UniformIntegerDistribution<R> {
    /// Creates a discrete uniform distribution drawing from `rng`.
    pub fn with_rng(rng: R, lower: i32, upper: i32) -> Result<Self> {
        if lower > upper {
            return Err(DistributionError::InvalidBounds {
                lower: f64::from(lower),
                upper: f64::from(upper),
            });
        }
        Ok(Self { lower, upper, rng })
    }

    pub fn lower(&self) -> i32 {
        self.lower
    }

    pub fn upper(&self) -> i32 {
        self.upper
    }

    /// Number of values in the support, computed without overflow.
    fn count(&self) -> i64 {
        i64::from(self.upper) - i64::from(self.lower) + 1
    }
}

impl<R: RandomSource> DiscreteDistribution for UniformIntegerDistribution<R> {
    fn probability(&self, x: i32) -> f64 {
        if x < self.lower || x > self.upper {
            0.0
        } else {
            1.0 / self.count() as f64
        }
    }

    fn cumulative_probability(&self, x: i32) -> Result<f64> {
        Ok(if x < self.lower {
            0.0
        } else if x >= self.upper {
            1.0
        } else {
            (i64::from(x) - i64::from(self.lower) + 1) as f64 / self.count() as f64
        })
    }

    fn numerical_mean(&self) -> f64 {
        0.5 * (f64::from(self.lower) + f64::from(self.upper))
    }

    fn numerical_variance(&self) -> f64 {
        let n = self.count() as f64;
        (n * n - 1.0) / 12.0
    }

    fn support(&self) -> Support<i32> {
        Support::closed(self.lower, self.upper)
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }

    fn sample(&mut self) -> Result<i32> {
        let offset = self.rng.next_below(self.count() as u64) as i64;
        // lower + offset ≤ upper, so the narrowing is lossless
        Ok((i64::from(self.lower) + offset) as i32)
    }
}
