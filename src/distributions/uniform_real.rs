//! Continuous uniform distribution.

use rand::rngs::SmallRng;

use super::{ContinuousDistribution, Support};
use crate::error::{check_probability, DistributionError, Result};
use crate::random::{entropy_rng, RandomSource};

/// Uniform distribution on `[lower, upper]`.
///
/// # Mathematical Definition
/// - PDF: 1/(b−a) on [a, b], 0 elsewhere
/// - CDF: (x−a)/(b−a), clamped to [0, 1]
/// - Mean: (a+b)/2
/// - Variance: (b−a)²/12
#[derive(Debug, Clone)]
pub struct UniformRealDistribution<R = SmallRng> {
    lower: f64,
    upper: f64,
    rng: R,
}

impl UniformRealDistribution {
    /// Creates a uniform distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// [`DistributionError::InvalidBounds`] unless both bounds are finite
    /// and `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), lower, upper)
    }
}

impl<R: RandomSource> UniformRealDistribution<R> {
    /// Creates a uniform distribution drawing from `rng`.
    pub fn with_rng(rng: R, lower: f64, upper: f64) -> Result<Self> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(DistributionError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper, rng })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }
}

impl<R: RandomSource> ContinuousDistribution for UniformRealDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        if x < self.lower || x > self.upper {
            0.0
        } else {
            1.0 / (self.upper - self.lower)
        }
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        Ok(if x <= self.lower {
            0.0
        } else if x >= self.upper {
            1.0
        } else {
            (x - self.lower) / (self.upper - self.lower)
        })
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        let p = check_probability(p)?;
        if p == 1.0 {
            return Ok(self.upper);
        }
        Ok(p * (self.upper - self.lower) + self.lower)
    }

    fn numerical_mean(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    fn numerical_variance(&self) -> f64 {
        let width = self.upper - self.lower;
        width * width / 12.0
    }

    fn support(&self) -> Support<f64> {
        Support::closed(self.lower, self.upper)
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }

    fn sample(&mut self) -> Result<f64> {
        let u = self.rng.next_f64();
        Ok(u * self.upper + (1.0 - u) * self.lower)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn uniform_real_samples_in_bounds(lower in -100.0_f64..100.0, width in 0.001_f64..100.0, seed in 0_u64..1000) {
            let upper = lower + width;
            let mut d = UniformRealDistribution::with_rng(create_rng(seed), lower, upper).unwrap();
            let slack = 1e-12 * (lower.abs() + upper.abs());
            for _ in 0..20 {
                let x = d.sample().unwrap();
                prop_assert!(x >= lower - slack && x <= upper + slack);
            }
        }
    }
}
