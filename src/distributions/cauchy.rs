//! Cauchy distribution.

use std::f64::consts::PI;

use rand::rngs::SmallRng;

use super::{ContinuousDistribution, Support};
use crate::error::{check_probability, require_finite, require_positive, Result};
use crate::random::{entropy_rng, RandomSource};

/// Cauchy (Lorentz) distribution with a median and a scale.
///
/// # Mathematical Definition
/// - PDF: f(x) = 1 / (πγ·(1 + ((x−x₀)/γ)²))
/// - CDF: F(x) = ½ + atan((x−x₀)/γ)/π
/// - Quantile: x₀ + γ·tan(π(p − ½))
/// - Mean and variance: undefined (`NaN`)
#[derive(Debug, Clone)]
pub struct CauchyDistribution<R = SmallRng> {
    median: f64,
    scale: f64,
    rng: R,
}

impl CauchyDistribution {
    /// Creates a Cauchy distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` if `median` is not finite or `scale` is not finite and
    /// positive.
    pub fn new(median: f64, scale: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), median, scale)
    }
}

impl<R: RandomSource> CauchyDistribution<R> {
    /// Creates a Cauchy distribution drawing from `rng`.
    pub fn with_rng(rng: R, median: f64, scale: f64) -> Result<Self> {
        Ok(Self {
            median: require_finite("median", median)?,
            scale: require_positive("scale", scale)?,
            rng,
        })
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl<R: RandomSource> ContinuousDistribution for CauchyDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        let dev = x - self.median;
        self.scale / (PI * (dev * dev + self.scale * self.scale))
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        Ok(0.5 + ((x - self.median) / self.scale).atan() / PI)
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        let p = check_probability(p)?;
        Ok(if p == 0.0 {
            f64::NEG_INFINITY
        } else if p == 1.0 {
            f64::INFINITY
        } else {
            self.median + self.scale * (PI * (p - 0.5)).tan()
        })
    }

    fn numerical_mean(&self) -> f64 {
        f64::NAN
    }

    fn numerical_variance(&self) -> f64 {
        f64::NAN
    }

    fn support(&self) -> Support<f64> {
        Support::real_line()
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn cauchy_cdf_symmetric(median in -10.0_f64..10.0, scale in 0.1_f64..10.0, d in 0.0_f64..50.0) {
            let c = CauchyDistribution::new(median, scale).unwrap();
            let lo = c.cumulative_probability(median - d).unwrap();
            let hi = c.cumulative_probability(median + d).unwrap();
            prop_assert!((lo + hi - 1.0).abs() < 1e-14);
        }

        #[test]
        fn cauchy_round_trip(p in 0.001_f64..0.999) {
            let c = CauchyDistribution::new(0.0, 1.0).unwrap();
            let x = c.inverse_cumulative_probability(p).unwrap();
            prop_assert!((c.cumulative_probability(x).unwrap() - p).abs() < 1e-12);
        }
    }
}
