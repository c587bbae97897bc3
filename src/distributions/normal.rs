//! Normal (Gaussian) distribution.

use std::f64::consts::{PI, SQRT_2};

use rand::rngs::SmallRng;

use super::{ContinuousDistribution, Support};
use crate::error::{check_probability, require_finite, require_positive, Result};
use crate::random::{entropy_rng, RandomSource};
use crate::special::{erfc, erfc_inv};

/// Beyond this many standard deviations the CDF is reported as exactly 0 or 1.
const CDF_SATURATION_SIGMAS: f64 = 40.0;

/// Quantile of the standard normal, `√2·erf⁻¹(2p − 1)`.
///
/// Evaluated through `erfc⁻¹(2p)` so lower-tail probabilities keep their
/// relative accuracy.
pub(crate) fn standard_normal_quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Normal distribution with mean μ and standard deviation σ.
///
/// # Mathematical Definition
/// - PDF: f(x) = exp(−(x−μ)²/(2σ²)) / (σ√(2π))
/// - CDF: F(x) = ½·erfc(−(x−μ)/(σ√2))
/// - Quantile: μ + σ√2·erf⁻¹(2p − 1)
///
/// # Examples
/// ```
/// use u_distributions::distributions::{ContinuousDistribution, NormalDistribution};
/// let n = NormalDistribution::new(0.0, 1.0).unwrap();
/// assert!((n.cumulative_probability(1.96).unwrap() - 0.975).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct NormalDistribution<R = SmallRng> {
    mean: f64,
    standard_deviation: f64,
    log_normalization: f64,
    rng: R,
}

impl NormalDistribution {
    /// Creates a normal distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` if `mean` is not finite or `standard_deviation` is not
    /// finite and positive.
    pub fn new(mean: f64, standard_deviation: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), mean, standard_deviation)
    }
}

impl<R: RandomSource> NormalDistribution<R> {
    /// Creates a normal distribution drawing from `rng`.
    pub fn with_rng(rng: R, mean: f64, standard_deviation: f64) -> Result<Self> {
        let mean = require_finite("mean", mean)?;
        let standard_deviation = require_positive("standard_deviation", standard_deviation)?;
        Ok(Self {
            mean,
            standard_deviation,
            log_normalization: standard_deviation.ln() + 0.5 * (2.0 * PI).ln(),
            rng,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }
}

impl<R: RandomSource> ContinuousDistribution for NormalDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        self.log_density(x).exp()
    }

    fn log_density(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.standard_deviation;
        -0.5 * z * z - self.log_normalization
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        let dev = x - self.mean;
        if dev.abs() > CDF_SATURATION_SIGMAS * self.standard_deviation {
            return Ok(if dev < 0.0 { 0.0 } else { 1.0 });
        }
        Ok(0.5 * erfc(-dev / (self.standard_deviation * SQRT_2)))
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        let p = check_probability(p)?;
        Ok(if p == 0.0 {
            f64::NEG_INFINITY
        } else if p == 1.0 {
            f64::INFINITY
        } else {
            self.mean + self.standard_deviation * standard_normal_quantile(p)
        })
    }

    fn numerical_mean(&self) -> f64 {
        self.mean
    }

    fn numerical_variance(&self) -> f64 {
        self.standard_deviation * self.standard_deviation
    }

    fn support(&self) -> Support<f64> {
        Support::real_line()
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::testing;
    use crate::random::create_rng;
    use crate::stats::WelfordAccumulator;

    #[test]
    fn test_normal_standard_values() {
        let n = NormalDistribution::new(0.0, 1.0).unwrap();
        assert_eq!(n.cumulative_probability(0.0).unwrap(), 0.5);
        assert!((n.density(0.0) - 1.0 / (2.0 * PI).sqrt()).abs() < 1e-15);
        assert!((n.cumulative_probability(1.0).unwrap() - 0.841_344_746_068_542_9).abs() < 1e-14);
        assert!((n.cumulative_probability(-2.0).unwrap() - 0.022_750_131_948_179_2).abs() < 1e-14);
    }

    #[test]
    fn test_normal_saturation() {
        let n = NormalDistribution::new(2.0, 0.5).unwrap();
        assert_eq!(n.cumulative_probability(2.0 - 21.0).unwrap(), 0.0);
        assert_eq!(n.cumulative_probability(2.0 + 21.0).unwrap(), 1.0);
        assert_eq!(n.cumulative_probability(f64::INFINITY).unwrap(), 1.0);
    }

    #[test]
    fn test_normal_quantiles() {
        let n = NormalDistribution::new(0.0, 1.0).unwrap();
        assert!((n.inverse_cumulative_probability(0.975).unwrap() - 1.959_963_984_540_054).abs() < 1e-12);
        assert!((n.inverse_cumulative_probability(0.5).unwrap()).abs() < 1e-15);
        assert!((standard_normal_quantile(1e-10) + 6.361_340_902_404_056).abs() < 1e-9);
    }

    #[test]
    fn test_normal_inverse() {
        let n = NormalDistribution::new(-1.5, 3.0).unwrap();
        testing::assert_inverse_endpoints(&n);
        testing::assert_inverse_round_trip(&n, &[1e-9, 0.01, 0.2, 0.5, 0.8, 0.99, 0.999999], 1e-12);
    }

    #[test]
    fn test_normal_log_density() {
        let n = NormalDistribution::new(1.0, 2.0).unwrap();
        assert!((n.log_density(3.0) - n.density(3.0).ln()).abs() < 1e-14);
        // No underflow in log space
        assert!(n.log_density(1e3).is_finite());
    }

    #[test]
    fn test_normal_sampling_moments() {
        let mut n = NormalDistribution::with_rng(create_rng(42), 10.0, 2.0).unwrap();
        let acc = WelfordAccumulator::from_slice(&n.sample_n(100_000).unwrap());
        let mean = acc.mean().unwrap();
        let variance = acc.sample_variance().unwrap();
        assert!((mean - 10.0).abs() < 0.05, "sample mean {mean}");
        assert!((variance - 4.0).abs() < 0.1, "sample variance {variance}");
    }

    #[test]
    fn test_normal_invalid() {
        assert!(NormalDistribution::new(0.0, 0.0).is_err());
        assert!(NormalDistribution::new(f64::INFINITY, 1.0).is_err());
    }
}
