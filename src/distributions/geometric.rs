//! Geometric distribution.

use rand::rngs::SmallRng;

use super::{DiscreteDistribution, Support};
use crate::error::{check_probability, DistributionError, Result};
use crate::random::{entropy_rng, RandomSource};

/// Number of failures before the first success, success probability `p`.
///
/// # Mathematical Definition
/// - PMF: p·(1−p)ˣ
/// - CDF: 1 − (1−p)^{x+1}
/// - Quantile: max(0, ⌈ln(1−u)/ln(1−p) − 1⌉)
/// - Mean: (1−p)/p
/// - Variance: (1−p)/p²
#[derive(Debug, Clone)]
pub struct GeometricDistribution<R = SmallRng> {
    probability_of_success: f64,
    /// ln(1 − p)
    log1m_probability: f64,
    rng: R,
}

impl GeometricDistribution {
    /// Creates a geometric distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` unless `probability_of_success ∈ (0, 1]`.
    pub fn new(probability_of_success: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), probability_of_success)
    }
}

impl<R: RandomSource> GeometricDistribution<R> {
    /// Creates a geometric distribution drawing from `rng`.
    pub fn with_rng(rng: R, probability_of_success: f64) -> Result<Self> {
        if !(probability_of_success > 0.0 && probability_of_success <= 1.0) {
            return Err(DistributionError::InvalidParameter {
                name: "probability_of_success",
                value: probability_of_success,
                reason: "must lie in (0, 1]",
            });
        }
        Ok(Self {
            probability_of_success,
            log1m_probability: (-probability_of_success).ln_1p(),
            rng,
        })
    }

    pub fn probability_of_success(&self) -> f64 {
        self.probability_of_success
    }
}

impl<R: RandomSource> DiscreteDistribution for GeometricDistribution<R> {
    fn probability(&self, x: i32) -> f64 {
        match x {
            x if x < 0 => 0.0,
            0 => self.probability_of_success,
            x => (f64::from(x) * self.log1m_probability).exp() * self.probability_of_success,
        }
    }

    fn log_probability(&self, x: i32) -> f64 {
        match x {
            x if x < 0 => f64::NEG_INFINITY,
            0 => self.probability_of_success.ln(),
            x => f64::from(x) * self.log1m_probability + self.probability_of_success.ln(),
        }
    }

    fn cumulative_probability(&self, x: i32) -> Result<f64> {
        if x < 0 {
            return Ok(0.0);
        }
        Ok(-(self.log1m_probability * (f64::from(x) + 1.0)).exp_m1())
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<i32> {
        let p = check_probability(p)?;
        if p == 1.0 {
            return Ok(i32::MAX);
        }
        if p == 0.0 {
            return Ok(0);
        }
        let x = ((-p).ln_1p() / self.log1m_probability - 1.0).ceil();
        // Saturating cast
        let mut x = (x as i32).max(0);
        // The closed form may land one step off when p sits on a CDF value
        while x > 0 && self.cumulative_probability(x - 1)? >= p {
            x -= 1;
        }
        while x < i32::MAX && self.cumulative_probability(x)? < p {
            x += 1;
        }
        Ok(x)
    }

    fn numerical_mean(&self) -> f64 {
        (1.0 - self.probability_of_success) / self.probability_of_success
    }

    fn numerical_variance(&self) -> f64 {
        let p = self.probability_of_success;
        (1.0 - p) / (p * p)
    }

    fn support(&self) -> Support<i32> {
        Support::closed(0, i32::MAX)
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
    fn test_geometric_pmf_cdf() {
        let g = GeometricDistribution::new(0.4).unwrap();
        assert!((g.probability(0) - 0.4).abs() < 1e-15);
        assert!((g.probability(1) - 0.24).abs() < 1e-15);
        assert!((g.probability(2) - 0.144).abs() < 1e-15);
        assert_eq!(g.probability(-3), 0.0);
        assert!((g.cumulative_probability(2).unwrap() - 0.784).abs() < 1e-15);
        assert!((g.log_probability(3) - g.probability(3).ln()).abs() < 1e-14);
        testing::assert_pmf_sums_to_one(&g, 0, 200, 1e-12);
    }

    #[test]
    fn test_geometric_moments() {
        let g = GeometricDistribution::new(0.4).unwrap();
        assert!((g.numerical_mean() - 1.5).abs() < 1e-15);
        assert!((g.numerical_variance() - 3.75).abs() < 1e-14);
    }

    #[test]
    fn test_geometric_certain_success() {
        let g = GeometricDistribution::new(1.0).unwrap();
        assert_eq!(g.probability(0), 1.0);
        assert_eq!(g.probability(1), 0.0);
        assert_eq!(g.cumulative_probability(0).unwrap(), 1.0);
        assert_eq!(g.inverse_cumulative_probability(0.5).unwrap(), 0);
        assert_eq!(g.numerical_mean(), 0.0);
    }

    #[test]
    fn test_geometric_inverse() {
        let g = GeometricDistribution::new(0.4).unwrap();
        testing::assert_discrete_inverse_consistent(&g, &[1e-9, 0.35, 0.5, 0.77, 0.9, 0.999999]);
        assert_eq!(g.inverse_cumulative_probability(0.3).unwrap(), 0);
        assert_eq!(g.inverse_cumulative_probability(0.5).unwrap(), 1);
    }

    #[test]
    fn test_geometric_inverse_on_cdf_values() {
        let cases = [(0.999, 0.999_999_999), (0.01, 1.0 - 1e-15), (1e-6, 1.0 - 1e-15), (0.5, 0.75)];
        for &(q, p) in &cases {
            let g = GeometricDistribution::new(q).unwrap();
            let x = g.inverse_cumulative_probability(p).unwrap();
            assert!(g.cumulative_probability(x).unwrap() >= p, "q={q}: F({x}) < {p}");
            if x > 0 {
                assert!(g.cumulative_probability(x - 1).unwrap() < p, "q={q}: F({}) >= {p}", x - 1);
            }
        }
    }

    #[test]
    fn test_geometric_tiny_probability_saturates() {
        let g = GeometricDistribution::new(1e-12).unwrap();
        assert_eq!(g.inverse_cumulative_probability(1.0 - 1e-16).unwrap(), i32::MAX);
    }

    #[test]
    fn test_geometric_sampling() {
        let mut g = GeometricDistribution::with_rng(create_rng(2), 0.25).unwrap();
        let values: Vec<f64> = g.sample_n(20_000).unwrap().into_iter().map(f64::from).collect();
        let mean = WelfordAccumulator::from_slice(&values).mean().unwrap();
        assert!((mean - 3.0).abs() < 0.1, "sample mean {mean}");
    }

    #[test]
    fn test_geometric_invalid() {
        assert!(GeometricDistribution::new(0.0).is_err());
        assert!(GeometricDistribution::new(1.1).is_err());
        assert!(GeometricDistribution::new(f64::NAN).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::distributions::inverse_cumulative_probability_by_search;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn geometric_closed_form_matches_search(p in 0.01_f64..1.0, q in 0.001_f64..0.999) {
            let g = GeometricDistribution::new(p).unwrap();
            let closed = g.inverse_cumulative_probability(q).unwrap();
            let searched = inverse_cumulative_probability_by_search(&g, q).unwrap();
            prop_assert_eq!(closed, searched);
        }
    }
}
