//! Pascal (negative binomial) distribution.

use rand::rngs::SmallRng;

use super::{DiscreteDistribution, Support};
use crate::error::{require_probability, DistributionError, Result};
use crate::random::{entropy_rng, RandomSource};
use crate::special::{ln_gamma, regularized_beta};

/// Number of failures before the `r`-th success in Bernoulli trials with
/// success probability `p`.
///
/// # Mathematical Definition
/// - PMF: C(x+r−1, r−1)·pʳ·(1−p)ˣ
/// - CDF: F(x) = I_p(r, x+1)
/// - Mean: r(1−p)/p
/// - Variance: r(1−p)/p²
#[derive(Debug, Clone)]
pub struct PascalDistribution<R = SmallRng> {
    successes: i32,
    probability_of_success: f64,
    /// ln Γ(r) for the mass
    ln_gamma_successes: f64,
    rng: R,
}

impl PascalDistribution {
    /// Creates a Pascal distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` if `successes < 1` or `probability_of_success ∉ [0, 1]`.
    pub fn new(successes: i32, probability_of_success: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), successes, probability_of_success)
    }
}

impl<R: RandomSource> PascalDistribution<R> {
    /// Creates a Pascal distribution drawing from `rng`.
    pub fn with_rng(rng: R, successes: i32, probability_of_success: f64) -> Result<Self> {
        if successes < 1 {
            return Err(DistributionError::InvalidParameter {
                name: "successes",
                value: f64::from(successes),
                reason: "must be >= 1",
            });
        }
        Ok(Self {
            successes,
            probability_of_success: require_probability(
                "probability_of_success",
                probability_of_success,
            )?,
            ln_gamma_successes: ln_gamma(f64::from(successes)),
            rng,
        })
    }

    pub fn number_of_successes(&self) -> i32 {
        self.successes
    }

    pub fn probability_of_success(&self) -> f64 {
        self.probability_of_success
    }
}

impl<R: RandomSource> DiscreteDistribution for PascalDistribution<R> {
    fn probability(&self, x: i32) -> f64 {
        if x < 0 {
            0.0
        } else {
            self.log_probability(x).exp()
        }
    }

    fn log_probability(&self, x: i32) -> f64 {
        if x < 0 {
            return f64::NEG_INFINITY;
        }
        let r = f64::from(self.successes);
        let k = f64::from(x);
        let p = self.probability_of_success;
        let failures = if x == 0 { 0.0 } else { k * (-p).ln_1p() };
        ln_gamma(k + r) - self.ln_gamma_successes - ln_gamma(k + 1.0) + r * p.ln() + failures
    }

    fn cumulative_probability(&self, x: i32) -> Result<f64> {
        if x < 0 {
            return Ok(0.0);
        }
        regularized_beta(
            self.probability_of_success,
            f64::from(self.successes),
            f64::from(x) + 1.0,
        )
    }

    fn numerical_mean(&self) -> f64 {
        let p = self.probability_of_success;
        f64::from(self.successes) * (1.0 - p) / p
    }

    fn numerical_variance(&self) -> f64 {
        let p = self.probability_of_success;
        f64::from(self.successes) * (1.0 - p) / (p * p)
    }

    fn support(&self) -> Support<i32> {
        Support::closed(0, i32::MAX)
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }
}
