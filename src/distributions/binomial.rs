//! Binomial distribution.

use rand::rngs::SmallRng;

use super::{DiscreteDistribution, Support};
use crate::error::{require_probability, DistributionError, Result};
use crate::random::{entropy_rng, RandomSource};
use crate::special::{ln_binomial_probability, regularized_beta};

/// Number of successes in `n` independent trials with success probability `p`.
///
/// # Mathematical Definition
/// - PMF: C(n, x)·pˣ·(1−p)ⁿ⁻ˣ, evaluated by saddle-point expansion
/// - CDF: F(x) = 1 − I_p(x+1, n−x) for 0 ≤ x < n
/// - Mean: np
/// - Variance: np(1−p)
///
/// # Examples
/// ```
/// use u_distributions::distributions::{BinomialDistribution, DiscreteDistribution};
/// let b = BinomialDistribution::new(10, 0.5).unwrap();
/// assert_eq!(b.numerical_mean(), 5.0);
/// assert_eq!(b.numerical_variance(), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct BinomialDistribution<R = SmallRng> {
    trials: i32,
    probability_of_success: f64,
    rng: R,
}

impl BinomialDistribution {
    /// Creates a binomial distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` if `trials < 0` or `probability_of_success ∉ [0, 1]`.
    pub fn new(trials: i32, probability_of_success: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), trials, probability_of_success)
    }
}

impl<R: RandomSource> BinomialDistribution<R> {
    /// Creates a binomial distribution drawing from `rng`.
    pub fn with_rng(rng: R, trials: i32, probability_of_success: f64) -> Result<Self> {
        if trials < 0 {
            return Err(DistributionError::InvalidParameter {
                name: "trials",
                value: f64::from(trials),
                reason: "must be >= 0",
            });
        }
        Ok(Self {
            trials,
            probability_of_success: require_probability(
                "probability_of_success",
                probability_of_success,
            )?,
            rng,
        })
    }

    pub fn number_of_trials(&self) -> i32 {
        self.trials
    }

    pub fn probability_of_success(&self) -> f64 {
        self.probability_of_success
    }
}

impl<R: RandomSource> DiscreteDistribution for BinomialDistribution<R> {
    fn probability(&self, x: i32) -> f64 {
        self.log_probability(x).exp()
    }

    fn log_probability(&self, x: i32) -> f64 {
        if self.trials == 0 {
            return if x == 0 { 0.0 } else { f64::NEG_INFINITY };
        }
        if x < 0 || x > self.trials {
            return f64::NEG_INFINITY;
        }
        let p = self.probability_of_success;
        ln_binomial_probability(f64::from(x), f64::from(self.trials), p, 1.0 - p)
    }

    fn cumulative_probability(&self, x: i32) -> Result<f64> {
        if x < 0 {
            return Ok(0.0);
        }
        if x >= self.trials {
            return Ok(1.0);
        }
        let tail = regularized_beta(
            self.probability_of_success,
            f64::from(x) + 1.0,
            f64::from(self.trials - x),
        )?;
        Ok(1.0 - tail)
    }

    fn numerical_mean(&self) -> f64 {
        f64::from(self.trials) * self.probability_of_success
    }

    fn numerical_variance(&self) -> f64 {
        let p = self.probability_of_success;
        f64::from(self.trials) * p * (1.0 - p)
    }

    fn support(&self) -> Support<i32> {
        let p = self.probability_of_success;
        let lower = if p < 1.0 { 0 } else { self.trials };
        let upper = if p > 0.0 { self.trials } else { 0 };
        Support::closed(lower, upper)
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }
}
