//! Laplace (double exponential) distribution.

use rand::rngs::SmallRng;

use super::{ContinuousDistribution, Support};
use crate::error::{check_probability, require_finite, require_positive, Result};
use crate::random::{entropy_rng, RandomSource};

/// Laplace distribution with location μ and scale β.
///
/// # Mathematical Definition
/// - PDF: f(x) = exp(−|x−μ|/β) / (2β)
/// - CDF: ½·e^{(x−μ)/β} for x ≤ μ, otherwise 1 − ½·e^{(μ−x)/β}
/// - Mean: μ
/// - Variance: 2β²
#[derive(Debug, Clone)]
pub struct LaplaceDistribution<R = SmallRng> {
    mu: f64,
    beta: f64,
    rng: R,
}

impl LaplaceDistribution {
    /// Creates a Laplace distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` if `mu` is not finite or `beta` is not finite and
    /// positive.
    pub fn new(mu: f64, beta: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), mu, beta)
    }
}

impl<R: RandomSource> LaplaceDistribution<R> {
    /// Creates a Laplace distribution drawing from `rng`.
    pub fn with_rng(rng: R, mu: f64, beta: f64) -> Result<Self> {
        Ok(Self {
            mu: require_finite("mu", mu)?,
            beta: require_positive("beta", beta)?,
            rng,
        })
    }

    pub fn location(&self) -> f64 {
        self.mu
    }

    pub fn scale(&self) -> f64 {
        self.beta
    }
}

impl<R: RandomSource> ContinuousDistribution for LaplaceDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        (-(x - self.mu).abs() / self.beta).exp() / (2.0 * self.beta)
    }

    fn log_density(&self, x: f64) -> f64 {
        -(x - self.mu).abs() / self.beta - (2.0 * self.beta).ln()
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        Ok(if x <= self.mu {
            0.5 * ((x - self.mu) / self.beta).exp()
        } else {
            1.0 - 0.5 * ((self.mu - x) / self.beta).exp()
        })
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        let p = check_probability(p)?;
        if p == 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let x = if p > 0.5 {
            -(2.0 - 2.0 * p).ln()
        } else {
            (2.0 * p).ln()
        };
        Ok(self.mu + self.beta * x)
    }

    fn numerical_mean(&self) -> f64 {
        self.mu
    }

    fn numerical_variance(&self) -> f64 {
        2.0 * self.beta * self.beta
    }

    fn support(&self) -> Support<f64> {
        Support::real_line()
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }
}
