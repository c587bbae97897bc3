//! Lévy distribution.

use std::f64::consts::PI;

use rand::rngs::SmallRng;

use super::{ContinuousDistribution, Support};
use crate::error::{check_probability, require_finite, require_positive, Result};
use crate::random::{entropy_rng, RandomSource};
use crate::special::{erfc, erfc_inv};

/// Lévy distribution with location μ and scale c, supported on (μ, ∞).
///
/// # Mathematical Definition
/// - PDF: f(x) = √(c/2π) · e^{−c/(2(x−μ))} / (x−μ)^{3/2}
/// - CDF: F(x) = erfc(√(c / (2(x−μ))))
/// - Quantile: μ + c / (2·erfc⁻¹(p)²)
/// - Mean and variance: +∞
///
/// Density and CDF are 0 at or below μ.
#[derive(Debug, Clone)]
pub struct LevyDistribution<R = SmallRng> {
    mu: f64,
    c: f64,
    half_c: f64,
    rng: R,
}

impl LevyDistribution {
    /// Creates a Lévy distribution with an entropy-seeded generator.
    ///
    /// # Errors
    /// Returns `Err` if `mu` is not finite or `c` is not finite and positive.
    pub fn new(mu: f64, c: f64) -> Result<Self> {
        Self::with_rng(entropy_rng(), mu, c)
    }
}

impl<R: RandomSource> LevyDistribution<R> {
    /// Creates a Lévy distribution drawing from `rng`.
    pub fn with_rng(rng: R, mu: f64, c: f64) -> Result<Self> {
        let mu = require_finite("mu", mu)?;
        let c = require_positive("c", c)?;
        Ok(Self {
            mu,
            c,
            half_c: 0.5 * c,
            rng,
        })
    }

    pub fn location(&self) -> f64 {
        self.mu
    }

    pub fn scale(&self) -> f64 {
        self.c
    }
}

impl<R: RandomSource> ContinuousDistribution for LevyDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        if x <= self.mu {
            return 0.0;
        }
        let delta = x - self.mu;
        let f = self.half_c / delta;
        (f / PI).sqrt() * (-f).exp() / delta
    }

    fn log_density(&self, x: f64) -> f64 {
        if x <= self.mu {
            return f64::NEG_INFINITY;
        }
        let delta = x - self.mu;
        let f = self.half_c / delta;
        0.5 * (f / PI).ln() - f - delta.ln()
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        if x <= self.mu {
            return Ok(0.0);
        }
        Ok(erfc((self.half_c / (x - self.mu)).sqrt()))
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        let p = check_probability(p)?;
        if p == 0.0 {
            return Ok(self.mu);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let t = erfc_inv(p);
        Ok(self.mu + self.half_c / (t * t))
    }

    fn numerical_mean(&self) -> f64 {
        f64::INFINITY
    }

    fn numerical_variance(&self) -> f64 {
        f64::INFINITY
    }

    fn support(&self) -> Support<f64> {
        Support::new(self.mu, f64::INFINITY, false, false)
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
        fn levy_round_trip(mu in -5.0_f64..5.0, c in 0.1_f64..5.0, p in 0.01_f64..0.99) {
            let d = LevyDistribution::new(mu, c).unwrap();
            let x = d.inverse_cumulative_probability(p).unwrap();
            prop_assert!(x > mu);
            prop_assert!((d.cumulative_probability(x).unwrap() - p).abs() < 1e-10);
        }
    }
}
