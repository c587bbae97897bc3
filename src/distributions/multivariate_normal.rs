//! Multivariate normal distribution.

use std::f64::consts::PI;

use rand::rngs::SmallRng;

use super::normal::standard_normal_quantile;
use super::{check_dimension, MultivariateDistribution};
use crate::error::{DistributionError, Result};
use crate::random::{entropy_rng, RandomSource};

/// Relative tolerance when checking the covariance for symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Multivariate normal distribution N(μ, Σ) in d dimensions.
///
/// Σ is factored once as L·Lᵀ (Cholesky) at construction.
///
/// # Mathematical Definition
/// - PDF: (2π)^{−d/2} |Σ|^{−½} exp(−½ (x−μ)ᵀ Σ⁻¹ (x−μ))
/// - Sampling: μ + L·z with z standard normal
///
/// # Examples
/// ```
/// use u_distributions::distributions::{MultivariateDistribution, MultivariateNormalDistribution};
/// let d = MultivariateNormalDistribution::new(
///     vec![0.0, 0.0],
///     vec![vec![1.0, 0.0], vec![0.0, 1.0]],
/// ).unwrap();
/// let peak = d.density(&[0.0, 0.0]).unwrap();
/// assert!((peak - 1.0 / (2.0 * std::f64::consts::PI)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct MultivariateNormalDistribution<R = SmallRng> {
    means: Vec<f64>,
    covariance: Vec<Vec<f64>>,
    /// Lower-triangular factor, row-major.
    cholesky: Vec<Vec<f64>>,
    ln_determinant: f64,
    rng: R,
}

impl MultivariateNormalDistribution {
    /// Creates a multivariate normal with an entropy-seeded generator.
    ///
    /// # Errors
    /// - [`DistributionError::EmptyInput`] if `means` is empty.
    /// - [`DistributionError::DimensionMismatch`] if `covariance` is not a
    ///   square matrix of the same dimension.
    /// - [`DistributionError::InvalidParameter`] for a non-finite mean or a
    ///   non-symmetric covariance.
    /// - [`DistributionError::NonPositiveDefinite`] if the factorization
    ///   meets a non-positive pivot.
    pub fn new(means: Vec<f64>, covariance: Vec<Vec<f64>>) -> Result<Self> {
        Self::with_rng(entropy_rng(), means, covariance)
    }
}

impl<R: RandomSource> MultivariateNormalDistribution<R> {
    /// Creates a multivariate normal drawing from `rng`.
    pub fn with_rng(rng: R, means: Vec<f64>, covariance: Vec<Vec<f64>>) -> Result<Self> {
        let d = means.len();
        if d == 0 {
            return Err(DistributionError::EmptyInput);
        }
        if let Some(&value) = means.iter().find(|m| !m.is_finite()) {
            return Err(DistributionError::InvalidParameter {
                name: "means",
                value,
                reason: "must be finite",
            });
        }
        if covariance.len() != d {
            return Err(DistributionError::DimensionMismatch {
                expected: d,
                got: covariance.len(),
            });
        }
        if let Some(row) = covariance.iter().find(|row| row.len() != d) {
            return Err(DistributionError::DimensionMismatch {
                expected: d,
                got: row.len(),
            });
        }
        check_symmetric(&covariance)?;

        let cholesky = cholesky_lower(&covariance)?;
        let ln_determinant = 2.0 * (0..d).map(|i| cholesky[i][i].ln()).sum::<f64>();

        Ok(Self {
            means,
            covariance,
            cholesky,
            ln_determinant,
            rng,
        })
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn covariance(&self) -> &[Vec<f64>] {
        &self.covariance
    }

    /// Marginal standard deviations, √Σᵢᵢ.
    pub fn standard_deviations(&self) -> Vec<f64> {
        (0..self.means.len())
            .map(|i| self.covariance[i][i].sqrt())
            .collect()
    }

    /// ln |Σ|.
    pub fn ln_determinant(&self) -> f64 {
        self.ln_determinant
    }

    /// Natural log of the density at `x`.
    ///
    /// # Errors
    /// [`DistributionError::DimensionMismatch`] if `x` has the wrong length.
    pub fn log_density(&self, x: &[f64]) -> Result<f64> {
        let d = self.means.len();
        check_dimension(d, x)?;

        // Solve L·y = x − μ; then (x−μ)ᵀΣ⁻¹(x−μ) = |y|²
        let mut y = vec![0.0; d];
        for i in 0..d {
            let partial: f64 = (0..i).map(|j| self.cholesky[i][j] * y[j]).sum();
            y[i] = (x[i] - self.means[i] - partial) / self.cholesky[i][i];
        }
        let quadratic: f64 = y.iter().map(|v| v * v).sum();

        Ok(-0.5 * (d as f64 * (2.0 * PI).ln() + self.ln_determinant + quadratic))
    }

    /// One standard normal variate by inversion; a zero draw is redrawn.
    fn standard_normal(&mut self) -> f64 {
        loop {
            let u = self.rng.next_f64();
            if u > 0.0 {
                return standard_normal_quantile(u);
            }
        }
    }
}

/// Rejects a matrix whose mirrored entries differ beyond a relative
/// tolerance.
fn check_symmetric(matrix: &[Vec<f64>]) -> Result<()> {
    for i in 0..matrix.len() {
        for j in 0..i {
            let (a, b) = (matrix[i][j], matrix[j][i]);
            let scale = a.abs().max(b.abs()).max(1.0);
            if !((a - b).abs() <= SYMMETRY_TOLERANCE * scale) {
                return Err(DistributionError::InvalidParameter {
                    name: "covariance",
                    value: a - b,
                    reason: "must be symmetric",
                });
            }
        }
    }
    Ok(())
}

/// Cholesky–Banachiewicz factorization A = L·Lᵀ.
///
/// # Errors
/// [`DistributionError::NonPositiveDefinite`] with the first row whose
/// pivot is not strictly positive.
fn cholesky_lower(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let n = matrix.len();
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let partial: f64 = (0..j).map(|k| l[i][k] * l[j][k]).sum();
            if i == j {
                let pivot = matrix[i][i] - partial;
                if !(pivot > 0.0) {
                    return Err(DistributionError::NonPositiveDefinite { index: i, pivot });
                }
                l[i][i] = pivot.sqrt();
            } else {
                l[i][j] = (matrix[i][j] - partial) / l[j][j];
            }
        }
    }
    Ok(l)
}

impl<R: RandomSource> MultivariateDistribution for MultivariateNormalDistribution<R> {
    fn dimension(&self) -> usize {
        self.means.len()
    }

    fn density(&self, x: &[f64]) -> Result<f64> {
        Ok(self.log_density(x)?.exp())
    }

    fn sample(&mut self) -> Result<Vec<f64>> {
        let d = self.means.len();
        let z: Vec<f64> = (0..d).map(|_| self.standard_normal()).collect();
        Ok((0..d)
            .map(|i| self.means[i] + (0..=i).map(|j| self.cholesky[i][j] * z[j]).sum::<f64>())
            .collect())
    }

    fn reseed_random_generator(&mut self, seed: u64) {
        self.rng.set_seed(seed);
    }
}
