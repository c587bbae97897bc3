//! Finite mixtures of multivariate distributions.

use log::debug;
use rand::rngs::SmallRng;

use super::{normalize_weights, MultivariateDistribution, MultivariateNormalDistribution};
use crate::error::{DistributionError, Result};
use crate::random::{cumulative_select, entropy_rng, RandomSource};
use crate::stats::kahan_sum_iter;

/// Weighted mixture Σ wᵢ·fᵢ of multivariate components of equal dimension.
///
/// Weights are normalized by their sum at construction. Sampling first
/// selects a component by its weight, then draws from that component.
///
/// # Reseeding
/// [`reseed_random_generator`](MultivariateDistribution::reseed_random_generator)
/// with `seed` restarts the selector from `seed` and component `i` from
/// `base_seed + seed + i + 1` (wrapping), so components never share the
/// selector's stream. `base_seed` is 0 unless set with
/// [`with_base_seed`](Self::with_base_seed).
///
/// # Examples
/// ```
/// use u_distributions::distributions::{MixtureMultivariateDistribution, MultivariateDistribution};
/// let mixture = MixtureMultivariateDistribution::normals(
///     &[2.0, 2.0],
///     vec![vec![-1.0], vec![1.0]],
///     vec![vec![vec![1.0]], vec![vec![1.0]]],
/// ).unwrap();
/// assert_eq!(mixture.weights(), vec![0.5, 0.5]);
/// assert_eq!(mixture.dimension(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MixtureMultivariateDistribution<T, R = SmallRng> {
    components: Vec<(f64, T)>,
    base_seed: u64,
    rng: R,
}

impl<T: MultivariateDistribution> MixtureMultivariateDistribution<T> {
    /// Creates a mixture with an entropy-seeded selector.
    ///
    /// # Errors
    /// - [`DistributionError::EmptyInput`] if there are no components.
    /// - [`DistributionError::DimensionMismatch`] if the components differ
    ///   in dimension.
    /// - [`DistributionError::InvalidParameter`] for a negative, NaN or
    ///   infinite weight.
    /// - [`DistributionError::ZeroWeightSum`] /
    ///   [`DistributionError::WeightSumOverflow`] if the weights sum to zero
    ///   or overflow.
    pub fn new(components: Vec<(f64, T)>) -> Result<Self> {
        Self::with_rng(entropy_rng(), components)
    }
}

impl MixtureMultivariateDistribution<MultivariateNormalDistribution> {
    /// Mixture of multivariate normals, one per `(weight, means, covariance)`.
    ///
    /// # Errors
    /// [`DistributionError::LengthMismatch`] if the three lists differ in
    /// length; otherwise as [`new`](Self::new) and
    /// [`MultivariateNormalDistribution::new`].
    pub fn normals(
        weights: &[f64],
        means: Vec<Vec<f64>>,
        covariances: Vec<Vec<Vec<f64>>>,
    ) -> Result<Self> {
        if means.len() != weights.len() {
            return Err(DistributionError::LengthMismatch {
                expected: weights.len(),
                got: means.len(),
            });
        }
        if covariances.len() != weights.len() {
            return Err(DistributionError::LengthMismatch {
                expected: weights.len(),
                got: covariances.len(),
            });
        }
        let components = weights
            .iter()
            .zip(means.into_iter().zip(covariances))
            .map(|(&w, (m, c))| Ok((w, MultivariateNormalDistribution::new(m, c)?)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(components)
    }
}

impl<T: MultivariateDistribution, R: RandomSource> MixtureMultivariateDistribution<T, R> {
    /// Creates a mixture whose component selector draws from `rng`.
    pub fn with_rng(rng: R, components: Vec<(f64, T)>) -> Result<Self> {
        let first = components.first().ok_or(DistributionError::EmptyInput)?;
        let dimension = first.1.dimension();
        if let Some((_, c)) = components.iter().find(|(_, c)| c.dimension() != dimension) {
            return Err(DistributionError::DimensionMismatch {
                expected: dimension,
                got: c.dimension(),
            });
        }

        let raw: Vec<f64> = components.iter().map(|(w, _)| *w).collect();
        let weights = normalize_weights(&raw, "weight")?;
        let components = weights
            .into_iter()
            .zip(components)
            .map(|(w, (_, c))| (w, c))
            .collect();

        Ok(Self {
            components,
            base_seed: 0,
            rng,
        })
    }

    /// Sets the offset added to every component seed on reseeding.
    pub fn with_base_seed(mut self, base_seed: u64) -> Self {
        self.base_seed = base_seed;
        self
    }

    /// The `(normalized weight, component)` pairs, in order.
    pub fn components(&self) -> &[(f64, T)] {
        &self.components
    }

    pub fn weights(&self) -> Vec<f64> {
        self.components.iter().map(|(w, _)| *w).collect()
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }
}

impl<T: MultivariateDistribution, R: RandomSource> MultivariateDistribution
    for MixtureMultivariateDistribution<T, R>
{
    fn dimension(&self) -> usize {
        self.components[0].1.dimension()
    }

    fn density(&self, x: &[f64]) -> Result<f64> {
        let terms = self
            .components
            .iter()
            .map(|(w, c)| Ok(w * c.density(x)?))
            .collect::<Result<Vec<f64>>>()?;
        Ok(kahan_sum_iter(terms))
    }

    fn sample(&mut self) -> Result<Vec<f64>> {
        let u = self.rng.next_f64();
        let index = cumulative_select(self.components.iter().map(|(w, _)| *w), u)
            .ok_or(DistributionError::ZeroWeightSum)?;
        self.components[index].1.sample()
    }

    fn reseed_random_generator(&mut self, seed: u64) {
        self.rng.set_seed(seed);
        let offset = self.base_seed.wrapping_add(seed);
        for (i, (_, component)) in self.components.iter_mut().enumerate() {
            component.reseed_random_generator(offset.wrapping_add(i as u64 + 1));
        }
        debug!(
            "reseeded mixture selector with {seed} and {} components from base {offset}",
            self.components.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::random::create_rng;

    fn unit_normal(mean: f64) -> MultivariateNormalDistribution {
        MultivariateNormalDistribution::new(vec![mean], vec![vec![1.0]]).unwrap()
    }

    fn two_humps() -> MixtureMultivariateDistribution<MultivariateNormalDistribution> {
        MixtureMultivariateDistribution::with_rng(
            create_rng(7),
            vec![(1.0, unit_normal(-10.0)), (3.0, unit_normal(10.0))],
        )
        .unwrap()
    }

    #[test]
    fn test_weights_normalized() {
        let m = MixtureMultivariateDistribution::new(vec![(2.0, unit_normal(0.0)), (2.0, unit_normal(1.0))])
            .unwrap();
        assert_eq!(m.weights(), vec![0.5, 0.5]);
        assert_eq!(m.components().len(), 2);
        assert_eq!(m.base_seed(), 0);
    }

    #[test]
    fn test_density_is_weighted_sum() {
        let m = two_humps();
        let x = [0.3];
        let expected = 0.25 * unit_normal(-10.0).density(&x).unwrap()
            + 0.75 * unit_normal(10.0).density(&x).unwrap();
        assert!((m.density(&x).unwrap() - expected).abs() <= 1e-15 * expected);
        assert!(m.density(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            MixtureMultivariateDistribution::<MultivariateNormalDistribution>::new(vec![]).unwrap_err(),
            DistributionError::EmptyInput
        );
        let plane = MultivariateNormalDistribution::new(vec![0.0, 0.0], vec![vec![1.0, 0.0], vec![0.0, 1.0]])
            .unwrap();
        assert_eq!(
            MixtureMultivariateDistribution::new(vec![(1.0, unit_normal(0.0)), (1.0, plane)]).unwrap_err(),
            DistributionError::DimensionMismatch { expected: 1, got: 2 }
        );
        assert!(matches!(
            MixtureMultivariateDistribution::new(vec![(-1.0, unit_normal(0.0))]),
            Err(DistributionError::InvalidParameter { name: "weight", .. })
        ));
        assert_eq!(
            MixtureMultivariateDistribution::new(vec![(0.0, unit_normal(0.0))]).unwrap_err(),
            DistributionError::ZeroWeightSum
        );
    }

    #[test]
    fn test_normals_length_checks() {
        assert_eq!(
            MixtureMultivariateDistribution::normals(&[1.0, 1.0], vec![vec![0.0]], vec![vec![vec![1.0]]])
                .unwrap_err(),
            DistributionError::LengthMismatch { expected: 2, got: 1 }
        );
        assert_eq!(
            MixtureMultivariateDistribution::normals(
                &[1.0],
                vec![vec![0.0]],
                vec![vec![vec![1.0]], vec![vec![1.0]]],
            )
            .unwrap_err(),
            DistributionError::LengthMismatch { expected: 1, got: 2 }
        );
    }

    #[test]
    fn test_sampling_selects_by_weight() {
        let mut m = two_humps();
        let draws = m.sample_n(4_000).unwrap();
        let right = draws.iter().filter(|v| v[0] > 0.0).count() as f64 / 4_000.0;
        assert!((right - 0.75).abs() < 0.03, "right share {right}");
    }

    #[test]
    fn test_zero_weight_component_never_sampled() {
        let mut m = MixtureMultivariateDistribution::with_rng(
            create_rng(1),
            vec![(0.0, unit_normal(-100.0)), (1.0, unit_normal(100.0))],
        )
        .unwrap();
        assert!(m.sample_n(500).unwrap().iter().all(|v| v[0] > 0.0));
    }

    #[test]
    fn test_reseed_reproducible() {
        let mut m = two_humps().with_base_seed(1_000);
        m.reseed_random_generator(5);
        let first = m.sample_n(50).unwrap();
        m.reseed_random_generator(5);
        assert_eq!(first, m.sample_n(50).unwrap());
        m.reseed_random_generator(6);
        assert_ne!(first, m.sample_n(50).unwrap());
    }

    #[test]
    fn test_reseed_derives_component_seeds() {
        let mut m = two_humps().with_base_seed(100);
        m.reseed_random_generator(7);

        // Component i restarts from base_seed + seed + i + 1
        for (i, (mean, seed)) in [(-10.0, 108), (10.0, 109)].into_iter().enumerate() {
            let mut standalone = unit_normal(mean);
            standalone.reseed_random_generator(seed);
            assert_eq!(
                m.components[i].1.sample_n(10).unwrap(),
                standalone.sample_n(10).unwrap(),
                "component {i}"
            );
        }

        // The selector restarts from the seed itself
        assert_eq!(m.rng.next_f64(), create_rng(7).next_f64());
    }

    #[test]
    fn test_reseed_with_maximal_seeds_wraps() {
        let mut m = two_humps().with_base_seed(u64::MAX);
        m.reseed_random_generator(u64::MAX);
        assert_eq!(m.sample_n(3).unwrap().len(), 3);
    }
}
