//! Probability distributions.
//!
//! Parametric distributions sharing one query, inversion and sampling
//! contract. Each family is a trait with default bodies; a concrete type
//! supplies its closed-form density and CDF and overrides the inverse or
//! the sampler only when a closed form exists.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Mean | Variance |
//! |---|---|---|---|
//! | [`BinomialDistribution`] | n, p | np | np(1−p) |
//! | [`CauchyDistribution`] | median, scale | undefined | undefined |
//! | [`ChiSquaredDistribution`] | k | k | 2k |
//! | [`ConstantRealDistribution`] | v | v | 0 |
//! | [`EnumeratedIntegerDistribution`] | values, probabilities | Σ p·v | Σ p·(v−μ)² |
//! | [`EnumeratedRealDistribution`] | values, probabilities | Σ p·v | Σ p·(v−μ)² |
//! | [`GammaDistribution`] | k, θ | kθ | kθ² |
//! | [`GeometricDistribution`] | p | (1−p)/p | (1−p)/p² |
//! | [`GumbelDistribution`] | μ, β | μ + γβ | π²β²/6 |
//! | [`LaplaceDistribution`] | μ, β | μ | 2β² |
//! | [`LevyDistribution`] | μ, c | ∞ | ∞ |
//! | [`LogisticDistribution`] | μ, s | μ | π²s²/3 |
//! | [`NakagamiDistribution`] | m, Ω | Γ(m+½)/Γ(m)·√(Ω/m) | Ω − mean² |
//! | [`NormalDistribution`] | μ, σ | μ | σ² |
//! | [`PascalDistribution`] | r, p | r(1−p)/p | r(1−p)/p² |
//! | [`TDistribution`] | ν | 0 (ν > 1) | ν/(ν−2) (ν > 2) |
//! | [`UniformIntegerDistribution`] | a, b | (a+b)/2 | ((b−a+1)²−1)/12 |
//! | [`UniformRealDistribution`] | a, b | (a+b)/2 | (b−a)²/12 |
//!
//! Multivariate: [`MultivariateNormalDistribution`] and
//! [`MixtureMultivariateDistribution`]. Arbitrary value tables:
//! [`EnumeratedDistribution`].
//!
//! # Edge Policy
//!
//! Below the support the CDF is 0 and above it 1, whatever the inclusivity
//! of the bound. The inverse CDF maps 0 and 1 to the support bounds,
//! possibly infinite, without running the solver.
//!
//! # Random Sources
//!
//! Every distribution owns a [`RandomSource`], `SmallRng` unless built
//! through `with_rng`. Queries take `&self`; sampling and reseeding take
//! `&mut self`.

use crate::error::{check_probability, DistributionError, Result};
use crate::random::RandomSource;
use crate::solver::{RootFinder, SOLVER_DEFAULT_ABSOLUTE_ACCURACY};
use crate::stats::kahan_sum;

mod binomial;
mod cauchy;
mod chi_squared;
mod constant;
mod enumerated;
mod gamma;
mod geometric;
mod gumbel;
mod laplace;
mod levy;
mod logistic;
mod mixture;
mod multivariate_normal;
mod nakagami;
mod normal;
mod pascal;
mod t;
mod uniform_integer;
mod uniform_real;

pub use binomial::BinomialDistribution;
pub use cauchy::CauchyDistribution;
pub use chi_squared::ChiSquaredDistribution;
pub use constant::ConstantRealDistribution;
pub use enumerated::{EnumeratedDistribution, EnumeratedIntegerDistribution, EnumeratedRealDistribution};
pub use gamma::GammaDistribution;
pub use geometric::GeometricDistribution;
pub use gumbel::GumbelDistribution;
pub use laplace::LaplaceDistribution;
pub use levy::LevyDistribution;
pub use logistic::LogisticDistribution;
pub use mixture::MixtureMultivariateDistribution;
pub use multivariate_normal::MultivariateNormalDistribution;
pub use nakagami::NakagamiDistribution;
pub use normal::NormalDistribution;
pub use pascal::PascalDistribution;
pub use t::TDistribution;
pub use uniform_integer::UniformIntegerDistribution;
pub use uniform_real::UniformRealDistribution;

/// Absolute accuracy of the solver-based inverse CDFs.
pub const DEFAULT_INVERSE_ABSOLUTE_ACCURACY: f64 = 1e-9;

// ============================================================================
// Support
// ============================================================================

/// Bounds of the region where a distribution puts mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support<T> {
    /// Lower bound, possibly `-∞`.
    pub lower: T,
    /// Upper bound, possibly `+∞`.
    pub upper: T,
    /// Whether the lower bound itself can be drawn.
    pub lower_inclusive: bool,
    /// Whether the upper bound itself can be drawn.
    pub upper_inclusive: bool,
    /// Whether the support has no gaps.
    pub connected: bool,
}

impl<T> Support<T> {
    /// Connected support with the given bounds and inclusivity.
    pub fn new(lower: T, upper: T, lower_inclusive: bool, upper_inclusive: bool) -> Self {
        Self {
            lower,
            upper,
            lower_inclusive,
            upper_inclusive,
            connected: true,
        }
    }

    /// Connected support including both bounds.
    pub fn closed(lower: T, upper: T) -> Self {
        Self::new(lower, upper, true, true)
    }
}

impl Support<f64> {
    /// The whole real line, bounds excluded.
    pub fn real_line() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false, false)
    }
}

// ============================================================================
// Continuous Distributions
// ============================================================================

/// A real-valued distribution with a density.
pub trait ContinuousDistribution {
    /// Probability density at `x`; 0 outside the support.
    fn density(&self, x: f64) -> f64;

    /// Natural log of the density.
    fn log_density(&self, x: f64) -> f64 {
        self.density(x).ln()
    }

    /// P(X ≤ x).
    ///
    /// # Errors
    /// Propagates special-function convergence failures.
    fn cumulative_probability(&self, x: f64) -> Result<f64>;

    /// P(x0 < X ≤ x1).
    ///
    /// # Errors
    /// [`DistributionError::InvalidBounds`] if `x0 > x1`.
    fn probability_between(&self, x0: f64, x1: f64) -> Result<f64> {
        if x0 > x1 {
            return Err(DistributionError::InvalidBounds { lower: x0, upper: x1 });
        }
        Ok(self.cumulative_probability(x1)? - self.cumulative_probability(x0)?)
    }

    /// Smallest `x` with P(X ≤ x) ≥ p.
    ///
    /// Defaults to [`inverse_cumulative_probability_by_solver`].
    ///
    /// # Errors
    /// [`DistributionError::ProbabilityOutOfRange`] for `p ∉ [0, 1]`, or a
    /// solver failure.
    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        inverse_cumulative_probability_by_solver(self, p)
    }

    /// Absolute accuracy the default inverse asks of the root finder.
    fn solver_absolute_accuracy(&self) -> f64 {
        SOLVER_DEFAULT_ABSOLUTE_ACCURACY
    }

    /// Mean; `NaN` if undefined, `+∞` if it diverges.
    fn numerical_mean(&self) -> f64;

    /// Variance; `NaN` if undefined, `+∞` if it diverges.
    fn numerical_variance(&self) -> f64;

    fn support(&self) -> Support<f64>;

    fn support_lower_bound(&self) -> f64 {
        self.support().lower
    }

    fn support_upper_bound(&self) -> f64 {
        self.support().upper
    }

    fn is_support_lower_bound_inclusive(&self) -> bool {
        self.support().lower_inclusive
    }

    fn is_support_upper_bound_inclusive(&self) -> bool {
        self.support().upper_inclusive
    }

    fn is_support_connected(&self) -> bool {
        self.support().connected
    }

    /// The generator sampling draws from.
    fn random_source(&mut self) -> &mut dyn RandomSource;

    /// Draws one value; defaults to inverting a uniform draw.
    fn sample(&mut self) -> Result<f64> {
        let u = self.random_source().next_f64();
        self.inverse_cumulative_probability(u)
    }

    /// Draws `n` independent values.
    ///
    /// # Errors
    /// [`DistributionError::InvalidSampleCount`] if `n == 0`.
    fn sample_n(&mut self, n: usize) -> Result<Vec<f64>> {
        if n == 0 {
            return Err(DistributionError::InvalidSampleCount { n });
        }
        (0..n).map(|_| self.sample()).collect()
    }

    /// Restarts the random source from `seed`.
    fn reseed_random_generator(&mut self, seed: u64) {
        self.random_source().set_seed(seed);
    }
}

/// Inverts a continuous CDF numerically.
///
/// # Algorithm
/// 1. `p = 0` and `p = 1` map to the support bounds.
/// 2. An infinite bound is replaced by the one-sided Chebyshev bound
///    `μ − σ√((1−p)/p)` or `μ + σ√(p/(1−p))` when mean and variance are
///    finite; otherwise the root finder expands outward by doubling.
/// 3. `F(x) − p = 0` is solved to the distribution's
///    [`solver_absolute_accuracy`](ContinuousDistribution::solver_absolute_accuracy).
///
/// # Errors
/// [`DistributionError::ProbabilityOutOfRange`] for `p ∉ [0, 1]`; root
/// finder and CDF failures are propagated.
pub fn inverse_cumulative_probability_by_solver<D>(distribution: &D, p: f64) -> Result<f64>
where
    D: ContinuousDistribution + ?Sized,
{
    let p = check_probability(p)?;
    let mut lower = distribution.support_lower_bound();
    if p == 0.0 {
        return Ok(lower);
    }
    let mut upper = distribution.support_upper_bound();
    if p == 1.0 {
        return Ok(upper);
    }

    let mu = distribution.numerical_mean();
    let sigma = distribution.numerical_variance().sqrt();
    if mu.is_finite() && sigma.is_finite() {
        if lower == f64::NEG_INFINITY {
            lower = mu - sigma * ((1.0 - p) / p).sqrt();
        }
        if upper == f64::INFINITY {
            upper = mu + sigma * (p / (1.0 - p)).sqrt();
        }
    }

    let finder = RootFinder::new(distribution.solver_absolute_accuracy());
    let mut target = |x: f64| Ok(distribution.cumulative_probability(x)? - p);
    let (lo, hi) = finder.bracket(&mut target, lower, upper)?;
    finder.solve(target, lo, hi)
}

// ============================================================================
// Discrete Distributions
// ============================================================================

/// An integer-valued distribution with a probability mass function.
pub trait DiscreteDistribution {
    /// P(X = x).
    fn probability(&self, x: i32) -> f64;

    /// Natural log of the mass.
    fn log_probability(&self, x: i32) -> f64 {
        self.probability(x).ln()
    }

    /// P(X ≤ x).
    ///
    /// # Errors
    /// Propagates special-function convergence failures.
    fn cumulative_probability(&self, x: i32) -> Result<f64>;

    /// P(x0 < X ≤ x1).
    ///
    /// # Errors
    /// [`DistributionError::InvalidBounds`] if `x0 > x1`.
    fn probability_between(&self, x0: i32, x1: i32) -> Result<f64> {
        if x0 > x1 {
            return Err(DistributionError::InvalidBounds {
                lower: f64::from(x0),
                upper: f64::from(x1),
            });
        }
        Ok(self.cumulative_probability(x1)? - self.cumulative_probability(x0)?)
    }

    /// Smallest `x` with P(X ≤ x) ≥ p.
    ///
    /// Defaults to [`inverse_cumulative_probability_by_search`].
    fn inverse_cumulative_probability(&self, p: f64) -> Result<i32> {
        inverse_cumulative_probability_by_search(self, p)
    }

    fn numerical_mean(&self) -> f64;

    fn numerical_variance(&self) -> f64;

    fn support(&self) -> Support<i32>;

    fn support_lower_bound(&self) -> i32 {
        self.support().lower
    }

    fn support_upper_bound(&self) -> i32 {
        self.support().upper
    }

    fn is_support_lower_bound_inclusive(&self) -> bool {
        self.support().lower_inclusive
    }

    fn is_support_upper_bound_inclusive(&self) -> bool {
        self.support().upper_inclusive
    }

    fn is_support_connected(&self) -> bool {
        self.support().connected
    }

    /// The generator sampling draws from.
    fn random_source(&mut self) -> &mut dyn RandomSource;

    /// Draws one value; defaults to inverting a uniform draw.
    fn sample(&mut self) -> Result<i32> {
        let u = self.random_source().next_f64();
        self.inverse_cumulative_probability(u)
    }

    /// Draws `n` independent values.
    ///
    /// # Errors
    /// [`DistributionError::InvalidSampleCount`] if `n == 0`.
    fn sample_n(&mut self, n: usize) -> Result<Vec<i32>> {
        if n == 0 {
            return Err(DistributionError::InvalidSampleCount { n });
        }
        (0..n).map(|_| self.sample()).collect()
    }

    /// Restarts the random source from `seed`.
    fn reseed_random_generator(&mut self, seed: u64) {
        self.random_source().set_seed(seed);
    }
}

/// Inverts a discrete CDF by binary search over the support.
///
/// # Algorithm
/// The search keeps `F(lower) < p ≤ F(upper)`. It starts from the support
/// bounds, tightened by the one-sided Chebyshev bounds when mean and
/// standard deviation are finite and non-zero, and halves the interval
/// until the bounds are adjacent.
///
/// # Errors
/// [`DistributionError::ProbabilityOutOfRange`] for `p ∉ [0, 1]`; CDF
/// failures are propagated.
pub fn inverse_cumulative_probability_by_search<D>(distribution: &D, p: f64) -> Result<i32>
where
    D: DiscreteDistribution + ?Sized,
{
    let p = check_probability(p)?;
    let mut lower = distribution.support_lower_bound();
    if p == 0.0 {
        return Ok(lower);
    }
    if lower == i32::MIN {
        if distribution.cumulative_probability(lower)? >= p {
            return Ok(lower);
        }
    } else {
        // F(lower − 1) = 0 < p
        lower -= 1;
    }

    let mut upper = distribution.support_upper_bound();
    if p == 1.0 {
        return Ok(upper);
    }

    let mu = distribution.numerical_mean();
    let sigma = distribution.numerical_variance().sqrt();
    if mu.is_finite() && sigma.is_finite() && sigma != 0.0 {
        let k = ((1.0 - p) / p).sqrt();
        let tmp = mu - k * sigma;
        if tmp > f64::from(lower) {
            lower = (tmp.ceil() as i32) - 1;
        }
        let tmp = mu + sigma / k;
        if tmp < f64::from(upper) {
            upper = (tmp.ceil() as i32) - 1;
        }
    }

    while i64::from(lower) + 1 < i64::from(upper) {
        let mid = ((i64::from(lower) + i64::from(upper)) / 2) as i32;
        if distribution.cumulative_probability(mid)? >= p {
            upper = mid;
        } else {
            lower = mid;
        }
    }
    Ok(upper)
}

// ============================================================================
// Multivariate Distributions
// ============================================================================

/// A distribution over fixed-length real vectors.
pub trait MultivariateDistribution {
    /// Length of every drawn vector.
    fn dimension(&self) -> usize;

    /// Density at `x`.
    ///
    /// # Errors
    /// [`DistributionError::DimensionMismatch`] if `x.len()` differs from
    /// [`dimension`](MultivariateDistribution::dimension).
    fn density(&self, x: &[f64]) -> Result<f64>;

    /// Draws one vector.
    fn sample(&mut self) -> Result<Vec<f64>>;

    /// Draws `n` independent vectors.
    ///
    /// # Errors
    /// [`DistributionError::InvalidSampleCount`] if `n == 0`.
    fn sample_n(&mut self, n: usize) -> Result<Vec<Vec<f64>>> {
        if n == 0 {
            return Err(DistributionError::InvalidSampleCount { n });
        }
        (0..n).map(|_| self.sample()).collect()
    }

    /// Restarts every random source this distribution draws from.
    fn reseed_random_generator(&mut self, seed: u64);
}

/// Validates raw weights and divides each by their compensated sum.
///
/// Entries must be finite and non-negative; `name` labels the offending
/// entry in the error.
pub(crate) fn normalize_weights(weights: &[f64], name: &'static str) -> Result<Vec<f64>> {
    if let Some(&value) = weights.iter().find(|w| !(w.is_finite() && **w >= 0.0)) {
        return Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "must be finite and >= 0",
        });
    }
    let sum = kahan_sum(weights);
    if !sum.is_finite() {
        return Err(DistributionError::WeightSumOverflow { sum });
    }
    if sum == 0.0 {
        return Err(DistributionError::ZeroWeightSum);
    }
    Ok(weights.iter().map(|w| w / sum).collect())
}

pub(crate) fn check_dimension(expected: usize, x: &[f64]) -> Result<()> {
    if x.len() == expected {
        Ok(())
    } else {
        Err(DistributionError::DimensionMismatch {
            expected,
            got: x.len(),
        })
    }
}

// ============================================================================
// Shared Test Helpers
// ============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Checks that the CDF never decreases across `xs` (sorted ascending).
    pub fn assert_cdf_monotone<D: ContinuousDistribution>(d: &D, xs: &[f64]) {
        let mut previous = 0.0;
        for &x in xs {
            let c = d.cumulative_probability(x).unwrap();
            assert!((0.0..=1.0).contains(&c), "F({x}) = {c} outside [0, 1]");
            assert!(c >= previous - 1e-15, "CDF decreases at x = {x}: {c} < {previous}");
            previous = c;
        }
    }

    /// Checks `F(F⁻¹(p)) ≈ p` for each `p`.
    pub fn assert_inverse_round_trip<D: ContinuousDistribution>(d: &D, ps: &[f64], tolerance: f64) {
        for &p in ps {
            let x = d.inverse_cumulative_probability(p).unwrap();
            let back = d.cumulative_probability(x).unwrap();
            assert!(
                (back - p).abs() <= tolerance,
                "F(F⁻¹({p})) = {back} (x = {x}), tolerance {tolerance}"
            );
        }
    }

    /// Checks that the inverse maps 0 and 1 to the support bounds.
    pub fn assert_inverse_endpoints<D: ContinuousDistribution>(d: &D) {
        assert_eq!(d.inverse_cumulative_probability(0.0).unwrap(), d.support_lower_bound());
        assert_eq!(d.inverse_cumulative_probability(1.0).unwrap(), d.support_upper_bound());
        assert!(matches!(
            d.inverse_cumulative_probability(1.5),
            Err(DistributionError::ProbabilityOutOfRange { .. })
        ));
        assert!(d.inverse_cumulative_probability(f64::NAN).is_err());
    }

    /// Checks the discrete inverse is the smallest `x` with `F(x) ≥ p`.
    pub fn assert_discrete_inverse_consistent<D: DiscreteDistribution>(d: &D, ps: &[f64]) {
        for &p in ps {
            let x = d.inverse_cumulative_probability(p).unwrap();
            assert!(d.cumulative_probability(x).unwrap() >= p, "F({x}) < {p}");
            if x > d.support_lower_bound() {
                assert!(d.cumulative_probability(x - 1).unwrap() < p, "F({}) ≥ {p}", x - 1);
            }
        }
        assert_eq!(d.inverse_cumulative_probability(0.0).unwrap(), d.support_lower_bound());
        assert_eq!(d.inverse_cumulative_probability(1.0).unwrap(), d.support_upper_bound());
    }

    /// Checks the PMF sums to one over `[from, to]`.
    pub fn assert_pmf_sums_to_one<D: DiscreteDistribution>(d: &D, from: i32, to: i32, tolerance: f64) {
        let total: f64 = (from..=to).map(|x| d.probability(x)).sum();
        assert!((total - 1.0).abs() < tolerance, "PMF sums to {total}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    /// A distribution with no closed-form inverse, to exercise the defaults.
    struct Exponential {
        rate: f64,
        rng: rand::rngs::SmallRng,
    }

    impl ContinuousDistribution for Exponential {
        fn density(&self, x: f64) -> f64 {
            if x < 0.0 {
                0.0
            } else {
                self.rate * (-self.rate * x).exp()
            }
        }

        fn cumulative_probability(&self, x: f64) -> Result<f64> {
            Ok(if x <= 0.0 { 0.0 } else { -(-self.rate * x).exp_m1() })
        }

        fn solver_absolute_accuracy(&self) -> f64 {
            DEFAULT_INVERSE_ABSOLUTE_ACCURACY
        }

        fn numerical_mean(&self) -> f64 {
            1.0 / self.rate
        }

        fn numerical_variance(&self) -> f64 {
            1.0 / (self.rate * self.rate)
        }

        fn support(&self) -> Support<f64> {
            Support::new(0.0, f64::INFINITY, true, false)
        }

        fn random_source(&mut self) -> &mut dyn RandomSource {
            &mut self.rng
        }
    }

    /// Integer uniform on [-5, 5] using only the trait defaults.
    struct Dice {
        rng: rand::rngs::SmallRng,
    }

    impl DiscreteDistribution for Dice {
        fn probability(&self, x: i32) -> f64 {
            if (-5..=5).contains(&x) {
                1.0 / 11.0
            } else {
                0.0
            }
        }

        fn cumulative_probability(&self, x: i32) -> Result<f64> {
            Ok(((x.clamp(-6, 5) + 6) as f64) / 11.0)
        }

        fn numerical_mean(&self) -> f64 {
            0.0
        }

        fn numerical_variance(&self) -> f64 {
            10.0
        }

        fn support(&self) -> Support<i32> {
            Support::closed(-5, 5)
        }

        fn random_source(&mut self) -> &mut dyn RandomSource {
            &mut self.rng
        }
    }

    fn exponential(rate: f64) -> Exponential {
        Exponential {
            rate,
            rng: create_rng(42),
        }
    }

    // --- Support ---

    #[test]
    fn test_support_accessors() {
        let d = exponential(1.0);
        assert_eq!(d.support_lower_bound(), 0.0);
        assert_eq!(d.support_upper_bound(), f64::INFINITY);
        assert!(d.is_support_lower_bound_inclusive());
        assert!(!d.is_support_upper_bound_inclusive());
        assert!(d.is_support_connected());
        assert!(Support::real_line().connected);
    }

    // --- Default continuous inverse ---

    #[test]
    fn test_solver_inverse_matches_closed_form() {
        let d = exponential(2.0);
        for &p in &[1e-10_f64, 0.01, 0.3, 0.5, 0.9, 0.999999] {
            let x = d.inverse_cumulative_probability(p).unwrap();
            let exact = -(-p).ln_1p() / 2.0;
            assert!((x - exact).abs() < 1e-8, "p={p}: {x} vs {exact}");
        }
    }

    #[test]
    fn test_solver_inverse_endpoints() {
        testing::assert_inverse_endpoints(&exponential(1.0));
    }

    #[test]
    fn test_solver_inverse_without_moments() {
        // Infinite moments force the doubling bracket
        struct HeavyTail(Exponential);
        impl ContinuousDistribution for HeavyTail {
            fn density(&self, x: f64) -> f64 {
                self.0.density(x)
            }
            fn cumulative_probability(&self, x: f64) -> Result<f64> {
                self.0.cumulative_probability(x)
            }
            fn numerical_mean(&self) -> f64 {
                f64::INFINITY
            }
            fn numerical_variance(&self) -> f64 {
                f64::NAN
            }
            fn support(&self) -> Support<f64> {
                Support::real_line()
            }
            fn random_source(&mut self) -> &mut dyn RandomSource {
                self.0.random_source()
            }
        }
        let d = HeavyTail(exponential(0.001));
        let x = d.inverse_cumulative_probability(0.75).unwrap();
        assert!((d.cumulative_probability(x).unwrap() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_probability_between() {
        let d = exponential(1.0);
        let p = d.probability_between(1.0, 2.0).unwrap();
        assert!((p - ((-1.0_f64).exp() - (-2.0_f64).exp())).abs() < 1e-15);
        assert!(matches!(
            d.probability_between(2.0, 1.0),
            Err(DistributionError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_log_density_default() {
        let d = exponential(3.0);
        assert!((d.log_density(0.5) - (3.0_f64.ln() - 1.5)).abs() < 1e-14);
        assert_eq!(d.log_density(-1.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_default_sampling_reseed() {
        let mut d = exponential(1.0);
        assert_eq!(
            d.sample_n(0),
            Err(DistributionError::InvalidSampleCount { n: 0 })
        );
        d.reseed_random_generator(5);
        let first = d.sample_n(10).unwrap();
        d.reseed_random_generator(5);
        let again = d.sample_n(10).unwrap();
        assert_eq!(first, again);
        assert!(first.iter().all(|&x| x >= 0.0));
    }

    // --- Weight normalization ---

    #[test]
    fn test_normalize_weights() {
        assert_eq!(normalize_weights(&[2.0, 2.0], "weight").unwrap(), vec![0.5, 0.5]);
        assert_eq!(normalize_weights(&[0.0, 3.0], "weight").unwrap(), vec![0.0, 1.0]);
        assert_eq!(
            normalize_weights(&[0.0, 0.0], "weight"),
            Err(DistributionError::ZeroWeightSum)
        );
        assert!(matches!(
            normalize_weights(&[1.0, f64::NAN], "weight"),
            Err(DistributionError::InvalidParameter { name: "weight", .. })
        ));
        assert!(matches!(
            normalize_weights(&[1e308, 1e308], "weight"),
            Err(DistributionError::WeightSumOverflow { .. })
        ));
    }

    #[test]
    fn test_check_dimension() {
        assert!(check_dimension(2, &[1.0, 2.0]).is_ok());
        assert_eq!(
            check_dimension(3, &[1.0]),
            Err(DistributionError::DimensionMismatch { expected: 3, got: 1 })
        );
    }

    // --- Default discrete inverse ---

    #[test]
    fn test_search_inverse() {
        let d = Dice { rng: create_rng(1) };
        testing::assert_discrete_inverse_consistent(&d, &[0.01, 1.0 / 11.0, 0.2, 0.5, 0.99]);
        // F(-5) = 1/11 exactly
        assert_eq!(d.inverse_cumulative_probability(1.0 / 11.0).unwrap(), -5);
        assert_eq!(d.inverse_cumulative_probability(0.5).unwrap(), 0);
    }

    #[test]
    fn test_search_inverse_rejects_bad_probability() {
        let d = Dice { rng: create_rng(1) };
        assert_eq!(
            d.inverse_cumulative_probability(-0.5),
            Err(DistributionError::ProbabilityOutOfRange { p: -0.5 })
        );
    }

    #[test]
    fn test_discrete_default_sampling() {
        let mut d = Dice { rng: create_rng(9) };
        let draws = d.sample_n(2000).unwrap();
        assert!(draws.iter().all(|x| (-5..=5).contains(x)));
        for v in -5..=5 {
            assert!(draws.contains(&v), "value {v} never drawn");
        }
        assert!((d.probability_between(-1, 2).unwrap() - 3.0 / 11.0).abs() < 1e-15);
    }
}
