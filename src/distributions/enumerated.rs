//! Distributions over explicit value tables.
//!
//! [`EnumeratedDistribution`] is the generic table: values of any type with
//! a probability each, duplicates allowed. The integer and real variants
//! wrap it and add the CDF, moments and support of a numeric law.
//!
//! # Sampling
//! A uniform draw is matched against the running sum of the probabilities
//! in table order. Zero-probability entries are never drawn. If round-off
//! keeps the running sum below the draw, the last positive entry is drawn.

use std::collections::BTreeMap;

use log::debug;
use rand::rngs::SmallRng;

use super::{normalize_weights, ContinuousDistribution, DiscreteDistribution, Support};
use crate::error::{check_probability, DistributionError, Result};
use crate::random::{cumulative_select, entropy_rng, RandomSource};
use crate::stats::{kahan_sum_iter, weighted_moments};

// ============================================================================
// Generic table
// ============================================================================

/// A finite table of values with associated probabilities.
///
/// Probabilities are normalized by their sum at construction. Duplicate
/// values stay separate entries; [`probability`](Self::probability) sums
/// over them.
///
/// # Examples
/// ```
/// use u_distributions::distributions::EnumeratedDistribution;
/// use u_distributions::random::create_rng;
/// let mut d = EnumeratedDistribution::with_rng(
///     create_rng(1),
///     vec!["heads", "tails", "heads"],
///     &[1.0, 2.0, 1.0],
/// ).unwrap();
/// assert_eq!(d.probability(&"heads"), 0.5);
/// let side = d.sample().unwrap();
/// assert!(side == "heads" || side == "tails");
/// ```
#[derive(Debug, Clone)]
pub struct EnumeratedDistribution<T, R = SmallRng> {
    values: Vec<T>,
    probabilities: Vec<f64>,
    rng: R,
}

impl<T: Clone + PartialEq> EnumeratedDistribution<T> {
    /// Creates a table with an entropy-seeded generator.
    ///
    /// # Errors
    /// - [`DistributionError::LengthMismatch`] if the slices differ in length.
    /// - [`DistributionError::EmptyInput`] if there are no values.
    /// - [`DistributionError::InvalidParameter`] for a negative, NaN or
    ///   infinite probability.
    /// - [`DistributionError::ZeroWeightSum`] /
    ///   [`DistributionError::WeightSumOverflow`] if the probabilities sum
    ///   to zero or overflow.
    pub fn new(values: Vec<T>, probabilities: &[f64]) -> Result<Self> {
        Self::with_rng(entropy_rng(), values, probabilities)
    }
}

impl<T: Clone + PartialEq, R: RandomSource> EnumeratedDistribution<T, R> {
    /// Creates a table drawing from `rng`.
    pub fn with_rng(rng: R, values: Vec<T>, probabilities: &[f64]) -> Result<Self> {
        if values.len() != probabilities.len() {
            return Err(DistributionError::LengthMismatch {
                expected: values.len(),
                got: probabilities.len(),
            });
        }
        if values.is_empty() {
            return Err(DistributionError::EmptyInput);
        }
        let probabilities = normalize_weights(probabilities, "probability")?;
        Ok(Self {
            values,
            probabilities,
            rng,
        })
    }

    /// Total probability of every entry equal to `value`.
    pub fn probability(&self, value: &T) -> f64 {
        kahan_sum_iter(
            self.values
                .iter()
                .zip(&self.probabilities)
                .filter(|(v, _)| *v == value)
                .map(|(_, &p)| p),
        )
    }

    /// The table as `(value, normalized probability)` pairs, in order.
    pub fn pmf(&self) -> Vec<(T, f64)> {
        self.values
            .iter()
            .cloned()
            .zip(self.probabilities.iter().copied())
            .collect()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Draws one value by scanning the cumulative table.
    ///
    /// # Errors
    /// [`DistributionError::ZeroWeightSum`] if no entry has positive
    /// probability, which construction rules out.
    pub fn sample(&mut self) -> Result<T> {
        let u = self.rng.next_f64();
        cumulative_select(self.probabilities.iter().copied(), u)
            .map(|i| self.values[i].clone())
            .ok_or(DistributionError::ZeroWeightSum)
    }

    /// Draws `n` values.
    ///
    /// # Errors
    /// [`DistributionError::InvalidSampleCount`] if `n == 0`.
    pub fn sample_n(&mut self, n: usize) -> Result<Vec<T>> {
        if n == 0 {
            return Err(DistributionError::InvalidSampleCount { n });
        }
        (0..n).map(|_| self.sample()).collect()
    }

    /// Restarts the random source from `seed`.
    pub fn reseed_random_generator(&mut self, seed: u64) {
        self.rng.set_seed(seed);
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }

    /// Values whose probability is positive.
    fn positive_values(&self) -> impl Iterator<Item = &T> {
        self.values
            .iter()
            .zip(&self.probabilities)
            .filter(|(_, &p)| p > 0.0)
            .map(|(v, _)| v)
    }
}

/// Turns a count table into ascending values and relative frequencies.
fn frequencies(counts: BTreeMap<i32, usize>, total: usize) -> (Vec<i32>, Vec<f64>) {
    counts
        .into_iter()
        .map(|(v, c)| (v, c as f64 / total as f64))
        .unzip()
}

// ============================================================================
// Integer table
// ============================================================================

/// Discrete distribution over an explicit table of integers.
///
/// # Examples
/// ```
/// use u_distributions::distributions::{DiscreteDistribution, EnumeratedIntegerDistribution};
/// let d = EnumeratedIntegerDistribution::from_data(&[0, 1, 1, 2]).unwrap();
/// assert_eq!(d.probability(1), 0.5);
/// assert_eq!(d.numerical_mean(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct EnumeratedIntegerDistribution<R = SmallRng> {
    table: EnumeratedDistribution<i32, R>,
    lower: i32,
    upper: i32,
    mean: f64,
    variance: f64,
}

impl EnumeratedIntegerDistribution {
    /// Creates an integer table with an entropy-seeded generator.
    ///
    /// # Errors
    /// As [`EnumeratedDistribution::new`].
    pub fn new(values: &[i32], probabilities: &[f64]) -> Result<Self> {
        Self::with_rng(entropy_rng(), values, probabilities)
    }

    /// Builds the empirical distribution of `data`: each distinct value
    /// weighted by its relative frequency.
    ///
    /// # Errors
    /// [`DistributionError::EmptyInput`] if `data` is empty.
    pub fn from_data(data: &[i32]) -> Result<Self> {
        Self::from_data_with_rng(entropy_rng(), data)
    }
}

impl<R: RandomSource> EnumeratedIntegerDistribution<R> {
    /// Creates an integer table drawing from `rng`.
    pub fn with_rng(rng: R, values: &[i32], probabilities: &[f64]) -> Result<Self> {
        let table = EnumeratedDistribution::with_rng(rng, values.to_vec(), probabilities)?;
        Ok(Self::from_table(table))
    }

    /// [`from_data`](EnumeratedIntegerDistribution::from_data) drawing from `rng`.
    pub fn from_data_with_rng(rng: R, data: &[i32]) -> Result<Self> {
        if data.is_empty() {
            return Err(DistributionError::EmptyInput);
        }
        let mut counts = BTreeMap::new();
        for &x in data {
            *counts.entry(x).or_insert(0_usize) += 1;
        }
        debug!(
            "frequency table: {} distinct values from {} observations",
            counts.len(),
            data.len()
        );
        let (values, probabilities) = frequencies(counts, data.len());
        Self::with_rng(rng, &values, &probabilities)
    }

    fn from_table(table: EnumeratedDistribution<i32, R>) -> Self {
        let (lower, upper) = table
            .positive_values()
            .fold((i32::MAX, i32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let values: Vec<f64> = table.values.iter().map(|&v| f64::from(v)).collect();
        let (mean, variance) = weighted_moments(&values, &table.probabilities);
        Self {
            table,
            lower,
            upper,
            mean,
            variance,
        }
    }

    /// The underlying value table.
    pub fn table(&self) -> &EnumeratedDistribution<i32, R> {
        &self.table
    }

    pub fn pmf(&self) -> Vec<(i32, f64)> {
        self.table.pmf()
    }
}

impl<R: RandomSource> DiscreteDistribution for EnumeratedIntegerDistribution<R> {
    fn probability(&self, x: i32) -> f64 {
        self.table.probability(&x)
    }

    fn cumulative_probability(&self, x: i32) -> Result<f64> {
        if x < self.lower {
            return Ok(0.0);
        }
        if x >= self.upper {
            return Ok(1.0);
        }
        let values = self.table.values.iter();
        let below = values
            .zip(&self.table.probabilities)
            .filter(|(&v, _)| v <= x)
            .map(|(_, &p)| p);
        Ok(kahan_sum_iter(below).min(1.0))
    }

    fn numerical_mean(&self) -> f64 {
        self.mean
    }

    fn numerical_variance(&self) -> f64 {
        self.variance
    }

    fn support(&self) -> Support<i32> {
        Support::closed(self.lower, self.upper)
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        self.table.random_source()
    }

    fn sample(&mut self) -> Result<i32> {
        self.table.sample()
    }
}

// ============================================================================
// Real table
// ============================================================================

/// Distribution over an explicit table of real values.
///
/// The "density" is the point mass at `x`. The inverse CDF scans the
/// positive-probability entries in ascending value order and returns the
/// first value at which the running sum reaches `p`.
#[derive(Debug, Clone)]
pub struct EnumeratedRealDistribution<R = SmallRng> {
    table: EnumeratedDistribution<f64, R>,
    /// Positive-probability entries sorted by value.
    sorted: Vec<(f64, f64)>,
    mean: f64,
    variance: f64,
}

impl EnumeratedRealDistribution {
    /// Creates a real table with an entropy-seeded generator.
    ///
    /// # Errors
    /// As [`EnumeratedDistribution::new`], plus
    /// [`DistributionError::InvalidParameter`] for a non-finite value.
    pub fn new(values: &[f64], probabilities: &[f64]) -> Result<Self> {
        Self::with_rng(entropy_rng(), values, probabilities)
    }

    /// Builds the empirical distribution of `data`.
    ///
    /// # Errors
    /// [`DistributionError::EmptyInput`] if `data` is empty,
    /// [`DistributionError::InvalidParameter`] for a non-finite observation.
    pub fn from_data(data: &[f64]) -> Result<Self> {
        Self::from_data_with_rng(entropy_rng(), data)
    }
}

impl<R: RandomSource> EnumeratedRealDistribution<R> {
    /// Creates a real table drawing from `rng`.
    pub fn with_rng(rng: R, values: &[f64], probabilities: &[f64]) -> Result<Self> {
        if let Some(&value) = values.iter().find(|v| !v.is_finite()) {
            return Err(DistributionError::InvalidParameter {
                name: "value",
                value,
                reason: "must be finite",
            });
        }
        let table = EnumeratedDistribution::with_rng(rng, values.to_vec(), probabilities)?;

        let mut sorted: Vec<(f64, f64)> = table
            .values
            .iter()
            .copied()
            .zip(table.probabilities.iter().copied())
            .filter(|&(_, p)| p > 0.0)
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (mean, variance) = weighted_moments(&table.values, &table.probabilities);

        Ok(Self {
            table,
            sorted,
            mean,
            variance,
        })
    }

    /// [`from_data`](EnumeratedRealDistribution::from_data) drawing from `rng`.
    pub fn from_data_with_rng(rng: R, data: &[f64]) -> Result<Self> {
        if data.is_empty() {
            return Err(DistributionError::EmptyInput);
        }
        if let Some(&value) = data.iter().find(|v| !v.is_finite()) {
            return Err(DistributionError::InvalidParameter {
                name: "value",
                value,
                reason: "must be finite",
            });
        }
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut values: Vec<f64> = Vec::new();
        let mut counts: Vec<f64> = Vec::new();
        for x in sorted {
            match counts.last_mut() {
                Some(count) if values.last() == Some(&x) => *count += 1.0,
                _ => {
                    values.push(x);
                    counts.push(1.0);
                }
            }
        }
        debug!(
            "frequency table: {} distinct values from {} observations",
            values.len(),
            data.len()
        );
        Self::with_rng(rng, &values, &counts)
    }

    /// The underlying value table.
    pub fn table(&self) -> &EnumeratedDistribution<f64, R> {
        &self.table
    }

    pub fn pmf(&self) -> Vec<(f64, f64)> {
        self.table.pmf()
    }
}

impl<R: RandomSource> ContinuousDistribution for EnumeratedRealDistribution<R> {
    fn density(&self, x: f64) -> f64 {
        self.table.probability(&x)
    }

    fn cumulative_probability(&self, x: f64) -> Result<f64> {
        let support = self.support();
        if x < support.lower {
            return Ok(0.0);
        }
        if x >= support.upper {
            return Ok(1.0);
        }
        let below = self
            .sorted
            .iter()
            .take_while(|&&(v, _)| v <= x)
            .map(|&(_, p)| p);
        Ok(kahan_sum_iter(below).min(1.0))
    }

    fn inverse_cumulative_probability(&self, p: f64) -> Result<f64> {
        let p = check_probability(p)?;
        let mut cumulative = 0.0;
        let mut x = self.support_lower_bound();
        for &(value, probability) in &self.sorted {
            cumulative += probability;
            x = value;
            if cumulative >= p {
                break;
            }
        }
        Ok(x)
    }

    fn numerical_mean(&self) -> f64 {
        self.mean
    }

    fn numerical_variance(&self) -> f64 {
        self.variance
    }

    fn support(&self) -> Support<f64> {
        // Construction guarantees a positive entry
        let lower = self.sorted.first().map_or(f64::NAN, |&(v, _)| v);
        let upper = self.sorted.last().map_or(f64::NAN, |&(v, _)| v);
        Support::closed(lower, upper)
    }

    fn random_source(&mut self) -> &mut dyn RandomSource {
        self.table.random_source()
    }

    fn sample(&mut self) -> Result<f64> {
        self.table.sample()
    }
}
