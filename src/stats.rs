//! Numerically stable summation and moments.
//!
//! Used to normalize probability tables and mixture weights, to compute the
//! moments of enumerated distributions, and to summarize drawn samples.
//!
//! # Algorithms
//!
//! - **Sums**: Neumaier compensated summation for O(ε) error independent of n.
//! - **Streaming moments**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_distributions::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// This is an improved variant of Kahan summation that also handles the
/// case where the addend is larger in magnitude than the running sum.
///
/// # Algorithm
/// Maintains a running compensation variable `c`. At each step, the
/// branch ensures the smaller operand's low-order bits are captured.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *Zeitschrift für Angewandte
/// Mathematik und Mechanik* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    kahan_sum_iter(data.iter().copied())
}

/// [`kahan_sum`] over any iterator of values.
pub fn kahan_sum_iter(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Mean and variance of a discrete law given as parallel value/probability
/// slices whose probabilities sum to one.
///
/// Two passes: the variance is accumulated as `Σ p·(v − μ)²` rather than
/// `E[X²] − μ²`, which cancels badly for tables far from the origin.
///
/// # Examples
/// ```
/// use u_distributions::stats::weighted_moments;
/// let (m, v) = weighted_moments(&[0.0, 1.0, 2.0], &[0.25, 0.5, 0.25]);
/// assert!((m - 1.0).abs() < 1e-15);
/// assert!((v - 0.5).abs() < 1e-15);
/// ```
pub fn weighted_moments(values: &[f64], probabilities: &[f64]) -> (f64, f64) {
    let mean = kahan_sum_iter(values.iter().zip(probabilities).map(|(&v, &p)| v * p));
    let variance = kahan_sum_iter(
        values
            .iter()
            .zip(probabilities)
            .map(|(&v, &p)| p * (v - mean) * (v - mean)),
    );
    (mean, variance)
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming accumulator for the mean and variance of drawn samples.
///
/// # Examples
/// ```
/// use u_distributions::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an accumulator over every value of `data`.
    pub fn from_slice(data: &[f64]) -> Self {
        let mut acc = Self::new();
        for &x in data {
            acc.update(x);
        }
        acc
    }

    /// Feeds a new sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.mean_acc = value;
            return;
        }
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Returns the number of samples seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the running mean, or `None` if no samples have been added.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean_acc)
        }
    }

    /// Returns the sample variance (n − 1 denominator), or `None` if fewer
    /// than 2 samples have been added.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }

    /// Returns the population variance (n denominator), or `None` if no
    /// samples have been added.
    pub fn population_variance(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.m2 / self.count as f64)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap() - 3.0).abs() < 1e-15);
        assert!((mean(&[42.0]).unwrap() - 42.0).abs() < 1e-15);
    }

    #[test]
    fn test_mean_edge_cases() {
        assert!(mean(&[]).is_none());
        assert!(mean(&[1.0, f64::NAN]).is_none());
        assert!(mean(&[1.0, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_kahan_sum_compensates() {
        // 1 + 1e100 + 1 - 1e100 = 2 exactly with compensation
        let data = [1.0, 1e100, 1.0, -1e100];
        assert_eq!(kahan_sum(&data), 2.0);
    }

    #[test]
    fn test_kahan_sum_many_small() {
        let data = vec![0.1; 1_000_000];
        assert!((kahan_sum(&data) - 100_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_moments_offset_table() {
        // Far from the origin the naive E[X²] − μ² loses every digit
        let values = [1e9, 1e9 + 1.0, 1e9 + 2.0];
        let probabilities = [0.25, 0.5, 0.25];
        let (m, v) = weighted_moments(&values, &probabilities);
        assert!((m - (1e9 + 1.0)).abs() < 1e-6);
        assert!((v - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_welford_empty_and_single() {
        let mut acc = WelfordAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert!(acc.mean().is_none());
        assert!(acc.population_variance().is_none());
        acc.update(3.0);
        assert_eq!(acc.mean(), Some(3.0));
        assert!(acc.sample_variance().is_none());
        assert_eq!(acc.population_variance(), Some(0.0));
    }

    #[test]
    fn test_welford_known_values() {
        let acc = WelfordAccumulator::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(acc.count(), 8);
        assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
        assert!((acc.population_variance().unwrap() - 4.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn welford_matches_two_pass(data in proptest::collection::vec(-1e6_f64..1e6, 2..100)) {
            let acc = WelfordAccumulator::from_slice(&data);
            let m = mean(&data).unwrap();
            let two_pass = kahan_sum_iter(data.iter().map(|x| (x - m) * (x - m))) / (data.len() - 1) as f64;
            let v = acc.sample_variance().unwrap();
            prop_assert!((v - two_pass).abs() <= 1e-9 * two_pass.max(1.0));
        }

        #[test]
        fn weighted_variance_non_negative(
            pairs in proptest::collection::vec((-100.0_f64..100.0, 0.01_f64..1.0), 1..30),
        ) {
            let total: f64 = pairs.iter().map(|&(_, w)| w).sum();
            let values: Vec<f64> = pairs.iter().map(|&(v, _)| v).collect();
            let probabilities: Vec<f64> = pairs.iter().map(|&(_, w)| w / total).collect();
            let (_, v) = weighted_moments(&values, &probabilities);
            prop_assert!(v >= 0.0);
        }
    }
}
