//! Bracketing root finder for monotone functions.
//!
//! Inverts cumulative distribution functions that have no closed-form
//! quantile: [`RootFinder::bracket`] grows a search interval until the
//! function changes sign, then [`RootFinder::solve`] narrows it with
//! regula-falsi steps safeguarded by bisection.
//!
//! # Examples
//! ```
//! use u_distributions::solver::RootFinder;
//! let finder = RootFinder::new(1e-12);
//! let root = finder.solve(|x: f64| Ok(x * x - 2.0), 0.0, 2.0).unwrap();
//! assert!((root - 2.0_f64.sqrt()).abs() < 1e-12);
//! ```

use log::{debug, trace};

use crate::error::{DistributionError, Result};

/// Absolute accuracy used when a caller does not choose one.
pub const SOLVER_DEFAULT_ABSOLUTE_ACCURACY: f64 = 1e-6;

/// Default relative accuracy on the root.
pub const DEFAULT_RELATIVE_ACCURACY: f64 = 1e-14;

/// Default accuracy on the function value.
pub const DEFAULT_FUNCTION_ACCURACY: f64 = 1e-15;

/// Default cap on function evaluations per solve.
pub const DEFAULT_MAX_EVALUATIONS: usize = 2_000;

/// Configuration of the bracketing solver.
///
/// A solve stops when the bracket is narrower than
/// `absolute_accuracy + relative_accuracy·|midpoint|` or when the function
/// value at the latest point is within `function_accuracy` of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinder {
    absolute_accuracy: f64,
    relative_accuracy: f64,
    function_accuracy: f64,
    max_evaluations: usize,
}

impl Default for RootFinder {
    fn default() -> Self {
        Self::new(SOLVER_DEFAULT_ABSOLUTE_ACCURACY)
    }
}

impl RootFinder {
    /// Creates a finder with the given absolute accuracy and default
    /// relative accuracy, function accuracy and evaluation cap.
    pub fn new(absolute_accuracy: f64) -> Self {
        Self {
            absolute_accuracy,
            relative_accuracy: DEFAULT_RELATIVE_ACCURACY,
            function_accuracy: DEFAULT_FUNCTION_ACCURACY,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
        }
    }

    /// Sets the relative accuracy on the root.
    pub fn with_relative_accuracy(mut self, relative_accuracy: f64) -> Self {
        self.relative_accuracy = relative_accuracy;
        self
    }

    /// Sets the accuracy on the function value.
    pub fn with_function_accuracy(mut self, function_accuracy: f64) -> Self {
        self.function_accuracy = function_accuracy;
        self
    }

    /// Sets the cap on function evaluations.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Absolute accuracy on the root.
    pub fn absolute_accuracy(&self) -> f64 {
        self.absolute_accuracy
    }

    /// Relative accuracy on the root.
    pub fn relative_accuracy(&self) -> f64 {
        self.relative_accuracy
    }

    /// Accuracy on the function value.
    pub fn function_accuracy(&self) -> f64 {
        self.function_accuracy
    }

    /// Cap on function evaluations.
    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    /// Finds a finite interval inside `[lower, upper]` over which the
    /// non-decreasing function `f` goes from `≤ 0` to `≥ 0`.
    ///
    /// Infinite ends are approached from a finite starting interval whose
    /// width doubles at every step. When the lower end is already positive
    /// the old lower end becomes the new upper end, and symmetrically, so the
    /// returned bracket is as tight as the expansion allows.
    ///
    /// # Errors
    /// - [`DistributionError::InvalidBounds`] if `lower > upper` or either
    ///   is NaN.
    /// - [`DistributionError::NoBracketing`] if the interval limits or the
    ///   evaluation cap are reached without a sign change.
    /// - Any error returned by `f`.
    pub fn bracket<F>(&self, f: &mut F, lower: f64, upper: f64) -> Result<(f64, f64)>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(DistributionError::InvalidBounds { lower, upper });
        }

        let (mut lo, mut hi) = match (lower.is_finite(), upper.is_finite()) {
            (true, true) => (lower, upper),
            (true, false) => (lower, lower + lower.abs().max(1.0)),
            (false, true) => (upper - upper.abs().max(1.0), upper),
            (false, false) => (-1.0, 1.0),
        };
        let mut f_lo = f(lo)?;
        let mut f_hi = f(hi)?;
        let mut evaluations = 2;
        let mut width = hi - lo;

        while f_lo > 0.0 && lo > lower && evaluations < self.max_evaluations {
            hi = lo;
            f_hi = f_lo;
            width *= 2.0;
            lo = (lo - width).max(lower);
            f_lo = f(lo)?;
            evaluations += 1;
        }
        while f_hi < 0.0 && hi < upper && evaluations < self.max_evaluations {
            lo = hi;
            f_lo = f_hi;
            width *= 2.0;
            hi = (hi + width).min(upper);
            f_hi = f(hi)?;
            evaluations += 1;
        }

        if !(f_lo <= 0.0 && f_hi >= 0.0) {
            return Err(DistributionError::NoBracketing {
                lower: lo,
                upper: hi,
                f_lower: f_lo,
                f_upper: f_hi,
            });
        }
        debug!("bracketed root in [{lo}, {hi}] after {evaluations} evaluations");
        Ok((lo, hi))
    }

    /// Finds a root of `f` inside the finite bracket `[lower, upper]`.
    ///
    /// # Algorithm
    /// Regula falsi (false position) on the current bracket. A bisection
    /// step replaces the interpolated point whenever that point does not
    /// lie strictly inside the bracket or the previous step failed to halve
    /// the bracket, which bounds the work by twice the bisection count.
    ///
    /// # Returns
    /// The midpoint of the final bracket, the latest point if its function
    /// value is within the function accuracy, or an endpoint that is
    /// already a root.
    ///
    /// # Errors
    /// - [`DistributionError::InvalidBounds`] for a non-finite or inverted
    ///   bracket.
    /// - [`DistributionError::NoBracketing`] if `f(lower)` and `f(upper)`
    ///   share a sign.
    /// - [`DistributionError::NoConvergence`] if the evaluation cap is hit.
    /// - Any error returned by `f`.
    pub fn solve<F>(&self, mut f: F, lower: f64, upper: f64) -> Result<f64>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        if !(lower.is_finite() && upper.is_finite() && lower <= upper) {
            return Err(DistributionError::InvalidBounds { lower, upper });
        }
        let f_lower = f(lower)?;
        if f_lower == 0.0 {
            return Ok(lower);
        }
        let f_upper = f(upper)?;
        if f_upper == 0.0 {
            return Ok(upper);
        }
        self.solve_bracketed(&mut f, (lower, f_lower), (upper, f_upper), 2)
    }

    /// Brackets a root inside the possibly infinite `[lower, upper]`, then
    /// solves within the bracket.
    ///
    /// # Examples
    /// ```
    /// use u_distributions::solver::RootFinder;
    /// let finder = RootFinder::new(1e-10);
    /// let root = finder
    ///     .find_root(|x: f64| Ok(x - 1.0e6), f64::NEG_INFINITY, f64::INFINITY)
    ///     .unwrap();
    /// assert!((root - 1.0e6).abs() < 1e-6);
    /// ```
    pub fn find_root<F>(&self, mut f: F, lower: f64, upper: f64) -> Result<f64>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        let (lo, hi) = self.bracket(&mut f, lower, upper)?;
        self.solve(f, lo, hi)
    }

    fn solve_bracketed<F>(
        &self,
        f: &mut F,
        (mut a, mut fa): (f64, f64),
        (mut b, mut fb): (f64, f64),
        mut evaluations: usize,
    ) -> Result<f64>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        if !((fa < 0.0 && fb > 0.0) || (fa > 0.0 && fb < 0.0)) {
            return Err(DistributionError::NoBracketing {
                lower: a,
                upper: b,
                f_lower: fa,
                f_upper: fb,
            });
        }

        let mut bisect_next = false;
        loop {
            let mid = a + 0.5 * (b - a);
            if b - a <= self.absolute_accuracy + self.relative_accuracy * mid.abs() {
                debug!("converged to {mid} after {evaluations} evaluations");
                return Ok(mid);
            }
            if evaluations >= self.max_evaluations {
                return Err(DistributionError::NoConvergence {
                    lower: a,
                    upper: b,
                    evaluations,
                });
            }

            let interpolated = b - fb * (b - a) / (fb - fa);
            let x = if bisect_next || !(interpolated > a && interpolated < b) {
                mid
            } else {
                interpolated
            };
            let fx = f(x)?;
            evaluations += 1;
            trace!("evaluation {evaluations}: f({x}) = {fx}, bracket [{a}, {b}]");

            if fx.abs() <= self.function_accuracy {
                debug!("function value within tolerance at {x} after {evaluations} evaluations");
                return Ok(x);
            }
            if fx.is_nan() {
                return Err(DistributionError::NoConvergence {
                    lower: a,
                    upper: b,
                    evaluations,
                });
            }

            let previous_width = b - a;
            if (fx < 0.0) == (fa < 0.0) {
                a = x;
                fa = fx;
            } else {
                b = x;
                fb = fx;
            }
            bisect_next = b - a > 0.5 * previous_width;
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn cubic_root_found(target in prop_oneof![-1e3_f64..-1.0, 1.0_f64..1e3]) {
            let finder = RootFinder::new(1e-10);
            let root = finder
                .find_root(|x: f64| Ok(x * x * x - target), f64::NEG_INFINITY, f64::INFINITY)
                .unwrap();
            prop_assert!((root - target.cbrt()).abs() < 1e-8, "root {root} vs {}", target.cbrt());
        }

        #[test]
        fn root_within_bracket(lo in -100.0_f64..0.0, hi in 0.001_f64..100.0, shift in -0.99_f64..0.99) {
            let r = if shift < 0.0 { -shift * lo } else { shift * hi };
            let finder = RootFinder::new(1e-9);
            match finder.solve(|x: f64| Ok(x - r), lo, hi) {
                Ok(root) => prop_assert!(root >= lo && root <= hi && (root - r).abs() < 1e-8),
                Err(e) => prop_assert!(false, "unexpected error {e:?}"),
            }
        }
    }
}
