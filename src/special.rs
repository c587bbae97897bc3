//! Special mathematical functions.
//!
//! Numerical kernels the distribution CDFs are built from: log-gamma,
//! regularized incomplete gamma and beta functions, the error function and
//! its inverses, and the saddle-point expansion used for binomial masses.
//!
//! Kernels return `NaN` outside their domain. Iterative kernels return
//! [`DistributionError::MaxIterationsExceeded`] when their series or
//! continued fraction does not converge within the iteration cap.

use std::f64::consts::{FRAC_2_SQRT_PI, PI};

use crate::error::{DistributionError, Result};

/// Default relative tolerance of the iterative kernels.
pub const DEFAULT_EPSILON: f64 = 1e-14;

/// Default iteration cap of the iterative kernels.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Floor for Lentz's algorithm denominators.
const TINY: f64 = 1e-300;

/// ½·ln(2π)
const HALF_LN_2PI: f64 = 0.918_938_533_204_672_8;

// ============================================================================
// Gamma and Beta Functions
// ============================================================================

/// Lanczos approximation of ln Γ(x).
///
/// Reference: Lanczos (1964), "A Precision Approximation of the Gamma
/// Function", *SIAM Journal on Numerical Analysis* 1(1).
///
/// # Accuracy
/// Relative error < 2 × 10⁻¹⁰ for x > 0.
///
/// # Returns
/// - `f64::NAN` if `x ≤ 0` or `x` is NaN.
///
/// # Examples
/// ```
/// use u_distributions::special::ln_gamma;
/// // Γ(5) = 24
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
/// assert!(ln_gamma(-1.0).is_nan());
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x.is_nan() || x <= 0.0 {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return f64::INFINITY;
    }

    if x < 0.5 {
        // Reflection: Γ(x)·Γ(1−x) = π/sin(πx)
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut sum = COEFFICIENTS[0];
    for (i, &c) in COEFFICIENTS[1..].iter().enumerate() {
        sum += c / (x + i as f64 + 1.0);
    }

    let t = x + G + 0.5;
    HALF_LN_2PI + (x + 0.5) * t.ln() - t + sum.ln()
}

/// Log of the Beta function: `ln B(a, b) = ln Γ(a) + ln Γ(b) − ln Γ(a+b)`.
///
/// # Examples
/// ```
/// use u_distributions::special::ln_beta;
/// // B(1,1) = 1, so ln B(1,1) = 0
/// assert!(ln_beta(1.0, 1.0).abs() < 1e-10);
/// ```
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

// ============================================================================
// Regularized Incomplete Gamma Functions
// ============================================================================

/// Regularized lower incomplete gamma function P(a, x) = γ(a, x) / Γ(a).
///
/// # Algorithm
/// Series expansion for `x < a + 1`, continued fraction for the upper
/// function otherwise, both to [`DEFAULT_EPSILON`].
///
/// Reference: Press et al. (2007), *Numerical Recipes*, 3rd ed., §6.2.
///
/// # Returns
/// - `Ok(NaN)` if `a ≤ 0`, `x < 0`, or either is NaN.
/// - `Ok(0.0)` if `x == 0`.
///
/// # Errors
/// [`DistributionError::MaxIterationsExceeded`] if the expansion does not
/// converge within [`DEFAULT_MAX_ITERATIONS`].
///
/// # Examples
/// ```
/// use u_distributions::special::regularized_gamma_p;
/// // P(1, x) = 1 - exp(-x) for the exponential distribution
/// let p = regularized_gamma_p(1.0, 2.0).unwrap();
/// assert!((p - (1.0 - (-2.0_f64).exp())).abs() < 1e-14);
/// ```
pub fn regularized_gamma_p(a: f64, x: f64) -> Result<f64> {
    regularized_gamma_p_with(a, x, DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS)
}

/// [`regularized_gamma_p`] with an explicit tolerance and iteration cap.
pub fn regularized_gamma_p_with(
    a: f64,
    x: f64,
    epsilon: f64,
    max_iterations: usize,
) -> Result<f64> {
    if a.is_nan() || x.is_nan() || a <= 0.0 || x < 0.0 {
        return Ok(f64::NAN);
    }
    if x == 0.0 {
        return Ok(0.0);
    }
    if x == f64::INFINITY {
        return Ok(1.0);
    }
    if x < a + 1.0 {
        gamma_series(a, x, epsilon, max_iterations)
    } else {
        Ok(1.0 - gamma_cf(a, x, epsilon, max_iterations)?)
    }
}

/// Regularized upper incomplete gamma function Q(a, x) = 1 − P(a, x).
///
/// Evaluated directly by continued fraction for `x ≥ a + 1`, so the upper
/// tail keeps its relative accuracy.
///
/// # Examples
/// ```
/// use u_distributions::special::regularized_gamma_q;
/// let q = regularized_gamma_q(1.0, 30.0).unwrap();
/// assert!((q / (-30.0_f64).exp() - 1.0).abs() < 1e-12);
/// ```
pub fn regularized_gamma_q(a: f64, x: f64) -> Result<f64> {
    regularized_gamma_q_with(a, x, DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS)
}

/// [`regularized_gamma_q`] with an explicit tolerance and iteration cap.
pub fn regularized_gamma_q_with(
    a: f64,
    x: f64,
    epsilon: f64,
    max_iterations: usize,
) -> Result<f64> {
    if a.is_nan() || x.is_nan() || a <= 0.0 || x < 0.0 {
        return Ok(f64::NAN);
    }
    if x == 0.0 {
        return Ok(1.0);
    }
    if x == f64::INFINITY {
        return Ok(0.0);
    }
    if x < a + 1.0 {
        Ok(1.0 - gamma_series(a, x, epsilon, max_iterations)?)
    } else {
        gamma_cf(a, x, epsilon, max_iterations)
    }
}

/// Series expansion for the regularized lower incomplete gamma.
fn gamma_series(a: f64, x: f64, epsilon: f64, max_iterations: usize) -> Result<f64> {
    let mut term = 1.0 / a;
    let mut sum = term;
    let mut ap = a;
    for _ in 0..max_iterations {
        ap += 1.0;
        term *= x / ap;
        sum += term;
        if sum.is_infinite() {
            return Ok(1.0);
        }
        if term.abs() < sum.abs() * epsilon {
            return Ok(sum * (-x + a * x.ln() - ln_gamma(a)).exp());
        }
    }
    Err(DistributionError::MaxIterationsExceeded {
        function: "regularized_gamma_p",
        iterations: max_iterations,
    })
}

/// Continued fraction for the upper incomplete gamma Q(a, x) = 1 − P(a, x).
fn gamma_cf(a: f64, x: f64, epsilon: f64, max_iterations: usize) -> Result<f64> {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / TINY;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=max_iterations {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.0;
        d = floor_tiny(an * d + b);
        c = floor_tiny(b + an / c);
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < epsilon {
            return Ok(h * (-x + a * x.ln() - ln_gamma(a)).exp());
        }
    }
    Err(DistributionError::MaxIterationsExceeded {
        function: "regularized_gamma_q",
        iterations: max_iterations,
    })
}

// ============================================================================
// Regularized Incomplete Beta Function
// ============================================================================

/// Regularized incomplete beta function I_x(a, b).
///
/// # Definition
/// ```text
/// I_x(a, b) = B(x; a, b) / B(a, b)
/// ```
///
/// # Algorithm
/// Continued fraction (modified Lentz) on the side of the mode where it
/// converges quickly; above `(a+1)/(a+b+2)` the symmetry relation
/// `I_x(a,b) = 1 − I_{1−x}(b,a)` is applied.
///
/// Reference: Press et al. (2007), *Numerical Recipes*, 3rd ed., §6.4.
///
/// # Returns
/// - `Ok(NaN)` if `x ∉ [0, 1]`, `a ≤ 0`, `b ≤ 0`, or any input is NaN.
///
/// # Errors
/// [`DistributionError::MaxIterationsExceeded`] if the continued fraction
/// does not converge within [`DEFAULT_MAX_ITERATIONS`].
///
/// # Examples
/// ```
/// use u_distributions::special::regularized_beta;
/// assert_eq!(regularized_beta(0.0, 2.0, 3.0).unwrap(), 0.0);
/// assert_eq!(regularized_beta(1.0, 2.0, 3.0).unwrap(), 1.0);
/// // I_0.5(1,1) = 0.5 (uniform)
/// assert!((regularized_beta(0.5, 1.0, 1.0).unwrap() - 0.5).abs() < 1e-12);
/// ```
pub fn regularized_beta(x: f64, a: f64, b: f64) -> Result<f64> {
    regularized_beta_with(x, a, b, DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS)
}

/// [`regularized_beta`] with an explicit tolerance and iteration cap.
pub fn regularized_beta_with(
    x: f64,
    a: f64,
    b: f64,
    epsilon: f64,
    max_iterations: usize,
) -> Result<f64> {
    if x.is_nan() || a.is_nan() || b.is_nan() || !(0.0..=1.0).contains(&x) || a <= 0.0 || b <= 0.0
    {
        return Ok(f64::NAN);
    }
    if x == 0.0 {
        return Ok(0.0);
    }
    if x == 1.0 {
        return Ok(1.0);
    }

    if x > (a + 1.0) / (a + b + 2.0) {
        Ok(1.0 - beta_lentz(1.0 - x, b, a, epsilon, max_iterations)?)
    } else {
        beta_lentz(x, a, b, epsilon, max_iterations)
    }
}

/// Prefactor times continued fraction, without the symmetry reduction.
fn beta_lentz(x: f64, a: f64, b: f64, epsilon: f64, max_iterations: usize) -> Result<f64> {
    let ln_prefix = a * x.ln() + b * (-x).ln_1p() - ln_beta(a, b);
    let cf = beta_cf(x, a, b, epsilon, max_iterations)?;
    Ok((ln_prefix.exp() / a) * cf)
}

/// Continued fraction for the incomplete beta function (Lentz's algorithm).
fn beta_cf(x: f64, a: f64, b: f64, epsilon: f64, max_iterations: usize) -> Result<f64> {
    let mut c = 1.0;
    let mut d = 1.0 / floor_tiny(1.0 - (a + b) * x / (a + 1.0));
    let mut h = d;

    for m in 1..=max_iterations {
        let m_f = m as f64;
        let num_even = m_f * (b - m_f) * x / ((a + 2.0 * m_f - 1.0) * (a + 2.0 * m_f));
        d = 1.0 / floor_tiny(1.0 + num_even * d);
        c = floor_tiny(1.0 + num_even / c);
        h *= d * c;

        let num_odd =
            -(a + m_f) * (a + b + m_f) * x / ((a + 2.0 * m_f) * (a + 2.0 * m_f + 1.0));
        d = 1.0 / floor_tiny(1.0 + num_odd * d);
        c = floor_tiny(1.0 + num_odd / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < epsilon {
            return Ok(h);
        }
    }
    Err(DistributionError::MaxIterationsExceeded {
        function: "regularized_beta",
        iterations: max_iterations,
    })
}

#[inline]
fn floor_tiny(v: f64) -> f64 {
    if v.abs() < TINY {
        TINY
    } else {
        v
    }
}

// ============================================================================
// Error Function
// ============================================================================

// Rational approximations from FreeBSD msun s_erf.c.
// Copyright (C) 1993 by Sun Microsystems, Inc. All rights reserved.
// Developed at SunPro, a Sun Microsystems, Inc. business.
// Permission to use, copy, modify, and distribute this software is freely
// granted, provided that this notice is preserved.

const ERX: f64 = 8.45062911510467529297e-01;
const EFX8: f64 = 1.02703333676410069053e+00;

// |x| < 0.84375
const PP: [f64; 5] = [
    1.28379167095512558561e-01,
    -3.25042107247001499370e-01,
    -2.84817495755985104766e-02,
    -5.77027029648944159157e-03,
    -2.37630166566501626084e-05,
];
const QQ: [f64; 6] = [
    1.0,
    3.97917223959155352819e-01,
    6.50222499887672944485e-02,
    5.08130628187576562776e-03,
    1.32494738004321644526e-04,
    -3.96022827877536812320e-06,
];

// 0.84375 ≤ |x| < 1.25
const PA: [f64; 7] = [
    -2.36211856075265944077e-03,
    4.14856118683748331666e-01,
    -3.72207876035701323847e-01,
    3.18346619901161753674e-01,
    -1.10894694282396677476e-01,
    3.54783043256182359371e-02,
    -2.16637559486879084300e-03,
];
const QA: [f64; 7] = [
    1.0,
    1.06420880400844228286e-01,
    5.40397917702171048937e-01,
    7.18286544141962662868e-02,
    1.26171219808761642112e-01,
    1.36370839120290507362e-02,
    1.19844998467991074170e-02,
];

// 1.25 ≤ |x| < 1/0.35
const RA: [f64; 8] = [
    -9.86494403484714822705e-03,
    -6.93858572707181764372e-01,
    -1.05586262253232909814e+01,
    -6.23753324503260060396e+01,
    -1.62396669462573470355e+02,
    -1.84605092906711035994e+02,
    -8.12874355063065934246e+01,
    -9.81432934416914548592e+00,
];
const SA: [f64; 9] = [
    1.0,
    1.96512716674392571292e+01,
    1.37657754143519042600e+02,
    4.34565877475229228821e+02,
    6.45387271733267880336e+02,
    4.29008140027567833386e+02,
    1.08635005541779435134e+02,
    6.57024977031928170135e+00,
    -6.04244152148580987438e-02,
];

// 1/0.35 ≤ |x| < 28
const RB: [f64; 7] = [
    -9.86494292470009928597e-03,
    -7.99283237680523006574e-01,
    -1.77579549177547519889e+01,
    -1.60636384855821916062e+02,
    -6.37566443368389627722e+02,
    -1.02509513161107724954e+03,
    -4.83519191608651397019e+02,
];
const SB: [f64; 8] = [
    1.0,
    3.03380607434824582924e+01,
    3.25792512996573918826e+02,
    1.53672958608443695994e+03,
    3.19985821950859553908e+03,
    2.55305040643316442583e+03,
    4.74528541206955367215e+02,
    -2.24409524465858183362e+01,
];

/// Horner evaluation, coefficients in ascending order.
#[inline]
fn polynomial(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// erfc(x) for 0.84375 ≤ x < 28.
fn erfc_tail(x: f64) -> f64 {
    if x < 1.25 {
        let s = x - 1.0;
        return 1.0 - ERX - polynomial(s, &PA) / polynomial(s, &QA);
    }
    let s = 1.0 / (x * x);
    let (r, big_s) = if x < 1.0 / 0.35 {
        (polynomial(s, &RA), polynomial(s, &SA))
    } else {
        (polynomial(s, &RB), polynomial(s, &SB))
    };
    // z keeps the high word of x so that z² is exact
    let z = f64::from_bits(x.to_bits() & 0xffff_ffff_0000_0000);
    (-z * z - 0.5625).exp() * ((z - x) * (z + x) + r / big_s).exp() / x
}

/// Error function erf(x).
///
/// # Definition
/// ```text
/// erf(x) = (2/√π) ∫₀ˣ exp(-t²) dt
/// ```
///
/// # Algorithm
/// Piecewise rational approximations of fdlibm, accurate to below one ulp.
///
/// # Examples
/// ```
/// use u_distributions::special::erf;
/// assert_eq!(erf(0.0), 0.0);
/// assert!((erf(1.0) - 0.8427007929497148).abs() < 1e-15);
/// ```
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax < 0.84375 {
        if ax < f64::EPSILON / 8.0 {
            return 0.125 * (8.0 * x + EFX8 * x);
        }
        let z = x * x;
        return x + x * (polynomial(z, &PP) / polynomial(z, &QQ));
    }
    if ax < 6.0 {
        (1.0 - erfc_tail(ax)).copysign(x)
    } else {
        1.0_f64.copysign(x)
    }
}

/// Complementary error function erfc(x) = 1 − erf(x).
///
/// Keeps full relative accuracy in the upper tail where `1.0 - erf(x)`
/// would cancel.
///
/// # Examples
/// ```
/// use u_distributions::special::erfc;
/// assert_eq!(erfc(0.0), 1.0);
/// assert!((erfc(2.0) - 0.004677734981047266).abs() < 1e-17);
/// ```
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax < 0.84375 {
        if ax < f64::EPSILON / 128.0 {
            return 1.0 - x;
        }
        let z = x * x;
        let y = polynomial(z, &PP) / polynomial(z, &QQ);
        if x < 0.25 {
            return 1.0 - (x + x * y);
        }
        return 0.5 - (x - 0.5 + x * y);
    }
    if ax < 28.0 {
        let tail = erfc_tail(ax);
        if x < 0.0 {
            2.0 - tail
        } else {
            tail
        }
    } else if x < 0.0 {
        2.0
    } else {
        0.0
    }
}

// ============================================================================
// Inverse Error Functions
// ============================================================================

/// Winitzki's constant for the closed-form erf⁻¹ seed.
const WINITZKI_A: f64 = 0.147;

/// Halley refinements applied to the seed.
const HALLEY_STEPS: usize = 8;

/// Closed-form seed for erf⁻¹ given `ln(1 − y²)`, relative error ≈ 2 × 10⁻³.
///
/// Reference: Winitzki (2008), "A handy approximation for the error
/// function and its inverse".
fn winitzki_seed(ln_one_minus_y2: f64) -> f64 {
    let t = 2.0 / (PI * WINITZKI_A) + 0.5 * ln_one_minus_y2;
    ((t * t - ln_one_minus_y2 / WINITZKI_A).sqrt() - t).sqrt()
}

/// Refines `y` toward a root of `residual(y) = target(y) − value` where the
/// target's derivative is `sign · 2/√π · exp(−y²)`.
fn halley_refine(mut y: f64, sign: f64, residual: impl Fn(f64) -> f64) -> f64 {
    for _ in 0..HALLEY_STEPS {
        let f = residual(y);
        let fp = sign * FRAC_2_SQRT_PI * (-y * y).exp();
        if f == 0.0 || fp == 0.0 {
            break;
        }
        // f'' = −2y·f'
        let step = f / (fp + y * f);
        y -= step;
        if step.abs() <= f64::EPSILON * y.abs() {
            break;
        }
    }
    y
}

/// Inverse error function: returns `y` with `erf(y) = p`.
///
/// # Returns
/// - `±∞` for `p = ±1`.
/// - `f64::NAN` if `|p| > 1` or `p` is NaN.
///
/// # Examples
/// ```
/// use u_distributions::special::{erf, erf_inv};
/// let y = erf_inv(0.3);
/// assert!((erf(y) - 0.3).abs() < 1e-15);
/// assert_eq!(erf_inv(1.0), f64::INFINITY);
/// ```
pub fn erf_inv(p: f64) -> f64 {
    if p.is_nan() || p.abs() > 1.0 {
        return f64::NAN;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    if p == -1.0 {
        return f64::NEG_INFINITY;
    }
    if p == 0.0 {
        return p;
    }
    if p.abs() > 0.5 {
        // 1 − |p| is exact here, and erfc keeps the tail accurate
        return erfc_inv(1.0 - p.abs()).copysign(p);
    }
    let seed = winitzki_seed((-p * p).ln_1p()).copysign(p);
    halley_refine(seed, 1.0, |y| erf(y) - p)
}

/// Inverse complementary error function: returns `y` with `erfc(y) = q`.
///
/// # Returns
/// - `+∞` for `q = 0`, `−∞` for `q = 2`.
/// - `f64::NAN` if `q ∉ [0, 2]` or `q` is NaN.
///
/// # Examples
/// ```
/// use u_distributions::special::{erfc, erfc_inv};
/// let y = erfc_inv(1e-10);
/// assert!((erfc(y) / 1e-10 - 1.0).abs() < 1e-12);
/// ```
pub fn erfc_inv(q: f64) -> f64 {
    if q.is_nan() || !(0.0..=2.0).contains(&q) {
        return f64::NAN;
    }
    if q == 0.0 {
        return f64::INFINITY;
    }
    if q == 2.0 {
        return f64::NEG_INFINITY;
    }
    if q > 1.0 {
        return -erfc_inv(2.0 - q);
    }
    // y = 1 − q, so 1 − y² = q(2 − q) without cancellation
    let seed = winitzki_seed((q * (2.0 - q)).ln());
    halley_refine(seed, -1.0, |y| erfc(y) - q)
}

// ============================================================================
// Saddle-Point Expansion
// ============================================================================

/// Error of Stirling's approximation: `ln Γ(z+1) − ((z+½)·ln z − z + ½·ln 2π)`.
///
/// Reference: Loader (2000), "Fast and Accurate Computation of Binomial
/// Probabilities".
pub fn stirling_error(z: f64) -> f64 {
    const S0: f64 = 1.0 / 12.0;
    const S1: f64 = 1.0 / 360.0;
    const S2: f64 = 1.0 / 1260.0;
    const S3: f64 = 1.0 / 1680.0;
    const S4: f64 = 1.0 / 1188.0;

    if z < 15.0 {
        ln_gamma(z + 1.0) - (z + 0.5) * z.ln() + z - HALF_LN_2PI
    } else {
        let z2 = z * z;
        (S0 - (S1 - (S2 - (S3 - S4 / z2) / z2) / z2) / z2) / z
    }
}

/// Deviance term `x·ln(x/μ) + μ − x`, by series when `x` is close to `μ`.
///
/// Reference: Loader (2000).
pub fn deviance_part(x: f64, mu: f64) -> f64 {
    if (x - mu).abs() < 0.1 * (x + mu) {
        let d = x - mu;
        let mut v = d / (x + mu);
        let mut s1 = v * d;
        let mut ej = 2.0 * x * v;
        v *= v;
        for j in 1..DEFAULT_MAX_ITERATIONS {
            let s = s1;
            ej *= v;
            s1 = s + ej / (2 * j + 1) as f64;
            if s1 == s {
                break;
            }
        }
        s1
    } else {
        x * (x / mu).ln() + mu - x
    }
}

/// Log of the binomial mass `C(n, x)·pˣ·qⁿ⁻ˣ` for `0 ≤ x ≤ n`, `q = 1 − p`.
///
/// # Algorithm
/// Saddle-point expansion, accurate where the direct product underflows
/// or cancels.
///
/// Reference: Loader (2000).
///
/// # Examples
/// ```
/// use u_distributions::special::ln_binomial_probability;
/// // C(10,5) / 2^10 = 252 / 1024
/// let lp = ln_binomial_probability(5.0, 10.0, 0.5, 0.5);
/// assert!((lp.exp() - 252.0 / 1024.0).abs() < 1e-14);
/// ```
pub fn ln_binomial_probability(x: f64, n: f64, p: f64, q: f64) -> f64 {
    if x == 0.0 {
        if p < 0.1 {
            -deviance_part(n, n * q) - n * p
        } else {
            n * q.ln()
        }
    } else if x == n {
        if q < 0.1 {
            -deviance_part(n, n * p) - n * q
        } else {
            n * p.ln()
        }
    } else {
        let ret = stirling_error(n)
            - stirling_error(x)
            - stirling_error(n - x)
            - deviance_part(x, n * p)
            - deviance_part(n - x, n * q);
        let f = (2.0 * PI * x * (n - x)) / n;
        -0.5 * f.ln() + ret
    }
}
