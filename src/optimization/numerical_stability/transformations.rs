//! Numerical stability utilities.
//!
//! The 3PL curve composes two logistic maps, one for the base rate and one
//! for the ability/difficulty term, and then takes logarithms of the result.
//! Both steps overflow or lose precision in naïve form for large arguments,
//! so the likelihood works with log-probabilities built from softplus terms
//! and never forms `ln p` from a rounded `p`.
//!
//! # Provided items
//! - [`EIGEN_EPS`]: eigenvalue floor for pseudo-inverting information
//!   matrices.
//! - [`safe_logistic(x)`]: `1 / (1 + exp(-x))` without overflow.
//! - [`safe_softplus(x)`]: `ln(1 + exp(x))` without overflow, so
//!   `ln σ(x) = -safe_softplus(-x)` and `ln(1 - σ(x)) = -safe_softplus(x)`.
//! - [`log_add_exp(x, y)`]: `ln(exp(x) + exp(y))` without overflow.

/// Relative eigenvalue floor for pseudo-inverses of observed information.
///
/// Eigenvalues below `EIGEN_EPS * max(λ)` are treated as zero.
pub const EIGEN_EPS: f64 = 1e-10;

/// Numerically stable logistic: `σ(x) = 1 / (1 + exp(-x))`.
///
/// For `x >= 0` the textbook form is safe since `exp(-x) <= 1`. For `x < 0`
/// it is rewritten as `exp(x) / (1 + exp(x))` so `exp` never sees a large
/// positive argument. The result lies in `[0, 1]` for every finite input
/// and saturates rather than producing `NaN`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable softplus: `ln(1 + exp(x))`.
///
/// Written as `max(x, 0) + ln(1 + exp(-|x|))`, which is exact on both tails
/// and continuous everywhere. Finite input gives a finite, non-negative
/// result.
pub fn safe_softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// `ln(exp(x) + exp(y))` for log-domain sums.
///
/// At most one argument may be `-inf`; the result is then the other one.
pub fn log_add_exp(x: f64, y: f64) -> f64 {
    let (hi, lo) = if x >= y { (x, y) } else { (y, x) };
    hi + (lo - hi).exp().ln_1p()
}
