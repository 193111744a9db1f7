//! model_internals: pure math behind the simplified 3PL model.
//!
//! Purpose
//! -------
//! Hold the response curve, the base-rate transform, the per-condition
//! response table the optimizer iterates over, and the log-likelihood with
//! its analytic gradient. Nothing here owns state; the model struct wires
//! these together.
//!
//! Key behaviors
//! -------------
//! - [`base_rate_from_logit`] and [`probability_correct`] define the curve
//!   `p = c + (1 - c)·σ(a(θ - b))` with `c = σ(q)`.
//! - [`ResponseTable`] snapshots the first `min(n, 5)` conditions as
//!   `f64` counts next to their difficulties, so likelihood evaluations never
//!   touch the experiment again.
//! - [`likelihood_driver`] returns `ℓ = Σ n_c ln p + n_i ln(1 - p)` and
//!   [`likelihood_grad`] returns `∇ℓ`, both evaluated in log space.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters reaching these functions were validated (finite, length 2).
//! - `table.difficulties`, `table.n_correct` and `table.n_incorrect` have
//!   equal length.
//! - `ln(1 - p) = -softplus(q) - softplus(z)` and `ln p` is a log-domain sum,
//!   so both stay finite and keep a non-zero slope when `p` rounds to 0 or 1
//!   in `f64`. A zero count contributes nothing, even against an infinite log.
//!
//! Conventions
//! -----------
//! - `ability` is passed explicitly even though the model fixes it at 0.
//! - Gradient layout is `[∂ℓ/∂a, ∂ℓ/∂q]`.
use ndarray::{Array1, ArrayView1};

use crate::{
    irt::core::data::{conditions, Experiment},
    optimization::numerical_stability::transformations::{
        log_add_exp, safe_logistic, safe_softplus,
    },
};

/// Difficulties assigned to conditions 0..5, easiest last.
pub const DEFAULT_DIFFICULTIES: [f64; 5] = [2.0, 1.0, 0.0, -1.0, -2.0];

/// Fixed person ability.
pub const DEFAULT_ABILITY: f64 = 0.0;

/// `c = σ(q)`, strictly increasing, ℝ → (0, 1).
pub fn base_rate_from_logit(logit_base_rate: f64) -> f64 {
    safe_logistic(logit_base_rate)
}

/// Probability of a correct response for one condition.
pub fn probability_correct(
    ability: f64, discrimination: f64, difficulty: f64, base_rate: f64,
) -> f64 {
    base_rate + (1.0 - base_rate) * safe_logistic(discrimination * (ability - difficulty))
}

/// Curve evaluated at each difficulty in order.
pub fn predict_probabilities(
    difficulties: ArrayView1<f64>, ability: f64, discrimination: f64, logit_base_rate: f64,
) -> Array1<f64> {
    let c = base_rate_from_logit(logit_base_rate);
    difficulties.mapv(|b| probability_correct(ability, discrimination, b, c))
}

/// `ResponseTable`: per-condition counts paired with difficulties.
///
/// Built once per `fit` / likelihood call from the experiment; only the
/// first `min(condition_count, difficulties.len())` conditions are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTable {
    pub difficulties: Array1<f64>,
    pub n_correct: Array1<f64>,
    pub n_incorrect: Array1<f64>,
}

impl ResponseTable {
    pub fn from_experiment<E: Experiment + ?Sized>(experiment: &E, difficulties: &[f64]) -> Self {
        let limit = experiment.condition_count().min(difficulties.len());
        let mut n_correct = Array1::<f64>::zeros(limit);
        let mut n_incorrect = Array1::<f64>::zeros(limit);
        for (i, condition) in conditions(experiment).take(limit).enumerate() {
            n_correct[i] = condition.correct_trial_count() as f64;
            n_incorrect[i] = condition.incorrect_trial_count() as f64;
        }
        ResponseTable {
            difficulties: Array1::from(difficulties[..limit].to_vec()),
            n_correct,
            n_incorrect,
        }
    }

    pub fn len(&self) -> usize {
        self.difficulties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.difficulties.is_empty()
    }
}

/// Log-likelihood `ℓ(a, q)` of the table (not negated).
pub fn likelihood_driver(
    table: &ResponseTable, ability: f64, discrimination: f64, logit_base_rate: f64,
) -> f64 {
    let mut loglik = 0.0;
    for ((&b, &n_c), &n_i) in
        table.difficulties.iter().zip(table.n_correct.iter()).zip(table.n_incorrect.iter())
    {
        let logs = LogTerms::new(discrimination * (ability - b), logit_base_rate);
        loglik += weighted(n_c, logs.ln_p) + weighted(n_i, logs.ln_not_p);
    }
    loglik
}

/// Analytic gradient `[∂ℓ/∂a, ∂ℓ/∂q]`.
///
/// With `s = σ(a(θ - b))` and `c = σ(q)`:
/// - `∂ ln(1 - p)/∂a = -s·(θ - b)` and `∂ ln(1 - p)/∂q = -c`
/// - `∂ ln p/∂a = (1 - c)·s(1 - s)·(θ - b) / p`
/// - `∂ ln p/∂q = (1 - s)·c(1 - c) / p`
///
/// Both ratios over `p` are at most 1 and are formed from log terms, so they
/// do not underflow to zero when `p` or `1 - p` does.
pub fn likelihood_grad(
    table: &ResponseTable, ability: f64, discrimination: f64, logit_base_rate: f64,
) -> Array1<f64> {
    let c = base_rate_from_logit(logit_base_rate);
    let mut grad = Array1::<f64>::zeros(2);
    for ((&b, &n_c), &n_i) in
        table.difficulties.iter().zip(table.n_correct.iter()).zip(table.n_incorrect.iter())
    {
        let d = ability - b;
        let z = discrimination * d;
        let s = safe_logistic(z);
        let logs = LogTerms::new(z, logit_base_rate);
        let dlnp_da = (logs.ln_not_c + logs.ln_s + logs.ln_not_s - logs.ln_p).exp() * d;
        let dlnp_dq = (logs.ln_c + logs.ln_not_c + logs.ln_not_s - logs.ln_p).exp();
        grad[0] += n_c * dlnp_da - n_i * s * d;
        grad[1] += n_c * dlnp_dq - n_i * c;
    }
    grad
}

// ---- Helper methods ----

/// Log-domain pieces of one condition's response probability.
struct LogTerms {
    ln_c: f64,
    ln_not_c: f64,
    ln_s: f64,
    ln_not_s: f64,
    ln_p: f64,
    ln_not_p: f64,
}

impl LogTerms {
    /// `z = a(θ - b)`, `q` the logit base rate.
    fn new(z: f64, logit_base_rate: f64) -> Self {
        let ln_c = -safe_softplus(-logit_base_rate);
        let ln_not_c = -safe_softplus(logit_base_rate);
        let ln_s = -safe_softplus(-z);
        let ln_not_s = -safe_softplus(z);
        LogTerms {
            ln_c,
            ln_not_c,
            ln_s,
            ln_not_s,
            ln_p: log_add_exp(ln_c, ln_not_c + ln_s),
            ln_not_p: ln_not_c + ln_not_s,
        }
    }
}

fn weighted(count: f64, log_prob: f64) -> f64 {
    if count > 0.0 {
        count * log_prob
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irt::core::data::{ConditionCounts, ExperimentData};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Curve shape, table truncation, and likelihood / gradient agreement.
    // Model-level behavior (fitting, accessors) is tested in `three_pl`.
    // -------------------------------------------------------------------------

    fn table_of(counts: &[(u64, u64)]) -> ResponseTable {
        let data: ExperimentData = counts.iter().copied().collect();
        ResponseTable::from_experiment(&data, &DEFAULT_DIFFICULTIES)
    }

    #[test]
    // Purpose
    // -------
    // Known points of the curve: at `a = 0` the logistic term is 1/2, and a
    // zero logit base rate gives `c = 1/2`.
    fn probability_correct_known_values() {
        assert_eq!(base_rate_from_logit(0.0), 0.5);
        assert_eq!(probability_correct(0.0, 0.0, 2.0, 0.5), 0.75);
        // a = 1, b = 0 -> σ(0) = 0.5 regardless of c
        assert!((probability_correct(0.0, 1.0, 0.0, 0.2) - 0.6).abs() < 1e-15);
        // c -> 1 pins p at 1
        assert!((probability_correct(0.0, 3.0, 2.0, 1.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Monotonicity in difficulty follows the sign of the discrimination.
    fn probability_monotone_in_difficulty() {
        let c = base_rate_from_logit(-0.5);
        for w in DEFAULT_DIFFICULTIES.windows(2) {
            let (harder, easier) = (w[0], w[1]);
            let at = |a: f64, b: f64| probability_correct(0.0, a, b, c);
            assert!(at(1.5, harder) < at(1.5, easier));
            assert!(at(-1.5, harder) > at(-1.5, easier));
            assert_eq!(at(0.0, harder), at(0.0, easier));
        }
    }

    #[test]
    // Purpose
    // -------
    // Only the first five conditions enter the table, in order.
    fn response_table_truncates_to_difficulty_count() {
        let table = table_of(&[(1, 9), (2, 8), (3, 7), (4, 6), (5, 5), (6, 4)]);

        assert_eq!(table.len(), 5);
        assert_eq!(table.n_correct, array![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(table.n_incorrect, array![9.0, 8.0, 7.0, 6.0, 5.0]);
        assert_eq!(table.difficulties, Array1::from(DEFAULT_DIFFICULTIES.to_vec()));

        let short = table_of(&[(10, 0), (0, 10)]);
        assert_eq!(short.len(), 2);
        assert_eq!(short.difficulties, array![2.0, 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // At `a = 0, q = 0` every p is 0.75, so ℓ has a closed form.
    fn likelihood_closed_form_at_origin() {
        let table = table_of(&[(30, 10), (20, 20)]);

        let ll = likelihood_driver(&table, 0.0, 0.0, 0.0);

        let expected = 50.0 * 0.75_f64.ln() + 30.0 * 0.25_f64.ln();
        assert!((ll - expected).abs() < 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // A saturated curve stays finite in log space.
    fn likelihood_is_finite_when_curve_saturates() {
        let table = table_of(&[(5, 5), (5, 5), (5, 5), (5, 5), (5, 5)]);

        let ll = likelihood_driver(&table, 0.0, 500.0, 50.0);
        let grad = likelihood_grad(&table, 0.0, 500.0, 50.0);

        assert!(ll.is_finite());
        assert!(ll < -100.0);
        assert!(grad.iter().all(|g| g.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // The analytic gradient agrees with central differences of ℓ at several
    // interior points.
    //
    // Given
    // -----
    // - The five-condition accuracy profile 55/60/75/90/95 out of 100.
    //
    // Expect
    // ------
    // - Relative agreement to 1e-6 in both components.
    fn analytic_gradient_matches_finite_differences() {
        let table = table_of(&[(55, 45), (60, 40), (75, 25), (90, 10), (95, 5)]);
        let h = 1e-6;

        for &(a, q) in &[(0.0, 0.0), (1.2, -0.3), (-0.7, 1.1), (2.5, -2.0), (0.3, 8.0)] {
            let grad = likelihood_grad(&table, 0.0, a, q);
            let fd_a = (likelihood_driver(&table, 0.0, a + h, q)
                - likelihood_driver(&table, 0.0, a - h, q))
                / (2.0 * h);
            let fd_q = (likelihood_driver(&table, 0.0, a, q + h)
                - likelihood_driver(&table, 0.0, a, q - h))
                / (2.0 * h);

            assert!((grad[0] - fd_a).abs() <= 1e-6 * (1.0 + fd_a.abs()), "a={a}, q={q}");
            assert!((grad[1] - fd_q).abs() <= 1e-6 * (1.0 + fd_q.abs()), "a={a}, q={q}");
        }
    }

    #[test]
    // Purpose
    // -------
    // In the interior the log-space likelihood equals the direct
    // `Σ n_c ln p + n_i ln(1 - p)` built from the curve.
    fn log_space_likelihood_matches_direct_formula() {
        let counts = [(55, 45), (60, 40), (75, 25), (90, 10), (95, 5)];
        let table = table_of(&counts);

        for &(a, q) in &[(0.0, 0.0), (1.3, -0.8), (-2.0, 2.5)] {
            let c = base_rate_from_logit(q);
            let direct: f64 = counts
                .iter()
                .zip(DEFAULT_DIFFICULTIES.iter())
                .map(|(&(n_c, n_i), &b)| {
                    let p = probability_correct(0.0, a, b, c);
                    n_c as f64 * p.ln() + n_i as f64 * (1.0 - p).ln()
                })
                .sum();
            let ll = likelihood_driver(&table, 0.0, a, q);
            assert!((ll - direct).abs() <= 1e-10 * (1.0 + direct.abs()), "a={a}, q={q}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Past the point where `p` rounds to 1, the objective keeps penalizing a
    // growing base rate and the gradient keeps pointing back.
    //
    // Given
    // -----
    // - Five conditions at 1000 correct / 1 incorrect.
    // - `a = 0`, `q = 830`, where `1 - c` underflows to 0 in `f64`.
    //
    // Expect
    // ------
    // - `ℓ ≈ -5·(830 + ln 2)` from the incorrect responses.
    // - `∂ℓ/∂q ≈ -5`, pushing `q` down.
    // - `ℓ` keeps decreasing as `q` grows further.
    fn saturated_base_rate_keeps_slope() {
        let table = table_of(&[(1000, 1); 5]);
        assert_eq!(base_rate_from_logit(830.0), 1.0);

        let ll = likelihood_driver(&table, 0.0, 0.0, 830.0);
        let grad = likelihood_grad(&table, 0.0, 0.0, 830.0);

        let expected = -5.0 * (830.0 + std::f64::consts::LN_2);
        assert!((ll - expected).abs() < 1e-9 * expected.abs(), "ll = {ll}");
        assert!((grad[1] + 5.0).abs() < 1e-9, "grad = {grad}");
        assert!(grad[0].abs() < 1e-9);
        assert!(likelihood_driver(&table, 0.0, 0.0, 840.0) < ll);
    }

    #[test]
    // Purpose
    // -------
    // A zero count never turns an infinite log-probability into NaN.
    fn zero_counts_ignore_infinite_logs() {
        // b = -2 overflows z to +inf, so ln(1 - p) = -inf against n_i = 0.
        let table = table_of(&[(0, 4), (0, 4), (0, 4), (4, 0), (4, 0)]);

        let ll = likelihood_driver(&table, 0.0, f64::MAX, 0.0);

        assert!(ll.is_finite(), "ll = {ll}");
    }

    #[test]
    fn predict_probabilities_follows_difficulty_order() {
        let difficulties = Array1::from(DEFAULT_DIFFICULTIES.to_vec());

        let p = predict_probabilities(difficulties.view(), 0.0, 1.0, -1.0);

        assert_eq!(p.len(), 5);
        assert!(p.windows(2).into_iter().all(|w| w[0] < w[1]));
        let c = base_rate_from_logit(-1.0);
        assert!(p.iter().all(|&v| v > c && v < 1.0));
    }

    #[test]
    fn table_reads_counts_through_experiment_trait() {
        let conds = vec![ConditionCounts::new(3, 1)];
        let table = ResponseTable::from_experiment(&conds, &DEFAULT_DIFFICULTIES);
        assert_eq!(table.n_correct, array![3.0]);
        assert!(!table.is_empty());
    }
}
