//! Integration tests for the likelihood maximizer with caller-defined
//! objectives.
//!
//! Purpose
//! -------
//! - Check that `maximize` fits a `LogLikelihood` that does not implement
//!   `grad`, going through the finite-difference fallback of the adapter.
//! - Check that this path lands on the same optimum as the analytic gradient
//!   the 3PL model supplies.
//!
//! Coverage
//! --------
//! - `optimization::loglik_optimizer::{maximize, LogLikelihood, MLEOptions}`.
//! - `irt::models::model_internals::{likelihood_driver, ResponseTable}`.
//!
//! Exclusions
//! ----------
//! - Solver configuration errors are covered by unit tests.
use ndarray::array;
use rust_irt::{
    irt::{
        core::data::ExperimentData,
        models::{
            model_internals::{
                likelihood_driver, ResponseTable, DEFAULT_ABILITY, DEFAULT_DIFFICULTIES,
            },
            three_pl::SimplifiedThreePL,
        },
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{maximize, LineSearcher, LogLikelihood, MLEOptions, Theta, Tolerances},
    },
};

/// 3PL likelihood exposed without an analytic gradient.
struct ValueOnlyThreePL;

impl LogLikelihood for ValueOnlyThreePL {
    type Data = ResponseTable;

    fn value(&self, theta: &Theta, data: &ResponseTable) -> OptResult<f64> {
        Ok(likelihood_driver(data, DEFAULT_ABILITY, theta[0], theta[1]))
    }

    fn check(&self, theta: &Theta, _data: &ResponseTable) -> OptResult<()> {
        if theta.len() != 2 {
            return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
        }
        Ok(())
    }
}

fn accuracy_profile() -> ExperimentData {
    [(55, 45), (60, 40), (75, 25), (90, 10), (95, 5)].into_iter().collect()
}

#[test]
// Purpose
// -------
// A gradient-less objective still reaches the analytic-gradient optimum.
//
// Given
// -----
// - The accuracy profile 55/60/75/90/95 out of 100.
// - `ValueOnlyThreePL` fitted through `maximize` from `[0, 0]`.
//
// Expect
// ------
// - `grad` reports `GradientNotImplemented`.
// - The finite-difference fit matches `SimplifiedThreePL::fit` to 1e-4 in
//   both parameters and to 1e-5 in log-likelihood.
fn value_only_objective_matches_model_fit() {
    let data = accuracy_profile();
    let table = ResponseTable::from_experiment(&data, &DEFAULT_DIFFICULTIES);
    assert_eq!(
        ValueOnlyThreePL.grad(&array![0.0, 0.0], &table),
        Err(OptError::GradientNotImplemented)
    );

    let tols = Tolerances::new(Some(1e-8), Some(1e-12), Some(500)).unwrap();
    let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, None).unwrap();
    let outcome = maximize(&ValueOnlyThreePL, array![0.0, 0.0], &table, &opts).unwrap();

    let mut model = SimplifiedThreePL::new(data).unwrap();
    model.fit().unwrap();
    let analytic = model.optim_outcome().unwrap();

    assert!((outcome.theta_hat[0] - analytic.theta_hat[0]).abs() < 1e-4);
    assert!((outcome.theta_hat[1] - analytic.theta_hat[1]).abs() < 1e-4);
    assert!((outcome.value - analytic.value).abs() < 1e-5);
}

#[test]
// Purpose
// -------
// A wrong-length start is rejected by `check` before the solver runs.
fn value_only_objective_rejects_bad_start() {
    let table = ResponseTable::from_experiment(&accuracy_profile(), &DEFAULT_DIFFICULTIES);

    let result = maximize(&ValueOnlyThreePL, array![0.0], &table, &MLEOptions::default());

    assert_eq!(result.unwrap_err(), OptError::ThetaLengthMismatch { expected: 2, actual: 1 });
}
