//! utils: conversions between Python objects and the Rust 3PL surface.
//!
//! Only compiled with the `python-bindings` feature. Every helper here turns
//! loosely typed Python input into validated Rust values and reports failures
//! as `ThreePLError`, which becomes a Python exception at the boundary.

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    irt::{
        core::{
            data::{ConditionCounts, ExperimentData},
            options::{
                ConvergencePolicy, ThreePLOptions, DEFAULT_MAX_ITER, DEFAULT_TOL_COST,
                DEFAULT_TOL_GRAD,
            },
        },
        errors::{ThreePLError, ThreePLResult},
    },
    optimization::loglik_optimizer::{
        traits::{LineSearcher, MLEOptions, Tolerances},
        DEFAULT_LBFGS_MEM,
    },
};

/// Read an experiment from a Python object.
///
/// Accepted shapes, tried in order:
/// - a sequence of `(n_correct, n_incorrect)` pairs;
/// - an object with a `conditions` iterable whose items expose
///   `n_correct_responses()` and `n_incorrect_responses()`.
///
/// Anything else is a `CapabilityMismatch` naming the Python type. An empty
/// result is returned as-is; the model constructor rejects it.
#[cfg(feature = "python-bindings")]
pub fn extract_experiment(experiment: &Bound<'_, PyAny>) -> ThreePLResult<ExperimentData> {
    if let Ok(pairs) = experiment.extract::<Vec<(u64, u64)>>() {
        return Ok(pairs.into_iter().collect());
    }
    let mismatch = || ThreePLError::CapabilityMismatch { found: python_type_name(experiment) };
    let conditions = experiment.getattr("conditions").map_err(|_| mismatch())?;
    let iter = conditions.try_iter().map_err(|_| mismatch())?;
    let mut counts = Vec::new();
    for item in iter {
        let condition = item.map_err(|_| mismatch())?;
        let correct = count_from(&condition, "n_correct_responses").ok_or_else(mismatch)?;
        let incorrect = count_from(&condition, "n_incorrect_responses").ok_or_else(mismatch)?;
        counts.push(ConditionCounts::new(correct, incorrect));
    }
    Ok(ExperimentData::new(counts))
}

/// Optimizer options from keyword arguments; `None` falls back to the 3PL
/// defaults rather than the generic optimizer ones.
#[cfg(feature = "python-bindings")]
pub fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> ThreePLResult<MLEOptions> {
    let tols = Tolerances::new(
        Some(tol_grad.unwrap_or(DEFAULT_TOL_GRAD)),
        Some(tol_cost.unwrap_or(DEFAULT_TOL_COST)),
        Some(max_iter.unwrap_or(DEFAULT_MAX_ITER)),
    )?;
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name)?,
        None => LineSearcher::MoreThuente,
    };
    let opts = MLEOptions::new(tols, ls, Some(lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)))?;
    Ok(opts)
}

/// Full estimation options from keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn build_options(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>, convergence: Option<&str>,
) -> ThreePLResult<ThreePLOptions> {
    let mle_opts = extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?;
    let policy = match convergence {
        Some(name) => ConvergencePolicy::from_str(name)?,
        None => ConvergencePolicy::BestEffort,
    };
    Ok(ThreePLOptions::new(mle_opts, policy))
}

// ---- Helper methods ----

#[cfg(feature = "python-bindings")]
fn count_from(condition: &Bound<'_, PyAny>, method: &str) -> Option<u64> {
    condition.call_method0(method).ok()?.extract::<u64>().ok()
}

#[cfg(feature = "python-bindings")]
fn python_type_name(value: &Bound<'_, PyAny>) -> String {
    value.get_type().name().map(|n| n.to_string()).unwrap_or_else(|_| "<unknown>".to_string())
}
