//! rust_irt: simplified 3PL item-response estimation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the simplified three-parameter logistic model to Python via the `_rust_irt`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing classes and the `models` submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`irt`, `optimization`, `inference`) as
//!   the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_irt` Python extension.
//! - Register `rust_irt.models` in `sys.modules` so dotted imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue and error mapping.
//! - Python experiments are copied into an owned `ExperimentData` at
//!   construction, so later mutation on the Python side does not reach a
//!   model that already exists.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are `ThreePLError` internally and become
//!   `TypeError` (capability mismatch) or `ValueError` (everything else) at
//!   the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`irt`] directly and can ignore the
//!   items guarded by the `python-bindings` feature.

pub mod inference;
pub mod irt;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    irt::{core::data::ExperimentData, models::three_pl::SimplifiedThreePL as CoreThreePL},
    optimization::loglik_optimizer::traits::OptimOutcome,
    utils::{build_options, extract_experiment},
};

/// SimplifiedThreePL: Python-facing wrapper for the simplified 3PL model.
///
/// Purpose
/// -------
/// Expose [`CoreThreePL`] to Python while preserving its validation rules and
/// fit-state semantics.
///
/// Parameters
/// ----------
/// Constructed from Python via `SimplifiedThreePL(experiment, **options)`:
/// - `experiment`: a sequence of `(n_correct, n_incorrect)` pairs, or an
///   object with a `conditions` iterable whose items provide
///   `n_correct_responses()` and `n_incorrect_responses()`.
/// - `tol_grad`, `tol_cost`, `max_iter`, `line_searcher`, `lbfgs_mem`:
///   optimizer configuration.
/// - `convergence`: `"best_effort"` (default) or `"strict"`.
///
/// Fields
/// ------
/// - `inner`: [`CoreThreePL`] over an owned [`ExperimentData`].
///
/// Notes
/// -----
/// - Native Rust callers should use [`irt::SimplifiedThreePL`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "SimplifiedThreePL", module = "rust_irt.models")]
pub struct PySimplifiedThreePL {
    pub inner: CoreThreePL<ExperimentData>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PySimplifiedThreePL {
    #[new]
    #[pyo3(
        signature = (
            experiment,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
            convergence = None,
        ),
        text_signature = "(experiment, /, tol_grad=1e-8, tol_cost=1e-12, max_iter=500, \
                          line_searcher='MoreThuente', lbfgs_mem=7, \
                          convergence='best_effort')"
    )]
    pub fn new<'py>(
        experiment: &Bound<'py, PyAny>, tol_grad: Option<f64>, tol_cost: Option<f64>,
        max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
        convergence: Option<&str>,
    ) -> PyResult<Self> {
        let data = extract_experiment(experiment)?;
        let options = build_options(
            tol_grad,
            tol_cost,
            max_iter,
            line_searcher,
            lbfgs_mem,
            convergence,
        )?;
        let inner = CoreThreePL::with_options(data, options)?;
        Ok(PySimplifiedThreePL { inner })
    }

    /// Totals over all conditions: `n_total`, `n_correct`, `n_incorrect`,
    /// `n_conditions`.
    pub fn summary<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let summary = self.inner.summary();
        let out = PyDict::new(py);
        out.set_item("n_total", summary.n_total)?;
        out.set_item("n_correct", summary.n_correct)?;
        out.set_item("n_incorrect", summary.n_incorrect)?;
        out.set_item("n_conditions", summary.n_conditions)?;
        Ok(out)
    }

    #[pyo3(text_signature = "(self, parameters, /)")]
    pub fn predict<'py>(
        &self, py: Python<'py>, parameters: Vec<f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let probs = self.inner.predict(&parameters)?;
        Ok(probs.into_pyarray(py))
    }

    #[pyo3(text_signature = "(self, parameters, /)")]
    pub fn negative_log_likelihood(&self, parameters: Vec<f64>) -> PyResult<f64> {
        Ok(self.inner.negative_log_likelihood(&parameters)?)
    }

    pub fn fit(&mut self) -> PyResult<()> {
        self.inner.fit()?;
        Ok(())
    }

    pub fn get_discrimination(&self) -> PyResult<f64> {
        Ok(self.inner.get_discrimination()?)
    }

    pub fn get_base_rate(&self) -> PyResult<f64> {
        Ok(self.inner.get_base_rate()?)
    }

    pub fn get_logit_base_rate(&self) -> PyResult<f64> {
        Ok(self.inner.get_logit_base_rate()?)
    }

    /// `(se_discrimination, se_logit_base_rate, se_base_rate)` at the fit.
    pub fn standard_errors(&self) -> PyResult<(f64, f64, f64)> {
        let se = self.inner.standard_errors()?;
        Ok((se.discrimination, se.logit_base_rate, se.base_rate))
    }

    #[getter]
    pub fn is_fitted(&self) -> bool {
        self.inner.is_fitted()
    }

    #[getter]
    pub fn default_difficulties(&self) -> Vec<f64> {
        self.inner.default_difficulties().to_vec()
    }

    #[getter]
    pub fn ability(&self) -> f64 {
        self.inner.ability()
    }

    #[getter]
    pub fn results(&self) -> PyResult<ThreePLOptimOutcome> {
        let outcome = self.inner.optim_outcome()?;
        Ok(ThreePLOptimOutcome { inner: outcome.clone() })
    }
}

/// ThreePLOptimOutcome: read-only optimizer diagnostics of the last fit.
///
/// Instances are constructed by the `SimplifiedThreePL.results` getter and
/// are not created directly by user code. `value` is the log-likelihood at
/// `theta_hat = [a, q]`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_irt.models")]
pub struct ThreePLOptimOutcome {
    pub inner: OptimOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ThreePLOptimOutcome {
    #[getter]
    pub fn theta_hat(&self) -> Vec<f64> {
        self.inner.theta_hat.to_vec()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.grad_norm
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }
}

/// _rust_irt: PyO3 module initializer.
///
/// Creates the `models` submodule, attaches it to `_rust_irt` and registers
/// it in `sys.modules` as `rust_irt.models`.
///
/// # Errors
/// - `PyErr` if creating the submodule or touching `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_irt<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let models_mod = PyModule::new(py, "models")?;
    models(py, m, &models_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    py.import("sys")?.getattr("modules")?.set_item("rust_irt.models", models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn models<'py>(
    _py: Python, rust_irt: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PySimplifiedThreePL>()?;
    m.add_class::<ThreePLOptimOutcome>()?;
    rust_irt.add_submodule(m)?;
    Ok(())
}
