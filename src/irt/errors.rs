//! Errors for the simplified 3PL item-response model (experiment capability
//! checks, parameter validation, fit-state misuse, optimizer failures).
//!
//! [`ThreePLError`] is shared by the Rust core and the Python bindings. It
//! implements `Display`/`Error`, converts to and from the optimizer's
//! `OptError`, and maps onto `TypeError` / `ValueError` at the PyO3 boundary.
//!
//! ## Conventions
//! - Parameter vectors are `[discrimination, logit_base_rate]`; indices in
//!   errors refer to that layout and are 0-based.
//! - An object that does not look like an experiment is a *capability*
//!   problem (`TypeError` in Python); an experiment with the right shape but
//!   unusable contents is an *argument* problem (`ValueError`).
//! - Optimizer errors raised while fitting are wrapped in
//!   [`ThreePLError::Optimization`] unchanged.
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    PyErr,
};

use crate::optimization::errors::OptError;

/// Result alias for item-response operations.
pub type ThreePLResult<T> = Result<T, ThreePLError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ThreePLError {
    // ---- Construction ----
    /// Input is structurally valid but unusable (e.g. zero conditions).
    InvalidArgument { reason: String },

    /// Input does not provide the experiment capabilities the model reads.
    CapabilityMismatch { found: String },

    // ---- Fit state ----
    /// An accessor that needs fitted parameters was called before `fit`.
    InvalidState { reason: &'static str },

    // ---- Parameters ----
    /// A parameter is NaN or infinite.
    NumericDomain { index: usize, value: f64 },

    /// Parameter vector has the wrong length.
    ParamLengthMismatch { expected: usize, actual: usize },

    /// Unknown convergence policy name.
    InvalidConvergencePolicy { name: String },

    // ---- Estimation ----
    /// Strict convergence was requested and the solver stopped without
    /// meeting a tolerance.
    OptimizationFailed { status: String },

    /// Error raised inside the optimizer.
    Optimization(OptError),
}

impl std::error::Error for ThreePLError {}

impl std::fmt::Display for ThreePLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction ----
            ThreePLError::InvalidArgument { reason } => {
                write!(f, "Invalid argument: {reason}")
            }
            ThreePLError::CapabilityMismatch { found } => {
                write!(
                    f,
                    "Expected an experiment exposing per-condition correct and incorrect \
                     response counts; got: {found}"
                )
            }

            // ---- Fit state ----
            ThreePLError::InvalidState { reason } => {
                write!(f, "{reason}")
            }

            // ---- Parameters ----
            ThreePLError::NumericDomain { index, value } => {
                write!(f, "Parameter at index {index} must be finite; got: {value}")
            }
            ThreePLError::ParamLengthMismatch { expected, actual } => {
                write!(f, "Expected {expected} parameters, got {actual}")
            }
            ThreePLError::InvalidConvergencePolicy { name } => {
                write!(
                    f,
                    "Unknown convergence policy '{name}'. Valid options are case insensitive \
                     'best_effort' or 'strict'."
                )
            }

            // ---- Estimation ----
            ThreePLError::OptimizationFailed { status } => {
                write!(f, "Optimization did not converge: {status}")
            }
            ThreePLError::Optimization(err) => {
                write!(f, "Optimization error: {err}")
            }
        }
    }
}

impl From<OptError> for ThreePLError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                ThreePLError::ParamLengthMismatch { expected, actual }
            }
            OptError::InvalidThetaInput { index, value } => {
                ThreePLError::NumericDomain { index, value }
            }
            other => ThreePLError::Optimization(other),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<ThreePLError> for PyErr {
    fn from(err: ThreePLError) -> PyErr {
        match err {
            ThreePLError::CapabilityMismatch { .. } => PyTypeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
