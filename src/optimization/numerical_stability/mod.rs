//! numerical_stability: overflow-safe transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Keep the scalar numerics the 3PL model depends on in one place: the
//! logistic used for both the response curve and the base-rate transform,
//! the softplus and log-sum helpers the likelihood evaluates in log space,
//! and the eigenvalue floor used when inverting observed information.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`; parameter validation happens in the model
//!   layer before values reach these helpers.
//! - `safe_logistic` and `safe_softplus` never return `NaN` for finite input.
//!
//! Conventions
//! -----------
//! - Pure functions and constants only. No allocation, logging or state.
//!
//! Testing notes
//! -------------
//! - [`transformations`] checks agreement with the naïve formulas on a safe
//!   grid and exact behavior in the tails.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{log_add_exp, safe_logistic, safe_softplus, EIGEN_EPS};

pub mod prelude {
    pub use super::transformations::{log_add_exp, safe_logistic, safe_softplus, EIGEN_EPS};
}
