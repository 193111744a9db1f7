//! loglik_optimizer: argmin-backed maximum-likelihood driver.
//!
//! Purpose
//! -------
//! Let a model fit itself by implementing one trait, [`LogLikelihood`], and
//! calling [`maximize`]. The driver runs L-BFGS (More–Thuente or Hager–Zhang
//! line search) on the cost `c(θ) = -ℓ(θ)` and reports an [`OptimOutcome`]
//! expressed in log-likelihood terms.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] exposes the objective to argmin, flipping the
//!   sign of `ℓ` and `∇ℓ`, and falls back to finite differences when no
//!   analytic gradient exists.
//! - [`builders`] apply tolerances and history size; [`run::run_lbfgs`]
//!   executes the solver and applies the iteration cap.
//! - [`finite_diff`] also provides the Hessian used for standard errors.
//! - [`validation`] holds the shared finiteness and shape checks.
//!
//! Conventions
//! -----------
//! - Parameters are unconstrained `Theta` vectors; mapping to model space is
//!   the model's job.
//! - Objective errors cross argmin boxed and come back as the same
//!   [`OptError`](crate::optimization::errors::OptError) variant.
//! - `OptimOutcome::converged` is `true` only when a tolerance was met.
//!
//! Testing notes
//! -------------
//! - Each submodule tests its own piece on small binomial objectives.
//! - The 3PL integration tests drive [`maximize`] end to end; the optimizer
//!   integration tests cover a caller-defined objective without a gradient.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, FnEvalMap, Grad, Theta, DEFAULT_LBFGS_MEM};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
