//! models: user-facing simplified 3PL model and its math.
//!
//! Purpose
//! -------
//! Collect the estimable model type [`SimplifiedThreePL`] and the pure
//! functions it is built from. This layer sits on top of `irt::core`, wiring
//! experiment capabilities and options into the generic log-likelihood
//! optimizer.
//!
//! Key behaviors
//! -------------
//! - [`SimplifiedThreePL`] implements [`LogLikelihood`] and provides
//!   `predict`, `negative_log_likelihood`, `fit`, parameter accessors and
//!   `standard_errors`.
//! - [`model_internals`] holds the response curve, the response table and
//!   the log-likelihood with its analytic gradient.
//!
//! Invariants & assumptions
//! ------------------------
//! - Ability is fixed at `0`; difficulties are `[2, 1, 0, -1, -2]` by
//!   condition index and never change after construction.
//! - Optimizer vectors are `[a, q]` with finite entries, enforced by
//!   [`LogLikelihood::check`].
//!
//! Testing notes
//! -------------
//! - Unit tests in [`model_internals`] check the curve, truncation and the
//!   analytic gradient against finite differences.
//! - Unit tests in [`three_pl`] cover construction, fitting under both
//!   convergence policies, accessors and standard errors.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood
//! [`LogLikelihood::check`]: crate::optimization::loglik_optimizer::LogLikelihood::check

pub mod model_internals;
pub mod three_pl;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::model_internals::{
    base_rate_from_logit, probability_correct, ResponseTable, DEFAULT_ABILITY,
    DEFAULT_DIFFICULTIES,
};
pub use self::three_pl::{DynThreePL, SimplifiedThreePL};

pub mod prelude {
    pub use super::three_pl::{DynThreePL, SimplifiedThreePL};
}
