//! optimization: likelihood maximizer, numeric helpers, error surface.
//!
//! Purpose
//! -------
//! Everything the item-response model needs to turn response counts into
//! parameter estimates without knowing about argmin: an L-BFGS driver for
//! log-likelihoods, stable logistic/softplus helpers, and one error enum.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: `LogLikelihood` trait, `maximize`, options and
//!   outcome types, finite-difference derivatives.
//! - `numerical_stability`: overflow-safe logistic, softplus and log-sum
//!   helpers shared by the model curve and the log-space likelihood.
//! - `errors`: `OptError` / `OptResult`, including conversions from argmin
//!   and from model errors.
//!
//! Conventions
//! -----------
//! - Solvers minimize `c(θ) = -ℓ(θ)`; every public value is reported in `ℓ`.
//! - No I/O happens here. Progress output exists only behind the `obs_slog`
//!   feature and `MLEOptions::verbose`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
