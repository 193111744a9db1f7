//! inference: post-fit uncertainty for the item-response model.
//!
//! Purpose
//! -------
//! Turn a fitted parameter vector into classical standard errors. The model
//! supplies the gradient of its negative log-likelihood; this module
//! differentiates it once more, pseudo-inverts the resulting observed
//! information and reports covariance or standard errors in the
//! unconstrained optimizer space `θ = (a, q)`.
//!
//! Conventions
//! -----------
//! - Everything is on the summed (not averaged) log-likelihood scale, so
//!   standard errors shrink with the total trial count.
//! - Mapping to model-space quantities (the base rate `c = σ(q)`) is done by
//!   the caller via the delta method.
//! - Failures surface as `OptError`; nothing here panics.

pub mod hessian;

pub use self::hessian::{calc_covariance, calc_standard_errors};

pub mod prelude {
    pub use super::hessian::{calc_covariance, calc_standard_errors};
}
