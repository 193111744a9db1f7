//! Fitted parameters and fit state for the simplified 3PL model.
//!
//! Purpose
//! -------
//! Represent the model's estimation state as a tagged value instead of a set
//! of optional fields: either nothing has been estimated yet, or a complete,
//! internally consistent parameter triple exists together with the optimizer
//! diagnostics of the run that produced it.
//!
//! Key behaviors
//! -------------
//! - [`FittedParams::from_theta`] is the only way to build a parameter
//!   triple; it derives `base_rate` from `logit_base_rate` so the two can
//!   never disagree.
//! - [`FitState`] accessors turn "not fitted" into
//!   `ThreePLError::InvalidState` with the message callers match on.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizer-space layout is `θ = [discrimination, logit_base_rate]`.
//! - `base_rate == σ(logit_base_rate)` and lies in `[0, 1]` (open interval
//!   for moderate `logit_base_rate`).
use ndarray::ArrayView1;

use crate::{
    irt::{
        core::validation::validate_parameters,
        errors::{ThreePLError, ThreePLResult},
    },
    optimization::{
        loglik_optimizer::OptimOutcome, numerical_stability::transformations::safe_logistic,
    },
};

/// Number of free parameters (`a`, `q`).
pub const N_PARAMS: usize = 2;

/// Message reported by every accessor that needs a fitted model.
pub const NOT_FITTED: &str = "Model is not fitted yet.";

/// `FittedParams`: estimated discrimination and base rate.
///
/// Fields
/// ------
/// - `discrimination`: slope `a` of the response curve.
/// - `logit_base_rate`: unconstrained `q`.
/// - `base_rate`: `c = σ(q)`, derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedParams {
    pub discrimination: f64,
    pub logit_base_rate: f64,
    pub base_rate: f64,
}

impl FittedParams {
    /// Build the triple from an optimizer-space vector `[a, q]`.
    ///
    /// Errors
    /// ------
    /// - `ThreePLError::ParamLengthMismatch` if `theta.len() != 2`.
    /// - `ThreePLError::NumericDomain` if either entry is non-finite.
    pub fn from_theta(theta: ArrayView1<f64>) -> ThreePLResult<Self> {
        let theta = theta.to_vec();
        validate_parameters(&theta)?;
        let (discrimination, logit_base_rate) = (theta[0], theta[1]);
        let base_rate = safe_logistic(logit_base_rate);
        Ok(FittedParams { discrimination, logit_base_rate, base_rate })
    }

    /// Optimizer-space view `[a, q]`.
    pub fn to_theta(&self) -> [f64; N_PARAMS] {
        [self.discrimination, self.logit_base_rate]
    }
}

/// Parameters plus the diagnostics of the run that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    pub params: FittedParams,
    pub outcome: OptimOutcome,
}

/// Estimation state of a model instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FitState {
    #[default]
    Unfit,
    Fit(FittedModel),
}

impl FitState {
    pub fn is_fit(&self) -> bool {
        matches!(self, FitState::Fit(_))
    }

    /// Fitted model, or `InvalidState` when unfit.
    pub fn fitted(&self) -> ThreePLResult<&FittedModel> {
        match self {
            FitState::Fit(model) => Ok(model),
            FitState::Unfit => Err(ThreePLError::InvalidState { reason: NOT_FITTED }),
        }
    }

    pub fn params(&self) -> ThreePLResult<&FittedParams> {
        self.fitted().map(|m| &m.params)
    }
}

/// Standard errors at the MLE.
///
/// `discrimination` and `logit_base_rate` come from observed information in
/// optimizer space; `base_rate` uses the delta method, `c(1 - c)·se(q)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardErrors {
    pub discrimination: f64,
    pub logit_base_rate: f64,
    pub base_rate: f64,
}
