//! Validation helpers for the 3PL model.
//!
//! Purpose
//! -------
//! Keep the business rules the model enforces in one place: a usable
//! experiment has at least one condition, a parameter vector is exactly
//! `[a, q]` with finite entries, and an untyped value is accepted only if it
//! is one of the known experiment carriers.
//!
//! Conventions
//! -----------
//! - Capability checks ([`as_experiment`]) and business-rule checks
//!   ([`validate_condition_count`]) are separate so callers can report the
//!   two failures differently.
//! - All helpers return `ThreePLResult` and never panic.
use std::any::Any;

use crate::irt::{
    core::{
        data::{ConditionCounts, Experiment, ExperimentData},
        params::N_PARAMS,
    },
    errors::{ThreePLError, ThreePLResult},
};

/// An experiment must contain at least one condition.
///
/// Errors
/// ------
/// - `ThreePLError::InvalidArgument` when `n_conditions == 0`.
pub fn validate_condition_count(n_conditions: usize) -> ThreePLResult<()> {
    if n_conditions == 0 {
        return Err(ThreePLError::InvalidArgument {
            reason: "experiment has no conditions".to_string(),
        });
    }
    Ok(())
}

/// Parameter vector must be `[a, q]` with finite entries.
///
/// Errors
/// ------
/// - `ThreePLError::ParamLengthMismatch` when `params.len() != 2`.
/// - `ThreePLError::NumericDomain` for the first non-finite entry.
pub fn validate_parameters(params: &[f64]) -> ThreePLResult<()> {
    if params.len() != N_PARAMS {
        return Err(ThreePLError::ParamLengthMismatch {
            expected: N_PARAMS,
            actual: params.len(),
        });
    }
    for (index, &value) in params.iter().enumerate() {
        if !value.is_finite() {
            return Err(ThreePLError::NumericDomain { index, value });
        }
    }
    Ok(())
}

/// Capability check for untyped input.
///
/// Accepts an [`ExperimentData`] or a `Vec<ConditionCounts>`; anything else
/// is a `CapabilityMismatch` naming `type_name`. Emptiness is not checked.
pub fn as_experiment<'a>(value: &'a dyn Any, type_name: &str) -> ThreePLResult<&'a dyn Experiment> {
    if let Some(data) = value.downcast_ref::<ExperimentData>() {
        return Ok(data);
    }
    if let Some(conditions) = value.downcast_ref::<Vec<ConditionCounts>>() {
        return Ok(conditions);
    }
    Err(ThreePLError::CapabilityMismatch { found: type_name.to_string() })
}
