//! irt: simplified three-parameter logistic item-response model.
//!
//! Purpose
//! -------
//! Estimate how sharply accuracy rises across five difficulty levels
//! (discrimination `a`) and the guessing floor (base rate `c`) for a single
//! person of fixed ability, from per-condition counts of correct and
//! incorrect trials.
//!
//! Key behaviors
//! -------------
//! - [`core`]: experiment / condition capability traits and an owned carrier,
//!   estimation options, fit state and validation.
//! - [`models`]: the [`SimplifiedThreePL`] model and its likelihood math.
//! - [`errors`]: [`ThreePLError`] / [`ThreePLResult`], the error surface of
//!   the whole stack.
//!
//! Conventions
//! -----------
//! - `p = c + (1 - c)·σ(a(θ - b))` with `θ = 0`, `b = [2, 1, 0, -1, -2][i]`
//!   and `c = σ(q)`.
//! - The stack does no I/O and no logging; the optimizer may print progress
//!   behind the `obs_slog` feature.
//! - Errors are values; panics indicate programming errors only.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports -------------------------------------------------------------

pub use self::core::{
    data::{Condition, ConditionCounts, Experiment, ExperimentData, ExperimentSummary},
    options::{ConvergencePolicy, ThreePLOptions},
    params::{FitState, FittedParams, StandardErrors},
};
pub use self::errors::{ThreePLError, ThreePLResult};
pub use self::models::{DynThreePL, SimplifiedThreePL};

pub mod prelude {
    pub use super::core::data::{Condition, ConditionCounts, Experiment, ExperimentData};
    pub use super::core::options::{ConvergencePolicy, ThreePLOptions};
    pub use super::errors::{ThreePLError, ThreePLResult};
    pub use super::models::prelude::*;
}
