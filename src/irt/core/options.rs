//! Estimation options for the simplified 3PL model.
//!
//! Purpose
//! -------
//! Bundle everything `fit()` needs beyond the data: optimizer configuration
//! and what to do when the solver stops without converging.
//!
//! Key behaviors
//! -------------
//! - [`ThreePLOptions`] packages already-validated components; it performs no
//!   cross-field checks of its own.
//! - [`ConvergencePolicy`] decides whether a non-converged run is accepted
//!   (`BestEffort`) or reported as an error (`Strict`).
//! - `Default` for [`ThreePLOptions`] uses tighter tolerances than the
//!   generic optimizer default: the 3PL problem is two-dimensional and cheap,
//!   so a small gradient tolerance costs nothing.
//!
//! Testing notes
//! -------------
//! - Unit tests cover defaults and `ConvergencePolicy` parsing. Option
//!   effects on fitting are exercised in the model tests.
use std::str::FromStr;

use crate::{
    irt::errors::ThreePLError,
    optimization::loglik_optimizer::{
        traits::{LineSearcher, MLEOptions, Tolerances},
        DEFAULT_LBFGS_MEM,
    },
};

/// Gradient-norm tolerance used by [`ThreePLOptions::default`].
pub const DEFAULT_TOL_GRAD: f64 = 1e-8;

/// Cost-change tolerance used by [`ThreePLOptions::default`].
pub const DEFAULT_TOL_COST: f64 = 1e-12;

/// Iteration cap used by [`ThreePLOptions::default`].
pub const DEFAULT_MAX_ITER: usize = 500;

/// What `fit()` does when the solver stops without meeting a tolerance.
///
/// Variants
/// --------
/// - `BestEffort`: keep the best parameters reached and mark the fit as
///   non-converged in its diagnostics.
/// - `Strict`: fail with `ThreePLError::OptimizationFailed` and leave the
///   previous fit state in place.
///
/// Parsing accepts `"best_effort"` / `"besteffort"` and `"strict"`, any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConvergencePolicy {
    #[default]
    BestEffort,
    Strict,
}

impl FromStr for ConvergencePolicy {
    type Err = ThreePLError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(|c: char| c == '-' || c == ' ', "_").as_str() {
            "best_effort" | "besteffort" => Ok(ConvergencePolicy::BestEffort),
            "strict" => Ok(ConvergencePolicy::Strict),
            _ => Err(ThreePLError::InvalidConvergencePolicy { name: s.to_string() }),
        }
    }
}

/// `ThreePLOptions`: estimation configuration for `SimplifiedThreePL`.
///
/// Fields
/// ------
/// - `mle_opts`: [`MLEOptions`]
///   L-BFGS configuration (tolerances, line search, memory, verbosity).
/// - `convergence`: [`ConvergencePolicy`]
///   Handling of runs that stop without converging.
///
/// Notes
/// -----
/// - Default: `tol_grad = 1e-8`, `tol_cost = 1e-12`, `max_iter = 500`,
///   More–Thuente, memory 7, `BestEffort`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreePLOptions {
    pub mle_opts: MLEOptions,
    pub convergence: ConvergencePolicy,
}

impl ThreePLOptions {
    pub fn new(mle_opts: MLEOptions, convergence: ConvergencePolicy) -> ThreePLOptions {
        ThreePLOptions { mle_opts, convergence }
    }
}

impl Default for ThreePLOptions {
    fn default() -> Self {
        let mle_opts = MLEOptions {
            tols: Tolerances {
                tol_grad: Some(DEFAULT_TOL_GRAD),
                tol_cost: Some(DEFAULT_TOL_COST),
                max_iter: Some(DEFAULT_MAX_ITER),
            },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: Some(DEFAULT_LBFGS_MEM),
        };
        ThreePLOptions { mle_opts, convergence: ConvergencePolicy::BestEffort }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Defaults match the documented estimation configuration and would pass
    // the optimizer's own validation.
    fn default_options_are_valid_and_documented() {
        let opts = ThreePLOptions::default();
        let tols = opts.mle_opts.tols;

        assert_eq!(tols.tol_grad, Some(1e-8));
        assert_eq!(tols.max_iter, Some(500));
        assert_eq!(opts.mle_opts.line_searcher, LineSearcher::MoreThuente);
        assert_eq!(opts.mle_opts.lbfgs_mem, Some(7));
        assert_eq!(opts.convergence, ConvergencePolicy::BestEffort);
        assert!(Tolerances::new(tols.tol_grad, tols.tol_cost, tols.max_iter).is_ok());
    }

    #[test]
    fn convergence_policy_parses_common_spellings() {
        use ConvergencePolicy::{BestEffort, Strict};

        assert_eq!("strict".parse::<ConvergencePolicy>().unwrap(), Strict);
        assert_eq!("Best_Effort".parse::<ConvergencePolicy>().unwrap(), BestEffort);
        assert_eq!("best-effort".parse::<ConvergencePolicy>().unwrap(), BestEffort);
        assert!(matches!(
            "lenient".parse::<ConvergencePolicy>(),
            Err(ThreePLError::InvalidConvergencePolicy { .. })
        ));
    }
}
