//! L-BFGS solver construction.
//!
//! The builders only configure the solver (history size and tolerances).
//! The starting point and iteration cap are runtime concerns handled in
//! [`run_lbfgs`](crate::optimization::loglik_optimizer::run::run_lbfgs).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
            DEFAULT_LBFGS_MEM,
        },
    },
};

/// L-BFGS with Hager–Zhang line search and the tolerances from `opts`.
///
/// # Errors
/// Any tolerance argmin refuses, converted through `From<argmin::core::Error>`.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// L-BFGS with More–Thuente line search and the tolerances from `opts`.
///
/// # Errors
/// Any tolerance argmin refuses, converted through `From<argmin::core::Error>`.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply `tol_grad` / `tol_cost` to an already built solver, whatever its
/// line search. Absent tolerances keep argmin's defaults.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};

    #[test]
    // Purpose
    // -------
    // Both line-search builders accept default and explicit memory sizes.
    fn builders_accept_default_and_explicit_memory() {
        let tols = Tolerances::new(Some(1e-8), Some(1e-10), Some(500)).unwrap();
        for mem in [None, Some(3), Some(DEFAULT_LBFGS_MEM)] {
            let hz = MLEOptions::new(tols, LineSearcher::HagerZhang, mem).unwrap();
            assert!(build_optimizer_hager_zhang(&hz).is_ok());
            let mt = MLEOptions::new(tols, LineSearcher::MoreThuente, mem).unwrap();
            assert!(build_optimizer_more_thuente(&mt).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` works when only an iteration cap is set.
    fn configure_lbfgs_with_iteration_cap_only() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(1)).unwrap();
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, None).unwrap();
        assert!(configure_lbfgs(raw, &opts).is_ok());
    }
}
