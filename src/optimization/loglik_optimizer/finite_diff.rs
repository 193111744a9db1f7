//! Finite-difference gradients and Hessians.
//!
//! Used in two places: the argmin adapter falls back to [`run_fd_diff`] for
//! objectives without an analytic gradient, and the inference layer builds
//! observed information from [`compute_hessian`] of the analytic gradient.
//! Both results are validated before they leave this module.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        types::Hessian,
        validation::{validate_grad, validate_hessian},
        Grad, Theta,
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`.
///
/// `func` cannot return a `Result`, so callers route evaluation failures into
/// `closure_err` and return `NaN`. The cell is cleared on entry; anything found
/// there afterwards is returned as the error.
///
/// # Errors
/// - The error captured in `closure_err`, converted to `OptError`.
/// - `GradientDimMismatch` / `InvalidGradient` from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Hessian of `f` at `theta`, where `f` is a gradient function.
///
/// Central differences first. If that matrix fails validation the forward
/// scheme is tried and its validation error (if any) is the one reported.
/// The returned matrix is symmetrized.
///
/// # Errors
/// `HessianDimMismatch` / `InvalidHessian` from the forward-difference pass.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place; the diagonal is untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
