//! `maximize`: the one entry point models call to fit themselves.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
        OptimOutcome, Theta,
    },
};

/// Maximize `ℓ(θ)` with L-BFGS starting from `theta0`.
///
/// `f.check` vets the starting point, the objective is wrapped so argmin
/// minimizes `-ℓ`, and the line search named in `opts` picks the solver.
///
/// # Errors
/// - Whatever `f.check` rejects.
/// - Tolerances argmin refuses while building the solver.
/// - Runtime failures inside the solver (objective errors, line-search
///   breakdowns), converted to `OptError`.
///
/// # Example
/// ```
/// use ndarray::array;
/// use rust_irt::optimization::errors::OptResult;
/// use rust_irt::optimization::loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta};
///
/// // ℓ(x) = 7·ln σ(x) + 3·ln(1 - σ(x)), maximized at σ(x) = 0.7.
/// struct Accuracy;
/// impl LogLikelihood for Accuracy {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         let p = 1.0 / (1.0 + (-theta[0]).exp());
///         Ok(7.0 * p.ln() + 3.0 * (1.0 - p).ln())
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Accuracy, array![0.0], &(), &MLEOptions::default())?;
/// let p_hat = 1.0 / (1.0 + (-out.theta_hat[0]).exp());
/// assert!((p_hat - 0.7).abs() < 1e-4);
/// # Ok::<(), rust_irt::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
