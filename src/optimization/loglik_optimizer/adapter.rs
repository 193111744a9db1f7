//! Bridge from [`LogLikelihood`] to argmin's `CostFunction` / `Gradient`.
//!
//! argmin minimizes, so the adapter exposes `c(θ) = -ℓ(θ)` and `-∇ℓ(θ)`.
//! Objectives without an analytic gradient get a finite-difference gradient
//! of the cost itself, which needs no sign flip. Models in this crate supply
//! `grad`; the fallback serves caller-defined `LogLikelihood` impls.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// A borrowed objective plus its data, seen by argmin as a cost problem.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// `-ℓ(θ)`; a non-finite `ℓ` is reported as `NonFiniteCost`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// `-∇ℓ(θ)` when the objective supplies one.
    ///
    /// On `GradientNotImplemented`, central differences of the cost are tried
    /// first; a failed cost evaluation or a non-finite result triggers one
    /// forward-difference retry. Any other objective error is returned as is.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_none() && validate_grad(&fd_grad, dim).is_ok() {
                    return Ok(fd_grad);
                }
                Ok(run_fd_diff(theta, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    /// Bernoulli log-likelihood in logit space: `n_c·ln σ(x) + n_i·ln(1-σ(x))`.
    struct LogitBernoulli {
        analytic: bool,
    }

    impl LogLikelihood for LogitBernoulli {
        type Data = (f64, f64);

        fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
            let p = 1.0 / (1.0 + (-theta[0]).exp());
            Ok(data.0 * p.ln() + data.1 * (1.0 - p).ln())
        }

        fn check(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
            if !self.analytic {
                return Err(OptError::GradientNotImplemented);
            }
            let p = 1.0 / (1.0 + (-theta[0]).exp());
            Ok(array![data.0 - (data.0 + data.1) * p])
        }
    }

    #[test]
    // Purpose
    // -------
    // The cost is the negated log-likelihood and the analytic gradient is
    // negated with it.
    fn adapter_flips_value_and_analytic_gradient() {
        let model = LogitBernoulli { analytic: true };
        let data = (8.0, 2.0);
        let adapter = ArgMinAdapter::new(&model, &data);
        let theta = array![0.0];

        let cost = adapter.cost(&theta).unwrap();
        let grad = adapter.gradient(&theta).unwrap();

        assert!((cost - 10.0 * std::f64::consts::LN_2).abs() < 1e-12);
        // ∇ℓ(0) = 8 - 10·0.5 = 3
        assert!((grad[0] + 3.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient the finite-difference path agrees with the
    // closed form.
    fn adapter_falls_back_to_finite_differences() {
        let analytic = LogitBernoulli { analytic: true };
        let numeric = LogitBernoulli { analytic: false };
        let data = (3.0, 5.0);
        let theta = array![0.7];

        let g_exact = ArgMinAdapter::new(&analytic, &data).gradient(&theta).unwrap();
        let g_fd = ArgMinAdapter::new(&numeric, &data).gradient(&theta).unwrap();

        assert!((g_exact[0] - g_fd[0]).abs() < 1e-6);
    }
}
