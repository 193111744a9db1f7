//! Simplified 3PL model: one person of fixed ability, five fixed difficulties.
//!
//! This module wires the simplified three-parameter logistic model to the
//! `LogLikelihood` trait. The only free parameters are the discrimination `a`
//! and the logit of the base rate `q`; ability is pinned at `0` and condition
//! `i` gets difficulty `[2, 1, 0, -1, -2][i]`.
//!
//! Key ideas:
//! - The optimizer works in `θ = [a, q]`, both unconstrained; `c = σ(q)`
//!   keeps the base rate in `(0, 1)` without bounds.
//! - Counts are snapshotted into a [`ResponseTable`] once per fit, so the
//!   experiment is read but never mutated.
//! - The gradient is analytic; observed information for standard errors is a
//!   finite-difference Jacobian of that gradient.
//! - Estimation state is a [`FitState`]: accessors on an unfit model return
//!   `ThreePLError::InvalidState` instead of stale or default numbers.
use std::any::{type_name, Any};

use crate::{
    inference::hessian::calc_standard_errors,
    irt::{
        core::{
            data::{Experiment, ExperimentSummary},
            options::{ConvergencePolicy, ThreePLOptions},
            params::{FitState, FittedModel, FittedParams, StandardErrors, N_PARAMS},
            validation::{as_experiment, validate_condition_count, validate_parameters},
        },
        errors::{ThreePLError, ThreePLResult},
        models::model_internals::{
            likelihood_driver, likelihood_grad, predict_probabilities, ResponseTable,
            DEFAULT_ABILITY, DEFAULT_DIFFICULTIES,
        },
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{maximize, Grad, LogLikelihood, OptimOutcome, Theta},
    },
};
use ndarray::{Array1, ArrayView1};

/// Simplified 3PL model over an experiment `E`.
///
/// `E` is anything implementing [`Experiment`]: an owned
/// [`ExperimentData`](crate::irt::core::data::ExperimentData), a
/// `Vec` of caller-defined conditions, or a borrowed `&T`.
///
/// # Notes
/// - `default_difficulties` and `ability` are fixed at construction and never
///   change for the lifetime of the instance.
/// - Only the first `min(n, 5)` conditions participate in estimation; the
///   rest are ignored silently ([`Self::condition_limit`] reports the count
///   actually used).
/// - Repeated `fit` calls on the same data give the same estimates.
#[derive(Debug, Clone)]
pub struct SimplifiedThreePL<E: Experiment> {
    experiment: E,
    default_difficulties: [f64; 5],
    ability: f64,
    options: ThreePLOptions,
    fit_state: FitState,
}

impl<E: Experiment> SimplifiedThreePL<E> {
    /// Construct an unfit model with default [`ThreePLOptions`].
    ///
    /// # Errors
    /// - [`ThreePLError::InvalidArgument`] if the experiment has no conditions.
    pub fn new(experiment: E) -> ThreePLResult<Self> {
        Self::with_options(experiment, ThreePLOptions::default())
    }

    /// Construct an unfit model with explicit estimation options.
    ///
    /// # Errors
    /// - [`ThreePLError::InvalidArgument`] if the experiment has no conditions.
    pub fn with_options(experiment: E, options: ThreePLOptions) -> ThreePLResult<Self> {
        validate_condition_count(experiment.condition_count())?;
        Ok(SimplifiedThreePL {
            experiment,
            default_difficulties: DEFAULT_DIFFICULTIES,
            ability: DEFAULT_ABILITY,
            options,
            fit_state: FitState::Unfit,
        })
    }

    /// Aggregate counts over all conditions, including any past the fifth.
    pub fn summary(&self) -> ExperimentSummary {
        ExperimentSummary::from_experiment(&self.experiment)
    }

    /// Probability of a correct response for each condition in use.
    ///
    /// # Arguments
    /// - `parameters`: `[a, q]`; no fit is required.
    ///
    /// # Returns
    /// - Length `min(n, 5)` array, entry `i` paired with difficulty `i`.
    ///
    /// # Errors
    /// - [`ThreePLError::ParamLengthMismatch`] if `parameters.len() != 2`.
    /// - [`ThreePLError::NumericDomain`] if an entry is non-finite.
    pub fn predict(&self, parameters: &[f64]) -> ThreePLResult<Array1<f64>> {
        validate_parameters(parameters)?;
        let difficulties = ArrayView1::from(self.difficulties_in_use());
        Ok(predict_probabilities(difficulties, self.ability, parameters[0], parameters[1]))
    }

    /// Negative log-likelihood `-ℓ(a, q)` over the conditions in use.
    ///
    /// Evaluated in log space, so the result stays finite and keeps its slope
    /// where a predicted probability rounds to 0 or 1.
    ///
    /// # Errors
    /// - Same as [`Self::predict`].
    pub fn negative_log_likelihood(&self, parameters: &[f64]) -> ThreePLResult<f64> {
        validate_parameters(parameters)?;
        let table = self.response_table();
        Ok(-likelihood_driver(&table, self.ability, parameters[0], parameters[1]))
    }

    /// Estimate `(a, q)` by maximum likelihood starting from `[0, 0]`.
    ///
    /// ## Steps
    /// 1. Snapshot the conditions in use into a [`ResponseTable`].
    /// 2. Run L-BFGS per `options.mle_opts` on `ℓ(θ)` with its analytic gradient.
    /// 3. Under [`ConvergencePolicy::Strict`], reject a non-converged run.
    /// 4. Map `theta_hat` to [`FittedParams`] and store it with the optimizer
    ///    outcome, replacing any earlier fit.
    ///
    /// ## Errors
    /// - [`ThreePLError::Optimization`] for solver configuration or runtime
    ///   failures.
    /// - [`ThreePLError::OptimizationFailed`] under `Strict` when the solver
    ///   stopped without converging.
    ///
    /// On error the previous fit state is left untouched.
    pub fn fit(&mut self) -> ThreePLResult<()> {
        let table = self.response_table();
        let theta0 = Array1::<f64>::zeros(N_PARAMS);
        let outcome = maximize(&*self, theta0, &table, &self.options.mle_opts)?;
        if !outcome.converged && self.options.convergence == ConvergencePolicy::Strict {
            return Err(ThreePLError::OptimizationFailed { status: outcome.status });
        }
        let params = FittedParams::from_theta(outcome.theta_hat.view())?;
        self.fit_state = FitState::Fit(FittedModel { params, outcome });
        Ok(())
    }

    /// Fitted discrimination `a`.
    ///
    /// # Errors
    /// - [`ThreePLError::InvalidState`] before a successful `fit`.
    pub fn get_discrimination(&self) -> ThreePLResult<f64> {
        Ok(self.fit_state.params()?.discrimination)
    }

    /// Fitted base rate `c = σ(q)`, in `(0, 1)`.
    ///
    /// # Errors
    /// - [`ThreePLError::InvalidState`] before a successful `fit`.
    pub fn get_base_rate(&self) -> ThreePLResult<f64> {
        Ok(self.fit_state.params()?.base_rate)
    }

    /// Fitted logit base rate `q`.
    ///
    /// # Errors
    /// - [`ThreePLError::InvalidState`] before a successful `fit`.
    pub fn get_logit_base_rate(&self) -> ThreePLResult<f64> {
        Ok(self.fit_state.params()?.logit_base_rate)
    }

    /// Standard errors of the fitted parameters from observed information.
    ///
    /// The Hessian of `-ℓ` at `θ̂` is a finite-difference Jacobian of the
    /// analytic gradient; `se(c)` follows from `se(q)` by the delta method.
    /// Directions along which the likelihood is flat (a single condition
    /// cannot separate `a` from `c`) are dropped from the pseudo-inverse, so
    /// the corresponding errors come out as `0` rather than failing.
    ///
    /// # Errors
    /// - [`ThreePLError::InvalidState`] before a successful `fit`.
    /// - [`ThreePLError::Optimization`] if the Hessian is not finite.
    pub fn standard_errors(&self) -> ThreePLResult<StandardErrors> {
        let params = *self.fit_state.params()?;
        let table = self.response_table();
        let ability = self.ability;
        let neg_grad = |theta: &Array1<f64>| -likelihood_grad(&table, ability, theta[0], theta[1]);
        let theta_hat = Array1::from(params.to_theta().to_vec());
        let se = calc_standard_errors(&neg_grad, &theta_hat)?;
        let c = params.base_rate;
        Ok(StandardErrors {
            discrimination: se[0],
            logit_base_rate: se[1],
            base_rate: c * (1.0 - c) * se[1],
        })
    }

    pub fn is_fitted(&self) -> bool {
        self.fit_state.is_fit()
    }

    pub fn default_difficulties(&self) -> [f64; 5] {
        self.default_difficulties
    }

    pub fn ability(&self) -> f64 {
        self.ability
    }

    /// Number of conditions that enter estimation: `min(n, 5)`.
    pub fn condition_limit(&self) -> usize {
        self.experiment.condition_count().min(self.default_difficulties.len())
    }

    /// Fitted parameter triple.
    ///
    /// # Errors
    /// - [`ThreePLError::InvalidState`] before a successful `fit`.
    pub fn fitted_params(&self) -> ThreePLResult<FittedParams> {
        Ok(*self.fit_state.params()?)
    }

    /// Diagnostics of the run that produced the current fit.
    ///
    /// # Errors
    /// - [`ThreePLError::InvalidState`] before a successful `fit`.
    pub fn optim_outcome(&self) -> ThreePLResult<&OptimOutcome> {
        Ok(&self.fit_state.fitted()?.outcome)
    }

    pub fn options(&self) -> &ThreePLOptions {
        &self.options
    }

    pub fn experiment(&self) -> &E {
        &self.experiment
    }

    pub fn fit_state(&self) -> &FitState {
        &self.fit_state
    }

    // ---- Helper methods ----

    fn difficulties_in_use(&self) -> &[f64] {
        &self.default_difficulties[..self.condition_limit()]
    }

    fn response_table(&self) -> ResponseTable {
        ResponseTable::from_experiment(&self.experiment, &self.default_difficulties)
    }
}

/// Model over a type-erased experiment, as built by [`SimplifiedThreePL::from_any`].
pub type DynThreePL<'a> = SimplifiedThreePL<&'a dyn Experiment>;

impl<'a> DynThreePL<'a> {
    /// Construct from a value of unknown type.
    ///
    /// Two separate checks run in order:
    /// 1. capability: `value` must be a known experiment carrier
    ///    ([`ExperimentData`](crate::irt::core::data::ExperimentData) or
    ///    `Vec<ConditionCounts>`);
    /// 2. business rule: the experiment must have at least one condition.
    ///
    /// # Errors
    /// - [`ThreePLError::CapabilityMismatch`] naming `T` when step 1 fails.
    /// - [`ThreePLError::InvalidArgument`] when step 2 fails.
    pub fn from_any<T: Any>(value: &'a T) -> ThreePLResult<Self> {
        Self::from_any_with_options(value, ThreePLOptions::default())
    }

    /// [`Self::from_any`] with explicit options.
    pub fn from_any_with_options<T: Any>(
        value: &'a T, options: ThreePLOptions,
    ) -> ThreePLResult<Self> {
        let experiment = as_experiment(value, type_name::<T>())?;
        Self::with_options(experiment, options)
    }
}

impl<E: Experiment> LogLikelihood for SimplifiedThreePL<E> {
    type Data = ResponseTable;

    /// Log-likelihood `ℓ(θ)` at `θ = [a, q]`.
    ///
    /// # Errors
    /// - `θ` of the wrong length or with non-finite entries.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        validate_parameters(&theta.to_vec())?;
        Ok(likelihood_driver(data, self.ability, theta[0], theta[1]))
    }

    /// Validate `θ` (length 2, finite entries).
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_parameters(&theta.to_vec())?;
        Ok(())
    }

    /// Analytic gradient `[∂ℓ/∂a, ∂ℓ/∂q]`.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        validate_parameters(&theta.to_vec())?;
        Ok(likelihood_grad(data, self.ability, theta[0], theta[1]))
    }
}
