//! Observed-information covariance and standard errors.
//!
//! Given the gradient of the **negative** log-likelihood, the finite-difference
//! Hessian at `θ̂` is the observed information `I(θ̂)`. Its pseudo-inverse is
//! the classical covariance estimate in optimizer space; standard errors are
//! the square roots of its diagonal.
//!
//! The pseudo-inverse goes through a symmetric eigendecomposition and drops
//! eigenvalues below `EIGEN_EPS · max(λ)`. A flat likelihood ridge (for
//! example a single condition, where discrimination and base rate trade off
//! exactly) therefore produces finite numbers instead of a failed inversion.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Covariance of `θ̂` from observed information.
///
/// `f` must return `∇(-ℓ)(θ)`; its Jacobian at `theta_hat` is taken as
/// `I(θ̂)`.
///
/// # Errors
/// Hessian validation failures from
/// [`compute_hessian`](crate::optimization::loglik_optimizer::finite_diff::compute_hessian).
pub fn calc_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array2<f64>> {
    let obs_info = compute_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(obs_info.nrows(), obs_info.ncols());
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    Ok(pseudo_inverse(obs_info_nalg))
}

/// Standard errors `sqrt(diag(I(θ̂)⁺))` in optimizer space.
///
/// # Errors
/// Same as [`calc_covariance`].
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array1<f64>> {
    let cov = calc_covariance(f, theta_hat)?;
    Ok(cov.diag().mapv(|v| v.max(0.0).sqrt()))
}

// ---- Helper methods ----

fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    for ((i, j), &value) in obs_info.indexed_iter() {
        obs_info_nalg[(i, j)] = value;
    }
}

fn pseudo_inverse(obs_info_nalg: DMatrix<f64>) -> Array2<f64> {
    let n = obs_info_nalg.nrows();
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let lambda_max = eigenvals.iter().cloned().fold(0.0_f64, f64::max);
    let floor = EIGEN_EPS * lambda_max;

    let mut cov = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigenvals.iter().enumerate() {
        if lambda <= floor || lambda <= 0.0 {
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                cov[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    cov
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn fill_dmatrix_copies_entries() {
        let obs_info: Array2<f64> = array![[2.0, 0.5], [0.25, 1.0]];
        let mut obs_info_nalg = DMatrix::<f64>::zeros(2, 2);

        fill_dmatrix(&obs_info, &mut obs_info_nalg);

        assert_eq!(obs_info_nalg[(0, 0)], 2.0);
        assert_eq!(obs_info_nalg[(0, 1)], 0.5);
        assert_eq!(obs_info_nalg[(1, 0)], 0.25);
        assert_eq!(obs_info_nalg[(1, 1)], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // For a quadratic with diagonal information the standard errors are
    // `1 / sqrt(diag)`.
    fn calc_standard_errors_diagonal_quadratic_matches_analytic_se() {
        let a = array![[4.0, 0.0], [0.0, 1.0]];
        let f = |theta: &Array1<f64>| -> Array1<f64> { a.dot(theta) };
        let theta_hat = array![1.0, -1.0];

        let se = calc_standard_errors(&f, &theta_hat).unwrap();

        assert_eq!(se.len(), 2);
        assert!((se[0] - 0.5).abs() < 1e-6);
        assert!((se[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // The covariance of a correlated quadratic is the matrix inverse.
    fn calc_covariance_inverts_full_rank_information() {
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let f = |theta: &Array1<f64>| -> Array1<f64> { a.dot(theta) };

        let cov = calc_covariance(&f, &array![0.0, 0.0]).unwrap();

        // inverse of [[2, 1], [1, 2]] is [[2, -1], [-1, 2]] / 3
        assert!((cov[[0, 0]] - 2.0 / 3.0).abs() < 1e-6);
        assert!((cov[[0, 1]] + 1.0 / 3.0).abs() < 1e-6);
        assert!((cov[[1, 1]] - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A rank-deficient information matrix yields finite errors rather than
    // blowing up.
    fn pseudo_inverse_drops_null_directions() {
        let singular = DMatrix::<f64>::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);

        let cov = pseudo_inverse(singular);

        // pinv of [[1, 1], [1, 1]] is [[1, 1], [1, 1]] / 4
        for v in cov.iter() {
            assert!((v - 0.25).abs() < 1e-10);
        }
    }
}
