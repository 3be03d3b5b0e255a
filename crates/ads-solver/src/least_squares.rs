//! Least-squares curve fitting.
//!
//! `fit_linear` solves an overdetermined linear system through the SVD;
//! `levenberg_marquardt` handles models that are nonlinear in their
//! parameters using a central-difference Jacobian.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::central_difference_jacobian;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

/// Fitted parameters and the quality of the fit on its own data.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit {
    pub params: Vec<f64>,
    /// Largest |model(x_i) - y_i| over the fitted samples.
    pub max_residual: f64,
    pub iterations: usize,
}

/// Least-squares solution of `design * p ≈ y`.
pub fn fit_linear(design: &DMatrix<f64>, y: &DVector<f64>) -> SolverResult<DVector<f64>> {
    if design.nrows() != y.len() {
        return Err(SolverError::InvalidConfig {
            what: format!(
                "design matrix has {} rows but {} observations",
                design.nrows(),
                y.len()
            ),
        });
    }
    if design.nrows() < design.ncols() {
        return Err(SolverError::InvalidConfig {
            what: format!(
                "{} observations cannot determine {} parameters",
                design.nrows(),
                design.ncols()
            ),
        });
    }

    design
        .clone()
        .svd(true, true)
        .solve(y, 1e-12)
        .map_err(|e| SolverError::Numeric {
            what: format!("least-squares solve failed: {e}"),
        })
}

/// Polynomial least-squares fit. Coefficients are returned highest degree first.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> SolverResult<Vec<f64>> {
    check_samples(x, y)?;
    let design = DMatrix::from_fn(x.len(), degree + 1, |i, j| x[i].powi((degree - j) as i32));
    let p = fit_linear(&design, &DVector::from_column_slice(y))?;
    Ok(p.iter().copied().collect())
}

/// Evaluate a polynomial with coefficients highest degree first.
pub fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}

/// Levenberg–Marquardt configuration.
#[derive(Debug, Clone)]
pub struct LmConfig {
    pub max_iterations: usize,
    /// Stop when the relative decrease of the cost falls below this
    pub cost_tol: f64,
    /// Stop when the relative parameter step falls below this
    pub step_tol: f64,
    pub initial_lambda: f64,
    pub fd_step: f64,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            cost_tol: 1e-14,
            step_tol: 1e-12,
            initial_lambda: 1e-3,
            fd_step: 1e-6,
        }
    }
}

/// Fit `model(x, params)` to the samples by nonlinear least squares.
pub fn levenberg_marquardt<M>(
    x: &[f64],
    y: &[f64],
    initial: &[f64],
    model: M,
    config: &LmConfig,
) -> SolverResult<CurveFit>
where
    M: Fn(f64, &[f64]) -> f64,
{
    check_samples(x, y)?;
    if x.len() < initial.len() {
        return Err(SolverError::InvalidConfig {
            what: format!(
                "{} samples cannot determine {} parameters",
                x.len(),
                initial.len()
            ),
        });
    }

    let residuals = |p: &DVector<f64>| -> SolverResult<DVector<f64>> {
        let r = DVector::from_iterator(
            x.len(),
            x.iter().zip(y).map(|(xi, yi)| model(*xi, p.as_slice()) - yi),
        );
        if r.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::Numeric {
                what: "model produced a non-finite value".into(),
            });
        }
        Ok(r)
    };

    let mut p = DVector::from_column_slice(initial);
    let mut r = residuals(&p)?;
    let mut cost = r.norm_squared();
    let mut lambda = config.initial_lambda;

    for iter in 0..config.max_iterations {
        let jac = central_difference_jacobian(&p, &residuals, config.fd_step)?;
        let jt = jac.transpose();
        let jtj = &jt * &jac;
        let gradient = &jt * &r;

        // Retry with heavier damping until the cost drops.
        let mut improved = None;
        while lambda < 1e16 {
            let mut lhs = jtj.clone();
            for i in 0..lhs.nrows() {
                lhs[(i, i)] += lambda * jtj[(i, i)].max(1e-12);
            }
            let Some(step) = lhs.lu().solve(&(-&gradient)) else {
                lambda *= 10.0;
                continue;
            };
            let trial = &p + &step;
            match residuals(&trial) {
                Ok(r_trial) if r_trial.norm_squared() < cost => {
                    improved = Some((trial, r_trial, step));
                    break;
                }
                _ => lambda *= 10.0,
            }
        }

        let Some((trial, r_trial, step)) = improved else {
            // No descent direction left: the current point is the minimum
            // reachable at working precision.
            debug!(iterations = iter, cost, "levenberg-marquardt stalled at minimum");
            return Ok(finish(p, &r, iter));
        };

        let new_cost = r_trial.norm_squared();
        let rel_decrease = (cost - new_cost) / cost.max(f64::MIN_POSITIVE);
        let rel_step = step.norm() / (p.norm() + config.step_tol);
        trace!(iter, cost = new_cost, lambda, "levenberg-marquardt step");

        p = trial;
        r = r_trial;
        cost = new_cost;
        lambda = (lambda / 10.0).max(1e-12);

        if rel_decrease < config.cost_tol || rel_step < config.step_tol || cost == 0.0 {
            debug!(iterations = iter + 1, cost, "levenberg-marquardt converged");
            return Ok(finish(p, &r, iter + 1));
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "curve fit did not settle in {} iterations (cost = {cost})",
            config.max_iterations
        ),
    })
}

fn finish(p: DVector<f64>, r: &DVector<f64>, iterations: usize) -> CurveFit {
    CurveFit {
        params: p.iter().copied().collect(),
        max_residual: r.amax(),
        iterations,
    }
}

fn check_samples(x: &[f64], y: &[f64]) -> SolverResult<()> {
    if x.len() != y.len() {
        return Err(SolverError::InvalidConfig {
            what: format!("{} abscissae but {} ordinates", x.len(), y.len()),
        });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(SolverError::Numeric {
            what: "non-finite sample".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyfit_recovers_exact_quadratic() {
        let x: Vec<f64> = (0..10).map(|i| 200.0 + 10.0 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|t| 2e-4 * t * t - 0.05 * t + 3.0).collect();
        let c = polyfit(&x, &y, 2).unwrap();
        for (t, expected) in x.iter().zip(&y) {
            assert!((polyval(&c, *t) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn polyval_horner() {
        assert_eq!(polyval(&[1.0, -2.0, 3.0], 2.0), 3.0);
        assert_eq!(polyval(&[], 2.0), 0.0);
    }

    #[test]
    fn lm_fits_power_law() {
        let x: Vec<f64> = (0..30).map(|i| 0.6 + 0.4 * i as f64 / 29.0).collect();
        let y: Vec<f64> = x.iter().map(|r| 7.0 * r.powf(5.5) - 0.2).collect();
        let fit = levenberg_marquardt(
            &x,
            &y,
            &[5.0, 3.0, 0.0],
            |r, p| p[0] * r.powf(p[1]) + p[2],
            &LmConfig::default(),
        )
        .unwrap();
        assert!((fit.params[0] - 7.0).abs() < 1e-5);
        assert!((fit.params[1] - 5.5).abs() < 1e-5);
        assert!((fit.params[2] + 0.2).abs() < 1e-5);
        assert!(fit.max_residual < 1e-7);
    }

    #[test]
    fn too_few_samples_is_rejected() {
        let err = levenberg_marquardt(
            &[1.0],
            &[2.0],
            &[1.0, 1.0],
            |x, p| p[0] * x + p[1],
            &LmConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::InvalidConfig { .. }));
    }
}
