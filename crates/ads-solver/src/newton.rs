//! Derivative-free scalar Newton solver with backtracking and a lower bound.

use crate::error::SolverError;
use tracing::{debug, trace};

/// Newton solver configuration.
#[derive(Debug, Clone)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance on |f(x)|
    pub abs_tol: f64,
    /// Relative tolerance on the accepted step
    pub step_tol: f64,
    /// Relative finite-difference step for the slope
    pub fd_step: f64,
    /// Iterates must stay strictly above this value
    pub lower_bound: Option<f64>,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-10,
            step_tol: 1e-12,
            fd_step: 1e-7,
            lower_bound: None,
            line_search_beta: 0.5,
            max_line_search_iters: 40,
        }
    }
}

impl NewtonConfig {
    /// Default settings with iterates kept strictly positive.
    pub fn positive() -> Self {
        Self {
            lower_bound: Some(0.0),
            ..Self::default()
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone, Copy)]
pub struct NewtonResult {
    /// Solution
    pub x: f64,
    /// Residual at the solution
    pub residual: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Solve `f(x) = 0` starting from `x0`.
///
/// The slope is a forward difference (backward when the forward point cannot
/// be evaluated). Each Newton step is halved until the residual magnitude
/// drops; trial points below the lower bound or where `f` fails are treated
/// as rejected steps. If every trial point of a line search failed, the last
/// failure from `f` is returned unchanged, so domain errors raised by the
/// residual reach the caller with their original meaning.
pub fn newton_solve<F, E>(x0: f64, mut f: F, config: &NewtonConfig) -> Result<NewtonResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    if !x0.is_finite() {
        return Err(SolverError::InvalidConfig {
            what: format!("initial guess {x0} is not finite"),
        }
        .into());
    }
    if let Some(lb) = config.lower_bound
        && x0 <= lb
    {
        return Err(SolverError::InvalidConfig {
            what: format!("initial guess {x0} is not above the lower bound {lb}"),
        }
        .into());
    }

    let mut x = x0;
    let mut r = f(x)?;

    for iter in 0..config.max_iterations {
        if !r.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("residual is {r} at x = {x}"),
            }
            .into());
        }
        if r.abs() <= config.abs_tol {
            debug!(x, residual = r, iterations = iter, "newton converged");
            return Ok(NewtonResult {
                x,
                residual: r,
                iterations: iter,
            });
        }

        let slope = slope(&mut f, x, r, config)?;
        if slope == 0.0 || !slope.is_finite() {
            return Err(SolverError::ConvergenceFailed {
                what: format!("slope is {slope} at x = {x}"),
            }
            .into());
        }
        let dx = -r / slope;

        let mut alpha = 1.0;
        let mut accepted = None;
        let mut last_err = None;
        for _ in 0..config.max_line_search_iters {
            let x_new = x + alpha * dx;
            let in_bounds = config.lower_bound.is_none_or(|lb| x_new > lb);
            if in_bounds {
                match f(x_new) {
                    Ok(r_new) if r_new.is_finite() && r_new.abs() < r.abs() => {
                        accepted = Some((x_new, r_new, alpha));
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => last_err = Some(e),
                }
            }
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new, alpha)) = accepted else {
            if let Some(e) = last_err {
                return Err(e);
            }
            return Err(SolverError::ConvergenceFailed {
                what: format!(
                    "line search stagnated at iteration {iter} (x = {x}, residual = {r})"
                ),
            }
            .into());
        };

        trace!(iter, x = x_new, residual = r_new, alpha, "newton step");

        let step = (x_new - x).abs();
        x = x_new;
        r = r_new;
        // Only a full Newton step says anything about distance to the root.
        if alpha == 1.0 && step <= config.step_tol * x.abs().max(config.step_tol) {
            debug!(x, residual = r, iterations = iter + 1, "newton step converged");
            return Ok(NewtonResult {
                x,
                residual: r,
                iterations: iter + 1,
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "maximum iterations {} reached, x = {x}, residual = {r}",
            config.max_iterations
        ),
    }
    .into())
}

fn slope<F, E>(f: &mut F, x: f64, r: f64, config: &NewtonConfig) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let h = config.fd_step * x.abs().max(config.fd_step);
    match f(x + h) {
        Ok(r_plus) => Ok((r_plus - r) / h),
        Err(_) => {
            let r_minus = f(x - h)?;
            Ok((r - r_minus) / h)
        }
    }
}
