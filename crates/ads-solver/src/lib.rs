//! Numerical solvers shared by the thermodynamic and prediction crates.
//!
//! - A derivative-free scalar Newton iteration (finite-difference slope,
//!   backtracking line search, optional lower bound) used for every
//!   "find x such that f(x) = 0" problem in the workspace.
//! - Least-squares curve fitting: linear (SVD) and Levenberg–Marquardt for
//!   models that are nonlinear in their parameters.

pub mod error;
pub mod jacobian;
pub mod least_squares;
pub mod newton;

pub use error::{SolverError, SolverResult};
pub use least_squares::{CurveFit, LmConfig, fit_linear, levenberg_marquardt, polyfit, polyval};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
