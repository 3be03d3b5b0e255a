//! Error types for solver operations.

use ads_core::AdError;
use thiserror::Error;

/// Errors raised by the solvers themselves.
///
/// Failures inside the caller's residual function are not wrapped here; the
/// solvers are generic over the caller's error type and hand those back as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for AdError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ConvergenceFailed { what } | SolverError::Numeric { what } => {
                AdError::SolverNonConvergence { what }
            }
            SolverError::InvalidConfig { what } => AdError::InvalidArg { what },
        }
    }
}
