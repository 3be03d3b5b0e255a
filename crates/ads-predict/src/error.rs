//! Error types for prediction operations.

use ads_core::AdError;
use ads_solver::SolverError;
use ads_thermo::ThermoError;
use thiserror::Error;

pub type PredictResult<T> = Result<T, PredictError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("Numeric domain violated for {what}: {value}")]
    NumericDomain { what: String, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Characteristic curve error: {what}")]
    Curve { what: String },

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

impl PredictError {
    pub(crate) fn domain(what: impl Into<String>, value: f64) -> Self {
        Self::NumericDomain {
            what: what.into(),
            value,
        }
    }

    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidArg { what: what.into() }
    }
}

impl From<AdError> for PredictError {
    fn from(err: AdError) -> Self {
        match err {
            AdError::NumericDomain { what, value } => PredictError::NumericDomain { what, value },
            other => PredictError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

impl From<PredictError> for AdError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::NumericDomain { what, value } => AdError::NumericDomain { what, value },
            PredictError::InvalidArg { what } => AdError::InvalidArg { what },
            PredictError::Curve { what } => AdError::InvalidArg { what },
            PredictError::Thermo(e) => e.into(),
            PredictError::Solver(e) => e.into(),
        }
    }
}
