//! Error types for the ads-app service layer.

use std::path::PathBuf;

use ads_core::AdError;
use ads_core::units::UnitError;
use ads_predict::PredictError;
use ads_project::{ProjectError, ValidationError};
use ads_thermo::ThermoError;

/// Application error type shared by every frontend.
///
/// Computation failures keep the workspace taxonomy in [`AdError`]; the other
/// variants describe files and configuration.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Computation(#[from] AdError),
}

/// Result type for ads-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::Validation(ValidationError::ParameterMismatch { what, left, right }) => {
                AppError::Computation(AdError::ParameterMismatch { what, left, right })
            }
            ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        ProjectError::from(err).into()
    }
}

impl From<ThermoError> for AppError {
    fn from(err: ThermoError) -> Self {
        AppError::Computation(err.into())
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        AppError::Computation(err.into())
    }
}

impl From<UnitError> for AppError {
    fn from(err: UnitError) -> Self {
        AppError::Computation(err.into())
    }
}
