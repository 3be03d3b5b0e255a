//! Thermodynamic property errors.

use ads_core::AdError;
use ads_solver::SolverError;
use thiserror::Error;

/// Result type for thermodynamic operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors that can occur while evaluating the equation of state, saturation
/// pressures or adsorbate densities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Method tag not recognised.
    #[error("Unknown {family} '{name}' (expected one of: {expected})")]
    UnknownMethod {
        family: &'static str,
        name: String,
        expected: &'static str,
    },

    /// Logarithm/exponent argument or physical value outside its domain.
    #[error("Numeric domain violated for {what}: {value}")]
    NumericDomain { what: String, value: f64 },

    /// Invalid argument or property record.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Root finding or curve fitting failed.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Malformed properties document.
    #[error("Properties parse error: {0}")]
    Properties(String),
}

impl ThermoError {
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

impl From<AdError> for ThermoError {
    fn from(err: AdError) -> Self {
        match err {
            AdError::NumericDomain { what, value } => ThermoError::NumericDomain { what, value },
            other => ThermoError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

impl From<ThermoError> for AdError {
    fn from(err: ThermoError) -> Self {
        match err {
            ThermoError::UnknownMethod { name, expected, .. } => AdError::UnknownMethod {
                name,
                expected: expected.to_string(),
            },
            ThermoError::NumericDomain { what, value } => AdError::NumericDomain { what, value },
            ThermoError::InvalidArg { what } => AdError::InvalidArg { what },
            ThermoError::Solver(e) => e.into(),
            ThermoError::Properties(what) => AdError::Input { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThermoError::domain("Z - B", -1e-3);
        assert!(err.to_string().contains("Z - B"));
    }

    #[test]
    fn error_to_ad_error() {
        let err: AdError = ThermoError::Solver(SolverError::ConvergenceFailed {
            what: "fugacity balance".into(),
        })
        .into();
        assert!(matches!(err, AdError::SolverNonConvergence { .. }));

        let err: AdError = ThermoError::UnknownMethod {
            family: "saturation pressure method",
            name: "antoine".into(),
            expected: "dubinin",
        }
        .into();
        assert!(matches!(err, AdError::UnknownMethod { ref name, .. } if name == "antoine"));
    }
}
