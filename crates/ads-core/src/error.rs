use thiserror::Error;

pub type AdResult<T> = Result<T, AdError>;

/// Terminal failures surfaced by every computation in the workspace.
///
/// Nothing is retried internally; callers decide whether to try again with
/// a different seed or method.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdError {
    #[error("Unknown method '{name}' (expected one of: {expected})")]
    UnknownMethod { name: String, expected: String },

    #[error("Solver did not converge: {what}")]
    SolverNonConvergence { what: String },

    #[error("Numeric domain violated for {what}: {value}")]
    NumericDomain { what: String, value: f64 },

    #[error("Parameter mismatch: {what} ({left} vs {right})")]
    ParameterMismatch {
        what: String,
        left: usize,
        right: usize,
    },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Input error: {what}")]
    Input { what: String },
}

impl AdError {
    pub fn domain(what: impl Into<String>, value: f64) -> Self {
        Self::NumericDomain {
            what: what.into(),
            value,
        }
    }

    pub fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidArg { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let err = AdError::UnknownMethod {
            name: "antoine".into(),
            expected: "dubinin, amankwah".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("antoine"));
        assert!(msg.contains("dubinin"));

        let err = AdError::domain("Z - B", -0.1);
        assert!(err.to_string().contains("Z - B"));
    }
}
