//! Run configuration validation.

use crate::schema::{PredictionDef, ReferenceKind, RunConfig};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Parameter mismatch: {what} ({left} vs {right})")]
    ParameterMismatch {
        what: String,
        left: usize,
        right: usize,
    },

    #[error("Missing value: {field} ({reason})")]
    Missing { field: String, reason: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_run(config: &RunConfig) -> Result<(), ValidationError> {
    if config.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let reference = &config.reference;
    if reference.files.is_empty() {
        return Err(ValidationError::Missing {
            field: "reference.files".to_string(),
            reason: "at least one data file is required".to_string(),
        });
    }
    if reference.kind == ReferenceKind::Isotherm {
        let (files, temps) = (reference.files.len(), reference.temperatures.len());
        if temps == 0 {
            return Err(ValidationError::Missing {
                field: "reference.temperatures".to_string(),
                reason: "isotherm files need their temperatures".to_string(),
            });
        }
        if temps != 1 && temps != files {
            return Err(ValidationError::ParameterMismatch {
                what: "reference files and temperatures".to_string(),
                left: files,
                right: temps,
            });
        }
    }
    for (i, &t) in reference.temperatures.iter().enumerate() {
        validate_positive_finite(&format!("reference.temperatures[{i}]"), t)?;
    }

    if config.saturation.method.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "saturation.method".to_string(),
            reason: "a saturation pressure method is required".to_string(),
        });
    }
    if let Some(guess) = config.saturation.pressure_guess {
        validate_positive_finite("saturation.pressure_guess", guess)?;
    }
    if let Some(points) = config.saturation.points
        && points < 3
    {
        return Err(ValidationError::InvalidValue {
            field: "saturation.points".to_string(),
            value: points.to_string(),
            reason: "the extrapolation grid needs at least 3 points".to_string(),
        });
    }
    if config.density.method.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "density.method".to_string(),
            reason: "a density method is required".to_string(),
        });
    }

    if let Some(enthalpy) = &config.enthalpy {
        validate_positive_finite("enthalpy.temperature", enthalpy.temperature)?;
        if !enthalpy.vaporization.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "enthalpy.vaporization".to_string(),
                value: enthalpy.vaporization.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    if let Some(sweep) = &config.sweep {
        validate_positive_finite("sweep.start", sweep.start)?;
        validate_positive_finite("sweep.end", sweep.end)?;
        validate_points("sweep.points", sweep.points)?;
    }

    for (i, prediction) in config.predictions.iter().enumerate() {
        validate_prediction(i, prediction)?;
    }

    Ok(())
}

fn validate_prediction(index: usize, prediction: &PredictionDef) -> Result<(), ValidationError> {
    let context = format!("predictions[{index}] ({})", prediction.kind.name());
    if prediction.values.is_empty() {
        return Err(ValidationError::Missing {
            field: format!("{context} values"),
            reason: "at least one fixed value is required".to_string(),
        });
    }
    for (j, &v) in prediction.values.iter().enumerate() {
        validate_positive_finite(&format!("{context} values[{j}]"), v)?;
    }
    if let Some([lo, hi]) = prediction.range {
        validate_positive_finite(&format!("{context} range[0]"), lo)?;
        validate_positive_finite(&format!("{context} range[1]"), hi)?;
        if lo >= hi {
            return Err(ValidationError::InvalidValue {
                field: format!("{context} range"),
                value: format!("[{lo}, {hi}]"),
                reason: "lower end must be below upper end".to_string(),
            });
        }
    }
    validate_points(&format!("{context} points"), prediction.points)
}

fn validate_points(field: &str, points: usize) -> Result<(), ValidationError> {
    if points < 2 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: points.to_string(),
            reason: "at least 2 points are required".to_string(),
        });
    }
    Ok(())
}

fn validate_positive_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}
