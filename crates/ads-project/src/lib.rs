//! ads-project: run configuration, validation and data files.

pub mod data;
pub mod migrate;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use ads_core::AdError;

pub use data::{format_columns, parse_columns, read_columns, write_columns};
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_run};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Data error in {file} line {line}: {what}")]
    Data {
        file: String,
        line: usize,
        what: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ProjectError> for AdError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::Validation(ValidationError::ParameterMismatch { what, left, right }) => {
                AdError::ParameterMismatch { what, left, right }
            }
            other => AdError::Input {
                what: other.to_string(),
            },
        }
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let mut config: RunConfig = serde_yaml::from_str(&content)?;
    config = migrate_to_latest(config)?;
    validate_run(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &RunConfig) -> ProjectResult<()> {
    validate_run(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let mut config: RunConfig = serde_json::from_str(&content)?;
    config = migrate_to_latest(config)?;
    validate_run(&config)?;
    Ok(config)
}

pub fn save_json(path: &Path, config: &RunConfig) -> ProjectResult<()> {
    validate_run(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load_run(path: &Path) -> ProjectResult<RunConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

/// Resolve `path` against the directory holding the configuration file.
pub fn resolve_path(config_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}
