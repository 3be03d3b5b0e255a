//! Schema migration framework.

use crate::ProjectError;
use crate::schema::RunConfig;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut config: RunConfig) -> Result<RunConfig, ProjectError> {
    while config.version < LATEST_VERSION {
        config = migrate_one_version(config)?;
    }
    Ok(config)
}

fn migrate_one_version(config: RunConfig) -> Result<RunConfig, ProjectError> {
    match config.version {
        0 => migrate_v0_to_v1(config),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files used `ozawa` for the correlation with the adsorbate's own
/// expansion coefficient, which version 1 calls `ozawa-modified`.
fn migrate_v0_to_v1(mut config: RunConfig) -> Result<RunConfig, ProjectError> {
    if config.density.method.trim().eq_ignore_ascii_case("ozawa") {
        config.density.method = "ozawa-modified".to_string();
    }
    config.version = 1;
    Ok(config)
}
