//! Shared application service layer for the adsorption tools.
//!
//! Turns run configurations into prepared methods, characteristic curves and
//! predictions, and writes the resulting series. The command line is a thin
//! shell over this crate.

pub mod error;
pub mod run_service;
pub mod setup;
pub mod sweep_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use run_service::{RunReport, RunRequest, execute_config, execute_run, mode_for, write_report};
pub use setup::{
    Reference, build_saturation_method, column_factors, load_properties, load_reference,
    parse_density_method,
};
pub use sweep_service::{SweepReport, SweepRequest, run_sweep, write_sweep};
