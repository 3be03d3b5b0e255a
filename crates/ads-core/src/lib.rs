//! ads-core: shared foundation for the adsorption workspace.
//!
//! Contains:
//! - units (uom SI types, working-unit constructors, text parsing, physical constants)
//! - numeric (Real + tolerances + float helpers + sample spacing)
//! - error (shared error taxonomy)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{AdError, AdResult};
pub use numeric::*;
pub use units::*;
