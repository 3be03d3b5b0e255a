//! ads-thermo: thermodynamics of the pure adsorbate.
//!
//! Provides:
//! - The adsorbate property record (critical point, boiling point, shape parameters)
//! - Peng–Robinson, PRSV1 and PRSV2 equation-of-state parameters and fugacity
//! - Compressibility root selection by phase
//! - Saturation pressure methods, from closed-form correlations to
//!   equation-of-state equilibrium and its supercritical extrapolation
//! - Adsorbed-phase density correlations
//!
//! # Example
//!
//! ```no_run
//! use ads_thermo::{AdsorbateProperties, SaturationMethod, SaturationResolver};
//!
//! let co2 = AdsorbateProperties::new(44.01, 304.13, 7.3773, 0.22394, 194.7, 1178.5);
//! let resolver =
//!     SaturationResolver::new(SaturationMethod::PengRobinson { pressure_guess: 1.0 }, &co2)
//!         .unwrap();
//! let psat = resolver.pressure(250.0).unwrap();
//! println!("Saturation pressure: {psat} MPa");
//! ```

pub mod compressibility;
pub mod correlations;
pub mod density;
pub mod eos;
pub mod error;
pub mod extrapolation;
pub mod properties;
pub mod saturation;
pub mod spline;
pub mod sweep;
pub mod table;

// Re-exports for ergonomics
pub use compressibility::{Phase, root_magnitudes, solve_compressibility};
pub use correlations::PolynomialCorrelation;
pub use density::DensityMethod;
pub use eos::{EosParams, EquationOfState};
pub use error::{ThermoError, ThermoResult};
pub use extrapolation::{EquationCurve, ExtrapolatedEquation, Regression, RegressionForm};
pub use properties::AdsorbateProperties;
pub use saturation::{
    SaturationMethod, SaturationMethodKind, SaturationResolver, equation_saturation_pressure,
    fugacity_ratio, solve_saturation_pressure,
};
pub use spline::CubicSpline;
pub use sweep::{PropertyCurve, TemperatureSweep, density_curve, saturation_pressure_curve};
pub use table::SaturationTable;
