//! Run configuration schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_POINTS: usize = 50;

fn default_points() -> usize {
    DEFAULT_POINTS
}

fn is_default_points(points: &usize) -> bool {
    *points == DEFAULT_POINTS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub version: u32,
    #[serde(default)]
    pub name: String,
    /// JSON file with the adsorbate properties.
    pub properties: PathBuf,
    pub reference: ReferenceDef,
    pub saturation: SaturationDef,
    pub density: DensityDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enthalpy: Option<EnthalpyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepDef>,
    #[serde(default)]
    pub predictions: Vec<PredictionDef>,
    /// Directory for `.dat` output files; nothing is written when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Columns are pressure and loading, one file per temperature.
    Isotherm,
    /// Columns are adsorption potential and adsorption volume.
    Characteristic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReferenceDef {
    pub kind: ReferenceKind,
    pub files: Vec<PathBuf>,
    /// One per file, or a single value shared by every file.
    #[serde(default)]
    pub temperatures: Vec<f64>,
    #[serde(default)]
    pub units: ColumnUnits,
}

/// Units of the reference data columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnUnits {
    #[serde(default = "ColumnUnits::default_pressure")]
    pub pressure: String,
    #[serde(default = "ColumnUnits::default_loading")]
    pub loading: String,
}

impl ColumnUnits {
    fn default_pressure() -> String {
        "MPa".into()
    }

    fn default_loading() -> String {
        "mg/g".into()
    }
}

impl Default for ColumnUnits {
    fn default() -> Self {
        Self {
            pressure: Self::default_pressure(),
            loading: Self::default_loading(),
        }
    }
}

/// Saturation pressure method and the parameters it reads.
///
/// The method tag stays a string here so that an unknown tag is reported as
/// an unknown method when the run is prepared, not as a schema error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SaturationDef {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_guess: Option<f64>,
    /// Equation of state behind `extrapolated-equation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<String>,
    /// Supercritical regression form of `extrapolated-equation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_parameter: Option<f64>,
    /// Two-column `(T K, Psat MPa)` file for `tabulated-extrapolation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,
    /// Polynomial coefficients (Pa, highest degree first).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DensityDef {
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnthalpyDef {
    /// K
    pub temperature: f64,
    /// Enthalpy of vaporization, kJ/mol.
    pub vaporization: f64,
}

/// Temperature sweep for the saturation pressure and density curves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SweepDef {
    pub start: f64,
    pub end: f64,
    #[serde(default = "default_points", skip_serializing_if = "is_default_points")]
    pub points: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    Isotherm,
    Isobar,
    Isostere,
}

impl PredictionKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Isotherm => "isotherm",
            Self::Isobar => "isobar",
            Self::Isostere => "isostere",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PredictionDef {
    pub kind: PredictionKind,
    /// Fixed temperatures (K), pressures (MPa) or loadings (mg/g).
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(default = "default_points", skip_serializing_if = "is_default_points")]
    pub points: usize,
}
