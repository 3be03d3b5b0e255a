//! Adsorbate property record.

use serde::{Deserialize, Serialize};

use crate::error::{ThermoError, ThermoResult};

pub const DEFAULT_AMANKWAH_EXPONENT: f64 = 3.0;
/// 1/K
pub const DEFAULT_THERMAL_EXPANSION_COEFFICIENT: f64 = 0.001_65;

fn default_amankwah_exponent() -> f64 {
    DEFAULT_AMANKWAH_EXPONENT
}

fn default_thermal_expansion_coefficient() -> f64 {
    DEFAULT_THERMAL_EXPANSION_COEFFICIENT
}

/// Critical and boiling-point data of one adsorbate.
///
/// Units: temperatures in K, pressures in MPa, densities in kg/m^3, molecular
/// mass in g/mol. The record is read once and shared by reference.
///
/// Keys are accepted in lower case or in the upper-case form used by older
/// property files (`PRESSURE_CRITICAL`, `PRSV_KAPPA1`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsorbateProperties {
    #[serde(default, alias = "NAME", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(alias = "MOLECULAR_MASS")]
    pub molecular_mass: f64,
    #[serde(alias = "TEMPERATURE_CRITICAL")]
    pub temperature_critical: f64,
    #[serde(alias = "PRESSURE_CRITICAL")]
    pub pressure_critical: f64,
    #[serde(alias = "ACENTRIC_FACTOR")]
    pub acentric_factor: f64,
    #[serde(alias = "TEMPERATURE_BOILING")]
    pub temperature_boiling: f64,
    #[serde(alias = "DENSITY_BOILING")]
    pub density_boiling: f64,
    #[serde(default, alias = "PRSV_KAPPA1")]
    pub kappa1: f64,
    #[serde(default, alias = "PRSV_KAPPA2")]
    pub kappa2: f64,
    #[serde(default, alias = "PRSV_KAPPA3")]
    pub kappa3: f64,
    #[serde(
        default = "default_thermal_expansion_coefficient",
        alias = "THERMAL_EXPANSION_COEFFICIENT"
    )]
    pub thermal_expansion_coefficient: f64,
    #[serde(default = "default_amankwah_exponent", alias = "AMANKWAH_EXPONENT")]
    pub amankwah_exponent: f64,
}

impl AdsorbateProperties {
    /// Record with the required fields and every optional field at its default.
    pub fn new(
        molecular_mass: f64,
        temperature_critical: f64,
        pressure_critical: f64,
        acentric_factor: f64,
        temperature_boiling: f64,
        density_boiling: f64,
    ) -> Self {
        Self {
            name: None,
            molecular_mass,
            temperature_critical,
            pressure_critical,
            acentric_factor,
            temperature_boiling,
            density_boiling,
            kappa1: 0.0,
            kappa2: 0.0,
            kappa3: 0.0,
            thermal_expansion_coefficient: DEFAULT_THERMAL_EXPANSION_COEFFICIENT,
            amankwah_exponent: DEFAULT_AMANKWAH_EXPONENT,
        }
    }

    pub fn with_kappas(mut self, kappa1: f64, kappa2: f64, kappa3: f64) -> Self {
        self.kappa1 = kappa1;
        self.kappa2 = kappa2;
        self.kappa3 = kappa3;
        self
    }

    /// Parse and validate a JSON properties document.
    pub fn from_json_str(text: &str) -> ThermoResult<Self> {
        let props: Self =
            serde_json::from_str(text).map_err(|e| ThermoError::Properties(e.to_string()))?;
        props.validate()?;
        Ok(props)
    }

    /// Reject records the correlations cannot work with.
    pub fn validate(&self) -> ThermoResult<()> {
        let positive = [
            ("molecular_mass", self.molecular_mass),
            ("temperature_critical", self.temperature_critical),
            ("pressure_critical", self.pressure_critical),
            ("temperature_boiling", self.temperature_boiling),
            ("density_boiling", self.density_boiling),
        ];
        for (what, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ThermoError::invalid(format!(
                    "{what} must be positive and finite, got {value}"
                )));
            }
        }
        let finite = [
            ("acentric_factor", self.acentric_factor),
            ("kappa1", self.kappa1),
            ("kappa2", self.kappa2),
            ("kappa3", self.kappa3),
            ("thermal_expansion_coefficient", self.thermal_expansion_coefficient),
            ("amankwah_exponent", self.amankwah_exponent),
        ];
        for (what, value) in finite {
            if !value.is_finite() {
                return Err(ThermoError::invalid(format!("{what} must be finite, got {value}")));
            }
        }
        if self.temperature_boiling >= self.temperature_critical {
            return Err(ThermoError::invalid(format!(
                "boiling temperature {} K must lie below the critical temperature {} K",
                self.temperature_boiling, self.temperature_critical
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn reduced_temperature(&self, temperature: f64) -> f64 {
        temperature / self.temperature_critical
    }
}
