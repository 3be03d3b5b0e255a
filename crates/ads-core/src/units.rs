// ads-core/src/units.rs
//
// Computations run on bare f64 in fixed working units: K, MPa, kg/m^3,
// kJ/mol, mg/g and ml/g. uom is the boundary layer: it types values handed
// in from outside and performs the unit conversions.

use std::fmt;

use thiserror::Error;
use uom::si::f64::{
    MassDensity as UomMassDensity, MolarEnergy as UomMolarEnergy, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};
use uom::si::mass_density::{gram_per_cubic_centimeter, kilogram_per_cubic_meter};
use uom::si::molar_energy::{joule_per_mole, kilojoule_per_mole};
use uom::si::pressure::{atmosphere, bar, kilopascal, megapascal, pascal, torr};
use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};

use crate::AdError;

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type MolarEnergy = UomMolarEnergy;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn mpa(v: f64) -> Pressure {
    Pressure::new::<megapascal>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn kj_per_mol(v: f64) -> MolarEnergy {
    MolarEnergy::new::<kilojoule_per_mole>(v)
}

/// Working-unit value of a typed temperature (K).
#[inline]
pub fn to_kelvin(t: Temperature) -> f64 {
    t.get::<kelvin>()
}

/// Working-unit value of a typed pressure (MPa).
#[inline]
pub fn to_mpa(p: Pressure) -> f64 {
    p.get::<megapascal>()
}

pub mod constants {
    /// Universal gas constant, J/(mol·K). Used by the equation of state and
    /// the potential transform.
    pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.314_46;

    /// Gas constant in cm^3·MPa/(mol·K). Used only by the empirical
    /// adsorbate density correlation.
    pub const GAS_CONSTANT: f64 = 8.205;
}

/// Quantity family accepted on text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (working unit: K)
    Temperature,
    /// Absolute pressure (working unit: MPa)
    Pressure,
    /// Density (working unit: kg/m^3)
    Density,
    /// Adsorption potential (working unit: kJ/mol)
    Potential,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Pressure => write!(f, "pressure"),
            Self::Density => write!(f, "density"),
            Self::Potential => write!(f, "adsorption potential"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

impl From<UnitError> for AdError {
    fn from(err: UnitError) -> Self {
        AdError::Input {
            what: err.to_string(),
        }
    }
}

/// Parse a value with an optional unit suffix into working units.
///
/// A bare number is taken to already be in the working unit of `quantity`.
///
/// ```
/// use ads_core::units::{parse_quantity, Quantity};
///
/// let t = parse_quantity("25C", Quantity::Temperature).unwrap();
/// assert!((t - 298.15).abs() < 1e-9);
/// let p = parse_quantity("500 kPa", Quantity::Pressure).unwrap();
/// assert!((p - 0.5).abs() < 1e-12);
/// ```
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    let unit = unit.to_lowercase();
    let unknown = || UnitError::UnknownUnit {
        unit: unit.clone(),
        quantity,
    };

    match quantity {
        Quantity::Temperature => {
            let t = match unit.as_str() {
                "" | "k" | "kelvin" => k(value),
                "c" | "°c" | "celsius" => Temperature::new::<degree_celsius>(value),
                "f" | "°f" | "fahrenheit" => Temperature::new::<degree_fahrenheit>(value),
                _ => return Err(unknown()),
            };
            let t_k = to_kelvin(t);
            if t_k <= 0.0 {
                return Err(UnitError::OutOfRange {
                    value: t_k,
                    reason: "absolute temperature must be > 0 K",
                });
            }
            Ok(t_k)
        }
        Quantity::Pressure => {
            let p = match unit.as_str() {
                "" | "mpa" => mpa(value),
                "pa" => Pressure::new::<pascal>(value),
                "kpa" => Pressure::new::<kilopascal>(value),
                "bar" => Pressure::new::<bar>(value),
                "atm" => Pressure::new::<atmosphere>(value),
                "torr" => Pressure::new::<torr>(value),
                _ => return Err(unknown()),
            };
            let mpa = to_mpa(p);
            if mpa <= 0.0 {
                return Err(UnitError::OutOfRange {
                    value: mpa,
                    reason: "absolute pressure must be positive",
                });
            }
            Ok(mpa)
        }
        Quantity::Density => {
            let rho = match unit.as_str() {
                "" | "kg/m3" | "kg/m^3" | "kg/m³" => kg_per_m3(value),
                // g/L and kg/m^3 are the same unit
                "g/l" => kg_per_m3(value),
                "g/cm3" | "g/cm^3" | "g/cm³" | "g/ml" => {
                    Density::new::<gram_per_cubic_centimeter>(value)
                }
                _ => return Err(unknown()),
            };
            let rho = rho.get::<kilogram_per_cubic_meter>();
            if rho <= 0.0 {
                return Err(UnitError::OutOfRange {
                    value: rho,
                    reason: "density must be positive",
                });
            }
            Ok(rho)
        }
        Quantity::Potential => {
            let a = match unit.as_str() {
                "" | "kj/mol" => kj_per_mol(value),
                "j/mol" => MolarEnergy::new::<joule_per_mole>(value),
                _ => return Err(unknown()),
            };
            Ok(a.get::<kilojoule_per_mole>())
        }
    }
}

fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // The numeric part ends at the first character that cannot continue a
    // float literal. An exponent marker only counts when a digit or sign follows.
    let bytes = trimmed.as_bytes();
    let mut split_idx = trimmed.len();
    for (i, c) in trimmed.char_indices() {
        let numeric = match c {
            '0'..='9' | '.' | '+' | '-' => true,
            'e' | 'E' => bytes
                .get(i + 1)
                .is_some_and(|n| n.is_ascii_digit() || *n == b'-' || *n == b'+'),
            _ => false,
        };
        if !numeric {
            split_idx = i;
            break;
        }
    }

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::Parse(format!("could not parse numeric value from '{input}'"))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        assert!((to_kelvin(k(300.0)) - 300.0).abs() < 1e-12);
        assert!((to_mpa(mpa(7.3773)) - 7.3773).abs() < 1e-12);
        let _rho = kg_per_m3(900.0);
        let _a = kj_per_mol(12.0);
    }

    #[test]
    fn gas_constants_stay_distinct() {
        assert_eq!(constants::UNIVERSAL_GAS_CONSTANT, 8.314_46);
        assert_eq!(constants::GAS_CONSTANT, 8.205);
    }

    #[test]
    fn parse_temperature_units() {
        assert_eq!(parse_quantity("300 K", Quantity::Temperature).unwrap(), 300.0);
        assert_eq!(parse_quantity("300", Quantity::Temperature).unwrap(), 300.0);
        let c0 = parse_quantity("0C", Quantity::Temperature).unwrap();
        assert!((c0 - 273.15).abs() < 1e-9);
        assert!(parse_quantity("-300C", Quantity::Temperature).is_err());
    }

    #[test]
    fn parse_pressure_to_megapascal() {
        assert!((parse_quantity("1bar", Quantity::Pressure).unwrap() - 0.1).abs() < 1e-12);
        assert!((parse_quantity("1.5MPa", Quantity::Pressure).unwrap() - 1.5).abs() < 1e-12);
        assert!((parse_quantity("101325 Pa", Quantity::Pressure).unwrap() - 0.101_325).abs() < 1e-12);
        assert!((parse_quantity("2e-3", Quantity::Pressure).unwrap() - 2e-3).abs() < 1e-15);
    }

    #[test]
    fn parse_density_and_potential() {
        let rho = parse_quantity("0.9 g/cm3", Quantity::Density).unwrap();
        assert!((rho - 900.0).abs() < 1e-9);
        assert_eq!(parse_quantity("1.8 g/L", Quantity::Density).unwrap(), 1.8);
        let a = parse_quantity("1500 J/mol", Quantity::Potential).unwrap();
        assert!((a - 1.5).abs() < 1e-12);
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = parse_quantity("3 psi", Quantity::Pressure).unwrap_err();
        assert!(matches!(err, UnitError::UnknownUnit { ref unit, .. } if unit == "psi"));
        let ad: AdError = err.into();
        assert!(matches!(ad, AdError::Input { .. }));
    }
}
