//! Potential theory of adsorption: conversions between measured conditions
//! and the (potential, volume) coordinates of the characteristic curve.
//!
//! Units: temperature K, pressures MPa, potential kJ/mol, loading mg/g,
//! density kg/m^3, volume ml/g.

use ads_core::constants::UNIVERSAL_GAS_CONSTANT;

use crate::error::{PredictError, PredictResult};

fn positive(value: f64, what: &str) -> PredictResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PredictError::domain(what, value))
    }
}

/// `R T ln(Psat / P) / 1000`
pub fn adsorption_potential(
    temperature: f64,
    saturation_pressure: f64,
    pressure: f64,
) -> PredictResult<f64> {
    positive(temperature, "temperature")?;
    positive(saturation_pressure, "saturation pressure")?;
    positive(pressure, "pressure")?;
    Ok(UNIVERSAL_GAS_CONSTANT * temperature * (saturation_pressure / pressure).ln() * 1e-3)
}

/// `Psat exp(-1000 A / (R T))`, inverse of [`adsorption_potential`] in P.
pub fn pressure_from_potential(
    potential: f64,
    saturation_pressure: f64,
    temperature: f64,
) -> PredictResult<f64> {
    positive(temperature, "temperature")?;
    positive(saturation_pressure, "saturation pressure")?;
    if !potential.is_finite() {
        return Err(PredictError::domain("adsorption potential", potential));
    }
    let p = saturation_pressure * (-potential * 1e3 / (UNIVERSAL_GAS_CONSTANT * temperature)).exp();
    positive(p, "pressure from potential")
}

/// `1000 A / (R ln(Psat / P))`, inverse of [`adsorption_potential`] in T
/// with the saturation pressure held fixed.
pub fn temperature_from_potential(
    potential: f64,
    saturation_pressure: f64,
    pressure: f64,
) -> PredictResult<f64> {
    positive(saturation_pressure, "saturation pressure")?;
    positive(pressure, "pressure")?;
    let log_ratio = (saturation_pressure / pressure).ln();
    if log_ratio == 0.0 {
        return Err(PredictError::domain("ln(Psat / P)", log_ratio));
    }
    positive(
        1e3 * potential / (UNIVERSAL_GAS_CONSTANT * log_ratio),
        "temperature from potential",
    )
}

/// `loading / density`
pub fn volume_from_loading(loading: f64, density: f64) -> PredictResult<f64> {
    positive(density, "adsorbate density")?;
    positive(loading, "loading")?;
    Ok(loading / density)
}

/// `volume * density`
pub fn loading_from_volume(volume: f64, density: f64) -> PredictResult<f64> {
    positive(density, "adsorbate density")?;
    positive(volume, "adsorption volume")?;
    Ok(volume * density)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn potential_vanishes_at_saturation() {
        assert_eq!(adsorption_potential(300.0, 2.0, 2.0).unwrap(), 0.0);
        assert_eq!(pressure_from_potential(0.0, 2.0, 300.0).unwrap(), 2.0);
    }

    #[test]
    fn known_value() {
        // R T ln(10) / 1000 at 298.15 K
        let a = adsorption_potential(298.15, 1.0, 0.1).unwrap();
        assert!((a - 8.31446 * 298.15 * 10f64.ln() * 1e-3).abs() < 1e-12);
    }

    #[test]
    fn temperature_inverse() {
        let a = adsorption_potential(250.0, 1.7, 0.3).unwrap();
        let t = temperature_from_potential(a, 1.7, 0.3).unwrap();
        assert!((t - 250.0).abs() < 1e-9);
        assert!(temperature_from_potential(a, 1.0, 1.0).is_err());
    }

    #[test]
    fn loading_volume_scenario() {
        let v = volume_from_loading(5.0, 900.0).unwrap();
        assert_eq!(v, 5.0 / 900.0);
        let n = loading_from_volume(v, 900.0).unwrap();
        assert!((n - 5.0).abs() < 1e-12);
    }

    #[test]
    fn non_positive_inputs_are_domain_errors() {
        assert!(matches!(
            adsorption_potential(300.0, 1.0, 0.0),
            Err(PredictError::NumericDomain { .. })
        ));
        assert!(adsorption_potential(300.0, -1.0, 0.5).is_err());
        assert!(volume_from_loading(5.0, 0.0).is_err());
        assert!(loading_from_volume(-1e-3, 900.0).is_err());
    }
}
