//! Closed-form saturation pressure correlations.

use ads_core::constants::UNIVERSAL_GAS_CONSTANT;

use crate::eos::EquationOfState;
use crate::error::{ThermoError, ThermoResult};
use crate::properties::AdsorbateProperties;

/// Critical molar volume of the Peng–Robinson fluid as a fraction of R·Tc/Pc.
const PR_CRITICAL_VOLUME_FACTOR: f64 = 0.307_401;

/// Default Widom–Banuti species parameter.
pub const DEFAULT_WIDOM_BANUTI_PARAMETER: f64 = 5.589;

/// `Pc (T/Tc)^2`
pub fn dubinin(temperature: f64, props: &AdsorbateProperties) -> f64 {
    amankwah(temperature, props, 2.0)
}

/// `Pc (T/Tc)^k`; k = 2 is Dubinin's form.
pub fn amankwah(temperature: f64, props: &AdsorbateProperties, exponent: f64) -> f64 {
    props.pressure_critical * props.reduced_temperature(temperature).powf(exponent)
}

/// Supercritical pseudo-boiling line `Pc exp(As (T/Tc - 1))`.
pub fn widom_banuti_supercritical(
    temperature: f64,
    props: &AdsorbateProperties,
    species_parameter: f64,
) -> f64 {
    let tr = props.reduced_temperature(temperature);
    props.pressure_critical * (species_parameter * (tr - 1.0)).exp()
}

/// Peng–Robinson pressure on the critical isochore.
///
/// Fails with a domain error inside the two-phase dome, where the isochore
/// pressure is not positive.
pub fn critical_isochore(temperature: f64, props: &AdsorbateProperties) -> ThermoResult<f64> {
    let params = EquationOfState::PengRobinson.params(props, temperature, 0.0);
    let r = UNIVERSAL_GAS_CONSTANT;
    let v = PR_CRITICAL_VOLUME_FACTOR * r * props.temperature_critical / props.pressure_critical;
    let (a, b) = (params.a * params.alpha, params.b);
    let pressure = r * temperature / (v - b) - a / (v * v + 2.0 * b * v - b * b);
    if !(pressure > 0.0) {
        return Err(ThermoError::domain("critical isochore pressure", pressure));
    }
    Ok(pressure)
}

/// Polynomial vapour pressure correlation in temperature.
///
/// Coefficients are highest degree first and yield Pa; the result is
/// returned in MPa.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialCorrelation {
    pub coefficients: Vec<f64>,
}

impl PolynomialCorrelation {
    pub fn new(coefficients: Vec<f64>) -> ThermoResult<Self> {
        if coefficients.is_empty() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ThermoError::invalid(
                "polynomial correlation needs at least one finite coefficient",
            ));
        }
        Ok(Self { coefficients })
    }

    /// Seventh-degree fit of the vapour pressure of water.
    pub fn water() -> Self {
        Self {
            coefficients: vec![
                -1.147_98e-11,
                2.237_56e-8,
                -1.543_76e-5,
                0.004_432_79,
                -0.177_671,
                -193.14,
                42_890.6,
                -2.877_26e6,
            ],
        }
    }

    pub fn pressure(&self, temperature: f64) -> ThermoResult<f64> {
        let pascal = ads_solver::polyval(&self.coefficients, temperature);
        if !(pascal > 0.0) {
            return Err(ThermoError::domain(
                format!("polynomial saturation pressure at {temperature} K"),
                pascal,
            ));
        }
        Ok(pascal * 1e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn co2() -> AdsorbateProperties {
        AdsorbateProperties::new(44.01, 304.13, 7.3773, 0.22394, 194.7, 1178.5)
    }

    #[test]
    fn dubinin_is_amankwah_with_exponent_two() {
        let props = co2();
        for t in [150.0, 250.0, 304.13, 400.0] {
            assert_eq!(dubinin(t, &props), amankwah(t, &props, 2.0));
        }
    }

    #[test]
    fn closed_forms_meet_at_critical_point() {
        let props = co2();
        let tc = props.temperature_critical;
        let pc = props.pressure_critical;
        assert!((amankwah(tc, &props, 3.7) - pc).abs() < 1e-12);
        assert!((widom_banuti_supercritical(tc, &props, 5.589) - pc).abs() < 1e-12);
    }

    #[test]
    fn critical_isochore_passes_near_critical_pressure() {
        let props = co2();
        let p = critical_isochore(props.temperature_critical, &props).unwrap();
        assert!((p - props.pressure_critical).abs() / props.pressure_critical < 1e-3);
        let hot = critical_isochore(350.0, &props).unwrap();
        assert!(hot > p);
    }

    #[test]
    fn critical_isochore_fails_inside_dome() {
        let err = critical_isochore(250.0, &co2()).unwrap_err();
        assert!(matches!(err, ThermoError::NumericDomain { .. }));
    }

    #[test]
    fn water_polynomial_near_normal_boiling_point() {
        let p = PolynomialCorrelation::water().pressure(373.15).unwrap();
        assert!((p - 0.101_59).abs() < 2e-4, "{p}");
        let p25 = PolynomialCorrelation::water().pressure(298.15).unwrap();
        assert!((p25 - 0.003_246).abs() < 2e-4, "{p25}");
    }
}
