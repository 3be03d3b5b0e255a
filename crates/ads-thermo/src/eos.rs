//! Peng–Robinson equation of state and its Stryjek–Vera variants.
//!
//! All three variants share the attraction and co-volume parameters and the
//! alpha function; they differ only in how kappa depends on the acentric
//! factor and the reduced temperature.

use std::fmt;
use std::str::FromStr;

use ads_core::constants::UNIVERSAL_GAS_CONSTANT;

use crate::error::{ThermoError, ThermoResult};
use crate::properties::AdsorbateProperties;

const OMEGA_A: f64 = 0.457_24;
const OMEGA_B: f64 = 0.077_80;
/// 1 + sqrt(2), 1 - sqrt(2) as used by the fugacity expression.
const DELTA_PLUS: f64 = 2.414;
const DELTA_MINUS: f64 = 0.414;
/// Stryjek–Vera correction applies below this reduced temperature.
const PRSV_REDUCED_TEMPERATURE_LIMIT: f64 = 0.7;

/// Cubic equation of state variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationOfState {
    PengRobinson,
    /// PRSV with the `kappa1` shape parameter, active below Tr = 0.7.
    Prsv1,
    /// PRSV with `kappa1..kappa3`, active over the whole temperature range.
    Prsv2,
}

impl EquationOfState {
    pub const ALL: [EquationOfState; 3] = [Self::PengRobinson, Self::Prsv1, Self::Prsv2];

    pub fn name(self) -> &'static str {
        match self {
            Self::PengRobinson => "peng-robinson",
            Self::Prsv1 => "prsv1",
            Self::Prsv2 => "prsv2",
        }
    }

    /// Attraction-correction factor at reduced temperature `tr`.
    pub fn kappa(self, props: &AdsorbateProperties, tr: f64) -> f64 {
        let w = props.acentric_factor;
        match self {
            Self::PengRobinson => 0.374_64 + w * (1.542_26 - w * 0.269_92),
            Self::Prsv1 => {
                let kappa0 = prsv_kappa0(w);
                if tr <= PRSV_REDUCED_TEMPERATURE_LIMIT {
                    kappa0
                        + props.kappa1
                            * (1.0 + tr.sqrt())
                            * (PRSV_REDUCED_TEMPERATURE_LIMIT - tr)
                } else {
                    kappa0
                }
            }
            Self::Prsv2 => {
                let shape = props.kappa1 + props.kappa2 * (props.kappa3 - tr) * (1.0 - tr.sqrt());
                prsv_kappa0(w)
                    + shape * (1.0 + tr.sqrt()) * (PRSV_REDUCED_TEMPERATURE_LIMIT - tr)
            }
        }
    }

    /// `(1 + kappa (1 - sqrt(Tr)))^2`
    pub fn alpha(self, props: &AdsorbateProperties, temperature: f64) -> f64 {
        let tr = props.reduced_temperature(temperature);
        let m = 1.0 + self.kappa(props, tr) * (1.0 - tr.sqrt());
        m * m
    }

    /// Evaluate the state parameters at (T, P).
    pub fn params(
        self,
        props: &AdsorbateProperties,
        temperature: f64,
        pressure: f64,
    ) -> EosParams {
        let r = UNIVERSAL_GAS_CONSTANT;
        let tc = props.temperature_critical;
        let pc = props.pressure_critical;
        let a = OMEGA_A * (r * tc).powi(2) / pc;
        let b = OMEGA_B * r * tc / pc;
        let alpha = self.alpha(props, temperature);
        let rt = r * temperature;
        EosParams {
            a,
            b,
            alpha,
            big_a: a * alpha * pressure / (rt * rt),
            big_b: b * pressure / rt,
        }
    }
}

fn prsv_kappa0(w: f64) -> f64 {
    0.378_893 + w * (1.489_715_3 + w * (-0.171_318_48 + w * 0.019_655_4))
}

impl fmt::Display for EquationOfState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquationOfState {
    type Err = ThermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "peng-robinson" | "pr" | "preos" => Ok(Self::PengRobinson),
            "prsv1" => Ok(Self::Prsv1),
            "prsv2" => Ok(Self::Prsv2),
            _ => Err(ThermoError::UnknownMethod {
                family: "equation of state",
                name: s.to_string(),
                expected: "peng-robinson, prsv1, prsv2",
            }),
        }
    }
}

/// Equation-of-state parameters at one (T, P) point.
///
/// `a` and `b` are in the working units of the gas constant (J·cm^3/mol^2 and
/// cm^3/mol with pressures in MPa); `big_a` and `big_b` are dimensionless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EosParams {
    pub a: f64,
    pub b: f64,
    pub alpha: f64,
    pub big_a: f64,
    pub big_b: f64,
}

impl EosParams {
    /// Coefficients of `Z^3 + c2 Z^2 + c1 Z + c0`, highest degree first.
    pub fn cubic_coefficients(&self) -> [f64; 4] {
        let (a, b) = (self.big_a, self.big_b);
        [1.0, b - 1.0, a - 3.0 * b * b - 2.0 * b, b * b * b + b * b - a * b]
    }

    /// Fugacity coefficient of the phase with compressibility `z`.
    ///
    /// Requires `Z > B` and `Z > 0.414 B`; anything else leaves the
    /// logarithms undefined and is reported as a domain failure.
    pub fn fugacity_coefficient(&self, z: f64) -> ThermoResult<f64> {
        let (a, b) = (self.big_a, self.big_b);
        if !(b > 0.0) {
            return Err(ThermoError::domain("dimensionless co-volume B", b));
        }
        let free_volume = z - b;
        if !(free_volume > 0.0) {
            return Err(ThermoError::domain("Z - B", free_volume));
        }
        let denominator = z - DELTA_MINUS * b;
        if !(denominator > 0.0) {
            return Err(ThermoError::domain("Z - 0.414 B", denominator));
        }
        let ratio = (z + DELTA_PLUS * b) / denominator;
        if !(ratio > 0.0) {
            return Err(ThermoError::domain("(Z + 2.414 B) / (Z - 0.414 B)", ratio));
        }

        let ln_phi =
            z - 1.0 - free_volume.ln() - a / (2.0 * std::f64::consts::SQRT_2 * b) * ratio.ln();
        let phi = ln_phi.exp();
        if !phi.is_finite() {
            return Err(ThermoError::domain("fugacity coefficient", phi));
        }
        Ok(phi)
    }
}
