//! Characteristic curve construction from measured isotherms.

use ads_thermo::{DensityMethod, SaturationResolver};
use tracing::{debug, info, warn};

use crate::curve::CharacteristicCurve;
use crate::error::PredictResult;
use crate::potential::{adsorption_potential, volume_from_loading};

/// One measured isotherm: `(pressure MPa, loading mg/g)` at a temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct IsothermData {
    pub temperature: f64,
    pub points: Vec<(f64, f64)>,
}

impl IsothermData {
    pub fn new(temperature: f64, points: Vec<(f64, f64)>) -> Self {
        Self {
            temperature,
            points,
        }
    }
}

/// One isotherm mapped into potential/volume coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicPoints {
    pub temperature: f64,
    pub saturation_pressure: f64,
    pub density: f64,
    /// `(potential kJ/mol, volume ml/g)`
    pub points: Vec<(f64, f64)>,
}

/// Map each isotherm into potential/volume coordinates.
///
/// Points with non-positive pressure or loading carry no potential and are
/// skipped with a warning.
pub fn characteristic_points(
    isotherms: &[IsothermData],
    saturation: &SaturationResolver<'_>,
    density: DensityMethod,
) -> PredictResult<Vec<CharacteristicPoints>> {
    let props = saturation.properties();
    isotherms
        .iter()
        .map(|iso| {
            let t = iso.temperature;
            let psat = saturation.pressure(t)?;
            let rho = density.density(t, props)?;
            debug!(temperature = t, psat, density = rho, "mapping isotherm");

            let mut points = Vec::with_capacity(iso.points.len());
            for &(p, n) in &iso.points {
                if !(p > 0.0 && n > 0.0) {
                    warn!(temperature = t, pressure = p, loading = n, "skipping point");
                    continue;
                }
                points.push((
                    adsorption_potential(t, psat, p)?,
                    volume_from_loading(n, rho)?,
                ));
            }
            Ok(CharacteristicPoints {
                temperature: t,
                saturation_pressure: psat,
                density: rho,
                points,
            })
        })
        .collect()
}

/// Collapse all isotherms into a single characteristic curve.
pub fn characteristic_curve(
    isotherms: &[IsothermData],
    saturation: &SaturationResolver<'_>,
    density: DensityMethod,
) -> PredictResult<CharacteristicCurve> {
    let mapped = characteristic_points(isotherms, saturation, density)?;
    let curve = CharacteristicCurve::new(mapped.iter().flat_map(|m| m.points.iter().copied()))?;
    let (a_lo, a_hi) = curve.potential_range();
    info!(
        isotherms = mapped.len(),
        points = curve.potentials().len(),
        potential_min = a_lo,
        potential_max = a_hi,
        "characteristic curve built"
    );
    Ok(curve)
}
