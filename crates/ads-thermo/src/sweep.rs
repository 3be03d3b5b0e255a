//! Property curves over a temperature sweep.
//!
//! Used to tabulate the saturation pressure and adsorbate density that a run
//! is based on. A sweep either completes or fails at its first bad point.

use ads_core::numeric::{Spacing, sample};

use crate::density::DensityMethod;
use crate::error::{ThermoError, ThermoResult};
use crate::properties::AdsorbateProperties;
use crate::saturation::SaturationResolver;

/// Temperature sweep definition, K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSweep {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl TemperatureSweep {
    pub fn temperatures(&self) -> ThermoResult<Vec<f64>> {
        Ok(sample(self.start, self.end, self.points, Spacing::Linear)?)
    }
}

/// Values of one property at each swept temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCurve {
    pub temperatures: Vec<f64>,
    pub values: Vec<f64>,
}

impl PropertyCurve {
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.temperatures.iter().copied().zip(self.values.iter().copied())
    }
}

fn execute<F>(sweep: &TemperatureSweep, what: &str, mut eval: F) -> ThermoResult<PropertyCurve>
where
    F: FnMut(f64) -> ThermoResult<f64>,
{
    let temperatures = sweep.temperatures()?;
    let values = temperatures
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            eval(t).map_err(|e| match e {
                ThermoError::InvalidArg { what: inner } => {
                    ThermoError::invalid(format!("{what} sweep point {i} ({t} K): {inner}"))
                }
                other => other,
            })
        })
        .collect::<ThermoResult<Vec<_>>>()?;
    Ok(PropertyCurve {
        temperatures,
        values,
    })
}

/// Saturation pressure (MPa) across the sweep.
pub fn saturation_pressure_curve(
    resolver: &SaturationResolver<'_>,
    sweep: &TemperatureSweep,
) -> ThermoResult<PropertyCurve> {
    execute(sweep, "saturation pressure", |t| resolver.pressure(t))
}

/// Adsorbate density (kg/m^3) across the sweep.
pub fn density_curve(
    method: DensityMethod,
    props: &AdsorbateProperties,
    sweep: &TemperatureSweep,
) -> ThermoResult<PropertyCurve> {
    execute(sweep, "density", |t| method.density(t, props))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saturation::SaturationMethod;

    #[test]
    fn dubinin_sweep_is_monotonic() {
        let props = AdsorbateProperties::new(44.01, 304.13, 7.3773, 0.22394, 194.7, 1178.5);
        let resolver = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
        let sweep = TemperatureSweep {
            start: 200.0,
            end: 400.0,
            points: 11,
        };
        let curve = saturation_pressure_curve(&resolver, &sweep).unwrap();
        assert_eq!(curve.values.len(), 11);
        assert!(curve.values.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(curve.pairs().count(), 11);
    }

    #[test]
    fn density_sweep_stops_at_first_failure() {
        let props = AdsorbateProperties::new(44.01, 304.13, 7.3773, 0.22394, 194.7, 1178.5);
        let sweep = TemperatureSweep {
            start: 300.0,
            end: 1500.0,
            points: 5,
        };
        let err = density_curve(DensityMethod::Hauer, &props, &sweep).unwrap_err();
        assert!(matches!(err, ThermoError::NumericDomain { .. }));
    }
}
