//! Saturation pressure from a reference table.

use ads_solver::{polyfit, polyval};

use crate::error::{ThermoError, ThermoResult};
use crate::spline::CubicSpline;

/// Tabulated (temperature, saturation pressure) data.
///
/// Inside the table range a cubic spline is used; outside it a quadratic
/// fitted to the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationTable {
    spline: CubicSpline,
    quadratic: Vec<f64>,
}

impl SaturationTable {
    /// Rows may come in any order; temperatures must be distinct.
    pub fn new(temperatures: &[f64], pressures: &[f64]) -> ThermoResult<Self> {
        if temperatures.len() != pressures.len() {
            return Err(ThermoError::invalid(format!(
                "saturation table has {} temperatures but {} pressures",
                temperatures.len(),
                pressures.len()
            )));
        }
        if temperatures.len() < 3 {
            return Err(ThermoError::invalid(
                "saturation table needs at least 3 rows for its quadratic fit",
            ));
        }

        let mut rows: Vec<(f64, f64)> = temperatures
            .iter()
            .copied()
            .zip(pressures.iter().copied())
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (t, p): (Vec<f64>, Vec<f64>) = rows.into_iter().unzip();

        let quadratic = polyfit(&t, &p, 2)?;
        let spline = CubicSpline::new(t, p)?;
        Ok(Self { spline, quadratic })
    }

    pub fn temperature_range(&self) -> (f64, f64) {
        (self.spline.x_min(), self.spline.x_max())
    }

    pub fn pressure(&self, temperature: f64) -> ThermoResult<f64> {
        let p = if self.spline.contains(temperature) {
            self.spline.evaluate(temperature)
        } else {
            polyval(&self.quadratic, temperature)
        };
        if !(p > 0.0) {
            return Err(ThermoError::domain(
                format!("tabulated saturation pressure at {temperature} K"),
                p,
            ));
        }
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_inside_and_extrapolates_outside() {
        let t = [300.0, 260.0, 280.0, 240.0, 220.0];
        let p: Vec<f64> = t.iter().map(|v| 1e-4 * v * v - 0.03 * v + 2.5).collect();
        let table = SaturationTable::new(&t, &p).unwrap();
        assert_eq!(table.temperature_range(), (220.0, 300.0));
        assert!((table.pressure(260.0).unwrap() - p[1]).abs() < 1e-12);
        let hot = 1e-4 * 350.0 * 350.0 - 0.03 * 350.0 + 2.5;
        assert!((table.pressure(350.0).unwrap() - hot).abs() < 1e-6);
    }

    #[test]
    fn rejects_short_tables() {
        assert!(SaturationTable::new(&[1.0, 2.0], &[1.0, 2.0]).is_err());
        assert!(SaturationTable::new(&[1.0, 2.0, 3.0], &[1.0, 2.0]).is_err());
    }
}
