//! Natural cubic spline through tabulated points.

use nalgebra::{DMatrix, DVector};

use crate::error::{ThermoError, ThermoResult};

/// Interpolating cubic spline with zero curvature at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative at each knot
    m: Vec<f64>,
}

impl CubicSpline {
    /// Build from knots with strictly increasing `x`.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> ThermoResult<Self> {
        if x.len() != y.len() {
            return Err(ThermoError::invalid(format!(
                "spline needs as many ordinates as abscissae ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(ThermoError::invalid("spline needs at least 2 knots"));
        }
        if x.iter().chain(&y).any(|v| !v.is_finite()) {
            return Err(ThermoError::invalid("spline knots must be finite"));
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ThermoError::invalid(
                "spline abscissae must be strictly increasing",
            ));
        }

        let n = x.len();
        let mut m = vec![0.0; n];
        if n > 2 {
            let k = n - 2;
            let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
            let mut lhs = DMatrix::zeros(k, k);
            let mut rhs = DVector::zeros(k);
            for i in 0..k {
                lhs[(i, i)] = 2.0 * (h[i] + h[i + 1]);
                if i > 0 {
                    lhs[(i, i - 1)] = h[i];
                }
                if i + 1 < k {
                    lhs[(i, i + 1)] = h[i + 1];
                }
                rhs[i] = 6.0 * ((y[i + 2] - y[i + 1]) / h[i + 1] - (y[i + 1] - y[i]) / h[i]);
            }
            let interior = lhs
                .lu()
                .solve(&rhs)
                .ok_or_else(|| ThermoError::invalid("singular spline system"))?;
            m[1..n - 1].copy_from_slice(interior.as_slice());
        }

        Ok(Self { x, y, m })
    }

    pub fn x_min(&self) -> f64 {
        self.x[0]
    }

    pub fn x_max(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }

    /// Evaluate the spline. Outside the knot range the end cubic is continued.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.x.len();
        // index of the segment [x_i, x_{i+1}] holding x
        let i = match self.x.partition_point(|&k| k <= x) {
            0 => 0,
            p if p >= n => n - 2,
            p => p - 1,
        };
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - x) / h;
        let b = (x - self.x[i]) / h;
        a * self.y[i]
            + b * self.y[i + 1]
            + ((a * a * a - a) * self.m[i] + (b * b * b - b) * self.m[i + 1]) * h * h / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_knots() {
        let x = vec![1.0, 2.0, 3.5, 4.0, 6.0];
        let y = vec![0.5, 1.7, 0.2, -1.0, 3.0];
        let s = CubicSpline::new(x.clone(), y.clone()).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert!((s.evaluate(*xi) - yi).abs() < 1e-12);
        }
    }

    #[test]
    fn reproduces_straight_line() {
        let x: Vec<f64> = (0..6).map(|i| i as f64 * 0.7).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 1.0).collect();
        let s = CubicSpline::new(x, y).unwrap();
        assert!((s.evaluate(1.234) - (3.0 * 1.234 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn tracks_smooth_function() {
        let x: Vec<f64> = (0..40).map(|i| 200.0 + 2.5 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|t| (t / 300.0_f64).powf(6.0) * 7.0).collect();
        let s = CubicSpline::new(x, y).unwrap();
        let t = 251.3;
        assert!((s.evaluate(t) - (t / 300.0_f64).powf(6.0) * 7.0).abs() < 1e-5);
    }

    #[test]
    fn rejects_unsorted_knots() {
        assert!(CubicSpline::new(vec![1.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).is_err());
        assert!(CubicSpline::new(vec![1.0], vec![0.0]).is_err());
    }
}
