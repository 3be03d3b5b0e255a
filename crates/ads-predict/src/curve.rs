//! The characteristic curve: adsorption volume as a function of adsorption
//! potential, independent of temperature.

use crate::error::{PredictError, PredictResult};

/// Piecewise-linear characteristic curve, sorted by potential.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicCurve {
    potentials: Vec<f64>,
    volumes: Vec<f64>,
    /// Volume-ascending copy of the curve, present when volume is strictly
    /// monotonic in potential.
    inverse: Option<(Vec<f64>, Vec<f64>)>,
}

impl CharacteristicCurve {
    /// Build from `(potential kJ/mol, volume ml/g)` points.
    ///
    /// Points are sorted by potential; repeated potentials keep the first
    /// volume seen. At least two distinct potentials are required.
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> PredictResult<Self> {
        let mut points: Vec<(f64, f64)> = points.into_iter().collect();
        if let Some(&(a, w)) = points
            .iter()
            .find(|(a, w)| !a.is_finite() || !w.is_finite())
        {
            return Err(PredictError::Curve {
                what: format!("non-finite point (potential {a}, volume {w})"),
            });
        }
        points.sort_by(|l, r| l.0.total_cmp(&r.0));
        points.dedup_by(|next, prev| next.0 == prev.0);
        if points.len() < 2 {
            return Err(PredictError::Curve {
                what: format!(
                    "need at least 2 distinct potentials, got {}",
                    points.len()
                ),
            });
        }

        let (potentials, volumes): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        let inverse = inverse_table(&potentials, &volumes);
        Ok(Self {
            potentials,
            volumes,
            inverse,
        })
    }

    pub fn potentials(&self) -> &[f64] {
        &self.potentials
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.potentials
            .iter()
            .copied()
            .zip(self.volumes.iter().copied())
    }

    /// `(min, max)` potential, kJ/mol.
    pub fn potential_range(&self) -> (f64, f64) {
        (self.potentials[0], self.potentials[self.potentials.len() - 1])
    }

    /// `(min, max)` volume, ml/g.
    pub fn volume_range(&self) -> (f64, f64) {
        self.volumes
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &w| {
                (lo.min(w), hi.max(w))
            })
    }

    pub fn is_volume_monotonic(&self) -> bool {
        self.inverse.is_some()
    }

    /// Volume at `potential`; linear between points, extended along the end
    /// segments outside the curve.
    pub fn volume_at(&self, potential: f64) -> f64 {
        interpolate(&self.potentials, &self.volumes, potential)
    }

    /// Potential at `volume`. Requires volume to be strictly monotonic in
    /// potential.
    pub fn potential_at(&self, volume: f64) -> PredictResult<f64> {
        match &self.inverse {
            Some((volumes, potentials)) => Ok(interpolate(volumes, potentials, volume)),
            None => Err(PredictError::Curve {
                what: "volume is not monotonic in potential, cannot invert".into(),
            }),
        }
    }
}

fn inverse_table(potentials: &[f64], volumes: &[f64]) -> Option<(Vec<f64>, Vec<f64>)> {
    let increasing = volumes.windows(2).all(|w| w[1] > w[0]);
    let decreasing = volumes.windows(2).all(|w| w[1] < w[0]);
    if increasing {
        Some((volumes.to_vec(), potentials.to_vec()))
    } else if decreasing {
        Some((
            volumes.iter().rev().copied().collect(),
            potentials.iter().rev().copied().collect(),
        ))
    } else {
        None
    }
}

/// Linear interpolation on ascending `xs` (at least two entries).
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();
    let i = xs.partition_point(|&v| v <= x).clamp(1, n - 1);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
