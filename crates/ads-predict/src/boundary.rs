//! Boundaries of a prediction: the interval of the independent variable
//! over which the characteristic curve is not extrapolated.

use ads_solver::{NewtonConfig, SolverError, newton_solve};
use ads_thermo::{DensityMethod, SaturationResolver};
use tracing::{debug, warn};

use crate::curve::CharacteristicCurve;
use crate::error::{PredictError, PredictResult};
use crate::potential::{adsorption_potential, pressure_from_potential, volume_from_loading};

/// Closed interval `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    /// Interval spanning `a` and `b` in either order.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// True when `other` lies inside, allowing a 1e-9 relative slack for
    /// round-off in the discovered ends.
    pub fn contains(&self, other: &Interval) -> bool {
        let slack = 1e-9 * self.lo.abs().max(self.hi.abs()).max(1.0);
        other.lo >= self.lo - slack && other.hi <= self.hi + slack
    }

    /// `other` cut back to this interval.
    pub fn clamp(&self, other: &Interval) -> Interval {
        Interval {
            lo: other.lo.clamp(self.lo, self.hi),
            hi: other.hi.clamp(self.lo, self.hi),
        }
    }
}

/// Temperature seed and solver settings for boundary searches.
#[derive(Debug, Clone)]
pub struct BoundaryConfig {
    pub temperature_guess: f64,
    pub newton: NewtonConfig,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            temperature_guess: 273.0,
            newton: NewtonConfig {
                abs_tol: 1e-8,
                step_tol: 1e-10,
                ..NewtonConfig::positive()
            },
        }
    }
}

/// Pressures at which the isotherm at `temperature` spans the curve.
pub fn isotherm_pressure_range(
    curve: &CharacteristicCurve,
    saturation: &SaturationResolver<'_>,
    temperature: f64,
) -> PredictResult<Interval> {
    let psat = saturation.pressure(temperature)?;
    let (a_lo, a_hi) = curve.potential_range();
    Ok(Interval::spanning(
        pressure_from_potential(a_hi, psat, temperature)?,
        pressure_from_potential(a_lo, psat, temperature)?,
    ))
}

/// Temperatures at which the isobar at `pressure` spans the curve.
pub fn isobar_temperature_range(
    curve: &CharacteristicCurve,
    saturation: &SaturationResolver<'_>,
    pressure: f64,
    cfg: &BoundaryConfig,
) -> PredictResult<Interval> {
    let (a_lo, a_hi) = curve.potential_range();
    let solve = |target: f64| -> PredictResult<f64> {
        let root = newton_solve(
            cfg.temperature_guess,
            |t| -> PredictResult<f64> {
                let psat = saturation.pressure(t)?;
                Ok(adsorption_potential(t, psat, pressure)? - target)
            },
            &cfg.newton,
        )
        .map_err(|e| boundary_context(e, "isobar", target))?;
        debug!(pressure, potential = target, temperature = root.x, "isobar boundary");
        Ok(root.x)
    };
    Ok(Interval::spanning(solve(a_lo)?, solve(a_hi)?))
}

/// Temperatures at which the isostere at `loading` spans the curve.
///
/// Needs a temperature-dependent density; with a constant density the
/// adsorbed volume never moves along the curve.
pub fn isostere_temperature_range(
    curve: &CharacteristicCurve,
    saturation: &SaturationResolver<'_>,
    density: DensityMethod,
    loading: f64,
    cfg: &BoundaryConfig,
) -> PredictResult<Interval> {
    if !density.is_temperature_dependent() {
        return Err(PredictError::invalid(format!(
            "isostere boundaries need a temperature-dependent density, '{density}' is constant; give a temperature range"
        )));
    }
    let props = saturation.properties();
    let (w_lo, w_hi) = curve.volume_range();
    let solve = |target: f64| -> PredictResult<f64> {
        let root = newton_solve(
            cfg.temperature_guess,
            |t| -> PredictResult<f64> {
                let rho = density.density(t, props)?;
                Ok(volume_from_loading(loading, rho)? - target)
            },
            &cfg.newton,
        )
        .map_err(|e| boundary_context(e, "isostere", target))?;
        debug!(loading, volume = target, temperature = root.x, "isostere boundary");
        Ok(root.x)
    };
    Ok(Interval::spanning(solve(w_lo)?, solve(w_hi)?))
}

fn boundary_context(err: PredictError, what: &str, target: f64) -> PredictError {
    match err {
        PredictError::Solver(SolverError::ConvergenceFailed { what: detail }) => {
            PredictError::Solver(SolverError::ConvergenceFailed {
                what: format!("{what} boundary at {target} not found: {detail}"),
            })
        }
        other => other,
    }
}

/// Pick the interval to sample: `requested` when it lies inside
/// `discovered`, otherwise `discovered`. The result never leaves `discovered`.
pub fn select_range(discovered: Interval, requested: Option<Interval>) -> Interval {
    match requested {
        Some(r) if discovered.contains(&r) => discovered.clamp(&r),
        Some(r) => {
            warn!(
                requested_lo = r.lo,
                requested_hi = r.hi,
                lo = discovered.lo,
                hi = discovered.hi,
                "requested range leaves the characteristic curve, using its boundaries"
            );
            discovered
        }
        None => discovered,
    }
}
