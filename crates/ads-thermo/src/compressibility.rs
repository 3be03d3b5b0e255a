//! Compressibility roots of the cubic equation of state.

use std::fmt;

use nalgebra::Matrix3;

use crate::eos::EosParams;
use crate::error::{ThermoError, ThermoResult};

/// Which compressibility root to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Largest-magnitude root
    Vapor,
    /// Smallest-magnitude root
    Liquid,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vapor => write!(f, "vapor"),
            Self::Liquid => write!(f, "liquid"),
        }
    }
}

/// Magnitudes of all three roots of the cubic, real or complex.
///
/// Roots are the eigenvalues of the companion matrix.
pub fn root_magnitudes(params: &EosParams) -> ThermoResult<[f64; 3]> {
    let [_, c2, c1, c0] = params.cubic_coefficients();
    if !(c2.is_finite() && c1.is_finite() && c0.is_finite()) {
        return Err(ThermoError::domain("cubic coefficient", c2 + c1 + c0));
    }
    #[rustfmt::skip]
    let companion = Matrix3::new(
        -c2, -c1, -c0,
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
    );
    let roots = companion.complex_eigenvalues();
    let mut magnitudes = [0.0; 3];
    for (m, root) in magnitudes.iter_mut().zip(roots.iter()) {
        *m = root.norm();
        if !m.is_finite() {
            return Err(ThermoError::domain("compressibility root", *m));
        }
    }
    Ok(magnitudes)
}

/// Compressibility factor of the requested phase.
///
/// Phase identity follows magnitude ordering only: near the critical point
/// the two outer roots are not checked for thermodynamic stability.
pub fn solve_compressibility(params: &EosParams, phase: Phase) -> ThermoResult<f64> {
    let magnitudes = root_magnitudes(params)?;
    let z = match phase {
        Phase::Vapor => magnitudes.iter().copied().fold(f64::MIN, f64::max),
        Phase::Liquid => magnitudes.iter().copied().fold(f64::MAX, f64::min),
    };
    if !(z > 0.0) {
        return Err(ThermoError::domain(format!("{phase} compressibility"), z));
    }
    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::EquationOfState;
    use crate::properties::AdsorbateProperties;

    fn co2() -> AdsorbateProperties {
        AdsorbateProperties::new(44.01, 304.13, 7.3773, 0.22394, 194.7, 1178.5)
    }

    fn cubic(params: &EosParams, z: f64) -> f64 {
        let [c3, c2, c1, c0] = params.cubic_coefficients();
        ((c3 * z + c2) * z + c1) * z + c0
    }

    #[test]
    fn two_phase_region_has_distinct_roots() {
        let params = EquationOfState::PengRobinson.params(&co2(), 250.0, 1.8);
        let zv = solve_compressibility(&params, Phase::Vapor).unwrap();
        let zl = solve_compressibility(&params, Phase::Liquid).unwrap();
        assert!(zv > 0.6 && zv < 1.0, "vapor Z = {zv}");
        assert!(zl > params.big_b && zl < 0.1, "liquid Z = {zl}");
        assert!(cubic(&params, zv).abs() < 1e-10);
        assert!(cubic(&params, zl).abs() < 1e-10);
    }

    #[test]
    fn dilute_gas_vapor_root_is_near_one() {
        let params = EquationOfState::PengRobinson.params(&co2(), 400.0, 0.01);
        let zv = solve_compressibility(&params, Phase::Vapor).unwrap();
        assert!((zv - 1.0).abs() < 1e-2);
    }

    #[test]
    fn magnitudes_cover_all_roots() {
        let params = EquationOfState::PengRobinson.params(&co2(), 250.0, 1.8);
        let mut m = root_magnitudes(&params).unwrap();
        m.sort_by(f64::total_cmp);
        assert_eq!(m[2], solve_compressibility(&params, Phase::Vapor).unwrap());
        assert_eq!(m[0], solve_compressibility(&params, Phase::Liquid).unwrap());
    }
}
