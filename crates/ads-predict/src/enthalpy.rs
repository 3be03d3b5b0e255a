//! Isosteric enthalpy of adsorption along the characteristic curve.

use ads_core::numeric::gradient;

use crate::curve::CharacteristicCurve;
use crate::error::{PredictError, PredictResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnthalpyPoint {
    /// ml/g
    pub volume: f64,
    /// kJ/mol
    pub potential: f64,
    /// kJ/mol
    pub enthalpy: f64,
}

/// `dH = dHvap + A - T alpha W dA/dW` at every point of the curve.
///
/// `vaporization_enthalpy` in kJ/mol, `thermal_expansion` in 1/K.
pub fn isosteric_enthalpy(
    curve: &CharacteristicCurve,
    temperature: f64,
    vaporization_enthalpy: f64,
    thermal_expansion: f64,
) -> PredictResult<Vec<EnthalpyPoint>> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(PredictError::domain("temperature", temperature));
    }
    let potentials = curve.potentials();
    let volumes = curve.volumes();
    let slope = gradient(potentials, volumes)?;

    Ok(potentials
        .iter()
        .zip(volumes)
        .zip(slope)
        .map(|((&a, &w), da_dw)| EnthalpyPoint {
            volume: w,
            potential: a,
            enthalpy: vaporization_enthalpy + a - temperature * thermal_expansion * w * da_dw,
        })
        .collect())
}
