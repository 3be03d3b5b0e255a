//! ads-predict: potential theory of adsorption.
//!
//! Measured isotherms collapse onto a temperature-invariant characteristic
//! curve (adsorption volume vs adsorption potential). This crate builds that
//! curve and maps it back to isotherms, isobars and isosteres at new
//! conditions, staying inside the interval the curve actually covers.

pub mod boundary;
pub mod characteristic;
pub mod curve;
pub mod enthalpy;
pub mod error;
pub mod potential;
pub mod predict;

pub use boundary::{BoundaryConfig, Interval, select_range};
pub use characteristic::{
    CharacteristicPoints, IsothermData, characteristic_curve, characteristic_points,
};
pub use curve::CharacteristicCurve;
pub use enthalpy::{EnthalpyPoint, isosteric_enthalpy};
pub use error::{PredictError, PredictResult};
pub use potential::{
    adsorption_potential, loading_from_volume, pressure_from_potential,
    temperature_from_potential, volume_from_loading,
};
pub use predict::{
    DEFAULT_PREDICTION_POINTS, Prediction, PredictionMode, PredictionRequest, Predictor, predict,
};
