//! Isotherm, isobar and isostere prediction from a characteristic curve.

use std::fmt;
use std::str::FromStr;

use ads_core::numeric::{Spacing, sample};
use ads_thermo::{DensityMethod, SaturationResolver};
use tracing::info;

use crate::boundary::{
    BoundaryConfig, Interval, isobar_temperature_range, isostere_temperature_range,
    isotherm_pressure_range, select_range,
};
use crate::curve::CharacteristicCurve;
use crate::error::{PredictError, PredictResult};
use crate::potential::{
    adsorption_potential, loading_from_volume, pressure_from_potential, volume_from_loading,
};

pub const DEFAULT_PREDICTION_POINTS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionMode {
    /// Loading vs pressure at fixed temperature.
    Isotherm,
    /// Loading vs temperature at fixed pressure.
    Isobar,
    /// Pressure vs temperature at fixed loading.
    Isostere,
}

impl PredictionMode {
    pub const ALL: [PredictionMode; 3] = [Self::Isotherm, Self::Isobar, Self::Isostere];

    pub fn name(self) -> &'static str {
        match self {
            Self::Isotherm => "isotherm",
            Self::Isobar => "isobar",
            Self::Isostere => "isostere",
        }
    }

    /// Column labels `(independent, dependent)` with units.
    pub fn columns(self) -> (&'static str, &'static str) {
        match self {
            Self::Isotherm => ("pressure [MPa]", "loading [mg/g]"),
            Self::Isobar => ("temperature [K]", "loading [mg/g]"),
            Self::Isostere => ("temperature [K]", "pressure [MPa]"),
        }
    }

    /// Label of the value held fixed.
    pub fn fixed_label(self) -> &'static str {
        match self {
            Self::Isotherm => "temperature [K]",
            Self::Isobar => "pressure [MPa]",
            Self::Isostere => "loading [mg/g]",
        }
    }

    fn spacing(self) -> Spacing {
        match self {
            Self::Isotherm => Spacing::Logarithmic,
            Self::Isobar | Self::Isostere => Spacing::Linear,
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredictionMode {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                PredictError::invalid(format!(
                    "unknown prediction '{s}', expected isotherm, isobar or isostere"
                ))
            })
    }
}

/// What to predict: a mode, the value held fixed, and how to sample it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    pub mode: PredictionMode,
    /// Temperature (K), pressure (MPa) or loading (mg/g), per mode.
    pub value: f64,
    pub points: usize,
    pub range: Option<Interval>,
}

impl PredictionRequest {
    pub fn new(mode: PredictionMode, value: f64) -> Self {
        Self {
            mode,
            value,
            points: DEFAULT_PREDICTION_POINTS,
            range: None,
        }
    }

    pub fn isotherm(temperature: f64) -> Self {
        Self::new(PredictionMode::Isotherm, temperature)
    }

    pub fn isobar(pressure: f64) -> Self {
        Self::new(PredictionMode::Isobar, pressure)
    }

    pub fn isostere(loading: f64) -> Self {
        Self::new(PredictionMode::Isostere, loading)
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.range = Some(Interval { lo, hi });
        self
    }

    fn validate(&self) -> PredictResult<()> {
        if !(self.value.is_finite() && self.value > 0.0) {
            return Err(PredictError::domain(
                format!("{} {}", self.mode, self.mode.fixed_label()),
                self.value,
            ));
        }
        if self.points < 2 {
            return Err(PredictError::invalid(format!(
                "{} needs at least 2 points, got {}",
                self.mode, self.points
            )));
        }
        if let Some(r) = self.range
            && !(r.lo.is_finite() && r.hi.is_finite() && r.lo > 0.0 && r.lo < r.hi)
        {
            return Err(PredictError::invalid(format!(
                "{} range [{}, {}] must be positive and increasing",
                self.mode, r.lo, r.hi
            )));
        }
        Ok(())
    }
}

/// A predicted curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub mode: PredictionMode,
    pub value: f64,
    /// Interval over which the characteristic curve is not extrapolated.
    /// For an isostere given a range that stays on the curve, that range.
    pub boundaries: Interval,
    /// Interval actually sampled.
    pub range: Interval,
    /// `(independent, dependent)` pairs ordered by the independent variable.
    pub points: Vec<(f64, f64)>,
}

/// Predicts curves from one characteristic curve, saturation method and
/// density correlation.
#[derive(Debug, Clone)]
pub struct Predictor<'a> {
    curve: &'a CharacteristicCurve,
    saturation: &'a SaturationResolver<'a>,
    density: DensityMethod,
    boundary: BoundaryConfig,
}

impl<'a> Predictor<'a> {
    pub fn new(
        curve: &'a CharacteristicCurve,
        saturation: &'a SaturationResolver<'a>,
        density: DensityMethod,
    ) -> Self {
        Self {
            curve,
            saturation,
            density,
            boundary: BoundaryConfig::default(),
        }
    }

    pub fn with_boundary_config(mut self, boundary: BoundaryConfig) -> Self {
        self.boundary = boundary;
        self
    }

    /// Interval of the independent variable spanned by the curve.
    pub fn boundaries(&self, request: &PredictionRequest) -> PredictResult<Interval> {
        request.validate()?;
        match request.mode {
            PredictionMode::Isotherm => {
                isotherm_pressure_range(self.curve, self.saturation, request.value)
            }
            PredictionMode::Isobar => isobar_temperature_range(
                self.curve,
                self.saturation,
                request.value,
                &self.boundary,
            ),
            PredictionMode::Isostere => self.isostere_boundaries(request),
        }
    }

    /// A requested range is checked directly against the curve: volume is
    /// monotonic in temperature, so its ends decide containment. Without a
    /// range, or when it leaves the curve, the envelope is searched for.
    fn isostere_boundaries(&self, request: &PredictionRequest) -> PredictResult<Interval> {
        if let Some(range) = request.range {
            let props = self.saturation.properties();
            let (w_lo, w_hi) = self.curve.volume_range();
            let slack = 1e-12 * w_hi.abs();
            for t in [range.lo, range.hi] {
                let volume = volume_from_loading(request.value, self.density.density(t, props)?)?;
                if volume < w_lo - slack || volume > w_hi + slack {
                    if !self.density.is_temperature_dependent() {
                        return Err(PredictError::domain(
                            format!("isostere volume outside curve [{w_lo}, {w_hi}] ml/g"),
                            volume,
                        ));
                    }
                    return isostere_temperature_range(
                        self.curve,
                        self.saturation,
                        self.density,
                        request.value,
                        &self.boundary,
                    );
                }
            }
            return Ok(range);
        }
        isostere_temperature_range(
            self.curve,
            self.saturation,
            self.density,
            request.value,
            &self.boundary,
        )
    }

    pub fn predict(&self, request: &PredictionRequest) -> PredictResult<Prediction> {
        let boundaries = self.boundaries(request)?;
        let range = select_range(boundaries, request.range);
        info!(
            mode = %request.mode,
            value = request.value,
            boundary_lo = boundaries.lo,
            boundary_hi = boundaries.hi,
            lo = range.lo,
            hi = range.hi,
            "prediction boundaries"
        );

        let xs = sample(range.lo, range.hi, request.points, request.mode.spacing())?;
        let points = match request.mode {
            PredictionMode::Isotherm => self.isotherm(request.value, &xs)?,
            PredictionMode::Isobar => self.isobar(request.value, &xs)?,
            PredictionMode::Isostere => self.isostere(request.value, &xs)?,
        };
        Ok(Prediction {
            mode: request.mode,
            value: request.value,
            boundaries,
            range,
            points,
        })
    }

    fn isotherm(&self, temperature: f64, pressures: &[f64]) -> PredictResult<Vec<(f64, f64)>> {
        let psat = self.saturation.pressure(temperature)?;
        let rho = self
            .density
            .density(temperature, self.saturation.properties())?;
        pressures
            .iter()
            .map(|&p| {
                let a = adsorption_potential(temperature, psat, p)?;
                Ok((p, loading_from_volume(self.curve.volume_at(a), rho)?))
            })
            .collect()
    }

    fn isobar(&self, pressure: f64, temperatures: &[f64]) -> PredictResult<Vec<(f64, f64)>> {
        let props = self.saturation.properties();
        temperatures
            .iter()
            .map(|&t| {
                let psat = self.saturation.pressure(t)?;
                let rho = self.density.density(t, props)?;
                let a = adsorption_potential(t, psat, pressure)?;
                Ok((t, loading_from_volume(self.curve.volume_at(a), rho)?))
            })
            .collect()
    }

    fn isostere(&self, loading: f64, temperatures: &[f64]) -> PredictResult<Vec<(f64, f64)>> {
        let props = self.saturation.properties();
        temperatures
            .iter()
            .map(|&t| {
                let rho = self.density.density(t, props)?;
                let a = self.curve.potential_at(volume_from_loading(loading, rho)?)?;
                let psat = self.saturation.pressure(t)?;
                Ok((t, pressure_from_potential(a, psat, t)?))
            })
            .collect()
    }
}

/// Predict one curve with default boundary settings.
pub fn predict(
    request: &PredictionRequest,
    curve: &CharacteristicCurve,
    saturation: &SaturationResolver<'_>,
    density: DensityMethod,
) -> PredictResult<Prediction> {
    Predictor::new(curve, saturation, density).predict(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_parse() {
        for mode in PredictionMode::ALL {
            assert_eq!(mode.name().parse::<PredictionMode>().unwrap(), mode);
        }
        assert_eq!(" Isobar ".parse::<PredictionMode>().unwrap(), PredictionMode::Isobar);
        assert!("isochore".parse::<PredictionMode>().is_err());
    }

    #[test]
    fn request_validation() {
        assert!(PredictionRequest::isotherm(298.0).validate().is_ok());
        assert!(PredictionRequest::isotherm(-1.0).validate().is_err());
        assert!(PredictionRequest::isobar(1.0).with_points(1).validate().is_err());
        assert!(
            PredictionRequest::isostere(5.0)
                .with_range(300.0, 250.0)
                .validate()
                .is_err()
        );
    }
}
