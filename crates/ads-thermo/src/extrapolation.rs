//! Equation-of-state saturation curve with supercritical extrapolation.
//!
//! The equation of state is solved on a temperature grid from the boiling
//! point to the critical point, each solve seeded with the previous result.
//! Below Tc the grid is interpolated with a cubic spline; above Tc a
//! regression fitted to the same grid takes over.

use std::fmt;
use std::str::FromStr;

use ads_core::numeric::{Spacing, sample};
use ads_solver::{LmConfig, levenberg_marquardt, polyfit, polyval};
use tracing::{debug, info};

use crate::eos::EquationOfState;
use crate::error::{ThermoError, ThermoResult};
use crate::properties::AdsorbateProperties;
use crate::saturation::equation_saturation_pressure;
use crate::spline::CubicSpline;

pub const DEFAULT_EXTRAPOLATION_POINTS: usize = 50;

/// Functional form of the supercritical regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegressionForm {
    /// `a T^2 + b T + c`
    #[default]
    Polynomial2,
    /// `Pc (T/Tc)^k`
    Amankwah,
    /// `a (T/Tc)^b + c`
    Custom,
}

impl RegressionForm {
    pub fn name(self) -> &'static str {
        match self {
            Self::Polynomial2 => "polynomial2",
            Self::Amankwah => "amankwah",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for RegressionForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegressionForm {
    type Err = ThermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polynomial2" | "quadratic" => Ok(Self::Polynomial2),
            "amankwah" => Ok(Self::Amankwah),
            "custom" => Ok(Self::Custom),
            _ => Err(ThermoError::UnknownMethod {
                family: "regression form",
                name: s.to_string(),
                expected: "polynomial2, amankwah, custom",
            }),
        }
    }
}

/// Regression fitted to (temperature, saturation pressure) samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub form: RegressionForm,
    pub params: Vec<f64>,
    /// Largest absolute deviation from the fitted samples, MPa.
    pub max_residual: f64,
    temperature_critical: f64,
    pressure_critical: f64,
}

impl Regression {
    pub fn fit(
        form: RegressionForm,
        temperatures: &[f64],
        pressures: &[f64],
        props: &AdsorbateProperties,
    ) -> ThermoResult<Self> {
        let tc = props.temperature_critical;
        let pc = props.pressure_critical;
        let config = LmConfig::default();
        let params = match form {
            RegressionForm::Polynomial2 => polyfit(temperatures, pressures, 2)?,
            RegressionForm::Amankwah => {
                levenberg_marquardt(
                    temperatures,
                    pressures,
                    &[props.amankwah_exponent],
                    |t, p| pc * (t / tc).powf(p[0]),
                    &config,
                )?
                .params
            }
            RegressionForm::Custom => {
                levenberg_marquardt(
                    temperatures,
                    pressures,
                    &[pc, props.amankwah_exponent, 0.0],
                    |t, p| p[0] * (t / tc).powf(p[1]) + p[2],
                    &config,
                )?
                .params
            }
        };

        let mut regression = Self {
            form,
            params,
            max_residual: 0.0,
            temperature_critical: tc,
            pressure_critical: pc,
        };
        regression.max_residual = temperatures
            .iter()
            .zip(pressures)
            .map(|(t, p)| (regression.evaluate(*t) - p).abs())
            .fold(0.0, f64::max);

        info!(
            form = %form,
            params = ?regression.params,
            max_residual = regression.max_residual,
            "fitted saturation pressure regression"
        );
        Ok(regression)
    }

    pub fn evaluate(&self, temperature: f64) -> f64 {
        let tr = temperature / self.temperature_critical;
        match self.form {
            RegressionForm::Polynomial2 => polyval(&self.params, temperature),
            RegressionForm::Amankwah => self.pressure_critical * tr.powf(self.params[0]),
            RegressionForm::Custom => self.params[0] * tr.powf(self.params[1]) + self.params[2],
        }
    }
}

/// Settings of the extrapolated-equation saturation method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrapolatedEquation {
    pub equation: EquationOfState,
    pub regression: RegressionForm,
    /// Grid size from the boiling to the critical temperature, both included.
    pub points: usize,
    /// Seed of the first solve at the boiling temperature, MPa.
    pub initial_guess: f64,
}

impl ExtrapolatedEquation {
    pub fn new(equation: EquationOfState, regression: RegressionForm) -> Self {
        Self {
            equation,
            regression,
            points: DEFAULT_EXTRAPOLATION_POINTS,
            initial_guess: crate::saturation::DEFAULT_PRESSURE_GUESS,
        }
    }
}

/// Solved grid plus the two evaluation branches built from it.
#[derive(Debug, Clone)]
pub struct EquationCurve {
    settings: ExtrapolatedEquation,
    temperatures: Vec<f64>,
    pressures: Vec<f64>,
    spline: CubicSpline,
    regression: Regression,
}

impl EquationCurve {
    /// Solve the grid sequentially and fit both branches.
    ///
    /// The last node is the critical point itself, shared by every
    /// Peng–Robinson variant, so it is pinned instead of solved.
    pub fn build(settings: ExtrapolatedEquation, props: &AdsorbateProperties) -> ThermoResult<Self> {
        if settings.points < 3 {
            return Err(ThermoError::invalid(format!(
                "extrapolated equation needs at least 3 grid points, got {}",
                settings.points
            )));
        }
        let tb = props.temperature_boiling;
        let tc = props.temperature_critical;
        let temperatures = sample(tb, tc, settings.points, Spacing::Linear)?;

        let mut pressures = Vec::with_capacity(settings.points);
        let mut guess = settings.initial_guess;
        for &t in &temperatures[..settings.points - 1] {
            let p = equation_saturation_pressure(settings.equation, props, t, guess)?;
            pressures.push(p);
            guess = p;
        }
        pressures.push(props.pressure_critical);
        debug!(
            equation = %settings.equation,
            points = settings.points,
            "solved saturation grid from boiling to critical temperature"
        );

        let spline = CubicSpline::new(temperatures.clone(), pressures.clone())?;
        let regression = Regression::fit(settings.regression, &temperatures, &pressures, props)?;

        Ok(Self {
            settings,
            temperatures,
            pressures,
            spline,
            regression,
        })
    }

    pub fn settings(&self) -> &ExtrapolatedEquation {
        &self.settings
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn pressures(&self) -> &[f64] {
        &self.pressures
    }

    pub fn regression(&self) -> &Regression {
        &self.regression
    }

    /// Spline branch, valid between the boiling and critical temperatures.
    pub fn interpolate(&self, temperature: f64) -> f64 {
        self.spline.evaluate(temperature)
    }

    /// Regression branch, used above the critical temperature.
    pub fn extrapolate(&self, temperature: f64) -> f64 {
        self.regression.evaluate(temperature)
    }

    /// Saturation pressure at any temperature.
    ///
    /// Below the grid the equation of state is solved directly, seeded with
    /// the lowest grid pressure.
    pub fn pressure(&self, temperature: f64, props: &AdsorbateProperties) -> ThermoResult<f64> {
        let p = if temperature < self.spline.x_min() {
            equation_saturation_pressure(
                self.settings.equation,
                props,
                temperature,
                self.pressures[0],
            )?
        } else if temperature <= self.spline.x_max() {
            self.interpolate(temperature)
        } else {
            self.extrapolate(temperature)
        };
        if !(p > 0.0) {
            return Err(ThermoError::domain(
                format!("extrapolated saturation pressure at {temperature} K"),
                p,
            ));
        }
        Ok(p)
    }
}
