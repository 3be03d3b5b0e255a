//! Saturation pressure resolver.
//!
//! [`SaturationMethod`] is a closed set of strategies; each variant carries
//! only the parameters it needs. [`SaturationResolver`] prepares whatever a
//! method needs up front (the solved grid of the extrapolated-equation
//! method) and then answers `pressure(T)` queries.

use std::fmt;
use std::str::FromStr;

use ads_solver::{NewtonConfig, SolverError, newton_solve};
use tracing::debug;

use crate::compressibility::{Phase, solve_compressibility};
use crate::correlations::{
    DEFAULT_WIDOM_BANUTI_PARAMETER, PolynomialCorrelation, amankwah, critical_isochore, dubinin,
    widom_banuti_supercritical,
};
use crate::eos::EquationOfState;
use crate::error::{ThermoError, ThermoResult};
use crate::extrapolation::{EquationCurve, ExtrapolatedEquation, RegressionForm};
use crate::properties::AdsorbateProperties;
use crate::table::SaturationTable;

/// Seed of an equation-of-state solve when none is given, MPa.
pub const DEFAULT_PRESSURE_GUESS: f64 = 1.0;

/// `phi_vapor / phi_liquid` at (T, P). Equals one on the saturation curve.
pub fn fugacity_ratio(
    equation: EquationOfState,
    props: &AdsorbateProperties,
    temperature: f64,
    pressure: f64,
) -> ThermoResult<f64> {
    let params = equation.params(props, temperature, pressure);
    let z_vapor = solve_compressibility(&params, Phase::Vapor)?;
    let z_liquid = solve_compressibility(&params, Phase::Liquid)?;
    Ok(params.fugacity_coefficient(z_vapor)? / params.fugacity_coefficient(z_liquid)?)
}

/// Pressure at which vapour and liquid fugacities are equal.
pub fn equation_saturation_pressure(
    equation: EquationOfState,
    props: &AdsorbateProperties,
    temperature: f64,
    pressure_guess: f64,
) -> ThermoResult<f64> {
    if !(temperature > 0.0 && temperature < props.temperature_critical) {
        return Err(ThermoError::domain(
            format!(
                "{equation} saturation temperature (must lie in (0, {}) K)",
                props.temperature_critical
            ),
            temperature,
        ));
    }
    if !(pressure_guess > 0.0 && pressure_guess.is_finite()) {
        return Err(ThermoError::invalid(format!(
            "pressure guess must be positive, got {pressure_guess}"
        )));
    }

    let result = newton_solve(
        pressure_guess,
        |p| fugacity_ratio(equation, props, temperature, p).map(|ratio| ratio - 1.0),
        &NewtonConfig::positive(),
    )
    .map_err(|e| match e {
        ThermoError::Solver(SolverError::ConvergenceFailed { what }) => {
            ThermoError::Solver(SolverError::ConvergenceFailed {
                what: format!("{equation} saturation pressure at {temperature} K: {what}"),
            })
        }
        other => other,
    })?;

    debug!(
        equation = %equation,
        temperature,
        pressure = result.x,
        iterations = result.iterations,
        "saturation pressure solved"
    );
    Ok(result.x)
}

/// Tag of a saturation pressure method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaturationMethodKind {
    Dubinin,
    Amankwah,
    Polynomial,
    PengRobinson,
    Prsv1,
    Prsv2,
    ExtrapolatedEquation,
    WidomBanuti,
    CriticalIsochore,
    TabulatedExtrapolation,
}

const METHOD_NAMES: &str = "dubinin, amankwah, polynomial, peng-robinson, prsv1, prsv2, \
extrapolated-equation, widom-banuti, critical-isochore, tabulated-extrapolation";

impl SaturationMethodKind {
    pub const ALL: [SaturationMethodKind; 10] = [
        Self::Dubinin,
        Self::Amankwah,
        Self::Polynomial,
        Self::PengRobinson,
        Self::Prsv1,
        Self::Prsv2,
        Self::ExtrapolatedEquation,
        Self::WidomBanuti,
        Self::CriticalIsochore,
        Self::TabulatedExtrapolation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dubinin => "dubinin",
            Self::Amankwah => "amankwah",
            Self::Polynomial => "polynomial",
            Self::PengRobinson => "peng-robinson",
            Self::Prsv1 => "prsv1",
            Self::Prsv2 => "prsv2",
            Self::ExtrapolatedEquation => "extrapolated-equation",
            Self::WidomBanuti => "widom-banuti",
            Self::CriticalIsochore => "critical-isochore",
            Self::TabulatedExtrapolation => "tabulated-extrapolation",
        }
    }
}

impl fmt::Display for SaturationMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SaturationMethodKind {
    type Err = ThermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == tag)
            .ok_or_else(|| ThermoError::UnknownMethod {
                family: "saturation pressure method",
                name: s.to_string(),
                expected: METHOD_NAMES,
            })
    }
}

/// Saturation pressure strategy with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum SaturationMethod {
    Dubinin,
    Amankwah {
        exponent: f64,
    },
    Polynomial(PolynomialCorrelation),
    PengRobinson {
        pressure_guess: f64,
    },
    Prsv1 {
        pressure_guess: f64,
    },
    Prsv2 {
        pressure_guess: f64,
    },
    ExtrapolatedEquation(ExtrapolatedEquation),
    /// Closed form above Tc, Peng–Robinson below.
    WidomBanuti {
        species_parameter: f64,
        pressure_guess: f64,
    },
    CriticalIsochore,
    TabulatedExtrapolation(SaturationTable),
}

impl SaturationMethod {
    pub fn kind(&self) -> SaturationMethodKind {
        match self {
            Self::Dubinin => SaturationMethodKind::Dubinin,
            Self::Amankwah { .. } => SaturationMethodKind::Amankwah,
            Self::Polynomial(_) => SaturationMethodKind::Polynomial,
            Self::PengRobinson { .. } => SaturationMethodKind::PengRobinson,
            Self::Prsv1 { .. } => SaturationMethodKind::Prsv1,
            Self::Prsv2 { .. } => SaturationMethodKind::Prsv2,
            Self::ExtrapolatedEquation(_) => SaturationMethodKind::ExtrapolatedEquation,
            Self::WidomBanuti { .. } => SaturationMethodKind::WidomBanuti,
            Self::CriticalIsochore => SaturationMethodKind::CriticalIsochore,
            Self::TabulatedExtrapolation(_) => SaturationMethodKind::TabulatedExtrapolation,
        }
    }

    /// Method of the given kind with default parameters.
    ///
    /// The polynomial default is the water correlation and the extrapolated
    /// equation defaults to Peng–Robinson with a quadratic regression. A
    /// tabulated method has no default table and is rejected.
    pub fn with_defaults(
        kind: SaturationMethodKind,
        props: &AdsorbateProperties,
    ) -> ThermoResult<Self> {
        let pressure_guess = DEFAULT_PRESSURE_GUESS;
        Ok(match kind {
            SaturationMethodKind::Dubinin => Self::Dubinin,
            SaturationMethodKind::Amankwah => Self::Amankwah {
                exponent: props.amankwah_exponent,
            },
            SaturationMethodKind::Polynomial => Self::Polynomial(PolynomialCorrelation::water()),
            SaturationMethodKind::PengRobinson => Self::PengRobinson { pressure_guess },
            SaturationMethodKind::Prsv1 => Self::Prsv1 { pressure_guess },
            SaturationMethodKind::Prsv2 => Self::Prsv2 { pressure_guess },
            SaturationMethodKind::ExtrapolatedEquation => {
                Self::ExtrapolatedEquation(ExtrapolatedEquation::new(
                    EquationOfState::PengRobinson,
                    RegressionForm::Polynomial2,
                ))
            }
            SaturationMethodKind::WidomBanuti => Self::WidomBanuti {
                species_parameter: DEFAULT_WIDOM_BANUTI_PARAMETER,
                pressure_guess,
            },
            SaturationMethodKind::CriticalIsochore => Self::CriticalIsochore,
            SaturationMethodKind::TabulatedExtrapolation => {
                return Err(ThermoError::invalid(
                    "tabulated-extrapolation needs a saturation pressure table",
                ));
            }
        })
    }
}

/// Saturation pressure evaluator for one method and one adsorbate.
#[derive(Debug, Clone)]
pub struct SaturationResolver<'a> {
    props: &'a AdsorbateProperties,
    method: SaturationMethod,
    curve: Option<EquationCurve>,
}

impl<'a> SaturationResolver<'a> {
    /// Prepare the method. For the extrapolated-equation method this runs
    /// the full continuation solve.
    pub fn new(method: SaturationMethod, props: &'a AdsorbateProperties) -> ThermoResult<Self> {
        let curve = match &method {
            SaturationMethod::ExtrapolatedEquation(settings) => {
                Some(EquationCurve::build(*settings, props)?)
            }
            _ => None,
        };
        Ok(Self {
            props,
            method,
            curve,
        })
    }

    pub fn method(&self) -> &SaturationMethod {
        &self.method
    }

    pub fn properties(&self) -> &AdsorbateProperties {
        self.props
    }

    /// Solved grid of the extrapolated-equation method, if that is the method.
    pub fn curve(&self) -> Option<&EquationCurve> {
        self.curve.as_ref()
    }

    /// Saturation pressure in MPa at `temperature` K.
    pub fn pressure(&self, temperature: f64) -> ThermoResult<f64> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(ThermoError::domain("temperature", temperature));
        }
        let props = self.props;
        let p = match &self.method {
            SaturationMethod::Dubinin => dubinin(temperature, props),
            SaturationMethod::Amankwah { exponent } => amankwah(temperature, props, *exponent),
            SaturationMethod::Polynomial(poly) => poly.pressure(temperature)?,
            SaturationMethod::PengRobinson { pressure_guess } => equation_saturation_pressure(
                EquationOfState::PengRobinson,
                props,
                temperature,
                *pressure_guess,
            )?,
            SaturationMethod::Prsv1 { pressure_guess } => equation_saturation_pressure(
                EquationOfState::Prsv1,
                props,
                temperature,
                *pressure_guess,
            )?,
            SaturationMethod::Prsv2 { pressure_guess } => equation_saturation_pressure(
                EquationOfState::Prsv2,
                props,
                temperature,
                *pressure_guess,
            )?,
            SaturationMethod::ExtrapolatedEquation(_) => match &self.curve {
                Some(curve) => curve.pressure(temperature, props)?,
                None => return Err(ThermoError::invalid("extrapolation grid was not prepared")),
            },
            SaturationMethod::WidomBanuti {
                species_parameter,
                pressure_guess,
            } => {
                if temperature >= props.temperature_critical {
                    widom_banuti_supercritical(temperature, props, *species_parameter)
                } else {
                    equation_saturation_pressure(
                        EquationOfState::PengRobinson,
                        props,
                        temperature,
                        *pressure_guess,
                    )?
                }
            }
            SaturationMethod::CriticalIsochore => critical_isochore(temperature, props)?,
            SaturationMethod::TabulatedExtrapolation(table) => table.pressure(temperature)?,
        };
        if !(p.is_finite() && p > 0.0) {
            return Err(ThermoError::domain(
                format!("{} saturation pressure at {temperature} K", self.method.kind()),
                p,
            ));
        }
        Ok(p)
    }
}

/// One-shot saturation pressure evaluation.
///
/// Prepares the method on every call; build a [`SaturationResolver`] to
/// evaluate many temperatures.
pub fn solve_saturation_pressure(
    method: &SaturationMethod,
    temperature: f64,
    props: &AdsorbateProperties,
) -> ThermoResult<f64> {
    SaturationResolver::new(method.clone(), props)?.pressure(temperature)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn co2() -> AdsorbateProperties {
        AdsorbateProperties::new(44.01, 304.13, 7.3773, 0.22394, 194.7, 1178.5)
    }

    #[test]
    fn tags_round_trip() {
        for kind in SaturationMethodKind::ALL {
            assert_eq!(kind.name().parse::<SaturationMethodKind>().unwrap(), kind);
        }
        assert_eq!(
            "widom_banuti".parse::<SaturationMethodKind>().unwrap(),
            SaturationMethodKind::WidomBanuti
        );
    }

    #[test]
    fn unknown_tag_lists_alternatives() {
        let err = "antoine".parse::<SaturationMethodKind>().unwrap_err();
        match err {
            ThermoError::UnknownMethod { name, expected, .. } => {
                assert_eq!(name, "antoine");
                assert!(expected.contains("critical-isochore"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn defaults_cover_every_kind_but_tables() {
        let props = co2();
        for kind in SaturationMethodKind::ALL {
            let method = SaturationMethod::with_defaults(kind, &props);
            if kind == SaturationMethodKind::TabulatedExtrapolation {
                assert!(method.is_err());
            } else {
                assert_eq!(method.unwrap().kind(), kind);
            }
        }
    }

    #[test]
    fn equation_solve_rejects_supercritical_temperature() {
        let err =
            equation_saturation_pressure(EquationOfState::PengRobinson, &co2(), 320.0, 1.0)
                .unwrap_err();
        assert!(matches!(err, ThermoError::NumericDomain { .. }));
    }

    #[test]
    fn widom_banuti_switches_at_critical_temperature() {
        let props = co2();
        let method = SaturationMethod::WidomBanuti {
            species_parameter: 5.589,
            pressure_guess: 1.0,
        };
        let resolver = SaturationResolver::new(method, &props).unwrap();
        let hot = resolver.pressure(320.0).unwrap();
        assert!((hot - 7.3773 * (5.589_f64 * (320.0 / 304.13 - 1.0)).exp()).abs() < 1e-12);
        let cold = resolver.pressure(250.0).unwrap();
        let pr = solve_saturation_pressure(
            &SaturationMethod::PengRobinson { pressure_guess: 1.0 },
            250.0,
            &props,
        )
        .unwrap();
        assert_eq!(cold, pr);
    }

    #[test]
    fn non_positive_temperature_is_a_domain_error() {
        let props = co2();
        let err = solve_saturation_pressure(&SaturationMethod::Dubinin, 0.0, &props).unwrap_err();
        assert!(matches!(err, ThermoError::NumericDomain { .. }));
    }
}
