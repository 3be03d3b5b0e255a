//! Build runtime objects from a run configuration.

use std::path::Path;
use std::str::FromStr;

use ads_core::units::{Quantity, parse_quantity};
use ads_predict::{
    CharacteristicCurve, CharacteristicPoints, IsothermData, characteristic_points,
};
use ads_project::{ColumnUnits, ReferenceDef, ReferenceKind, SaturationDef, read_columns};
use ads_thermo::{
    AdsorbateProperties, DensityMethod, EquationOfState, PolynomialCorrelation, RegressionForm,
    SaturationMethod, SaturationMethodKind, SaturationResolver, SaturationTable,
};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Load and validate a JSON property file.
pub fn load_properties(path: &Path) -> AppResult<AdsorbateProperties> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let props = AdsorbateProperties::from_json_str(&content)?;
    debug!(path = %path.display(), name = ?props.name, "loaded adsorbate properties");
    Ok(props)
}

/// Turn the configured method tag and parameters into a saturation method.
///
/// A relative table path is taken from the directory of `config_path`.
pub fn build_saturation_method(
    def: &SaturationDef,
    props: &AdsorbateProperties,
    config_path: &Path,
) -> AppResult<SaturationMethod> {
    let kind = SaturationMethodKind::from_str(&def.method)?;
    let method = match kind {
        SaturationMethodKind::TabulatedExtrapolation => {
            let Some(table) = &def.table else {
                return Err(AppError::InvalidInput(
                    "tabulated-extrapolation needs 'table'".to_string(),
                ));
            };
            let path = ads_project::resolve_path(config_path, table);
            let rows = read_columns(&path)?;
            let (temps, pressures): (Vec<f64>, Vec<f64>) = rows.into_iter().unzip();
            SaturationMethod::TabulatedExtrapolation(SaturationTable::new(&temps, &pressures)?)
        }
        _ => override_parameters(SaturationMethod::with_defaults(kind, props)?, def)?,
    };
    Ok(method)
}

fn override_parameters(
    mut method: SaturationMethod,
    def: &SaturationDef,
) -> AppResult<SaturationMethod> {
    match &mut method {
        SaturationMethod::Amankwah { exponent } => {
            if let Some(k) = def.exponent {
                *exponent = k;
            }
        }
        SaturationMethod::Polynomial(poly) => {
            if let Some(coefficients) = &def.coefficients {
                *poly = PolynomialCorrelation::new(coefficients.clone())?;
            }
        }
        SaturationMethod::PengRobinson { pressure_guess }
        | SaturationMethod::Prsv1 { pressure_guess }
        | SaturationMethod::Prsv2 { pressure_guess } => {
            if let Some(guess) = def.pressure_guess {
                *pressure_guess = guess;
            }
        }
        SaturationMethod::ExtrapolatedEquation(settings) => {
            if let Some(equation) = &def.equation {
                settings.equation = EquationOfState::from_str(equation)?;
            }
            if let Some(regression) = &def.regression {
                settings.regression = RegressionForm::from_str(regression)?;
            }
            if let Some(points) = def.points {
                settings.points = points;
            }
            if let Some(guess) = def.pressure_guess {
                settings.initial_guess = guess;
            }
        }
        SaturationMethod::WidomBanuti {
            species_parameter,
            pressure_guess,
        } => {
            if let Some(a) = def.species_parameter {
                *species_parameter = a;
            }
            if let Some(guess) = def.pressure_guess {
                *pressure_guess = guess;
            }
        }
        SaturationMethod::Dubinin
        | SaturationMethod::CriticalIsochore
        | SaturationMethod::TabulatedExtrapolation(_) => {}
    }
    Ok(method)
}

pub fn parse_density_method(tag: &str) -> AppResult<DensityMethod> {
    Ok(DensityMethod::from_str(tag)?)
}

/// Multipliers taking the data columns to MPa and mg/g.
pub fn column_factors(units: &ColumnUnits, props: &AdsorbateProperties) -> AppResult<(f64, f64)> {
    let pressure = parse_quantity(&format!("1 {}", units.pressure), Quantity::Pressure)?;
    let loading = match units.loading.trim().to_ascii_lowercase().as_str() {
        "mg/g" | "g/kg" => 1.0,
        "mmol/g" | "mol/kg" => props.molecular_mass,
        other => {
            return Err(AppError::InvalidInput(format!(
                "unknown loading unit '{other}' (expected mg/g, g/kg, mmol/g or mol/kg)"
            )));
        }
    };
    Ok((pressure, loading))
}

/// The characteristic curve of a run plus, for isotherm input, each
/// isotherm mapped into potential/volume coordinates.
#[derive(Debug, Clone)]
pub struct Reference {
    pub curve: CharacteristicCurve,
    pub mapped: Vec<CharacteristicPoints>,
}

pub fn load_reference(
    def: &ReferenceDef,
    config_path: &Path,
    saturation: &SaturationResolver<'_>,
    density: DensityMethod,
) -> AppResult<Reference> {
    let tables = def
        .files
        .iter()
        .map(|file| read_columns(&ads_project::resolve_path(config_path, file)))
        .collect::<Result<Vec<_>, _>>()?;

    match def.kind {
        ReferenceKind::Characteristic => {
            let curve = CharacteristicCurve::new(tables.into_iter().flatten())?;
            info!(points = curve.potentials().len(), "characteristic curve loaded");
            Ok(Reference {
                curve,
                mapped: Vec::new(),
            })
        }
        ReferenceKind::Isotherm => {
            let (p_factor, n_factor) = column_factors(&def.units, saturation.properties())?;
            let isotherms: Vec<IsothermData> = tables
                .into_iter()
                .enumerate()
                .map(|(i, rows)| {
                    let t = if def.temperatures.len() == 1 {
                        def.temperatures[0]
                    } else {
                        def.temperatures[i]
                    };
                    let points = rows
                        .into_iter()
                        .map(|(p, n)| (p * p_factor, n * n_factor))
                        .collect();
                    IsothermData::new(t, points)
                })
                .collect();
            let mapped = characteristic_points(&isotherms, saturation, density)?;
            let curve =
                CharacteristicCurve::new(mapped.iter().flat_map(|m| m.points.iter().copied()))?;
            info!(
                isotherms = mapped.len(),
                points = curve.potentials().len(),
                "characteristic curve built from isotherms"
            );
            Ok(Reference { curve, mapped })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn co2() -> AdsorbateProperties {
        AdsorbateProperties::new(44.01, 304.13, 7.3773, 0.22394, 194.7, 1178.5)
    }

    fn def(method: &str) -> SaturationDef {
        SaturationDef {
            method: method.to_string(),
            ..SaturationDef::default()
        }
    }

    #[test]
    fn parameters_override_defaults() {
        let props = co2();
        let mut d = def("amankwah");
        d.exponent = Some(2.5);
        assert_eq!(
            build_saturation_method(&d, &props, Path::new("run.yaml")).unwrap(),
            SaturationMethod::Amankwah { exponent: 2.5 }
        );

        let mut d = def("extrapolated_equation");
        d.equation = Some("prsv1".to_string());
        d.regression = Some("amankwah".to_string());
        d.points = Some(30);
        match build_saturation_method(&d, &props, Path::new("run.yaml")).unwrap() {
            SaturationMethod::ExtrapolatedEquation(s) => {
                assert_eq!(s.equation, EquationOfState::Prsv1);
                assert_eq!(s.regression, RegressionForm::Amankwah);
                assert_eq!(s.points, 30);
            }
            other => panic!("unexpected method {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_is_unknown_method() {
        let err =
            build_saturation_method(&def("antoine"), &co2(), Path::new("run.yaml")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Computation(ads_core::AdError::UnknownMethod { .. })
        ));
        assert!(matches!(
            parse_density_method("rackett"),
            Err(AppError::Computation(ads_core::AdError::UnknownMethod { .. }))
        ));
    }

    #[test]
    fn table_method_needs_a_table() {
        assert!(matches!(
            build_saturation_method(&def("tabulated-extrapolation"), &co2(), Path::new("run.yaml")),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn column_units_convert() {
        let props = co2();
        let units = ColumnUnits {
            pressure: "kPa".to_string(),
            loading: "mmol/g".to_string(),
        };
        let (p, n) = column_factors(&units, &props).unwrap();
        assert!((p - 1e-3).abs() < 1e-15);
        assert_eq!(n, 44.01);
        let (p, n) = column_factors(&ColumnUnits::default(), &props).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
        assert_eq!(n, 1.0);
    }
}
