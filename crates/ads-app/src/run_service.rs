//! Run execution service.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ads_predict::{
    CharacteristicCurve, CharacteristicPoints, EnthalpyPoint, Prediction, PredictionMode,
    PredictionRequest, Predictor, isosteric_enthalpy,
};
use ads_project::{PredictionKind, RunConfig, resolve_path, write_columns};
use ads_thermo::{
    PropertyCurve, SaturationResolver, TemperatureSweep, density_curve, saturation_pressure_curve,
};
use tracing::info;

use crate::error::AppResult;
use crate::setup::{
    build_saturation_method, load_properties, load_reference, parse_density_method,
};

/// Request to execute a run.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    pub config_path: &'a Path,
    /// Write the configured output files.
    pub write_outputs: bool,
}

/// Everything a run computed.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub name: String,
    pub curve: CharacteristicCurve,
    /// Per-isotherm potential/volume points; empty for a characteristic
    /// curve reference.
    pub mapped: Vec<CharacteristicPoints>,
    pub saturation_curve: Option<PropertyCurve>,
    pub density_curve: Option<PropertyCurve>,
    pub enthalpy: Option<Vec<EnthalpyPoint>>,
    pub predictions: Vec<Prediction>,
    pub written: Vec<PathBuf>,
    pub elapsed_s: f64,
}

/// Load, validate and execute the run configuration at `config_path`.
pub fn execute_run(request: &RunRequest) -> AppResult<RunReport> {
    let config = ads_project::load_run(request.config_path)?;
    execute_config(&config, request.config_path, request.write_outputs)
}

/// Execute an already loaded configuration. Relative paths are taken from
/// the directory of `config_path`.
pub fn execute_config(
    config: &RunConfig,
    config_path: &Path,
    write_outputs: bool,
) -> AppResult<RunReport> {
    let started = Instant::now();
    ads_project::validate_run(config)?;

    let props = load_properties(&resolve_path(config_path, &config.properties))?;
    let method = build_saturation_method(&config.saturation, &props, config_path)?;
    let density = parse_density_method(&config.density.method)?;
    let resolver = SaturationResolver::new(method, &props)?;
    info!(
        saturation = %resolver.method().kind(),
        density = %density,
        "run methods prepared"
    );

    let reference = load_reference(&config.reference, config_path, &resolver, density)?;
    let curve = reference.curve;

    let (saturation_curve, density_curve) = match &config.sweep {
        Some(def) => {
            let sweep = TemperatureSweep {
                start: def.start,
                end: def.end,
                points: def.points,
            };
            (
                Some(saturation_pressure_curve(&resolver, &sweep)?),
                Some(density_curve(density, &props, &sweep)?),
            )
        }
        None => (None, None),
    };

    let enthalpy = match &config.enthalpy {
        Some(def) => Some(isosteric_enthalpy(
            &curve,
            def.temperature,
            def.vaporization,
            props.thermal_expansion_coefficient,
        )?),
        None => None,
    };

    let predictor = Predictor::new(&curve, &resolver, density);
    let mut predictions = Vec::new();
    for def in &config.predictions {
        for &value in &def.values {
            let mut request =
                PredictionRequest::new(mode_for(def.kind), value).with_points(def.points);
            if let Some([lo, hi]) = def.range {
                request = request.with_range(lo, hi);
            }
            predictions.push(predictor.predict(&request)?);
        }
    }

    let mut report = RunReport {
        name: config.name.clone(),
        curve,
        mapped: reference.mapped,
        saturation_curve,
        density_curve,
        enthalpy,
        predictions,
        written: Vec::new(),
        elapsed_s: 0.0,
    };

    if write_outputs && let Some(dir) = &config.output {
        report.written = write_report(&report, &resolve_path(config_path, dir))?;
    }

    report.elapsed_s = started.elapsed().as_secs_f64();
    info!(
        predictions = report.predictions.len(),
        files = report.written.len(),
        elapsed_s = report.elapsed_s,
        "run finished"
    );
    Ok(report)
}

pub fn mode_for(kind: PredictionKind) -> PredictionMode {
    match kind {
        PredictionKind::Isotherm => PredictionMode::Isotherm,
        PredictionKind::Isobar => PredictionMode::Isobar,
        PredictionKind::Isostere => PredictionMode::Isostere,
    }
}

/// Write every series of `report` under `dir`, one `.dat` file each.
pub fn write_report(report: &RunReport, dir: &Path) -> AppResult<Vec<PathBuf>> {
    const CURVE_COLUMNS: (&str, &str) = ("potential [kJ/mol]", "volume [ml/g]");
    let mut written = Vec::new();
    let mut write = |name: String, columns: (&str, &str), rows: &[(f64, f64)]| -> AppResult<()> {
        let path = dir.join(name);
        write_columns(&path, columns, rows)?;
        written.push(path);
        Ok(())
    };

    let rows: Vec<(f64, f64)> = report.curve.points().collect();
    write("characteristic.dat".to_string(), CURVE_COLUMNS, &rows)?;
    for mapped in &report.mapped {
        write(
            format!("characteristic_{}K.dat", mapped.temperature),
            CURVE_COLUMNS,
            &mapped.points,
        )?;
    }
    if let Some(curve) = &report.saturation_curve {
        let rows: Vec<(f64, f64)> = curve.pairs().collect();
        write(
            "saturation_pressure.dat".to_string(),
            ("temperature [K]", "saturation pressure [MPa]"),
            &rows,
        )?;
    }
    if let Some(curve) = &report.density_curve {
        let rows: Vec<(f64, f64)> = curve.pairs().collect();
        write(
            "density.dat".to_string(),
            ("temperature [K]", "adsorbate density [kg/m3]"),
            &rows,
        )?;
    }
    if let Some(points) = &report.enthalpy {
        let rows: Vec<(f64, f64)> = points.iter().map(|p| (p.volume, p.enthalpy)).collect();
        write(
            "enthalpy.dat".to_string(),
            ("volume [ml/g]", "enthalpy of adsorption [kJ/mol]"),
            &rows,
        )?;
    }
    for prediction in &report.predictions {
        write(
            format!("{}_{}.dat", prediction.mode, prediction.value),
            prediction.mode.columns(),
            &prediction.points,
        )?;
    }
    Ok(written)
}
