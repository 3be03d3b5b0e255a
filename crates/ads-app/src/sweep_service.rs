//! Saturation pressure and density curves over a temperature sweep.

use std::path::Path;

use ads_project::{SaturationDef, write_columns};
use ads_thermo::{
    PropertyCurve, SaturationMethodKind, SaturationResolver, TemperatureSweep, density_curve,
    saturation_pressure_curve,
};
use tracing::info;

use crate::error::AppResult;
use crate::setup::{build_saturation_method, load_properties, parse_density_method};

/// Request for a property sweep.
#[derive(Debug, Clone)]
pub struct SweepRequest<'a> {
    /// Property file; a relative table path is taken from its directory.
    pub properties: &'a Path,
    pub saturation: SaturationDef,
    pub density: Option<String>,
    pub sweep: TemperatureSweep,
}

#[derive(Debug, Clone)]
pub struct SweepReport {
    pub method: SaturationMethodKind,
    pub saturation: PropertyCurve,
    pub density: Option<PropertyCurve>,
}

pub fn run_sweep(request: &SweepRequest) -> AppResult<SweepReport> {
    let props = load_properties(request.properties)?;
    let method = build_saturation_method(&request.saturation, &props, request.properties)?;
    let kind = method.kind();
    let resolver = SaturationResolver::new(method, &props)?;
    let saturation = saturation_pressure_curve(&resolver, &request.sweep)?;

    let density = match &request.density {
        Some(tag) => Some(density_curve(
            parse_density_method(tag)?,
            &props,
            &request.sweep,
        )?),
        None => None,
    };

    info!(
        method = %kind,
        points = saturation.temperatures.len(),
        "saturation sweep finished"
    );
    Ok(SweepReport {
        method: kind,
        saturation,
        density,
    })
}

/// Write the sweep as `saturation_pressure.dat` (and `density.dat`) in `dir`.
pub fn write_sweep(report: &SweepReport, dir: &Path) -> AppResult<()> {
    let rows: Vec<(f64, f64)> = report.saturation.pairs().collect();
    write_columns(
        &dir.join("saturation_pressure.dat"),
        ("temperature [K]", "saturation pressure [MPa]"),
        &rows,
    )?;
    if let Some(density) = &report.density {
        let rows: Vec<(f64, f64)> = density.pairs().collect();
        write_columns(
            &dir.join("density.dat"),
            ("temperature [K]", "adsorbate density [kg/m3]"),
            &rows,
        )?;
    }
    Ok(())
}
