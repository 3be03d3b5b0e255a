use std::path::PathBuf;

use ads_core::AdError;
use ads_project::schema::*;
use ads_project::{ProjectError, ValidationError, migrate_to_latest, validate_run};

fn isotherm_config(files: usize, temperatures: Vec<f64>) -> RunConfig {
    RunConfig {
        version: 1,
        name: String::new(),
        properties: PathBuf::from("co2.json"),
        reference: ReferenceDef {
            kind: ReferenceKind::Isotherm,
            files: (0..files).map(|i| PathBuf::from(format!("iso_{i}.dat"))).collect(),
            temperatures,
            units: ColumnUnits::default(),
        },
        saturation: SaturationDef {
            method: "dubinin".to_string(),
            ..SaturationDef::default()
        },
        density: DensityDef {
            method: "ozawa".to_string(),
        },
        enthalpy: None,
        sweep: None,
        predictions: vec![],
        output: None,
    }
}

#[test]
fn unequal_files_and_temperatures_mismatch() {
    let err = validate_run(&isotherm_config(3, vec![273.0, 298.0])).unwrap_err();
    assert_eq!(
        err,
        ValidationError::ParameterMismatch {
            what: "reference files and temperatures".to_string(),
            left: 3,
            right: 2,
        }
    );

    let ad: AdError = ProjectError::from(err).into();
    assert!(matches!(ad, AdError::ParameterMismatch { left: 3, right: 2, .. }));
}

#[test]
fn single_temperature_is_broadcast() {
    validate_run(&isotherm_config(3, vec![298.0])).unwrap();
    validate_run(&isotherm_config(2, vec![273.0, 298.0])).unwrap();
}

#[test]
fn isotherms_need_temperatures() {
    assert!(matches!(
        validate_run(&isotherm_config(1, vec![])),
        Err(ValidationError::Missing { .. })
    ));
    assert!(matches!(
        validate_run(&isotherm_config(1, vec![-4.0])),
        Err(ValidationError::InvalidValue { .. })
    ));
}

#[test]
fn prediction_ranges_must_increase() {
    let mut config = isotherm_config(1, vec![298.0]);
    config.predictions.push(PredictionDef {
        kind: PredictionKind::Isobar,
        values: vec![1.0],
        range: Some([350.0, 250.0]),
        points: DEFAULT_POINTS,
    });
    assert!(matches!(
        validate_run(&config),
        Err(ValidationError::InvalidValue { .. })
    ));

    config.predictions[0].range = Some([250.0, 350.0]);
    config.predictions[0].points = 1;
    assert!(validate_run(&config).is_err());
}

#[test]
fn newer_versions_are_refused() {
    let mut config = isotherm_config(1, vec![298.0]);
    config.version = 99;
    assert_eq!(
        validate_run(&config),
        Err(ValidationError::UnsupportedVersion { version: 99 })
    );
}

#[test]
fn version_zero_ozawa_means_modified() {
    let mut config = isotherm_config(1, vec![298.0]);
    config.version = 0;
    let migrated = migrate_to_latest(config).unwrap();
    assert_eq!(migrated.version, 1);
    assert_eq!(migrated.density.method, "ozawa-modified");

    // Version 1 keeps the fixed-coefficient correlation.
    let current = migrate_to_latest(isotherm_config(1, vec![298.0])).unwrap();
    assert_eq!(current.density.method, "ozawa");
}
