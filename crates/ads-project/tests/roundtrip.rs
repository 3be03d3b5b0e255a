use std::path::PathBuf;

use ads_project::schema::*;
use ads_project::{load_json, load_yaml, save_json, save_yaml, validate_run};

fn sample_config() -> RunConfig {
    RunConfig {
        version: 1,
        name: "CO2 on carbon".to_string(),
        properties: PathBuf::from("co2.json"),
        reference: ReferenceDef {
            kind: ReferenceKind::Isotherm,
            files: vec![PathBuf::from("a.dat"), PathBuf::from("b.dat")],
            temperatures: vec![273.15, 298.15],
            units: ColumnUnits::default(),
        },
        saturation: SaturationDef {
            method: "extrapolated-equation".to_string(),
            equation: Some("prsv1".to_string()),
            regression: Some("custom".to_string()),
            points: Some(40),
            ..SaturationDef::default()
        },
        density: DensityDef {
            method: "hauer".to_string(),
        },
        enthalpy: Some(EnthalpyDef {
            temperature: 298.15,
            vaporization: 16.7,
        }),
        sweep: None,
        predictions: vec![
            PredictionDef {
                kind: PredictionKind::Isotherm,
                values: vec![283.15, 303.15],
                range: Some([0.01, 2.0]),
                points: DEFAULT_POINTS,
            },
            PredictionDef {
                kind: PredictionKind::Isostere,
                values: vec![150.0],
                range: None,
                points: 25,
            },
        ],
        output: Some(PathBuf::from("out")),
    }
}

#[test]
fn roundtrip_yaml() {
    let config = sample_config();
    validate_run(&config).unwrap();

    let path = std::env::temp_dir().join("ads_project_roundtrip.yaml");
    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json() {
    let config = sample_config();

    let path = std::env::temp_dir().join("ads_project_roundtrip.json");
    save_json(&path, &config).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn default_points_are_filled_in() {
    let yaml = r#"
version: 1
properties: co2.json
reference:
  kind: characteristic
  files: [curve.dat]
saturation:
  method: dubinin
density:
  method: empirical
predictions:
  - kind: isobar
    values: [0.5]
"#;
    let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.predictions[0].points, DEFAULT_POINTS);
    assert_eq!(config.reference.units.pressure, "MPa");
    assert!(config.output.is_none());
    validate_run(&config).unwrap();
}

#[test]
fn unknown_keys_are_rejected() {
    let yaml = r#"
version: 1
properties: co2.json
reference:
  kind: characteristic
  files: [curve.dat]
saturation:
  method: dubinin
  guess: 2.0
density:
  method: empirical
"#;
    assert!(serde_yaml::from_str::<RunConfig>(yaml).is_err());
}
