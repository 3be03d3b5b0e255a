//! Integration tests: predicting isotherms, isobars and isosteres from a
//! characteristic curve, and rebuilding the curve from predicted isotherms.

use ads_predict::{
    CharacteristicCurve, IsothermData, PredictError, PredictionRequest, Predictor,
    adsorption_potential, characteristic_curve, predict, pressure_from_potential,
};
use ads_core::AdError;
use ads_thermo::{AdsorbateProperties, DensityMethod, SaturationMethod, SaturationResolver};

fn co2() -> AdsorbateProperties {
    AdsorbateProperties::new(44.01, 304.13, 7.3773, 0.22394, 194.7, 1178.5)
}

fn linear_curve(points: &[(f64, f64)]) -> CharacteristicCurve {
    CharacteristicCurve::new(points.iter().copied()).unwrap()
}

#[test]
fn isotherm_spans_closed_form_boundaries() {
    let props = co2();
    let saturation = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
    let curve = linear_curve(&[(1.0, 0.55), (5.0, 0.42), (10.0, 0.30), (20.0, 0.12)]);

    let out = predict(
        &PredictionRequest::isotherm(298.0),
        &curve,
        &saturation,
        DensityMethod::OzawaModified,
    )
    .unwrap();

    let psat = saturation.pressure(298.0).unwrap();
    let p_lo = pressure_from_potential(20.0, psat, 298.0).unwrap();
    let p_hi = pressure_from_potential(1.0, psat, 298.0).unwrap();
    assert!((out.boundaries.lo - p_lo).abs() <= 1e-12 * p_lo);
    assert!((out.boundaries.hi - p_hi).abs() <= 1e-12 * p_hi);

    assert_eq!(out.points.len(), 50);
    assert!(out.points.windows(2).all(|w| w[1].0 > w[0].0));
    assert!(
        out.points
            .iter()
            .all(|&(p, _)| p >= p_lo * (1.0 - 1e-12) && p <= p_hi * (1.0 + 1e-12))
    );
    // Loading rises with pressure along a curve whose volume falls with potential.
    assert!(out.points.windows(2).all(|w| w[1].1 > w[0].1));
}

#[test]
fn isotherm_honours_contained_range_only() {
    let props = co2();
    let saturation = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
    let curve = linear_curve(&[(1.0, 0.55), (20.0, 0.12)]);
    let predictor = Predictor::new(&curve, &saturation, DensityMethod::Hauer);

    let inside = predictor
        .predict(
            &PredictionRequest::isotherm(298.0)
                .with_range(0.01, 1.0)
                .with_points(11),
        )
        .unwrap();
    assert_eq!(inside.points.len(), 11);
    assert!((inside.points[0].0 - 0.01).abs() < 1e-15);
    assert!((inside.points[10].0 - 1.0).abs() < 1e-12);

    let outside = predictor
        .predict(&PredictionRequest::isotherm(298.0).with_range(1e-4, 1.0))
        .unwrap();
    assert_eq!(outside.range, outside.boundaries);
}

#[test]
fn isobar_boundaries_hit_curve_ends() {
    let props = co2();
    let saturation = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
    let curve = linear_curve(&[(2.0, 0.5), (5.0, 0.4), (8.0, 0.3), (12.0, 0.15)]);

    let out = predict(
        &PredictionRequest::isobar(0.1).with_points(30),
        &curve,
        &saturation,
        DensityMethod::OzawaModified,
    )
    .unwrap();

    let potential_at =
        |t: f64| adsorption_potential(t, saturation.pressure(t).unwrap(), 0.1).unwrap();
    assert!((potential_at(out.boundaries.lo) - 2.0).abs() < 1e-6);
    assert!((potential_at(out.boundaries.hi) - 12.0).abs() < 1e-6);
    assert!(out.boundaries.lo > 100.0 && out.boundaries.lo < 115.0);
    assert!(out.boundaries.hi > 315.0 && out.boundaries.hi < 335.0);

    assert!(out.points.windows(2).all(|w| w[1].0 > w[0].0));
    assert!(out.points.windows(2).all(|w| w[1].1 < w[0].1));
}

#[test]
fn unreachable_isobar_boundary_is_a_convergence_failure() {
    // Dubinin potentials at 0.1 MPa never fall below about -0.22 kJ/mol.
    let props = co2();
    let saturation = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
    let curve = linear_curve(&[(-5.0, 0.6), (10.0, 0.1)]);

    let err = predict(
        &PredictionRequest::isobar(0.1),
        &curve,
        &saturation,
        DensityMethod::OzawaModified,
    )
    .unwrap_err();
    assert!(matches!(err, PredictError::Solver(_)), "{err:?}");

    let err: AdError = err.into();
    match err {
        AdError::SolverNonConvergence { what } => assert!(what.contains("isobar boundary")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn isostere_lies_on_the_curve() {
    let props = co2();
    let saturation = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
    let curve = linear_curve(&[(2.0, 0.34), (6.0, 0.30), (12.0, 0.26)]);
    let density = DensityMethod::OzawaModified;

    let out = predict(&PredictionRequest::isostere(300.0), &curve, &saturation, density).unwrap();

    let volume_at = |t: f64| 300.0 / density.density(t, &props).unwrap();
    assert!((volume_at(out.boundaries.lo) - 0.26).abs() < 1e-7);
    assert!((volume_at(out.boundaries.hi) - 0.34).abs() < 1e-7);

    for &(t, p) in &out.points {
        assert!(p > 0.0 && p.is_finite());
        let expected = curve.potential_at(volume_at(t)).unwrap();
        let actual = adsorption_potential(t, saturation.pressure(t).unwrap(), p).unwrap();
        assert!((actual - expected).abs() < 1e-9, "T = {t}");
    }
}

#[test]
fn isostere_with_constant_density_needs_a_range() {
    let props = co2();
    let saturation = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
    let curve = linear_curve(&[(2.0, 0.34), (6.0, 0.30), (12.0, 0.26)]);
    let predictor = Predictor::new(&curve, &saturation, DensityMethod::Empirical);

    assert!(matches!(
        predictor.predict(&PredictionRequest::isostere(300.0)),
        Err(PredictError::InvalidArg { .. })
    ));

    let out = predictor
        .predict(&PredictionRequest::isostere(300.0).with_range(250.0, 300.0))
        .unwrap();
    assert_eq!((out.range.lo, out.range.hi), (250.0, 300.0));

    assert!(matches!(
        predictor.predict(&PredictionRequest::isostere(100.0).with_range(250.0, 300.0)),
        Err(PredictError::NumericDomain { .. })
    ));
}

#[test]
fn predicted_isotherms_rebuild_the_curve() {
    let props = co2();
    let saturation = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
    let curve = linear_curve(&[(1.0, 0.55), (5.0, 0.42), (10.0, 0.30), (20.0, 0.12)]);
    let density = DensityMethod::Hauer;

    let isotherms: Vec<IsothermData> = [273.0, 298.0, 323.0]
        .into_iter()
        .map(|t| {
            let request = PredictionRequest::isotherm(t).with_points(20);
            let out = predict(&request, &curve, &saturation, density).unwrap();
            IsothermData::new(t, out.points)
        })
        .collect();

    let rebuilt = characteristic_curve(&isotherms, &saturation, density).unwrap();
    let (a_lo, a_hi) = rebuilt.potential_range();
    assert!((a_lo - 1.0).abs() < 1e-9);
    assert!((a_hi - 20.0).abs() < 1e-9);
    for (a, w) in rebuilt.points() {
        assert!((curve.volume_at(a) - w).abs() < 1e-9, "A = {a}");
    }
}

#[test]
fn non_positive_samples_are_skipped() {
    let props = co2();
    let saturation = SaturationResolver::new(SaturationMethod::Dubinin, &props).unwrap();
    let iso = IsothermData::new(298.0, vec![(0.0, 1.0), (0.5, 0.0), (0.5, 120.0), (1.5, 180.0)]);
    let curve = characteristic_curve(&[iso], &saturation, DensityMethod::Hauer).unwrap();
    assert_eq!(curve.potentials().len(), 2);
}
