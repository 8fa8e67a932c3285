//! Survey Construction Tests
//!
//! End-to-end construction through the public API: trajectory, NEV
//! projection, override precedence and error model integration.

use ndarray::{Array2, Array3};
use sairen_survey::{
    build_surveys, get_angles, get_vec, make_cov, ErrorModelError, ErrorModelKind, LengthUnit,
    MinCurve, MinCurveError, Survey, SurveyError, SurveyParams, WellRefParams,
};

const TOL: f64 = 1e-9;

fn assert_close(a: f64, b: f64, tol: f64, what: &str) {
    assert!((a - b).abs() <= tol, "{what}: {a} vs {b} (tol {tol})");
}

fn build_hold_drop() -> SurveyParams {
    SurveyParams::new(
        vec![0.0, 300.0, 600.0, 900.0, 1200.0, 1500.0],
        vec![0.0, 0.0, 15.0, 30.0, 30.0, 20.0],
        vec![0.0, 0.0, 120.0, 135.0, 135.0, 140.0],
    )
}

// ============================================================================
// Trajectory
// ============================================================================

#[test]
fn vertical_hole_example() {
    let survey = SurveyParams::new(vec![0.0, 100.0], vec![0.0, 0.0], vec![0.0, 0.0])
        .build()
        .expect("valid survey");

    assert_eq!(survey.x(), &[0.0, 0.0]);
    assert_eq!(survey.y(), &[0.0, 0.0]);
    assert_eq!(survey.z(), &[0.0, 100.0]);
    assert_eq!(survey.n(), &[0.0, 0.0]);
    assert_eq!(survey.e(), &[0.0, 0.0]);
    assert_eq!(survey.tvd(), &[0.0, 100.0]);
    assert_eq!(survey.dogleg(), &[0.0, 0.0]);
    assert_eq!(survey.dls(), &[0.0, 0.0]);
    assert!(survey.cov_nev().is_none());
    assert!(survey.cov_hla().is_none());

    for k in 0..2 {
        let row = survey.vec().row(k).to_vec();
        assert_eq!(row, vec![0.0, 0.0, 1.0]);
    }
}

#[test]
fn inclined_tangent_reaches_expected_position() {
    // 90 m along a hole at 60° inclination due east
    let survey = SurveyParams::new(vec![0.0, 90.0], vec![60.0, 60.0], vec![90.0, 90.0])
        .build()
        .expect("valid survey");
    let [x, y, z] = survey.xyz_at(1).expect("station 1");
    assert_close(x, 90.0 * 60f64.to_radians().sin(), TOL, "x");
    assert_close(y, 0.0, TOL, "y");
    assert_close(z, 45.0, TOL, "z");
}

#[test]
fn feet_survey_reports_dls_per_100ft() {
    let mut params = SurveyParams::new(vec![0.0, 100.0], vec![0.0, 3.0], vec![0.0, 0.0]);
    params.unit = LengthUnit::Feet;
    let survey = params.build().expect("valid survey");
    assert_close(survey.dls()[1], 3.0, TOL, "dls °/100ft");

    let metric = SurveyParams::new(vec![0.0, 30.0], vec![0.0, 3.0], vec![0.0, 0.0])
        .build()
        .expect("valid survey");
    assert_close(metric.dls()[1], 3.0, TOL, "dls °/30m");
}

#[test]
fn survey_tables_hold_both_angle_forms() {
    let survey = build_hold_drop().build().expect("valid survey");
    assert_eq!(survey.survey_deg().shape(), &[6, 3]);
    for k in 0..survey.len() {
        assert_close(survey.survey_deg()[[k, 1]].to_radians(), survey.survey_rad()[[k, 1]], 1e-15, "inc");
        assert_close(survey.survey_deg()[[k, 2]].to_radians(), survey.survey_rad()[[k, 2]], 1e-15, "azi");
        assert_eq!(survey.survey_deg()[[k, 0]], survey.md()[k]);
    }
}

// ============================================================================
// Angle Round Trip
// ============================================================================

#[test]
fn tangent_vectors_round_trip_to_angles() {
    let inc = [5.0, 30.0, 89.0, 90.0, 120.0];
    let azi = [0.0, 45.0, 181.0, 270.0, 359.5];
    let vec = get_vec(&inc, &azi, true);
    let angles = get_angles(vec.view());
    for k in 0..inc.len() {
        assert_close(angles[[k, 0]], inc[k].to_radians(), 1e-12, "inc");
        assert_close(angles[[k, 1]], azi[k].to_radians(), 1e-12, "azi");
    }
}

#[test]
fn survey_vectors_are_unit_and_match_angles() {
    let survey = build_hold_drop().build().expect("valid survey");
    let angles = get_angles(survey.vec());
    for k in 1..survey.len() {
        let row = survey.vec().row(k).to_vec();
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert_close(norm, 1.0, 1e-12, "norm");
        assert_close(angles[[k, 0]], survey.inc_rad()[k], 1e-12, "inc");
        if survey.inc_rad()[k] > 0.0 {
            assert_close(angles[[k, 1]], survey.azi_rad()[k], 1e-12, "azi");
        }
    }
}

// ============================================================================
// NEV Projection
// ============================================================================

#[test]
fn nev_is_translated_xyz() {
    let mut params = build_hold_drop();
    params.start_xyz = [5.0, -3.0, 12.0];
    params.start_nev = [6_500_000.0, 450_000.0, 30.0];
    let survey = params.build().expect("valid survey");

    for k in 0..survey.len() {
        assert_close(survey.n()[k] - 6_500_000.0, survey.y()[k] + 3.0, 1e-6, "N");
        assert_close(survey.e()[k] - 450_000.0, survey.x()[k] - 5.0, 1e-6, "E");
        assert_close(survey.tvd()[k] - 30.0, survey.z()[k] - 12.0, 1e-9, "V");
    }
    assert_eq!(survey.nev_at(0), Some([6_500_000.0, 450_000.0, 30.0]));
}

// ============================================================================
// Overrides
// ============================================================================

#[test]
fn caller_positions_feed_nev_but_not_dogleg() {
    let mut params = SurveyParams::new(vec![0.0, 100.0, 200.0], vec![0.0, 10.0, 20.0], vec![0.0, 0.0, 0.0]);
    params.x = Some(vec![0.0, 1.0, 2.0]);
    params.y = Some(vec![0.0, 10.0, 30.0]);
    params.z = Some(vec![0.0, 99.0, 197.0]);
    let survey = params.build().expect("valid survey");

    assert_eq!(survey.x(), &[0.0, 1.0, 2.0]);
    assert_eq!(survey.n(), &[0.0, 10.0, 30.0]);
    assert_eq!(survey.e(), &[0.0, 1.0, 2.0]);
    assert_eq!(survey.tvd(), &[0.0, 99.0, 197.0]);
    assert_close(survey.dogleg()[1], 10f64.to_radians(), 1e-12, "dogleg from angles");
}

#[test]
fn caller_nev_and_vectors_are_kept() {
    let mut params = SurveyParams::new(vec![0.0, 100.0], vec![0.0, 0.0], vec![0.0, 0.0]);
    params.n = Some(vec![7.0, 7.0]);
    params.e = Some(vec![8.0, 8.0]);
    params.tvd = Some(vec![9.0, 109.0]);
    params.vec = Some(Array2::from_elem((2, 3), 0.5));
    params.radius = Some(vec![0.1, 0.1]);
    let survey = params.build().expect("valid survey");

    assert_eq!(survey.n(), &[7.0, 7.0]);
    assert_eq!(survey.tvd(), &[9.0, 109.0]);
    assert_eq!(survey.vec()[[1, 2]], 0.5);
    assert_eq!(survey.radius(), Some(&[0.1, 0.1][..]));
}

#[test]
fn partial_position_override_is_rejected() {
    let mut params = SurveyParams::new(vec![0.0, 100.0], vec![0.0, 0.0], vec![0.0, 0.0]);
    params.x = Some(vec![0.0, 0.0]);
    assert!(matches!(params.build(), Err(SurveyError::InvalidInput(_))));
}

#[test]
fn structural_input_errors() {
    let short = SurveyParams::new(vec![0.0], vec![0.0], vec![0.0]);
    assert!(matches!(short.build(), Err(SurveyError::InvalidInput(_))));

    let ragged = SurveyParams::new(vec![0.0, 100.0], vec![0.0], vec![0.0, 0.0]);
    assert!(matches!(ragged.build(), Err(SurveyError::InvalidInput(_))));

    let backwards = SurveyParams::new(vec![0.0, 100.0, 50.0], vec![0.0; 3], vec![0.0; 3]);
    assert!(matches!(backwards.build(), Err(SurveyError::InvalidInput(_))));
}

// ============================================================================
// Error Model
// ============================================================================

#[test]
fn unknown_error_model_is_invalid_configuration() {
    let mut params = build_hold_drop();
    params.error_model = Some("ISCWSA_GYRO".to_string());
    match params.build() {
        Err(SurveyError::InvalidConfiguration(msg)) => assert!(msg.contains("ISCWSA_GYRO")),
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn error_model_replaces_caller_covariance() {
    let n = 6;
    let mut params = build_hold_drop().with_error_model(ErrorModelKind::IscwsaMwd);
    params.cov_nev = Some(Array3::from_elem((n, 3, 3), -1.0));
    params.cov_hla = Some(Array3::from_elem((n, 3, 3), -1.0));
    let survey = params.build().expect("valid survey");

    let cov_nev = survey.cov_nev().expect("model covariance");
    let cov_hla = survey.cov_hla().expect("model covariance");
    assert_eq!(cov_nev.shape(), &[n, 3, 3]);
    assert_eq!(cov_hla.shape(), &[n, 3, 3]);

    for k in 0..n {
        for i in 0..3 {
            assert!(cov_nev[[k, i, i]] >= 0.0, "variance at station {k} axis {i}");
            for j in 0..3 {
                assert_close(cov_nev[[k, i, j]], cov_nev[[k, j, i]], 1e-9, "NEV symmetry");
                assert_close(cov_hla[[k, i, j]], cov_hla[[k, j, i]], 1e-9, "HLA symmetry");
            }
        }
    }

    // Uncertainty grows with depth
    let (_, _, sigma_v) = survey.sigmas_nev().expect("sigmas");
    assert!(sigma_v[n - 1] > sigma_v[1]);
}

#[test]
fn error_model_uses_well_ref_params() {
    let mut params = build_hold_drop().with_error_model(ErrorModelKind::IscwsaMwd);
    params.well_ref_params = Some(WellRefParams {
        dip: 85.0,
        ..WellRefParams::default()
    });
    let steep = params.build().expect("valid survey");
    let shallow = build_hold_drop()
        .with_error_model(ErrorModelKind::IscwsaMwd)
        .build()
        .expect("valid survey");

    // A steeper dip weakens the horizontal field and inflates azimuth error
    let (_, lateral_steep, _) = steep.sigmas_hla().expect("sigmas");
    let (_, lateral_shallow, _) = shallow.sigmas_hla().expect("sigmas");
    assert!(lateral_steep[5] > lateral_shallow[5]);
    assert_eq!(steep.well_ref_params().map(|w| w.dip), Some(85.0));
}

#[test]
fn error_model_failure_is_propagated_unchanged() {
    let mut params = build_hold_drop().with_error_model(ErrorModelKind::IscwsaMwd);
    params.well_ref_params = Some(WellRefParams {
        dip: 90.0,
        ..WellRefParams::default()
    });
    match params.build() {
        Err(SurveyError::ErrorModel(ErrorModelError::InvalidParameter(msg))) => {
            assert!(msg.contains("dip"), "{msg}");
        }
        other => panic!("expected ErrorModel(InvalidParameter), got {other:?}"),
    }
}

#[test]
fn min_curve_failure_converts_transparently() {
    let inner = MinCurve::new(&[0.0], &[0.0], &[0.0], [0.0; 3], LengthUnit::Meters)
        .expect_err("a single station has no interval");
    let message = inner.to_string();
    let err = SurveyError::from(inner);
    assert!(matches!(
        err,
        SurveyError::MinCurve(MinCurveError::InsufficientStations { needed: 2, available: 1 })
    ));
    assert_eq!(err.to_string(), message);
}

#[test]
fn caller_covariance_passes_through_without_model() {
    let sigma = [0.5, 1.0, 1.5];
    let cov = make_cov(&sigma, &sigma, &sigma, true).expect("same lengths");
    let mut params = SurveyParams::new(vec![0.0, 100.0, 200.0], vec![0.0; 3], vec![0.0; 3]);
    params.cov_nev = Some(cov.clone());
    let survey = params.build().expect("valid survey");

    assert_eq!(survey.cov_nev().expect("passed through"), cov.view());
    assert!(survey.cov_hla().is_none());
    let (n, _, _) = survey.sigmas_nev().expect("sigmas");
    assert_eq!(n, vec![0.5, 1.0, 1.5]);
}

// ============================================================================
// make_cov
// ============================================================================

#[test]
fn make_cov_diagonal_holds_variances_only() {
    let cov = make_cov(&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0], true).expect("same lengths");
    assert_eq!(cov.shape(), &[2, 3, 3]);
    assert_eq!(cov[[1, 0, 0]], 4.0);
    assert_eq!(cov[[1, 1, 1]], 16.0);
    assert_eq!(cov[[1, 2, 2]], 36.0);
    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                assert_eq!(cov[[0, i, j]], 0.0);
                assert_eq!(cov[[1, i, j]], 0.0);
            }
        }
    }
}

#[test]
fn make_cov_full_is_symmetric_outer_product() {
    let cov = make_cov(&[1.0], &[2.0], &[3.0], false).expect("same lengths");
    assert_eq!(cov[[0, 0, 1]], 2.0);
    assert_eq!(cov[[0, 1, 2]], 6.0);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(cov[[0, i, j]], cov[[0, j, i]]);
        }
    }
}

// ============================================================================
// Batch
// ============================================================================

#[test]
fn batch_build_matches_sequential() {
    let params: Vec<SurveyParams> = (1..=8)
        .map(|k| {
            let depth = 100.0 * f64::from(k);
            SurveyParams::new(vec![0.0, depth, 2.0 * depth], vec![0.0, 5.0, 10.0], vec![0.0, 30.0, 30.0])
        })
        .collect();
    let sequential: Vec<Survey> = params
        .iter()
        .cloned()
        .map(|p| p.build().expect("valid survey"))
        .collect();
    let parallel = build_surveys(params);

    for (seq, par) in sequential.iter().zip(&parallel) {
        let par = par.as_ref().expect("valid survey");
        assert_eq!(seq.md(), par.md());
        assert_eq!(seq.tvd(), par.tvd());
    }
}
