//! Worked examples checked end to end through the public API.

use vessel_core::calculations::{calculate, ComponentInput, Geometry, StressSource};
use vessel_core::life::{assess_life, InspectionType, LifeInput};
use vessel_core::materials::LookupStatus;
use vessel_core::vessel::{evaluate_vessel, VesselInput};
use vessel_core::{CalcError, Severity};

#[test]
fn shell_thickness_by_stress_mode() {
    let input = ComponentInput::new("Shell", Geometry::CylindricalShell, 150.0, 20_000.0, 0.85, 48.0);
    let result = calculate(&input).unwrap();

    let circ = result.mode("Circumferential stress").unwrap().required_thickness_in;
    let long = result.mode("Longitudinal stress").unwrap().required_thickness_in;
    assert!((circ - 0.2129).abs() < 1e-4);
    assert!((long - 0.1057).abs() < 1e-4);
    assert_eq!(result.required_thickness_in, circ);
    assert_eq!(result.governing_condition, "Circumferential stress");
    assert_eq!(result.code_reference, "ASME VIII-1 UG-27(c)(1)");
}

#[test]
fn ellipsoidal_head_thickness_and_mawp() {
    let input = ComponentInput::new("Head", Geometry::ellipsoidal_2_1(), 150.0, 20_000.0, 0.85, 48.0)
        .with_actual_thickness(0.375);
    let result = calculate(&input).unwrap();

    assert!((result.required_thickness_in - 0.21196).abs() < 1e-5);
    assert!((result.mawp_psi.unwrap() - 265.2).abs() < 0.1);
    assert!(result.compliant);
    // K = 1.0 from the 2:1 default
    assert_eq!(result.defaults_used.len(), 1);
    assert_eq!(result.defaults_used[0].field, "geometry.aspect_ratio");
}

#[test]
fn remaining_life_from_short_term_rate() {
    let life = assess_life(&LifeInput {
        actual_thickness_in: 0.796,
        required_thickness_in: 0.719,
        short_term_rate: Some(0.000425),
        long_term_rate: None,
    })
    .unwrap();

    assert!((life.remaining_life_years.unwrap() - 181.0).abs() < 0.5);
    let plan = life.inspection.unwrap();
    assert_eq!(plan.interval_years, 10.0);
    assert_eq!(plan.inspection_type, InspectionType::ExternalOnStream);
}

#[test]
fn cone_angle_limits() {
    let input = |alpha: f64| ComponentInput::new("Cone", Geometry::conical(alpha), 100.0, 17_000.0, 1.0, 36.0);

    let err = calculate(&input(95.0)).unwrap_err();
    assert!(matches!(err, CalcError::InvalidInput { .. }));

    let result = calculate(&input(35.0)).unwrap();
    assert!(result.required_thickness_in > 0.0);
    let warning = result
        .warnings
        .iter()
        .find(|w| w.field == "geometry.half_apex_angle_deg")
        .unwrap();
    assert_eq!(warning.severity, Severity::Critical);
}

#[test]
fn cone_thickness_grows_with_angle() {
    let t = |alpha: f64| {
        calculate(&ComponentInput::new("Cone", Geometry::conical(alpha), 100.0, 17_000.0, 1.0, 36.0))
            .unwrap()
            .required_thickness_in
    };
    assert!(t(10.0) < t(20.0));
    assert!(t(20.0) < t(30.0));
}

#[test]
fn torispherical_standard_head() {
    let input = ComponentInput::new("F&D Head", Geometry::torispherical_standard(), 100.0, 20_000.0, 1.0, 96.0)
        .with_nominal_thickness(0.5, 10.0)
        .with_actual_thickness(0.48);
    let result = calculate(&input).unwrap();

    // Do = 97, L = 97, r = 5.82, M = 0.25(3 + sqrt(L/r))
    let m = 0.25 * (3.0 + (97.0_f64 / 5.82).sqrt());
    let expected = 100.0 * 97.0 * m / (40_000.0 - 20.0);
    assert!((result.required_thickness_in - expected).abs() < 1e-9);
    assert_eq!(result.defaults_used.len(), 2);
    assert!(result.compliant);
    assert!(!result.has_critical());
}

#[test]
fn hemispherical_head_from_material_table() {
    let input = ComponentInput::new("Sphere", Geometry::HemisphericalHead, 200.0, 0.0, 1.0, 72.0)
        .with_material("sa-240 tp304", 150.0)
        .with_actual_thickness(0.30);
    let result = calculate(&input).unwrap();

    assert_eq!(result.allowable_stress_psi, 18_350.0);
    match &result.stress_source {
        StressSource::Table { material, status, .. } => {
            assert_eq!(material, "SA-240-304");
            assert_eq!(*status, LookupStatus::Interpolated);
        }
        other => panic!("unexpected stress source {:?}", other),
    }
    let expected = 200.0 * 36.0 / (2.0 * 18_350.0 - 40.0);
    assert!((result.required_thickness_in - expected).abs() < 1e-12);
}

#[test]
fn flat_cover_pressure_ceiling() {
    let cover = |p: f64| {
        ComponentInput::new(
            "Cover",
            Geometry::FlatHead {
                attachment_factor: Some(0.17),
                short_span_in: None,
            },
            p,
            17_500.0,
            1.0,
            18.0,
        )
    };
    assert!(calculate(&cover(45.0)).unwrap().warnings.is_empty());
    assert!(calculate(&cover(120.0)).unwrap().has_critical());
    let err = calculate(&cover(175.0)).unwrap_err();
    assert_eq!(err.error_code(), "NOT_APPLICABLE");
}

#[test]
fn corroded_shell_full_history() {
    let input = ComponentInput::new("Shell", Geometry::CylindricalShell, 150.0, 20_000.0, 0.85, 48.0)
        .with_nominal_thickness(0.375, 18.0)
        .with_previous_thickness(0.345, 6.0)
        .with_actual_thickness(0.331);
    let result = calculate(&input).unwrap();

    let rates = result.corrosion_rates;
    assert!((rates.short_term.unwrap() - 0.014 / 6.0).abs() < 1e-12);
    assert!((rates.long_term.unwrap() - 0.044 / 18.0).abs() < 1e-12);
    assert_eq!(rates.governing, rates.long_term);

    let allowance = result.corrosion_allowance_in.unwrap();
    assert!((allowance - (0.331 - 3600.0 / 16_910.0)).abs() < 1e-12);
    assert!((result.remaining_life_years.unwrap() - allowance / rates.governing.unwrap()).abs() < 1e-9);
    assert_eq!(result.inspection.unwrap().interval_years, (result.remaining_life_years.unwrap() / 2.0).min(10.0));
}

#[test]
fn negative_rate_is_kept_and_flagged() {
    let input = ComponentInput::new("Shell", Geometry::CylindricalShell, 150.0, 20_000.0, 0.85, 48.0)
        .with_previous_thickness(0.320, 5.0)
        .with_actual_thickness(0.331);
    let result = calculate(&input).unwrap();

    assert!(result.corrosion_rates.governing.unwrap() < 0.0);
    assert_eq!(result.remaining_life_years, Some(500.0));
    assert!(result.warnings.iter().any(|w| w.message.contains("manual review")));
}

#[test]
fn component_from_json() {
    let json = r#"{
        "label": "Bottom Head",
        "geometry": { "type": "EllipsoidalHead" },
        "design_pressure_psi": 150.0,
        "material": { "code": "SA-516-70", "design_temperature_f": 650.0 },
        "joint_efficiency": 1.0,
        "inside_diameter_in": 60.0,
        "thickness": { "nominal_in": 0.5, "actual_in": 0.46, "years_since_nominal": 16.0 },
        "static_head": { "head_ft": 30.0 },
        "last_inspection_date": "2025-04-10"
    }"#;
    let input: ComponentInput = serde_json::from_str(json).unwrap();
    let result = calculate(&input).unwrap();

    assert_eq!(result.allowable_stress_psi, 18_800.0);
    assert!((result.static_head_psi - 0.433 * 30.0).abs() < 1e-9);
    assert!(result.next_inspection_date.is_some());

    let out = serde_json::to_value(&result).unwrap();
    assert_eq!(out["geometry"], "Ellipsoidal Head");
    assert_eq!(out["stress_source"]["kind"], "Table");
}

#[test]
fn vessel_summary_from_field_readings() {
    let vessel = VesselInput {
        tag: "V-101".to_string(),
        components: vec![
            ComponentInput::new("Shell", Geometry::CylindricalShell, 280.0, 20_000.0, 1.0, 130.26)
                .with_actual_thickness(0.8006),
            ComponentInput::new("Head", Geometry::ellipsoidal_2_1(), 280.0, 20_000.0, 1.0, 130.26)
                .with_actual_thickness(0.507),
        ],
    };
    let summary = evaluate_vessel(&vessel).unwrap();

    assert!((summary.component("Shell").unwrap().mawp_psi.unwrap() - 244.05).abs() < 0.05);
    assert!((summary.governing_mawp_psi.unwrap() - 155.57).abs() < 0.01);
    assert_eq!(summary.governing_component.as_deref(), Some("Head"));
    assert!(!summary.overall_compliant);
    assert_eq!(summary.min_remaining_life_years, Some(0.0));
    assert!(summary.internal_inspection_required);
}
