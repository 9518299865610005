//! Property-based tests for the component pipeline and life model.
//!
//! Covers: MAWP/thickness round trip per geometry, shell governing mode,
//! monotonicity in measured thickness, clamping of allowance and life,
//! and allowable stress interpolation.

use proptest::prelude::*;
use vessel_core::calculations::{calculate, ComponentInput, Geometry};
use vessel_core::config::LifeLimits;
use vessel_core::life::{inspection_plan, remaining_life};
use vessel_core::materials::resolve_stress;

/// Geometries whose dimensions do not depend on the measured thickness.
fn geometries(d: f64) -> impl Strategy<Value = Geometry> {
    prop_oneof![
        Just(Geometry::CylindricalShell),
        Just(Geometry::HemisphericalHead),
        Just(Geometry::ellipsoidal_2_1()),
        (1.5f64..2.8).prop_map(|ratio| Geometry::EllipsoidalHead {
            aspect_ratio: Some(ratio)
        }),
        (0.8f64..=1.0, 0.06f64..0.15).prop_map(move |(crown, knuckle)| Geometry::TorisphericalHead {
            crown_radius_in: Some(crown * d),
            knuckle_radius_in: Some(knuckle * d),
        }),
        (5.0f64..30.0).prop_map(Geometry::conical),
        Just(Geometry::FlatHead {
            attachment_factor: None,
            short_span_in: None,
        }),
    ]
}

fn diameter_and_geometry() -> impl Strategy<Value = (f64, Geometry)> {
    (12.0f64..120.0).prop_flat_map(|d| (Just(d), geometries(d)))
}

fn required_thickness(input: &ComponentInput) -> f64 {
    calculate(input).unwrap().required_thickness_in
}

// ── Round Trip ───────────────────────────────────────────────────────

proptest! {
    /// MAWP evaluated at t_min returns the design pressure.
    #[test]
    fn mawp_at_required_thickness_is_design_pressure(
        (d, geometry) in diameter_and_geometry(),
        p in 10.0f64..150.0,
        s in 12_000.0f64..25_000.0,
        e in 0.7f64..=1.0,
    ) {
        let base = ComponentInput::new("C", geometry, p, s, e, d);
        let t_min = required_thickness(&base);
        let result = calculate(&base.with_actual_thickness(t_min)).unwrap();

        let mawp = result.mawp_psi.unwrap();
        prop_assert!((mawp - p).abs() / p < 1e-3, "MAWP {} vs P {}", mawp, p);
        prop_assert!(result.compliant);
        prop_assert_eq!(result.corrosion_allowance_in, Some(0.0));
    }

    /// Shell t_min is the circumferential thickness and the larger mode.
    #[test]
    fn shell_governing_mode(
        p in 10.0f64..500.0,
        s in 12_000.0f64..25_000.0,
        e in 0.7f64..=1.0,
        d in 12.0f64..120.0,
    ) {
        let result = calculate(&ComponentInput::new("S", Geometry::CylindricalShell, p, s, e, d)).unwrap();
        let largest = result
            .modes
            .iter()
            .map(|m| m.required_thickness_in)
            .fold(f64::MIN, f64::max);
        prop_assert_eq!(result.required_thickness_in, largest);
        prop_assert_eq!(result.governing_condition.as_str(), "Circumferential stress");
    }
}

// ── Monotonicity ─────────────────────────────────────────────────────

proptest! {
    /// More metal strictly raises MAWP and corrosion allowance.
    #[test]
    fn mawp_and_allowance_increase_with_thickness(
        (d, geometry) in diameter_and_geometry(),
        p in 10.0f64..150.0,
        f1 in 1.0f64..1.5,
        step in 0.01f64..0.5,
    ) {
        let base = ComponentInput::new("C", geometry, p, 17_500.0, 1.0, d);
        let t_min = required_thickness(&base);

        let thin = calculate(&base.clone().with_actual_thickness(t_min * f1)).unwrap();
        let thick = calculate(&base.with_actual_thickness(t_min * (f1 + step))).unwrap();

        prop_assert!(thin.mawp_psi.unwrap() < thick.mawp_psi.unwrap());
        prop_assert!(thin.corrosion_allowance_in.unwrap() < thick.corrosion_allowance_in.unwrap());
    }
}

// ── Clamping ─────────────────────────────────────────────────────────

proptest! {
    /// Below t_min: allowance and life are zero, never negative.
    #[test]
    fn thin_component_clamps_to_zero(
        p in 10.0f64..300.0,
        d in 12.0f64..120.0,
        fraction in 0.55f64..0.999,
        rate in 0.0001f64..0.05,
    ) {
        let base = ComponentInput::new("S", Geometry::CylindricalShell, p, 17_500.0, 1.0, d);
        let t_min = required_thickness(&base);
        let actual = t_min * fraction;
        let input = base.with_nominal_thickness(actual + rate * 10.0, 10.0).with_actual_thickness(actual);

        let result = calculate(&input).unwrap();
        prop_assert!(!result.compliant);
        prop_assert_eq!(result.corrosion_allowance_in, Some(0.0));
        prop_assert_eq!(result.remaining_life_years, Some(0.0));
        prop_assert!(result.has_critical());
    }

    /// Remaining life is never negative, is Ca / rate for a positive rate and
    /// the cap otherwise; the interval stays within [0, 10].
    #[test]
    fn life_and_interval_bounds(
        allowance in -1.0f64..1.0,
        rate in -0.1f64..0.1,
    ) {
        let limits = LifeLimits::default();
        let rl = remaining_life(allowance, rate, &limits);
        prop_assert!(rl >= 0.0);
        if allowance <= 0.0 {
            prop_assert_eq!(rl, 0.0);
        } else if rate > 0.0 && (allowance / rate).is_finite() {
            prop_assert!((rl - allowance / rate).abs() <= 1e-9 * rl.max(1.0));
        } else {
            prop_assert_eq!(rl, limits.remaining_life_cap_years);
        }

        let plan = inspection_plan(rl, &limits);
        prop_assert!(plan.interval_years >= 0.0);
        prop_assert!(plan.interval_years <= limits.max_inspection_interval_years);
        prop_assert!(plan.interval_years <= rl / 2.0 + 1e-12);
    }
}

// ── Allowable Stress ─────────────────────────────────────────────────

proptest! {
    /// SA-516-70 stress never rises with temperature and never extrapolates.
    #[test]
    fn stress_table_is_monotone(
        t1 in -20.0f64..1000.0,
        dt in 0.0f64..200.0,
    ) {
        let t2 = (t1 + dt).min(1000.0);
        let s1 = resolve_stress("SA-516-70", t1).stress_psi.unwrap();
        let s2 = resolve_stress("SA-516-70", t2).stress_psi.unwrap();
        prop_assert!(s2 <= s1);
        prop_assert!((2_500.0..=20_000.0).contains(&s1));

        prop_assert!(resolve_stress("SA-516-70", 1000.0 + dt + 1.0).stress_psi.is_none());
    }
}
