//! # Quick Calculations
//!
//! Single-number call shapes for spreadsheets and scripts. Each builds a
//! [`ComponentInput`] and runs the full pipeline, so the numbers and the
//! validation are identical to [`calculate`]; only the warnings are dropped.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::quick;
//!
//! // 130.26 in ID shell, 0.8006 in measured, S = 20 ksi, E = 1.0
//! let mawp = quick::shell_mawp(280.0, 20_000.0, 1.0, 130.26, 0.8006).unwrap();
//! assert!((mawp - 244.05).abs() < 0.05);
//! ```

use super::input::{ComponentInput, Geometry};
use super::pipeline::calculate;
use crate::errors::{CalcError, CalcResult};

/// Minimum required thickness (in).
pub fn required_thickness(
    geometry: Geometry,
    design_pressure_psi: f64,
    allowable_stress_psi: f64,
    joint_efficiency: f64,
    inside_diameter_in: f64,
) -> CalcResult<f64> {
    let input = ComponentInput::new(
        "quick",
        geometry,
        design_pressure_psi,
        allowable_stress_psi,
        joint_efficiency,
        inside_diameter_in,
    );
    Ok(calculate(&input)?.required_thickness_in)
}

/// MAWP at a measured thickness (psi).
///
/// The design pressure is still needed: applicability limits are checked
/// against it exactly as in a full calculation.
pub fn mawp(
    geometry: Geometry,
    design_pressure_psi: f64,
    allowable_stress_psi: f64,
    joint_efficiency: f64,
    inside_diameter_in: f64,
    actual_thickness_in: f64,
) -> CalcResult<f64> {
    let input = ComponentInput::new(
        "quick",
        geometry,
        design_pressure_psi,
        allowable_stress_psi,
        joint_efficiency,
        inside_diameter_in,
    )
    .with_actual_thickness(actual_thickness_in);
    let result = calculate(&input)?;
    result
        .mawp_psi
        .ok_or_else(|| CalcError::calculation_failed("MAWP", format!("MAWP is not computed for a {}", result.geometry)))
}

/// Cylindrical shell MAWP, the smaller of UG-27(c)(1) and (c)(2).
pub fn shell_mawp(
    design_pressure_psi: f64,
    allowable_stress_psi: f64,
    joint_efficiency: f64,
    inside_diameter_in: f64,
    actual_thickness_in: f64,
) -> CalcResult<f64> {
    mawp(
        Geometry::CylindricalShell,
        design_pressure_psi,
        allowable_stress_psi,
        joint_efficiency,
        inside_diameter_in,
        actual_thickness_in,
    )
}

/// 2:1 ellipsoidal head MAWP.
pub fn ellipsoidal_head_mawp(
    design_pressure_psi: f64,
    allowable_stress_psi: f64,
    joint_efficiency: f64,
    inside_diameter_in: f64,
    actual_thickness_in: f64,
) -> CalcResult<f64> {
    mawp(
        Geometry::ellipsoidal_2_1(),
        design_pressure_psi,
        allowable_stress_psi,
        joint_efficiency,
        inside_diameter_in,
        actual_thickness_in,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_mawp_matches_pipeline() {
        let quick = shell_mawp(280.0, 20_000.0, 1.0, 130.26, 0.8006).unwrap();
        // SEt/(R + 0.6t) governs over 2SEt/(R - 0.4t)
        let expected = 20_000.0 * 0.8006 / (65.13 + 0.6 * 0.8006);
        assert!((quick - expected).abs() < 1e-9);
    }

    #[test]
    fn test_ellipsoidal_head_mawp() {
        let mawp = ellipsoidal_head_mawp(280.0, 20_000.0, 1.0, 130.26, 0.507).unwrap();
        assert!((mawp - 155.57).abs() < 0.01);
    }

    #[test]
    fn test_required_thickness() {
        let t = required_thickness(Geometry::HemisphericalHead, 100.0, 17_000.0, 1.0, 60.0).unwrap();
        assert!((t - 3000.0 / 33_980.0).abs() < 1e-12);
    }

    #[test]
    fn test_nozzle_has_no_mawp() {
        let nozzle = Geometry::NozzleNeck {
            nps: Some(2.0),
            pipe_wall_in: None,
        };
        let err = mawp(nozzle, 150.0, 20_000.0, 1.0, 2.067, 0.154).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_errors_propagate() {
        assert!(required_thickness(Geometry::CylindricalShell, -1.0, 20_000.0, 1.0, 48.0).is_err());
    }
}
