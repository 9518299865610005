//! # Component Pipeline
//!
//! One pipeline serves every geometry:
//!
//! 1. validate the geometry-independent inputs
//! 2. resolve the allowable stress (explicit, table, or recorded fallback)
//! 3. add static head to the design pressure
//! 4. resolve the geometry, filling and recording defaults
//! 5. check applicability against P/SE
//! 6. evaluate each stress mode; t_min is the largest thickness
//! 7. with t_act: MAWP (smallest over modes), Ca, rates, remaining life
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::{calculate, ComponentInput, Geometry};
//!
//! let input = ComponentInput::new("Shell", Geometry::CylindricalShell, 150.0, 20_000.0, 0.85, 48.0);
//! let result = calculate(&input).unwrap();
//!
//! assert_eq!(result.governing_condition, "Circumferential stress");
//! assert!((result.required_thickness_in - 0.2129).abs() < 1e-4);
//! ```

use super::defaults::{DefaultResolver, Dimension};
use super::geometry::ResolvedGeometry;
use super::input::ComponentInput;
use super::result::{ComponentResult, ModeResult, StressSource};
use crate::code_refs::asme_ref;
use crate::config::EngineConfig;
use crate::errors::{CalcError, CalcResult};
use crate::life::{corrosion_rates, evaluate_life, next_inspection_date, projected_thickness, CorrosionRates};
use crate::materials::resolve_stress;
use crate::units::{static_head_pressure, Feet, WATER_PSI_PER_FT};
use crate::validation::Validator;

/// Calculate a component with the default thresholds.
///
/// # Returns
///
/// * `Ok(ComponentResult)` - thickness, MAWP and fitness with warnings attached
/// * `Err(CalcError)` - inputs invalid, or the code formula does not apply
pub fn calculate(input: &ComponentInput) -> CalcResult<ComponentResult> {
    calculate_with_config(input, EngineConfig::global_default())
}

/// Calculate a component with an explicit threshold set.
pub fn calculate_with_config(input: &ComponentInput, config: &EngineConfig) -> CalcResult<ComponentResult> {
    log::debug!("{}: calculating {}", input.label, input.geometry);

    let mut v = Validator::new(config);
    input.validate(&mut v)?;
    let mut defaults = DefaultResolver::new(input);

    let (stress, stress_source) = resolve_allowable_stress(input, &mut v, &mut defaults)?;
    let se = stress * input.joint_efficiency;

    let static_head_psi = static_head(input, &mut defaults)?;
    let pressure = input.design_pressure_psi + static_head_psi;

    let geometry = ResolvedGeometry::resolve(input, &mut defaults, &mut v)?;
    geometry.check_pressure(pressure, se, &mut v)?;

    let modes = geometry.modes();
    let thicknesses = modes
        .iter()
        .map(|mode| mode.required_thickness(pressure, se, &mut v))
        .collect::<CalcResult<Vec<f64>>>()?;

    let governing = thicknesses
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &t)| match best {
            Some((_, max)) if max >= t => best,
            _ => Some((i, t)),
        })
        .map(|(i, _)| i)
        .ok_or_else(|| CalcError::calculation_failed(input.geometry.name(), "No stress mode defined"))?;

    let mut required = thicknesses[governing];
    let mut governing_condition = modes[governing].name.to_string();
    let mut code_reference = modes[governing].code_reference.to_string();
    let mut formula = modes[governing].formula.to_string();

    if let Some(wall) = geometry.minimum_wall() {
        if wall > required {
            required = wall;
            governing_condition = "Minimum pipe wall".to_string();
            code_reference = asme_ref::NOZZLE_NECK.to_string();
            formula = "t = 0.875 × pipe wall".to_string();
        }
    }
    log::debug!("{}: t_min = {:.4} in ({})", input.label, required, governing_condition);

    geometry.check_thickness(required, &mut v);

    let actual = input.thickness.actual_in;

    let mut mode_mawps: Vec<Option<f64>> = vec![None; modes.len()];
    if let (Some(t), true) = (actual, geometry.reports_mawp()) {
        for (slot, mode) in mode_mawps.iter_mut().zip(&modes) {
            *slot = Some(mode.mawp(t, se, &mut v)? - static_head_psi);
        }
    }
    let mawp = mode_mawps.iter().flatten().copied().reduce(f64::min);
    if let Some(mawp) = mawp {
        check_mawp_ratio(mawp, input.design_pressure_psi, &mut v)?;
    }

    let mut corrosion_allowance_in = None;
    let mut rates = CorrosionRates::default();
    let mut remaining_life_years = None;
    let mut inspection = None;
    let mut next_date = None;
    let mut projected_thickness_in = None;
    let mut projected_mawp_psi = None;
    let mut compliant = true;

    if let Some(t) = actual {
        let raw_allowance = t - required;
        compliant = raw_allowance >= 0.0;
        check_actual_thickness(t, required, &mut v);

        let allowance = raw_allowance.max(0.0);
        let life = evaluate_life(allowance, corrosion_rates(&input.thickness, &mut v)?, &mut v);

        if let (Some(plan), Some(rate)) = (life.inspection, life.rates.governing) {
            let projected = projected_thickness(t, rate, plan.interval_years);
            projected_thickness_in = Some(projected);
            if geometry.reports_mawp() && projected > 0.0 {
                projected_mawp_psi = modes
                    .iter()
                    .filter_map(|mode| mode.mawp_unchecked(projected, se))
                    .reduce(f64::min)
                    .map(|p| p - static_head_psi);
            }
        }
        if let (Some(date), Some(plan)) = (input.last_inspection_date, life.inspection) {
            next_date = next_inspection_date(date, plan.interval_years);
        }

        corrosion_allowance_in = Some(allowance);
        rates = life.rates;
        remaining_life_years = life.remaining_life_years;
        inspection = life.inspection;
    }

    let modes = modes
        .iter()
        .zip(thicknesses)
        .zip(mode_mawps)
        .map(|((mode, required_thickness_in), mawp_psi)| ModeResult {
            mode: mode.name.to_string(),
            code_reference: mode.code_reference.to_string(),
            formula: mode.formula.to_string(),
            required_thickness_in,
            mawp_psi,
        })
        .collect();

    log::debug!(
        "{}: MAWP = {:?} psi, remaining life = {:?} yr, compliant = {}",
        input.label,
        mawp,
        remaining_life_years,
        compliant
    );

    Ok(ComponentResult {
        label: input.label.clone(),
        geometry: input.geometry.name().to_string(),
        design_pressure_psi: input.design_pressure_psi,
        static_head_psi,
        effective_pressure_psi: pressure,
        allowable_stress_psi: stress,
        stress_source,
        joint_efficiency: input.joint_efficiency,
        required_thickness_in: required,
        modes,
        governing_condition,
        code_reference,
        formula,
        actual_thickness_in: actual,
        mawp_psi: mawp,
        corrosion_allowance_in,
        corrosion_rates: rates,
        remaining_life_years,
        inspection,
        next_inspection_date: next_date,
        projected_thickness_in,
        projected_mawp_psi,
        compliant,
        warnings: v.into_warnings(),
        defaults_used: defaults.into_used(),
    })
}

/// Explicit stress wins; otherwise the table, then the recorded fallback.
fn resolve_allowable_stress(
    input: &ComponentInput,
    v: &mut Validator<'_>,
    defaults: &mut DefaultResolver<'_>,
) -> CalcResult<(f64, StressSource)> {
    if let Some(stress) = input.allowable_stress_psi {
        let stress = v.check_positive("allowable_stress_psi", stress, None)?;
        return Ok((stress, StressSource::Explicit));
    }
    let material = input
        .material
        .as_ref()
        .ok_or_else(|| CalcError::missing_field("allowable_stress_psi"))?;

    let lookup = resolve_stress(&material.code, material.design_temperature_f);
    match (lookup.is_ok(), material.fallback_stress_psi) {
        (false, Some(fallback)) => {
            let stress = v.check_positive("material.fallback_stress_psi", fallback, None)?;
            let reason = if lookup.normalized_code.is_some() {
                "has no tabulated stress at the design temperature"
            } else {
                "is not in the allowable stress table"
            };
            v.critical(
                "allowable_stress_psi",
                format!(
                    "Material {} {} ({}); fallback stress used - verify before relying on the result",
                    material.code,
                    reason,
                    asme_ref::ALLOWABLE_STRESS
                ),
                stress,
                "tabulated value",
            );
            defaults.record(
                "allowable_stress_psi",
                stress,
                format!(
                    "Fallback stress for {} at {} °F",
                    material.code, material.design_temperature_f
                ),
            );
            Ok((
                stress,
                StressSource::Fallback {
                    material: material.code.clone(),
                    temperature_f: material.design_temperature_f,
                },
            ))
        }
        _ => {
            let status = lookup.status;
            let name = lookup
                .normalized_code
                .clone()
                .unwrap_or_else(|| material.code.clone());
            let stress = lookup.into_result(&material.code)?;
            log::debug!(
                "{}: S = {} psi from {} at {} °F ({:?})",
                input.label,
                stress,
                name,
                material.design_temperature_f,
                status
            );
            Ok((
                stress,
                StressSource::Table {
                    material: name,
                    temperature_f: material.design_temperature_f,
                    status,
                },
            ))
        }
    }
}

/// Liquid head in psi; zero when none is given.
fn static_head(input: &ComponentInput, defaults: &mut DefaultResolver<'_>) -> CalcResult<f64> {
    let Some(head) = &input.static_head else {
        return Ok(0.0);
    };
    let specific_gravity = defaults.resolve(Dimension::SpecificGravity, head.specific_gravity)?;
    let psi = static_head_pressure(Feet(head.head_ft), specific_gravity).0;
    if psi > 0.0 {
        defaults.record(
            "effective_pressure_psi",
            input.design_pressure_psi + psi,
            format!(
                "P + {} × SG × SH = {} + {:.2} psi ({})",
                WATER_PSI_PER_FT,
                input.design_pressure_psi,
                psi,
                asme_ref::STATIC_HEAD
            ),
        );
    }
    Ok(psi)
}

fn check_mawp_ratio(mawp: f64, design_pressure: f64, v: &mut Validator<'_>) -> CalcResult<()> {
    let limits = v.config().compliance;
    let ratio = mawp / design_pressure;
    let expected = format!(
        "{} to {} psi",
        limits.mawp_ratio_low * design_pressure,
        limits.mawp_ratio_high * design_pressure
    );
    if ratio > limits.mawp_ratio_abort {
        return Err(CalcError::calculation_failed(
            "MAWP",
            format!(
                "MAWP of {:.1} psi is {:.1} times the design pressure - check thickness, diameter and stress inputs ({})",
                mawp,
                ratio,
                asme_ref::MAWP
            ),
        ));
    }
    if ratio > limits.mawp_ratio_high {
        v.warn(
            "mawp_psi",
            format!(
                "MAWP exceeds {} times the design pressure - verify inputs ({})",
                limits.mawp_ratio_high,
                asme_ref::MAWP
            ),
            mawp,
            expected,
        );
    } else if ratio < limits.mawp_ratio_low {
        v.warn(
            "mawp_psi",
            format!(
                "MAWP is below {} times the design pressure ({})",
                limits.mawp_ratio_low,
                asme_ref::MAWP
            ),
            mawp,
            expected,
        );
    }
    Ok(())
}

fn check_actual_thickness(actual: f64, required: f64, v: &mut Validator<'_>) {
    let limits = v.config().compliance;
    let field = "thickness.actual_in";
    let expected = format!(">= {:.4}", required);
    if actual < required {
        v.critical(
            "corrosion_allowance_in",
            "Actual thickness is below the required thickness - component does not comply",
            actual - required,
            ">= 0",
        );
        if actual < limits.critically_below_factor * required {
            v.critical(
                field,
                format!(
                    "Actual thickness is critically below required ({:.0}% of t_min)",
                    100.0 * actual / required
                ),
                actual,
                expected,
            );
        }
    } else if actual < limits.proximity_factor * required {
        v.warn(
            field,
            format!(
                "Actual thickness is within {:.0}% of the required thickness",
                100.0 * (limits.proximity_factor - 1.0)
            ),
            actual,
            expected,
        );
    }
}
