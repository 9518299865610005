//! # Vessel Aggregation
//!
//! Reduces component results to vessel-level figures. The vessel is only as
//! good as its weakest component: the governing MAWP is the lowest component
//! MAWP, remaining life the shortest, and compliance requires every
//! component to comply. No formulas are evaluated here.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::{ComponentInput, Geometry};
//! use vessel_core::vessel::{evaluate_vessel, VesselInput};
//!
//! let vessel = VesselInput {
//!     tag: "V-101".to_string(),
//!     components: vec![
//!         ComponentInput::new("Shell", Geometry::CylindricalShell, 280.0, 20_000.0, 1.0, 130.26)
//!             .with_actual_thickness(0.8006),
//!         ComponentInput::new("Head", Geometry::ellipsoidal_2_1(), 280.0, 20_000.0, 1.0, 130.26)
//!             .with_actual_thickness(0.507),
//!     ],
//! };
//! let summary = evaluate_vessel(&vessel).unwrap();
//!
//! assert_eq!(summary.governing_component.as_deref(), Some("Head"));
//! assert!(!summary.overall_compliant);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{calculate_with_config, ComponentInput, ComponentResult};
use crate::config::EngineConfig;
use crate::errors::{CalcError, CalcResult};

/// A vessel: a tag and its components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselInput {
    /// Equipment tag (e.g., "V-101")
    pub tag: String,
    pub components: Vec<ComponentInput>,
}

/// Vessel-level figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSummary {
    pub tag: String,

    pub components: Vec<ComponentResult>,

    /// Label of the component with the lowest MAWP
    pub governing_component: Option<String>,

    /// Lowest component MAWP (psi)
    pub governing_mawp_psi: Option<f64>,

    /// Label of the component with the shortest remaining life
    pub life_limiting_component: Option<String>,

    /// Shortest remaining life over components that have one (years)
    pub min_remaining_life_years: Option<f64>,

    /// Shortest inspection interval over components (years)
    pub inspection_interval_years: Option<f64>,

    /// Any component mandates an internal inspection
    pub internal_inspection_required: bool,

    /// Every component complies
    pub overall_compliant: bool,

    /// Critical warnings across all components
    pub critical_warning_count: usize,
}

impl VesselSummary {
    pub fn component(&self, label: &str) -> Option<&ComponentResult> {
        self.components.iter().find(|c| c.label == label)
    }
}

/// First component with the smallest value; ties keep the earlier one.
fn minimum_by<F>(results: &[ComponentResult], value: F) -> Option<(&ComponentResult, f64)>
where
    F: Fn(&ComponentResult) -> Option<f64>,
{
    results
        .iter()
        .filter_map(|r| value(r).map(|v| (r, v)))
        .fold(None, |best, (r, v)| match best {
            Some((_, min)) if min <= v => best,
            _ => Some((r, v)),
        })
}

/// Reduce component results to a vessel summary.
pub fn summarize(tag: impl Into<String>, components: Vec<ComponentResult>) -> CalcResult<VesselSummary> {
    let tag = tag.into();
    if components.is_empty() {
        return Err(CalcError::invalid_input(
            "components",
            "[]",
            "A vessel needs at least one component",
        ));
    }

    let governing = minimum_by(&components, |r| r.mawp_psi);
    let life_limiting = minimum_by(&components, |r| r.remaining_life_years);
    let interval = minimum_by(&components, ComponentResult::inspection_interval_years);

    let summary = VesselSummary {
        governing_component: governing.map(|(r, _)| r.label.clone()),
        governing_mawp_psi: governing.map(|(_, p)| p),
        life_limiting_component: life_limiting.map(|(r, _)| r.label.clone()),
        min_remaining_life_years: life_limiting.map(|(_, y)| y),
        inspection_interval_years: interval.map(|(_, y)| y),
        internal_inspection_required: components.iter().any(ComponentResult::requires_internal_inspection),
        overall_compliant: components.iter().all(ComponentResult::passes),
        critical_warning_count: components.iter().map(ComponentResult::critical_warning_count).sum(),
        tag,
        components,
    };

    log::info!(
        "{}: governing MAWP {:?} psi ({:?}), min remaining life {:?} yr, compliant = {}",
        summary.tag,
        summary.governing_mawp_psi,
        summary.governing_component,
        summary.min_remaining_life_years,
        summary.overall_compliant
    );
    Ok(summary)
}

/// Calculate every component and summarize (default thresholds).
pub fn evaluate_vessel(vessel: &VesselInput) -> CalcResult<VesselSummary> {
    evaluate_vessel_with_config(vessel, EngineConfig::global_default())
}

/// Calculate every component and summarize.
///
/// The first component that fails aborts the evaluation.
pub fn evaluate_vessel_with_config(vessel: &VesselInput, config: &EngineConfig) -> CalcResult<VesselSummary> {
    let results = vessel
        .components
        .iter()
        .map(|c| calculate_with_config(c, config))
        .collect::<CalcResult<Vec<_>>>()?;
    summarize(vessel.tag.clone(), results)
}
