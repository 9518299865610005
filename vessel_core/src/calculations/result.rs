//! Component result records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::defaults::DefaultUsed;
use crate::life::{CorrosionRates, InspectionPlan, InspectionType};
use crate::materials::LookupStatus;
use crate::validation::Warning;

/// Where the allowable stress came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum StressSource {
    /// Supplied directly in the input
    Explicit,
    /// Looked up in the allowable stress table
    Table {
        material: String,
        temperature_f: f64,
        status: LookupStatus,
    },
    /// Table lookup failed; the input's fallback stress was used
    Fallback { material: String, temperature_f: f64 },
}

/// Thickness and pressure of one stress mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeResult {
    /// Mode name (e.g., "Circumferential stress")
    pub mode: String,
    pub code_reference: String,
    pub formula: String,
    /// Thickness this mode requires at design conditions (in)
    pub required_thickness_in: f64,
    /// Pressure this mode allows at the actual thickness (psi)
    pub mawp_psi: Option<f64>,
}

/// Results of a component calculation.
///
/// Fields that need the measured thickness are `None` when it was not given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentResult {
    pub label: String,
    /// Geometry name (e.g., "Torispherical Head")
    pub geometry: String,

    // === Design Basis ===
    /// Design pressure P as given (psi)
    pub design_pressure_psi: f64,

    /// Static head added to P (psi)
    pub static_head_psi: f64,

    /// Pressure the thickness formulas were evaluated at, P + static head (psi)
    pub effective_pressure_psi: f64,

    /// Allowable stress S used (psi)
    pub allowable_stress_psi: f64,

    pub stress_source: StressSource,

    pub joint_efficiency: f64,

    // === Thickness ===
    /// Minimum required thickness t_min (in), the largest over stress modes
    pub required_thickness_in: f64,

    /// Per-mode thickness and MAWP
    pub modes: Vec<ModeResult>,

    /// Mode (or pipe-wall floor) that sets t_min
    pub governing_condition: String,

    /// Code paragraph of the governing condition
    pub code_reference: String,

    /// Formula of the governing condition
    pub formula: String,

    /// Measured thickness t_act (in)
    pub actual_thickness_in: Option<f64>,

    // === Pressure ===
    /// Maximum allowable working pressure at t_act (psi), the smallest over
    /// stress modes and referred to the top of the vessel
    pub mawp_psi: Option<f64>,

    // === Fitness ===
    /// Ca = t_act − t_min, clamped at zero (in)
    pub corrosion_allowance_in: Option<f64>,

    pub corrosion_rates: CorrosionRates,

    /// Remaining life (years); zero when t_act ≤ t_min
    pub remaining_life_years: Option<f64>,

    pub inspection: Option<InspectionPlan>,

    pub next_inspection_date: Option<NaiveDate>,

    /// Thickness expected at the next inspection (in)
    pub projected_thickness_in: Option<f64>,

    /// MAWP at the projected thickness (psi)
    pub projected_mawp_psi: Option<f64>,

    /// t_act ≥ t_min (true when t_act is unknown)
    pub compliant: bool,

    // === Audit Trail ===
    pub warnings: Vec<Warning>,

    pub defaults_used: Vec<DefaultUsed>,
}

impl ComponentResult {
    pub fn passes(&self) -> bool {
        self.compliant
    }

    pub fn critical_warning_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_critical()).count()
    }

    pub fn has_critical(&self) -> bool {
        self.critical_warning_count() > 0
    }

    /// Result of a single stress mode by name.
    pub fn mode(&self, name: &str) -> Option<&ModeResult> {
        self.modes.iter().find(|m| m.mode == name)
    }

    pub fn inspection_interval_years(&self) -> Option<f64> {
        self.inspection.map(|plan| plan.interval_years)
    }

    pub fn requires_internal_inspection(&self) -> bool {
        self.inspection
            .is_some_and(|plan| plan.inspection_type == InspectionType::Internal)
    }
}
