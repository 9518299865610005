//! # Engine Configuration
//!
//! Every threshold the validation layer applies lives in [`EngineConfig`].
//! The defaults reproduce the ASME VIII-1 / API 510 limits; a site may load
//! a stricter set from TOML.
//!
//! ```toml
//! [denominator]
//! hard_floor_psi = 100.0
//! soft_floor_psi = 1000.0
//!
//! [life]
//! remaining_life_cap_years = 500.0
//! max_inspection_interval_years = 10.0
//! ```
//!
//! Missing tables or keys fall back to their defaults.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

static DEFAULT_CONFIG: Lazy<EngineConfig> = Lazy::new(EngineConfig::default);

/// Floors applied to formula denominators expressed in psi.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DenominatorLimits {
    /// Below this the formula is numerically unstable and the calculation aborts
    pub hard_floor_psi: f64,
    /// Below this a warning is attached
    pub soft_floor_psi: f64,
}

impl Default for DenominatorLimits {
    fn default() -> Self {
        Self {
            hard_floor_psi: 100.0,
            soft_floor_psi: 1000.0,
        }
    }
}

/// Applicability limits of the cylindrical shell formulas (UG-27).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellLimits {
    /// P/SE ceiling of the circumferential formula
    pub circumferential_ratio_max: f64,
    /// P/SE ceiling of the longitudinal formula (abort above)
    pub longitudinal_ratio_max: f64,
    /// t/R ceiling of thin-wall theory
    pub thin_wall_ratio_max: f64,
}

impl Default for ShellLimits {
    fn default() -> Self {
        Self {
            circumferential_ratio_max: 0.385,
            longitudinal_ratio_max: 1.25,
            thin_wall_ratio_max: 0.5,
        }
    }
}

/// Applicability limits of the formed head formulas (UG-32).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadLimits {
    /// P/SE above this aborts
    pub ratio_abort: f64,
    /// P/SE above this warns
    pub ratio_warn: f64,
    /// P/SE above this is a critical warning
    pub ratio_critical: f64,
    /// t/R ceiling for the hemispherical formula
    pub hemispherical_thin_wall_max: f64,
    /// Torispherical L/r lower bound
    pub crown_knuckle_ratio_min: f64,
    /// Torispherical L/r upper bound
    pub crown_knuckle_ratio_max: f64,
    /// M factor lower bound
    pub m_factor_min: f64,
    /// M factor upper bound
    pub m_factor_max: f64,
    /// Standard knuckle radius as a fraction of outside diameter
    pub knuckle_fraction_min: f64,
    /// Minimum knuckle radius as a multiple of head thickness
    pub knuckle_thickness_multiple: f64,
}

impl Default for HeadLimits {
    fn default() -> Self {
        Self {
            ratio_abort: 0.9,
            ratio_warn: 0.5,
            ratio_critical: 0.665,
            hemispherical_thin_wall_max: 0.356,
            crown_knuckle_ratio_min: 1.0,
            crown_knuckle_ratio_max: 16.67,
            m_factor_min: 1.0,
            m_factor_max: 1.771,
            knuckle_fraction_min: 0.06,
            knuckle_thickness_multiple: 3.0,
        }
    }
}

/// Applicability limits of the unstayed flat head formula (UG-34).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatHeadLimits {
    /// Lowest tabulated attachment factor
    pub attachment_factor_min: f64,
    /// Highest tabulated attachment factor
    pub attachment_factor_max: f64,
    /// Attachment factor above this aborts
    pub attachment_factor_abort: f64,
    /// Pressure above this warns (psi)
    pub pressure_warn_psi: f64,
    /// Pressure above this is a critical warning (psi)
    pub pressure_critical_psi: f64,
    /// Pressure above this aborts (psi)
    pub pressure_ceiling_psi: f64,
}

impl Default for FlatHeadLimits {
    fn default() -> Self {
        Self {
            attachment_factor_min: 0.10,
            attachment_factor_max: 0.33,
            attachment_factor_abort: 0.5,
            pressure_warn_psi: 50.0,
            pressure_critical_psi: 100.0,
            pressure_ceiling_psi: 150.0,
        }
    }
}

/// Applicability limits of the conical section formula (UG-32(g)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeLimits {
    /// Half-apex angle up to which the formula is defined (degrees)
    pub half_angle_scope_deg: f64,
    /// Half-apex angle at or above which the geometry is invalid (degrees)
    pub half_angle_abort_deg: f64,
}

impl Default for ConeLimits {
    fn default() -> Self {
        Self {
            half_angle_scope_deg: 30.0,
            half_angle_abort_deg: 90.0,
        }
    }
}

/// Post-thickness compliance thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceLimits {
    /// t_act below this multiple of t_min is "critically below"
    pub critically_below_factor: f64,
    /// t_act below this multiple of t_min gets a proximity warning
    pub proximity_factor: f64,
    /// MAWP/P above this aborts as unrealistic
    pub mawp_ratio_abort: f64,
    /// MAWP/P above this warns
    pub mawp_ratio_high: f64,
    /// MAWP/P below this warns
    pub mawp_ratio_low: f64,
}

impl Default for ComplianceLimits {
    fn default() -> Self {
        Self {
            critically_below_factor: 0.9,
            proximity_factor: 1.02,
            mawp_ratio_abort: 10.0,
            mawp_ratio_high: 2.0,
            mawp_ratio_low: 0.5,
        }
    }
}

/// Remaining-life and inspection scheduling parameters (API 510).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeLimits {
    /// Sentinel reported when no active corrosion is measured
    pub remaining_life_cap_years: f64,
    /// Upper bound on the inspection interval
    pub max_inspection_interval_years: f64,
    /// Remaining life at or below which internal inspection is mandated
    pub internal_inspection_years: f64,
    /// Remaining life below which replacement must be planned
    pub plan_replacement_years: f64,
    /// Remaining life below which immediate action is required
    pub immediate_action_years: f64,
}

impl Default for LifeLimits {
    fn default() -> Self {
        Self {
            remaining_life_cap_years: 500.0,
            max_inspection_interval_years: 10.0,
            internal_inspection_years: 4.0,
            plan_replacement_years: 2.0,
            immediate_action_years: 1.0,
        }
    }
}

/// All validation thresholds used by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub denominator: DenominatorLimits,
    pub shell: ShellLimits,
    pub head: HeadLimits,
    pub flat_head: FlatHeadLimits,
    pub cone: ConeLimits,
    pub compliance: ComplianceLimits,
    pub life: LifeLimits,
}

impl EngineConfig {
    /// Shared default configuration.
    pub fn global_default() -> &'static EngineConfig {
        &DEFAULT_CONFIG
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| CalcError::serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&text)
    }

    /// Save the configuration as TOML.
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))?;
        fs::write(path, text)
            .map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))
    }

    /// Reject threshold sets that contradict themselves.
    pub fn validate(&self) -> CalcResult<()> {
        let d = &self.denominator;
        if d.hard_floor_psi <= 0.0 || d.soft_floor_psi < d.hard_floor_psi {
            return Err(CalcError::invalid_input(
                "denominator",
                format!("hard={} soft={}", d.hard_floor_psi, d.soft_floor_psi),
                "Floors must be positive with soft >= hard",
            ));
        }
        let h = &self.head;
        if !(h.ratio_warn <= h.ratio_critical && h.ratio_critical <= h.ratio_abort) {
            return Err(CalcError::invalid_input(
                "head",
                format!("warn={} critical={} abort={}", h.ratio_warn, h.ratio_critical, h.ratio_abort),
                "Head ratio thresholds must be ordered warn <= critical <= abort",
            ));
        }
        let f = &self.flat_head;
        if !(f.pressure_warn_psi <= f.pressure_critical_psi && f.pressure_critical_psi <= f.pressure_ceiling_psi) {
            return Err(CalcError::invalid_input(
                "flat_head",
                format!(
                    "warn={} critical={} ceiling={}",
                    f.pressure_warn_psi, f.pressure_critical_psi, f.pressure_ceiling_psi
                ),
                "Flat head pressure thresholds must be ordered",
            ));
        }
        let c = &self.compliance;
        if !(0.0 < c.critically_below_factor && c.critically_below_factor < 1.0 && 1.0 < c.proximity_factor) {
            return Err(CalcError::invalid_input(
                "compliance",
                format!("critically_below={} proximity={}", c.critically_below_factor, c.proximity_factor),
                "Compliance factors must satisfy 0 < critically_below < 1 < proximity",
            ));
        }
        if !(c.mawp_ratio_low < c.mawp_ratio_high && c.mawp_ratio_high <= c.mawp_ratio_abort) {
            return Err(CalcError::invalid_input(
                "compliance",
                format!(
                    "low={} high={} abort={}",
                    c.mawp_ratio_low, c.mawp_ratio_high, c.mawp_ratio_abort
                ),
                "MAWP ratio thresholds must be ordered low < high <= abort",
            ));
        }
        let l = &self.life;
        if l.remaining_life_cap_years <= 0.0 || l.max_inspection_interval_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "life",
                format!("cap={} interval={}", l.remaining_life_cap_years, l.max_inspection_interval_years),
                "Life cap and inspection interval must be positive",
            ));
        }
        if !(0.0 <= l.immediate_action_years
            && l.immediate_action_years <= l.plan_replacement_years
            && l.plan_replacement_years <= l.internal_inspection_years)
        {
            return Err(CalcError::invalid_input(
                "life",
                format!(
                    "immediate={} replacement={} internal={}",
                    l.immediate_action_years, l.plan_replacement_years, l.internal_inspection_years
                ),
                "Life bands must be ordered immediate <= replacement <= internal inspection",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.denominator.hard_floor_psi, 100.0);
        assert_eq!(config.denominator.soft_floor_psi, 1000.0);
        assert_eq!(config.shell.circumferential_ratio_max, 0.385);
        assert_eq!(config.life.max_inspection_interval_years, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [life]
            remaining_life_cap_years = 999.0
            "#,
        )
        .unwrap();
        assert_eq!(config.life.remaining_life_cap_years, 999.0);
        assert_eq!(config.life.max_inspection_interval_years, 10.0);
        assert_eq!(config.flat_head, FlatHeadLimits::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_inconsistent_floors_rejected() {
        let result = EngineConfig::from_toml_str(
            r#"
            [denominator]
            hard_floor_psi = 500.0
            soft_floor_psi = 200.0
            "#,
        );
        assert!(matches!(result, Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_unordered_life_bands_rejected() {
        let result = EngineConfig::from_toml_str(
            r#"
            [life]
            immediate_action_years = 3.0
            plan_replacement_years = 2.0
            "#,
        );
        assert!(matches!(result, Err(CalcError::InvalidInput { ref field, .. }) if field == "life"));
    }

    #[test]
    fn test_compliance_factors_must_straddle_one() {
        for text in [
            "[compliance]\nproximity_factor = 0.98\n",
            "[compliance]\ncritically_below_factor = 1.05\n",
        ] {
            let result = EngineConfig::from_toml_str(text);
            assert!(
                matches!(result, Err(CalcError::InvalidInput { ref field, .. }) if field == "compliance"),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_bad_toml() {
        let result = EngineConfig::from_toml_str("[life\nbroken");
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(CalcError::FileError { .. })));
    }
}
