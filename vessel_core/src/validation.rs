//! # Validation Engine
//!
//! Bound-checking primitives shared by every geometry calculator, and the
//! [`Warning`] record they produce.
//!
//! Each check ends in one of three outcomes:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Err(CalcError)` | the value makes the result invalid under the code formula |
//! | [`Severity::Critical`] warning | a number is returned, but the formula may not apply |
//! | [`Severity::Warning`] | a number is returned, conservative but worth a look |
//!
//! A [`Validator`] is created per calculation and owns its warning list, so
//! concurrent calculations never share state.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::config::EngineConfig;
//! use vessel_core::validation::{RatioBounds, Validator};
//!
//! let config = EngineConfig::default();
//! let mut v = Validator::new(&config);
//!
//! v.check_positive("design_pressure_psi", 150.0, None).unwrap();
//! v.check_ratio(
//!     "pressure_ratio",
//!     0.6,
//!     &RatioBounds::new(0.0, 0.9, "UG-32").warn_above(0.5).critical_above(0.665),
//! ).unwrap();
//!
//! let warnings = v.into_warnings();
//! assert_eq!(warnings.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::errors::{CalcError, CalcResult};

/// Smallest length-unit denominator accepted (inches)
const LENGTH_DENOMINATOR_FLOOR: f64 = 1e-9;

/// How serious a non-fatal finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Result is usable; review recommended
    Warning,
    /// Result is returned but the formula may not apply, or action is required
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A non-fatal finding attached to a calculation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Input or derived quantity the finding concerns
    pub field: String,
    /// Human-readable explanation
    pub message: String,
    pub severity: Severity,
    /// The offending value
    pub value: f64,
    /// What the value was expected to be
    pub expected_range: String,
}

impl Warning {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        value: f64,
        expected_range: impl Into<String>,
    ) -> Self {
        Warning {
            field: field.into(),
            message: message.into(),
            severity,
            value,
            expected_range: expected_range.into(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: {} (value {:.4}, expected {})",
            self.severity, self.field, self.message, self.value, self.expected_range
        )
    }
}

/// Absolute and advisory bounds for a dimensionless ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBounds {
    /// Below this the calculation aborts
    pub min: f64,
    /// Above this the calculation aborts
    pub max: f64,
    /// Above this a warning is attached
    pub warn_above: Option<f64>,
    /// Above this the warning becomes critical
    pub critical_above: Option<f64>,
    /// Below this a warning is attached
    pub warn_below: Option<f64>,
    /// Paragraph whose scope the bounds describe
    pub code_reference: &'static str,
}

impl RatioBounds {
    pub fn new(min: f64, max: f64, code_reference: &'static str) -> Self {
        RatioBounds {
            min,
            max,
            warn_above: None,
            critical_above: None,
            warn_below: None,
            code_reference,
        }
    }

    pub fn warn_above(mut self, limit: f64) -> Self {
        self.warn_above = Some(limit);
        self
    }

    pub fn critical_above(mut self, limit: f64) -> Self {
        self.critical_above = Some(limit);
        self
    }

    pub fn warn_below(mut self, limit: f64) -> Self {
        self.warn_below = Some(limit);
        self
    }

    fn expected_range(&self) -> String {
        let low = self.warn_below.unwrap_or(self.min);
        let high = self
            .warn_above
            .or(self.critical_above)
            .unwrap_or(self.max);
        format!("{} to {}", low, high)
    }
}

/// Per-calculation validation context.
///
/// Holds the thresholds in use and accumulates warnings in the order they
/// were raised.
#[derive(Debug)]
pub struct Validator<'a> {
    config: &'a EngineConfig,
    warnings: Vec<Warning>,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Validator {
            config,
            warnings: Vec::new(),
        }
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Attach an arbitrary warning.
    pub fn push(&mut self, warning: Warning) {
        if warning.is_critical() {
            log::warn!("{}", warning);
        } else {
            log::debug!("{}", warning);
        }
        self.warnings.push(warning);
    }

    pub fn warn(&mut self, field: &str, message: impl Into<String>, value: f64, expected: impl Into<String>) {
        self.push(Warning::new(field, message, Severity::Warning, value, expected));
    }

    pub fn critical(&mut self, field: &str, message: impl Into<String>, value: f64, expected: impl Into<String>) {
        self.push(Warning::new(field, message, Severity::Critical, value, expected));
    }

    /// Value must be finite and > 0; below `typical_min` a warning is attached.
    pub fn check_positive(&mut self, field: &str, value: f64, typical_min: Option<f64>) -> CalcResult<f64> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Value must be a positive number",
            ));
        }
        if let Some(min) = typical_min {
            if value < min {
                self.warn(
                    field,
                    format!("Value is below the typical minimum of {}", min),
                    value,
                    format!(">= {}", min),
                );
            }
        }
        Ok(value)
    }

    /// Joint efficiency must lie in (0, 1].
    pub fn check_joint_efficiency(&mut self, value: f64) -> CalcResult<f64> {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(CalcError::invalid_input(
                "joint_efficiency",
                value.to_string(),
                "Joint efficiency must be greater than 0 and at most 1.0",
            ));
        }
        Ok(value)
    }

    /// Ratio must lie within `[min, max]`; advisory limits attach warnings.
    pub fn check_ratio(&mut self, field: &str, ratio: f64, bounds: &RatioBounds) -> CalcResult<f64> {
        if !ratio.is_finite() || ratio < bounds.min || ratio > bounds.max {
            return Err(CalcError::not_applicable(
                field,
                ratio,
                bounds.code_reference,
                format!("Ratio must lie between {} and {}", bounds.min, bounds.max),
            ));
        }

        let expected = bounds.expected_range();
        if let Some(limit) = bounds.critical_above {
            if ratio > limit {
                self.critical(
                    field,
                    format!(
                        "Ratio exceeds {} - {} formula may not apply",
                        limit, bounds.code_reference
                    ),
                    ratio,
                    expected,
                );
                return Ok(ratio);
            }
        }
        if let Some(limit) = bounds.warn_above {
            if ratio > limit {
                self.warn(field, format!("Ratio exceeds the expected limit of {}", limit), ratio, expected);
                return Ok(ratio);
            }
        }
        if let Some(limit) = bounds.warn_below {
            if ratio < limit {
                self.warn(field, format!("Ratio is below the expected limit of {}", limit), ratio, expected);
            }
        }
        Ok(ratio)
    }

    /// Denominator in psi: must be > 0 and above the hard floor.
    pub fn check_denominator(&mut self, field: &str, value: f64) -> CalcResult<f64> {
        let limits = self.config.denominator;
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::numerical_instability(
                field,
                value,
                "Invalid calculation: formula denominator is zero or negative",
            ));
        }
        if value < limits.hard_floor_psi {
            return Err(CalcError::numerical_instability(
                field,
                value,
                format!(
                    "Numerically unstable: denominator below the {} psi stability floor",
                    limits.hard_floor_psi
                ),
            ));
        }
        if value < limits.soft_floor_psi {
            self.warn(
                field,
                "Formula denominator is small; result is sensitive to input error",
                value,
                format!(">= {}", limits.soft_floor_psi),
            );
        }
        Ok(value)
    }

    /// Denominator in inches: must be > 0.
    pub fn check_length_denominator(&mut self, field: &str, value: f64) -> CalcResult<f64> {
        if !value.is_finite() || value <= LENGTH_DENOMINATOR_FLOOR {
            return Err(CalcError::numerical_instability(
                field,
                value,
                "Invalid calculation: formula denominator is zero or negative",
            ));
        }
        Ok(value)
    }

    pub fn has_critical(&self) -> bool {
        self.warnings.iter().any(Warning::is_critical)
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_positive_rejects_zero_and_nan() {
        let cfg = config();
        let mut v = Validator::new(&cfg);
        assert!(v.check_positive("p", 0.0, None).is_err());
        assert!(v.check_positive("p", -3.0, None).is_err());
        assert!(v.check_positive("p", f64::NAN, None).is_err());
        assert!(v.warnings().is_empty());
    }

    #[test]
    fn test_positive_typical_minimum_warns() {
        let cfg = config();
        let mut v = Validator::new(&cfg);
        assert_eq!(v.check_positive("diameter_in", 0.5, Some(1.0)).unwrap(), 0.5);
        assert_eq!(v.warnings().len(), 1);
        assert_eq!(v.warnings()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_joint_efficiency() {
        let cfg = config();
        let mut v = Validator::new(&cfg);
        assert!(v.check_joint_efficiency(1.0).is_ok());
        assert!(v.check_joint_efficiency(0.85).is_ok());
        assert!(v.check_joint_efficiency(0.0).is_err());
        assert!(v.check_joint_efficiency(1.01).is_err());
    }

    #[test]
    fn test_ratio_triage() {
        let cfg = config();
        let bounds = RatioBounds::new(0.0, 0.9, "UG-32").warn_above(0.5).critical_above(0.665);

        let mut v = Validator::new(&cfg);
        v.check_ratio("r", 0.3, &bounds).unwrap();
        assert!(v.warnings().is_empty());

        v.check_ratio("r", 0.6, &bounds).unwrap();
        assert_eq!(v.warnings().last().unwrap().severity, Severity::Warning);

        v.check_ratio("r", 0.7, &bounds).unwrap();
        assert_eq!(v.warnings().last().unwrap().severity, Severity::Critical);
        assert_eq!(v.warnings().len(), 2);

        let err = v.check_ratio("r", 0.95, &bounds).unwrap_err();
        assert_eq!(err.error_code(), "NOT_APPLICABLE");
    }

    #[test]
    fn test_ratio_warn_below() {
        let cfg = config();
        let bounds = RatioBounds::new(0.0, 0.5, "UG-34").warn_below(0.10).warn_above(0.33);
        let mut v = Validator::new(&cfg);
        v.check_ratio("c", 0.05, &bounds).unwrap();
        v.check_ratio("c", 0.40, &bounds).unwrap();
        assert_eq!(v.warnings().len(), 2);
        assert!(!v.has_critical());
    }

    #[test]
    fn test_denominator_triage() {
        let cfg = config();
        let mut v = Validator::new(&cfg);

        let err = v.check_denominator("d", -5.0).unwrap_err();
        assert!(matches!(err, CalcError::NumericalInstability { ref reason, .. } if reason.contains("Invalid")));

        let err = v.check_denominator("d", 50.0).unwrap_err();
        assert!(matches!(err, CalcError::NumericalInstability { ref reason, .. } if reason.contains("unstable")));

        v.check_denominator("d", 500.0).unwrap();
        assert_eq!(v.warnings().len(), 1);

        v.check_denominator("d", 17_000.0).unwrap();
        assert_eq!(v.warnings().len(), 1);
    }

    #[test]
    fn test_length_denominator() {
        let cfg = config();
        let mut v = Validator::new(&cfg);
        assert!(v.check_length_denominator("R+0.6t", 24.1).is_ok());
        assert!(v.check_length_denominator("R-0.4t", 0.0).is_err());
    }

    #[test]
    fn test_warning_serialization() {
        let w = Warning::new("half_apex_angle_deg", "Exceeds 30 degrees", Severity::Critical, 35.0, "<= 30");
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"severity\":\"critical\""));
        let back: Warning = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
