//! # Materials Database
//!
//! Allowable stress lookup for pressure vessel materials, plus the nominal
//! pipe size table used for nozzle necks.
//!
//! The stress table is built once per process and never mutated. Lookups are
//! pure: a material code is normalized through an alias index, then the
//! allowable stress is taken exactly at a tabulated temperature or linearly
//! interpolated between the two neighbouring points. Temperatures outside the
//! tabulated range are rejected, never extrapolated.
//!
//! A failed lookup is reported through [`LookupStatus`] rather than as an
//! error, so the caller decides whether it is a hard stop or a recorded
//! fallback.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::materials::{resolve_stress, LookupStatus};
//!
//! let lookup = resolve_stress("sa-516 gr. 70", 650.0);
//! assert_eq!(lookup.status, LookupStatus::Exact);
//! assert_eq!(lookup.stress_psi, Some(18_800.0));
//! assert_eq!(lookup.normalized_code.as_deref(), Some("SA-516-70"));
//!
//! let too_hot = resolve_stress("SA-516-70", 1200.0);
//! assert_eq!(too_hot.status, LookupStatus::OutOfRange);
//! assert!(too_hot.stress_psi.is_none());
//! ```

pub mod allowable_stress;
pub mod pipe_schedule;

pub use pipe_schedule::{standard_wall, PipeSize};

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Celsius, Fahrenheit};

static MATERIAL_DB: Lazy<MaterialDb> = Lazy::new(|| MaterialDb::from_specs(allowable_stress::builtin_materials()));

/// Tolerance for treating a temperature as a tabulated point (°F)
const TEMPERATURE_MATCH_TOLERANCE: f64 = 1e-9;

/// Product form / alloy family of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    CarbonSteelPlate,
    CarbonSteelPipe,
    CarbonSteelForging,
    StainlessSteel,
}

impl MaterialCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialCategory::CarbonSteelPlate => "Carbon Steel Plate",
            MaterialCategory::CarbonSteelPipe => "Carbon Steel Pipe",
            MaterialCategory::CarbonSteelForging => "Carbon Steel Forging",
            MaterialCategory::StainlessSteel => "Austenitic Stainless Steel",
        }
    }
}

/// A material specification with its allowable stress table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Canonical code (e.g., "SA-516-70")
    pub code: String,
    /// Alternate spellings that resolve to this material
    pub aliases: Vec<String>,
    pub description: String,
    pub category: MaterialCategory,
    /// Specified minimum tensile strength (psi)
    pub min_tensile_psi: f64,
    /// Specified minimum yield strength (psi)
    pub min_yield_psi: f64,
    /// Lowest temperature with a tabulated stress (°F)
    pub min_temp_f: f64,
    /// Highest temperature with a tabulated stress (°F)
    pub max_temp_f: f64,
    /// (temperature °F, allowable stress psi), ascending by temperature
    pub stress_points: Vec<(f64, f64)>,
}

impl MaterialSpec {
    /// Check whether a temperature is inside the tabulated range
    pub fn covers(&self, temperature_f: f64) -> bool {
        temperature_f >= self.min_temp_f && temperature_f <= self.max_temp_f
    }

    /// Allowable stress at a temperature, with how it was obtained.
    ///
    /// Returns `None` outside the tabulated range.
    pub fn allowable_stress_at(&self, temperature_f: f64) -> Option<(f64, LookupStatus)> {
        if !temperature_f.is_finite() || !self.covers(temperature_f) {
            return None;
        }

        if let Some(&(_, s)) = self
            .stress_points
            .iter()
            .find(|(t, _)| (t - temperature_f).abs() <= TEMPERATURE_MATCH_TOLERANCE)
        {
            return Some((s, LookupStatus::Exact));
        }

        self.stress_points.windows(2).find_map(|pair| {
            let (t1, s1) = pair[0];
            let (t2, s2) = pair[1];
            if temperature_f > t1 && temperature_f < t2 {
                let fraction = (temperature_f - t1) / (t2 - t1);
                Some((s1 + fraction * (s2 - s1), LookupStatus::Interpolated))
            } else {
                None
            }
        })
    }
}

/// Outcome of an allowable stress lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupStatus {
    /// Temperature matched a tabulated point
    Exact,
    /// Linear interpolation between two tabulated points
    Interpolated,
    /// No material matches the code
    NotFound,
    /// Material found, temperature outside its tabulated range
    OutOfRange,
}

/// Result of [`resolve_stress`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressLookup {
    pub status: LookupStatus,
    /// Allowable stress (psi); present only for `Exact` and `Interpolated`
    pub stress_psi: Option<f64>,
    /// Canonical code the input resolved to, if any
    pub normalized_code: Option<String>,
    /// Temperature the lookup was made at (°F)
    pub temperature_f: f64,
}

impl StressLookup {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, LookupStatus::Exact | LookupStatus::Interpolated)
    }

    /// Convert a failed lookup into the matching error.
    pub fn into_result(self, requested_code: &str) -> CalcResult<f64> {
        match (self.status, self.stress_psi) {
            (LookupStatus::Exact | LookupStatus::Interpolated, Some(s)) => Ok(s),
            (LookupStatus::NotFound, _) => Err(CalcError::material_not_found(requested_code)),
            _ => {
                let range = self
                    .normalized_code
                    .as_deref()
                    .and_then(|code| MaterialDb::global().lookup(code))
                    .map(|m| format!("{} to {} °F", m.min_temp_f, m.max_temp_f))
                    .unwrap_or_else(|| "the tabulated range".to_string());
                Err(CalcError::invalid_input(
                    "design_temperature_f",
                    self.temperature_f.to_string(),
                    format!("Temperature outside {} for {}; extrapolation is not permitted", range, requested_code),
                ))
            }
        }
    }
}

/// Normalize a user-entered material code to an index key.
///
/// Case, punctuation, whitespace and the qualifier words "Grade"/"Gr",
/// "Type"/"TP" are ignored: "SA-516 Gr. 70", "sa516-70" and "SA 516 70"
/// all produce the same key.
pub fn normalize_code(raw: &str) -> String {
    let mut key: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    for token in ["GRADE", "GR", "TYPE", "TP"] {
        key = key.replace(token, "");
    }
    key
}

/// In-memory material database indexed by normalized code and aliases.
#[derive(Debug, Clone, Default)]
pub struct MaterialDb {
    specs: Vec<MaterialSpec>,
    index: HashMap<String, usize>,
}

impl MaterialDb {
    /// Build a database from a list of specs.
    pub fn from_specs(specs: Vec<MaterialSpec>) -> Self {
        let mut index = HashMap::new();
        for (i, spec) in specs.iter().enumerate() {
            index.insert(normalize_code(&spec.code), i);
            for alias in &spec.aliases {
                index.entry(normalize_code(alias)).or_insert(i);
            }
        }
        MaterialDb { specs, index }
    }

    /// The process-wide built-in database.
    pub fn global() -> &'static MaterialDb {
        &MATERIAL_DB
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn all(&self) -> &[MaterialSpec] {
        &self.specs
    }

    /// Find a material by code or alias.
    ///
    /// ASTM designations ("A516-70") also resolve to their ASME counterparts.
    pub fn lookup(&self, code: &str) -> Option<&MaterialSpec> {
        let key = normalize_code(code);
        if key.is_empty() {
            return None;
        }
        let found = self.index.get(&key).or_else(|| {
            if key.starts_with('A') {
                self.index.get(&format!("S{}", key))
            } else {
                None
            }
        });
        found.map(|&i| &self.specs[i])
    }

    /// Like [`lookup`](Self::lookup) but returns an error when missing.
    pub fn get(&self, code: &str) -> CalcResult<&MaterialSpec> {
        self.lookup(code).ok_or_else(|| CalcError::material_not_found(code))
    }

    /// Resolve the allowable stress of a material at a temperature.
    pub fn resolve_stress(&self, code: &str, temperature_f: f64) -> StressLookup {
        let Some(spec) = self.lookup(code) else {
            log::debug!("material '{}' not found", code);
            return StressLookup {
                status: LookupStatus::NotFound,
                stress_psi: None,
                normalized_code: None,
                temperature_f,
            };
        };

        match spec.allowable_stress_at(temperature_f) {
            Some((stress, status)) => StressLookup {
                status,
                stress_psi: Some(stress),
                normalized_code: Some(spec.code.clone()),
                temperature_f,
            },
            None => {
                log::debug!(
                    "{} has no allowable stress at {} °F (range {} to {})",
                    spec.code,
                    temperature_f,
                    spec.min_temp_f,
                    spec.max_temp_f
                );
                StressLookup {
                    status: LookupStatus::OutOfRange,
                    stress_psi: None,
                    normalized_code: Some(spec.code.clone()),
                    temperature_f,
                }
            }
        }
    }
}

/// Resolve allowable stress from the built-in database.
pub fn resolve_stress(code: &str, temperature_f: f64) -> StressLookup {
    MaterialDb::global().resolve_stress(code, temperature_f)
}

/// Resolve allowable stress for a temperature given in °C.
pub fn resolve_stress_celsius(code: &str, temperature: Celsius) -> StressLookup {
    let f: Fahrenheit = temperature.into();
    resolve_stress(code, f.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code_variants() {
        let canonical = normalize_code("SA-516-70");
        assert_eq!(canonical, "SA51670");
        assert_eq!(normalize_code("SA-516 Gr. 70"), canonical);
        assert_eq!(normalize_code("sa 516 grade 70"), canonical);
        assert_eq!(normalize_code("SA-240 Type 304"), normalize_code("SA-240-304"));
        assert_eq!(normalize_code("SA-240 TP304L"), normalize_code("SA-240-304L"));
    }

    #[test]
    fn test_exact_lookup() {
        let lookup = resolve_stress("SA-516-70", 700.0);
        assert_eq!(lookup.status, LookupStatus::Exact);
        assert_eq!(lookup.stress_psi, Some(18_100.0));
    }

    #[test]
    fn test_interpolated_lookup() {
        // Midpoint of 100 °F (20,000) and 200 °F (16,700)
        let lookup = resolve_stress("SA-240-304", 150.0);
        assert_eq!(lookup.status, LookupStatus::Interpolated);
        assert!((lookup.stress_psi.unwrap() - 18_350.0).abs() < 1e-9);

        // Quarter point of 700 °F (18,100) and 750 °F (14,800)
        let lookup = resolve_stress("SA-516-70", 712.5);
        assert!((lookup.stress_psi.unwrap() - 17_275.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_edges_are_exact() {
        let mat = MaterialDb::global().get("SA-240-304L").unwrap();
        let low = resolve_stress("SA-240-304L", mat.min_temp_f);
        let high = resolve_stress("SA-240-304L", mat.max_temp_f);
        assert_eq!(low.status, LookupStatus::Exact);
        assert_eq!(high.status, LookupStatus::Exact);
    }

    #[test]
    fn test_out_of_range_has_no_value() {
        let above = resolve_stress("SA-612", 700.0);
        assert_eq!(above.status, LookupStatus::OutOfRange);
        assert_eq!(above.stress_psi, None);
        assert_eq!(above.normalized_code.as_deref(), Some("SA-612"));

        let below = resolve_stress("SA-612", -50.0);
        assert_eq!(below.status, LookupStatus::OutOfRange);

        let err = above.into_result("SA-612").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_not_found() {
        let lookup = resolve_stress("Unobtainium-9", 100.0);
        assert_eq!(lookup.status, LookupStatus::NotFound);
        assert!(!lookup.is_ok());
        assert_eq!(lookup.into_result("Unobtainium-9").unwrap_err().error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(resolve_stress("", 100.0).status, LookupStatus::NotFound);
    }

    #[test]
    fn test_astm_designation_resolves() {
        let db = MaterialDb::global();
        assert_eq!(db.lookup("A516-70").unwrap().code, "SA-516-70");
        assert_eq!(db.lookup("A-106 Gr B").unwrap().code, "SA-106-B");
        assert_eq!(db.lookup("ss316l").unwrap().code, "SA-240-316L");
    }

    #[test]
    fn test_nan_temperature() {
        let lookup = resolve_stress("SA-516-70", f64::NAN);
        assert_eq!(lookup.status, LookupStatus::OutOfRange);
    }

    #[test]
    fn test_celsius_lookup() {
        // 100 °C = 212 °F, between 200 and 300 °F on a flat SA-516-70 curve
        let lookup = resolve_stress_celsius("SA-516-70", Celsius(100.0));
        assert_eq!(lookup.stress_psi, Some(20_000.0));
    }

    #[test]
    fn test_database_listing() {
        let db = MaterialDb::global();
        assert!(db.len() >= 12);
        assert!(!db.is_empty());
        assert!(db.all().iter().any(|m| m.category == MaterialCategory::StainlessSteel));
    }
}
