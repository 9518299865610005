//! # Corrosion Rate, Remaining Life and Inspection Interval
//!
//! API 510 fitness arithmetic, used by every geometry calculator and exposed
//! standalone for components without full geometry context.
//!
//! ```text
//! Cr(ST) = (t_prev − t_act) / Y        short-term rate
//! Cr(LT) = (t_nom  − t_act) / Yn       long-term rate
//! Cr     = max(Cr(ST), Cr(LT))         governing rate
//! RL     = Ca / Cr                     remaining life
//! I      = min(RL / 2, 10 years)       inspection interval
//! ```
//!
//! A negative rate (apparent metal growth) is kept and flagged for manual
//! review; it is never silently zeroed.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::life::{assess_life, InspectionType, LifeInput};
//!
//! let input = LifeInput {
//!     actual_thickness_in: 0.796,
//!     required_thickness_in: 0.719,
//!     short_term_rate: Some(0.000425),
//!     long_term_rate: None,
//! };
//! let life = assess_life(&input).unwrap();
//!
//! assert!((life.remaining_life_years.unwrap() - 181.2).abs() < 0.1);
//! let plan = life.inspection.unwrap();
//! assert_eq!(plan.interval_years, 10.0);
//! assert_eq!(plan.inspection_type, InspectionType::ExternalOnStream);
//! ```

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::code_refs::api510_ref;
use crate::config::{EngineConfig, LifeLimits};
use crate::errors::{CalcError, CalcResult};
use crate::validation::{Validator, Warning};

/// Recommended inspection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionType {
    /// Internal (entry) inspection
    Internal,
    /// External or on-stream inspection
    ExternalOnStream,
}

impl InspectionType {
    pub fn display_name(&self) -> &'static str {
        match self {
            InspectionType::Internal => "internal",
            InspectionType::ExternalOnStream => "external/on-stream",
        }
    }
}

impl std::fmt::Display for InspectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Thickness readings and the time between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThicknessHistory {
    /// Nominal (as-built) thickness t_nom (in)
    pub nominal_in: Option<f64>,
    /// Thickness at the previous inspection t_prev (in)
    pub previous_in: Option<f64>,
    /// Current measured thickness t_act (in)
    pub actual_in: Option<f64>,
    /// Years between the previous and current readings (Y)
    pub years_since_previous: Option<f64>,
    /// Years since t_nom was valid, usually since installation (Yn)
    pub years_since_nominal: Option<f64>,
}

/// Short-term, long-term and governing corrosion rates (in/yr).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrosionRates {
    pub short_term: Option<f64>,
    pub long_term: Option<f64>,
    pub governing: Option<f64>,
}

/// Inspection schedule derived from remaining life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InspectionPlan {
    /// Years until the next inspection
    pub interval_years: f64,
    pub inspection_type: InspectionType,
}

/// Corrosion rate between two readings taken `years` apart.
pub fn corrosion_rate(earlier_in: f64, later_in: f64, years: f64) -> CalcResult<f64> {
    if !years.is_finite() || years <= 0.0 {
        return Err(CalcError::invalid_input(
            "elapsed_years",
            years.to_string(),
            "Elapsed time between readings must be positive",
        ));
    }
    if !earlier_in.is_finite() || !later_in.is_finite() {
        return Err(CalcError::invalid_input(
            "thickness_in",
            format!("{} / {}", earlier_in, later_in),
            "Thickness readings must be finite",
        ));
    }
    Ok((earlier_in - later_in) / years)
}

/// The more conservative of the two rates, or whichever exists.
pub fn governing_rate(short_term: Option<f64>, long_term: Option<f64>) -> Option<f64> {
    match (short_term, long_term) {
        (Some(st), Some(lt)) => Some(st.max(lt)),
        (Some(rate), None) | (None, Some(rate)) => Some(rate),
        (None, None) => None,
    }
}

/// Derive rates from a thickness history, flagging negative rates.
pub fn corrosion_rates(history: &ThicknessHistory, v: &mut Validator<'_>) -> CalcResult<CorrosionRates> {
    let Some(actual) = history.actual_in else {
        return Ok(CorrosionRates::default());
    };

    let short_term = paired_rate(
        v,
        actual,
        history.previous_in,
        history.years_since_previous,
        ("thickness.previous_in", "thickness.years_since_previous", "short-term"),
    )?;
    let long_term = paired_rate(
        v,
        actual,
        history.nominal_in,
        history.years_since_nominal,
        ("thickness.nominal_in", "thickness.years_since_nominal", "long-term"),
    )?;

    flag_negative_rate(v, "corrosion_rate_short_term", short_term);
    flag_negative_rate(v, "corrosion_rate_long_term", long_term);

    Ok(CorrosionRates {
        short_term,
        long_term,
        governing: governing_rate(short_term, long_term),
    })
}

/// Rate from one reading and its elapsed time. A reading without its time,
/// or a time without its reading, leaves the rate uncomputed and is recorded
/// as critical, since the governing rate may then be the less conservative one.
fn paired_rate(
    v: &mut Validator<'_>,
    actual: f64,
    reading: Option<f64>,
    years: Option<f64>,
    (reading_field, years_field, label): (&str, &str, &str),
) -> CalcResult<Option<f64>> {
    match (reading, years) {
        (Some(earlier), Some(years)) => Ok(Some(corrosion_rate(earlier, actual, years)?)),
        (Some(earlier), None) => {
            v.critical(
                years_field,
                format!(
                    "{} given without {} - {} corrosion rate not computed ({})",
                    reading_field,
                    years_field,
                    label,
                    api510_ref::CORROSION_RATE
                ),
                earlier,
                "both reading and elapsed years",
            );
            Ok(None)
        }
        (None, Some(years)) => {
            v.critical(
                reading_field,
                format!(
                    "{} given without {} - {} corrosion rate not computed ({})",
                    years_field,
                    reading_field,
                    label,
                    api510_ref::CORROSION_RATE
                ),
                years,
                "both reading and elapsed years",
            );
            Ok(None)
        }
        (None, None) => Ok(None),
    }
}

fn flag_negative_rate(v: &mut Validator<'_>, field: &str, rate: Option<f64>) {
    if let Some(rate) = rate.filter(|r| *r < 0.0) {
        v.warn(
            field,
            format!(
                "Negative corrosion rate (apparent thickness growth) - verify readings; manual review required ({})",
                api510_ref::CORROSION_RATE
            ),
            rate,
            ">= 0",
        );
    }
}

/// Remaining life in years for a corrosion allowance and governing rate.
///
/// Zero when there is no allowance left; the configured sentinel when the
/// rate shows no active corrosion. A positive rate gives Ca / rate as is,
/// even when that exceeds the sentinel.
pub fn remaining_life(corrosion_allowance_in: f64, rate_in_per_yr: f64, limits: &LifeLimits) -> f64 {
    let allowance = corrosion_allowance_in.max(0.0);
    if allowance <= 0.0 {
        return 0.0;
    }
    if rate_in_per_yr <= 0.0 || !rate_in_per_yr.is_finite() {
        return limits.remaining_life_cap_years;
    }
    let life = allowance / rate_in_per_yr;
    if life.is_finite() {
        life
    } else {
        limits.remaining_life_cap_years
    }
}

/// Interval and inspection type for a remaining life.
pub fn inspection_plan(remaining_life_years: f64, limits: &LifeLimits) -> InspectionPlan {
    let life = remaining_life_years.max(0.0);
    let inspection_type = if life <= limits.internal_inspection_years {
        InspectionType::Internal
    } else {
        InspectionType::ExternalOnStream
    };
    InspectionPlan {
        interval_years: (life / 2.0).min(limits.max_inspection_interval_years),
        inspection_type,
    }
}

/// Attach the remaining-life severity bands.
pub fn assess_remaining_life(remaining_life_years: f64, v: &mut Validator<'_>) {
    let limits = v.config().life;
    let field = "remaining_life_years";
    if remaining_life_years < limits.immediate_action_years {
        v.critical(
            field,
            format!(
                "Remaining life under {} year - immediate action required; internal inspection mandated ({})",
                limits.immediate_action_years,
                api510_ref::INTERNAL_INSPECTION
            ),
            remaining_life_years,
            format!(">= {}", limits.immediate_action_years),
        );
    } else if remaining_life_years < limits.plan_replacement_years {
        v.critical(
            field,
            format!(
                "Remaining life under {} years - plan repair or replacement; internal inspection mandated ({})",
                limits.plan_replacement_years,
                api510_ref::INTERNAL_INSPECTION
            ),
            remaining_life_years,
            format!(">= {}", limits.plan_replacement_years),
        );
    } else if remaining_life_years <= limits.internal_inspection_years {
        v.critical(
            field,
            format!(
                "Remaining life of {} years or less - internal inspection mandated ({})",
                limits.internal_inspection_years,
                api510_ref::INTERNAL_INSPECTION
            ),
            remaining_life_years,
            format!("> {}", limits.internal_inspection_years),
        );
    }
}

/// Thickness expected at the next inspection (never below zero).
pub fn projected_thickness(actual_in: f64, governing_rate: f64, years: f64) -> f64 {
    if governing_rate <= 0.0 {
        return actual_in;
    }
    (actual_in - governing_rate * years).max(0.0)
}

/// Date of the next inspection, in whole months after the last one.
pub fn next_inspection_date(last_inspection: NaiveDate, interval_years: f64) -> Option<NaiveDate> {
    if !interval_years.is_finite() || interval_years < 0.0 {
        return None;
    }
    let months = (interval_years * 12.0).floor() as u32;
    last_inspection.checked_add_months(Months::new(months))
}

/// Remaining life, interval and rates computed together.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LifeOutcome {
    pub rates: CorrosionRates,
    pub remaining_life_years: Option<f64>,
    pub inspection: Option<InspectionPlan>,
}

/// Remaining life and inspection plan from an allowance and rates.
pub(crate) fn evaluate_life(corrosion_allowance_in: f64, rates: CorrosionRates, v: &mut Validator<'_>) -> LifeOutcome {
    let limits = v.config().life;
    let remaining_life_years = if corrosion_allowance_in <= 0.0 {
        Some(0.0)
    } else {
        rates
            .governing
            .map(|rate| remaining_life(corrosion_allowance_in, rate, &limits))
    };

    if let Some(rl) = remaining_life_years {
        assess_remaining_life(rl, v);
    }

    LifeOutcome {
        rates,
        remaining_life_years,
        inspection: remaining_life_years.map(|rl| inspection_plan(rl, &limits)),
    }
}

/// Inputs for a standalone life assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeInput {
    pub actual_thickness_in: f64,
    pub required_thickness_in: f64,
    pub short_term_rate: Option<f64>,
    pub long_term_rate: Option<f64>,
}

/// Outcome of a standalone life assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeAssessment {
    /// Ca = t_act − t_required, clamped at zero
    pub corrosion_allowance_in: f64,
    pub rates: CorrosionRates,
    pub remaining_life_years: Option<f64>,
    pub inspection: Option<InspectionPlan>,
    pub code_reference: String,
    pub warnings: Vec<Warning>,
}

/// Assess remaining life without geometry context (default thresholds).
pub fn assess_life(input: &LifeInput) -> CalcResult<LifeAssessment> {
    assess_life_with_config(input, EngineConfig::global_default())
}

/// Assess remaining life without geometry context.
pub fn assess_life_with_config(input: &LifeInput, config: &EngineConfig) -> CalcResult<LifeAssessment> {
    let mut v = Validator::new(config);
    v.check_positive("actual_thickness_in", input.actual_thickness_in, None)?;
    v.check_positive("required_thickness_in", input.required_thickness_in, None)?;

    let raw_allowance = input.actual_thickness_in - input.required_thickness_in;
    if raw_allowance < 0.0 {
        v.critical(
            "corrosion_allowance_in",
            "Actual thickness is below required thickness",
            raw_allowance,
            ">= 0",
        );
    }
    let allowance = raw_allowance.max(0.0);

    flag_negative_rate(&mut v, "corrosion_rate_short_term", input.short_term_rate);
    flag_negative_rate(&mut v, "corrosion_rate_long_term", input.long_term_rate);

    let rates = CorrosionRates {
        short_term: input.short_term_rate,
        long_term: input.long_term_rate,
        governing: governing_rate(input.short_term_rate, input.long_term_rate),
    };
    let outcome = evaluate_life(allowance, rates, &mut v);

    Ok(LifeAssessment {
        corrosion_allowance_in: allowance,
        rates: outcome.rates,
        remaining_life_years: outcome.remaining_life_years,
        inspection: outcome.inspection,
        code_reference: format!("{}; {}", api510_ref::REMAINING_LIFE, api510_ref::INSPECTION_INTERVAL),
        warnings: v.into_warnings(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Severity;

    fn limits() -> LifeLimits {
        LifeLimits::default()
    }

    #[test]
    fn test_corrosion_rate() {
        let rate = corrosion_rate(0.500, 0.450, 10.0).unwrap();
        assert!((rate - 0.005).abs() < 1e-12);
        assert!(corrosion_rate(0.5, 0.45, 0.0).is_err());
    }

    #[test]
    fn test_governing_rate_takes_larger() {
        assert_eq!(governing_rate(Some(0.004), Some(0.002)), Some(0.004));
        assert_eq!(governing_rate(Some(0.001), Some(0.003)), Some(0.003));
        assert_eq!(governing_rate(None, Some(0.003)), Some(0.003));
        assert_eq!(governing_rate(Some(-0.001), None), Some(-0.001));
        assert_eq!(governing_rate(None, None), None);
    }

    #[test]
    fn test_rates_from_history() {
        let config = EngineConfig::default();
        let mut v = Validator::new(&config);
        let history = ThicknessHistory {
            nominal_in: Some(0.500),
            previous_in: Some(0.470),
            actual_in: Some(0.450),
            years_since_previous: Some(5.0),
            years_since_nominal: Some(20.0),
        };
        let rates = corrosion_rates(&history, &mut v).unwrap();
        assert!((rates.short_term.unwrap() - 0.004).abs() < 1e-12);
        assert!((rates.long_term.unwrap() - 0.0025).abs() < 1e-12);
        assert_eq!(rates.governing, rates.short_term);
        assert!(v.warnings().is_empty());
    }

    #[test]
    fn test_negative_rate_flagged_not_zeroed() {
        let config = EngineConfig::default();
        let mut v = Validator::new(&config);
        let history = ThicknessHistory {
            previous_in: Some(0.440),
            actual_in: Some(0.450),
            years_since_previous: Some(5.0),
            ..Default::default()
        };
        let rates = corrosion_rates(&history, &mut v).unwrap();
        assert!(rates.short_term.unwrap() < 0.0);
        assert_eq!(rates.governing, rates.short_term);
        assert_eq!(v.warnings().len(), 1);
        assert_eq!(v.warnings()[0].severity, Severity::Warning);
        assert!(v.warnings()[0].message.contains("manual review"));
        assert!(v.warnings()[0].message.contains(api510_ref::CORROSION_RATE));
    }

    #[test]
    fn test_reading_without_elapsed_years_is_critical() {
        let config = EngineConfig::default();
        let mut v = Validator::new(&config);
        let history = ThicknessHistory {
            nominal_in: Some(0.375),
            previous_in: Some(0.340),
            actual_in: Some(0.300),
            years_since_nominal: Some(20.0),
            ..Default::default()
        };
        let rates = corrosion_rates(&history, &mut v).unwrap();
        assert_eq!(rates.short_term, None);
        assert!((rates.governing.unwrap() - 0.00375).abs() < 1e-12);
        assert_eq!(v.warnings().len(), 1);
        assert!(v.warnings()[0].is_critical());
        assert_eq!(v.warnings()[0].field, "thickness.years_since_previous");
    }

    #[test]
    fn test_elapsed_years_without_reading_is_critical() {
        let config = EngineConfig::default();
        let mut v = Validator::new(&config);
        let history = ThicknessHistory {
            actual_in: Some(0.300),
            years_since_nominal: Some(20.0),
            ..Default::default()
        };
        let rates = corrosion_rates(&history, &mut v).unwrap();
        assert_eq!(rates, CorrosionRates::default());
        assert!(v.has_critical());
        assert_eq!(v.warnings()[0].field, "thickness.nominal_in");
    }

    #[test]
    fn test_positive_rate_life_not_capped() {
        let input = LifeInput {
            actual_thickness_in: 0.5,
            required_thickness_in: 0.2,
            short_term_rate: Some(0.0003),
            long_term_rate: None,
        };
        let life = assess_life(&input).unwrap();
        assert!((life.remaining_life_years.unwrap() - 1000.0).abs() < 1e-6);
        assert_eq!(life.inspection.unwrap().interval_years, 10.0);
    }

    #[test]
    fn test_no_actual_thickness_means_no_rates() {
        let config = EngineConfig::default();
        let mut v = Validator::new(&config);
        let history = ThicknessHistory {
            nominal_in: Some(0.5),
            years_since_nominal: Some(10.0),
            ..Default::default()
        };
        assert_eq!(corrosion_rates(&history, &mut v).unwrap(), CorrosionRates::default());
    }

    #[test]
    fn test_remaining_life_clamping() {
        let l = limits();
        assert_eq!(remaining_life(0.0, 0.01, &l), 0.0);
        assert_eq!(remaining_life(-0.05, 0.01, &l), 0.0);
        assert_eq!(remaining_life(0.1, 0.0, &l), 500.0);
        assert_eq!(remaining_life(0.1, -0.002, &l), 500.0);
        assert!((remaining_life(0.3, 0.0003, &l) - 1000.0).abs() < 1e-9);
        assert!((remaining_life(0.1, 0.01, &l) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_inspection_plan() {
        let l = limits();
        let plan = inspection_plan(181.0, &l);
        assert_eq!(plan.interval_years, 10.0);
        assert_eq!(plan.inspection_type, InspectionType::ExternalOnStream);

        let plan = inspection_plan(6.0, &l);
        assert_eq!(plan.interval_years, 3.0);
        assert_eq!(plan.inspection_type, InspectionType::ExternalOnStream);

        let plan = inspection_plan(4.0, &l);
        assert_eq!(plan.interval_years, 2.0);
        assert_eq!(plan.inspection_type, InspectionType::Internal);
    }

    #[test]
    fn test_life_bands() {
        let config = EngineConfig::default();
        for (rl, expect_warning) in [(0.5, true), (1.5, true), (4.0, true), (4.5, false), (30.0, false)] {
            let mut v = Validator::new(&config);
            assess_remaining_life(rl, &mut v);
            assert_eq!(v.has_critical(), expect_warning, "rl = {}", rl);
        }

        let mut v = Validator::new(&config);
        assess_remaining_life(3.0, &mut v);
        assert!(v.warnings()[0].message.contains("internal inspection mandated"));
    }

    #[test]
    fn test_scenario_c_standalone() {
        let input = LifeInput {
            actual_thickness_in: 0.796,
            required_thickness_in: 0.719,
            short_term_rate: Some(0.000425),
            long_term_rate: None,
        };
        let life = assess_life(&input).unwrap();
        let rl = life.remaining_life_years.unwrap();
        assert!((rl - 181.18).abs() < 0.01);
        let plan = life.inspection.unwrap();
        assert_eq!(plan.interval_years, 10.0);
        assert_eq!(plan.inspection_type, InspectionType::ExternalOnStream);
        assert!(life.warnings.is_empty());
    }

    #[test]
    fn test_standalone_below_required() {
        let input = LifeInput {
            actual_thickness_in: 0.30,
            required_thickness_in: 0.32,
            short_term_rate: Some(0.005),
            long_term_rate: None,
        };
        let life = assess_life(&input).unwrap();
        assert_eq!(life.corrosion_allowance_in, 0.0);
        assert_eq!(life.remaining_life_years, Some(0.0));
        assert_eq!(life.inspection.unwrap().inspection_type, InspectionType::Internal);
        assert!(life.warnings.iter().filter(|w| w.is_critical()).count() >= 2);
    }

    #[test]
    fn test_projected_thickness() {
        assert!((projected_thickness(0.45, 0.004, 5.0) - 0.43).abs() < 1e-12);
        assert_eq!(projected_thickness(0.45, -0.001, 5.0), 0.45);
        assert_eq!(projected_thickness(0.01, 0.01, 5.0), 0.0);
    }

    #[test]
    fn test_next_inspection_date() {
        let last = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(next_inspection_date(last, 10.0), NaiveDate::from_ymd_opt(2035, 3, 15));
        assert_eq!(next_inspection_date(last, 2.5), NaiveDate::from_ymd_opt(2027, 9, 15));
        assert_eq!(next_inspection_date(last, -1.0), None);
    }
}
