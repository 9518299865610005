//! # vessel_core - Pressure Vessel Fitness Calculation Engine
//!
//! `vessel_core` computes pressure-vessel component sizing and fitness values
//! from ASME Section VIII Division 1 and API 510: minimum required thickness,
//! maximum allowable working pressure (MAWP), corrosion rates, remaining life
//! and the next inspection interval. Every number is checked against the
//! applicability limits of the formula that produced it and carries the code
//! paragraph it came from.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Auditable**: Every warning and every defaulted value is recorded
//!
//! ## Quick Start
//!
//! ```rust
//! use vessel_core::calculations::{calculate, ComponentInput, Geometry};
//!
//! let input = ComponentInput::new("Top Head", Geometry::ellipsoidal_2_1(), 150.0, 17_000.0, 1.0, 48.0)
//!     .with_nominal_thickness(0.375, 12.0)
//!     .with_actual_thickness(0.340);
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.compliant);
//! assert!(result.remaining_life_years.unwrap() > 20.0);
//!
//! // Results serialize cleanly for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"governing_condition\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Geometry calculators and the component pipeline
//! - [`vessel`] - Vessel-level aggregation
//! - [`life`] - Corrosion rate, remaining life and inspection interval
//! - [`materials`] - Allowable stress table and pipe sizes
//! - [`validation`] - Bound checks and the warning record
//! - [`config`] - Validation thresholds, loadable from TOML
//! - [`code_refs`] - Code paragraph references
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod code_refs;
pub mod config;
pub mod errors;
pub mod life;
pub mod materials;
pub mod units;
pub mod validation;
pub mod vessel;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_with_config, ComponentInput, ComponentResult, Geometry};
pub use config::EngineConfig;
pub use errors::{CalcError, CalcResult};
pub use validation::{Severity, Warning};
pub use vessel::{evaluate_vessel, VesselInput, VesselSummary};
