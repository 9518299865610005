//! # Error Types
//!
//! Structured error types for vessel_core. Every variant is a *fatal*
//! outcome: the calculation produced no number. Findings that leave a usable
//! (but suspect) number are reported as [`Warning`](crate::validation::Warning)s
//! on the result instead.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::errors::{CalcError, CalcResult};
//!
//! fn validate_pressure(pressure_psi: f64) -> CalcResult<()> {
//!     if pressure_psi <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "design_pressure_psi",
//!             pressure_psi.to_string(),
//!             "Design pressure must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for vessel_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material not found in the allowable stress table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A formula denominator is zero, negative, or below the stability floor
    #[error("Numerically unstable calculation at '{field}': {value} - {reason}")]
    NumericalInstability {
        field: String,
        value: String,
        reason: String,
    },

    /// The inputs fall outside the domain where the code formula is valid
    #[error("Formula not applicable ({code_reference}) for '{field}': {value} - {reason}")]
    ApplicabilityViolation {
        field: String,
        value: String,
        code_reference: String,
        reason: String,
    },

    /// Calculation failed (unrealistic result, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a NumericalInstability error
    pub fn numerical_instability(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        CalcError::NumericalInstability {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an ApplicabilityViolation error
    pub fn not_applicable(
        field: impl Into<String>,
        value: f64,
        code_reference: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::ApplicabilityViolation {
            field: field.into(),
            value: value.to_string(),
            code_reference: code_reference.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Field the error refers to, when it refers to one
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. }
            | CalcError::MissingField { field }
            | CalcError::NumericalInstability { field, .. }
            | CalcError::ApplicabilityViolation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::NumericalInstability { .. } => "NUMERICALLY_UNSTABLE",
            CalcError::ApplicabilityViolation { .. } => "NOT_APPLICABLE",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}
