//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the engine works in. They are
//! plain `f64` newtypes that serialize as bare numbers.
//!
//! ## US Customary Units
//!
//! ASME Section VIII Division 1 and API 510 work in:
//! - Length: inches (in), feet (ft) for liquid head
//! - Pressure and stress: pounds per square inch (psi)
//! - Temperature: degrees Fahrenheit (°F)
//! - Angle: degrees (converted to radians only inside formulas)
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::units::{Feet, Psi, static_head_pressure};
//!
//! // 20 ft of water above the bottom head
//! let head = static_head_pressure(Feet(20.0), 1.0);
//! assert!((head.0 - 8.66).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

/// Hydrostatic gradient of water at ambient temperature, psi per foot
pub const WATER_PSI_PER_FT: f64 = 0.433;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

// ============================================================================
// Pressure / Stress Units
// ============================================================================

/// Pressure or stress in pounds per square inch (psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Pressure exerted by a column of liquid.
///
/// `P = 0.433 × SG × h`, with h in feet of liquid.
pub fn static_head_pressure(head: Feet, specific_gravity: f64) -> Psi {
    Psi(WATER_PSI_PER_FT * specific_gravity * head.0)
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Cosine of the angle
    pub fn cos(self) -> f64 {
        self.0.to_radians().cos()
    }
}
