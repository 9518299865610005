//! # Geometry Calculators
//!
//! Thickness, MAWP and fitness for the pressure-retaining components of a
//! vessel. Every geometry follows the same pattern:
//!
//! - [`ComponentInput`] - Input parameters (JSON-serializable)
//! - [`ComponentResult`] - Results with warnings and defaults (JSON-serializable)
//! - [`calculate`] - Pure calculation function
//!
//! ## Available Geometries
//!
//! | Geometry | Code paragraph |
//! |----------|----------------|
//! | Cylindrical shell | UG-27(c)(1), (c)(2) |
//! | Hemispherical head | UG-32(f) |
//! | Ellipsoidal head | UG-32(d), Appendix 1-4(c) |
//! | Torispherical head | UG-32(e), Appendix 1-4(d) |
//! | Flat head | UG-34 |
//! | Conical section | UG-32(g) |
//! | Nozzle neck | UG-45 |

mod defaults;
mod geometry;
pub mod input;
pub mod pipeline;
pub mod quick;
pub mod result;

pub use defaults::DefaultUsed;
pub use input::{ComponentInput, Geometry, MaterialRef, StaticHead};
pub use pipeline::{calculate, calculate_with_config};
pub use result::{ComponentResult, ModeResult, StressSource};
