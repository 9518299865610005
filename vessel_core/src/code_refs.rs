//! # Code Paragraph References
//!
//! Traceable references to ASME Section VIII Division 1 and API 510. Every
//! result carries the paragraph its formula came from so a report can cite it.

/// ASME Boiler and Pressure Vessel Code, Section VIII, Division 1
pub mod asme_ref {
    /// Cylindrical shell, circumferential stress (longitudinal joints)
    pub const SHELL_CIRCUMFERENTIAL: &str = "ASME VIII-1 UG-27(c)(1)";
    /// Cylindrical shell, longitudinal stress (circumferential joints)
    pub const SHELL_LONGITUDINAL: &str = "ASME VIII-1 UG-27(c)(2)";
    /// Thick cylindrical shells
    pub const THICK_SHELL: &str = "ASME VIII-1 Appendix 1-2";
    /// Spherical shells and hemispherical heads
    pub const HEMISPHERICAL: &str = "ASME VIII-1 UG-32(f)";
    /// 2:1 ellipsoidal heads
    pub const ELLIPSOIDAL: &str = "ASME VIII-1 UG-32(d)";
    /// Ellipsoidal heads of other proportions (K factor)
    pub const ELLIPSOIDAL_K: &str = "ASME VIII-1 Appendix 1-4(c)";
    /// Torispherical heads
    pub const TORISPHERICAL: &str = "ASME VIII-1 UG-32(e)";
    /// Torispherical M factor
    pub const TORISPHERICAL_M: &str = "ASME VIII-1 Appendix 1-4(d)";
    /// Knuckle radius proportions of formed heads
    pub const KNUCKLE_PROPORTIONS: &str = "ASME VIII-1 UG-32(j)";
    /// Unstayed flat heads and covers
    pub const FLAT_HEAD: &str = "ASME VIII-1 UG-34";
    /// Conical heads and sections without transition knuckle
    pub const CONICAL: &str = "ASME VIII-1 UG-32(g)";
    /// Nozzle neck thickness
    pub const NOZZLE_NECK: &str = "ASME VIII-1 UG-45";
    /// Design loadings including static head
    pub const STATIC_HEAD: &str = "ASME VIII-1 UG-22";
    /// Maximum allowable working pressure
    pub const MAWP: &str = "ASME VIII-1 UG-98";
    /// Maximum allowable stress values
    pub const ALLOWABLE_STRESS: &str = "ASME II-D Table 1A";
}

/// API 510 Pressure Vessel Inspection Code
pub mod api510_ref {
    /// Corrosion rate determination
    pub const CORROSION_RATE: &str = "API 510 7.1.1.1";
    /// Remaining life calculation
    pub const REMAINING_LIFE: &str = "API 510 7.1.1";
    /// Inspection interval (half remaining life, 10 year maximum)
    pub const INSPECTION_INTERVAL: &str = "API 510 6.5.1.1";
    /// Internal inspection when remaining life is short
    pub const INTERNAL_INSPECTION: &str = "API 510 6.5.2";
}
