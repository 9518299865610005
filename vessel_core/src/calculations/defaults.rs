//! # Dimension Defaults
//!
//! Missing geometry extras are filled from a declarative table keyed by
//! geometry. Each rule names the dimension, how its value is derived and the
//! note written to the audit trail. Rules for the same dimension are tried in
//! order; the first whose basis is available wins.
//!
//! | Dimension | Default | Geometries |
//! |-----------|---------|------------|
//! | D | 2R | all |
//! | D | standard-weight bore of the NPS | nozzle |
//! | R | D/2 | shell, hemispherical, nozzle |
//! | L | Do | torispherical |
//! | r | 0.06 Do | torispherical |
//! | D/2h | 2.0 | ellipsoidal |
//! | C | 0.33 | flat |
//! | d | D | flat |
//! | α | 30° | conical |
//! | pipe wall | standard-weight wall of the NPS | nozzle |
//! | SG | 1.0 | all (with static head) |
//!
//! Do is the outside diameter, D + 2·t_nom when the nominal thickness is
//! known, else D. The measured thickness never moves a default.

use serde::{Deserialize, Serialize};

use super::input::{ComponentInput, Geometry};
use crate::errors::{CalcError, CalcResult};
use crate::materials::standard_wall;

/// A value the engine supplied because the input left it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultUsed {
    /// Input field the value stands in for
    pub field: String,
    /// Value applied
    pub value: f64,
    /// How the value was derived
    pub note: String,
}

impl std::fmt::Display for DefaultUsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {:.4} ({})", self.field, self.value, self.note)
    }
}

/// Dimensions that can be defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dimension {
    InsideDiameter,
    InsideRadius,
    CrownRadius,
    KnuckleRadius,
    AspectRatio,
    AttachmentFactor,
    ShortSpan,
    HalfApexAngle,
    PipeWall,
    SpecificGravity,
}

impl Dimension {
    pub fn field(&self) -> &'static str {
        match self {
            Dimension::InsideDiameter => "inside_diameter_in",
            Dimension::InsideRadius => "inside_radius_in",
            Dimension::CrownRadius => "geometry.crown_radius_in",
            Dimension::KnuckleRadius => "geometry.knuckle_radius_in",
            Dimension::AspectRatio => "geometry.aspect_ratio",
            Dimension::AttachmentFactor => "geometry.attachment_factor",
            Dimension::ShortSpan => "geometry.short_span_in",
            Dimension::HalfApexAngle => "geometry.half_apex_angle_deg",
            Dimension::PipeWall => "geometry.pipe_wall_in",
            Dimension::SpecificGravity => "static_head.specific_gravity",
        }
    }
}

/// Where a default value comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Basis {
    Constant(f64),
    TwiceInsideRadius,
    HalfInsideDiameter,
    InsideDiameter,
    /// Fraction of the outside diameter
    OutsideDiameter(f64),
    StandardPipeBore,
    StandardPipeWall,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DefaultRule {
    pub dimension: Dimension,
    pub basis: Basis,
    pub note: &'static str,
}

const fn rule(dimension: Dimension, basis: Basis, note: &'static str) -> DefaultRule {
    DefaultRule { dimension, basis, note }
}

static COMMON_RULES: &[DefaultRule] = &[
    rule(Dimension::InsideDiameter, Basis::TwiceInsideRadius, "D = 2R"),
    rule(Dimension::SpecificGravity, Basis::Constant(1.0), "Water (SG = 1.0) assumed for static head"),
];

static SHELL_RULES: &[DefaultRule] = &[rule(Dimension::InsideRadius, Basis::HalfInsideDiameter, "R = D/2")];

static HEMISPHERICAL_RULES: &[DefaultRule] = &[rule(Dimension::InsideRadius, Basis::HalfInsideDiameter, "R = D/2")];

static ELLIPSOIDAL_RULES: &[DefaultRule] = &[rule(
    Dimension::AspectRatio,
    Basis::Constant(2.0),
    "Standard 2:1 ellipsoidal head (K = 1.0)",
)];

static TORISPHERICAL_RULES: &[DefaultRule] = &[
    rule(
        Dimension::CrownRadius,
        Basis::OutsideDiameter(1.0),
        "Standard F&D proportions: L = Do",
    ),
    rule(
        Dimension::KnuckleRadius,
        Basis::OutsideDiameter(0.06),
        "Standard F&D proportions: r = 0.06 Do",
    ),
];

static FLAT_RULES: &[DefaultRule] = &[
    rule(
        Dimension::AttachmentFactor,
        Basis::Constant(0.33),
        "Most conservative tabulated attachment factor (C = 0.33)",
    ),
    rule(Dimension::ShortSpan, Basis::InsideDiameter, "Circular head: d = D"),
];

static CONICAL_RULES: &[DefaultRule] = &[rule(
    Dimension::HalfApexAngle,
    Basis::Constant(30.0),
    "Half-apex angle at the UG-32(g) scope limit (30°)",
)];

static NOZZLE_RULES: &[DefaultRule] = &[
    rule(
        Dimension::InsideDiameter,
        Basis::StandardPipeBore,
        "D = standard-weight bore of the nominal pipe size",
    ),
    rule(Dimension::InsideRadius, Basis::HalfInsideDiameter, "R = D/2"),
    rule(
        Dimension::PipeWall,
        Basis::StandardPipeWall,
        "Standard-weight wall of the nominal pipe size",
    ),
];

/// Geometry-specific rules (tried after the common ones).
pub(crate) fn rules_for(geometry: &Geometry) -> &'static [DefaultRule] {
    match geometry {
        Geometry::CylindricalShell => SHELL_RULES,
        Geometry::HemisphericalHead => HEMISPHERICAL_RULES,
        Geometry::EllipsoidalHead { .. } => ELLIPSOIDAL_RULES,
        Geometry::TorisphericalHead { .. } => TORISPHERICAL_RULES,
        Geometry::FlatHead { .. } => FLAT_RULES,
        Geometry::ConicalSection { .. } => CONICAL_RULES,
        Geometry::NozzleNeck { .. } => NOZZLE_RULES,
    }
}

/// Applies the default rules for one component and records every default.
#[derive(Debug)]
pub(crate) struct DefaultResolver<'a> {
    input: &'a ComponentInput,
    inside_diameter: Option<f64>,
    used: Vec<DefaultUsed>,
}

impl<'a> DefaultResolver<'a> {
    pub fn new(input: &'a ComponentInput) -> Self {
        DefaultResolver {
            input,
            inside_diameter: input.inside_diameter_in,
            used: Vec::new(),
        }
    }

    /// Inside diameter, defaulted from R or the pipe size if absent.
    pub fn inside_diameter(&mut self) -> CalcResult<f64> {
        let d = self.resolve(Dimension::InsideDiameter, self.input.inside_diameter_in)?;
        self.inside_diameter = Some(d);
        Ok(d)
    }

    /// Use the supplied value, or the first applicable rule.
    pub fn resolve(&mut self, dimension: Dimension, supplied: Option<f64>) -> CalcResult<f64> {
        if let Some(value) = supplied {
            return Ok(value);
        }

        let rules = COMMON_RULES
            .iter()
            .chain(rules_for(&self.input.geometry))
            .filter(|r| r.dimension == dimension);

        for rule in rules {
            if let Some((value, suffix)) = self.evaluate(rule.basis)? {
                let note = match suffix {
                    Some(suffix) => format!("{} ({})", rule.note, suffix),
                    None => rule.note.to_string(),
                };
                log::debug!("{}: default {} = {} ({})", self.input.label, dimension.field(), value, note);
                self.record(dimension.field(), value, note);
                return Ok(value);
            }
        }
        Err(CalcError::missing_field(dimension.field()))
    }

    /// Record a derived value that is not a rule default.
    pub fn record(&mut self, field: &str, value: f64, note: impl Into<String>) {
        self.used.push(DefaultUsed {
            field: field.to_string(),
            value,
            note: note.into(),
        });
    }

    /// Outside diameter and how it was obtained.
    pub fn outside_diameter(&self) -> Option<(f64, &'static str)> {
        let d = self.inside_diameter?;
        Some(match self.input.thickness.nominal_in {
            Some(nominal) => (d + 2.0 * nominal, "Do = D + 2 t_nom"),
            None => (d, "nominal thickness unknown, Do = D"),
        })
    }

    fn nps(&self) -> Option<f64> {
        match self.input.geometry {
            Geometry::NozzleNeck { nps, .. } => nps,
            _ => None,
        }
    }

    fn evaluate(&self, basis: Basis) -> CalcResult<Option<(f64, Option<&'static str>)>> {
        Ok(match basis {
            Basis::Constant(value) => Some((value, None)),
            Basis::TwiceInsideRadius => self.input.inside_radius_in.map(|r| (2.0 * r, None)),
            Basis::HalfInsideDiameter => self.inside_diameter.map(|d| (d / 2.0, None)),
            Basis::InsideDiameter => self.inside_diameter.map(|d| (d, None)),
            Basis::OutsideDiameter(fraction) => self
                .outside_diameter()
                .map(|(od, how)| (fraction * od, Some(how))),
            Basis::StandardPipeBore => match self.nps() {
                Some(nps) => Some((standard_wall(nps)?.standard_inside_diameter_in(), None)),
                None => None,
            },
            Basis::StandardPipeWall => match self.nps() {
                Some(nps) => Some((standard_wall(nps)?.standard_wall_in, None)),
                None => None,
            },
        })
    }

    pub fn into_used(self) -> Vec<DefaultUsed> {
        self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(geometry: Geometry) -> ComponentInput {
        ComponentInput::new("C", geometry, 150.0, 20_000.0, 1.0, 48.0)
    }

    #[test]
    fn test_supplied_values_are_not_recorded() {
        let mut inp = input(Geometry::CylindricalShell);
        inp.inside_radius_in = Some(24.0);
        let mut resolver = DefaultResolver::new(&inp);
        resolver.inside_diameter().unwrap();
        assert_eq!(resolver.resolve(Dimension::InsideRadius, inp.inside_radius_in).unwrap(), 24.0);
        assert!(resolver.into_used().is_empty());
    }

    #[test]
    fn test_radius_defaults_to_half_diameter() {
        let inp = input(Geometry::CylindricalShell);
        let mut resolver = DefaultResolver::new(&inp);
        resolver.inside_diameter().unwrap();
        assert_eq!(resolver.resolve(Dimension::InsideRadius, None).unwrap(), 24.0);
        let used = resolver.into_used();
        assert_eq!(used.len(), 1);
        assert_eq!(used[0].field, "inside_radius_in");
        assert_eq!(used[0].note, "R = D/2");
    }

    #[test]
    fn test_diameter_from_radius() {
        let mut inp = input(Geometry::HemisphericalHead);
        inp.inside_diameter_in = None;
        inp.inside_radius_in = Some(30.0);
        let mut resolver = DefaultResolver::new(&inp);
        assert_eq!(resolver.inside_diameter().unwrap(), 60.0);
        assert_eq!(resolver.into_used()[0].field, "inside_diameter_in");
    }

    #[test]
    fn test_missing_diameter() {
        let mut inp = input(Geometry::CylindricalShell);
        inp.inside_diameter_in = None;
        let mut resolver = DefaultResolver::new(&inp);
        let err = resolver.inside_diameter().unwrap_err();
        assert!(matches!(err, CalcError::MissingField { ref field } if field == "inside_diameter_in"));
    }

    #[test]
    fn test_torispherical_standard_proportions() {
        let inp = input(Geometry::torispherical_standard()).with_nominal_thickness(0.5, 10.0);
        let mut resolver = DefaultResolver::new(&inp);
        resolver.inside_diameter().unwrap();
        let l = resolver.resolve(Dimension::CrownRadius, None).unwrap();
        let r = resolver.resolve(Dimension::KnuckleRadius, None).unwrap();
        assert_eq!(l, 49.0);
        assert!((r - 2.94).abs() < 1e-12);
        let used = resolver.into_used();
        assert_eq!(used.len(), 2);
        assert!(used[0].note.contains("t_nom"));
    }

    #[test]
    fn test_outside_diameter_without_nominal() {
        let inp = input(Geometry::torispherical_standard()).with_actual_thickness(0.4);
        let mut resolver = DefaultResolver::new(&inp);
        resolver.inside_diameter().unwrap();
        assert_eq!(resolver.outside_diameter(), Some((48.0, "nominal thickness unknown, Do = D")));
    }

    #[test]
    fn test_nozzle_from_pipe_size() {
        let mut inp = input(Geometry::NozzleNeck {
            nps: Some(4.0),
            pipe_wall_in: None,
        });
        inp.inside_diameter_in = None;
        let mut resolver = DefaultResolver::new(&inp);
        let d = resolver.inside_diameter().unwrap();
        assert!((d - 4.026).abs() < 1e-9);
        assert_eq!(resolver.resolve(Dimension::PipeWall, None).unwrap(), 0.237);
        assert_eq!(resolver.into_used().len(), 2);
    }

    #[test]
    fn test_rule_not_applicable_to_geometry() {
        let inp = input(Geometry::CylindricalShell);
        let mut resolver = DefaultResolver::new(&inp);
        assert!(resolver.resolve(Dimension::AttachmentFactor, None).is_err());
    }

    #[test]
    fn test_every_geometry_has_rules() {
        let geometries = [
            Geometry::CylindricalShell,
            Geometry::HemisphericalHead,
            Geometry::ellipsoidal_2_1(),
            Geometry::torispherical_standard(),
            Geometry::FlatHead {
                attachment_factor: None,
                short_span_in: None,
            },
            Geometry::ConicalSection {
                half_apex_angle_deg: None,
            },
            Geometry::NozzleNeck {
                nps: None,
                pipe_wall_in: None,
            },
        ];
        for g in &geometries {
            assert!(!rules_for(g).is_empty(), "{}", g);
        }
    }
}
