//! # Geometry Descriptors
//!
//! Every geometry reduces to one or more stress modes. Membrane modes share
//! a single closed form in three coefficients:
//!
//! ```text
//! t    = P·A / (B·SE − c·P)
//! MAWP = B·SE·t / (A + c·t)
//! ```
//!
//! | Mode | A | B | c |
//! |------|---|---|---|
//! | Shell, circumferential | R | 1 | 0.6 |
//! | Shell, longitudinal | R | 2 | −0.4 |
//! | Hemispherical | R | 2 | 0.2 |
//! | Ellipsoidal | K·D | 2 | 0.2 |
//! | Torispherical | L·M | 2 | 0.2 |
//! | Conical | D | 2 cos α | 1.2 cos α |
//! | Nozzle neck | R | 1 | 0.6 |
//!
//! Flat heads use the plate form `t = d√(CP/SE)`, `MAWP = SE(t/d)²/C`.
//!
//! Because MAWP is the algebraic inverse of the thickness formula,
//! MAWP(t_min) returns the design pressure exactly.

use super::defaults::{DefaultResolver, Dimension};
use super::input::{ComponentInput, Geometry};
use crate::code_refs::asme_ref;
use crate::errors::{CalcError, CalcResult};
use crate::units::Degrees;
use crate::validation::{RatioBounds, Validator};

/// UG-45 mill under-tolerance on the pipe wall
const MILL_TOLERANCE_FACTOR: f64 = 0.875;

/// Closed form of a stress mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Form {
    Membrane { a: f64, b: f64, c: f64 },
    Plate { span: f64, factor: f64 },
}

/// One thickness/pressure formula pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StressMode {
    pub name: &'static str,
    pub code_reference: &'static str,
    pub formula: &'static str,
    /// Label of the thickness denominator, used in warnings
    pub thickness_denominator: &'static str,
    /// Label of the MAWP denominator, used in warnings
    pub mawp_denominator: &'static str,
    pub form: Form,
}

impl StressMode {
    pub fn required_thickness(&self, p: f64, se: f64, v: &mut Validator<'_>) -> CalcResult<f64> {
        match self.form {
            Form::Membrane { a, b, c } => {
                let denominator = v.check_denominator(self.thickness_denominator, b * se - c * p)?;
                Ok(p * a / denominator)
            }
            Form::Plate { span, factor } => {
                v.check_denominator(self.thickness_denominator, se)?;
                Ok(span * (factor * p / se).sqrt())
            }
        }
    }

    pub fn mawp(&self, t: f64, se: f64, v: &mut Validator<'_>) -> CalcResult<f64> {
        match self.form {
            Form::Membrane { a, b, c } => {
                let denominator = v.check_length_denominator(self.mawp_denominator, a + c * t)?;
                Ok(b * se * t / denominator)
            }
            Form::Plate { span, factor } => Ok(se * (t / span).powi(2) / factor),
        }
    }

    /// MAWP without validation, `None` where the formula breaks down.
    pub fn mawp_unchecked(&self, t: f64, se: f64) -> Option<f64> {
        match self.form {
            Form::Membrane { a, b, c } => {
                let denominator = a + c * t;
                (denominator > 0.0).then(|| b * se * t / denominator)
            }
            Form::Plate { span, factor } => Some(se * (t / span).powi(2) / factor),
        }
    }
}

/// Geometry with every dimension resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ResolvedGeometry {
    CylindricalShell { radius: f64 },
    Hemispherical { radius: f64 },
    Ellipsoidal { diameter: f64, k: f64 },
    Torispherical { crown_radius: f64, knuckle_radius: f64, m: f64 },
    Flat { span: f64, factor: f64 },
    Conical { diameter: f64, half_angle: Degrees },
    Nozzle { radius: f64, pipe_wall: f64 },
}

impl ResolvedGeometry {
    /// Fill in defaults and check the pressure-independent geometry limits.
    pub fn resolve(
        input: &ComponentInput,
        defaults: &mut DefaultResolver<'_>,
        v: &mut Validator<'_>,
    ) -> CalcResult<Self> {
        let config = v.config();
        let diameter = defaults.inside_diameter()?;
        v.check_positive(Dimension::InsideDiameter.field(), diameter, None)?;

        let resolved = match input.geometry {
            Geometry::CylindricalShell => ResolvedGeometry::CylindricalShell {
                radius: resolve_positive(defaults, v, Dimension::InsideRadius, input.inside_radius_in)?,
            },
            Geometry::HemisphericalHead => ResolvedGeometry::Hemispherical {
                radius: resolve_positive(defaults, v, Dimension::InsideRadius, input.inside_radius_in)?,
            },
            Geometry::EllipsoidalHead { aspect_ratio } => {
                let ratio = resolve_positive(defaults, v, Dimension::AspectRatio, aspect_ratio)?;
                v.check_ratio(
                    Dimension::AspectRatio.field(),
                    ratio,
                    &RatioBounds::new(1.0, 3.0, asme_ref::ELLIPSOIDAL_K),
                )?;
                ResolvedGeometry::Ellipsoidal {
                    diameter,
                    k: (2.0 + ratio * ratio) / 6.0,
                }
            }
            Geometry::TorisphericalHead {
                crown_radius_in,
                knuckle_radius_in,
            } => {
                let crown = resolve_positive(defaults, v, Dimension::CrownRadius, crown_radius_in)?;
                let knuckle = resolve_positive(defaults, v, Dimension::KnuckleRadius, knuckle_radius_in)?;
                let limits = config.head;

                let proportion = v.check_ratio(
                    "crown_knuckle_ratio",
                    crown / knuckle,
                    &RatioBounds::new(
                        limits.crown_knuckle_ratio_min,
                        limits.crown_knuckle_ratio_max,
                        asme_ref::TORISPHERICAL_M,
                    ),
                )?;
                let m = v.check_ratio(
                    "m_factor",
                    0.25 * (3.0 + proportion.sqrt()),
                    &RatioBounds::new(limits.m_factor_min, limits.m_factor_max, asme_ref::TORISPHERICAL_M),
                )?;

                if let Some((outside, _)) = defaults.outside_diameter() {
                    let knuckle_min = limits.knuckle_fraction_min * outside;
                    if knuckle < knuckle_min {
                        v.critical(
                            Dimension::KnuckleRadius.field(),
                            format!(
                                "Knuckle radius is less than {}% of the outside diameter - {} formula may not apply ({})",
                                limits.knuckle_fraction_min * 100.0,
                                asme_ref::TORISPHERICAL,
                                asme_ref::KNUCKLE_PROPORTIONS
                            ),
                            knuckle,
                            format!(">= {:.3}", knuckle_min),
                        );
                    }
                    if crown > outside {
                        v.critical(
                            Dimension::CrownRadius.field(),
                            format!(
                                "Crown radius exceeds the outside diameter - {} formula may not apply ({})",
                                asme_ref::TORISPHERICAL,
                                asme_ref::KNUCKLE_PROPORTIONS
                            ),
                            crown,
                            format!("<= {:.3}", outside),
                        );
                    }
                }

                ResolvedGeometry::Torispherical {
                    crown_radius: crown,
                    knuckle_radius: knuckle,
                    m,
                }
            }
            Geometry::FlatHead {
                attachment_factor,
                short_span_in,
            } => {
                let limits = config.flat_head;
                let factor = resolve_positive(defaults, v, Dimension::AttachmentFactor, attachment_factor)?;
                v.check_ratio(
                    Dimension::AttachmentFactor.field(),
                    factor,
                    &RatioBounds::new(0.0, limits.attachment_factor_abort, asme_ref::FLAT_HEAD)
                        .warn_below(limits.attachment_factor_min)
                        .warn_above(limits.attachment_factor_max),
                )?;
                let span = resolve_positive(defaults, v, Dimension::ShortSpan, short_span_in)?;
                ResolvedGeometry::Flat { span, factor }
            }
            Geometry::ConicalSection { half_apex_angle_deg } => {
                let alpha = defaults.resolve(Dimension::HalfApexAngle, half_apex_angle_deg)?;
                check_half_apex_angle(alpha, v)?;
                ResolvedGeometry::Conical {
                    diameter,
                    half_angle: Degrees(alpha),
                }
            }
            Geometry::NozzleNeck { pipe_wall_in, .. } => ResolvedGeometry::Nozzle {
                radius: resolve_positive(defaults, v, Dimension::InsideRadius, input.inside_radius_in)?,
                pipe_wall: resolve_positive(defaults, v, Dimension::PipeWall, pipe_wall_in)?,
            },
        };
        Ok(resolved)
    }

    /// Check the P/SE applicability limits (and the flat-head pressure ceiling).
    pub fn check_pressure(&self, p: f64, se: f64, v: &mut Validator<'_>) -> CalcResult<()> {
        let ratio = p / se;
        match self {
            ResolvedGeometry::CylindricalShell { .. } => {
                check_cylinder_ratio(ratio, asme_ref::SHELL_CIRCUMFERENTIAL, asme_ref::SHELL_LONGITUDINAL, v)
            }
            ResolvedGeometry::Nozzle { .. } => {
                check_cylinder_ratio(ratio, asme_ref::NOZZLE_NECK, asme_ref::NOZZLE_NECK, v)
            }
            ResolvedGeometry::Conical { .. } => check_cylinder_ratio(ratio, asme_ref::CONICAL, asme_ref::CONICAL, v),
            ResolvedGeometry::Hemispherical { .. } => check_head_ratio(ratio, asme_ref::HEMISPHERICAL, v),
            ResolvedGeometry::Ellipsoidal { .. } => check_head_ratio(ratio, asme_ref::ELLIPSOIDAL, v),
            ResolvedGeometry::Torispherical { .. } => check_head_ratio(ratio, asme_ref::TORISPHERICAL, v),
            ResolvedGeometry::Flat { .. } => check_flat_head_pressure(p, v),
        }
    }

    /// Stress modes; required thickness is the largest of them.
    pub fn modes(&self) -> Vec<StressMode> {
        match *self {
            ResolvedGeometry::CylindricalShell { radius } => vec![
                StressMode {
                    name: "Circumferential stress",
                    code_reference: asme_ref::SHELL_CIRCUMFERENTIAL,
                    formula: "t = PR/(SE - 0.6P); MAWP = SEt/(R + 0.6t)",
                    thickness_denominator: "SE - 0.6P",
                    mawp_denominator: "R + 0.6t",
                    form: Form::Membrane { a: radius, b: 1.0, c: 0.6 },
                },
                StressMode {
                    name: "Longitudinal stress",
                    code_reference: asme_ref::SHELL_LONGITUDINAL,
                    formula: "t = PR/(2SE + 0.4P); MAWP = 2SEt/(R - 0.4t)",
                    thickness_denominator: "2SE + 0.4P",
                    mawp_denominator: "R - 0.4t",
                    form: Form::Membrane { a: radius, b: 2.0, c: -0.4 },
                },
            ],
            ResolvedGeometry::Hemispherical { radius } => vec![StressMode {
                name: "Membrane stress",
                code_reference: asme_ref::HEMISPHERICAL,
                formula: "t = PR/(2SE - 0.2P); MAWP = 2SEt/(R + 0.2t)",
                thickness_denominator: "2SE - 0.2P",
                mawp_denominator: "R + 0.2t",
                form: Form::Membrane { a: radius, b: 2.0, c: 0.2 },
            }],
            ResolvedGeometry::Ellipsoidal { diameter, k } => vec![StressMode {
                name: "Membrane stress",
                code_reference: asme_ref::ELLIPSOIDAL,
                formula: "t = PDK/(2SE - 0.2P); MAWP = 2SEt/(KD + 0.2t)",
                thickness_denominator: "2SE - 0.2P",
                mawp_denominator: "KD + 0.2t",
                form: Form::Membrane {
                    a: k * diameter,
                    b: 2.0,
                    c: 0.2,
                },
            }],
            ResolvedGeometry::Torispherical { crown_radius, m, .. } => vec![StressMode {
                name: "Crown and knuckle",
                code_reference: asme_ref::TORISPHERICAL,
                formula: "t = PLM/(2SE - 0.2P); MAWP = 2SEt/(LM + 0.2t)",
                thickness_denominator: "2SE - 0.2P",
                mawp_denominator: "LM + 0.2t",
                form: Form::Membrane {
                    a: crown_radius * m,
                    b: 2.0,
                    c: 0.2,
                },
            }],
            ResolvedGeometry::Flat { span, factor } => vec![StressMode {
                name: "Plate bending",
                code_reference: asme_ref::FLAT_HEAD,
                formula: "t = d·sqrt(CP/SE); MAWP = SE(t/d)²/C",
                thickness_denominator: "SE",
                mawp_denominator: "C",
                form: Form::Plate { span, factor },
            }],
            ResolvedGeometry::Conical { diameter, half_angle } => {
                let cos = half_angle.cos();
                vec![StressMode {
                    name: "Circumferential stress",
                    code_reference: asme_ref::CONICAL,
                    formula: "t = PD/(2cos(α)(SE - 0.6P)); MAWP = 2SEt·cos(α)/(D + 1.2t·cos(α))",
                    thickness_denominator: "2cos(α)(SE - 0.6P)",
                    mawp_denominator: "D + 1.2t·cos(α)",
                    form: Form::Membrane {
                        a: diameter,
                        b: 2.0 * cos,
                        c: 1.2 * cos,
                    },
                }]
            }
            ResolvedGeometry::Nozzle { radius, .. } => vec![StressMode {
                name: "Pressure design",
                code_reference: asme_ref::NOZZLE_NECK,
                formula: "t = PR/(SE - 0.6P)",
                thickness_denominator: "SE - 0.6P",
                mawp_denominator: "R + 0.6t",
                form: Form::Membrane { a: radius, b: 1.0, c: 0.6 },
            }],
        }
    }

    /// Thickness floor that is not a pressure formula (nozzle pipe wall).
    pub fn minimum_wall(&self) -> Option<f64> {
        match *self {
            ResolvedGeometry::Nozzle { pipe_wall, .. } => Some(MILL_TOLERANCE_FACTOR * pipe_wall),
            _ => None,
        }
    }

    /// Nozzle necks are sized against the pipe wall and get no MAWP.
    pub fn reports_mawp(&self) -> bool {
        !matches!(self, ResolvedGeometry::Nozzle { .. })
    }

    /// Limits that depend on the required thickness.
    pub fn check_thickness(&self, t: f64, v: &mut Validator<'_>) {
        let config = v.config();
        match *self {
            ResolvedGeometry::CylindricalShell { radius } => {
                let max = config.shell.thin_wall_ratio_max;
                if t / radius > max {
                    v.critical(
                        "t_over_r",
                        format!(
                            "t/R exceeds {} - thin-wall formula invalid; thick-wall analysis required ({})",
                            max,
                            asme_ref::THICK_SHELL
                        ),
                        t / radius,
                        format!("<= {}", max),
                    );
                }
            }
            ResolvedGeometry::Hemispherical { radius } => {
                let max = config.head.hemispherical_thin_wall_max;
                if t > max * radius {
                    v.critical(
                        "t_over_r",
                        format!(
                            "Thickness exceeds {}R - {} formula may not apply; thick-wall analysis required",
                            max,
                            asme_ref::HEMISPHERICAL
                        ),
                        t / radius,
                        format!("<= {}", max),
                    );
                }
            }
            ResolvedGeometry::Torispherical { knuckle_radius, .. } => {
                let multiple = config.head.knuckle_thickness_multiple;
                if knuckle_radius < multiple * t {
                    v.critical(
                        Dimension::KnuckleRadius.field(),
                        format!(
                            "Knuckle radius is less than {} times the head thickness ({})",
                            multiple,
                            asme_ref::KNUCKLE_PROPORTIONS
                        ),
                        knuckle_radius,
                        format!(">= {:.4}", multiple * t),
                    );
                }
            }
            _ => {}
        }
    }
}

fn resolve_positive(
    defaults: &mut DefaultResolver<'_>,
    v: &mut Validator<'_>,
    dimension: Dimension,
    supplied: Option<f64>,
) -> CalcResult<f64> {
    let value = defaults.resolve(dimension, supplied)?;
    v.check_positive(dimension.field(), value, None)
}

fn check_cylinder_ratio(
    ratio: f64,
    circumferential_ref: &'static str,
    abort_ref: &'static str,
    v: &mut Validator<'_>,
) -> CalcResult<()> {
    let limits = v.config().shell;
    v.check_ratio(
        "pressure_ratio",
        ratio,
        &RatioBounds::new(0.0, limits.longitudinal_ratio_max, abort_ref),
    )?;
    if ratio > limits.circumferential_ratio_max {
        v.critical(
            "pressure_ratio",
            format!(
                "P/SE exceeds {} - {} thin-wall formula may not apply; thick-wall analysis required ({})",
                limits.circumferential_ratio_max,
                circumferential_ref,
                asme_ref::THICK_SHELL
            ),
            ratio,
            format!("<= {}", limits.circumferential_ratio_max),
        );
    }
    Ok(())
}

fn check_head_ratio(ratio: f64, reference: &'static str, v: &mut Validator<'_>) -> CalcResult<()> {
    let limits = v.config().head;
    v.check_ratio(
        "pressure_ratio",
        ratio,
        &RatioBounds::new(0.0, limits.ratio_abort, reference)
            .warn_above(limits.ratio_warn)
            .critical_above(limits.ratio_critical),
    )?;
    Ok(())
}

fn check_flat_head_pressure(p: f64, v: &mut Validator<'_>) -> CalcResult<()> {
    let limits = v.config().flat_head;
    let field = "effective_pressure_psi";
    if p > limits.pressure_ceiling_psi {
        return Err(CalcError::not_applicable(
            field,
            p,
            asme_ref::FLAT_HEAD,
            format!(
                "Unstayed flat head formula is limited to {} psi; use a formed head or detailed analysis",
                limits.pressure_ceiling_psi
            ),
        ));
    }
    if p > limits.pressure_critical_psi {
        v.critical(
            field,
            format!("Flat head above {} psi - verify the attachment detail", limits.pressure_critical_psi),
            p,
            format!("<= {}", limits.pressure_warn_psi),
        );
    } else if p > limits.pressure_warn_psi {
        v.warn(
            field,
            format!("Flat head above {} psi - a formed head is usually more economical", limits.pressure_warn_psi),
            p,
            format!("<= {}", limits.pressure_warn_psi),
        );
    }
    Ok(())
}

fn check_half_apex_angle(alpha: f64, v: &mut Validator<'_>) -> CalcResult<f64> {
    let limits = v.config().cone;
    let field = Dimension::HalfApexAngle.field();
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= limits.half_angle_abort_deg {
        return Err(CalcError::invalid_input(
            field,
            alpha.to_string(),
            format!(
                "Half-apex angle must be greater than 0 and less than {} degrees",
                limits.half_angle_abort_deg
            ),
        ));
    }
    if alpha > limits.half_angle_scope_deg {
        v.critical(
            field,
            format!(
                "Half-apex angle exceeds {}° - {} formula may not apply; a cone-to-cylinder junction analysis is required",
                limits.half_angle_scope_deg,
                asme_ref::CONICAL
            ),
            alpha,
            format!("<= {}", limits.half_angle_scope_deg),
        );
    }
    Ok(alpha)
}
