//! Component input records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::life::ThicknessHistory;
use crate::validation::Validator;

/// UG-16(b) minimum thickness of shells and heads (in)
const UG16_MIN_THICKNESS_IN: f64 = 0.0625;

/// Geometry of a pressure-retaining component, with its geometry-specific
/// extras. Extras left as `None` are filled from the per-geometry defaults
/// table and recorded in the result.
///
/// ## JSON Example
///
/// ```json
/// { "type": "TorisphericalHead", "crown_radius_in": 48.0, "knuckle_radius_in": 2.88 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Cylindrical shell under internal pressure
    CylindricalShell,
    /// Hemispherical head (or spherical shell)
    HemisphericalHead,
    /// Ellipsoidal head; `aspect_ratio` is D/2h (2.0 for a 2:1 head)
    EllipsoidalHead {
        #[serde(default)]
        aspect_ratio: Option<f64>,
    },
    /// Torispherical (flanged and dished) head
    TorisphericalHead {
        /// Inside crown radius L (in)
        #[serde(default)]
        crown_radius_in: Option<f64>,
        /// Inside knuckle radius r (in)
        #[serde(default)]
        knuckle_radius_in: Option<f64>,
    },
    /// Unstayed flat head or cover
    FlatHead {
        /// Attachment factor C per UG-34 Figure UG-34
        #[serde(default)]
        attachment_factor: Option<f64>,
        /// Short span d (in); the diameter for circular heads
        #[serde(default)]
        short_span_in: Option<f64>,
    },
    /// Conical head or section without a transition knuckle
    ConicalSection {
        /// Half of the apex angle α (degrees)
        #[serde(default)]
        half_apex_angle_deg: Option<f64>,
    },
    /// Nozzle neck
    NozzleNeck {
        /// Nominal pipe size, used to look up the standard wall
        #[serde(default)]
        nps: Option<f64>,
        /// Pipe wall to compare against instead of the standard wall (in)
        #[serde(default)]
        pipe_wall_in: Option<f64>,
    },
}

impl Geometry {
    /// Human-readable geometry name
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::CylindricalShell => "Cylindrical Shell",
            Geometry::HemisphericalHead => "Hemispherical Head",
            Geometry::EllipsoidalHead { .. } => "Ellipsoidal Head",
            Geometry::TorisphericalHead { .. } => "Torispherical Head",
            Geometry::FlatHead { .. } => "Flat Head",
            Geometry::ConicalSection { .. } => "Conical Section",
            Geometry::NozzleNeck { .. } => "Nozzle Neck",
        }
    }

    /// 2:1 ellipsoidal head with the standard K = 1.0
    pub fn ellipsoidal_2_1() -> Self {
        Geometry::EllipsoidalHead { aspect_ratio: None }
    }

    /// Torispherical head with standard proportions
    pub fn torispherical_standard() -> Self {
        Geometry::TorisphericalHead {
            crown_radius_in: None,
            knuckle_radius_in: None,
        }
    }

    pub fn conical(half_apex_angle_deg: f64) -> Self {
        Geometry::ConicalSection {
            half_apex_angle_deg: Some(half_apex_angle_deg),
        }
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Material to resolve the allowable stress from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRef {
    /// Material code as entered (e.g., "SA-516 Gr. 70")
    pub code: String,
    /// Design metal temperature (°F)
    pub design_temperature_f: f64,
    /// Stress to use if the table lookup fails (psi). The substitution is
    /// recorded as a critical warning.
    #[serde(default)]
    pub fallback_stress_psi: Option<f64>,
}

/// Liquid head acting on the component in addition to design pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticHead {
    /// Height of liquid above the component (ft)
    pub head_ft: f64,
    /// Specific gravity of the liquid (defaults to 1.0)
    #[serde(default)]
    pub specific_gravity: Option<f64>,
}

/// Input parameters for one pressure vessel component.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Shell Course 1",
///   "geometry": { "type": "CylindricalShell" },
///   "design_pressure_psi": 150.0,
///   "allowable_stress_psi": 20000.0,
///   "joint_efficiency": 0.85,
///   "inside_diameter_in": 48.0,
///   "thickness": {
///     "nominal_in": 0.375,
///     "actual_in": 0.331,
///     "years_since_nominal": 18.0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInput {
    /// User label (e.g., "Shell", "North Head", "N3 Inlet")
    pub label: String,

    pub geometry: Geometry,

    /// Design pressure P at the top of the vessel (psi)
    pub design_pressure_psi: f64,

    /// Allowable stress S (psi); takes precedence over `material`
    #[serde(default)]
    pub allowable_stress_psi: Option<f64>,

    /// Material and temperature to look S up from
    #[serde(default)]
    pub material: Option<MaterialRef>,

    /// Joint efficiency E, 0 < E ≤ 1
    pub joint_efficiency: f64,

    /// Inside diameter D (in)
    #[serde(default)]
    pub inside_diameter_in: Option<f64>,

    /// Inside radius R (in); defaults to D/2
    #[serde(default)]
    pub inside_radius_in: Option<f64>,

    /// Thickness readings and elapsed time
    #[serde(default)]
    pub thickness: ThicknessHistory,

    #[serde(default)]
    pub static_head: Option<StaticHead>,

    /// Date of the inspection that produced `thickness.actual_in`
    #[serde(default)]
    pub last_inspection_date: Option<NaiveDate>,
}

impl ComponentInput {
    /// Input with the required fields; everything optional left empty.
    pub fn new(
        label: impl Into<String>,
        geometry: Geometry,
        design_pressure_psi: f64,
        allowable_stress_psi: f64,
        joint_efficiency: f64,
        inside_diameter_in: f64,
    ) -> Self {
        ComponentInput {
            label: label.into(),
            geometry,
            design_pressure_psi,
            allowable_stress_psi: Some(allowable_stress_psi),
            material: None,
            joint_efficiency,
            inside_diameter_in: Some(inside_diameter_in),
            inside_radius_in: None,
            thickness: ThicknessHistory::default(),
            static_head: None,
            last_inspection_date: None,
        }
    }

    /// Resolve S from the material table instead of an explicit value.
    pub fn with_material(mut self, code: impl Into<String>, design_temperature_f: f64) -> Self {
        self.allowable_stress_psi = None;
        self.material = Some(MaterialRef {
            code: code.into(),
            design_temperature_f,
            fallback_stress_psi: None,
        });
        self
    }

    pub fn with_actual_thickness(mut self, actual_in: f64) -> Self {
        self.thickness.actual_in = Some(actual_in);
        self
    }

    pub fn with_nominal_thickness(mut self, nominal_in: f64, years_since_nominal: f64) -> Self {
        self.thickness.nominal_in = Some(nominal_in);
        self.thickness.years_since_nominal = Some(years_since_nominal);
        self
    }

    pub fn with_previous_thickness(mut self, previous_in: f64, years_since_previous: f64) -> Self {
        self.thickness.previous_in = Some(previous_in);
        self.thickness.years_since_previous = Some(years_since_previous);
        self
    }

    pub fn with_static_head(mut self, head_ft: f64, specific_gravity: Option<f64>) -> Self {
        self.static_head = Some(StaticHead {
            head_ft,
            specific_gravity,
        });
        self
    }

    pub fn with_last_inspection(mut self, date: NaiveDate) -> Self {
        self.last_inspection_date = Some(date);
        self
    }

    /// Validate the geometry-independent inputs.
    pub fn validate(&self, v: &mut Validator<'_>) -> CalcResult<()> {
        v.check_positive("design_pressure_psi", self.design_pressure_psi, None)?;
        v.check_joint_efficiency(self.joint_efficiency)?;

        if let Some(d) = self.inside_diameter_in {
            v.check_positive("inside_diameter_in", d, None)?;
        }
        if let Some(r) = self.inside_radius_in {
            v.check_positive("inside_radius_in", r, None)?;
        }

        let t = &self.thickness;
        if let Some(nominal) = t.nominal_in {
            v.check_positive("thickness.nominal_in", nominal, None)?;
        }
        if let Some(previous) = t.previous_in {
            v.check_positive("thickness.previous_in", previous, None)?;
        }
        if let Some(actual) = t.actual_in {
            v.check_positive("thickness.actual_in", actual, Some(UG16_MIN_THICKNESS_IN))?;
        }
        if let Some(years) = t.years_since_previous {
            v.check_positive("thickness.years_since_previous", years, None)?;
        }
        if let Some(years) = t.years_since_nominal {
            v.check_positive("thickness.years_since_nominal", years, None)?;
        }

        if let Some(head) = &self.static_head {
            if !head.head_ft.is_finite() || head.head_ft < 0.0 {
                return Err(CalcError::invalid_input(
                    "static_head.head_ft",
                    head.head_ft.to_string(),
                    "Static head cannot be negative",
                ));
            }
            if let Some(sg) = head.specific_gravity {
                v.check_positive("static_head.specific_gravity", sg, None)?;
            }
        }
        Ok(())
    }
}
