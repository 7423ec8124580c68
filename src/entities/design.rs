//! Design parameters - raw input records and their normalized form
//!
//! [`DesignParameters`] mirrors the structured record produced upstream: every
//! field is optional. [`DesignParameters::normalize`] is the single place
//! where defaults are applied and nonsensical values are rejected, producing
//! a fully populated [`Design`] that the engines consume without further
//! checks.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;

use crate::entities::geometry::{Geometry, GeometryKind, Shape};
use crate::reference::{DEFAULT_MATERIAL, DEFAULT_PROCESS};

/// Production quantity used when none is requested
pub const DEFAULT_QUANTITY: NonZeroU32 = NonZeroU32::MIN.saturating_add(99);

/// Wall thickness assumed when a design does not state one (mm)
pub const DEFAULT_WALL_THICKNESS: f64 = 2.0;

/// Mounting hole diameter assumed when a pattern does not state one (mm)
pub const DEFAULT_HOLE_DIAMETER: f64 = 4.5;

/// Rejected design input
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum DesignError {
    #[error("{field} must be a positive number of millimeters, got {value}")]
    #[diagnostic(
        code(partwise::design::dimension),
        help("Remove the field to use its default, or give a value greater than zero")
    )]
    InvalidDimension { field: &'static str, value: f64 },

    #[error("num_teeth must be a positive whole number, got {value}")]
    #[diagnostic(code(partwise::design::teeth))]
    InvalidToothCount { value: f64 },

    #[error("mounting hole #{index} has a non-finite position")]
    #[diagnostic(code(partwise::design::hole_position))]
    InvalidHolePosition { index: usize },

    #[error("unsupported unit '{unit}'")]
    #[diagnostic(
        code(partwise::design::unit),
        help("All dimensions are millimeters; set unit to \"mm\" or remove it")
    )]
    UnsupportedUnit { unit: String },
}

/// Raw geometry record. Which fields matter depends on `type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParameters {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hollow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_teeth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bore_diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Raw mounting hole pattern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountingPatternParameters {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bolt_size: Option<String>,
    /// Hole centers as [x, y] in mm from the part origin corner
    pub positions: Vec<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countersink: Option<bool>,
}

/// Secondary geometric feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Feature {
    /// Reinforcement rib, dimensions are [length, thickness, height]
    Rib {
        #[serde(default = "default_rib_dimensions")]
        dimensions: [f64; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<String>,
    },
    /// Feature types this toolkit does not model
    #[serde(other)]
    Unsupported,
}

fn default_rib_dimensions() -> [f64; 3] {
    [80.0, 1.5, 30.0]
}

/// Tolerance call-outs, carried through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensional: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_position: Option<String>,
}

/// Structured design parameter record, as supplied by callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    pub primary_geometry: GeometryParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mounting_pattern: Option<MountingPatternParameters>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_process: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerances: Option<Tolerances>,
}

/// A design file: parameters plus optional file-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Production quantity for this part, used when none is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<NonZeroU32>,

    #[serde(flatten)]
    pub parameters: DesignParameters,
}

/// Mounting hole pattern with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountingPattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt_size: Option<String>,
    pub hole_diameter: f64,
    pub positions: Vec<[f64; 2]>,
    #[serde(default)]
    pub countersink: bool,
}

/// A fully populated, validated design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_pattern: Option<MountingPattern>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
    pub material: String,
    pub process: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerances: Option<Tolerances>,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            mounting_pattern: None,
            features: Vec::new(),
            material: DEFAULT_MATERIAL.to_string(),
            process: DEFAULT_PROCESS.to_string(),
            tolerances: None,
        }
    }
}

impl Design {
    /// Same design, made by a different process
    pub fn with_process(&self, process: &str) -> Self {
        Self {
            process: process.to_string(),
            ..self.clone()
        }
    }
}

/// Accept a present value only if it is a positive, finite length
fn dimension(field: &'static str, value: Option<f64>, default: f64) -> Result<f64, DesignError> {
    match value {
        None => Ok(default),
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(DesignError::InvalidDimension { field, value: v }),
    }
}

fn name_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_ascii_lowercase(),
        _ => default.to_string(),
    }
}

impl GeometryParameters {
    /// Build the typed geometry, applying per-type defaults
    pub fn normalize(&self) -> Result<Geometry, DesignError> {
        if let Some(ref unit) = self.unit {
            if !unit.trim().eq_ignore_ascii_case("mm") {
                return Err(DesignError::UnsupportedUnit { unit: unit.clone() });
            }
        }

        let shape = match GeometryKind::parse_lenient(self.kind.as_deref()) {
            GeometryKind::Bracket => Shape::Bracket {
                base_length: dimension("base_length", self.base_length, 100.0)?,
                base_width: dimension("base_width", self.base_width, 80.0)?,
                height: dimension("height", self.height, 45.0)?,
            },
            GeometryKind::Box => Shape::Box {
                length: dimension("length", self.length, 100.0)?,
                width: dimension("width", self.width, 80.0)?,
                height: dimension("height", self.height, 50.0)?,
            },
            GeometryKind::Cylinder => {
                let radius = dimension("radius", self.radius, 25.0)?;
                let inner_radius = if self.hollow.unwrap_or(false) {
                    Some(dimension("inner_radius", self.inner_radius, radius * 0.8)?)
                } else {
                    None
                };
                Shape::Cylinder {
                    radius,
                    height: dimension("height", self.height, 50.0)?,
                    inner_radius,
                }
            }
            GeometryKind::Gear => {
                let num_teeth = match self.num_teeth {
                    None => 20,
                    Some(n) if n.is_finite() && n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => n as u32,
                    Some(n) => return Err(DesignError::InvalidToothCount { value: n }),
                };
                Shape::Gear {
                    module: dimension("module", self.module, 1.0)?,
                    num_teeth,
                    thickness: dimension("thickness", self.thickness, 10.0)?,
                    bore_diameter: dimension("bore_diameter", self.bore_diameter, 8.0)?,
                }
            }
        };

        Ok(Geometry {
            shape,
            wall_thickness: dimension("wall_thickness", self.wall_thickness, DEFAULT_WALL_THICKNESS)?,
        })
    }
}

impl MountingPatternParameters {
    pub fn normalize(&self) -> Result<MountingPattern, DesignError> {
        if let Some(index) = self
            .positions
            .iter()
            .position(|[x, y]| !x.is_finite() || !y.is_finite())
        {
            return Err(DesignError::InvalidHolePosition { index });
        }

        Ok(MountingPattern {
            pattern: self.pattern.clone(),
            bolt_size: self.bolt_size.clone(),
            hole_diameter: dimension("hole_diameter", self.hole_diameter, DEFAULT_HOLE_DIAMETER)?,
            positions: self.positions.clone(),
            countersink: self.countersink.unwrap_or(false),
        })
    }
}

impl DesignParameters {
    /// Apply defaults and validate, producing a [`Design`]
    pub fn normalize(&self) -> Result<Design, DesignError> {
        Ok(Design {
            geometry: self.primary_geometry.normalize()?,
            mounting_pattern: self
                .mounting_pattern
                .as_ref()
                .map(MountingPatternParameters::normalize)
                .transpose()?,
            features: self.features.clone(),
            material: name_or(self.material.as_deref(), DEFAULT_MATERIAL),
            process: name_or(self.manufacturing_process.as_deref(), DEFAULT_PROCESS),
            tolerances: self.tolerances.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> DesignParameters {
        serde_yml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_empty_record_normalizes_to_defaults() {
        let design = DesignParameters::default().normalize().unwrap();
        assert_eq!(design, Design::default());
        assert_eq!(design.material, "aluminum_6061_t6");
        assert_eq!(design.process, "cnc_milling");
        assert_eq!(design.geometry.wall_thickness, 2.0);
    }

    #[test]
    fn test_bracket_defaults() {
        let design = parse("primary_geometry:\n  type: bracket\n").normalize().unwrap();
        assert_eq!(
            design.geometry.shape,
            Shape::Bracket {
                base_length: 100.0,
                base_width: 80.0,
                height: 45.0
            }
        );
    }

    #[test]
    fn test_housing_reads_box_fields() {
        let design = parse(
            "primary_geometry:\n  type: Housing\n  length: 120\n  width: 60\n  height: 40\n",
        )
        .normalize()
        .unwrap();
        assert_eq!(
            design.geometry.shape,
            Shape::Box {
                length: 120.0,
                width: 60.0,
                height: 40.0
            }
        );
    }

    #[test]
    fn test_hollow_cylinder_default_bore() {
        let design = parse("primary_geometry:\n  type: cylinder\n  radius: 10\n  hollow: true\n")
            .normalize()
            .unwrap();
        assert_eq!(
            design.geometry.shape,
            Shape::Cylinder {
                radius: 10.0,
                height: 50.0,
                inner_radius: Some(8.0)
            }
        );
    }

    #[test]
    fn test_gear_defaults() {
        let design = parse("primary_geometry:\n  type: gear\n").normalize().unwrap();
        assert_eq!(
            design.geometry.shape,
            Shape::Gear {
                module: 1.0,
                num_teeth: 20,
                thickness: 10.0,
                bore_diameter: 8.0
            }
        );
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let err = parse("primary_geometry:\n  type: box\n  length: -5\n")
            .normalize()
            .unwrap_err();
        assert_eq!(
            err,
            DesignError::InvalidDimension {
                field: "length",
                value: -5.0
            }
        );
    }

    #[test]
    fn test_zero_wall_thickness_rejected() {
        let err = parse("primary_geometry:\n  wall_thickness: 0\n")
            .normalize()
            .unwrap_err();
        assert!(matches!(
            err,
            DesignError::InvalidDimension {
                field: "wall_thickness",
                ..
            }
        ));
    }

    #[test]
    fn test_fractional_teeth_rejected() {
        let err = parse("primary_geometry:\n  type: gear\n  num_teeth: 20.5\n")
            .normalize()
            .unwrap_err();
        assert_eq!(err, DesignError::InvalidToothCount { value: 20.5 });
    }

    #[test]
    fn test_inch_unit_rejected() {
        let err = parse("primary_geometry:\n  unit: in\n").normalize().unwrap_err();
        assert!(matches!(err, DesignError::UnsupportedUnit { .. }));
    }

    #[test]
    fn test_mounting_pattern_defaults() {
        let design = parse(
            "mounting_pattern:\n  pattern: NEMA17_stepper\n  positions: [[10, 10], [41, 10]]\n",
        )
        .normalize()
        .unwrap();
        let pattern = design.mounting_pattern.unwrap();
        assert_eq!(pattern.hole_diameter, 4.5);
        assert_eq!(pattern.positions, vec![[10.0, 10.0], [41.0, 10.0]]);
        assert!(!pattern.countersink);
    }

    #[test]
    fn test_material_and_process_are_normalized() {
        let design = parse("material: ' Steel_Mild '\nmanufacturing_process: ''\n")
            .normalize()
            .unwrap();
        assert_eq!(design.material, "steel_mild");
        assert_eq!(design.process, "cnc_milling");
    }

    #[test]
    fn test_features_parse_rib_and_unknown() {
        let params = parse(
            "features:\n  - type: rib\n    dimensions: [60, 2, 20]\n  - type: fillet\n    radius: 2\n  - type: rib\n",
        );
        assert_eq!(
            params.features,
            vec![
                Feature::Rib {
                    dimensions: [60.0, 2.0, 20.0],
                    position: None
                },
                Feature::Unsupported,
                Feature::Rib {
                    dimensions: [80.0, 1.5, 30.0],
                    position: None
                },
            ]
        );
    }

    #[test]
    fn test_document_metadata_is_separate() {
        let doc: DesignDocument = serde_yml::from_str(
            "name: motor mount\nquantity: 250\nmaterial: steel_mild\nprimary_geometry:\n  type: bracket\n  height: 60\n",
        )
        .unwrap();
        assert_eq!(doc.name.as_deref(), Some("motor mount"));
        assert_eq!(doc.quantity.map(NonZeroU32::get), Some(250));
        let design = doc.parameters.normalize().unwrap();
        assert_eq!(design.material, "steel_mild");
        assert_eq!(design.geometry.bounding_box().height, 60.0);
    }

    #[test]
    fn test_default_quantity() {
        assert_eq!(DEFAULT_QUANTITY.get(), 100);
    }
}
