//! Geometry model - typed shapes and their bounding boxes
//!
//! Extents are a closed-form approximation of the part envelope, not a solid
//! model. Volume is the product of the three extents, which over-estimates
//! every non-prismatic shape; it only feeds cost and DFM heuristics.

use serde::{Deserialize, Serialize};

/// Geometry type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Bracket,
    Box,
    Cylinder,
    Gear,
}

impl GeometryKind {
    /// Parse a type tag. Matching is case-insensitive, `housing` is a box,
    /// and anything unrecognized (including `plate`) becomes a box.
    pub fn parse_lenient(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("bracket") => GeometryKind::Bracket,
            Some("cylinder") => GeometryKind::Cylinder,
            Some("gear") => GeometryKind::Gear,
            _ => GeometryKind::Box,
        }
    }
}

impl Default for GeometryKind {
    fn default() -> Self {
        GeometryKind::Box
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryKind::Bracket => write!(f, "bracket"),
            GeometryKind::Box => write!(f, "box"),
            GeometryKind::Cylinder => write!(f, "cylinder"),
            GeometryKind::Gear => write!(f, "gear"),
        }
    }
}

/// Shape with only the dimensions its type uses (all in mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// L-bracket: base plate with a back wall
    Bracket {
        base_length: f64,
        base_width: f64,
        height: f64,
    },
    /// Box or housing
    Box { length: f64, width: f64, height: f64 },
    Cylinder {
        radius: f64,
        height: f64,
        /// Bore radius when the cylinder is hollow
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inner_radius: Option<f64>,
    },
    /// Spur gear blank
    Gear {
        module: f64,
        num_teeth: u32,
        thickness: f64,
        bore_diameter: f64,
    },
}

impl Shape {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Shape::Bracket { .. } => GeometryKind::Bracket,
            Shape::Box { .. } => GeometryKind::Box,
            Shape::Cylinder { .. } => GeometryKind::Cylinder,
            Shape::Gear { .. } => GeometryKind::Gear,
        }
    }

    /// Axis-aligned extents (length, width, height)
    pub fn extents(&self) -> (f64, f64, f64) {
        match *self {
            Shape::Bracket {
                base_length,
                base_width,
                height,
            } => (base_length, base_width, height),
            Shape::Box {
                length,
                width,
                height,
            } => (length, width, height),
            Shape::Cylinder { radius, height, .. } => (2.0 * radius, 2.0 * radius, height),
            Shape::Gear {
                module,
                num_teeth,
                thickness,
                ..
            } => {
                let outer = gear_outer_diameter(module, num_teeth);
                (outer, outer, thickness)
            }
        }
    }

    /// Plate (length, width) that mounting holes are checked against for
    /// edge clearance. Only a bracket carries one; every other shape is
    /// checked against the default bracket base.
    pub fn mounting_plate(&self) -> (f64, f64) {
        match *self {
            Shape::Bracket {
                base_length,
                base_width,
                ..
            } => (base_length, base_width),
            _ => DEFAULT_MOUNTING_PLATE,
        }
    }
}

/// Default bracket base (length, width) in mm
pub const DEFAULT_MOUNTING_PLATE: (f64, f64) = (100.0, 80.0);

/// Outer (tip) diameter of a spur gear: module × (teeth + 2)
pub fn gear_outer_diameter(module: f64, num_teeth: u32) -> f64 {
    module * (f64::from(num_teeth) + 2.0)
}

/// Shape plus the wall thickness it is built with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(flatten)]
    pub shape: Shape,

    /// Nominal wall thickness (mm)
    pub wall_thickness: f64,
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        self.shape.kind()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        bounding_box(self)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            shape: Shape::Box {
                length: 100.0,
                width: 80.0,
                height: 50.0,
            },
            wall_thickness: 2.0,
        }
    }
}

/// Part envelope in mm / mm³
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// length × width × height
    pub volume: f64,
}

impl BoundingBox {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
            volume: length * width * height,
        }
    }

    /// Envelope volume in cm³
    pub fn volume_cm3(&self) -> f64 {
        self.volume / 1000.0
    }
}

/// Derive the bounding box of a geometry
pub fn bounding_box(geometry: &Geometry) -> BoundingBox {
    let (length, width, height) = geometry.shape.extents();
    BoundingBox::new(length, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(shape: Shape) -> Geometry {
        Geometry {
            shape,
            wall_thickness: 2.0,
        }
    }

    #[test]
    fn test_box_bounding_box() {
        let bb = bounding_box(&geometry(Shape::Box {
            length: 100.0,
            width: 80.0,
            height: 50.0,
        }));
        assert_eq!(bb, BoundingBox::new(100.0, 80.0, 50.0));
        assert_eq!(bb.volume, 400_000.0);
    }

    #[test]
    fn test_cylinder_uses_diameter() {
        let bb = bounding_box(&geometry(Shape::Cylinder {
            radius: 25.0,
            height: 50.0,
            inner_radius: None,
        }));
        assert_eq!((bb.length, bb.width, bb.height), (50.0, 50.0, 50.0));
        assert_eq!(bb.volume, 125_000.0);
    }

    #[test]
    fn test_gear_uses_tip_diameter() {
        let bb = bounding_box(&geometry(Shape::Gear {
            module: 1.5,
            num_teeth: 30,
            thickness: 12.0,
            bore_diameter: 10.0,
        }));
        assert_eq!(bb.length, 48.0);
        assert_eq!(bb.width, 48.0);
        assert_eq!(bb.height, 12.0);
    }

    #[test]
    fn test_bracket_extents() {
        let shape = Shape::Bracket {
            base_length: 100.0,
            base_width: 80.0,
            height: 45.0,
        };
        assert_eq!(shape.extents(), (100.0, 80.0, 45.0));
        assert_eq!(shape.mounting_plate(), (100.0, 80.0));
    }

    #[test]
    fn test_non_bracket_mounting_plate_is_default_base() {
        let long_box = Shape::Box {
            length: 200.0,
            width: 120.0,
            height: 10.0,
        };
        assert_eq!(long_box.mounting_plate(), DEFAULT_MOUNTING_PLATE);
        let cylinder = Shape::Cylinder {
            radius: 25.0,
            height: 50.0,
            inner_radius: None,
        };
        assert_eq!(cylinder.mounting_plate(), (100.0, 80.0));
    }

    #[test]
    fn test_kind_parsing_is_lenient() {
        assert_eq!(GeometryKind::parse_lenient(Some("Bracket")), GeometryKind::Bracket);
        assert_eq!(GeometryKind::parse_lenient(Some("HOUSING")), GeometryKind::Box);
        assert_eq!(GeometryKind::parse_lenient(Some("plate")), GeometryKind::Box);
        assert_eq!(GeometryKind::parse_lenient(Some(" gear ")), GeometryKind::Gear);
        assert_eq!(GeometryKind::parse_lenient(None), GeometryKind::Box);
    }

    #[test]
    fn test_geometry_serializes_with_type_tag() {
        let json = serde_json::to_value(Geometry::default()).unwrap();
        assert_eq!(json["type"], "box");
        assert_eq!(json["length"], 100.0);
        assert_eq!(json["wall_thickness"], 2.0);
    }

    #[test]
    fn test_volume_cm3() {
        assert_eq!(BoundingBox::new(100.0, 100.0, 10.0).volume_cm3(), 100.0);
    }
}
