//! Standard mechanical component catalog data
//!
//! Four series are carried:
//! - [`MotorFrame`] - NEMA stepper motor frames
//! - [`MetricBolt`] - ISO metric fasteners with clearance hole sizes
//! - [`Bearing`] - deep groove ball bearings
//! - [`Connector`] - panel connector cutout envelopes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Component series.
///
/// Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    NemaMotors,
    MetricBolts,
    Bearings,
    Connectors,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 4] = [
        ComponentCategory::NemaMotors,
        ComponentCategory::MetricBolts,
        ComponentCategory::Bearings,
        ComponentCategory::Connectors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::NemaMotors => "nema_motors",
            ComponentCategory::MetricBolts => "metric_bolts",
            ComponentCategory::Bearings => "bearings",
            ComponentCategory::Connectors => "connectors",
        }
    }
}

impl std::fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ComponentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ComponentCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Invalid category: {}. Use nema_motors, metric_bolts, bearings, or connectors",
                    s
                )
            })
    }
}

/// NEMA stepper motor frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorFrame {
    pub size: u32,
    pub face_width: f64,
    pub face_height: f64,
    /// Square mounting-hole spacing (mm)
    pub hole_spacing: f64,
    pub bolt_size: String,
    pub hole_diameter: f64,
    pub shaft_diameter: f64,
    pub typical_length: f64,
}

/// ISO metric bolt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBolt {
    pub diameter: f64,
    pub clearance_hole: f64,
    pub close_fit: f64,
    pub thread_pitch: f64,
}

/// Rolling-element bearing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bearing {
    #[serde(rename = "type")]
    pub kind: String,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub width: f64,
    /// Dynamic load rating (N)
    pub load_rating: f64,
}

/// Panel connector envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pins: Option<u32>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Category-specific attributes of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentSpec {
    MotorFrame(MotorFrame),
    MetricBolt(MetricBolt),
    Bearing(Bearing),
    Connector(Connector),
}

impl ComponentSpec {
    /// Attribute (name, value) pairs in display order
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            ComponentSpec::MotorFrame(m) => vec![
                ("size", m.size.to_string()),
                ("face", format!("{}x{}", m.face_width, m.face_height)),
                ("hole_spacing", m.hole_spacing.to_string()),
                ("bolt_size", m.bolt_size.clone()),
                ("hole_diameter", m.hole_diameter.to_string()),
                ("shaft_diameter", m.shaft_diameter.to_string()),
                ("typical_length", m.typical_length.to_string()),
            ],
            ComponentSpec::MetricBolt(b) => vec![
                ("diameter", b.diameter.to_string()),
                ("clearance_hole", b.clearance_hole.to_string()),
                ("close_fit", b.close_fit.to_string()),
                ("thread_pitch", b.thread_pitch.to_string()),
            ],
            ComponentSpec::Bearing(b) => vec![
                ("type", b.kind.clone()),
                ("inner_diameter", b.inner_diameter.to_string()),
                ("outer_diameter", b.outer_diameter.to_string()),
                ("width", b.width.to_string()),
                ("load_rating", b.load_rating.to_string()),
            ],
            ComponentSpec::Connector(c) => {
                let mut attrs = vec![
                    ("type", c.kind.clone()),
                    ("width", c.width.to_string()),
                    ("height", c.height.to_string()),
                ];
                if let Some(depth) = c.depth {
                    attrs.push(("depth", depth.to_string()));
                }
                if let Some(pins) = c.pins {
                    attrs.push(("pins", pins.to_string()));
                }
                attrs
            }
        }
    }
}

/// A named standard component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,

    #[serde(flatten)]
    pub spec: ComponentSpec,
}

impl Component {
    pub fn new(name: &str, spec: ComponentSpec) -> Self {
        Self {
            name: name.to_string(),
            spec,
        }
    }

    /// Compact one-line attribute summary
    pub fn summary(&self) -> String {
        self.spec
            .attributes()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn motor(name: &str, size: u32, face: f64, spacing: f64, bolt: &str, hole: f64, shaft: f64, len: f64) -> Component {
    Component::new(
        name,
        ComponentSpec::MotorFrame(MotorFrame {
            size,
            face_width: face,
            face_height: face,
            hole_spacing: spacing,
            bolt_size: bolt.to_string(),
            hole_diameter: hole,
            shaft_diameter: shaft,
            typical_length: len,
        }),
    )
}

fn bolt(name: &str, diameter: f64, clearance_hole: f64, close_fit: f64, thread_pitch: f64) -> Component {
    Component::new(
        name,
        ComponentSpec::MetricBolt(MetricBolt {
            diameter,
            clearance_hole,
            close_fit,
            thread_pitch,
        }),
    )
}

fn bearing(name: &str, inner: f64, outer: f64, width: f64, load_rating: f64) -> Component {
    Component::new(
        name,
        ComponentSpec::Bearing(Bearing {
            kind: "deep_groove".to_string(),
            inner_diameter: inner,
            outer_diameter: outer,
            width,
            load_rating,
        }),
    )
}

fn connector(name: &str, kind: &str, width: f64, height: f64, depth: Option<f64>, pins: Option<u32>) -> Component {
    Component::new(
        name,
        ComponentSpec::Connector(Connector {
            width,
            height,
            depth,
            pins,
            kind: kind.to_string(),
        }),
    )
}

/// Load the built-in component catalog
pub fn builtin_components() -> BTreeMap<ComponentCategory, Vec<Component>> {
    let mut db = BTreeMap::new();

    db.insert(
        ComponentCategory::NemaMotors,
        vec![
            motor("NEMA11", 11, 28.0, 23.0, "M2.5", 2.7, 5.0, 30.0),
            motor("NEMA14", 14, 35.2, 26.0, "M3", 3.2, 5.0, 36.0),
            motor("NEMA17", 17, 42.3, 31.0, "M3", 3.2, 5.0, 47.0),
            motor("NEMA23", 23, 56.4, 47.14, "M4", 4.5, 6.35, 76.0),
            motor("NEMA34", 34, 86.0, 69.6, "M6", 6.6, 14.0, 98.0),
        ],
    );

    db.insert(
        ComponentCategory::MetricBolts,
        vec![
            bolt("M3", 3.0, 3.2, 3.1, 0.5),
            bolt("M4", 4.0, 4.5, 4.2, 0.7),
            bolt("M5", 5.0, 5.5, 5.2, 0.8),
            bolt("M6", 6.0, 6.6, 6.2, 1.0),
            bolt("M8", 8.0, 9.0, 8.4, 1.25),
            bolt("M10", 10.0, 11.0, 10.5, 1.5),
            bolt("M12", 12.0, 13.5, 12.6, 1.75),
        ],
    );

    db.insert(
        ComponentCategory::Bearings,
        vec![
            bearing("608", 8.0, 22.0, 7.0, 3600.0),
            bearing("6000", 10.0, 26.0, 8.0, 4500.0),
            bearing("6001", 12.0, 28.0, 8.0, 5000.0),
            bearing("6002", 15.0, 32.0, 9.0, 5600.0),
            bearing("6003", 17.0, 35.0, 10.0, 6200.0),
            bearing("6004", 20.0, 42.0, 12.0, 9500.0),
            bearing("6005", 25.0, 47.0, 12.0, 10200.0),
            bearing("6006", 30.0, 55.0, 13.0, 11800.0),
        ],
    );

    db.insert(
        ComponentCategory::Connectors,
        vec![
            connector("USB-A", "usb", 12.0, 4.5, Some(14.0), None),
            connector("USB-C", "usb", 8.4, 2.6, Some(7.3), None),
            connector("USB-Micro", "usb", 6.85, 1.8, Some(7.5), None),
            connector("DB9", "d_sub", 30.8, 12.5, None, Some(9)),
            connector("DB25", "d_sub", 47.8, 12.5, None, Some(25)),
        ],
    );

    db
}
