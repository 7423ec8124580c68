//! DFM rule thresholds keyed by (material, process)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rule table: material → process → thresholds
pub type RuleTable = BTreeMap<String, BTreeMap<String, DfmRules>>;

/// Manufacturability thresholds for one material/process combination.
///
/// Thresholds a rule set leaves out fall back to generic values through the
/// accessor methods, so a sparse rule set is still usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DfmRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_wall_thickness: Option<f64>,

    /// Recommended band as [low, high] in mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_wall_thickness: Option<[f64; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wall_thickness: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_radius: Option<[f64; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_hole_diameter: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_hole_spacing: Option<f64>,

    /// Minimum hole-to-edge distance as a multiple of hole diameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_edge_distance: Option<f64>,

    /// Maximum hole depth / diameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hole_depth_ratio: Option<f64>,

    /// Maximum unsupported overhang (degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_overhang_angle: Option<f64>,

    /// Recommended infill band (percent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_infill: Option<[f64; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_height: Option<f64>,

    /// Free-form process guidance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DfmRules {
    pub fn min_wall(&self) -> f64 {
        self.min_wall_thickness.unwrap_or(1.0)
    }

    pub fn max_wall(&self) -> f64 {
        self.max_wall_thickness.unwrap_or(10.0)
    }

    pub fn recommended_wall(&self) -> [f64; 2] {
        self.recommended_wall_thickness.unwrap_or([2.0, 3.0])
    }

    pub fn min_hole(&self) -> f64 {
        self.min_hole_diameter.unwrap_or(3.0)
    }

    pub fn min_spacing(&self) -> f64 {
        self.min_hole_spacing.unwrap_or(5.0)
    }

    pub fn edge_multiplier(&self) -> f64 {
        self.min_edge_distance.unwrap_or(3.0)
    }

    /// Every threshold with its effective value, for display
    pub fn effective_thresholds(&self) -> Vec<(&'static str, String)> {
        let band = |b: [f64; 2]| format!("{}-{}", b[0], b[1]);
        let mut rows = vec![
            ("min_wall_thickness", self.min_wall().to_string()),
            ("recommended_wall_thickness", band(self.recommended_wall())),
            ("max_wall_thickness", self.max_wall().to_string()),
            ("min_hole_diameter", self.min_hole().to_string()),
            ("min_hole_spacing", self.min_spacing().to_string()),
            ("min_edge_distance", format!("{}x diameter", self.edge_multiplier())),
        ];
        if let Some(r) = self.min_radius {
            rows.push(("min_radius", r.to_string()));
        }
        if let Some(r) = self.recommended_radius {
            rows.push(("recommended_radius", band(r)));
        }
        if let Some(r) = self.max_hole_depth_ratio {
            rows.push(("max_hole_depth_ratio", r.to_string()));
        }
        if let Some(a) = self.max_overhang_angle {
            rows.push(("max_overhang_angle", format!("{}°", a)));
        }
        if let Some(i) = self.recommended_infill {
            rows.push(("recommended_infill", format!("{}-{}%", i[0], i[1])));
        }
        if let Some(h) = self.layer_height {
            rows.push(("layer_height", h.to_string()));
        }
        if let Some(ref note) = self.note {
            rows.push(("note", note.clone()));
        }
        rows
    }
}

/// Load the built-in rule table
pub fn builtin_rules() -> RuleTable {
    let mut table = RuleTable::new();

    let mut insert = |material: &str, process: &str, rules: DfmRules| {
        table
            .entry(material.to_string())
            .or_default()
            .insert(process.to_string(), rules);
    };

    insert(
        "aluminum_6061_t6",
        "cnc_milling",
        DfmRules {
            min_wall_thickness: Some(1.5),
            recommended_wall_thickness: Some([2.0, 3.0]),
            max_wall_thickness: Some(8.0),
            min_radius: Some(0.5),
            recommended_radius: Some([1.5, 2.0]),
            min_hole_diameter: Some(3.0),
            min_hole_spacing: Some(5.0),
            min_edge_distance: Some(3.0),
            max_hole_depth_ratio: Some(5.0),
            ..Default::default()
        },
    );

    insert(
        "steel_mild",
        "cnc_milling",
        DfmRules {
            min_wall_thickness: Some(1.0),
            recommended_wall_thickness: Some([1.5, 2.5]),
            max_wall_thickness: Some(10.0),
            min_radius: Some(0.5),
            recommended_radius: Some([1.0, 2.0]),
            min_hole_diameter: Some(2.5),
            min_hole_spacing: Some(5.0),
            min_edge_distance: Some(3.0),
            ..Default::default()
        },
    );

    insert(
        "plastic_abs",
        "3d_printing",
        DfmRules {
            min_wall_thickness: Some(0.8),
            recommended_wall_thickness: Some([1.2, 2.0]),
            max_overhang_angle: Some(45.0),
            min_radius: Some(0.3),
            recommended_infill: Some([15.0, 20.0]),
            layer_height: Some(0.2),
            ..Default::default()
        },
    );

    insert(
        "stainless_304",
        "cnc_milling",
        DfmRules {
            min_wall_thickness: Some(1.0),
            recommended_wall_thickness: Some([1.5, 3.0]),
            min_radius: Some(0.8),
            recommended_radius: Some([1.5, 2.5]),
            min_hole_diameter: Some(3.0),
            note: Some("Harder to machine, recommend slower feeds".to_string()),
            ..Default::default()
        },
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_rules_fall_back() {
        let table = builtin_rules();
        let abs = &table["plastic_abs"]["3d_printing"];
        assert_eq!(abs.min_wall(), 0.8);
        assert_eq!(abs.max_wall(), 10.0);
        assert_eq!(abs.min_hole(), 3.0);
        assert_eq!(abs.min_spacing(), 5.0);
        assert_eq!(abs.edge_multiplier(), 3.0);
    }

    #[test]
    fn test_aluminum_cnc_thresholds() {
        let table = builtin_rules();
        let al = &table["aluminum_6061_t6"]["cnc_milling"];
        assert_eq!(al.min_wall(), 1.5);
        assert_eq!(al.max_wall(), 8.0);
        assert_eq!(al.recommended_wall(), [2.0, 3.0]);
    }

    #[test]
    fn test_effective_thresholds_include_note() {
        let table = builtin_rules();
        let rows = table["stainless_304"]["cnc_milling"].effective_thresholds();
        assert!(rows.iter().any(|(k, v)| *k == "note" && v.contains("slower feeds")));
        assert!(rows.iter().any(|(k, _)| *k == "recommended_radius"));
    }
}
