//! Design-for-manufacturing validation
//!
//! Checks run against the rule set for the design's (material, process)
//! pair. A pair with no rule set is not an error: it produces a single
//! warning and a fixed low confidence.

use crate::entities::{Design, Finding, FindingKind, MountingPattern, ValidationResult};
use crate::reference::{DfmRules, ReferenceTables};

/// Rule-based manufacturability checker
#[derive(Debug, Clone, Copy)]
pub struct DfmValidator<'a> {
    tables: &'a ReferenceTables,
}

#[derive(Default)]
struct Findings {
    issues: Vec<Finding>,
    warnings: Vec<Finding>,
    suggestions: Vec<Finding>,
}

fn point(p: [f64; 2]) -> String {
    format!("[{}, {}]", p[0], p[1])
}

impl<'a> DfmValidator<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Validate a design against its rule set
    pub fn validate(&self, design: &Design) -> ValidationResult {
        let Some(rules) = self.tables.rules_for(&design.material, &design.process) else {
            tracing::warn!(
                material = %design.material,
                process = %design.process,
                "no DFM rule set, returning low-confidence pass"
            );
            return ValidationResult::unruled(Finding::warning(
                FindingKind::MissingRules,
                format!(
                    "No DFM rules found for {} + {}",
                    design.material, design.process
                ),
            ));
        };

        let mut findings = Findings::default();
        check_wall_thickness(&mut findings, design, rules);
        if let Some(ref pattern) = design.mounting_pattern {
            let (length, width) = design.geometry.shape.mounting_plate();
            check_hole_diameter(&mut findings, pattern, rules);
            check_hole_spacing(&mut findings, pattern, rules);
            check_edge_distance(&mut findings, pattern, rules, length, width);
        }

        tracing::debug!(
            issues = findings.issues.len(),
            warnings = findings.warnings.len(),
            suggestions = findings.suggestions.len(),
            "DFM validation complete"
        );

        ValidationResult::from_findings(findings.issues, findings.warnings, findings.suggestions)
    }
}

/// Below minimum, above maximum, or outside the recommended band; first match wins
fn check_wall_thickness(findings: &mut Findings, design: &Design, rules: &DfmRules) {
    let wall = design.geometry.wall_thickness;
    let min_wall = rules.min_wall();
    let max_wall = rules.max_wall();
    let [low, high] = rules.recommended_wall();

    if wall < min_wall {
        findings.issues.push(
            Finding::critical(
                FindingKind::WallThickness,
                format!(
                    "Wall thickness {}mm is below minimum {}mm for {}",
                    wall, min_wall, design.material
                ),
            )
            .with_recommendation(format!("Increase to at least {}mm", min_wall)),
        );
    } else if wall > max_wall {
        findings.warnings.push(
            Finding::warning(
                FindingKind::WallThickness,
                format!(
                    "Wall thickness {}mm exceeds {}mm. May cause sink marks or warping.",
                    wall, max_wall
                ),
            )
            .with_recommendation("Consider adding ribs instead of thick walls"),
        );
    } else if wall < low || wall > high {
        findings.suggestions.push(
            Finding::suggestion(
                FindingKind::WallThickness,
                format!("Recommended wall thickness is {}-{}mm", low, high),
            )
            .with_current_value(wall),
        );
    }
}

fn check_hole_diameter(findings: &mut Findings, pattern: &MountingPattern, rules: &DfmRules) {
    let min_hole = rules.min_hole();
    if pattern.hole_diameter < min_hole {
        findings.issues.push(
            Finding::critical(
                FindingKind::HoleDiameter,
                format!(
                    "Hole diameter {}mm is below minimum {}mm",
                    pattern.hole_diameter, min_hole
                ),
            )
            .with_recommendation(format!("Increase hole diameter to at least {}mm", min_hole)),
        );
    }
}

/// One warning per unordered pair closer than the minimum spacing
fn check_hole_spacing(findings: &mut Findings, pattern: &MountingPattern, rules: &DfmRules) {
    let min_spacing = rules.min_spacing();
    let positions = &pattern.positions;

    for (i, &a) in positions.iter().enumerate() {
        for &b in &positions[i + 1..] {
            let distance = (a[0] - b[0]).hypot(a[1] - b[1]);
            if distance < min_spacing {
                findings.warnings.push(
                    Finding::warning(
                        FindingKind::HoleSpacing,
                        format!(
                            "Holes at {} and {} are only {:.1}mm apart (min {}mm)",
                            point(a),
                            point(b),
                            distance,
                            min_spacing
                        ),
                    )
                    .with_recommendation(format!("Increase spacing to at least {}mm", min_spacing)),
                );
            }
        }
    }
}

/// X and Y clearances are checked independently, so one hole can warn twice
fn check_edge_distance(
    findings: &mut Findings,
    pattern: &MountingPattern,
    rules: &DfmRules,
    length: f64,
    width: f64,
) {
    let min_edge = rules.edge_multiplier() * pattern.hole_diameter;

    for &p in &pattern.positions {
        let [x, y] = p;
        let too_close_x = x < min_edge || x > length - min_edge;
        let too_close_y = y < min_edge || y > width - min_edge;
        for _ in [too_close_x, too_close_y].into_iter().filter(|&hit| hit) {
            findings.warnings.push(Finding::warning(
                FindingKind::EdgeDistance,
                format!("Hole at {} is too close to edge (min {:.1}mm)", point(p), min_edge),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DesignParameters, Severity};

    fn design(yaml: &str) -> Design {
        serde_yml::from_str::<DesignParameters>(yaml)
            .unwrap()
            .normalize()
            .unwrap()
    }

    fn validate(yaml: &str) -> ValidationResult {
        let tables = ReferenceTables::builtin();
        DfmValidator::new(&tables).validate(&design(yaml))
    }

    #[test]
    fn test_default_design_is_clean() {
        let result = validate("{}");
        assert!(result.valid);
        assert!(result.findings().next().is_none());
        assert_eq!(result.dfm_score, 100);
    }

    #[test]
    fn test_thin_wall_is_critical() {
        let result = validate("primary_geometry:\n  wall_thickness: 1.0\n");
        assert!(!result.valid);
        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.kind, FindingKind::WallThickness);
        assert_eq!(issue.severity, Severity::Critical);
        assert_eq!(
            issue.message,
            "Wall thickness 1mm is below minimum 1.5mm for aluminum_6061_t6"
        );
        assert_eq!(issue.recommendation.as_deref(), Some("Increase to at least 1.5mm"));
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.dfm_score, 80);
    }

    #[test]
    fn test_thick_wall_warns_about_sink_marks() {
        let result = validate("primary_geometry:\n  wall_thickness: 9\n");
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("sink marks"));
        assert!(result.suggestions.is_empty());
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_wall_outside_band_is_suggestion() {
        let result = validate("primary_geometry:\n  wall_thickness: 1.8\n");
        assert!(result.valid);
        assert!(result.issues.is_empty() && result.warnings.is_empty());
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].current_value, Some(1.8));
        assert_eq!(result.suggestions[0].message, "Recommended wall thickness is 2-3mm");
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_small_hole_is_critical() {
        let result = validate(
            "mounting_pattern:\n  hole_diameter: 2.0\n  positions: [[30, 30]]\n",
        );
        assert!(!result.valid);
        assert_eq!(result.issues[0].kind, FindingKind::HoleDiameter);
        assert_eq!(result.issues[0].message, "Hole diameter 2mm is below minimum 3mm");
    }

    #[test]
    fn test_every_close_pair_warns() {
        // three holes within 5mm of each other: three pairs
        let result = validate(
            "mounting_pattern:\n  hole_diameter: 3.0\n  positions: [[40, 40], [42, 40], [40, 42]]\n",
        );
        let spacing: Vec<_> = result
            .warnings
            .iter()
            .filter(|w| w.kind == FindingKind::HoleSpacing)
            .collect();
        assert_eq!(spacing.len(), 3);
        assert_eq!(
            spacing[0].message,
            "Holes at [40, 40] and [42, 40] are only 2.0mm apart (min 5mm)"
        );
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_edge_distance_checks_both_axes() {
        // 3 × 4.5 = 13.5mm clearance on a 100 × 80 box
        let result = validate("mounting_pattern:\n  positions: [[5, 5], [50, 40], [95, 40]]\n");
        let edge: Vec<_> = result
            .warnings
            .iter()
            .filter(|w| w.kind == FindingKind::EdgeDistance)
            .collect();
        assert_eq!(edge.len(), 3);
        assert_eq!(edge[0].message, "Hole at [5, 5] is too close to edge (min 13.5mm)");
        assert_eq!(edge[2].message, "Hole at [95, 40] is too close to edge (min 13.5mm)");
    }

    fn edge_warnings(result: &ValidationResult) -> usize {
        result
            .warnings
            .iter()
            .filter(|w| w.kind == FindingKind::EdgeDistance)
            .count()
    }

    #[test]
    fn test_edge_distance_on_long_box_uses_default_base() {
        // 150 > 100 - 13.5 even though the box itself is 200mm long
        let result = validate(
            "primary_geometry:\n  type: box\n  length: 200\nmounting_pattern:\n  positions: [[150, 40]]\n",
        );
        assert_eq!(edge_warnings(&result), 1);
        assert_eq!(
            result.warnings[0].message,
            "Hole at [150, 40] is too close to edge (min 13.5mm)"
        );
    }

    #[test]
    fn test_edge_distance_on_cylinder_uses_default_base() {
        // [40, 30] sits inside a 100 x 80 base regardless of the 50mm diameter
        let result = validate(
            "primary_geometry:\n  type: cylinder\nmounting_pattern:\n  hole_diameter: 3\n  positions: [[40, 30]]\n",
        );
        assert_eq!(edge_warnings(&result), 0);
    }

    #[test]
    fn test_edge_distance_on_bracket_uses_base_plate() {
        // 3 x 3.2 = 9.6mm clearance on a 71 x 71 base
        let result = validate(
            "primary_geometry:\n  type: bracket\n  base_length: 71\n  base_width: 71\nmounting_pattern:\n  hole_diameter: 3.2\n  positions: [[20, 20], [65, 20]]\n",
        );
        assert_eq!(edge_warnings(&result), 1);
        assert_eq!(
            result.warnings[0].message,
            "Hole at [65, 20] is too close to edge (min 9.6mm)"
        );
    }

    #[test]
    fn test_missing_rules_pass_through() {
        let result = validate("material: titanium\nmanufacturing_process: cnc_milling\nprimary_geometry:\n  wall_thickness: 0.1\n");
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, FindingKind::MissingRules);
        assert_eq!(
            result.warnings[0].message,
            "No DFM rules found for titanium + cnc_milling"
        );
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.dfm_score, 50);
    }

    #[test]
    fn test_sparse_rule_set_uses_fallback_thresholds() {
        // abs/3d_printing has no hole rules; min hole falls back to 3.0
        let result = validate(
            "material: plastic_abs\nmanufacturing_process: 3d_printing\nprimary_geometry:\n  wall_thickness: 1.5\nmounting_pattern:\n  hole_diameter: 2.5\n  positions: []\n",
        );
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, FindingKind::HoleDiameter);
    }

    #[test]
    fn test_score_tracks_confidence() {
        let result = validate(
            "primary_geometry:\n  wall_thickness: 1.0\nmounting_pattern:\n  hole_diameter: 1.0\n  positions: [[1, 1], [2, 2]]\n",
        );
        assert!((0.0..=1.0).contains(&result.confidence));
        assert_eq!(result.dfm_score, (result.confidence * 100.0).round() as u8);
    }
}
