use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::ColorRecord;
use crate::distance::{Axis, axis_distance};

/// Neighbors kept on each side of the base color, per axis.
pub const NUM_NEIGHBORS: usize = 4;

/// Nearest colors below (`left`, distance <= 0) and above (`right`) the base color,
/// closest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Neighbors {
    pub left: Vec<ColorRecord>,
    pub right: Vec<ColorRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NeighborReport {
    pub hue: Neighbors,
    pub saturation: Neighbors,
    pub lightness: Neighbors,
}

impl NeighborReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn axis(&self, axis: Axis) -> &Neighbors {
        match axis {
            Axis::Hue => &self.hue,
            Axis::Saturation => &self.saturation,
            Axis::Lightness => &self.lightness,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut Neighbors {
        match axis {
            Axis::Hue => &mut self.hue,
            Axis::Saturation => &mut self.saturation,
            Axis::Lightness => &mut self.lightness,
        }
    }
}

/// Catalog minus the base color and its hex aliases, keeping the first record per hex.
pub fn neighbor_candidates<'a>(base: &ColorRecord, colors: &'a [ColorRecord]) -> Vec<&'a ColorRecord> {
    let mut seen_hex: HashSet<&str> = HashSet::new();
    let mut candidates = Vec::with_capacity(colors.len());
    for color in colors {
        if color.keyword == base.keyword || color.hex == base.hex {
            continue;
        }
        if seen_hex.insert(color.hex.as_str()) {
            candidates.push(color);
        }
    }
    candidates
}

/// Rank `candidates` around `base` along one axis and keep the `k` nearest per side.
///
/// Ties on distance are broken by lightness, then saturation, both ascending.
/// Non-comparable candidates (gray vs. saturated hue) are never ranked.
pub fn rank_neighbors(
    base: &ColorRecord,
    candidates: &[&ColorRecord],
    axis: Axis,
    k: usize,
) -> Neighbors {
    let mut left: Vec<(i32, &ColorRecord)> = Vec::new();
    let mut right: Vec<(i32, &ColorRecord)> = Vec::new();

    for &candidate in candidates {
        let Some(d) = axis_distance(base, candidate, axis).value() else {
            continue;
        };
        if d <= 0 {
            left.push((d, candidate));
        } else {
            right.push((d, candidate));
        }
    }

    Neighbors {
        left: nearest(left, k),
        right: nearest(right, k),
    }
}

fn nearest(mut side: Vec<(i32, &ColorRecord)>, k: usize) -> Vec<ColorRecord> {
    side.sort_by_key(|(d, color)| (d.unsigned_abs(), color.hsl.l, color.hsl.s));
    side.into_iter()
        .take(k)
        .map(|(_, color)| color.clone())
        .collect()
}

/// Hue, saturation and lightness neighbors of `base` within `colors`.
pub fn build_neighbor_report(base: &ColorRecord, colors: &[ColorRecord], k: usize) -> NeighborReport {
    let candidates = neighbor_candidates(base, colors);
    let mut report = NeighborReport::empty();
    for axis in Axis::ALL {
        *report.axis_mut(axis) = rank_neighbors(base, &candidates, axis, k);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::{NUM_NEIGHBORS, NeighborReport, build_neighbor_report, neighbor_candidates, rank_neighbors};
    use crate::catalog::{Catalog, ColorRecord};
    use crate::colors::Hsl;
    use crate::distance::Axis;

    fn color(keyword: &str, hex: &str, hsl: [i32; 3]) -> ColorRecord {
        ColorRecord {
            keyword: keyword.into(),
            hex: hex.into(),
            rgb: [0, 0, 0],
            hsl: Hsl::from(hsl),
            tags: Vec::new(),
        }
    }

    fn keywords(colors: &[ColorRecord]) -> Vec<&str> {
        colors.iter().map(|c| c.keyword.as_str()).collect()
    }

    #[test]
    fn candidates_drop_base_aliases_and_duplicate_hexes() {
        let colors = vec![
            color("aqua", "#00ffff", [180, 100, 50]),
            color("cyan", "#00ffff", [180, 100, 50]),
            color("gray", "#808080", [0, 0, 50]),
            color("grey", "#808080", [0, 0, 50]),
            color("teal", "#008080", [180, 100, 25]),
        ];
        let candidates = neighbor_candidates(&colors[0], &colors);
        let names: Vec<&str> = candidates.iter().map(|c| c.keyword.as_str()).collect();
        assert_eq!(names, vec!["gray", "teal"]);
    }

    #[test]
    fn partitions_by_sign_and_orders_by_distance() {
        let base = color("base", "#000001", [100, 50, 50]);
        let colors = vec![
            base.clone(),
            color("a", "#000002", [90, 50, 50]),
            color("b", "#000003", [100, 50, 40]),
            color("c", "#000004", [130, 50, 50]),
            color("d", "#000005", [105, 50, 50]),
            color("e", "#000006", [60, 50, 50]),
        ];
        let candidates = neighbor_candidates(&base, &colors);
        let hue = rank_neighbors(&base, &candidates, Axis::Hue, NUM_NEIGHBORS);
        // zero distance lands on the left
        assert_eq!(keywords(&hue.left), vec!["b", "a", "e"]);
        assert_eq!(keywords(&hue.right), vec!["d", "c"]);
    }

    #[test]
    fn ties_break_on_lightness_then_saturation() {
        let base = color("base", "#000001", [100, 50, 50]);
        let colors = vec![
            base.clone(),
            color("bright", "#000002", [110, 10, 80]),
            color("dim-vivid", "#000003", [110, 90, 20]),
            color("dim-dull", "#000004", [110, 30, 20]),
        ];
        let candidates = neighbor_candidates(&base, &colors);
        let hue = rank_neighbors(&base, &candidates, Axis::Hue, NUM_NEIGHBORS);
        assert_eq!(keywords(&hue.right), vec!["dim-dull", "dim-vivid", "bright"]);
    }

    #[test]
    fn grays_are_not_hue_neighbors_of_reds() {
        let red = color("red", "#ff0000", [0, 100, 50]);
        let colors = vec![
            red.clone(),
            color("gray", "#808080", [0, 0, 50]),
            color("maroon", "#800000", [0, 100, 25]),
        ];
        let report = build_neighbor_report(&red, &colors, NUM_NEIGHBORS);
        assert_eq!(keywords(&report.hue.left), vec!["maroon"]);
        assert!(report.hue.right.is_empty());
        // saturation still compares them
        assert_eq!(keywords(&report.saturation.left), vec!["maroon", "gray"]);
    }

    #[test]
    fn every_side_is_bounded_for_the_whole_catalog() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        for base in catalog.colors() {
            let report = build_neighbor_report(base, catalog.colors(), NUM_NEIGHBORS);
            for axis in Axis::ALL {
                let side = report.axis(axis);
                assert!(side.left.len() <= NUM_NEIGHBORS, "{}", base.keyword);
                assert!(side.right.len() <= NUM_NEIGHBORS, "{}", base.keyword);
                assert!(
                    side.left
                        .iter()
                        .chain(side.right.iter())
                        .all(|c| c.hex != base.hex)
                );
            }
        }
    }

    #[test]
    fn cadetblue_has_full_neighborhoods() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let base = catalog.get("cadetblue").expect("cadetblue");
        let report = build_neighbor_report(base, catalog.colors(), NUM_NEIGHBORS);
        assert_eq!(report.hue.left.len(), NUM_NEIGHBORS);
        assert_eq!(report.hue.right.len(), NUM_NEIGHBORS);
        let hexes: std::collections::HashSet<&str> = report
            .hue
            .left
            .iter()
            .chain(report.hue.right.iter())
            .map(|c| c.hex.as_str())
            .collect();
        assert_eq!(hexes.len(), 2 * NUM_NEIGHBORS);
    }

    #[test]
    fn empty_report_serializes_with_all_axes() {
        let json = serde_json::to_value(NeighborReport::empty()).expect("serialize");
        for axis in ["hue", "saturation", "lightness"] {
            assert_eq!(json[axis]["left"], serde_json::json!([]));
            assert_eq!(json[axis]["right"], serde_json::json!([]));
        }
    }
}
