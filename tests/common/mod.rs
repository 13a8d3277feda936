#![allow(dead_code)]

use rustcaster::{Grid, Pose, RayCaster};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

pub const TILE: f64 = 64.0;

/// Single-ray scenario matching the JSON files in test_data/
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastCase {
    pub test_name: String,
    pub map: Vec<String>,
    pub viewer_x: f64,
    pub viewer_y: f64,
    pub angle_degrees: f64,
    pub expected_distance: f64,
    /// None when the hit lands on a corner and either family may win
    #[serde(default)]
    pub expected_vertical: Option<bool>,
}

/// Load a test from JSON file
pub fn load_case(path: &Path) -> Result<CastCase, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let case: CastCase = serde_json::from_str(&contents)?;
    Ok(case)
}

/// Parse a map picture
/// Format:
/// - s: viewer start, an open tile; the viewer stands at its centre
/// - ■: wall
/// - □: open
pub fn parse_map(text: &str) -> (Grid, Pose) {
    let mut start = None;
    let mut rows = Vec::new();
    for (row, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        if let Some(col) = line.chars().position(|c| c == 's') {
            start = Some((col, row));
        }
        rows.push(line.replace('s', "□"));
    }

    let grid = Grid::from_text(&rows.join("\n"), TILE).expect("valid map picture");
    let (col, row) = start.expect("map has an 's' tile");
    let pose = Pose {
        x: (col as f64 + 0.5) * TILE,
        y: (row as f64 + 0.5) * TILE,
        heading: 0.0,
    };
    (grid, pose)
}

/// Mirror a map picture left-right
pub fn flip_horizontal(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().rev().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mirror a map picture top-bottom
pub fn flip_vertical(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines.reverse();
    lines.join("\n")
}

/// A map and the angle transform that mirrors a ray along with it
pub struct Variant {
    pub name: &'static str,
    pub map: String,
    pub mirror_angle: fn(f64) -> f64,
}

/// All 4 variants (as_is, h_flip, v_flip, hv_flip)
pub fn variants(text: &str) -> Vec<Variant> {
    vec![
        Variant { name: "as_is", map: flip_vertical(&flip_vertical(text)), mirror_angle: |a| a },
        Variant { name: "h_flip", map: flip_horizontal(text), mirror_angle: |a| PI - a },
        Variant { name: "v_flip", map: flip_vertical(text), mirror_angle: |a| -a },
        Variant { name: "hv_flip", map: flip_horizontal(&flip_vertical(text)), mirror_angle: |a| a + PI },
    ]
}

/// Distance and orientation of a single ray
pub fn cast_one(grid: &Grid, pose: &Pose, angle: f64) -> (f64, bool) {
    let hit = RayCaster::new(PI / 3.0, 1).cast_ray(pose, grid, angle);
    assert!(hit.struck_wall, "ray at {} found no wall", angle);
    (hit.distance, hit.hit_on_vertical_line)
}
