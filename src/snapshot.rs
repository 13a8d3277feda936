use crate::projection::ColumnProjection;
use crate::ray::RayHit;
use crate::simulation::Simulation;
use crate::viewer::Pose;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One frame frozen to disk: pose, every ray and every column height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub pose: Pose,
    pub tile_size: f64,
    /// Map with the viewer's tile marked `s`
    pub map: String,
    pub rays: Vec<RayHit>,
    pub columns: Vec<ColumnProjection>,
}

impl FrameSnapshot {
    pub fn capture(sim: &Simulation) -> Self {
        let pose = sim.pose();
        let grid = sim.grid();
        FrameSnapshot {
            pose,
            tile_size: grid.tile_size(),
            map: grid.to_text(Some(grid.tile_at(pose.x, pose.y))),
            rays: sim.rays().as_slice().to_vec(),
            columns: sim.columns().to_vec(),
        }
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Nearest and farthest wall hits as (column, distance)
    pub fn distance_range(&self) -> Option<((usize, f64), (usize, f64))> {
        let hits = self
            .rays
            .iter()
            .enumerate()
            .filter(|(_, r)| r.struck_wall)
            .map(|(i, r)| (i, r.distance));

        hits.fold(None, |acc, hit| match acc {
            None => Some((hit, hit)),
            Some((near, far)) => Some((
                if hit.1 < near.1 { hit } else { near },
                if hit.1 > far.1 { hit } else { far },
            )),
        })
    }

    pub fn summary(&self) -> String {
        let vertical = self.rays.iter().filter(|r| r.hit_on_vertical_line).count();
        let misses = self.rays.iter().filter(|r| !r.struck_wall).count();
        let mut text = format!(
            "Viewer: ({:.2}, {:.2}) heading {:.2} deg\n\
             Rays: {} ({} vertical-line hits, {} horizontal-line hits, {} misses)\n",
            self.pose.x,
            self.pose.y,
            self.pose.heading.to_degrees(),
            self.rays.len(),
            vertical,
            self.rays.len() - vertical - misses,
            misses,
        );
        if let Some(((near_col, near), (far_col, far))) = self.distance_range() {
            text.push_str(&format!(
                "Nearest wall: {:.2} (column {})\nFarthest wall: {:.2} (column {})\n",
                near, near_col, far, far_col
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_capture_matches_simulation() {
        let mut sim = Simulation::from_config(&Config::default()).unwrap();
        sim.tick();
        let snapshot = FrameSnapshot::capture(&sim);

        assert_eq!(snapshot.rays.len(), sim.ray_count());
        assert_eq!(snapshot.columns.len(), sim.ray_count());
        // Default start (352, 352) sits in tile (5, 5)
        let row5: String = snapshot.map.lines().nth(5).unwrap().chars().collect();
        assert_eq!(row5.chars().nth(5), Some('s'));
    }

    #[test]
    fn test_save_and_load() {
        let mut sim = Simulation::from_config(&Config::default()).unwrap();
        sim.tick();
        let snapshot = FrameSnapshot::capture(&sim);

        let path = std::env::temp_dir().join("rustcaster_snapshot_test.json");
        let path = path.to_str().unwrap();
        snapshot.save_to_file(path).unwrap();
        let back = FrameSnapshot::load_from_file(path).unwrap();
        let _ = fs::remove_file(path);

        assert_eq!(back.rays.len(), snapshot.rays.len());
        assert_eq!(back.map, snapshot.map);
        assert!((back.pose.x - snapshot.pose.x).abs() < 1e-9);
        assert!((back.columns[480].height - snapshot.columns[480].height).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = FrameSnapshot::load_from_file("/nonexistent/rustcaster/snapshot.json").unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }

    #[test]
    fn test_distance_range() {
        let hit = |distance: f64| RayHit {
            angle: 0.0,
            hit_x: 0.0,
            hit_y: 0.0,
            distance,
            hit_on_vertical_line: false,
            struck_wall: true,
        };
        let snapshot = FrameSnapshot {
            pose: Pose { x: 0.0, y: 0.0, heading: 0.0 },
            tile_size: 64.0,
            map: String::new(),
            rays: vec![hit(30.0), hit(10.0), RayHit::miss(0.0, 0.0, 0.0), hit(50.0)],
            columns: Vec::new(),
        };
        assert_eq!(snapshot.distance_range(), Some(((1, 10.0), (3, 50.0))));
        assert!(snapshot.summary().contains("1 misses"));
    }
}
