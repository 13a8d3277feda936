use crate::ray::{RayHit, RaySet};
use serde::{Deserialize, Serialize};

/// Smallest corrected distance used for projection
pub const MIN_PROJECTED_DISTANCE: f64 = 1e-6;

/// Height of the wall column drawn for one screen column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnProjection {
    pub column: usize,
    pub height: f64,
    /// Copied from the ray so the renderer can shade east/west faces
    pub hit_on_vertical_line: bool,
}

/// Distance from the eye to the projection plane for a screen width and FOV
pub fn distance_to_projection_plane(screen_width: f64, fov: f64) -> f64 {
    (screen_width / 2.0) / (fov / 2.0).tan()
}

/// Wall column height for one ray, fish-eye corrected.
///
/// The raw distance is scaled by `cos(ray.angle - heading)` so straight walls
/// stay straight; the result is clamped to a small positive value before
/// dividing.
pub fn project(ray: &RayHit, viewer_heading: f64, screen_width: f64, fov: f64, tile_size: f64) -> f64 {
    let corrected = ray.distance * (ray.angle - viewer_heading).cos();
    let corrected = if corrected.is_nan() || corrected < MIN_PROJECTED_DISTANCE {
        MIN_PROJECTED_DISTANCE
    } else {
        corrected
    };
    (tile_size / corrected) * distance_to_projection_plane(screen_width, fov)
}

/// Fixed projection parameters for a screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionMapper {
    pub screen_width: f64,
    pub fov: f64,
    pub tile_size: f64,
}

impl ProjectionMapper {
    pub fn new(screen_width: f64, fov: f64, tile_size: f64) -> Self {
        ProjectionMapper {
            screen_width,
            fov,
            tile_size,
        }
    }

    pub fn project(&self, ray: &RayHit, viewer_heading: f64) -> f64 {
        project(ray, viewer_heading, self.screen_width, self.fov, self.tile_size)
    }

    /// Map every ray in column order into `out`, reusing its allocation
    pub fn project_into(&self, rays: &RaySet, viewer_heading: f64, out: &mut Vec<ColumnProjection>) {
        out.clear();
        out.extend(rays.iter().enumerate().map(|(column, ray)| ColumnProjection {
            column,
            height: self.project(ray, viewer_heading),
            hit_on_vertical_line: ray.hit_on_vertical_line,
        }));
    }

    pub fn project_all(&self, rays: &RaySet, viewer_heading: f64) -> Vec<ColumnProjection> {
        let mut out = Vec::with_capacity(rays.len());
        self.project_into(rays, viewer_heading, &mut out);
        out
    }
}
