use crate::angle::{distance_between, normalize_angle, Quadrant};
use crate::ray::{RayHit, RaySet};
use crate::viewer::Pose;
use crate::Grid;
use log::warn;

/// Bounds for |tan θ| so axis-aligned rays produce huge but finite steps
const MIN_TAN: f64 = 1e-10;
const MAX_TAN: f64 = 1e10;

/// Below this the ray runs along a family of grid lines and never crosses one
const PARALLEL_EPSILON: f64 = 1e-12;

/// Default cap on grid lines visited per scan; never applied below the grid extent
pub const DEFAULT_MAX_STEPS: usize = 1024;

/// Casts the fan of rays for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RayCaster {
    /// Total angular spread in radians
    pub fov: f64,
    /// Number of rays, one per screen column
    pub ray_count: usize,
    /// Scan runaway guard, raised to the grid extent when smaller
    pub max_steps: usize,
}

/// Main raycasting function: fresh set of `ray_count` hits for `pose`
pub fn cast_all(pose: &Pose, grid: &Grid, fov: f64, ray_count: usize) -> RaySet {
    RayCaster::new(fov, ray_count).cast_all(pose, grid)
}

impl RayCaster {
    pub fn new(fov: f64, ray_count: usize) -> Self {
        RayCaster {
            fov,
            ray_count,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Angle of ray `column` relative to the heading, before normalizing
    pub fn ray_offset(&self, column: usize) -> f64 {
        -self.fov / 2.0 + column as f64 * self.fov / self.ray_count as f64
    }

    /// Cast every ray into a newly allocated set
    pub fn cast_all(&self, pose: &Pose, grid: &Grid) -> RaySet {
        let mut rays = RaySet::with_capacity(self.ray_count);
        self.cast_into(pose, grid, &mut rays);
        rays
    }

    /// Cast every ray into `rays`, reusing its allocation
    pub fn cast_into(&self, pose: &Pose, grid: &Grid, rays: &mut RaySet) {
        rays.clear();
        for column in 0..self.ray_count {
            let angle = pose.heading + self.ray_offset(column);
            rays.push(self.cast_ray(pose, grid, angle));
        }
    }

    /// Find the nearest wall along a single ray
    pub fn cast_ray(&self, pose: &Pose, grid: &Grid, angle: f64) -> RayHit {
        let angle = normalize_angle(angle);
        let quadrant = Quadrant::of(angle);
        let tan = clamped_tan(angle);

        let horizontal = if angle.sin().abs() < PARALLEL_EPSILON {
            None
        } else {
            self.horizontal_scan(pose, grid, quadrant, tan)
        };
        let vertical = if angle.cos().abs() < PARALLEL_EPSILON {
            None
        } else {
            self.vertical_scan(pose, grid, quadrant, tan)
        };

        let horizontal = horizontal.map(|(x, y)| (x, y, distance_between(pose.x, pose.y, x, y)));
        let vertical = vertical.map(|(x, y)| (x, y, distance_between(pose.x, pose.y, x, y)));

        match nearest_hit(horizontal, vertical) {
            Some((x, y, distance, on_vertical)) => RayHit {
                angle,
                hit_x: x,
                hit_y: y,
                distance,
                hit_on_vertical_line: on_vertical,
                struck_wall: true,
            },
            None => RayHit::miss(angle, pose.x, pose.y),
        }
    }

    /// Lines a scan may visit on `grid`: never fewer than it takes to reach the far edge
    fn scan_limit(&self, grid: &Grid) -> usize {
        let extent = grid.rows().max(grid.cols()).max(0) as usize;
        self.max_steps.max(extent + 2)
    }

    /// Walk the horizontal grid lines (y = k*T) in the ray's vertical direction
    fn horizontal_scan(&self, pose: &Pose, grid: &Grid, quadrant: Quadrant, tan: f64) -> Option<(f64, f64)> {
        let t = grid.tile_size();

        let mut line = (pose.y / t).floor() as i32;
        if quadrant.facing_down() {
            line += 1;
        }
        let line_step = if quadrant.facing_down() { 1 } else { -1 };
        // Tiles below a line share its index; tiles above sit one row lower
        let row_offset = if quadrant.facing_up() { -1 } else { 0 };

        let first_y = line as f64 * t;
        let first_x = pose.x + quadrant.x_sign() * (first_y - pose.y).abs() / tan;
        let x_step = quadrant.x_sign() * t / tan;

        let limit = self.scan_limit(grid);
        for step in 0..limit {
            let touch_x = first_x + step as f64 * x_step;
            let touch_y = line as f64 * t;

            if touch_x < 0.0 || touch_x > grid.width() || line < 0 || line > grid.rows() {
                return None;
            }

            let col = (touch_x / t).floor() as i32;
            if grid.is_wall_cell(col, line + row_offset) {
                return Some((touch_x, touch_y));
            }

            line += line_step;
        }

        warn!("horizontal scan exceeded {} steps", limit);
        None
    }

    /// Walk the vertical grid lines (x = k*T) in the ray's horizontal direction
    fn vertical_scan(&self, pose: &Pose, grid: &Grid, quadrant: Quadrant, tan: f64) -> Option<(f64, f64)> {
        let t = grid.tile_size();

        let mut line = (pose.x / t).floor() as i32;
        if quadrant.facing_right() {
            line += 1;
        }
        let line_step = if quadrant.facing_right() { 1 } else { -1 };
        let col_offset = if quadrant.facing_left() { -1 } else { 0 };

        let first_x = line as f64 * t;
        let first_y = pose.y + quadrant.y_sign() * (first_x - pose.x).abs() * tan;
        let y_step = quadrant.y_sign() * t * tan;

        let limit = self.scan_limit(grid);
        for step in 0..limit {
            let touch_x = line as f64 * t;
            let touch_y = first_y + step as f64 * y_step;

            if touch_y < 0.0 || touch_y > grid.height() || line < 0 || line > grid.cols() {
                return None;
            }

            let row = (touch_y / t).floor() as i32;
            if grid.is_wall_cell(line + col_offset, row) {
                return Some((touch_x, touch_y));
            }

            line += line_step;
        }

        warn!("vertical scan exceeded {} steps", limit);
        None
    }
}

/// Pick the closer of two `(x, y, distance)` candidates, flagged true when the
/// vertical one wins. Horizontal wins ties so the coordinates and the flag
/// always come from the same scan.
fn nearest_hit(
    horizontal: Option<(f64, f64, f64)>,
    vertical: Option<(f64, f64, f64)>,
) -> Option<(f64, f64, f64, bool)> {
    match (horizontal, vertical) {
        (Some((hx, hy, hd)), Some((_, _, vd))) if hd <= vd => Some((hx, hy, hd, false)),
        (_, Some((vx, vy, vd))) => Some((vx, vy, vd, true)),
        (Some((hx, hy, hd)), None) => Some((hx, hy, hd, false)),
        (None, None) => None,
    }
}

/// |tan θ| clamped into `[MIN_TAN, MAX_TAN]`; direction comes from the quadrant
fn clamped_tan(angle: f64) -> f64 {
    let tan = angle.tan().abs();
    if tan.is_nan() {
        return MAX_TAN;
    }
    tan.clamp(MIN_TAN, MAX_TAN)
}
