use crate::config::{Config, MIN_WALL_STRIP_WIDTH};
use crate::grid::GridError;
use crate::input::{apply_event, InputEvent};
use crate::projection::{ColumnProjection, ProjectionMapper};
use crate::ray::RaySet;
use crate::raycast::RayCaster;
use crate::scene::{first_person_pass, minimap_pass, DrawCommand, MinimapStyle};
use crate::viewer::{Pose, Viewer};
use crate::Grid;
use log::info;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SetupError {
    #[error("invalid map: {0}")]
    Grid(#[from] GridError),

    #[error("start position ({x}, {y}) is inside a wall")]
    StartBlocked { x: f64, y: f64 },

    #[error("wall strip width {strip_width} leaves no rays for a {screen_width} wide screen")]
    NoRays { strip_width: f64, screen_width: f64 },

    #[error("wall strip width {strip_width} is narrower than one pixel")]
    SubPixelStrip { strip_width: f64 },
}

/// Everything one frame needs: the map, the viewer and the per-tick buffers.
///
/// The grid is never mutated after construction. Ray and column buffers are
/// refilled in place on each tick.
pub struct Simulation {
    grid: Grid,
    viewer: Viewer,
    caster: RayCaster,
    mapper: ProjectionMapper,
    minimap: MinimapStyle,
    strip_width: f64,
    rays: RaySet,
    columns: Vec<ColumnProjection>,
}

impl Simulation {
    /// Build the default level with settings from `config`
    pub fn from_config(config: &Config) -> Result<Self, SetupError> {
        let grid = Grid::default_map(config.grid.tile_size)?;
        let start_x = config.viewer.start_x.unwrap_or(grid.height() / 2.0);
        let start_y = config.viewer.start_y.unwrap_or(grid.height() / 2.0);
        let viewer = Viewer::new(
            start_x,
            start_y,
            config.start_heading_radians(),
            config.viewer.move_speed,
            config.turn_speed_radians(),
            config.viewer.radius,
        );
        let minimap = MinimapStyle {
            scale: config.minimap.scale,
            show_rays: config.minimap.show_rays,
            viewer_radius: config.viewer.radius,
            heading_line_length: config.minimap.heading_line_length,
        };
        Self::new(grid, viewer, config.fov_radians(), config.camera.wall_strip_width, minimap)
    }

    pub fn new(
        grid: Grid,
        viewer: Viewer,
        fov: f64,
        strip_width: f64,
        minimap: MinimapStyle,
    ) -> Result<Self, SetupError> {
        let pose = viewer.pose();
        if grid.is_blocked(pose.x, pose.y) {
            return Err(SetupError::StartBlocked { x: pose.x, y: pose.y });
        }

        if !(strip_width.is_finite() && strip_width >= MIN_WALL_STRIP_WIDTH) {
            return Err(SetupError::SubPixelStrip { strip_width });
        }

        let screen_width = grid.width();
        let ray_count = (screen_width / strip_width).floor() as usize;
        if ray_count == 0 {
            return Err(SetupError::NoRays { strip_width, screen_width });
        }

        info!(
            "{}x{} map, {} rays over {:.1} degrees, viewer at ({:.1}, {:.1})",
            grid.cols(),
            grid.rows(),
            ray_count,
            fov.to_degrees(),
            pose.x,
            pose.y
        );

        Ok(Simulation {
            mapper: ProjectionMapper::new(screen_width, fov, grid.tile_size()),
            caster: RayCaster::new(fov, ray_count),
            rays: RaySet::with_capacity(ray_count),
            columns: Vec::with_capacity(ray_count),
            grid,
            viewer,
            minimap,
            strip_width,
        })
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        apply_event(&mut self.viewer, event);
    }

    /// Advance the viewer, then recast and reproject every column
    pub fn tick(&mut self) {
        self.viewer.update(&self.grid);
        self.recast();
    }

    /// Recompute rays and columns for the current pose without moving
    pub fn recast(&mut self) {
        let pose = self.viewer.pose();
        self.caster.cast_into(&pose, &self.grid, &mut self.rays);
        self.mapper.project_into(&self.rays, pose.heading, &mut self.columns);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn pose(&self) -> Pose {
        self.viewer.pose()
    }

    pub fn rays(&self) -> &RaySet {
        &self.rays
    }

    pub fn columns(&self) -> &[ColumnProjection] {
        &self.columns
    }

    pub fn ray_count(&self) -> usize {
        self.caster.ray_count
    }

    pub fn screen_width(&self) -> f64 {
        self.grid.width()
    }

    pub fn screen_height(&self) -> f64 {
        self.grid.height()
    }

    /// First-person strips followed by the minimap overlay
    pub fn draw_commands(&self, out: &mut Vec<DrawCommand>) {
        out.clear();
        first_person_pass(&self.columns, self.strip_width, self.screen_height(), out);
        minimap_pass(&self.grid, &self.viewer.pose(), &self.rays, &self.minimap, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    #[test]
    fn test_default_setup() {
        let mut sim = Simulation::from_config(&Config::default()).unwrap();
        assert_eq!(sim.ray_count(), 960);
        assert_eq!(sim.pose().x, 352.0);
        assert_eq!(sim.pose().y, 352.0);

        sim.tick();
        assert_eq!(sim.rays().len(), 960);
        assert_eq!(sim.columns().len(), 960);
        assert!(sim.rays().iter().all(|r| r.struck_wall));
    }

    #[test]
    fn test_blocked_start_rejected() {
        let mut config = Config::default();
        config.viewer.start_x = Some(32.0);
        config.viewer.start_y = Some(32.0);
        assert_eq!(
            Simulation::from_config(&config).err(),
            Some(SetupError::StartBlocked { x: 32.0, y: 32.0 })
        );
    }

    #[test]
    fn test_sub_pixel_strip_rejected_before_allocating() {
        let mut config = Config::default();
        config.camera.wall_strip_width = 1e-12;
        assert_eq!(
            Simulation::from_config(&config).err(),
            Some(SetupError::SubPixelStrip { strip_width: 1e-12 })
        );
    }

    #[test]
    fn test_input_moves_viewer() {
        let mut sim = Simulation::from_config(&Config::default()).unwrap();
        let before = sim.pose();
        sim.apply_input(InputEvent::pressed(Direction::MoveForward));
        sim.tick();
        // Default heading is 90 degrees: straight down the screen
        assert!((sim.pose().y - (before.y + 2.0)).abs() < 1e-9);
        assert!((sim.pose().x - before.x).abs() < 1e-9);
    }

    #[test]
    fn test_draw_commands_cover_both_passes() {
        let mut sim = Simulation::from_config(&Config::default()).unwrap();
        sim.tick();
        let mut out = Vec::new();
        sim.draw_commands(&mut out);
        // strips + tiles + ray traces + marker + heading line
        assert_eq!(out.len(), 960 + 11 * 15 + 960 + 2);
    }
}
