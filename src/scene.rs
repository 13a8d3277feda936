//! Geometric draw intents for the two render passes.
//!
//! Nothing here touches pixels: the passes produce rectangles, lines and
//! circles in screen units and a [`Renderer`] turns them into output.

use crate::grid::Cell;
use crate::projection::ColumnProjection;
use crate::ray::RaySet;
use crate::viewer::Pose;
use crate::Grid;

/// What a shape represents, so the renderer can pick a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    MinimapWall,
    MinimapFloor,
    Viewer,
    RayTrace,
    /// Wall strip hit on a horizontal grid line (north/south face)
    WallLit,
    /// Wall strip hit on a vertical grid line (east/west face)
    WallShaded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Rect { x: f64, y: f64, w: f64, h: f64, paint: Paint },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, paint: Paint },
    Circle { x: f64, y: f64, radius: f64, paint: Paint },
}

/// Sink for draw commands
pub trait Renderer {
    fn draw(&mut self, command: &DrawCommand);

    fn draw_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }
}

/// Minimap appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapStyle {
    /// Scale from world units to screen units
    pub scale: f64,
    pub show_rays: bool,
    pub viewer_radius: f64,
    /// Length of the heading indicator in world units
    pub heading_line_length: f64,
}

/// Top-down pass: tiles, one trace per ray, then the viewer marker on top
pub fn minimap_pass(grid: &Grid, pose: &Pose, rays: &RaySet, style: &MinimapStyle, out: &mut Vec<DrawCommand>) {
    let tile = grid.tile_size() * style.scale;
    for (col, row, cell) in grid.iter_cells() {
        out.push(DrawCommand::Rect {
            x: col as f64 * tile,
            y: row as f64 * tile,
            w: tile,
            h: tile,
            paint: match cell {
                Cell::Wall => Paint::MinimapWall,
                Cell::Open => Paint::MinimapFloor,
            },
        });
    }

    if style.show_rays {
        for ray in rays.iter().filter(|r| r.struck_wall) {
            out.push(DrawCommand::Line {
                x1: pose.x * style.scale,
                y1: pose.y * style.scale,
                x2: ray.hit_x * style.scale,
                y2: ray.hit_y * style.scale,
                paint: Paint::RayTrace,
            });
        }
    }

    out.push(DrawCommand::Circle {
        x: pose.x * style.scale,
        y: pose.y * style.scale,
        radius: style.viewer_radius * style.scale,
        paint: Paint::Viewer,
    });
    out.push(DrawCommand::Line {
        x1: pose.x * style.scale,
        y1: pose.y * style.scale,
        x2: (pose.x + pose.heading.cos() * style.heading_line_length) * style.scale,
        y2: (pose.y + pose.heading.sin() * style.heading_line_length) * style.scale,
        paint: Paint::Viewer,
    });
}

/// First-person pass: one strip per column, centred on the horizon
pub fn first_person_pass(columns: &[ColumnProjection], strip_width: f64, screen_height: f64, out: &mut Vec<DrawCommand>) {
    for column in columns {
        out.push(DrawCommand::Rect {
            x: column.column as f64 * strip_width,
            y: screen_height / 2.0 - column.height / 2.0,
            w: strip_width,
            h: column.height,
            paint: if column.hit_on_vertical_line {
                Paint::WallShaded
            } else {
                Paint::WallLit
            },
        });
    }
}
