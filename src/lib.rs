pub mod angle;
pub mod config;
pub mod grid;
pub mod input;
pub mod input_log;
pub mod projection;
pub mod ray;
pub mod raycast;
pub mod scene;
pub mod simulation;
pub mod snapshot;
pub mod viewer;

pub use angle::normalize_angle;
pub use grid::Grid;
pub use projection::{project, ColumnProjection, ProjectionMapper};
pub use ray::{RayHit, RaySet};
pub use raycast::{cast_all, RayCaster};
pub use simulation::Simulation;
pub use viewer::{Intent, Pose, Viewer};
