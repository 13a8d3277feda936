use serde::{Deserialize, Serialize};

/// Distance reported for a ray that found no wall before the step cap
pub const NO_HIT_DISTANCE: f64 = f64::MAX;

/// Result of casting one ray
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Ray direction in radians, `[0, 2π)`
    pub angle: f64,
    /// Wall intersection point (the viewer position when no wall was found)
    pub hit_x: f64,
    pub hit_y: f64,
    /// Euclidean distance from the viewer to the hit point
    pub distance: f64,
    /// True if the hit lies on a vertical grid line (an east/west wall face)
    pub hit_on_vertical_line: bool,
    /// False when the scans gave up without finding a wall
    pub struck_wall: bool,
}

impl RayHit {
    /// A ray that ran out of steps before reaching a wall
    pub fn miss(angle: f64, origin_x: f64, origin_y: f64) -> Self {
        RayHit {
            angle,
            hit_x: origin_x,
            hit_y: origin_y,
            distance: NO_HIT_DISTANCE,
            hit_on_vertical_line: false,
            struck_wall: false,
        }
    }

    pub fn hit_on_horizontal_line(&self) -> bool {
        self.struck_wall && !self.hit_on_vertical_line
    }
}

/// Ordered ray results for one frame; index i is screen column i.
///
/// The buffer keeps its allocation between frames: the caster clears and
/// refills it every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaySet {
    rays: Vec<RayHit>,
}

impl RaySet {
    pub fn with_capacity(capacity: usize) -> Self {
        RaySet {
            rays: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.rays.capacity()
    }

    pub fn get(&self, column: usize) -> Option<&RayHit> {
        self.rays.get(column)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RayHit> {
        self.rays.iter()
    }

    pub fn as_slice(&self) -> &[RayHit] {
        &self.rays
    }

    pub(crate) fn clear(&mut self) {
        self.rays.clear();
    }

    pub(crate) fn push(&mut self, hit: RayHit) {
        self.rays.push(hit);
    }
}

impl<'a> IntoIterator for &'a RaySet {
    type Item = &'a RayHit;
    type IntoIter = std::slice::Iter<'a, RayHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.rays.iter()
    }
}
