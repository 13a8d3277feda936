use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Wrap an angle in radians into `[0, 2π)`
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Euclidean distance between two points
pub fn distance_between(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1) * (x2 - x1) + (y2 - y1) * (y2 - y1)).sqrt()
}

/// Which quarter of the circle a (normalized) ray angle points into.
///
/// Screen coordinates grow downwards, so angles in `(0, π)` face down.
/// The axis directions themselves are folded into the neighbouring quadrant
/// following the facing rules: `0` faces up-right, `π/2` faces down-left,
/// `π` faces up-left and `3π/2` faces up-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    DownRight,
    DownLeft,
    UpLeft,
    UpRight,
}

/// Sign multipliers for each quadrant: `(x_sign, y_sign)`
const QUADRANT_SIGNS: [(f64, f64); 4] = [
    (1.0, 1.0),   // DownRight
    (-1.0, 1.0),  // DownLeft
    (-1.0, -1.0), // UpLeft
    (1.0, -1.0),  // UpRight
];

impl Quadrant {
    /// Classify a normalized angle
    pub fn of(angle: f64) -> Self {
        let down = angle > 0.0 && angle < PI;
        let right = angle < FRAC_PI_2 || angle > 3.0 * FRAC_PI_2;
        match (down, right) {
            (true, true) => Quadrant::DownRight,
            (true, false) => Quadrant::DownLeft,
            (false, false) => Quadrant::UpLeft,
            (false, true) => Quadrant::UpRight,
        }
    }

    fn index(self) -> usize {
        match self {
            Quadrant::DownRight => 0,
            Quadrant::DownLeft => 1,
            Quadrant::UpLeft => 2,
            Quadrant::UpRight => 3,
        }
    }

    pub fn facing_down(self) -> bool {
        matches!(self, Quadrant::DownRight | Quadrant::DownLeft)
    }

    pub fn facing_up(self) -> bool {
        !self.facing_down()
    }

    pub fn facing_right(self) -> bool {
        matches!(self, Quadrant::DownRight | Quadrant::UpRight)
    }

    pub fn facing_left(self) -> bool {
        !self.facing_right()
    }

    /// +1.0 when facing right, -1.0 when facing left
    pub fn x_sign(self) -> f64 {
        QUADRANT_SIGNS[self.index()].0
    }

    /// +1.0 when facing down, -1.0 when facing up
    pub fn y_sign(self) -> f64 {
        QUADRANT_SIGNS[self.index()].1
    }
}
