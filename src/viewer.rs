use crate::angle::normalize_angle;
use crate::Grid;
use log::trace;
use serde::{Deserialize, Serialize};

/// A discrete motion intent: -1, 0 or +1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intent {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Intent {
    pub fn sign(self) -> f64 {
        match self {
            Intent::Negative => -1.0,
            Intent::Neutral => 0.0,
            Intent::Positive => 1.0,
        }
    }

    /// Map -1/0/1 to an intent; any other value is rejected
    pub fn from_sign(value: i8) -> Option<Self> {
        match value {
            -1 => Some(Intent::Negative),
            0 => Some(Intent::Neutral),
            1 => Some(Intent::Positive),
            _ => None,
        }
    }
}

/// Position and heading of the viewer, read by the ray caster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Radians in `[0, 2π)`, 0 = +x, π/2 = +y (screen down)
    pub heading: f64,
}

/// The first-person camera walking through the grid
#[derive(Clone, Debug)]
pub struct Viewer {
    pose: Pose,
    turn_intent: Intent,
    move_intent: Intent,

    /// World units travelled per tick at full intent
    pub move_speed: f64,
    /// Radians turned per tick at full intent
    pub turn_speed: f64,
    /// Radius of the viewer marker
    pub radius: f64,
}

impl Viewer {
    pub fn new(x: f64, y: f64, heading: f64, move_speed: f64, turn_speed: f64, radius: f64) -> Self {
        Viewer {
            pose: Pose {
                x,
                y,
                heading: normalize_angle(heading),
            },
            turn_intent: Intent::Neutral,
            move_intent: Intent::Neutral,
            move_speed,
            turn_speed,
            radius,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn turn_intent(&self) -> Intent {
        self.turn_intent
    }

    pub fn move_intent(&self) -> Intent {
        self.move_intent
    }

    pub fn set_intents(&mut self, turn: Intent, movement: Intent) {
        self.turn_intent = turn;
        self.move_intent = movement;
    }

    pub fn set_turn_intent(&mut self, turn: Intent) {
        self.turn_intent = turn;
    }

    pub fn set_move_intent(&mut self, movement: Intent) {
        self.move_intent = movement;
    }

    /// Advance one tick: turn, then step along the new heading.
    ///
    /// The step is all-or-nothing: if the destination point is blocked the
    /// position stays put. Only the end point is tested, so a fast viewer can
    /// cut across the corner of a one-tile wall.
    /// Returns true if the position changed.
    pub fn update(&mut self, grid: &Grid) -> bool {
        self.pose.heading =
            normalize_angle(self.pose.heading + self.turn_intent.sign() * self.turn_speed);

        let step = self.move_intent.sign() * self.move_speed;
        if step == 0.0 {
            return false;
        }

        let new_x = self.pose.x + step * self.pose.heading.cos();
        let new_y = self.pose.y + step * self.pose.heading.sin();

        if grid.is_blocked(new_x, new_y) {
            trace!("move to ({:.2}, {:.2}) rejected", new_x, new_y);
            return false;
        }

        self.pose.x = new_x;
        self.pose.y = new_y;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn room() -> Grid {
        Grid::from_text("■■■■■\n■□□□■\n■□□□■\n■□□□■\n■■■■■", 64.0).unwrap()
    }

    #[test]
    fn test_viewer_moves_forward() {
        let grid = room();
        let mut viewer = Viewer::new(160.0, 160.0, 0.0, 2.0, 0.1, 3.0);
        viewer.set_intents(Intent::Neutral, Intent::Positive);

        assert!(viewer.update(&grid));
        assert!((viewer.pose().x - 162.0).abs() < 1e-9);
        assert!((viewer.pose().y - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_viewer_backs_up_along_heading() {
        let grid = room();
        let mut viewer = Viewer::new(160.0, 160.0, FRAC_PI_2, 2.0, 0.1, 3.0);
        viewer.set_intents(Intent::Neutral, Intent::Negative);

        viewer.update(&grid);
        assert!((viewer.pose().x - 160.0).abs() < 1e-9);
        assert!((viewer.pose().y - 158.0).abs() < 1e-9);
    }

    #[test]
    fn test_viewer_turns() {
        let grid = room();
        let mut viewer = Viewer::new(160.0, 160.0, 0.0, 2.0, 0.25, 3.0);
        viewer.set_intents(Intent::Negative, Intent::Neutral);

        viewer.update(&grid);
        assert!((viewer.pose().heading - (2.0 * PI - 0.25)).abs() < 1e-9);
        assert_eq!(viewer.pose().x, 160.0);
    }

    #[test]
    fn test_move_into_wall_rejected() {
        let grid = room();
        // One unit away from the east wall face at x = 256
        let mut viewer = Viewer::new(255.0, 160.0, 0.0, 2.0, 0.1, 3.0);
        viewer.set_intents(Intent::Neutral, Intent::Positive);

        assert!(!viewer.update(&grid));
        assert_eq!(viewer.pose().x, 255.0);
        assert_eq!(viewer.pose().y, 160.0);
    }

    #[test]
    fn test_intent_from_sign() {
        assert_eq!(Intent::from_sign(-1), Some(Intent::Negative));
        assert_eq!(Intent::from_sign(0), Some(Intent::Neutral));
        assert_eq!(Intent::from_sign(1), Some(Intent::Positive));
        assert_eq!(Intent::from_sign(2), None);
    }
}
