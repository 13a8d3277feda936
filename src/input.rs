use crate::viewer::{Intent, Viewer};
use serde::{Deserialize, Serialize};

/// The four directional controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    TurnLeft,
    TurnRight,
    MoveForward,
    MoveBackward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPhase {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub direction: Direction,
    pub phase: KeyPhase,
}

impl InputEvent {
    pub fn pressed(direction: Direction) -> Self {
        InputEvent { direction, phase: KeyPhase::Pressed }
    }

    pub fn released(direction: Direction) -> Self {
        InputEvent { direction, phase: KeyPhase::Released }
    }
}

/// Anything that reports directional key events once per tick
pub trait InputSource {
    /// Append the events that happened since the last poll
    fn poll(&mut self, events: &mut Vec<InputEvent>);
}

/// Translate one event into viewer intents.
///
/// A press sets the matching axis; releasing either key of an axis stops
/// that axis, even if the opposite key is still held.
pub fn apply_event(viewer: &mut Viewer, event: InputEvent) {
    let mut turn = viewer.turn_intent();
    let mut movement = viewer.move_intent();

    match (event.phase, event.direction) {
        (KeyPhase::Pressed, Direction::TurnLeft) => turn = Intent::Negative,
        (KeyPhase::Pressed, Direction::TurnRight) => turn = Intent::Positive,
        (KeyPhase::Pressed, Direction::MoveForward) => movement = Intent::Positive,
        (KeyPhase::Pressed, Direction::MoveBackward) => movement = Intent::Negative,
        (KeyPhase::Released, Direction::TurnLeft | Direction::TurnRight) => turn = Intent::Neutral,
        (KeyPhase::Released, Direction::MoveForward | Direction::MoveBackward) => {
            movement = Intent::Neutral
        }
    }

    viewer.set_intents(turn, movement);
}
