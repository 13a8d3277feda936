use crate::input::{Direction, InputEvent, KeyPhase};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Input event with its time since the log started
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedInput {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub event: InputEvent,
}

/// Records key presses and releases for replaying a session by hand
pub struct InputLog {
    start_time: Instant,
    events: Vec<LoggedInput>,
}

impl Default for InputLog {
    fn default() -> Self {
        Self::new()
    }
}

impl InputLog {
    pub fn new() -> Self {
        InputLog {
            start_time: Instant::now(),
            events: Vec::new(),
        }
    }

    /// Log an event with the current timestamp
    pub fn log(&mut self, event: InputEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.log_at(timestamp_ms, event);
    }

    pub fn log_at(&mut self, timestamp_ms: u64, event: InputEvent) {
        self.events.push(LoggedInput { timestamp_ms, event });
    }

    pub fn events(&self) -> &[LoggedInput] {
        &self.events
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Total time each direction was held, in milliseconds.
    /// A press without a release is not counted.
    pub fn hold_durations(&self) -> HashMap<Direction, u64> {
        let mut pressed_at: HashMap<Direction, u64> = HashMap::new();
        let mut totals: HashMap<Direction, u64> = HashMap::new();

        for logged in &self.events {
            let direction = logged.event.direction;
            match logged.event.phase {
                KeyPhase::Pressed => {
                    pressed_at.entry(direction).or_insert(logged.timestamp_ms);
                }
                KeyPhase::Released => {
                    if let Some(start_ms) = pressed_at.remove(&direction) {
                        *totals.entry(direction).or_insert(0) += logged.timestamp_ms.saturating_sub(start_ms);
                    }
                }
            }
        }

        totals
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let presses = self
            .events
            .iter()
            .filter(|l| l.event.phase == KeyPhase::Pressed)
            .count();
        let duration = self.events.last().map(|l| l.timestamp_ms).unwrap_or(0);
        let held = self.hold_durations();
        let held_ms = |d: Direction| held.get(&d).copied().unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {} ({} presses)\n\
             Held: forward {}ms, backward {}ms, left {}ms, right {}ms",
            duration,
            self.events.len(),
            presses,
            held_ms(Direction::MoveForward),
            held_ms(Direction::MoveBackward),
            held_ms(Direction::TurnLeft),
            held_ms(Direction::TurnRight),
        )
    }
}
