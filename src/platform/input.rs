//! Input normalization
//!
//! Keyboard and touch arrive as independent edge-triggered events. This
//! folds them into a single `Intent` snapshot that the tick reads.

use std::collections::HashSet;

use crate::sim::Intent;

/// Horizontal direction from a single input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// Map a DOM `KeyboardEvent.key` to a canonical movement key.
///
/// Letter keys are case-folded so a key released with shift held still
/// matches its press.
pub fn movement_key(key: &str) -> Option<(&'static str, Direction)> {
    match key {
        "ArrowLeft" => Some(("ArrowLeft", Direction::Left)),
        "ArrowRight" => Some(("ArrowRight", Direction::Right)),
        "a" | "A" => Some(("a", Direction::Left)),
        "d" | "D" => Some(("d", Direction::Right)),
        _ => None,
    }
}

/// Merges held keys and the touch direction into one intent
#[derive(Debug, Clone, Default)]
pub struct InputNormalizer {
    /// Canonical movement keys currently held down
    held: HashSet<&'static str>,
    /// Active on-screen button, if any
    touch: Option<Direction>,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is a movement key.
    pub fn key_down(&mut self, key: &str) -> bool {
        match movement_key(key) {
            Some((canonical, _)) => {
                self.held.insert(canonical);
                true
            }
            None => false,
        }
    }

    /// Record a key release. Returns true if the key is a movement key.
    pub fn key_up(&mut self, key: &str) -> bool {
        match movement_key(key) {
            Some((canonical, _)) => {
                self.held.remove(canonical);
                true
            }
            None => false,
        }
    }

    /// Touch/pointer press on a direction button; replaces any previous one
    pub fn touch_start(&mut self, direction: Direction) {
        self.touch = Some(direction);
    }

    /// Touch release or pointer leave
    pub fn touch_end(&mut self) {
        self.touch = None;
    }

    /// Drop all held input (focus lost, key-ups will never arrive)
    pub fn clear(&mut self) {
        self.held.clear();
        self.touch = None;
    }

    fn holding(&self, direction: Direction) -> bool {
        self.touch == Some(direction)
            || self
                .held
                .iter()
                .any(|key| movement_key(key).is_some_and(|(_, d)| d == direction))
    }

    /// Current intent. Both flags may be set; the tick treats that as no movement.
    pub fn intent(&self) -> Intent {
        Intent {
            move_left: self.holding(Direction::Left),
            move_right: self.holding(Direction::Right),
        }
    }
}
