//! Per-frame simulation tick
//!
//! Spawn, move, fall, collide, score. The tick reads one immutable
//! snapshot of intent, geometry and time and owns the state for its whole
//! duration.

use serde::{Deserialize, Serialize};

use super::collision::partition_collisions;
use super::geometry::Geometry;
use super::state::{GameEvent, GameState};

/// Normalized horizontal movement intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub move_left: bool,
    pub move_right: bool,
}

impl Intent {
    pub const NONE: Intent = Intent {
        move_left: false,
        move_right: false,
    };
    pub const LEFT: Intent = Intent {
        move_left: true,
        move_right: false,
    };
    pub const RIGHT: Intent = Intent {
        move_left: false,
        move_right: true,
    };

    /// -1 for left, 1 for right, 0 when idle or when both are held
    #[inline]
    pub fn direction(self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Everything the tick reads from outside the state
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub intent: Intent,
    pub geometry: Geometry,
    /// Monotonic clock reading in milliseconds
    pub now_ms: f64,
}

/// Advance the game state by one frame.
///
/// Does nothing unless the session is running.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    let geometry = &input.geometry;
    state.time_ticks += 1;

    let mut previous = std::mem::take(&mut state.entities);
    if let Some(entity) = state
        .spawner
        .try_spawn(input.now_ms, geometry, &mut state.rng)
    {
        state.stats.spawned += 1;
        events.push(GameEvent::Spawned {
            id: entity.id,
            category: entity.category,
        });
        previous.push(entity);
    }

    state.player.step(input.intent.direction(), geometry);

    // Rebuild the collection: fall, then drop anything past the bottom edge
    let mut falling = Vec::with_capacity(previous.len());
    for entity in previous.iter().map(|e| e.fallen()) {
        if entity.pos.y >= geometry.height {
            state.stats.missed += 1;
            events.push(GameEvent::Missed {
                id: entity.id,
                category: entity.category,
            });
        } else {
            falling.push(entity);
        }
    }

    let partition = partition_collisions(falling, &state.player.rect(), geometry.entity_size);
    events.extend(state.apply_outcomes(partition.outcomes()));
    state.entities = partition.surviving;

    events
}
