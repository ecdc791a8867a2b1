//! Demo mode: a simple player that catches rewards and sidesteps hazards
//!
//! Only produces an `Intent`; it goes through the same tick as human input.

use super::geometry::Geometry;
use super::state::{Entity, GameState};
use super::tick::Intent;

/// How far above the player (in player heights) a hazard counts as a threat
const THREAT_HORIZON: f32 = 4.0;

/// Pick a movement intent for the current frame
pub fn suggest_intent(state: &GameState, geometry: &Geometry) -> Intent {
    if !state.is_running() {
        return Intent::NONE;
    }

    let player = &state.player;
    let player_center = player.pos.x + player.width / 2.0;
    let size = geometry.entity_size;
    let horizon = player.pos.y - player.height * THREAT_HORIZON;

    // Dodge the lowest hazard that is about to land on us
    let threat = state
        .entities
        .iter()
        .filter(|e| e.category.is_hazard())
        .filter(|e| e.pos.y + size > horizon && e.pos.y < player.pos.y + player.height)
        .filter(|e| e.pos.x < player.pos.x + player.width + size && e.pos.x + size > player.pos.x - size)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(hazard) = threat {
        let hazard_center = hazard.pos.x + size / 2.0;
        let flee_right = if player.pos.x <= 0.0 {
            true
        } else if player.pos.x >= geometry.max_player_x() {
            false
        } else {
            player_center >= hazard_center
        };
        return if flee_right { Intent::RIGHT } else { Intent::LEFT };
    }

    // Otherwise chase the lowest reward still above the player
    let target = state
        .entities
        .iter()
        .filter(|e| !e.category.is_hazard() && e.pos.y < player.pos.y + player.height)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    match target {
        Some(reward) => steer_toward(reward, player_center, size, geometry.player_speed),
        None => Intent::NONE,
    }
}

fn steer_toward(entity: &Entity, player_center: f32, size: f32, speed: f32) -> Intent {
    let delta = entity.pos.x + size / 2.0 - player_center;
    if delta > speed / 2.0 {
        Intent::RIGHT
    } else if delta < -speed / 2.0 {
        Intent::LEFT
    } else {
        Intent::NONE
    }
}
