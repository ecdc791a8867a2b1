//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in through `TickInput`, never from a clock
//! - Seeded RNG only
//! - Stable entity order (insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::suggest_intent;
pub use collision::{Partition, Rect, partition_collisions};
pub use geometry::Geometry;
pub use spawn::{Spawner, pick_category, spawn_due};
pub use state::{
    Category, Entity, GameEvent, GamePhase, GameState, Player, SessionStats,
};
pub use tick::{Intent, TickInput, tick};
