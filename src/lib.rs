//! Falling Catch - catch rewards, dodge hazards
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, spawning, collisions, game state)
//! - `game`: Command/snapshot facade consumed by the presentation layer
//! - `scheduler`: Display-refresh driven tick scheduling
//! - `platform`: Browser/native platform abstraction (input, time)
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod scheduler;
pub mod sim;
pub mod tuning;

pub use game::{Game, Snapshot};
pub use scheduler::{FrameHost, FrameScheduler};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Reference playfield the base sizes are authored against
    pub const BASE_WIDTH: f32 = 400.0;
    pub const BASE_HEIGHT: f32 = 600.0;
    /// Share of the available height the playfield may use (HUD and controls take the rest)
    pub const HEIGHT_SHARE: f32 = 0.6;
    /// Smallest scale factor, even for tiny or malformed viewports
    pub const MIN_SCALE: f32 = 0.5;

    /// Field extents never shrink below these
    pub const MIN_FIELD_WIDTH: f32 = 200.0;
    pub const MIN_FIELD_HEIGHT: f32 = 300.0;

    /// Player avatar (square)
    pub const BASE_PLAYER_SIZE: f32 = 50.0;
    pub const MIN_PLAYER_SIZE: f32 = 24.0;
    /// Horizontal displacement per tick while a direction is held
    pub const BASE_PLAYER_SPEED: f32 = 8.0;
    pub const MIN_PLAYER_SPEED: f32 = 4.0;
    /// Gap between the player's bottom edge and the field bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Falling entity (square)
    pub const BASE_ENTITY_SIZE: f32 = 40.0;
    pub const MIN_ENTITY_SIZE: f32 = 20.0;

    /// Lives are displayed as three hearts; tuning may start lower, never higher
    pub const MAX_LIVES: u8 = 3;

    /// Nominal display refresh used by headless runs
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
