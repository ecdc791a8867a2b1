//! Playfield geometry derived from the available viewport
//!
//! Everything is authored against a 400x600 reference field and scaled
//! down (never up) to fit. Re-evaluated whenever the viewport changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Scaled playfield dimensions for one viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Scale applied to the reference sizes
    pub scale: f32,
    /// Field width
    pub width: f32,
    /// Field height
    pub height: f32,
    /// Player avatar edge length
    pub player_size: f32,
    /// Falling entity edge length
    pub entity_size: f32,
    /// Player displacement per tick
    pub player_speed: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::from_scale(1.0)
    }
}

impl Geometry {
    /// Compute geometry for the usable display area.
    ///
    /// Total over all inputs: zero or negative extents clamp to the minimum scale.
    pub fn from_viewport(available_width: i32, available_height: i32) -> Self {
        Self::from_scale(scale_for_viewport(available_width, available_height))
    }

    fn from_scale(scale: f32) -> Self {
        let sized = |base: f32, min: f32| (base * scale).floor().max(min);
        Self {
            scale,
            width: sized(BASE_WIDTH, MIN_FIELD_WIDTH),
            height: sized(BASE_HEIGHT, MIN_FIELD_HEIGHT),
            player_size: sized(BASE_PLAYER_SIZE, MIN_PLAYER_SIZE),
            entity_size: sized(BASE_ENTITY_SIZE, MIN_ENTITY_SIZE),
            player_speed: sized(BASE_PLAYER_SPEED, MIN_PLAYER_SPEED),
        }
    }

    /// Rightmost x the player may occupy
    #[inline]
    pub fn max_player_x(&self) -> f32 {
        (self.width - self.player_size).max(0.0)
    }

    /// Rightmost x a new entity may spawn at
    #[inline]
    pub fn max_entity_x(&self) -> f32 {
        (self.width - self.entity_size).max(0.0)
    }

    /// Player's fixed vertical offset (top edge)
    #[inline]
    pub fn player_y(&self) -> f32 {
        self.height - self.player_size - PLAYER_BOTTOM_MARGIN
    }

    /// Horizontally centered player x
    #[inline]
    pub fn centered_player_x(&self) -> f32 {
        self.max_player_x() / 2.0
    }

    /// Multiplier keeping perceived fall time stable across field heights
    #[inline]
    pub fn fall_scale(&self) -> f32 {
        self.height / BASE_HEIGHT
    }
}

/// Scale factor for an available viewport
pub fn scale_for_viewport(available_width: i32, available_height: i32) -> f32 {
    let by_width = available_width as f32 / BASE_WIDTH;
    let by_height = available_height as f32 * HEIGHT_SHARE / BASE_HEIGHT;
    by_width.min(by_height).min(1.0).max(MIN_SCALE)
}
