//! Gameplay balance data
//!
//! Defaults match the shipped game. Overrides are JSON and can be dropped
//! into LocalStorage on web to experiment without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LIVES;
use crate::sim::Category;

/// Errors raised while loading tuning data
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// Not valid JSON, or fields of the wrong type
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Spawn interval must be positive
    #[error("Spawn interval must be positive, got {0} ms")]
    InvalidInterval(f64),

    /// Starting lives outside 1..=MAX_LIVES
    #[error("Starting lives must be between 1 and {max}, got {got}")]
    InvalidLives { got: u8, max: u8 },

    /// Empty, inverted, or non-positive fall speed range
    #[error("Invalid {name} fall speed range [{min}, {max})")]
    InvalidSpeedRange { name: &'static str, min: f32, max: f32 },

    /// Every category weight is zero
    #[error("At least one category weight must be non-zero")]
    ZeroWeights,
}

/// Half-open range of base fall speeds (units per tick at base height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min > 0.0 && self.min < self.max && self.max.is_finite()
    }
}

/// Relative spawn weights per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub hazard: u32,
    pub coin: u32,
    pub star: u32,
    pub gem: u32,
}

impl CategoryWeights {
    pub fn weight(&self, category: Category) -> u32 {
        match category {
            Category::Hazard => self.hazard,
            Category::Coin => self.coin,
            Category::Star => self.star,
            Category::Gem => self.gem,
        }
    }

    pub fn total(&self) -> u32 {
        Category::ALL.iter().map(|&c| self.weight(c)).sum()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        // Two hazard slots against one of each reward
        Self {
            hazard: 2,
            coin: 1,
            star: 1,
            gem: 1,
        }
    }
}

/// Tunable game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Minimum wall-clock gap between spawns
    pub spawn_interval_ms: f64,
    /// Lives at session start
    pub starting_lives: u8,
    pub coin_points: u64,
    pub star_points: u64,
    pub gem_points: u64,
    pub weights: CategoryWeights,
    pub hazard_speed: SpeedRange,
    pub reward_speed: SpeedRange,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 1000.0,
            starting_lives: MAX_LIVES,
            coin_points: 10,
            star_points: 25,
            gem_points: 50,
            weights: CategoryWeights::default(),
            hazard_speed: SpeedRange::new(3.0, 5.0),
            reward_speed: SpeedRange::new(2.0, 3.5),
        }
    }
}

impl Tuning {
    /// Points awarded for catching an entity of this category
    pub fn points(&self, category: Category) -> u64 {
        match category {
            Category::Hazard => 0,
            Category::Coin => self.coin_points,
            Category::Star => self.star_points,
            Category::Gem => self.gem_points,
        }
    }

    /// Parse and validate a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_interval_ms.is_nan() || self.spawn_interval_ms <= 0.0 {
            return Err(TuningError::InvalidInterval(self.spawn_interval_ms));
        }
        if self.starting_lives == 0 || self.starting_lives > MAX_LIVES {
            return Err(TuningError::InvalidLives {
                got: self.starting_lives,
                max: MAX_LIVES,
            });
        }
        for (name, range) in [("hazard", self.hazard_speed), ("reward", self.reward_speed)] {
            if !range.is_valid() {
                return Err(TuningError::InvalidSpeedRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.weights.total() == 0 {
            return Err(TuningError::ZeroWeights);
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "falling_catch_tuning";

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
