//! Game state and core simulation types
//!
//! Everything a session mutates lives here and is owned by exactly one
//! `GameState`. The frame scheduler is the only caller that advances it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::geometry::Geometry;
use super::spawn::Spawner;
use crate::tuning::Tuning;

/// Session-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Falling entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Hazard,
    Coin,
    Star,
    Gem,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Hazard,
        Category::Coin,
        Category::Star,
        Category::Gem,
    ];

    #[inline]
    pub fn is_hazard(self) -> bool {
        self == Category::Hazard
    }

    /// Stable index into per-category tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A falling entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Render identity only; never used for game logic
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick, always positive
    pub fall_speed: f32,
    pub category: Category,
}

impl Entity {
    /// Entity after one tick of uniform fall
    #[inline]
    pub fn fallen(&self) -> Self {
        Self {
            pos: Vec2::new(self.pos.x, self.pos.y + self.fall_speed),
            ..self.clone()
        }
    }

    #[inline]
    pub fn rect(&self, size: f32) -> Rect {
        Rect::new(self.pos.x, self.pos.y, size, size)
    }
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// Centered horizontally, anchored to the bottom of the field
    pub fn centered(geometry: &Geometry) -> Self {
        Self {
            pos: Vec2::new(geometry.centered_player_x(), geometry.player_y()),
            width: geometry.player_size,
            height: geometry.player_size,
        }
    }

    /// Move horizontally by `direction * player_speed`, clamped to the field.
    ///
    /// Size and vertical anchor follow the current geometry so a resize
    /// takes effect on the next tick.
    pub fn step(&mut self, direction: f32, geometry: &Geometry) {
        self.width = geometry.player_size;
        self.height = geometry.player_size;
        let x = self.pos.x + direction * geometry.player_speed;
        self.pos = Vec2::new(x.clamp(0.0, geometry.max_player_x()), geometry.player_y());
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Things that happened during a tick, for presentation cues
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new entity entered above the field
    Spawned { id: u32, category: Category },
    /// A reward was collected
    Caught { category: Category, points: u64 },
    /// A hazard hit the player and lives remain
    HazardHit { lives_left: u8 },
    /// An entity fell past the bottom edge
    Missed { id: u32, category: Category },
    /// The last life was lost
    GameOver { score: u64 },
}

/// Per-session counters (in memory only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Collisions per category, indexed by `Category::index`
    pub caught: [u32; 4],
    pub spawned: u32,
    pub missed: u32,
    /// Best score across restarts of this state
    pub best_score: u64,
}

impl SessionStats {
    pub fn caught(&self, category: Category) -> u32 {
        self.caught[category.index()]
    }

    /// Reset per-session counters, keeping the best score
    fn reset(&mut self) {
        *self = Self {
            best_score: self.best_score,
            ..Self::default()
        };
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn randomness
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub player: Player,
    /// Live entities in insertion order
    pub entities: Vec<Entity>,
    pub spawner: Spawner,
    pub stats: SessionStats,
    /// Ticks simulated while running
    pub time_ticks: u64,
}

impl GameState {
    /// Create an unstarted session
    pub fn new(seed: u64, tuning: Tuning, geometry: &Geometry) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawner: Spawner::new(&tuning),
            phase: GamePhase::NotStarted,
            score: 0,
            lives: tuning.starting_lives,
            player: Player::centered(geometry),
            entities: Vec::new(),
            stats: SessionStats::default(),
            time_ticks: 0,
            tuning,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// NotStarted -> Running. Ignored in any other phase.
    pub fn start(&mut self, geometry: &Geometry) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.reset_session(geometry);
        true
    }

    /// Running | GameOver -> Running with a fresh session
    pub fn restart(&mut self, geometry: &Geometry) {
        self.reset_session(geometry);
    }

    fn reset_session(&mut self, geometry: &Geometry) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.entities.clear();
        self.player = Player::centered(geometry);
        self.spawner.reset();
        self.stats.reset();
        self.time_ticks = 0;
    }

    /// Fold one collision outcome into score and lives.
    ///
    /// A no-op unless running, so a hit after game over never applies.
    pub fn apply_outcome(&mut self, category: Category) -> Option<GameEvent> {
        self.apply_outcomes([category]).pop()
    }

    /// Fold all outcomes of one tick into score and lives.
    ///
    /// Every outcome applies regardless of order; the game-over check runs
    /// once after all of them. A no-op unless running.
    pub fn apply_outcomes<I>(&mut self, categories: I) -> Vec<GameEvent>
    where
        I: IntoIterator<Item = Category>,
    {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }

        for category in categories {
            self.stats.caught[category.index()] += 1;
            if category.is_hazard() {
                self.lives = self.lives.saturating_sub(1);
                if self.lives > 0 {
                    events.push(GameEvent::HazardHit {
                        lives_left: self.lives,
                    });
                }
            } else {
                let points = self.tuning.points(category);
                self.score += points;
                events.push(GameEvent::Caught { category, points });
            }
        }
        self.stats.best_score = self.stats.best_score.max(self.score);

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", self.score);
            events.push(GameEvent::GameOver { score: self.score });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        let geometry = Geometry::default();
        let mut state = GameState::new(7, Tuning::default(), &geometry);
        assert!(state.start(&geometry));
        state
    }

    #[test]
    fn test_new_state_is_not_started() {
        let state = GameState::new(1, Tuning::default(), &Geometry::default());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_outcomes_ignored_before_start() {
        let mut state = GameState::new(1, Tuning::default(), &Geometry::default());
        assert_eq!(state.apply_outcome(Category::Gem), None);
        assert_eq!(state.apply_outcome(Category::Hazard), None);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_single_hazard() {
        let mut state = running_state();
        let event = state.apply_outcome(Category::Hazard);
        assert_eq!(event, Some(GameEvent::HazardHit { lives_left: 2 }));
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_three_hazards_end_the_game_once() {
        let mut state = running_state();
        state.apply_outcome(Category::Coin);
        state.apply_outcome(Category::Hazard);
        state.apply_outcome(Category::Hazard);
        let last = state.apply_outcome(Category::Hazard);
        assert_eq!(last, Some(GameEvent::GameOver { score: 10 }));
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Fourth hit changes nothing
        assert_eq!(state.apply_outcome(Category::Hazard), None);
        assert_eq!(state.apply_outcome(Category::Gem), None);
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 10);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_batch_outcomes_are_order_independent() {
        let tuning = Tuning {
            starting_lives: 1,
            ..Tuning::default()
        };
        let run = |order: [Category; 2]| {
            let geometry = Geometry::default();
            let mut state = GameState::new(3, tuning.clone(), &geometry);
            state.start(&geometry);
            let events = state.apply_outcomes(order);
            (state.score, state.lives, state.phase, events.last().copied())
        };

        let gem_first = run([Category::Gem, Category::Hazard]);
        let hazard_first = run([Category::Hazard, Category::Gem]);
        assert_eq!(gem_first, hazard_first);
        assert_eq!(
            hazard_first,
            (50, 0, GamePhase::GameOver, Some(GameEvent::GameOver { score: 50 }))
        );
    }

    #[test]
    fn test_batch_flips_to_game_over_once() {
        let mut state = running_state();
        let events = state.apply_outcomes([
            Category::Hazard,
            Category::Hazard,
            Category::Hazard,
            Category::Hazard,
            Category::Coin,
        ]);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 10 }));
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 10);

        // Once over, further batches are ignored
        assert!(state.apply_outcomes([Category::Gem]).is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_reward_points() {
        let mut state = running_state();
        for category in [Category::Coin, Category::Star, Category::Gem] {
            state.apply_outcome(category);
        }
        assert_eq!(state.score, 85);
        assert_eq!(state.stats.caught(Category::Star), 1);
        assert_eq!(state.stats.best_score, 85);
    }

    #[test]
    fn test_start_is_ignored_once_running() {
        let geometry = Geometry::default();
        let mut state = running_state();
        state.apply_outcome(Category::Coin);
        assert!(!state.start(&geometry));
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_restart_resets_session_but_keeps_best() {
        let geometry = Geometry::default();
        let mut state = running_state();
        state.apply_outcome(Category::Gem);
        state.player.pos.x = 0.0;
        for _ in 0..3 {
            state.apply_outcome(Category::Hazard);
        }
        assert_eq!(state.phase, GamePhase::GameOver);

        state.restart(&geometry);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(state.entities.is_empty());
        assert_eq!(state.player, Player::centered(&geometry));
        assert_eq!(state.stats.caught(Category::Gem), 0);
        assert_eq!(state.stats.best_score, 50);
    }

    #[test]
    fn test_player_step_clamps() {
        let geometry = Geometry::default();
        let mut player = Player::centered(&geometry);
        for _ in 0..100 {
            player.step(-1.0, &geometry);
        }
        assert_eq!(player.pos.x, 0.0);
        for _ in 0..100 {
            player.step(1.0, &geometry);
        }
        assert_eq!(player.pos.x, geometry.max_player_x());
    }
}
