//! Command/snapshot boundary between the simulation and the presentation layer
//!
//! Input events only replace the intent and geometry snapshots held here;
//! `advance` copies both into a `TickInput` so a tick always sees one
//! consistent view.

use serde::{Deserialize, Serialize};

use crate::sim::{
    Category, GameEvent, GamePhase, GameState, Geometry, Intent, SessionStats, TickInput,
    suggest_intent, tick,
};
use crate::tuning::Tuning;

/// Player rectangle as exposed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Falling entity as exposed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub category: Category,
}

/// Read-only view of the game after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    pub player: PlayerView,
    /// Insertion order, stable for render-list diffing
    pub entities: Vec<EntityView>,
    pub geometry: Geometry,
    pub stats: SessionStats,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One game session plus the latest input and viewport snapshots
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    geometry: Geometry,
    intent: Intent,
    /// Autopilot drives the player instead of `intent`
    demo_mode: bool,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, viewport_width: i32, viewport_height: i32) -> Self {
        let geometry = Geometry::from_viewport(viewport_width, viewport_height);
        Self {
            state: GameState::new(seed, tuning, &geometry),
            geometry,
            intent: Intent::NONE,
            demo_mode: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Begin the first session. Returns false if already started.
    pub fn start(&mut self) -> bool {
        let started = self.state.start(&self.geometry);
        if started {
            log::info!("Session started (seed {})", self.state.seed);
        }
        started
    }

    /// Fresh session from Running or GameOver; behaves as start before the first one
    pub fn restart(&mut self) {
        if self.state.phase == GamePhase::NotStarted {
            self.start();
            return;
        }
        log::info!("Session restarted (previous score {})", self.state.score);
        self.state.restart(&self.geometry);
    }

    /// Replace the movement intent snapshot
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = intent;
    }

    /// Replace the geometry snapshot.
    ///
    /// Running sessions keep their state; the player is re-clamped on the next
    /// tick. Before the first start the player is re-centered right away.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        let geometry = Geometry::from_viewport(width, height);
        if geometry == self.geometry {
            return;
        }
        log::info!(
            "Viewport {}x{} -> field {}x{} (scale {:.2})",
            width,
            height,
            geometry.width,
            geometry.height,
            geometry.scale
        );
        self.geometry = geometry;
        if self.state.phase == GamePhase::NotStarted {
            self.state.player = crate::sim::Player::centered(&self.geometry);
        }
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn set_demo_mode(&mut self, on: bool) {
        if on != self.demo_mode {
            log::info!("Demo mode: {}", on);
        }
        self.demo_mode = on;
    }

    /// Apply a collision outcome directly, as if an entity of this category
    /// had just hit the player. Ignored unless running.
    #[cfg(test)]
    pub(crate) fn inject_outcome(&mut self, category: Category) -> Option<GameEvent> {
        self.state.apply_outcome(category)
    }

    /// Run one tick against the current snapshots
    pub fn advance(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let intent = if self.demo_mode {
            suggest_intent(&self.state, &self.geometry)
        } else {
            self.intent
        };
        let input = TickInput {
            intent,
            geometry: self.geometry,
            now_ms,
        };
        tick(&mut self.state, &input)
    }

    pub fn snapshot(&self) -> Snapshot {
        let player = &self.state.player;
        Snapshot {
            score: self.state.score,
            lives: self.state.lives,
            phase: self.state.phase,
            player: PlayerView {
                x: player.pos.x,
                y: player.pos.y,
                width: player.width,
                height: player.height,
            },
            entities: self
                .state
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    x: e.pos.x,
                    y: e.pos.y,
                    category: e.category,
                })
                .collect(),
            geometry: self.geometry,
            stats: self.state.stats.clone(),
        }
    }
}
