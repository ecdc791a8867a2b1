//! Frame scheduling
//!
//! One tick per display refresh while the session is running, nothing
//! otherwise. The scheduler keeps at most one frame request outstanding and
//! is the only place ticks are suspended or resumed.

use crate::consts::FRAME_MS;
use crate::game::Game;
use crate::platform::time::{Clock, ManualClock};
use crate::sim::GameEvent;

/// Something that can call us back on the next display refresh
/// (`requestAnimationFrame` in the browser, a loop in headless runs)
pub trait FrameHost {
    type Handle: Copy;

    fn request_frame(&mut self) -> Self::Handle;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Drives `Game::advance` from frame callbacks
pub struct FrameScheduler<H: FrameHost> {
    pending: Option<H::Handle>,
    frames: u64,
}

impl<H: FrameHost> Default for FrameScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: FrameHost> FrameScheduler<H> {
    pub fn new() -> Self {
        Self {
            pending: None,
            frames: 0,
        }
    }

    /// Whether a frame request is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticks run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Bring the pending request in line with the game phase.
    ///
    /// Call after any command that may change the phase (start, restart).
    pub fn sync(&mut self, game: &Game, host: &mut H) {
        match (game.is_running(), self.pending) {
            (true, None) => {
                self.pending = Some(host.request_frame());
            }
            (false, Some(handle)) => {
                host.cancel_frame(handle);
                self.pending = None;
                log::info!("Frame loop suspended ({:?})", game.phase());
            }
            _ => {}
        }
    }

    /// Handle a fired frame request: tick once, then reschedule iff still running
    pub fn on_frame<C: Clock + ?Sized>(
        &mut self,
        game: &mut Game,
        clock: &C,
        host: &mut H,
    ) -> Vec<GameEvent> {
        self.pending = None;
        if !game.is_running() {
            return Vec::new();
        }
        let events = game.advance(clock.now_ms());
        self.frames += 1;
        if game.is_running() {
            self.pending = Some(host.request_frame());
        } else {
            log::info!("Frame loop suspended ({:?})", game.phase());
        }
        events
    }
}

/// Host for headless runs: requests are just flags the driving loop polls
#[derive(Debug, Default)]
pub struct ManualHost {
    next_handle: u32,
    pending: Option<u32>,
    pub requests: u32,
    pub cancels: u32,
}

impl ManualHost {
    /// Consume the outstanding request, if any
    pub fn take_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl FrameHost for ManualHost {
    type Handle = u32;

    fn request_frame(&mut self) -> u32 {
        self.next_handle += 1;
        self.requests += 1;
        self.pending = Some(self.next_handle);
        self.next_handle
    }

    fn cancel_frame(&mut self, handle: u32) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancels += 1;
        }
    }
}

/// Run frames at a nominal 60 Hz until the loop suspends or `max_frames` is hit.
///
/// Returns the number of frames executed.
pub fn run_headless(game: &mut Game, clock: &ManualClock, max_frames: u64) -> u64 {
    let mut host = ManualHost::default();
    let mut scheduler = FrameScheduler::new();
    scheduler.sync(game, &mut host);

    while scheduler.frames() < max_frames && host.take_pending() {
        clock.advance(FRAME_MS);
        for event in scheduler.on_frame(game, clock, &mut host) {
            log::debug!("{:?}", event);
        }
    }
    scheduler.frames()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Category, GamePhase};
    use crate::tuning::Tuning;

    fn game() -> Game {
        Game::new(5, Tuning::default(), 1280, 1024)
    }

    #[test]
    fn test_nothing_scheduled_before_start() {
        let game = game();
        let mut host = ManualHost::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.sync(&game, &mut host);
        assert!(!scheduler.is_scheduled());
        assert_eq!(host.requests, 0);
    }

    #[test]
    fn test_start_schedules_exactly_one_frame() {
        let mut game = game();
        let mut host = ManualHost::default();
        let mut scheduler = FrameScheduler::new();
        game.start();
        scheduler.sync(&game, &mut host);
        scheduler.sync(&game, &mut host);
        assert!(scheduler.is_scheduled());
        assert_eq!(host.requests, 1);
    }

    #[test]
    fn test_frames_reschedule_while_running() {
        let mut game = game();
        let clock = ManualClock::new(0.0);
        let mut host = ManualHost::default();
        let mut scheduler = FrameScheduler::new();
        game.start();
        scheduler.sync(&game, &mut host);

        for _ in 0..10 {
            assert!(host.take_pending());
            clock.advance(FRAME_MS);
            scheduler.on_frame(&mut game, &clock, &mut host);
        }
        assert_eq!(scheduler.frames(), 10);
        assert_eq!(game.state().time_ticks, 10);
        assert!(scheduler.is_scheduled());
    }

    #[test]
    fn test_game_over_cancels_pending_frame() {
        let mut game = game();
        let mut host = ManualHost::default();
        let mut scheduler = FrameScheduler::new();
        game.start();
        scheduler.sync(&game, &mut host);

        for _ in 0..3 {
            game.inject_outcome(Category::Hazard);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        scheduler.sync(&game, &mut host);
        assert!(!scheduler.is_scheduled());
        assert_eq!(host.cancels, 1);
        assert!(!host.take_pending());

        // Restart resumes
        game.restart();
        scheduler.sync(&game, &mut host);
        assert!(scheduler.is_scheduled());
        assert_eq!(host.requests, 2);
    }

    #[test]
    fn test_fired_frame_after_game_over_does_not_reschedule() {
        let mut game = game();
        let clock = ManualClock::new(0.0);
        let mut host = ManualHost::default();
        let mut scheduler = FrameScheduler::new();
        game.start();
        scheduler.sync(&game, &mut host);

        for _ in 0..3 {
            game.inject_outcome(Category::Hazard);
        }
        assert!(host.take_pending());
        let events = scheduler.on_frame(&mut game, &clock, &mut host);
        assert!(events.is_empty());
        assert!(!scheduler.is_scheduled());
        assert_eq!(host.requests, 1);
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_headless_run_is_bounded() {
        let mut game = game();
        let clock = ManualClock::new(0.0);
        assert_eq!(run_headless(&mut game, &clock, 100), 0);

        game.start();
        let frames = run_headless(&mut game, &clock, 120);
        assert!(frames <= 120);
        assert!(frames > 0);
        assert!(clock.now_ms() > 0.0);
    }
}
