//! Falling Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, PointerEvent};

    use falling_catch::platform::time::PerformanceClock;
    use falling_catch::platform::{Direction, InputNormalizer};
    use falling_catch::sim::{GameEvent, GamePhase};
    use falling_catch::{FrameHost, FrameScheduler, Game, Snapshot, Tuning};

    // Hand each frame to the page's renderer, if it registered one
    #[wasm_bindgen(inline_js = "
        export function present_snapshot(json) {
            if (typeof window.onFallingCatchFrame === 'function') {
                window.onFallingCatchFrame(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_snapshot(json: &str);
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame`-backed frame host
    struct RafHost {
        callback: FrameCallback,
    }

    impl FrameHost for RafHost {
        type Handle = i32;

        fn request_frame(&mut self) -> i32 {
            let Some(window) = web_sys::window() else {
                return 0;
            };
            match self.callback.borrow().as_ref() {
                Some(cb) => window
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .unwrap_or(0),
                None => 0,
            }
        }

        fn cancel_frame(&mut self, handle: i32) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// Game instance plus everything the browser glue needs
    struct App {
        game: Game,
        input: InputNormalizer,
        scheduler: FrameScheduler<RafHost>,
        host: RafHost,
        clock: PerformanceClock,
    }

    impl App {
        /// Push the merged keyboard/touch intent into the game
        fn sync_input(&mut self) {
            self.game.set_intent(self.input.intent());
        }

        fn start(&mut self) {
            self.game.start();
            self.scheduler.sync(&self.game, &mut self.host);
            self.present();
        }

        fn restart(&mut self) {
            self.game.restart();
            self.scheduler.sync(&self.game, &mut self.host);
            self.present();
        }

        /// Space/Enter: start the first session or restart after game over
        fn primary_action(&mut self) {
            match self.game.phase() {
                GamePhase::NotStarted => self.start(),
                GamePhase::GameOver => self.restart(),
                GamePhase::Running => {}
            }
        }

        fn frame(&mut self) {
            let events = self
                .scheduler
                .on_frame(&mut self.game, &self.clock, &mut self.host);
            for event in events {
                if let GameEvent::GameOver { score } = event {
                    log::info!("Final score: {}", score);
                }
            }
            self.present();
        }

        fn present(&self) {
            let snapshot = self.game.snapshot();
            match snapshot.to_json() {
                Ok(json) => present_snapshot(&json),
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
            update_hud(&snapshot);
        }
    }

    fn viewport() -> (i32, i32) {
        let Some(window) = web_sys::window() else {
            return (0, 0);
        };
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as i32;
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    /// Update HUD elements in DOM
    fn update_hud(snapshot: &Snapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
            el.set_text_content(Some(&snapshot.score.to_string()));
        }
        if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
            el.set_text_content(Some(&snapshot.lives.to_string()));
        }

        let show = |id: &str, visible: bool| {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        };
        show("start-screen", snapshot.phase == GamePhase::NotStarted);
        show("game-over", snapshot.phase == GamePhase::GameOver);

        if snapshot.phase == GamePhase::GameOver {
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("best-score") {
                el.set_text_content(Some(&snapshot.stats.best_score.to_string()));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Falling Catch starting...");

        let seed = js_sys::Date::now() as u64;
        let (width, height) = viewport();
        let game = Game::new(seed, Tuning::load(), width, height);
        log::info!("Game initialized with seed: {}", seed);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let app = Rc::new(RefCell::new(App {
            game,
            input: InputNormalizer::new(),
            scheduler: FrameScheduler::new(),
            host: RafHost {
                callback: callback.clone(),
            },
            clock: PerformanceClock,
        }));

        {
            let app = app.clone();
            *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                app.borrow_mut().frame();
            }));
        }

        setup_keyboard(app.clone());
        setup_touch_buttons(app.clone());
        setup_menu_buttons(app.clone());
        setup_window_events(app.clone());

        app.borrow().present();
        log::info!("Falling Catch ready!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();
                if a.input.key_down(&key) {
                    event.prevent_default();
                    a.sync_input();
                    return;
                }
                match key.as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        a.primary_action();
                    }
                    "i" | "I" => {
                        let on = !a.game.demo_mode();
                        a.game.set_demo_mode(on);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                if a.input.key_up(&event.key()) {
                    a.sync_input();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (id, direction) in [("touch-left", Direction::Left), ("touch-right", Direction::Right)] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} button, touch controls disabled", id);
                continue;
            };

            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    a.input.touch_start(direction);
                    a.sync_input();
                });
                let _ = btn
                    .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for release in ["pointerup", "pointerleave", "pointercancel"] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    let mut a = app.borrow_mut();
                    a.input.touch_end();
                    a.sync_input();
                });
                let _ = btn.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_menu_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_events(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Resize only swaps the geometry snapshot; the next tick picks it up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (width, height) = viewport();
                let mut a = app.borrow_mut();
                a.game.set_viewport(width, height);
                if !a.game.is_running() {
                    a.present();
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key-ups never arrive once focus is gone
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                a.input.clear();
                a.sync_input();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use falling_catch::platform::ManualClock;
    use falling_catch::scheduler::run_headless;
    use falling_catch::{Game, Tuning};

    env_logger::init();
    log::info!("Falling Catch (native) starting...");
    log::info!("Native mode runs a headless demo session - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let mut game = Game::new(seed, Tuning::load(), 1280, 800);
    game.set_demo_mode(true);
    game.start();

    // Two minutes of simulated play at 60 Hz
    let clock = ManualClock::new(0.0);
    let frames = run_headless(&mut game, &clock, 60 * 120);

    let snapshot = game.snapshot();
    log::info!(
        "Demo finished after {} frames: {:?}, score {}, lives {}",
        frames,
        snapshot.phase,
        snapshot.score,
        snapshot.lives
    );
    println!(
        "seed {}: score {} with {} lives left ({} spawned, {} missed)",
        seed, snapshot.score, snapshot.lives, snapshot.stats.spawned, snapshot.stats.missed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
