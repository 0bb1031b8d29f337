//! Breakout 3D entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build hands a JSON snapshot to a JS renderer every frame; the
//! native build plays a headless game on autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use breakout3d::Tuning;
    use breakout3d::platform::{Command, FrameClock, InputQueue, command_for_key};
    use breakout3d::sim::{GamePhase, GameState, autopilot_input, tick};
    use breakout3d::ui::{Overlay, RenderSnapshot};

    // Bridge to the scene renderer, which lives in JS
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (typeof window.renderBreakoutFrame === 'function') {
                window.renderBreakoutFrame(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        input: InputQueue,
        /// Last overlay pushed to the DOM, to skip redundant writes
        shown_overlay: Option<Overlay>,
    }

    impl Game {
        fn new(tuning: Tuning) -> Self {
            let clock = FrameClock::new(tuning.tick_dt());
            Self {
                state: GameState::new(tuning),
                clock,
                input: InputQueue::new(),
                shown_overlay: None,
            }
        }

        /// Run the simulation ticks due this frame
        fn update(&mut self, time: f64) {
            let substeps = self.clock.advance(time);
            for _ in 0..substeps {
                let mut input = self.input.take();
                if self.input.autopilot() {
                    input.merge(autopilot_input(&self.state));
                }
                for event in tick(&mut self.state, &input) {
                    log::debug!("tick {}: {:?}", self.state.time_ticks, event);
                }
            }
        }

        /// Hand the current frame to the renderer
        fn render(&self) {
            match RenderSnapshot::capture(&self.state).to_json() {
                Ok(json) => render_frame(&json),
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let overlay = Overlay::from_state(&self.state);
            if self.shown_overlay.as_ref() == Some(&overlay) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&overlay.score_text));
            }

            if let Some(el) = document.get_element_by_id("banner") {
                match &overlay.banner {
                    Some(banner) => {
                        let _ = el.set_attribute("class", "");
                        if let Some(msg) = document.get_element_by_id("banner-message") {
                            msg.set_text_content(Some(banner.message));
                        }
                        if let Some(btn) = document.get_element_by_id("banner-btn") {
                            btn.set_text_content(Some(banner.button));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            self.shown_overlay = Some(overlay);
        }

        fn queue(&mut self, command: Command) {
            self.input.push(command, self.state.phase);
        }
    }

    /// Tuning comes from an optional `data-tuning` JSON attribute on the canvas
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute("data-tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from data-tuning");
                tuning
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Breakout 3D starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        let game = Rc::new(RefCell::new(Game::new(load_tuning(&canvas))));

        setup_input_handlers(&canvas, game.clone());
        setup_banner_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Breakout 3D running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: one paddle step per keydown, no held-key repeat handling
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if let Some(command) = command_for_key(&key) {
                    if key.starts_with("Arrow") || key == " " {
                        event.prevent_default();
                    }
                    game.borrow_mut().queue(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the scene starts a fresh game
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::NotStarted {
                    g.queue(Command::Start);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start / Play Again / Try Again all share one button
    fn setup_banner_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("banner-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != GamePhase::Playing {
                    g.queue(Command::Start);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breakout 3D (native) starting...");
    log::info!("Rendering requires the web build - playing a headless game on autopilot");

    let tuning = load_tuning(std::env::args().nth(1));
    run_headless(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Read tuning from an optional JSON file, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<String>) -> breakout3d::Tuning {
    use breakout3d::Tuning;

    let Some(path) = path else {
        return Tuning::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("{}: {}; using defaults", path, e);
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless(tuning: breakout3d::Tuning) {
    use breakout3d::sim::{GameEvent, GameState, autopilot_input, tick};
    use breakout3d::ui::Overlay;

    // Ten minutes of play
    let max_ticks = tuning.tick_rate_hz as u64 * 600;
    let mut state = GameState::new(tuning);
    let mut paddle_bounces = 0u32;

    while !state.phase.is_over() && state.time_ticks < max_ticks {
        let input = autopilot_input(&state);
        for event in tick(&mut state, &input) {
            if event == GameEvent::PaddleBounce {
                paddle_bounces += 1;
            }
            log::debug!("tick {}: {:?}", state.time_ticks, event);
        }
    }

    let overlay = Overlay::from_state(&state);
    let result = overlay
        .banner
        .map(|b| b.message)
        .unwrap_or("Time limit reached");
    println!(
        "{} {} ({} of {} bricks, {} paddle bounces, {} ticks)",
        result,
        overlay.score_text,
        state.bricks.destroyed_count(),
        state.bricks.len(),
        paddle_bounces,
        state.time_ticks
    );
}
