//! Chaos Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

use chaos_flap::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use chaos_flap::consts::*;
    use chaos_flap::persistence::LocalStorageStore;
    use chaos_flap::renderer::{CanvasSurface, Frame, Surface};
    use chaos_flap::sim::{Simulation, TickInput};
    use chaos_flap::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        settings: Settings,
        surface: CanvasSurface,
        accumulator: f32,
        last_time: f64,
        /// Input gathered since the last tick
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, surface: CanvasSurface) -> Self {
            let settings = Settings::load(&LocalStorageStore::new());
            Self {
                sim: Simulation::new(seed, Tuning::default(), Box::new(LocalStorageStore::new())),
                settings,
                surface,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.sim.step(&self.input);
                super::log_events(self.sim.events());
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let frame = Frame::capture(&mut self.sim, &self.settings);
            self.surface.draw(&frame);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Chaos Flap starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, CanvasSurface::new(ctx))));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        request_animation_frame(game);

        log::info!("Chaos Flap running!");
    }

    fn setup_input_handlers(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        // Space jumps / restarts, Enter restarts after game over
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let input = match event.code().as_str() {
                    "Space" => TickInput {
                        activate: true,
                        restart: false,
                    },
                    "Enter" => TickInput {
                        activate: false,
                        restart: true,
                    },
                    _ => return,
                };
                event.prevent_default();
                game.borrow_mut().input.merge(input);
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.merge(TickInput {
                    activate: true,
                    restart: false,
                });
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.merge(TickInput {
                    activate: true,
                    restart: false,
                });
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

/// Log the interesting events of a step
fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::Scored { score } => log::debug!("Score: {}", score),
            GameEvent::ChaosStarted(effect) => log::info!("Chaos: {:?}", effect),
            GameEvent::GameOver { score, new_best } => log::info!(
                "Run ended with {} point(s){}",
                score,
                if *new_best { " - new best!" } else { "" }
            ),
            _ => {}
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
    env_logger::init();
    log::info!("Chaos Flap (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use chaos_flap::persistence::FileStore;
    use chaos_flap::sim::{Simulation, TickInput};
    use chaos_flap::Tuning;

    /// Ticks to simulate (about five minutes at 60 Hz)
    const DEMO_TICKS: u32 = 60 * 60 * 5;
    const STORE_PATH: &str = "chaos_flap_store.json";

    /// Optional first argument: path to a tuning JSON file
    fn load_tuning() -> Tuning {
        let Some(path) = std::env::args().nth(1) else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning file {}: {} - using defaults", path, e);
                Tuning::default()
            }
        }
    }

    /// Flap when below the middle of the next gap and falling
    fn autopilot(sim: &Simulation) -> TickInput {
        let state = &sim.state;
        let tuning = sim.tuning();
        if !state.is_running() {
            return TickInput {
                activate: false,
                restart: true,
            };
        }

        let bird = &state.bird;
        let target = state
            .pipes
            .as_slice()
            .iter()
            .find(|p| p.trailing_edge(tuning.pipe_width) >= bird.left())
            .map(|p| (p.top + p.bottom) / 2.0)
            .unwrap_or(tuning.screen_height / 2.0);

        let falling = state.params.gravity.current > 0.0 && bird.vel_y > 0.0;
        TickInput {
            activate: falling && bird.center().y > target + bird.size / 2.0,
            restart: false,
        }
    }

    pub fn run() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut sim = Simulation::new(seed, load_tuning(), Box::new(FileStore::new(STORE_PATH)));

        let mut runs = 1u32;
        let mut top_score = 0u64;
        for _ in 0..DEMO_TICKS {
            let input = autopilot(&sim);
            if input.restart {
                runs += 1;
            }
            sim.step(&input);
            top_score = top_score.max(sim.state.score);
            super::log_events(sim.events());
        }

        log::info!(
            "Autopilot finished: {} run(s), top score {}, best ever {}",
            runs,
            top_score,
            sim.state.best_score
        );
    }
}
