//! Sky Hop entry point
//!
//! The web build draws to a canvas and reads keyboard/mouse input. The native
//! build has no window; it runs the autopilot headless and logs the results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use sky_hop::GameConfig;
    use sky_hop::consts::SIM_DT;
    use sky_hop::platform::{Key, KeyboardState};
    use sky_hop::renderer::canvas::CanvasRenderer;
    use sky_hop::renderer::{Frame, Renderer, ScoreDisplay};
    use sky_hop::runner::Runner;
    use sky_hop::sim::{GameEvent, GameState};

    /// Everything the browser callbacks share
    struct Game {
        runner: Runner,
        input: KeyboardState,
        renderer: CanvasRenderer,
        last_time: f64,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.runner.update(dt, &mut self.input);
            for event in self.runner.events() {
                if let GameEvent::GameOver { reason, score } = event {
                    log::info!("Game over ({:?}), score {}", reason, score);
                }
            }

            // The canvas backend is both the renderer and the score line
            let state = &self.runner.state;
            self.renderer.draw(&Frame::from_state(state));
            self.renderer
                .show_score(state.score, state.high_score(), state.phase);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Sky Hop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = GameConfig::default();
        canvas.set_width(config.view_width as u32);
        canvas.set_height(config.view_height as u32);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            runner: Runner::new(state),
            input: KeyboardState::new(),
            renderer: CanvasRenderer::new(&canvas)?,
            last_time: 0.0,
        }));

        setup_input_handlers(&window, &canvas, game.clone());
        request_animation_frame(game);

        log::info!("Sky Hop running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut().input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse position relative to the canvas
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                let x = (event.client_x() as f64 - rect.left()) as f32;
                game.borrow_mut().input.pointer_moved(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_left();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.click();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Held keys never see their keyup once focus is gone
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use sky_hop::GameConfig;
    use sky_hop::consts::{SIM_DT, TICK_RATE_HZ};
    use sky_hop::platform::KeyboardState;
    use sky_hop::renderer::Headless;
    use sky_hop::runner::Runner;
    use sky_hop::sim::{GameEvent, GameState};

    env_logger::init();
    log::info!("Sky Hop (native) starting...");

    // sky-hop [seed] [seconds]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(120);

    let config = match std::env::var_os("SKYHOP_CONFIG").map(PathBuf::from) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };

    let mut runner = Runner::new(state);
    let mut input = KeyboardState::new();
    input.set_autopilot(true);
    let mut renderer = Headless::default();
    let mut display = Headless::default();

    let mut runs = 0u32;
    for _ in 0..seconds * TICK_RATE_HZ {
        runner.frame(SIM_DT, &mut input, &mut renderer, &mut display);
        for event in runner.events() {
            if let GameEvent::GameOver { reason, score } = event {
                runs += 1;
                log::info!("Run {} ended ({:?}) with score {}", runs, reason, score);
            }
        }
    }

    let state = &runner.state;
    println!(
        "seed {}: {} finished runs, current score {}, high score {}",
        seed,
        runs,
        state.score,
        state.high_score()
    );
    for (rank, entry) in state.high_scores.entries.iter().enumerate() {
        println!(
            "{:>2}. {:>6}  ({:.1}s)",
            rank + 1,
            entry.score,
            entry.ticks as f32 * SIM_DT
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
