//! Sidescroller entry point
//!
//! Browser builds drive the simulation from requestAnimationFrame. Native
//! builds run one headless game with a simple autopilot and log the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use sidescroller::highscores::LocalStorage;
    use sidescroller::input::InputTracker;
    use sidescroller::renderer::{RenderError, RenderState};
    use sidescroller::{Driver, FrameOutcome, KeyMap, SimulationConfig, Variant};

    /// Game instance holding all state
    struct Game {
        driver: Driver<LocalStorage>,
        render_state: Option<RenderState>,
        input: InputTracker,
    }

    impl Game {
        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.driver.snapshot();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&snapshot) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    /// `?variant=flappy` style selection, platformer otherwise
    fn variant_from_query(window: &web_sys::Window) -> Variant {
        let search = window.location().search().unwrap_or_default();
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "variant")
            .and_then(|(_, value)| Variant::from_str(value))
            .unwrap_or_default()
    }

    async fn attach_renderer(
        document: &web_sys::Document,
        window: &web_sys::Window,
        pixels_per_unit: f32,
    ) -> Result<RenderState, RenderError> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| RenderError::NoCanvas("canvas".to_string()))?;

        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, pixels_per_unit * dpr as f32).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let variant = variant_from_query(&window);
        let config = SimulationConfig::for_variant(variant);
        let seed = js_sys::Date::now() as u64;
        let pixels_per_unit = config.pixels_per_unit;

        let driver = match Driver::new(config, seed, LocalStorage) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Could not build level: {}", e);
                return;
            }
        };

        // No display surface is not fatal, the run continues headless
        let render_state = match attach_renderer(&document, &window, pixels_per_unit).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::warn!("Rendering disabled: {}", e);
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            driver,
            render_state,
            input: InputTracker::new(KeyMap::default()),
        }));
        game.borrow_mut().render();

        setup_input_handlers(&window, game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer (mouse, pen and touch)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.pointer_down();
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        for name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.pointer_up();
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys held while focus leaves never get a keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
        let outcome = {
            let mut g = game.borrow_mut();
            let input = g.input.state();
            let outcome = g.driver.frame(time / 1000.0, &input);
            if outcome.needs_redraw() {
                g.render();
            }
            outcome
        };

        // Death is terminal: stop scheduling frames
        if let FrameOutcome::Finished { score, new_best } = outcome {
            log::info!("Game over with score {} (new best: {})", score, new_best);
            return;
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sidescroller::sim::GameState;
    use sidescroller::{Driver, InputState, MemoryStore, SimulationConfig, Variant};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let variant = match args.next() {
        Some(name) => match Variant::from_str(&name) {
            Some(variant) => variant,
            None => {
                log::error!(
                    "Unknown variant `{}`, expected one of: {}",
                    name,
                    Variant::ALL.map(|v| v.as_str()).join(", ")
                );
                std::process::exit(2);
            }
        },
        None => Variant::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    let config = SimulationConfig::for_variant(variant);
    let mut driver = match Driver::new(config, seed, MemoryStore::default()) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("Could not build level: {}", e);
            std::process::exit(1);
        }
    };

    // Flappy: flap while below the next gap's centre. Otherwise run right
    // and jump off every landing.
    let autopilot = |state: &GameState| -> InputState {
        let body = &state.player.body;
        match variant {
            Variant::Flappy => {
                let target = state
                    .world
                    .pipes
                    .iter()
                    .find(|p| p.x() + p.gate.body.width() > body.left())
                    .map(|p| p.gate.body.pos.y + p.gate.body.height() * 0.5)
                    .unwrap_or(state.world.bounds.height * 0.5);
                InputState {
                    up: body.bottom() > target && body.vel.y >= 0.0,
                    ..InputState::default()
                }
            }
            _ => InputState {
                up: state.grounded,
                right: true,
                ..InputState::default()
            },
        }
    };

    let frame_interval = 1.0 / 60.0;
    let max_frames = 60 * 120;
    match driver.run_headless(frame_interval, max_frames, autopilot) {
        Some(score) => log::info!(
            "{} run ended after {} ticks: score {}, cause {:?}",
            variant.as_str(),
            driver.state().time_ticks,
            score,
            driver.state().death
        ),
        None => log::info!(
            "{} run still alive after {} frames: score {}",
            variant.as_str(),
            max_frames,
            driver.state().score
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
