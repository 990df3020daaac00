//! Neon Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use neon_drift::audio::EngineAudio;
    use neon_drift::camera::FollowCamera;
    use neon_drift::renderer::{RenderState, shapes};
    use neon_drift::sim::{FrameOutput, InputState, SimState, tick};
    use neon_drift::{Settings, world};

    /// Game instance holding all state
    struct Game {
        sim: SimState,
        camera: FollowCamera,
        render_state: Option<RenderState>,
        audio: Option<EngineAudio>,
        input: InputState,
        settings: Settings,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, aspect: f32) -> Self {
            Self {
                sim: SimState::new(seed, settings.max_particles()),
                camera: FollowCamera::new(aspect),
                render_state: None,
                audio: None,
                input: InputState::default(),
                settings,
            }
        }

        /// One frame: sim tick (or menu orbit), camera, sinks.
        fn update(&mut self, time: f64) {
            if self.sim.started() {
                if let Some(output) = tick(&mut self.sim, &self.input) {
                    if let Some(audio) = &self.audio {
                        audio.apply(&output);
                    }
                    update_hud(&output);
                }
                self.camera.follow(&self.sim.vehicle);
            } else {
                // Menu phase: no physics, just the orbiting camera
                self.camera.orbit(time);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let dynamic = shapes::build_dynamic(&self.sim);
            if let Some(render_state) = &mut self.render_state {
                match render_state.render(self.camera.view_proj(), &dynamic) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Start-button action: flip the one-way latch and bring up audio.
        fn start_session(&mut self) {
            if self.sim.started() {
                return;
            }
            let audio = EngineAudio::new(self.settings.master_volume);
            audio.resume();
            self.audio = Some(audio);
            self.sim.start();
        }
    }

    /// Update the speed readout in the DOM
    fn update_hud(output: &FrameOutput) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("speed-val") {
            el.set_text_content(Some(&output.hud_speed.to_string()));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let aspect = client_w as f32 / client_h.max(1) as f32;
        let game = Rc::new(RefCell::new(Game::new(seed, settings, aspect)));
        log::info!("Game initialized with seed: {}", seed);

        // Static city geometry, built once
        let city = world::build_city(seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, &city).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());
        setup_resize_handler(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Neon Drift running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                game.borrow_mut().input.set_key(&key, true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                game.borrow_mut().input.set_key(&key, false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("overlay") {
                    let _ = el.set_attribute("class", "hidden");
                }
                if let Some(el) = document.get_element_by_id("ui-container") {
                    let _ = el.set_attribute("class", "");
                }
                game.borrow_mut().start_session();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No start button found - starting immediately");
            game.borrow_mut().start_session();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.camera
                .set_aspect(client_w as f32 / client_h.max(1) as f32);
            if let Some(render_state) = &mut g.render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
    env_logger::init();
    log::info!("Neon Drift (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use neon_drift::Settings;
    use neon_drift::sim::{InputState, SimState, tick};

    let settings = Settings::load();
    let mut state = SimState::new(0xD21F7, settings.max_particles());
    state.start();

    let mut input = InputState::default();
    input.set_key("w", true);
    input.set_key("shift", true);

    let mut last = None;
    for _ in 0..300 {
        last = tick(&mut state, &input);
    }
    let flooring = last.expect("session is started");
    println!(
        "after 300 nitro frames: speed {:.3}, {} km/h on the dial, {} live particles",
        state.vehicle.speed,
        flooring.hud_speed,
        state.particles.live_count()
    );

    input.set_key("w", false);
    input.set_key("shift", false);
    input.set_key(" ", true);
    for _ in 0..120 {
        last = tick(&mut state, &input);
    }
    let coasted = last.expect("session is started");
    println!(
        "after 120 drift frames: speed {:.3}, dial {}, {} live particles",
        state.vehicle.speed,
        coasted.hud_speed,
        state.particles.live_count()
    );
    assert!(state.vehicle.speed.abs() < 0.01, "drift should bleed speed off");
    println!("smoke run ok");
}
