//! Dune Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use dune_dash::audio::{AudioManager, SoundEffect};
    use dune_dash::renderer::{Palette, RenderState};
    use dune_dash::sim::{GameState, Snapshot, TickInput};
    use dune_dash::{FrameDriver, FrameScheduler, Settings};

    /// `requestAnimationFrame` with a single long-lived callback
    struct RafScheduler {
        callback: Option<js_sys::Function>,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> i32 {
            let (Some(window), Some(callback)) = (web_sys::window(), self.callback.as_ref()) else {
                log::warn!("No frame callback installed");
                return 0;
            };
            window.request_animation_frame(callback).unwrap_or(0)
        }

        fn cancel_frame(&mut self, handle: i32) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        driver: FrameDriver<RafScheduler>,
        render_state: Option<RenderState>,
        input: TickInput,
        audio: AudioManager,
        settings: Settings,
        palette: Palette,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);

            Self {
                state: GameState::new(seed),
                driver: FrameDriver::new(RafScheduler { callback: None }),
                render_state: None,
                input: TickInput {
                    autopilot: settings.autopilot,
                    ..Default::default()
                },
                audio,
                palette: settings.palette(),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// The one action button: jump while playing, otherwise start/restart
        fn action(&mut self) {
            self.audio.resume();
            if self.state.is_playing() {
                self.input.jump = true;
            } else {
                self.input.start = true;
                self.driver.start();
            }
        }

        fn toggle_autopilot(&mut self) {
            self.input.autopilot = self.settings.toggle_autopilot();
            self.settings.save();
            log::info!("Autopilot: {}", self.input.autopilot);
        }

        fn toggle_high_contrast(&mut self) {
            self.palette = self.settings.toggle_high_contrast();
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.set_palette(&self.palette);
            }
            self.settings.save();
            log::info!("High contrast: {}", self.settings.high_contrast);

            // Repaint now in case the driver is idle
            let snapshot = self.state.snapshot();
            self.render(&snapshot);
        }

        /// Frame callback body: tick, play cues, draw, refresh HUD
        fn frame(&mut self, time: f64) {
            let ticked = self.driver.on_frame(time, &mut self.state, &self.input);
            if !ticked {
                return;
            }

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.start = false;

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }

            self.track_fps(time);
            let snapshot = self.state.snapshot();
            self.render(&snapshot);
            self.update_hud(&snapshot);
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (59_000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render a snapshot
        fn render(&mut self, snapshot: &Snapshot) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.draw(snapshot, &self.palette) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self, snapshot: &Snapshot) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let set_text = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };
            let set_visible = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };

            set_text("#hud-score .hud-value", &format!("{:05}", snapshot.display_score));
            set_text("#hud-best .hud-value", &format!("{:05}", snapshot.best_score));
            set_text("#hud-speed .hud-value", &format!("{:.1}", snapshot.speed));
            set_visible("hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                set_text("#hud-fps .hud-value", &self.fps.to_string());
            }
            set_visible("hud-autopilot", self.input.autopilot);

            set_visible("start-prompt", snapshot.is_idle());
            set_visible("game-over", snapshot.is_game_over);
            if snapshot.is_game_over {
                set_text("#final-score", &snapshot.display_score.to_string());
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Dune Dash starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // One persistent frame callback, handed to the scheduler
        {
            let loop_game = game.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                loop_game.borrow_mut().frame(time);
            });
            game.borrow_mut().driver.scheduler_mut().callback =
                Some(closure.into_js_value().unchecked_into());
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let palette = game.borrow().palette;
                        match RenderState::new(surface, &adapter, width, height, &palette).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {:?}", e),
                        }
                    }
                    Err(e) => log::error!("No suitable GPU adapter: {:?}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {:?}", e),
        }

        // Idle frame so the playfield shows before the first start
        {
            let mut g = game.borrow_mut();
            let snapshot = g.state.snapshot();
            g.render(&snapshot);
            g.update_hud(&snapshot);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_focus_handlers(game);

        log::info!("Dune Dash ready - press space to run");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" | "w" | "W" | "Enter" => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.action();
                        }
                    }
                    "a" | "A" => g.toggle_autopilot(),
                    "h" | "H" => g.toggle_high_contrast(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer (mouse, touch, pen)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().action();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Window blur (click outside, tab switch)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                    log::info!("Muted (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus restores the configured mute state
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Safety valve for the headless run
#[cfg(not(target_arch = "wasm32"))]
const MAX_HEADLESS_TICKS: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dune_dash::audio::{AudioManager, SoundEffect};
    use dune_dash::consts::FRAME_MS;
    use dune_dash::sim::{GameState, TickInput};
    use dune_dash::{FrameDriver, ManualScheduler};

    env_logger::init();
    log::info!("Dune Dash (native) starting...");
    log::info!("Native mode runs one headless autopilot round - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(2024);

    let mut state = GameState::new(seed);
    let mut driver = FrameDriver::new(ManualScheduler::new());
    let audio = AudioManager::new();
    let mut input = TickInput {
        start: true,
        autopilot: true,
        ..Default::default()
    };

    driver.start();
    let mut now = 0.0;
    while driver.pump(now, &mut state, &input) {
        input.start = false;
        for event in state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                audio.play(effect);
            }
        }
        if state.ticks >= MAX_HEADLESS_TICKS {
            log::info!("Reached {} ticks, stopping", MAX_HEADLESS_TICKS);
            break;
        }
        now += FRAME_MS;
    }
    driver.stop();

    let snapshot = state.snapshot();
    println!(
        "seed {}: score {} after {} ticks, final speed {:.2}",
        seed, snapshot.display_score, snapshot.ticks, snapshot.speed
    );
    match serde_json::to_string(&snapshot) {
        Ok(json) => log::debug!("Final snapshot: {}", json),
        Err(e) => log::warn!("Snapshot serialization failed: {}", e),
    }
}
