//! Particle Bounce entry point
//!
//! Handles platform-specific initialization and runs the frame loop:
//! clear, draw scene, step simulation, draw particles, present.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use particle_bounce::consts::*;
    use particle_bounce::renderer::{
        RenderState, VertexBatch, draw_particles, draw_probe, draw_scene,
    };
    use particle_bounce::sim::{SimState, TickInput, tick};
    use particle_bounce::{RenderError, Settings, Variant, screen_to_sim};

    /// Browser app state
    struct App {
        settings: Settings,
        state: SimState,
        render_state: RenderState,
        batch: VertexBatch,
        input: TickInput,
        last_time: f64,
    }

    impl App {
        fn aspect(&self) -> f32 {
            self.render_state.aspect()
        }

        /// Advance one frame and draw it
        fn frame(&mut self, dt: f32) {
            let dt = dt.clamp(0.0, MAX_FRAME_DT);

            self.batch.clear();
            if self.settings.show_probe {
                draw_probe(&mut self.batch, self.state.scene(), self.input.mouse);
            }
            draw_scene(&mut self.batch, self.state.scene());

            let report = tick(&mut self.state, &self.input, dt);
            if report.expired > 0 && self.state.particles.is_empty() {
                log::info!("All particles expired after {:.1}s", self.state.time);
            }

            draw_particles(&mut self.batch, &self.state);
            self.present();
        }

        fn present(&mut self) {
            match self.render_state.render(&self.batch.vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Rebuild the simulation for the current settings
        fn rebuild(&mut self, seed: u64) {
            self.state = SimState::new(self.settings.sim_config(), self.aspect(), seed);
            log::info!(
                "{} running with seed {} ({} particles)",
                self.settings.variant.as_str(),
                seed,
                self.state.population()
            );
        }

        fn switch_variant(&mut self, variant: Variant) {
            if variant == self.settings.variant {
                return;
            }
            self.settings.variant = variant;
            self.settings.save();
            let seed = self.state.seed;
            self.rebuild(seed);
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state.restart(seed);
            log::info!("Restarted with seed {}", seed);
        }

        fn toggle_probe(&mut self) {
            self.settings.show_probe = !self.settings.show_probe;
            self.settings.save();
            log::info!("Probe: {}", self.settings.show_probe);
        }
    }

    fn find_canvas() -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id("canvas")?
            .dyn_into()
            .ok()
    }

    /// Size the canvas backing store to its CSS size times the pixel ratio
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    async fn create_app(canvas: &HtmlCanvasElement) -> Result<App, RenderError> {
        let (width, height) = fit_canvas(canvas);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = SimState::new(settings.sim_config(), render_state.aspect(), seed);
        log::info!(
            "{} running with seed {} ({} particles)",
            settings.variant.as_str(),
            seed,
            state.population()
        );

        Ok(App {
            settings,
            state,
            render_state,
            batch: VertexBatch::new(),
            input: TickInput::default(),
            last_time: 0.0,
        })
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Particle Bounce starting...");

        let Some(canvas) = find_canvas() else {
            log::error!("No <canvas id=\"canvas\"> element found");
            return;
        };

        let app = match create_app(&canvas).await {
            Ok(app) => Rc::new(RefCell::new(app)),
            Err(e) => {
                log::error!("Graphics setup failed: {}", e);
                return;
            }
        };

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Particle Bounce running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse move: pixel offset to simulation coordinates
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let w = canvas_clone.client_width() as f32;
                let h = canvas_clone.client_height() as f32;
                app.borrow_mut().input.mouse =
                    screen_to_sim(event.offset_x() as f32, event.offset_y() as f32, w, h);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();
                if let Some(variant) = Variant::from_hotkey(&key) {
                    a.switch_variant(variant);
                    return;
                }
                match key.as_str() {
                    "r" | "R" => a.restart(),
                    "p" | "P" => a.toggle_probe(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize: new aspect means new bounds, so the run starts over
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (width, height) = fit_canvas(&canvas_clone);
                let mut a = app.borrow_mut();
                a.render_state.resize(width, height);
                let seed = a.state.seed;
                a.rebuild(seed);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Milliseconds to seconds
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                DEFAULT_DT
            };
            a.last_time = time;

            a.frame(dt);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Particle Bounce (native) starting...");
    log::info!("Windowed mode is web-only; running headless. Use `trunk serve` for the web version");

    let mut settings = particle_bounce::Settings::load();
    // Optional variant name as the first argument
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse() {
            Ok(variant) => settings.variant = variant,
            Err(e) => log::warn!("{}; keeping {}", e, settings.variant.as_str()),
        }
    }
    headless::run(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use particle_bounce::Settings;
    use particle_bounce::consts::*;
    use particle_bounce::renderer::{DrawList, draw_particles, draw_probe, draw_scene};
    use particle_bounce::sim::{SimState, TickInput, TickReport, tick};

    /// Fixed viewport for runs without a window
    const ASPECT: f32 = 16.0 / 9.0;
    const FRAMES_PER_SECOND: u32 = 60;

    fn fresh_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Drive the frame cycle without presenting anything
    pub fn run(settings: Settings) {
        let seed = settings.seed.unwrap_or_else(fresh_seed);
        let mut state = SimState::new(settings.sim_config(), ASPECT, seed);
        log::info!(
            "{} running with seed {} ({} particles)",
            settings.variant.as_str(),
            seed,
            state.population()
        );

        let mut list = DrawList::new();
        // Sweep the probe across the view so the ray test gets exercised too
        let mut input = TickInput::default();
        let mut totals = TickReport::default();

        for frame in 0..HEADLESS_FRAMES {
            let phase = frame as f32 / HEADLESS_FRAMES as f32;
            input.mouse.x = (phase * 2.0 - 1.0) * ASPECT;
            input.mouse.y = 0.5;

            list.clear();
            if settings.show_probe {
                draw_probe(&mut list, state.scene(), input.mouse);
            }
            draw_scene(&mut list, state.scene());
            let report = tick(&mut state, &input, DEFAULT_DT);
            draw_particles(&mut list, &state);

            totals.expired += report.expired;
            totals.edge_hits += report.edge_hits;
            totals.obstacle_hits += report.obstacle_hits;

            if (frame + 1) % FRAMES_PER_SECOND == 0 {
                log::info!(
                    "t={:.0}s population={} edge_hits={} obstacle_hits={} expired={} draws={}",
                    state.time,
                    state.population(),
                    totals.edge_hits,
                    totals.obstacle_hits,
                    totals.expired,
                    list.len()
                );
                totals = TickReport::default();
            }
        }

        log::info!(
            "Finished {} frames, {} particles left",
            state.frame,
            state.population()
        );
    }
}
