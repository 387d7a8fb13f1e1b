//! Windowed backdrop builder and winit application.
//!
//! `Backdrop` is the front door: configure with method chaining, then call
//! `.run()` to open a window and drive the render loop off winit's redraw
//! events.
//!
//! ```ignore
//! use driftmesh::Backdrop;
//!
//! Backdrop::new()
//!     .with_particle_count(150)
//!     .with_link_radius(120.0)
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::BackdropError;
use crate::field::{DEFAULT_LINK_RADIUS, DEFAULT_PARTICLE_COUNT};
use crate::gpu::GpuSurface;
use crate::render_loop::RenderLoop;
use crate::viewport::{ViewportBinding, WindowViewport};

/// How often (in frames) the window title's FPS readout refreshes.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// An ambient particle backdrop, ready to configure and run.
pub struct Backdrop {
    particle_count: usize,
    link_radius: f32,
    seed: Option<u64>,
    title: String,
}

impl Backdrop {
    /// Create a backdrop with default settings (150 particles, 120px links).
    pub fn new() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            link_radius: DEFAULT_LINK_RADIUS,
            seed: None,
            title: "driftmesh".to_string(),
        }
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the proximity threshold for link lines, in pixels.
    pub fn with_link_radius(mut self, radius: f32) -> Self {
        self.link_radius = radius;
        self
    }

    /// Seed the spawn RNG for a reproducible field layout.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window and run until it is closed. Blocks.
    pub fn run(self) -> Result<(), BackdropError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    config: Backdrop,
    window: Option<Arc<Window>>,
    render_loop: Option<RenderLoop<GpuSurface>>,
}

impl App {
    fn new(config: Backdrop) -> Self {
        Self {
            config,
            window: None,
            render_loop: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuSurface::new(window.clone())) {
            Ok(surface) => {
                let viewport = WindowViewport::new(window.clone());
                let mut rng = match self.config.seed {
                    Some(seed) => SmallRng::seed_from_u64(seed),
                    None => SmallRng::from_entropy(),
                };
                self.render_loop = Some(RenderLoop::start(
                    surface,
                    viewport.size(),
                    self.config.particle_count,
                    self.config.link_radius,
                    &mut rng,
                ));
                window.request_redraw();
            }
            Err(e) => {
                // Degraded state: the backdrop is decorative, so a missing
                // GPU surface disables it without failing the host.
                eprintln!("Backdrop disabled, no drawing surface: {}", e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(render_loop) = &mut self.render_loop {
                    render_loop.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(render_loop) = &mut self.render_loop {
                    render_loop.on_resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(render_loop) = &mut self.render_loop else {
                    return;
                };

                // Cooperative cancellation: a stopped loop does not present
                // and does not re-schedule.
                if !render_loop.frame() {
                    return;
                }

                match render_loop.surface_mut().present() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (width, height) = render_loop.surface().size();
                        render_loop.on_resize(width, height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                    Err(e) => eprintln!("Render error: {:?}", e),
                }

                if let Some(window) = &self.window {
                    if render_loop.time().frame() % TITLE_REFRESH_FRAMES == 0 {
                        window.set_title(&format!(
                            "{} — {:.0} fps",
                            self.config.title,
                            render_loop.time().fps()
                        ));
                    }
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
