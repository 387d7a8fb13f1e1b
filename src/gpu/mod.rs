//! wgpu-backed implementation of the drawing surface.
//!
//! `GpuSurface` batches the frame's `fill_circle`/`stroke_line` calls into
//! instance queues and flushes them in [`GpuSurface::present`]: one render
//! pass that clears to the backdrop color, draws all circles, then draws
//! all link lines on top. Everything works in pixel coordinates with the
//! origin at the top-left, matching the simulation.

mod circles;
mod lines;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use winit::window::Window;

use crate::error::GpuError;
use crate::surface::Surface;
use crate::visuals::Color;
use circles::{CircleInstance, CirclePass};
use lines::{LineInstance, LinePass};

/// Backdrop clear color (dark blue-grey, content sits on top of it).
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

/// Starting instance-buffer capacities; buffers grow on demand.
const INITIAL_CIRCLES: usize = 256;
const INITIAL_LINES: usize = 2048;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    screen: [f32; 2],
    _padding: [f32; 2],
}

/// A [`Surface`] that rasterizes through wgpu onto a winit window.
pub struct GpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    circle_pass: CirclePass,
    line_pass: LinePass,
    circle_queue: Vec<CircleInstance>,
    line_queue: Vec<LineInstance>,
    global_alpha: f32,
}

impl GpuSurface {
    /// Acquire adapter, device and swapchain for `window`.
    ///
    /// Failure here is the one degraded state the backdrop knows: the
    /// caller logs it and simply never schedules a frame.
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let globals = Globals {
            screen: [config.width as f32, config.height as f32],
            _padding: [0.0; 2],
        };
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&globals_buffer, 0, bytemuck::bytes_of(&globals));

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let circle_pass = CirclePass::new(&device, &globals_layout, surface_format, INITIAL_CIRCLES);
        let line_pass = LinePass::new(&device, &globals_layout, surface_format, INITIAL_LINES);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bind_group,
            circle_pass,
            line_pass,
            circle_queue: Vec::with_capacity(INITIAL_CIRCLES),
            line_queue: Vec::with_capacity(INITIAL_LINES),
            global_alpha: 1.0,
        })
    }

    /// Current surface pixel size.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn write_globals(&self) {
        let globals = Globals {
            screen: [self.config.width as f32, self.config.height as f32],
            _padding: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    /// Flush the queued draws to the screen.
    ///
    /// The caller handles `SurfaceError::Lost` by resizing to the current
    /// dimensions and `OutOfMemory` by exiting, as usual for a swapchain.
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.circle_pass
            .upload(&self.device, &self.queue, &self.circle_queue);
        self.line_pass
            .upload(&self.device, &self.queue, &self.line_queue);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Circles first, link lines on top.
            self.circle_pass.draw(
                &mut render_pass,
                &self.globals_bind_group,
                self.circle_queue.len() as u32,
            );
            self.line_pass.draw(
                &mut render_pass,
                &self.globals_bind_group,
                self.line_queue.len() as u32,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Surface for GpuSurface {
    fn clear(&mut self) {
        self.circle_queue.clear();
        self.line_queue.clear();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        let rgb = color.rgb();
        self.circle_queue.push(CircleInstance {
            center: center.to_array(),
            radius,
            alpha: alpha * self.global_alpha,
            color: rgb.to_array(),
            _pad: 0.0,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32, width: f32) {
        let rgb = color.rgb();
        self.line_queue.push(LineInstance {
            from: from.to_array(),
            to: to.to_array(),
            color: rgb.to_array(),
            alpha: alpha * self.global_alpha,
            width,
            _pad: [0.0; 3],
        });
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.write_globals();
        }
    }
}
