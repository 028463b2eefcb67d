// Rendering system using wgpu

mod camera;
mod shapes;
mod vertex;

#[allow(unused_imports)]
pub use camera::{Camera, CameraUniform};
pub use shapes::ShapeRenderer;
#[allow(unused_imports)]
pub use vertex::Vertex;

use anyhow::Result;
use glam::Vec2;
use log::{info, warn};
use std::sync::Arc;
use winit::window::Window;

use crate::engine::physics::{Body, Rect};

/// Anything that can draw one frame of the sandbox.
///
/// Called once per frame after integration. Errors are reported to the
/// caller, which logs them; they never stop the simulation.
pub trait SceneRenderer {
    fn draw(&mut self, arena: &Rect, bodies: &[Body]) -> Result<()>;
}

/// Main renderer responsible for initializing wgpu and drawing the scene
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    camera: Camera,
    arena: Rect,
    shape_renderer: ShapeRenderer,
}

impl Renderer {
    /// Create a new renderer for the given window, framing `arena`
    pub async fn new(window: Arc<Window>, arena: Rect) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        // Create camera framing the arena
        let mut camera = Camera::new(Vec2::ZERO, config.width as f32, config.height as f32);
        camera.fit(&arena);

        let shape_renderer = ShapeRenderer::new(&device, surface_format, CameraUniform::new(&camera));

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            camera,
            arena,
            shape_renderer,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera
                .resize(new_size.width as f32, new_size.height as f32);
            self.camera.fit(&self.arena);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Render a frame
    pub fn render(&mut self, bodies: &[Body]) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.resize(self.size);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.shape_renderer
            .update_camera(&self.queue, CameraUniform::new(&self.camera));
        self.shape_renderer
            .prepare(&self.device, &self.queue, &self.arena, bodies);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.shape_renderer.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl SceneRenderer for Renderer {
    fn draw(&mut self, arena: &Rect, bodies: &[Body]) -> Result<()> {
        if *arena != self.arena {
            self.arena = *arena;
            self.camera.fit(arena);
        }
        self.render(bodies)
    }
}
