// Flat-colored rectangle rendering for the arena and its bodies

use glam::{Vec2, Vec4};
use wgpu::util::DeviceExt;

use super::camera::CameraUniform;
use super::Vertex;
use crate::engine::physics::{Body, Rect};

/// Arena background color
const ARENA_FILL: [f32; 4] = [0.0, 0.75, 0.88, 0.94];
/// Arena outline color
const ARENA_FRAME: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
/// Outline thickness as a fraction of the arena's shorter side
const FRAME_THICKNESS: f32 = 0.005;

/// CPU-side triangle list, rebuilt every frame
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl ShapeBatch {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Filled rectangle: four corners, two triangles
    pub fn push_rect(&mut self, rect: &Rect, color: [f32; 4]) {
        let start = self.vertices.len() as u32;
        let color = Vec4::from_array(color);

        let corners = [
            rect.min,
            Vec2::new(rect.max.x, rect.min.y),
            rect.max,
            Vec2::new(rect.min.x, rect.max.y),
        ];
        for corner in corners {
            self.vertices.push(Vertex::new(corner, color));
        }

        self.indices
            .extend_from_slice(&[start, start + 1, start + 2, start, start + 2, start + 3]);
    }

    /// Outline of `rect`, drawn as four bars just outside it
    pub fn push_frame(&mut self, rect: &Rect, thickness: f32, color: [f32; 4]) {
        let t = thickness;
        let (min, max) = (rect.min, rect.max);
        let bars = [
            // Left, right (full height incl. corners)
            Rect {
                min: Vec2::new(min.x - t, min.y - t),
                max: Vec2::new(min.x, max.y + t),
            },
            Rect {
                min: Vec2::new(max.x, min.y - t),
                max: Vec2::new(max.x + t, max.y + t),
            },
            // Bottom, top
            Rect {
                min: Vec2::new(min.x, min.y - t),
                max: Vec2::new(max.x, min.y),
            },
            Rect {
                min: Vec2::new(min.x, max.y),
                max: Vec2::new(max.x, max.y + t),
            },
        ];
        for bar in &bars {
            self.push_rect(bar, color);
        }
    }

    /// Arena background and frame, then every body on top
    pub fn build_scene(&mut self, arena: &Rect, bodies: &[Body]) {
        self.clear();

        let size = arena.size();
        self.push_rect(arena, ARENA_FILL);
        self.push_frame(arena, size.x.min(size.y) * FRAME_THICKNESS, ARENA_FRAME);

        for body in bodies {
            self.push_rect(&body.rect(), body.color.to_rgba());
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

/// Draws a [`ShapeBatch`] with a single triangle-list pipeline
pub struct ShapeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    batch: ShapeBatch,
    index_count: u32,
}

impl ShapeRenderer {
    /// Create a new shape renderer
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_uniform: CameraUniform,
    ) -> Self {
        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        // Create camera uniform buffer
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shape Camera Bind Group Layout"),
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

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shape Camera Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shape Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // Initial buffers, grown on demand
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Vertex Buffer"),
            size: 4096,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Index Buffer"),
            size: 4096,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            batch: ShapeBatch::default(),
            index_count: 0,
        }
    }

    /// Upload a new view-projection matrix
    pub fn update_camera(&self, queue: &wgpu::Queue, camera_uniform: CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));
    }

    /// Rebuild the scene geometry and upload it
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, arena: &Rect, bodies: &[Body]) {
        self.batch.build_scene(arena, bodies);
        self.index_count = self.batch.indices().len() as u32;

        let vertices: &[u8] = bytemuck::cast_slice(self.batch.vertices());
        let indices: &[u8] = bytemuck::cast_slice(self.batch.indices());

        // Resize buffers if needed
        if vertices.len() as u64 > self.vertex_buffer.size() {
            self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Vertex Buffer"),
                contents: vertices,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.vertex_buffer, 0, vertices);
        }

        if indices.len() as u64 > self.index_buffer.size() {
            self.index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Index Buffer"),
                contents: indices,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.index_buffer, 0, indices);
        }
    }

    /// Record draw commands for the prepared geometry
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.index_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
