// Camera and viewport system for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::engine::physics::Rect;

/// Fraction of the viewport left empty around a fitted rectangle
const FIT_MARGIN: f32 = 0.05;

/// 2D orthographic camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec2,
    /// Camera zoom level (1.0 = one world unit per pixel)
    pub zoom: f32,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position,
            zoom: 1.0,
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        // Calculate orthographic projection bounds based on zoom
        let half_width = (self.viewport_width / 2.0) / self.zoom;
        let half_height = (self.viewport_height / 2.0) / self.zoom;

        self.view_proj = Mat4::orthographic_rh(
            self.position.x - half_width,
            self.position.x + half_width,
            self.position.y - half_height,
            self.position.y + half_height,
            -100.0, // Near plane
            100.0,  // Far plane
        );
    }

    /// Set camera zoom
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.01);
        self.update_view_proj();
    }

    /// Center on `rect` and zoom so it fills the viewport with a small margin
    pub fn fit(&mut self, rect: &Rect) {
        let size = rect.size();
        self.position = rect.center();

        let padded = 1.0 + 2.0 * FIT_MARGIN;
        let zoom_x = self.viewport_width / (size.x * padded);
        let zoom_y = self.viewport_height / (size.y * padded);
        self.set_zoom(zoom_x.min(zoom_y));
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
