use glam::Vec2;

use super::collision::Rect;
use super::error::ConfigError;
use crate::core::math::is_finite;

/// Display color of a body (8-bit RGB, always opaque)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xC0, 0x40);
    pub const BLUE: Color = Color::rgb(0x20, 0x60, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA for vertex data
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// A simulated axis-aligned rectangle with its kinematic state.
///
/// `position` is the center of the rectangle in world units, with the
/// origin at the arena center and +y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Mass (always > 0)
    pub mass: f32,
    /// Rectangle width in world units
    pub width: f32,
    /// Rectangle height in world units
    pub height: f32,

    pub position: Vec2,
    pub velocity: Vec2,
    /// Acceleration from the last integration step (field contribution only)
    pub acceleration: Vec2,

    /// Per-body velocity drift added on top of the field's velocity bias
    pub intrinsic_velocity: Vec2,
    /// Per-body acceleration added on top of the field's acceleration bias
    pub intrinsic_acceleration: Vec2,

    pub color: Color,

    /// mass * |velocity|, refreshed by the integrator. Diagnostics only.
    pub momentum: f32,
}

impl Body {
    /// Bounding rectangle at the current position
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, Vec2::new(self.width, self.height))
    }

    /// Recompute the cached scalar momentum
    pub fn refresh_momentum(&mut self) {
        self.momentum = self.mass * self.velocity.length();
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Check the invariants a body must satisfy before the first frame
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::InvalidMass {
                index,
                mass: self.mass,
            });
        }

        let size_ok = |v: f32| v.is_finite() && v >= 0.0;
        if !size_ok(self.width) || !size_ok(self.height) {
            return Err(ConfigError::InvalidSize {
                index,
                width: self.width,
                height: self.height,
            });
        }

        let vectors = [
            ("position", self.position),
            ("velocity", self.velocity),
            ("acceleration", self.acceleration),
            ("intrinsic velocity", self.intrinsic_velocity),
            ("intrinsic acceleration", self.intrinsic_acceleration),
        ];
        for (what, v) in vectors {
            if !is_finite(v) {
                return Err(ConfigError::NonFiniteBody { index, what });
            }
        }

        Ok(())
    }
}

/// Builder for creating bodies with common configurations
#[derive(Debug, Clone)]
pub struct BodyBuilder {
    mass: f32,
    size: Size,
    position: Vec2,
    velocity: Vec2,
    intrinsic_velocity: Vec2,
    intrinsic_acceleration: Vec2,
    color: Color,
}

#[derive(Debug, Clone, Copy)]
enum Size {
    Fixed(Vec2),
    FromMass(f32),
}

impl BodyBuilder {
    /// Start a body with the given mass, a 1x1 size and no motion
    pub fn new(mass: f32) -> Self {
        Self {
            mass,
            size: Size::Fixed(Vec2::ONE),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            intrinsic_velocity: Vec2::ZERO,
            intrinsic_acceleration: Vec2::ZERO,
            color: Color::default(),
        }
    }

    /// Set a fixed rectangle size
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::Fixed(Vec2::new(width, height));
        self
    }

    /// Derive a square size from the mass: side = scale * sqrt(mass)
    pub fn size_from_mass(mut self, scale: f32) -> Self {
        self.size = Size::FromMass(scale);
        self
    }

    /// Set the initial center position
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the initial velocity
    pub fn velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    /// Set the per-body velocity drift
    pub fn intrinsic_velocity(mut self, x: f32, y: f32) -> Self {
        self.intrinsic_velocity = Vec2::new(x, y);
        self
    }

    /// Set the per-body acceleration bias
    pub fn intrinsic_acceleration(mut self, x: f32, y: f32) -> Self {
        self.intrinsic_acceleration = Vec2::new(x, y);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Build the body
    pub fn build(self) -> Body {
        let size = match self.size {
            Size::Fixed(size) => size,
            Size::FromMass(scale) => Vec2::splat(scale * self.mass.max(0.0).sqrt()),
        };

        let mut body = Body {
            mass: self.mass,
            width: size.x,
            height: size.y,
            position: self.position,
            velocity: self.velocity,
            acceleration: Vec2::ZERO,
            intrinsic_velocity: self.intrinsic_velocity,
            intrinsic_acceleration: self.intrinsic_acceleration,
            color: self.color,
            momentum: 0.0,
        };
        body.refresh_momentum();
        body
    }
}
