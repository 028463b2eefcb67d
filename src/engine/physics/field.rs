use glam::Vec2;

use super::collision::Rect;
use super::error::ConfigError;

/// Global forces and limits applied uniformly to every body.
///
/// A field is validated once when the world is created and is not mutated
/// while frames run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    /// Fixed timestep in seconds
    pub dt: f32,
    /// Added to every body's velocity each step
    pub velocity_bias: Vec2,
    /// Acceleration every body is set to each step
    pub acceleration_bias: Vec2,

    /// Arena boundaries
    pub pos_x: f32,
    pub neg_x: f32,
    pub pos_y: f32,
    pub neg_y: f32,

    /// Per-axis magnitude caps
    pub max_velocity: Vec2,
    pub max_acceleration: Vec2,
    pub max_position: Vec2,

    /// Coefficient of restitution (1.0 = perfectly elastic)
    pub restitution: f32,
}

impl Field {
    /// The arena border rectangle
    pub fn border(&self) -> Rect {
        Rect {
            min: Vec2::new(self.neg_x, self.neg_y),
            max: Vec2::new(self.pos_x, self.pos_y),
        }
    }

    /// Reject fields that would integrate garbage
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(self.dt));
        }

        let finite = [
            ("velocity_bias.x", self.velocity_bias.x),
            ("velocity_bias.y", self.velocity_bias.y),
            ("acceleration_bias.x", self.acceleration_bias.x),
            ("acceleration_bias.y", self.acceleration_bias.y),
            ("pos_x", self.pos_x),
            ("neg_x", self.neg_x),
            ("pos_y", self.pos_y),
            ("neg_y", self.neg_y),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter { name, value });
            }
        }

        if self.neg_x >= self.pos_x {
            return Err(ConfigError::InvertedBounds {
                axis: 'x',
                negative: self.neg_x,
                positive: self.pos_x,
            });
        }
        if self.neg_y >= self.pos_y {
            return Err(ConfigError::InvertedBounds {
                axis: 'y',
                negative: self.neg_y,
                positive: self.pos_y,
            });
        }

        let caps = [
            ("max_velocity.x", self.max_velocity.x),
            ("max_velocity.y", self.max_velocity.y),
            ("max_acceleration.x", self.max_acceleration.x),
            ("max_acceleration.y", self.max_acceleration.y),
            ("max_position.x", self.max_position.x),
            ("max_position.y", self.max_position.y),
        ];
        for (name, value) in caps {
            // Infinite caps are allowed and mean "unbounded"
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::InvalidCap { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }

        Ok(())
    }
}

impl Default for Field {
    fn default() -> Self {
        FieldBuilder::new().build_unchecked()
    }
}

/// Builder for [`Field`], validating on [`FieldBuilder::build`]
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// A 60 Hz field over a 100x100 arena with no forces and no caps
    pub fn new() -> Self {
        Self {
            field: Field {
                dt: 1.0 / 60.0,
                velocity_bias: Vec2::ZERO,
                acceleration_bias: Vec2::ZERO,
                pos_x: 50.0,
                neg_x: -50.0,
                pos_y: 50.0,
                neg_y: -50.0,
                max_velocity: Vec2::splat(f32::INFINITY),
                max_acceleration: Vec2::splat(f32::INFINITY),
                max_position: Vec2::splat(f32::INFINITY),
                restitution: 1.0,
            },
        }
    }

    pub fn timestep(mut self, dt: f32) -> Self {
        self.field.dt = dt;
        self
    }

    pub fn velocity_bias(mut self, x: f32, y: f32) -> Self {
        self.field.velocity_bias = Vec2::new(x, y);
        self
    }

    pub fn acceleration_bias(mut self, x: f32, y: f32) -> Self {
        self.field.acceleration_bias = Vec2::new(x, y);
        self
    }

    /// Set all four arena boundaries
    pub fn bounds(mut self, neg_x: f32, pos_x: f32, neg_y: f32, pos_y: f32) -> Self {
        self.field.neg_x = neg_x;
        self.field.pos_x = pos_x;
        self.field.neg_y = neg_y;
        self.field.pos_y = pos_y;
        self
    }

    /// Arena of the given size centered on the origin
    pub fn arena(self, width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        self.bounds(-hw, hw, -hh, hh)
    }

    pub fn max_velocity(mut self, x: f32, y: f32) -> Self {
        self.field.max_velocity = Vec2::new(x, y);
        self
    }

    pub fn max_acceleration(mut self, x: f32, y: f32) -> Self {
        self.field.max_acceleration = Vec2::new(x, y);
        self
    }

    pub fn max_position(mut self, x: f32, y: f32) -> Self {
        self.field.max_position = Vec2::new(x, y);
        self
    }

    /// Set the coefficient of restitution (1.0 = perfectly elastic)
    pub fn restitution(mut self, restitution: f32) -> Self {
        self.field.restitution = restitution;
        self
    }

    /// Validate and build the field
    pub fn build(self) -> Result<Field, ConfigError> {
        self.field.validate()?;
        Ok(self.field)
    }

    /// Build without validation (validated later by the world)
    pub fn build_unchecked(self) -> Field {
        self.field
    }
}

impl Default for FieldBuilder {
    fn default() -> Self {
        Self::new()
    }
}
