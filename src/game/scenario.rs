// Startup configuration for the sandbox

use crate::engine::physics::{Body, BodyBuilder, Color, ConfigError, Field, FieldBuilder};

/// Default window size, in screen pixels
pub const WINDOW_WIDTH: u32 = 1152;
pub const WINDOW_HEIGHT: u32 = 648;

/// Simulation frames per second
pub const FRAMES_PER_SECOND: u32 = 240;

/// Share of the window the arena covers
const ARENA_SCALE: f32 = 0.8;

/// Side length of a body of unit mass, in world units
const UNIT_MASS_SIDE: f32 = 24.0;

/// Errors in the startup configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Physics(#[from] ConfigError),

    #[error("Frame rate must be positive")]
    InvalidFrameRate,

    #[error("Window size must be non-zero, got {0}x{1}")]
    InvalidWindow(u32, u32),

    #[error("Scenario has no bodies")]
    NoBodies,
}

/// Everything needed before the first frame
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub frames_per_second: u32,
    pub field: Field,
    pub bodies: Vec<Body>,
}

impl SandboxConfig {
    /// Check the whole configuration; called once at startup
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.frames_per_second == 0 {
            return Err(ScenarioError::InvalidFrameRate);
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ScenarioError::InvalidWindow(
                self.window_width,
                self.window_height,
            ));
        }
        if self.bodies.is_empty() {
            return Err(ScenarioError::NoBodies);
        }

        self.field.validate()?;
        for (index, body) in self.bodies.iter().enumerate() {
            body.validate(index)?;
        }
        Ok(())
    }
}

/// The default field: gentle gravity over an arena sized to the window
pub fn default_field() -> Field {
    let width = WINDOW_WIDTH as f32 * ARENA_SCALE;
    let height = WINDOW_HEIGHT as f32 * ARENA_SCALE;

    FieldBuilder::new()
        .timestep(1.0 / FRAMES_PER_SECOND as f32)
        .acceleration_bias(0.0, -150.0)
        .arena(width, height)
        .max_velocity(900.0, 900.0)
        .max_acceleration(1000.0, 1000.0)
        .max_position(width, height)
        .restitution(1.0)
        .build_unchecked()
}

/// Three bodies of different masses, sized by mass
pub fn default_bodies() -> Vec<Body> {
    vec![
        BodyBuilder::new(1.0)
            .size_from_mass(UNIT_MASS_SIDE)
            .position(-250.0, 100.0)
            .velocity(220.0, 40.0)
            .color(Color::RED)
            .build(),
        BodyBuilder::new(4.0)
            .size_from_mass(UNIT_MASS_SIDE)
            .position(0.0, 0.0)
            .velocity(-80.0, 120.0)
            .color(Color::GREEN)
            .build(),
        BodyBuilder::new(9.0)
            .size_from_mass(UNIT_MASS_SIDE)
            .position(250.0, -80.0)
            .velocity(-150.0, 0.0)
            .intrinsic_acceleration(0.0, 20.0)
            .color(Color::BLUE)
            .build(),
    ]
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            title: "Rusted Sandbox".to_string(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            frames_per_second: FRAMES_PER_SECOND,
            field: default_field(),
            bodies: default_bodies(),
        }
    }
}
