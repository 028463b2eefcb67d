// Startup-time configuration errors for the physics core

/// Errors raised while validating a field or populating the body set.
///
/// All of these are detected before the first frame runs. Once a
/// [`super::PhysicsWorld`] exists, stepping it cannot fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    #[error("Inverted {axis} boundaries: negative {negative} is not below positive {positive}")]
    InvertedBounds {
        axis: char,
        negative: f32,
        positive: f32,
    },

    #[error("Field parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f32 },

    #[error("Cap `{name}` must be non-negative and finite, got {value}")]
    InvalidCap { name: &'static str, value: f32 },

    #[error("Restitution must lie in [0, 1], got {0}")]
    InvalidRestitution(f32),

    #[error("Body {index}: mass must be positive and finite, got {mass}")]
    InvalidMass { index: usize, mass: f32 },

    #[error("Body {index}: {what} is not finite")]
    NonFiniteBody { index: usize, what: &'static str },

    #[error("Body {index}: size must be non-negative and finite, got {width}x{height}")]
    InvalidSize {
        index: usize,
        width: f32,
        height: f32,
    },

    #[error("Body capacity must be at least 1")]
    ZeroCapacity,

    #[error("Too many bodies: {count} exceeds capacity {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },

    #[error("Failed to allocate storage for {0} bodies")]
    Allocation(usize),
}
