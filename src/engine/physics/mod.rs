// Physics core: rectangular bodies in a uniform field, bouncing off the
// arena border and each other.
//
// Each frame runs `collision::detect` -> `Resolver::resolve` ->
// `integrator::advance` over every body; `PhysicsWorld::step` does all three.

pub mod body;
pub mod collision;
mod error;
pub mod field;
pub mod integrator;
pub mod resolver;
mod world;

pub use body::{Body, BodyBuilder, Color};
#[allow(unused_imports)]
pub use collision::{CollisionMatrix, EdgeMask, Rect};
pub use error::ConfigError;
pub use field::{Field, FieldBuilder};
#[allow(unused_imports)]
pub use resolver::{Resolver, COOLDOWN_FRAMES};
#[allow(unused_imports)]
pub use world::{BodyIndex, PhysicsWorld, StepReport};
