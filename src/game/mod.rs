// Sandbox layer
//
// - `scenario`: Startup configuration (window, frame rate, field, bodies)
// - `simulation`: Per-frame orchestration of input, physics and rendering

pub mod scenario;
pub mod simulation;

#[allow(unused_imports)]
pub use scenario::{SandboxConfig, ScenarioError};
pub use simulation::Simulation;
