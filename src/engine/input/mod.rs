// Input handling system
//
// Keyboard events are mapped to sandbox actions and folded into a
// `FrameInput` snapshot once per frame, before the physics runs.
//
// ## Architecture
//
// - `action`: Sandbox actions and default key bindings
// - `config`: Fixed key-to-action binding table
// - `manager`: Tracks key state and produces the per-frame snapshot
//
// ## Usage Example
//
// ```rust
// use engine::input::InputManager;
//
// let mut input = InputManager::new();
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // Once per frame
// let frame_input = input.snapshot();
// ```

pub mod action;
pub mod config;
pub mod manager;

// Re-export commonly used types
#[allow(unused_imports)]
pub use action::{Action, InputSource};
#[allow(unused_imports)]
pub use config::InputConfig;
pub use manager::{FrameInput, InputManager};
