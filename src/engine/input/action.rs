// Sandbox action definitions and mappings

use winit::keyboard::KeyCode;

/// Represents everything the operator can ask the sandbox to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Freeze or unfreeze the simulation
    TogglePause,
    /// Stop the frame loop after the current frame
    Quit,
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Space), Action::TogglePause),
        (InputSource::key(KeyCode::KeyP), Action::TogglePause),
        (InputSource::key(KeyCode::Escape), Action::Quit),
    ]
}
