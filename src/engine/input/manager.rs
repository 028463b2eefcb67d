// Input manager - turns key events into a per-frame snapshot

use super::action::{Action, InputSource};
use super::config::InputConfig;
use log::info;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Plain flags the simulation reads once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Skip detect/resolve/integrate this frame
    pub pause: bool,
    /// Stop the frame loop after this frame
    pub quit: bool,
}

/// Tracks key state between frames
pub struct InputManager {
    /// Key bindings
    config: InputConfig,

    /// Actions currently held down; a held key does not re-trigger
    pressed: HashSet<Action>,

    /// Latched pause state, flipped by `Action::TogglePause`
    paused: bool,

    /// Latched quit request
    quit_requested: bool,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self {
            config: InputConfig::default(),
            pressed: HashSet::new(),
            paused: false,
            quit_requested: false,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            match event.state {
                ElementState::Pressed => {
                    if !event.repeat {
                        self.press(source);
                    }
                }
                ElementState::Released => self.release(source),
            }
        }
    }

    /// Register a press of `source`
    pub fn press(&mut self, source: InputSource) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };

        if self.pressed.insert(action) {
            match action {
                Action::TogglePause => {
                    self.paused = !self.paused;
                    info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
                }
                Action::Quit => self.request_quit(),
            }
        }
    }

    /// Register a release of `source`
    pub fn release(&mut self, source: InputSource) {
        if let Some(action) = self.config.get_action(source) {
            self.pressed.remove(&action);
        }
    }

    /// Ask the loop to stop (e.g. the window was closed)
    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            info!("Quit requested");
            self.quit_requested = true;
        }
    }

    /// Current flags for this frame
    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            pause: self.paused,
            quit: self.quit_requested,
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
