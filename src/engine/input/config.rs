// Key bindings for the sandbox actions

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Which key triggers which action. A key maps to at most one action; an
/// action may have several keys.
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
        }
    }
}
