//! Host-agnostic input events.
//!
//! This is the default input type forwarded to states. Hosts with their own
//! event type can use it directly as the machine's `E` parameter instead.

use serde::{Deserialize, Serialize};

/// Platform key code as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    /// Relative pointer motion since the last event.
    MouseMotion { dx: f32, dy: f32 },
    /// A named, already-mapped action (e.g. "jump").
    Action(String),
}

impl InputEvent {
    /// Whether the event comes from the keyboard.
    pub fn is_key(&self) -> bool {
        matches!(self, Self::KeyPressed(_) | Self::KeyReleased(_))
    }

    pub fn is_action(&self, name: &str) -> bool {
        matches!(self, Self::Action(action) if action == name)
    }
}
