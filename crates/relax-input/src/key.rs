use serde::{Deserialize, Serialize};

/// Platform virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const SHIFT: KeyCode = KeyCode(0x10);
    pub const C: KeyCode = KeyCode(0x43);
    pub const V: KeyCode = KeyCode(0x56);
    pub const X: KeyCode = KeyCode(0x58);
    pub const Z: KeyCode = KeyCode(0x5A);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

/// Logical gameplay input: the two gameplay keys or the two mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsuKey {
    K1,
    K2,
    M1,
    M2,
}

/// The game's own key bindings for its two gameplay keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub k1: KeyCode,
    pub k2: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            k1: KeyCode::Z,
            k2: KeyCode::X,
        }
    }
}

impl KeyBindings {
    /// Physical key behind a keyboard gameplay key, `None` for mouse buttons.
    pub fn key_for(&self, key: OsuKey) -> Option<KeyCode> {
        match key {
            OsuKey::K1 => Some(self.k1),
            OsuKey::K2 => Some(self.k2),
            OsuKey::M1 | OsuKey::M2 => None,
        }
    }
}
