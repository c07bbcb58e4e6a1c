use std::collections::HashSet;

use crate::{InputActuator, KeyCode, MouseButton};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    PointerDown(MouseButton),
    PointerUp(MouseButton),
}

impl InputEvent {
    pub fn is_press(&self) -> bool {
        matches!(self, InputEvent::KeyDown(_) | InputEvent::PointerDown(_))
    }
}

/// Actuator that records every call and tracks what is currently held.
///
/// `user_held` simulates keys the user is physically holding.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    events: Vec<InputEvent>,
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    pub user_held: HashSet<KeyCode>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn presses(&self) -> Vec<InputEvent> {
        self.events.iter().copied().filter(InputEvent::is_press).collect()
    }

    pub fn any_held(&self) -> bool {
        !self.keys_down.is_empty() || !self.buttons_down.is_empty()
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

impl InputActuator for RecordingActuator {
    fn press_key(&mut self, key: KeyCode) {
        self.events.push(InputEvent::KeyDown(key));
        self.keys_down.insert(key);
    }

    fn release_key(&mut self, key: KeyCode) {
        self.events.push(InputEvent::KeyUp(key));
        self.keys_down.remove(&key);
    }

    fn press_pointer_button(&mut self, button: MouseButton) {
        self.events.push(InputEvent::PointerDown(button));
        self.buttons_down.insert(button);
    }

    fn release_pointer_button(&mut self, button: MouseButton) {
        self.events.push(InputEvent::PointerUp(button));
        self.buttons_down.remove(&button);
    }

    fn is_key_held(&self, key: KeyCode) -> bool {
        self.user_held.contains(&key)
    }
}
