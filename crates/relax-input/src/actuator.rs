use log::trace;

use crate::{KeyBindings, KeyCode, MouseButton, OsuKey};

/// Sink for synthesized key and pointer input.
pub trait InputActuator {
    fn press_key(&mut self, key: KeyCode);

    fn release_key(&mut self, key: KeyCode);

    fn press_pointer_button(&mut self, button: MouseButton);

    fn release_pointer_button(&mut self, button: MouseButton);

    /// Whether a physical key is currently held by the user.
    fn is_key_held(&self, key: KeyCode) -> bool;

    /// Press whatever `key` maps to under `bindings`.
    fn press(&mut self, key: OsuKey, bindings: &KeyBindings) {
        match (bindings.key_for(key), key) {
            (Some(code), _) => self.press_key(code),
            (None, OsuKey::M2) => self.press_pointer_button(MouseButton::Right),
            (None, _) => self.press_pointer_button(MouseButton::Left),
        }
    }
}

/// Release both gameplay keys and both pointer buttons.
pub fn release_all<A: InputActuator + ?Sized>(actuator: &mut A, bindings: &KeyBindings) {
    trace!("releasing all gameplay inputs");
    actuator.release_key(bindings.k1);
    actuator.release_key(bindings.k2);
    actuator.release_pointer_button(MouseButton::Left);
    actuator.release_pointer_button(MouseButton::Right);
}
