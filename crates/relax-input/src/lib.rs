// Input actuator abstraction, key codes and logical gameplay keys

mod actuator;
mod key;
#[cfg(any(test, feature = "test-support"))]
mod recording;

pub use actuator::{InputActuator, release_all};
pub use key::{KeyBindings, KeyCode, MouseButton, OsuKey};
#[cfg(any(test, feature = "test-support"))]
pub use recording::{InputEvent, RecordingActuator};
