use std::collections::HashSet;
use std::sync::Arc;

use relax_input::{InputActuator, KeyCode, MouseButton};
use relax_play::GameStateProvider;
use relax_play::simulation::SimulatedGame;

/// One input transition at a game time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub time: i32,
    pub input: String,
    pub pressed: bool,
}

/// Actuator that prints state changes against the simulated clock.
///
/// Releasing something that is not held is not a transition and is dropped.
pub struct ConsoleActuator {
    game: Arc<SimulatedGame>,
    keys: HashSet<KeyCode>,
    buttons: HashSet<MouseButton>,
    transitions: Vec<Transition>,
    echo: bool,
}

impl ConsoleActuator {
    pub fn new(game: Arc<SimulatedGame>, echo: bool) -> Self {
        Self {
            game,
            keys: HashSet::new(),
            buttons: HashSet::new(),
            transitions: Vec::new(),
            echo,
        }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn record(&mut self, input: String, pressed: bool) {
        let time = self.game.current_time();
        if self.echo {
            let arrow = if pressed { "down" } else { "up" };
            println!("{time:>8}ms  {input:<6} {arrow}");
        }
        self.transitions.push(Transition { time, input, pressed });
    }
}

impl InputActuator for ConsoleActuator {
    fn press_key(&mut self, key: KeyCode) {
        if self.keys.insert(key) {
            self.record(key_name(key), true);
        }
    }

    fn release_key(&mut self, key: KeyCode) {
        if self.keys.remove(&key) {
            self.record(key_name(key), false);
        }
    }

    fn press_pointer_button(&mut self, button: MouseButton) {
        if self.buttons.insert(button) {
            self.record(format!("{button:?}"), true);
        }
    }

    fn release_pointer_button(&mut self, button: MouseButton) {
        if self.buttons.remove(&button) {
            self.record(format!("{button:?}"), false);
        }
    }

    /// Nobody sits at a simulated keyboard.
    fn is_key_held(&self, _key: KeyCode) -> bool {
        false
    }
}

fn key_name(key: KeyCode) -> String {
    match char::from_u32(u32::from(key.0)) {
        Some(c) if c.is_ascii_alphanumeric() => c.to_string(),
        _ => format!("{:#04x}", key.0),
    }
}
