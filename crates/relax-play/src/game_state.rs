use std::sync::Arc;

use relax_input::KeyBindings;
use relax_model::{DifficultyContext, Mods, Point, TargetSequence};

/// Live view of the running game.
///
/// Every call reads the current value; nothing is snapshotted, and values
/// may change between two calls in the same tick.
pub trait GameStateProvider {
    /// Audio clock in ms.
    fn current_time(&self) -> i32;

    fn is_paused(&self) -> bool;

    /// Whether a map is being played at all.
    fn can_play(&self) -> bool;

    /// Cursor in playfield coordinates.
    fn cursor_position(&self) -> Point;

    /// Index of the target the game itself considers current.
    fn active_target_index(&self) -> usize;

    fn target_sequence(&self) -> TargetSequence;

    fn difficulty_context(&self) -> DifficultyContext;

    fn active_modifiers(&self) -> Mods;

    /// The game's bindings for its two gameplay keys.
    fn key_bindings(&self) -> KeyBindings {
        KeyBindings::default()
    }
}

macro_rules! forward_game_state {
    ($($ty:ty),*) => {$(
        impl<G: GameStateProvider + ?Sized> GameStateProvider for $ty {
            fn current_time(&self) -> i32 {
                (**self).current_time()
            }

            fn is_paused(&self) -> bool {
                (**self).is_paused()
            }

            fn can_play(&self) -> bool {
                (**self).can_play()
            }

            fn cursor_position(&self) -> Point {
                (**self).cursor_position()
            }

            fn active_target_index(&self) -> usize {
                (**self).active_target_index()
            }

            fn target_sequence(&self) -> TargetSequence {
                (**self).target_sequence()
            }

            fn difficulty_context(&self) -> DifficultyContext {
                (**self).difficulty_context()
            }

            fn active_modifiers(&self) -> Mods {
                (**self).active_modifiers()
            }

            fn key_bindings(&self) -> KeyBindings {
                (**self).key_bindings()
            }
        }
    )*};
}

forward_game_state!(&G, Arc<G>, Box<G>);
