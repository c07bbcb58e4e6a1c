// Relax playback loop: polls game state and drives the input actuator

mod game_state;
mod playback;
#[cfg(any(test, feature = "simulation"))]
pub mod simulation;
mod stop;

pub use game_state::GameStateProvider;
pub use playback::{ExitReason, PlaybackLoop, PlaybackState, SessionSummary};
pub use stop::StopHandle;
