// Beatmap targets, difficulty context and the game rule formulas

mod difficulty;
mod error;
mod rules;
mod sequence;
mod target;

pub use difficulty::{DifficultyContext, HitWindows, Mods};
pub use error::ModelError;
pub use rules::{GameRules, OsuRules, difficulty_range};
pub use sequence::TargetSequence;
pub use target::{HoldPath, Target, TargetKind};

/// Playfield coordinate (osu!pixels).
pub type Point = glam::Vec2;

/// Centre of the 512x384 playfield, where spinners sit.
pub const PLAYFIELD_CENTRE: Point = Point::new(256.0, 192.0);
