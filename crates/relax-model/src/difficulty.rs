use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Active gameplay modifiers, laid out like the game's own mod bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Mods: u32 {
        const NO_FAIL = 1;
        const EASY = 1 << 1;
        const HIDDEN = 1 << 3;
        const HARD_ROCK = 1 << 4;
        const SUDDEN_DEATH = 1 << 5;
        const DOUBLE_TIME = 1 << 6;
        const RELAX = 1 << 7;
        const HALF_TIME = 1 << 8;
        const NIGHTCORE = 1 << 9;
        const FLASHLIGHT = 1 << 10;
    }
}

impl Mods {
    /// Playback speed multiplier. Half time wins if both speed mods are set.
    pub fn audio_rate(self) -> f32 {
        if self.contains(Mods::HALF_TIME) {
            0.75
        } else if self.intersects(Mods::DOUBLE_TIME | Mods::NIGHTCORE) {
            1.5
        } else {
            1.0
        }
    }
}

/// Per-session difficulty constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyContext {
    pub overall_difficulty: f32,
    pub circle_size: f32,
    pub approach_rate: f32,
    pub audio_rate: f32,
}

impl DifficultyContext {
    pub fn new(overall_difficulty: f32, circle_size: f32, approach_rate: f32, mods: Mods) -> Self {
        Self {
            overall_difficulty,
            circle_size,
            approach_rate,
            audio_rate: mods.audio_rate(),
        }
    }
}

impl Default for DifficultyContext {
    fn default() -> Self {
        Self::new(5.0, 4.0, 9.0, Mods::empty())
    }
}

/// Hit windows in milliseconds, tightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitWindows {
    pub w300: i32,
    pub w100: i32,
    pub w50: i32,
}

impl HitWindows {
    pub const fn new(w300: i32, w100: i32, w50: i32) -> Self {
        Self { w300, w100, w50 }
    }

    pub fn is_ordered(&self) -> bool {
        0 <= self.w300 && self.w300 <= self.w100 && self.w100 <= self.w50
    }
}
