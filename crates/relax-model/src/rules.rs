use crate::HitWindows;

/// Difficulty-to-gameplay formulas owned by the game.
pub trait GameRules {
    fn hit_windows(&self, overall_difficulty: f32) -> HitWindows;

    fn hit_object_radius(&self, circle_size: f32) -> f32;

    /// Time before a target's start at which it becomes visible.
    fn pre_empt(&self, approach_rate: f32) -> f64;
}

/// Standard osu! formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsuRules;

/// Piecewise-linear map of a 0..10 difficulty value through `min` (at 0),
/// `mid` (at 5) and `max` (at 10).
pub fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}

impl GameRules for OsuRules {
    fn hit_windows(&self, overall_difficulty: f32) -> HitWindows {
        let od = overall_difficulty as f64;
        HitWindows {
            w300: difficulty_range(od, 80.0, 50.0, 20.0) as i32,
            w100: difficulty_range(od, 140.0, 100.0, 60.0) as i32,
            w50: difficulty_range(od, 200.0, 150.0, 100.0) as i32,
        }
    }

    fn hit_object_radius(&self, circle_size: f32) -> f32 {
        54.4 - 4.48 * circle_size
    }

    fn pre_empt(&self, approach_rate: f32) -> f64 {
        difficulty_range(approach_rate as f64, 1800.0, 1200.0, 450.0)
    }
}
