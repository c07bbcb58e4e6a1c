use rand::Rng;
use relax_config::HitTimingsConfig;
use relax_model::{HitWindows, Target};

use crate::compute_offset;
use crate::random::{clamp, next_in_range};

/// Holds shorter than this get a proportional release floor instead of a fixed one.
pub const SHORT_SLIDER_THRESHOLD: i32 = 72;

/// Fixed release floor for holds of at least [`SHORT_SLIDER_THRESHOLD`] ms.
const LONG_SLIDER_MIN_HOLD: i32 = -26;

/// Per-target press offset and hold time, both in ms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitTiming {
    /// Press this long after the target's start (negative = early).
    pub start_offset: i32,
    /// Hold this long after the release anchor (negative = release early).
    pub hold_time: i32,
}

/// Generates randomized [`HitTiming`]s for a session.
///
/// Offset percentages are resolved against the session's hit windows once,
/// at construction.
#[derive(Debug, Clone)]
pub struct HitTimingGenerator {
    config: HitTimingsConfig,
    windows: HitWindows,
    audio_rate: f32,
    min_offset: i32,
    max_offset: i32,
    min_alternate_offset: i32,
    max_alternate_offset: i32,
}

impl HitTimingGenerator {
    pub fn new(config: &HitTimingsConfig, windows: HitWindows, audio_rate: f32) -> Self {
        Self {
            min_offset: compute_offset(config.min_offset, &windows),
            max_offset: compute_offset(config.max_offset, &windows),
            min_alternate_offset: compute_offset(config.alternate_min_offset, &windows),
            max_alternate_offset: compute_offset(config.alternate_max_offset, &windows),
            config: config.clone(),
            windows,
            audio_rate,
        }
    }

    /// Resolved `(min, max)` offset bounds before double-delay scaling.
    pub fn offset_bounds(&self, alternating: bool) -> (i32, i32) {
        if alternating {
            (self.min_alternate_offset, self.max_alternate_offset)
        } else {
            (self.min_offset, self.max_offset)
        }
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        target: &Target,
        alternating: bool,
        double_delay: bool,
        rng: &mut R,
    ) -> HitTiming {
        HitTiming {
            start_offset: self.start_offset(alternating, double_delay, rng),
            hold_time: self.hold_time(target, rng),
        }
    }

    fn start_offset<R: Rng + ?Sized>(&self, alternating: bool, double_delay: bool, rng: &mut R) -> i32 {
        let factor = if double_delay {
            self.config.double_delay_factor
        } else {
            1.0
        };
        let (min, max) = self.offset_bounds(alternating);
        let min = (min as f32 * factor) as i32;
        let max = (max as f32 * factor) as i32;

        let w50 = self.windows.w50;
        clamp(next_in_range(rng, min, max), -w50, w50)
    }

    fn hold_time<R: Rng + ?Sized>(&self, target: &Target, rng: &mut R) -> i32 {
        if target.is_hold() {
            let max = (self.config.max_slider_hold_time as f32 * self.audio_rate) as i32;
            let hold = next_in_range(rng, self.config.min_slider_hold_time, max);
            clamp(hold, Self::slider_hold_floor(target.duration(), max), max)
        } else {
            let min = (self.config.min_hold_time as f32 * self.audio_rate) as i32;
            let max = (self.config.max_hold_time as f32 * self.audio_rate) as i32;
            clamp(next_in_range(rng, min, max), 0, max)
        }
    }

    /// Earliest allowed release relative to a hold's end, never above `max`.
    pub fn slider_hold_floor(duration: i32, max: i32) -> i32 {
        let floor = if duration >= SHORT_SLIDER_THRESHOLD {
            LONG_SLIDER_MIN_HOLD
        } else {
            duration / 2 - 10
        };
        floor.min(max)
    }
}
