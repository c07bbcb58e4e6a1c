use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_range};

/// Press offset and hold duration bounds.
///
/// Offsets are percentages of the hit windows (see the accuracy crate);
/// hold times are milliseconds at 1.0x audio rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTimingsConfig {
    pub min_offset: i32,
    pub max_offset: i32,
    pub alternate_min_offset: i32,
    pub alternate_max_offset: i32,
    pub min_hold_time: i32,
    pub max_hold_time: i32,
    pub min_slider_hold_time: i32,
    pub max_slider_hold_time: i32,
    pub double_delay_factor: f32,
    pub use_fallback_timing_system: bool,
}

impl Default for HitTimingsConfig {
    fn default() -> Self {
        Self {
            min_offset: -40,
            max_offset: 40,
            alternate_min_offset: -80,
            alternate_max_offset: 80,
            min_hold_time: 25,
            max_hold_time: 50,
            min_slider_hold_time: -36,
            max_slider_hold_time: 50,
            double_delay_factor: 2.0,
            use_fallback_timing_system: false,
        }
    }
}

impl HitTimingsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "hit_timings.offset",
            self.min_offset as f64,
            self.max_offset as f64,
        )?;
        check_range(
            "hit_timings.alternate_offset",
            self.alternate_min_offset as f64,
            self.alternate_max_offset as f64,
        )?;
        check_range(
            "hit_timings.hold_time",
            self.min_hold_time as f64,
            self.max_hold_time as f64,
        )?;
        check_range(
            "hit_timings.slider_hold_time",
            self.min_slider_hold_time as f64,
            self.max_slider_hold_time as f64,
        )?;
        if self.min_hold_time < 0 {
            return Err(ConfigError::OutOfRange {
                name: "hit_timings.min_hold_time",
                value: self.min_hold_time as f64,
                min: 0.0,
                max: f64::MAX,
            });
        }
        if !(self.double_delay_factor > 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "hit_timings.double_delay_factor",
                value: self.double_delay_factor as f64,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }
        Ok(())
    }
}
