use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_within};

/// Spatial gating of presses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitScanConfig {
    pub enabled: bool,
    pub prediction_enabled: bool,
    /// Degrees.
    pub prediction_direction_angle_tolerance: i32,
    /// Fraction of the object radius that counts as "locked on".
    pub prediction_radius_scale: f32,
    pub prediction_max_distance: i32,
    /// Extra radius outside the object within which a deliberate miss-press may land.
    pub miss_radius: i32,
    /// Percent chance per object of allowing a press inside the miss radius.
    pub miss_chance: i32,
    /// Press a lapsed object anyway if the cursor is still close to it.
    pub miss_after_hit_window_50: bool,
}

impl Default for HitScanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prediction_enabled: true,
            prediction_direction_angle_tolerance: 25,
            prediction_radius_scale: 0.8,
            prediction_max_distance: 30,
            miss_radius: 50,
            miss_chance: 20,
            miss_after_hit_window_50: true,
        }
    }
}

impl HitScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_within(
            "hit_scan.prediction_direction_angle_tolerance",
            self.prediction_direction_angle_tolerance as f64,
            0.0,
            180.0,
        )?;
        let scale = self.prediction_radius_scale as f64;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "hit_scan.prediction_radius_scale",
                value: scale,
                min: 0.0,
                max: 1.0,
            });
        }
        check_within(
            "hit_scan.prediction_max_distance",
            self.prediction_max_distance as f64,
            0.0,
            f64::MAX,
        )?;
        check_within("hit_scan.miss_radius", self.miss_radius as f64, 0.0, f64::MAX)?;
        check_within("hit_scan.miss_chance", self.miss_chance as f64, 0.0, 100.0)?;
        Ok(())
    }
}
