use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use relax_input::{KeyCode, OsuKey};
use relax_timing::TimingMode;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_within};
use crate::{HitScanConfig, HitTimingsConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayStyle {
    /// One key unless objects come faster than the alternate threshold.
    #[default]
    Singletap,
    /// Alternate on every object.
    Alternate,
    /// Mouse button for targets with no close neighbour, keys inside streams.
    TapX,
}

/// Which end of a hold target the alternate threshold measures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SliderAlternationBinding {
    StartTime,
    #[default]
    EndTime,
}

/// All tunables a relax session reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxConfig {
    pub play_style: PlayStyle,
    pub primary_key: OsuKey,
    pub secondary_key: OsuKey,
    /// While held, offset bounds are scaled by `hit_timings.double_delay_factor`.
    pub double_delay_key: KeyCode,
    pub max_singletap_bpm: i32,
    /// Gap in ms below which consecutive objects alternate.
    /// Derived from `max_singletap_bpm` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_if_less_than: Option<i32>,
    pub slider_alternation_binding: SliderAlternationBinding,
    /// Added to the game clock before every timing comparison.
    pub audio_offset: i32,
    /// Keep holding into a spinner that starts within this many ms.
    pub hold_before_spinner_time: i32,
    pub hit_scan: HitScanConfig,
    pub hit_timings: HitTimingsConfig,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            play_style: PlayStyle::Singletap,
            primary_key: OsuKey::K1,
            secondary_key: OsuKey::K2,
            double_delay_key: KeyCode::SPACE,
            max_singletap_bpm: 500,
            alternate_if_less_than: None,
            slider_alternation_binding: SliderAlternationBinding::EndTime,
            audio_offset: 0,
            hold_before_spinner_time: 500,
            hit_scan: HitScanConfig::default(),
            hit_timings: HitTimingsConfig::default(),
        }
    }
}

impl RelaxConfig {
    /// Effective alternate gap threshold in ms at 1.0x audio rate.
    pub fn alternate_threshold(&self) -> i32 {
        self.alternate_if_less_than
            .unwrap_or_else(|| 60_000 / self.max_singletap_bpm.max(1))
    }

    pub fn timing_mode(&self) -> TimingMode {
        if self.hit_timings.use_fallback_timing_system {
            TimingMode::Coarse
        } else {
            TimingMode::Precise
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_within(
            "max_singletap_bpm",
            self.max_singletap_bpm as f64,
            1.0,
            f64::MAX,
        )?;
        check_within(
            "alternate_if_less_than",
            self.alternate_threshold() as f64,
            0.0,
            f64::MAX,
        )?;
        check_within(
            "hold_before_spinner_time",
            self.hold_before_spinner_time as f64,
            0.0,
            f64::MAX,
        )?;
        self.hit_scan.validate()?;
        self.hit_timings.validate()?;
        Ok(())
    }

    /// Read config from a JSON file and validate it.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: RelaxConfig = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }
}
