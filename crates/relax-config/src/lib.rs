// Tunables for the relax session: play style, hit scan and hit timings

mod config;
mod error;
mod hit_scan;
mod hit_timings;

pub use config::{PlayStyle, RelaxConfig, SliderAlternationBinding};
pub use error::ConfigError;
pub use hit_scan::HitScanConfig;
pub use hit_timings::HitTimingsConfig;
