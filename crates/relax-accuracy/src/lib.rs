// Timing offsets, hold durations, hit scan and alternation decisions

mod accuracy_manager;
mod alternation;
mod hit_timings;
mod hitscan;
mod random;
mod timing_window;

pub use accuracy_manager::AccuracyManager;
pub use alternation::{AlternateResult, AlternationPolicy};
pub use hit_timings::{HitTiming, HitTimingGenerator, SHORT_SLIDER_THRESHOLD};
pub use hitscan::{HitScanEvaluator, HitScanResult, ScanState};
pub use random::{next_in_range, roll_percent};
pub use timing_window::compute_offset;
