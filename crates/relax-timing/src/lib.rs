//! Tick delay strategies for polling loops.
//!
//! A session picks one [`TimingSource`] up front; the loop only ever calls
//! [`TimingSource::delay`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Abstraction over tick delays.
/// Implementations: PreciseTiming (spin-assisted), CoarseTiming (OS sleep).
pub trait TimingSource {
    fn delay(&self, duration: Duration);

    /// Delay for `ms` whole milliseconds, the loop's native tick unit.
    fn delay_ms(&self, ms: u64) {
        self.delay(Duration::from_millis(ms));
    }
}

impl<T: TimingSource + ?Sized> TimingSource for &T {
    fn delay(&self, duration: Duration) {
        (**self).delay(duration)
    }
}

impl<T: TimingSource + ?Sized> TimingSource for Box<T> {
    fn delay(&self, duration: Duration) {
        (**self).delay(duration)
    }
}

/// Which delay strategy a session runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimingMode {
    #[default]
    Precise,
    Coarse,
}

/// Sleeps most of the interval and spins the remainder, so 1ms ticks land
/// close to 1ms even where the OS scheduler quantum is larger.
pub struct PreciseTiming {
    sleeper: spin_sleep::SpinSleeper,
}

impl PreciseTiming {
    pub fn new() -> Self {
        Self {
            sleeper: spin_sleep::SpinSleeper::default(),
        }
    }
}

impl Default for PreciseTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSource for PreciseTiming {
    fn delay(&self, duration: Duration) {
        self.sleeper.sleep(duration);
    }
}

/// Plain `thread::sleep`; cheaper on CPU, jittery on coarse schedulers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoarseTiming;

impl TimingSource for CoarseTiming {
    fn delay(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Build the delay strategy for `mode`.
pub fn timing_source(mode: TimingMode) -> Box<dyn TimingSource + Send> {
    log::debug!("using {mode:?} timing source");
    match mode {
        TimingMode::Precise => Box::new(PreciseTiming::new()),
        TimingMode::Coarse => Box::new(CoarseTiming),
    }
}
