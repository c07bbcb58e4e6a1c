use log::{debug, warn};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use relax_config::RelaxConfig;
use relax_model::{DifficultyContext, GameRules, HitWindows, Point, TargetSequence};

use crate::{HitScanEvaluator, HitScanResult, HitTiming, HitTimingGenerator, ScanState};

/// Session-scoped accuracy state: resolved windows, the timing generator,
/// the hit scan evaluator with its [`ScanState`], and the session's RNG.
///
/// Build a fresh one per play session.
pub struct AccuracyManager<R: Rng = StdRng> {
    windows: HitWindows,
    timings: HitTimingGenerator,
    hit_scan: HitScanEvaluator,
    scan_state: ScanState,
    rng: R,
}

impl AccuracyManager<StdRng> {
    /// Manager seeded from `seed`, or from OS entropy when `None`.
    pub fn seeded(
        config: &RelaxConfig,
        difficulty: &DifficultyContext,
        rules: &dyn GameRules,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, difficulty, rules, rng)
    }
}

impl<R: Rng> AccuracyManager<R> {
    pub fn new(
        config: &RelaxConfig,
        difficulty: &DifficultyContext,
        rules: &dyn GameRules,
        rng: R,
    ) -> Self {
        let windows = rules.hit_windows(difficulty.overall_difficulty);
        let radius = rules.hit_object_radius(difficulty.circle_size);
        let pre_empt = rules.pre_empt(difficulty.approach_rate);
        debug!(
            "accuracy windows {windows:?}, radius {radius:.2}, pre-empt {pre_empt:.0}ms, rate {}",
            difficulty.audio_rate
        );
        if !windows.is_ordered() {
            warn!("hit windows {windows:?} are not ordered w300 <= w100 <= w50");
        }

        Self {
            windows,
            timings: HitTimingGenerator::new(&config.hit_timings, windows, difficulty.audio_rate),
            hit_scan: HitScanEvaluator::new(&config.hit_scan, windows, radius, pre_empt),
            scan_state: ScanState::new(),
            rng,
        }
    }

    pub fn hit_windows(&self) -> HitWindows {
        self.windows
    }

    pub fn scan_state(&self) -> &ScanState {
        &self.scan_state
    }

    pub fn hit_object_timings(
        &mut self,
        targets: &TargetSequence,
        index: usize,
        alternating: bool,
        double_delay: bool,
    ) -> HitTiming {
        match targets.get(index) {
            Some(target) => self
                .timings
                .generate(target, alternating, double_delay, &mut self.rng),
            None => HitTiming::default(),
        }
    }

    pub fn hit_scan_result(
        &mut self,
        targets: &TargetSequence,
        index: usize,
        time: i32,
        cursor: Point,
    ) -> HitScanResult {
        self.hit_scan.evaluate(
            &mut self.scan_state,
            targets,
            index,
            time,
            cursor,
            &mut self.rng,
        )
    }
}
