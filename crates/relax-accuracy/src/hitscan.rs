use log::trace;
use rand::Rng;
use relax_config::HitScanConfig;
use relax_model::{HitWindows, Point, TargetSequence};

use crate::random::roll_percent;

/// Outcome of a hit scan for the current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitScanResult {
    /// Press once the timing offset allows it.
    CanHit,
    /// Press now, bypassing the timing offset.
    ShouldHit,
    /// Cursor is not on the target yet.
    Wait,
    /// Target can no longer be hit; skip it.
    MoveToNextObject,
}

/// Cross-tick hit scan state.
///
/// Reset at session start. `can_miss_this_target` and
/// `locked_cursor_position` are rerolled/cleared the first time each target
/// index is scanned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanState {
    pub last_evaluated_index: Option<usize>,
    pub can_miss_this_target: bool,
    /// Last cursor position seen well inside the target, for prediction.
    pub locked_cursor_position: Option<Point>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Decides whether the cursor position permits or forces a press.
#[derive(Debug, Clone)]
pub struct HitScanEvaluator {
    config: HitScanConfig,
    windows: HitWindows,
    radius: f32,
    pre_empt: f64,
}

impl HitScanEvaluator {
    pub fn new(config: &HitScanConfig, windows: HitWindows, radius: f32, pre_empt: f64) -> Self {
        Self {
            config: config.clone(),
            windows,
            radius,
            pre_empt,
        }
    }

    /// Scan target `index` at game time `time` with the cursor at `cursor`.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        state: &mut ScanState,
        targets: &TargetSequence,
        index: usize,
        time: i32,
        cursor: Point,
        rng: &mut R,
    ) -> HitScanResult {
        let Some(target) = targets.get(index) else {
            return HitScanResult::MoveToNextObject;
        };

        if !self.config.enabled || target.is_spinner() {
            return HitScanResult::CanHit;
        }

        if state.last_evaluated_index != Some(index) {
            state.can_miss_this_target = roll_percent(rng, self.config.miss_chance);
            state.last_evaluated_index = Some(index);
            state.locked_cursor_position = None;
            trace!(
                "hit scan on target {index}, can miss: {}",
                state.can_miss_this_target
            );
        }

        let distance = cursor.distance(target.position_at_time(time));
        let miss_reach = self.radius + self.config.miss_radius as f32;

        if time > target.end_time + self.windows.w50 {
            if self.config.miss_after_hit_window_50
                && distance <= miss_reach
                && !self.intersects_forward(targets, index + 1, time, cursor)
            {
                return HitScanResult::ShouldHit;
            }
            return HitScanResult::MoveToNextObject;
        }

        if self.config.prediction_enabled {
            let locked_radius = self.radius * self.config.prediction_radius_scale;

            if distance > locked_radius && distance <= self.radius {
                if let (Some(locked), Some(next)) =
                    (state.locked_cursor_position, targets.get(index + 1))
                {
                    let angle = direction_angle(locked, cursor, next.position);
                    if angle <= self.config.prediction_direction_angle_tolerance as f64
                        || cursor.distance(locked) <= self.config.prediction_max_distance as f32
                    {
                        return HitScanResult::ShouldHit;
                    }
                }
            }

            state.locked_cursor_position = (distance <= locked_radius).then_some(cursor);
        }

        if distance <= self.radius {
            return HitScanResult::CanHit;
        }

        if state.can_miss_this_target
            && distance <= miss_reach
            && !self.intersects_forward(targets, index + 1, time, cursor)
        {
            return HitScanResult::CanHit;
        }

        HitScanResult::Wait
    }

    /// Whether the cursor already sits on a target from `start_index` onwards
    /// that is visible at `time`.
    pub fn intersects_forward(
        &self,
        targets: &TargetSequence,
        start_index: usize,
        time: i32,
        cursor: Point,
    ) -> bool {
        targets
            .iter()
            .skip(start_index)
            .take_while(|t| t.start_time as f64 - self.pre_empt <= time as f64)
            .any(|t| cursor.distance(t.position) <= self.radius)
    }
}

/// Angle in degrees at `origin` between the rays to `a` and `b`.
///
/// NaN when either ray has zero length.
fn direction_angle(origin: Point, a: Point, b: Point) -> f64 {
    let oa = origin.distance_squared(a) as f64;
    let ab = a.distance_squared(b) as f64;
    let ob = origin.distance_squared(b) as f64;

    let cos = (oa + ob - ab) / (2.0 * oa.sqrt() * ob.sqrt());
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use relax_model::{HoldPath, Target};

    const WINDOWS: HitWindows = HitWindows::new(50, 100, 150);
    const RADIUS: f32 = 40.0;

    fn no_miss() -> HitScanConfig {
        HitScanConfig {
            miss_chance: 0,
            ..Default::default()
        }
    }

    fn evaluator(config: HitScanConfig) -> HitScanEvaluator {
        HitScanEvaluator::new(&config, WINDOWS, RADIUS, 1200.0)
    }

    fn taps(points: &[(i32, f32, f32)]) -> TargetSequence {
        TargetSequence::new(
            points
                .iter()
                .map(|&(t, x, y)| Target::tap(t, Point::new(x, y)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn angle_helper() {
        let o = Point::ZERO;
        assert!((direction_angle(o, Point::new(1.0, 0.0), Point::new(0.0, 1.0)) - 90.0).abs() < 1e-6);
        assert!(direction_angle(o, Point::new(1.0, 0.0), Point::new(5.0, 0.0)).abs() < 1e-6);
        assert!(direction_angle(o, o, Point::new(5.0, 0.0)).is_nan());
    }

    #[test]
    fn disabled_always_can_hit() {
        let eval = evaluator(HitScanConfig {
            enabled: false,
            ..Default::default()
        });
        let seq = taps(&[(1000, 100.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        let far = Point::new(500.0, 380.0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 5000, far, &mut rng),
            HitScanResult::CanHit
        );
    }

    #[test]
    fn spinner_is_never_gated() {
        let eval = evaluator(no_miss());
        let seq = TargetSequence::new(vec![Target::spinner(1000, 3000)]).unwrap();
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        for cursor in [Point::ZERO, Point::new(512.0, 384.0)] {
            assert_eq!(
                eval.evaluate(&mut state, &seq, 0, 1000, cursor, &mut rng),
                HitScanResult::CanHit
            );
        }
    }

    #[test]
    fn cursor_on_target_can_hit() {
        let eval = evaluator(no_miss());
        let seq = taps(&[(1000, 100.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 990, Point::new(100.0, 100.0), &mut rng),
            HitScanResult::CanHit
        );
    }

    #[test]
    fn cursor_away_waits() {
        let eval = evaluator(no_miss());
        let seq = taps(&[(1000, 100.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 990, Point::new(300.0, 100.0), &mut rng),
            HitScanResult::Wait
        );
    }

    #[test]
    fn lapsed_target_is_skipped() {
        let eval = evaluator(no_miss());
        let seq = taps(&[(1000, 100.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 1151, Point::new(400.0, 100.0), &mut rng),
            HitScanResult::MoveToNextObject
        );
    }

    #[test]
    fn lapsed_target_near_cursor_is_forced() {
        let eval = evaluator(no_miss());
        let seq = taps(&[(1000, 100.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        // inside radius + miss radius (90)
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 1151, Point::new(180.0, 100.0), &mut rng),
            HitScanResult::ShouldHit
        );
    }

    #[test]
    fn lapsed_target_not_forced_when_cursor_is_on_next_target() {
        let eval = evaluator(no_miss());
        let seq = taps(&[(1000, 100.0, 100.0), (1300, 170.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 1151, Point::new(170.0, 100.0), &mut rng),
            HitScanResult::MoveToNextObject
        );
    }

    #[test]
    fn lapsed_target_not_forced_when_disabled() {
        let eval = evaluator(HitScanConfig {
            miss_after_hit_window_50: false,
            ..no_miss()
        });
        let seq = taps(&[(1000, 100.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 1151, Point::new(100.0, 100.0), &mut rng),
            HitScanResult::MoveToNextObject
        );
    }

    #[test]
    fn miss_roll_allows_press_inside_miss_radius() {
        let eval = evaluator(HitScanConfig {
            miss_chance: 100,
            prediction_enabled: false,
            ..Default::default()
        });
        let seq = taps(&[(1000, 100.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 1000, Point::new(170.0, 100.0), &mut rng),
            HitScanResult::CanHit
        );
        assert!(state.can_miss_this_target);
    }

    #[test]
    fn miss_roll_is_suppressed_over_upcoming_target() {
        let eval = evaluator(HitScanConfig {
            miss_chance: 100,
            prediction_enabled: false,
            ..Default::default()
        });
        let seq = taps(&[(1000, 100.0, 100.0), (1100, 170.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 1000, Point::new(170.0, 100.0), &mut rng),
            HitScanResult::Wait
        );
    }

    #[test]
    fn upcoming_target_outside_pre_empt_does_not_intersect() {
        let eval = evaluator(no_miss());
        let seq = taps(&[(1000, 100.0, 100.0), (5000, 170.0, 100.0)]);
        assert!(!eval.intersects_forward(&seq, 1, 1000, Point::new(170.0, 100.0)));
        assert!(eval.intersects_forward(&seq, 1, 3800, Point::new(170.0, 100.0)));
    }

    #[test]
    fn state_rerolls_once_per_index() {
        let eval = evaluator(HitScanConfig {
            miss_chance: 50,
            ..Default::default()
        });
        let seq = taps(&[(1000, 100.0, 100.0), (1500, 200.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);

        eval.evaluate(&mut state, &seq, 0, 900, Point::new(100.0, 100.0), &mut rng);
        assert_eq!(state.last_evaluated_index, Some(0));
        let rolled = state.can_miss_this_target;
        for t in 901..950 {
            eval.evaluate(&mut state, &seq, 0, t, Point::new(400.0, 300.0), &mut rng);
            assert_eq!(state.can_miss_this_target, rolled);
        }

        state.locked_cursor_position = Some(Point::new(1.0, 1.0));
        eval.evaluate(&mut state, &seq, 1, 1400, Point::new(400.0, 300.0), &mut rng);
        assert_eq!(state.last_evaluated_index, Some(1));
        assert_eq!(state.locked_cursor_position, None);
    }

    #[test]
    fn prediction_locks_deep_inside_and_clears_outside() {
        let eval = evaluator(no_miss());
        let seq = taps(&[(1000, 100.0, 100.0), (1200, 300.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);

        // locked radius is 32
        eval.evaluate(&mut state, &seq, 0, 950, Point::new(110.0, 100.0), &mut rng);
        assert_eq!(state.locked_cursor_position, Some(Point::new(110.0, 100.0)));

        eval.evaluate(&mut state, &seq, 0, 951, Point::new(100.0, 200.0), &mut rng);
        assert_eq!(state.locked_cursor_position, None);
    }

    #[test]
    fn prediction_fires_when_leaving_towards_next_target() {
        let eval = evaluator(HitScanConfig {
            prediction_max_distance: 0,
            ..no_miss()
        });
        let seq = taps(&[(1000, 100.0, 100.0), (1200, 300.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);

        eval.evaluate(&mut state, &seq, 0, 950, Point::new(100.0, 100.0), &mut rng);
        // moving straight at the next target, now in the outer band (35 > 32)
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 951, Point::new(135.0, 100.0), &mut rng),
            HitScanResult::ShouldHit
        );
    }

    #[test]
    fn prediction_ignores_sideways_motion_beyond_max_distance() {
        let eval = evaluator(HitScanConfig {
            prediction_max_distance: 10,
            ..no_miss()
        });
        let seq = taps(&[(1000, 100.0, 100.0), (1200, 300.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);

        eval.evaluate(&mut state, &seq, 0, 950, Point::new(100.0, 100.0), &mut rng);
        // perpendicular to the next target, 35 away from the lock
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 951, Point::new(100.0, 135.0), &mut rng),
            HitScanResult::CanHit
        );
        assert_eq!(state.locked_cursor_position, None);
    }

    #[test]
    fn prediction_fires_on_small_moves_in_any_direction() {
        let eval = evaluator(no_miss());
        let seq = taps(&[(1000, 100.0, 100.0), (1200, 300.0, 100.0)]);
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);

        eval.evaluate(&mut state, &seq, 0, 950, Point::new(100.0, 130.0), &mut rng);
        // 5 away from the lock, within max distance 30
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 951, Point::new(100.0, 135.0), &mut rng),
            HitScanResult::ShouldHit
        );
    }

    #[test]
    fn hold_target_is_scanned_at_its_ball_position() {
        let eval = evaluator(no_miss());
        let seq = TargetSequence::new(vec![Target::hold(
            1000,
            1200,
            HoldPath::linear(Point::new(0.0, 0.0), Point::new(400.0, 0.0)),
        )])
        .unwrap();
        let mut state = ScanState::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 1100, Point::new(200.0, 0.0), &mut rng),
            HitScanResult::CanHit
        );
        assert_eq!(
            eval.evaluate(&mut state, &seq, 0, 1100, Point::new(0.0, 0.0), &mut rng),
            HitScanResult::Wait
        );
    }
}
