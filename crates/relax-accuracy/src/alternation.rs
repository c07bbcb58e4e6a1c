use bitflags::bitflags;
use relax_config::{PlayStyle, RelaxConfig, SliderAlternationBinding};
use relax_input::OsuKey;
use relax_model::{Target, TargetSequence};

bitflags! {
    /// Alternation decision for one target.
    ///
    /// Empty means the target is far enough from both neighbours to be
    /// single-tapped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AlternateResult: u8 {
        /// Close enough to the previous target to switch keys.
        const ALTERNATE_THIS_NOTE = 1;
        /// Close enough to the next target that it will switch keys.
        const ALTERNATE_NEXT_NOTE = 1 << 1;
    }
}

/// Picks which logical key presses each target.
#[derive(Debug, Clone)]
pub struct AlternationPolicy {
    play_style: PlayStyle,
    primary_key: OsuKey,
    secondary_key: OsuKey,
    binding: SliderAlternationBinding,
    /// Gap threshold in ms, already scaled by audio rate.
    max_gap: f32,
}

impl AlternationPolicy {
    pub fn new(config: &RelaxConfig, audio_rate: f32) -> Self {
        Self {
            play_style: config.play_style,
            primary_key: config.primary_key,
            secondary_key: config.secondary_key,
            binding: config.slider_alternation_binding,
            max_gap: config.alternate_threshold() as f32 * audio_rate,
        }
    }

    pub fn primary_key(&self) -> OsuKey {
        self.primary_key
    }

    /// Alternation flags for target `index`.
    pub fn decide(&self, targets: &TargetSequence, index: usize) -> AlternateResult {
        if self.play_style == PlayStyle::Alternate {
            return AlternateResult::ALTERNATE_THIS_NOTE;
        }

        let mut result = AlternateResult::empty();
        let Some(current) = targets.get(index) else {
            return result;
        };

        if let Some(previous) = index.checked_sub(1).and_then(|i| targets.get(i)) {
            if self.is_close(previous, current) {
                result |= AlternateResult::ALTERNATE_THIS_NOTE;
            }
        }

        if let Some(next) = targets.get(index + 1) {
            if self.is_close(current, next) {
                result |= AlternateResult::ALTERNATE_NEXT_NOTE;
            }
        }

        result
    }

    /// Key that becomes active after advancing to a target with `result`.
    pub fn next_key(&self, current: OsuKey, result: AlternateResult) -> OsuKey {
        if !result.contains(AlternateResult::ALTERNATE_THIS_NOTE) {
            return self.primary_key;
        }
        if current == self.primary_key {
            self.secondary_key
        } else {
            self.primary_key
        }
    }

    /// Key to actually press for the current target.
    ///
    /// Under TapX a target with no alternation flags (isolated, or the
    /// session's first target) is clicked with the left mouse button and the
    /// keyboard cycle restarts at the primary key. Stream notes use keys.
    pub fn press_key(&self, active: &mut OsuKey, result: AlternateResult) -> OsuKey {
        if self.play_style == PlayStyle::TapX && result.is_empty() {
            *active = self.primary_key;
            return OsuKey::M1;
        }
        *active
    }

    fn anchor(&self, target: &Target) -> i32 {
        if target.is_hold() && self.binding == SliderAlternationBinding::StartTime {
            target.start_time
        } else {
            target.end_time
        }
    }

    fn is_close(&self, earlier: &Target, later: &Target) -> bool {
        ((later.start_time - self.anchor(earlier)) as f32) < self.max_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relax_model::{HoldPath, Point};

    fn config(style: PlayStyle, threshold: i32) -> RelaxConfig {
        RelaxConfig {
            play_style: style,
            alternate_if_less_than: Some(threshold),
            ..Default::default()
        }
    }

    fn taps(times: &[i32]) -> TargetSequence {
        TargetSequence::new(times.iter().map(|&t| Target::tap(t, Point::ZERO)).collect()).unwrap()
    }

    #[test]
    fn alternate_style_always_alternates() {
        let policy = AlternationPolicy::new(&config(PlayStyle::Alternate, 100), 1.0);
        let seq = taps(&[0, 5000]);
        assert_eq!(policy.decide(&seq, 0), AlternateResult::ALTERNATE_THIS_NOTE);
        assert_eq!(policy.decide(&seq, 1), AlternateResult::ALTERNATE_THIS_NOTE);
    }

    #[test]
    fn gaps_below_threshold_alternate() {
        let policy = AlternationPolicy::new(&config(PlayStyle::Singletap, 600), 1.0);
        let seq = taps(&[0, 500, 1000, 2000]);
        assert_eq!(policy.decide(&seq, 0), AlternateResult::ALTERNATE_NEXT_NOTE);
        assert_eq!(policy.decide(&seq, 1), AlternateResult::all());
        assert_eq!(policy.decide(&seq, 2), AlternateResult::ALTERNATE_THIS_NOTE);
        assert_eq!(policy.decide(&seq, 3), AlternateResult::empty());
    }

    #[test]
    fn threshold_is_strict() {
        let policy = AlternationPolicy::new(&config(PlayStyle::Singletap, 500), 1.0);
        let seq = taps(&[0, 500]);
        assert_eq!(policy.decide(&seq, 1), AlternateResult::empty());
    }

    #[test]
    fn threshold_scales_with_audio_rate() {
        let policy = AlternationPolicy::new(&config(PlayStyle::Singletap, 400), 1.5);
        let seq = taps(&[0, 500]);
        assert!(policy.decide(&seq, 1).contains(AlternateResult::ALTERNATE_THIS_NOTE));
    }

    #[test]
    fn hold_binding_selects_anchor() {
        let seq = TargetSequence::new(vec![
            Target::hold(0, 800, HoldPath::linear(Point::ZERO, Point::ONE)),
            Target::tap(1000, Point::ZERO),
        ])
        .unwrap();

        let mut end_bound = config(PlayStyle::Singletap, 300);
        end_bound.slider_alternation_binding = SliderAlternationBinding::EndTime;
        let policy = AlternationPolicy::new(&end_bound, 1.0);
        assert_eq!(policy.decide(&seq, 1), AlternateResult::ALTERNATE_THIS_NOTE);

        let mut start_bound = end_bound.clone();
        start_bound.slider_alternation_binding = SliderAlternationBinding::StartTime;
        let policy = AlternationPolicy::new(&start_bound, 1.0);
        assert_eq!(policy.decide(&seq, 1), AlternateResult::empty());
    }

    #[test]
    fn spinner_gap_measures_from_its_end() {
        let policy = AlternationPolicy::new(&config(PlayStyle::Singletap, 300), 1.0);
        let seq = TargetSequence::new(vec![
            Target::spinner(0, 2000),
            Target::tap(2100, Point::ZERO),
        ])
        .unwrap();
        assert_eq!(policy.decide(&seq, 1), AlternateResult::ALTERNATE_THIS_NOTE);
    }

    #[test]
    fn next_key_toggles_or_resets() {
        let policy = AlternationPolicy::new(&RelaxConfig::default(), 1.0);
        let alt = AlternateResult::ALTERNATE_THIS_NOTE;
        assert_eq!(policy.next_key(OsuKey::K1, alt), OsuKey::K2);
        assert_eq!(policy.next_key(OsuKey::K2, alt), OsuKey::K1);
        assert_eq!(policy.next_key(OsuKey::K2, AlternateResult::ALTERNATE_NEXT_NOTE), OsuKey::K1);
        assert_eq!(policy.next_key(OsuKey::K2, AlternateResult::empty()), OsuKey::K1);
    }

    #[test]
    fn tapx_clicks_isolated_targets_with_mouse() {
        let policy = AlternationPolicy::new(&config(PlayStyle::TapX, 300), 1.0);
        let mut active = OsuKey::K2;
        assert_eq!(policy.press_key(&mut active, AlternateResult::empty()), OsuKey::M1);
        assert_eq!(active, OsuKey::K1);

        let mut active = OsuKey::K2;
        assert_eq!(
            policy.press_key(&mut active, AlternateResult::ALTERNATE_THIS_NOTE),
            OsuKey::K2
        );

        let mut active = OsuKey::K1;
        assert_eq!(
            policy.press_key(&mut active, AlternateResult::ALTERNATE_NEXT_NOTE),
            OsuKey::K1
        );
    }

    #[test]
    fn singletap_presses_active_key() {
        let policy = AlternationPolicy::new(&RelaxConfig::default(), 1.0);
        let mut active = OsuKey::K2;
        assert_eq!(policy.press_key(&mut active, AlternateResult::empty()), OsuKey::K2);
    }
}
