//! Tick-driven relax loop.
//!
//! Each tick the loop waits one timing-source delay, reads the game clock,
//! and either arms and presses the current target, releases it once its
//! hold time has elapsed, or skips it when the hit scan gives up on it.

use log::{debug, info, trace};
use relax_accuracy::{AccuracyManager, AlternateResult, AlternationPolicy, HitScanResult, HitTiming};
use relax_config::RelaxConfig;
use relax_input::{InputActuator, KeyBindings, OsuKey, release_all};
use relax_model::{GameRules, OsuRules, TargetSequence};
use relax_timing::{TimingSource, timing_source};

use crate::{GameStateProvider, StopHandle};

/// Main tick interval in ms.
const TICK_MS: u64 = 1;
/// Tick interval while idling after the last target.
const IDLE_TICK_MS: u64 = 5;

/// Why [`PlaybackLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Stopped,
    /// The game stopped playing a map before the last target.
    PlayEnded,
    /// Every target was handled; the loop idled until play ended.
    SequenceEnd,
}

/// Counters reported when a session finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub exit: ExitReason,
    pub presses: usize,
    pub skipped: usize,
}

/// Mutable per-session state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_pressed: bool,
    /// Adjusted clock at the most recent press.
    pub press_time: i32,
    /// Key the next keyboard press will use.
    pub active_key: OsuKey,
    pub alternate: AlternateResult,
    pub timing: HitTiming,
}

impl PlaybackState {
    pub fn new(start_index: usize, primary_key: OsuKey) -> Self {
        Self {
            current_index: start_index,
            is_pressed: false,
            press_time: i32::MIN,
            active_key: primary_key,
            alternate: AlternateResult::empty(),
            timing: HitTiming::default(),
        }
    }
}

/// Everything derived once at session start.
struct Session {
    targets: TargetSequence,
    accuracy: AccuracyManager,
    alternation: AlternationPolicy,
    bindings: KeyBindings,
    w50: i32,
    state: PlaybackState,
    presses: usize,
    skipped: usize,
}

/// Drives an [`InputActuator`] from a [`GameStateProvider`].
///
/// Collaborators are injected at construction; a session starts with
/// [`run`](Self::run) and blocks until stopped or play ends.
pub struct PlaybackLoop<G, A, T = Box<dyn TimingSource + Send>> {
    game: G,
    actuator: A,
    timing: T,
    config: RelaxConfig,
    rules: Box<dyn GameRules + Send>,
    seed: Option<u64>,
    stop: StopHandle,
}

impl<G, A> PlaybackLoop<G, A>
where
    G: GameStateProvider,
    A: InputActuator,
{
    /// Loop using the timing source selected by `config`.
    pub fn new(game: G, actuator: A, config: RelaxConfig) -> Self {
        let timing = timing_source(config.timing_mode());
        Self::with_timing(game, actuator, timing, config)
    }
}

impl<G, A, T> PlaybackLoop<G, A, T>
where
    G: GameStateProvider,
    A: InputActuator,
    T: TimingSource,
{
    pub fn with_timing(game: G, actuator: A, timing: T, config: RelaxConfig) -> Self {
        Self {
            game,
            actuator,
            timing,
            config,
            rules: Box::new(OsuRules),
            seed: None,
            stop: StopHandle::new(),
        }
    }

    pub fn with_rules(mut self, rules: impl GameRules + Send + 'static) -> Self {
        self.rules = Box::new(rules);
        self
    }

    /// Fix the session RNG seed; otherwise it is drawn from OS entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Share an existing stop flag instead of the loop's own.
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    /// Handle that requests termination of a running session.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn into_parts(self) -> (G, A) {
        (self.game, self.actuator)
    }

    /// Play until stopped, until the game stops playing, or until the last
    /// target is done and play ends. All inputs are released on return.
    pub fn run(&mut self) -> SessionSummary {
        self.stop.clear();
        let mut session = self.start_session();
        info!(
            "relax session started at target {} of {}, windows {:?}, rate {}",
            session.state.current_index,
            session.targets.len(),
            session.accuracy.hit_windows(),
            self.game.active_modifiers().audio_rate()
        );

        let exit = loop {
            if self.stop.is_stop_requested() {
                break ExitReason::Stopped;
            }
            if !self.game.can_play() {
                break ExitReason::PlayEnded;
            }
            if session.state.current_index >= session.targets.len() {
                break ExitReason::SequenceEnd;
            }
            self.timing.delay_ms(TICK_MS);
            self.tick(&mut session);
        };

        release_all(&mut self.actuator, &session.bindings);
        session.state.is_pressed = false;

        if exit == ExitReason::SequenceEnd {
            debug!("all targets handled, idling until play ends");
            while self.game.can_play() && !self.stop.is_stop_requested() {
                self.timing.delay_ms(IDLE_TICK_MS);
            }
            // Stop may land while idling; nothing is held either way.
        }

        let summary = SessionSummary {
            exit,
            presses: session.presses,
            skipped: session.skipped,
        };
        info!(
            "relax session ended ({:?}): {} presses, {} skipped",
            summary.exit, summary.presses, summary.skipped
        );
        summary
    }

    fn start_session(&mut self) -> Session {
        let targets = self.game.target_sequence();
        let difficulty = self.game.difficulty_context();
        let audio_rate = self.game.active_modifiers().audio_rate();
        let bindings = self.game.key_bindings();

        let mut accuracy =
            AccuracyManager::seeded(&self.config, &difficulty, self.rules.as_ref(), self.seed);
        let alternation = AlternationPolicy::new(&self.config, audio_rate);
        let w50 = accuracy.hit_windows().w50;

        // The opening target carries no alternation flags and plain timing;
        // alternation and double delay only apply once the loop advances.
        let mut state = PlaybackState::new(self.game.active_target_index(), alternation.primary_key());
        state.timing = accuracy.hit_object_timings(&targets, state.current_index, false, false);

        Session {
            targets,
            accuracy,
            alternation,
            bindings,
            w50,
            state,
            presses: 0,
            skipped: 0,
        }
    }

    fn tick(&mut self, session: &mut Session) {
        if self.game.is_paused() {
            if session.state.is_pressed {
                debug!("paused while holding, releasing");
                session.state.is_pressed = false;
                release_all(&mut self.actuator, &session.bindings);
            }
            return;
        }

        let clock = self.game.current_time();
        let now = clock + self.config.audio_offset;
        let index = session.state.current_index;
        let Some(target) = session.targets.get(index) else {
            return;
        };
        let (start_time, end_time, is_tap) = (target.start_time, target.end_time, target.is_tap());

        if now < start_time - session.w50 {
            return;
        }

        if !session.state.is_pressed {
            let cursor = self.game.cursor_position();
            let result = session
                .accuracy
                .hit_scan_result(&session.targets, index, clock, cursor);
            if result != HitScanResult::Wait {
                trace!("target {index}: {result:?} at {now}ms");
            }
            match result {
                HitScanResult::CanHit if now >= start_time + session.state.timing.start_offset => {
                    self.press(session, now);
                }
                HitScanResult::ShouldHit => self.press(session, now),
                HitScanResult::MoveToNextObject => {
                    debug!("target {index} skipped at {now}ms");
                    session.skipped += 1;
                    self.advance(session);
                }
                _ => {}
            }
            return;
        }

        let release_anchor = if is_tap { session.state.press_time } else { end_time };
        if now < release_anchor + session.state.timing.hold_time {
            return;
        }

        self.advance(session);
        if let Some(next) = session.targets.get(session.state.current_index) {
            if next.is_spinner() && next.start_time - end_time <= self.config.hold_before_spinner_time {
                trace!("holding into spinner at {}ms", next.start_time);
                return;
            }
        }

        debug!("target {index} released at {now}ms");
        session.state.is_pressed = false;
        release_all(&mut self.actuator, &session.bindings);
    }

    fn press(&mut self, session: &mut Session, now: i32) {
        let state = &mut session.state;
        let key = session
            .alternation
            .press_key(&mut state.active_key, state.alternate);
        self.actuator.press(key, &session.bindings);
        state.is_pressed = true;
        state.press_time = now;
        session.presses += 1;
        debug!("target {} pressed with {key:?} at {now}ms", state.current_index);
    }

    /// Move to the next target and prepare its key and timing.
    fn advance(&mut self, session: &mut Session) {
        let state = &mut session.state;
        state.current_index += 1;
        state.alternate = session.alternation.decide(&session.targets, state.current_index);
        state.active_key = session.alternation.next_key(state.active_key, state.alternate);
        state.timing = session.accuracy.hit_object_timings(
            &session.targets,
            state.current_index,
            state.alternate.contains(AlternateResult::ALTERNATE_THIS_NOTE),
            self.actuator.is_key_held(self.config.double_delay_key),
        );
    }
}
