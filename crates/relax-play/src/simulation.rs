//! Scripted game for driving [`PlaybackLoop`](crate::PlaybackLoop) without a
//! running client. The clock only moves when the loop delays through a
//! [`SimulatedTicker`].

use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use relax_input::KeyBindings;
use relax_model::{DifficultyContext, Mods, Point, TargetSequence};
use relax_timing::TimingSource;

use crate::{GameStateProvider, StopHandle};

/// Where the simulated cursor sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorMode {
    Fixed(Point),
    /// On the target closest in time, following hold paths.
    FollowTargets,
}

#[derive(Debug)]
struct Clock {
    now: i32,
    scheduled_stop: Option<(i32, StopHandle)>,
}

#[derive(Debug)]
pub struct SimulatedGame {
    clock: Mutex<Clock>,
    targets: TargetSequence,
    difficulty: DifficultyContext,
    mods: Mods,
    bindings: KeyBindings,
    cursor: CursorMode,
    start_index: usize,
    pauses: Vec<Range<i32>>,
    play_until: i32,
}

impl SimulatedGame {
    /// Game starting one second before the first target and playing until
    /// one second after the last one ends.
    pub fn new(targets: TargetSequence) -> Self {
        let first = targets.get(0).map_or(0, |t| t.start_time);
        let last = targets.iter().map(|t| t.end_time).max().unwrap_or(0);
        Self {
            clock: Mutex::new(Clock {
                now: first - 1000,
                scheduled_stop: None,
            }),
            targets,
            difficulty: DifficultyContext::default(),
            mods: Mods::empty(),
            bindings: KeyBindings::default(),
            cursor: CursorMode::FollowTargets,
            start_index: 0,
            pauses: Vec::new(),
            play_until: last + 1000,
        }
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyContext) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_mods(mut self, mods: Mods) -> Self {
        self.mods = mods;
        self.difficulty.audio_rate = mods.audio_rate();
        self
    }

    pub fn with_cursor(mut self, cursor: CursorMode) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn starting_at(self, time: i32) -> Self {
        self.lock().now = time;
        self
    }

    pub fn starting_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Report paused while the clock is in `range`.
    pub fn paused_between(mut self, range: Range<i32>) -> Self {
        self.pauses.push(range);
        self
    }

    /// `can_play` turns false once the clock reaches `time`.
    pub fn playing_until(mut self, time: i32) -> Self {
        self.play_until = time;
        self
    }

    /// Request `handle.stop()` when the clock reaches `time`.
    pub fn stop_at(self, time: i32, handle: StopHandle) -> Self {
        self.lock().scheduled_stop = Some((time, handle));
        self
    }

    pub fn advance(&self, ms: i32) {
        let mut clock = self.lock();
        clock.now += ms;
        let now = clock.now;
        if let Some((at, handle)) = &clock.scheduled_stop {
            if now >= *at {
                handle.stop();
            }
        }
    }

    /// Timing source that advances this game's clock instead of sleeping.
    pub fn ticker(self: &Arc<Self>) -> SimulatedTicker {
        SimulatedTicker {
            game: Arc::clone(self),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GameStateProvider for SimulatedGame {
    fn current_time(&self) -> i32 {
        self.lock().now
    }

    fn is_paused(&self) -> bool {
        let now = self.current_time();
        self.pauses.iter().any(|range| range.contains(&now))
    }

    fn can_play(&self) -> bool {
        self.current_time() < self.play_until
    }

    fn cursor_position(&self) -> Point {
        match self.cursor {
            CursorMode::Fixed(point) => point,
            CursorMode::FollowTargets => {
                let now = self.current_time();
                self.targets
                    .iter()
                    .min_by_key(|t| {
                        if now < t.start_time {
                            t.start_time - now
                        } else {
                            (now - t.end_time).max(0)
                        }
                    })
                    .map_or(Point::ZERO, |t| t.position_at_time(now))
            }
        }
    }

    fn active_target_index(&self) -> usize {
        self.start_index
    }

    fn target_sequence(&self) -> TargetSequence {
        self.targets.clone()
    }

    fn difficulty_context(&self) -> DifficultyContext {
        self.difficulty
    }

    fn active_modifiers(&self) -> Mods {
        self.mods
    }

    fn key_bindings(&self) -> KeyBindings {
        self.bindings
    }
}

/// Each delay advances the shared game clock by whole milliseconds.
#[derive(Debug, Clone)]
pub struct SimulatedTicker {
    game: Arc<SimulatedGame>,
}

impl TimingSource for SimulatedTicker {
    fn delay(&self, duration: Duration) {
        let ms = duration.as_millis().max(1);
        self.game.advance(i32::try_from(ms).unwrap_or(i32::MAX));
    }
}
