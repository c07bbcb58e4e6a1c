use serde::{Deserialize, Serialize};

use crate::{PLAYFIELD_CENTRE, Point};

/// Kind of a playable beatmap element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Tap,
    Hold,
    Spinner,
}

/// Flattened path a hold target's ball travels along.
///
/// `spans` is the number of times the ball traverses the path; every odd
/// span runs backwards (a repeat).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldPath {
    pub points: Vec<Point>,
    #[serde(default = "default_spans")]
    pub spans: u32,
}

fn default_spans() -> u32 {
    1
}

impl HoldPath {
    pub fn new(points: Vec<Point>, spans: u32) -> Self {
        Self {
            points,
            spans: spans.max(1),
        }
    }

    /// Straight path between two points, traversed once.
    pub fn linear(from: Point, to: Point) -> Self {
        Self::new(vec![from, to], 1)
    }

    /// Total arc length of a single span.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Ball position for overall progress in `0.0..=1.0` across all spans.
    pub fn position_at(&self, progress: f32) -> Point {
        let spans = self.spans.max(1);
        let scaled = progress.clamp(0.0, 1.0) * spans as f32;
        let span = (scaled.floor() as u32).min(spans - 1);

        let mut local = scaled - span as f32;
        if span % 2 == 1 {
            local = 1.0 - local;
        }

        self.point_at_distance(local * self.length())
    }

    fn point_at_distance(&self, distance: f32) -> Point {
        let Some(&first) = self.points.first() else {
            return Point::ZERO;
        };

        let mut remaining = distance;
        let mut last = first;
        for w in self.points.windows(2) {
            let segment = w[0].distance(w[1]);
            if segment > 0.0 && remaining <= segment {
                return w[0].lerp(w[1], remaining / segment);
            }
            remaining -= segment;
            last = w[1];
        }

        last
    }
}

/// One playable beatmap element. Times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    pub start_time: i32,
    pub end_time: i32,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HoldPath>,
}

impl Target {
    pub fn tap(time: i32, position: Point) -> Self {
        Self {
            kind: TargetKind::Tap,
            start_time: time,
            end_time: time,
            position,
            path: None,
        }
    }

    /// Hold target whose static position is the head of its path.
    pub fn hold(start_time: i32, end_time: i32, path: HoldPath) -> Self {
        let position = path.points.first().copied().unwrap_or(Point::ZERO);
        Self {
            kind: TargetKind::Hold,
            start_time,
            end_time,
            position,
            path: Some(path),
        }
    }

    pub fn spinner(start_time: i32, end_time: i32) -> Self {
        Self {
            kind: TargetKind::Spinner,
            start_time,
            end_time,
            position: PLAYFIELD_CENTRE,
            path: None,
        }
    }

    pub fn is_tap(&self) -> bool {
        self.kind == TargetKind::Tap
    }

    pub fn is_hold(&self) -> bool {
        self.kind == TargetKind::Hold
    }

    pub fn is_spinner(&self) -> bool {
        self.kind == TargetKind::Spinner
    }

    pub fn duration(&self) -> i32 {
        self.end_time - self.start_time
    }

    /// Where the target should be aimed at `time`.
    ///
    /// Holds follow their path; everything else is static.
    pub fn position_at_time(&self, time: i32) -> Point {
        match (&self.path, self.kind) {
            (Some(path), TargetKind::Hold) => {
                let duration = self.duration();
                let progress = if duration > 0 {
                    (time - self.start_time) as f32 / duration as f32
                } else {
                    0.0
                };
                path.position_at(progress)
            }
            _ => self.position,
        }
    }
}
