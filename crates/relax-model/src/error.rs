use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("target {index} starts at {start_time}ms, before the previous target ({previous}ms)")]
    NonMonotonic {
        index: usize,
        start_time: i32,
        previous: i32,
    },

    #[error("target {index} ends at {end_time}ms, before its start ({start_time}ms)")]
    EndBeforeStart {
        index: usize,
        start_time: i32,
        end_time: i32,
    },

    #[error("hold target {index} has no path points")]
    EmptyHoldPath { index: usize },

    #[error("tap target {index} has a duration of {duration}ms")]
    TapWithDuration { index: usize, duration: i32 },
}
