//! Input error types

use std::time::Duration;

use thiserror::Error;

/// Touch streams the recognizer cannot make sense of
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// A move or end for a touch that never started
    #[error("Unknown touch {0}")]
    UnknownTouch(u64),

    /// A touch reused the id of the one being tracked
    #[error("Touch {0} started twice")]
    DuplicateTouch(u64),

    /// Timestamps of a touch went backwards
    #[error("Touch {id} went back in time: {time:?} after {previous:?}")]
    NonMonotonicTime {
        id: u64,
        previous: Duration,
        time: Duration,
    },

    /// Position was NaN or infinite
    #[error("Touch {id} has a non-finite position ({x}, {y})")]
    InvalidPosition { id: u64, x: f32, y: f32 },
}

/// Result type for input operations
pub type Result<T> = std::result::Result<T, PlatformError>;
