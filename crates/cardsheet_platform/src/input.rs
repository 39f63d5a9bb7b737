//! Raw touch input

use std::time::Duration;

/// Touch events for touchscreens
///
/// `time` is a monotonic timestamp supplied by the host; only differences
/// between timestamps are used.
#[derive(Clone, Debug, PartialEq)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        /// X position in view coordinates
        x: f32,
        /// Y position in view coordinates
        y: f32,
        time: Duration,
    },
    /// A touch moved
    Moved {
        id: u64,
        x: f32,
        y: f32,
        time: Duration,
    },
    /// A touch ended
    Ended {
        id: u64,
        x: f32,
        y: f32,
        time: Duration,
    },
    /// A touch was cancelled (e.g., by system gesture)
    Cancelled { id: u64 },
}

impl TouchEvent {
    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id, .. } => *id,
            TouchEvent::Cancelled { id } => *id,
        }
    }

    /// Get the position (returns None for Cancelled)
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            TouchEvent::Started { x, y, .. } => Some((*x, *y)),
            TouchEvent::Moved { x, y, .. } => Some((*x, *y)),
            TouchEvent::Ended { x, y, .. } => Some((*x, *y)),
            TouchEvent::Cancelled { .. } => None,
        }
    }

    /// Get the timestamp (returns None for Cancelled)
    pub fn time(&self) -> Option<Duration> {
        match self {
            TouchEvent::Started { time, .. }
            | TouchEvent::Moved { time, .. }
            | TouchEvent::Ended { time, .. } => Some(*time),
            TouchEvent::Cancelled { .. } => None,
        }
    }
}
