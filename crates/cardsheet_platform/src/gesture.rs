//! Recognized gesture phases
//!
//! These are the only inputs the card controller understands. Hosts with a
//! native gesture system can construct them directly; others can feed raw
//! touches through [`GestureRecognizer`](crate::GestureRecognizer).

/// Phase of a tap gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapPhase {
    /// Finger down, not yet a tap
    Began,
    /// Finger lifted within the touch slop
    Ended,
    /// Moved too far or cancelled by the system
    Cancelled,
}

/// Phase of a vertical pan gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanPhase {
    /// The touch crossed the drag threshold
    Began,
    /// The touch moved
    Changed {
        /// Vertical distance from the touch start, positive downward
        translation_y: f32,
        /// Vertical velocity in points per second, positive downward
        velocity_y: f32,
    },
    /// The touch lifted
    Ended {
        /// Release velocity in points per second, positive downward
        velocity_y: f32,
    },
    /// The system took the touch away
    Cancelled,
}

/// A recognized gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Tap(TapPhase),
    Pan(PanPhase),
}
