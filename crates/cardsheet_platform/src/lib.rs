//! Cardsheet Input Layer
//!
//! Platform-agnostic touch events and the gesture phases the card
//! controller consumes.
//!
//! - [`TouchEvent`] - raw single-finger input from the host
//! - [`Gesture`] - recognized tap and pan phases
//! - [`GestureRecognizer`] - touch slop and velocity tracking
//! - [`PlatformError`] - touch streams the recognizer rejects
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use cardsheet_platform::prelude::*;
//!
//! let mut recognizer = GestureRecognizer::new();
//! let down = TouchEvent::Started { id: 7, x: 10.0, y: 700.0, time: Duration::ZERO };
//! let up = TouchEvent::Ended { id: 7, x: 10.0, y: 701.0, time: Duration::from_millis(80) };
//!
//! recognizer.handle(&down)?;
//! assert_eq!(recognizer.handle(&up)?.as_slice(), &[Gesture::Tap(TapPhase::Ended)]);
//! # Ok::<(), cardsheet_platform::PlatformError>(())
//! ```

mod error;
mod gesture;
mod input;
mod recognizer;

pub use error::{PlatformError, Result};
pub use gesture::{Gesture, PanPhase, TapPhase};
pub use input::TouchEvent;
pub use recognizer::{GestureRecognizer, Gestures, DRAG_THRESHOLD, MAX_FLING_VELOCITY};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::PlatformError;
    pub use crate::gesture::{Gesture, PanPhase, TapPhase};
    pub use crate::input::TouchEvent;
    pub use crate::recognizer::GestureRecognizer;
}
