//! Cardsheet
//!
//! An interactive bottom sheet: a card the user taps or drags between a
//! collapsed handle strip and an expanded panel, with interruptible spring
//! transitions of its position, corner radius and background blur.
//!
//! - [`CardTransitionController`] - gesture-driven state machine
//! - [`TransitionSession`] - the three synchronized animations of a transition
//! - [`CardConfig`] - geometry, timing and release behavior
//! - [`CardSurface`] - where sampled frames go
//!
//! The controller is single-threaded and headless: the host forwards
//! gestures, calls [`CardTransitionController::tick`] once per frame and
//! presents the sampled [`CardFrame`].

pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod state;
pub mod surface;

pub use config::{CardConfig, ReleasePolicy};
pub use controller::CardTransitionController;
pub use error::{ConfigError, Result};
pub use session::{AnimatableSession, RestingValues, TransitionSession};
pub use state::{PanelState, SessionState, TransitionOutcome};
pub use surface::{BlurStyle, CardFrame, CardSurface, OverlayBlur};

pub use cardsheet_animation::{AnimatingPosition, TimingCurve};
pub use cardsheet_platform::{
    Gesture, GestureRecognizer, PanPhase, PlatformError, TapPhase, TouchEvent,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{CardConfig, ReleasePolicy};
    pub use crate::controller::CardTransitionController;
    pub use crate::session::AnimatableSession;
    pub use crate::state::{PanelState, TransitionOutcome};
    pub use crate::surface::{BlurStyle, CardFrame, CardSurface, OverlayBlur};
    pub use cardsheet_platform::prelude::*;
}
