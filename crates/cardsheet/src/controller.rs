//! Card transition controller
//!
//! Drives a bottom sheet between `Collapsed` and `Expanded` from tap and pan
//! gestures:
//!
//! - a tap while idle runs a full transition to the other state
//! - a pan pauses the transition (starting one if idle) and scrubs it with
//!   the finger; lifting the finger lets it run on
//! - a tap while a transition is in flight is ignored; a pan takes it over
//!
//! The panel state only flips when a transition reaches its end.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use cardsheet::prelude::*;
//!
//! let mut card = CardTransitionController::new(CardConfig::default())?;
//! card.set_container_size(390.0, 844.0);
//!
//! card.tap();
//! card.tick(Duration::from_millis(900));
//!
//! assert_eq!(card.state(), PanelState::Expanded);
//! assert_eq!(card.frame().origin_y, 844.0 - 600.0);
//! # Ok::<(), cardsheet::ConfigError>(())
//! ```

use std::time::Duration;

use cardsheet_platform::{Gesture, PanPhase, TapPhase};
use tokio::sync::{oneshot, watch};

use crate::config::{CardConfig, ReleasePolicy};
use crate::error::Result;
use crate::session::{AnimatableSession, RestingValues, TransitionSession};
use crate::state::{PanelState, SessionState, TransitionOutcome};
use crate::surface::{CardFrame, CardSurface, OverlayBlur};

/// Interactive bottom sheet state machine
pub struct CardTransitionController {
    config: CardConfig,
    container_width: f32,
    container_height: f32,
    state: PanelState,
    session: SessionState,
    cursor: f32,
    state_tx: watch::Sender<PanelState>,
}

impl CardTransitionController {
    /// Create a collapsed, idle controller.
    ///
    /// Fails if `config` does not pass [`CardConfig::validate`]. The
    /// container starts exactly as tall as the card; hosts call
    /// [`set_container_size`](Self::set_container_size) once laid out.
    pub fn new(config: CardConfig) -> Result<Self> {
        config.validate()?;
        let (state_tx, _) = watch::channel(PanelState::Collapsed);
        Ok(Self {
            container_width: 0.0,
            container_height: config.card_height,
            config,
            state: PanelState::Collapsed,
            session: SessionState::Idle,
            cursor: 0.0,
            state_tx,
        })
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Resting state of the panel
    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn session(&self) -> Option<&TransitionSession> {
        self.session.session()
    }

    pub fn is_transitioning(&self) -> bool {
        !self.session.is_idle()
    }

    /// Progress of the active transition, if any
    pub fn progress(&self) -> Option<f32> {
        self.session.session().map(AnimatableSession::progress)
    }

    /// Progress recorded when the current drag took over the transition
    pub fn interaction_cursor(&self) -> f32 {
        self.cursor
    }

    /// Stream of resting states; updated whenever a transition flips the panel
    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.state_tx.subscribe()
    }

    /// Resolves once when the active transition ends. `None` when idle.
    pub fn completion(&mut self) -> Option<oneshot::Receiver<TransitionOutcome>> {
        self.session.session_mut().map(TransitionSession::completion)
    }

    /// Size of the view the card is laid out in
    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.container_width = width;
        self.container_height = height;
    }

    /// Panel origin for a state, in container coordinates
    pub fn resting_origin_y(&self, state: PanelState) -> f32 {
        self.container_height - RestingValues::for_state(state, &self.config).visible_height
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// A completed tap. Starts a full transition when idle.
    pub fn tap(&mut self) {
        if !self.session.is_idle() {
            tracing::debug!("CardTransitionController: tap ignored, transition in flight");
            return;
        }
        self.begin_session();
    }

    /// A pan crossed the drag threshold.
    ///
    /// Pauses the running transition, starting one first if idle, and
    /// records where it was as the interaction cursor.
    pub fn drag_begin(&mut self) {
        if self.session.is_idle() {
            self.begin_session();
        }
        if let Some(session) = self.session.session_mut() {
            self.cursor = session.pause();
            tracing::debug!(
                "CardTransitionController: drag took over at {:.3}",
                self.cursor
            );
        }
    }

    /// The pan moved `delta_y` points (positive downward) from where it began
    pub fn drag_update(&mut self, delta_y: f32) {
        let fraction = delta_y / self.config.card_height;
        // Opening drags go up, closing drags go down
        let fraction = if self.state.is_expanded() {
            fraction
        } else {
            -fraction
        };
        let progress = fraction + self.cursor;

        match self.session.session_mut() {
            Some(session) => {
                session.set_progress(progress);
                tracing::trace!(
                    "CardTransitionController: scrub to {:.3} (requested {:.3})",
                    session.progress(),
                    progress
                );
            }
            None => tracing::trace!("CardTransitionController: drag update without a transition"),
        }
    }

    /// The pan lifted with `velocity_y` points per second (positive downward).
    ///
    /// Only a transition paused by [`drag_begin`](Self::drag_begin) is
    /// released; a transition already running keeps its timing.
    pub fn drag_end(&mut self, velocity_y: f32) {
        let policy = self.config.release_policy;
        let Some(session) = self.session.session_mut() else {
            return;
        };
        if !session.is_paused() {
            tracing::trace!("CardTransitionController: release ignored, transition not paused");
            return;
        }
        if should_reverse(policy, session.target(), session.progress(), velocity_y) {
            tracing::debug!(
                "CardTransitionController: release at {:.3}, reversing",
                session.progress()
            );
            session.resume_reversed();
        } else {
            tracing::debug!(
                "CardTransitionController: release at {:.3}, continuing to {:?}",
                session.progress(),
                session.target()
            );
            session.resume();
        }
    }

    /// The system cancelled the pan; treated as a release without velocity
    pub fn drag_cancel(&mut self) {
        self.drag_end(0.0);
    }

    /// Dispatch a tap phase. Only `Ended` acts.
    pub fn handle_tap(&mut self, phase: TapPhase) {
        match phase {
            TapPhase::Ended => self.tap(),
            TapPhase::Began | TapPhase::Cancelled => {}
        }
    }

    /// Dispatch a pan phase
    pub fn handle_pan(&mut self, phase: PanPhase) {
        match phase {
            PanPhase::Began => self.drag_begin(),
            PanPhase::Changed { translation_y, .. } => self.drag_update(translation_y),
            PanPhase::Ended { velocity_y } => self.drag_end(velocity_y),
            PanPhase::Cancelled => self.drag_cancel(),
        }
    }

    pub fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Tap(phase) => self.handle_tap(phase),
            Gesture::Pan(phase) => self.handle_pan(phase),
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance the active transition.
    ///
    /// Returns the outcome on the tick the transition ends; the panel state
    /// has already been updated by then.
    pub fn tick(&mut self, dt: Duration) -> Option<TransitionOutcome> {
        let outcome = self.session.session_mut()?.tick(dt)?;

        self.session = SessionState::Idle;
        self.cursor = 0.0;
        if outcome.flipped() {
            self.state = outcome.resting;
            self.state_tx.send_replace(self.state);
        }
        tracing::debug!(
            "CardTransitionController: transition ended, panel {:?}",
            self.state
        );
        Some(outcome)
    }

    /// Sample the current card properties
    pub fn frame(&self) -> CardFrame {
        let values = match self.session.session() {
            Some(session) => RestingValues {
                visible_height: session.visible_height(),
                corner_radius: session.corner_radius(),
                blur_intensity: session.blur_intensity(),
            },
            None => RestingValues::for_state(self.state, &self.config),
        };

        CardFrame {
            origin_y: self.container_height - values.visible_height,
            width: self.container_width,
            height: self.config.card_height,
            corner_radius: values.corner_radius,
            blur: OverlayBlur {
                style: self.config.blur_style,
                intensity: values.blur_intensity,
            },
        }
    }

    /// Push the current frame to a surface
    pub fn present<S: CardSurface + ?Sized>(&self, surface: &mut S) {
        surface.apply(&self.frame());
    }

    fn begin_session(&mut self) {
        let target = self.state.next();
        let session = TransitionSession::start(target, self.config.duration(), &self.config);
        self.session = SessionState::Running(session);
        self.cursor = 0.0;
    }
}

/// Whether a released drag should run back instead of on
fn should_reverse(policy: ReleasePolicy, target: PanelState, progress: f32, velocity_y: f32) -> bool {
    match policy {
        ReleasePolicy::Continue => false,
        ReleasePolicy::Directional {
            progress_threshold,
            fling_velocity,
        } => {
            // Positive when moving toward the target
            let toward = if target.is_expanded() {
                -velocity_y
            } else {
                velocity_y
            };
            if toward.abs() > fling_velocity {
                toward < 0.0
            } else {
                progress < progress_threshold && toward <= 0.0
            }
        }
    }
}
