//! Transition sessions
//!
//! A session bundles the three animations that move the card between its
//! two states: visible height, corner radius and overlay blur. They are
//! created, paused, scrubbed, resumed and completed together, so at every
//! point they report the same fraction complete.
//!
//! Progress always runs from the state the card is leaving (0.0) to the
//! session's target (1.0), whichever way the card moves on screen.

use std::time::Duration;

use cardsheet_animation::{
    AnimatingPosition, AnimationScheduler, AnimatorId, PropertyAnimator, TimingCurve,
};
use tokio::sync::oneshot;

use crate::config::CardConfig;
use crate::state::{PanelState, TransitionOutcome};

/// Control surface of an interruptible transition
pub trait AnimatableSession {
    /// State the session moves toward
    fn target(&self) -> PanelState;

    /// Stop advancing; returns the fraction complete
    fn pause(&mut self) -> f32;

    /// Scrub to a fraction complete, clamped to `[0, 1]`
    fn set_progress(&mut self, progress: f32);

    /// Run on to the target at the natural rate
    fn resume(&mut self);

    /// Run back to the starting state at the natural rate
    fn resume_reversed(&mut self);

    fn progress(&self) -> f32;

    fn is_running(&self) -> bool;

    fn is_paused(&self) -> bool;

    fn is_reversed(&self) -> bool;

    /// Advance by `dt`; yields the outcome exactly once, when the session ends
    fn tick(&mut self, dt: Duration) -> Option<TransitionOutcome>;
}

/// Resting property values for one panel state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestingValues {
    /// Height of the panel showing above the container's bottom edge
    pub visible_height: f32,
    pub corner_radius: f32,
    pub blur_intensity: f32,
}

impl RestingValues {
    pub fn for_state(state: PanelState, config: &CardConfig) -> Self {
        match state {
            PanelState::Expanded => Self {
                visible_height: config.card_height,
                corner_radius: config.corner_radius,
                blur_intensity: 1.0,
            },
            PanelState::Collapsed => Self {
                visible_height: config.handle_area_height,
                corner_radius: 0.0,
                blur_intensity: 0.0,
            },
        }
    }
}

/// The three synchronized animations of one card transition
pub struct TransitionSession {
    target: PanelState,
    scheduler: AnimationScheduler,
    visible_height: AnimatorId,
    corner_radius: AnimatorId,
    blur: AnimatorId,
    completed: bool,
    waiters: Vec<oneshot::Sender<TransitionOutcome>>,
}

impl TransitionSession {
    /// Create the animations toward `target` and start them together
    pub fn start(target: PanelState, duration: Duration, config: &CardConfig) -> Self {
        let curve = config.timing_curve();
        let mut session = Self::prepare(target, duration, curve, config);
        session.for_each(PropertyAnimator::start);
        tracing::debug!(
            "TransitionSession: started toward {:?} over {:?}",
            target,
            duration
        );
        session
    }

    fn prepare(
        target: PanelState,
        duration: Duration,
        curve: TimingCurve,
        config: &CardConfig,
    ) -> Self {
        let from = RestingValues::for_state(target.next(), config);
        let to = RestingValues::for_state(target, config);

        let mut scheduler = AnimationScheduler::new();
        let visible_height = scheduler.add(PropertyAnimator::new(
            from.visible_height,
            to.visible_height,
            duration,
            curve,
        ));
        let corner_radius = scheduler.add(PropertyAnimator::new(
            from.corner_radius,
            to.corner_radius,
            duration,
            curve,
        ));
        let blur = scheduler.add(PropertyAnimator::new(
            from.blur_intensity,
            to.blur_intensity,
            duration,
            curve,
        ));

        Self {
            target,
            scheduler,
            visible_height,
            corner_radius,
            blur,
            completed: false,
            waiters: Vec::new(),
        }
    }

    fn ids(&self) -> [AnimatorId; 3] {
        [self.visible_height, self.corner_radius, self.blur]
    }

    fn for_each<F>(&mut self, f: F)
    where
        F: FnMut(&mut PropertyAnimator),
    {
        let ids = self.ids();
        self.scheduler.for_each(&ids, f);
    }

    fn value(&self, id: AnimatorId) -> f32 {
        self.scheduler.get(id).map_or(0.0, PropertyAnimator::value)
    }

    fn lead(&self) -> Option<&PropertyAnimator> {
        self.scheduler.get(self.visible_height)
    }

    pub fn visible_height(&self) -> f32 {
        self.value(self.visible_height)
    }

    pub fn corner_radius(&self) -> f32 {
        self.value(self.corner_radius)
    }

    pub fn blur_intensity(&self) -> f32 {
        self.value(self.blur)
    }

    /// Fraction complete of every animation in the session
    pub fn fractions(&self) -> [f32; 3] {
        self.ids().map(|id| {
            self.scheduler
                .get(id)
                .map_or(0.0, PropertyAnimator::fraction_complete)
        })
    }

    /// Number of animations currently paused
    pub fn paused_count(&self) -> usize {
        self.ids()
            .iter()
            .filter_map(|id| self.scheduler.get(*id))
            .filter(|a| a.is_paused())
            .count()
    }

    /// Register a one-shot receiver for this session's outcome.
    ///
    /// A session that has already completed returns a closed receiver.
    pub fn completion(&mut self) -> oneshot::Receiver<TransitionOutcome> {
        let (tx, rx) = oneshot::channel();
        if !self.completed {
            self.waiters.push(tx);
        }
        rx
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn complete(&mut self, position: AnimatingPosition) -> TransitionOutcome {
        self.completed = true;
        let outcome = TransitionOutcome::new(self.target, position);
        for waiter in self.waiters.drain(..) {
            // Receiver may have been dropped
            let _ = waiter.send(outcome);
        }
        tracing::debug!(
            "TransitionSession: finished at {:?}, resting {:?}",
            position,
            outcome.resting
        );
        outcome
    }
}

impl AnimatableSession for TransitionSession {
    fn target(&self) -> PanelState {
        self.target
    }

    fn pause(&mut self) -> f32 {
        self.for_each(|a| {
            a.pause();
        });
        self.progress()
    }

    fn set_progress(&mut self, progress: f32) {
        self.for_each(|a| a.set_fraction_complete(progress));
    }

    fn resume(&mut self) {
        self.for_each(|a| a.continue_animation(false, 0.0));
    }

    fn resume_reversed(&mut self) {
        self.for_each(|a| a.continue_animation(true, 0.0));
    }

    fn progress(&self) -> f32 {
        self.lead().map_or(0.0, PropertyAnimator::fraction_complete)
    }

    fn is_running(&self) -> bool {
        self.lead().is_some_and(PropertyAnimator::is_running)
    }

    fn is_paused(&self) -> bool {
        self.lead().is_some_and(PropertyAnimator::is_paused)
    }

    fn is_reversed(&self) -> bool {
        self.lead().is_some_and(PropertyAnimator::is_reversed)
    }

    fn tick(&mut self, dt: Duration) -> Option<TransitionOutcome> {
        if self.completed {
            return None;
        }
        let finished = self.scheduler.tick(dt);
        let (_, position) = *finished.first()?;
        if self.scheduler.has_active_animations() {
            tracing::warn!("TransitionSession: animations finished out of step");
            return None;
        }
        Some(self.complete(position))
    }
}
