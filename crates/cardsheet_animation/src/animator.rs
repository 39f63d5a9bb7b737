//! Interruptible property animator
//!
//! A `PropertyAnimator` moves one value from `from` to `to` over a duration
//! through a [`TimingCurve`]. Unlike a fire-and-forget keyframe it can be:
//!
//! - paused mid-flight, reporting its fraction complete
//! - scrubbed to any fraction while paused (linear, no curve applied)
//! - continued forward or reversed from wherever it was left
//!
//! Continuing blends the *remaining* distance through the timing curve, so
//! the value never jumps when a scrubbed animation is released.
//!
//! ```
//! use std::time::Duration;
//! use cardsheet_animation::{AnimatingPosition, PropertyAnimator, TimingCurve};
//!
//! let mut radius = PropertyAnimator::new(0.0, 12.0, Duration::from_millis(900), TimingCurve::Linear);
//! radius.start();
//! radius.pause();
//! radius.set_fraction_complete(0.5);
//! assert_eq!(radius.value(), 6.0);
//!
//! radius.continue_animation(false, 1.0);
//! assert_eq!(radius.tick(Duration::from_millis(500)), Some(AnimatingPosition::End));
//! assert_eq!(radius.value(), 12.0);
//! ```

use std::time::Duration;

use crate::curve::TimingCurve;
use crate::values::Interpolate;

/// Lifecycle of an animator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimatorState {
    /// Created but never started or paused
    #[default]
    Inactive,
    /// Started; either running or paused
    Active,
    /// Ran to one of its ends
    Finished,
}

/// Where an animator came to rest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatingPosition {
    /// At the `to` value
    End,
    /// Back at the `from` value
    Start,
}

/// A running stretch of the animation, from one fraction to an end.
#[derive(Clone, Copy, Debug)]
struct Segment {
    origin: f32,
    target: f32,
    elapsed: f32,
    length: f32,
}

/// Interruptible animation of a single `f32` property
#[derive(Clone, Debug)]
pub struct PropertyAnimator {
    from: f32,
    to: f32,
    duration: f32,
    curve: TimingCurve,
    state: AnimatorState,
    fraction: f32,
    reversed: bool,
    segment: Option<Segment>,
}

impl PropertyAnimator {
    pub fn new(from: f32, to: f32, duration: Duration, curve: TimingCurve) -> Self {
        Self {
            from,
            to,
            duration: duration.as_secs_f32(),
            curve,
            state: AnimatorState::Inactive,
            fraction: 0.0,
            reversed: false,
            segment: None,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Whether the animator is advancing on `tick`
    pub fn is_running(&self) -> bool {
        self.segment.is_some()
    }

    /// Active but not advancing
    pub fn is_paused(&self) -> bool {
        self.state == AnimatorState::Active && self.segment.is_none()
    }

    /// Whether the last start/continue ran back toward `from`
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Progress from `from` (0.0) to `to` (1.0)
    pub fn fraction_complete(&self) -> f32 {
        self.fraction
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        self.from.lerp(&self.to, self.fraction)
    }

    /// Start running toward `to` from the current fraction
    pub fn start(&mut self) {
        if self.state == AnimatorState::Finished {
            return;
        }
        self.state = AnimatorState::Active;
        self.reversed = false;
        self.run_toward(1.0, 1.0);
    }

    /// Stop advancing and return the fraction complete.
    ///
    /// Pausing an inactive animator activates it in place.
    pub fn pause(&mut self) -> f32 {
        if self.state != AnimatorState::Finished {
            self.state = AnimatorState::Active;
            self.segment = None;
        }
        self.fraction
    }

    /// Scrub to a fraction. Values outside `[0, 1]` are clamped.
    ///
    /// Non-finite input is ignored. A running animator keeps running from the
    /// new fraction.
    pub fn set_fraction_complete(&mut self, fraction: f32) {
        if self.state == AnimatorState::Finished || !fraction.is_finite() {
            return;
        }
        self.fraction = fraction.clamp(0.0, 1.0);
        if let Some(segment) = self.segment {
            self.run_toward(segment.target, 1.0);
        }
    }

    /// Resume a paused animator toward `to`, or back to `from` when `reversed`.
    ///
    /// The remaining time is the share of the duration left to cover, scaled
    /// by `duration_factor`. A factor of zero keeps the natural rate.
    pub fn continue_animation(&mut self, reversed: bool, duration_factor: f32) {
        if self.state == AnimatorState::Finished {
            return;
        }
        self.state = AnimatorState::Active;
        self.reversed = reversed;
        let target = if reversed { 0.0 } else { 1.0 };
        let factor = if duration_factor > 0.0 {
            duration_factor
        } else {
            1.0
        };
        self.run_toward(target, factor);
    }

    /// Advance by `dt`. Returns the rest position once, on the tick the
    /// animator reaches an end.
    pub fn tick(&mut self, dt: Duration) -> Option<AnimatingPosition> {
        let mut segment = self.segment?;
        segment.elapsed += dt.as_secs_f32();

        if segment.elapsed >= segment.length {
            self.fraction = segment.target;
            self.segment = None;
            self.state = AnimatorState::Finished;
            let position = if segment.target >= 1.0 {
                AnimatingPosition::End
            } else {
                AnimatingPosition::Start
            };
            return Some(position);
        }

        let eased = self.curve.sample(segment.elapsed / segment.length);
        self.fraction = segment.origin + (segment.target - segment.origin) * eased;
        self.segment = Some(segment);
        None
    }

    fn run_toward(&mut self, target: f32, factor: f32) {
        let distance = (target - self.fraction).abs();
        self.segment = Some(Segment {
            origin: self.fraction,
            target,
            elapsed: 0.0,
            length: self.duration * distance * factor,
        });
    }
}
