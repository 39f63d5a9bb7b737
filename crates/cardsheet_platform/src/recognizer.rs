//! Tap / pan recognition from raw touches
//!
//! Tracks a single touch at a time. A touch that stays within
//! [`DRAG_THRESHOLD`] of where it started is a tap; once it moves further it
//! becomes a pan and the tap is cancelled. Further touches while one is
//! tracked are ignored until they lift.
//!
//! Events that contradict the stream so far (an id that never started, a
//! timestamp going backwards, a NaN position) are rejected with a
//! [`PlatformError`] and leave the recognizer unchanged.

use std::time::Duration;

use smallvec::{smallvec, SmallVec};

use crate::error::{PlatformError, Result};
use crate::gesture::{Gesture, PanPhase, TapPhase};
use crate::input::TouchEvent;

/// Touch slop in logical pixels.
///
/// Movement beyond this distance from the press position starts a pan and
/// cancels the pending tap.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Samples older than this are ignored for velocity estimation
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Gestures emitted for one touch event
pub type Gestures = SmallVec<[Gesture; 3]>;

struct Tracking {
    id: u64,
    start: (f32, f32),
    panning: bool,
    last_time: Duration,
    samples: SmallVec<[(Duration, f32); 8]>,
}

impl Tracking {
    fn check_time(&self, time: Duration) -> Result<()> {
        if time < self.last_time {
            return Err(PlatformError::NonMonotonicTime {
                id: self.id,
                previous: self.last_time,
                time,
            });
        }
        Ok(())
    }

    fn record(&mut self, time: Duration, y: f32) {
        self.last_time = time;
        self.samples.push((time, y));
        self.samples
            .retain(|(t, _)| time.saturating_sub(*t) <= VELOCITY_WINDOW);
    }

    fn velocity(&self, max: f32) -> f32 {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return 0.0;
        };
        let dt = last.0.saturating_sub(first.0).as_secs_f32();
        if dt <= f32::EPSILON {
            return 0.0;
        }
        ((last.1 - first.1) / dt).clamp(-max, max)
    }
}

/// Turns a stream of touches into tap and pan phases
pub struct GestureRecognizer {
    drag_threshold: f32,
    max_fling_velocity: f32,
    tracking: Option<Tracking>,
    /// Touches that started while another was tracked
    ignored: SmallVec<[u64; 4]>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            max_fling_velocity: MAX_FLING_VELOCITY,
            tracking: None,
            ignored: SmallVec::new(),
        }
    }

    /// Override the touch slop
    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold.max(0.0);
        self
    }

    /// Override the velocity cap
    pub fn with_max_fling_velocity(mut self, velocity: f32) -> Self {
        self.max_fling_velocity = velocity.abs();
        self
    }

    /// Whether a touch is being tracked
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Whether the tracked touch has become a pan
    pub fn is_panning(&self) -> bool {
        self.tracking.as_ref().is_some_and(|t| t.panning)
    }

    /// Feed one touch event, returning the gestures it produced
    pub fn handle(&mut self, event: &TouchEvent) -> Result<Gestures> {
        if let Some((x, y)) = event.position() {
            if !x.is_finite() || !y.is_finite() {
                return Err(PlatformError::InvalidPosition {
                    id: event.id(),
                    x,
                    y,
                });
            }
        }

        let id = event.id();
        let tracked = self.tracking.as_ref().is_some_and(|t| t.id == id);
        if !tracked {
            return self.handle_untracked(event);
        }

        match *event {
            TouchEvent::Started { id, .. } => Err(PlatformError::DuplicateTouch(id)),
            TouchEvent::Moved { x, y, time, .. } => self.moved(x, y, time),
            TouchEvent::Ended { y, time, .. } => self.ended(y, time),
            TouchEvent::Cancelled { .. } => {
                let panning = self.is_panning();
                self.tracking = None;
                if panning {
                    Ok(smallvec![Gesture::Pan(PanPhase::Cancelled)])
                } else {
                    Ok(smallvec![Gesture::Tap(TapPhase::Cancelled)])
                }
            }
        }
    }

    fn handle_untracked(&mut self, event: &TouchEvent) -> Result<Gestures> {
        let id = event.id();
        match *event {
            TouchEvent::Started { x, y, time, .. } => {
                if self.ignored.contains(&id) {
                    return Err(PlatformError::DuplicateTouch(id));
                }
                if self.tracking.is_some() {
                    tracing::trace!("GestureRecognizer: ignoring extra touch {}", id);
                    self.ignored.push(id);
                    return Ok(Gestures::new());
                }
                let mut tracking = Tracking {
                    id,
                    start: (x, y),
                    panning: false,
                    last_time: time,
                    samples: SmallVec::new(),
                };
                tracking.record(time, y);
                self.tracking = Some(tracking);
                Ok(smallvec![Gesture::Tap(TapPhase::Began)])
            }
            TouchEvent::Moved { .. } if self.ignored.contains(&id) => Ok(Gestures::new()),
            TouchEvent::Ended { .. } | TouchEvent::Cancelled { .. }
                if self.ignored.contains(&id) =>
            {
                self.ignored.retain(|ignored| *ignored != id);
                Ok(Gestures::new())
            }
            _ => Err(PlatformError::UnknownTouch(id)),
        }
    }

    fn moved(&mut self, x: f32, y: f32, time: Duration) -> Result<Gestures> {
        let threshold = self.drag_threshold;
        let max = self.max_fling_velocity;
        let Some(tracking) = self.tracking.as_mut() else {
            return Ok(Gestures::new());
        };
        tracking.check_time(time)?;
        tracking.record(time, y);

        let mut out = Gestures::new();
        if !tracking.panning {
            let dx = x - tracking.start.0;
            let dy = y - tracking.start.1;
            if (dx * dx + dy * dy).sqrt() <= threshold {
                return Ok(out);
            }
            tracking.panning = true;
            tracing::debug!("GestureRecognizer: touch {} became a pan", tracking.id);
            out.push(Gesture::Tap(TapPhase::Cancelled));
            out.push(Gesture::Pan(PanPhase::Began));
        }
        out.push(Gesture::Pan(PanPhase::Changed {
            translation_y: y - tracking.start.1,
            velocity_y: tracking.velocity(max),
        }));
        Ok(out)
    }

    fn ended(&mut self, y: f32, time: Duration) -> Result<Gestures> {
        if let Some(tracking) = &self.tracking {
            tracking.check_time(time)?;
        }
        let Some(mut tracking) = self.tracking.take() else {
            return Ok(Gestures::new());
        };
        if tracking.panning {
            tracking.record(time, y);
            Ok(smallvec![Gesture::Pan(PanPhase::Ended {
                velocity_y: tracking.velocity(self.max_fling_velocity),
            })])
        } else {
            Ok(smallvec![Gesture::Tap(TapPhase::Ended)])
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
