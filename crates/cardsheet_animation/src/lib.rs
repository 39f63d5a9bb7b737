//! Cardsheet Animation System
//!
//! Headless property animation for interactive transitions.
//!
//! # Features
//!
//! - **Timing Curves**: linear, ease-in-out, and normalized spring step
//!   responses for any damping ratio
//! - **Interruptible Animators**: pause, scrub by fraction, continue or reverse
//! - **Scheduler**: slotmap-backed registry ticked once per frame

pub mod animator;
pub mod curve;
pub mod scheduler;
pub mod values;

pub use animator::{AnimatingPosition, AnimatorState, PropertyAnimator};
pub use curve::TimingCurve;
pub use scheduler::{AnimationScheduler, AnimatorId, Finished};
pub use values::Interpolate;
