//! Animation scheduler
//!
//! Owns a set of property animators and advances them together each frame.
//! The scheduler is single-threaded: the host's event loop calls [`tick`]
//! from the UI thread and reads values back before drawing.
//!
//! [`tick`]: AnimationScheduler::tick

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::animator::{AnimatingPosition, PropertyAnimator};

new_key_type! {
    /// Handle to a registered property animator
    pub struct AnimatorId;
}

/// Animators that reached an end during one tick
pub type Finished = SmallVec<[(AnimatorId, AnimatingPosition); 4]>;

/// Ticks every registered animator
pub struct AnimationScheduler {
    animators: SlotMap<AnimatorId, PropertyAnimator>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animators: SlotMap::with_key(),
        }
    }

    /// Register an animator. It is not started.
    pub fn add(&mut self, animator: PropertyAnimator) -> AnimatorId {
        self.animators.insert(animator)
    }

    pub fn get(&self, id: AnimatorId) -> Option<&PropertyAnimator> {
        self.animators.get(id)
    }

    pub fn get_mut(&mut self, id: AnimatorId) -> Option<&mut PropertyAnimator> {
        self.animators.get_mut(id)
    }

    /// Apply `f` to each of `ids` that is still registered
    pub fn for_each<F>(&mut self, ids: &[AnimatorId], mut f: F)
    where
        F: FnMut(&mut PropertyAnimator),
    {
        for id in ids {
            if let Some(animator) = self.animators.get_mut(*id) {
                f(animator);
            }
        }
    }

    /// Advance all animators by `dt`.
    ///
    /// Returns the animators that reached an end on this tick. Finished
    /// animators stay registered so their final value can still be read.
    pub fn tick(&mut self, dt: Duration) -> Finished {
        let mut finished = Finished::new();
        for (id, animator) in self.animators.iter_mut() {
            if let Some(position) = animator.tick(dt) {
                finished.push((id, position));
            }
        }
        if !finished.is_empty() {
            tracing::trace!("AnimationScheduler: {} animator(s) finished", finished.len());
        }
        finished
    }

    /// Check if any animator is still advancing
    pub fn has_active_animations(&self) -> bool {
        self.animators.iter().any(|(_, a)| a.is_running())
    }

    /// Get the number of registered animators
    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::TimingCurve;

    fn animator() -> PropertyAnimator {
        PropertyAnimator::new(0.0, 1.0, Duration::from_millis(100), TimingCurve::Linear)
    }

    #[test]
    fn test_ticks_all_animators() {
        let mut scheduler = AnimationScheduler::new();
        let a = scheduler.add(animator());
        let b = scheduler.add(animator());
        scheduler.for_each(&[a, b], PropertyAnimator::start);
        assert!(scheduler.has_active_animations());

        let finished = scheduler.tick(Duration::from_millis(150));
        assert_eq!(finished.len(), 2);
        assert!(finished.contains(&(a, AnimatingPosition::End)));
        assert!(!scheduler.has_active_animations());
        assert_eq!(scheduler.animator_count(), 2);
    }

    #[test]
    fn test_for_each_skips_unknown_ids() {
        let mut scheduler = AnimationScheduler::new();
        let a = scheduler.add(animator());

        let mut touched = 0;
        scheduler.for_each(&[a, AnimatorId::default()], |_| touched += 1);
        assert_eq!(touched, 1);
    }
}
