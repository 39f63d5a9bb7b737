//! Timing curves
//!
//! A timing curve maps elapsed time (as a fraction of the animation duration)
//! to visual progress. Every curve satisfies `sample(0) == 0` and
//! `sample(1) == 1`, so animators can blend any remaining distance through it.

/// `ln(1000)`: decay needed to bring an exponential envelope under 0.1%.
const SETTLE_DECAY: f64 = 6.907_755;

/// Solves `(1 + x) * e^-x = 0.001` for the critically damped response.
const CRITICAL_SETTLE: f64 = 9.233_5;

/// Lowest damping ratio a spring curve accepts.
const MIN_DAMPING_RATIO: f32 = 0.05;

/// Timing curve for a property animation
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum TimingCurve {
    /// Constant rate
    #[default]
    Linear,
    /// Cubic ease in and out
    EaseInOut,
    /// Step response of a damped spring, normalized to settle at the end of
    /// the duration. `damping_ratio` 1.0 is critically damped.
    Spring { damping_ratio: f32 },
}

impl TimingCurve {
    /// Critically damped spring curve
    pub fn critically_damped() -> Self {
        TimingCurve::Spring { damping_ratio: 1.0 }
    }

    /// Sample progress for a time fraction in `[0, 1]`
    pub fn sample(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            TimingCurve::Linear => t,
            TimingCurve::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            TimingCurve::Spring { damping_ratio } => {
                if t >= 1.0 {
                    return 1.0;
                }
                let ratio = f64::from(damping_ratio.max(MIN_DAMPING_RATIO));
                let end = spring_response(ratio, 1.0);
                (spring_response(ratio, f64::from(t)) / end) as f32
            }
        }
    }
}

fn normalized_frequency(ratio: f64) -> f64 {
    if (ratio - 1.0).abs() < 1e-3 {
        CRITICAL_SETTLE
    } else if ratio < 1.0 {
        SETTLE_DECAY / ratio
    } else {
        // The slow mode decays at omega * (ratio - sqrt(ratio^2 - 1))
        SETTLE_DECAY * (ratio + (ratio * ratio - 1.0).sqrt())
    }
}

/// Unit step response of a spring released from rest at 0 toward 1.
fn spring_response(ratio: f64, t: f64) -> f64 {
    let omega = normalized_frequency(ratio);

    if (ratio - 1.0).abs() < 1e-3 {
        let wt = omega * t;
        return 1.0 - (1.0 + wt) * (-wt).exp();
    }

    if ratio < 1.0 {
        let damped = omega * (1.0 - ratio * ratio).sqrt();
        let envelope = (-ratio * omega * t).exp();
        1.0 - envelope * ((damped * t).cos() + (ratio * omega / damped) * (damped * t).sin())
    } else {
        let root = (ratio * ratio - 1.0).sqrt();
        let r1 = -omega * (ratio - root);
        let r2 = -omega * (ratio + root);
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [TimingCurve; 5] = [
        TimingCurve::Linear,
        TimingCurve::EaseInOut,
        TimingCurve::Spring { damping_ratio: 1.0 },
        TimingCurve::Spring { damping_ratio: 0.4 },
        TimingCurve::Spring { damping_ratio: 2.5 },
    ];

    #[test]
    fn test_curves_hit_endpoints() {
        for curve in CURVES {
            assert!(curve.sample(0.0).abs() < 1e-6, "{curve:?} at 0");
            assert!((curve.sample(1.0) - 1.0).abs() < 1e-6, "{curve:?} at 1");
        }
    }

    #[test]
    fn test_critical_curve_is_monotonic() {
        let curve = TimingCurve::critically_damped();
        let mut last = 0.0;
        for i in 1..=100 {
            let p = curve.sample(i as f32 / 100.0);
            assert!(p >= last);
            assert!(p <= 1.0);
            last = p;
        }
    }

    #[test]
    fn test_underdamped_curve_overshoots() {
        let curve = TimingCurve::Spring { damping_ratio: 0.3 };
        let peak = (1..100)
            .map(|i| curve.sample(i as f32 / 100.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_overdamped_curve_does_not_overshoot() {
        let curve = TimingCurve::Spring { damping_ratio: 2.5 };
        let mut last = 0.0;
        for i in 1..100 {
            let t = i as f32 / 100.0;
            let p = curve.sample(t);
            assert!(p >= last, "not monotonic at {t}");
            assert!(p <= 1.0, "overshoot at {t}");
            last = p;
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = TimingCurve::EaseInOut;
        assert!((curve.sample(0.5) - 0.5).abs() < 1e-6);
        assert!((curve.sample(0.25) + curve.sample(0.75) - 1.0).abs() < 1e-5);
    }
}
