//! Card configuration
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! card_height = 480.0
//! duration_secs = 0.6
//!
//! [release_policy]
//! mode = "directional"
//! progress_threshold = 0.5
//! fling_velocity = 500.0
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use cardsheet_animation::TimingCurve;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::surface::BlurStyle;

const DEFAULT_DURATION: Duration = Duration::from_millis(900);

/// What happens to a paused transition when the drag lifts
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Always run on to the target state
    #[default]
    Continue,
    /// Run back to the starting state when the release is short of
    /// `progress_threshold` without moving toward the target, or when it
    /// flings away from the target faster than `fling_velocity`.
    Directional {
        progress_threshold: f32,
        fling_velocity: f32,
    },
}

/// Geometry and timing of the card
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Height of the panel when expanded
    pub card_height: f32,
    /// Strip of the panel left visible when collapsed
    pub handle_area_height: f32,
    /// Corner radius when expanded (collapsed is square)
    pub corner_radius: f32,
    /// Length of a full transition in seconds
    pub duration_secs: f32,
    /// Damping ratio of the spring timing curve (1.0 = critically damped)
    pub damping_ratio: f32,
    /// Blur shown behind the expanded card
    pub blur_style: BlurStyle,
    pub release_policy: ReleasePolicy,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            card_height: 600.0,
            handle_area_height: 65.0,
            corner_radius: 12.0,
            duration_secs: 0.9,
            damping_ratio: 1.0,
            blur_style: BlurStyle::Dark,
            release_policy: ReleasePolicy::Continue,
        }
    }
}

impl CardConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CardConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that cannot describe a card
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        };

        positive("card_height", self.card_height)?;
        positive("handle_area_height", self.handle_area_height)?;
        positive("duration_secs", self.duration_secs)?;
        positive("damping_ratio", self.damping_ratio)?;

        if self.handle_area_height >= self.card_height {
            return Err(ConfigError::Invalid(format!(
                "handle_area_height ({}) must be smaller than card_height ({})",
                self.handle_area_height, self.card_height
            )));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "corner_radius must not be negative, got {}",
                self.corner_radius
            )));
        }
        if let ReleasePolicy::Directional {
            progress_threshold,
            fling_velocity,
        } = self.release_policy
        {
            if !(0.0..=1.0).contains(&progress_threshold) {
                return Err(ConfigError::Invalid(format!(
                    "progress_threshold must be within [0, 1], got {progress_threshold}"
                )));
            }
            if !fling_velocity.is_finite() || fling_velocity < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "fling_velocity must not be negative, got {fling_velocity}"
                )));
            }
        }
        Ok(())
    }

    /// Transition duration. Falls back to the default for unusable values.
    pub fn duration(&self) -> Duration {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            // Round to whole microseconds so 0.9 reads back as 900ms
            Duration::from_micros((f64::from(self.duration_secs) * 1e6).round() as u64)
        } else {
            DEFAULT_DURATION
        }
    }

    /// Timing curve shared by every property of a transition
    pub fn timing_curve(&self) -> TimingCurve {
        TimingCurve::Spring {
            damping_ratio: self.damping_ratio,
        }
    }

    pub fn with_card_height(mut self, height: f32) -> Self {
        self.card_height = height;
        self
    }

    pub fn with_handle_area_height(mut self, height: f32) -> Self {
        self.handle_area_height = height;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_secs = duration.as_secs_f32();
        self
    }

    pub fn with_damping_ratio(mut self, ratio: f32) -> Self {
        self.damping_ratio = ratio;
        self
    }

    pub fn with_blur_style(mut self, style: BlurStyle) -> Self {
        self.blur_style = style;
        self
    }

    pub fn with_release_policy(mut self, policy: ReleasePolicy) -> Self {
        self.release_policy = policy;
        self
    }
}
