//! Visual outputs of the card
//!
//! The controller never draws. It samples a [`CardFrame`] and pushes it into
//! whatever implements [`CardSurface`]: a native view, a scene-graph node, or
//! a test recorder.

use serde::{Deserialize, Serialize};

/// Style of the blur applied to the content behind the card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurStyle {
    #[default]
    Dark,
    Light,
    Regular,
}

/// Overlay blur effect. An intensity of zero means no effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayBlur {
    pub style: BlurStyle,
    pub intensity: f32,
}

impl OverlayBlur {
    pub fn none(style: BlurStyle) -> Self {
        Self {
            style,
            intensity: 0.0,
        }
    }

    pub fn full(style: BlurStyle) -> Self {
        Self {
            style,
            intensity: 1.0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.intensity <= 0.0
    }
}

/// Sampled geometry and effects for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardFrame {
    /// Top edge of the panel in container coordinates
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub blur: OverlayBlur,
}

/// Receives the animated card properties
pub trait CardSurface {
    fn set_panel_origin_y(&mut self, y: f32);

    fn set_corner_radius(&mut self, radius: f32);

    fn set_overlay_blur(&mut self, blur: OverlayBlur);

    /// Push a whole frame
    fn apply(&mut self, frame: &CardFrame) {
        self.set_panel_origin_y(frame.origin_y);
        self.set_corner_radius(frame.corner_radius);
        self.set_overlay_blur(frame.blur);
    }
}

impl<S: CardSurface + ?Sized> CardSurface for &mut S {
    fn set_panel_origin_y(&mut self, y: f32) {
        (**self).set_panel_origin_y(y);
    }

    fn set_corner_radius(&mut self, radius: f32) {
        (**self).set_corner_radius(radius);
    }

    fn set_overlay_blur(&mut self, blur: OverlayBlur) {
        (**self).set_overlay_blur(blur);
    }
}
