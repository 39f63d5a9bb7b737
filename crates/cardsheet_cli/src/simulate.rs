//! Headless playback of a gesture script

use std::time::Duration;

use cardsheet::prelude::*;
use tracing::{debug, info};

use crate::script::Command;

/// Surface that logs every frame it is given
#[derive(Default)]
pub struct LogSurface {
    frames: usize,
    origin_y: f32,
    corner_radius: f32,
    blur: Option<OverlayBlur>,
}

impl CardSurface for LogSurface {
    fn set_panel_origin_y(&mut self, y: f32) {
        self.frames += 1;
        self.origin_y = y;
    }

    fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius;
    }

    fn set_overlay_blur(&mut self, blur: OverlayBlur) {
        self.blur = Some(blur);
        debug!(
            "frame {:>4}: y={:>8.2} radius={:>5.2} blur={:?}@{:.2}",
            self.frames, self.origin_y, self.corner_radius, blur.style, blur.intensity
        );
    }
}

/// Summary of a playback
#[derive(Debug)]
pub struct Report {
    pub frames: usize,
    pub outcomes: Vec<TransitionOutcome>,
    pub final_state: PanelState,
    pub final_frame: CardFrame,
}

/// Plays scripts against a controller at a fixed frame rate
pub struct Simulator {
    card: CardTransitionController,
    surface: LogSurface,
    frame: Duration,
    outcomes: Vec<TransitionOutcome>,
}

impl Simulator {
    pub fn new(config: CardConfig, width: f32, height: f32, fps: u32) -> cardsheet::Result<Self> {
        let mut card = CardTransitionController::new(config)?;
        card.set_container_size(width, height);
        Ok(Self {
            card,
            surface: LogSurface::default(),
            frame: Duration::from_secs(1) / fps.max(1),
            outcomes: Vec::new(),
        })
    }

    pub fn run(mut self, commands: &[Command]) -> Report {
        self.card.present(&mut self.surface);
        for command in commands {
            self.apply(*command);
        }
        // Let whatever is still moving come to rest
        while self.card.session().is_some_and(|s| s.is_running()) {
            self.step(self.frame);
        }

        Report {
            frames: self.surface.frames,
            outcomes: self.outcomes,
            final_state: self.card.state(),
            final_frame: self.card.frame(),
        }
    }

    fn apply(&mut self, command: Command) {
        debug!("command: {:?}", command);
        match command {
            Command::Tap => self.card.handle_tap(TapPhase::Ended),
            Command::DragBegin => self.card.handle_pan(PanPhase::Began),
            Command::DragMove(translation_y) => self.card.handle_pan(PanPhase::Changed {
                translation_y,
                velocity_y: 0.0,
            }),
            Command::DragEnd(velocity_y) => self.card.handle_pan(PanPhase::Ended { velocity_y }),
            Command::DragCancel => self.card.handle_pan(PanPhase::Cancelled),
            Command::Wait(duration) => {
                let mut remaining = duration;
                while !remaining.is_zero() {
                    let dt = remaining.min(self.frame);
                    self.step(dt);
                    remaining -= dt;
                }
                return;
            }
        }
        self.card.present(&mut self.surface);
    }

    fn step(&mut self, dt: Duration) {
        if let Some(outcome) = self.card.tick(dt) {
            info!(
                "transition toward {:?} ended at {:?}; panel {:?}",
                outcome.target, outcome.position, outcome.resting
            );
            self.outcomes.push(outcome);
        }
        self.card.present(&mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse;

    fn simulate(script: &str) -> Report {
        Simulator::new(CardConfig::default(), 390.0, 844.0, 60)
            .unwrap()
            .run(&parse(script).unwrap())
    }

    #[test]
    fn test_tap_settles_expanded() {
        let report = simulate("tap\n");
        assert_eq!(report.final_state, PanelState::Expanded);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.final_frame.origin_y, 244.0);
        assert!(report.frames > 50);
    }

    #[test]
    fn test_double_tap_is_one_transition() {
        let report = simulate("tap\ntap\nwait 2\n");
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.final_state, PanelState::Expanded);
    }

    #[test]
    fn test_held_drag_stays_paused() {
        let report = simulate("drag begin\ndrag move -300\nwait 1\n");
        assert!(report.outcomes.is_empty());
        assert_eq!(report.final_state, PanelState::Collapsed);
        let visible = 65.0 + (600.0 - 65.0) * 0.5;
        assert!((report.final_frame.origin_y - (844.0 - visible)).abs() < 1e-3);
    }

    #[test]
    fn test_released_drag_completes() {
        let report = simulate("tap\nwait 1\ndrag begin\ndrag move 300\ndrag end\n");
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.final_state, PanelState::Collapsed);
    }
}
