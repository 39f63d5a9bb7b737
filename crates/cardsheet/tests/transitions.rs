//! Gesture-to-frame behavior of the card controller

use std::time::Duration;

use cardsheet::prelude::*;
use cardsheet::AnimatingPosition;

const WIDTH: f32 = 390.0;
const HEIGHT: f32 = 844.0;
const FRAME: Duration = Duration::from_millis(16);

fn card() -> CardTransitionController {
    card_with(CardConfig::default())
}

fn card_with(config: CardConfig) -> CardTransitionController {
    let mut card = CardTransitionController::new(config).expect("valid config");
    card.set_container_size(WIDTH, HEIGHT);
    card
}

/// Tick until the transition ends, returning its outcome
fn settle(card: &mut CardTransitionController) -> Option<TransitionOutcome> {
    for _ in 0..500 {
        if let Some(outcome) = card.tick(FRAME) {
            return Some(outcome);
        }
    }
    None
}

fn progress(card: &CardTransitionController) -> f32 {
    card.progress().expect("transition in flight")
}

#[derive(Default)]
struct RecordingSurface {
    origins: Vec<f32>,
    radii: Vec<f32>,
    blurs: Vec<OverlayBlur>,
}

impl CardSurface for RecordingSurface {
    fn set_panel_origin_y(&mut self, y: f32) {
        self.origins.push(y);
    }

    fn set_corner_radius(&mut self, radius: f32) {
        self.radii.push(radius);
    }

    fn set_overlay_blur(&mut self, blur: OverlayBlur) {
        self.blurs.push(blur);
    }
}

#[test]
fn tap_expands_collapsed_card() {
    let mut card = card();
    card.tap();
    assert!(card.is_transitioning());
    assert_eq!(card.state(), PanelState::Collapsed);

    let outcome = card.tick(Duration::from_millis(900)).unwrap();
    assert_eq!(outcome.position, AnimatingPosition::End);
    assert_eq!(card.state(), PanelState::Expanded);
    assert!(!card.is_transitioning());

    let frame = card.frame();
    assert_eq!(frame.origin_y, HEIGHT - 600.0);
    assert_eq!(frame.corner_radius, 12.0);
    assert_eq!(frame.blur, OverlayBlur::full(BlurStyle::Dark));
}

#[test]
fn taps_alternate_states() {
    let mut card = card();
    let mut expected = PanelState::Expanded;

    for _ in 0..4 {
        card.tap();
        let outcome = settle(&mut card).unwrap();
        assert_eq!(outcome.resting, expected);
        assert_eq!(card.state(), expected);
        expected = expected.next();
    }

    assert_eq!(card.frame().origin_y, HEIGHT - 65.0);
}

#[test]
fn back_to_back_taps_run_one_transition() {
    let mut card = card();
    card.tap();
    card.tap();

    let first = settle(&mut card).unwrap();
    assert_eq!(first.resting, PanelState::Expanded);
    assert!(settle(&mut card).is_none());
    assert_eq!(card.state(), PanelState::Expanded);

    // Not dropped once the first transition is done
    card.tap();
    assert_eq!(settle(&mut card).unwrap().resting, PanelState::Collapsed);
}

#[test]
fn tap_during_transition_keeps_progress() {
    let mut card = card();
    card.tap();
    card.tick(Duration::from_millis(200));
    let before = progress(&card);

    card.tap();
    assert_eq!(progress(&card), before);
}

#[test]
fn drag_from_idle_pauses_at_zero() {
    let mut card = card();
    card.drag_begin();

    let session = card.session().unwrap();
    assert!(session.is_paused());
    assert_eq!(session.paused_count(), 3);
    assert_eq!(card.interaction_cursor(), 0.0);
    assert_eq!(progress(&card), 0.0);

    // Paused sessions do not advance
    card.tick(Duration::from_secs(2));
    assert_eq!(progress(&card), 0.0);
    assert_eq!(card.state(), PanelState::Collapsed);
}

#[test]
fn drag_progress_from_collapsed() {
    let mut card = card();
    card.drag_begin();

    card.drag_update(-300.0);
    assert!((progress(&card) - 0.5).abs() < 1e-6);

    card.drag_update(-150.0);
    assert!((progress(&card) - 0.25).abs() < 1e-6);

    let frame = card.frame();
    let visible = 65.0 + (600.0 - 65.0) * 0.25;
    assert!((frame.origin_y - (HEIGHT - visible)).abs() < 1e-3);
    assert!((frame.corner_radius - 3.0).abs() < 1e-4);
    assert!((frame.blur.intensity - 0.25).abs() < 1e-6);
}

#[test]
fn drag_progress_from_expanded() {
    let mut card = card();
    card.tap();
    settle(&mut card);

    card.drag_begin();
    card.drag_update(120.0);
    assert!((progress(&card) - 0.2).abs() < 1e-6);
}

#[test]
fn drag_progress_is_clamped() {
    let mut card = card();
    card.drag_begin();

    card.drag_update(200.0);
    assert_eq!(progress(&card), 0.0);

    card.drag_update(-900.0);
    assert_eq!(progress(&card), 1.0);
}

#[test]
fn release_mid_drag_collapses_expanded_card() {
    let mut card = card();
    card.tap();
    settle(&mut card);
    assert_eq!(card.state(), PanelState::Expanded);

    card.drag_begin();
    card.drag_update(300.0);
    assert!((progress(&card) - 0.5).abs() < 1e-6);
    let held = card.frame().origin_y;

    card.drag_end(0.0);
    let session = card.session().unwrap();
    assert!(session.is_running());
    assert_eq!(session.paused_count(), 0);

    // Continues from where the finger left it
    card.tick(Duration::from_millis(1));
    let after = card.frame().origin_y;
    assert!(after >= held);
    assert!(after - held < 5.0);

    let outcome = settle(&mut card).unwrap();
    assert_eq!(outcome.resting, PanelState::Collapsed);
    assert_eq!(card.frame().origin_y, HEIGHT - 65.0);
    assert!(card.frame().blur.is_none());
}

#[test]
fn drag_hijacks_running_tap() {
    let mut card = card();
    card.tap();
    card.tick(Duration::from_millis(300));
    let in_flight = progress(&card);
    assert!(in_flight > 0.0 && in_flight < 1.0);

    card.drag_begin();
    assert!(card.is_transitioning());
    assert_eq!(card.interaction_cursor(), in_flight);
    assert!(card.session().unwrap().is_paused());

    card.drag_update(0.0);
    assert_eq!(progress(&card), in_flight);

    card.drag_update(-60.0);
    assert!((progress(&card) - (in_flight + 0.1).min(1.0)).abs() < 1e-5);

    card.drag_end(0.0);
    assert_eq!(settle(&mut card).unwrap().resting, PanelState::Expanded);
}

#[test]
fn cancelled_drag_does_not_orphan_session() {
    let mut card = card();
    card.drag_begin();
    card.drag_update(-100.0);
    card.drag_cancel();

    assert!(card.session().unwrap().is_running());
    assert!(settle(&mut card).is_some());
    assert!(!card.is_transitioning());
}

#[test]
fn directional_release_reverses_short_drag() {
    let mut card = card_with(CardConfig::default().with_release_policy(
        ReleasePolicy::Directional {
            progress_threshold: 0.5,
            fling_velocity: 400.0,
        },
    ));

    card.drag_begin();
    card.drag_update(-120.0);
    card.drag_end(0.0);
    assert!(card.session().unwrap().is_reversed());

    let outcome = settle(&mut card).unwrap();
    assert_eq!(outcome.position, AnimatingPosition::Start);
    assert_eq!(outcome.resting, PanelState::Collapsed);
    assert_eq!(card.state(), PanelState::Collapsed);
    assert_eq!(card.frame().origin_y, HEIGHT - 65.0);
}

#[test]
fn directional_release_follows_fling() {
    let mut card = card_with(CardConfig::default().with_release_policy(
        ReleasePolicy::Directional {
            progress_threshold: 0.5,
            fling_velocity: 400.0,
        },
    ));

    card.drag_begin();
    card.drag_update(-60.0);
    card.drag_end(-1500.0);

    assert_eq!(settle(&mut card).unwrap().resting, PanelState::Expanded);
}

#[test]
fn completion_resolves_once() {
    let mut card = card();
    card.tap();
    let mut done = card.completion().unwrap();
    let mut states = card.subscribe();
    assert!(!states.has_changed().unwrap());

    assert!(done.try_recv().is_err());
    let outcome = settle(&mut card).unwrap();

    assert_eq!(done.try_recv().unwrap(), outcome);
    assert!(states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), PanelState::Expanded);
}

#[test]
fn reversed_transition_does_not_notify_state_change() {
    let mut card = card_with(CardConfig::default().with_release_policy(
        ReleasePolicy::Directional {
            progress_threshold: 0.5,
            fling_velocity: 400.0,
        },
    ));
    let mut states = card.subscribe();

    card.drag_begin();
    card.drag_update(-30.0);
    card.drag_end(0.0);
    settle(&mut card);

    assert!(!states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), PanelState::Collapsed);
}

#[test]
fn gestures_from_touches_drive_the_card() {
    let mut card = card();
    let mut recognizer = GestureRecognizer::new();

    let mut y = HEIGHT - 30.0;
    let mut time = Duration::ZERO;
    let mut touches = vec![TouchEvent::Started {
        id: 1,
        x: 100.0,
        y,
        time,
    }];
    for _ in 0..10 {
        y -= 40.0;
        time += FRAME;
        touches.push(TouchEvent::Moved {
            id: 1,
            x: 100.0,
            y,
            time,
        });
    }
    touches.push(TouchEvent::Ended {
        id: 1,
        x: 100.0,
        y,
        time: time + FRAME,
    });

    for touch in &touches[..touches.len() - 1] {
        for gesture in recognizer.handle(touch).expect("well-formed touch") {
            card.handle_gesture(gesture);
        }
    }
    // 400 points up from collapsed
    assert!((progress(&card) - 400.0 / 600.0).abs() < 1e-5);

    for gesture in recognizer
        .handle(&touches[touches.len() - 1])
        .expect("well-formed touch")
    {
        card.handle_gesture(gesture);
    }
    assert_eq!(settle(&mut card).unwrap().resting, PanelState::Expanded);
}

#[test]
fn tap_gesture_phases() {
    let mut card = card();
    card.handle_tap(TapPhase::Began);
    card.handle_tap(TapPhase::Cancelled);
    assert!(!card.is_transitioning());

    card.handle_tap(TapPhase::Ended);
    assert!(card.is_transitioning());
}

#[test]
fn present_pushes_all_properties() {
    let mut card = card();
    let mut surface = RecordingSurface::default();

    card.tap();
    while card.is_transitioning() {
        card.tick(FRAME);
        card.present(&mut surface);
    }

    assert_eq!(surface.origins.len(), surface.radii.len());
    assert_eq!(surface.origins.len(), surface.blurs.len());
    assert!(surface.origins.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(surface.origins.last().copied(), Some(HEIGHT - 600.0));
    assert_eq!(surface.radii.last().copied(), Some(12.0));
    assert_eq!(
        surface.blurs.last().copied(),
        Some(OverlayBlur::full(BlurStyle::Dark))
    );
}

#[test]
fn resize_moves_resting_card() {
    let mut card = card();
    card.set_container_size(WIDTH, 700.0);
    assert_eq!(card.frame().origin_y, 635.0);
    assert_eq!(card.resting_origin_y(PanelState::Expanded), 100.0);
}
