//! End-to-end tests of the per-frame control pipeline, driven by
//! synthetic landmark sequences and a recording fake actuator.

use virtual_mouse::config::{GestureConfig, PointerConfig};
use virtual_mouse::constants::NUM_HAND_LANDMARKS;
use virtual_mouse::cursor_control::{CursorActuator, CursorController};
use virtual_mouse::gestures::{GestureClassifier, GestureEvent};
use virtual_mouse::hand_tracking::{
    HandLandmarks, NormalizedPoint, INDEX_FINGER_TIP, MIDDLE_FINGER_TIP, THUMB_TIP,
};
use virtual_mouse::mapper::PointerMapper;
use virtual_mouse::Result;

/// Everything the pipeline did to the fake OS
#[derive(Default)]
struct RecordingActuator {
    moves: Vec<(i32, i32)>,
    clicks: u32,
    right_clicks: u32,
    scrolls: Vec<i32>,
}

impl CursorActuator for RecordingActuator {
    fn screen_size(&self) -> (u16, u16) {
        (1920, 1080)
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.moves.push((x, y));
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        self.clicks += 1;
        Ok(())
    }

    fn right_click(&mut self) -> Result<()> {
        self.right_clicks += 1;
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> Result<()> {
        self.scrolls.push(amount);
        Ok(())
    }
}

/// Build a synthetic hand with the three fingertips placed explicitly
fn hand(
    index_tip: NormalizedPoint,
    thumb_tip: NormalizedPoint,
    middle_tip: NormalizedPoint,
) -> HandLandmarks {
    let mut points = [NormalizedPoint::new(0.5, 0.9); NUM_HAND_LANDMARKS];
    points[INDEX_FINGER_TIP] = index_tip;
    points[THUMB_TIP] = thumb_tip;
    points[MIDDLE_FINGER_TIP] = middle_tip;
    HandLandmarks::new(points)
}

/// One frame of the control pipeline: mapper, click check, scroll check,
/// sharing a single clock reading like the application loop
fn process_frame(
    mapper: &mut PointerMapper,
    classifier: &mut GestureClassifier,
    actuator: &mut RecordingActuator,
    hand: &HandLandmarks,
    now: f64,
) {
    mapper.apply(hand.index_tip(), actuator).unwrap();

    let (event, _feedback) = classifier.detect_click(hand.index_tip(), hand.thumb_tip(), now);
    match event {
        Some(GestureEvent::Click) => actuator.click().unwrap(),
        Some(GestureEvent::RightClick) => actuator.right_click().unwrap(),
        _ => {}
    }

    if let Some(GestureEvent::ScrollBy(amount)) =
        classifier.detect_scroll(hand.index_tip(), hand.middle_tip(), now)
    {
        actuator.scroll(amount).unwrap();
    }
}

fn pipeline() -> (PointerMapper, GestureClassifier, RecordingActuator) {
    (
        PointerMapper::new(PointerConfig::default()),
        GestureClassifier::new(GestureConfig::default()),
        RecordingActuator::default(),
    )
}

/// A hand sweeping across the frame drags the cursor along a monotonic
/// path toward it
#[test]
fn test_sweep_moves_cursor() {
    let (mut mapper, mut classifier, mut actuator) = pipeline();

    let resting_thumb = NormalizedPoint::new(0.2, 0.9);
    for i in 0..60 {
        let t = f64::from(i) / 59.0;
        let tip = NormalizedPoint::new(0.7 + 0.25 * t, 0.2);
        // Middle fingertip rides close to the index: no scroll pose
        let resting_middle = NormalizedPoint::new(tip.x - 0.05, 0.25);
        let frame = hand(tip, resting_thumb, resting_middle);
        process_frame(
            &mut mapper,
            &mut classifier,
            &mut actuator,
            &frame,
            f64::from(i) * 0.016,
        );
    }

    assert!(!actuator.moves.is_empty());
    // No gesture fingertips were near each other: no spurious events
    assert_eq!(actuator.clicks, 0);
    assert_eq!(actuator.right_clicks, 0);
    assert!(actuator.scrolls.is_empty());

    // x positions never decrease while sweeping right
    let xs: Vec<i32> = actuator.moves.iter().map(|&(x, _)| x).collect();
    assert!(xs.windows(2).all(|w| w[1] >= w[0]), "cursor path not monotonic: {xs:?}");
}

/// Pinch-click while moving: the same frame can move the cursor and
/// fire the click
#[test]
fn test_pinch_while_moving() {
    let (mut mapper, mut classifier, mut actuator) = pipeline();

    let tip = NormalizedPoint::new(0.8, 0.3);
    let thumb = NormalizedPoint::new(0.82, 0.3); // distance 0.02, tight
    let middle = NormalizedPoint::new(0.8, 0.35);
    let frame = hand(tip, thumb, middle);

    process_frame(&mut mapper, &mut classifier, &mut actuator, &frame, 0.0);

    assert_eq!(actuator.moves.len(), 1);
    assert_eq!(actuator.clicks, 1);
}

/// Holding a loose pinch across frames fires exactly one right click
#[test]
fn test_right_click_hold_through_pipeline() {
    let (mut mapper, mut classifier, mut actuator) = pipeline();

    let tip = NormalizedPoint::new(0.8, 0.3);
    let thumb = NormalizedPoint::new(0.87, 0.3); // distance 0.07, loose
    let middle = NormalizedPoint::new(0.8, 0.35);
    let frame = hand(tip, thumb, middle);

    for i in 0..40 {
        process_frame(
            &mut mapper,
            &mut classifier,
            &mut actuator,
            &frame,
            f64::from(i) * 0.03, // 0.0 .. 1.17s
        );
    }

    assert_eq!(actuator.clicks, 0);
    assert_eq!(actuator.right_clicks, 1);
}

/// A scroll pose emits rate-limited scrolls while the cursor stays put
/// if the index fingertip holds still inside the deadzone
#[test]
fn test_scroll_pose() {
    let (mut mapper, mut classifier, mut actuator) = pipeline();

    // Index fingertip placed so its boosted image sits at frame center
    let tip = NormalizedPoint::new(0.5, 0.448);
    let thumb = NormalizedPoint::new(0.2, 0.9);
    let middle = NormalizedPoint::new(0.5, 0.448 + 0.3);
    let frame = hand(tip, thumb, middle);

    for i in 0..50 {
        process_frame(
            &mut mapper,
            &mut classifier,
            &mut actuator,
            &frame,
            f64::from(i) * 0.02, // 1 second at 50 fps
        );
    }

    assert!(actuator.moves.is_empty(), "deadzone pose must not move the cursor");
    assert!(
        (9..=11).contains(&actuator.scrolls.len()),
        "expected ~10 scrolls, got {}",
        actuator.scrolls.len()
    );
    assert!(actuator.scrolls.iter().all(|&s| s == 83));
}

/// Losing the hand for a stretch of frames freezes all state; the next
/// detection picks up where the mapper left off
#[test]
fn test_hand_loss_freezes_state() {
    let (mut mapper, mut classifier, mut actuator) = pipeline();

    let tip = NormalizedPoint::new(0.8, 0.3);
    let thumb = NormalizedPoint::new(0.2, 0.9);
    let middle = NormalizedPoint::new(0.8, 0.35);
    let frame = hand(tip, thumb, middle);

    process_frame(&mut mapper, &mut classifier, &mut actuator, &frame, 0.0);
    let state_before = mapper.state();
    let moves_before = actuator.moves.len();

    // No detections for a while: the loop simply never calls in

    process_frame(&mut mapper, &mut classifier, &mut actuator, &frame, 2.0);
    assert_eq!(actuator.moves.len(), moves_before + 1);
    // Smoothing continued from the frozen state, not from a reset
    assert!(mapper.state().x > state_before.x);
}

#[test]
#[ignore = "Requires X11 display"]
fn test_x11_actuator_initialization() {
    let controller = CursorController::new();
    assert!(controller.is_ok());
}
