//! Tests for the coordinate mapping pipeline

use virtual_mouse::config::PointerConfig;
use virtual_mouse::cursor_control::CursorActuator;
use virtual_mouse::hand_tracking::NormalizedPoint;
use virtual_mouse::mapper::{to_screen, MapperUpdate, PointerMapper};
use virtual_mouse::{Error, Result};

/// Recording actuator: captures moves instead of touching X11
struct RecordingActuator {
    moves: Vec<(i32, i32)>,
    reject_with_failsafe: bool,
}

impl RecordingActuator {
    fn new() -> Self {
        Self {
            moves: Vec::new(),
            reject_with_failsafe: false,
        }
    }
}

impl CursorActuator for RecordingActuator {
    fn screen_size(&self) -> (u16, u16) {
        (1920, 1080)
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        if self.reject_with_failsafe {
            return Err(Error::FailSafe { x, y });
        }
        self.moves.push((x, y));
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        Ok(())
    }

    fn right_click(&mut self) -> Result<()> {
        Ok(())
    }

    fn scroll(&mut self, _amount: i32) -> Result<()> {
        Ok(())
    }
}

/// Boost must be monotonic non-decreasing and stay within [0, 1] over
/// the whole normalized input range
#[test]
fn test_boost_monotonic_and_in_range() {
    let mapper = PointerMapper::new(PointerConfig::default());
    let mut prev_x = f64::NEG_INFINITY;
    let mut prev_y = f64::NEG_INFINITY;

    for i in 0..=1000 {
        let raw = f64::from(i) / 1000.0;
        let boosted = mapper.boost(NormalizedPoint::new(raw, raw));

        assert!((0.0..=1.0).contains(&boosted.x), "x out of range at {raw}");
        assert!((0.0..=1.0).contains(&boosted.y), "y out of range at {raw}");
        assert!(boosted.x >= prev_x, "x not monotonic at {raw}");
        assert!(boosted.y >= prev_y, "y not monotonic at {raw}");
        prev_x = boosted.x;
        prev_y = boosted.y;
    }
}

/// The horizontal boost is exactly clamp(x * 1.28 - 0.14, 0, 1) at the
/// default settings
#[test]
fn test_boost_formula() {
    let mapper = PointerMapper::new(PointerConfig::default());
    for raw in [0.0_f64, 0.11, 0.25, 0.5, 0.75, 0.89, 1.0] {
        let expected = (raw * 1.28 - 0.14).clamp(0.0, 1.0);
        let boosted = mapper.boost(NormalizedPoint::new(raw, 0.5));
        assert!(
            (boosted.x - expected).abs() < 1e-12,
            "boost({raw}) = {}, expected {expected}",
            boosted.x
        );
    }
}

/// In-deadzone inputs must leave the mapper state untouched, no matter
/// how often they repeat
#[test]
fn test_deadzone_idempotence() {
    let mut mapper = PointerMapper::new(PointerConfig::default());
    let mut actuator = RecordingActuator::new();
    let initial = mapper.state();

    // Raw inputs whose boosted image lies near the frame center
    let candidates = [
        NormalizedPoint::new(0.5, 0.448),
        NormalizedPoint::new(0.46, 0.43),
        NormalizedPoint::new(0.54, 0.47),
    ];
    for tip in candidates {
        let boosted = mapper.boost(tip);
        let dist = boosted.distance_to(&NormalizedPoint::new(0.5, 0.5));
        assert!(dist < 0.12, "test input not inside deadzone: {dist}");

        for _ in 0..20 {
            let update = mapper.apply(tip, &mut actuator).unwrap();
            assert!(matches!(update, MapperUpdate::Deadzone { .. }));
        }
    }

    assert_eq!(mapper.state(), initial);
    assert!(actuator.moves.is_empty(), "deadzone must not move the cursor");
}

/// Feeding the same out-of-deadzone point repeatedly converges the
/// smoothed state to its boosted image
#[test]
fn test_smoothing_convergence() {
    let mut mapper = PointerMapper::new(PointerConfig::default());
    let mut actuator = RecordingActuator::new();

    let tip = NormalizedPoint::new(0.8, 0.2);
    let target = mapper.boost(tip);

    for _ in 0..30 {
        mapper.apply(tip, &mut actuator).unwrap();
    }

    let state = mapper.state();
    assert!((state.x - target.x).abs() < 1e-3);
    assert!((state.y - target.y).abs() < 1e-3);
}

/// Each move lands at the truncated screen projection of the smoothed
/// state
#[test]
fn test_moves_track_smoothed_state() {
    let mut mapper = PointerMapper::new(PointerConfig::default());
    let mut actuator = RecordingActuator::new();

    let tip = NormalizedPoint::new(0.9, 0.8);
    for _ in 0..5 {
        mapper.apply(tip, &mut actuator).unwrap();
    }

    assert_eq!(actuator.moves.len(), 5);
    let state = mapper.state();
    let expected = to_screen(
        NormalizedPoint::new(state.x, state.y),
        1920,
        1080,
    );
    assert_eq!(*actuator.moves.last().unwrap(), expected);
}

/// A failsafe rejection from the actuator is swallowed and the smoothed
/// state still advances
#[test]
fn test_failsafe_is_swallowed() {
    let mut mapper = PointerMapper::new(PointerConfig::default());
    let mut actuator = RecordingActuator::new();
    actuator.reject_with_failsafe = true;

    let tip = NormalizedPoint::new(0.95, 0.95);
    let update = mapper.apply(tip, &mut actuator);
    assert!(matches!(update, Ok(MapperUpdate::Moved { .. })));
    assert!(mapper.state().x > 0.5);
}
