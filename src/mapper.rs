//! Coordinate mapping from a normalized fingertip to a screen cursor
//! position.
//!
//! The per-frame pipeline is: linear reach boost toward the frame edges,
//! a deadzone around the frame center where the cursor holds still, a
//! one-pole exponential smoother, and scaling to screen pixels. All
//! cross-frame memory lives in an explicit [`MapperState`] so the logic
//! stays testable in isolation from camera and display I/O.

use crate::config::PointerConfig;
use crate::cursor_control::CursorActuator;
use crate::hand_tracking::NormalizedPoint;
use crate::{Error, Result};

/// Previous frame's smoothed cursor position in normalized [0, 1] space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapperState {
    pub x: f64,
    pub y: f64,
}

impl Default for MapperState {
    /// Start at the screen center
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

/// Outcome of one mapper update, reported back for the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapperUpdate {
    /// The boosted fingertip sits inside the deadzone; the cursor did not
    /// move and the state is unchanged
    Deadzone {
        /// The boosted position, for drawing the deadzone indicator
        boosted: NormalizedPoint,
    },
    /// The cursor was driven toward the smoothed position
    Moved {
        /// The new smoothed position in normalized space
        smoothed: NormalizedPoint,
    },
}

/// Maps index fingertip positions to absolute cursor moves
pub struct PointerMapper {
    config: PointerConfig,
    state: MapperState,
}

impl PointerMapper {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            state: MapperState::default(),
        }
    }

    /// Current smoothed position
    pub const fn state(&self) -> MapperState {
        self.state
    }

    /// Expand one axis linearly around the frame center and clamp to [0, 1]
    fn boost_axis(raw: f64, boost: f64, offset: f64) -> f64 {
        (raw * (1.0 + boost) - offset).clamp(0.0, 1.0)
    }

    /// Apply the reach boost to a raw fingertip position.
    ///
    /// The vertical axis gets a larger boost and an asymmetric offset to
    /// compensate for how hard it is to drop the hand toward the bottom
    /// of the frame.
    pub fn boost(&self, tip: NormalizedPoint) -> NormalizedPoint {
        let cfg = &self.config;
        NormalizedPoint::new(
            Self::boost_axis(tip.x, cfg.corner_boost, cfg.corner_boost / 2.0),
            Self::boost_axis(tip.y, cfg.bottom_boost, cfg.bottom_boost / 3.0),
        )
    }

    /// Process one fingertip observation and, if it escapes the deadzone,
    /// drive the actuator to the smoothed screen position.
    ///
    /// A [`Error::FailSafe`] rejection from the actuator is swallowed:
    /// the smoothed state is kept and the frame is treated as handled.
    ///
    /// # Errors
    ///
    /// Propagates any actuator error other than the failsafe rejection.
    pub fn apply(
        &mut self,
        tip: NormalizedPoint,
        actuator: &mut dyn CursorActuator,
    ) -> Result<MapperUpdate> {
        let boosted = self.boost(tip);

        let center = NormalizedPoint::new(0.5, 0.5);
        if boosted.distance_to(&center) < self.config.deadzone_radius {
            return Ok(MapperUpdate::Deadzone { boosted });
        }

        let alpha = self.config.smoothing;
        self.state.x = self.state.x * alpha + boosted.x * (1.0 - alpha);
        self.state.y = self.state.y * alpha + boosted.y * (1.0 - alpha);
        let smoothed = NormalizedPoint::new(self.state.x, self.state.y);

        let (screen_w, screen_h) = actuator.screen_size();
        let (screen_x, screen_y) = to_screen(smoothed, screen_w, screen_h);

        match actuator.move_to(screen_x, screen_y) {
            Ok(()) | Err(Error::FailSafe { .. }) => Ok(MapperUpdate::Moved { smoothed }),
            Err(e) => Err(e),
        }
    }
}

/// Scale a normalized position to integer screen pixels (truncating)
#[allow(clippy::cast_possible_truncation)] // normalized inputs stay in range
pub fn to_screen(p: NormalizedPoint, screen_width: u16, screen_height: u16) -> (i32, i32) {
    let x = (p.x * f64::from(screen_width)) as i32;
    let y = (p.y * f64::from(screen_height)) as i32;
    (x, y)
}
