//! Gesture classification: pinch clicks, right-click holds, and
//! finger-separation scrolling.
//!
//! All cross-frame memory lives in an explicit [`ClassifierState`] and
//! every decision takes the current monotonic time as a parameter, so
//! the cooldown and hold rules can be tested with synthetic clocks.

use crate::config::GestureConfig;
use crate::hand_tracking::NormalizedPoint;

/// A discrete gesture event, consumed immediately by the actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// Primary click (tight pinch)
    Click,
    /// Secondary click (loose pinch held)
    RightClick,
    /// Scroll by a signed magnitude; positive scrolls up
    ScrollBy(i32),
}

/// Visual pinch feedback for the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchFeedback {
    /// Fingers apart, no ring
    None,
    /// Inside the loose band, orange ring
    Loose,
    /// Inside the click threshold, red ring
    Tight,
}

/// Cross-frame gesture state. Timestamps are monotonic seconds since an
/// arbitrary epoch.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierState {
    /// When the last click or right-click fired
    pub last_click: f64,
    /// When the current loose-pinch hold started, if one is in progress
    pub right_click_start: Option<f64>,
    /// When the last scroll event was emitted
    pub last_scroll: f64,
    /// Whether the scroll gesture was active on the previous frame
    pub scroll_active: bool,
}

impl Default for ClassifierState {
    fn default() -> Self {
        Self {
            // "Never": a click on the very first frame must not be
            // suppressed by the cooldown
            last_click: f64::NEG_INFINITY,
            right_click_start: None,
            last_scroll: f64::NEG_INFINITY,
            scroll_active: false,
        }
    }
}

/// Classifies fingertip geometry into discrete gesture events
pub struct GestureClassifier {
    config: GestureConfig,
    state: ClassifierState,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: ClassifierState::default(),
        }
    }

    /// Current classifier state
    pub const fn state(&self) -> ClassifierState {
        self.state
    }

    /// Upper bound of the loose-pinch band
    fn loose_thresh(&self) -> f64 {
        self.config.click_thresh * crate::constants::LOOSE_PINCH_FACTOR
    }

    /// Evaluate the pinch state machine for one frame.
    ///
    /// Returns at most one event (Click or RightClick) and the ring
    /// feedback to draw. `now` is monotonic seconds; both gesture checks
    /// of a frame must see the same reading.
    pub fn detect_click(
        &mut self,
        index_tip: NormalizedPoint,
        thumb_tip: NormalizedPoint,
        now: f64,
    ) -> (Option<GestureEvent>, PinchFeedback) {
        let pinch = index_tip.distance_to(&thumb_tip);
        let cfg = &self.config;

        if pinch < cfg.click_thresh {
            // Tight pinch: click, gated by the cooldown. The hold state
            // is deliberately left alone.
            let event = if now - self.state.last_click > cfg.click_cooldown {
                self.state.last_click = now;
                Some(GestureEvent::Click)
            } else {
                None
            };
            (event, PinchFeedback::Tight)
        } else if pinch < self.loose_thresh() {
            // Loose pinch: arm or mature the right-click hold
            let event = match self.state.right_click_start {
                None => {
                    self.state.right_click_start = Some(now);
                    None
                }
                Some(start) if now - start > cfg.right_click_hold => {
                    self.state.right_click_start = None;
                    // Also gate the next click, so releasing the pinch
                    // does not immediately fire a Click on top
                    self.state.last_click = now;
                    Some(GestureEvent::RightClick)
                }
                Some(_) => None,
            };
            (event, PinchFeedback::Loose)
        } else {
            // Fingers apart: abandon any hold without firing
            self.state.right_click_start = None;
            (None, PinchFeedback::None)
        }
    }

    /// Evaluate the scroll gesture for one frame.
    ///
    /// Positive vertical separation (middle fingertip below the index
    /// fingertip in image space) scrolls up; `invert_scroll` flips the
    /// convention. Emissions are rate limited while the gesture is held.
    pub fn detect_scroll(
        &mut self,
        index_tip: NormalizedPoint,
        middle_tip: NormalizedPoint,
        now: f64,
    ) -> Option<GestureEvent> {
        let cfg = &self.config;
        let separation = middle_tip.y - index_tip.y;

        if separation.abs() <= cfg.scroll_thresh {
            self.state.scroll_active = false;
            return None;
        }

        if self.state.scroll_active && now - self.state.last_scroll <= cfg.scroll_interval {
            return None;
        }

        #[allow(clippy::cast_possible_truncation)] // bounded by the gain
        let magnitude = (cfg.scroll_gain * separation.abs() / cfg.scroll_thresh).round() as i32;
        let mut amount = if separation > 0.0 { magnitude } else { -magnitude };
        if cfg.invert_scroll {
            amount = -amount;
        }

        self.state.last_scroll = now;
        self.state.scroll_active = true;
        Some(GestureEvent::ScrollBy(amount))
    }
}
