//! Cursor actuation for X11-based systems.
//!
//! Absolute cursor moves go through `warp_pointer`; click and scroll
//! events are synthesized with the XTEST extension. A small square at
//! each screen corner is reserved as a failsafe region: moves into it
//! are rejected with [`Error::FailSafe`], which callers may ignore.

use crate::constants::FAILSAFE_MARGIN;
use crate::{Error, Result};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt as _, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
    protocol::xtest::ConnectionExt as _,
    rust_connection::RustConnection,
};

/// X11 mouse button numbers
const BUTTON_LEFT: u8 = 1;
const BUTTON_RIGHT: u8 = 3;
const BUTTON_SCROLL_UP: u8 = 4;
const BUTTON_SCROLL_DOWN: u8 = 5;

/// Narrow capability interface over OS cursor injection, so the mapping
/// and gesture logic can be exercised against a recording fake.
pub trait CursorActuator {
    /// Screen resolution in pixels
    fn screen_size(&self) -> (u16, u16);

    /// Move the cursor to an absolute position, with no animation and no
    /// forced delay.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FailSafe`] when the target lands inside a
    /// reserved corner region, or [`Error::CursorControl`] on protocol
    /// failure.
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Synthesize a primary (left) click
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorControl`] on protocol failure.
    fn click(&mut self) -> Result<()>;

    /// Synthesize a secondary (right) click
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorControl`] on protocol failure.
    fn right_click(&mut self) -> Result<()>;

    /// Scroll by a signed magnitude: positive scrolls up, negative down
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorControl`] on protocol failure.
    fn scroll(&mut self, amount: i32) -> Result<()>;
}

/// Cursor actuator implementation for X11
pub struct CursorController {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
}

impl CursorController {
    /// Connect to the X11 server and read the root screen geometry
    ///
    /// # Errors
    ///
    /// Returns an error if the X11 connection cannot be established.
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor controller");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::CursorControl(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::CursorControl("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
        })
    }

    /// Whether a target coordinate lies inside a reserved corner square
    fn in_failsafe_region(&self, x: i32, y: i32) -> bool {
        let near_left = x < FAILSAFE_MARGIN;
        let near_right = x >= i32::from(self.screen_width) - FAILSAFE_MARGIN;
        let near_top = y < FAILSAFE_MARGIN;
        let near_bottom = y >= i32::from(self.screen_height) - FAILSAFE_MARGIN;
        (near_left || near_right) && (near_top || near_bottom)
    }

    /// Press and release a mouse button via XTEST
    fn tap_button(&self, button: u8) -> Result<()> {
        for event in [BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT] {
            self.connection
                .xtest_fake_input(event, button, x11rb::CURRENT_TIME, self.screen.root, 0, 0, 0)
                .map_err(|e| Error::CursorControl(format!("Failed to send button event: {e}")))?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.connection
            .flush()
            .map_err(|e| Error::CursorControl(format!("Failed to flush connection: {e}")))
    }
}

impl CursorActuator for CursorController {
    fn screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        if self.in_failsafe_region(x, y) {
            return Err(Error::FailSafe { x, y });
        }

        let max_x = i32::from(self.screen_width.saturating_sub(1));
        let max_y = i32::from(self.screen_height.saturating_sub(1));
        let x = i16::try_from(x.clamp(0, max_x)).unwrap_or(i16::MAX);
        let y = i16::try_from(y.clamp(0, max_y)).unwrap_or(i16::MAX);

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| Error::CursorControl(format!("Failed to warp pointer: {e}")))?;

        self.flush()
    }

    fn click(&mut self) -> Result<()> {
        debug!("Synthesizing left click");
        self.tap_button(BUTTON_LEFT)?;
        self.flush()
    }

    fn right_click(&mut self) -> Result<()> {
        debug!("Synthesizing right click");
        self.tap_button(BUTTON_RIGHT)?;
        self.flush()
    }

    fn scroll(&mut self, amount: i32) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        debug!("Scrolling by {}", amount);

        let button = if amount > 0 {
            BUTTON_SCROLL_UP
        } else {
            BUTTON_SCROLL_DOWN
        };
        // One press/release pair per scroll unit, matching how X11
        // represents wheel motion
        for _ in 0..amount.unsigned_abs() {
            self.tap_button(button)?;
        }
        self.flush()
    }
}
