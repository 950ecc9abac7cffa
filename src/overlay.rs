//! Diagnostics overlay rendered onto the preview frame.
//!
//! Pure presentation: instruction panel, FPS counter, deadzone circle,
//! pinch and scroll rings, and the hand skeleton. Nothing drawn here
//! feeds back into the control logic.

use crate::constants::{DEADZONE_RADIUS, PINCH_RING_RADIUS, SCROLL_RING_RADIUS};
use crate::gestures::PinchFeedback;
use crate::hand_tracking::{HandLandmarks, NormalizedPoint, HAND_CONNECTIONS};
use crate::Result;
use opencv::{
    core::{self, Mat, Point, Scalar},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

// Overlay colors, BGR
const COLOR_RED: Scalar = Scalar::new(0.0, 0.0, 255.0, 0.0);
const COLOR_ORANGE: Scalar = Scalar::new(0.0, 165.0, 255.0, 0.0);
const COLOR_CYAN: Scalar = Scalar::new(255.0, 255.0, 0.0, 0.0);
const COLOR_GREEN: Scalar = Scalar::new(0.0, 255.0, 0.0, 0.0);
const COLOR_YELLOW: Scalar = Scalar::new(0.0, 255.0, 255.0, 0.0);
const COLOR_AMBER: Scalar = Scalar::new(0.0, 200.0, 255.0, 0.0);
const COLOR_PANEL: Scalar = Scalar::new(50.0, 50.0, 50.0, 0.0);
const COLOR_WHITE: Scalar = Scalar::new(255.0, 255.0, 255.0, 0.0);

const INSTRUCTIONS: [&str; 6] = [
    "VIRTUAL MOUSE",
    "Move: index fingertip",
    "Click: quick pinch (0.25s cooldown)",
    "Right-click: hold loose pinch (0.9s)",
    "Scroll: index-middle finger distance",
    "Press Q to quit",
];

/// Convert a normalized point to frame pixel coordinates
#[allow(clippy::cast_possible_truncation)]
fn to_pixel(p: NormalizedPoint, frame: &Mat) -> Point {
    Point::new(
        (p.x * f64::from(frame.cols())) as i32,
        (p.y * f64::from(frame.rows())) as i32,
    )
}

/// Draw the semi-transparent instruction panel in the top-left corner
pub fn draw_instruction_panel(frame: &mut Mat) -> Result<()> {
    let mut panel = frame.clone();
    imgproc::rectangle(
        &mut panel,
        core::Rect::new(8, 8, 360, 150),
        COLOR_PANEL,
        -1,
        LINE_8,
        0,
    )?;
    let src = frame.clone();
    core::add_weighted(&panel, 0.7, &src, 0.3, 0.0, frame, -1)?;

    for (i, text) in INSTRUCTIONS.iter().enumerate() {
        let color = if i == 0 { COLOR_YELLOW } else { COLOR_AMBER };
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        imgproc::put_text(
            frame,
            text,
            Point::new(14, 32 + i as i32 * 22),
            FONT_HERSHEY_SIMPLEX,
            0.5,
            color,
            1,
            LINE_8,
            false,
        )?;
    }
    Ok(())
}

/// Draw the FPS counter in the top-right corner
pub fn draw_fps(frame: &mut Mat, fps: f64) -> Result<()> {
    let text = format!("FPS: {fps:.1}");
    imgproc::put_text(
        frame,
        &text,
        Point::new(frame.cols() - 130, 30),
        FONT_HERSHEY_SIMPLEX,
        0.7,
        COLOR_GREEN,
        2,
        LINE_8,
        false,
    )?;
    Ok(())
}

/// Draw the hold-still indicator around the boosted fingertip position
pub fn draw_deadzone(frame: &mut Mat, boosted: NormalizedPoint) -> Result<()> {
    #[allow(clippy::cast_possible_truncation)]
    let radius = (DEADZONE_RADIUS * f64::from(frame.cols())) as i32;
    imgproc::circle(frame, to_pixel(boosted, frame), radius, COLOR_RED, 1, LINE_8, 0)?;
    Ok(())
}

/// Draw the pinch ring around the index fingertip: red inside the click
/// threshold, orange in the loose band, nothing otherwise
pub fn draw_pinch_ring(frame: &mut Mat, index_tip: NormalizedPoint, feedback: PinchFeedback) -> Result<()> {
    let color = match feedback {
        PinchFeedback::Tight => COLOR_RED,
        PinchFeedback::Loose => COLOR_ORANGE,
        PinchFeedback::None => return Ok(()),
    };
    imgproc::circle(
        frame,
        to_pixel(index_tip, frame),
        PINCH_RING_RADIUS,
        color,
        2,
        LINE_8,
        0,
    )?;
    Ok(())
}

/// Draw the cyan ring indicating an active scroll emission
pub fn draw_scroll_ring(frame: &mut Mat, index_tip: NormalizedPoint) -> Result<()> {
    imgproc::circle(
        frame,
        to_pixel(index_tip, frame),
        SCROLL_RING_RADIUS,
        COLOR_CYAN,
        2,
        LINE_8,
        0,
    )?;
    Ok(())
}

/// Draw the 21-point hand skeleton
pub fn draw_hand_skeleton(frame: &mut Mat, hand: &HandLandmarks) -> Result<()> {
    let points = hand.points();
    for (a, b) in HAND_CONNECTIONS {
        imgproc::line(
            frame,
            to_pixel(points[a], frame),
            to_pixel(points[b], frame),
            COLOR_WHITE,
            1,
            LINE_8,
            0,
        )?;
    }
    for point in points {
        imgproc::circle(frame, to_pixel(*point, frame), 3, COLOR_GREEN, -1, LINE_8, 0)?;
    }
    Ok(())
}
