//! Hand-tracking virtual mouse library.
//!
//! This library turns webcam hand landmarks into OS cursor control:
//! - ONNX Runtime for hand landmark inference
//! - `OpenCV` for camera capture and the preview overlay
//! - X11 (XTEST) for cursor movement, clicks, and scrolling
//!
//! The per-frame pipeline is:
//! 1. Hand landmark detection (21 normalized points, single hand)
//! 2. Coordinate mapping: reach boost, deadzone, exponential smoothing
//! 3. Gesture classification: pinch clicks, right-click hold, scrolling
//! 4. Cursor actuation and diagnostics overlay
//!
//! # Examples
//!
//! ## Mapping fingertips to cursor moves
//!
//! ```no_run
//! use virtual_mouse::config::PointerConfig;
//! use virtual_mouse::cursor_control::{CursorActuator, CursorController};
//! use virtual_mouse::hand_tracking::NormalizedPoint;
//! use virtual_mouse::mapper::PointerMapper;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut actuator = CursorController::new()?;
//! let mut mapper = PointerMapper::new(PointerConfig::default());
//!
//! // Feed one fingertip observation per frame
//! let tip = NormalizedPoint::new(0.8, 0.3);
//! let update = mapper.apply(tip, &mut actuator)?;
//! println!("{update:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Classifying gestures with an explicit clock
//!
//! ```
//! use virtual_mouse::config::GestureConfig;
//! use virtual_mouse::gestures::{GestureClassifier, GestureEvent};
//! use virtual_mouse::hand_tracking::NormalizedPoint;
//!
//! let mut classifier = GestureClassifier::new(GestureConfig::default());
//!
//! let index_tip = NormalizedPoint::new(0.5, 0.5);
//! let thumb_tip = NormalizedPoint::new(0.52, 0.5); // tight pinch
//! let (event, _feedback) = classifier.detect_click(index_tip, thumb_tip, 0.0);
//! assert_eq!(event, Some(GestureEvent::Click));
//! ```
//!
//! ## Running the full application
//!
//! ```no_run
//! use virtual_mouse::{app::VirtualMouseApp, config::Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = VirtualMouseApp::new(Config::default())?;
//! app.run()?;
//! # Ok(())
//! # }
//! ```

/// Hand landmark detection via ONNX Runtime
pub mod hand_tracking;

/// Fingertip-to-screen coordinate mapping with deadzone and smoothing
pub mod mapper;

/// Pinch and scroll gesture classification
pub mod gestures;

/// Cursor actuation for X11 systems
pub mod cursor_control;

/// Diagnostics overlay rendering
pub mod overlay;

/// Main application module
pub mod app;

/// Error types and result handling
pub mod error;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Small shared helpers
pub mod utils;

pub use error::{Error, Result};
