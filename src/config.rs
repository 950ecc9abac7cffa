//! Configuration management for the virtual mouse application

use crate::constants::{
    BOTTOM_BOOST, CAMERA_BUFFER_SIZE, CAMERA_FPS, CAMERA_HEIGHT, CAMERA_WIDTH, CLICK_COOLDOWN,
    CLICK_THRESH, CORNER_BOOST, DEADZONE_RADIUS, MIN_TRACKING_CONFIDENCE, RIGHT_CLICK_HOLD,
    SCROLL_GAIN, SCROLL_INTERVAL, SCROLL_THRESH, SMOOTHING,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera capture configuration
    pub camera: CameraConfig,

    /// Hand tracking configuration
    pub tracking: TrackingConfig,

    /// Cursor mapping configuration
    pub pointer: PointerConfig,

    /// Gesture thresholds and timing
    pub gestures: GestureConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Camera capture parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Video device index
    pub index: i32,

    /// Capture width in pixels
    pub width: i32,

    /// Capture height in pixels
    pub height: i32,

    /// Target frame rate (the driver may deliver less)
    pub fps: f64,

    /// Driver buffer depth; 1 minimizes latency
    pub buffer_size: i32,
}

/// Hand tracking parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Path to the hand landmark ONNX model
    pub model: PathBuf,

    /// Confidence floor for accepting a detection (0.0-1.0)
    pub min_confidence: f32,
}

/// Cursor mapping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Horizontal reach boost toward the screen edges
    pub corner_boost: f64,

    /// Vertical reach boost, larger to ease bottom reach
    pub bottom_boost: f64,

    /// Hold-still radius around the frame center, normalized
    pub deadzone_radius: f64,

    /// One-pole smoothing factor; higher means more inertia
    pub smoothing: f64,
}

/// Gesture thresholds and timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch distance below which a click registers
    pub click_thresh: f64,

    /// Minimum seconds between click firings
    pub click_cooldown: f64,

    /// Seconds a loose pinch must be held for a right click
    pub right_click_hold: f64,

    /// Fingertip vertical separation that activates scrolling
    pub scroll_thresh: f64,

    /// Minimum seconds between scroll emissions while held
    pub scroll_interval: f64,

    /// Scroll magnitude scale factor
    pub scroll_gain: f64,

    /// Flip the scroll direction convention
    pub invert_scroll: bool,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the live preview window
    pub gui: bool,

    /// Preview window title
    pub window_title: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: CAMERA_WIDTH,
            height: CAMERA_HEIGHT,
            fps: CAMERA_FPS,
            buffer_size: CAMERA_BUFFER_SIZE,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/hand_landmarks.onnx"),
            min_confidence: MIN_TRACKING_CONFIDENCE,
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            corner_boost: CORNER_BOOST,
            bottom_boost: BOTTOM_BOOST,
            deadzone_radius: DEADZONE_RADIUS,
            smoothing: SMOOTHING,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_thresh: CLICK_THRESH,
            click_cooldown: CLICK_COOLDOWN,
            right_click_hold: RIGHT_CLICK_HOLD,
            scroll_thresh: SCROLL_THRESH,
            scroll_interval: SCROLL_INTERVAL,
            scroll_gain: SCROLL_GAIN,
            invert_scroll: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            gui: true,
            window_title: "Virtual Mouse".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns a [`Error::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.camera.width <= 0 || self.camera.height <= 0 {
            return Err(Error::Config("Camera resolution must be positive".to_string()));
        }
        if self.camera.fps <= 0.0 {
            return Err(Error::Config("Camera FPS must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.tracking.min_confidence) {
            return Err(Error::Config(
                "Tracking confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.pointer.smoothing) {
            return Err(Error::Config(
                "Smoothing factor must be in [0.0, 1.0)".to_string(),
            ));
        }
        if !(0.0..0.5).contains(&self.pointer.deadzone_radius) {
            return Err(Error::Config(
                "Deadzone radius must be in [0.0, 0.5)".to_string(),
            ));
        }
        if self.gestures.click_thresh <= 0.0 {
            return Err(Error::Config("Click threshold must be positive".to_string()));
        }
        if self.gestures.scroll_thresh <= 0.0 {
            return Err(Error::Config("Scroll threshold must be positive".to_string()));
        }
        if self.gestures.click_cooldown < 0.0
            || self.gestures.right_click_hold < 0.0
            || self.gestures.scroll_interval < 0.0
        {
            return Err(Error::Config("Gesture timings must be non-negative".to_string()));
        }
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Virtual Mouse Configuration

# Camera capture
camera:
  index: 0
  width: 640
  height: 480
  fps: 60.0
  buffer_size: 1

# Hand tracking
tracking:
  model: "assets/hand_landmarks.onnx"
  min_confidence: 0.75

# Cursor mapping
pointer:
  corner_boost: 0.28
  bottom_boost: 0.45
  deadzone_radius: 0.12
  smoothing: 0.35

# Gestures
gestures:
  click_thresh: 0.055
  click_cooldown: 0.25
  right_click_hold: 0.9
  scroll_thresh: 0.18
  scroll_interval: 0.1
  scroll_gain: 50.0
  invert_scroll: false

# Display
display:
  gui: true
  window_title: "Virtual Mouse"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.camera.width, 640);
        assert!((config.gestures.click_thresh - 0.055).abs() < 1e-12);
        assert!(!config.gestures.invert_scroll);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("gestures:\n  invert_scroll: true\n").unwrap();
        assert!(config.gestures.invert_scroll);
        assert_eq!(config.camera.width, CAMERA_WIDTH);
        assert!((config.pointer.smoothing - SMOOTHING).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_smoothing() {
        let mut config = Config::default();
        config.pointer.smoothing = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_confidence() {
        let mut config = Config::default();
        config.tracking.min_confidence = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_cooldown() {
        let mut config = Config::default();
        config.gestures.click_cooldown = -0.1;
        assert!(config.validate().is_err());
    }
}
