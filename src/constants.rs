//! Constants used throughout the application

/// Number of hand landmarks produced by the tracking model
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Horizontal reach boost: expand fingertip range toward the screen edges
pub const CORNER_BOOST: f64 = 0.28;

/// Vertical reach boost, larger to compensate for downward hand drop
pub const BOTTOM_BOOST: f64 = 0.45;

/// Radius of the hold-still region around frame center, normalized
pub const DEADZONE_RADIUS: f64 = 0.12;

/// One-pole smoothing factor: weight of the previous smoothed position
pub const SMOOTHING: f64 = 0.35;

/// Pinch distance below which a tight pinch registers as a click
pub const CLICK_THRESH: f64 = 0.055;

/// The loose pinch band extends to `CLICK_THRESH * LOOSE_PINCH_FACTOR`
pub const LOOSE_PINCH_FACTOR: f64 = 1.5;

/// Minimum elapsed seconds between two click firings
pub const CLICK_COOLDOWN: f64 = 0.25;

/// Seconds a loose pinch must be held before a right click fires
pub const RIGHT_CLICK_HOLD: f64 = 0.9;

/// Index/middle fingertip vertical separation that activates scrolling
pub const SCROLL_THRESH: f64 = 0.18;

/// Minimum elapsed seconds between scroll emissions while the gesture is held
pub const SCROLL_INTERVAL: f64 = 0.1;

/// Scroll magnitude scale: `round(SCROLL_GAIN * |sep| / SCROLL_THRESH)`
pub const SCROLL_GAIN: f64 = 50.0;

/// Default camera capture width
pub const CAMERA_WIDTH: i32 = 640;

/// Default camera capture height
pub const CAMERA_HEIGHT: i32 = 480;

/// Target camera frame rate (the driver may silently deliver less)
pub const CAMERA_FPS: f64 = 60.0;

/// Camera buffer depth, kept at 1 to minimize latency
pub const CAMERA_BUFFER_SIZE: i32 = 1;

/// Number of warmup reads required before the main loop starts
pub const CAMERA_WARMUP_READS: usize = 10;

/// Seconds to pause before recycling a failed camera
pub const CAMERA_RECOVERY_PAUSE: f64 = 1.0;

/// Confidence floor for accepting a detected hand
pub const MIN_TRACKING_CONFIDENCE: f32 = 0.75;

/// Side length of the square model input, pixels
pub const MODEL_INPUT_SIZE: i32 = 224;

/// Side length of the reserved failsafe square at each screen corner, pixels
pub const FAILSAFE_MARGIN: i32 = 10;

/// Pinch feedback ring radius, pixels
pub const PINCH_RING_RADIUS: i32 = 30;

/// Scroll feedback ring radius, pixels
pub const SCROLL_RING_RADIUS: i32 = 35;

/// Seconds between FPS counter refreshes
pub const FPS_REFRESH_INTERVAL: f64 = 0.5;
