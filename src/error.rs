//! Error types for the virtual mouse library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// `ONNX` Runtime inference failed
    #[error("ONNX Runtime error: {0}")]
    OnnxRuntime(#[from] ort::OrtError),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Camera failed to initialize or deliver frames during warmup
    #[error("Camera error: {0}")]
    Camera(String),

    /// Model input configuration error
    #[error("Model input error: {0}")]
    ModelInput(String),

    /// Model output processing error
    #[error("Model output error: {0}")]
    ModelOutput(String),

    /// Cursor control operation failed
    #[error("Cursor control error: {0}")]
    CursorControl(String),

    /// Cursor move rejected because the target lies inside a reserved
    /// failsafe corner. The pointer mapper swallows this variant; every
    /// other actuator error propagates.
    #[error("failsafe triggered at ({x}, {y})")]
    FailSafe {
        /// Rejected target x coordinate
        x: i32,
        /// Rejected target y coordinate
        y: i32,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
