//! Hand landmark detection using `ONNX` Runtime.
//!
//! Wraps a pretrained 21-point hand landmark model. Each frame yields at
//! most one hand; detections below the confidence floor are discarded so
//! the rest of the pipeline only ever sees a confident hand or nothing.

use crate::constants::{MODEL_INPUT_SIZE, NUM_HAND_LANDMARKS};
use crate::{Error, Result};
use ndarray::{Array1, Array4, CowArray};
use opencv::core::{Mat, Size, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Landmark index of the thumb tip
pub const THUMB_TIP: usize = 4;

/// Landmark index of the index fingertip
pub const INDEX_FINGER_TIP: usize = 8;

/// Landmark index of the middle fingertip
pub const MIDDLE_FINGER_TIP: usize = 12;

/// Skeleton topology of the 21-point hand model, as landmark index pairs.
/// Used only for rendering.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // Thumb
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    // Index finger
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    // Middle finger
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    // Ring finger
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    // Pinky
    (13, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    // Palm base
    (0, 17),
];

/// A landmark position normalized to [0, 1] per axis, relative to the
/// frame dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    /// Horizontal position in [0, 1]
    pub x: f64,
    /// Vertical position in [0, 1]
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another normalized point
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One detected hand: 21 normalized landmark points.
#[derive(Debug, Clone)]
pub struct HandLandmarks {
    points: [NormalizedPoint; NUM_HAND_LANDMARKS],
}

impl HandLandmarks {
    /// Build from a full set of 21 points
    pub const fn new(points: [NormalizedPoint; NUM_HAND_LANDMARKS]) -> Self {
        Self { points }
    }

    /// All landmark points in model order
    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    pub const fn thumb_tip(&self) -> NormalizedPoint {
        self.points[THUMB_TIP]
    }

    pub const fn index_tip(&self) -> NormalizedPoint {
        self.points[INDEX_FINGER_TIP]
    }

    pub const fn middle_tip(&self) -> NormalizedPoint {
        self.points[MIDDLE_FINGER_TIP]
    }
}

/// Narrow capability interface over hand landmark detection, so the
/// pipeline can be driven by synthetic landmark sequences in tests.
pub trait LandmarkSource {
    /// Detect at most one hand in an RGB frame.
    ///
    /// # Errors
    ///
    /// Returns an error if preprocessing or model inference fails.
    fn detect(&mut self, rgb_frame: &Mat) -> Result<Option<HandLandmarks>>;
}

/// Hand landmark detector backed by `ONNX` Runtime
pub struct HandTracker {
    session: Session,
    input_size: i32,
    min_confidence: f32,
}

impl HandTracker {
    /// Create a new hand tracker from an `ONNX` model file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The ONNX runtime environment cannot be created
    /// - The model has no inputs or outputs
    pub fn new<P: AsRef<Path>>(model_path: P, min_confidence: f32) -> Result<Self> {
        log::info!(
            "Initializing HandTracker with model: {}",
            model_path.as_ref().display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("hand_tracker")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        if session.inputs.is_empty() {
            return Err(Error::ModelInput("Model has no inputs".to_string()));
        }
        if session.outputs.len() < 2 {
            return Err(Error::ModelOutput(
                "Model must expose landmark and presence outputs".to_string(),
            ));
        }

        Ok(Self {
            session,
            input_size: MODEL_INPUT_SIZE,
            min_confidence,
        })
    }

    /// Resize and normalize an RGB frame into the model input tensor
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn preprocess(&self, rgb_frame: &Mat) -> Result<Array4<f32>> {
        let size = self.input_size as usize;
        let channels = 3;

        let mut resized = Mat::default();
        imgproc::resize(
            rgb_frame,
            &mut resized,
            Size::new(self.input_size, self.input_size),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        // Convert to f32 and normalize to [0, 1]
        let mut float_image = Mat::default();
        resized.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let mut data = vec![0.0f32; size * size * channels];
        for row in 0..size {
            for col in 0..size {
                let pixel = float_image.at_2d::<opencv::core::Vec3f>(row as i32, col as i32)?;
                for ch in 0..channels {
                    data[(row * size + col) * channels + ch] = pixel[ch];
                }
            }
        }

        // NHWC, matching the model's input layout
        Array4::from_shape_vec((1, size, size, channels), data)
            .map_err(|e| Error::ModelInput(format!("Failed to create input array: {e}")))
    }

    /// Run the model; returns the raw landmark vector and the hand
    /// presence score
    fn forward(&self, inputs: Array4<f32>) -> Result<(Array1<f32>, f32)> {
        let cow_array = CowArray::from(inputs.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;
        let mut outputs = outputs.into_iter();

        let landmarks_output = outputs
            .next()
            .ok_or_else(|| Error::ModelOutput("No landmark output from model".to_string()))?;
        let landmarks_tensor = landmarks_output.try_extract::<f32>()?;
        let landmarks_view = landmarks_tensor.view();
        let landmarks_data = landmarks_view
            .as_slice()
            .ok_or_else(|| Error::ModelOutput("Failed to get landmark data".to_string()))?;

        let score_output = outputs
            .next()
            .ok_or_else(|| Error::ModelOutput("No presence output from model".to_string()))?;
        let score_tensor = score_output.try_extract::<f32>()?;
        let score_view = score_tensor.view();
        let score = score_view
            .as_slice()
            .and_then(<[f32]>::first)
            .copied()
            .ok_or_else(|| Error::ModelOutput("Failed to get presence score".to_string()))?;

        Ok((Array1::from(landmarks_data.to_vec()), score))
    }

    /// Convert the raw model output (x, y, z per landmark, in input-pixel
    /// space) to normalized landmark points
    fn postprocess(&self, raw: &Array1<f32>) -> Result<HandLandmarks> {
        let n_coords = 3; // x, y, z; depth is discarded
        if raw.len() < NUM_HAND_LANDMARKS * n_coords {
            return Err(Error::ModelOutput(format!(
                "Expected {} landmark values, got {}",
                NUM_HAND_LANDMARKS * n_coords,
                raw.len()
            )));
        }

        let scale = f64::from(self.input_size);
        let mut points = [NormalizedPoint::new(0.0, 0.0); NUM_HAND_LANDMARKS];
        for (i, point) in points.iter_mut().enumerate() {
            let x = f64::from(raw[i * n_coords]) / scale;
            let y = f64::from(raw[i * n_coords + 1]) / scale;
            *point = NormalizedPoint::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
        }

        Ok(HandLandmarks::new(points))
    }
}

impl LandmarkSource for HandTracker {
    fn detect(&mut self, rgb_frame: &Mat) -> Result<Option<HandLandmarks>> {
        let input = self.preprocess(rgb_frame)?;
        let (raw, score) = self.forward(input)?;

        if score < self.min_confidence {
            log::debug!("Hand presence score {score:.3} below confidence floor");
            return Ok(None);
        }

        Ok(Some(self.postprocess(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_count() {
        assert_eq!(NUM_HAND_LANDMARKS, 21);
    }

    #[test]
    fn test_fingertip_indices() {
        // Standard 21-point hand model numbering
        assert_eq!(THUMB_TIP, 4);
        assert_eq!(INDEX_FINGER_TIP, 8);
        assert_eq!(MIDDLE_FINGER_TIP, 12);
    }

    #[test]
    fn test_connections_reference_valid_landmarks() {
        for (a, b) in HAND_CONNECTIONS {
            assert!(a < NUM_HAND_LANDMARKS);
            assert!(b < NUM_HAND_LANDMARKS);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_normalized_distance() {
        let a = NormalizedPoint::new(0.0, 0.0);
        let b = NormalizedPoint::new(0.3, 0.4);
        assert!((a.distance_to(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fingertip_accessors() {
        let mut points = [NormalizedPoint::new(0.0, 0.0); NUM_HAND_LANDMARKS];
        points[THUMB_TIP] = NormalizedPoint::new(0.1, 0.2);
        points[INDEX_FINGER_TIP] = NormalizedPoint::new(0.3, 0.4);
        points[MIDDLE_FINGER_TIP] = NormalizedPoint::new(0.5, 0.6);
        let hand = HandLandmarks::new(points);

        assert_eq!(hand.thumb_tip(), NormalizedPoint::new(0.1, 0.2));
        assert_eq!(hand.index_tip(), NormalizedPoint::new(0.3, 0.4));
        assert_eq!(hand.middle_tip(), NormalizedPoint::new(0.5, 0.6));
        assert_eq!(hand.points().len(), NUM_HAND_LANDMARKS);
    }
}
