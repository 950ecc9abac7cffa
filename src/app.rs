//! Main application: camera lifecycle and the per-frame control loop.

use crate::{
    config::Config,
    constants::{CAMERA_RECOVERY_PAUSE, CAMERA_WARMUP_READS},
    cursor_control::{CursorActuator, CursorController},
    error::{Error, Result},
    gestures::{GestureClassifier, GestureEvent},
    hand_tracking::{HandLandmarks, HandTracker, LandmarkSource},
    mapper::{MapperUpdate, PointerMapper},
    overlay,
    utils::FpsCounter,
};
use log::{error, info, warn};
use opencv::{
    core::{self, Mat},
    highgui::{self, WINDOW_NORMAL},
    imgproc,
    prelude::*,
    videoio::{
        self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FOURCC, CAP_PROP_FPS,
        CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH,
    },
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Virtual mouse application: owns the camera, the tracker, the mapping
/// and gesture state, and the X11 actuator.
pub struct VirtualMouseApp {
    config: Config,
    tracker: Box<dyn LandmarkSource>,
    mapper: PointerMapper,
    classifier: GestureClassifier,
    actuator: CursorController,
    capture: VideoCapture,
    epoch: Instant,
    fps: FpsCounter,
    stop: Arc<AtomicBool>,
}

impl VirtualMouseApp {
    /// Initialize camera, tracker, actuator, and preview window
    ///
    /// # Errors
    ///
    /// Returns an error if the camera cannot be opened or fails its
    /// warmup reads, if the landmark model cannot be loaded, or if the
    /// X11 connection fails.
    pub fn new(config: Config) -> Result<Self> {
        info!("Initializing virtual mouse application");
        config.validate()?;

        let mut capture = Self::open_camera(&config)?;
        Self::warm_up(&mut capture)?;

        let tracker = HandTracker::new(&config.tracking.model, config.tracking.min_confidence)?;
        let actuator = CursorController::new()?;

        if config.display.gui {
            highgui::named_window(&config.display.window_title, WINDOW_NORMAL)?;
        }

        Ok(Self {
            mapper: PointerMapper::new(config.pointer.clone()),
            classifier: GestureClassifier::new(config.gestures.clone()),
            tracker: Box::new(tracker),
            actuator,
            capture,
            epoch: Instant::now(),
            fps: FpsCounter::new(),
            stop: Arc::new(AtomicBool::new(false)),
            config,
        })
    }

    /// Flag that ends the frame loop when set. Hand a clone to a signal
    /// handler so a headless run can still be stopped cleanly.
    #[must_use]
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Open and configure the capture device. The driver is free to
    /// silently substitute a different rate or format; we only insist on
    /// getting frames at all.
    fn open_camera(config: &Config) -> Result<VideoCapture> {
        let cam = &config.camera;
        info!("Opening camera {}", cam.index);
        let mut capture = VideoCapture::new(cam.index, videoio::CAP_ANY)?;

        capture.set(CAP_PROP_FRAME_WIDTH, f64::from(cam.width))?;
        capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(cam.height))?;
        capture.set(CAP_PROP_FPS, cam.fps)?;
        // Buffer depth 1 keeps the loop working on the freshest frame
        capture.set(CAP_PROP_BUFFERSIZE, f64::from(cam.buffer_size))?;
        let fourcc = videoio::VideoWriter::fourcc('M', 'J', 'P', 'G')?;
        capture.set(CAP_PROP_FOURCC, f64::from(fourcc))?;

        Ok(capture)
    }

    /// Read a handful of frames before entering the main loop. Any
    /// failed read here is fatal: the device is not usable.
    fn warm_up(capture: &mut VideoCapture) -> Result<()> {
        info!("Warming up camera ({} reads)", CAMERA_WARMUP_READS);
        let mut frame = Mat::default();
        for i in 0..CAMERA_WARMUP_READS {
            if !capture.read(&mut frame)? || frame.empty() {
                return Err(Error::Camera(format!(
                    "Camera failed to deliver a frame during warmup (read {})",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Run the frame loop until the quit key is pressed
    ///
    /// # Errors
    ///
    /// Returns an error only for unrecoverable display failures; frame,
    /// detection, and gesture errors are logged and recovered locally.
    pub fn run(&mut self) -> Result<()> {
        info!("Entering main loop");

        loop {
            let mut frame = Mat::default();
            let got_frame = match self.capture.read(&mut frame) {
                Ok(ok) => ok && !frame.empty(),
                Err(e) => {
                    warn!("Frame read error: {e}");
                    false
                }
            };
            if !got_frame {
                self.recycle_camera();
                continue;
            }

            let (mut frame, rgb) = Self::prepare_frame(&frame)?;

            // From here on only the preview copy is touched; the
            // detection input was derived from the clean frame above
            overlay::draw_instruction_panel(&mut frame)?;

            // One clock reading shared by both gesture checks, so their
            // cooldown math stays consistent within the frame
            let now = self.epoch.elapsed().as_secs_f64();

            match self.tracker.detect(&rgb) {
                Ok(Some(hand)) => {
                    if let Err(e) = self.process_hand(&hand, &mut frame, now) {
                        error!("Gesture processing failed, skipping frame: {e}");
                    }
                }
                Ok(None) => {}
                Err(e) => error!("Hand tracking failed, skipping frame: {e}"),
            }

            self.fps.update();
            overlay::draw_fps(&mut frame, self.fps.fps())?;

            let key = if self.config.display.gui {
                highgui::imshow(&self.config.display.window_title, &frame)?;
                highgui::wait_key(1)?
            } else {
                -1
            };
            if Self::exit_requested(&self.stop, key) {
                info!("Exit requested by user");
                break;
            }
        }

        info!("Application shutting down");
        Ok(())
    }

    /// Mirror the captured frame and derive the detection input from it.
    /// Runs before any overlay drawing so the model never sees UI pixels.
    fn prepare_frame(captured: &Mat) -> Result<(Mat, Mat)> {
        // Mirror so motion on screen matches motion of the hand
        let mut frame = Mat::default();
        core::flip(captured, &mut frame, 1)?;

        let mut rgb = Mat::default();
        imgproc::cvt_color(&frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;
        Ok((frame, rgb))
    }

    /// True when the external stop flag is set or the preview window
    /// reported a quit key (`-1` when no key or no window)
    fn exit_requested(stop: &AtomicBool, key: i32) -> bool {
        stop.load(Ordering::SeqCst) || key == i32::from(b'q') || key == 27
    }

    /// Drive cursor movement and gesture events from one detected hand
    fn process_hand(&mut self, hand: &HandLandmarks, frame: &mut Mat, now: f64) -> Result<()> {
        let index_tip = hand.index_tip();

        match self.mapper.apply(index_tip, &mut self.actuator)? {
            MapperUpdate::Deadzone { boosted } => overlay::draw_deadzone(frame, boosted)?,
            MapperUpdate::Moved { .. } => {}
        }

        let (event, feedback) = self.classifier.detect_click(index_tip, hand.thumb_tip(), now);
        overlay::draw_pinch_ring(frame, index_tip, feedback)?;
        match event {
            Some(GestureEvent::Click) => self.actuator.click()?,
            Some(GestureEvent::RightClick) => self.actuator.right_click()?,
            _ => {}
        }

        if let Some(GestureEvent::ScrollBy(amount)) =
            self.classifier.detect_scroll(index_tip, hand.middle_tip(), now)
        {
            self.actuator.scroll(amount)?;
            overlay::draw_scroll_ring(frame, index_tip)?;
        }

        overlay::draw_hand_skeleton(frame, hand)?;
        Ok(())
    }

    /// Recover from a mid-run frame read failure: pause briefly, then
    /// release and reacquire the camera. Repeated failures land back
    /// here, so recovery retries indefinitely.
    fn recycle_camera(&mut self) {
        warn!("Frame read failed, recycling camera");
        std::thread::sleep(Duration::from_secs_f64(CAMERA_RECOVERY_PAUSE));

        if let Err(e) = self.capture.release() {
            warn!("Failed to release camera: {e}");
        }
        match Self::open_camera(&self.config) {
            Ok(capture) => self.capture = capture,
            Err(e) => warn!("Camera reacquisition failed, will retry: {e}"),
        }
    }
}
