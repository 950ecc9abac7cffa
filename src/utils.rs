//! Small helpers shared across the pipeline.

use crate::constants::FPS_REFRESH_INTERVAL;
use std::time::Instant;

/// Frames-per-second counter refreshed twice per second.
pub struct FpsCounter {
    fps: f64,
    frame_count: u32,
    window_start: Instant,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            fps: 0.0,
            frame_count: 0,
            window_start: Instant::now(),
        }
    }

    /// Record one frame and refresh the estimate if the window elapsed
    pub fn update(&mut self) {
        self.frame_count += 1;
        let elapsed = self.window_start.elapsed().as_secs_f64();
        if elapsed > FPS_REFRESH_INTERVAL {
            self.fps = f64::from(self.frame_count) / elapsed;
            self.frame_count = 0;
            self.window_start = Instant::now();
        }
    }

    /// Current smoothed estimate (0.0 until the first window elapses)
    pub const fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fps_counter_starts_at_zero() {
        let counter = FpsCounter::new();
        assert_eq!(counter.fps(), 0.0);
    }

    #[test]
    fn test_fps_counter_updates_after_window() {
        let mut counter = FpsCounter::new();
        for _ in 0..5 {
            counter.update();
        }
        // Window has not elapsed yet
        assert_eq!(counter.fps(), 0.0);

        thread::sleep(Duration::from_millis(600));
        counter.update();
        assert!(counter.fps() > 0.0);
        assert!(counter.fps() < 100.0);
    }
}
