use web_time::{Duration, Instant};

/// How often the smoothed frame rate is written to the log.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Smoothed frames-per-second tracker for the redraw loop.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time the rate was logged
    last_report: Instant,
    /// Frames presented so far
    frames: u64,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Start timing from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            last_report: now,
            frames: 0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Call after presenting a frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        self.record(now.duration_since(self.last_frame));
        self.last_frame = now;

        if now.duration_since(self.last_report) >= REPORT_INTERVAL {
            log::debug!(
                "{:.1} fps over {} frames",
                self.smoothed_fps,
                self.frames
            );
            self.last_report = now;
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.frames += 1;
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Current smoothed frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames presented since creation.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_toward_steady_rate() {
        let mut timing = FrameTiming::new();
        for _ in 0..500 {
            timing.record(Duration::from_millis(10));
        }
        assert_eq!(timing.frame_count(), 500);
        assert!((timing.fps() - 100.0).abs() < 0.5);
    }

    #[test]
    fn zero_length_frame_keeps_rate() {
        let mut timing = FrameTiming::new();
        timing.record(Duration::ZERO);
        assert_eq!(timing.fps(), 60.0);
        assert_eq!(timing.frame_count(), 1);
    }
}
