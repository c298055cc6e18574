//! Wall-clock frame-rate estimation over fixed windows.

/// Window length before a sample is produced.
pub const SAMPLE_WINDOW_MS: f64 = 2000.0;

/// Counts animation-frame callbacks and yields a frames-per-second estimate
/// once per elapsed window.
pub struct FpsSampler {
    frames: u32,
    window_start_ms: f64,
}

impl FpsSampler {
    pub fn new(now_ms: f64) -> Self {
        Self {
            frames: 0,
            window_start_ms: now_ms,
        }
    }

    /// Record one frame at `now_ms`. Returns the FPS estimate when the
    /// current window has elapsed, resetting the window.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<f64> {
        self.frames += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed > SAMPLE_WINDOW_MS {
            let fps = self.frames as f64 * 1000.0 / elapsed;
            self.frames = 0;
            self.window_start_ms = now_ms;
            Some(fps)
        } else {
            None
        }
    }
}
