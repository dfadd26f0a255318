//! Frame clock for the render loop.
//!
//! The simulation advances one tick per frame regardless of wall time, so
//! this clock only feeds diagnostics: FPS in the window title and in the
//! debug log.
//!
//! ```ignore
//! let mut time = Time::new();
//!
//! // once per frame
//! time.update();
//! if let Some(fps) = time.take_fps_report() {
//!     log::debug!("{:.1} fps", fps);
//! }
//! ```

use std::time::{Duration, Instant};

/// Tracks frame count, delta time and a periodically refreshed FPS.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    /// Set whenever `fps` is refreshed, cleared by `take_fps_report`.
    fps_fresh: bool,
}

impl Time {
    /// Create a new clock starting from now, refreshing FPS every second.
    pub fn new() -> Self {
        Self::with_fps_interval(Duration::from_secs(1))
    }

    /// Create a new clock with a custom FPS refresh interval.
    pub fn with_fps_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: interval,
            fps_fresh: false,
        }
    }

    /// Record a frame. Returns the delta since the previous one, in seconds.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            self.fps_fresh = true;
        }

        self.delta_secs
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames recorded so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS measurement.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// The FPS value, once per refresh.
    pub fn take_fps_report(&mut self) -> Option<f32> {
        std::mem::take(&mut self.fps_fresh).then_some(self.fps)
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
