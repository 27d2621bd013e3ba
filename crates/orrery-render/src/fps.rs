//! Frame rate tracking for the preview window

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// FPS counter over a sliding one-second window
#[derive(Debug)]
pub struct FpsCounter {
    frame_times: VecDeque<Instant>,
    last_frame: Option<Instant>,
    last_report: Option<Instant>,
    fps: f32,
    frame_time_ms: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(120),
            last_frame: None,
            last_report: None,
            fps: 0.0,
            frame_time_ms: 0.0,
        }
    }

    /// Record a frame presented at `now`
    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last_frame {
            self.frame_time_ms = now.saturating_duration_since(last).as_secs_f32() * 1000.0;
        }
        self.last_frame = Some(now);
        self.frame_times.push_back(now);

        // Keep only frames from the last second
        while let Some(front) = self.frame_times.front() {
            if now.saturating_duration_since(*front) > Self::WINDOW {
                self.frame_times.pop_front();
            } else {
                break;
            }
        }

        self.fps = self.frame_times.len() as f32;
    }

    /// True once per window; the caller logs the rate when it fires
    pub fn should_report(&mut self, now: Instant) -> bool {
        match self.last_report {
            Some(last) if now.saturating_duration_since(last) < Self::WINDOW => false,
            _ => {
                self.last_report = Some(now);
                true
            }
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Last frame time in milliseconds
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    pub fn display_string(&self) -> String {
        format!("{:.0} FPS ({:.1}ms)", self.fps, self.frame_time_ms)
    }
}
