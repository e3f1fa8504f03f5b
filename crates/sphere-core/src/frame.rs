//! Frame timing for the animation loop.
//!
//! The clock holds no domain state, only the previous timestamp and whether
//! the loop is running. Stopping and starting are idempotent.

use crate::constants::MAX_FRAME_DT_SEC;
use instant::Instant;

#[derive(Clone, Debug)]
pub struct FrameClock {
    last_instant: Option<Instant>,
    running: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            last_instant: None,
            running: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            // The gap while stopped must not show up as one huge step.
            self.last_instant = None;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_instant = None;
    }

    /// Seconds to advance for a host-reported elapsed time. `None` while
    /// stopped. Negative or non-finite input counts as zero.
    pub fn step_elapsed(&mut self, elapsed_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = (elapsed_ms / 1000.0) as f32;
        Some(if dt.is_finite() { dt.max(0.0) } else { 0.0 })
    }

    /// Seconds since the previous call, capped at `MAX_FRAME_DT_SEC`. The
    /// first call after (re)starting returns zero.
    pub fn step_at(&mut self, now: Instant) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = match self.last_instant {
            Some(prev) if now > prev => (now - prev).as_secs_f32(),
            _ => 0.0,
        };
        self.last_instant = Some(now);
        Some(dt.min(MAX_FRAME_DT_SEC))
    }
}
