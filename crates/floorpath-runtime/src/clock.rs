//! Frame timestamps to tick deltas.
//!
//! Hosts receive a timestamp per frame (a monotonic instant, or the
//! millisecond value a browser passes to its animation-frame callback). The
//! scheduler wants the delta since the previous frame; [`FrameClock`] does the
//! conversion and clamps pathological gaps such as a backgrounded tab.

use std::time::Duration;

use web_time::Instant;

/// Largest delta accepted for one frame.
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    last_ms: Option<f64>,
    max_delta: Duration,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            last_ms: None,
            max_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }

    #[must_use]
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Delta since the previous call; zero on the first frame.
    pub fn delta_at(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |prev| now.saturating_duration_since(prev));
        self.last = Some(now);
        dt.min(self.max_delta)
    }

    /// Delta since the previous frame, measured now.
    pub fn delta(&mut self) -> Duration {
        self.delta_at(Instant::now())
    }

    /// Delta from millisecond frame timestamps; non-monotonic input yields zero.
    pub fn delta_from_millis(&mut self, timestamp_ms: f64) -> Duration {
        let dt = match self.last_ms {
            Some(prev) if timestamp_ms.is_finite() && timestamp_ms > prev => {
                Duration::from_secs_f64((timestamp_ms - prev) / 1000.0)
            }
            _ => Duration::ZERO,
        };
        if timestamp_ms.is_finite() {
            self.last_ms = Some(timestamp_ms);
        }
        dt.min(self.max_delta)
    }

    /// Forget the previous frame, e.g. after the host paused rendering.
    pub fn reset(&mut self) {
        self.last = None;
        self.last_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
