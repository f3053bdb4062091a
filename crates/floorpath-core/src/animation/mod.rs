#![forbid(unsafe_code)]

//! Tick-driven animation primitives.
//!
//! Animations never read a clock. Hosts advance them with [`Animation::tick`]
//! once per frame, passing the time elapsed since the previous frame, which
//! keeps every animation deterministic under test.
//!
//! # Invariants
//!
//! 1. `value()` is in `[0.0, 1.0]`.
//! 2. `tick()` after completion is a no-op apart from overshoot accounting.
//! 3. `reset()` returns the animation to its initial state.
//!
//! # Failure Modes
//!
//! - Zero duration: clamped to 1ns, so the first non-zero tick completes.

mod reveal;

pub use reveal::PathReveal;

use std::time::Duration;

/// An animation advanced by explicit time deltas.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation reached its end.
    fn is_complete(&self) -> bool;

    /// Current eased progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time accumulated past the end of the animation.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Maps linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
pub type EasingFn = fn(f32) -> f32;

#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out.
#[inline]
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Quartic ease-in-out: slow start, fast middle, slow end.
///
/// First half is `0.5 * (2t)^4`; the second half mirrors it as
/// `0.5 + 0.5 * (1 - (1 - u)^4)` with `u = 2(t - 0.5)`.
#[inline]
#[must_use]
pub fn ease_in_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        0.5 * (2.0 * t).powi(4)
    } else {
        let u = 2.0 * (t - 0.5);
        0.5 + 0.5 * (1.0 - (1.0 - u).powi(4))
    }
}

/// Elapsed-fraction driver over a fixed duration, mapped through an easing.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Linear elapsed fraction in `[0, 1]`, before easing.
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}
