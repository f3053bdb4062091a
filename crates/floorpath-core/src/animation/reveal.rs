//! Progressive polyline reveal.
//!
//! A [`PathReveal`] densifies a polyline and exposes, frame by frame, how many
//! of the densified points should be drawn. Densifying first keeps perceived
//! speed uniform when the original vertices are unevenly spaced.

use std::time::Duration;

use super::{Animation, EasingFn, Fade};
use crate::geometry::{LatLng, densify};

/// Reveals a densified polyline over a fixed duration.
///
/// The first point is visible from the start; [`PathReveal::advance`] hands
/// out only the points that became visible since the previous call.
#[derive(Debug, Clone)]
pub struct PathReveal {
    points: Vec<LatLng>,
    fade: Fade,
    revealed: usize,
}

impl PathReveal {
    #[must_use]
    pub fn new(
        points: &[LatLng],
        subdivisions: usize,
        duration: Duration,
        easing: EasingFn,
    ) -> Self {
        let points = densify(points, subdivisions);
        let revealed = points.len().min(1);
        Self {
            points,
            fade: Fade::new(duration).easing(easing),
            revealed,
        }
    }

    /// Index of the last point that should be visible now.
    #[must_use]
    pub fn target_index(&self) -> usize {
        let len = self.points.len();
        if len == 0 {
            return 0;
        }
        if self.fade.is_complete() {
            return len - 1;
        }
        let idx = (self.fade.value() * len as f32).floor() as usize;
        idx.min(len - 1)
    }

    /// Advance by `dt` and return the newly visible points.
    pub fn advance(&mut self, dt: Duration) -> &[LatLng] {
        self.fade.tick(dt);
        let start = self.revealed;
        let end = if self.points.is_empty() {
            0
        } else {
            (self.target_index() + 1).max(start)
        };
        self.revealed = end;
        &self.points[start..end]
    }

    /// All densified points.
    #[must_use]
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    /// Points handed out so far (including the initial point).
    #[must_use]
    pub fn visible(&self) -> &[LatLng] {
        &self.points[..self.revealed]
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Linear elapsed fraction, before easing.
    #[must_use]
    pub fn elapsed_fraction(&self) -> f32 {
        self.fade.raw_progress()
    }
}

impl Animation for PathReveal {
    fn tick(&mut self, dt: Duration) {
        let _ = self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete() && self.revealed == self.points.len()
    }

    fn value(&self) -> f32 {
        self.fade.value()
    }

    fn reset(&mut self) {
        self.fade.reset();
        self.revealed = self.points.len().min(1);
    }

    fn overshoot(&self) -> Duration {
        self.fade.overshoot()
    }
}
