#![forbid(unsafe_code)]

//! Floor-transition markers derived from a run sequence.
//!
//! For every adjacent pair of runs on different floors, one candidate marker
//! sits at the end of the earlier run (pointing to the later run's floor) and
//! one at the start of the later run (pointing back). A candidate is dropped
//! when a start/end pin on the same floor already occupies its position.
//!
//! The route's very first and very last points are endpoints, not
//! transitions; they never receive a marker because candidates are only taken
//! from interior run boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::floor::FloorIndex;
use crate::geometry::LatLng;
use crate::segment::Run;

/// Default pin-collision tolerance in degrees (roughly one centimetre).
pub const DEFAULT_MARKER_EPSILON: f64 = 1e-7;

/// Vertical direction of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[must_use]
    pub fn between(source: FloorIndex, target: FloorIndex) -> Self {
        if target > source { Self::Up } else { Self::Down }
    }

    /// Glyph for surfaces that render markers as text.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Up => '▲',
            Self::Down => '▼',
        }
    }
}

/// Which user-chosen endpoint a pin stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinKind {
    Start,
    End,
}

/// A start or end pin, placed on one floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    pub position: LatLng,
    pub floor: FloorIndex,
}

impl Pin {
    #[must_use]
    pub fn new(position: LatLng, floor: FloorIndex) -> Self {
        Self { position, floor }
    }
}

/// The user's start and end choice for one route computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEndpoints {
    pub start: Pin,
    pub end: Pin,
}

impl RouteEndpoints {
    #[must_use]
    pub fn new(start: Pin, end: Pin) -> Self {
        Self { start, end }
    }

    pub fn pins(&self) -> impl Iterator<Item = (PinKind, Pin)> {
        [(PinKind::Start, self.start), (PinKind::End, self.end)].into_iter()
    }

    /// Whether a pin on `floor` lies within `epsilon` of `position`.
    #[must_use]
    pub fn occupies(&self, floor: FloorIndex, position: LatLng, epsilon: f64) -> bool {
        self.pins()
            .any(|(_, pin)| pin.floor == floor && pin.position.approx_eq(position, epsilon))
    }
}

/// Index of a marker within one plan.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

impl fmt::Debug for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// A clickable floor-change indicator. Lives on `source_floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionMarker {
    pub id: MarkerId,
    pub position: LatLng,
    pub source_floor: FloorIndex,
    pub target_floor: FloorIndex,
    pub direction: Direction,
}

/// Derive transition markers from `runs` (in route order).
#[must_use]
pub fn plan(
    runs: &[Run],
    endpoints: Option<&RouteEndpoints>,
    epsilon: f64,
) -> Vec<TransitionMarker> {
    let mut markers = Vec::new();
    let mut suppressed = 0usize;

    for pair in runs.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        if before.floor == after.floor {
            continue;
        }
        let candidates = [
            (before.last_point(), before.floor, after.floor),
            (after.first_point(), after.floor, before.floor),
        ];
        for (position, source, target) in candidates {
            let Some(position) = position else { continue };
            if endpoints.is_some_and(|e| e.occupies(source, position, epsilon)) {
                suppressed += 1;
                continue;
            }
            markers.push(TransitionMarker {
                id: MarkerId(markers.len()),
                position,
                source_floor: source,
                target_floor: target,
                direction: Direction::between(source, target),
            });
        }
    }

    tracing::debug!(
        target: "floorpath.markers",
        runs = runs.len(),
        markers = markers.len(),
        suppressed = suppressed,
        "transition markers planned"
    );
    markers
}

/// Markers that sit on `floor`.
pub fn markers_on(
    markers: &[TransitionMarker],
    floor: FloorIndex,
) -> impl Iterator<Item = &TransitionMarker> {
    markers.iter().filter(move |m| m.source_floor == floor)
}
