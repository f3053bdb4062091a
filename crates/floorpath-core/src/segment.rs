#![forbid(unsafe_code)]

//! Route segmentation: flat step list to ordered, floor-homogeneous runs.
//!
//! # Algorithm
//!
//! A single pass keeps the floor of the run being built and a point buffer:
//!
//! - A single-line step on the buffer's floor is appended without its first
//!   point (steps are contiguous, so it repeats the buffer's last point).
//!   While the buffer is still empty the full point list goes in.
//! - A single-line step on another floor flushes the buffer and starts a new
//!   one with the step's full point list.
//! - A multi-line step flushes the buffer and emits every sub-line as its own
//!   [`RunKind::Disjoint`] run. Nothing merges into or out of those.
//! - An unmatched step flushes the buffer and contributes no points.
//!
//! # Invariants
//!
//! 1. Every run has at least two points.
//! 2. Run ids are `0..runs.len()` in route order.
//! 3. Two same-floor runs are only adjacent when a disjoint run or an
//!    unmatched step separated them.
//! 4. When every step resolves to a floor and every step is a single line,
//!    concatenating the runs (dropping each run's first point where it repeats
//!    the previous run's last point) reproduces the combined step geometry.

use std::fmt;

use crate::floor::{FloorIndex, FloorRegistry};
use crate::geometry::LatLng;
use crate::step::{RouteStep, StepGeometry};

/// Identity of a run within one route computation; equals its route order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub usize);

impl fmt::Debug for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a run was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// Merged from one or more adjacent single-line steps.
    Contiguous,
    /// One sub-line of a multi-line step, emitted as-is.
    Disjoint,
}

/// A floor-homogeneous portion of the route.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub id: RunId,
    pub floor: FloorIndex,
    pub kind: RunKind,
    pub points: Vec<LatLng>,
}

impl Run {
    /// Position of the run in the route.
    #[inline]
    #[must_use]
    pub fn order(&self) -> usize {
        self.id.0
    }

    #[must_use]
    pub fn first_point(&self) -> Option<LatLng> {
        self.points.first().copied()
    }

    #[must_use]
    pub fn last_point(&self) -> Option<LatLng> {
        self.points.last().copied()
    }

    #[must_use]
    pub fn is_disjoint(&self) -> bool {
        self.kind == RunKind::Disjoint
    }
}

/// Segment `steps` into runs using `registry` for floor assignment.
#[must_use]
pub fn segment(steps: &[RouteStep], registry: &FloorRegistry) -> Vec<Run> {
    let _span = tracing::debug_span!(
        target: "floorpath.segment",
        "segment",
        steps = steps.len(),
        floors = registry.len()
    )
    .entered();

    let mut segmenter = Segmenter::default();
    for step in steps {
        match registry.assign(&step.label) {
            Some(floor) => segmenter.push_step(floor, &step.geometry),
            None => {
                tracing::debug!(
                    target: "floorpath.segment",
                    position = step.position,
                    label = %step.label,
                    points = step.geometry.point_count(),
                    "step label matches no floor; dropping its points"
                );
                segmenter.flush();
            }
        }
    }
    let runs = segmenter.finish();

    tracing::debug!(
        target: "floorpath.segment",
        runs = runs.len(),
        disjoint = runs.iter().filter(|r| r.is_disjoint()).count(),
        "route segmented"
    );
    runs
}

#[derive(Default)]
struct Segmenter {
    current: Option<FloorIndex>,
    buffer: Vec<LatLng>,
    runs: Vec<Run>,
}

impl Segmenter {
    fn push_step(&mut self, floor: FloorIndex, geometry: &StepGeometry) {
        match geometry {
            StepGeometry::Line(points) => {
                if self.current == Some(floor) {
                    let skip = usize::from(!self.buffer.is_empty());
                    self.buffer.extend(points.iter().skip(skip).copied());
                } else {
                    self.flush();
                    self.current = Some(floor);
                    self.buffer.extend_from_slice(points);
                }
            }
            StepGeometry::Multi(lines) => {
                self.flush();
                for line in lines {
                    self.emit(floor, RunKind::Disjoint, line.clone());
                }
            }
        }
    }

    /// Close the buffered run (if any) and forget the current floor.
    fn flush(&mut self) {
        let points = std::mem::take(&mut self.buffer);
        if let Some(floor) = self.current.take() {
            self.emit(floor, RunKind::Contiguous, points);
        }
    }

    fn emit(&mut self, floor: FloorIndex, kind: RunKind, points: Vec<LatLng>) {
        if points.len() < 2 {
            tracing::trace!(
                target: "floorpath.segment",
                floor = %floor,
                kind = ?kind,
                points = points.len(),
                "discarding degenerate run"
            );
            return;
        }
        let id = RunId(self.runs.len());
        self.runs.push(Run {
            id,
            floor,
            kind,
            points,
        });
    }

    fn finish(mut self) -> Vec<Run> {
        self.flush();
        self.runs
    }
}

/// Runs belonging to `floor`, in route order.
pub fn runs_on(runs: &[Run], floor: FloorIndex) -> impl Iterator<Item = &Run> {
    runs.iter().filter(move |r| r.floor == floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::FloorSpec;

    fn reg() -> FloorRegistry {
        FloorRegistry::new(vec![FloorSpec::new(0, "0"), FloorSpec::new(1, "1")]).unwrap()
    }

    fn pts(raw: &[(f64, f64)]) -> Vec<LatLng> {
        raw.iter().map(|&(a, b)| LatLng::new(a, b)).collect()
    }

    #[test]
    fn stairs_step_merges_into_its_floor() {
        let steps = vec![
            RouteStep::line(0, "Corridor 0", pts(&[(0.0, 0.0), (0.0, 1.0)])),
            RouteStep::line(1, "Stairs 0-1", pts(&[(0.0, 1.0), (0.0, 2.0)])),
            RouteStep::line(2, "Hall 1", pts(&[(0.0, 2.0), (1.0, 2.0)])),
        ];
        let runs = segment(&steps, &reg());
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].floor, FloorIndex(0));
        assert_eq!(runs[0].points, pts(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]));
        assert_eq!(runs[1].floor, FloorIndex(1));
        assert_eq!(runs[1].points, pts(&[(0.0, 2.0), (1.0, 2.0)]));
        assert_eq!(runs[1].id, RunId(1));
        assert!(runs.iter().all(|r| r.kind == RunKind::Contiguous));
    }

    #[test]
    fn unmatched_step_splits_same_floor_runs() {
        let steps = vec![
            RouteStep::line(0, "Corridor 0", pts(&[(0.0, 0.0), (0.0, 1.0)])),
            RouteStep::line(1, "Courtyard", pts(&[(0.0, 1.0), (0.0, 2.0)])),
            RouteStep::line(2, "Lobby 0", pts(&[(0.0, 2.0), (0.0, 3.0)])),
        ];
        let runs = segment(&steps, &reg());
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.floor == FloorIndex(0)));
        assert_eq!(runs[0].points, pts(&[(0.0, 0.0), (0.0, 1.0)]));
        assert_eq!(runs[1].points, pts(&[(0.0, 2.0), (0.0, 3.0)]));
    }

    #[test]
    fn multi_line_step_emits_disjoint_runs() {
        let steps = vec![
            RouteStep::line(0, "Corridor 0", pts(&[(0.0, 0.0), (0.0, 1.0)])),
            RouteStep::multi(
                1,
                "Atrium 0",
                vec![
                    pts(&[(0.0, 1.0), (0.5, 1.0)]),
                    pts(&[(0.7, 1.0)]),
                    pts(&[(0.8, 1.0), (1.0, 1.0)]),
                ],
            ),
            RouteStep::line(2, "Lobby 0", pts(&[(1.0, 1.0), (1.0, 2.0)])),
        ];
        let runs = segment(&steps, &reg());
        let kinds: Vec<_> = runs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RunKind::Contiguous,
                RunKind::Disjoint,
                RunKind::Disjoint,
                RunKind::Contiguous
            ]
        );
        // The step after a disjoint block starts fresh with its full point list.
        assert_eq!(runs[3].points, pts(&[(1.0, 1.0), (1.0, 2.0)]));
        let ids: Vec<_> = runs.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn floor_separated_runs_never_merge() {
        let steps = vec![
            RouteStep::line(0, "A 0", pts(&[(0.0, 0.0), (0.0, 1.0)])),
            RouteStep::line(1, "B 1", pts(&[(0.0, 1.0), (0.0, 2.0)])),
            RouteStep::line(2, "C 0", pts(&[(0.0, 2.0), (0.0, 3.0)])),
        ];
        let runs = segment(&steps, &reg());
        let floors: Vec<_> = runs.iter().map(|r| r.floor.0).collect();
        assert_eq!(floors, vec![0, 1, 0]);
        assert_eq!(runs_on(&runs, FloorIndex(0)).count(), 2);
    }

    #[test]
    fn degenerate_and_empty_inputs_yield_no_runs() {
        assert!(segment(&[], &reg()).is_empty());
        let steps = vec![
            RouteStep::line(0, "Corridor 0", pts(&[(0.0, 0.0)])),
            RouteStep::line(1, "Nowhere", pts(&[(0.0, 0.0), (0.0, 1.0)])),
            RouteStep::line(2, "Hall 1", vec![]),
        ];
        assert!(segment(&steps, &reg()).is_empty());
    }

    #[test]
    fn single_point_steps_extend_a_run() {
        let steps = vec![
            RouteStep::line(0, "Corridor 0", pts(&[(0.0, 0.0)])),
            RouteStep::line(1, "Corridor 0", pts(&[(0.0, 0.0), (0.0, 1.0)])),
        ];
        let runs = segment(&steps, &reg());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].points, pts(&[(0.0, 0.0), (0.0, 1.0)]));
    }

    #[test]
    fn empty_step_does_not_swallow_next_first_point() {
        let steps = vec![
            RouteStep::line(0, "Hall 1", vec![]),
            RouteStep::line(1, "Hall 1", pts(&[(0.0, 0.0), (0.0, 1.0)])),
            RouteStep::line(2, "Hall 1", pts(&[(0.0, 1.0), (0.0, 2.0)])),
        ];
        let runs = segment(&steps, &reg());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].points, pts(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]));
    }
}
