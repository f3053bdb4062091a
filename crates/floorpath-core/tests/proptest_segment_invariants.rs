//! Property-based invariant tests for segmentation and marker planning.
//!
//! ## Invariants
//!
//! 1. Coverage: with every step matched and single-line, the runs reproduce
//!    the combined step geometry exactly once.
//! 2. Homogeneity: every point of a run comes from a step on the run's floor.
//! 3. No silent merge: contiguous runs correspond one-to-one with maximal
//!    groups of adjacent same-floor steps.
//! 4. Runs have at least two points and sequential ids.
//! 5. Markers sit on interior run boundaries, never on the route endpoints,
//!    and their direction agrees with their floors.
//! 6. Mixed geometry (empty, single-point and multi-line steps): contiguous
//!    runs hold every buffered point exactly once, and each multi-line
//!    sub-line with two or more points comes back as its own disjoint run.

use std::collections::{HashMap, HashSet};

use floorpath_core::marker::DEFAULT_MARKER_EPSILON;
use floorpath_core::{
    Direction, FloorIndex, FloorRegistry, FloorSpec, LatLng, RouteStep, RunKind, StepGeometry,
    plan, segment,
};
use proptest::prelude::*;

// ── Fixtures ──────────────────────────────────────────────────────────────

fn registry() -> FloorRegistry {
    FloorRegistry::new(vec![
        FloorSpec::new(-1, "L-1"),
        FloorSpec::new(0, "L0"),
        FloorSpec::new(1, "L1"),
    ])
    .unwrap()
}

fn label_for(floor: Option<i32>) -> String {
    match floor {
        Some(f) => format!("Corridor L{f}"),
        None => "Courtyard".to_string(),
    }
}

/// Contiguous single-line steps; point `k` is `(k, 0)` so each vertex is unique
/// apart from the junction shared by consecutive steps.
fn build_steps(layout: &[(Option<i32>, usize)]) -> Vec<RouteStep> {
    let mut cursor = 0i64;
    layout.iter()
        .enumerate()
        .map(|(position, &(floor, extra))| {
            let points: Vec<LatLng> = (0..=extra as i64)
                .map(|k| LatLng::new((cursor + k) as f64, 0.0))
                .collect();
            cursor += extra as i64;
            RouteStep::line(position, label_for(floor), points)
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Shape {
    /// Single line with this many points, zero included.
    Line(usize),
    /// Multi-line step; one entry per sub-line point count.
    Multi(Vec<usize>),
}

/// Line steps chain along `lng = 0`, sharing the junction with the previous
/// line step; multi-line sub-lines sit on their own `lng` row.
fn build_mixed_steps(layout: &[(Option<i32>, Shape)]) -> Vec<RouteStep> {
    let mut cursor = 0i64;
    layout
        .iter()
        .enumerate()
        .map(|(position, (floor, shape))| match shape {
            Shape::Line(n) => {
                let n = *n as i64;
                let points: Vec<LatLng> = (0..n)
                    .map(|k| LatLng::new((cursor + k) as f64, 0.0))
                    .collect();
                cursor += (n - 1).max(0);
                RouteStep::line(position, label_for(*floor), points)
            }
            Shape::Multi(counts) => {
                let row = (position + 1) as f64;
                let mut next = 0i64;
                let lines = counts
                    .iter()
                    .map(|&n| {
                        let line: Vec<LatLng> = (0..n as i64)
                            .map(|k| LatLng::new((next + k) as f64, row))
                            .collect();
                        next += n as i64;
                        line
                    })
                    .collect();
                RouteStep::multi(position, label_for(*floor), lines)
            }
        })
        .collect()
}

type ExpectedRun = (i32, RunKind, Vec<LatLng>);

fn close_group(group: &mut Option<(i32, Vec<LatLng>)>, out: &mut Vec<ExpectedRun>) {
    match group.take() {
        Some((floor, points)) if points.len() >= 2 => {
            out.push((floor, RunKind::Contiguous, points));
        }
        _ => {}
    }
}

/// Reference grouping: adjacent same-floor line steps chain (repeated
/// junctions dropped once the group holds a point), anything else closes
/// the group, multi-line sub-lines stand alone.
fn expected_runs(steps: &[RouteStep], layout: &[(Option<i32>, Shape)]) -> Vec<ExpectedRun> {
    let mut out = Vec::new();
    let mut group: Option<(i32, Vec<LatLng>)> = None;
    for (step, (floor, _)) in steps.iter().zip(layout) {
        let Some(floor) = *floor else {
            close_group(&mut group, &mut out);
            continue;
        };
        match &step.geometry {
            StepGeometry::Line(points) => {
                let same_floor = matches!(&group, Some((current, _)) if *current == floor);
                if same_floor {
                    if let Some((_, acc)) = group.as_mut() {
                        let skip = usize::from(!acc.is_empty());
                        acc.extend(points.iter().skip(skip).copied());
                    }
                } else {
                    close_group(&mut group, &mut out);
                    group = Some((floor, points.clone()));
                }
            }
            StepGeometry::Multi(lines) => {
                close_group(&mut group, &mut out);
                out.extend(
                    lines
                        .iter()
                        .filter(|line| line.len() >= 2)
                        .map(|line| (floor, RunKind::Disjoint, line.clone())),
                );
            }
        }
    }
    close_group(&mut group, &mut out);
    out
}

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_floor() -> impl Strategy<Value = i32> {
    prop_oneof![Just(-1), Just(0), Just(1)]
}

fn arb_matched_layout(max_n: usize) -> impl Strategy<Value = Vec<(Option<i32>, usize)>> {
    prop::collection::vec((arb_floor().prop_map(Some), 1usize..4), 1..max_n)
}

fn arb_layout(max_n: usize) -> impl Strategy<Value = Vec<(Option<i32>, usize)>> {
    prop::collection::vec((prop::option::weighted(0.8, arb_floor()), 1usize..4), 1..max_n)
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        6 => (0usize..5).prop_map(Shape::Line),
        1 => prop::collection::vec(0usize..4, 1..4).prop_map(Shape::Multi),
    ]
}

fn arb_mixed_layout(
    max_n: usize,
    matched: f64,
) -> impl Strategy<Value = Vec<(Option<i32>, Shape)>> {
    prop::collection::vec(
        (prop::option::weighted(matched, arb_floor()), arb_shape()),
        1..max_n,
    )
}

// ── 1. Coverage ───────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn runs_cover_the_route_exactly_once(layout in arb_matched_layout(24)) {
        let steps = build_steps(&layout);
        let runs = segment(&steps, &registry());

        let mut expected: Vec<LatLng> = Vec::new();
        for step in &steps {
            let floorpath_core::StepGeometry::Line(points) = &step.geometry else { unreachable!() };
            let skip = usize::from(!expected.is_empty());
            expected.extend(points.iter().skip(skip).copied());
        }

        let mut actual: Vec<LatLng> = Vec::new();
        for run in &runs {
            let skip = usize::from(actual.last() == run.points.first());
            actual.extend(run.points.iter().skip(skip).copied());
        }
        prop_assert_eq!(actual, expected);
    }
}

// ── 2. Homogeneity ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn every_run_point_belongs_to_the_run_floor(layout in arb_layout(24)) {
        let steps = build_steps(&layout);
        let runs = segment(&steps, &registry());

        let mut floors_at: HashMap<i64, HashSet<Option<i32>>> = HashMap::new();
        for (step, &(floor, _)) in steps.iter().zip(&layout) {
            let floorpath_core::StepGeometry::Line(points) = &step.geometry else { unreachable!() };
            for p in points {
                floors_at.entry(p.lat as i64).or_default().insert(floor);
            }
        }

        for run in &runs {
            for p in &run.points {
                let owners = &floors_at[&(p.lat as i64)];
                prop_assert!(
                    owners.contains(&Some(run.floor.0)),
                    "point {:?} of run on floor {} has owners {:?}", p, run.floor, owners
                );
            }
        }
    }
}

// ── 3. No silent merge across gaps ────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn runs_match_adjacent_same_floor_groups(layout in arb_layout(24)) {
        let steps = build_steps(&layout);
        let runs = segment(&steps, &registry());

        let mut groups = Vec::new();
        let mut prev: Option<i32> = None;
        for &(floor, _) in &layout {
            match floor {
                Some(f) if prev != Some(f) => groups.push(f),
                _ => {}
            }
            prev = floor;
        }

        let run_floors: Vec<i32> = runs.iter().map(|r| r.floor.0).collect();
        prop_assert_eq!(run_floors, groups);
        prop_assert!(runs.iter().all(|r| r.kind == RunKind::Contiguous));
    }
}

// ── 4. Shape of runs ──────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn runs_are_non_degenerate_and_ordered(layout in arb_layout(24)) {
        let runs = segment(&build_steps(&layout), &registry());
        for (i, run) in runs.iter().enumerate() {
            prop_assert!(run.points.len() >= 2);
            prop_assert_eq!(run.order(), i);
        }
    }
}

// ── 5. Markers ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn markers_sit_on_interior_boundaries(layout in arb_layout(24)) {
        let runs = segment(&build_steps(&layout), &registry());
        let markers = plan(&runs, None, DEFAULT_MARKER_EPSILON);

        let changes = runs.windows(2).filter(|w| w[0].floor != w[1].floor).count();
        prop_assert_eq!(markers.len(), changes * 2);

        let route_start = runs.first().and_then(|r| r.first_point());
        let route_end = runs.last().and_then(|r| r.last_point());
        for (i, marker) in markers.iter().enumerate() {
            prop_assert_eq!(marker.id.0, i);
            prop_assert!(Some(marker.position) != route_start);
            prop_assert!(Some(marker.position) != route_end);
            prop_assert_ne!(marker.source_floor, marker.target_floor);
            let expected = if marker.target_floor > marker.source_floor {
                Direction::Up
            } else {
                Direction::Down
            };
            prop_assert_eq!(marker.direction, expected);
            prop_assert!(runs.iter().any(|r| r.floor == marker.source_floor
                && (r.first_point() == Some(marker.position)
                    || r.last_point() == Some(marker.position))));
        }
    }
}

// ── 6. Mixed geometry ─────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn matched_mixed_steps_cover_every_buffered_point(layout in arb_mixed_layout(20, 1.0)) {
        let steps = build_mixed_steps(&layout);
        let runs = segment(&steps, &registry());

        let actual: Vec<ExpectedRun> = runs
            .iter()
            .map(|r| (r.floor.0, r.kind, r.points.clone()))
            .collect();
        prop_assert_eq!(actual, expected_runs(&steps, &layout));

        // A chain of matched line steps loses no vertex to a preceding
        // empty or single-point step.
        for run in runs.iter().filter(|r| r.kind == RunKind::Contiguous) {
            for pair in run.points.windows(2) {
                prop_assert_eq!(pair[1].lat - pair[0].lat, 1.0);
            }
        }
    }

    #[test]
    fn mixed_steps_with_gaps_follow_step_groups(layout in arb_mixed_layout(20, 0.8)) {
        let steps = build_mixed_steps(&layout);
        let runs = segment(&steps, &registry());

        let actual: Vec<ExpectedRun> = runs
            .iter()
            .map(|r| (r.floor.0, r.kind, r.points.clone()))
            .collect();
        prop_assert_eq!(actual, expected_runs(&steps, &layout));
        for (i, run) in runs.iter().enumerate() {
            prop_assert!(run.points.len() >= 2);
            prop_assert_eq!(run.order(), i);
        }
    }

    #[test]
    fn each_multi_line_sub_line_is_its_own_disjoint_run(layout in arb_mixed_layout(20, 0.8)) {
        let steps = build_mixed_steps(&layout);
        let runs = segment(&steps, &registry());

        let mut expected = Vec::new();
        for (step, (floor, _)) in steps.iter().zip(&layout) {
            if let (Some(floor), StepGeometry::Multi(lines)) = (floor, &step.geometry) {
                for line in lines.iter().filter(|line| line.len() >= 2) {
                    expected.push((*floor, line.clone()));
                }
            }
        }
        let disjoint: Vec<(i32, Vec<LatLng>)> = runs
            .iter()
            .filter(|r| r.is_disjoint())
            .map(|r| (r.floor.0, r.points.clone()))
            .collect();
        prop_assert_eq!(disjoint, expected);
    }
}

#[test]
fn empty_step_keeps_the_next_step_whole() {
    let layout = vec![
        (Some(1), Shape::Line(0)),
        (Some(1), Shape::Line(2)),
        (Some(1), Shape::Line(2)),
    ];
    let runs = segment(&build_mixed_steps(&layout), &registry());
    assert_eq!(runs.len(), 1);
    assert_eq!(
        runs[0].points,
        vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0), LatLng::new(2.0, 0.0)]
    );
}

#[test]
fn example_route_yields_one_upward_pair() {
    let reg = FloorRegistry::new(vec![FloorSpec::new(0, "0"), FloorSpec::new(1, "1")]).unwrap();
    let a = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)];
    let b = vec![LatLng::new(0.0, 1.0), LatLng::new(0.0, 2.0)];
    let c = vec![LatLng::new(0.0, 2.0), LatLng::new(1.0, 2.0)];
    let steps = vec![
        RouteStep::line(0, "Corridor 0", a),
        RouteStep::line(1, "Stairs 0-1", b),
        RouteStep::line(2, "Hall 1", c.clone()),
    ];
    let runs = segment(&steps, &reg);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].floor, FloorIndex(0));
    assert_eq!(runs[0].points.len(), 3);
    assert_eq!(runs[1].points, c);

    let markers = plan(&runs, None, DEFAULT_MARKER_EPSILON);
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].direction, Direction::Up);
    assert_eq!(markers[0].position, LatLng::new(0.0, 2.0));
    assert_eq!(markers[1].position, LatLng::new(0.0, 2.0));
}
