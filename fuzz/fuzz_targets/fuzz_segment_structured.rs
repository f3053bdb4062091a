#![no_main]

use arbitrary::Arbitrary;
use floorpath_core::marker::DEFAULT_MARKER_EPSILON;
use floorpath_core::{FloorRegistry, FloorSpec, LatLng, RouteStep, plan, segment};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzStep {
    /// 0..=3 picks a floor label, anything else is unmatched.
    floor: u8,
    lines: Vec<Vec<(i16, i16)>>,
}

fuzz_target!(|input: Vec<FuzzStep>| {
    let Ok(registry) = FloorRegistry::new(vec![
        FloorSpec::new(-1, "L-1"),
        FloorSpec::new(0, "L0"),
        FloorSpec::new(1, "L1"),
        FloorSpec::new(2, "L2"),
    ]) else {
        return;
    };

    let steps: Vec<RouteStep> = input
        .into_iter()
        .take(64)
        .enumerate()
        .map(|(position, step)| {
            let label = match step.floor {
                0 => "Hall L-1".to_string(),
                f @ 1..=3 => format!("Hall L{}", i32::from(f) - 1),
                _ => "Courtyard".to_string(),
            };
            let mut lines: Vec<Vec<LatLng>> = step
                .lines
                .into_iter()
                .take(4)
                .map(|line| {
                    line.into_iter()
                        .take(16)
                        .map(|(a, b)| LatLng::new(f64::from(a) / 100.0, f64::from(b) / 100.0))
                        .collect()
                })
                .collect();
            if lines.len() == 1 {
                RouteStep::line(position, label, lines.remove(0))
            } else {
                RouteStep::multi(position, label, lines)
            }
        })
        .collect();

    let runs = segment(&steps, &registry);
    for (k, run) in runs.iter().enumerate() {
        assert_eq!(run.id.0, k, "run ids not sequential");
        assert!(run.points.len() >= 2, "degenerate run survived");
        assert!(registry.contains(run.floor), "run on unregistered floor");
    }

    let markers = plan(&runs, None, DEFAULT_MARKER_EPSILON);
    for marker in &markers {
        assert_ne!(marker.source_floor, marker.target_floor);
    }
});
