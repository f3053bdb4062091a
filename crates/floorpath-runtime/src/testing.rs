//! In-memory presentation surface for tests.
//!
//! [`RecordingSurface`] keeps the current drawn state (paths, markers, pins)
//! plus an ordered log of every call, so tests can assert both what is on
//! screen and the order in which it got there.

use std::collections::BTreeMap;

use floorpath_core::{
    FloorIndex, LatLng, MarkerId, PathStyle, PinKind, RunId, TransitionMarker,
};

use crate::surface::PresentationSurface;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    BeginPath(RunId),
    ExtendPath(RunId, usize),
    RemovePath(RunId),
    AddMarker(MarkerId),
    RemoveMarker(MarkerId),
    ShowPin(PinKind),
    HidePin(PinKind),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    paths: BTreeMap<RunId, Vec<LatLng>>,
    styles: BTreeMap<RunId, PathStyle>,
    markers: BTreeMap<MarkerId, TransitionMarker>,
    pins: Vec<(PinKind, LatLng)>,
    ops: Vec<SurfaceOp>,
    floor: Option<FloorIndex>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that reports `floor` as its displayed floor.
    #[must_use]
    pub fn showing(floor: FloorIndex) -> Self {
        Self {
            floor: Some(floor),
            ..Self::default()
        }
    }

    pub fn set_floor(&mut self, floor: Option<FloorIndex>) {
        self.floor = floor;
    }

    #[must_use]
    pub fn path(&self, run: RunId) -> Option<&[LatLng]> {
        self.paths.get(&run).map(Vec::as_slice)
    }

    #[must_use]
    pub fn style(&self, run: RunId) -> Option<&PathStyle> {
        self.styles.get(&run)
    }

    #[must_use]
    pub fn paths(&self) -> &BTreeMap<RunId, Vec<LatLng>> {
        &self.paths
    }

    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn markers(&self) -> impl Iterator<Item = &TransitionMarker> {
        self.markers.values()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn pin(&self, kind: PinKind) -> Option<LatLng> {
        self.pins.iter().find(|(k, _)| *k == kind).map(|&(_, p)| p)
    }

    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Whether nothing at all is drawn.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.paths.is_empty() && self.markers.is_empty() && self.pins.is_empty()
    }
}

impl PresentationSurface for RecordingSurface {
    fn begin_path(&mut self, run: RunId, style: &PathStyle, first: LatLng) {
        self.paths.insert(run, vec![first]);
        self.styles.insert(run, *style);
        self.ops.push(SurfaceOp::BeginPath(run));
    }

    fn extend_path(&mut self, run: RunId, points: &[LatLng]) {
        if let Some(path) = self.paths.get_mut(&run) {
            path.extend_from_slice(points);
        }
        self.ops.push(SurfaceOp::ExtendPath(run, points.len()));
    }

    fn remove_path(&mut self, run: RunId) {
        self.paths.remove(&run);
        self.styles.remove(&run);
        self.ops.push(SurfaceOp::RemovePath(run));
    }

    fn add_marker(&mut self, id: MarkerId, marker: &TransitionMarker) {
        self.markers.insert(id, *marker);
        self.ops.push(SurfaceOp::AddMarker(id));
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
        self.ops.push(SurfaceOp::RemoveMarker(id));
    }

    fn show_pin(&mut self, kind: PinKind, position: LatLng) {
        self.pins.retain(|(k, _)| *k != kind);
        self.pins.push((kind, position));
        self.ops.push(SurfaceOp::ShowPin(kind));
    }

    fn hide_pin(&mut self, kind: PinKind) {
        self.pins.retain(|(k, _)| *k != kind);
        self.ops.push(SurfaceOp::HidePin(kind));
    }

    fn active_floor(&self) -> Option<FloorIndex> {
        self.floor
    }
}
