//! The presentation-surface seam.
//!
//! A surface is the map widget the engine draws on. The engine only issues
//! imperative calls; it never reads drawn state back. Paths are keyed by
//! [`RunId`], markers by [`MarkerId`], pins by [`PinKind`].

use floorpath_core::{FloorIndex, LatLng, MarkerId, PathStyle, PinKind, RunId, TransitionMarker};

pub trait PresentationSurface {
    /// Create a polyline for `run` holding only `first`.
    fn begin_path(&mut self, run: RunId, style: &PathStyle, first: LatLng);

    /// Append points to the polyline of `run`.
    fn extend_path(&mut self, run: RunId, points: &[LatLng]);

    /// Remove the polyline of `run`. Removing an absent path is a no-op.
    fn remove_path(&mut self, run: RunId);

    /// Place a clickable transition marker.
    fn add_marker(&mut self, id: MarkerId, marker: &TransitionMarker);

    fn remove_marker(&mut self, id: MarkerId);

    /// Show the start or end pin.
    fn show_pin(&mut self, kind: PinKind, position: LatLng);

    fn hide_pin(&mut self, kind: PinKind);

    /// Floor the widget currently displays, if it tracks one itself.
    fn active_floor(&self) -> Option<FloorIndex> {
        None
    }
}

impl<S: PresentationSurface + ?Sized> PresentationSurface for &mut S {
    fn begin_path(&mut self, run: RunId, style: &PathStyle, first: LatLng) {
        (**self).begin_path(run, style, first);
    }

    fn extend_path(&mut self, run: RunId, points: &[LatLng]) {
        (**self).extend_path(run, points);
    }

    fn remove_path(&mut self, run: RunId) {
        (**self).remove_path(run);
    }

    fn add_marker(&mut self, id: MarkerId, marker: &TransitionMarker) {
        (**self).add_marker(id, marker);
    }

    fn remove_marker(&mut self, id: MarkerId) {
        (**self).remove_marker(id);
    }

    fn show_pin(&mut self, kind: PinKind, position: LatLng) {
        (**self).show_pin(kind, position);
    }

    fn hide_pin(&mut self, kind: PinKind) {
        (**self).hide_pin(kind);
    }

    fn active_floor(&self) -> Option<FloorIndex> {
        (**self).active_floor()
    }
}
