#![forbid(unsafe_code)]

//! Keeps the presentation surface in step with the active floor.
//!
//! The coordinator owns the current route (runs, markers, endpoints), the
//! active floor and the set of artifacts it has drawn. It is the only caller
//! that adds to or removes from the surface.
//!
//! Every event is a full redraw of the active floor:
//!
//! 1. cancel every animation and reap it at once, so partial paths are gone
//!    before anything new is drawn;
//! 2. remove every drawn marker and pin;
//! 3. play the active floor's runs from scratch and show its markers and the
//!    pins that belong to it.
//!
//! Runs of other floors stay in memory until the next route computation.

use std::time::Duration;

use floorpath_core::config::RouteStyleConfig;
use floorpath_core::{
    Bounds, Error, FloorIndex, FloorRegistry, MarkerId, PathStyle, PinKind, Result,
    RouteEndpoints, RouteStep, Run, TransitionMarker, ViewerConfig, markers_on, plan, runs_on,
    segment,
};

use crate::routing::{RoutingSource, fetch_steps};
use crate::scheduler::{AnimationScheduler, RevealSettings, TickReport};
use crate::surface::PresentationSurface;

/// Outcome of one route computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Increments with every successful computation.
    pub generation: u64,
    pub runs: usize,
    pub markers: usize,
    /// Floors the route visits, in first-visit order.
    pub floors: Vec<FloorIndex>,
    /// Floor that was drawn, if one could be resolved.
    pub active_floor: Option<FloorIndex>,
    pub bounds: Option<Bounds>,
}

#[derive(Debug)]
struct CurrentRoute {
    runs: Vec<Run>,
    markers: Vec<TransitionMarker>,
    endpoints: Option<RouteEndpoints>,
}

#[derive(Debug)]
pub struct DisplayCoordinator {
    registry: FloorRegistry,
    route_style: RouteStyleConfig,
    marker_epsilon: f64,
    scheduler: AnimationScheduler,
    route: Option<CurrentRoute>,
    active_floor: Option<FloorIndex>,
    drawn_markers: Vec<MarkerId>,
    drawn_pins: Vec<PinKind>,
    generation: u64,
}

impl DisplayCoordinator {
    #[must_use]
    pub fn new(
        registry: FloorRegistry,
        settings: RevealSettings,
        route_style: RouteStyleConfig,
        marker_epsilon: f64,
    ) -> Self {
        Self {
            registry,
            route_style,
            marker_epsilon,
            scheduler: AnimationScheduler::new(settings),
            route: None,
            active_floor: None,
            drawn_markers: Vec::new(),
            drawn_pins: Vec::new(),
            generation: 0,
        }
    }

    /// Build a coordinator from a validated config.
    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.registry()?,
            RevealSettings::from(&config.animation),
            config.route_style.clone(),
            config.markers.epsilon,
        ))
    }

    /// Replace the displayed route with one built from `steps`.
    ///
    /// Whatever was drawn is removed first. When the steps produce no run the
    /// surface is left blank and [`Error::NoPath`] is returned.
    pub fn on_route_computed<S: PresentationSurface>(
        &mut self,
        steps: &[RouteStep],
        endpoints: Option<RouteEndpoints>,
        surface: &mut S,
    ) -> Result<RouteSummary> {
        let _span = tracing::debug_span!(
            target: "floorpath.display",
            "route_computed",
            steps = steps.len()
        )
        .entered();

        self.clear_drawn(surface);
        self.route = None;

        let runs = segment(steps, &self.registry);
        if runs.is_empty() {
            tracing::warn!(
                target: "floorpath.display",
                steps = steps.len(),
                "route produced no drawable run"
            );
            return Err(Error::NoPath);
        }
        let markers = plan(&runs, endpoints.as_ref(), self.marker_epsilon);

        let active = self
            .active_floor
            .or_else(|| surface.active_floor())
            .or_else(|| endpoints.map(|e| e.start.floor))
            .or_else(|| runs.first().map(|r| r.floor));
        self.active_floor = active;
        self.generation += 1;
        self.route = Some(CurrentRoute {
            runs,
            markers,
            endpoints,
        });

        if let Some(floor) = active {
            self.draw_floor(floor, surface);
        }

        let summary = RouteSummary {
            generation: self.generation,
            runs: self.runs().len(),
            markers: self.markers().len(),
            floors: self.floors(),
            active_floor: active,
            bounds: self.bounds(),
        };
        tracing::info!(
            target: "floorpath.display",
            generation = summary.generation,
            runs = summary.runs,
            markers = summary.markers,
            floors = summary.floors.len(),
            active_floor = ?summary.active_floor,
            "route displayed"
        );
        Ok(summary)
    }

    /// Ask `source` for a route between the endpoints and display it.
    ///
    /// A failing source yields [`Error::RoutingUnavailable`] and leaves the
    /// current display untouched.
    pub fn request_route<R, S>(
        &mut self,
        source: &mut R,
        endpoints: RouteEndpoints,
        surface: &mut S,
    ) -> Result<RouteSummary>
    where
        R: RoutingSource + ?Sized,
        S: PresentationSurface,
    {
        let steps = fetch_steps(source, endpoints.start.position, endpoints.end.position)?;
        self.on_route_computed(&steps, Some(endpoints), surface)
    }

    /// Switch the display to `floor`: clear everything, then draw that floor.
    ///
    /// Switching to the floor already shown restarts its animations.
    pub fn on_active_floor_changed<S: PresentationSurface>(
        &mut self,
        floor: FloorIndex,
        surface: &mut S,
    ) -> Result<()> {
        if !self.registry.contains(floor) {
            return Err(Error::UnknownFloor { index: floor });
        }
        let previous = self.active_floor.replace(floor);
        self.clear_drawn(surface);
        if self.route.is_some() {
            self.draw_floor(floor, surface);
        }
        tracing::debug!(
            target: "floorpath.display",
            from = ?previous,
            to = %floor,
            "active floor changed"
        );
        Ok(())
    }

    /// Follow a clicked transition marker to its target floor.
    ///
    /// Clicks on markers that are not currently drawn (a stale id from an
    /// earlier route or another floor) are ignored and return `None`.
    pub fn on_marker_clicked<S: PresentationSurface>(
        &mut self,
        id: MarkerId,
        surface: &mut S,
    ) -> Result<Option<FloorIndex>> {
        if !self.drawn_markers.contains(&id) {
            tracing::debug!(target: "floorpath.display", marker = ?id, "stale marker click ignored");
            return Ok(None);
        }
        let Some(target) = self
            .markers()
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.target_floor)
        else {
            return Ok(None);
        };
        self.on_active_floor_changed(target, surface)?;
        Ok(Some(target))
    }

    /// Advance every live animation by one frame.
    pub fn tick<S: PresentationSurface>(&mut self, dt: Duration, surface: &mut S) -> TickReport {
        self.scheduler.tick(dt, surface)
    }

    /// Remove every drawn artifact and forget the route.
    pub fn clear_route<S: PresentationSurface>(&mut self, surface: &mut S) {
        self.clear_drawn(surface);
        if self.route.take().is_some() {
            tracing::debug!(target: "floorpath.display", "route cleared");
        }
    }

    #[must_use]
    pub fn registry(&self) -> &FloorRegistry {
        &self.registry
    }

    #[must_use]
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn active_floor(&self) -> Option<FloorIndex> {
        self.active_floor
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn has_route(&self) -> bool {
        self.route.is_some()
    }

    /// Every run of the current route, all floors, in route order.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        self.route.as_ref().map(|r| r.runs.as_slice()).unwrap_or_default()
    }

    /// Every planned marker of the current route, all floors.
    #[must_use]
    pub fn markers(&self) -> &[TransitionMarker] {
        self.route.as_ref().map(|r| r.markers.as_slice()).unwrap_or_default()
    }

    #[must_use]
    pub fn endpoints(&self) -> Option<&RouteEndpoints> {
        self.route.as_ref().and_then(|r| r.endpoints.as_ref())
    }

    /// Markers currently on the surface.
    #[must_use]
    pub fn drawn_markers(&self) -> &[MarkerId] {
        &self.drawn_markers
    }

    /// Floors the current route visits, in first-visit order.
    #[must_use]
    pub fn floors(&self) -> Vec<FloorIndex> {
        let mut floors: Vec<FloorIndex> = Vec::new();
        for run in self.runs() {
            if !floors.contains(&run.floor) {
                floors.push(run.floor);
            }
        }
        floors
    }

    /// Box around every point of the current route.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.runs().iter().flat_map(|r| r.points.iter().copied()))
    }

    /// Stroke for `floor`'s paths.
    #[must_use]
    pub fn style_for(&self, floor: FloorIndex) -> PathStyle {
        let position = self.registry.position(floor).unwrap_or(0);
        self.route_style.style_for(position, self.registry.len())
    }

    fn clear_drawn<S: PresentationSurface>(&mut self, surface: &mut S) {
        self.scheduler.cancel_all();
        self.scheduler.reap(surface);
        for id in self.drawn_markers.drain(..) {
            surface.remove_marker(id);
        }
        for kind in self.drawn_pins.drain(..) {
            surface.hide_pin(kind);
        }
    }

    fn draw_floor<S: PresentationSurface>(&mut self, floor: FloorIndex, surface: &mut S) {
        let style = self.style_for(floor);
        let Some(route) = self.route.as_ref() else {
            return;
        };

        let mut played = 0usize;
        for run in runs_on(&route.runs, floor) {
            self.scheduler.play(run, &style, surface);
            played += 1;
        }
        for marker in markers_on(&route.markers, floor) {
            surface.add_marker(marker.id, marker);
            self.drawn_markers.push(marker.id);
        }
        if let Some(endpoints) = route.endpoints.as_ref() {
            for (kind, pin) in endpoints.pins().filter(|(_, pin)| pin.floor == floor) {
                surface.show_pin(kind, pin.position);
                self.drawn_pins.push(kind);
            }
        }

        tracing::debug!(
            target: "floorpath.display",
            floor = %floor,
            runs = played,
            markers = self.drawn_markers.len(),
            pins = self.drawn_pins.len(),
            "floor drawn"
        );
    }
}
