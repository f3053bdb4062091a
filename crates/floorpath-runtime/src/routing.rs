//! The routing-source seam.
//!
//! The engine does not own a transport. A host wraps its HTTP client (or a
//! canned fixture) in a [`RoutingSource`]; whatever the source fails with is
//! reported to the caller as one "routing unavailable" condition. Retries and
//! timeouts are the host's business.

use floorpath_core::osrm::{OsrmRequest, decode_steps};
use floorpath_core::{Error, LatLng, Result, RouteStep};

/// Error type a source may fail with.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

pub trait RoutingSource {
    /// One candidate path between `start` and `end`, as ordered steps.
    fn route(&mut self, start: LatLng, end: LatLng) -> std::result::Result<Vec<RouteStep>, SourceError>;
}

impl<F> RoutingSource for F
where
    F: FnMut(LatLng, LatLng) -> std::result::Result<Vec<RouteStep>, SourceError>,
{
    fn route(&mut self, start: LatLng, end: LatLng) -> std::result::Result<Vec<RouteStep>, SourceError> {
        self(start, end)
    }
}

/// An OSRM source over a caller-supplied blocking fetch (`url -> body`).
pub struct OsrmSource<F> {
    request: OsrmRequest,
    fetch: F,
}

impl<F> OsrmSource<F>
where
    F: FnMut(&str) -> std::result::Result<String, SourceError>,
{
    pub fn new(request: OsrmRequest, fetch: F) -> Self {
        Self { request, fetch }
    }
}

impl<F> std::fmt::Debug for OsrmSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsrmSource")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

impl<F> RoutingSource for OsrmSource<F>
where
    F: FnMut(&str) -> std::result::Result<String, SourceError>,
{
    fn route(&mut self, start: LatLng, end: LatLng) -> std::result::Result<Vec<RouteStep>, SourceError> {
        let url = self.request.url(start, end);
        let body = (self.fetch)(&url)?;
        Ok(decode_steps(&body)?)
    }
}

/// Query `source`, folding every failure into [`Error::RoutingUnavailable`].
pub fn fetch_steps<R: RoutingSource + ?Sized>(
    source: &mut R,
    start: LatLng,
    end: LatLng,
) -> Result<Vec<RouteStep>> {
    source.route(start, end).map_err(|err| {
        tracing::warn!(
            target: "floorpath.display",
            start = %start,
            end = %end,
            error = %err,
            "routing source failed"
        );
        Error::routing_unavailable(err.to_string())
    })
}
