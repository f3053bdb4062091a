#![forbid(unsafe_code)]

//! OSRM route-service payloads.
//!
//! The viewer queries an OSRM `route` endpoint with `steps=true` and GeoJSON
//! geometries. Only the first route is used; the steps of all its legs are
//! concatenated in order. Step names carry the floor tokens.
//!
//! Decoding is lenient on geometry: an unknown geometry type or a malformed
//! coordinate list decodes to an empty line, which the segmenter drops. A
//! response with no routes (or OSRM's `NoRoute` code) decodes to zero steps.
//! Any other non-`Ok` code is reported as [`Error::RoutingUnavailable`].

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geometry::LatLng;
use crate::step::{RouteStep, StepGeometry};

const CODE_OK: &str = "Ok";
const CODE_NO_ROUTE: &str = "NoRoute";

/// Builds request URLs for an OSRM `route` service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmRequest {
    base_url: String,
}

impl OsrmRequest {
    /// `base_url` up to and including the profile, e.g.
    /// `https://host/osrm/route/v1/driving`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    #[must_use]
    pub fn url(&self, start: LatLng, end: LatLng) -> String {
        format!(
            "{}/{},{};{},{}?steps=true&geometries=geojson&overview=full",
            self.base_url, start.lng, start.lat, end.lng, end.lat
        )
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    name: String,
    #[serde(default)]
    geometry: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
}

/// Decode an OSRM route response body into steps.
pub fn decode_steps(body: &str) -> Result<Vec<RouteStep>> {
    let response: Response = serde_json::from_str(body)?;
    steps_from_response(response)
}

/// Same as [`decode_steps`] for an already-parsed JSON value.
pub fn decode_steps_value(value: serde_json::Value) -> Result<Vec<RouteStep>> {
    let response: Response = serde_json::from_value(value)?;
    steps_from_response(response)
}

fn steps_from_response(response: Response) -> Result<Vec<RouteStep>> {
    match response.code.as_deref() {
        None | Some(CODE_OK) | Some(CODE_NO_ROUTE) => {}
        Some(code) => {
            let detail = response.message.as_deref().unwrap_or("no message");
            return Err(Error::routing_unavailable(format!("{code}: {detail}")));
        }
    }

    let Some(route) = response.routes.into_iter().next() else {
        tracing::debug!(target: "floorpath.osrm", "response contains no route");
        return Ok(Vec::new());
    };

    let steps: Vec<RouteStep> = route
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .enumerate()
        .map(|(position, step)| RouteStep {
            geometry: decode_geometry(position, step.geometry),
            label: step.name,
            position,
        })
        .collect();

    tracing::debug!(
        target: "floorpath.osrm",
        steps = steps.len(),
        "decoded route steps"
    );
    Ok(steps)
}

fn decode_geometry(position: usize, raw: Option<serde_json::Value>) -> StepGeometry {
    let Some(raw) = raw else {
        return StepGeometry::Line(Vec::new());
    };
    match serde_json::from_value::<Geometry>(raw) {
        Ok(Geometry::LineString { coordinates }) => {
            StepGeometry::Line(coordinates.iter().filter_map(|c| position_of(c)).collect())
        }
        Ok(Geometry::MultiLineString { coordinates }) => StepGeometry::Multi(
            coordinates
                .iter()
                .map(|line| line.iter().filter_map(|c| position_of(c)).collect())
                .collect(),
        ),
        Err(err) => {
            tracing::warn!(
                target: "floorpath.osrm",
                position = position,
                error = %err,
                "unsupported step geometry; treating as empty"
            );
            StepGeometry::Line(Vec::new())
        }
    }
}

/// GeoJSON position `[lng, lat, ...]` to a coordinate.
fn position_of(raw: &[f64]) -> Option<LatLng> {
    match raw {
        [lng, lat, ..] => Some(LatLng::from_lng_lat(*lng, *lat)).filter(|p| p.is_finite()),
        _ => None,
    }
}
