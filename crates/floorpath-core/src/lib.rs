#![forbid(unsafe_code)]

//! Core: floor assignment, route segmentation, transition markers and
//! reveal animation primitives.
//!
//! # Role in floorpath
//! `floorpath-core` is the pure layer. It turns one flat routing-service
//! response into ordered, floor-homogeneous [`Run`]s and derives the
//! [`TransitionMarker`]s between them. Nothing here touches a clock or a
//! presentation surface.
//!
//! # Primary responsibilities
//! - **FloorRegistry**: validated floor list and label-to-floor assignment.
//! - **segment**: steps to runs, including disjoint multi-line steps.
//! - **plan**: floor-change markers with pin-collision suppression.
//! - **PathReveal**: densified, eased, tick-driven polyline reveal.
//! - **osrm**: decoding of the OSRM route payload into steps.
//!
//! # How it fits in the system
//! `floorpath-runtime` consumes runs and markers, schedules reveal
//! animations frame by frame and keeps the presentation surface in sync with
//! the active floor.

pub mod animation;
pub mod config;
pub mod error;
pub mod floor;
pub mod geometry;
pub mod logging;
pub mod marker;
pub mod osrm;
pub mod palette;
pub mod segment;
pub mod step;

pub use config::ViewerConfig;
pub use error::{Error, Result};
pub use floor::{FloorIndex, FloorRegistry, FloorSpec, MatchPolicy};
pub use geometry::{Bounds, LatLng};
pub use marker::{
    Direction, MarkerId, Pin, PinKind, RouteEndpoints, TransitionMarker, markers_on, plan,
};
pub use palette::{Hsl, PathStyle};
pub use segment::{Run, RunId, RunKind, runs_on, segment};
pub use step::{RouteStep, StepGeometry};
