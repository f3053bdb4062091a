#![forbid(unsafe_code)]

//! floorpath public facade crate.
//!
//! Re-exports the stable surface of `floorpath-core` and `floorpath-runtime`
//! and offers a prelude for hosts that embed the route viewer.
//!
//! ```rust,ignore
//! use floorpath::prelude::*;
//!
//! let config = ViewerConfig::from_json_file("viewer.json")?;
//! let mut display = DisplayCoordinator::from_config(&config)?;
//! display.on_route_computed(&steps, Some(endpoints), &mut surface)?;
//! // once per frame:
//! display.tick(clock.delta(), &mut surface);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use floorpath_core::config::{
    AnimationConfig, EasingKind, MarkerConfig, RouteStyleConfig, ViewerConfig,
};
pub use floorpath_core::geometry::{MAX_SUBDIVISIONS, densify};
pub use floorpath_core::osrm::{OsrmRequest, decode_steps};
pub use floorpath_core::{
    Bounds, Direction, Error, FloorIndex, FloorRegistry, FloorSpec, Hsl, LatLng, MarkerId,
    MatchPolicy, PathStyle, Pin, PinKind, Result, RouteEndpoints, RouteStep, Run, RunId, RunKind,
    StepGeometry, TransitionMarker, markers_on, plan, runs_on, segment,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use floorpath_runtime::{
    AnimationHandle, AnimationPhase, AnimationScheduler, DisplayCoordinator, FrameClock,
    OsrmSource, PresentationSurface, RevealSettings, RouteSummary, RoutingSource, SourceError,
    TickReport,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, FloorIndex, FloorRegistry, FloorSpec, LatLng, MarkerId, Pin, PinKind, Result,
        RouteEndpoints, RouteStep, ViewerConfig,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{DisplayCoordinator, FrameClock, PresentationSurface, RoutingSource};

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use floorpath_core as core;
#[cfg(feature = "runtime")]
pub use floorpath_runtime as runtime;
