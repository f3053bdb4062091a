#![forbid(unsafe_code)]

//! Runtime: frame-driven reveal scheduling and active-floor display.
//!
//! # Role in floorpath
//! `floorpath-runtime` is where time and the presentation surface enter the
//! picture. The host owns the frame loop and the map widget; this crate
//! decides what is drawn on it.
//!
//! # Primary responsibilities
//! - **AnimationScheduler**: per-run reveal animations advanced by `tick(dt)`,
//!   with cooperative cancellation.
//! - **DisplayCoordinator**: reacts to new routes, floor changes and marker
//!   clicks; keeps only the active floor's paths, markers and pins drawn.
//! - **PresentationSurface**: the seam to the host's map widget.
//! - **RoutingSource**: the seam to the host's routing transport.
//! - **FrameClock**: frame timestamps to tick deltas.

pub mod cancellation;
pub mod clock;
pub mod coordinator;
pub mod routing;
pub mod scheduler;
pub mod surface;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use cancellation::{CancellationSource, CancellationToken};
pub use clock::FrameClock;
pub use coordinator::{DisplayCoordinator, RouteSummary};
pub use routing::{OsrmSource, RoutingSource, SourceError, fetch_steps};
pub use scheduler::{
    AnimationHandle, AnimationPhase, AnimationScheduler, AnimationState, RevealSettings,
    TickReport,
};
pub use surface::PresentationSurface;
