//! Structured logging setup.
//!
//! The engine only emits `tracing` events; installing a subscriber is the
//! host's call. With the `tracing-json` feature, [`init_json`] installs a JSON
//! formatter filtered by `RUST_LOG` (default `floorpath=info`).
//!
//! Event targets:
//!
//! | target | emitted by |
//! |--------|------------|
//! | `floorpath.registry` | floor registry validation |
//! | `floorpath.config` | config loading |
//! | `floorpath.segment` | route segmentation |
//! | `floorpath.markers` | transition marker planning |
//! | `floorpath.osrm` | OSRM decoding |
//! | `floorpath.anim` | animation scheduler |
//! | `floorpath.display` | display coordinator |

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "floorpath=info";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
