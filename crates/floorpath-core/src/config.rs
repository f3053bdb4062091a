#![forbid(unsafe_code)]

//! Viewer configuration loaded as data.
//!
//! A single [`ViewerConfig`] groups the floor registry and every tunable of
//! the engine. Every section has defaults, so a config file only needs the
//! floors:
//!
//! ```json
//! {
//!   "floors": [
//!     { "index": -1, "token": "2", "name": "Etage -1" },
//!     { "index": 0, "token": "0" },
//!     { "index": 1, "token": "1" }
//!   ],
//!   "animation": { "duration_ms": 4000 }
//! }
//! ```
//!
//! ```rust,ignore
//! let config = ViewerConfig::from_json_file("config/campus.json")?;
//! let registry = config.registry()?;
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{EasingFn, ease_in_out, ease_in_out_quart, linear};
use crate::error::{Error, Result};
use crate::floor::{FloorRegistry, FloorSpec, MatchPolicy};
use crate::geometry::MAX_SUBDIVISIONS;
use crate::marker::DEFAULT_MARKER_EPSILON;
use crate::palette::{Hsl, PathStyle};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Floors in matching order.
    pub floors: Vec<FloorSpec>,
    pub matching: MatchPolicy,
    pub animation: AnimationConfig,
    pub markers: MarkerConfig,
    pub route_style: RouteStyleConfig,
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(
            target: "floorpath.config",
            path = %path.display(),
            floors = config.floors.len(),
            "viewer config loaded"
        );
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section and the floor list.
    pub fn validate(&self) -> Result<()> {
        self.animation.validate()?;
        self.markers.validate()?;
        self.route_style.validate()?;
        self.registry().map(|_| ())
    }

    /// Build the floor registry described by this config.
    pub fn registry(&self) -> Result<FloorRegistry> {
        FloorRegistry::with_policy(self.floors.clone(), self.matching)
    }
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingKind {
    Linear,
    EaseInOut,
    #[default]
    EaseInOutQuart,
}

impl EasingKind {
    #[must_use]
    pub fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseInOut => ease_in_out,
            Self::EaseInOutQuart => ease_in_out_quart,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Wall-clock length of one run's reveal.
    pub duration_ms: u64,
    /// Sub-steps inserted per original segment before revealing.
    pub subdivisions: usize,
    pub easing: EasingKind,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1500,
            subdivisions: 5,
            easing: EasingKind::default(),
        }
    }
}

impl AnimationConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.duration_ms == 0 {
            return Err(Error::invalid_config("animation.duration_ms must be > 0"));
        }
        if self.subdivisions == 0 {
            return Err(Error::invalid_config("animation.subdivisions must be > 0"));
        }
        if self.subdivisions > MAX_SUBDIVISIONS {
            return Err(Error::invalid_config(format!(
                "animation.subdivisions must be <= {MAX_SUBDIVISIONS}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Pin-collision tolerance in degrees.
    pub epsilon: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_MARKER_EPSILON,
        }
    }
}

impl MarkerConfig {
    fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::invalid_config(
                "markers.epsilon must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Route style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteStyleConfig {
    pub base_color: Hsl,
    pub weight: f32,
}

impl Default for RouteStyleConfig {
    fn default() -> Self {
        Self {
            base_color: Hsl::new(0.0, 80.0, 40.0),
            weight: 5.0,
        }
    }
}

impl RouteStyleConfig {
    /// Stroke for the floor at registry `position` out of `total`.
    #[must_use]
    pub fn style_for(&self, position: usize, total: usize) -> PathStyle {
        PathStyle {
            color: self.base_color.ramp(position, total),
            weight: self.weight,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(Error::invalid_config("route_style.weight must be > 0"));
        }
        Ok(())
    }
}
