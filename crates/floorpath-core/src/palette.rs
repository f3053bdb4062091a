//! Per-floor route colours.
//!
//! Every floor gets a monochrome variation of one base colour: saturation and
//! lightness sweep 40 points across the registry, so the lowest floor is the
//! darkest and the highest the lightest.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An HSL colour; hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    #[must_use]
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Variation `position` of `total` around this base colour.
    #[must_use]
    pub fn ramp(self, position: usize, total: usize) -> Self {
        let variation = if total > 1 {
            position as f32 / (total - 1) as f32
        } else {
            0.0
        };
        Self {
            hue: self.hue,
            saturation: (self.saturation - 20.0 + variation * 40.0).clamp(0.0, 100.0),
            lightness: (self.lightness - 20.0 + variation * 40.0).clamp(0.0, 100.0),
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Stroke style handed to the presentation surface for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: Hsl,
    pub weight: f32,
}
