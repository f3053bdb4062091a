//! Routing-service steps as consumed by the segmenter.

use crate::geometry::LatLng;

/// Line geometry of a single step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepGeometry {
    /// One contiguous polyline; its first point continues the previous step.
    Line(Vec<LatLng>),
    /// Disjoint sub-lines with no contiguity guarantee.
    Multi(Vec<Vec<LatLng>>),
}

impl StepGeometry {
    /// Total number of vertices across all sub-lines.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match self {
            Self::Line(points) => points.len(),
            Self::Multi(lines) => lines.iter().map(Vec::len).sum(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

/// One atomic unit of a routing-service path.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub label: String,
    pub geometry: StepGeometry,
    /// Zero-based position of the step in the service response.
    pub position: usize,
}

impl RouteStep {
    #[must_use]
    pub fn line(position: usize, label: impl Into<String>, points: Vec<LatLng>) -> Self {
        Self {
            label: label.into(),
            geometry: StepGeometry::Line(points),
            position,
        }
    }

    #[must_use]
    pub fn multi(position: usize, label: impl Into<String>, lines: Vec<Vec<LatLng>>) -> Self {
        Self {
            label: label.into(),
            geometry: StepGeometry::Multi(lines),
            position,
        }
    }
}
