#![forbid(unsafe_code)]

//! Geographic primitives shared by segmentation, marker planning and animation.
//!
//! Coordinates are stored as `(lat, lng)` in degrees. Routing payloads that use
//! the GeoJSON `[lng, lat]` order are converted at the decoding boundary
//! (see [`crate::osrm`]) so nothing downstream has to care.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in degrees.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from a GeoJSON position (`[lng, lat]`).
    #[inline]
    #[must_use]
    pub const fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both axes differ by at most `epsilon` degrees.
    #[inline]
    #[must_use]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.lat - other.lat).abs() <= epsilon && (self.lng - other.lng).abs() <= epsilon
    }

    /// Linear interpolation toward `other`; `t` is not clamped.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Debug for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7},{:.7}", self.lat, self.lng)
    }
}

/// Axis-aligned bounding box, used by hosts to frame a computed route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Smallest box containing every point. `None` for an empty iterator.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    #[must_use]
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }
}

/// Upper bound on subdivisions per segment; larger requests are clamped.
pub const MAX_SUBDIVISIONS: usize = 1000;

/// Subdivide every segment of `points` into `subdivisions` equal steps.
///
/// Shared segment endpoints appear once, so a polyline of `n >= 2` points
/// yields `(n - 1) * subdivisions + 1` points. Inputs with fewer than two
/// points, or `subdivisions <= 1`, are returned unchanged. `subdivisions`
/// above [`MAX_SUBDIVISIONS`] is treated as [`MAX_SUBDIVISIONS`].
#[must_use]
pub fn densify(points: &[LatLng], subdivisions: usize) -> Vec<LatLng> {
    if points.len() < 2 || subdivisions <= 1 {
        return points.to_vec();
    }
    let subdivisions = subdivisions.min(MAX_SUBDIVISIONS);
    let capacity = (points.len() - 1)
        .saturating_mul(subdivisions)
        .saturating_add(1);
    let mut out = Vec::with_capacity(capacity);
    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        for j in 0..subdivisions {
            out.push(start.lerp(end, j as f64 / subdivisions as f64));
        }
    }
    if let Some(&last) = points.last() {
        out.push(last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn densify_keeps_original_vertices() {
        let pts = [
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 0.0),
            LatLng::new(1.0, 2.0),
        ];
        let dense = densify(&pts, 5);
        assert_eq!(dense.len(), 11);
        assert_eq!(dense[0], pts[0]);
        assert_eq!(dense[5], pts[1]);
        assert_eq!(dense[10], pts[2]);
        assert!(dense[1].approx_eq(LatLng::new(0.2, 0.0), 1e-12));
    }

    #[test]
    fn densify_degenerate_inputs_pass_through() {
        assert!(densify(&[], 5).is_empty());
        let single = [LatLng::new(3.0, 4.0)];
        assert_eq!(densify(&single, 5), single.to_vec());
        let pair = [LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)];
        assert_eq!(densify(&pair, 1), pair.to_vec());
    }

    #[test]
    fn densify_clamps_huge_subdivision_counts() {
        let pair = [LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0)];
        let dense = densify(&pair, usize::MAX);
        assert_eq!(dense.len(), MAX_SUBDIVISIONS + 1);
        assert_eq!(dense.last(), Some(&pair[1]));
    }

    #[test]
    fn bounds_cover_all_points() {
        let b = Bounds::from_points([
            LatLng::new(45.9, 6.1),
            LatLng::new(45.8, 6.3),
            LatLng::new(46.0, 6.2),
        ])
        .unwrap();
        assert_eq!(b.south_west, LatLng::new(45.8, 6.1));
        assert_eq!(b.north_east, LatLng::new(46.0, 6.3));
        assert!(b.contains(LatLng::new(45.95, 6.15)));
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn approx_eq_respects_epsilon() {
        let a = LatLng::new(45.937_289, 6.132_621);
        assert!(a.approx_eq(LatLng::new(45.937_289_05, 6.132_621), 1e-7));
        assert!(!a.approx_eq(LatLng::new(45.937_3, 6.132_621), 1e-7));
    }
}
