//! Buffer polygons and point-in-polygon tests.
//!
//! Buffers are built on the sphere (each vertex is a destination point from
//! the center), containment is tested in the plane with (lng, lat) as (x, y).
//! The planar test is fine at the radii the map draws (tens to hundreds of km)
//! and never wraps the antimeridian.

use crate::config::BufferConfig;
use crate::{destination_point, Bounds, Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Vertex count used by [`buffer`].
pub const DEFAULT_BUFFER_SEGMENTS: usize = 64;

/// Fewest segments a buffer may be built with.
pub(crate) const MIN_BUFFER_SEGMENTS: usize = 32;

/// A single closed ring with no holes.
///
/// The first and last vertices are always equal; [`Polygon::new`] closes an
/// open ring by repeating its first vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Polygon {
    ring: Vec<Coordinate>,
}

impl Polygon {
    /// Builds a polygon from a ring, closing it if needed.
    ///
    /// No shape validation happens here; degenerate rings are rejected by
    /// [`contains`] instead, where they would give a meaningless answer.
    pub fn new(mut ring: Vec<Coordinate>) -> Self {
        let open = match (ring.first(), ring.last()) {
            (Some(first), Some(last)) => ring.len() == 1 || first != last,
            _ => false,
        };
        if open {
            ring.push(ring[0]);
        }
        Self { ring }
    }

    /// The closed ring, including the repeated closing vertex.
    #[inline]
    pub fn ring(&self) -> &[Coordinate] {
        &self.ring
    }

    /// The ring without its closing vertex.
    pub fn vertices(&self) -> &[Coordinate] {
        match self.ring.len() {
            0 => &self.ring,
            n => &self.ring[..n - 1],
        }
    }

    /// Number of vertices that differ from each other.
    pub fn distinct_vertex_count(&self) -> usize {
        let mut seen: Vec<Coordinate> = Vec::with_capacity(self.ring.len());
        for v in self.vertices() {
            if !seen.contains(v) {
                seen.push(*v);
            }
        }
        seen.len()
    }

    /// Bounding box of the ring, `None` for an empty polygon.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.ring)
    }
}

impl From<Vec<Coordinate>> for Polygon {
    fn from(ring: Vec<Coordinate>) -> Self {
        Polygon::new(ring)
    }
}

impl From<Polygon> for Vec<Coordinate> {
    fn from(polygon: Polygon) -> Self {
        polygon.ring
    }
}

/// Builds a circular buffer of `radius_km` around `center`.
///
/// Uses [`DEFAULT_BUFFER_SEGMENTS`] vertices. See [`buffer_with_segments`].
///
/// # Example
/// ```
/// use h2map_geo::{buffer, contains, Coordinate};
///
/// let site = Coordinate::new(40.0, -100.0);
/// let zone = buffer(&site, 25.0).unwrap();
/// assert_eq!(zone.ring().first(), zone.ring().last());
/// assert!(contains(&site, &zone).unwrap());
/// ```
pub fn buffer(center: &Coordinate, radius_km: f64) -> Result<Polygon> {
    buffer_with_segments(center, radius_km, DEFAULT_BUFFER_SEGMENTS)
}

/// Builds a circular buffer with an explicit vertex count.
///
/// Vertex `i` sits at bearing `360 * i / segments` degrees, `radius_km` from
/// the center along the great circle, so every vertex measures back to the
/// radius under [`crate::haversine_distance`].
///
/// # Errors
/// `InvalidArgument` when the radius is not a finite positive number or
/// `segments` is below 32.
pub fn buffer_with_segments(center: &Coordinate, radius_km: f64, segments: usize) -> Result<Polygon> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(GeoError::invalid(format!("buffer radius must be > 0 km, got {}", radius_km)));
    }
    if segments < MIN_BUFFER_SEGMENTS {
        return Err(GeoError::invalid(format!(
            "buffer needs at least {} segments, got {}",
            MIN_BUFFER_SEGMENTS, segments
        )));
    }

    debug!(radius_km, segments, "building buffer polygon");

    let step = 360.0 / segments as f64;
    let mut ring: Vec<Coordinate> = (0..segments)
        .map(|i| destination_point(center, step * i as f64, radius_km))
        .collect();
    ring.push(ring[0]);

    Ok(Polygon { ring })
}

/// Builds a circular buffer with the vertex count from a loaded `[buffer]` section.
///
/// # Errors
/// Same as [`buffer_with_segments`].
pub fn buffer_with_config(center: &Coordinate, radius_km: f64, config: &BufferConfig) -> Result<Polygon> {
    buffer_with_segments(center, radius_km, config.segments)
}

/// Tests whether `point` lies inside `polygon` by even-odd ray casting.
///
/// Points exactly on an edge may land on either side, but the answer for a
/// given point and polygon never changes between calls.
///
/// # Errors
/// `InvalidArgument` when the polygon has fewer than 3 distinct vertices.
pub fn contains(point: &Coordinate, polygon: &Polygon) -> Result<bool> {
    let distinct = polygon.distinct_vertex_count();
    if distinct < 3 {
        return Err(GeoError::invalid(format!(
            "polygon needs at least 3 distinct vertices, got {}",
            distinct
        )));
    }

    let (x, y) = (point.lng, point.lat);
    let mut inside = false;

    for edge in polygon.ring().windows(2) {
        let (xi, yi) = (edge[0].lng, edge[0].lat);
        let (xj, yj) = (edge[1].lng, edge[1].lat);

        if (yi > y) != (yj > y) {
            let x_cross = xi + (y - yi) * (xj - xi) / (yj - yi);
            if x < x_cross {
                inside = !inside;
            }
        }
    }

    Ok(inside)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine_distance;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ])
    }

    #[test]
    fn test_new_closes_ring() {
        let square = unit_square();
        assert_eq!(square.ring().len(), 5);
        assert_eq!(square.ring().first(), square.ring().last());
        assert_eq!(square.vertices().len(), 4);
    }

    #[test]
    fn test_new_keeps_closed_ring() {
        let ring = unit_square().ring().to_vec();
        assert_eq!(Polygon::new(ring.clone()).ring(), ring.as_slice());
    }

    #[test]
    fn test_buffer_is_closed_and_round() {
        let center = Coordinate::new(39.8283, -98.5795);
        let zone = buffer(&center, 50.0).unwrap();

        assert_eq!(zone.ring().len(), DEFAULT_BUFFER_SEGMENTS + 1);
        assert_eq!(zone.ring().first(), zone.ring().last());
        for v in zone.vertices() {
            let d = haversine_distance(&center, v);
            assert!((d - 50.0).abs() / 50.0 < 0.02, "vertex at {} km", d);
        }
    }

    #[test]
    fn test_buffer_rejects_bad_radius() {
        let c = Coordinate::new(0.0, 0.0);
        for r in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(buffer(&c, r), Err(GeoError::InvalidArgument(_))), "radius {}", r);
        }
    }

    #[test]
    fn test_buffer_follows_config_segments() {
        let c = Coordinate::new(45.0, -93.0);

        let zone = buffer_with_config(&c, 20.0, &BufferConfig::default()).unwrap();
        assert_eq!(zone.ring().len(), DEFAULT_BUFFER_SEGMENTS + 1);

        let zone = buffer_with_config(&c, 20.0, &BufferConfig { segments: 40 }).unwrap();
        assert_eq!(zone.ring().len(), 41);
        assert_eq!(zone.ring().first(), zone.ring().last());

        let coarse = BufferConfig { segments: 12 };
        assert!(matches!(buffer_with_config(&c, 20.0, &coarse), Err(GeoError::InvalidArgument(_))));
    }

    #[test]
    fn test_buffer_rejects_too_few_segments() {
        let c = Coordinate::new(0.0, 0.0);
        assert!(matches!(buffer_with_segments(&c, 10.0, 8), Err(GeoError::InvalidArgument(_))));
        assert!(buffer_with_segments(&c, 10.0, 32).is_ok());
    }

    #[test]
    fn test_contains_square() {
        let square = unit_square();
        assert!(contains(&Coordinate::new(0.5, 0.5), &square).unwrap());
        assert!(!contains(&Coordinate::new(1.5, 0.5), &square).unwrap());
        assert!(!contains(&Coordinate::new(-0.1, 0.5), &square).unwrap());
    }

    #[test]
    fn test_contains_concave() {
        // U shape opening north
        let u = Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 3.0),
            Coordinate::new(3.0, 3.0),
            Coordinate::new(3.0, 2.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(3.0, 1.0),
            Coordinate::new(3.0, 0.0),
        ]);
        assert!(contains(&Coordinate::new(2.0, 0.5), &u).unwrap());
        assert!(!contains(&Coordinate::new(2.0, 1.5), &u).unwrap());
    }

    #[test]
    fn test_boundary_is_stable() {
        let square = unit_square();
        let on_edge = Coordinate::new(0.5, 1.0);
        let first = contains(&on_edge, &square).unwrap();
        for _ in 0..10 {
            assert_eq!(contains(&on_edge, &square).unwrap(), first);
        }
    }

    #[test]
    fn test_contains_rejects_degenerate() {
        let line = Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
        ]);
        assert_eq!(line.distinct_vertex_count(), 2);
        let err = contains(&Coordinate::new(0.5, 0.5), &line).unwrap_err();
        assert!(matches!(err, GeoError::InvalidArgument(_)));

        let empty = Polygon::new(Vec::new());
        assert!(contains(&Coordinate::new(0.0, 0.0), &empty).is_err());
    }

    #[test]
    fn test_buffer_contains_center_not_outside() {
        let center = Coordinate::new(40.0, -100.0);
        let zone = buffer(&center, 30.0).unwrap();
        assert!(contains(&center, &zone).unwrap());

        for bearing in [0.0, 45.0, 135.0, 260.0] {
            let outside = destination_point(&center, bearing, 36.0);
            assert!(!contains(&outside, &zone).unwrap(), "bearing {}", bearing);
            let inside = destination_point(&center, bearing, 24.0);
            assert!(contains(&inside, &zone).unwrap(), "bearing {}", bearing);
        }
    }

    #[test]
    fn test_polygon_bounds() {
        let b = unit_square().bounds().unwrap();
        assert_eq!((b.south, b.north, b.west, b.east), (0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_polygon_serde_closes_ring() {
        let json = serde_json::json!([
            {"lat": 0.0, "lng": 0.0},
            {"lat": 0.0, "lng": 1.0},
            {"lat": 1.0, "lng": 1.0}
        ]);
        let polygon: Polygon = serde_json::from_value(json).unwrap();
        assert_eq!(polygon.ring().len(), 4);
        let back = serde_json::to_value(&polygon).unwrap();
        assert_eq!(back.as_array().unwrap().len(), 4);
    }
}
