//! Axis-aligned map bounds.

use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// A latitude/longitude box, as the map viewport reports it.
///
/// Boxes never wrap the antimeridian: `west <= east` always holds for
/// bounds built by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let init = Bounds {
            north: first.lat,
            south: first.lat,
            east: first.lng,
            west: first.lng,
        };
        Some(points[1..].iter().fold(init, |b, p| Bounds {
            north: b.north.max(p.lat),
            south: b.south.min(p.lat),
            east: b.east.max(p.lng),
            west: b.west.min(p.lng),
        }))
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }

    /// Midpoint of the box, handy for centering the map.
    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_bounds() {
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounds_of_points() {
        let points = [
            Coordinate::new(30.0, -90.0),
            Coordinate::new(50.0, -100.0),
            Coordinate::new(40.0, -80.0),
        ];
        let b = Bounds::from_points(&points).unwrap();
        assert_eq!(b.north, 50.0);
        assert_eq!(b.south, 30.0);
        assert_eq!(b.east, -80.0);
        assert_eq!(b.west, -100.0);
        assert!(points.iter().all(|p| b.contains(p)));
        assert!(!b.contains(&Coordinate::new(51.0, -90.0)));
        assert_eq!(b.center(), Coordinate::new(40.0, -90.0));
    }
}
