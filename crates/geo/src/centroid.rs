//! Centroids of point sets.
//!
//! Both flavours take the planar mean of latitudes and longitudes, matching
//! the planar treatment in the point-in-polygon test.

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// A coordinate carrying an influence magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    pub coordinate: Coordinate,
    pub weight: f64,
}

impl WeightedPoint {
    #[inline]
    pub fn new(coordinate: Coordinate, weight: f64) -> Self {
        Self { coordinate, weight }
    }
}

/// Arithmetic mean of the latitudes and of the longitudes.
///
/// A single point comes back unchanged.
///
/// # Errors
/// `EmptyInput` when `points` is empty.
///
/// # Example
/// ```
/// use h2map_geo::{centroid, Coordinate};
///
/// let c = centroid(&[Coordinate::new(30.0, -90.0), Coordinate::new(50.0, -90.0)]).unwrap();
/// assert_eq!(c, Coordinate::new(40.0, -90.0));
/// ```
pub fn centroid(points: &[Coordinate]) -> Result<Coordinate> {
    if points.is_empty() {
        return Err(GeoError::EmptyInput("cannot compute the centroid of zero points".into()));
    }

    // Offsets from the first point keep repeated points exact.
    let origin = points[0];
    let (lat_sum, lng_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + (p.lat - origin.lat), lng + (p.lng - origin.lng)));
    let n = points.len() as f64;

    Ok(Coordinate::new(origin.lat + lat_sum / n, origin.lng + lng_sum / n))
}

/// Weighted mean position: `Σ wᵢ·cᵢ / Σ wᵢ`.
///
/// Zero-weight points are allowed and simply do not pull the result.
///
/// # Errors
/// - `InvalidArgument` for a negative or non-finite weight.
/// - `EmptyInput` when the weights sum to zero (including an empty slice).
pub fn weighted_centroid(points: &[WeightedPoint]) -> Result<Coordinate> {
    let Some(origin) = points.first().map(|p| p.coordinate) else {
        return Err(GeoError::EmptyInput("weighted centroid of zero points".into()));
    };

    if let Some(bad) = points.iter().find(|p| !p.weight.is_finite() || p.weight < 0.0) {
        return Err(GeoError::invalid(format!(
            "weight must be a finite number >= 0, got {}",
            bad.weight
        )));
    }

    let scale = weight_scale(points.iter().map(|p| p.weight).fold(0.0, f64::max));

    let mut total = 0.0;
    let mut lat_sum = 0.0;
    let mut lng_sum = 0.0;

    for p in points {
        let w = p.weight * scale;
        total += w;
        lat_sum += w * (p.coordinate.lat - origin.lat);
        lng_sum += w * (p.coordinate.lng - origin.lng);
    }

    if total == 0.0 {
        return Err(GeoError::EmptyInput("weighted centroid has zero total weight".into()));
    }

    Ok(Coordinate::new(origin.lat + lat_sum / total, origin.lng + lng_sum / total))
}

/// Power of two that brings very large weights down near 1.
///
/// Scaling by a power of two is exact, so weight ratios (and results for
/// ordinary weights, which are left alone) do not change. Without it the
/// weighted sums overflow once weights approach `f64::MAX / 360`.
fn weight_scale(max_weight: f64) -> f64 {
    if max_weight <= 1e100 {
        return 1.0;
    }
    let exponent = max_weight.log2().floor() as i32;
    2f64.powi(-exponent)
}
