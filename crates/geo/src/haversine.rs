//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. The inverse problem
//! (walk a distance along a bearing) uses the same sphere so that buffer
//! vertices measure back to their radius.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Symmetric, non-negative, and exactly `0.0` for identical points.
///
/// # Example
/// ```
/// use h2map_geo::{haversine_distance, Coordinate};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
///
/// let distance = haversine_distance(&a, &b);
/// assert!((distance - 111.2).abs() < 1.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Projects `distance_km` from `origin` along an initial bearing.
///
/// # Arguments
/// * `origin` - Starting coordinate
/// * `bearing_deg` - Initial bearing in degrees, clockwise from north
/// * `distance_km` - Distance to travel along the great circle
///
/// # Returns
/// The destination, with longitude normalized to [-180, 180].
pub fn destination_point(origin: &Coordinate, bearing_deg: f64, distance_km: f64) -> Coordinate {
    let (lat1, lon1) = origin.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

    Coordinate::new(lat2.to_degrees(), normalize_longitude(lon2.to_degrees()))
}

fn normalize_longitude(lng: f64) -> f64 {
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the caller's sign at the antimeridian.
    if wrapped == -180.0 && lng > 0.0 { 180.0 } else { wrapped }
}
