//! Straight-line route estimates between two sites.

use crate::{haversine_distance, Coordinate};
use serde::Serialize;

/// A coarse route: start, planar midpoint, end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub waypoints: Vec<Coordinate>,
    /// Great-circle length in kilometers
    pub distance_km: f64,
}

/// Direct route from `start` to `end`.
///
/// This is the pipeline planner's first guess before any terrain or hazard
/// data is considered; the midpoint is the planar mean of the endpoints.
pub fn direct_route(start: &Coordinate, end: &Coordinate) -> Route {
    let midpoint = Coordinate::new((start.lat + end.lat) / 2.0, (start.lng + end.lng) / 2.0);
    Route {
        waypoints: vec![*start, midpoint, *end],
        distance_km: haversine_distance(start, end),
    }
}
