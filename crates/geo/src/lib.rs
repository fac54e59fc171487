//! Geospatial siting analytics for H2Map.
//!
//! This crate is the numeric core behind the infrastructure map. It decides
//! where hydrogen infrastructure should go relative to demand and supply:
//! - Haversine distance and destination-point projection
//! - Circular buffer polygons and point-in-polygon tests
//! - Nearest-neighbor ranking and radius queries over any located record
//! - Centroids, k-means style clustering and demand/capacity weighted siting
//! - GeoJSON interop and WASM bindings for the browser map
//!
//! Every operation is a pure function over plain values; nothing here holds
//! state between calls.
//!
//! # Example
//!
//! ```
//! use h2map_geo::{haversine_distance, optimal_location, Coordinate, DemandCenter};
//!
//! let houston = Coordinate::new(29.7604, -95.3698);
//! let dallas = Coordinate::new(32.7767, -96.7970);
//! assert!((haversine_distance(&houston, &dallas) - 362.0).abs() < 5.0);
//!
//! let demand = vec![DemandCenter::new(houston, 100.0), DemandCenter::new(dallas, 100.0)];
//! let site = optimal_location(&demand, &[]).unwrap();
//! assert!((site.lat - 31.26855).abs() < 1e-9);
//! ```

mod bounds;
mod centroid;
pub mod cluster;
pub mod config;
mod error;
pub mod geojson;
mod haversine;
mod polygon;
pub mod proximity;
mod route;
pub mod siting;

#[cfg(feature = "wasm")]
mod wasm;

pub use bounds::Bounds;
pub use centroid::{centroid, weighted_centroid, WeightedPoint};
pub use cluster::{cluster, Cluster, ClusterCount, Clustering, SpatialClusterer};
pub use config::GeoConfig;
pub use error::{GeoError, GeoErrorCode, Result};
pub use geojson::{parse_point, parse_polygon};
pub use haversine::{destination_point, haversine_distance, EARTH_RADIUS_KM};
pub use polygon::{buffer, buffer_with_config, buffer_with_segments, contains, Polygon, DEFAULT_BUFFER_SEGMENTS};
pub use proximity::{nearest, within_radius, Located, MapRecord, Ranked};
pub use route::{direct_route, Route};
pub use siting::{optimal_location, DemandCenter, RenewableSource, SitingEstimate, SitingEstimator};

/// A geographic coordinate in degrees.
///
/// Serialized as `{"lat": .., "lng": ..}`, the shape the map layer uses.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `lat` - Latitude in degrees (-90 to 90)
    /// * `lng` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
