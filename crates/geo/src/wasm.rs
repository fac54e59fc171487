//! WASM bindings for the geo crate.
//!
//! The map UI calls these from TypeScript. Everything structured crosses the
//! boundary as JSON strings, coordinates as `{"lat": .., "lng": ..}` and
//! polygons as GeoJSON Features.

use crate::{
    buffer_with_config, centroid, config::BufferConfig, contains, direct_route, haversine_distance, nearest,
    parse_polygon, within_radius, ClusterCount, Coordinate, DemandCenter, GeoError, MapRecord, RenewableSource,
    SitingEstimator, SpatialClusterer,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

fn to_js(err: GeoError) -> JsValue {
    JsValue::from_str(&format!("E{}: {}", err.code() as u32, err))
}

fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| to_js(e.into()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(e.into()))
}

/// Great-circle distance in kilometers.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    haversine_distance(&Coordinate::new(lat1, lng1), &Coordinate::new(lat2, lng2))
}

/// Buffer polygon around a point, as a GeoJSON Feature string.
#[wasm_bindgen(js_name = createBuffer)]
pub fn create_buffer(lat: f64, lng: f64, radius_km: f64) -> Result<String, JsValue> {
    let zone = buffer_with_config(&Coordinate::new(lat, lng), radius_km, &BufferConfig::default()).map_err(to_js)?;
    to_json(&zone.to_geojson_feature())
}

/// Point-in-polygon test against a GeoJSON Polygon or Feature string.
#[wasm_bindgen(js_name = isPointInPolygon)]
pub fn is_point_in_polygon(lat: f64, lng: f64, polygon_json: &str) -> Result<bool, JsValue> {
    let value: serde_json::Value = from_json(polygon_json)?;
    let polygon = parse_polygon(&value).map_err(to_js)?;
    contains(&Coordinate::new(lat, lng), &polygon).map_err(to_js)
}

/// Nearest records to a point.
///
/// `records_json` is an array of objects with a `coordinates` (or
/// `coordinate`) field; each comes back unchanged with a `distance` added.
/// A negative `max_count` returns an empty array.
#[wasm_bindgen(js_name = findNearestAssets)]
pub fn find_nearest_assets(lat: f64, lng: f64, records_json: &str, max_count: i32) -> Result<String, JsValue> {
    let records: Vec<MapRecord> = from_json(records_json)?;
    let max = usize::try_from(max_count).unwrap_or(0);
    to_json(&nearest(&Coordinate::new(lat, lng), records, max))
}

/// Records within a radius, closest first.
#[wasm_bindgen(js_name = withinRadius)]
pub fn filter_within_radius(lat: f64, lng: f64, records_json: &str, radius_km: f64) -> Result<String, JsValue> {
    let records: Vec<MapRecord> = from_json(records_json)?;
    let ranked = within_radius(&Coordinate::new(lat, lng), records, radius_km).map_err(to_js)?;
    to_json(&ranked)
}

/// Centroid of a JSON array of coordinates.
#[wasm_bindgen(js_name = calculateCentroid)]
pub fn calculate_centroid(points_json: &str) -> Result<String, JsValue> {
    let points: Vec<Coordinate> = from_json(points_json)?;
    to_json(&centroid(&points).map_err(to_js)?)
}

/// Clusters of a JSON array of coordinates.
///
/// `k = 0` picks the density default of about three points per cluster.
#[wasm_bindgen(js_name = createCluster)]
pub fn create_cluster(points_json: &str, k: u32) -> Result<String, JsValue> {
    let points: Vec<Coordinate> = from_json(points_json)?;
    let count = match k {
        0 => ClusterCount::Auto,
        k => ClusterCount::Fixed(k as usize),
    };
    let fit = SpatialClusterer::new(count).fit(&points).map_err(to_js)?;
    to_json(&fit.into_groups())
}

/// Weighted optimal site from demand centers and renewable sources.
///
/// Returns the full estimate (`location`, point counts, `usedFallback`).
#[wasm_bindgen(js_name = calculateOptimalLocation)]
pub fn calculate_optimal_location(demand_json: &str, renewables_json: &str) -> Result<String, JsValue> {
    let demand: Vec<DemandCenter> = from_json(demand_json)?;
    let renewables: Vec<RenewableSource> = from_json(renewables_json)?;
    let estimate = SitingEstimator::default().estimate(&demand, &renewables).map_err(to_js)?;
    to_json(&estimate)
}

/// Straight-line route between two points.
#[wasm_bindgen(js_name = directRoute)]
pub fn route(start_lat: f64, start_lng: f64, end_lat: f64, end_lng: f64) -> Result<String, JsValue> {
    to_json(&direct_route(
        &Coordinate::new(start_lat, start_lng),
        &Coordinate::new(end_lat, end_lng),
    ))
}
