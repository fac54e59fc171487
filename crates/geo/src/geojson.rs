//! GeoJSON and WKT interop.
//!
//! The map layer speaks GeoJSON, with positions in `[lng, lat]` order.
//! Supported inputs:
//! - Points: `{"type": "Point", "coordinates": [lng, lat]}`, a Feature wrapping
//!   one, a plain `{"lat": .., "lng": ..}` object, or WKT `POINT(lng lat)`
//! - Polygons: `{"type": "Polygon", "coordinates": [[[lng, lat], ...]]}` or a
//!   Feature wrapping one (outer ring only)

use crate::{Coordinate, GeoError, Polygon, Result};
use serde_json::{json, Value};

impl Polygon {
    /// GeoJSON `Feature<Polygon>` for drawing on the map.
    pub fn to_geojson_feature(&self) -> Value {
        let ring: Vec<[f64; 2]> = self.ring().iter().map(|c| [c.lng, c.lat]).collect();
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [ring]
            }
        })
    }
}

/// Parse a point from any of the supported shapes.
///
/// # Example
/// ```
/// use h2map_geo::parse_point;
/// use serde_json::json;
///
/// let geojson = json!({"type": "Point", "coordinates": [-98.5795, 39.8283]});
/// let coord = parse_point(&geojson).unwrap();
/// assert!((coord.lat - 39.8283).abs() < 0.0001);
///
/// let wkt = json!("POINT(-98.5795 39.8283)");
/// assert_eq!(parse_point(&wkt).unwrap(), coord);
/// ```
pub fn parse_point(value: &Value) -> Result<Coordinate> {
    match value {
        Value::Null => Err(GeoError::InvalidGeoJson("expected a point, got null".into())),
        Value::String(wkt) => parse_wkt_point(wkt),
        Value::Object(obj) => {
            if let Some(geometry) = feature_geometry(value)? {
                return parse_point(geometry);
            }

            if let Some(coords) = obj.get("coordinates") {
                expect_type(value, "Point")?;
                return position(coords);
            }

            match (obj.get("lat").and_then(Value::as_f64), obj.get("lng").and_then(Value::as_f64)) {
                (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)),
                _ => Err(GeoError::InvalidGeoJson("object has neither coordinates nor lat/lng".into())),
            }
        }
        other => Err(GeoError::InvalidGeoJson(format!("expected a point, got {}", other))),
    }
}

/// Parse a polygon from a GeoJSON geometry or Feature.
///
/// # Errors
/// `InvalidGeoJson` for anything other than a single-ring polygon.
pub fn parse_polygon(value: &Value) -> Result<Polygon> {
    if let Some(geometry) = feature_geometry(value)? {
        return parse_polygon(geometry);
    }

    expect_type(value, "Polygon")?;

    let rings = value
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| GeoError::InvalidGeoJson("Polygon is missing its coordinates".into()))?;

    let outer = match rings.as_slice() {
        [outer] => outer,
        [] => return Err(GeoError::InvalidGeoJson("Polygon has no rings".into())),
        _ => return Err(GeoError::InvalidGeoJson("Polygon holes are not supported".into())),
    };

    let ring = outer
        .as_array()
        .ok_or_else(|| GeoError::InvalidGeoJson("ring must be an array of positions".into()))?
        .iter()
        .map(position)
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(ring))
}

/// The geometry of a Feature, or `None` if `value` is not a Feature.
fn feature_geometry(value: &Value) -> Result<Option<&Value>> {
    if value.get("type").and_then(Value::as_str) != Some("Feature") {
        return Ok(None);
    }
    match value.get("geometry") {
        Some(geometry) if !geometry.is_null() => Ok(Some(geometry)),
        _ => Err(GeoError::InvalidGeoJson("Feature has no geometry".into())),
    }
}

/// Accept a matching or absent `type` member.
fn expect_type(value: &Value, expected: &str) -> Result<()> {
    match value.get("type").and_then(Value::as_str) {
        None => Ok(()),
        Some(t) if t == expected => Ok(()),
        Some(t) => Err(GeoError::InvalidGeoJson(format!("expected {}, got {}", expected, t))),
    }
}

/// `[lng, lat]` or `[lng, lat, alt]`.
fn position(value: &Value) -> Result<Coordinate> {
    let parts = value
        .as_array()
        .filter(|p| p.len() >= 2)
        .ok_or_else(|| GeoError::InvalidGeoJson(format!("expected [lng, lat], got {}", value)))?;

    match (parts[0].as_f64(), parts[1].as_f64()) {
        (Some(lng), Some(lat)) => Ok(Coordinate::new(lat, lng)),
        _ => Err(GeoError::InvalidGeoJson(format!("non-numeric position {}", value))),
    }
}

/// Parse a WKT POINT string.
///
/// Format: `POINT(longitude latitude)`
fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let wkt = wkt.trim();

    let body = wkt
        .strip_prefix("POINT")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| GeoError::InvalidWkt(format!("Expected POINT(lng lat), got: {}", wkt)))?;

    let parts: Vec<&str> = body.split_whitespace().collect();
    let [lng, lat] = parts.as_slice() else {
        return Err(GeoError::InvalidWkt(format!("Expected 2 coordinates, got {}", parts.len())));
    };

    let lng: f64 = lng
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", lng)))?;
    let lat: f64 = lat
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", lat)))?;

    Ok(Coordinate::new(lat, lng))
}
