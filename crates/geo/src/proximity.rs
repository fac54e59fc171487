//! Proximity ranking with optional parallelism.
//!
//! Works over any record that can report a [`Coordinate`]: infrastructure
//! assets, renewable sources, demand centers. The record itself is carried
//! through untouched and paired with its distance.

use crate::{haversine_distance, parse_point, Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Anything that sits at a point on the map.
pub trait Located {
    /// Where the record is.
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}

/// A record paired with its distance from the query point.
///
/// Serializes flat, as the record's own fields plus `distance`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub item: T,
    /// Distance from the query point in kilometers
    pub distance: f64,
}

/// A loosely typed map record, as the UI sends them.
///
/// The position is read from the `coordinates` field (or `coordinate`) in any
/// shape [`parse_point`] accepts. Serializing writes the fields back exactly
/// as they came in, so the caller's key names survive a round through
/// [`nearest`] or [`within_radius`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct MapRecord {
    coordinate: Coordinate,
    fields: Map<String, Value>,
}

impl MapRecord {
    const POSITION_KEYS: [&'static str; 2] = ["coordinates", "coordinate"];

    /// The record's fields as received.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Map<String, Value>> for MapRecord {
    type Error = GeoError;

    fn try_from(fields: Map<String, Value>) -> Result<Self> {
        let position = Self::POSITION_KEYS
            .iter()
            .find_map(|key| fields.get(*key))
            .ok_or_else(|| GeoError::InvalidGeoJson("record has no coordinates field".into()))?;
        let coordinate = parse_point(position)?;
        Ok(Self { coordinate, fields })
    }
}

impl Serialize for MapRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl Located for MapRecord {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Ranks `items` by distance to `target`, closest first.
///
/// Ties keep their input order. At most `max_count` results come back; a
/// `max_count` of zero or an empty `items` gives an empty result.
///
/// # Example
/// ```
/// use h2map_geo::{nearest, Coordinate};
///
/// let sites = vec![
///     Coordinate::new(32.0, -97.0),
///     Coordinate::new(30.0, -95.0),
///     Coordinate::new(40.0, -100.0),
/// ];
///
/// let ranked = nearest(&Coordinate::new(29.76, -95.37), sites, 2);
/// assert_eq!(ranked.len(), 2);
/// assert_eq!(ranked[0].item, Coordinate::new(30.0, -95.0));
/// ```
pub fn nearest<T, I>(target: &Coordinate, items: I, max_count: usize) -> Vec<Ranked<T>>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    if max_count == 0 {
        return Vec::new();
    }

    let mut ranked = rank_all(target, items);
    ranked.truncate(max_count);
    ranked
}

/// Items within `radius_km` of `center` (inclusive), closest first.
///
/// # Errors
/// `InvalidArgument` when the radius is not a finite positive number.
pub fn within_radius<T, I>(center: &Coordinate, items: I, radius_km: f64) -> Result<Vec<Ranked<T>>>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(GeoError::invalid(format!("search radius must be > 0 km, got {}", radius_km)));
    }

    let mut ranked = rank_all(center, items);
    ranked.retain(|r| r.distance <= radius_km);
    Ok(ranked)
}

/// Pairs every item with its distance and stable-sorts ascending.
fn rank_all<T, I>(target: &Coordinate, items: I) -> Vec<Ranked<T>>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let items: Vec<T> = items.into_iter().collect();
    let coords: Vec<Coordinate> = items.iter().map(Located::coordinate).collect();
    let distances = distances_from(target, &coords);

    let mut ranked: Vec<Ranked<T>> = items
        .into_iter()
        .zip(distances)
        .map(|(item, distance)| Ranked { item, distance })
        .collect();

    // `sort_by` is stable; NaN distances (from NaN coordinates) sink to the end.
    ranked.sort_by(|a, b| compare_distance(a.distance, b.distance));
    ranked
}

/// Distance from `target` to each coordinate, in input order.
pub(crate) fn distances_from(target: &Coordinate, coords: &[Coordinate]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        coords
            .par_iter()
            .map(|c| haversine_distance(target, c))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        coords.iter().map(|c| haversine_distance(target, c)).collect()
    }
}

#[inline]
fn compare_distance(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}
