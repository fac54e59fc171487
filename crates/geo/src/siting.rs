//! Demand/capacity weighted site selection.
//!
//! Each demand center counts as `ceil(estimated_demand / 100)` points and each
//! renewable source as `ceil(capacity / 50)` points; the recommended site is
//! the centroid of that weighted set. The divisors are calibration constants
//! ("one point per 100 demand units / 50 capacity units") and can be changed
//! through [`SitingConfig`]. The per-record counts are used as weights
//! directly instead of materializing copies.

use crate::config::SitingConfig;
use crate::{weighted_centroid, Coordinate, GeoError, Located, Result, WeightedPoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A place that consumes hydrogen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandCenter {
    #[serde(alias = "coordinates")]
    pub coordinate: Coordinate,
    pub estimated_demand: f64,
}

impl DemandCenter {
    pub fn new(coordinate: Coordinate, estimated_demand: f64) -> Self {
        Self { coordinate, estimated_demand }
    }
}

impl Located for DemandCenter {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// A wind, solar or hydro installation that can feed electrolysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewableSource {
    #[serde(alias = "coordinates")]
    pub coordinate: Coordinate,
    pub capacity: f64,
}

impl RenewableSource {
    pub fn new(coordinate: Coordinate, capacity: f64) -> Self {
        Self { coordinate, capacity }
    }
}

impl Located for RenewableSource {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Recommended site plus how it was derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitingEstimate {
    pub location: Coordinate,
    /// Weighted points contributed by demand centers
    pub demand_points: f64,
    /// Weighted points contributed by renewable sources
    pub supply_points: f64,
    /// True when there was nothing to weigh and the fallback was returned
    pub used_fallback: bool,
}

/// Weighted-centroid site estimator.
#[derive(Debug, Clone, Default)]
pub struct SitingEstimator {
    config: SitingConfig,
}

impl SitingEstimator {
    pub fn new(config: SitingConfig) -> Self {
        Self { config }
    }

    /// Estimate the best site for new infrastructure.
    ///
    /// # Errors
    /// `InvalidArgument` for a negative or non-finite demand or capacity.
    #[instrument(skip_all, fields(demand = demand_centers.len(), renewables = renewable_sources.len()))]
    pub fn estimate(
        &self,
        demand_centers: &[DemandCenter],
        renewable_sources: &[RenewableSource],
    ) -> Result<SitingEstimate> {
        let mut weighted = Vec::with_capacity(demand_centers.len() + renewable_sources.len());
        let mut demand_points = 0.0;
        let mut supply_points = 0.0;

        for center in demand_centers {
            let copies = replication(center.estimated_demand, self.config.demand_units_per_point, "estimated demand")?;
            demand_points += copies;
            weighted.push(WeightedPoint::new(center.coordinate, copies));
        }

        for source in renewable_sources {
            let copies = replication(source.capacity, self.config.capacity_units_per_point, "capacity")?;
            supply_points += copies;
            weighted.push(WeightedPoint::new(source.coordinate, copies));
        }

        // The sums may overflow to infinity for extreme inputs; only "all zero" matters here.
        if weighted.iter().all(|p| p.weight == 0.0) {
            debug!(fallback = ?self.config.fallback, "no weighted points, using fallback location");
            return Ok(SitingEstimate {
                location: self.config.fallback,
                demand_points,
                supply_points,
                used_fallback: true,
            });
        }

        let location = weighted_centroid(&weighted)?;
        debug!(demand_points, supply_points, ?location, "estimated optimal site");

        Ok(SitingEstimate {
            location,
            demand_points,
            supply_points,
            used_fallback: false,
        })
    }
}

/// Optimal site using the stock calibration constants.
///
/// Returns the center of the contiguous United States (39.8283, -98.5795)
/// when there is nothing to weigh.
///
/// # Example
/// ```
/// use h2map_geo::{optimal_location, Coordinate, DemandCenter};
///
/// let site = optimal_location(&[DemandCenter::new(Coordinate::new(40.0, -100.0), 200.0)], &[]).unwrap();
/// assert_eq!(site, Coordinate::new(40.0, -100.0));
///
/// assert_eq!(optimal_location(&[], &[]).unwrap(), Coordinate::new(39.8283, -98.5795));
/// ```
pub fn optimal_location(
    demand_centers: &[DemandCenter],
    renewable_sources: &[RenewableSource],
) -> Result<Coordinate> {
    SitingEstimator::default()
        .estimate(demand_centers, renewable_sources)
        .map(|e| e.location)
}

/// `ceil(value / divisor)`, the number of points a record stands for.
///
/// Kept as `f64`: demand and capacity are unbounded, so the count can exceed
/// any integer type.
fn replication(value: f64, divisor: f64, what: &str) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(GeoError::invalid(format!("{} must be a finite number >= 0, got {}", what, value)));
    }
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(GeoError::invalid(format!("{} divisor must be > 0, got {}", what, divisor)));
    }
    let copies = (value / divisor).ceil();
    if !copies.is_finite() {
        return Err(GeoError::invalid(format!(
            "{} of {} overflows at {} units per point",
            what, value, divisor
        )));
    }
    Ok(copies)
}
