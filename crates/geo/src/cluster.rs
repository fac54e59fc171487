//! K-means style spatial clustering.
//!
//! Groups map points so that dense areas can be drawn as one aggregated
//! marker.
//!
//! # Algorithm
//!
//! 1. Pick `k` (by default `max(1, n / 3)`, so clusters average about three members)
//! 2. **Seed**: center `i` starts at input point `i * n / k` (evenly spaced through the input)
//! 3. **Assign**: each point goes to its nearest center by great-circle distance,
//!    ties to the lower center index
//! 4. **Update**: each center moves to the centroid of its points; a center
//!    that lost all its points stays where it was
//! 5. Repeat until no point changes cluster, or `max_iterations` rounds have run
//!
//! Seeding is fixed, so the same input always produces the same clusters.
//! Clusters that end up empty are dropped from the result.

use crate::config::ClusterConfig;
use crate::{centroid, haversine_distance, Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How many clusters to aim for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterCount {
    /// `max(1, n / 3)` clusters for `n` points.
    #[default]
    Auto,
    /// A caller-chosen count, capped at the number of points.
    Fixed(usize),
}

impl ClusterCount {
    fn resolve(self, n: usize) -> Result<usize> {
        match self {
            ClusterCount::Auto => Ok((n / 3).max(1)),
            ClusterCount::Fixed(0) => Err(GeoError::invalid("cluster count must be >= 1")),
            ClusterCount::Fixed(k) => Ok(k.min(n).max(1)),
        }
    }
}

/// One non-empty group of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Centroid of the members
    pub center: Coordinate,
    /// Member points, in input order
    pub members: Vec<Coordinate>,
    /// Input positions of the members
    pub indices: Vec<usize>,
}

/// Result of a clustering run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clustering {
    /// Non-empty clusters, in center order
    pub clusters: Vec<Cluster>,
    /// Assign/update rounds that ran
    pub iterations: usize,
    /// Whether assignments settled before the iteration cap
    pub converged: bool,
}

impl Clustering {
    /// Just the member groups.
    pub fn into_groups(self) -> Vec<Vec<Coordinate>> {
        self.clusters.into_iter().map(|c| c.members).collect()
    }
}

/// K-means style clusterer over geographic points.
#[derive(Debug, Clone)]
pub struct SpatialClusterer {
    count: ClusterCount,
    max_iterations: usize,
}

impl Default for SpatialClusterer {
    fn default() -> Self {
        Self::new(ClusterCount::Auto)
    }
}

impl SpatialClusterer {
    /// Create a clusterer with the default iteration cap.
    pub fn new(count: ClusterCount) -> Self {
        Self {
            count,
            max_iterations: ClusterConfig::default().max_iterations,
        }
    }

    /// Create a clusterer from configuration.
    pub fn from_config(count: ClusterCount, config: &ClusterConfig) -> Self {
        Self::new(count).with_max_iterations(config.max_iterations)
    }

    /// Set the iteration cap (at least one round always runs).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Partition `points` into clusters.
    ///
    /// Every input point lands in exactly one cluster. Empty input gives an
    /// empty, converged result.
    ///
    /// # Errors
    /// `InvalidArgument` for `ClusterCount::Fixed(0)`.
    #[instrument(skip_all, fields(n = points.len()))]
    pub fn fit(&self, points: &[Coordinate]) -> Result<Clustering> {
        let n = points.len();
        let k = self.count.resolve(n)?;

        if n == 0 {
            return Ok(Clustering {
                clusters: Vec::new(),
                iterations: 0,
                converged: true,
            });
        }

        let mut centers: Vec<Coordinate> = (0..k).map(|i| points[i * n / k]).collect();
        debug!(k, max_iterations = self.max_iterations, "seeded evenly spaced centers");

        let mut labels = vec![usize::MAX; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            let next = assign(points, &centers);
            let moved = labels.iter().zip(&next).filter(|(a, b)| a != b).count();
            labels = next;
            trace!(iteration = iterations, moved, "assignment round");

            if moved == 0 {
                converged = true;
                break;
            }

            for (c, center) in centers.iter_mut().enumerate() {
                let members = members_of(points, &labels, c);
                if let Ok(mean) = centroid(&members) {
                    *center = mean;
                }
            }
        }

        if converged {
            debug!(iterations, "clustering converged");
        } else {
            debug!(iterations, "clustering hit the iteration cap");
        }

        let mut clusters = Vec::with_capacity(k);
        for c in 0..k {
            let indices: Vec<usize> = (0..n).filter(|&i| labels[i] == c).collect();
            if indices.is_empty() {
                continue;
            }
            let members: Vec<Coordinate> = indices.iter().map(|&i| points[i]).collect();
            let center = centroid(&members)?;
            clusters.push(Cluster { center, members, indices });
        }

        Ok(Clustering {
            clusters,
            iterations,
            converged,
        })
    }
}

/// Partition `points` into groups of nearby points.
///
/// With [`ClusterCount::Auto`] this never fails.
///
/// # Example
/// ```
/// use h2map_geo::{cluster, ClusterCount, Coordinate};
///
/// let points = vec![
///     Coordinate::new(29.76, -95.37),
///     Coordinate::new(29.80, -95.40),
///     Coordinate::new(29.70, -95.30),
///     Coordinate::new(47.60, -122.33),
///     Coordinate::new(47.65, -122.30),
///     Coordinate::new(47.55, -122.35),
/// ];
///
/// let groups = cluster(&points, ClusterCount::Auto).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].len(), 3);
/// ```
pub fn cluster(points: &[Coordinate], count: ClusterCount) -> Result<Vec<Vec<Coordinate>>> {
    Ok(SpatialClusterer::new(count).fit(points)?.into_groups())
}

/// Index of the nearest center for every point.
fn assign(points: &[Coordinate], centers: &[Coordinate]) -> Vec<usize> {
    #[cfg(feature = "parallel")]
    {
        points.par_iter().map(|p| nearest_center(p, centers)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points.iter().map(|p| nearest_center(p, centers)).collect()
    }
}

#[inline]
fn nearest_center(point: &Coordinate, centers: &[Coordinate]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, center) in centers.iter().enumerate() {
        let d = haversine_distance(point, center);
        // strict `<` keeps the lower index on ties
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

fn members_of(points: &[Coordinate], labels: &[usize], c: usize) -> Vec<Coordinate> {
    points
        .iter()
        .zip(labels)
        .filter(|(_, l)| **l == c)
        .map(|(p, _)| *p)
        .collect()
}
