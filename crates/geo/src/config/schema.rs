//! Configuration schema definitions

use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// Buffer polygon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Vertices per buffer ring (at least 32)
    #[serde(default = "default_segments")]
    pub segments: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            segments: default_segments(),
        }
    }
}

fn default_segments() -> usize {
    crate::DEFAULT_BUFFER_SEGMENTS
}

/// Clustering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Upper bound on assign/update rounds
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_max_iterations() -> usize {
    100
}

/// Siting estimator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitingConfig {
    /// Demand units represented by one weighted point
    #[serde(default = "default_demand_units")]
    pub demand_units_per_point: f64,

    /// Capacity units represented by one weighted point
    #[serde(default = "default_capacity_units")]
    pub capacity_units_per_point: f64,

    /// Location returned when there is nothing to weigh
    #[serde(default = "default_fallback")]
    pub fallback: Coordinate,
}

impl Default for SitingConfig {
    fn default() -> Self {
        Self {
            demand_units_per_point: default_demand_units(),
            capacity_units_per_point: default_capacity_units(),
            fallback: default_fallback(),
        }
    }
}

fn default_demand_units() -> f64 {
    100.0
}

fn default_capacity_units() -> f64 {
    50.0
}

/// Geographic center of the contiguous United States.
fn default_fallback() -> Coordinate {
    Coordinate::new(39.8283, -98.5795)
}
