//! Configuration file loading

use super::schema::{BufferConfig, ClusterConfig, SitingConfig};
use crate::polygon::MIN_BUFFER_SEGMENTS;
use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Root configuration
///
/// ```toml
/// [buffer]
/// segments = 64
///
/// [cluster]
/// max_iterations = 100
///
/// [siting]
/// demand_units_per_point = 100.0
/// capacity_units_per_point = 50.0
/// fallback = { lat = 39.8283, lng = -98.5795 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoConfig {
    #[serde(default)]
    pub buffer: BufferConfig,

    #[serde(default)]
    pub cluster: ClusterConfig,

    #[serde(default)]
    pub siting: SitingConfig,
}

impl GeoConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeoConfig = toml::from_str(content)
            .map_err(|e| GeoError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeoError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            GeoError::Config(msg) => GeoError::Config(format!("{} ({})", msg, path.display())),
            other => other,
        })?;

        debug!(path = %path.display(), "loaded geo config");
        Ok(config)
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.buffer.segments < MIN_BUFFER_SEGMENTS {
            return Err(GeoError::Config(format!(
                "buffer.segments must be >= {}, got {}",
                MIN_BUFFER_SEGMENTS, self.buffer.segments
            )));
        }

        if self.cluster.max_iterations == 0 {
            return Err(GeoError::Config("cluster.max_iterations must be >= 1".into()));
        }

        for (name, value) in [
            ("siting.demand_units_per_point", self.siting.demand_units_per_point),
            ("siting.capacity_units_per_point", self.siting.capacity_units_per_point),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeoError::Config(format!("{} must be > 0, got {}", name, value)));
            }
        }

        if !self.siting.fallback.is_valid() {
            return Err(GeoError::Config(format!(
                "siting.fallback is not a valid coordinate: {:?}",
                self.siting.fallback
            )));
        }

        Ok(())
    }
}
