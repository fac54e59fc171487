//! Configuration loading and schema definitions
//!
//! Tuning knobs for the buffer, clustering and siting components. Every field
//! has a default, so an empty file (or no file) gives the stock behaviour.

mod loader;
mod schema;

pub use loader::GeoConfig;
pub use schema::*;
