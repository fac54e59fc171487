//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// An argument is outside its valid domain (non-positive radius,
    /// degenerate polygon, negative weight, non-finite value).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation that needs at least one point received none.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// GeoJSON value with the wrong shape
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    /// Invalid WKT format
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Numeric error codes exposed to callers that cannot match on the enum
/// (the browser bindings, mostly).
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid argument
    InvalidArgument = 10001,
    /// Empty input
    EmptyInput = 10002,
    /// Invalid GeoJSON
    InvalidGeoJson = 10003,
    /// Invalid WKT format
    InvalidWkt = 10004,
    /// Configuration error
    Config = 10005,
    /// JSON parsing error
    JsonParsing = 10006,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidArgument(_) => GeoErrorCode::InvalidArgument,
            GeoError::EmptyInput(_) => GeoErrorCode::EmptyInput,
            GeoError::InvalidGeoJson(_) => GeoErrorCode::InvalidGeoJson,
            GeoError::InvalidWkt(_) => GeoErrorCode::InvalidWkt,
            GeoError::Config(_) => GeoErrorCode::Config,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GeoError::InvalidArgument(msg.into())
    }
}
