//! Error types for validation, loading, and the persisted budget store
//!
//! The projection engine itself never fails: every error here is raised
//! either before a calculation (validation) or at an I/O boundary.

use thiserror::Error;

/// Input rejected before any calculation runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("yearly cap {cap} is below the base contribution {base}")]
    CapBelowBase { cap: f64, base: f64 },

    #[error("scheduled event in year {year} falls outside the projection (1..={last_year})")]
    EventOutOfRange { year: u32, last_year: u32 },

    #[error("extension of {years} years must be a multiple of {block} years")]
    ExtensionBlock { years: u32, block: u32 },
}

/// Failure reading scenario or parameter files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: unknown {field} `{value}`")]
    UnknownVariant {
        row: usize,
        field: &'static str,
        value: String,
    },
}

/// Failure writing persisted state
///
/// Reads never produce this error: corrupt or missing state falls back to
/// defaults instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
