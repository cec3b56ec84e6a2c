//! Error types for the explorer core.
//!
//! Two kinds of failure exist:
//! - a malformed bundled dataset, which is fatal at startup
//! - precondition violations from the calling shell (unknown feature or
//!   species name, inverted range, bin count outside `5..=50`)
//!
//! Empty selections and empty matches are not errors.

use thiserror::Error;

/// Result alias used across the core.
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[derive(Error, Debug)]
pub enum ExplorerError {
    /// A feature name that is not one of the four dataset columns
    #[error("Unknown feature: '{0}'")]
    UnknownFeature(String),

    /// A category name that is not one of the three species
    #[error("Unknown species: '{0}'")]
    UnknownSpecies(String),

    /// Range with `low > high` or a non-finite bound
    #[error("Invalid value range: [{low}, {high}]")]
    InvalidRange { low: f64, high: f64 },

    /// Histogram bin count outside the accepted interval
    #[error("Bin count {count} outside {min}..={max}")]
    InvalidBinCount { count: usize, min: usize, max: usize },

    /// Bundled data failed validation
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
