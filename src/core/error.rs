//! Error types for plan validation and input loading

use std::path::PathBuf;
use thiserror::Error;

/// Input-shape failures that make validation impossible.
///
/// Everything else a plan can get wrong is reported as a message inside the
/// [`ValidationReport`](crate::core::validator::ValidationReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A quarter name does not follow the `Season-Year` format.
    #[error("invalid quarter name '{name}': {reason}")]
    InvalidQuarterName {
        /// The offending quarter name
        name: String,
        /// Why it could not be parsed
        reason: String,
    },
}

/// Failures while reading catalog, plan, or requirement files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for the expected shape.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// File being parsed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for validation calls.
pub type PlanResult<T> = Result<T, PlanError>;
