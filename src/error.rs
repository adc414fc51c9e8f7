//! Error types for the profile finder.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for profile finder operations.
pub type Result<T> = std::result::Result<T, FinderError>;

/// Failures that stop a run. Per-entry problems never end up here; they are
/// reported as `error` result records instead.
#[derive(Error, Debug)]
pub enum FinderError {
    /// Settings resource is missing
    #[error("Settings file not found at {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Settings resource exists but is not valid JSON for our schema
    #[error("Failed to parse settings file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    /// Log directory or file could not be prepared
    #[error("Failed to set up log file {}: {source}", path.display())]
    Logging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input names file is missing
    #[error("Input file not found at {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reference profile data could not be parsed
    #[error("Invalid profile data in {}: {source}", path.display())]
    ProfileData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Output destination could not be created or written
    #[error("Failed to write results to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
