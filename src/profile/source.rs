use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use super::types::ProfileRecord;
use super::TARGET_LOOKUP;
use crate::error::{FinderError, Result};

/// A profile source could not produce its records.
#[derive(Error, Debug, Clone)]
#[error("profile source unavailable: {0}")]
pub struct SourceError(pub String);

/// Where reference profiles come from. The matcher only needs an ordered,
/// read-only view of the collection; order is significant for tie-breaks.
pub trait ProfileSource: Send + Sync {
    fn profiles(&self) -> std::result::Result<&[ProfileRecord], SourceError>;
}

/// In-memory reference collection, fixed after construction.
#[derive(Debug, Clone, Default)]
pub struct StaticProfileSource {
    records: Vec<ProfileRecord>,
}

impl StaticProfileSource {
    pub fn new(records: Vec<ProfileRecord>) -> Self {
        Self { records }
    }

    /// The sample dataset used when no profiles file is configured.
    pub fn builtin() -> Self {
        Self::new(vec![
            ProfileRecord::new("John Malkovich")
                .with_company("Malkovich Enterprises")
                .with_url("https://www.linkedin.com/in/john-malkovich-374ab741")
                .with_position("CEO - Malkovich")
                .with_language("English"),
            ProfileRecord::new("Jane Doe")
                .with_company("Acme Corp")
                .with_url("https://www.linkedin.com/in/jane-doe-acme")
                .with_position("Head of Growth")
                .with_language("English"),
            ProfileRecord::new("Carlos García")
                .with_company("DataVision")
                .with_url("https://www.linkedin.com/in/carlos-garcia-datavis")
                .with_position("Data Scientist")
                .with_language("Spanish"),
        ])
    }

    /// Load a JSON array of profile records, keeping file order.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| FinderError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<ProfileRecord> =
            serde_json::from_str(&data).map_err(|source| FinderError::ProfileData {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            target: TARGET_LOOKUP,
            "Loaded {} reference profiles from {}",
            records.len(),
            path.display()
        );

        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ProfileSource for StaticProfileSource {
    fn profiles(&self) -> std::result::Result<&[ProfileRecord], SourceError> {
        Ok(&self.records)
    }
}
