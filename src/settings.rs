use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{BatchConfig, DEFAULT_WORKERS};
use crate::error::{FinderError, Result};

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";
pub const DEFAULT_INPUT_FILE: &str = "data/input_names.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "data/results.json";

/// Log file named after today's date, e.g. `data/logs/run_2025-11-11.log`
pub fn default_log_file() -> String {
    format!(
        "data/logs/run_{}.log",
        chrono::Local::now().format("%Y-%m-%d")
    )
}

/// Contents of the settings resource. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_file: String,
    pub output_file: String,
    pub log_file: String,
    pub default_language: Option<String>,
    pub max_workers: usize,
    pub profiles_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_file: DEFAULT_INPUT_FILE.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            log_file: default_log_file(),
            default_language: None,
            max_workers: DEFAULT_WORKERS,
            profiles_file: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FinderError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let data = fs::read_to_string(path).map_err(|source| FinderError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&data).map_err(|source| FinderError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line overrides on top of the file settings.
    pub fn resolve(&self, overrides: &Overrides) -> Result<RunConfig> {
        let preferred_language = overrides
            .language
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or_else(|| self.default_language.clone());
        let workers = overrides.workers.unwrap_or(self.max_workers);

        Ok(RunConfig {
            input_path: overrides
                .input_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(&self.input_file)),
            output_path: overrides
                .output_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(&self.output_file)),
            log_path: PathBuf::from(&self.log_file),
            profiles_path: self.profiles_file.as_ref().map(PathBuf::from),
            batch: BatchConfig::new(preferred_language, workers)?,
        })
    }
}

/// Values supplied on the command line; `None` defers to the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub language: Option<String>,
    pub workers: Option<usize>,
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    pub profiles_path: Option<PathBuf>,
    pub batch: BatchConfig,
}
