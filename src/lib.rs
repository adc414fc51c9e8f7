pub mod app;
pub mod batch;
pub mod entries;
pub mod error;
pub mod logging;
pub mod output;
pub mod profile;
pub mod query;
pub mod settings;

pub use error::{FinderError, Result};

pub const TARGET_BATCH: &str = "batch";
pub const TARGET_IO: &str = "file_io";

/// A single line of input: who to look up, plus optional disambiguators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    pub name: String,
    pub company: Option<String>,
    pub position: Option<String>,
    // 1-based line number in the source file
    pub line: usize,
}

impl LookupRequest {
    pub fn new(name: &str) -> Self {
        LookupRequest {
            name: name.to_string(),
            company: None,
            position: None,
            line: 0,
        }
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = Some(company.to_string());
        self
    }

    pub fn with_position(mut self, position: &str) -> Self {
        self.position = Some(position.to_string());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}
