//! Input loading for the batch.
//!
//! Each non-empty, non-comment line is one of:
//! - `Name`
//! - `Name|Company`
//! - `Name|Company|Position`
//!
//! Positions are free text and may contain `|` themselves, so everything
//! after the second delimiter is treated as the position.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{FinderError, Result};
use crate::{LookupRequest, TARGET_IO};

const COMMENT_MARKER: char = '#';
const FIELD_DELIMITER: char = '|';

/// Outcome of parsing a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Entry {
        name: String,
        company: Option<String>,
        position: Option<String>,
    },
    /// Blank line or comment
    Skip,
    /// Line has content but no name
    MissingName,
}

fn non_empty(field: &str) -> Option<String> {
    let field = field.trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

pub fn parse_line(raw: &str) -> ParsedLine {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        return ParsedLine::Skip;
    }

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    let name = fields.first().and_then(|f| non_empty(f));
    let company = fields.get(1).and_then(|f| non_empty(f));
    let position = if fields.len() > 2 {
        non_empty(&fields[2..].join("|"))
    } else {
        None
    };

    match name {
        Some(name) => ParsedLine::Entry {
            name,
            company,
            position,
        },
        None => ParsedLine::MissingName,
    }
}

/// Parse lookup requests from any line-oriented reader.
pub fn parse_entries<R: BufRead>(reader: R) -> Result<Vec<LookupRequest>> {
    let mut entries = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| FinderError::Read {
            path: "<input>".into(),
            source,
        })?;

        match parse_line(&line) {
            ParsedLine::Entry {
                name,
                company,
                position,
            } => entries.push(LookupRequest {
                name,
                company,
                position,
                line: line_no,
            }),
            ParsedLine::MissingName => {
                warn!(target: TARGET_IO, "Skipping empty name at line {}", line_no);
            }
            ParsedLine::Skip => {}
        }
    }

    Ok(entries)
}

/// Load lookup requests from a names file.
pub fn load_entries(path: &Path) -> Result<Vec<LookupRequest>> {
    if !path.is_file() {
        return Err(FinderError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| FinderError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_entries(BufReader::new(file)).map_err(|err| match err {
        FinderError::Read { source, .. } => FinderError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    info!(
        target: TARGET_IO,
        "Loaded {} entries from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}
