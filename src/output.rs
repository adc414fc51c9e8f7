use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::{FinderError, Result};
use crate::profile::ResultRecord;
use crate::TARGET_IO;

/// Write the full result list as a pretty-printed JSON array, creating any
/// missing parent directories. An empty slice still produces `[]`.
pub fn write_results(path: &Path, records: &[ResultRecord]) -> Result<()> {
    let write_err = |source: std::io::Error| FinderError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .map_err(|err| write_err(err.into()))?;
    writer.write_all(b"\n").map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    info!(
        target: TARGET_IO,
        "Wrote {} result records to {}",
        records.len(),
        path.display()
    );
    Ok(())
}
