// src/output/mod.rs

use anyhow::{anyhow, bail, Context, Result};
use std::{
    fs,
    path::{Path, MAIN_SEPARATOR},
    str::FromStr,
};
use tracing::info;

use crate::extract::Row;

pub mod csv_writer;
pub mod parquet_writer;

pub use csv_writer::write_csv;
pub use parquet_writer::write_parquet;

/// File format of the result table. CSV unless Parquet is asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            other => bail!("unknown output format {:?} (expected csv or parquet)", other),
        }
    }
}

/// File name of the output path, or an error if the path cannot name a file
/// (empty, `.`/`..`, or ending in a separator).
pub fn output_file_name(path: &Path) -> Result<&str> {
    let raw = path.as_os_str().to_string_lossy();
    if raw.trim().is_empty() {
        bail!("output path is empty");
    }
    if raw.ends_with(['/', MAIN_SEPARATOR]) {
        bail!("output path {} names a directory, not a file", path.display());
    }
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("output path {} has no file name", path.display()))
}

/// Write `rows` to `path` as `format`, replacing whatever is there.
///
/// Data goes to a hidden temp file beside the target first and is renamed over
/// it once complete, so a failed run never leaves a truncated table behind.
pub fn write_rows<P: AsRef<Path>>(
    path: P,
    format: OutputFormat,
    rows: &[Row],
) -> Result<()> {
    let path = path.as_ref();
    let file_name = output_file_name(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));
    let written = match format {
        OutputFormat::Csv => write_csv(&tmp_path, rows),
        OutputFormat::Parquet => write_parquet(&tmp_path, rows),
    };
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.context(format!("writing {}", path.display())));
    }

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    info!(path = %path.display(), ?format, rows = rows.len(), "wrote output");
    Ok(())
}
