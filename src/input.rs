// src/input.rs

use anyhow::{anyhow, Context, Result};
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info, warn};

/// Header of the column holding the identifiers.
pub const EIN_COLUMN: &str = "EIN";

/// Load identifiers from the `EIN` column of the CSV at `path`, in file order.
pub fn read_identifiers<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening input {}", path.display()))?;
    let eins = identifiers_from_reader(file)
        .with_context(|| format!("reading identifiers from {}", path.display()))?;
    info!(path = %path.display(), count = eins.len(), "loaded identifiers");
    Ok(eins)
}

/// Pull the `EIN` column out of any CSV source. Other columns are ignored and
/// rows may be ragged; a blank identifier cell is skipped.
pub fn identifiers_from_reader<R: Read>(rdr: R) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);

    let headers = reader.headers().context("reading header row")?.clone();
    let idx = headers
        .iter()
        .position(|h| h.trim() == EIN_COLUMN)
        .ok_or_else(|| anyhow!("CSV file must contain an '{}' column", EIN_COLUMN))?;

    let mut out = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("parsing data row {}", line + 1))?;
        match record.get(idx).map(str::trim) {
            Some(ein) if !ein.is_empty() => out.push(ein.to_string()),
            _ => warn!(row = line + 1, "blank EIN, skipping row"),
        }
    }
    debug!(count = out.len(), "identifiers parsed");
    Ok(out)
}
