// src/output/csv_writer.rs

use anyhow::{Context, Result};
use std::path::Path;

use crate::extract::{Row, COLUMNS};

/// Header row plus one record per row. The header is written even when
/// `rows` is empty.
pub fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(COLUMNS.iter()).context("writing CSV header")?;
    for row in rows {
        wtr.write_record(row.values())
            .with_context(|| format!("writing CSV row for EIN {}", row.ein()))?;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}
