// src/output/parquet_writer.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{fs::File, path::Path, sync::Arc};

use crate::extract::{Row, COLUMNS};

/// Every column is a non-null Utf8 column; empty cells are empty strings.
pub fn output_schema() -> Schema {
    Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    )
}

/// Write `rows` as a single Snappy-compressed record batch.
pub fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(output_schema());

    let arrays: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|col| {
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.values()[col].as_str()),
            )) as ArrayRef
        })
        .collect();

    let batch =
        RecordBatch::try_new(Arc::clone(&schema), arrays).context("building output record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer =
        ArrowWriter::try_new(file, schema, Some(props)).context("creating Arrow writer")?;
    writer.write(&batch).context("writing output batch")?;
    writer.close().context("closing Arrow writer")?;
    Ok(())
}
