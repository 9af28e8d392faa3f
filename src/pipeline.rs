// src/pipeline.rs

use anyhow::Result;
use std::{
    fmt,
    path::Path,
    time::{Duration, Instant},
};
use tracing::{error, info, instrument, warn};

use crate::{
    config::Config,
    extract::{extract_row, Row},
    fetch::{EnrichmentClient, Lookup},
    input::read_identifiers,
    output::{output_file_name, write_rows, OutputFormat},
    throttle::{FixedDelay, Pacer},
};

/// Tally of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub enriched: usize,
    pub no_data: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} identifiers: {} enriched, {} without data, {} failed in {:.1?}",
            self.total, self.enriched, self.no_data, self.failed, self.elapsed
        )
    }
}

/// Look up every identifier in order and flatten the ones that came back with
/// data. Failures and empty answers are logged and skipped; the pacer runs
/// after every attempt.
pub fn enrich<L, P>(eins: &[String], lookup: &L, pacer: &mut P) -> (Vec<Row>, RunSummary)
where
    L: Lookup + ?Sized,
    P: Pacer + ?Sized,
{
    let start = Instant::now();
    let mut rows = Vec::with_capacity(eins.len());
    let mut summary = RunSummary {
        total: eins.len(),
        ..RunSummary::default()
    };

    for (i, ein) in eins.iter().enumerate() {
        match lookup.lookup(ein) {
            Ok(Some(data)) => {
                rows.push(extract_row(ein, &data));
                summary.enriched += 1;
                info!(ein = %ein, n = i + 1, of = eins.len(), "enriched");
            }
            Ok(None) => {
                summary.no_data += 1;
                warn!(ein = %ein, "No data found for EIN {}", ein);
            }
            Err(e) => {
                summary.failed += 1;
                error!(ein = %ein, error = %e, "Error fetching data for EIN {}", ein);
            }
        }
        pacer.pause();
    }

    summary.elapsed = start.elapsed();
    (rows, summary)
}

/// Read identifiers from `input`, enrich them, and write the table to
/// `output`. A bad output path or unreadable input aborts before any lookup
/// is made.
pub fn run_with<L, P>(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    lookup: &L,
    pacer: &mut P,
) -> Result<RunSummary>
where
    L: Lookup + ?Sized,
    P: Pacer + ?Sized,
{
    output_file_name(output)?;
    let eins = read_identifiers(input)?;
    let (rows, summary) = enrich(&eins, lookup, pacer);
    write_rows(output, format, &rows)?;
    Ok(summary)
}

/// Full run against the live API as described by `config`.
#[instrument(level = "info", skip_all, fields(input = %config.input_path.display(), output = %config.output_path.display()))]
pub fn run(config: &Config) -> Result<RunSummary> {
    let client = EnrichmentClient::from_config(config)?;
    let mut pacer = FixedDelay::new(config.request_delay);
    run_with(
        &config.input_path,
        &config.output_path,
        config.output_format,
        &client,
        &mut pacer,
    )
}
