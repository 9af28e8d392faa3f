pub mod config;
pub mod extract;
pub mod fetch;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod throttle;

pub use config::Config;
pub use extract::{extract_row, Row, COLUMNS};
pub use fetch::{EnrichmentClient, Lookup, LookupError};
pub use pipeline::{enrich, run, run_with, RunSummary};
pub use throttle::{FixedDelay, Pacer};

#[cfg(test)]
mod test_support;
