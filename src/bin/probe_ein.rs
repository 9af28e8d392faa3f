use candid_enrich::{extract_row, fetch::data_section, fetch::lookup_url, Config, EnrichmentClient};
use std::{env, process::exit};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Expect exactly one CLI argument: the EIN to look up.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <EIN>", args[0]);
        exit(2);
    }
    let ein = args[1].trim();

    let _ = dotenvy::dotenv();
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .try_init();

    if let Err(e) = show(ein) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

/// Fetch one profile and print the raw response next to the row it flattens to.
fn show(ein: &str) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let client = EnrichmentClient::from_config(&config)?;

    if let Some(url) = lookup_url(client.base_url(), ein) {
        println!("GET {}", url);
    }

    let body = client.fetch_body(ein)?;
    println!("=== response ===");
    println!("{}", serde_json::to_string_pretty(&body)?);
    println!();

    let Some(data) = data_section(body) else {
        println!("No data found for EIN {}", ein);
        return Ok(());
    };

    println!("=== row ===");
    for (column, value) in extract_row(ein, &data).labelled() {
        println!("{}: {}", column, value);
    }
    Ok(())
}
