use anyhow::Result;
use candid_enrich::{pipeline, Config};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) .env first, so RUST_LOG set there reaches the filter ─────
    let dotenv = dotenvy::dotenv();

    // ─── 2) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    if let Ok(path) = &dotenv {
        debug!(path = %path.display(), "loaded .env");
    }

    // ─── 3) configuration (fatal before any file or network I/O) ─────
    let config = Config::from_env()?;
    info!(?config, "startup");

    // ─── 4) enrich every EIN, one call at a time ─────────────────────
    let summary = pipeline::run(&config)?;

    info!(%summary, "run finished");
    println!(
        "Data extraction complete. Results saved to {}.",
        config.output_path.display()
    );
    Ok(())
}
