use anyhow::Context;
use clap::Parser;
use geobatch::cli::Cli;
use geobatch::{GeocodioClient, Pipeline, RunLog};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config();

    let log = RunLog::to_file(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
    let client = GeocodioClient::with_endpoint(&config.api_url, &config.api_key)
        .context("Failed to build geocoding client")?;

    let mut pipeline = Pipeline::new(client, log);
    let summary = pipeline
        .run(&config.input, &config.output)
        .with_context(|| {
            format!(
                "Geocoding {} failed. Check {} for more details",
                config.input.display(),
                config.log_file.display()
            )
        })?;

    println!(
        "✓ Geocoded {} records in {} batches ({} unmatched) → {}",
        summary.records,
        summary.batches,
        summary.unmatched,
        summary.output.display()
    );

    Ok(())
}
