//! Deals Cache Updater - fetch the deals spreadsheet and refresh the cache
//!
//! A single-shot CLI tool meant to run from a scheduled job: it downloads
//! the published CSV export, rewrites the cached file pair with a fresh
//! retrieval marker, and exits. Any failure terminates the process with a
//! non-zero status so the scheduler can flag the run.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dealcache::cache::CacheUpdater;
use dealcache::cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let updater = CacheUpdater::new(cli.to_config());

    match updater.update().await {
        Ok(outcome) => {
            tracing::info!("cache updated successfully");
            tracing::info!(path = %outcome.csv_path.display(), "CSV file written");
            tracing::info!(path = %outcome.metadata_path.display(), "metadata written");
            tracing::info!(
                data_bytes = outcome.metadata.data_length,
                final_bytes = outcome.metadata.final_file_size,
                content_changed = outcome.content_changed,
                timestamp = %outcome.metadata.last_updated,
                "run summary"
            );
        }
        Err(err) => {
            tracing::error!("cache update failed: {err}");
            process::exit(1);
        }
    }
}
