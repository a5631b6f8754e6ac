//! Command-line interface parsing for the deals cache updater
//!
//! This module handles parsing of CLI arguments using clap. With no flags
//! the tool behaves exactly like the original hard-coded script; the
//! optional overrides exist so the updater can be pointed at another sheet
//! or directory without rebuilding.

use std::path::PathBuf;

use clap::Parser;

use crate::cache::UpdaterConfig;

/// Deals cache updater - fetch the deals spreadsheet and refresh the local cache
#[derive(Parser, Debug)]
#[command(name = "dealcache")]
#[command(about = "Fetch the deals spreadsheet CSV and refresh the local cache")]
#[command(version)]
pub struct Cli {
    /// Spreadsheet export URL to fetch (defaults to the published deals sheet)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Directory to write deals.csv and deals-metadata.json into
    /// (defaults to public/cached-data under the working directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    /// Builds the updater configuration, layering CLI overrides over the
    /// built-in defaults.
    pub fn to_config(&self) -> UpdaterConfig {
        let mut config = UpdaterConfig::default();
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.cache_dir = dir.clone();
        }
        config
    }
}
