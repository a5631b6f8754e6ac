//! Cache updater for the deals CSV snapshot
//!
//! Provides a `CacheUpdater` that downloads the spreadsheet export and
//! rewrites the cached file pair (`deals.csv` plus a JSON metadata sidecar)
//! on every run, appending a unique retrieval marker and forcing file
//! timestamps forward so version control always registers an update.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use filetime::FileTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::fetch::{FetchError, SheetClient};
use crate::marker;

/// Published CSV export URL for the deals spreadsheet
pub const DEALS_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/10qd9IhTdrq_vZzGFDkwxcio8hH48LZu9npaWespygTs/export?format=csv&gid=806431249&single=true&output";

/// Default cache directory, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = "public/cached-data";

/// Label recorded in the metadata sidecar for this data source
pub const SOURCE_LABEL: &str = "Google Sheets CSV";

/// File name of the cached CSV snapshot
const CSV_FILE_NAME: &str = "deals.csv";

/// File name of the JSON metadata sidecar
const METADATA_FILE_NAME: &str = "deals-metadata.json";

/// Errors that can occur while updating the cache
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Downloading or validating the CSV export failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A filesystem operation failed (directory creation, read, write,
    /// or timestamp update)
    #[error("filesystem operation failed: {0}")]
    Io(#[from] io::Error),

    /// The metadata record could not be serialized
    #[error("failed to serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Source of the current instant
///
/// Injected into `CacheUpdater` so tests can pin the timestamp and assert
/// exact snapshot bytes.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of per-run retrieval identifiers
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Production id generator producing random UUID v4 strings
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Configuration for a cache update run
///
/// `Default` reproduces the fixed constants of the original tooling: the
/// published spreadsheet URL, a `public/cached-data` directory under the
/// working directory, and the "Google Sheets CSV" source label.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Spreadsheet export URL to fetch
    pub url: String,
    /// Directory the file pair is written into
    pub cache_dir: PathBuf,
    /// Source label recorded in the metadata sidecar
    pub source: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            url: DEALS_CSV_URL.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            source: SOURCE_LABEL.to_string(),
        }
    }
}

/// Metadata sidecar describing a single retrieval
///
/// Serialized as pretty-printed JSON with camelCase keys next to the CSV
/// snapshot it describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Retrieval instant as an ISO-8601 string with millisecond precision
    pub last_updated: String,
    /// Retrieval instant as epoch milliseconds
    pub timestamp: i64,
    /// Unique id distinguishing this cache generation
    pub retrieval_id: String,
    /// Fixed source label
    pub source: String,
    /// URL the data was fetched from
    pub url: String,
    /// Byte length of the raw fetched text
    pub data_length: usize,
    /// Byte length of the written snapshot including the marker line
    pub final_file_size: usize,
}

/// Result of a successful cache update
#[derive(Debug)]
pub struct UpdateOutcome {
    /// Path of the written CSV snapshot
    pub csv_path: PathBuf,
    /// Path of the written metadata sidecar
    pub metadata_path: PathBuf,
    /// Whether the fetched content differed from the previous snapshot
    pub content_changed: bool,
    /// The metadata record that was written
    pub metadata: SnapshotMetadata,
}

/// Downloads the deals CSV and rewrites the cached file pair
///
/// Every run overwrites both files wholesale and appends a fresh retrieval
/// marker, so successive snapshots always differ at the byte level even
/// when the spreadsheet content is identical.
pub struct CacheUpdater {
    config: UpdaterConfig,
    client: SheetClient,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl CacheUpdater {
    /// Creates a new CacheUpdater with the system clock and random UUIDs
    pub fn new(config: UpdaterConfig) -> Self {
        Self {
            config,
            client: SheetClient::new(),
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
        }
    }

    /// Replaces the HTTP client
    pub fn with_client(mut self, client: SheetClient) -> Self {
        self.client = client;
        self
    }

    /// Replaces the clock used for timestamps
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the retrieval id generator
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Path of the cached CSV snapshot
    pub fn csv_path(&self) -> PathBuf {
        self.config.cache_dir.join(CSV_FILE_NAME)
    }

    /// Path of the metadata sidecar
    pub fn metadata_path(&self) -> PathBuf {
        self.config.cache_dir.join(METADATA_FILE_NAME)
    }

    /// Fetches the CSV export and rewrites the cached file pair
    ///
    /// # Returns
    /// * `Ok(UpdateOutcome)` - Both files written and restamped
    /// * `Err(UpdateError)` - If the fetch or any filesystem step fails;
    ///   fetch and validation failures leave the existing files untouched
    pub async fn update(&self) -> Result<UpdateOutcome, UpdateError> {
        let csv_text = self.client.fetch_csv(&self.config.url).await?;
        self.write_snapshot(&csv_text)
    }

    /// Writes a snapshot of the given CSV text to the cache
    ///
    /// This is the full post-fetch pipeline: compare against the previous
    /// snapshot, append the retrieval marker, write both files, and force
    /// their timestamps to the current instant.
    pub fn write_snapshot(&self, csv_text: &str) -> Result<UpdateOutcome, UpdateError> {
        fs::create_dir_all(&self.config.cache_dir)?;

        let csv_path = self.csv_path();
        let metadata_path = self.metadata_path();

        let content_changed = match read_existing(&csv_path)? {
            Some(previous) => marker::strip_marker(&previous) != csv_text,
            None => true,
        };
        if content_changed {
            tracing::info!("content comparison: data has changed");
        } else {
            tracing::info!("content comparison: data is identical to existing file");
        }

        let now = self.clock.now();
        let last_updated = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let retrieval_id = self.ids.generate();

        let snapshot = format!(
            "{}\n{}\n",
            csv_text,
            marker::format_marker(&last_updated, &retrieval_id)
        );
        fs::write(&csv_path, &snapshot)?;

        let metadata = SnapshotMetadata {
            last_updated,
            timestamp: now.timestamp_millis(),
            retrieval_id,
            source: self.config.source.clone(),
            url: self.config.url.clone(),
            data_length: csv_text.len(),
            final_file_size: snapshot.len(),
        };
        let json = serde_json::to_string_pretty(&metadata)?;
        fs::write(&metadata_path, json)?;

        // Restamp both files even though the writes above already updated
        // their mtimes; some change-detection tooling only notices an
        // explicit touch.
        let stamp = FileTime::from_system_time(SystemTime::from(now));
        filetime::set_file_times(&csv_path, stamp, stamp)?;
        filetime::set_file_times(&metadata_path, stamp, stamp)?;
        tracing::info!("files updated with fresh timestamps and unique retrieval ID");

        Ok(UpdateOutcome {
            csv_path,
            metadata_path,
            content_changed,
            metadata,
        })
    }
}

/// Reads the previous snapshot, treating a missing file as no snapshot
fn read_existing(path: &Path) -> Result<Option<String>, UpdateError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
