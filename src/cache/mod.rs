//! Cache module for the deals CSV snapshot
//!
//! This module owns the on-disk cache: a CSV snapshot with an appended
//! retrieval marker and a JSON metadata sidecar describing the retrieval.
//! Both files are rewritten wholesale on every run and have their
//! timestamps forced forward so downstream change detection always fires.

mod updater;

pub use updater::{
    CacheUpdater, Clock, IdGenerator, SnapshotMetadata, SystemClock, UpdateError, UpdateOutcome,
    UpdaterConfig, UuidGenerator, DEALS_CSV_URL, DEFAULT_CACHE_DIR, SOURCE_LABEL,
};
