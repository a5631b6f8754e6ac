//! Retrieval marker handling
//!
//! Every snapshot written to the cache ends with a one-line comment of the
//! form `# Retrieved: <timestamp> | ID: <id>`. The marker changes on every
//! run, so downstream change-detection (git, build tooling) always sees the
//! file as modified even when the spreadsheet content is unchanged.

/// Prefix identifying a retrieval marker line
pub const MARKER_PREFIX: &str = "# Retrieved: ";

/// Formats the marker line for a retrieval
pub fn format_marker(timestamp: &str, retrieval_id: &str) -> String {
    format!("{MARKER_PREFIX}{timestamp} | ID: {retrieval_id}")
}

/// Recovers the original CSV text from a snapshot by stripping the trailing
/// marker line, if present.
///
/// Snapshots are written as `<data>\n<marker>\n`. Text that does not end in
/// a marker line (e.g. a file written by other tooling) is returned as-is.
pub fn strip_marker(snapshot: &str) -> &str {
    let Some(body) = snapshot.strip_suffix('\n') else {
        return snapshot;
    };
    match body.rsplit_once('\n') {
        Some((data, last_line)) if last_line.starts_with(MARKER_PREFIX) => data,
        _ => snapshot,
    }
}
