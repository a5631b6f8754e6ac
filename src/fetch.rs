//! HTTP client for the deals spreadsheet export
//!
//! This module provides functionality to download the published CSV export
//! of the deals spreadsheet and validate that the response is usable before
//! it is handed to the cache writer.

use reqwest::Client;
use thiserror::Error;

/// Errors that can occur when fetching the CSV export
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("failed to fetch CSV: {0}")]
    Status(String),

    /// The response body was empty or contained only whitespace
    #[error("empty CSV data received")]
    EmptyData,
}

/// Client for downloading the spreadsheet CSV export
///
/// The CSV is treated as an opaque byte string; no parsing or schema
/// validation happens here. No request timeout is applied, matching the
/// upstream tooling this replaces.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetClient {
    /// Create a new SheetClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new SheetClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the CSV export from the given URL
    ///
    /// # Arguments
    /// * `url` - The spreadsheet export URL to download
    ///
    /// # Returns
    /// * `Ok(String)` - The raw CSV text
    /// * `Err(FetchError)` - If the request fails, the status is not a
    ///   success, or the body is blank
    pub async fn fetch_csv(&self, url: &str) -> Result<String, FetchError> {
        tracing::info!(url, "fetching fresh deals data");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.to_string()));
        }

        let text = response.text().await?;
        validate_body(&text)?;

        tracing::info!(bytes = text.len(), "successfully fetched CSV data");
        Ok(text)
    }
}

/// Reject empty or whitespace-only response bodies
fn validate_body(text: &str) -> Result<(), FetchError> {
    if text.trim().is_empty() {
        return Err(FetchError::EmptyData);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_body_accepts_csv_text() {
        assert!(validate_body("a,b\n1,2").is_ok());
    }

    #[test]
    fn test_validate_body_rejects_empty_string() {
        let result = validate_body("");
        assert!(matches!(result, Err(FetchError::EmptyData)));
    }

    #[test]
    fn test_validate_body_rejects_whitespace_only() {
        let result = validate_body("  \n\t \r\n");
        assert!(matches!(result, Err(FetchError::EmptyData)));
    }

    #[test]
    fn test_validate_body_accepts_padded_content() {
        // Leading/trailing whitespace around real content is still content
        assert!(validate_body("\n a,b \n").is_ok());
    }

    #[test]
    fn test_empty_data_error_message() {
        let err = FetchError::EmptyData;
        assert_eq!(err.to_string(), "empty CSV data received");
    }

    #[test]
    fn test_status_error_carries_status_text() {
        let err = FetchError::Status("404 Not Found".to_string());
        assert!(err.to_string().contains("404 Not Found"));
    }

    #[test]
    fn test_sheet_client_default() {
        // Default and new() should both produce a usable client
        let _client = SheetClient::default();
        let _client = SheetClient::new();
    }
}
