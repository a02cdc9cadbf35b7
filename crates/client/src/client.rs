//! Results host HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! One request per view load; a failed load is surfaced once, never retried.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

/// Results host client (blocking).
#[derive(Clone)]
pub struct ResultsClient {
    http: reqwest::blocking::Client,
}

/// Error type for payload loading.
#[derive(Debug)]
pub enum FetchError {
    /// The URL (or base/path combination) did not parse
    Url(String),
    /// Network error
    Network(String),
    /// HTTP error with status code
    Status(u16, String),
    /// Payload was not the expected JSON array
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Url(msg) => write!(f, "bad URL: {}", msg),
            FetchError::Network(msg) => write!(f, "network error: {}", msg),
            FetchError::Status(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            FetchError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl ResultsClient {
    pub fn new() -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("railmatch/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    /// Fetch one table payload: a JSON array of rows.
    pub fn fetch_rows<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::Url(format!("{url}: {e}")))?;

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Status(status, first_line(&body)));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        decode_rows(&body)
    }
}

impl Default for ResultsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a table payload. Tolerates a UTF-8 BOM in front of the array.
pub fn decode_rows<T: DeserializeOwned>(data: &str) -> Result<Vec<T>, FetchError> {
    let data = data.trim_start_matches('\u{feff}');
    serde_json::from_str(data).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Resolve a server path against a base URL.
pub fn join_base(base: &str, path: &str) -> Result<String, FetchError> {
    let base = Url::parse(base).map_err(|e| FetchError::Url(format!("{base}: {e}")))?;
    let joined = base
        .join(path)
        .map_err(|e| FetchError::Url(format!("{path}: {e}")))?;
    Ok(joined.into())
}

/// Error bodies can be whole HTML pages; keep the first line only.
fn first_line(body: &str) -> String {
    body.lines().next().unwrap_or_default().trim().to_string()
}
