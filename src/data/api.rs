//! Trends API integration for the Melbourne CBD backend.

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

use crate::data::normalize::normalize_row;
use crate::domain::{Metric, TrendRow};

/// Default base URL: the FastAPI backend's development address.
///
/// The web build talks to the same origin it was served from; a terminal
/// client has no origin, so we default to the local dev server and let
/// `CBD_API_BASE` (or `--base`) point anywhere else.
const DEFAULT_BASE: &str = "http://127.0.0.1:8000";

/// Why a fetch failed.
///
/// All variants render as the message text shown to the user, so a non-2xx
/// response reads exactly like the HTTP status line (`500 Internal Server
/// Error`). A stale result is not an error: it is discarded silently by the
/// view before any of these surface.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Non-2xx HTTP response.
    #[error("{status} {status_text}")]
    Request { status: u16, status_text: String },
    /// Transport-level failure (connect, timeout, body read).
    #[error("{0}")]
    Network(String),
    /// Malformed JSON body.
    #[error("{0}")]
    Parse(String),
}

/// Blocking HTTP client for the trends endpoints.
///
/// Cheap to clone (reqwest clients share their connection pool), which is how
/// each fetch worker thread gets its own handle.
#[derive(Clone)]
pub struct TrendsClient {
    client: Client,
    base: String,
}

impl TrendsClient {
    /// Resolve the base URL from the environment (`CBD_API_BASE` via `.env`),
    /// falling back to [`DEFAULT_BASE`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base = std::env::var("CBD_API_BASE").unwrap_or_else(|_| DEFAULT_BASE.to_string());
        Self::with_base(base)
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client: Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetch and normalize the rows for one metric.
    ///
    /// This blocks for the round-trip and is intended to run on a worker
    /// thread; the TUI applies the result through its stale-discard check.
    pub fn fetch_rows(&self, metric: Metric) -> Result<Vec<TrendRow>, FetchError> {
        let url = format!("{}{}", self.base, metric.endpoint_path());
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Request {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = resp.text().map_err(|e| FetchError::Network(e.to_string()))?;
        rows_from_body(&body)
    }
}

/// Extract rows from a response body.
///
/// The payload carries its sequence under a `data` field; a missing or
/// non-array `data` is treated as an empty sequence, not an error. Only a
/// body that fails to parse as JSON at all is a [`FetchError::Parse`].
pub fn rows_from_body(body: &str) -> Result<Vec<TrendRow>, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let rows = match value.get("data").and_then(Value::as_array) {
        Some(items) => items.iter().map(normalize_row).collect(),
        None => Vec::new(),
    };

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_reads_like_a_status_line() {
        let err = FetchError::Request {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        let client = TrendsClient::with_base("http://localhost:8000//");
        assert_eq!(client.base(), "http://localhost:8000");
    }

    #[test]
    fn rows_from_valid_body() {
        let body = r#"{"data": [{"year": 2014, "population": 160.0}, {"year": "2015"}], "total_records": 2}"#;
        let rows = rows_from_body(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, "2014");
        assert_eq!(rows[0].population, Some(160.0));
        assert_eq!(rows[1].year, "2015");
        assert_eq!(rows[1].population, None);
    }

    #[test]
    fn empty_data_is_success_with_no_rows() {
        let rows = rows_from_body(r#"{"data": []}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_data_field_is_empty_not_error() {
        let rows = rows_from_body(r#"{"message": "ok"}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn non_array_data_is_empty_not_error() {
        let rows = rows_from_body(r#"{"data": {"year": 2014}}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let err = rows_from_body("not json").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn rows_keep_received_order() {
        let body = r#"{"data": [{"year": 2016}, {"year": 2014}, {"year": 2018}]}"#;
        let rows = rows_from_body(body).unwrap();
        let years: Vec<&str> = rows.iter().map(|r| r.year.as_str()).collect();
        assert_eq!(years, vec!["2016", "2014", "2018"]);
    }
}
