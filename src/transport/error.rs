//! Normalized transport errors and the error-message extraction pipeline.
//!
//! Every non-2xx response is reduced to an [`ApiError`] whose `error` and
//! `message` fields carry the same non-empty, human-readable text. The text is
//! chosen by an ordered list of extractors with first-success-wins semantics:
//!
//! 1. JSON body `message` field
//! 2. JSON body `error` field
//! 3. Raw text body (only when the body is not JSON)
//! 4. `HTTP error! status: <code>`

use serde_json::Value;
use thiserror::Error;

/// Uniform error shape for every failed HTTP exchange.
///
/// `status` is `0` when the request never produced an HTTP status
/// (connection refused, DNS failure, timeout).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable error text (identical to `message`).
    pub error: String,
    /// HTTP status code, or `0` for network-level failures.
    pub status: u16,
    /// Human-readable error text (identical to `error`).
    pub message: String,
}

impl ApiError {
    /// Creates an error with `error == message == text`.
    #[must_use]
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            error: text.clone(),
            status,
            message: text,
        }
    }

    /// Normalizes a failed response from its status code and raw body bytes.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        Self::new(status, extract_error_message(status, body))
    }

    /// Creates a network-level error (no HTTP status available).
    #[must_use]
    pub fn network(url: &str, source: &reqwest::Error) -> Self {
        let text = if source.is_timeout() {
            format!("request to {url} timed out")
        } else if source.is_connect() {
            format!("cannot connect to {url}: {source}")
        } else {
            format!("network error calling {url}: {source}")
        };
        Self::new(0, text)
    }

    /// Creates an error for a successful response whose body did not match the expected shape.
    #[must_use]
    pub fn decode(status: u16, url: &str, detail: &str) -> Self {
        Self::new(status, format!("unexpected response from {url}: {detail}"))
    }

    /// Returns `true` for 401/403 responses.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Returns `true` when the backend answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Failed-response body classified once so every extractor sees the same view.
#[derive(Debug)]
enum ErrorBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ErrorBody {
    fn classify(body: &[u8]) -> Self {
        if let Ok(value) = serde_json::from_slice::<Value>(body) {
            return Self::Json(value);
        }
        match std::str::from_utf8(body) {
            Ok(text) if !text.trim().is_empty() => Self::Text(text.to_string()),
            _ => Self::Empty,
        }
    }
}

type Extractor = fn(&ErrorBody) -> Option<String>;

const EXTRACTORS: [Extractor; 3] = [json_message, json_error, text_body];

fn json_string_field(body: &ErrorBody, field: &str) -> Option<String> {
    let ErrorBody::Json(value) = body else {
        return None;
    };
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn json_message(body: &ErrorBody) -> Option<String> {
    json_string_field(body, "message")
}

fn json_error(body: &ErrorBody) -> Option<String> {
    json_string_field(body, "error")
}

fn text_body(body: &ErrorBody) -> Option<String> {
    match body {
        ErrorBody::Text(text) => Some(text.clone()),
        ErrorBody::Json(_) | ErrorBody::Empty => None,
    }
}

/// Picks the human-readable message for a failed response.
///
/// Pure and total: the result is never empty.
#[must_use]
pub fn extract_error_message(status: u16, body: &[u8]) -> String {
    let classified = ErrorBody::classify(body);
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(&classified))
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}
