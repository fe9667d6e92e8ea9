//! Errors raised while talking to the reservation API

use reqwest::StatusCode;
use thiserror::Error;

/// Every way a call to the external API can fail
///
/// Call sites never retry, so no distinction is made between transient and
/// permanent failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS or timeout failure before a response arrived
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The server answered with a non-success status
    #[error("server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    /// The body did not decode into any known response shape
    #[error("malformed response: {0}")]
    Malformed(String),
    /// A success response whose envelope carried an `error` field
    #[error("server reported an error: {0}")]
    Remote(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Malformed(e.to_string());
        }
        match e.status() {
            Some(status) => Self::Status {
                status,
                message: e.to_string(),
            },
            None => Self::Network(e),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}
