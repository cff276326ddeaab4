//! Error taxonomy for the HTTP gateway.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of a single call to the library service.
///
/// Callers rarely need to tell the variants apart — every one of them ends up
/// as an error placeholder or error notice in the UI — but keeping the
/// distinction makes log lines actionable when the service misbehaves.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connection refused, DNS failure, or the
    /// connection dropped mid-response.
    #[error("could not reach the library service: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("library service responded with HTTP {status}")]
    Http { status: StatusCode },

    /// The response body was not the JSON we expected.
    #[error("library service sent a malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// The HTTP status code, when the failure carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias used throughout the gateway and worker.
pub type Result<T> = std::result::Result<T, ApiError>;
