//! Error types for the Autonym client.
//!
//! # Design
//! Nothing here is retried or recovered. Backend failures surface as
//! `Transport`, and non-2xx statuses surface as `Status` carrying the full
//! response (body already through the response transforms) so callers can
//! inspect whatever the server sent back.

use thiserror::Error;

use crate::response::Response;

/// Failures reported by an `HttpClient` backend.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established or was dropped.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other backend failure.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors returned by `AutonymClient` and `Autonym`.
#[derive(Debug, Error)]
pub enum AutonymError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// The server answered with a status outside `200..300`.
    #[error("HTTP {}", .0.status)]
    Status(Response),

    /// Attributes could not be encoded as JSON, or response data did not
    /// match the requested type.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The query passed to `find` was neither an object nor null.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AutonymError {
    /// The response attached to a `Status` error.
    pub fn response(&self) -> Option<&Response> {
        match self {
            AutonymError::Status(response) => Some(response),
            _ => None,
        }
    }

    /// `true` when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.response().is_some_and(|r| r.status == 404)
    }
}
