//! HTTP client abstraction for pluggable backends.

use std::future::Future;

use crate::error::HttpClientError;
use crate::http::{HttpRequest, HttpResponse};

/// Trait for pluggable HTTP client backends.
///
/// A backend only moves bytes: it must hand back every response it
/// receives, whatever the status, so that status handling stays in
/// `AutonymClient::parse_response`.
pub trait HttpClient: Send + Sync {
    /// Send an HTTP request and return the response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send;
}
