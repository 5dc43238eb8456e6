//! Thin client for Autonym-style REST resource APIs.
//!
//! # Overview
//! Five CRUD calls (`create`, `find`, `find_one`, `find_one_and_update`,
//! `find_one_and_delete`) against `{uri}/{route}` and `{uri}/{route}/{id}`,
//! with user-supplied `serialize` / `unserialize` hooks applied to payloads
//! on the way out and on the way in.
//!
//! # Design
//! - `AutonymClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_response` consumes an `HttpResponse`. Callers with
//!   their own transport can use it directly.
//! - `Autonym<C>` pairs it with an `HttpClient` backend (reqwest by default)
//!   and exposes async methods plus `bind_to_route`.
//! - Failures are never retried; they reach the caller as `AutonymError`.

mod autonym;
mod backends;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
mod http_client;
pub mod query;
mod response;
pub mod transform;

pub use autonym::{Autonym, BoundRoute};
#[cfg(feature = "reqwest-client")]
pub use backends::ReqwestClient;
pub use client::AutonymClient;
pub use config::{ClientBuilder, ClientConfig};
pub use error::{AutonymError, HttpClientError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use http_client::HttpClient;
pub use response::Response;
pub use transform::{Transform, Transforms};
