//! Stateless HTTP request builder and response parser for an Autonym API.
//!
//! # Design
//! `AutonymClient` holds the base URI, default headers and the transform
//! pipeline, and carries no mutable state between calls. Each operation has a
//! `build_*` method that produces an `HttpRequest`; every response goes
//! through the single `parse_response`, since the response rules are the
//! same for all operations. The caller (or `Autonym`) executes the actual
//! round-trip in between.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::AutonymError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::Response;
use crate::transform::Transforms;

/// Synchronous, stateless client for an Autonym API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct AutonymClient {
    uri: String,
    headers: Vec<(String, String)>,
    transforms: Transforms,
}

impl AutonymClient {
    pub fn new(uri: &str) -> Self {
        Self::from_config(ClientConfig::new(uri))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            uri: config.uri.trim_end_matches('/').to_string(),
            headers: config.headers,
            transforms: config.transforms,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// `POST {uri}/{route}` with the serialized attributes.
    pub fn build_create<T>(&self, route: &str, attributes: &T) -> Result<HttpRequest, AutonymError>
    where
        T: Serialize + ?Sized,
    {
        self.with_body(HttpMethod::Post, self.collection_url(route), attributes)
    }

    /// `GET {uri}/{route}`, with `query` encoded in bracket notation.
    pub fn build_find(&self, route: &str, query: Option<&Value>) -> Result<HttpRequest, AutonymError> {
        let url = match query {
            Some(q) => crate::query::append(self.collection_url(route), &crate::query::encode(q)?),
            None => self.collection_url(route),
        };
        Ok(self.without_body(HttpMethod::Get, url))
    }

    /// `GET {uri}/{route}/{id}`.
    pub fn build_find_one<I>(&self, route: &str, id: &I) -> HttpRequest
    where
        I: Display + ?Sized,
    {
        self.without_body(HttpMethod::Get, self.resource_url(route, id))
    }

    /// `PATCH {uri}/{route}/{id}` with the serialized attributes.
    pub fn build_find_one_and_update<I, T>(
        &self,
        route: &str,
        id: &I,
        attributes: &T,
    ) -> Result<HttpRequest, AutonymError>
    where
        I: Display + ?Sized,
        T: Serialize + ?Sized,
    {
        self.with_body(HttpMethod::Patch, self.resource_url(route, id), attributes)
    }

    /// `DELETE {uri}/{route}/{id}`.
    pub fn build_find_one_and_delete<I>(&self, route: &str, id: &I) -> HttpRequest
    where
        I: Display + ?Sized,
    {
        self.without_body(HttpMethod::Delete, self.resource_url(route, id))
    }

    /// Decode and transform the body, then map non-2xx statuses to
    /// `AutonymError::Status`.
    ///
    /// Empty bodies become `Value::Null` and bodies that are not JSON become
    /// `Value::String`; neither is passed to the transforms.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Response, AutonymError> {
        let data = if response.body.is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&response.body) {
                Ok(json) => self.transforms.incoming(json),
                Err(_) => Value::String(response.body),
            }
        };

        let parsed = Response {
            status: response.status,
            headers: response.headers,
            data,
        };
        if (200..300).contains(&parsed.status) {
            Ok(parsed)
        } else {
            Err(AutonymError::Status(parsed))
        }
    }

    fn collection_url(&self, route: &str) -> String {
        format!("{}/{route}", self.uri)
    }

    fn resource_url<I: Display + ?Sized>(&self, route: &str, id: &I) -> String {
        format!("{}/{route}/{id}", self.uri)
    }

    fn without_body(&self, method: HttpMethod, url: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: self.headers.clone(),
            body: None,
        }
    }

    fn with_body<T>(&self, method: HttpMethod, url: String, attributes: &T) -> Result<HttpRequest, AutonymError>
    where
        T: Serialize + ?Sized,
    {
        let attributes = serde_json::to_value(attributes)?;
        let body = serde_json::to_string(&self.transforms.outgoing(attributes))?;
        let mut headers = self.headers.clone();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method,
            url,
            headers,
            body: Some(body),
        })
    }
}
