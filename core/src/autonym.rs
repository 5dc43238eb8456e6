//! Async facade that runs the build / send / parse round-trip.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[cfg(feature = "reqwest-client")]
use crate::backends::ReqwestClient;
use crate::client::AutonymClient;
use crate::config::ClientConfig;
use crate::error::AutonymError;
use crate::http::HttpRequest;
use crate::http_client::HttpClient;
use crate::response::Response;

/// An Autonym API client bound to an [`HttpClient`] backend.
///
/// Every call is independent; the client can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Autonym<C: HttpClient> {
    client: AutonymClient,
    http: C,
}

#[cfg(feature = "reqwest-client")]
impl Autonym<ReqwestClient> {
    /// A reqwest-backed client with the default configuration.
    pub fn new(uri: &str) -> Self {
        Self::from_config(ClientConfig::new(uri))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let http = ReqwestClient::new(config.timeout);
        Self::with_client(config, http)
    }
}

impl<C: HttpClient> Autonym<C> {
    pub fn with_client(config: ClientConfig, http: C) -> Self {
        Self {
            client: AutonymClient::from_config(config),
            http,
        }
    }

    /// The underlying request builder.
    pub fn client(&self) -> &AutonymClient {
        &self.client
    }

    /// Serialize `attributes` and create a new resource.
    pub async fn create<T>(&self, route: &str, attributes: &T) -> Result<Response, AutonymError>
    where
        T: Serialize + ?Sized,
    {
        let request = self.client.build_create(route, attributes)?;
        self.execute(request).await
    }

    /// Fetch resources, optionally filtered by `query`.
    pub async fn find(&self, route: &str, query: Option<&Value>) -> Result<Response, AutonymError> {
        let request = self.client.build_find(route, query)?;
        self.execute(request).await
    }

    pub async fn find_one<I>(&self, route: &str, id: &I) -> Result<Response, AutonymError>
    where
        I: Display + ?Sized,
    {
        let request = self.client.build_find_one(route, id);
        self.execute(request).await
    }

    /// Serialize `attributes` and update an existing resource.
    pub async fn find_one_and_update<I, T>(
        &self,
        route: &str,
        id: &I,
        attributes: &T,
    ) -> Result<Response, AutonymError>
    where
        I: Display + ?Sized,
        T: Serialize + ?Sized,
    {
        let request = self.client.build_find_one_and_update(route, id, attributes)?;
        self.execute(request).await
    }

    pub async fn find_one_and_delete<I>(&self, route: &str, id: &I) -> Result<Response, AutonymError>
    where
        I: Display + ?Sized,
    {
        let request = self.client.build_find_one_and_delete(route, id);
        self.execute(request).await
    }

    /// The five operations with `route` fixed.
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), autonym_client::AutonymError> {
    /// let autonym = autonym_client::Autonym::new("https://api.myservice.com/");
    /// let people = autonym.bind_to_route("people");
    /// let response = people.find_one("42").await?;
    /// println!("{}", response.data);
    /// # Ok(())
    /// # }
    /// ```
    pub fn bind_to_route(&self, route: &str) -> BoundRoute<'_, C> {
        BoundRoute {
            autonym: self,
            route: route.to_string(),
        }
    }

    /// Send a prepared request and parse the response.
    pub async fn execute(&self, request: HttpRequest) -> Result<Response, AutonymError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.http.send(request).await?;
        debug!(status = response.status, "received response");
        self.client.parse_response(response)
    }
}

/// Operations on a single route of an [`Autonym`] API.
#[derive(Debug)]
pub struct BoundRoute<'c, C: HttpClient> {
    autonym: &'c Autonym<C>,
    route: String,
}

impl<'c, C: HttpClient> BoundRoute<'c, C> {
    pub fn route(&self) -> &str {
        &self.route
    }

    pub async fn create<T>(&self, attributes: &T) -> Result<Response, AutonymError>
    where
        T: Serialize + ?Sized,
    {
        self.autonym.create(&self.route, attributes).await
    }

    pub async fn find(&self, query: Option<&Value>) -> Result<Response, AutonymError> {
        self.autonym.find(&self.route, query).await
    }

    pub async fn find_one<I>(&self, id: &I) -> Result<Response, AutonymError>
    where
        I: Display + ?Sized,
    {
        self.autonym.find_one(&self.route, id).await
    }

    pub async fn find_one_and_update<I, T>(&self, id: &I, attributes: &T) -> Result<Response, AutonymError>
    where
        I: Display + ?Sized,
        T: Serialize + ?Sized,
    {
        self.autonym.find_one_and_update(&self.route, id, attributes).await
    }

    pub async fn find_one_and_delete<I>(&self, id: &I) -> Result<Response, AutonymError>
    where
        I: Display + ?Sized,
    {
        self.autonym.find_one_and_delete(&self.route, id).await
    }
}
