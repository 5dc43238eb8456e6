//! Client configuration.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::error::AutonymError;
use crate::transform::Transforms;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything an `AutonymClient` needs: base URI, transforms, default
/// headers, and the backend timeout.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub uri: String,
    pub transforms: Transforms,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(uri: &str) -> Self {
        Self {
            uri: uri.to_string(),
            transforms: Transforms::default(),
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn builder(uri: &str) -> ClientBuilder {
        ClientBuilder {
            config: Self::new(uri),
        }
    }

    /// Read `AUTONYM_URI` (required) and `AUTONYM_TIMEOUT_SECS` (optional).
    pub fn from_env() -> Result<Self, AutonymError> {
        let uri = env::var("AUTONYM_URI")
            .map_err(|_| AutonymError::Config("AUTONYM_URI must be set".to_string()))?;
        let mut config = Self::new(&uri);
        if let Ok(raw) = env::var("AUTONYM_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                AutonymError::Config(format!("AUTONYM_TIMEOUT_SECS must be an integer, got {raw:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Transform applied to outgoing attributes before they are sent.
    pub fn serialize<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.config.transforms.set_serialize(Arc::new(f));
        self
    }

    /// Transform applied to each received resource.
    pub fn unserialize<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.config.transforms.set_unserialize(Arc::new(f));
        self
    }

    /// Extra transform run on request bodies after `serialize`.
    pub fn request_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.config.transforms.push_request(Arc::new(f));
        self
    }

    /// Extra transform run on whole response bodies after `unserialize`.
    pub fn response_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.config.transforms.push_response(Arc::new(f));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.config.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
