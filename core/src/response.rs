use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AutonymError;

/// A parsed server response whose body has passed through the response
/// transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: Value,
}

impl Response {
    /// Deserialize the transformed data into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AutonymError> {
        Ok(T::deserialize(&self.data)?)
    }

    pub fn into_data(self) -> Value {
        self.data
    }
}
