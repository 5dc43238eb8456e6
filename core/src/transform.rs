//! Payload transform pipeline.
//!
//! Outgoing attributes pass through `serialize` and then every extra request
//! transform, in order. Incoming JSON bodies pass through `unserialize`
//! (element-wise when the body is an array) and then every extra response
//! transform, which see the whole value.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A pure function over JSON values.
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

#[derive(Clone)]
pub struct Transforms {
    serialize: Transform,
    unserialize: Transform,
    request: Vec<Transform>,
    response: Vec<Transform>,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            serialize: Arc::new(identity),
            unserialize: Arc::new(identity),
            request: Vec::new(),
            response: Vec::new(),
        }
    }
}

impl fmt::Debug for Transforms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transforms")
            .field("request", &self.request.len())
            .field("response", &self.response.len())
            .finish_non_exhaustive()
    }
}

impl Transforms {
    pub fn set_serialize(&mut self, f: Transform) {
        self.serialize = f;
    }

    pub fn set_unserialize(&mut self, f: Transform) {
        self.unserialize = f;
    }

    pub fn push_request(&mut self, f: Transform) {
        self.request.push(f);
    }

    pub fn push_response(&mut self, f: Transform) {
        self.response.push(f);
    }

    /// Run outgoing attributes through the request chain.
    pub fn outgoing(&self, attributes: Value) -> Value {
        let serialized = (self.serialize)(attributes);
        self.request.iter().fold(serialized, |value, f| f(value))
    }

    /// Run a decoded response body through the response chain.
    pub fn incoming(&self, data: Value) -> Value {
        let unserialized = match data {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| (self.unserialize)(item)).collect())
            }
            other => (self.unserialize)(other),
        };
        self.response.iter().fold(unserialized, |value, f| f(value))
    }
}

fn identity(value: Value) -> Value {
    value
}
