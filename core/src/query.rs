//! Query-string encoding with bracket notation.
//!
//! Arrays encode as repeated `key[]=value` pairs and nested objects as
//! `key[sub]=value`, recursively. Keys and values are percent-encoded with
//! everything outside `A-Z a-z 0-9 - _ . ~` escaped, so brackets travel as
//! `%5B` / `%5D`. `null` encodes as an empty value; empty arrays and objects
//! encode to nothing. Object keys come out in `serde_json::Map` order.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::error::AutonymError;

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a query object. `null` yields the empty string; any other
/// non-object value is rejected.
pub fn encode(query: &Value) -> Result<String, AutonymError> {
    let map = match query {
        Value::Null => return Ok(String::new()),
        Value::Object(map) => map,
        other => {
            return Err(AutonymError::InvalidQuery(format!(
                "expected an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        push_pairs(key.clone(), value, &mut pairs);
    }
    Ok(pairs.join("&"))
}

/// Append an encoded query string to `url`, or return `url` untouched when
/// the query is empty.
pub fn append(url: String, query: &str) -> String {
    if query.is_empty() {
        return url;
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{query}")
}

fn push_pairs(prefix: String, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                push_pairs(format!("{prefix}[]"), item, out);
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                push_pairs(format!("{prefix}[{key}]"), nested, out);
            }
        }
        Value::Null => out.push(pair(&prefix, "")),
        Value::String(s) => out.push(pair(&prefix, s)),
        // bools and numbers render as their JSON text
        scalar => out.push(pair(&prefix, &scalar.to_string())),
    }
}

fn pair(key: &str, value: &str) -> String {
    format!(
        "{}={}",
        utf8_percent_encode(key, COMPONENT),
        utf8_percent_encode(value, COMPONENT)
    )
}
