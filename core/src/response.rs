//! Uniform accessor over one HTTP call's outcome.
//!
//! # Design
//! A `Response` pairs the body that was read off the wire (if any) with the
//! transport's metadata map. Adapters only ever look at `status_code` and
//! `json`, so they stay decoupled from how the call actually went: a live
//! response, an HTTP-level error whose body the transport inlined under
//! `info["body"]`, or a transport failure with no body at all.

use serde_json::{Map, Value};

/// Outcome of one HTTP call: the read body plus transport metadata.
#[derive(Debug, Clone)]
pub struct Response {
    body: Option<String>,
    info: Map<String, Value>,
}

impl Response {
    pub fn new(body: Option<String>, info: Map<String, Value>) -> Self {
        Self { body, info }
    }

    /// HTTP status from `info["status"]`; -1 when the transport never got
    /// far enough to record one.
    pub fn status_code(&self) -> i64 {
        self.info.get("status").and_then(Value::as_i64).unwrap_or(-1)
    }

    /// Lazily decoded JSON payload.
    ///
    /// When no body was read (or an empty one), falls back to a `"body"`
    /// entry in the metadata: present but undecodable yields an empty
    /// object, so callers can still do map lookups; absent yields `None`.
    /// A read body that fails to decode yields `None`, not an empty
    /// object. The asymmetry is load-bearing and pinned by the tests
    /// below.
    pub fn json(&self) -> Option<Value> {
        match self.body.as_deref().filter(|body| !body.is_empty()) {
            Some(body) => serde_json::from_str(body).ok(),
            None => {
                let inlined = self.info.get("body")?;
                let text = inlined.as_str().unwrap_or_default();
                match serde_json::from_str(text) {
                    Ok(value) => Some(value),
                    Err(_) => Some(Value::Object(Map::new())),
                }
            }
        }
    }
}

/// `field` out of a decoded error payload, or the fixed placeholder the
/// failure messages embed when the API supplied nothing usable.
pub(crate) fn error_field(data: &Value, field: &str) -> String {
    data.get(field)
        .and_then(Value::as_str)
        .unwrap_or("(empty error message)")
        .to_string()
}
