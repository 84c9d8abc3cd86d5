//! Central HTTP transport for the Healthchecks.io API.
//!
//! # Design
//! `ApiClient` derives two bases from the configured API root: the
//! management base (`<api_url>/api/v1`) for CRUD calls and the ping base
//! (the public ping host for the compiled-in default root, `<api_url>/ping`
//! otherwise) for signal submission. Request construction is pure and
//! separately testable; execution goes through `Transport`, one attempt per
//! call, no retries.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::config::{Config, DEFAULT_API_URL, PING_HOST};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::Response;
use crate::transport::Transport;

pub struct ApiClient {
    base_url: String,
    ping_base: String,
    api_token: String,
    transport: Transport,
}

impl ApiClient {
    /// Build a client without touching the network. Use [`connect`] when
    /// the token should be validated up front.
    ///
    /// [`connect`]: ApiClient::connect
    pub fn new(config: &Config) -> Self {
        let root = config.api_url.trim_end_matches('/');
        let ping_base = if root == DEFAULT_API_URL {
            PING_HOST.to_string()
        } else {
            format!("{root}/ping")
        };
        Self {
            base_url: format!("{root}/api/v1"),
            ping_base,
            api_token: config.api_token.clone(),
            transport: Transport::new(Duration::from_secs(config.timeout)),
        }
    }

    /// Validating constructor: probes the checks endpoint and fails with
    /// [`ApiError::Unauthorized`] when the token is rejected. Adapters
    /// built on the returned client therefore never start resource work
    /// with bad credentials.
    pub fn connect(config: &Config) -> Result<Self, ApiError> {
        let client = Self::new(config);
        let response = client.get("checks", None);
        if response.status_code() == 401 {
            return Err(ApiError::Unauthorized);
        }
        log::debug!("API token accepted by {}", client.base_url);
        Ok(client)
    }

    /// Management API base (`<api_url>/api/v1`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ping-submission base.
    pub fn ping_base(&self) -> &str {
        &self.ping_base
    }

    /// Describe a management call without executing it.
    ///
    /// `path` joins the management base with exactly one separating slash,
    /// whether or not it carries a leading one. A DELETE whose payload
    /// encodes to `null` is sent with no body at all, keeping idempotent
    /// deletes free of a spurious payload.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> HttpRequest {
        let mut data = body.map(Value::to_string);
        if method == HttpMethod::Delete && data.as_deref() == Some("null") {
            data = None;
        }
        let mut headers = vec![("X-Api-Key".to_string(), self.api_token.clone())];
        if data.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        let path = path.strip_prefix('/').unwrap_or(path);
        HttpRequest {
            method,
            url: format!("{}/{}", self.base_url, path),
            headers,
            body: data,
        }
    }

    /// Describe a ping-submission call without executing it. Targets the
    /// ping base, never the management base.
    pub fn build_ping_request(&self, path: &str) -> HttpRequest {
        let path = path.strip_prefix('/').unwrap_or(path);
        HttpRequest {
            method: HttpMethod::Head,
            url: format!("{}/{}", self.ping_base, path),
            headers: vec![("X-Api-Key".to_string(), self.api_token.clone())],
            body: None,
        }
    }

    pub fn send(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Response {
        self.transport.execute(&self.build_request(method, path, body))
    }

    pub fn get(&self, path: &str, body: Option<&Value>) -> Response {
        self.send(HttpMethod::Get, path, body)
    }

    pub fn put(&self, path: &str, body: Option<&Value>) -> Response {
        self.send(HttpMethod::Put, path, body)
    }

    pub fn post(&self, path: &str, body: Option<&Value>) -> Response {
        self.send(HttpMethod::Post, path, body)
    }

    pub fn delete(&self, path: &str, body: Option<&Value>) -> Response {
        self.send(HttpMethod::Delete, path, body)
    }

    /// HEAD against the ping base. Signal pings use a distinct host and
    /// path scheme from the management calls.
    pub fn head(&self, path: &str) -> Response {
        self.transport.execute(&self.build_ping_request(path))
    }
}

// The token is a secret; keep it out of Debug output and logs.
impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiClient<{}>", self.base_url)
    }
}
