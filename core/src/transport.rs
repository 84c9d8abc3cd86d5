//! Blocking executor for `HttpRequest` values.
//!
//! # Design
//! One agent per client, one attempt per call. HTTP statuses are data for
//! the adapters to interpret (`http_status_as_error` is off), and transport
//! failures fold into a `Response` with status -1 and the error text under
//! `info["msg"]` instead of surfacing as a Rust error: a timeout is a
//! failed response, not a distinct outcome.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::http::{HttpMethod, HttpRequest};
use crate::response::Response;

pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: &HttpRequest) -> Response {
        log::debug!("{} {}", req.method.as_str(), req.url);

        let url = req.url.as_str();
        let headers = &req.headers;
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Head, _) => with_headers(self.agent.head(url), headers).call(),
            (HttpMethod::Delete, None) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Delete, Some(body)) => {
                // DELETE carries a body only when the caller encoded one;
                // ureq needs the explicit opt-in for bodyless methods.
                with_headers(self.agent.delete(url), headers)
                    .force_send_body()
                    .send(body.as_bytes())
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(url), headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(url), headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
        };

        match result {
            Ok(mut response) => {
                let status = i64::from(response.status().as_u16());
                let body = response.body_mut().read_to_string().unwrap_or_default();
                log::debug!("{} {} -> {}", req.method.as_str(), req.url, status);
                let mut info = Map::new();
                info.insert("status".to_string(), Value::from(status));
                Response::new(Some(body), info)
            }
            Err(err) => {
                log::debug!("{} {} failed: {}", req.method.as_str(), req.url, err);
                let mut info = Map::new();
                info.insert("status".to_string(), Value::from(-1));
                info.insert("msg".to_string(), Value::from(err.to_string()));
                Response::new(None, info)
            }
        }
    }
}

fn with_headers<Any>(
    mut builder: ureq::RequestBuilder<Any>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<Any> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
