//! Synchronous client for the Healthchecks.io REST API.
//!
//! # Overview
//! [`ApiClient`] wraps the management API (`<api_url>/api/v1`) and the
//! ping-submission host behind blocking one-shot calls; the per-resource
//! adapters ([`Checks`], [`Ping`], and the `*Info` family) translate an
//! immutable request into exactly one HTTP call and a structured
//! [`Outcome`].
//!
//! # Design
//! - [`ApiClient::connect`] probes the checks endpoint and fails fast on a
//!   rejected token, before any resource work starts.
//! - Adapters hold no state between invocations and never retry; a
//!   dry-run-constructed adapter short-circuits every operation before the
//!   network.
//! - [`Response`] keeps the tolerant, lazy JSON accessors the adapters'
//!   status-code branching relies on.

pub mod checks;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod info;
pub mod ping;
pub mod response;
pub mod transport;
pub mod types;

pub use checks::Checks;
pub use client::ApiClient;
pub use config::{Config, DEFAULT_API_URL, PING_HOST};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest};
pub use info::{
    BadgesInfo, ChannelsInfo, ChecksFlipsInfo, ChecksInfo, ChecksPingsInfo, ChecksQuery,
};
pub use ping::Ping;
pub use response::Response;
pub use types::{CheckRequest, Outcome, Report, Signal, UniqueField};
