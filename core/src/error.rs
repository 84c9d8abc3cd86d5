//! Error types for the Healthchecks.io client.
//!
//! # Design
//! `Unauthorized` gets a dedicated variant because it is fatal at client
//! construction and callers branch on it. Everything the API itself rejects
//! lands in `Api` with a preformatted message carrying the endpoint, the
//! numeric status, and the upstream error text; that message is the whole
//! of what the operation surfaces, so there is no finer structure to keep.

use thiserror::Error;

/// Errors surfaced by client construction and adapter operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The startup probe came back 401; the API token is not valid.
    #[error("Failed to login using API token")]
    Unauthorized,

    /// No API token found in any of the recognized environment variables.
    #[error(
        "no API token set; export one of HEALTHCHECKSIO_API_TOKEN, \
         HEALTHCHECKSIO_API_KEY, HC_API_TOKEN, HC_API_KEY"
    )]
    MissingToken,

    /// The API rejected an operation with a non-success status.
    #[error("{message}")]
    Api { message: String },
}

impl ApiError {
    /// Upstream rejection with a message already formatted by the adapter.
    pub(crate) fn api(message: impl Into<String>) -> Self {
        ApiError::Api {
            message: message.into(),
        }
    }
}
