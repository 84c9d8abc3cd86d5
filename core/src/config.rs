//! Client configuration and the environment fallback chains.

use std::env;
use std::fmt;

use crate::error::ApiError;

/// Hosted-service API root assumed when no base URL is configured.
pub const DEFAULT_API_URL: &str = "https://healthchecks.io";

/// Public ping host paired with the hosted service.
pub const PING_HOST: &str = "https://hc-ping.com";

/// Environment variables consulted for the API token, in order.
pub const TOKEN_ENV_VARS: [&str; 4] = [
    "HEALTHCHECKSIO_API_TOKEN",
    "HEALTHCHECKSIO_API_KEY",
    "HC_API_TOKEN",
    "HC_API_KEY",
];

/// Environment variables consulted for the API base URL, in order.
pub const URL_ENV_VARS: [&str; 2] = ["HEALTHCHECKSIO_API_URL", "HC_API_URL"];

/// Immutable configuration for one client.
#[derive(Clone)]
pub struct Config {
    /// API token, sent as `X-Api-Key` on every management call.
    pub api_token: String,
    /// API root, without the `/api/v1` suffix.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: 30,
        }
    }
}

impl Config {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Read the configuration from the environment: the token from the
    /// first set variable in `TOKEN_ENV_VARS`, the base URL from
    /// `URL_ENV_VARS` falling back to the hosted service.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_token = first_set(&TOKEN_ENV_VARS).ok_or(ApiError::MissingToken)?;
        let api_url = first_set(&URL_ENV_VARS).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Ok(Self {
            api_token,
            api_url,
            timeout: 30,
        })
    }
}

// The token is a secret; keep it out of Debug output and logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn first_set(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|value| !value.is_empty()))
}
