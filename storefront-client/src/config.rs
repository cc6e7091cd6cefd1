//! Client configuration

use crate::{ClientResult, HttpClient};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for talking to the storefront backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token of the logged-in shopper or admin
    pub token: Option<String>,

    /// CSRF token sent with state-mutating requests
    pub csrf_token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            csrf_token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the configuration from `STOREFRONT_*` environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("STOREFRONT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            token: std::env::var("STOREFRONT_TOKEN").ok(),
            csrf_token: std::env::var("STOREFRONT_CSRF_TOKEN").ok(),
            timeout: std::env::var("STOREFRONT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the CSRF token
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
