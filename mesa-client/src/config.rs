//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | MESA_API_URL | http://localhost:8080/api/v1 | Backend base URL |
//! | MESA_TIMEOUT_SECS | 30 | Request timeout |
//! | MESA_RETURN_URL | http://localhost:4200/pages/reservation/form | Where the payment provider sends the payer back |
//! | MESA_DATA_DIR | ./.mesa | Durable storage directory |

use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};
use crate::http::NetworkHttpClient;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_RETURN_URL: &str = "http://localhost:4200/pages/reservation/form";
pub const DEFAULT_DATA_DIR: &str = ".mesa";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the reservation backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8080/api/v1")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Return URL handed to the payment provider
    pub return_url: String,

    /// Cancel URL handed to the payment provider
    pub cancel_url: String,

    /// Directory backing the durable storage
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration with default payment URLs
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            return_url: DEFAULT_RETURN_URL.into(),
            cancel_url: DEFAULT_RETURN_URL.into(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("MESA_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        );
        if let Some(timeout) = std::env::var("MESA_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(url) = std::env::var("MESA_RETURN_URL") {
            config = config.with_return_url(url);
        }
        if let Ok(dir) = std::env::var("MESA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the return URL; the cancel URL follows it
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.cancel_url = url.clone();
        self.return_url = url;
        self
    }

    /// Set a cancel URL distinct from the return URL
    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the durable storage directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Check the URLs parse before any request is made
    pub fn validate(&self) -> ClientResult<()> {
        for (name, url) in [
            ("base_url", &self.base_url),
            ("return_url", &self.return_url),
            ("cancel_url", &self.cancel_url),
        ] {
            reqwest::Url::parse(url)
                .map_err(|e| ClientError::Config(format!("{name} '{url}' is invalid: {e}")))?;
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be positive".into()));
        }
        Ok(())
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
