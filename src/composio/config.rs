//! Composio client configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::core::{ToolkitError, ToolkitResult};

/// Default Composio backend
pub const DEFAULT_BASE_URL: &str = "https://backend.composio.dev";

/// Configuration for the Composio API client and its caches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposioConfig {
    /// API key sent in the `x-api-key` header
    pub api_key: String,

    /// Base URL of the Composio backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size used when listing tools
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// How long toolkit listings stay cached
    #[serde(default = "default_toolkit_cache_ttl_secs")]
    pub toolkit_cache_ttl_secs: u64,

    /// How long connected-account listings stay cached
    #[serde(default = "default_accounts_cache_ttl_secs")]
    pub accounts_cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    100
}

fn default_toolkit_cache_ttl_secs() -> u64 {
    5 * 60
}

fn default_accounts_cache_ttl_secs() -> u64 {
    30
}

impl ComposioConfig {
    /// Create a configuration with default settings for the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            toolkit_cache_ttl_secs: default_toolkit_cache_ttl_secs(),
            accounts_cache_ttl_secs: default_accounts_cache_ttl_secs(),
        }
    }

    /// Create a configuration from environment variables
    ///
    /// Reads from:
    /// - `COMPOSIO_API_KEY` (required)
    /// - `COMPOSIO_BASE_URL` (optional)
    /// - `COMPOSIO_TIMEOUT_SECS` (optional, defaults to 30)
    pub fn from_env() -> ToolkitResult<Self> {
        let api_key = env::var("COMPOSIO_API_KEY").map_err(|_| ToolkitError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = env::var("COMPOSIO_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(timeout) = env::var("COMPOSIO_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = timeout;
        }

        config.validate()?;

        tracing::info!("[ComposioConfig] Using backend {}", config.base_url);

        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the page size used for listings
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set both cache lifetimes
    pub fn with_cache_ttls(mut self, toolkit_secs: u64, accounts_secs: u64) -> Self {
        self.toolkit_cache_ttl_secs = toolkit_secs;
        self.accounts_cache_ttl_secs = accounts_secs;
        self
    }

    /// Check the configuration for obviously unusable values
    pub fn validate(&self) -> ToolkitResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ToolkitError::MissingApiKey);
        }
        if self.page_size == 0 {
            return Err(ToolkitError::InvalidConfig("page_size must be positive".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ToolkitError::InvalidConfig("base_url is empty".into()));
        }
        Ok(())
    }

    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Toolkit cache lifetime as Duration
    pub fn toolkit_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.toolkit_cache_ttl_secs)
    }

    /// Connected-account cache lifetime as Duration
    pub fn accounts_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.accounts_cache_ttl_secs)
    }

    /// Join a path onto the base URL
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
