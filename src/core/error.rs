//! Toolkit error types

use thiserror::Error;

/// Errors that can occur while discovering or dispatching toolkit capabilities
#[derive(Error, Debug)]
pub enum ToolkitError {
    /// No API key was configured
    #[error("Composio API key not configured (set COMPOSIO_API_KEY)")]
    MissingApiKey,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Composio API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A selected capability is not offered by the app
    #[error("Unknown capability '{slug}' for app '{app}'")]
    UnknownCapability { app: String, slug: String },

    /// Tools were requested before the selection hook ran
    #[error("Toolkit '{0}' has not been initialized (call set_default_tools first)")]
    NotInitialized(String),

    /// Tool not found in a registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Two providers expose the same tool name
    #[error("Tool name conflict: '{name}' already exists (from provider '{provider}')")]
    ToolNameConflict { name: String, provider: String },
}

impl ToolkitError {
    /// Create an API error from a status code and body
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ToolkitError::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether the service rejected our credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ToolkitError::Api { status: 401 | 403, .. } | ToolkitError::MissingApiKey)
    }
}

/// Result type alias for toolkit operations
pub type ToolkitResult<T> = Result<T, ToolkitError>;
