//! Composio wire types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status Composio reports for a usable connection
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Normalize a toolkit slug for comparison
///
/// Lowercases and strips dashes, so `google-calendar` and `googlecalendar` compare equal.
pub fn normalize_slug(slug: &str) -> String {
    slug.chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Reference to the toolkit an item belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolkitRef {
    pub slug: String,
}

/// One capability (action) exposed by a toolkit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionInfo {
    /// Unique action slug, e.g. `YOUTUBE_LIST_CHANNEL_VIDEOS`
    pub slug: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// JSON schema of the action arguments
    #[serde(default)]
    pub input_parameters: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolkit: Option<ToolkitRef>,
}

impl ActionInfo {
    /// Create an action with an empty argument schema
    pub fn new(slug: impl Into<String>, description: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            name: slug.clone(),
            slug,
            description: description.into(),
            input_parameters: Value::Null,
            toolkit: None,
        }
    }

    /// Set the argument schema
    pub fn with_input_parameters(mut self, schema: Value) -> Self {
        self.input_parameters = schema;
        self
    }

    /// Set the owning toolkit
    pub fn with_toolkit(mut self, slug: impl Into<String>) -> Self {
        self.toolkit = Some(ToolkitRef { slug: slug.into() });
        self
    }
}

/// A user's connection to a toolkit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub id: String,

    #[serde(default)]
    pub toolkit: Option<ToolkitRef>,

    pub status: String,
}

impl ConnectedAccount {
    /// Whether the connection can be used
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }

    /// Whether this account belongs to the given app
    pub fn matches_app(&self, app_name: &str) -> bool {
        self.toolkit
            .as_ref()
            .map(|t| normalize_slug(&t.slug) == normalize_slug(app_name))
            .unwrap_or(false)
    }
}

/// Outcome of executing an action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub data: Value,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub successful: bool,
}

impl ExecutionResponse {
    pub fn success(data: Value) -> Self {
        Self {
            data,
            error: None,
            successful: true,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: Value::Null,
            error: Some(error.into()),
            successful: false,
        }
    }
}

/// Cursor-paginated listing
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,

    #[serde(default)]
    pub next_cursor: Option<String>,
}
