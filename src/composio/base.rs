//! Composio base provider
//!
//! `ComposioBase` is the shared part of every Composio-backed component:
//! it owns the capability source, the user on whose behalf tools run, and the
//! tool selection. Named-service components (YouTube, ...) are small records
//! implementing `ToolkitComponent` around a `ComposioBase`.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use super::source::CapabilitySource;
use super::types::{ActionInfo, ConnectedAccount};
use crate::core::{ToolkitError, ToolkitResult};

/// Identity metadata a component declares to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentMetadata {
    /// Name shown in the host's component palette
    pub display_name: &'static str,
    /// Icon identifier
    pub icon: &'static str,
    /// Documentation link
    pub documentation: &'static str,
    /// Composio toolkit slug
    pub app_name: &'static str,
}

/// Shared state and behavior of Composio-backed components
pub struct ComposioBase {
    source: Arc<dyn CapabilitySource>,
    user_id: String,

    /// Explicit tool selection. `None` selects every capability the app exposes.
    pub tools: Option<Vec<String>>,

    available: Vec<ActionInfo>,
    active: Vec<ActionInfo>,
    initialized: bool,
}

impl std::fmt::Debug for ComposioBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposioBase")
            .field("source", &self.source.name())
            .field("user_id", &self.user_id)
            .field("tools", &self.tools)
            .field("available", &self.available.len())
            .field("active", &self.active.len())
            .finish()
    }
}

impl ComposioBase {
    /// Create a base provider for a user
    pub fn new(source: Arc<dyn CapabilitySource>, user_id: impl Into<String>) -> Self {
        Self {
            source,
            user_id: user_id.into(),
            tools: None,
            available: Vec::new(),
            active: Vec::new(),
            initialized: false,
        }
    }

    /// Restrict the active tools to the given action slugs
    pub fn with_tools<I, T>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tools = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    /// Load the app's capabilities and resolve the active tool set
    ///
    /// With no explicit selection every available capability becomes active.
    /// Duplicate slugs reported by the source are dropped (first one wins).
    pub async fn set_default_tools(&mut self, app_name: &str) -> ToolkitResult<()> {
        let listed = self.source.list_actions(app_name).await?;
        let available = dedup_actions(listed);
        let active = resolve_selection(app_name, &available, self.tools.as_deref())?;

        tracing::info!(
            "[ComposioBase] '{}': {} available, {} active",
            app_name,
            available.len(),
            active.len()
        );

        self.available = available;
        self.active = active;
        self.initialized = true;

        Ok(())
    }

    /// The user's first active connected account for the app, if any
    pub async fn connection(&self, app_name: &str) -> ToolkitResult<Option<ConnectedAccount>> {
        let accounts = self.source.list_connected_accounts(&self.user_id).await?;

        Ok(accounts
            .into_iter()
            .find(|a| a.is_active() && a.matches_app(app_name)))
    }

    /// Whether `set_default_tools` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Every capability the app exposes
    pub fn available_tools(&self) -> &[ActionInfo] {
        &self.available
    }

    /// The capabilities exposed to the host
    pub fn active_tools(&self) -> &[ActionInfo] {
        &self.active
    }

    /// Slugs of the active capabilities, in order
    pub fn active_slugs(&self) -> Vec<&str> {
        self.active.iter().map(|a| a.slug.as_str()).collect()
    }

    pub fn source(&self) -> &Arc<dyn CapabilitySource> {
        &self.source
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Drop actions whose slug was already seen, keeping order
pub(crate) fn dedup_actions(actions: Vec<ActionInfo>) -> Vec<ActionInfo> {
    let mut seen = HashSet::new();
    actions
        .into_iter()
        .filter(|a| seen.insert(a.slug.clone()))
        .collect()
}

/// Resolve a tool selection against the available actions
pub(crate) fn resolve_selection(
    app_name: &str,
    available: &[ActionInfo],
    selection: Option<&[String]>,
) -> ToolkitResult<Vec<ActionInfo>> {
    let Some(selection) = selection else {
        return Ok(available.to_vec());
    };

    let mut seen = HashSet::new();
    let mut active = Vec::with_capacity(selection.len());

    for slug in selection {
        if !seen.insert(slug.as_str()) {
            continue;
        }
        let action = available
            .iter()
            .find(|a| &a.slug == slug)
            .ok_or_else(|| ToolkitError::UnknownCapability {
                app: app_name.to_string(),
                slug: slug.clone(),
            })?;
        active.push(action.clone());
    }

    Ok(active)
}

/// A named-service component built on `ComposioBase`
#[async_trait]
pub trait ToolkitComponent: Send + Sync {
    /// Identity metadata read by the host
    fn metadata(&self) -> ComponentMetadata;

    fn base(&self) -> &ComposioBase;

    fn base_mut(&mut self) -> &mut ComposioBase;

    /// Tool-selection hook, run once during setup
    async fn set_default_tools(&mut self) -> ToolkitResult<()> {
        let app_name = self.metadata().app_name;
        self.base_mut().set_default_tools(app_name).await
    }
}
