//! Composio Tool Provider
//!
//! Implements ToolProvider for a component whose tool selection has been resolved

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::{ToolkitError, ToolkitResult};
use crate::tools::{Tool, ToolProvider};

use super::base::{dedup_actions, resolve_selection, ToolkitComponent};
use super::source::CapabilitySource;
use super::tool_adapter::ComposioToolAdapter;
use super::types::ActionInfo;

/// Tool provider exposing a component's active Composio actions
pub struct ComposioToolProvider {
    app_name: String,
    user_id: String,
    source: Arc<dyn CapabilitySource>,

    /// Explicit selection carried over from the component
    selection: Option<Vec<String>>,

    /// Currently active actions
    active: RwLock<Vec<ActionInfo>>,
}

impl ComposioToolProvider {
    /// Build a provider from a component after its tool-selection hook ran
    pub fn from_component<C: ToolkitComponent + ?Sized>(component: &C) -> ToolkitResult<Self> {
        let app_name = component.metadata().app_name;
        let base = component.base();

        if !base.is_initialized() {
            return Err(ToolkitError::NotInitialized(app_name.to_string()));
        }

        Ok(Self {
            app_name: app_name.to_string(),
            user_id: base.user_id().to_string(),
            source: base.source().clone(),
            selection: base.tools.clone(),
            active: RwLock::new(base.active_tools().to_vec()),
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Slugs of the currently active actions
    pub async fn active_slugs(&self) -> Vec<String> {
        self.active.read().await.iter().map(|a| a.slug.clone()).collect()
    }
}

#[async_trait]
impl ToolProvider for ComposioToolProvider {
    async fn get_tools(&self) -> Result<Vec<Arc<dyn Tool>>> {
        let active = self.active.read().await;

        let tools: Vec<Arc<dyn Tool>> = active
            .iter()
            .map(|action| {
                Arc::new(ComposioToolAdapter::new(
                    self.app_name.clone(),
                    self.user_id.clone(),
                    self.source.clone(),
                    action.clone(),
                )) as Arc<dyn Tool>
            })
            .collect();

        tracing::info!(
            "[ComposioToolProvider] Created {} tool adapters for '{}'",
            tools.len(),
            self.app_name
        );

        Ok(tools)
    }

    async fn refresh(&self) -> Result<()> {
        tracing::info!("[ComposioToolProvider] Refreshing '{}'", self.app_name);

        let available = dedup_actions(self.source.list_actions(&self.app_name).await?);
        let active = resolve_selection(&self.app_name, &available, self.selection.as_deref())?;

        *self.active.write().await = active;

        Ok(())
    }

    fn name(&self) -> &str {
        &self.app_name
    }

    fn is_dynamic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composio::base::{ComponentMetadata, ComposioBase};
    use crate::composio::StaticCapabilitySource;
    use crate::tools::ToolRegistry;
    use serde_json::json;

    struct SlackComponent {
        base: ComposioBase,
    }

    impl ToolkitComponent for SlackComponent {
        fn metadata(&self) -> ComponentMetadata {
            ComponentMetadata {
                display_name: "Slack",
                icon: "Slack",
                documentation: "https://docs.composio.dev",
                app_name: "slack",
            }
        }

        fn base(&self) -> &ComposioBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ComposioBase {
            &mut self.base
        }
    }

    fn component() -> SlackComponent {
        let source = StaticCapabilitySource::new().with_app(
            "slack",
            vec![
                ActionInfo::new("SLACK_SEND_MESSAGE", "Send a message"),
                ActionInfo::new("SLACK_LIST_CHANNELS", "List channels"),
            ],
        );
        SlackComponent {
            base: ComposioBase::new(Arc::new(source), "user-1"),
        }
    }

    #[test]
    fn test_provider_requires_setup() {
        let err = ComposioToolProvider::from_component(&component()).err().unwrap();
        assert!(matches!(err, ToolkitError::NotInitialized(ref app) if app == "slack"));
    }

    #[tokio::test]
    async fn test_provider_registers_active_tools() {
        let mut slack = component();
        slack.set_default_tools().await.unwrap();

        let provider = Arc::new(ComposioToolProvider::from_component(&slack).unwrap());
        assert!(provider.is_dynamic());
        assert_eq!(provider.name(), "slack");

        let mut registry = ToolRegistry::new();
        registry.add_provider(provider).await.unwrap();
        assert_eq!(registry.tool_names(), vec!["SLACK_LIST_CHANNELS", "SLACK_SEND_MESSAGE"]);

        let result = registry
            .execute("SLACK_SEND_MESSAGE", &json!({ "text": "hi" }))
            .await
            .unwrap();
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn test_refresh_keeps_selection() {
        let mut slack = component();
        slack.base_mut().tools = Some(vec!["SLACK_LIST_CHANNELS".into()]);
        slack.set_default_tools().await.unwrap();

        let provider = ComposioToolProvider::from_component(&slack).unwrap();
        provider.refresh().await.unwrap();

        assert_eq!(provider.active_slugs().await, vec!["SLACK_LIST_CHANNELS"]);
        assert_eq!(provider.get_tools().await.unwrap().len(), 1);
    }
}
