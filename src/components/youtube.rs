//! YouTube component
//!
//! Exposes every YouTube action Composio offers (23 at the time of writing).
//! The selection is left unset so the base provider activates all of them.

use async_trait::async_trait;

use crate::composio::{ComponentMetadata, ComposioBase, ToolkitComponent};
use crate::core::ToolkitResult;

pub const YOUTUBE: ComponentMetadata = ComponentMetadata {
    display_name: "YouTube",
    icon: "YouTube",
    documentation: "https://docs.composio.dev",
    app_name: "youtube",
};

/// Composio YouTube integration
#[derive(Debug)]
pub struct YoutubeComponent {
    base: ComposioBase,
}

impl YoutubeComponent {
    pub fn new(base: ComposioBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl ToolkitComponent for YoutubeComponent {
    fn metadata(&self) -> ComponentMetadata {
        YOUTUBE
    }

    fn base(&self) -> &ComposioBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComposioBase {
        &mut self.base
    }

    async fn set_default_tools(&mut self) -> ToolkitResult<()> {
        self.base.set_default_tools(YOUTUBE.app_name).await?;
        // self.base.tools stays unset: every YouTube action remains active.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composio::{
        ActionInfo, CapabilitySource, ComposioToolProvider, ConnectedAccount, ExecutionResponse,
        StaticCapabilitySource,
    };
    use crate::core::ToolkitError;
    use crate::tools::{ToolProvider, ToolRegistry};
    use serde_json::Value;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn youtube_actions(n: usize) -> Vec<ActionInfo> {
        (0..n)
            .map(|i| ActionInfo::new(format!("YOUTUBE_ACTION_{:02}", i), "").with_toolkit("youtube"))
            .collect()
    }

    fn component(actions: Vec<ActionInfo>) -> YoutubeComponent {
        let source = StaticCapabilitySource::new().with_app("youtube", actions);
        YoutubeComponent::new(ComposioBase::new(Arc::new(source), "user-1"))
    }

    /// Source whose every call fails with an auth error
    struct RejectingSource;

    #[async_trait]
    impl CapabilitySource for RejectingSource {
        async fn list_actions(&self, _app_name: &str) -> ToolkitResult<Vec<ActionInfo>> {
            Err(ToolkitError::api(401, "invalid api key"))
        }

        async fn list_connected_accounts(&self, _user_id: &str) -> ToolkitResult<Vec<ConnectedAccount>> {
            Err(ToolkitError::api(401, "invalid api key"))
        }

        async fn execute_action(
            &self,
            _action: &str,
            _user_id: &str,
            _arguments: Value,
        ) -> ToolkitResult<ExecutionResponse> {
            Err(ToolkitError::api(401, "invalid api key"))
        }

        fn name(&self) -> &str {
            "rejecting"
        }
    }

    #[test]
    fn test_metadata() {
        let youtube = component(Vec::new());
        let meta = youtube.metadata();

        assert_eq!(meta.app_name, "youtube");
        assert_eq!(meta.display_name, "YouTube");
        assert!(!meta.icon.is_empty());
        assert!(meta.documentation.starts_with("https://"));
    }

    #[test]
    fn test_selection_unset_by_default() {
        let youtube = component(youtube_actions(3));
        assert!(youtube.base().tools.is_none());
        assert!(!youtube.base().is_initialized());
    }

    #[tokio::test]
    async fn test_all_23_actions_active() {
        let actions = youtube_actions(23);
        let mut youtube = component(actions.clone());

        youtube.set_default_tools().await.unwrap();

        let active = youtube.base().active_tools();
        assert_eq!(active.len(), 23);
        assert_eq!(active, actions.as_slice());

        let unique: HashSet<_> = active.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(unique.len(), 23);
        assert!(youtube.base().tools.is_none());
    }

    #[tokio::test]
    async fn test_no_actions_is_not_an_error() {
        let mut youtube = component(Vec::new());

        youtube.set_default_tools().await.unwrap();

        assert!(youtube.base().is_initialized());
        assert!(youtube.base().active_tools().is_empty());
    }

    #[tokio::test]
    async fn test_base_errors_propagate_unchanged() {
        let mut youtube = YoutubeComponent::new(ComposioBase::new(Arc::new(RejectingSource), "user-1"));

        let err = youtube.set_default_tools().await.unwrap_err();

        assert!(matches!(err, ToolkitError::Api { status: 401, .. }));
        assert!(!youtube.base().is_initialized());
    }

    #[tokio::test]
    async fn test_registered_in_host_registry() {
        let mut youtube = component(youtube_actions(23));
        youtube.set_default_tools().await.unwrap();

        let provider = Arc::new(ComposioToolProvider::from_component(&youtube).unwrap());
        assert_eq!(provider.name(), "youtube");

        let mut registry = ToolRegistry::new();
        registry.add_provider(provider).await.unwrap();
        assert_eq!(registry.len(), 23);
    }
}
