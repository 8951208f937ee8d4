//! Tool providers
//!
//! A provider hands a batch of tools to a `ToolRegistry`. A Composio toolkit
//! is one provider: each active action of the app becomes one tool.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::tool::Tool;

/// Source of a named group of tools
///
/// The registry owns the tools by name and remembers which provider each one
/// came from, so a provider only has to report its current set.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// The provider's current tools
    ///
    /// Read once on `ToolRegistry::add_provider` and again after every
    /// `refresh`. Must not hit the network for a provider that caches its
    /// active set.
    async fn get_tools(&self) -> Result<Vec<Arc<dyn Tool>>>;

    /// Re-sync the active set with the backend
    ///
    /// A toolkit provider re-lists the app's actions and re-resolves the
    /// configured selection against them. An error leaves the previous set in
    /// place; the registry only swaps in new tools once every provider has
    /// refreshed without error.
    async fn refresh(&self) -> Result<()> {
        Ok(())
    }

    /// Name used in logs and conflict errors; the app name for a toolkit
    fn name(&self) -> &str;

    /// Whether `refresh` can change the tool set
    fn is_dynamic(&self) -> bool {
        false
    }
}
