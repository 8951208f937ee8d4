//! Tool registry for managing available tools
//!
//! The registry holds every tool the host can dispatch to.
//! It supports both static tools (registered directly) and dynamic tools
//! from providers (like Composio toolkits).

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use super::definition::ToolDefinition;
use super::provider::ToolProvider;
use super::tool::{Tool, ToolInfo, ToolResult};
use crate::core::ToolkitError;

/// Registry that holds all available tools
pub struct ToolRegistry {
    /// All tools by exposed name
    tools: HashMap<String, Arc<dyn Tool>>,

    /// Dynamic tool providers
    providers: Vec<Arc<dyn ToolProvider>>,

    /// Names contributed by each provider, keyed by provider name
    provider_tools: HashMap<String, Vec<String>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            providers: Vec::new(),
            provider_tools: HashMap::new(),
        }
    }

    /// Register a static tool in the registry
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        tracing::info!("Registering tool: {}", name);
        self.tools.insert(name, Arc::new(tool));
    }

    /// Add a tool provider
    ///
    /// Fetches all tools from the provider immediately. Nothing is registered
    /// if any tool name conflicts with an existing tool.
    pub async fn add_provider(&mut self, provider: Arc<dyn ToolProvider>) -> Result<()> {
        tracing::info!(
            "[ToolRegistry] Adding provider '{}' (dynamic: {})",
            provider.name(),
            provider.is_dynamic()
        );

        let tools = provider.get_tools().await?;

        if let Some(conflict) = tools.iter().find(|t| self.tools.contains_key(t.name())) {
            return Err(ToolkitError::ToolNameConflict {
                name: conflict.name().to_string(),
                provider: provider.name().to_string(),
            }
            .into());
        }

        let mut names = Vec::with_capacity(tools.len());
        for tool in tools {
            let name = tool.name().to_string();
            tracing::debug!(
                "[ToolRegistry] Registering tool '{}' from provider '{}'",
                name,
                provider.name()
            );
            names.push(name.clone());
            self.tools.insert(name, tool);
        }

        tracing::info!(
            "[ToolRegistry] Provider '{}' contributed {} tools",
            provider.name(),
            names.len()
        );

        self.provider_tools
            .entry(provider.name().to_string())
            .or_default()
            .extend(names);
        self.providers.push(provider);

        Ok(())
    }

    /// Refresh all providers
    ///
    /// Provider tools are replaced with a fresh listing; static tools are kept.
    /// The new tool set is swapped in only once every provider has answered, so
    /// a failing provider or a name clash leaves the registry untouched.
    pub async fn refresh_providers(&mut self) -> Result<()> {
        tracing::info!("[ToolRegistry] Refreshing all providers");

        let mut tools: HashMap<String, Arc<dyn Tool>> = self
            .tools
            .iter()
            .filter(|(name, _)| !self.is_provider_tool(name))
            .map(|(name, tool)| (name.clone(), tool.clone()))
            .collect();
        let mut provider_tools: HashMap<String, Vec<String>> = HashMap::new();

        for provider in &self.providers {
            if provider.is_dynamic() {
                provider.refresh().await?;
            }

            let listed = provider.get_tools().await?;
            let names = provider_tools
                .entry(provider.name().to_string())
                .or_default();

            for tool in listed {
                let name = tool.name().to_string();
                if tools.contains_key(&name) {
                    tracing::warn!(
                        "[ToolRegistry] Refresh of '{}' clashes on '{}'; keeping previous tools",
                        provider.name(),
                        name
                    );
                    return Err(ToolkitError::ToolNameConflict {
                        name,
                        provider: provider.name().to_string(),
                    }
                    .into());
                }
                names.push(name.clone());
                tools.insert(name, tool);
            }
        }

        self.tools = tools;
        self.provider_tools = provider_tools;

        tracing::info!("[ToolRegistry] Provider refresh complete ({} tools)", self.tools.len());

        Ok(())
    }

    fn is_provider_tool(&self, name: &str) -> bool {
        self.provider_tools
            .values()
            .any(|names| names.iter().any(|n| n == name))
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get all tool definitions, sorted by name
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<_> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Get information about a tool invocation
    pub fn get_tool_info(&self, name: &str, input: &Value) -> Option<ToolInfo> {
        self.tools.get(name).map(|t| t.get_info(input))
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: &Value) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolkitError::ToolNotFound(name.to_string()))?;

        tracing::info!("Executing tool: {}", name);
        tracing::debug!("Input: {:?}", input);

        let result = tool.execute(input).await?;

        tracing::debug!("Tool {} completed. Is error: {}", name, result.is_error);

        Ok(result)
    }

    /// Get the sorted list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
