//! Composio Tool Adapter
//!
//! Adapts a Composio action to implement the crate's Tool trait

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::tools::{Tool, ToolDefinition, ToolInfo, ToolInputSchema, ToolResult};

use super::source::CapabilitySource;
use super::types::{ActionInfo, ExecutionResponse};

/// Adapter that wraps one Composio action to implement the Tool trait
pub struct ComposioToolAdapter {
    /// Toolkit the action belongs to
    app_name: String,

    /// User on whose behalf the action runs
    user_id: String,

    source: Arc<dyn CapabilitySource>,

    action: ActionInfo,

    tool_definition: ToolDefinition,
}

impl ComposioToolAdapter {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        source: Arc<dyn CapabilitySource>,
        action: ActionInfo,
    ) -> Self {
        let tool_definition = Self::convert_tool_definition(&action);

        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            source,
            action,
            tool_definition,
        }
    }

    /// Convert a Composio action to a ToolDefinition
    ///
    /// Action slugs are already unique across toolkits, so they are exposed as-is.
    fn convert_tool_definition(action: &ActionInfo) -> ToolDefinition {
        ToolDefinition {
            name: action.slug.clone(),
            description: (!action.description.is_empty()).then(|| action.description.clone()),
            input_schema: ToolInputSchema::from_json_schema(&action.input_parameters),
        }
    }

    /// Convert an execution response to a ToolResult
    fn convert_response(response: ExecutionResponse) -> Result<ToolResult> {
        if response.successful {
            let output = match response.data {
                Value::String(text) => text,
                data => serde_json::to_string_pretty(&data)?,
            };
            Ok(ToolResult::success(output))
        } else {
            Ok(ToolResult::error(
                response
                    .error
                    .unwrap_or_else(|| "Composio action failed without an error message".to_string()),
            ))
        }
    }

    pub fn action(&self) -> &ActionInfo {
        &self.action
    }
}

#[async_trait]
impl Tool for ComposioToolAdapter {
    fn name(&self) -> &str {
        &self.action.slug
    }

    fn description(&self) -> &str {
        self.tool_definition
            .description
            .as_deref()
            .unwrap_or("Composio action (no description)")
    }

    fn definition(&self) -> ToolDefinition {
        self.tool_definition.clone()
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        ToolInfo {
            name: self.action.slug.clone(),
            action_description: format!(
                "Call {} action '{}' as user '{}'",
                self.app_name, self.action.slug, self.user_id
            ),
            details: Some(format!("Input: {}", input)),
        }
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        tracing::info!(
            "[ComposioToolAdapter] Executing '{}' ({})",
            self.action.slug,
            self.app_name
        );
        tracing::debug!("[ComposioToolAdapter] Input: {}", input);

        let response = self
            .source
            .execute_action(&self.action.slug, &self.user_id, input.clone())
            .await?;

        let result = Self::convert_response(response)?;

        tracing::debug!(
            "[ComposioToolAdapter] '{}' completed. Is error: {}",
            self.action.slug,
            result.is_error
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composio::StaticCapabilitySource;
    use serde_json::json;

    fn video_details() -> ActionInfo {
        ActionInfo::new("YOUTUBE_VIDEO_DETAILS", "Fetch details of a video").with_input_parameters(
            json!({
                "type": "object",
                "properties": { "id": { "type": "string" } },
                "required": ["id"]
            }),
        )
    }

    fn adapter(source: StaticCapabilitySource) -> ComposioToolAdapter {
        ComposioToolAdapter::new("youtube", "user-1", Arc::new(source), video_details())
    }

    #[test]
    fn test_tool_definition_conversion() {
        let def = ComposioToolAdapter::convert_tool_definition(&video_details());
        assert_eq!(def.name, "YOUTUBE_VIDEO_DETAILS");
        assert_eq!(def.description.as_deref(), Some("Fetch details of a video"));
        assert_eq!(def.input_schema.required, Some(vec!["id".to_string()]));

        let bare = ComposioToolAdapter::convert_tool_definition(&ActionInfo::new("YOUTUBE_X", ""));
        assert!(bare.description.is_none());
        assert_eq!(bare.input_schema.schema_type, "object");
    }

    #[test]
    fn test_failed_response_becomes_error_result() {
        let result =
            ComposioToolAdapter::convert_response(ExecutionResponse::failure("quota exceeded")).unwrap();
        assert!(result.is_error);
        assert_eq!(result.output, "quota exceeded");

        let result = ComposioToolAdapter::convert_response(ExecutionResponse {
            data: Value::Null,
            error: None,
            successful: false,
        })
        .unwrap();
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_execute_dispatches_through_source() {
        let source = StaticCapabilitySource::new().with_app("youtube", vec![video_details()]);
        let tool = adapter(source);

        let result = tool.execute(&json!({ "id": "abc" })).await.unwrap();
        assert!(!result.is_error);

        let output: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(output["action"], "YOUTUBE_VIDEO_DETAILS");
        assert_eq!(output["arguments"]["id"], "abc");

        let info = tool.get_info(&json!({}));
        assert!(info.action_description.contains("user-1"));
    }
}
