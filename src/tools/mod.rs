//! Tool system
//!
//! This module provides:
//! - `Tool` trait - Interface for implementing tools
//! - `ToolResult` - Result type for tool execution
//! - `ToolDefinition` - Name, description and input schema handed to the host
//! - `ToolRegistry` - Registry for managing available tools
//! - `ToolProvider` trait - Interface for dynamic tool sources (Composio toolkits, etc.)

mod definition;
mod provider;
mod registry;
mod tool;

pub use definition::{ToolDefinition, ToolInputSchema};
pub use provider::ToolProvider;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolInfo, ToolResult};
