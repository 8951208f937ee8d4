//! Composio support
//!
//! This module provides the base provider that Composio-backed components
//! build on.
//!
//! # Architecture
//!
//! - `ComposioClient`: REST client for the Composio backend
//! - `CachedCapabilitySource`: TTL caches for toolkit and account listings
//! - `ComposioBase`: source, user and tool selection shared by every component
//! - `ToolkitComponent`: trait implemented by named-service components
//! - `ComposioToolAdapter`: adapts one Composio action to the Tool trait
//! - `ComposioToolProvider`: implements ToolProvider to expose a component's tools
//!
//! # Usage
//!
//! ```ignore
//! use composio_toolkit_sdk::composio::{CachedCapabilitySource, ComposioBase, ComposioClient, ComposioConfig};
//! use composio_toolkit_sdk::components::YoutubeComponent;
//!
//! let config = ComposioConfig::from_env()?;
//! let source = CachedCapabilitySource::new(ComposioClient::new(config.clone())?, &config);
//! let mut youtube = YoutubeComponent::new(ComposioBase::new(Arc::new(source), "user-1"));
//! youtube.set_default_tools().await?;
//! registry.add_provider(Arc::new(ComposioToolProvider::from_component(&youtube)?)).await?;
//! ```

mod base;
mod cache;
mod client;
mod config;
mod provider;
mod source;
mod tool_adapter;
mod types;

// Public exports
pub use base::{ComponentMetadata, ComposioBase, ToolkitComponent};
pub use cache::{CachedCapabilitySource, TtlCache};
pub use client::ComposioClient;
pub use config::{ComposioConfig, DEFAULT_BASE_URL};
pub use provider::ComposioToolProvider;
pub use source::{CapabilitySource, StaticCapabilitySource};
pub use tool_adapter::ComposioToolAdapter;
pub use types::{
    normalize_slug, ActionInfo, ConnectedAccount, ExecutionResponse, ToolkitRef, ACTIVE_STATUS,
};
