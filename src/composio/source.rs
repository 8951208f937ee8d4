//! Capability sources
//!
//! A `CapabilitySource` is anything that can list an app's actions, list a
//! user's connected accounts and execute an action. `ComposioClient` talks to
//! the Composio backend; `StaticCapabilitySource` serves fixed data.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::{ActionInfo, ConnectedAccount, ExecutionResponse};
use crate::core::ToolkitResult;

/// Backend that discovers and dispatches toolkit capabilities
#[async_trait]
pub trait CapabilitySource: Send + Sync {
    /// List every action the given app exposes
    async fn list_actions(&self, app_name: &str) -> ToolkitResult<Vec<ActionInfo>>;

    /// List the connected accounts of a user
    async fn list_connected_accounts(&self, user_id: &str) -> ToolkitResult<Vec<ConnectedAccount>>;

    /// Execute an action on behalf of a user
    async fn execute_action(
        &self,
        action: &str,
        user_id: &str,
        arguments: Value,
    ) -> ToolkitResult<ExecutionResponse>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// In-memory capability source
///
/// Serves a fixed action list per app. Executing a known action echoes the
/// action slug and its arguments back; unknown actions fail.
#[derive(Debug, Default)]
pub struct StaticCapabilitySource {
    apps: HashMap<String, Vec<ActionInfo>>,
    accounts: Vec<ConnectedAccount>,
    list_calls: AtomicUsize,
    account_calls: AtomicUsize,
    execute_calls: AtomicUsize,
}

impl StaticCapabilitySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the actions reported for an app
    pub fn with_app(mut self, app_name: impl Into<String>, actions: Vec<ActionInfo>) -> Self {
        self.apps.insert(app_name.into(), actions);
        self
    }

    /// Add a connected account
    pub fn with_account(mut self, account: ConnectedAccount) -> Self {
        self.accounts.push(account);
        self
    }

    /// Number of `list_actions` calls served so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_connected_accounts` calls served so far
    pub fn account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }

    /// Number of `execute_action` calls served so far
    pub fn execute_calls(&self) -> usize {
        self.execute_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilitySource for StaticCapabilitySource {
    async fn list_actions(&self, app_name: &str) -> ToolkitResult<Vec<ActionInfo>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.apps.get(app_name).cloned().unwrap_or_default())
    }

    async fn list_connected_accounts(&self, _user_id: &str) -> ToolkitResult<Vec<ConnectedAccount>> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.clone())
    }

    async fn execute_action(
        &self,
        action: &str,
        _user_id: &str,
        arguments: Value,
    ) -> ToolkitResult<ExecutionResponse> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        let known = self
            .apps
            .values()
            .flatten()
            .any(|a| a.slug == action);

        if known {
            Ok(ExecutionResponse::success(json!({
                "action": action,
                "arguments": arguments,
            })))
        } else {
            Ok(ExecutionResponse::failure(format!("Unknown action: {}", action)))
        }
    }

    fn name(&self) -> &str {
        "static"
    }
}
