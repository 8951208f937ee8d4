//! Caching for frequent Composio lookups
//!
//! Toolkit listings change rarely and are cached for minutes; connected
//! accounts change when a user connects an app and are cached for seconds.
//! Action execution is never cached.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::config::ComposioConfig;
use super::source::CapabilitySource;
use super::types::{ActionInfo, ConnectedAccount, ExecutionResponse};
use crate::core::ToolkitResult;

/// String-keyed cache whose entries expire after a fixed lifetime
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, (V, Instant)>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a fresh entry, if any
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|(_, stored_at)| stored_at.elapsed() < self.ttl)
            .map(|(value, _)| value.clone())
    }

    /// Store an entry, dropping expired ones on the way
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, (_, stored_at)| stored_at.elapsed() < self.ttl);
        entries.insert(key.into(), (value, Instant::now()));
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Drop every expired entry, returning how many were removed
    ///
    /// `insert` already sweeps; call this from a periodic task to also reclaim
    /// entries of keys that are no longer written.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, (_, stored_at)| stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    /// Number of stored entries, fresh or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Capability source that caches listings from an inner source
pub struct CachedCapabilitySource<S> {
    inner: S,
    toolkits: TtlCache<Vec<ActionInfo>>,
    accounts: TtlCache<Vec<ConnectedAccount>>,
}

impl<S: CapabilitySource> CachedCapabilitySource<S> {
    /// Wrap a source using the cache lifetimes from the configuration
    pub fn new(inner: S, config: &ComposioConfig) -> Self {
        Self::with_ttls(inner, config.toolkit_cache_ttl(), config.accounts_cache_ttl())
    }

    pub fn with_ttls(inner: S, toolkit_ttl: Duration, accounts_ttl: Duration) -> Self {
        Self {
            inner,
            toolkits: TtlCache::new(toolkit_ttl),
            accounts: TtlCache::new(accounts_ttl),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Forget the cached action listing of an app
    pub async fn invalidate_toolkit(&self, app_name: &str) {
        self.toolkits.invalidate(app_name).await;
    }

    /// Forget the cached connected accounts of a user
    pub async fn invalidate_connected_accounts(&self, user_id: &str) {
        self.accounts.invalidate(user_id).await;
    }

    /// Drop expired entries from both caches
    pub async fn cleanup_expired(&self) -> usize {
        let removed = self.toolkits.cleanup_expired().await + self.accounts.cleanup_expired().await;
        if removed > 0 {
            tracing::debug!("[CachedCapabilitySource] Removed {} expired entries", removed);
        }
        removed
    }
}

#[async_trait]
impl<S: CapabilitySource> CapabilitySource for CachedCapabilitySource<S> {
    async fn list_actions(&self, app_name: &str) -> ToolkitResult<Vec<ActionInfo>> {
        if let Some(actions) = self.toolkits.get(app_name).await {
            tracing::debug!("[CachedCapabilitySource] Toolkit '{}' served from cache", app_name);
            return Ok(actions);
        }

        let actions = self.inner.list_actions(app_name).await?;
        self.toolkits.insert(app_name, actions.clone()).await;
        Ok(actions)
    }

    async fn list_connected_accounts(&self, user_id: &str) -> ToolkitResult<Vec<ConnectedAccount>> {
        if let Some(accounts) = self.accounts.get(user_id).await {
            return Ok(accounts);
        }

        let accounts = self.inner.list_connected_accounts(user_id).await?;
        self.accounts.insert(user_id, accounts.clone()).await;
        Ok(accounts)
    }

    async fn execute_action(
        &self,
        action: &str,
        user_id: &str,
        arguments: Value,
    ) -> ToolkitResult<ExecutionResponse> {
        self.inner.execute_action(action, user_id, arguments).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
