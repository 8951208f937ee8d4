//! Composio HTTP client
//!
//! Direct REST client for the Composio v3 API:
//! - `GET  /api/v3/tools?toolkit_slug=...` - list a toolkit's actions (cursor paginated)
//! - `GET  /api/v3/connected_accounts?user_ids=...` - list a user's connections
//! - `POST /api/v3/tools/execute/{slug}` - execute an action
//!
//! ```ignore
//! let client = ComposioClient::from_env()?;
//! let actions = client.list_actions("youtube").await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::config::ComposioConfig;
use super::source::CapabilitySource;
use super::types::{ActionInfo, ConnectedAccount, ExecutionResponse, Page};
use crate::core::{ToolkitError, ToolkitResult};

/// Upper bound on followed pages, in case the backend keeps returning a cursor
const MAX_PAGES: usize = 50;

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    user_id: &'a str,
    arguments: Value,
}

/// Client for the Composio REST API
#[derive(Debug, Clone)]
pub struct ComposioClient {
    client: Client,
    config: ComposioConfig,
}

impl ComposioClient {
    /// Create a client from a validated configuration
    pub fn new(config: ComposioConfig) -> ToolkitResult<Self> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables (see `ComposioConfig::from_env`)
    pub fn from_env() -> ToolkitResult<Self> {
        Self::new(ComposioConfig::from_env()?)
    }

    pub fn config(&self) -> &ComposioConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("x-api-key", &self.config.api_key)
            .header("Accept", "application/json")
    }

    /// Send a request and decode the JSON body, mapping non-2xx answers to `Api` errors
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ToolkitResult<T> {
        let response = self.authorized(builder).send().await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("[ComposioClient] Response status: {}", status);

        if !status.is_success() {
            tracing::error!("[ComposioClient] API error: {} - {}", status, body);
            return Err(ToolkitError::api(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CapabilitySource for ComposioClient {
    async fn list_actions(&self, app_name: &str) -> ToolkitResult<Vec<ActionInfo>> {
        let url = self.config.url("/api/v3/tools");
        let limit = self.config.page_size.to_string();

        let mut actions = Vec::new();
        let mut cursor: Option<String> = None;
        let mut complete = false;

        for page_no in 0..MAX_PAGES {
            let mut query = vec![("toolkit_slug", app_name), ("limit", limit.as_str())];
            if let Some(c) = cursor.as_deref() {
                query.push(("cursor", c));
            }

            let page: Page<ActionInfo> = self.send_json(self.client.get(&url).query(&query)).await?;

            tracing::debug!(
                "[ComposioClient] Page {} for '{}': {} actions",
                page_no,
                app_name,
                page.items.len()
            );

            let exhausted = page.items.is_empty();
            actions.extend(page.items);

            match page.next_cursor {
                Some(next) if !next.is_empty() && !exhausted => cursor = Some(next),
                _ => {
                    complete = true;
                    break;
                }
            }
        }

        if !complete {
            tracing::warn!(
                "[ComposioClient] Stopped listing '{}' after {} pages; {} actions may be incomplete",
                app_name,
                MAX_PAGES,
                actions.len()
            );
        }

        tracing::info!(
            "[ComposioClient] Listed {} actions for toolkit '{}'",
            actions.len(),
            app_name
        );

        Ok(actions)
    }

    async fn list_connected_accounts(&self, user_id: &str) -> ToolkitResult<Vec<ConnectedAccount>> {
        let url = self.config.url("/api/v3/connected_accounts");

        let page: Page<ConnectedAccount> = self
            .send_json(self.client.get(&url).query(&[("user_ids", user_id)]))
            .await?;

        tracing::info!(
            "[ComposioClient] User '{}' has {} connected accounts",
            user_id,
            page.items.len()
        );

        Ok(page.items)
    }

    async fn execute_action(
        &self,
        action: &str,
        user_id: &str,
        arguments: Value,
    ) -> ToolkitResult<ExecutionResponse> {
        let url = self.config.url(&format!("/api/v3/tools/execute/{}", action));

        tracing::info!("[ComposioClient] Executing '{}' for user '{}'", action, user_id);

        let request = ExecuteRequest { user_id, arguments };
        self.send_json(self.client.post(&url).json(&request)).await
    }

    fn name(&self) -> &str {
        "composio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ComposioClient {
        ComposioClient::new(ComposioConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn test_new_rejects_missing_key() {
        let err = ComposioClient::new(ComposioConfig::new("")).unwrap_err();
        assert!(matches!(err, ToolkitError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_list_actions_follows_cursor() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/tools"))
            .and(query_param("toolkit_slug", "youtube"))
            .and(query_param("cursor", "page-2"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "slug": "YOUTUBE_UPDATE_VIDEO" }],
                "next_cursor": null
            })))
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v3/tools"))
            .and(query_param("toolkit_slug", "youtube"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "slug": "YOUTUBE_LIST_CHANNEL_VIDEOS", "description": "List videos" },
                    { "slug": "YOUTUBE_SEARCH_YOU_TUBE" }
                ],
                "next_cursor": "page-2"
            })))
            .mount(&server)
            .await;

        let actions = client_for(&server).list_actions("youtube").await.unwrap();
        let slugs: Vec<_> = actions.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec![
                "YOUTUBE_LIST_CHANNEL_VIDEOS",
                "YOUTUBE_SEARCH_YOU_TUBE",
                "YOUTUBE_UPDATE_VIDEO"
            ]
        );
    }

    #[tokio::test]
    async fn test_list_actions_stops_on_empty_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/tools"))
            .and(query_param("cursor", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [],
                "next_cursor": "page-3"
            })))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v3/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "slug": "YOUTUBE_LIST_CAPTION_TRACK" }],
                "next_cursor": "page-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let actions = client_for(&server).list_actions("youtube").await.unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[tokio::test]
    async fn test_list_actions_caps_followed_pages() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "slug": "YOUTUBE_SEARCH_YOU_TUBE" }],
                "next_cursor": "again"
            })))
            .expect(MAX_PAGES as u64)
            .mount(&server)
            .await;

        let actions = client_for(&server).list_actions("youtube").await.unwrap();
        assert_eq!(actions.len(), MAX_PAGES);
    }

    #[tokio::test]
    async fn test_api_error_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/tools"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_actions("youtube").await.unwrap_err();
        match err {
            ToolkitError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_connected_accounts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/connected_accounts"))
            .and(query_param("user_ids", "user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "ca_1", "toolkit": { "slug": "youtube" }, "status": "ACTIVE" }
                ]
            })))
            .mount(&server)
            .await;

        let accounts = client_for(&server)
            .list_connected_accounts("user-1")
            .await
            .unwrap();
        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].matches_app("youtube"));
    }

    #[tokio::test]
    async fn test_execute_action() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v3/tools/execute/YOUTUBE_VIDEO_DETAILS"))
            .and(body_json(json!({ "user_id": "user-1", "arguments": { "id": "abc" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "title": "A video" },
                "error": null,
                "successful": true
            })))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .execute_action("YOUTUBE_VIDEO_DETAILS", "user-1", json!({ "id": "abc" }))
            .await
            .unwrap();

        assert!(response.successful);
        assert_eq!(response.data["title"], "A video");
    }
}
