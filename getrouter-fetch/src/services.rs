//! Dashboard API endpoints.
//!
//! Thin typed wrappers over [`ApiClient::request_json`]. Paths are relative
//! to the configured API base.

use getrouter_core::{AuthToken, Consumer, Model, RawUsage, Subscription};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;
use url::form_urlencoded;

use crate::client::ApiClient;
use crate::error::FetchError;
use crate::pagination::{fetch_all_pages, Page};
use crate::retry::RetryStrategy;

/// Number of usage records requested for the chart.
pub const USAGE_PAGE_SIZE: u32 = 7;

// ============================================================================
// Responses
// ============================================================================

/// `GET v1/dashboard/consumers` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListConsumersResponse {
    /// Keys on this page.
    pub consumers: Vec<Consumer>,
    /// Token of the next page, empty on the last one.
    pub next_page_token: Option<String>,
}

impl Page for ListConsumersResponse {
    type Item = Consumer;

    fn into_parts(self) -> (Vec<Consumer>, Option<String>) {
        (self.consumers, self.next_page_token)
    }
}

/// `GET v1/dashboard/models` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListModelsResponse {
    /// Models on this page.
    pub models: Vec<Model>,
    /// Token of the next page.
    pub next_page_token: Option<String>,
}

/// `GET v1/dashboard/usages` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListUsagesResponse {
    /// Usage records.
    pub usages: Vec<RawUsage>,
    /// Token of the next page.
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderModelsResponse {
    models: Vec<serde_json::Value>,
}

fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().filter(|(_, value)| !value.is_empty()))
        .finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn consumer_path(id: &str) -> String {
    let id: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("v1/dashboard/consumers/{id}")
}

// ============================================================================
// Auth
// ============================================================================

/// Exchanges a confirmed login code for tokens.
#[instrument(skip(client))]
pub async fn authorize(client: &ApiClient, code: &str) -> Result<AuthToken, FetchError> {
    let body = json!({ "code": code });
    client
        .request_json(Method::POST, "v1/dashboard/auth/authorize", Some(&body))
        .await
}

// ============================================================================
// Consumers
// ============================================================================

/// Fetches one page of keys.
pub async fn list_consumers(
    client: &ApiClient,
    page_token: Option<&str>,
) -> Result<ListConsumersResponse, FetchError> {
    let path = with_query("v1/dashboard/consumers", &[("pageToken", page_token.unwrap_or(""))]);
    Ok(client
        .request_json::<Option<ListConsumersResponse>>(Method::GET, &path, None)
        .await?
        .unwrap_or_default())
}

/// Fetches every key across all pages.
#[instrument(skip(client))]
pub async fn list_all_consumers(client: &ApiClient) -> Result<Vec<Consumer>, FetchError> {
    fetch_all_pages(|token: Option<String>| async move {
        list_consumers(client, token.as_deref()).await
    })
    .await
}

/// Fetches one key, including its secret.
#[instrument(skip(client))]
pub async fn get_consumer(client: &ApiClient, id: &str) -> Result<Consumer, FetchError> {
    client.request_json(Method::GET, &consumer_path(id), None).await
}

/// Creates a key with server defaults.
#[instrument(skip(client))]
pub async fn create_consumer(client: &ApiClient) -> Result<Consumer, FetchError> {
    let body = json!({});
    client
        .request_json(Method::POST, "v1/dashboard/consumers", Some(&body))
        .await
}

/// Updates the fields of `consumer` listed in `update_mask`
/// (comma-separated field names).
#[instrument(skip(client, consumer), fields(id = ?consumer.id))]
pub async fn update_consumer(
    client: &ApiClient,
    consumer: &Consumer,
    update_mask: &str,
) -> Result<Consumer, FetchError> {
    let path = with_query(
        &consumer_path(consumer.id.as_deref().unwrap_or_default()),
        &[("updateMask", update_mask)],
    );
    let body = serde_json::to_value(consumer)?;
    client.request_json(Method::PATCH, &path, Some(&body)).await
}

/// Deletes a key.
#[instrument(skip(client))]
pub async fn delete_consumer(client: &ApiClient, id: &str) -> Result<(), FetchError> {
    client
        .request_json::<serde_json::Value>(Method::DELETE, &consumer_path(id), None)
        .await
        .map(drop)
}

// ============================================================================
// Models
// ============================================================================

/// Lists dashboard models (first page).
#[instrument(skip(client))]
pub async fn list_models(client: &ApiClient) -> Result<Vec<Model>, FetchError> {
    Ok(client
        .request_json::<Option<ListModelsResponse>>(Method::GET, "v1/dashboard/models", None)
        .await?
        .unwrap_or_default()
        .models)
}

/// Lists upstream model ids, optionally filtered by `tag`.
///
/// Not retried: callers fall back to a built-in list on failure.
#[instrument(skip(client))]
pub async fn list_provider_models(
    client: &ApiClient,
    tag: Option<&str>,
) -> Result<Vec<String>, FetchError> {
    let path = with_query("v1/dashboard/providers/models", &[("tag", tag.unwrap_or(""))]);
    let response = client
        .request_json_with::<Option<ProviderModelsResponse>>(
            Method::GET,
            &path,
            None,
            &RetryStrategy::no_retry(),
        )
        .await?
        .unwrap_or_default();

    Ok(response
        .models
        .iter()
        .filter_map(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .map(str::to_string)
        .collect())
}

// ============================================================================
// Subscription & Usage
// ============================================================================

/// Current subscription, `None` when the account has none.
#[instrument(skip(client))]
pub async fn current_subscription(client: &ApiClient) -> Result<Option<Subscription>, FetchError> {
    client
        .request_json(Method::GET, "v1/dashboard/subscriptions/current", None)
        .await
}

/// Recent usage records.
#[instrument(skip(client))]
pub async fn list_usages(client: &ApiClient) -> Result<Vec<RawUsage>, FetchError> {
    let page_size = USAGE_PAGE_SIZE.to_string();
    let path = with_query("v1/dashboard/usages", &[("pageSize", page_size.as_str())]);
    Ok(client
        .request_json::<Option<ListUsagesResponse>>(Method::GET, &path, None)
        .await?
        .unwrap_or_default()
        .usages)
}
