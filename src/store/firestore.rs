use super::{Category, NewsItem, NewsStore, StoreError};
use crate::config::Config;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Firestore REST client for the news collection.
///
/// Each query is a single `documents:runQuery` POST. There is no retry at
/// this layer; a failed request surfaces straight to the caller.
pub struct FirestoreStore {
    client: reqwest::Client,
    endpoint: Url,
    collection: String,
    api_key: Option<SecretString>,
    timeout_secs: u64,
}

impl FirestoreStore {
    /// Build a client from the loaded configuration.
    ///
    /// Fails when no project id is configured or the base URL is plain HTTP
    /// to anything other than localhost.
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| StoreError::Unavailable("project_id is not configured".into()))?;

        let base = config.base_url.trim_end_matches('/');
        if !base.starts_with("https://") {
            let is_localhost =
                base.starts_with("http://127.0.0.1") || base.starts_with("http://localhost");
            if !is_localhost {
                tracing::error!(base_url = %base, "Rejecting non-HTTPS Firestore base URL");
                return Err(StoreError::InsecureBaseUrl);
            }
            tracing::warn!(base_url = %base, "Using non-HTTPS Firestore base URL (localhost only)");
        }

        let endpoint = Url::parse(&format!(
            "{}/v1/projects/{}/databases/{}/documents:runQuery",
            base, project_id, config.database
        ))
        .map_err(|e| StoreError::Unavailable(format!("invalid Firestore endpoint: {}", e)))?;

        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        tracing::debug!(endpoint = %endpoint, collection = %config.collection, "Firestore store ready");

        Ok(Self {
            client,
            endpoint,
            collection: config.collection.clone(),
            api_key: config.api_key.clone().map(SecretString::from),
            timeout_secs: config.request_timeout_secs,
        })
    }

    /// `structuredQuery` for documents dated at or after `threshold`, newest first.
    fn since_query(&self, threshold: DateTime<Utc>) -> serde_json::Value {
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "date" },
                        "op": "GREATER_THAN_OR_EQUAL",
                        "value": {
                            "timestampValue": threshold.to_rfc3339_opts(SecondsFormat::Secs, true)
                        }
                    }
                },
                "orderBy": [{ "field": { "fieldPath": "date" }, "direction": "DESCENDING" }]
            }
        })
    }

    /// `structuredQuery` for the newest `limit` documents.
    fn recent_query(&self, limit: usize) -> serde_json::Value {
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "orderBy": [{ "field": { "fieldPath": "date" }, "direction": "DESCENDING" }],
                "limit": limit
            }
        })
    }

    async fn run_query(&self, body: serde_json::Value) -> Result<Vec<NewsItem>, StoreError> {
        let mut url = self.endpoint.clone();
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key.expose_secret());
        }

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&body)?);

        // The URL may carry the API key, so it is stripped from any error.
        let response = tokio::time::timeout(Duration::from_secs(self.timeout_secs), request.send())
            .await
            .map_err(|_| StoreError::Timeout(self.timeout_secs))?
            .map_err(|e| StoreError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Firestore query rejected");
            return Err(StoreError::HttpStatus(status.as_u16()));
        }

        let text = read_limited_text(response, MAX_RESPONSE_SIZE).await?;
        let items = parse_run_query(&text)?;
        tracing::debug!(count = items.len(), "Firestore query returned");
        Ok(items)
    }
}

#[async_trait]
impl NewsStore for FirestoreStore {
    async fn query_since(&self, threshold: DateTime<Utc>) -> Result<Vec<NewsItem>, StoreError> {
        self.run_query(self.since_query(threshold)).await
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        self.run_query(self.recent_query(limit)).await
    }
}

// ============================================================================
// Wire Format
// ============================================================================

/// One element of the `runQuery` response array.
///
/// Rows that only carry `readTime` (an empty result set) have no document.
#[derive(Debug, Deserialize)]
struct QueryRow {
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

/// Firestore typed value. Only the shapes the news documents use are read;
/// any other value type decodes as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    string_value: Option<String>,
    timestamp_value: Option<DateTime<Utc>>,
}

impl Document {
    fn string(&self, field: &str) -> Option<&str> {
        self.fields.get(field)?.string_value.as_deref()
    }

    /// Like `string`, but blank values count as absent.
    fn non_blank(&self, field: &str) -> Option<Arc<str>> {
        self.string(field)
            .filter(|s| !s.trim().is_empty())
            .map(Arc::from)
    }

    fn into_item(self) -> NewsItem {
        let id = self.name.rsplit('/').next().unwrap_or(&self.name);
        NewsItem {
            id: Arc::from(id),
            category: Category::from(self.string("category").unwrap_or_default()),
            title: Arc::from(self.string("title").unwrap_or_default()),
            summary: Arc::from(self.string("summary").unwrap_or_default()),
            image_url: self.non_blank("imageUrl"),
            link: Arc::from(self.string("link").unwrap_or_default()),
            source: self.non_blank("source"),
            date: self.fields.get("date").and_then(|v| v.timestamp_value),
        }
    }
}

fn parse_run_query(body: &str) -> Result<Vec<NewsItem>, StoreError> {
    let rows: Vec<QueryRow> = serde_json::from_str(body)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.document)
        .map(Document::into_item)
        .collect())
}

async fn read_limited_text(
    response: reqwest::Response,
    limit: usize,
) -> Result<String, StoreError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(StoreError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| StoreError::Network(e.without_url()))?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(StoreError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| StoreError::InvalidUtf8)
}
