//! Search backend (Elasticsearch API) client

use crate::{translator::SearchRequest, SearchError, SearchResult};
use async_trait::async_trait;
use recallscope_core::{FacetBucket, SearchHit};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Search backend configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub index: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_seconds: u64,
}

impl SearchConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            index: "recall_events".to_string(),
            username: None,
            password: None,
            timeout_seconds: 30,
        }
    }

    pub fn with_index(mut self, index: &str) -> Self {
        self.index = index.to_string();
        self
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Consumed shape of a backend response.
///
/// Only the `hits` and `aggregations` envelopes are unwrapped; hit documents
/// stay opaque and any other top-level fields round-trip untouched. A
/// malformed response with either envelope missing reads as empty results,
/// not as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: HitsEnvelope,
    #[serde(default)]
    pub aggregations: HashMap<String, FacetAggregation>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetAggregation {
    #[serde(default)]
    pub buckets: Vec<FacetBucket>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl SearchResponse {
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits.hits
    }

    /// Buckets for a facet, in backend order. Absent facets read as empty.
    pub fn buckets(&self, category: &str) -> &[FacetBucket] {
        self.aggregations
            .get(category)
            .map(|agg| agg.buckets.as_slice())
            .unwrap_or_default()
    }
}

/// Search backend abstraction, implemented by [`SearchClient`] and by
/// in-memory fakes in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse>;
}

/// Elasticsearch-compatible backend client
pub struct SearchClient {
    config: SearchConfig,
    client: Client,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn auth_header(&self) -> Option<String> {
        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            use base64::{engine::general_purpose, Engine as _};
            let credentials = format!("{}:{}", username, password);
            Some(format!("Basic {}", general_purpose::STANDARD.encode(credentials)))
        } else {
            None
        }
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        let url = format!("{}/{}/_search", self.config.endpoint, self.config.index);
        tracing::debug!(%url, "executing search request");

        let mut http_request = self.client.post(&url).json(request);
        if let Some(auth) = self.auth_header() {
            http_request = http_request.header("Authorization", auth);
        }

        let response = http_request
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status,
                message: text,
            });
        }

        Ok(response.json().await?)
    }
}
