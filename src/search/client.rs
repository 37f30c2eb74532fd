//! Azure AI Search client
//!
//! - Endpoint: POST {endpoint}/indexes/{index}/docs/search?api-version=...
//! - Auth: `api-key` header
//! - Semantic ranking when a semantic configuration is named

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::cli::config::{HttpConfig, SearchConfig};
use crate::errors::{RagError, Result};
use crate::http;
use crate::search::{SearchCapability, SearchHit, SearchRequest};

/// Default REST API version
pub const DEFAULT_SEARCH_API_VERSION: &str = "2023-11-01";

/// Query shaping applied to every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticOptions {
    /// Semantic configuration name; empty falls back to simple keyword search
    pub configuration: String,
    /// Only sent with `-preview` API versions; GA versions reject the field
    pub query_language: String,
    pub api_version: String,
}

impl Default for SemanticOptions {
    fn default() -> Self {
        Self {
            configuration: "default".to_string(),
            query_language: "en-us".to_string(),
            api_version: DEFAULT_SEARCH_API_VERSION.to_string(),
        }
    }
}

/// Azure AI Search REST client
#[derive(Debug, Clone)]
pub struct AzureSearchClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    options: SemanticOptions,
}

impl AzureSearchClient {
    /// Create client with default semantic options and timeout
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self> {
        Self::with_options(endpoint, api_key, SemanticOptions::default(), http::DEFAULT_TIMEOUT)
    }

    /// Create client with custom options
    pub fn with_options(
        endpoint: &str,
        api_key: &str,
        options: SemanticOptions,
        timeout: Duration,
    ) -> Result<Self> {
        let endpoint = http::parse_endpoint(endpoint, "search.endpoint")?;
        let api_key = http::require(api_key, "search.api_key")?;

        Ok(Self {
            client: http::build_client(timeout)?,
            endpoint,
            api_key,
            options,
        })
    }

    pub fn from_config(search: &SearchConfig, http_config: &HttpConfig) -> Result<Self> {
        let options = SemanticOptions {
            configuration: search.semantic_configuration.clone(),
            query_language: search.query_language.clone(),
            api_version: search.api_version.clone(),
        };
        Self::with_options(
            &search.endpoint,
            &search.api_key,
            options,
            Duration::from_secs(http_config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn options(&self) -> &SemanticOptions {
        &self.options
    }

    fn body<'a>(&'a self, request: &'a SearchRequest) -> SearchBody<'a> {
        let semantic = !self.options.configuration.is_empty();
        let language = semantic
            && self.options.api_version.ends_with("-preview")
            && !self.options.query_language.is_empty();
        SearchBody {
            search: &request.query,
            top: request.top_k,
            select: request.select.join(","),
            query_type: semantic.then_some("semantic"),
            semantic_configuration: semantic.then_some(self.options.configuration.as_str()),
            query_language: language.then_some(self.options.query_language.as_str()),
        }
    }
}

#[async_trait]
impl SearchCapability for AzureSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let url = http::endpoint_url(
            &self.endpoint,
            &["indexes", request.index.as_str(), "docs", "search"],
        )?;
        tracing::debug!(index = %request.index, top = request.top_k, "sending search request");

        let response = self
            .client
            .post(url)
            .query(&[("api-version", self.options.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| {
                RagError::SearchServiceFailure(format!("Failed to send request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagError::SearchServiceFailure(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let results: SearchResponse = response.json().await.map_err(|e| {
            RagError::SearchServiceFailure(format!("Failed to parse response: {}", e))
        })?;

        tracing::debug!(hits = results.value.len(), "search returned");
        Ok(results.value.into_iter().map(SearchHit::from).collect())
    }
}

/// Search request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody<'a> {
    search: &'a str,
    top: usize,
    select: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    semantic_configuration: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_language: Option<&'a str>,
}

/// Search response; only the hit list is read
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<Map<String, Value>>,
}
