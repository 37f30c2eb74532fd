//! Search capability
//!
//! The seam between retrieval and a managed search index. `SearchCapability`
//! is the abstract `search(index, query, top_k, fields)` call; `client`
//! implements it against Azure AI Search.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Result;

// Re-export commonly used types
pub use client::{AzureSearchClient, SemanticOptions, DEFAULT_SEARCH_API_VERSION};

/// A query-by-text request against a named index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub index: String,
    pub query: String,
    /// Maximum number of hits to return
    pub top_k: usize,
    /// Field projection; only these fields are returned per hit
    pub select: Vec<String>,
}

/// One search result as a field-name to value map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHit(pub Map<String, Value>);

impl SearchHit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    /// Field rendered as text. Missing, null and empty values count as absent.
    pub fn text(&self, field: &str) -> Option<String> {
        let rendered = match self.0.get(field)? {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if rendered.is_empty() {
            None
        } else {
            Some(rendered)
        }
    }

    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    pub fn content(&self) -> Option<String> {
        self.text("content")
    }
}

impl From<Map<String, Value>> for SearchHit {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// External search service
#[async_trait]
pub trait SearchCapability: Send + Sync {
    /// Run one search, returning hits in the service's relevance order
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>>;
}
