// Retrieval augmenter: query -> search -> rendered context block
use std::sync::Arc;

use crate::cli::config::{HttpConfig, SearchConfig};
use crate::errors::Result;
use crate::http;
use crate::rag::context::format_hits;
use crate::search::{AzureSearchClient, SearchCapability, SearchRequest};

/// Number of hits requested per query
pub const TOP_K: usize = 3;

/// Fields projected from each hit
pub const SELECT_FIELDS: [&str; 2] = ["title", "content"];

/// Turns a free-text query into a plain-text context block.
///
/// Holds no state between calls; every `retrieve` is exactly one search.
pub struct RetrievalAugmenter {
    search: Arc<dyn SearchCapability>,
    index_name: String,
}

impl RetrievalAugmenter {
    /// Create over any search capability
    pub fn new(search: Arc<dyn SearchCapability>, index_name: &str) -> Result<Self> {
        Ok(Self {
            search,
            index_name: http::require(index_name, "search.index_name")?,
        })
    }

    /// Create backed by Azure AI Search with default options
    pub fn connect(endpoint: &str, api_key: &str, index_name: &str) -> Result<Self> {
        let client = AzureSearchClient::new(endpoint, api_key)?;
        Self::new(Arc::new(client), index_name)
    }

    pub fn from_config(search: &SearchConfig, http_config: &HttpConfig) -> Result<Self> {
        let client = AzureSearchClient::from_config(search, http_config)?;
        Self::new(Arc::new(client), &search.index_name)
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// The request `retrieve` sends for a query
    pub fn request_for(&self, query: &str) -> SearchRequest {
        SearchRequest {
            index: self.index_name.clone(),
            query: query.to_string(),
            top_k: TOP_K,
            select: SELECT_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Search for `query` and render the hits; empty string when nothing matched.
    ///
    /// The query is passed through unchanged, empty included. Search failures
    /// propagate as-is.
    pub async fn retrieve(&self, query: &str) -> Result<String> {
        let request = self.request_for(query);
        let hits = self.search.search(&request).await.map_err(|e| {
            tracing::warn!(index = %self.index_name, error = %e, "retrieval failed");
            e
        })?;

        tracing::info!(index = %self.index_name, hits = hits.len(), "retrieved context");
        Ok(format_hits(&hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RagError;
    use crate::search::SearchHit;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeSearch {
        hits: Vec<SearchHit>,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl FakeSearch {
        fn new(hits: Vec<SearchHit>) -> Arc<Self> {
            Arc::new(Self {
                hits,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SearchCapability for FakeSearch {
        async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.hits.iter().take(request.top_k).cloned().collect())
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl SearchCapability for FailingSearch {
        async fn search(&self, _request: &SearchRequest) -> Result<Vec<SearchHit>> {
            Err(RagError::SearchServiceFailure("HTTP 503: busy".to_string()))
        }
    }

    #[tokio::test]
    async fn test_retrieve_formats_hits() {
        let search = FakeSearch::new(vec![
            SearchHit::new().with("title", "Paris").with("content", "City of lights"),
            SearchHit::new().with("title", "Rome"),
        ]);
        let augmenter = RetrievalAugmenter::new(search.clone(), "travel").unwrap();

        let context = augmenter.retrieve("romantic cities").await.unwrap();
        assert_eq!(context, "Title: Paris\nContent: City of lights\n\nTitle: Rome\n\n");
    }

    #[tokio::test]
    async fn test_retrieve_issues_one_projected_request() {
        let search = FakeSearch::new(vec![]);
        let augmenter = RetrievalAugmenter::new(search.clone(), "travel").unwrap();

        let context = augmenter.retrieve("").await.unwrap();
        assert_eq!(context, "");

        let requests = search.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].index, "travel");
        assert_eq!(requests[0].query, "");
        assert_eq!(requests[0].top_k, 3);
        assert_eq!(requests[0].select, vec!["title", "content"]);
    }

    #[tokio::test]
    async fn test_retrieve_propagates_search_failure() {
        let augmenter = RetrievalAugmenter::new(Arc::new(FailingSearch), "travel").unwrap();
        let err = augmenter.retrieve("beaches").await.unwrap_err();
        assert!(matches!(err, RagError::SearchServiceFailure(msg) if msg.contains("503")));
    }

    #[test]
    fn test_construction_requires_index() {
        let result = RetrievalAugmenter::new(FakeSearch::new(vec![]), " ");
        assert!(matches!(result, Err(RagError::ConfigurationMissing { .. })));
    }

    #[test]
    fn test_connect_fails_fast_on_bad_endpoint() {
        assert!(RetrievalAugmenter::connect("", "key", "travel").is_err());
        assert!(RetrievalAugmenter::connect("nope", "key", "travel").is_err());
        assert!(RetrievalAugmenter::connect("https://example.search.windows.net", "", "travel").is_err());
        assert!(RetrievalAugmenter::connect("https://example.search.windows.net", "key", "travel").is_ok());
    }
}
