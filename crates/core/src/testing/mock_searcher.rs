//! Mock searcher for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::searcher::{ContentType, SearchResult, Searcher};

/// A recorded search for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSearch {
    pub content_type: ContentType,
    pub query: String,
}

/// Mock implementation of the Searcher trait.
///
/// Returns the configured results verbatim (already ranked) and records
/// every query. An unconfigured mock returns nothing, like a real backend
/// without credentials.
#[derive(Debug)]
pub struct MockSearcher {
    /// Configured results to return.
    results: Arc<RwLock<Vec<SearchResult>>>,
    /// Recorded search queries.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    configured: AtomicBool,
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    /// Create a new mock searcher with empty results.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            configured: AtomicBool::new(true),
        }
    }

    /// Create a mock searcher with predefined results.
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results: Arc::new(RwLock::new(results)),
            ..Self::new()
        }
    }

    /// A searcher that behaves as if no endpoint/key were set.
    pub fn unconfigured() -> Self {
        let searcher = Self::new();
        searcher.configured.store(false, Ordering::SeqCst);
        searcher
    }

    /// Set the results to return for subsequent searches.
    pub async fn set_results(&self, results: Vec<SearchResult>) {
        *self.results.write().await = results;
    }

    /// Get recorded search queries.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured.load(Ordering::SeqCst)
    }

    async fn search(&self, content_type: ContentType, query: &str) -> Vec<SearchResult> {
        self.searches.write().await.push(RecordedSearch {
            content_type,
            query: query.to_string(),
        });

        if !self.is_configured() {
            return Vec::new();
        }
        self.results.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_mock_searcher_records_queries() {
        let searcher =
            MockSearcher::with_results(vec![fixtures::link_result("A", "http://dl/a", 1)]);

        let results = searcher.search(ContentType::Movie, "the matrix").await;
        assert_eq!(results.len(), 1);

        let searches = searcher.recorded_searches().await;
        assert_eq!(
            searches,
            vec![RecordedSearch {
                content_type: ContentType::Movie,
                query: "the matrix".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_mock_returns_nothing() {
        let searcher = MockSearcher::unconfigured();
        searcher
            .set_results(vec![fixtures::link_result("A", "http://dl/a", 1)])
            .await;

        assert!(searcher.search(ContentType::Series, "x").await.is_empty());
        assert_eq!(searcher.search_count().await, 1);
    }
}
