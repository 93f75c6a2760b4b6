//! Common test utilities for router testing with mocks.
//!
//! This module provides a test fixture that builds the addon router in
//! process with mock collaborators injected, so routes can be exercised
//! without an indexer, debrid accounts or network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bgtrackers_core::testing::{MockDebridProvider, MockMetadataLookup, MockSearcher};
use bgtrackers_core::{
    Config, DebridProvider, MetadataLookup, SearchResult, Searcher, StreamComposer,
};
use bgtrackers_server::state::AppState;

/// Re-export fixtures for test convenience
pub use bgtrackers_core::testing::fixtures;

pub const ADDON_NAME: &str = "BG Trackers Test";

/// Test fixture for router testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_stream() {
///     let fixture = TestFixture::new().await;
///     let response = fixture.get("/stream/movie/tt0111161.json").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock searcher - inspect recorded queries
    pub searcher: Arc<MockSearcher>,
    /// Mock metadata lookup - inspect looked-up identifiers
    pub metadata: Arc<MockMetadataLookup>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    /// Parsed JSON body, `Null` when the body is empty or not JSON
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let searcher = Arc::new(if test_config.searcher_configured {
            MockSearcher::with_results(test_config.results)
        } else {
            MockSearcher::unconfigured()
        });

        let realdebrid = MockDebridProvider::new("RD").with_cached(test_config.realdebrid_cached);
        let torbox = MockDebridProvider::new("TB").with_cached(test_config.torbox_cached);
        let torbox = if test_config.torbox_failing {
            torbox.failing()
        } else {
            torbox
        };
        let providers: Vec<Arc<dyn DebridProvider>> = vec![Arc::new(realdebrid), Arc::new(torbox)];

        let mut metadata = MockMetadataLookup::new();
        for (id, title, year) in &test_config.titles {
            metadata = metadata.with_title(id, title, year.as_deref());
        }
        let metadata = Arc::new(metadata);

        let mut config = Config::default();
        config.addon.name = ADDON_NAME.to_string();

        let composer = StreamComposer::new(
            Arc::clone(&searcher) as Arc<dyn Searcher>,
            providers,
            Arc::clone(&metadata) as Arc<dyn MetadataLookup>,
            ADDON_NAME,
        );

        let state = Arc::new(AppState::new(config, composer));
        let router = bgtrackers_server::api::create_router(state);

        Self {
            router,
            searcher,
            metadata,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            body,
            text,
        }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Results the mock searcher returns, already ranked
    pub results: Vec<SearchResult>,
    pub searcher_configured: bool,
    pub realdebrid_cached: Vec<String>,
    pub torbox_cached: Vec<String>,
    pub torbox_failing: bool,
    /// `(id, title, year)` entries known to the metadata mock
    pub titles: Vec<(String, String, Option<String>)>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            searcher_configured: true,
            realdebrid_cached: Vec::new(),
            torbox_cached: Vec::new(),
            torbox_failing: false,
            titles: Vec::new(),
        }
    }
}

impl TestConfig {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn title(mut self, id: &str, title: &str, year: Option<&str>) -> Self {
        self.titles
            .push((id.to_string(), title.to_string(), year.map(str::to_string)));
        self
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
