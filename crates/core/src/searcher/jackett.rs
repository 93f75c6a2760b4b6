//! Jackett search backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::IndexerConfig;
use crate::metrics::{record_external_call, SEARCH_RESULTS};

use super::link_resolver::LinkResolver;
use super::normalizer::{backfill_hashes, normalize_records};
use super::ranker::rank;
use super::{ContentType, SearchError, SearchResult, Searcher};

const MOVIE_CATEGORIES: &[u32] = &[2000, 2010, 2020, 2030, 2040, 2045, 2050, 2060];
const SERIES_CATEGORIES: &[u32] = &[
    5000, 5010, 5020, 5030, 5040, 5045, 5050, 5060, 5070, 5080,
];

/// Jackett search backend implementation.
pub struct JackettSearcher {
    client: Client,
    config: IndexerConfig,
    resolver: LinkResolver,
}

impl JackettSearcher {
    /// Create a new JackettSearcher with the given configuration.
    pub fn new(config: IndexerConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| SearchError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let resolver = LinkResolver::new(
            Duration::from_secs(config.resolve_timeout_secs as u64),
            config.max_redirect_hops,
        )
        .map_err(|e| SearchError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            config,
            resolver,
        })
    }

    /// Build the Jackett API URL for a search.
    fn build_search_url(&self, content_type: ContentType, query: &str) -> String {
        let mut url = format!(
            "{}/api/v2.0/indexers/all/results?apikey={}&Query={}",
            self.config.url.trim_end_matches('/'),
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(query)
        );

        for cat_id in categories_for(content_type) {
            url.push_str(&format!("&Category[]={}", cat_id));
        }

        url
    }

    /// Fetch the raw result records for a query.
    async fn fetch_records(
        &self,
        content_type: ContentType,
        query: &str,
    ) -> Result<Vec<serde_json::Value>, SearchError> {
        let url = self.build_search_url(content_type, query);
        debug!(query = %query, content_type = %content_type, "Searching Jackett");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else if e.is_connect() {
                SearchError::ConnectionFailed(e.to_string())
            } else {
                SearchError::ApiError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let jackett_response: JackettResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        Ok(jackett_response.results)
    }
}

#[async_trait]
impl Searcher for JackettSearcher {
    fn name(&self) -> &str {
        "jackett"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn search(&self, content_type: ContentType, query: &str) -> Vec<SearchResult> {
        if !self.is_configured() {
            info!("Jackett not configured, skipping search");
            return Vec::new();
        }

        let start = Instant::now();
        let fetched = self.fetch_records(content_type, query).await;
        record_external_call("jackett", "search", start, fetched.is_ok());

        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                warn!(query = %query, error = %e, "Jackett search failed");
                return Vec::new();
            }
        };

        let mut results = normalize_records(records);
        backfill_hashes(&mut results, &self.resolver, self.config.max_parallel_resolves).await;
        let ranked = rank(results);

        SEARCH_RESULTS
            .with_label_values(&[])
            .observe(ranked.len() as f64);
        debug!(
            results = ranked.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );

        ranked
    }
}

/// Jackett category IDs for a content type.
fn categories_for(content_type: ContentType) -> &'static [u32] {
    match content_type {
        ContentType::Movie => MOVIE_CATEGORIES,
        ContentType::Series => SERIES_CATEGORIES,
    }
}

// Jackett API response; records are decoded one by one later
#[derive(Debug, Deserialize)]
struct JackettResponse {
    #[serde(rename = "Results", default)]
    results: Vec<serde_json::Value>,
}
