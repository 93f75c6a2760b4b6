//! Types for the torrent search system.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of content a stream request is for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentType::Movie),
            "series" => Ok(ContentType::Series),
            other => Err(SearchError::UnsupportedContentType(other.to_string())),
        }
    }
}

/// A single release returned by the indexer, after normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Release title as published by the tracker.
    pub title: String,
    /// Size in bytes, 0 if unknown.
    pub size_bytes: u64,
    pub seeders: u32,
    pub leechers: u32,
    /// Tracker that published the release.
    pub tracker: String,
    /// Info hash (lowercase hex), once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet_uri: Option<String>,
    /// Indexer download/resolver URL. Only useful while no hash is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_link: Option<String>,
    /// Category as reported by the indexer (informational).
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search backend API error: {0}")]
    ApiError(String),

    #[error("Failed to parse search response: {0}")]
    ParseError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Trait for torrent search backends.
///
/// Implementations never fail the caller: an unconfigured backend or a
/// failed request yields an empty list after logging.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Whether the backend has the endpoint and credentials it needs.
    fn is_configured(&self) -> bool;

    /// Search for releases, returned in ranked order.
    async fn search(&self, content_type: ContentType, query: &str) -> Vec<SearchResult>;
}
