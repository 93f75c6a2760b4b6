//! Title lookup for external content identifiers.

mod cinemeta;

pub use cinemeta::CinemetaClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::searcher::ContentType;

/// Errors that can occur when looking up metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Human-readable identity of a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMeta {
    pub title: Option<String>,
    /// First year of release (series ranges keep the start year).
    pub year: Option<String>,
}

impl ContentMeta {
    /// Search text for this title: `"{title} {year}"`, or just the title.
    pub fn search_query(&self) -> Option<String> {
        let title = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        Some(match self.year.as_deref() {
            Some(year) => format!("{} {}", title, year),
            None => title.to_string(),
        })
    }
}

/// Trait for metadata services.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Look up an external identifier such as `tt0111161`.
    async fn lookup(&self, content_type: ContentType, id: &str)
        -> Result<ContentMeta, MetadataError>;
}
