//! Cinemeta API client.
//!
//! Cinemeta is Stremio's public metadata service. It needs no API key.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::MetadataConfig;
use crate::metrics::record_external_call;
use crate::searcher::ContentType;

use super::{ContentMeta, MetadataError, MetadataLookup};

/// Cinemeta API client.
pub struct CinemetaClient {
    client: Client,
    base_url: String,
}

impl CinemetaClient {
    /// Create a new Cinemeta client.
    pub fn new(config: MetadataConfig) -> Result<Self, MetadataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, content_type: ContentType, id: &str) -> Result<ContentMeta, MetadataError> {
        let url = format!(
            "{}/meta/{}/{}.json",
            self.base_url,
            content_type,
            urlencoding::encode(id)
        );

        debug!(content_type = %content_type, id = %id, "Cinemeta lookup");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == 404 {
            return Err(MetadataError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: CinemetaResponse = response.json().await.map_err(|e| {
            MetadataError::ParseError(format!("Failed to parse meta response: {}", e))
        })?;

        Ok(body.meta.map(ContentMeta::from).unwrap_or_default())
    }
}

#[async_trait]
impl MetadataLookup for CinemetaClient {
    async fn lookup(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<ContentMeta, MetadataError> {
        let start = Instant::now();
        let result = self.fetch(content_type, id).await;
        record_external_call("cinemeta", "meta", start, result.is_ok());
        result
    }
}

// Cinemeta API response types
#[derive(Debug, Deserialize)]
struct CinemetaResponse {
    #[serde(default)]
    meta: Option<CinemetaMeta>,
}

#[derive(Debug, Deserialize)]
struct CinemetaMeta {
    #[serde(default)]
    name: Option<String>,
    /// A number, a string, or a range like "2008–2013".
    #[serde(default)]
    year: Option<serde_json::Value>,
}

impl From<CinemetaMeta> for ContentMeta {
    fn from(meta: CinemetaMeta) -> Self {
        Self {
            title: meta.name.filter(|n| !n.is_empty()),
            year: meta.year.as_ref().and_then(first_year),
        }
    }
}

/// First year of a release year or year range.
fn first_year(year: &serde_json::Value) -> Option<String> {
    let text = match year {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let first = text
        .split(['-', '–'])
        .next()
        .map(str::trim)
        .unwrap_or_default();

    (!first.is_empty()).then(|| first.to_string())
}
