//! Real-Debrid instant availability client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::RealDebridConfig;
use crate::metrics::record_external_call;

use super::{ensure_success, is_truthy, AvailabilityMap, DebridError, DebridProvider, ProviderId};

/// Real-Debrid API client.
pub struct RealDebridClient {
    id: ProviderId,
    client: Client,
    base_url: String,
    api_key: String,
}

impl RealDebridClient {
    pub fn new(config: RealDebridConfig) -> Result<Self, DebridError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            id: ProviderId::new("RD"),
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    async fn fetch(&self, hashes: &[String]) -> Result<serde_json::Value, DebridError> {
        // Hashes go into the path: /torrents/instantAvailability/{h1}/{h2}/...
        let url = format!(
            "{}/torrents/instantAvailability/{}",
            self.base_url,
            hashes.join("/")
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        response
            .json()
            .await
            .map_err(|e| DebridError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl DebridProvider for RealDebridClient {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn check_cached(&self, hashes: &[String]) -> Result<AvailabilityMap, DebridError> {
        if !self.is_configured() {
            return Err(DebridError::NotConfigured);
        }
        if hashes.is_empty() {
            return Ok(AvailabilityMap::new());
        }

        debug!(count = hashes.len(), "Checking Real-Debrid availability");
        let start = Instant::now();
        let fetched = self.fetch(hashes).await;
        record_external_call("realdebrid", "instant_availability", start, fetched.is_ok());

        parse_availability(&fetched?, hashes)
    }
}

/// Real-Debrid answers `{ "<lowercase hash>": { "rd": [ ... ] } }`.
/// A hash is cached when its `rd` entry is non-empty.
fn parse_availability(
    data: &serde_json::Value,
    hashes: &[String],
) -> Result<AvailabilityMap, DebridError> {
    let entries = data
        .as_object()
        .ok_or_else(|| DebridError::ParseError("expected a JSON object".to_string()))?;

    Ok(hashes
        .iter()
        .map(|hash| {
            let cached = entries
                .get(&hash.to_lowercase())
                .and_then(|entry| entry.get("rd"))
                .map(is_truthy)
                .unwrap_or(false);
            (hash.clone(), cached)
        })
        .collect())
}
