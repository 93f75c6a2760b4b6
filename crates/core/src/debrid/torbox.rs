//! TorBox cached-torrent check client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::TorBoxConfig;
use crate::metrics::record_external_call;

use super::{ensure_success, is_truthy, AvailabilityMap, DebridError, DebridProvider, ProviderId};

/// TorBox API client.
pub struct TorBoxClient {
    id: ProviderId,
    client: Client,
    base_url: String,
    api_key: String,
}

/// Envelope of every TorBox response.
#[derive(Debug, Deserialize)]
struct TorBoxResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
}

impl TorBoxClient {
    pub fn new(config: TorBoxConfig) -> Result<Self, DebridError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            id: ProviderId::new("TB"),
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    async fn fetch(&self, hashes: &[String]) -> Result<TorBoxResponse, DebridError> {
        let url = format!("{}/torrents/checkcached", self.base_url);
        let joined = hashes.join(",");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("hash", joined.as_str()),
                ("format", "object"),
                ("list_files", "false"),
            ])
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
impl DebridProvider for TorBoxClient {
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

        debug!(count = hashes.len(), "Checking TorBox availability");
        let start = Instant::now();
        let fetched = self.fetch(hashes).await;
        record_external_call("torbox", "checkcached", start, fetched.is_ok());

        parse_availability(fetched?, hashes)
    }
}

/// With `format=object`, `data` maps hashes to an object when cached and to
/// a falsy value (or nothing) otherwise. Either casing may be used.
fn parse_availability(
    response: TorBoxResponse,
    hashes: &[String],
) -> Result<AvailabilityMap, DebridError> {
    if !response.success {
        return Err(DebridError::Rejected(
            response.detail.unwrap_or_else(|| "success=false".to_string()),
        ));
    }

    let empty = serde_json::Map::new();
    let data = match &response.data {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => &empty,
        other => {
            return Err(DebridError::ParseError(format!(
                "unexpected data field: {}",
                other
            )))
        }
    };

    let truthy_at = |key: &str| data.get(key).map(is_truthy).unwrap_or(false);

    Ok(hashes
        .iter()
        .map(|hash| {
            let cached = truthy_at(hash) || truthy_at(&hash.to_lowercase());
            (hash.clone(), cached)
        })
        .collect())
}
