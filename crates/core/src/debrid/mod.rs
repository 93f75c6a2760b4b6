//! Debrid provider integration.
//!
//! Debrid services keep a cache of popular torrents and can serve them over
//! plain HTTP immediately. This module checks which info-hashes are
//! instantly available on each configured provider and merges the answers.

mod aggregator;
mod realdebrid;
mod torbox;

pub use aggregator::{check_all, Availability};
pub use realdebrid::RealDebridClient;
pub use torbox::TorBoxClient;

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Short identifier of a provider, also used as its badge (e.g. "RD").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash (as passed by the caller) to "instantly available".
pub type AvailabilityMap = HashMap<String, bool>;

/// Errors that can occur when talking to a debrid provider.
#[derive(Debug, Error)]
pub enum DebridError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Response body was not in the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Provider answered but flagged the request as failed.
    #[error("Provider rejected request: {0}")]
    Rejected(String),

    /// Client not configured (missing API key).
    #[error("Client not configured")]
    NotConfigured,
}

/// A service that can report instant availability for info-hashes.
#[async_trait]
pub trait DebridProvider: Send + Sync {
    /// Identifier used in badges and logs.
    fn id(&self) -> &ProviderId;

    /// Whether credentials are present. Unconfigured providers are never queried.
    fn is_configured(&self) -> bool;

    /// Check a batch of hashes in one request.
    ///
    /// The returned map is keyed by the hashes exactly as given.
    async fn check_cached(&self, hashes: &[String]) -> Result<AvailabilityMap, DebridError>;
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false.
pub fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Turn a non-success response into an `ApiError`.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, DebridError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DebridError::ApiError {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    })
}
