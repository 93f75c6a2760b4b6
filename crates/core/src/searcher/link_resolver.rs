//! Resolves indexer download links into info-hashes.
//!
//! Indexers often hand out a proxy URL instead of a magnet link. Requesting
//! it either redirects (possibly through another proxy hop) to a magnet URI,
//! or returns the .torrent file itself. Redirects are followed manually so
//! that a `magnet:` location can be captured instead of being rejected by
//! the HTTP client.

use std::time::{Duration, Instant};

use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::{record_external_call, LINK_RESOLUTIONS};

use super::magnet::{extract_magnet_hash, is_magnet, magnet_from_hash, normalize_info_hash};
use super::torrent_parser::{parse_torrent_info_hash, TorrentParseError};
use super::SearchResult;

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLink {
    /// The link led to a magnet URI.
    Magnet { uri: String, info_hash: String },
    /// The link served a .torrent file whose info-hash was computed.
    InfoHash(String),
}

impl ResolvedLink {
    pub fn info_hash(&self) -> &str {
        match self {
            ResolvedLink::Magnet { info_hash, .. } => info_hash,
            ResolvedLink::InfoHash(hash) => hash,
        }
    }

    /// Magnet URI for the resolved torrent, synthesized when only a hash is known.
    pub fn magnet_uri(&self) -> String {
        match self {
            ResolvedLink::Magnet { uri, .. } => uri.clone(),
            ResolvedLink::InfoHash(hash) => magnet_from_hash(hash),
        }
    }

    /// Build from a magnet URI, if it carries a usable hash.
    pub fn from_magnet(uri: &str) -> Option<Self> {
        let info_hash = extract_magnet_hash(uri).and_then(normalize_info_hash)?;
        Some(ResolvedLink::Magnet {
            uri: uri.to_string(),
            info_hash,
        })
    }
}

/// Errors that can occur while resolving a link.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("Redirect without Location header")]
    MissingLocation,

    #[error("Unsupported redirect target: {0}")]
    UnsupportedLocation(String),

    #[error("Magnet URI has no usable info hash: {0}")]
    MagnetWithoutHash(String),

    #[error("Gave up after {0} redirect hops")]
    TooManyRedirects(u32),

    #[error("Empty response body")]
    EmptyBody,

    #[error("Invalid torrent file: {0}")]
    Torrent(#[from] TorrentParseError),
}

impl From<reqwest::Error> for ResolveError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ResolveError::Timeout
        } else {
            ResolveError::Http(e.to_string())
        }
    }
}

/// Follows download links with a bounded number of hops.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    client: Client,
    max_hops: u32,
}

impl LinkResolver {
    /// Create a resolver issuing at most `max_hops` requests per link.
    pub fn new(timeout: Duration, max_hops: u32) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| ResolveError::Http(e.to_string()))?;

        Ok(Self {
            client,
            max_hops: max_hops.max(1),
        })
    }

    /// Find the info-hash for a search result.
    ///
    /// A magnet URI on the result is used directly without any network call.
    /// Otherwise the direct link is resolved. Failures are logged and
    /// reported as `None`.
    pub async fn extract_hash(&self, result: &SearchResult) -> Option<ResolvedLink> {
        if let Some(magnet) = result.magnet_uri.as_deref() {
            if let Some(resolved) = ResolvedLink::from_magnet(magnet) {
                return Some(resolved);
            }
            debug!(title = %result.title, "Magnet URI has no usable hash");
        }

        let link = result.direct_link.as_deref()?;
        match self.resolve(link).await {
            Ok(resolved) => {
                debug!(title = %result.title, info_hash = %resolved.info_hash(), "Resolved download link");
                Some(resolved)
            }
            Err(e) => {
                warn!(link = %link, error = %e, "Failed to resolve link");
                None
            }
        }
    }

    /// Resolve a download link to a magnet URI or an info-hash.
    pub async fn resolve(&self, link: &str) -> Result<ResolvedLink, ResolveError> {
        let started = Instant::now();
        let result = self.follow(link).await;

        let outcome = match &result {
            Ok(ResolvedLink::Magnet { .. }) => "magnet",
            Ok(ResolvedLink::InfoHash(_)) => "torrent",
            Err(_) => "failed",
        };
        LINK_RESOLUTIONS.with_label_values(&[outcome]).inc();
        record_external_call("indexer", "resolve_link", started, result.is_ok());

        result
    }

    async fn follow(&self, link: &str) -> Result<ResolvedLink, ResolveError> {
        if is_magnet(link) {
            return magnet_target(link);
        }

        let mut url = Url::parse(link).map_err(|e| ResolveError::InvalidUrl(e.to_string()))?;

        for hop in 1..=self.max_hops {
            debug!(url = %url, hop, "Requesting download link");
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();

            if is_redirect(status) {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(ResolveError::MissingLocation)?;

                if is_magnet(location) {
                    return magnet_target(location);
                }

                let next = url
                    .join(location)
                    .map_err(|_| ResolveError::UnsupportedLocation(location.to_string()))?;
                if !matches!(next.scheme(), "http" | "https") {
                    return Err(ResolveError::UnsupportedLocation(location.to_string()));
                }
                url = next;
                continue;
            }

            if status.is_success() {
                let body = response.bytes().await?;
                if body.is_empty() {
                    return Err(ResolveError::EmptyBody);
                }
                return Ok(ResolvedLink::InfoHash(parse_torrent_info_hash(&body)?));
            }

            return Err(ResolveError::UnexpectedStatus(status.as_u16()));
        }

        Err(ResolveError::TooManyRedirects(self.max_hops))
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

fn magnet_target(uri: &str) -> Result<ResolvedLink, ResolveError> {
    ResolvedLink::from_magnet(uri).ok_or_else(|| ResolveError::MagnetWithoutHash(uri.to_string()))
}
