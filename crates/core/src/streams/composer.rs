//! Builds the ranked, labelled stream list for one content request.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::{debug, info, warn};

use crate::debrid::{check_all, Availability, DebridProvider, ProviderId};
use crate::metadata::MetadataLookup;
use crate::metrics::{EMPTY_RESPONSES, STREAMS_RETURNED};
use crate::searcher::magnet::{extract_magnet_hash, normalize_info_hash};
use crate::searcher::{ContentType, SearchResult, Searcher};

use super::types::{format_size, StreamEntry, StreamLocator};

/// External identifiers we can turn into a title (IMDb style).
static EXTERNAL_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tt\d+$").unwrap());

const P2P_BADGE: &str = "[P2P]";

/// Orchestrates search, availability checks and labelling.
pub struct StreamComposer {
    searcher: Arc<dyn Searcher>,
    providers: Vec<Arc<dyn DebridProvider>>,
    metadata: Arc<dyn MetadataLookup>,
    addon_name: String,
}

impl StreamComposer {
    pub fn new(
        searcher: Arc<dyn Searcher>,
        providers: Vec<Arc<dyn DebridProvider>>,
        metadata: Arc<dyn MetadataLookup>,
        addon_name: impl Into<String>,
    ) -> Self {
        Self {
            searcher,
            providers,
            metadata,
            addon_name: addon_name.into(),
        }
    }

    /// Whether the search backend can run at all.
    pub fn searcher_configured(&self) -> bool {
        self.searcher.is_configured()
    }

    /// Providers with credentials, in badge order.
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .map(|p| p.id().clone())
            .collect()
    }

    /// Produce the stream list for `id`. Never empty.
    pub async fn compose_streams(&self, content_type: ContentType, id: &str) -> Vec<StreamEntry> {
        let query = self.resolve_query(content_type, id).await;

        let mut results = self.searcher.search(content_type, &query).await;
        let hashes = collect_hashes(&mut results);

        let availability = check_all(&self.providers, &hashes).await;
        let configured = self.configured_providers();

        let mut streams: Vec<StreamEntry> = results
            .iter()
            .filter_map(|result| build_entry(result, &configured, &availability))
            .collect();

        STREAMS_RETURNED
            .with_label_values(&[])
            .observe(streams.len() as f64);

        if streams.is_empty() {
            info!(content_type = %content_type, id = %id, query = %query, "No streams found");
            EMPTY_RESPONSES.inc();
            streams.push(StreamEntry::no_results(&self.addon_name));
        } else {
            debug!(
                content_type = %content_type,
                id = %id,
                streams = streams.len(),
                cached_hashes = availability.len(),
                "Streams composed"
            );
        }

        streams
    }

    /// Turn an external identifier into `"{title} {year}"`, else use it verbatim.
    async fn resolve_query(&self, content_type: ContentType, id: &str) -> String {
        // Episodes arrive as "tt0903747:1:2"; the title belongs to the show
        let base_id = id.split(':').next().unwrap_or(id);
        if !EXTERNAL_ID.is_match(base_id) {
            return id.to_string();
        }

        match self.metadata.lookup(content_type, base_id).await {
            Ok(meta) => match meta.search_query() {
                Some(query) => {
                    info!(id = %id, query = %query, "Resolved identifier to search query");
                    query
                }
                None => id.to_string(),
            },
            Err(e) => {
                warn!(id = %id, error = %e, "Metadata lookup failed, searching by identifier");
                id.to_string()
            }
        }
    }
}

/// Fill in hashes derivable from magnets and return the unique hash list.
fn collect_hashes(results: &mut [SearchResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut hashes = Vec::new();

    for result in results.iter_mut() {
        if result.info_hash.is_none() {
            result.info_hash = result
                .magnet_uri
                .as_deref()
                .and_then(extract_magnet_hash)
                .and_then(normalize_info_hash);
        }

        if let Some(hash) = &result.info_hash {
            if seen.insert(hash.clone()) {
                hashes.push(hash.clone());
            }
        }
    }

    hashes
}

/// Badge label for a result.
fn badges(info_hash: Option<&str>, configured: &[ProviderId], availability: &Availability) -> String {
    let Some(hash) = info_hash else {
        return P2P_BADGE.to_string();
    };
    if configured.is_empty() {
        return P2P_BADGE.to_string();
    }

    configured
        .iter()
        .map(|provider| {
            if availability.is_cached_by(hash, provider) {
                format!("[{}+]", provider)
            } else {
                format!("[{}]", provider)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_entry(
    result: &SearchResult,
    configured: &[ProviderId],
    availability: &Availability,
) -> Option<StreamEntry> {
    let locator = if let Some(hash) = &result.info_hash {
        StreamLocator::InfoHash(hash.clone())
    } else if let Some(magnet) = &result.magnet_uri {
        StreamLocator::Url(magnet.clone())
    } else if let Some(link) = &result.direct_link {
        StreamLocator::Url(link.clone())
    } else {
        debug!(title = %result.title, "Dropping result without locator");
        return None;
    };

    let label = badges(result.info_hash.as_deref(), configured, availability);

    Some(StreamEntry {
        name: format!("{} {}", label, result.tracker),
        description: format!(
            "💾 {} 👤 {} ⬇️ {}\n{}",
            format_size(result.size_bytes),
            result.seeders,
            result.leechers,
            result.title
        ),
        locator,
    })
}
