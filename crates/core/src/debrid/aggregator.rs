//! Fans availability checks out to every configured provider and merges
//! the answers per hash.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::metrics::DEBRID_CACHED_HASHES;

use super::{AvailabilityMap, DebridProvider, ProviderId};

/// Combined availability: for each hash, the providers reporting it cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    cached: HashMap<String, BTreeSet<ProviderId>>,
}

impl Availability {
    /// Fold one provider's answer in. Merging is order-independent.
    pub fn merge(&mut self, provider: &ProviderId, map: &AvailabilityMap) {
        for (hash, _) in map.iter().filter(|(_, cached)| **cached) {
            self.cached
                .entry(hash.clone())
                .or_default()
                .insert(provider.clone());
        }
    }

    /// Providers reporting `hash` cached, matched as given or lowercased.
    pub fn providers_for(&self, hash: &str) -> Option<&BTreeSet<ProviderId>> {
        self.cached
            .get(hash)
            .or_else(|| self.cached.get(&hash.to_lowercase()))
    }

    pub fn is_cached_by(&self, hash: &str, provider: &ProviderId) -> bool {
        self.providers_for(hash)
            .map(|providers| providers.contains(provider))
            .unwrap_or(false)
    }

    /// Hashes cached by at least one provider.
    pub fn len(&self) -> usize {
        self.cached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cached.is_empty()
    }
}

/// Query every configured provider concurrently and merge the results.
///
/// Unconfigured providers are skipped. A provider that fails contributes
/// nothing; the others are unaffected.
pub async fn check_all(providers: &[Arc<dyn DebridProvider>], hashes: &[String]) -> Availability {
    let mut availability = Availability::default();
    if hashes.is_empty() {
        return availability;
    }

    let checks = providers
        .iter()
        .filter(|p| p.is_configured())
        .map(|provider| async move { (provider.id(), provider.check_cached(hashes).await) });

    for (id, result) in join_all(checks).await {
        match result {
            Ok(map) => {
                let hits = map.values().filter(|cached| **cached).count();
                DEBRID_CACHED_HASHES
                    .with_label_values(&[id.as_str()])
                    .inc_by(hits as u64);
                debug!(provider = %id, checked = hashes.len(), cached = hits, "Availability checked");
                availability.merge(id, &map);
            }
            Err(e) => {
                warn!(provider = %id, error = %e, "Availability check failed");
            }
        }
    }

    availability
}
