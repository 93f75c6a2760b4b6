//! Converts raw indexer records into [`SearchResult`]s.

use chrono::{DateTime, NaiveDateTime, Utc};
use futures::future;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::{debug, warn};

use super::link_resolver::{LinkResolver, ResolvedLink};
use super::magnet::{extract_magnet_hash, normalize_info_hash};
use super::SearchResult;

const UNKNOWN: &str = "Unknown";

/// One entry of the indexer's `Results` array. Every field is optional;
/// indexers omit or null them freely.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawIndexerRecord {
    title: Option<String>,
    size: Option<i64>,
    seeders: Option<i64>,
    peers: Option<i64>,
    tracker: Option<String>,
    info_hash: Option<String>,
    magnet_uri: Option<String>,
    link: Option<String>,
    category_desc: Option<String>,
    publish_date: Option<String>,
    details: Option<String>,
}

/// Normalize a single raw record.
///
/// Records with neither a download link nor a magnet URI are discarded.
pub(crate) fn normalize(raw: RawIndexerRecord) -> Option<SearchResult> {
    let magnet_uri = raw.magnet_uri.filter(|m| !m.is_empty());
    let direct_link = raw.link.filter(|l| !l.is_empty());
    if magnet_uri.is_none() && direct_link.is_none() {
        return None;
    }

    let seeders = raw.seeders.unwrap_or(0).max(0);
    let peers = raw.peers.unwrap_or(0).max(0);

    // Prefer an explicit hash, else the one embedded in the magnet.
    let info_hash = raw
        .info_hash
        .as_deref()
        .and_then(normalize_info_hash)
        .or_else(|| {
            magnet_uri
                .as_deref()
                .and_then(extract_magnet_hash)
                .and_then(normalize_info_hash)
        });

    Some(SearchResult {
        title: non_empty_or_unknown(raw.title),
        size_bytes: raw.size.unwrap_or(0).max(0) as u64,
        seeders: clamp_u32(seeders),
        leechers: clamp_u32((peers - seeders).max(0)),
        tracker: non_empty_or_unknown(raw.tracker),
        info_hash,
        magnet_uri,
        direct_link,
        category: raw.category_desc.unwrap_or_default(),
        publish_date: raw.publish_date.as_deref().and_then(parse_indexer_date),
        details_url: raw.details,
    })
}

/// Normalize a list of raw JSON records, skipping any that fail to decode.
pub(crate) fn normalize_records(records: Vec<serde_json::Value>) -> Vec<SearchResult> {
    let total = records.len();
    let results: Vec<SearchResult> = records
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawIndexerRecord>(value) {
            Ok(raw) => normalize(raw),
            Err(e) => {
                warn!(error = %e, "Skipping malformed indexer record");
                None
            }
        })
        .collect();

    debug!(total, kept = results.len(), "Normalized indexer records");
    results
}

/// Resolve info-hashes for results that only carry a download link.
///
/// At most `max_parallel` resolutions run at once. Results that cannot be
/// resolved keep their link and stay in the list.
pub(crate) async fn backfill_hashes(
    results: &mut [SearchResult],
    resolver: &LinkResolver,
    max_parallel: usize,
) {
    let pending: Vec<(usize, SearchResult)> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.info_hash.is_none())
        .map(|(i, r)| (i, r.clone()))
        .collect();

    if pending.is_empty() {
        return;
    }

    debug!(count = pending.len(), "Resolving download links");

    let resolved: Vec<(usize, ResolvedLink)> = stream::iter(pending)
        .map(|(index, result)| async move {
            resolver
                .extract_hash(&result)
                .await
                .map(|resolved| (index, resolved))
        })
        .buffer_unordered(max_parallel.max(1))
        .filter_map(future::ready)
        .collect()
        .await;

    for (index, link) in resolved {
        apply_resolution(&mut results[index], &link);
    }
}

/// Record a resolved hash, keeping the magnet URI consistent with it.
fn apply_resolution(result: &mut SearchResult, link: &ResolvedLink) {
    let current_magnet_usable = result
        .magnet_uri
        .as_deref()
        .and_then(ResolvedLink::from_magnet)
        .is_some();

    if matches!(link, ResolvedLink::Magnet { .. }) || !current_magnet_usable {
        result.magnet_uri = Some(link.magnet_uri());
    }
    result.info_hash = Some(link.info_hash().to_string());
}

fn non_empty_or_unknown(value: Option<String>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

/// Parse the indexer's date format.
fn parse_indexer_date(date_str: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            // Some indexers omit the offset
            NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    const HASH: &str = "c12fe1c06bba254a9dc9f519b335aa7c1367a88a";

    fn record(value: serde_json::Value) -> RawIndexerRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_record() {
        let result = normalize(record(json!({
            "Title": "Movie.2020.1080p.BluRay",
            "Size": 2147483648i64,
            "Seeders": 50,
            "Peers": 65,
            "Tracker": "ArenaBG",
            "MagnetUri": format!("magnet:?xt=urn:btih:{}", HASH.to_uppercase()),
            "Link": "http://jackett/dl/1",
            "CategoryDesc": "Movies/HD",
            "PublishDate": "2024-06-15T10:30:00Z",
            "Details": "http://tracker/details/1"
        })))
        .unwrap();

        assert_eq!(result.title, "Movie.2020.1080p.BluRay");
        assert_eq!(result.size_bytes, 2_147_483_648);
        assert_eq!(result.seeders, 50);
        assert_eq!(result.leechers, 15);
        assert_eq!(result.tracker, "ArenaBG");
        assert_eq!(result.info_hash.as_deref(), Some(HASH));
        assert_eq!(result.category, "Movies/HD");
        assert_eq!(result.publish_date.unwrap().year(), 2024);
        assert_eq!(result.details_url.as_deref(), Some("http://tracker/details/1"));
    }

    #[test]
    fn test_normalize_defaults() {
        let result = normalize(record(json!({
            "Title": null,
            "Link": "http://jackett/dl/2"
        })))
        .unwrap();

        assert_eq!(result.title, "Unknown");
        assert_eq!(result.tracker, "Unknown");
        assert_eq!(result.size_bytes, 0);
        assert_eq!(result.seeders, 0);
        assert_eq!(result.leechers, 0);
        assert!(result.info_hash.is_none());
        assert!(result.magnet_uri.is_none());
    }

    #[test]
    fn test_normalize_clamps_negative_counts() {
        let result = normalize(record(json!({
            "Seeders": 10,
            "Peers": 4,
            "Size": -5,
            "Link": "http://jackett/dl/3"
        })))
        .unwrap();

        assert_eq!(result.seeders, 10);
        assert_eq!(result.leechers, 0);
        assert_eq!(result.size_bytes, 0);

        let result = normalize(record(json!({
            "Seeders": -3,
            "Link": "http://jackett/dl/4"
        })))
        .unwrap();
        assert_eq!(result.seeders, 0);
    }

    #[test]
    fn test_normalize_discards_records_without_locator() {
        assert!(normalize(record(json!({ "Title": "Nothing" }))).is_none());
        assert!(normalize(record(json!({ "Title": "Empty", "Link": "", "MagnetUri": "" }))).is_none());
    }

    #[test]
    fn test_normalize_prefers_explicit_hash() {
        let result = normalize(record(json!({
            "InfoHash": HASH.to_uppercase(),
            "Link": "http://jackett/dl/5"
        })))
        .unwrap();
        assert_eq!(result.info_hash.as_deref(), Some(HASH));
    }

    #[test]
    fn test_normalize_records_skips_malformed() {
        let results = normalize_records(vec![
            json!({ "Title": "Good", "Link": "http://jackett/dl/1" }),
            json!({ "Title": 42, "Link": "http://jackett/dl/2" }),
            json!("not an object"),
            json!({ "Title": "No locator" }),
        ]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Good");
    }

    fn linked_result(magnet: Option<&str>) -> SearchResult {
        normalize(record(json!({
            "Title": "Movie 1080p",
            "Link": "http://indexer/dl/1",
            "MagnetUri": magnet,
        })))
        .unwrap()
    }

    #[test]
    fn test_apply_resolution_replaces_hashless_magnet() {
        let mut result = linked_result(Some("magnet:?dn=nohash"));
        assert!(result.info_hash.is_none());

        let resolved = ResolvedLink::InfoHash(HASH.to_string());
        apply_resolution(&mut result, &resolved);

        assert_eq!(result.info_hash.as_deref(), Some(HASH));
        assert_eq!(
            result.magnet_uri.as_deref(),
            Some(format!("magnet:?xt=urn:btih:{}", HASH).as_str())
        );
    }

    #[test]
    fn test_apply_resolution_takes_resolved_magnet() {
        let mut result = linked_result(None);
        let uri = format!("magnet:?xt=urn:btih:{}&dn=Movie", HASH);
        let resolved = ResolvedLink::from_magnet(&uri).unwrap();

        apply_resolution(&mut result, &resolved);

        assert_eq!(result.info_hash.as_deref(), Some(HASH));
        assert_eq!(result.magnet_uri.as_deref(), Some(uri.as_str()));
    }

    #[test]
    fn test_parse_indexer_date() {
        let date = parse_indexer_date("2024-06-15T10:30:00+03:00").unwrap();
        assert_eq!(date.day(), 15);

        let date = parse_indexer_date("2024-06-15T10:30:00").unwrap();
        assert_eq!(date.month(), 6);

        assert!(parse_indexer_date("yesterday").is_none());
    }
}
