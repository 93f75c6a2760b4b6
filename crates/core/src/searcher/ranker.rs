//! Release quality scoring.

use super::SearchResult;

/// Resolution tiers, highest first. Only the first match counts.
const RESOLUTION_TIERS: &[(&[&str], u64)] = &[
    (&["2160p", "4k"], 400),
    (&["1080p"], 300),
    (&["720p"], 200),
    (&["480p"], 100),
];

const SOURCE_BONUSES: &[(&[&str], u64)] = &[(&["bluray", "remux"], 50), (&["web-dl", "webdl"], 30)];

/// Score a result by its title tags, with seeders as a minor weight.
pub fn quality_score(result: &SearchResult) -> u64 {
    let title = result.title.to_lowercase();
    let contains_any = |tags: &[&str]| tags.iter().any(|tag| title.contains(tag));

    let resolution = RESOLUTION_TIERS
        .iter()
        .find(|(tags, _)| contains_any(tags))
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0);

    let source: u64 = SOURCE_BONUSES
        .iter()
        .filter(|(tags, _)| contains_any(tags))
        .map(|(_, bonus)| *bonus)
        .sum();

    resolution + source + u64::from(result.seeders)
}

/// Order results by descending score. Equal scores keep their input order.
pub fn rank(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    // sort_by_cached_key is stable
    results.sort_by_cached_key(|r| std::cmp::Reverse(quality_score(r)));
    results
}
