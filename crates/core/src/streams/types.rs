//! Stream entries as served to the player.

use serde::{Deserialize, Serialize};

/// Description used for the "no results" placeholder.
pub const NO_RESULTS_DESCRIPTION: &str = "No results found";

/// Dummy locator of the "no results" placeholder.
pub const NO_RESULTS_URL: &str = "http://localhost/no-results";

/// How the player should fetch a stream. Exactly one per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreamLocator {
    /// Play through the player's own torrent engine.
    InfoHash(String),
    /// Magnet URI or direct download link.
    Url(String),
}

/// One playable candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    /// Cache badges followed by the tracker name, e.g. `"[RD+] [TB] ArenaBG"`.
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub locator: StreamLocator,
}

impl StreamEntry {
    /// The single entry returned when nothing playable was found.
    pub fn no_results(addon_name: &str) -> Self {
        Self {
            name: addon_name.to_string(),
            description: NO_RESULTS_DESCRIPTION.to_string(),
            locator: StreamLocator::Url(NO_RESULTS_URL.to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.description == NO_RESULTS_DESCRIPTION
            && self.locator == StreamLocator::Url(NO_RESULTS_URL.to_string())
    }
}

/// Format a byte count with base-1024 units and two decimals.
pub fn format_size(size_bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if size_bytes == 0 {
        return "0B".to_string();
    }

    let mut size = size_bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.2}{}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2}PB", size)
}
