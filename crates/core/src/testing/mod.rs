//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the collaborator traits the
//! stream composer depends on, so the full pipeline can be exercised without
//! an indexer, debrid accounts or network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use bgtrackers_core::testing::{fixtures, MockDebridProvider, MockMetadataLookup, MockSearcher};
//!
//! let searcher = MockSearcher::with_results(vec![fixtures::hash_result("Movie 1080p", HASH, 10)]);
//! let rd = MockDebridProvider::new("RD").with_cached([HASH]);
//! let metadata = MockMetadataLookup::new().with_title("tt0133093", "The Matrix", Some("1999"));
//!
//! // Wire into a StreamComposer...
//! ```

mod mock_debrid;
mod mock_metadata;
mod mock_searcher;

pub use mock_debrid::MockDebridProvider;
pub use mock_metadata::MockMetadataLookup;
pub use mock_searcher::{MockSearcher, RecordedSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::searcher::SearchResult;

    fn base(title: &str, seeders: u32) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            size_bytes: 1024 * 1024 * 1024,
            seeders,
            leechers: 0,
            tracker: "ArenaBG".to_string(),
            info_hash: None,
            magnet_uri: None,
            direct_link: None,
            category: "Movies".to_string(),
            publish_date: None,
            details_url: None,
        }
    }

    /// A result that already carries its info-hash.
    pub fn hash_result(title: &str, info_hash: &str, seeders: u32) -> SearchResult {
        SearchResult {
            info_hash: Some(info_hash.to_string()),
            ..base(title, seeders)
        }
    }

    /// A result with only a magnet URI (hash not yet extracted).
    pub fn magnet_result(title: &str, info_hash: &str, seeders: u32) -> SearchResult {
        SearchResult {
            magnet_uri: Some(format!("magnet:?xt=urn:btih:{}&dn={}", info_hash, title)),
            ..base(title, seeders)
        }
    }

    /// A result with only an indexer download link.
    pub fn link_result(title: &str, link: &str, seeders: u32) -> SearchResult {
        SearchResult {
            direct_link: Some(link.to_string()),
            ..base(title, seeders)
        }
    }
}
