//! Torrent search.
//!
//! This module provides a `Searcher` trait backed by Jackett, plus the
//! pieces of the search pipeline: result normalization, download-link
//! resolution to info-hashes, and quality ranking.

mod jackett;
mod link_resolver;
pub mod magnet;
mod normalizer;
mod ranker;
mod torrent_parser;
mod types;

pub use jackett::JackettSearcher;
pub use link_resolver::{LinkResolver, ResolveError, ResolvedLink};
pub use ranker::{quality_score, rank};
pub use torrent_parser::{parse_torrent_info_hash, TorrentParseError};
pub use types::*;
