//! Torrent file parser - derives the info-hash from .torrent bytes.
//!
//! Uses librqbit-core to decode the bencoded metainfo. The info-hash is the
//! SHA-1 of the `info` dictionary exactly as it appears on the wire.

use librqbit_core::torrent_metainfo::{torrent_from_bytes, TorrentMetaV1Owned};
use thiserror::Error;

/// Errors that can occur when parsing torrent files.
#[derive(Debug, Error)]
pub enum TorrentParseError {
    #[error("Failed to parse torrent: {0}")]
    ParseError(String),
}

/// Extract the info_hash from a .torrent file.
///
/// Returns the lowercase hex string of the info_hash.
pub fn parse_torrent_info_hash(bytes: &[u8]) -> Result<String, TorrentParseError> {
    let torrent: TorrentMetaV1Owned =
        torrent_from_bytes(bytes).map_err(|e| TorrentParseError::ParseError(e.to_string()))?;

    Ok(torrent.info_hash.as_string())
}
