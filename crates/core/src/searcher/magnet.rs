//! Magnet URI helpers and info-hash normalization.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static BTIH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)xt=urn:btih:([a-z0-9]+)").unwrap());

/// Returns true if `s` is a magnet URI.
pub fn is_magnet(s: &str) -> bool {
    s.get(..7)
        .map(|scheme| scheme.eq_ignore_ascii_case("magnet:"))
        .unwrap_or(false)
}

/// Extract the `xt=urn:btih:` value from a magnet URI, exactly as written.
pub fn extract_magnet_hash(magnet: &str) -> Option<&str> {
    BTIH.captures(magnet)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Normalize an info-hash to 40 lowercase hex characters.
///
/// Accepts the 40-character hex form in any case and the 32-character
/// base32 form used by some magnet links.
pub fn normalize_info_hash(hash: &str) -> Option<String> {
    let hash = hash.trim();
    match hash.len() {
        40 if hash.chars().all(|c| c.is_ascii_hexdigit()) => Some(hash.to_ascii_lowercase()),
        32 => decode_base32(hash).map(hex::encode),
        _ => None,
    }
}

/// Build a minimal magnet URI for an info-hash.
pub fn magnet_from_hash(info_hash: &str) -> String {
    format!("magnet:?xt=urn:btih:{}", info_hash)
}

/// Decode a 32-character RFC 4648 base32 string into 20 bytes.
fn decode_base32(s: &str) -> Option<[u8; 20]> {
    let mut out = [0u8; 20];
    let mut buffer: u32 = 0;
    let mut bits = 0;
    let mut idx = 0;

    for c in s.bytes() {
        let value = match c.to_ascii_uppercase() {
            c @ b'A'..=b'Z' => c - b'A',
            c @ b'2'..=b'7' => c - b'2' + 26,
            _ => return None,
        };
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            *out.get_mut(idx)? = (buffer >> bits) as u8;
            buffer &= (1 << bits) - 1;
            idx += 1;
        }
    }

    (idx == out.len()).then_some(out)
}
