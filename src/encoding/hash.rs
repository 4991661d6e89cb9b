//! SHA-256 digests and deck-code checksums.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest in a deck-code checksum.
pub const CHECKSUM_LEN: usize = 10;

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Truncated SHA-256 of a code body, exactly as transmitted.
///
/// ```
/// use deckcode::encoding::hash::checksum;
///
/// // sha256("") = e3b0c44298fc1c149afbf4c8996fb924...
/// assert_eq!(checksum(""), "e3b0c44298");
/// ```
#[must_use]
pub fn checksum(body: &str) -> String {
    let mut hex = sha256_hex(body.as_bytes());
    hex.truncate(CHECKSUM_LEN);
    hex
}
