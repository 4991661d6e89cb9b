//! Stateless encoding primitives used by the deck-code codec.
//!
//! - `varint`: 7-bit continuation varints
//! - `base64url`: URL-safe Base64, unpadded on output
//! - `hash`: SHA-256 and the truncated body checksum

pub mod base64url;
pub mod hash;
pub mod varint;

pub use hash::{checksum, sha256_hex, CHECKSUM_LEN};
pub use varint::{VarIntError, VarIntReader};
