//! Shareable deck codes.
//!
//! A deck code is `TAG|CHECKSUM|BODY`:
//!
//! - `TAG` picks the body format (see `CodeVersion`)
//! - `CHECKSUM` is the first 10 hex characters of SHA-256 over `BODY`
//!   exactly as transmitted
//! - `BODY` lists entries in ascending id order
//!
//! `encode` always writes the newest (binary VarInt) format. `decode`
//! accepts every historical format and either returns the whole deck or
//! an error.

pub mod decode;
pub mod encode;
pub mod error;
pub mod version;

pub use decode::{decode, normalize, RawCode};
pub use encode::encode;
pub use error::{DecodeError, DecodeResult, FormatError};
pub use version::CodeVersion;
