//! Decode failures.
//!
//! Two families: the code is structurally wrong (`Format`), or it parsed
//! but its checksum does not match the body (`Integrity`). Either way the
//! caller gets no deck back.

use thiserror::Error;

use super::version::CodeVersion;
use crate::deck::TooManyCards;
use crate::encoding::VarIntError;

/// Result type for deck-code decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Why a deck code could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed deck code: {0}")]
    Format(#[from] FormatError),

    #[error("deck code checksum mismatch (code says {expected}, body hashes to {actual})")]
    Integrity { expected: String, actual: String },
}

impl DecodeError {
    /// True for checksum mismatches.
    #[must_use]
    pub fn is_integrity(&self) -> bool {
        matches!(self, DecodeError::Integrity { .. })
    }

    /// True for grammar or body parse failures.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, DecodeError::Format(_))
    }
}

/// Structural problems with a deck code.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected TAG|CHECKSUM|BODY")]
    MissingSeparators,

    #[error("unknown version tag {0:?}")]
    UnknownTag(String),

    #[error("{version} body is not valid base64: {source}")]
    Base64 {
        version: CodeVersion,
        #[source]
        source: base64::DecodeError,
    },

    #[error("{version} body has a bad varint stream: {source}")]
    VarInt {
        version: CodeVersion,
        #[source]
        source: VarIntError,
    },

    #[error("{version} body is not a JSON entry array: {source}")]
    Json {
        version: CodeVersion,
        #[source]
        source: serde_json::Error,
    },

    #[error("{version} segment {segment:?}: {reason}")]
    Segment {
        version: CodeVersion,
        segment: String,
        reason: &'static str,
    },

    #[error("{version} body: card id out of range")]
    IdOutOfRange { version: CodeVersion },

    #[error("{version} body: {source}")]
    TooManyCards {
        version: CodeVersion,
        #[source]
        source: TooManyCards,
    },
}
