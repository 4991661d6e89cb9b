//! Deck-level errors.

use thiserror::Error;

use crate::cards::CardId;
use crate::codec::DecodeError;

/// Ids that did not resolve against the catalog, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown card ids: {}", join_ids(.ids))]
pub struct UnknownCards {
    pub ids: Vec<CardId>,
}

/// Why a deck code could not be imported.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The code failed to decode (bad format or checksum).
    #[error("invalid deck code")]
    InvalidCode(#[source] DecodeError),

    /// The code decoded but names cards the catalog does not have.
    #[error(transparent)]
    UnknownCards(#[from] UnknownCards),
}

impl From<DecodeError> for DeckError {
    fn from(err: DecodeError) -> Self {
        DeckError::InvalidCode(err)
    }
}

fn join_ids(ids: &[CardId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
