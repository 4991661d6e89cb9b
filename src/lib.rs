//! # deckcode
//!
//! Deck composition rules and shareable deck codes for a card catalog.
//!
//! ## Design Principles
//!
//! 1. **Canonical Codes**: A deck's code depends only on its contents.
//!    Entries are always written in ascending id order, so the same deck
//!    built in any order produces byte-identical codes.
//!
//! 2. **All-or-Nothing Import**: A code either decodes and applies in
//!    full or leaves the current deck untouched. Checksums are verified
//!    before a body is parsed; unknown cards abort the whole import.
//!
//! 3. **Explicit Context**: Limit tables and the limit-release toggle live
//!    in a `DeckContext` passed by reference, never in globals.
//!
//! ## Modules
//!
//! - `cards`: Card ids, display records, catalog lookup
//! - `encoding`: VarInt, URL-safe Base64, SHA-256 checksums
//! - `rules`: Limit classes, ban lists, limit policy, deck context
//! - `deck`: Pick list, canonical map, code import, persistence, sessions
//! - `codec`: Versioned deck-code encode/decode

pub mod cards;
pub mod codec;
pub mod deck;
pub mod encoding;
pub mod rules;

// Re-export commonly used types
pub use crate::cards::{CardCatalog, CardId, CardRecord, CardRegistry};

pub use crate::codec::{decode, encode, CodeVersion, DecodeError, FormatError};

pub use crate::deck::{
    DeckBuilder, DeckChanged, DeckCodeApplier, DeckComposition, DeckError, DeckList,
    DeckPreview, DeckStore, FileStore, MemoryStore, UnknownCards,
};

pub use crate::rules::{BanList, DeckContext, LimitClass, LimitExceeded, LimitPolicy};
