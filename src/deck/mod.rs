//! Deck state: the pick list being edited, its canonical map, code import,
//! and persistence.
//!
//! ## Key Types
//!
//! - `DeckComposition`: ordered picks with per-card limit enforcement
//! - `DeckList`: canonical id → count map (what the codec reads/writes)
//! - `DeckCodeApplier`: all-or-nothing replacement from a decoded code
//! - `DeckStore`: host key-value persistence
//! - `DeckBuilder`: session tying the above together

pub mod applier;
pub mod builder;
pub mod composition;
pub mod error;
pub mod list;
pub mod store;

pub use applier::{DeckChanged, DeckCodeApplier, DeckPreview};
pub use builder::DeckBuilder;
pub use composition::DeckComposition;
pub use error::{DeckError, UnknownCards};
pub use list::{DeckList, TooManyCards, MAX_DECK_PICKS};
pub use store::{DeckStore, FileStore, MemoryStore, SavedDeck, SavedPick};
