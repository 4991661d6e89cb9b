//! Deck composition rules: per-card copy limits and the context they run in.
//!
//! - `LimitClass` / `BanList`: static membership tables
//! - `LimitPolicy`: pure id → cap mapping
//! - `DeckContext`: policy plus the limit-release toggle

pub mod context;
pub mod limits;

pub use context::{DeckContext, DeckSettings};
pub use limits::{BanList, LimitClass, LimitExceeded, LimitPolicy, LimitViolation};
