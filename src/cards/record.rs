//! Card identifiers and catalog records.
//!
//! `CardId` is the stable key used by decks and deck codes.
//! `CardRecord` is the display metadata the catalog hands back for an id.
//! The deck core never looks inside a record beyond its id.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a catalog entry.
///
/// Ids are small non-negative integers. At text boundaries (deck codes,
/// JSON, the CLI) they are written as plain decimal strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text that is not a plain decimal card id.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("card id must be plain decimal digits, got {0:?}")]
pub struct ParseCardIdError(pub String);

impl FromStr for CardId {
    type Err = ParseCardIdError;

    /// Digits only: no sign, no whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCardIdError(s.to_string());
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u32>().map(Self).map_err(|_| invalid())
    }
}

/// Display metadata for one catalog entry.
///
/// ## Example
///
/// ```
/// use deckcode::cards::{CardId, CardRecord};
///
/// let card = CardRecord::new(CardId::new(7), "Pot of Greed")
///     .with_image("img/7.webp");
///
/// assert_eq!(card.image.as_deref(), Some("img/7.webp"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Catalog identifier.
    pub id: CardId,

    /// Card name (for display).
    pub name: String,

    /// Image path or URL, if the catalog has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CardRecord {
    /// Create a new record with no image.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
        }
    }

    /// Attach an image location (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
