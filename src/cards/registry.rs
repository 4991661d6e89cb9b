//! Card catalog lookup.
//!
//! The deck core only needs to ask "does this id exist, and what do I show
//! for it". `CardCatalog` is that seam; `CardRegistry` is the in-memory
//! implementation used by the CLI and the tests.

use rustc_hash::FxHashMap;

use super::record::{CardId, CardRecord};

/// Read-only card catalog.
pub trait CardCatalog {
    /// Look up the record for an id.
    fn lookup(&self, id: CardId) -> Option<&CardRecord>;

    /// Check whether an id exists in the catalog.
    fn contains(&self, id: CardId) -> bool {
        self.lookup(id).is_some()
    }
}

/// Registry of card records.
///
/// ## Example
///
/// ```
/// use deckcode::cards::{CardCatalog, CardId, CardRecord, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardRecord::new(CardId::new(1), "Dark Hole"));
///
/// assert!(registry.contains(CardId::new(1)));
/// assert_eq!(registry.lookup(CardId::new(1)).unwrap().name, "Dark Hole");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardRecord>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a JSON array of records.
    ///
    /// Later duplicates of an id replace earlier ones.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let records: Vec<CardRecord> = serde_json::from_str(json)?;
        Ok(records.into_iter().collect())
    }

    /// Register a card record, returning the record it replaced.
    pub fn register(&mut self, card: CardRecord) -> Option<CardRecord> {
        self.cards.insert(card.id, card)
    }

    /// Get a card record by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardRecord> {
        self.cards.get(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card records.
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }
}

impl CardCatalog for CardRegistry {
    fn lookup(&self, id: CardId) -> Option<&CardRecord> {
        self.get(id)
    }
}

impl FromIterator<CardRecord> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        let mut registry = Self::new();
        for card in iter {
            registry.register(card);
        }
        registry
    }
}
