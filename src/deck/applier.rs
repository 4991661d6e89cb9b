//! Applying a decoded deck to the current composition.
//!
//! Fail-closed: either every id resolves and the deck is replaced
//! wholesale, or nothing changes and every unknown id is reported.

use tracing::{info, warn};

use super::composition::DeckComposition;
use super::error::UnknownCards;
use super::list::DeckList;
use crate::cards::{CardCatalog, CardId, CardRecord};

/// Summary of a successful replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckChanged {
    /// Distinct ids in the new deck.
    pub distinct: usize,
    /// Total picks in the new deck.
    pub total: usize,
}

/// A decoded deck resolved against the catalog, for display before import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckPreview {
    /// Known entries with their records, ascending by id.
    pub entries: Vec<(CardRecord, u32)>,
    /// Ids the catalog does not have, ascending.
    pub unknown: Vec<CardId>,
}

impl DeckPreview {
    /// True when every id resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unknown.is_empty()
    }
}

/// Resolves decoded decks against a catalog.
#[derive(Debug)]
pub struct DeckCodeApplier<'a, C: CardCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: CardCatalog + ?Sized> DeckCodeApplier<'a, C> {
    #[must_use]
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Look up every entry without touching any deck.
    #[must_use]
    pub fn preview(&self, deck: &DeckList) -> DeckPreview {
        let mut entries = Vec::with_capacity(deck.len());
        let mut unknown = Vec::new();
        for (id, count) in deck.iter() {
            match self.catalog.lookup(id) {
                Some(record) => entries.push((record.clone(), count)),
                None => unknown.push(id),
            }
        }
        DeckPreview { entries, unknown }
    }

    /// Replace `composition` with `deck` if every id is known.
    pub fn apply(
        &self,
        composition: &mut DeckComposition,
        deck: &DeckList,
    ) -> Result<DeckChanged, UnknownCards> {
        if let Err(err) = composition.replace_all(deck, self.catalog) {
            warn!(unknown = ?err.ids, "deck code names unknown cards; deck left unchanged");
            return Err(err);
        }

        let changed = DeckChanged {
            distinct: deck.len(),
            total: composition.total_count(),
        };
        info!(distinct = changed.distinct, total = changed.total, "deck replaced from code");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;

    fn catalog() -> CardRegistry {
        (1..=10)
            .map(|i| CardRecord::new(CardId::new(i), format!("Card {i}")))
            .collect()
    }

    #[test]
    fn test_apply_replaces() {
        let catalog = catalog();
        let applier = DeckCodeApplier::new(&catalog);
        let mut composition = DeckComposition::from_picks([CardId::new(9)]);

        let deck = DeckList::from_counts([(CardId::new(2), 3), (CardId::new(1), 1)]).unwrap();
        let changed = applier.apply(&mut composition, &deck).unwrap();

        assert_eq!(changed, DeckChanged { distinct: 2, total: 4 });
        assert_eq!(composition.snapshot(), deck);
    }

    #[test]
    fn test_apply_rejects_all_or_nothing() {
        let catalog = catalog();
        let applier = DeckCodeApplier::new(&catalog);
        let mut composition = DeckComposition::from_picks([CardId::new(9), CardId::new(3)]);
        let before = composition.clone();

        let deck = DeckList::from_counts([(CardId::new(2), 1), (CardId::new(77), 1)]).unwrap();
        let err = applier.apply(&mut composition, &deck).unwrap_err();

        assert_eq!(err.ids, vec![CardId::new(77)]);
        assert_eq!(composition, before);
    }

    #[test]
    fn test_preview() {
        let catalog = catalog();
        let applier = DeckCodeApplier::new(&catalog);
        let deck = DeckList::from_counts([(CardId::new(3), 2), (CardId::new(40), 1)]).unwrap();

        let preview = applier.preview(&deck);
        assert!(!preview.is_complete());
        assert_eq!(preview.entries.len(), 1);
        assert_eq!(preview.entries[0].0.name, "Card 3");
        assert_eq!(preview.entries[0].1, 2);
        assert_eq!(preview.unknown, vec![CardId::new(40)]);
    }
}
