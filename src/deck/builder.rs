//! Deck-builder session: composition, rules, catalog, and persistence.
//!
//! Every successful mutation is written through to the store. Imports
//! decode fully before touching the deck, and replace it only when every
//! card is known.
//!
//! `DeckBuilder` is not internally synchronized. Hosts that share one
//! across threads should wrap the whole builder in a single mutex, since
//! `add` reads the limit-release flag while validating.

use tracing::{debug, warn};

use super::applier::{DeckChanged, DeckCodeApplier, DeckPreview};
use super::composition::DeckComposition;
use super::error::DeckError;
use super::list::DeckList;
use super::store::{DeckStore, SavedDeck, CURRENT_DECK_KEY, LIMIT_RELEASE_KEY};
use crate::cards::{CardCatalog, CardId};
use crate::codec;
use crate::rules::{BanList, DeckContext, DeckSettings, LimitExceeded};

/// Deck-builder session.
///
/// ## Example
///
/// ```
/// use deckcode::cards::{CardId, CardRecord, CardRegistry};
/// use deckcode::deck::{DeckBuilder, MemoryStore};
/// use deckcode::rules::BanList;
///
/// let catalog: CardRegistry = (1..=3)
///     .map(|i| CardRecord::new(CardId::new(i), format!("Card {i}")))
///     .collect();
///
/// let mut builder = DeckBuilder::open(catalog.clone(), MemoryStore::new(), BanList::new());
/// builder.add(CardId::new(2)).unwrap();
/// builder.add(CardId::new(1)).unwrap();
/// let code = builder.export_code();
///
/// let mut other = DeckBuilder::open(catalog, MemoryStore::new(), BanList::new());
/// other.import_code(&code).unwrap();
/// assert_eq!(other.composition().count(CardId::new(2)), 1);
/// ```
#[derive(Debug)]
pub struct DeckBuilder<C, S> {
    catalog: C,
    store: S,
    context: DeckContext,
    composition: DeckComposition,
}

impl<C: CardCatalog, S: DeckStore> DeckBuilder<C, S> {
    /// Start a session, restoring the deck and flag from `store`.
    ///
    /// Missing or unreadable entries fall back to an empty deck with
    /// limit-release off.
    pub fn open(catalog: C, store: S, ban_list: BanList) -> Self {
        let settings = store
            .load(LIMIT_RELEASE_KEY)
            .and_then(|json| parse_or_warn::<DeckSettings>(LIMIT_RELEASE_KEY, &json))
            .unwrap_or_default();
        let saved = store
            .load(CURRENT_DECK_KEY)
            .and_then(|json| parse_or_warn::<SavedDeck>(CURRENT_DECK_KEY, &json));
        let composition = saved
            .as_ref()
            .map(|saved| saved.restore(&catalog))
            .unwrap_or_default();
        let trimmed = saved.is_some_and(|saved| saved.picks.len() != composition.total_count());

        debug!(
            picks = composition.total_count(),
            limit_release = settings.limit_release,
            "opened deck builder"
        );
        let mut builder = Self {
            catalog,
            store,
            context: DeckContext::new(ban_list).with_limit_release(settings.limit_release),
            composition,
        };
        // Stale ids were dropped on restore; write the trimmed deck back.
        if trimmed {
            builder.persist_deck();
        }
        builder
    }

    #[must_use]
    pub fn composition(&self) -> &DeckComposition {
        &self.composition
    }

    #[must_use]
    pub fn context(&self) -> &DeckContext {
        &self.context
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add one copy of `id`, persisting on success.
    pub fn add(&mut self, id: CardId) -> Result<(), LimitExceeded> {
        if let Err(reason) = self.composition.add(id, &self.context) {
            debug!(%id, ?reason, "add rejected");
            return Err(reason);
        }
        self.persist_deck();
        Ok(())
    }

    /// Remove the newest copy of `id`. Returns false if there was none.
    pub fn remove(&mut self, id: CardId) -> bool {
        let removed = self.composition.remove(id);
        if removed {
            self.persist_deck();
        }
        removed
    }

    /// Empty the deck.
    pub fn clear(&mut self) {
        self.composition.clear();
        self.persist_deck();
    }

    /// Toggle limit-release. Copies already in the deck are kept as they are.
    pub fn set_limit_release(&mut self, on: bool) {
        self.context.set_limit_release(on);
        match serde_json::to_string(&self.context.settings()) {
            Ok(json) => self.store.save(LIMIT_RELEASE_KEY, json),
            Err(err) => warn!(%err, "failed to serialize deck settings"),
        }
    }

    /// Canonical id → count view of the deck.
    #[must_use]
    pub fn snapshot(&self) -> DeckList {
        self.composition.snapshot()
    }

    /// Encode the current deck.
    #[must_use]
    pub fn export_code(&self) -> String {
        codec::encode(&self.snapshot())
    }

    /// Decode `code` and resolve it against the catalog without changing anything.
    pub fn preview_code(&self, code: &str) -> Result<DeckPreview, DeckError> {
        let deck = codec::decode(code)?;
        Ok(DeckCodeApplier::new(&self.catalog).preview(&deck))
    }

    /// Decode `code` and replace the deck with it.
    ///
    /// On any error the current deck is untouched.
    pub fn import_code(&mut self, code: &str) -> Result<DeckChanged, DeckError> {
        let deck = codec::decode(code)?;
        let changed = DeckCodeApplier::new(&self.catalog).apply(&mut self.composition, &deck)?;
        self.persist_deck();
        Ok(changed)
    }

    fn persist_deck(&mut self) {
        let saved = SavedDeck::capture(&self.composition, &self.catalog);
        match serde_json::to_string(&saved) {
            Ok(json) => self.store.save(CURRENT_DECK_KEY, json),
            Err(err) => warn!(%err, "failed to serialize deck"),
        }
    }
}

fn parse_or_warn<T: serde::de::DeserializeOwned>(key: &str, json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %err, "ignoring unreadable deck store entry");
            None
        }
    }
}
