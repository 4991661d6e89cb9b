//! The deck being built, as an ordered list of picks.
//!
//! Pick order is what the user sees; it carries no meaning for the codec,
//! which always works from `snapshot()`. The list is an `im::Vector`, so
//! cloning a composition (for previews or a saved copy) is O(1).

use im::Vector;

use super::error::UnknownCards;
use super::list::DeckList;
use crate::cards::{CardCatalog, CardId};
use crate::rules::{DeckContext, LimitExceeded};

/// Mutable deck under construction.
///
/// ## Example
///
/// ```
/// use deckcode::cards::CardId;
/// use deckcode::deck::DeckComposition;
/// use deckcode::rules::{DeckContext, LimitExceeded};
///
/// let ctx = DeckContext::default();
/// let mut deck = DeckComposition::new();
/// let card = CardId::new(12);
///
/// for _ in 0..4 {
///     deck.add(card, &ctx).unwrap();
/// }
/// assert_eq!(deck.add(card, &ctx), Err(LimitExceeded::AtNormalLimit));
/// assert_eq!(deck.count(card), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckComposition {
    picks: Vector<CardId>,
}

impl DeckComposition {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a deck from picks in their saved order, without limit checks.
    pub fn from_picks<I: IntoIterator<Item = CardId>>(picks: I) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    /// Append one copy of `id` if its cap allows.
    ///
    /// On rejection the deck is unchanged.
    pub fn add(&mut self, id: CardId, ctx: &DeckContext) -> Result<(), LimitExceeded> {
        let class = ctx.effective_class(id);
        if let (Some(max), Some(reason)) = (class.cap(), LimitExceeded::for_class(class)) {
            if self.count(id) >= max {
                return Err(reason);
            }
        }
        self.picks.push_back(id);
        Ok(())
    }

    /// Remove the most recently added copy of `id`.
    ///
    /// Returns false (and does nothing) when the deck holds no copy.
    pub fn remove(&mut self, id: CardId) -> bool {
        let last = self
            .picks
            .iter()
            .enumerate()
            .filter(|(_, pick)| **pick == id)
            .map(|(index, _)| index)
            .last();

        match last {
            Some(index) => {
                self.picks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Copies of `id` currently in the deck.
    #[must_use]
    pub fn count(&self, id: CardId) -> u32 {
        let n = self.picks.iter().filter(|&&pick| pick == id).count();
        u32::try_from(n).unwrap_or(u32::MAX)
    }

    /// Total number of picks. Deck size is not capped here.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.picks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Picks in display order.
    pub fn picks(&self) -> impl Iterator<Item = CardId> + '_ {
        self.picks.iter().copied()
    }

    /// Remove every pick.
    pub fn clear(&mut self) {
        self.picks.clear();
    }

    /// Group picks into the canonical id → count form.
    #[must_use]
    pub fn snapshot(&self) -> DeckList {
        self.picks().map(|id| (id, 1)).collect()
    }

    /// Replace the whole deck with `entries`.
    ///
    /// Every id must exist in `catalog`; otherwise nothing changes and the
    /// unknown ids are returned. The new picks are laid out in ascending
    /// id order. Per-card caps are not checked.
    pub fn replace_all<C>(&mut self, entries: &DeckList, catalog: &C) -> Result<(), UnknownCards>
    where
        C: CardCatalog + ?Sized,
    {
        let unknown: Vec<CardId> = entries.ids().filter(|&id| !catalog.contains(id)).collect();
        if !unknown.is_empty() {
            return Err(UnknownCards { ids: unknown });
        }

        let mut picks = Vector::new();
        for (id, count) in entries.iter() {
            for _ in 0..count {
                picks.push_back(id);
            }
        }
        self.picks = picks;
        Ok(())
    }
}
