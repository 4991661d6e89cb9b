//! Canonical deck map.
//!
//! `DeckList` is the id → count form the codec reads and writes. It is
//! backed by a `BTreeMap`, so iteration is always in ascending id order
//! no matter how the entries were inserted. Counts are always at least 1.
//!
//! Lists built from outside input go through `from_counts`, which caps the
//! total at `MAX_DECK_PICKS` so a short code cannot expand into millions
//! of picks.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::cards::CardId;

/// Upper bound on the total copies a deck list built by `from_counts` may hold.
pub const MAX_DECK_PICKS: u64 = 20_000;

/// Counts that sum past `MAX_DECK_PICKS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("deck holds more than {limit} cards")]
pub struct TooManyCards {
    pub limit: u64,
}

/// A multiset of card ids with positive counts, ordered by id.
///
/// ## Example
///
/// ```
/// use deckcode::cards::CardId;
/// use deckcode::deck::DeckList;
///
/// let deck = DeckList::from_counts([(CardId::new(9), 2), (CardId::new(3), 0), (CardId::new(1), 1)])
///     .unwrap();
///
/// let ids: Vec<_> = deck.ids().collect();
/// assert_eq!(ids, vec![CardId::new(1), CardId::new(9)]);
/// assert_eq!(deck.total(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DeckList {
    entries: BTreeMap<CardId, u32>,
}

impl DeckList {
    /// Create an empty deck list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from signed counts, dropping non-positive ones and summing duplicates.
    ///
    /// Fails once the running total passes `MAX_DECK_PICKS`.
    pub fn from_counts<I>(counts: I) -> Result<Self, TooManyCards>
    where
        I: IntoIterator<Item = (CardId, i64)>,
    {
        let too_many = TooManyCards {
            limit: MAX_DECK_PICKS,
        };
        let mut deck = Self::new();
        let mut total = 0u64;
        for (id, count) in counts {
            if count <= 0 {
                continue;
            }
            let count = u32::try_from(count).map_err(|_| too_many)?;
            total += u64::from(count);
            if total > MAX_DECK_PICKS {
                return Err(too_many);
            }
            deck.add(id, count);
        }
        Ok(deck)
    }

    /// Add `count` copies of `id`. Adding zero copies is a no-op.
    pub fn add(&mut self, id: CardId, count: u32) {
        if count == 0 {
            return;
        }
        let slot = self.entries.entry(id).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    /// Count for `id` (0 if absent).
    #[must_use]
    pub fn get(&self, id: CardId) -> u32 {
        self.entries.get(&id).copied().unwrap_or(0)
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.values().map(|&c| u64::from(c)).sum()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, u32)> + '_ {
        self.entries.iter().map(|(&id, &count)| (id, count))
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.entries.keys().copied()
    }
}

impl FromIterator<(CardId, u32)> for DeckList {
    fn from_iter<I: IntoIterator<Item = (CardId, u32)>>(iter: I) -> Self {
        let mut deck = Self::new();
        for (id, count) in iter {
            deck.add(id, count);
        }
        deck
    }
}
