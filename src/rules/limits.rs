//! Per-card copy limits.
//!
//! Every card belongs to exactly one `LimitClass`, assigned by a `BanList`
//! (external configuration, usually loaded from JSON). `LimitPolicy` turns
//! that into a maximum copy count, taking the global limit-release toggle
//! into account.
//!
//! ## Precedence
//!
//! Membership is checked Unlimited → TenCap → SevenCap → Restricted →
//! SemiRestricted, so an id accidentally listed in two tables always
//! resolves the same way. Ids in no table are `Normal`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardId;
use crate::deck::DeckList;

/// Copy allowance assigned to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitClass {
    /// Up to 4 copies.
    Normal,
    /// 1 copy.
    Restricted,
    /// Up to 2 copies.
    SemiRestricted,
    /// Up to 7 copies.
    SevenCap,
    /// Up to 10 copies.
    TenCap,
    /// No cap.
    Unlimited,
}

impl LimitClass {
    /// Copies allowed for the class. `None` means unlimited.
    #[must_use]
    pub const fn cap(self) -> Option<u32> {
        match self {
            LimitClass::Normal => Some(4),
            LimitClass::Restricted => Some(1),
            LimitClass::SemiRestricted => Some(2),
            LimitClass::SevenCap => Some(7),
            LimitClass::TenCap => Some(10),
            LimitClass::Unlimited => None,
        }
    }

    /// Class after applying limit-release: finite caps of 3 or less become `Normal`.
    #[must_use]
    pub const fn released(self) -> Self {
        match self.cap() {
            Some(cap) if cap <= 3 => LimitClass::Normal,
            _ => self,
        }
    }
}

/// Rejection returned by `DeckComposition::add` when a card is at its cap.
///
/// The variant names the cap that was hit. With limit-release on, a
/// restricted card that reaches 4 copies reports `AtNormalLimit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LimitExceeded {
    #[error("card is already at the normal limit of 4 copies")]
    AtNormalLimit,
    #[error("card is restricted to 1 copy")]
    AtRestrictedLimit,
    #[error("card is semi-restricted to 2 copies")]
    AtSemiRestrictedLimit,
    #[error("card is capped at 7 copies")]
    AtSevenCap,
    #[error("card is capped at 10 copies")]
    AtTenCap,
}

impl LimitExceeded {
    /// Rejection for a class, or `None` for `Unlimited`.
    #[must_use]
    pub const fn for_class(class: LimitClass) -> Option<Self> {
        match class {
            LimitClass::Normal => Some(LimitExceeded::AtNormalLimit),
            LimitClass::Restricted => Some(LimitExceeded::AtRestrictedLimit),
            LimitClass::SemiRestricted => Some(LimitExceeded::AtSemiRestrictedLimit),
            LimitClass::SevenCap => Some(LimitExceeded::AtSevenCap),
            LimitClass::TenCap => Some(LimitExceeded::AtTenCap),
            LimitClass::Unlimited => None,
        }
    }
}

/// Membership tables for the non-normal limit classes.
///
/// Deserializes from a JSON object; missing tables are empty.
///
/// ```
/// use deckcode::rules::BanList;
///
/// let list: BanList = serde_json::from_str(r#"{"restricted": [55, 56]}"#).unwrap();
/// assert_eq!(list.restricted.len(), 2);
/// assert!(list.unlimited.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanList {
    pub unlimited: FxHashSet<CardId>,
    pub ten_cap: FxHashSet<CardId>,
    pub seven_cap: FxHashSet<CardId>,
    pub restricted: FxHashSet<CardId>,
    pub semi_restricted: FxHashSet<CardId>,
}

impl BanList {
    /// Create an empty ban list (every card `Normal`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a ban list from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add a card to the table for `class` (builder pattern).
    ///
    /// `Normal` has no table; the call is a no-op for it.
    #[must_use]
    pub fn with(mut self, class: LimitClass, id: CardId) -> Self {
        self.insert(class, id);
        self
    }

    /// Add a card to the table for `class`.
    pub fn insert(&mut self, class: LimitClass, id: CardId) {
        let table = match class {
            LimitClass::Normal => return,
            LimitClass::Restricted => &mut self.restricted,
            LimitClass::SemiRestricted => &mut self.semi_restricted,
            LimitClass::SevenCap => &mut self.seven_cap,
            LimitClass::TenCap => &mut self.ten_cap,
            LimitClass::Unlimited => &mut self.unlimited,
        };
        table.insert(id);
    }
}

/// An entry whose count is above its effective cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitViolation {
    pub id: CardId,
    pub count: u32,
    pub max: u32,
    pub reason: LimitExceeded,
}

/// Pure mapping from card id (and the limit-release flag) to a copy cap.
#[derive(Clone, Debug, Default)]
pub struct LimitPolicy {
    ban_list: BanList,
}

impl LimitPolicy {
    /// Create a policy from membership tables.
    #[must_use]
    pub fn new(ban_list: BanList) -> Self {
        Self { ban_list }
    }

    /// Class assigned by the tables, ignoring limit-release.
    #[must_use]
    pub fn base_class(&self, id: CardId) -> LimitClass {
        let list = &self.ban_list;
        if list.unlimited.contains(&id) {
            LimitClass::Unlimited
        } else if list.ten_cap.contains(&id) {
            LimitClass::TenCap
        } else if list.seven_cap.contains(&id) {
            LimitClass::SevenCap
        } else if list.restricted.contains(&id) {
            LimitClass::Restricted
        } else if list.semi_restricted.contains(&id) {
            LimitClass::SemiRestricted
        } else {
            LimitClass::Normal
        }
    }

    /// Cap from the tables alone. `None` means unlimited.
    #[must_use]
    pub fn base_limit(&self, id: CardId) -> Option<u32> {
        self.base_class(id).cap()
    }

    /// Class in force once limit-release is taken into account.
    #[must_use]
    pub fn effective_class(&self, id: CardId, limit_release: bool) -> LimitClass {
        let class = self.base_class(id);
        if limit_release {
            class.released()
        } else {
            class
        }
    }

    /// Maximum copies allowed. `None` means unlimited.
    #[must_use]
    pub fn max_allowed(&self, id: CardId, limit_release: bool) -> Option<u32> {
        self.effective_class(id, limit_release).cap()
    }

    /// Entries of `deck` whose counts exceed their effective caps, ascending by id.
    #[must_use]
    pub fn violations(&self, deck: &DeckList, limit_release: bool) -> Vec<LimitViolation> {
        deck.iter()
            .filter_map(|(id, count)| {
                let class = self.effective_class(id, limit_release);
                let max = class.cap()?;
                let reason = LimitExceeded::for_class(class)?;
                (count > max).then_some(LimitViolation {
                    id,
                    count,
                    max,
                    reason,
                })
            })
            .collect()
    }
}
