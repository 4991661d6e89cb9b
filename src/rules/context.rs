//! Deck-building context.
//!
//! Bundles the limit policy with the global limit-release toggle so the
//! composition rules can be exercised without any host environment.

use serde::{Deserialize, Serialize};

use super::limits::{BanList, LimitClass, LimitPolicy};
use crate::cards::CardId;

/// Toggles persisted alongside the deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSettings {
    /// Raise every finite cap of 3 or less to 4.
    pub limit_release: bool,
}

/// Everything `DeckComposition::add` consults besides the deck itself.
///
/// ## Example
///
/// ```
/// use deckcode::cards::CardId;
/// use deckcode::rules::{BanList, DeckContext, LimitClass};
///
/// let ctx = DeckContext::new(BanList::new().with(LimitClass::Restricted, CardId::new(8)))
///     .with_limit_release(true);
///
/// assert_eq!(ctx.max_allowed(CardId::new(8)), Some(4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeckContext {
    policy: LimitPolicy,
    settings: DeckSettings,
}

impl DeckContext {
    /// Create a context with limit-release off.
    #[must_use]
    pub fn new(ban_list: BanList) -> Self {
        Self {
            policy: LimitPolicy::new(ban_list),
            settings: DeckSettings::default(),
        }
    }

    /// Set the limit-release flag (builder pattern).
    #[must_use]
    pub fn with_limit_release(mut self, on: bool) -> Self {
        self.settings.limit_release = on;
        self
    }

    /// The limit policy.
    #[must_use]
    pub fn policy(&self) -> &LimitPolicy {
        &self.policy
    }

    #[must_use]
    pub fn settings(&self) -> DeckSettings {
        self.settings
    }

    #[must_use]
    pub fn limit_release(&self) -> bool {
        self.settings.limit_release
    }

    pub fn set_limit_release(&mut self, on: bool) {
        self.settings.limit_release = on;
    }

    /// Class in force for `id` under the current flag.
    #[must_use]
    pub fn effective_class(&self, id: CardId) -> LimitClass {
        self.policy.effective_class(id, self.settings.limit_release)
    }

    /// Maximum copies of `id` under the current flag. `None` means unlimited.
    #[must_use]
    pub fn max_allowed(&self, id: CardId) -> Option<u32> {
        self.policy.max_allowed(id, self.settings.limit_release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = DeckContext::default();
        assert!(!ctx.limit_release());
        assert_eq!(ctx.max_allowed(CardId::new(1)), Some(4));
    }

    #[test]
    fn test_toggle() {
        let mut ctx = DeckContext::new(BanList::new().with(LimitClass::SemiRestricted, CardId::new(2)));
        assert_eq!(ctx.max_allowed(CardId::new(2)), Some(2));

        ctx.set_limit_release(true);
        assert_eq!(ctx.max_allowed(CardId::new(2)), Some(4));
        assert_eq!(ctx.effective_class(CardId::new(2)), LimitClass::Normal);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = DeckSettings { limit_release: true };
        let json = serde_json::to_string(&settings).unwrap();
        let back: DeckSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
