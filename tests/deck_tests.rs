//! Deck composition and import integration tests.
//!
//! These tests verify the deck-building rules end to end:
//! - Per-card caps and the limit-release override
//! - LIFO removal
//! - All-or-nothing import against the catalog
//! - Persistence through a file store

use deckcode::cards::{CardId, CardRecord, CardRegistry};
use deckcode::codec;
use deckcode::deck::{
    DeckBuilder, DeckComposition, DeckError, DeckList, FileStore, MemoryStore, MAX_DECK_PICKS,
};
use deckcode::encoding::{base64url, checksum, varint};
use deckcode::rules::{BanList, DeckContext, LimitClass, LimitExceeded};

const NORMAL: CardId = CardId::new(100);
const RESTRICTED: CardId = CardId::new(200);
const UNLIMITED: CardId = CardId::new(300);

fn ban_list() -> BanList {
    BanList::new()
        .with(LimitClass::Restricted, RESTRICTED)
        .with(LimitClass::Unlimited, UNLIMITED)
}

fn catalog() -> CardRegistry {
    (1..=10)
        .chain([100, 200, 300])
        .map(|i| CardRecord::new(CardId::new(i), format!("Card {i}")))
        .collect()
}

// =============================================================================
// Limit enforcement
// =============================================================================

/// Test that a normal card takes four copies and rejects the fifth.
#[test]
fn test_normal_limit() {
    let ctx = DeckContext::new(ban_list());
    let mut deck = DeckComposition::new();

    for _ in 0..4 {
        deck.add(NORMAL, &ctx).unwrap();
    }
    assert_eq!(deck.add(NORMAL, &ctx), Err(LimitExceeded::AtNormalLimit));
    assert_eq!(deck.count(NORMAL), 4);
}

/// Test a restricted card with limit-release off and on.
#[test]
fn test_restricted_with_and_without_release() {
    let mut ctx = DeckContext::new(ban_list());
    let mut deck = DeckComposition::new();

    deck.add(RESTRICTED, &ctx).unwrap();
    assert_eq!(deck.add(RESTRICTED, &ctx), Err(LimitExceeded::AtRestrictedLimit));
    assert_eq!(deck.count(RESTRICTED), 1);

    ctx.set_limit_release(true);
    for _ in 2..=4 {
        deck.add(RESTRICTED, &ctx).unwrap();
    }
    assert!(deck.add(RESTRICTED, &ctx).is_err());
    assert_eq!(deck.count(RESTRICTED), 4);
}

/// Test that an unlimited card takes a thousand copies.
#[test]
fn test_unlimited() {
    let ctx = DeckContext::new(ban_list());
    let mut deck = DeckComposition::new();

    for _ in 0..1000 {
        deck.add(UNLIMITED, &ctx).unwrap();
    }
    assert_eq!(deck.total_count(), 1000);
}

/// Test that removing an absent card is a silent no-op.
#[test]
fn test_remove_at_zero() {
    let mut deck = DeckComposition::new();
    assert!(!deck.remove(NORMAL));
    assert!(deck.is_empty());
}

/// Test that repeated removes undo repeated adds in reverse order.
#[test]
fn test_remove_undoes_adds() {
    let ctx = DeckContext::new(ban_list());
    let mut deck = DeckComposition::new();
    let order = [NORMAL, UNLIMITED, NORMAL, RESTRICTED];
    for id in order {
        deck.add(id, &ctx).unwrap();
    }

    deck.remove(RESTRICTED);
    deck.remove(NORMAL);
    assert_eq!(deck.picks().collect::<Vec<_>>(), vec![NORMAL, UNLIMITED]);
}

// =============================================================================
// Import
// =============================================================================

/// Test that one unknown id among ten known ids blocks the whole import.
#[test]
fn test_unknown_card_blocks_import() {
    let mut builder = DeckBuilder::open(catalog(), MemoryStore::new(), ban_list());
    builder.add(NORMAL).unwrap();
    builder.add(RESTRICTED).unwrap();
    let before = builder.composition().clone();
    let saved_before = builder.export_code();

    let mut incoming = DeckList::from_counts((1..=10).map(|i| (CardId::new(i), 2))).unwrap();
    incoming.add(CardId::new(4242), 1);
    let code = codec::encode(&incoming);

    match builder.import_code(&code) {
        Err(DeckError::UnknownCards(err)) => assert_eq!(err.ids, vec![CardId::new(4242)]),
        other => panic!("expected unknown cards, got {other:?}"),
    }
    assert_eq!(builder.composition(), &before);
    assert_eq!(builder.export_code(), saved_before);
}

/// Test that every unknown id is reported, not just the first.
#[test]
fn test_all_unknown_ids_reported() {
    let mut builder = DeckBuilder::open(catalog(), MemoryStore::new(), ban_list());
    let code = codec::encode(&DeckList::from_counts([
        (CardId::new(9000), 1),
        (CardId::new(1), 1),
        (CardId::new(8000), 1),
    ])
    .unwrap());

    let err = builder.import_code(&code).unwrap_err();
    assert_eq!(err.to_string(), "unknown card ids: 8000, 9000");
}

/// Test that a short code claiming billions of copies is refused before any pick is made.
#[test]
fn test_oversized_count_blocks_import() {
    let mut builder = DeckBuilder::open(catalog(), MemoryStore::new(), ban_list());
    builder.add(NORMAL).unwrap();
    let saved_before = builder.export_code();

    let mut bytes = vec![1u8];
    varint::write_u32(&mut bytes, u32::MAX);
    let body = base64url::encode(bytes);
    let code = format!("5|{}|{body}", checksum(&body));
    assert!(code.len() < 32);

    let err = builder.import_code(&code).unwrap_err();
    assert!(matches!(err, DeckError::InvalidCode(ref e) if e.is_format()));
    assert_eq!(builder.composition().total_count(), 1);
    assert_eq!(builder.export_code(), saved_before);
}

/// Test that a deck right at the pick bound still imports.
#[test]
fn test_import_at_pick_bound() {
    let mut builder = DeckBuilder::open(catalog(), MemoryStore::new(), ban_list());
    let code = codec::encode(&DeckList::from_counts([(UNLIMITED, MAX_DECK_PICKS as i64)]).unwrap());

    builder.import_code(&code).unwrap();
    assert_eq!(u64::from(builder.composition().count(UNLIMITED)), MAX_DECK_PICKS);
}

/// Test that import replaces rather than merges, ignoring caps.
#[test]
fn test_import_replaces_wholesale() {
    let mut builder = DeckBuilder::open(catalog(), MemoryStore::new(), ban_list());
    builder.add(NORMAL).unwrap();

    let code = codec::encode(&DeckList::from_counts([(RESTRICTED, 3), (CardId::new(2), 1)]).unwrap());
    builder.import_code(&code).unwrap();

    assert_eq!(builder.composition().count(NORMAL), 0);
    assert_eq!(builder.composition().count(RESTRICTED), 3);
    assert_eq!(
        builder.composition().picks().collect::<Vec<_>>(),
        vec![CardId::new(2), RESTRICTED, RESTRICTED, RESTRICTED]
    );
}

/// Test that a deck built in different orders exports the same code.
#[test]
fn test_export_is_order_independent() {
    let mut a = DeckBuilder::open(catalog(), MemoryStore::new(), ban_list());
    let mut b = DeckBuilder::open(catalog(), MemoryStore::new(), ban_list());

    for id in [1, 5, 1, 100, 3] {
        a.add(CardId::new(id)).unwrap();
    }
    for id in [100, 3, 1, 1, 5] {
        b.add(CardId::new(id)).unwrap();
    }
    assert_eq!(a.export_code(), b.export_code());
}

// =============================================================================
// Persistence
// =============================================================================

/// Test that a file-backed session survives a restart.
#[test]
fn test_file_store_session() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut builder = DeckBuilder::open(catalog(), store, ban_list());
        builder.set_limit_release(true);
        builder.add(RESTRICTED).unwrap();
        builder.add(RESTRICTED).unwrap();
        builder.add(CardId::new(7)).unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    let builder = DeckBuilder::open(catalog(), store, ban_list());
    assert!(builder.context().limit_release());
    assert_eq!(
        builder.composition().picks().collect::<Vec<_>>(),
        vec![RESTRICTED, RESTRICTED, CardId::new(7)]
    );
}
