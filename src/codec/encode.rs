//! Deck → code.

use tracing::debug;

use super::version::CodeVersion;
use crate::deck::DeckList;
use crate::encoding::{base64url, checksum, varint};

/// Encode a deck as a `5|CHECKSUM|BODY` code.
///
/// The body is the Base64URL of `(id - previous_id, count)` varint pairs
/// in ascending id order, with `previous_id` starting at 0. Two decks with
/// the same contents always produce the same code.
///
/// ```
/// use deckcode::cards::CardId;
/// use deckcode::codec;
/// use deckcode::deck::DeckList;
///
/// let deck = DeckList::from_counts([(CardId::new(2), 3), (CardId::new(1), 1)]).unwrap();
/// let code = codec::encode(&deck);
///
/// assert!(code.starts_with("5|"));
/// assert_eq!(codec::decode(&code).unwrap(), deck);
/// ```
#[must_use]
pub fn encode(deck: &DeckList) -> String {
    let body = binary_body(deck);
    let code = assemble(CodeVersion::CURRENT, &body);
    debug!(
        entries = deck.len(),
        cards = deck.total(),
        len = code.len(),
        "encoded deck code"
    );
    code
}

/// Join a tag and body with the body's checksum.
pub(crate) fn assemble(version: CodeVersion, body: &str) -> String {
    format!("{}|{}|{}", version.tag(), checksum(body), body)
}

fn binary_body(deck: &DeckList) -> String {
    let mut bytes = Vec::with_capacity(deck.len() * 2);
    let mut previous = 0u32;
    for (id, count) in deck.iter() {
        // Ascending iteration keeps every delta non-negative.
        varint::write_u32(&mut bytes, id.raw() - previous);
        varint::write_u32(&mut bytes, count);
        previous = id.raw();
    }
    base64url::encode(bytes)
}
