//! Code → deck.
//!
//! Decoding is all-or-nothing: the text is normalized, split into
//! `TAG|CHECKSUM|BODY`, the checksum is verified against the body as
//! received, and only then is the body parsed by the variant the tag
//! names. Any failure returns an error and no partial deck.

use serde::Deserialize;
use tracing::{debug, warn};

use super::error::{DecodeError, DecodeResult, FormatError};
use super::version::CodeVersion;
use crate::cards::CardId;
use crate::deck::DeckList;
use crate::encoding::{base64url, checksum, VarIntReader};

/// A code split into its three fields, checksum not yet verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCode<'a> {
    pub version: CodeVersion,
    pub checksum: &'a str,
    pub body: &'a str,
}

impl<'a> RawCode<'a> {
    /// Split already-normalized text on its first two `|`.
    pub fn split(text: &'a str) -> Result<Self, FormatError> {
        let mut parts = text.splitn(3, '|');
        let (Some(tag), Some(checksum), Some(body)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(FormatError::MissingSeparators);
        };
        let version =
            CodeVersion::from_tag(tag).ok_or_else(|| FormatError::UnknownTag(tag.to_string()))?;
        Ok(Self {
            version,
            checksum,
            body,
        })
    }

    /// Compare the embedded checksum against the body.
    pub fn verify(&self) -> DecodeResult<()> {
        let actual = checksum(self.body);
        if actual != self.checksum {
            return Err(DecodeError::Integrity {
                expected: self.checksum.to_string(),
                actual,
            });
        }
        Ok(())
    }

    /// Parse the body with the variant's parser. Does not verify the checksum.
    ///
    /// Bodies whose counts add up past `MAX_DECK_PICKS` are rejected.
    pub fn parse_body(&self) -> Result<DeckList, FormatError> {
        let version = self.version;
        let counts = match version {
            CodeVersion::BinaryVarInt => parse_binary(self.body)?,
            CodeVersion::JsonBase64 => parse_json(self.body)?,
            CodeVersion::LegacyDecimal | CodeVersion::LegacyBase36 => {
                parse_text(version, self.body)?
            }
        };
        DeckList::from_counts(counts)
            .map_err(|source| FormatError::TooManyCards { version, source })
    }
}

/// Decode any supported deck code.
pub fn decode(code: &str) -> DecodeResult<DeckList> {
    let text = normalize(code);
    let raw = RawCode::split(&text)?;

    if let Err(err) = raw.verify() {
        warn!(version = %raw.version, %err, "rejected deck code");
        return Err(err);
    }

    let deck = raw.parse_body()?;
    debug!(
        version = %raw.version,
        entries = deck.len(),
        cards = deck.total(),
        "decoded deck code"
    );
    Ok(deck)
}

/// Strip whitespace and zero-width characters and fold full-width `｜` / `：`.
///
/// Pasting from mobile keyboards and chat apps tends to introduce both.
#[must_use]
pub fn normalize(code: &str) -> String {
    code.chars()
        .filter(|&c| !c.is_whitespace() && !is_zero_width(c))
        .map(|c| match c {
            '\u{FF5C}' => '|',
            '\u{FF1A}' => ':',
            other => other,
        })
        .collect()
}

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

type Counts = Vec<(CardId, i64)>;

fn parse_binary(body: &str) -> Result<Counts, FormatError> {
    let version = CodeVersion::BinaryVarInt;
    let bytes =
        base64url::decode(body).map_err(|source| FormatError::Base64 { version, source })?;

    let mut counts = Vec::new();
    let mut reader = VarIntReader::new(&bytes);
    let mut previous = 0u32;
    while !reader.is_empty() {
        let read = |reader: &mut VarIntReader<'_>| {
            reader
                .read_u32()
                .map_err(|source| FormatError::VarInt { version, source })
        };
        let delta = read(&mut reader)?;
        let count = read(&mut reader)?;

        let id = previous
            .checked_add(delta)
            .ok_or(FormatError::IdOutOfRange { version })?;
        counts.push((CardId::new(id), i64::from(count)));
        previous = id;
    }
    Ok(counts)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonId {
    Text(String),
    Number(u32),
}

fn parse_json(body: &str) -> Result<Counts, FormatError> {
    let version = CodeVersion::JsonBase64;
    let bytes =
        base64url::decode(body).map_err(|source| FormatError::Base64 { version, source })?;
    let entries: Vec<(JsonId, i64)> =
        serde_json::from_slice(&bytes).map_err(|source| FormatError::Json { version, source })?;

    let mut counts = Vec::with_capacity(entries.len());
    for (id, count) in entries {
        let id = match id {
            JsonId::Number(n) => CardId::new(n),
            JsonId::Text(s) => s.parse().map_err(|_| FormatError::Segment {
                version,
                segment: s,
                reason: "card id is not a non-negative integer",
            })?,
        };
        counts.push((id, count));
    }
    Ok(counts)
}

fn parse_text(version: CodeVersion, body: &str) -> Result<Counts, FormatError> {
    let radix = version.text_radix().unwrap_or(10);
    let mut counts = Vec::new();

    for segment in body.split('|').filter(|s| !s.is_empty()) {
        let bad = |reason| FormatError::Segment {
            version,
            segment: segment.to_string(),
            reason,
        };
        let (id, count) = segment.split_once(':').ok_or_else(|| bad("missing ':'"))?;
        if !is_digits(id) {
            return Err(bad("bad card id"));
        }
        if !is_digits(count.strip_prefix('-').unwrap_or(count)) {
            return Err(bad("bad count"));
        }
        let id = u32::from_str_radix(id, radix).map_err(|_| bad("bad card id"))?;
        let count = i64::from_str_radix(count, radix).map_err(|_| bad("bad count"))?;
        counts.push((CardId::new(id), count));
    }
    Ok(counts)
}

/// Unsigned digit run. The integer parsers on their own also take a leading `+`.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode::assemble;
    use crate::deck::MAX_DECK_PICKS;

    fn ids(pairs: &[(u32, i64)]) -> DeckList {
        DeckList::from_counts(pairs.iter().map(|&(id, c)| (CardId::new(id), c))).unwrap()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" 5 ｜abc\u{200B}｜ de\nf "), "5|abc|def");
        assert_eq!(normalize("1|x|3：1"), "1|x|3:1");
        assert_eq!(normalize("\u{FEFF}5|a|b\u{3000}"), "5|a|b");
    }

    #[test]
    fn test_missing_separators() {
        let err = decode("5|abc").unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::MissingSeparators)));

        let err = decode("").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_unknown_tag() {
        let err = decode("9|e3b0c44298|").unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::UnknownTag(ref t)) if t == "9"));
    }

    #[test]
    fn test_body_may_contain_separators() {
        let raw = RawCode::split("1|abc|1:2|3:4").unwrap();
        assert_eq!(raw.checksum, "abc");
        assert_eq!(raw.body, "1:2|3:4");
    }

    #[test]
    fn test_legacy_decimal() {
        let code = assemble(CodeVersion::LegacyDecimal, "12:3|4:1|99:0|7:-2");
        assert_eq!(decode(&code).unwrap(), ids(&[(4, 1), (12, 3)]));
    }

    #[test]
    fn test_legacy_base36() {
        // "z" = 35, "10" = 36
        let code = assemble(CodeVersion::LegacyBase36, "z:2|10:1|a:3");
        assert_eq!(decode(&code).unwrap(), ids(&[(10, 3), (35, 2), (36, 1)]));
    }

    #[test]
    fn test_legacy_checksum_over_normalized_body() {
        let code = assemble(CodeVersion::LegacyDecimal, "1:2|3:4");
        let pasted = code.replace('|', "｜").replace(':', "：");
        assert_eq!(decode(&pasted).unwrap(), ids(&[(1, 2), (3, 4)]));
    }

    #[test]
    fn test_legacy_bad_segment() {
        let code = assemble(CodeVersion::LegacyDecimal, "1:2|3");
        assert!(decode(&code).unwrap_err().is_format());

        let code = assemble(CodeVersion::LegacyDecimal, "1:2|x:4");
        assert!(decode(&code).unwrap_err().is_format());
    }

    #[test]
    fn test_json_variant() {
        let body = base64url::encode(br#"[["12",2],["3",1],[5,0],["40",-1]]"#);
        let code = assemble(CodeVersion::JsonBase64, &body);
        assert_eq!(decode(&code).unwrap(), ids(&[(3, 1), (12, 2)]));
    }

    #[test]
    fn test_json_variant_rejects_non_array() {
        let body = base64url::encode(br#"{"12":2}"#);
        let code = assemble(CodeVersion::JsonBase64, &body);
        let err = decode(&code).unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::Json { .. })));
    }

    #[test]
    fn test_binary_truncated_stream() {
        // Delta present, count missing.
        let body = base64url::encode([0x05u8]);
        let code = assemble(CodeVersion::BinaryVarInt, &body);
        let err = decode(&code).unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::VarInt { .. })));
    }

    #[test]
    fn test_binary_skips_zero_counts_but_advances_base() {
        // (3, 0), (2, 1) -> id 5 x1
        let body = base64url::encode([0x03u8, 0x00, 0x02, 0x01]);
        let code = assemble(CodeVersion::BinaryVarInt, &body);
        assert_eq!(decode(&code).unwrap(), ids(&[(5, 1)]));
    }

    #[test]
    fn test_binary_id_overflow() {
        let mut bytes = Vec::new();
        crate::encoding::varint::write_u32(&mut bytes, u32::MAX);
        bytes.push(0x01);
        bytes.push(0x01);
        bytes.push(0x01);
        let code = assemble(CodeVersion::BinaryVarInt, &base64url::encode(bytes));
        let err = decode(&code).unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::IdOutOfRange { .. })));
    }

    #[test]
    fn test_alias_tag() {
        let body = base64url::encode([0x07u8, 0x02]);
        let code = assemble(CodeVersion::BinaryVarInt, &body).replacen('5', "6", 1);
        assert!(code.starts_with("6|"));
        assert_eq!(decode(&code).unwrap(), ids(&[(7, 2)]));
    }

    #[test]
    fn test_signed_ids_rejected() {
        for body in ["+8:3", "8:+3", "-8:3", "+z:1"] {
            let version = if body == "+z:1" {
                CodeVersion::LegacyBase36
            } else {
                CodeVersion::LegacyDecimal
            };
            let err = decode(&assemble(version, body)).unwrap_err();
            assert!(matches!(err, DecodeError::Format(FormatError::Segment { .. })), "{body}");
        }

        let body = base64url::encode(br#"[["+7",1]]"#);
        let err = decode(&assemble(CodeVersion::JsonBase64, &body)).unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::Segment { .. })));
    }

    #[test]
    fn test_negative_legacy_count_skipped() {
        let code = assemble(CodeVersion::LegacyBase36, "a:-1|b:2");
        assert_eq!(decode(&code).unwrap(), ids(&[(11, 2)]));
    }

    #[test]
    fn test_oversized_counts_rejected() {
        // Card 1 x u32::MAX fits in a handful of bytes.
        let mut bytes = vec![0x01];
        crate::encoding::varint::write_u32(&mut bytes, u32::MAX);
        let code = assemble(CodeVersion::BinaryVarInt, &base64url::encode(bytes));
        let err = decode(&code).unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::TooManyCards { .. })));

        // Many modest entries that only overflow together.
        let body = (1..=3)
            .map(|id| format!("{id}:{}", MAX_DECK_PICKS / 2))
            .collect::<Vec<_>>()
            .join("|");
        let err = decode(&assemble(CodeVersion::LegacyDecimal, &body)).unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::TooManyCards { .. })));

        let body = base64url::encode(br#"[["1",99999999999]]"#);
        let err = decode(&assemble(CodeVersion::JsonBase64, &body)).unwrap_err();
        assert!(matches!(err, DecodeError::Format(FormatError::TooManyCards { .. })));
    }

    #[test]
    fn test_integrity_checked_before_body() {
        // Garbage body with a wrong checksum reports integrity, not format.
        let err = decode("5|0000000000|!!!").unwrap_err();
        assert!(err.is_integrity());
    }
}
