//! Deck-code version tags.

use std::fmt;

/// Every deck-code variant the decoder understands.
///
/// | Tag | Variant |
/// |-----|---------|
/// | `1` | legacy text, decimal `id:count` |
/// | `2` | legacy text, base-36 `id:count` |
/// | `3` | JSON `[["id", count], ...]` in Base64URL |
/// | `5`, `6` | delta VarInt pairs in Base64URL |
///
/// Only `BinaryVarInt` is ever emitted. Tag `6` reads as `BinaryVarInt`
/// and is written back out as `5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeVersion {
    LegacyDecimal,
    LegacyBase36,
    JsonBase64,
    BinaryVarInt,
}

impl CodeVersion {
    /// The variant the encoder produces.
    pub const CURRENT: CodeVersion = CodeVersion::BinaryVarInt;

    /// Resolve a tag. Unknown tags return `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "1" => Some(CodeVersion::LegacyDecimal),
            "2" => Some(CodeVersion::LegacyBase36),
            "3" => Some(CodeVersion::JsonBase64),
            "5" | "6" => Some(CodeVersion::BinaryVarInt),
            _ => None,
        }
    }

    /// Canonical tag written for this variant.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            CodeVersion::LegacyDecimal => "1",
            CodeVersion::LegacyBase36 => "2",
            CodeVersion::JsonBase64 => "3",
            CodeVersion::BinaryVarInt => "5",
        }
    }

    /// Radix of the id and count fields in legacy text bodies.
    #[must_use]
    pub const fn text_radix(self) -> Option<u32> {
        match self {
            CodeVersion::LegacyDecimal => Some(10),
            CodeVersion::LegacyBase36 => Some(36),
            CodeVersion::JsonBase64 | CodeVersion::BinaryVarInt => None,
        }
    }
}

impl fmt::Display for CodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeVersion::LegacyDecimal => "legacy-decimal",
            CodeVersion::LegacyBase36 => "legacy-base36",
            CodeVersion::JsonBase64 => "json-base64",
            CodeVersion::BinaryVarInt => "binary-varint",
        };
        write!(f, "{name} (v{})", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for version in [
            CodeVersion::LegacyDecimal,
            CodeVersion::LegacyBase36,
            CodeVersion::JsonBase64,
            CodeVersion::BinaryVarInt,
        ] {
            assert_eq!(CodeVersion::from_tag(version.tag()), Some(version));
        }
    }

    #[test]
    fn test_alias_and_unknown_tags() {
        assert_eq!(CodeVersion::from_tag("6"), Some(CodeVersion::BinaryVarInt));
        assert_eq!(CodeVersion::from_tag("4"), None);
        assert_eq!(CodeVersion::from_tag(""), None);
        assert_eq!(CodeVersion::from_tag("05"), None);
    }
}
