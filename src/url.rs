//! URL composition and identifier extraction.
//!
//! A resource URL is `/{collection}/{slug}-{identifier}`, where the
//! identifier is the short code when the resource has one, else the primary
//! id. Only the identifier is load-bearing; the slug ahead of it is
//! regenerated from the current title and may differ between links to the
//! same resource.
//!
//! Extraction has to recognize every suffix format that ever shipped, so it
//! runs an ordered rule chain: short code, then UUID, then the legacy numeric
//! id, then an identity fallback. The order is part of the public contract —
//! previously generated links depend on it (a UUID's final hex group would
//! false-positive against the numeric rule if that rule ran first).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::slug::slugify;
use crate::types::ResourceKeys;

/// Exactly ten `[a-z0-9]` at the end of the segment, preceded by a hyphen or
/// the start. The anchor matters: without it a canonical UUID would match on
/// the last ten characters of its twelve-character final group.
static SHORT_CODE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|-)([a-z0-9]{10})$").unwrap());

/// Trailing canonical hyphenated UUID, either case.
static UUID_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})$",
    )
    .unwrap()
});

/// Trailing `-{digits}`, the retired numeric-id scheme.
static NUMERIC_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([0-9]+)$").unwrap());

/// Which extraction rule recognized a URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Ten-character `[a-z0-9]` suffix.
    ShortCode,

    /// Canonical hyphenated UUID suffix.
    Uuid,

    /// Legacy trailing numeric id.
    Numeric,

    /// No rule matched; the whole segment is treated as the identifier.
    Opaque,
}

/// An identifier recovered from a URL segment, tagged with the rule that
/// matched so the routing layer can order its lookups.
///
/// The tag is a hint, not a verdict: a short-code-shaped suffix might be the
/// last word of a slug, so routing is expected to try the short-code space
/// first and fall back to the primary-id space, as [`crate::resolve`] does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedIdentifier {
    value: String,
    kind: IdentifierKind,
}

impl ExtractedIdentifier {
    /// The recovered identifier string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The rule that produced the value.
    #[must_use]
    pub const fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Consumes the extraction, returning the identifier string.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }
}

impl std::fmt::Display for ExtractedIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The suffix rules in precedence order. First match wins.
fn suffix_rules() -> [(IdentifierKind, &'static Regex); 3] {
    [
        (IdentifierKind::ShortCode, &*SHORT_CODE_SUFFIX),
        (IdentifierKind::Uuid, &*UUID_SUFFIX),
        (IdentifierKind::Numeric, &*NUMERIC_SUFFIX),
    ]
}

/// Composes the absolute path for a resource.
///
/// The slug is derived from the title at call time; an empty slug (a title
/// with no word characters) degenerates to `/{collection}/-{identifier}`,
/// which extraction handles like any other segment.
///
/// ```
/// use lectio_slug::{compose_path, ResourceId, ResourceKeys, ShortCode};
///
/// let keys = ResourceKeys::new(ResourceId::new())
///     .with_short_code("k5b8x2p9m1".parse::<ShortCode>().unwrap());
/// assert_eq!(
///     compose_path("lessons", "Úvod do historie", &keys),
///     "/lessons/uvod-do-historie-k5b8x2p9m1",
/// );
/// ```
#[must_use]
pub fn compose_path(collection: &str, title: &str, keys: &ResourceKeys) -> String {
    format!("/{}/{}-{}", collection, slugify(title), keys.routing_key())
}

/// Recovers the identifier from a URL path segment.
///
/// The segment is the part after the collection prefix, without slashes.
/// Rules run in precedence order; if none matches, the entire segment is
/// returned unchanged as an [`IdentifierKind::Opaque`] identifier, so
/// extraction is total — even for the empty string.
#[must_use]
pub fn extract_identifier(segment: &str) -> ExtractedIdentifier {
    for (kind, pattern) in suffix_rules() {
        if let Some(captures) = pattern.captures(segment) {
            let matched = &captures[1];
            let value = match kind {
                // Historical links may carry uppercase hex.
                IdentifierKind::Uuid => matched.to_ascii_lowercase(),
                _ => matched.to_string(),
            };
            return ExtractedIdentifier { value, kind };
        }
    }
    ExtractedIdentifier {
        value: segment.to_string(),
        kind: IdentifierKind::Opaque,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResourceId, ShortCode};
    use proptest::prelude::*;
    use rstest::rstest;

    fn keys(id: &str, code: Option<&str>) -> ResourceKeys {
        let mut keys = ResourceKeys::new(ResourceId::parse(id).unwrap());
        if let Some(code) = code {
            keys = keys.with_short_code(ShortCode::parse(code).unwrap());
        }
        keys
    }

    #[rstest]
    #[case("uvod-do-historie-k5b8x2p9m1", "k5b8x2p9m1", IdentifierKind::ShortCode)]
    #[case(
        "uvod-38e4b033-467d-4ff9-a28e-d4aadb512f40",
        "38e4b033-467d-4ff9-a28e-d4aadb512f40",
        IdentifierKind::Uuid
    )]
    #[case("lekce-42", "42", IdentifierKind::Numeric)]
    #[case("k5b8x2p9m1", "k5b8x2p9m1", IdentifierKind::ShortCode)]
    #[case("", "", IdentifierKind::Opaque)]
    fn test_extraction_priority(
        #[case] segment: &str,
        #[case] expected: &str,
        #[case] kind: IdentifierKind,
    ) {
        let extracted = extract_identifier(segment);
        assert_eq!(extracted.value(), expected);
        assert_eq!(extracted.kind(), kind);
    }

    #[test]
    fn test_bare_uuid_not_truncated_to_short_code() {
        // The final hex group is 12 chars; the short-code rule must not grab
        // its last 10.
        let extracted = extract_identifier("38e4b033-467d-4ff9-a28e-d4aadb512f40");
        assert_eq!(extracted.kind(), IdentifierKind::Uuid);
        assert_eq!(extracted.value(), "38e4b033-467d-4ff9-a28e-d4aadb512f40");
    }

    #[test]
    fn test_uppercase_uuid_lowercased() {
        let extracted = extract_identifier("uvod-38E4B033-467D-4FF9-A28E-D4AADB512F40");
        assert_eq!(extracted.kind(), IdentifierKind::Uuid);
        assert_eq!(extracted.value(), "38e4b033-467d-4ff9-a28e-d4aadb512f40");
    }

    #[test]
    fn test_eleven_char_run_is_not_a_short_code() {
        let extracted = extract_identifier("uvod-k5b8x2p9m1x");
        assert_eq!(extracted.kind(), IdentifierKind::Opaque);
        assert_eq!(extracted.value(), "uvod-k5b8x2p9m1x");
    }

    #[test]
    fn test_ten_char_title_word_reads_as_short_code() {
        // Known ambiguity: routing resolves it by trying both id spaces.
        let extracted = extract_identifier("nase-matematika");
        assert_eq!(extracted.kind(), IdentifierKind::ShortCode);
        assert_eq!(extracted.value(), "matematika");
    }

    #[test]
    fn test_plain_slug_falls_through() {
        let extracted = extract_identifier("uvod-do-historie");
        assert_eq!(extracted.kind(), IdentifierKind::Opaque);
        assert_eq!(extracted.value(), "uvod-do-historie");
    }

    #[test]
    fn test_compose_prefers_short_code() {
        let keys = keys(
            "38e4b033-467d-4ff9-a28e-d4aadb512f40",
            Some("k5b8x2p9m1"),
        );
        assert_eq!(
            compose_path("lessons", "Úvod do historie", &keys),
            "/lessons/uvod-do-historie-k5b8x2p9m1"
        );
    }

    #[test]
    fn test_compose_without_short_code() {
        let keys = keys("38e4b033-467d-4ff9-a28e-d4aadb512f40", None);
        assert_eq!(
            compose_path("lessons", "Úvod", &keys),
            "/lessons/uvod-38e4b033-467d-4ff9-a28e-d4aadb512f40"
        );
    }

    #[test]
    fn test_compose_degenerate_title() {
        let keys = keys(
            "38e4b033-467d-4ff9-a28e-d4aadb512f40",
            Some("k5b8x2p9m1"),
        );
        assert_eq!(compose_path("lessons", "!!!", &keys), "/lessons/-k5b8x2p9m1");
    }

    fn segment_of(path: &str) -> &str {
        path.rsplit('/').next().unwrap()
    }

    proptest! {
        /// Round-trip law: extraction from a freshly composed URL always
        /// recovers the routing key that built it.
        #[test]
        fn prop_roundtrip(title in any::<String>(), with_code in any::<bool>()) {
            let mut keys = ResourceKeys::new(ResourceId::new());
            if with_code {
                keys = keys.with_short_code(ShortCode::generate());
            }
            let path = compose_path("lessons", &title, &keys);
            let extracted = extract_identifier(segment_of(&path));
            prop_assert_eq!(extracted.value(), keys.routing_key());
        }
    }
}
