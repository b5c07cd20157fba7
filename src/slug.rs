//! Title-to-slug formatting.
//!
//! Slugs are display-only: recomputed from the current title on every render,
//! never stored, and never load-bearing for routing. The algorithm is fixed
//! because historical URLs embed its output ahead of the identifier suffix.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Converts a title into a lowercase ASCII slug.
///
/// Steps, in order: lowercase, NFD-decompose, strip combining marks, drop
/// every character that is not a word character (ASCII alphanumeric or `_`),
/// whitespace, or hyphen, trim surrounding whitespace, turn whitespace runs
/// into single hyphens, collapse hyphen runs.
///
/// Degenerate input produces degenerate output rather than an error: a title
/// with no word characters slugifies to the empty string.
///
/// ```
/// use lectio_slug::slugify;
///
/// assert_eq!(slugify("Úvod do historie"), "uvod-do-historie");
/// assert_eq!(slugify("!!!"), "");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| is_word_char(*c) || c.is_whitespace() || *c == '-')
        .collect();

    // Whitespace runs and hyphen runs both end up as a single hyphen, but
    // only whitespace is trimmed at the edges: a literal leading or trailing
    // hyphen in the title survives.
    let mut slug = String::with_capacity(kept.len());
    for c in kept.trim().chars() {
        let mapped = if c.is_whitespace() { '-' } else { c };
        if mapped == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(mapped);
    }
    slug
}

/// Word characters follow the historical `\w` contract: ASCII letters,
/// digits, and underscore. Anything else (including non-Latin letters that
/// survive mark stripping) is dropped so the output stays ASCII.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(slugify("historie"), "historie");
    }

    #[test]
    fn test_spaces_become_hyphens() {
        assert_eq!(slugify("Dějiny umění"), "dejiny-umeni");
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(slugify("Úvod do historie"), "uvod-do-historie");
    }

    #[test]
    fn test_symbols_removed() {
        assert_eq!(slugify("Matematika: zlomky & procenta!"), "matematika-zlomky-procenta");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("  Úvod   do\thistorie  "), "uvod-do-historie");
    }

    #[test]
    fn test_hyphen_runs_collapse() {
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn test_underscores_survive() {
        assert_eq!(slugify("lekce_01 test"), "lekce_01-test");
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_degenerate_title() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_non_latin_drops_to_empty() {
        assert_eq!(slugify("日本語"), "");
    }

    proptest! {
        #[test]
        fn prop_idempotent(title in any::<String>()) {
            let once = slugify(&title);
            prop_assert_eq!(slugify(&once), once);
        }

        #[test]
        fn prop_output_charset(title in any::<String>()) {
            let slug = slugify(&title);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }

        #[test]
        fn prop_no_hyphen_runs(title in any::<String>()) {
            prop_assert!(!slugify(&title).contains("--"));
        }
    }
}
