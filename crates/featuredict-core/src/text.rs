// crates/featuredict-core/src/text.rs

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Convert a string into its canonical form used for matching.
///
/// The string is decomposed (NFD), combining marks are dropped and the rest
/// is lowercased. Only diacritics are removed: other scripts are kept as they
/// are, so `Банк` and `Bank` stay different and `ß` is not expanded.
///
/// # Examples
///
/// ```rust
/// use featuredict_core::text::canonicalize;
///
/// assert_eq!(canonicalize("Bäckerei"), "backerei");
/// assert_eq!(canonicalize("BRÓT"), "brot");
/// assert_eq!(canonicalize("Банк"), "банк");
/// ```
pub fn canonicalize(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
}

/// Words of an already canonical name, for word-boundary search.
///
/// Parentheses are dropped and the rest is split on whitespace, so
/// `"off licence (alcohol shop)"` yields `off`, `licence`, `alcohol`, `shop`.
pub fn words(canonical: &str) -> impl Iterator<Item = &str> {
    canonical
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .filter(|w| !w.is_empty())
}
