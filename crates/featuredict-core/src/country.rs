// crates/featuredict-core/src/country.rs

//! ISO 3166 country and subdivision codes.

use std::fmt;

/// A validated ISO 3166-1 alpha-2 (`"US"`) or ISO 3166-2 (`"US-NY"`) code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode {
    code: String,
}

impl CountryCode {
    /// Parse a country code, upper-casing it first.
    ///
    /// Anything not shaped like `XX` or `XX-YYY` (1 to 3 alphanumerics after the
    /// dash) yields `None`, which callers treat as "no country restriction".
    ///
    /// ```rust
    /// use featuredict_core::country::CountryCode;
    ///
    /// assert_eq!(CountryCode::parse("us-ny").unwrap().as_str(), "US-NY");
    /// assert!(CountryCode::parse("USA").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim().to_ascii_uppercase();
        is_valid_country_code(&code).then_some(CountryCode { code })
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// The ISO 3166-1 alpha-2 part, e.g. `"US"` for `"US-NY"`.
    pub fn alpha2(&self) -> &str {
        &self.code[..2]
    }

    /// The full subdivision code if this is one.
    pub fn subdivision(&self) -> Option<&str> {
        (self.code.len() > 2).then_some(self.code.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// `true` for `XX` and `XX-Y`, `XX-YY`, `XX-YYY` (upper-case letters / digits).
pub fn is_valid_country_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    let alpha2 = bytes.len() >= 2 && bytes[..2].iter().all(u8::is_ascii_uppercase);
    if !alpha2 {
        return false;
    }
    match bytes.len() {
        2 => true,
        4..=6 => {
            bytes[2] == b'-'
                && bytes[3..]
                    .iter()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        _ => false,
    }
}

/// The ordered lookup chain `[global, country, subdivision]`.
///
/// `None` stands for the unrestricted / global entries. This chain is the
/// cache key for brand indexes.
pub fn fallback_chain(code: Option<&CountryCode>) -> Vec<Option<String>> {
    let mut chain = vec![None];
    if let Some(code) = code {
        chain.push(Some(code.alpha2().to_owned()));
        if let Some(sub) = code.subdivision() {
            chain.push(Some(sub.to_owned()));
        }
    }
    chain
}

/// Whether `code` is listed in `codes`, either exactly or via its country part.
///
/// A listed `"US"` matches a queried `"US-NY"`; a listed `"US-NY"` does not
/// match a queried `"US"`.
pub fn is_in_country_codes(code: &CountryCode, codes: &[String]) -> bool {
    codes
        .iter()
        .any(|c| c == code.as_str() || c == code.alpha2())
}
