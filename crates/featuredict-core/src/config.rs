// crates/featuredict-core/src/config.rs

//! Dictionary configuration.
//!
//! Holds the defaults a query falls back to when it does not set an option
//! itself, plus the recursion bounds of the tree indexes.

use crate::error::Result;
use crate::tree::TreeParams;
use serde::{Deserialize, Serialize};

/// Settings of a [`crate::Dictionary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Locales used by queries that do not set any, most preferred first.
    /// `None` accepts unlocalized entries.
    pub default_locales: Vec<Option<String>>,

    /// Result limit of term queries that do not set one. `0` is unlimited.
    pub default_term_limit: usize,

    pub tag_tree: TreeParams,

    pub term_tree: TreeParams,

    /// Build the indexes for `default_locales` when the dictionary is created
    /// instead of on first query.
    pub warm_up: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            default_locales: vec![None],
            default_term_limit: 50,
            tag_tree: TreeParams::TAGS,
            term_tree: TreeParams::TERMS,
            warm_up: false,
        }
    }
}

impl DictionaryConfig {
    /// Set the default locales from language tags, e.g. `["de-AT", "de"]`.
    pub fn with_default_locales<S: Into<String>>(mut self, locales: impl IntoIterator<Item = Option<S>>) -> Self {
        self.default_locales = locales.into_iter().map(|l| l.map(Into::into)).collect();
        self
    }

    pub fn with_default_term_limit(mut self, limit: usize) -> Self {
        self.default_term_limit = limit;
        self
    }

    pub fn with_tag_tree(mut self, params: TreeParams) -> Self {
        self.tag_tree = params;
        self
    }

    pub fn with_term_tree(mut self, params: TreeParams) -> Self {
        self.term_tree = params;
        self
    }

    pub fn with_warm_up(mut self, warm_up: bool) -> Self {
        self.warm_up = warm_up;
        self
    }

    /// Check the tree parameters; an empty locale list is replaced by `[None]`.
    pub fn validate(mut self) -> Result<Self> {
        self.tag_tree = self.tag_tree.validated()?;
        self.term_tree = self.term_tree.validated()?;
        if self.default_locales.is_empty() {
            self.default_locales.push(None);
        }
        Ok(self)
    }

    /// Read a configuration from a JSON file. Missing fields take their defaults.
    #[cfg(feature = "json")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: DictionaryConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DictionaryConfig = serde_json::from_str(json)?;
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DictionaryError;

    #[test]
    fn defaults() {
        let config = DictionaryConfig::default();
        assert_eq!(config.default_locales, vec![None]);
        assert_eq!(config.default_term_limit, 50);
        assert_eq!(config.tag_tree, TreeParams::TAGS);
        assert_eq!(config.term_tree, TreeParams::TERMS);
        assert!(!config.warm_up);
    }

    #[cfg(feature = "json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let config = DictionaryConfig::from_json_str(r#"{"default_locales": ["de", null], "warm_up": true}"#).unwrap();
        assert_eq!(config.default_locales, vec![Some("de".to_string()), None]);
        assert!(config.warm_up);
        assert_eq!(config.default_term_limit, 50);
    }

    #[cfg(feature = "json")]
    #[test]
    fn zero_tree_params_rejected() {
        let err = DictionaryConfig::from_json_str(r#"{"term_tree": {"max_depth": 0, "min_bucket_size": 16}}"#).unwrap_err();
        assert!(matches!(err, DictionaryError::InvalidTreeParams { max_depth: 0, .. }));
    }

    #[test]
    fn empty_locales_mean_unlocalized() {
        let config = DictionaryConfig::default()
            .with_default_locales(Vec::<Option<String>>::new())
            .validate()
            .unwrap();
        assert_eq!(config.default_locales, vec![None]);
    }
}
