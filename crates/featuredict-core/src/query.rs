// crates/featuredict-core/src/query.rs

//! Query options and the builders returned by [`Dictionary::by_tags`],
//! [`Dictionary::by_term`] and [`Dictionary::by_id`].
//!
//! The option structs are plain values; the builders fill in the
//! dictionary's configured defaults and run the query.
//!
//! ```rust,no_run
//! # use featuredict_core::{Dictionary, GeometryType};
//! # fn run(dictionary: &Dictionary) -> featuredict_core::Result<()> {
//! let features = dictionary
//!     .by_term("bakery")
//!     .for_geometry(GeometryType::Point)
//!     .for_locales([Some("de"), None])
//!     .in_country("DE")
//!     .limit(10)
//!     .find()?;
//! # Ok(())
//! # }
//! ```

use crate::country::CountryCode;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::model::{Feature, FeatureMatch, GeometryType, Tags};
use std::sync::Arc;

/// Options of a match-by-tags query.
#[derive(Debug, Clone, PartialEq)]
pub struct TagQuery {
    pub geometry: Option<GeometryType>,
    /// Most preferred first; `None` accepts unlocalized entries.
    pub locales: Vec<Option<String>>,
    pub country: Option<CountryCode>,
    /// `Some(true)`: only brands; `Some(false)`: no brands; `None`: both.
    pub is_brand: Option<bool>,
}

impl Default for TagQuery {
    fn default() -> Self {
        TagQuery {
            geometry: None,
            locales: vec![None],
            country: None,
            is_brand: None,
        }
    }
}

/// Options of a match-by-term query.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    pub geometry: Option<GeometryType>,
    pub locales: Vec<Option<String>>,
    pub country: Option<CountryCode>,
    pub is_brand: Option<bool>,
    /// Maximum number of results, `0` for no limit.
    pub limit: usize,
    /// Also match tag values, after all other stages.
    pub include_tag_values: bool,
}

impl Default for TermQuery {
    fn default() -> Self {
        TermQuery {
            geometry: None,
            locales: vec![None],
            country: None,
            is_brand: None,
            limit: 0,
            include_tag_values: false,
        }
    }
}

/// Options of a lookup by id.
#[derive(Debug, Clone, PartialEq)]
pub struct IdQuery {
    pub locales: Vec<Option<String>>,
    pub country: Option<CountryCode>,
}

impl Default for IdQuery {
    fn default() -> Self {
        IdQuery {
            locales: vec![None],
            country: None,
        }
    }
}

fn to_locales<S: Into<String>>(locales: impl IntoIterator<Item = Option<S>>) -> Vec<Option<String>> {
    locales.into_iter().map(|l| l.map(Into::into)).collect()
}

impl Dictionary {
    /// Start a match-by-tags query.
    pub fn by_tags<K, V>(&self, tags: impl IntoIterator<Item = (K, V)>) -> TagQueryBuilder<'_>
    where
        K: Into<String>,
        V: Into<String>,
    {
        TagQueryBuilder {
            dictionary: self,
            tags: crate::model::tags(tags),
            query: TagQuery {
                locales: self.config().default_locales.clone(),
                ..TagQuery::default()
            },
        }
    }

    /// Start a match-by-term query, limited to the configured default limit.
    pub fn by_term(&self, term: impl Into<String>) -> TermQueryBuilder<'_> {
        TermQueryBuilder {
            dictionary: self,
            term: term.into(),
            query: TermQuery {
                locales: self.config().default_locales.clone(),
                limit: self.config().default_term_limit,
                ..TermQuery::default()
            },
        }
    }

    /// Start a lookup by id.
    pub fn by_id(&self, id: impl Into<String>) -> IdQueryBuilder<'_> {
        IdQueryBuilder {
            dictionary: self,
            id: id.into(),
            query: IdQuery {
                locales: self.config().default_locales.clone(),
                ..IdQuery::default()
            },
        }
    }

    fn resolve_all(&self, features: Vec<Arc<Feature>>, locales: &[Option<String>]) -> Result<Vec<FeatureMatch>> {
        features.iter().map(|f| self.resolve_match(f, locales)).collect()
    }
}

#[derive(Debug)]
pub struct TagQueryBuilder<'a> {
    dictionary: &'a Dictionary,
    tags: Tags,
    query: TagQuery,
}

impl TagQueryBuilder<'_> {
    pub fn for_geometry(mut self, geometry: GeometryType) -> Self {
        self.query.geometry = Some(geometry);
        self
    }

    /// Locales to localize the results in, most preferred first. `None`
    /// includes unlocalized results.
    pub fn for_locales<S: Into<String>>(mut self, locales: impl IntoIterator<Item = Option<S>>) -> Self {
        self.query.locales = to_locales(locales);
        self
    }

    /// Results in `locale`, falling back to unlocalized ones.
    pub fn for_locale(self, locale: impl Into<String>) -> Self {
        self.for_locales([Some(locale.into()), None])
    }

    /// ISO 3166-1 alpha-2 (`"US"`) or ISO 3166-2 (`"US-NY"`) code of where the
    /// element is. Malformed codes are ignored, which only keeps features
    /// that are not country specific.
    pub fn in_country(mut self, code: &str) -> Self {
        self.query.country = CountryCode::parse(code);
        self
    }

    pub fn is_brand(mut self, is_brand: Option<bool>) -> Self {
        self.query.is_brand = is_brand;
        self
    }

    pub fn query(&self) -> &TagQuery {
        &self.query
    }

    pub fn find(&self) -> Result<Vec<Arc<Feature>>> {
        self.dictionary.get_by_tags(&self.tags, &self.query)
    }

    pub fn find_matches(&self) -> Result<Vec<FeatureMatch>> {
        let found = self.find()?;
        self.dictionary.resolve_all(found, &self.query.locales)
    }
}

#[derive(Debug)]
pub struct TermQueryBuilder<'a> {
    dictionary: &'a Dictionary,
    term: String,
    query: TermQuery,
}

impl TermQueryBuilder<'_> {
    pub fn for_geometry(mut self, geometry: GeometryType) -> Self {
        self.query.geometry = Some(geometry);
        self
    }

    pub fn for_locales<S: Into<String>>(mut self, locales: impl IntoIterator<Item = Option<S>>) -> Self {
        self.query.locales = to_locales(locales);
        self
    }

    pub fn for_locale(self, locale: impl Into<String>) -> Self {
        self.for_locales([Some(locale.into()), None])
    }

    pub fn in_country(mut self, code: &str) -> Self {
        self.query.country = CountryCode::parse(code);
        self
    }

    pub fn is_brand(mut self, is_brand: Option<bool>) -> Self {
        self.query.is_brand = is_brand;
        self
    }

    /// At most `limit` results; `0` for all.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = limit;
        self
    }

    /// Also find features by their tag values, e.g. `"bakery"` for `shop=bakery`.
    pub fn with_tag_values(mut self, enabled: bool) -> Self {
        self.query.include_tag_values = enabled;
        self
    }

    pub fn query(&self) -> &TermQuery {
        &self.query
    }

    pub fn find(&self) -> Result<Vec<Arc<Feature>>> {
        self.dictionary.get_by_term(&self.term, &self.query)
    }

    pub fn find_matches(&self) -> Result<Vec<FeatureMatch>> {
        let found = self.find()?;
        self.dictionary.resolve_all(found, &self.query.locales)
    }
}

#[derive(Debug)]
pub struct IdQueryBuilder<'a> {
    dictionary: &'a Dictionary,
    id: String,
    query: IdQuery,
}

impl IdQueryBuilder<'_> {
    pub fn for_locales<S: Into<String>>(mut self, locales: impl IntoIterator<Item = Option<S>>) -> Self {
        self.query.locales = to_locales(locales);
        self
    }

    pub fn for_locale(self, locale: impl Into<String>) -> Self {
        self.for_locales([Some(locale.into()), None])
    }

    pub fn in_country(mut self, code: &str) -> Self {
        self.query.country = CountryCode::parse(code);
        self
    }

    pub fn get(&self) -> Result<Option<Arc<Feature>>> {
        self.dictionary.get_by_id(&self.id, &self.query)
    }

    pub fn find_match(&self) -> Result<Option<FeatureMatch>> {
        match self.get()? {
            Some(feature) => self.dictionary.resolve_match(&feature, &self.query.locales).map(Some),
            None => Ok(None),
        }
    }
}
