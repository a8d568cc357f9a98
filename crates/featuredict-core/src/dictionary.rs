// crates/featuredict-core/src/dictionary.rs
use crate::cache::MemoCache;
use crate::config::DictionaryConfig;
use crate::country::{fallback_chain, CountryCode};
use crate::error::Result;
use crate::index::{TagIndex, TermIndex};
use crate::model::Feature;
use crate::search::{brand_name_strings, name_strings, tag_value_strings, term_strings};
use crate::traits::{LocalizedCatalog, PerCountryCatalog};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Ordered locale list or country code chain an index was built for.
type IndexKey = Vec<Option<String>>;

/// Finds features by tags, by search term or by id.
///
/// Indexes are built lazily, once per locale list (base features) or per
/// country (brand features), and kept for the lifetime of the dictionary.
/// The dictionary is `Send + Sync`; queries may run concurrently.
///
/// Once an index is built it is never rebuilt, so catalog changes after that
/// point are not picked up. A build that failed is attempted again by the
/// next query needing it.
pub struct Dictionary {
    base: Arc<dyn LocalizedCatalog>,
    brands: Option<Arc<dyn PerCountryCatalog>>,
    config: DictionaryConfig,

    tag_indexes: MemoCache<IndexKey, TagIndex>,
    name_indexes: MemoCache<IndexKey, TermIndex>,
    term_indexes: MemoCache<IndexKey, TermIndex>,
    tag_value_indexes: MemoCache<IndexKey, TermIndex>,

    brand_tag_indexes: MemoCache<IndexKey, TagIndex>,
    brand_name_indexes: MemoCache<IndexKey, TermIndex>,
}

/// Counts of the features visible for one locale list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryStats {
    pub features: usize,
    pub distinct_tag_maps: usize,
    pub searchable_names: usize,
    pub searchable_terms: usize,
    /// Brand features visible without a country.
    pub brand_features: usize,
}

impl Dictionary {
    /// Create a dictionary over a base catalog and an optional brand catalog.
    ///
    /// Fails if `config` carries invalid tree parameters, or if warming up is
    /// enabled and the catalog cannot deliver its features.
    pub fn new(
        base: Arc<dyn LocalizedCatalog>,
        brands: Option<Arc<dyn PerCountryCatalog>>,
        config: DictionaryConfig,
    ) -> Result<Self> {
        let config = config.validate()?;
        let dictionary = Dictionary {
            base,
            brands,
            config,
            tag_indexes: MemoCache::new(),
            name_indexes: MemoCache::new(),
            term_indexes: MemoCache::new(),
            tag_value_indexes: MemoCache::new(),
            brand_tag_indexes: MemoCache::new(),
            brand_name_indexes: MemoCache::new(),
        };
        if dictionary.config.warm_up {
            dictionary.warm_up()?;
        }
        Ok(dictionary)
    }

    /// Dictionary without brand features and with the default configuration.
    pub fn with_base(base: Arc<dyn LocalizedCatalog>) -> Result<Self> {
        Self::new(base, None, DictionaryConfig::default())
    }

    pub fn config(&self) -> &DictionaryConfig {
        &self.config
    }

    pub(crate) fn base(&self) -> &dyn LocalizedCatalog {
        self.base.as_ref()
    }

    pub(crate) fn brands(&self) -> Option<&dyn PerCountryCatalog> {
        self.brands.as_deref()
    }

    /// Build the tag, name and term indexes for the default locales.
    pub fn warm_up(&self) -> Result<()> {
        let locales = &self.config.default_locales;
        debug!(?locales, "warming up");
        self.tag_index(locales)?;
        self.name_index(locales)?;
        self.term_index(locales)?;
        Ok(())
    }

    /// Counts for the given locales, building the needed indexes.
    pub fn stats(&self, locales: &[Option<String>]) -> Result<DictionaryStats> {
        let tags = self.tag_index(locales)?;
        let brand_features = match self.brands() {
            Some(brands) => brands.get_all(&fallback_chain(None))?.len(),
            None => 0,
        };
        Ok(DictionaryStats {
            features: tags.feature_count(),
            distinct_tag_maps: tags.distinct_tag_maps(),
            searchable_names: self.name_index(locales)?.len(),
            searchable_terms: self.term_index(locales)?.len(),
            brand_features,
        })
    }

    pub(crate) fn tag_index(&self, locales: &[Option<String>]) -> Result<Arc<TagIndex>> {
        self.tag_indexes.get_or_try_build(&locales.to_vec(), || {
            let features = self.base.get_all(locales)?;
            debug!(?locales, features = features.len(), "building tag index");
            TagIndex::new(features, self.config.tag_tree)
        })
    }

    pub(crate) fn name_index(&self, locales: &[Option<String>]) -> Result<Arc<TermIndex>> {
        self.build_term_index(&self.name_indexes, "name", locales, name_strings)
    }

    pub(crate) fn term_index(&self, locales: &[Option<String>]) -> Result<Arc<TermIndex>> {
        self.build_term_index(&self.term_indexes, "term", locales, term_strings)
    }

    pub(crate) fn tag_value_index(&self, locales: &[Option<String>]) -> Result<Arc<TermIndex>> {
        self.build_term_index(&self.tag_value_indexes, "tag value", locales, tag_value_strings)
    }

    fn build_term_index(
        &self,
        cache: &MemoCache<IndexKey, TermIndex>,
        kind: &'static str,
        locales: &[Option<String>],
        extract: fn(&Feature) -> Vec<String>,
    ) -> Result<Arc<TermIndex>> {
        cache.get_or_try_build(&locales.to_vec(), || {
            let features = self.base.get_all(locales)?;
            let index = TermIndex::new(features, self.config.term_tree, extract)?;
            debug!(kind, ?locales, strings = index.len(), "built term index");
            Ok(index)
        })
    }

    pub(crate) fn brand_tag_index(&self, country: Option<&CountryCode>) -> Result<Arc<TagIndex>> {
        let chain = fallback_chain(country);
        self.brand_tag_indexes.get_or_try_build(&chain, || {
            let features = self.brand_features(&chain)?;
            debug!(countries = ?chain, features = features.len(), "building brand tag index");
            TagIndex::new(features, self.config.tag_tree)
        })
    }

    pub(crate) fn brand_name_index(&self, country: Option<&CountryCode>) -> Result<Arc<TermIndex>> {
        let chain = fallback_chain(country);
        self.brand_name_indexes.get_or_try_build(&chain, || {
            let features = self.brand_features(&chain)?;
            let index = TermIndex::new(features, self.config.term_tree, brand_name_strings)?;
            debug!(countries = ?chain, strings = index.len(), "built brand name index");
            Ok(index)
        })
    }

    fn brand_features(&self, chain: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        match &self.brands {
            Some(brands) => brands.get_all(chain),
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("config", &self.config)
            .field("has_brands", &self.brands.is_some())
            .field("tag_indexes", &self.tag_indexes.len())
            .field("brand_tag_indexes", &self.brand_tag_indexes.len())
            .finish()
    }
}
