// crates/featuredict-core/src/catalog/mod.rs

//! # Catalogs
//!
//! Catalog implementations reading iD tagging schema files through a
//! [`crate::loader::ResourceAccess`]:
//! - [`IdLocalizedCatalog`]: `presets.json` plus per-language translations
//! - [`IdBrandCatalog`]: `presets.json` plus per-country `presets-XX.json`

use crate::config::DictionaryConfig;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::loader::FileSystemAccess;
use crate::model::Feature;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

mod brand;
mod localized;

pub use brand::IdBrandCatalog;
pub use localized::IdLocalizedCatalog;

/// Features by id, in insertion order. Inserting an id again replaces the
/// feature in place.
#[derive(Debug, Default, Clone)]
pub(crate) struct FeatureMap {
    features: Vec<Arc<Feature>>,
    positions: HashMap<String, usize>,
}

impl FeatureMap {
    pub(crate) fn insert(&mut self, feature: Arc<Feature>) {
        match self.positions.get(feature.id()) {
            Some(&i) => self.features[i] = feature,
            None => {
                self.positions.insert(feature.id().to_owned(), self.features.len());
                self.features.push(feature);
            }
        }
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Arc<Feature>> {
        self.positions.get(id).map(|&i| &self.features[i])
    }

    pub(crate) fn features(&self) -> &[Arc<Feature>] {
        &self.features
    }
}

impl FromIterator<Arc<Feature>> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = Arc<Feature>>>(iter: I) -> Self {
        let mut map = FeatureMap::default();
        for feature in iter {
            map.insert(feature);
        }
        map
    }
}

impl Dictionary {
    /// Create a dictionary over iD preset files in `presets_dir`, with brand
    /// presets from `brands_dir` if given.
    pub fn from_dirs(presets_dir: impl AsRef<Path>, brands_dir: Option<&Path>, config: DictionaryConfig) -> Result<Self> {
        let base = IdLocalizedCatalog::new(FileSystemAccess::new(presets_dir.as_ref())?)?;
        let brands = match brands_dir {
            Some(dir) => Some(Arc::new(IdBrandCatalog::new(FileSystemAccess::new(dir)?)?) as Arc<dyn crate::traits::PerCountryCatalog>),
            None => None,
        };
        Dictionary::new(Arc::new(base), brands, config)
    }
}
