// crates/featuredict-core/src/catalog/brand.rs
use super::FeatureMap;
use crate::cache::MemoCache;
use crate::error::Result;
use crate::loader::presets::parse_presets;
use crate::loader::ResourceAccess;
use crate::model::Feature;
use crate::traits::PerCountryCatalog;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Brand catalog over iD presets, split by country.
///
/// `presets.json` holds the brands not specific to a country; files like
/// `presets-DE.json` or `presets-US-NY.json` are read on first use of that
/// country. Missing files are treated as empty.
pub struct IdBrandCatalog<A> {
    access: A,
    per_country: MemoCache<Option<String>, FeatureMap>,
}

impl<A: ResourceAccess> IdBrandCatalog<A> {
    /// Create the catalog, reading the global presets right away.
    pub fn new(access: A) -> Result<Self> {
        let catalog = IdBrandCatalog {
            access,
            per_country: MemoCache::new(),
        };
        catalog.features_for(None)?;
        Ok(catalog)
    }

    fn features_for(&self, country: Option<&str>) -> Result<Arc<FeatureMap>> {
        let key = country.map(str::to_owned);
        self.per_country.get_or_try_build(&key, || {
            let file = match country {
                Some(code) => format!("presets-{code}.json"),
                None => "presets.json".to_owned(),
            };
            if !self.access.exists(&file) {
                return Ok(FeatureMap::default());
            }
            let features: FeatureMap = parse_presets(self.access.open(&file)?, true)?
                .into_iter()
                .map(Arc::new)
                .collect();
            debug!(%file, features = features.features().len(), "loaded brand presets");
            Ok(features)
        })
    }
}

impl<A: ResourceAccess> PerCountryCatalog for IdBrandCatalog<A> {
    /// Brands of every code in the chain; later codes replace earlier ones
    /// with the same id.
    fn get_all(&self, country_codes: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        let mut merged = FeatureMap::default();
        for code in country_codes {
            for feature in self.features_for(code.as_deref())?.features() {
                merged.insert(Arc::clone(feature));
            }
        }
        Ok(merged.features().to_vec())
    }

    fn get(&self, id: &str, country_codes: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        for code in country_codes {
            if let Some(feature) = self.features_for(code.as_deref())?.get(id) {
                return Ok(Some(Arc::clone(feature)));
            }
        }
        Ok(None)
    }
}

impl<A> fmt::Debug for IdBrandCatalog<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdBrandCatalog")
            .field("loaded_countries", &self.per_country.len())
            .finish()
    }
}
