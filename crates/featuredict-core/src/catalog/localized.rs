// crates/featuredict-core/src/catalog/localized.rs
use super::FeatureMap;
use crate::cache::MemoCache;
use crate::error::Result;
use crate::loader::presets::parse_presets;
use crate::loader::translations::{parse_translations, PresetTranslation};
use crate::loader::ResourceAccess;
use crate::model::Feature;
use crate::traits::LocalizedCatalog;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

const PRESETS_FILE: &str = "presets.json";

/// Localized catalog over iD presets.
///
/// Expects a `presets.json` with all presets and translation files named
/// after their language tag (`de.json`, `pt-BR.json`) next to it.
/// Translation files are read on first use.
pub struct IdLocalizedCatalog<A> {
    access: A,
    base: FeatureMap,
    translations: MemoCache<String, Vec<PresetTranslation>>,
    resolved: MemoCache<Vec<Option<String>>, FeatureMap>,
}

impl<A: ResourceAccess> IdLocalizedCatalog<A> {
    /// Read `presets.json` from `access`.
    pub fn new(access: A) -> Result<Self> {
        let base: FeatureMap = parse_presets(access.open(PRESETS_FILE)?, false)?
            .into_iter()
            .map(Arc::new)
            .collect();
        debug!(features = base.features().len(), "loaded base presets");
        Ok(IdLocalizedCatalog {
            access,
            base,
            translations: MemoCache::new(),
            resolved: MemoCache::new(),
        })
    }

    /// The unlocalized features.
    pub fn base_features(&self) -> &[Arc<Feature>] {
        self.base.features()
    }

    fn resolve(&self, locales: &[Option<String>]) -> Result<Arc<FeatureMap>> {
        self.resolved.get_or_try_build(&locales.to_vec(), || {
            let mut result = FeatureMap::default();
            // least preferred first, so more preferred locales overwrite
            for locale in locales.iter().rev() {
                match locale {
                    None => {
                        for feature in self.base.features() {
                            result.insert(Arc::clone(feature));
                        }
                    }
                    Some(tag) => {
                        for component in language_components(tag) {
                            self.apply_translations(&mut result, &component)?;
                        }
                    }
                }
            }
            debug!(?locales, features = result.features().len(), "resolved locales");
            Ok(result)
        })
    }

    fn apply_translations(&self, result: &mut FeatureMap, language: &str) -> Result<()> {
        let translations = self.translations(language)?;
        for t in translations.iter() {
            let Some(base) = self.base.get(&t.id) else {
                continue;
            };
            // empty names or terms fall back to what was resolved so far
            let previous = result.get(&t.id).unwrap_or(base);
            let localized = previous.localized(Some(language.to_owned()), t.names.clone(), t.terms.clone());
            result.insert(Arc::new(localized));
        }
        Ok(())
    }

    fn translations(&self, language: &str) -> Result<Arc<Vec<PresetTranslation>>> {
        self.translations.get_or_try_build(&language.to_owned(), || {
            let file = format!("{language}.json");
            if !self.access.exists(&file) {
                debug!(%file, "no translation file");
                return Ok(Vec::new());
            }
            let translations = parse_translations(self.access.open(&file)?, self.base.features())?;
            debug!(%file, translations = translations.len(), "loaded translations");
            Ok(translations)
        })
    }
}

impl<A: ResourceAccess> LocalizedCatalog for IdLocalizedCatalog<A> {
    fn get_all(&self, locales: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        Ok(self.resolve(locales)?.features().to_vec())
    }

    fn get(&self, id: &str, locales: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        Ok(self.resolve(locales)?.get(id).cloned())
    }
}

impl<A> fmt::Debug for IdLocalizedCatalog<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdLocalizedCatalog")
            .field("features", &self.base.features().len())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}

/// Language tags to read for a locale, least specific first: `de-AT` gives
/// `de`, `de-AT`; `zh-Hans-CN` gives `zh`, `zh-Hans`, `zh-CN`, `zh-Hans-CN`.
fn language_components(tag: &str) -> Vec<String> {
    let mut parts = tag.split('-');
    let Some(language) = parts.next() else {
        return Vec::new();
    };
    let others: Vec<&str> = parts.collect();
    let mut components = vec![language.to_owned()];
    if others.is_empty() {
        return components;
    }
    components.extend(others.iter().map(|other| format!("{language}-{other}")));
    components.push(tag.to_owned());
    components
}
