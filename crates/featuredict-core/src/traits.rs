// crates/featuredict-core/src/traits.rs

//! Catalog contracts consumed by the [`crate::Dictionary`].
//!
//! Implementations resolve localization and per-country layering before
//! features reach the query engine: every call returns at most one feature
//! per id.

use crate::error::Result;
use crate::model::Feature;
use std::sync::Arc;

/// Generic (non-brand) features, resolved for an ordered locale list.
///
/// `locales` is most preferred first; `None` stands for unlocalized
/// entries. A feature only visible under a locale not in the list is not
/// returned.
pub trait LocalizedCatalog: Send + Sync {
    fn get_all(&self, locales: &[Option<String>]) -> Result<Vec<Arc<Feature>>>;

    fn get(&self, id: &str, locales: &[Option<String>]) -> Result<Option<Arc<Feature>>>;
}

/// Brand features, resolved for a country code fallback chain such as
/// `[None, Some("US"), Some("US-NY")]` (see [`crate::country::fallback_chain`]).
pub trait PerCountryCatalog: Send + Sync {
    fn get_all(&self, country_codes: &[Option<String>]) -> Result<Vec<Arc<Feature>>>;

    fn get(&self, id: &str, country_codes: &[Option<String>]) -> Result<Option<Arc<Feature>>>;
}

impl<T: LocalizedCatalog + ?Sized> LocalizedCatalog for Arc<T> {
    fn get_all(&self, locales: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        (**self).get_all(locales)
    }

    fn get(&self, id: &str, locales: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        (**self).get(id, locales)
    }
}

impl<T: PerCountryCatalog + ?Sized> PerCountryCatalog for Arc<T> {
    fn get_all(&self, country_codes: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        (**self).get_all(country_codes)
    }

    fn get(&self, id: &str, country_codes: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        (**self).get(id, country_codes)
    }
}
