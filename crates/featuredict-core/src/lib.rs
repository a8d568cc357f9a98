// crates/featuredict-core/src/lib.rs

//! Tag-and-term dictionary over OpenStreetMap presets.
//!
//! Given a catalog of features (presets), a [`Dictionary`] answers "which
//! features describe these tags?" and "which features are called like this
//! search term?", ranked and filtered by locale, country and geometry.
//!
//! ```rust,no_run
//! use featuredict_core::{Dictionary, DictionaryConfig};
//! use std::path::Path;
//!
//! # fn main() -> featuredict_core::Result<()> {
//! let dictionary = Dictionary::from_dirs("data/presets", Some(Path::new("data/brands")), DictionaryConfig::default())?;
//!
//! let bakery = dictionary.by_tags([("shop", "bakery")]).for_locale("de").find()?;
//! let by_name = dictionary.by_term("Bäck").in_country("DE").limit(5).find()?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
#[cfg(feature = "json")]
pub mod catalog;
pub mod config;
pub mod country;
pub mod dictionary;
pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod query;
pub mod search;
pub mod text;
pub mod traits;
pub mod tree;

// Re-exports
pub use crate::cache::MemoCache;
#[cfg(feature = "json")]
pub use crate::catalog::{IdBrandCatalog, IdLocalizedCatalog};
pub use crate::config::DictionaryConfig;
pub use crate::country::CountryCode;
pub use crate::dictionary::{Dictionary, DictionaryStats};
pub use crate::error::{DictionaryError, Result};
pub use crate::index::{TagIndex, TermIndex};
pub use crate::loader::{FileSystemAccess, MemoryAccess, ResourceAccess};
pub use crate::model::{tags, Feature, FeatureBuilder, FeatureMatch, GeometryType, Tags};
pub use crate::query::{IdQuery, TagQuery, TermQuery};
pub use crate::text::canonicalize;
pub use crate::traits::{LocalizedCatalog, PerCountryCatalog};
pub use crate::tree::{ContainmentTree, PrefixTree, TreeParams};
