//! featuredict-rs
//!
//! Workspace crate re-exporting [`featuredict_core`] for the demos.
//!
//! ```rust,no_run
//! use featuredict_rs::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let dictionary = Dictionary::from_dirs("data/presets", None, DictionaryConfig::default())?;
//! let found = dictionary.by_term("bakery").for_locale("en").find()?;
//! # Ok(())
//! # }
//! ```

pub use featuredict_core::*;

/// The types needed for everyday queries.
pub mod prelude {
    pub use featuredict_core::{
        tags, Dictionary, DictionaryConfig, DictionaryError, Feature, FeatureMatch, GeometryType, IdBrandCatalog,
        IdLocalizedCatalog, LocalizedCatalog, MemoryAccess, PerCountryCatalog, Result, Tags,
    };
}
