//! Error handling example for featuredict-rs
//!
//! This example demonstrates which operations fail and which simply find
//! nothing.

use featuredict_rs::prelude::*;
use featuredict_rs::TreeParams;
use std::sync::Arc;

/// A catalog whose backend is unreachable.
struct OfflineCatalog;

impl LocalizedCatalog for OfflineCatalog {
    fn get_all(&self, _locales: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        Err(DictionaryError::catalog(std::io::Error::other("preset server unreachable")))
    }

    fn get(&self, _id: &str, _locales: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        Ok(None)
    }
}

fn main() -> Result<()> {
    println!("=== featuredict-rs Error Handling Example ===\n");

    // Example 1: Missing presets directory
    println!("--- Example 1: Loading presets from a missing directory ---");
    match Dictionary::from_dirs("/nonexistent/presets", None, DictionaryConfig::default()) {
        Ok(_) => println!("✓ Dictionary loaded"),
        Err(e) => println!("✗ Failed to load: {e}"),
    }
    println!();

    // Example 2: Malformed preset files
    println!("--- Example 2: Malformed preset files ---");
    let broken = [
        ("not JSON", "{"),
        ("tags not an object", r#"{"a/b": {"tags": ["a", "b"]}}"#),
    ];
    for (label, json) in broken {
        match IdLocalizedCatalog::new(MemoryAccess::new().with("presets.json", json)) {
            Ok(_) => println!("  {label}: loaded"),
            Err(e) => println!("  {label}: {e}"),
        }
    }
    println!();

    // Example 3: Invalid configuration
    println!("--- Example 3: Invalid tree parameters ---");
    match TreeParams::new(0, 4) {
        Ok(params) => println!("  accepted {params:?}"),
        Err(e) => println!("  {e}"),
    }
    match DictionaryConfig::from_json_str(r#"{"term_tree": {"max_depth": 16, "min_bucket_size": 0}}"#) {
        Ok(config) => println!("  accepted {config:?}"),
        Err(e) => println!("  {e}"),
    }
    println!();

    // Example 4: No match is not an error
    println!("--- Example 4: Queries without results ---");
    let catalog = IdLocalizedCatalog::new(
        MemoryAccess::new().with("presets.json", r#"{"shop/bakery": {"tags": {"shop": "bakery"}, "name": "Bakery"}}"#),
    )?;
    let dictionary = Dictionary::with_base(Arc::new(catalog))?;
    println!("  by_term(\"xyz\"): {} results", dictionary.by_term("xyz").find()?.len());
    println!("  by_id(\"shop/xyz\"): {:?}", dictionary.by_id("shop/xyz").get()?);
    // malformed country codes are ignored
    let found = dictionary.by_tags([("shop", "bakery")]).in_country("Germany").find()?;
    println!("  in_country(\"Germany\"): {} results", found.len());
    println!();

    // Example 5: Catalog failures surface on the query that needs the index
    println!("--- Example 5: Failing catalog ---");
    let dictionary = Dictionary::with_base(Arc::new(OfflineCatalog))?;
    for attempt in 1..=2 {
        match dictionary.by_term("bakery").find() {
            Ok(found) => println!("  attempt {attempt}: {} results", found.len()),
            Err(e) => println!("  attempt {attempt}: {e}"),
        }
    }

    Ok(())
}
