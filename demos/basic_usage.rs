//! Basic usage example for featuredict-rs
//!
//! This example demonstrates how to:
//! - Build a dictionary over iD presets held in memory
//! - Find presets by tags
//! - Search presets by name and term, in several locales
//! - Look up a preset by id

use featuredict_rs::prelude::*;
use std::sync::Arc;

const PRESETS: &str = r#"{
    "shop/bakery": {"tags": {"shop": "bakery"}, "geometry": ["point", "area"], "name": "Bakery", "terms": ["bread", "pastry"]},
    "shop/butcher": {"tags": {"shop": "butcher"}, "geometry": ["point", "area"], "name": "Butcher", "terms": ["meat"]},
    "amenity/cafe": {"tags": {"amenity": "cafe"}, "geometry": ["point", "area"], "name": "Cafe", "terms": ["coffee", "tea"]},
    "amenity/cafe/coffee_shop": {"tags": {"amenity": "cafe", "cuisine": "coffee_shop"}, "geometry": ["point", "area"], "name": "Coffee Shop"},
    "amenity/bank": {"tags": {"amenity": "bank"}, "geometry": ["point", "area"], "name": "Bank", "terms": ["credit union"]},
    "amenity/bench": {"tags": {"amenity": "bench"}, "geometry": ["point", "line"], "name": "Bench", "aliases": ["Seat"]}
}"#;

const DE: &str = r#"{"de": {"presets": {"presets": {
    "shop/bakery": {"name": "Bäckerei", "terms": "Brot, Brötchen"},
    "shop/butcher": {"name": "Metzgerei", "aliases": "Fleischerei"},
    "amenity/bench": {"name": "Sitzbank", "terms": "Parkbank"}
}}}}"#;

fn main() -> Result<()> {
    println!("=== featuredict-rs Basic Usage Example ===\n");

    // Build the dictionary
    println!("Loading presets...");
    let access = MemoryAccess::new().with("presets.json", PRESETS).with("de.json", DE);
    let catalog = IdLocalizedCatalog::new(access)?;
    let dictionary = Dictionary::new(Arc::new(catalog), None, DictionaryConfig::default())?;
    println!("✓ Dictionary ready\n");

    // Example 1: Match by tags
    println!("--- Example 1: Which preset describes these tags? ---");
    let found = dictionary.by_tags([("shop", "bakery"), ("name", "Backstube")]).find()?;
    for feature in &found {
        println!("  {} ({})", feature.name(), feature.id());
    }
    println!();

    // Example 2: The most specific preset wins
    println!("--- Example 2: amenity=cafe + cuisine=coffee_shop ---");
    let found = dictionary
        .by_tags([("amenity", "cafe"), ("cuisine", "coffee_shop")])
        .find()?;
    for feature in &found {
        println!("  {} ({})", feature.name(), feature.id());
    }
    println!();

    // Example 3: Search by name, in German with English fallback
    println!("--- Example 3: Search 'Metz' in German ---");
    for feature in dictionary.by_term("Metz").for_locale("de").find()? {
        println!("  {} [{}]", feature.name(), feature.locale().unwrap_or("-"));
    }
    println!();

    // Example 4: Names, then terms
    println!("--- Example 4: Search 'bank' in German ---");
    for feature in dictionary.by_term("bank").for_locale("de").find()? {
        println!("  {} ({})", feature.name(), feature.id());
    }
    println!();

    // Example 5: Geometry filter
    println!("--- Example 5: Search 'b' for lines only ---");
    for feature in dictionary.by_term("b").for_geometry(GeometryType::Line).find()? {
        println!("  {} ({})", feature.name(), feature.id());
    }
    println!();

    // Example 6: Lookup by id
    println!("--- Example 6: Lookup by id ---");
    match dictionary.by_id("amenity/cafe/coffee_shop").find_match()? {
        Some(m) => {
            println!("  Name: {}", m.name);
            println!("  Category: {:?}", m.parent_name);
            println!("  Tags: {:?}", m.tags);
        }
        None => println!("  not found"),
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
