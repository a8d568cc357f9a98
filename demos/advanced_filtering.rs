//! Advanced filtering example for featuredict-rs
//!
//! This example demonstrates brand presets restricted to countries, brand
//! filters and result limits.

use featuredict_rs::prelude::*;
use std::sync::Arc;

const PRESETS: &str = r#"{
    "shop/bakery": {"tags": {"shop": "bakery"}, "geometry": ["point", "area"], "name": "Bakery"},
    "amenity/fast_food": {"tags": {"amenity": "fast_food"}, "geometry": ["point", "area"], "name": "Fast Food"},
    "amenity/fast_food/burger": {"tags": {"amenity": "fast_food", "cuisine": "burger"}, "geometry": ["point", "area"], "name": "Burger Joint"}
}"#;

const BRANDS: &str = r#"{
    "amenity/fast_food/burger/Burger Planet": {
        "tags": {"amenity": "fast_food", "cuisine": "burger", "brand": "Burger Planet"},
        "geometry": ["point", "area"],
        "name": "Burger Planet",
        "addTags": {"amenity": "fast_food", "cuisine": "burger", "brand": "Burger Planet", "name": "Burger Planet"}
    }
}"#;

const BRANDS_DE: &str = r#"{
    "shop/bakery/Ditsch": {
        "tags": {"shop": "bakery", "brand": "Ditsch"},
        "geometry": ["point", "area"],
        "name": "Ditsch",
        "locationSet": {"include": ["de", "at"], "exclude": ["at-9"]}
    }
}"#;

fn main() -> Result<()> {
    println!("=== featuredict-rs Advanced Filtering Example ===\n");

    let base = IdLocalizedCatalog::new(MemoryAccess::new().with("presets.json", PRESETS))?;
    let brands = IdBrandCatalog::new(
        MemoryAccess::new()
            .with("presets.json", BRANDS)
            .with("presets-DE.json", BRANDS_DE)
            .with("presets-AT.json", BRANDS_DE),
    )?;
    let dictionary = Dictionary::new(Arc::new(base), Some(Arc::new(brands)), DictionaryConfig::default())?;

    // Example 1: Country specific brands
    println!("--- Example 1: 'Ditsch' by country ---");
    for country in ["", "DE", "DE-BY", "AT", "AT-9", "FR"] {
        let query = dictionary.by_term("Ditsch");
        let query = if country.is_empty() { query } else { query.in_country(country) };
        let names: Vec<String> = query.find()?.iter().map(|f| f.name().to_owned()).collect();
        println!("  {:<6} {:?}", if country.is_empty() { "(none)" } else { country }, names);
    }
    println!();

    // Example 2: Brands replace their category
    println!("--- Example 2: Tags of a branded burger place ---");
    let tags = [("amenity", "fast_food"), ("cuisine", "burger"), ("brand", "Burger Planet")];
    for (label, is_brand) in [("any", None), ("brands only", Some(true)), ("no brands", Some(false))] {
        let found = dictionary.by_tags(tags).is_brand(is_brand).find()?;
        let ids: Vec<&str> = found.iter().map(|f| f.id()).collect();
        println!("  {label:<12} {ids:?}");
    }
    println!();

    // Example 3: Matches with the tags to apply
    println!("--- Example 3: Tags to apply for 'Burger P' ---");
    for m in dictionary.by_term("Burger P").find_matches()? {
        println!("  {} in {:?}", m.name, m.parent_name);
        for (key, value) in &m.tags {
            println!("    {key}={value}");
        }
    }
    println!();

    // Example 4: Limits
    println!("--- Example 4: Search 'bu' with limits ---");
    for limit in [1, 2, 0] {
        let found = dictionary.by_term("bu").limit(limit).find()?;
        let names: Vec<&str> = found.iter().map(|f| f.name()).collect();
        println!("  limit {limit}: {names:?}");
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
