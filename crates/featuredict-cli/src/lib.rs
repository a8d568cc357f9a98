//! featuredict-cli
//! ===============
//!
//! Command-line interface for the `featuredict-core` preset dictionary.
//!
//! The binary (`featuredict`) reads an iD tagging schema `presets.json` plus
//! translation files from a directory and answers queries by tags, by search
//! term or by id. Brand presets are read from a second directory if given.
//!
//! ```text
//! featuredict --presets data/presets tags shop=bakery -l de
//! featuredict --presets data/presets --brands data/brands term "Ditsch" -c DE
//! featuredict --presets data/presets id amenity/bank --json
//! featuredict --presets data/presets stats -l de
//! ```
//!
//! The query logic lives here so it can be tested without spawning the binary.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod args;

use crate::args::{CliArgs, Commands, FilterArgs, SourceArgs};
use anyhow::{Context, Result};
use featuredict_core::{Dictionary, DictionaryConfig, FeatureMatch};
use std::io::Write;
use tracing::debug;

/// Run the parsed command, writing results to `out`.
pub fn run(args: CliArgs, out: &mut impl Write) -> Result<()> {
    let CliArgs {
        source,
        filter,
        json,
        command,
        ..
    } = args;

    match command {
        Commands::Tags { tags, brand } => {
            let dictionary = open_dictionary(&source)?;
            let mut query = dictionary.by_tags(tags).is_brand(brand);
            if let Some(locales) = locales(&filter) {
                query = query.for_locales(locales);
            }
            if let Some(country) = &filter.country {
                query = query.in_country(country);
            }
            if let Some(geometry) = filter.geometry {
                query = query.for_geometry(geometry);
            }
            print_matches(out, &query.find_matches()?, json)
        }

        Commands::Term {
            term,
            limit,
            brand,
            tag_values,
        } => {
            let dictionary = open_dictionary(&source)?;
            let mut query = dictionary.by_term(term).is_brand(brand).with_tag_values(tag_values);
            if let Some(limit) = limit {
                query = query.limit(limit);
            }
            if let Some(locales) = locales(&filter) {
                query = query.for_locales(locales);
            }
            if let Some(country) = &filter.country {
                query = query.in_country(country);
            }
            if let Some(geometry) = filter.geometry {
                query = query.for_geometry(geometry);
            }
            print_matches(out, &query.find_matches()?, json)
        }

        Commands::Id { id } => {
            let dictionary = open_dictionary(&source)?;
            let mut query = dictionary.by_id(&id);
            if let Some(locales) = locales(&filter) {
                query = query.for_locales(locales);
            }
            if let Some(country) = &filter.country {
                query = query.in_country(country);
            }
            match query.find_match()? {
                Some(found) => print_matches(out, &[found], json),
                None => anyhow::bail!("no preset with id '{id}'"),
            }
        }

        Commands::Stats => {
            let dictionary = open_dictionary(&source)?;
            let locales = locales(&filter).unwrap_or_else(|| dictionary.config().default_locales.clone());
            let stats = dictionary.stats(&locales)?;
            if json {
                writeln!(out, "{}", serde_json::to_string(&stats)?)?;
            } else {
                writeln!(out, "Dictionary statistics:")?;
                writeln!(out, "  Features: {}", stats.features)?;
                writeln!(out, "  Distinct tag sets: {}", stats.distinct_tag_maps)?;
                writeln!(out, "  Searchable names: {}", stats.searchable_names)?;
                writeln!(out, "  Searchable terms: {}", stats.searchable_terms)?;
                writeln!(out, "  Brands (not country specific): {}", stats.brand_features)?;
            }
            Ok(())
        }

        #[cfg(feature = "fetch")]
        Commands::Fetch { url } => {
            let locales: Vec<&str> = filter.locales.iter().map(String::as_str).collect();
            featuredict_core::loader::fetch::download_presets(&url, &source.presets, &locales)
                .with_context(|| format!("downloading presets into {}", source.presets.display()))?;
            writeln!(out, "Downloaded presets into {}", source.presets.display())?;
            Ok(())
        }
    }
}

fn open_dictionary(source: &SourceArgs) -> Result<Dictionary> {
    let config = match &source.config {
        Some(path) => DictionaryConfig::from_json_file(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => DictionaryConfig::default(),
    };
    debug!(presets = %source.presets.display(), brands = ?source.brands, "opening dictionary");
    Dictionary::from_dirs(&source.presets, source.brands.as_deref(), config)
        .with_context(|| format!("loading presets from {}", source.presets.display()))
}

/// Locales from the command line, `None` if none were given.
///
/// Unless `--no-fallback` is set, unlocalized presets are accepted last.
fn locales(filter: &FilterArgs) -> Option<Vec<Option<String>>> {
    if filter.locales.is_empty() {
        return None;
    }
    let mut locales: Vec<Option<String>> = filter.locales.iter().cloned().map(Some).collect();
    if !filter.no_fallback {
        locales.push(None);
    }
    Some(locales)
}

fn print_matches(out: &mut impl Write, matches: &[FeatureMatch], json: bool) -> Result<()> {
    if matches.is_empty() && !json {
        writeln!(out, "No presets found")?;
        return Ok(());
    }
    for m in matches {
        if json {
            writeln!(out, "{}", serde_json::to_string(m)?)?;
            continue;
        }
        let brand = if m.is_brand { " [brand]" } else { "" };
        match &m.parent_name {
            Some(parent) => writeln!(out, "{} ({}){} in {}", m.name, m.id, brand, parent)?,
            None => writeln!(out, "{} ({}){}", m.name, m.id, brand)?,
        }
        let tags: Vec<String> = m.tags.iter().map(|(k, v)| format!("{k}={v}")).collect();
        writeln!(out, "    {}", tags.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;

    const PRESETS: &str = r#"{
        "shop/bakery": {"tags": {"shop": "bakery"}, "geometry": ["point", "area"], "name": "Bakery", "terms": ["bread"]},
        "amenity/bank": {"tags": {"amenity": "bank"}, "geometry": ["point", "area"], "name": "Bank"}
    }"#;

    const DE: &str = r#"{"de": {"presets": {"presets": {"shop/bakery": {"name": "Bäckerei"}}}}}"#;

    struct Presets(PathBuf);

    impl Presets {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("featuredict-cli-{name}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("presets.json"), PRESETS).unwrap();
            fs::write(dir.join("de.json"), DE).unwrap();
            Presets(dir)
        }
    }

    impl Drop for Presets {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn run_args(presets: &Presets, args: &[&str]) -> Result<String> {
        let dir = presets.0.to_string_lossy().into_owned();
        let argv = ["featuredict", "--presets", dir.as_str()].into_iter().chain(args.iter().copied());
        let mut out = Vec::new();
        run(CliArgs::try_parse_from(argv)?, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn tags_query_prints_localized_match() {
        let presets = Presets::new("tags");
        let out = run_args(&presets, &["tags", "shop=bakery", "-l", "de"]).unwrap();
        assert!(out.starts_with("Bäckerei (shop/bakery)"), "{out}");
        assert!(out.contains("shop=bakery"), "{out}");
    }

    #[test]
    fn term_query_as_json() {
        let presets = Presets::new("term");
        let out = run_args(&presets, &["term", "bre", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["id"], "shop/bakery");
        assert_eq!(value["is_brand"], false);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let presets = Presets::new("id");
        assert!(run_args(&presets, &["id", "shop/unknown"]).is_err());
        let out = run_args(&presets, &["id", "amenity/bank"]).unwrap();
        assert!(out.starts_with("Bank (amenity/bank)"), "{out}");
    }

    #[test]
    fn stats_report_counts() {
        let presets = Presets::new("stats");
        let out = run_args(&presets, &["stats", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["features"], 2);
        assert_eq!(value["brand_features"], 0);
    }

    #[test]
    fn strict_locales_without_fallback() {
        let filter = FilterArgs {
            locales: vec!["de".into()],
            no_fallback: true,
            country: None,
            geometry: None,
        };
        assert_eq!(locales(&filter), Some(vec![Some("de".to_string())]));
    }

    #[test]
    fn missing_presets_directory_fails() {
        let args = CliArgs::try_parse_from(["featuredict", "--presets", "/nonexistent/featuredict", "stats"]).unwrap();
        assert!(run(args, &mut Vec::new()).is_err());
    }
}
