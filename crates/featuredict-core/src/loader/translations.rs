// crates/featuredict-core/src/loader/translations.rs

//! Parser for iD tagging schema translation files such as `de.json`.
//!
//! The files look like `{"de": {"presets": {"presets": {id: {...}}}}}`. Each
//! translated preset has a `name`, newline separated `aliases` and comma
//! separated `terms`.

use crate::error::Result;
use crate::model::Feature;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::sync::Arc;

/// Names and terms of one preset in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetTranslation {
    pub id: String,
    /// Primary name followed by the aliases; empty if untranslated.
    pub names: Vec<String>,
    pub terms: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTranslation {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    aliases: Option<String>,
    #[serde(default)]
    terms: Option<String>,
}

/// Parse a translation file for the given base features.
///
/// Translations for ids not among `base` are dropped. A base feature named
/// `{other/id}` is a placeholder and takes over the translation of
/// `other/id`.
pub fn parse_translations(reader: impl Read, base: &[Arc<Feature>]) -> Result<Vec<PresetTranslation>> {
    let json: Value = serde_json::from_reader(reader)?;
    Ok(convert(json, base))
}

pub fn parse_translations_str(json: &str, base: &[Arc<Feature>]) -> Result<Vec<PresetTranslation>> {
    let json: Value = serde_json::from_str(json)?;
    Ok(convert(json, base))
}

fn convert(json: Value, base: &[Arc<Feature>]) -> Vec<PresetTranslation> {
    let presets = json
        .as_object()
        .and_then(|languages| languages.values().next())
        .and_then(|language| language.get("presets"))
        .and_then(|presets| presets.get("presets"))
        .and_then(Value::as_object);
    let Some(presets) = presets else {
        return Vec::new();
    };

    let base_ids: HashSet<&str> = base.iter().map(|f| f.id()).collect();

    let mut translations: BTreeMap<String, PresetTranslation> = BTreeMap::new();
    for (id, value) in presets {
        if !base_ids.contains(id.as_str()) {
            continue;
        }
        let raw = RawTranslation::deserialize(value).unwrap_or_default();
        translations.insert(id.clone(), translation(id.clone(), raw));
    }

    for feature in base {
        let Some(target) = placeholder_target(feature.name()) else {
            continue;
        };
        if let Some(source) = translations.get(target) {
            let inherited = PresetTranslation {
                id: feature.id().to_owned(),
                ..source.clone()
            };
            translations.insert(inherited.id.clone(), inherited);
        }
    }

    translations.into_values().collect()
}

fn translation(id: String, raw: RawTranslation) -> PresetTranslation {
    let name = raw.name.unwrap_or_default();
    let aliases = raw.aliases.unwrap_or_default();
    let names = std::iter::once(name.as_str())
        .chain(aliases.lines())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    let terms = raw
        .terms
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    PresetTranslation { id, names, terms }
}

/// `other/id` for a name `{other/id}`.
fn placeholder_target(name: &str) -> Option<&str> {
    name.strip_prefix('{')?.strip_suffix('}')
}
