// crates/featuredict-core/src/loader/presets.rs

//! Parser for iD tagging schema `presets.json` files, an object of
//! preset id -> preset.
//!
//! Presets that cannot be represented are skipped with a warning: presets
//! without tags or with `*` in their tags (they describe a category of
//! things, not a concrete thing), presets with a geometry type this crate
//! does not know, and presets with a `locationSet` that is not a plain list
//! of country codes.

use crate::country::is_valid_country_code;
use crate::error::Result;
use crate::model::{Feature, GeometryType, Tags};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::{debug, warn};

/// One preset as it appears in the file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPreset {
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    geometry: Vec<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    terms: Vec<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default, rename = "imageURL")]
    image_url: Option<String>,
    #[serde(default)]
    location_set: Option<RawLocationSet>,
    #[serde(default)]
    searchable: Option<bool>,
    #[serde(default)]
    match_score: Option<f32>,
    #[serde(default)]
    add_tags: Option<Tags>,
    #[serde(default)]
    remove_tags: Option<Tags>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLocationSet {
    #[serde(default)]
    include: Vec<Value>,
    #[serde(default)]
    exclude: Vec<Value>,
}

/// Parse a presets file. `is_brand` marks every parsed feature as a brand.
pub fn parse_presets(reader: impl Read, is_brand: bool) -> Result<Vec<Feature>> {
    let raw: BTreeMap<String, RawPreset> = serde_json::from_reader(reader)?;
    convert(raw, is_brand)
}

pub fn parse_presets_str(json: &str, is_brand: bool) -> Result<Vec<Feature>> {
    let raw: BTreeMap<String, RawPreset> = serde_json::from_str(json)?;
    convert(raw, is_brand)
}

fn convert(raw: BTreeMap<String, RawPreset>, is_brand: bool) -> Result<Vec<Feature>> {
    let total = raw.len();
    let mut features = Vec::with_capacity(total);
    for (id, preset) in raw {
        if let Some(feature) = convert_preset(id, preset, is_brand)? {
            features.push(feature);
        }
    }
    debug!(total, parsed = features.len(), is_brand, "parsed presets");
    Ok(features)
}

fn convert_preset(id: String, p: RawPreset, is_brand: bool) -> Result<Option<Feature>> {
    if p.tags.is_empty() {
        debug!(%id, "skipping preset without tags");
        return Ok(None);
    }
    if p.tags.iter().any(|(k, v)| k.contains('*') || v.contains('*')) {
        debug!(%id, "skipping wildcard preset");
        return Ok(None);
    }

    let geometry: std::result::Result<Vec<GeometryType>, String> = p.geometry.iter().map(|g| g.parse()).collect();
    let geometry = match geometry {
        Ok(geometry) => geometry,
        Err(reason) => {
            warn!(%id, %reason, "skipping preset with unsupported geometry");
            return Ok(None);
        }
    };

    let location_set = p.location_set.unwrap_or_default();
    let Some(include) = parse_country_codes(&location_set.include) else {
        warn!(%id, "skipping preset with unsupported locationSet include");
        return Ok(None);
    };
    let Some(exclude) = parse_country_codes(&location_set.exclude) else {
        warn!(%id, "skipping preset with unsupported locationSet exclude");
        return Ok(None);
    };

    let add_tags = p.add_tags.unwrap_or_else(|| p.tags.clone());
    let remove_tags = p.remove_tags.unwrap_or_else(|| add_tags.clone());

    let feature = Feature::builder(id, p.tags)
        .geometry(geometry)
        .name(p.name.unwrap_or_default())
        .aliases(p.aliases)
        .terms(p.terms)
        .include_countries(include)
        .exclude_countries(exclude)
        .searchable(p.searchable.unwrap_or(true))
        .match_score(p.match_score.unwrap_or(1.0))
        .brand(is_brand)
        .add_tags(add_tags)
        .remove_tags(remove_tags)
        .icon(p.icon)
        .image_url(p.image_url)
        .build();
    Ok(Some(feature))
}

/// Upper-cased country codes, or `None` if any entry is not a country code.
///
/// `"001"` (the whole world) is dropped. Coordinates, other M49 regions and
/// geojson references are not supported.
fn parse_country_codes(values: &[Value]) -> Option<Vec<String>> {
    let mut codes = Vec::with_capacity(values.len());
    for value in values {
        let code = value.as_str()?.trim().to_ascii_uppercase();
        if code == "001" {
            continue;
        }
        if !is_valid_country_code(&code) {
            return None;
        }
        codes.push(code);
    }
    Some(codes)
}
