// crates/featuredict-core/src/model.rs
use crate::text::canonicalize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Tag map of a feature or a query: key -> value.
pub type Tags = BTreeMap<String, String>;

/// Geometry an OSM element can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    /// a node that is not a member of any way
    Point,
    /// a node that is a member of one or more ways
    Vertex,
    /// a way that is not an area
    Line,
    /// a closed way or a multipolygon relation
    Area,
    Relation,
}

impl GeometryType {
    pub const ALL: [GeometryType; 5] = [
        GeometryType::Point,
        GeometryType::Vertex,
        GeometryType::Line,
        GeometryType::Area,
        GeometryType::Relation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Point => "point",
            GeometryType::Vertex => "vertex",
            GeometryType::Line => "line",
            GeometryType::Area => "area",
            GeometryType::Relation => "relation",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryType::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown geometry type '{s}'"))
    }
}

/// A catalog entry: a named, tagged thing with applicability constraints.
///
/// Features are immutable once built. The canonical (lower-cased,
/// diacritic-stripped) forms of names and terms are derived in [`FeatureBuilder::build`]
/// and [`Feature::localized`] and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    id: String,
    tags: Tags,
    geometry: Vec<GeometryType>,
    name: String,
    aliases: Vec<String>,
    terms: Vec<String>,
    include_country_codes: Vec<String>,
    exclude_country_codes: Vec<String>,
    searchable: bool,
    match_score: f32,
    is_brand: bool,
    add_tags: Tags,
    remove_tags: Tags,
    icon: Option<String>,
    image_url: Option<String>,
    locale: Option<String>,
    #[serde(skip)]
    canonical_names: Vec<String>,
    #[serde(skip)]
    canonical_terms: Vec<String>,
}

impl Feature {
    pub fn builder(id: impl Into<String>, tags: Tags) -> FeatureBuilder {
        FeatureBuilder::new(id, tags)
    }

    /// Hierarchical id such as `"shop/bakery/Ditsch"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn geometry(&self) -> &[GeometryType] {
        &self.geometry
    }

    /// Primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Primary name followed by the aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn include_country_codes(&self) -> &[String] {
        &self.include_country_codes
    }

    pub fn exclude_country_codes(&self) -> &[String] {
        &self.exclude_country_codes
    }

    /// `true` if neither an include nor an exclude list restricts this feature.
    pub fn is_unrestricted(&self) -> bool {
        self.include_country_codes.is_empty() && self.exclude_country_codes.is_empty()
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn match_score(&self) -> f32 {
        self.match_score
    }

    pub fn is_brand(&self) -> bool {
        self.is_brand
    }

    pub fn add_tags(&self) -> &Tags {
        &self.add_tags
    }

    pub fn remove_tags(&self) -> &Tags {
        &self.remove_tags
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Locale the name and terms are in, `None` if unlocalized.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Canonical forms of [`Feature::names`], same order.
    pub fn canonical_names(&self) -> &[String] {
        &self.canonical_names
    }

    pub fn canonical_terms(&self) -> &[String] {
        &self.canonical_terms
    }

    /// Id of the next more general category, e.g. `"shop/bakery"` for
    /// `"shop/bakery/Ditsch"`.
    pub fn parent_id(&self) -> Option<&str> {
        parent_id(&self.id)
    }

    /// All ancestor category ids, most specific first.
    pub fn ancestor_ids(&self) -> impl Iterator<Item = &str> {
        ancestor_ids(&self.id)
    }

    /// The same feature with names and terms in another locale.
    ///
    /// `names` is the primary name followed by aliases. Empty `names` or
    /// `terms` keep the current ones.
    pub fn localized(&self, locale: Option<String>, names: Vec<String>, terms: Vec<String>) -> Feature {
        let (name, aliases) = if names.is_empty() {
            (self.name.clone(), self.aliases.clone())
        } else {
            let mut names = names.into_iter();
            let name = names.next().unwrap_or_default();
            (name, names.collect())
        };
        let terms = if terms.is_empty() { self.terms.clone() } else { terms };
        let mut localized = Feature {
            name,
            aliases,
            terms,
            locale,
            canonical_names: Vec::new(),
            canonical_terms: Vec::new(),
            ..self.clone()
        };
        localized.canonicalize();
        localized
    }

    fn canonicalize(&mut self) {
        self.canonical_names = self.names().map(canonicalize).collect();
        self.canonical_terms = self.terms.iter().map(|t| canonicalize(t)).collect();
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Strip the last `/`-segment of an id.
pub fn parent_id(id: &str) -> Option<&str> {
    id.rfind('/').map(|i| &id[..i])
}

/// Every successively stripped prefix of an id, most specific first.
pub fn ancestor_ids(id: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(parent_id(id), |id| parent_id(id))
}

/// Builder for [`Feature`]; every optional attribute has the catalog default.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    feature: Feature,
}

impl FeatureBuilder {
    pub fn new(id: impl Into<String>, tags: Tags) -> Self {
        FeatureBuilder {
            feature: Feature {
                id: id.into(),
                tags,
                geometry: vec![GeometryType::Point],
                name: String::new(),
                aliases: Vec::new(),
                terms: Vec::new(),
                include_country_codes: Vec::new(),
                exclude_country_codes: Vec::new(),
                searchable: true,
                match_score: 1.0,
                is_brand: false,
                add_tags: Tags::new(),
                remove_tags: Tags::new(),
                icon: None,
                image_url: None,
                locale: None,
                canonical_names: Vec::new(),
                canonical_terms: Vec::new(),
            },
        }
    }

    pub fn geometry(mut self, geometry: impl IntoIterator<Item = GeometryType>) -> Self {
        self.feature.geometry = geometry.into_iter().collect();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.feature.name = name.into();
        self
    }

    pub fn aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.feature.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn terms<S: Into<String>>(mut self, terms: impl IntoIterator<Item = S>) -> Self {
        self.feature.terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn include_countries<S: Into<String>>(mut self, codes: impl IntoIterator<Item = S>) -> Self {
        self.feature.include_country_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_countries<S: Into<String>>(mut self, codes: impl IntoIterator<Item = S>) -> Self {
        self.feature.exclude_country_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.feature.searchable = searchable;
        self
    }

    pub fn match_score(mut self, score: f32) -> Self {
        self.feature.match_score = score;
        self
    }

    pub fn brand(mut self, is_brand: bool) -> Self {
        self.feature.is_brand = is_brand;
        self
    }

    pub fn add_tags(mut self, tags: Tags) -> Self {
        self.feature.add_tags = tags;
        self
    }

    pub fn remove_tags(mut self, tags: Tags) -> Self {
        self.feature.remove_tags = tags;
        self
    }

    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.feature.icon = icon;
        self
    }

    pub fn image_url(mut self, url: Option<String>) -> Self {
        self.feature.image_url = url;
        self
    }

    pub fn locale(mut self, locale: Option<String>) -> Self {
        self.feature.locale = locale;
        self
    }

    pub fn build(self) -> Feature {
        let mut feature = self.feature;
        feature.canonicalize();
        feature
    }
}

/// Build a [`Tags`] map from string pairs.
///
/// ```rust
/// use featuredict_core::model::tags;
///
/// let t = tags([("shop", "bakery")]);
/// assert_eq!(t.get("shop").map(String::as_str), Some("bakery"));
/// ```
pub fn tags<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Tags
where
    K: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Reduced projection of a matched feature for host applications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatch {
    pub id: String,
    pub name: String,
    /// The feature's tags overlaid with its `add_tags`.
    pub tags: Tags,
    /// Name of the nearest ancestor category found in the base catalog.
    pub parent_name: Option<String>,
    pub is_brand: bool,
}
