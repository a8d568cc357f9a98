// crates/featuredict-core/src/search.rs

//! Query operations of the [`Dictionary`]: match by tags, by term and by id.
//!
//! Matching is done by the indexes; this module filters the candidates by
//! geometry and country, removes less specific duplicates and ranks them.

use crate::country::{is_in_country_codes, CountryCode};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::model::{Feature, FeatureMatch, GeometryType, Tags};
use crate::query::{IdQuery, TagQuery, TermQuery};
use crate::text::{canonicalize, words};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

impl Dictionary {
    /// Features matching `tags`, most specific first.
    ///
    /// Of a chain of matching features where one is a category of the other,
    /// e.g. `amenity/fast_food` and `amenity/fast_food/McDonald's`, only the
    /// most specific one is returned. Several features are only returned for
    /// tags describing several unrelated things, like `shop=deli` +
    /// `amenity=cafe`.
    pub fn get_by_tags(&self, tags: &Tags, query: &TagQuery) -> Result<Vec<Arc<Feature>>> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        if query.is_brand != Some(true) {
            found.extend(self.tag_index(&query.locales)?.get_all(tags));
        }
        if query.is_brand != Some(false) {
            found.extend(self.brand_tag_index(query.country.as_ref())?.get_all(tags));
        }
        found.retain(|f| matches_parameters(f, query.geometry, query.country.as_ref()));

        if found.len() > 1 {
            prune_ancestors(&mut found);
        }

        let unrestricted_first = matches!(query.locales.as_slice(), [None]);
        found.sort_by(|a, b| compare_for_tags(a, b, tags, unrestricted_first));

        debug!(tags = tags.len(), found = found.len(), "matched by tags");
        Ok(found)
    }

    /// Features whose names, brand names or terms start with `term`.
    ///
    /// Results come in stages: name matches, then brand name matches, then
    /// term matches (then tag value matches, if enabled). A feature appears
    /// once, in the first stage that found it. With a non-zero `limit`, later
    /// stages are not consulted once enough results were collected.
    pub fn get_by_term(&self, term: &str, query: &TermQuery) -> Result<Vec<Arc<Feature>>> {
        let canonical = canonicalize(term);
        let mut results = StagedResults::new(query.limit);
        let applies = |f: &Arc<Feature>| matches_parameters(f, query.geometry, query.country.as_ref());

        if query.is_brand != Some(true) {
            let mut found = self.name_index(&query.locales)?.get_all(&canonical);
            found.retain(applies);
            found.sort_by(|a, b| compare_for_names(a, b, term, &canonical));
            if results.extend(found) {
                return Ok(results.finish());
            }
        }

        if query.is_brand != Some(false) {
            let mut found = self.brand_name_index(query.country.as_ref())?.get_all(&canonical);
            found.retain(applies);
            found.sort_by(|a, b| compare_for_names(a, b, term, &canonical));
            if results.extend(found) {
                return Ok(results.finish());
            }
        }

        if query.is_brand != Some(true) {
            let mut found = self.term_index(&query.locales)?.get_all(&canonical);
            found.retain(applies);
            found.sort_by(|a, b| compare_scores(a, b));
            if results.extend(found) {
                return Ok(results.finish());
            }
        }

        if query.include_tag_values && query.is_brand != Some(true) {
            let mut found = self.tag_value_index(&query.locales)?.get_all(&canonical);
            found.retain(applies);
            found.sort_by(|a, b| compare_scores(a, b));
            results.extend(found);
        }

        Ok(results.finish())
    }

    /// The feature with the given id, from the base catalog or else from the
    /// brand catalog.
    pub fn get_by_id(&self, id: &str, query: &IdQuery) -> Result<Option<Arc<Feature>>> {
        if let Some(feature) = self.base().get(id, &query.locales)? {
            return Ok(Some(feature));
        }
        let Some(brands) = self.brands() else {
            return Ok(None);
        };
        let chain = crate::country::fallback_chain(query.country.as_ref());
        Ok(brands
            .get(id, &chain)?
            .filter(|f| matches_parameters(f, None, query.country.as_ref())))
    }

    /// Project a feature for display: tags merged with its `add_tags`, and the
    /// name of its nearest category found in the base catalog.
    pub fn resolve_match(&self, feature: &Feature, locales: &[Option<String>]) -> Result<FeatureMatch> {
        let mut tags = feature.tags().clone();
        tags.extend(feature.add_tags().iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut parent_name = None;
        for ancestor in feature.ancestor_ids() {
            if let Some(parent) = self.base().get(ancestor, locales)? {
                parent_name = Some(parent.name().to_owned());
                break;
            }
        }

        Ok(FeatureMatch {
            id: feature.id().to_owned(),
            name: feature.name().to_owned(),
            tags,
            parent_name,
            is_brand: feature.is_brand(),
        })
    }
}

/// Accumulates term matches across stages, skipping ids already collected.
struct StagedResults {
    limit: usize,
    ids: HashSet<String>,
    features: Vec<Arc<Feature>>,
}

impl StagedResults {
    fn new(limit: usize) -> Self {
        StagedResults {
            limit,
            ids: HashSet::new(),
            features: Vec::new(),
        }
    }

    /// Append a stage; `true` once the limit is reached.
    fn extend(&mut self, stage: Vec<Arc<Feature>>) -> bool {
        for feature in stage {
            if self.ids.insert(feature.id().to_owned()) {
                self.features.push(feature);
            }
        }
        self.limit > 0 && self.features.len() >= self.limit
    }

    fn finish(mut self) -> Vec<Arc<Feature>> {
        if self.limit > 0 {
            self.features.truncate(self.limit);
        }
        self.features
    }
}

/// Whether `feature` applies to the given geometry and country.
///
/// A feature restricted to or excluded from some countries never applies
/// when no country is given.
pub fn matches_parameters(feature: &Feature, geometry: Option<GeometryType>, country: Option<&CountryCode>) -> bool {
    if let Some(geometry) = geometry {
        if !feature.geometry().contains(&geometry) {
            return false;
        }
    }
    if feature.is_unrestricted() {
        return true;
    }
    let Some(country) = country else {
        return false;
    };
    let include = feature.include_country_codes();
    if !include.is_empty() && !is_in_country_codes(country, include) {
        return false;
    }
    !is_in_country_codes(country, feature.exclude_country_codes())
}

/// Remove every feature whose id is an ancestor of another feature's id.
pub fn prune_ancestors(features: &mut Vec<Arc<Feature>>) {
    let ancestors: HashSet<String> = features
        .iter()
        .flat_map(|f| f.ancestor_ids().map(str::to_owned))
        .collect();
    if !ancestors.is_empty() {
        features.retain(|f| !ancestors.contains(f.id()));
    }
}

/// Match scores compared in whole percent.
fn score_percent(feature: &Feature) -> i64 {
    (f64::from(feature.match_score()) * 100.0).round() as i64
}

/// Higher match score first.
pub fn compare_scores(a: &Feature, b: &Feature) -> Ordering {
    score_percent(b).cmp(&score_percent(a))
}

/// Order of tag matches: more tags first; unrestricted first if
/// `unrestricted_first`; more of the query's tags in `add_tags` first;
/// higher match score first.
pub fn compare_for_tags(a: &Feature, b: &Feature, tags: &Tags, unrestricted_first: bool) -> Ordering {
    let matched_add_tags = |f: &Feature| tags.iter().filter(|(k, v)| f.add_tags().get(*k) == Some(*v)).count();

    b.tags()
        .len()
        .cmp(&a.tags().len())
        .then_with(|| {
            if unrestricted_first {
                b.is_unrestricted().cmp(&a.is_unrestricted())
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| matched_add_tags(b).cmp(&matched_add_tags(a)))
        .then_with(|| compare_scores(a, b))
}

/// Order of name matches for the raw `term` and its canonical form:
/// exact name first, then exact canonical name, then names starting with the
/// term, then higher match score, then shorter name.
pub fn compare_for_names(a: &Feature, b: &Feature, term: &str, canonical: &str) -> Ordering {
    let exact = |f: &Feature| f.names().any(|n| n == term);
    let canonical_exact = |f: &Feature| f.canonical_names().iter().any(|n| n == canonical);
    let starts_with = |f: &Feature| f.canonical_names().iter().any(|n| n.starts_with(canonical));

    exact(b)
        .cmp(&exact(a))
        .then_with(|| canonical_exact(b).cmp(&canonical_exact(a)))
        .then_with(|| starts_with(b).cmp(&starts_with(a)))
        .then_with(|| compare_scores(a, b))
        .then_with(|| a.name().chars().count().cmp(&b.name().chars().count()))
}

/// Searchable strings for the name index: every canonical name and, for
/// names of several words, each word.
pub fn name_strings(feature: &Feature) -> Vec<String> {
    if !feature.is_searchable() {
        return Vec::new();
    }
    let mut strings = feature.canonical_names().to_vec();
    for name in feature.canonical_names() {
        if name.contains(' ') {
            strings.extend(words(name).map(str::to_owned));
        }
    }
    strings
}

/// Searchable strings for the brand name index: full canonical names only.
pub fn brand_name_strings(feature: &Feature) -> Vec<String> {
    if !feature.is_searchable() {
        return Vec::new();
    }
    feature.canonical_names().to_vec()
}

pub fn term_strings(feature: &Feature) -> Vec<String> {
    if !feature.is_searchable() {
        return Vec::new();
    }
    feature.canonical_terms().to_vec()
}

/// Canonical tag values, wildcards excluded.
pub fn tag_value_strings(feature: &Feature) -> Vec<String> {
    if !feature.is_searchable() {
        return Vec::new();
    }
    feature
        .tags()
        .values()
        .filter(|v| v.as_str() != "*")
        .map(|v| canonicalize(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tags;

    fn cc(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    fn feature(id: &str) -> crate::model::FeatureBuilder {
        Feature::builder(id, tags([("a", "b")])).name(id)
    }

    #[test]
    fn geometry_must_be_listed() {
        let f = feature("f").geometry([GeometryType::Area]).build();
        assert!(matches_parameters(&f, None, None));
        assert!(matches_parameters(&f, Some(GeometryType::Area), None));
        assert!(!matches_parameters(&f, Some(GeometryType::Point), None));
    }

    #[test]
    fn country_restricted_feature_needs_a_country() {
        let f = feature("f").include_countries(["DE", "AT"]).exclude_countries(["AT-9"]).build();
        assert!(!matches_parameters(&f, None, None));
        for code in ["DE", "DE-TH", "AT", "AT-5"] {
            assert!(matches_parameters(&f, None, Some(&cc(code))), "{code}");
        }
        assert!(!matches_parameters(&f, None, Some(&cc("AT-9"))));
        assert!(!matches_parameters(&f, None, Some(&cc("FR"))));
    }

    #[test]
    fn exclude_only() {
        let f = feature("f").exclude_countries(["US"]).build();
        assert!(!matches_parameters(&f, None, None));
        assert!(matches_parameters(&f, None, Some(&cc("DE"))));
        assert!(!matches_parameters(&f, None, Some(&cc("US-NY"))));
    }

    #[test]
    fn prunes_categories_of_more_specific_matches() {
        let mut found = vec![
            Arc::new(feature("amenity").build()),
            Arc::new(feature("amenity/fast_food").build()),
            Arc::new(feature("amenity/fast_food/McDonald's").build()),
            Arc::new(feature("shop/deli").build()),
        ];
        prune_ancestors(&mut found);
        let ids: Vec<_> = found.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["amenity/fast_food/McDonald's", "shop/deli"]);
    }

    #[test]
    fn scores_compared_in_percent() {
        let a = feature("a").match_score(0.501).build();
        let b = feature("b").match_score(0.499).build();
        let c = feature("c").match_score(0.6).build();
        assert_eq!(compare_scores(&a, &b), Ordering::Equal);
        assert_eq!(compare_scores(&a, &c), Ordering::Greater);
    }

    #[test]
    fn name_words_without_brackets() {
        let f = feature("shop/alcohol").name("Off licence (Alcohol shop)").build();
        assert_eq!(
            name_strings(&f),
            vec!["off licence (alcohol shop)", "off", "licence", "alcohol", "shop"]
        );
        assert_eq!(brand_name_strings(&f), vec!["off licence (alcohol shop)"]);
    }

    #[test]
    fn unsearchable_features_yield_nothing() {
        let f = feature("f").searchable(false).terms(["x"]).build();
        assert!(name_strings(&f).is_empty());
        assert!(term_strings(&f).is_empty());
        assert!(tag_value_strings(&f).is_empty());
    }

    #[test]
    fn tag_values_skip_wildcards() {
        let f = Feature::builder("f", tags([("shop", "Bäkery"), ("name", "*")])).build();
        assert_eq!(tag_value_strings(&f), vec!["bakery"]);
    }

    #[test]
    fn names_ranked_exact_then_canonical_then_prefix() {
        let exact = feature("exact").name("Bank").build();
        let canonical = feature("canonical").name("Bänk").build();
        let prefix = feature("prefix").name("Bankomat").build();
        let word = feature("word").name("Bad Bank").build();
        let mut v = vec![&word, &prefix, &canonical, &exact];
        v.sort_by(|a, b| compare_for_names(a, b, "Bank", "bank"));
        let ids: Vec<_> = v.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["exact", "canonical", "prefix", "word"]);
    }

    #[test]
    fn shorter_names_first_counting_chars() {
        let astral = feature("astral").name("𝔸b").build();
        let plain = feature("plain").name("abc").build();
        assert_eq!(compare_for_names(&astral, &plain, "x", "x"), Ordering::Less);
        assert_eq!(compare_for_names(&plain, &astral, "x", "x"), Ordering::Greater);
    }

    #[test]
    fn tags_ranked_by_specificity_then_add_tags() {
        let query = tags([("amenity", "cafe"), ("cuisine", "coffee_shop")]);
        let generic = feature("generic").build();
        let specific = Feature::builder("specific", query.clone()).build();
        assert_eq!(compare_for_tags(&specific, &generic, &query, false), Ordering::Less);

        let plain = Feature::builder("plain", tags([("amenity", "cafe")])).build();
        let adds = Feature::builder("adds", tags([("amenity", "cafe")])).add_tags(query.clone()).build();
        assert_eq!(compare_for_tags(&adds, &plain, &query, false), Ordering::Less);
    }
}
