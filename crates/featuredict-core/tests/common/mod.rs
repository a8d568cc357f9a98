// crates/featuredict-core/tests/common/mod.rs

//! In-memory catalogs and the feature fixtures shared by the integration tests.

#![allow(dead_code)]

use featuredict_core::{
    tags, Dictionary, DictionaryConfig, Feature, FeatureBuilder, GeometryType, LocalizedCatalog, PerCountryCatalog,
    Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Serves the features whose locale is in the requested list.
pub struct TestLocalizedCatalog {
    features: Vec<Arc<Feature>>,
}

impl TestLocalizedCatalog {
    pub fn new(features: Vec<Arc<Feature>>) -> Self {
        TestLocalizedCatalog { features }
    }
}

impl LocalizedCatalog for TestLocalizedCatalog {
    fn get_all(&self, locales: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        Ok(self
            .features
            .iter()
            .filter(|f| locales.iter().any(|l| l.as_deref() == f.locale()))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str, locales: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        // most preferred locale wins
        for locale in locales {
            let found = self
                .features
                .iter()
                .find(|f| f.id() == id && f.locale() == locale.as_deref());
            if let Some(feature) = found {
                return Ok(Some(Arc::clone(feature)));
            }
        }
        Ok(None)
    }
}

/// Serves the brand features available for a country code chain.
pub struct TestPerCountryCatalog {
    features: Vec<Arc<Feature>>,
}

impl TestPerCountryCatalog {
    pub fn new(features: Vec<Arc<Feature>>) -> Self {
        TestPerCountryCatalog { features }
    }

    fn is_available(feature: &Feature, country_codes: &[Option<String>]) -> bool {
        let listed = |list: &[String], code: &Option<String>| code.as_ref().is_some_and(|c| list.contains(c));
        let excluded = country_codes
            .iter()
            .any(|code| listed(feature.exclude_country_codes(), code));
        let included = country_codes.iter().any(|code| {
            listed(feature.include_country_codes(), code)
                || (code.is_none() && feature.include_country_codes().is_empty())
        });
        !excluded && included
    }
}

impl PerCountryCatalog for TestPerCountryCatalog {
    fn get_all(&self, country_codes: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        Ok(self
            .features
            .iter()
            .filter(|f| Self::is_available(f, country_codes))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str, country_codes: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        Ok(self
            .features
            .iter()
            .find(|f| f.id() == id && Self::is_available(f, country_codes))
            .cloned())
    }
}

/// Wraps a catalog and counts `get_all` calls, recording their keys.
pub struct CountingCatalog<C> {
    inner: C,
    calls: AtomicUsize,
    keys: Mutex<Vec<Vec<Option<String>>>>,
}

impl<C> CountingCatalog<C> {
    pub fn new(inner: C) -> Self {
        CountingCatalog {
            inner,
            calls: AtomicUsize::new(0),
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Locale lists or country code chains passed to `get_all`, in call order.
    pub fn keys(&self) -> Vec<Vec<Option<String>>> {
        self.keys.lock().unwrap().clone()
    }

    fn record(&self, key: &[Option<String>]) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().unwrap().push(key.to_vec());
    }
}

impl<C: LocalizedCatalog> LocalizedCatalog for CountingCatalog<C> {
    fn get_all(&self, locales: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        self.record(locales);
        self.inner.get_all(locales)
    }

    fn get(&self, id: &str, locales: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        self.inner.get(id, locales)
    }
}

impl<C: PerCountryCatalog> PerCountryCatalog for CountingCatalog<C> {
    fn get_all(&self, country_codes: &[Option<String>]) -> Result<Vec<Arc<Feature>>> {
        self.record(country_codes);
        self.inner.get_all(country_codes)
    }

    fn get(&self, id: &str, country_codes: &[Option<String>]) -> Result<Option<Arc<Feature>>> {
        self.inner.get(id, country_codes)
    }
}

/// Dictionary over `features`; brands go to the per-country catalog.
pub fn dictionary(features: &[Arc<Feature>]) -> Dictionary {
    let (brands, base): (Vec<_>, Vec<_>) = features.iter().cloned().partition(|f| f.is_brand());
    Dictionary::new(
        Arc::new(TestLocalizedCatalog::new(base)),
        Some(Arc::new(TestPerCountryCatalog::new(brands))),
        DictionaryConfig::default(),
    )
    .unwrap()
}

pub fn locales(l: &[Option<&str>]) -> Vec<Option<String>> {
    l.iter().map(|l| l.map(str::to_owned)).collect()
}

pub fn ids(features: &[Arc<Feature>]) -> Vec<&str> {
    features.iter().map(|f| f.id()).collect()
}

fn feature(id: &str, pairs: &[(&str, &str)], name: &str) -> FeatureBuilder {
    Feature::builder(id, tags(pairs.iter().copied()))
        .geometry([GeometryType::Point])
        .name(name)
}

fn brand(id: &str, pairs: &[(&str, &str)], name: &str) -> FeatureBuilder {
    feature(id, pairs, name).brand(true)
}

fn built(builder: FeatureBuilder) -> Arc<Feature> {
    Arc::new(builder.build())
}

pub fn bakery() -> Arc<Feature> {
    built(feature("shop/bakery", &[("shop", "bakery")], "Bäckerei").terms(["Brot"]))
}

pub fn panetteria() -> Arc<Feature> {
    built(feature("shop/bakery", &[("shop", "bakery")], "Panetteria").locale(Some("it".into())))
}

pub fn ditsch() -> Arc<Feature> {
    built(
        brand("shop/bakery/Ditsch", &[("shop", "bakery"), ("name", "Ditsch")], "Ditsch")
            .include_countries(["DE", "AT"])
            .exclude_countries(["AT-9"])
            .add_tags(tags([
                ("wikipedia", "de:Brezelb%C3%A4ckerei_Ditsch"),
                ("brand", "Ditsch"),
            ])),
    )
}

pub fn ditsch_russian() -> Arc<Feature> {
    built(
        brand("shop/bakery/Дитсч", &[("shop", "bakery"), ("name", "Ditsch")], "Дитсч")
            .include_countries(["RU", "UA-43"])
            .add_tags(tags([
                ("wikipedia", "de:Brezelb%C3%A4ckerei_Ditsch"),
                ("brand", "Дитсч"),
            ])),
    )
}

pub fn ditsch_international() -> Arc<Feature> {
    built(
        brand("shop/bakery/Ditsh", &[("shop", "bakery"), ("name", "Ditsch")], "Ditsh")
            .add_tags(tags([("wikipedia", "de:Brezelb%C3%A4ckerei_Ditsch")])),
    )
}

pub fn liquor_store() -> Arc<Feature> {
    built(
        feature("shop/alcohol", &[("shop", "alcohol")], "Off licence (Alcohol shop)").locale(Some("en-GB".into())),
    )
}

pub fn car_dealer() -> Arc<Feature> {
    built(
        feature("shop/car", &[("shop", "car")], "Autohändler")
            .terms(["auto"])
            .locale(Some("de".into())),
    )
}

pub fn second_hand_car_dealer() -> Arc<Feature> {
    built(
        feature(
            "shop/car/second_hand",
            &[("shop", "car"), ("second_hand", "only")],
            "Gebrauchtwagenhändler",
        )
        .terms(["auto"])
        .locale(Some("de".into())),
    )
}

pub fn scheisshaus() -> Arc<Feature> {
    built(feature("amenity/scheißhaus", &[("amenity", "scheißhaus")], "Scheißhaus").searchable(false))
}

pub fn bank() -> Arc<Feature> {
    built(feature("amenity/bank", &[("amenity", "bank")], "Bank"))
}

pub fn bench() -> Arc<Feature> {
    built(
        feature("amenity/bench", &[("amenity", "bench")], "Parkbank")
            .terms(["Bank"])
            .match_score(5.0),
    )
}

pub fn casino() -> Arc<Feature> {
    built(feature("amenity/casino", &[("amenity", "casino")], "Spielbank").terms(["Kasino"]))
}

pub fn atm() -> Arc<Feature> {
    built(feature("amenity/atm", &[("amenity", "atm")], "Bankomat"))
}

pub fn stock_exchange() -> Arc<Feature> {
    built(feature("amenity/stock_exchange", &[("amenity", "stock_exchange")], "Börse").terms(["Banking"]))
}

pub fn bank_of_america() -> Arc<Feature> {
    built(brand(
        "amenity/bank/Bank of America",
        &[("amenity", "bank"), ("name", "Bank of America")],
        "Bank of America",
    ))
}

pub fn bank_of_liechtenstein() -> Arc<Feature> {
    built(
        brand(
            "amenity/bank/Bank of Liechtenstein",
            &[("amenity", "bank"), ("name", "Bank of Liechtenstein")],
            "Bank of Liechtenstein",
        )
        .match_score(0.2),
    )
}

pub fn deutsche_bank() -> Arc<Feature> {
    built(brand(
        "amenity/bank/Deutsche Bank",
        &[("amenity", "bank"), ("name", "Deutsche Bank")],
        "Deutsche Bank",
    ))
}

pub fn baenk() -> Arc<Feature> {
    built(feature("amenity/bänk", &[("amenity", "bänk")], "Bänk"))
}

pub fn bad_bank() -> Arc<Feature> {
    built(feature(
        "amenity/bank/bad",
        &[("amenity", "bank"), ("goodity", "bad")],
        "Bad Bank",
    ))
}

pub fn thieves_guild() -> Arc<Feature> {
    built(
        feature("amenity/thieves_guild", &[("amenity", "thieves_guild")], "Diebesgilde")
            .aliases(["Bankräuberausbildungszentrum"]),
    )
}

pub fn miniature_train_shop() -> Arc<Feature> {
    built(feature(
        "shop/miniature_train",
        &[("shop", "miniature_train")],
        "Miniature Train Shop",
    ))
}

/// Brand preset with point and area geometry, tagged by wikidata only.
pub fn lush() -> Arc<Feature> {
    built(
        brand(
            "shop/cosmetics/lush-a08666",
            &[("brand:wikidata", "Q1585448"), ("shop", "cosmetics")],
            "Lush",
        )
        .geometry([GeometryType::Point, GeometryType::Area])
        .terms(["lush"])
        .match_score(2.0)
        .add_tags(tags([
            ("brand", "Lush"),
            ("brand:wikidata", "Q1585448"),
            ("name", "Lush"),
            ("shop", "cosmetics"),
        ])),
    )
}
