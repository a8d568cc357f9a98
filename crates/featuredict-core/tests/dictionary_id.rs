// crates/featuredict-core/tests/dictionary_id.rs
mod common;

use common::*;

#[test]
fn find_no_entry_by_id() {
    let d = dictionary(&[bakery()]);
    assert!(d.by_id("amenity/hospital").get().unwrap().is_none());
}

#[test]
fn find_no_entry_by_id_because_unlocalized_results_are_excluded() {
    let d = dictionary(&[bakery()]);
    assert!(d.by_id("shop/bakery").for_locales([Some("it")]).get().unwrap().is_none());
}

#[test]
fn find_entry_by_id() {
    let d = dictionary(&[bakery()]);
    assert_eq!(d.by_id("shop/bakery").get().unwrap(), Some(bakery()));
    assert_eq!(
        d.by_id("shop/bakery").for_locales([Some("zh"), None]).get().unwrap(),
        Some(bakery())
    );
}

#[test]
fn find_localized_entry_by_id() {
    let d = dictionary(&[panetteria()]);
    assert_eq!(
        d.by_id("shop/bakery").for_locales([Some("it")]).get().unwrap(),
        Some(panetteria())
    );
}

#[test]
fn most_preferred_locale_wins() {
    let d = dictionary(&[bakery(), panetteria()]);
    assert_eq!(d.by_id("shop/bakery").for_locale("it").get().unwrap(), Some(panetteria()));
    assert_eq!(d.by_id("shop/bakery").get().unwrap(), Some(bakery()));
}

#[test]
fn find_no_brand_entry_by_id_outside_its_countries() {
    let d = dictionary(&[ditsch()]);
    assert!(d.by_id("shop/bakery/Ditsch").get().unwrap().is_none());
    for country in ["IT", "AT-9"] {
        assert!(
            d.by_id("shop/bakery/Ditsch").in_country(country).get().unwrap().is_none(),
            "{country}"
        );
    }
}

#[test]
fn find_brand_entry_by_id() {
    let d = dictionary(&[ditsch()]);
    for country in ["AT", "DE"] {
        assert_eq!(
            d.by_id("shop/bakery/Ditsch").in_country(country).get().unwrap(),
            Some(ditsch()),
            "{country}"
        );
    }
}

#[test]
fn brand_match_has_added_tags() {
    let d = dictionary(&[lush()]);
    let m = d
        .by_id("shop/cosmetics/lush-a08666")
        .find_match()
        .unwrap()
        .expect("brand without country restriction");
    assert_eq!(m.name, "Lush");
    assert!(m.is_brand);
    assert_eq!(m.parent_name, None);
    assert_eq!(m.tags.get("brand").map(String::as_str), Some("Lush"));
    assert_eq!(m.tags.get("name").map(String::as_str), Some("Lush"));
    assert_eq!(m.tags.get("shop").map(String::as_str), Some("cosmetics"));
}

#[test]
fn parent_name_is_localized() {
    let d = dictionary(&[bakery(), panetteria(), ditsch()]);
    let m = d
        .by_id("shop/bakery/Ditsch")
        .in_country("DE")
        .for_locale("it")
        .find_match()
        .unwrap()
        .unwrap();
    assert_eq!(m.parent_name.as_deref(), Some("Panetteria"));

    let m = d.by_id("shop/bakery/Ditsch").in_country("DE").find_match().unwrap().unwrap();
    assert_eq!(m.parent_name.as_deref(), Some("Bäckerei"));
}

#[test]
fn no_match_for_unknown_id() {
    let d = dictionary(&[bakery()]);
    assert!(d.by_id("shop/bakery/Unknown").find_match().unwrap().is_none());
}
