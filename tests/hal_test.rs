use representor_core::deserializer::Deserializer;
use representor_core::hal::Hal;
use representor_core::hale::Hale;
use representor_core::{
    CanonicalDocument, DeserializeError, Format, FormatRegistry, LinkProperties,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn canonical(input: Value) -> Result<CanonicalDocument, DeserializeError> {
    Deserializer::new(&Hal, input)?.to_canonical()
}

/// Nests `{ "level": n }` documents `depth` times under the `child` relation.
fn nested(depth: usize) -> Value {
    let mut doc = json!({ "level": depth, "_links": { "self": { "href": format!("/levels/{depth}") } } });
    for level in (0..depth).rev() {
        doc = json!({
            "level": level,
            "_links": { "self": { "href": format!("/levels/{level}") } },
            "_embedded": { "child": doc }
        });
    }
    doc
}

#[test]
fn test_attributes_are_top_level_keys_minus_reserved() {
    let input = json!({
        "name": "Bob",
        "age": 42,
        "tags": ["a", "b"],
        "address": { "city": "Lisbon", "_links": "not structural here" },
        "nothing": null,
        "_links": { "self": { "href": "/users/1" } },
        "_embedded": {}
    });
    let doc = canonical(input.clone()).unwrap();

    let mut expected = input.as_object().unwrap().clone();
    expected.remove("_links");
    expected.remove("_embedded");
    assert_eq!(doc.attributes, expected);
}

#[test]
fn test_transition_count_matches_members() {
    let input = json!({
        "_links": {
            "item": [{ "href": "/1" }, { "href": "/2" }, { "href": "/3" }],
            "self": { "href": "/items" }
        }
    });
    let doc = canonical(input).unwrap();
    assert_eq!(doc.transitions["item"].len(), 3);
    assert_eq!(doc.transitions["self"].len(), 1);
}

#[test]
fn test_one_missing_href_fails_the_relation() {
    let input = json!({
        "_links": { "item": [{ "href": "/1" }, { "title": "orphan" }, { "href": "/3" }] }
    });
    let err = canonical(input).unwrap_err();
    assert!(matches!(err, DeserializeError::MissingHref { relation } if relation == "item"));
}

#[test]
fn test_empty_href_is_missing() {
    let err = canonical(json!({ "_links": { "self": { "href": "" } } })).unwrap_err();
    assert!(matches!(err, DeserializeError::MissingHref { .. }));

    let err = canonical(json!({ "_links": { "item": [{ "href": "" }] } })).unwrap_err();
    assert!(matches!(err, DeserializeError::MissingHref { .. }));
}

#[test]
fn test_link_with_only_a_type_is_missing_href() {
    let result = Deserializer::new(&Hal, r#"{"_links":{"self":{"type":"text/html"}}}"#)
        .unwrap()
        .to_canonical();
    assert!(matches!(result, Err(DeserializeError::MissingHref { .. })));
}

#[test]
fn test_unrecognized_link_fields_are_dropped() {
    let input = json!({
        "_links": {
            "self": {
                "href": "/users/1",
                "templated": false,
                "type": "application/hal+json",
                "deprecation": "/deprecations/1",
                "name": "me",
                "profile": "/profiles/user",
                "title": "Bob",
                "hreflang": "en",
                "rel": "self",
                "method": "GET",
                "x-custom": 1
            }
        }
    });
    let doc = canonical(input).unwrap();
    let expected = LinkProperties {
        templated: Some(json!(false)),
        media_type: Some(json!("application/hal+json")),
        deprecation: Some(json!("/deprecations/1")),
        name: Some(json!("me")),
        profile: Some(json!("/profiles/user")),
        title: Some(json!("Bob")),
        hreflang: Some(json!("en")),
        ..LinkProperties::default()
    };
    assert_eq!(doc.transitions["self"][0].properties, expected);

    let written = serde_json::to_value(&doc.transitions["self"][0]).unwrap();
    let written = written.as_object().unwrap();
    assert!(!written.contains_key("rel"));
    assert!(!written.contains_key("x-custom"));
    assert!(!written.contains_key("method"));
}

#[test]
fn test_array_order_is_preserved() {
    let input = json!({
        "_links": { "page": [{ "href": "/p/3" }, { "href": "/p/1" }, { "href": "/p/2" }] }
    });
    let doc = canonical(input).unwrap();
    let hrefs: Vec<_> = doc.transitions["page"].iter().map(|t| t.href.as_str()).collect();
    assert_eq!(hrefs, ["/p/3", "/p/1", "/p/2"]);
}

#[test]
fn test_curies_rejected_even_when_everything_else_is_valid() {
    let input = json!({
        "_links": {
            "self": { "href": "/orders" },
            "curies": [{ "name": "doc", "href": "/docs/{rel}", "templated": true }]
        }
    });
    assert!(matches!(canonical(input), Err(DeserializeError::UnsupportedCuries)));
}

#[test]
fn test_curies_rejected_inside_embedded_resource() {
    let input = json!({
        "_embedded": { "child": { "_links": { "curies": { "href": "/docs/{rel}" } } } }
    });
    assert!(matches!(canonical(input), Err(DeserializeError::UnsupportedCuries)));
}

#[test]
fn test_bare_embedded_is_single_and_array_is_many() {
    let input = json!({
        "_embedded": {
            "owner": { "name": "Ann" },
            "pets": [{ "name": "Rex" }]
        }
    });
    let doc = canonical(input).unwrap();
    assert!(matches!(doc.embedded["owner"], representor_core::Embedded::Single(_)));
    assert!(matches!(&doc.embedded["pets"], representor_core::Embedded::Many(pets) if pets.len() == 1));
}

#[test]
fn test_embedded_member_must_be_object() {
    let input = json!({ "_embedded": { "pets": [{ "name": "Rex" }, "Tom"] } });
    let err = canonical(input).unwrap_err();
    assert!(matches!(err, DeserializeError::InvalidDocument { .. }));
}

#[test]
fn test_embedding_depth() {
    for depth in [0, 1, 5, 20] {
        let doc = canonical(nested(depth)).unwrap();
        assert_eq!(doc.embedded_depth(), depth);
    }
}

#[test]
fn test_depth_guard() {
    let deserializer = Deserializer::new(&Hal, nested(3)).unwrap().with_max_depth(2);
    assert!(matches!(
        deserializer.to_canonical(),
        Err(DeserializeError::DepthExceeded { max: 2 })
    ));

    let deserializer = Deserializer::new(&Hal, nested(3)).unwrap().with_max_depth(3);
    assert!(deserializer.to_canonical().is_ok());
}

#[test]
fn test_round_trip_is_a_fixed_point() {
    let input = json!({
        "name": "Bob",
        "_links": {
            "self": { "href": "/users/1", "title": "Bob", "ignored": true },
            "friends": [{ "href": "/users/2" }],
            "find": { "href": "/users{?q}", "templated": true }
        },
        "_embedded": {
            "best_friend": { "name": "Ann", "_links": { "self": { "href": "/users/2" } } },
            "others": [nested(3)]
        }
    });
    let first = canonical(input).unwrap();
    let written = Hal.serialize(&first).unwrap();
    let second = canonical(written.clone()).unwrap();
    assert_eq!(first, second);
    assert_eq!(Hal.serialize(&second).unwrap(), written);
    assert_eq!(second.embedded_depth(), 4);
}

#[test]
fn test_hale_round_trip_keeps_hale_fields() {
    let input = json!({
        "_meta": { "post": { "method": "POST" } },
        "_links": { "create": { "href": "/orders", "_ref": ["post"], "data": { "qty": 1 } } }
    });
    let first = Deserializer::new(&Hale, input).unwrap().to_canonical().unwrap();
    let written = Hale.serialize(&first).unwrap();
    assert_eq!(
        written,
        json!({ "_links": { "create": { "href": "/orders", "method": "POST", "data": { "qty": 1 } } } })
    );
    let second = Deserializer::new(&Hale, written).unwrap().to_canonical().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_hal_writes_only_hal_link_fields() {
    let input = json!({
        "_links": { "create": { "href": "/orders", "title": "New", "method": "POST", "data": { "qty": 1 } } }
    });
    let document = Deserializer::new(&Hale, input).unwrap().to_canonical().unwrap();
    assert_eq!(
        Hal.serialize(&document).unwrap(),
        json!({ "_links": { "create": { "href": "/orders", "title": "New" } } })
    );
}

#[test]
fn test_unusual_field_values_survive_round_trip() {
    let input = json!({
        "_links": { "self": { "href": "/a", "templated": "true", "name": 5, "title": null } }
    });
    let first = canonical(input).unwrap();
    let written = Hal.serialize(&first).unwrap();
    assert_eq!(
        written,
        json!({ "_links": { "self": { "href": "/a", "templated": "true", "name": 5, "title": null } } })
    );
    assert_eq!(canonical(written).unwrap(), first);
}

#[test]
fn test_registry_dispatch() {
    let mut registry = FormatRegistry::new();
    registry.register([Arc::new(Hal) as Arc<dyn Format>]).unwrap();

    for media_type in ["application/hal+json", "application/json"] {
        let format = registry.lookup(media_type).unwrap();
        assert_eq!(format.symbol(), "hal");
    }
    assert!(registry.lookup("application/vnd.hale+json").is_err());

    let doc = registry
        .deserializer_for("application/json", r#"{ "_links": { "self": { "href": "/" } } }"#)
        .unwrap()
        .to_canonical()
        .unwrap();
    let written = registry.serialize("hal", &doc).unwrap();
    assert_eq!(written, json!({ "_links": { "self": { "href": "/" } } }));
}
