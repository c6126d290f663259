//! Integration tests for formguard-config

use formguard_config::*;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::fs;

#[test]
fn test_merge_precedence_round_trip() {
    let merged = merge_all([
        json!({ "a": { "x": 1 } }),
        json!({ "a": { "x": 2, "y": 3 } }),
        json!({ "a": { "x": 4 } }),
    ]);
    assert_eq!(merged, json!({ "a": { "x": 4, "y": 3 } }));
}

#[test]
fn test_markup_layer_sits_between_defaults_and_explicit() {
    let form = from_attributes([
        ("action", "/subscribe"),
        ("method", "post"),
        ("data-language", "ru"),
    ]);

    let options = OptionsBuilder::new()
        .form(form)
        .explicit(json!({ "language": "en", "ajax": { "sendType": "json" } }))
        .build()
        .unwrap();

    assert_eq!(options.ajax.url.as_deref(), Some("/subscribe"));
    assert_eq!(options.ajax.method, "POST");
    assert_eq!(options.ajax.send_type, SendType::Json);
    assert_eq!(options.language, "en");
    assert_eq!(options.containers, Containers::default());
}

#[test]
fn test_load_options_file() {
    let dir = std::env::temp_dir().join(format!("formguard-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("form.json");
    fs::write(
        &path,
        r#"{ "rules": { "email": { "required": true, "email": true } },
             "messages": { "email": { "required": "Enter your email" } } }"#,
    )
    .unwrap();

    let options = OptionsBuilder::new()
        .file(Layer::Explicit, &path)
        .unwrap()
        .build()
        .unwrap();

    let rules = options.rule_set().unwrap();
    assert_eq!(
        rules.get("email").unwrap().names().collect::<Vec<_>>(),
        vec!["required", "email"]
    );
    assert_eq!(
        options.custom_messages().field_message("email", "required"),
        Some("Enter your email")
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_file_is_load_error() {
    let result = OptionsLoader::new(FileFormat::Json).load_file("/nonexistent/form.json");
    assert!(matches!(result, Err(ConfigError::LoadError(_))));
}

#[test]
fn test_invalid_rules_surface_as_rule_error() {
    let options = OptionsBuilder::new()
        .explicit(json!({ "rules": { "name": "required" } }))
        .build()
        .unwrap();

    assert!(matches!(options.rule_set(), Err(ConfigError::Rule(_))));
}

fn small_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (0i64..100).prop_map(Value::from),
        "[a-z]{0,3}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::from),
            prop::collection::btree_map("[a-c]", inner, 0..3)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_merge_with_self_is_identity(v in small_json()) {
        prop_assert_eq!(deep_merge(v.clone(), v.clone()), v);
    }

    #[test]
    fn prop_empty_object_is_left_identity(v in small_json()) {
        let merged = deep_merge(json!({}), v.clone());
        prop_assert_eq!(merged, v);
    }

    #[test]
    fn prop_higher_scalars_win(a in small_json(), key in "[a-c]", n in 0i64..100) {
        let mut inner = serde_json::Map::new();
        inner.insert(key.clone(), json!(n));
        let merged = deep_merge(json!({ "k": a }), json!({ "k": Value::Object(inner) }));
        prop_assert_eq!(&merged["k"][key.as_str()], &json!(n));
    }

    #[test]
    fn prop_lower_only_keys_survive(a in small_json(), b in small_json()) {
        let merged = deep_merge(json!({ "lower": a.clone(), "shared": 1 }), json!({ "shared": b }));
        prop_assert_eq!(&merged["lower"], &a);
    }
}
