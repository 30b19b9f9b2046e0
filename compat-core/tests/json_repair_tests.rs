//! Tests for lenient parsing of model-emitted JSON

use compat_core::json_repair::{loads, repair_json};
use proptest::prelude::*;
use serde_json::{json, Value};
use test_case::test_case;

#[test_case(r#"{"a": 1,}"#, json!({"a": 1}) ; "trailing comma in object")]
#[test_case(r#"[1, 2, 3,]"#, json!([1, 2, 3]) ; "trailing comma in array")]
#[test_case(r#"{"a": {"b": [1, 2"#, json!({"a": {"b": [1, 2]}}) ; "truncated nesting")]
#[test_case(r#"{"msg": "unterminated"#, json!({"msg": "unterminated"}) ; "unterminated string")]
#[test_case("{'single': 'quotes'}", json!({"single": "quotes"}) ; "single quotes")]
#[test_case("{\"ok\": False, \"v\": undefined}", json!({"ok": false, "v": null}) ; "foreign literals")]
#[test_case("{\"n\": -1.5e3}", json!({"n": -1500.0}) ; "exponent number")]
#[test_case("{\"a\": 1}}]", json!({"a": 1}) ; "stray closers")]
#[test_case("```\n[\"x\"]\n```", json!(["x"]) ; "bare code fence")]
#[test_case("{\"tab\": \"a\tb\"}", json!({"tab": "a\tb"}) ; "raw tab in string")]
#[test_case("{\"q\": \"say \\\"hi\\\"\"}", json!({"q": "say \"hi\""}) ; "escaped quotes kept")]
#[test_case("{\"a\": 1} {\"b\": 2}", json!({"a": 1}) ; "first value wins")]
fn test_repairs(input: &str, expected: Value) {
    assert_eq!(loads(input), expected);
}

#[test_case("" ; "empty")]
#[test_case("\n\t " ; "whitespace only")]
fn test_blank_input_is_empty_object(input: &str) {
    assert_eq!(loads(input), json!({}));
}

#[test]
fn test_unsalvageable_text_is_preserved() {
    let text = "I could not decide which tool to call";
    assert_eq!(loads(text), Value::String(text.to_string()));
    assert!(repair_json(text).is_none());
}

#[test]
fn test_repair_output_is_strict_json() {
    let repaired = repair_json("{'a': True, b: [1, 2,").unwrap();
    let value: Value = serde_json::from_str(&repaired).unwrap();
    assert_eq!(value, json!({"a": true, "b": [1, 2]}));
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ,:{}\\[\\]'\"\\\\]{0,12}".prop_map(Value::String),
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_valid_json_parses_unchanged(value in arb_json()) {
        let text = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(loads(&text), value);
    }

    #[test]
    fn prop_repair_never_panics(text in "\\PC{0,40}") {
        let _ = loads(&text);
        if let Some(repaired) = repair_json(&text) {
            prop_assert!(serde_json::from_str::<Value>(&repaired).is_ok());
        }
    }
}
