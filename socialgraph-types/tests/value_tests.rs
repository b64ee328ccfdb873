use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use socialgraph_types::{AttrValue, Direction};

// ── from_json ─────────────────────────────────────────────────────

#[test]
fn null_is_no_value() {
    assert_eq!(AttrValue::from_json(&json!(null)).unwrap(), None);
}

#[test]
fn scalars_convert() {
    assert_eq!(
        AttrValue::from_json(&json!("Ada")).unwrap(),
        Some(AttrValue::String("Ada".into()))
    );
    assert_eq!(AttrValue::from_json(&json!(42)).unwrap(), Some(AttrValue::Int(42)));
    assert_eq!(AttrValue::from_json(&json!(1.5)).unwrap(), Some(AttrValue::Float(1.5)));
    assert_eq!(AttrValue::from_json(&json!(true)).unwrap(), Some(AttrValue::Bool(true)));
}

#[test]
fn array_nulls_become_empty_strings() {
    let value = AttrValue::from_json(&json!(["a", null, "c"])).unwrap();
    assert_eq!(
        value,
        Some(AttrValue::StringArray(vec!["a".into(), String::new(), "c".into()]))
    );
}

#[test]
fn array_scalars_are_rendered_as_text() {
    let value = AttrValue::from_json(&json!([1, true])).unwrap();
    assert_eq!(
        value,
        Some(AttrValue::StringArray(vec!["1".into(), "true".into()]))
    );
}

#[test]
fn nested_document_is_rejected() {
    assert!(AttrValue::from_json(&json!({"a": 1})).is_err());
    assert!(AttrValue::from_json(&json!([["nested"]])).is_err());
}

// ── to_json / accessors ──────────────────────────────────────────

#[test]
fn to_json_renders_arrays() {
    let value = AttrValue::StringArray(vec!["x".into(), "y".into()]);
    assert_eq!(value.to_json(), json!(["x", "y"]));
}

#[test]
fn as_i64_accepts_numeric_strings() {
    assert_eq!(AttrValue::from("17").as_i64(), Some(17));
    assert_eq!(AttrValue::Float(3.0).as_i64(), Some(3));
    assert_eq!(AttrValue::Float(3.5).as_i64(), None);
}

#[test]
fn texts_flattens_arrays() {
    let value = AttrValue::StringArray(vec!["a".into(), "b".into()]);
    assert_eq!(value.texts(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(AttrValue::Int(7).texts(), vec!["7".to_string()]);
}

#[test]
fn direction_reverse() {
    assert_eq!(Direction::Outgoing.reverse(), Direction::Incoming);
    assert_eq!(Direction::Incoming.reverse(), Direction::Outgoing);
    assert_eq!(Direction::Both.reverse(), Direction::Both);
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn string_arrays_keep_length(
        items in proptest::collection::vec(proptest::option::of("[a-z]{0,6}"), 0..12)
    ) {
        let json = serde_json::Value::Array(
            items
                .iter()
                .map(|i| i.clone().map_or(serde_json::Value::Null, serde_json::Value::String))
                .collect(),
        );
        let value = AttrValue::from_json(&json).unwrap().unwrap();
        let array = value.as_array().unwrap();
        prop_assert_eq!(array.len(), items.len());
        for (stored, original) in array.iter().zip(&items) {
            prop_assert_eq!(stored, &original.clone().unwrap_or_default());
        }
    }
}
