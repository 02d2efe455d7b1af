//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

use ratecard_seal_core::Document;

/// Generate an object key, including non-ASCII and escape-worthy ones.
pub fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,11}",
        "[A-Za-zé€\\-\"\\\\ ]{1,6}",
    ]
}

/// Generate a finite number: integer or float.
pub fn number() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<i64>().prop_map(Number::from),
        any::<u64>().prop_map(Number::from),
        (-1e9f64..1e9f64).prop_filter_map("finite", Number::from_f64),
    ]
}

/// Generate a leaf JSON value.
pub fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        number().prop_map(Value::Number),
        "\\PC{0,16}".prop_map(Value::String),
    ]
}

/// Generate an arbitrary JSON value, nested a few levels deep.
pub fn json_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(key(), inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generate a document without integrity metadata.
///
/// `metadata` is excluded from the top-level keys so tests can add it
/// explicitly.
pub fn document() -> impl Strategy<Value = Document> {
    prop::collection::btree_map(
        key().prop_filter("reserved", |k| k != "metadata"),
        json_value(),
        0..8,
    )
    .prop_map(|m| Document::from(m.into_iter().collect::<Map<String, Value>>()))
}

/// Generate a non-empty document, so there is always a field to tamper with.
pub fn non_empty_document() -> impl Strategy<Value = Document> {
    document().prop_filter("non-empty", |d| !d.as_map().is_empty())
}

/// Generate a rate card shaped document.
pub fn rate_card() -> impl Strategy<Value = Document> {
    let rate = ("[0-9]{1,6}", 0u32..100_000, 1u32..=60).prop_map(|(prefix, micros, inc)| {
        serde_json::json!({
            "prefix": prefix,
            "rate": f64::from(micros) / 1e6,
            "increment": inc,
        })
    });
    (
        "[A-Za-z ]{1,20}",
        "[0-9]\\.[0-9]",
        prop::sample::select(vec!["USD", "EUR", "GBP"]),
        prop::collection::vec(rate, 0..8),
    )
        .prop_map(|(name, version, currency, rates)| {
            let value = serde_json::json!({
                "name": name,
                "schema_version": "1.0.0",
                "version": version,
                "date": "2026-01-12",
                "cards": {
                    "default": {
                        "name": "Default",
                        "type": "termination",
                        "currency": currency,
                        "endpoint": "default",
                        "rates": rates,
                    }
                }
            });
            Document::try_from(value).expect("rate card is an object")
        })
}

/// Rebuild a value with every object's keys in reverse insertion order.
pub fn reverse_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .rev()
                .map(|(k, v)| (k.clone(), reverse_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(reverse_keys).collect()),
        other => other.clone(),
    }
}

/// Rotate top-level keys by `by` positions and reverse every nested object.
pub fn permute_keys(document: &Document, by: usize) -> Document {
    let mut entries: Vec<(String, Value)> = document
        .as_map()
        .iter()
        .map(|(k, v)| (k.clone(), reverse_keys(v)))
        .collect();
    if !entries.is_empty() {
        let n = by % entries.len();
        entries.rotate_left(n);
    }
    Document::from(entries.into_iter().collect::<Map<String, Value>>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_keys_changes_order_only() {
        let value = serde_json::json!({"a": 1, "b": {"x": 1, "y": 2}});
        let reversed = reverse_keys(&value);
        assert_eq!(reversed, value);
        assert_eq!(reversed.to_string(), r#"{"b":{"y":2,"x":1},"a":1}"#);
    }

    proptest! {
        #[test]
        fn permute_keeps_content(doc in document(), by in 0usize..8) {
            prop_assert_eq!(permute_keys(&doc, by), doc);
        }
    }
}
