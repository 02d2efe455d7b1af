//! Canonical JSON encoding for deterministic serialization.
//!
//! The canonical form of a document is compact JSON text with:
//! - Object keys sorted by code point (UTF-8 byte order), at every level
//! - Array order preserved
//! - Numbers in shortest round-trip form: integral floats below 1e21 as
//!   integers, plain decimals down to 1e-6, exponent notation (`1e+21`,
//!   `1.5e-7`) outside that range
//! - Standard JSON string escaping, no insignificant whitespace
//! - `metadata.checksum` and `metadata.signature` removed, and `metadata`
//!   itself removed if that leaves it empty
//!
//! **CRITICAL**: This encoding is FROZEN. Changes break all existing checksums
//! and signatures.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::document::{Document, CHECKSUM_KEY, METADATA_KEY, SIGNATURE_KEY};
use crate::error::{CoreError, Result};

/// Maximum nesting depth accepted by the encoder.
pub const MAX_DEPTH: usize = 128;

/// Floats with more integer digits than this use exponent notation.
const EXPONENT_ABOVE: i32 = 21;

/// Floats with a decimal point position at or below this use exponent notation.
const EXPONENT_BELOW: i32 = -6;

/// Encode a document to canonical bytes, excluding integrity fields.
pub fn canonical_bytes(document: &Document) -> Result<Vec<u8>> {
    let stripped = strip_integrity_fields(document.as_map());
    let mut buf = Vec::new();
    encode_map(&mut buf, &stripped, 0)?;
    Ok(buf)
}

/// Encode a document to its canonical string.
pub fn canonical_string(document: &Document) -> Result<String> {
    let bytes = canonical_bytes(document)?;
    String::from_utf8(bytes).map_err(|e| CoreError::EncodingError(e.to_string()))
}

/// Encode an arbitrary JSON value canonically.
///
/// No fields are stripped; use [`canonical_bytes`] for documents.
pub fn canonical_value_bytes(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value(&mut buf, value, 0)?;
    Ok(buf)
}

/// Encode any serializable value canonically.
pub fn canonical_bytes_of<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let value = serde_json::to_value(value).map_err(|e| CoreError::EncodingError(e.to_string()))?;
    canonical_value_bytes(&value)
}

/// Copy the top-level map without the reserved integrity fields.
fn strip_integrity_fields(map: &Map<String, Value>) -> Map<String, Value> {
    let mut copy = map.clone();
    if let Some(Value::Object(meta)) = copy.get_mut(METADATA_KEY) {
        meta.shift_remove(CHECKSUM_KEY);
        meta.shift_remove(SIGNATURE_KEY);
        // Empty metadata encodes like absent metadata
        if meta.is_empty() {
            copy.shift_remove(METADATA_KEY);
        }
    }
    copy
}

/// Recursively encode a JSON value.
fn encode_value(buf: &mut Vec<u8>, value: &Value, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(CoreError::EncodingError(format!(
            "nesting exceeds maximum depth of {MAX_DEPTH}"
        )));
    }
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(b) => buf.extend_from_slice(if *b { b"true" } else { b"false" }),
        Value::Number(n) => encode_number(buf, n)?,
        Value::String(s) => encode_string(buf, s)?,
        Value::Array(arr) => encode_array(buf, arr, depth)?,
        Value::Object(map) => encode_map(buf, map, depth)?,
    }
    Ok(())
}

fn encode_number(buf: &mut Vec<u8>, n: &Number) -> Result<()> {
    if let Some(i) = n.as_i64() {
        buf.extend_from_slice(i.to_string().as_bytes());
    } else if let Some(u) = n.as_u64() {
        buf.extend_from_slice(u.to_string().as_bytes());
    } else {
        let f = n
            .as_f64()
            .ok_or_else(|| CoreError::EncodingError(format!("unrepresentable number: {n}")))?;
        encode_float(buf, f)?;
    }
    Ok(())
}

fn encode_float(buf: &mut Vec<u8>, f: f64) -> Result<()> {
    if !f.is_finite() {
        return Err(CoreError::EncodingError(format!("non-finite number: {f}")));
    }
    if f == 0.0 {
        // Covers -0.0
        buf.push(b'0');
        return Ok(());
    }
    if f < 0.0 {
        buf.push(b'-');
    }

    // `{:e}` yields the shortest round-trip digits as `d[.ddd]e<exp>`
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci
        .split_once('e')
        .ok_or_else(|| CoreError::EncodingError(format!("unexpected float form: {sci}")))?;
    let exp: i32 = exp
        .parse()
        .map_err(|_| CoreError::EncodingError(format!("unexpected float form: {sci}")))?;
    let digits = mantissa.replace('.', "");
    write_float_digits(buf, &digits, exp + 1);
    Ok(())
}

/// Lay out significant `digits` with decimal point position `point`
/// (value = 0.digits x 10^point), switching to exponent notation outside
/// the range [1e-6, 1e21).
fn write_float_digits(buf: &mut Vec<u8>, digits: &str, point: i32) {
    let len = digits.len() as i32;
    if len <= point && point <= EXPONENT_ABOVE {
        buf.extend_from_slice(digits.as_bytes());
        buf.extend(std::iter::repeat(b'0').take((point - len) as usize));
    } else if 0 < point && point <= EXPONENT_ABOVE {
        let (int, frac) = digits.split_at(point as usize);
        buf.extend_from_slice(int.as_bytes());
        buf.push(b'.');
        buf.extend_from_slice(frac.as_bytes());
    } else if EXPONENT_BELOW < point && point <= 0 {
        buf.extend_from_slice(b"0.");
        buf.extend(std::iter::repeat(b'0').take((-point) as usize));
        buf.extend_from_slice(digits.as_bytes());
    } else {
        let (first, rest) = digits.split_at(1);
        buf.extend_from_slice(first.as_bytes());
        if !rest.is_empty() {
            buf.push(b'.');
            buf.extend_from_slice(rest.as_bytes());
        }
        let exp = point - 1;
        let sign = if exp < 0 { '-' } else { '+' };
        buf.extend_from_slice(format!("e{sign}{}", exp.abs()).as_bytes());
    }
}

fn encode_string(buf: &mut Vec<u8>, s: &str) -> Result<()> {
    serde_json::to_writer(&mut *buf, s).map_err(|e| CoreError::EncodingError(e.to_string()))
}

fn encode_array(buf: &mut Vec<u8>, arr: &[Value], depth: usize) -> Result<()> {
    buf.push(b'[');
    for (i, item) in arr.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_value(buf, item, depth + 1)?;
    }
    buf.push(b']');
    Ok(())
}

/// Encode an object with keys sorted by code point.
fn encode_map(buf: &mut Vec<u8>, map: &Map<String, Value>, depth: usize) -> Result<()> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    // UTF-8 byte order is code point order
    entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    buf.push(b'{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_string(buf, key)?;
        buf.push(b':');
        encode_value(buf, value, depth + 1)?;
    }
    buf.push(b'}');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    fn encode(value: Value) -> String {
        String::from_utf8(canonical_value_bytes(&value).unwrap()).unwrap()
    }

    #[test]
    fn test_keys_sorted_recursively() {
        let d = doc(json!({"b": {"z": 1, "a": [3, 1, 2]}, "a": null}));
        assert_eq!(
            canonical_string(&d).unwrap(),
            r#"{"a":null,"b":{"a":[3,1,2],"z":1}}"#
        );
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let d1 = Document::from_json(r#"{"x":1,"y":{"p":true,"q":false}}"#).unwrap();
        let d2 = Document::from_json(r#"{"y":{"q":false,"p":true},"x":1}"#).unwrap();
        assert_eq!(canonical_bytes(&d1).unwrap(), canonical_bytes(&d2).unwrap());
    }

    #[test]
    fn test_code_point_ordering() {
        // 'Z' (0x5a) < 'a' (0x61) < 'é' (0xe9)
        let d = doc(json!({"é": 1, "a": 2, "Z": 3}));
        assert_eq!(canonical_string(&d).unwrap(), r#"{"Z":3,"a":2,"é":1}"#);
    }

    #[test]
    fn test_integrity_fields_excluded() {
        let plain = doc(json!({"name": "A"}));
        let with_checksum = doc(json!({"name": "A", "metadata": {"checksum": "x"}}));
        let with_both = doc(json!({
            "name": "A",
            "metadata": {"checksum": "y", "signature": "{}"}
        }));
        let expected = canonical_bytes(&plain).unwrap();
        assert_eq!(canonical_bytes(&with_checksum).unwrap(), expected);
        assert_eq!(canonical_bytes(&with_both).unwrap(), expected);
    }

    #[test]
    fn test_other_metadata_kept() {
        let d = doc(json!({"metadata": {"author": "ops", "checksum": "x"}}));
        assert_eq!(
            canonical_string(&d).unwrap(),
            r#"{"metadata":{"author":"ops"}}"#
        );
    }

    #[test]
    fn test_empty_metadata_dropped() {
        let bare = doc(json!({"name": "Test"}));
        let empty = doc(json!({"name": "Test", "metadata": {}}));
        assert_eq!(canonical_string(&empty).unwrap(), r#"{"name":"Test"}"#);
        assert_eq!(canonical_bytes(&empty).unwrap(), canonical_bytes(&bare).unwrap());
    }

    #[test]
    fn test_removing_last_integrity_field_is_neutral() {
        // A document that lost its only signature still encodes the same
        let signed = doc(json!({"name": "Test", "metadata": {"signature": "{}"}}));
        let stripped = signed.without_metadata_field(SIGNATURE_KEY);
        assert_eq!(
            canonical_bytes(&stripped).unwrap(),
            canonical_bytes(&doc(json!({"name": "Test"}))).unwrap()
        );
    }

    #[test]
    fn test_nested_reserved_names_not_stripped() {
        let d = doc(json!({"cards": {"metadata": {"checksum": "keep"}}}));
        assert_eq!(
            canonical_string(&d).unwrap(),
            r#"{"cards":{"metadata":{"checksum":"keep"}}}"#
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(encode(json!(1.0)), "1");
        assert_eq!(encode(json!(-0.0)), "0");
        assert_eq!(encode(json!(0.1)), "0.1");
        assert_eq!(encode(json!(-42)), "-42");
        assert_eq!(encode(json!(u64::MAX)), "18446744073709551615");
        assert_eq!(encode(json!(1e20)), "100000000000000000000");
        assert_eq!(encode(json!(2.5)), "2.5");
        assert_eq!(encode(json!(123.456)), "123.456");
    }

    #[test]
    fn test_exponent_forms() {
        assert_eq!(encode(json!(1e21)), "1e+21");
        assert_eq!(encode(json!(-1.5e300)), "-1.5e+300");
        assert_eq!(encode(json!(-3.420529233873726e102)), "-3.420529233873726e+102");
        assert_eq!(encode(json!(0.000001)), "0.000001");
        assert_eq!(encode(json!(1e-7)), "1e-7");
        assert_eq!(encode(json!(1.5e-7)), "1.5e-7");
        assert_eq!(encode(json!(5e-324)), "5e-324");
    }

    #[test]
    fn test_parsed_floats_reencode_exactly() {
        let d = Document::from_json(r#"{"rate":-3.420529233873726e102}"#).unwrap();
        assert_eq!(
            canonical_string(&d).unwrap(),
            r#"{"rate":-3.420529233873726e+102}"#
        );
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(encode(json!("a\"b\\c\n\u{1}")), r#""a\"b\\c\n\u0001""#);
        assert_eq!(encode(json!("ünï")), "\"ünï\"");
    }

    #[test]
    fn test_depth_limit() {
        let mut value = json!(0);
        for _ in 0..(MAX_DEPTH + 2) {
            value = json!([value]);
        }
        assert!(matches!(
            canonical_value_bytes(&value),
            Err(CoreError::EncodingError(_))
        ));
    }

    #[test]
    fn test_serialize_failure_is_encoding_error() {
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], 1);
        assert!(matches!(
            canonical_bytes_of(&bad),
            Err(CoreError::EncodingError(_))
        ));
    }

    #[test]
    fn test_input_not_mutated() {
        let d = doc(json!({"metadata": {"checksum": "x"}}));
        let before = d.clone();
        canonical_bytes(&d).unwrap();
        assert_eq!(d, before);
    }

    proptest! {
        #[test]
        fn prop_key_order_irrelevant(entries in prop::collection::btree_map("\\PC{0,8}", any::<i64>(), 0..16)) {
            let forward: Map<String, Value> =
                entries.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
            let backward: Map<String, Value> =
                entries.iter().rev().map(|(k, v)| (k.clone(), json!(v))).collect();
            prop_assert_eq!(
                canonical_bytes(&Document::from(forward)).unwrap(),
                canonical_bytes(&Document::from(backward)).unwrap()
            );
        }

        #[test]
        fn prop_output_parses_back(entries in prop::collection::btree_map("[a-z]{1,8}", any::<f64>(), 0..8)) {
            let map: Map<String, Value> = entries
                .into_iter()
                .filter_map(|(k, v)| Number::from_f64(v).map(|n| (k, Value::Number(n))))
                .collect();
            let bytes = canonical_bytes(&Document::from(map.clone())).unwrap();
            let parsed: Value = serde_json::from_slice(&bytes).unwrap();
            let parsed = parsed.as_object().unwrap();
            prop_assert_eq!(parsed.len(), map.len());
            for (k, v) in &map {
                prop_assert_eq!(parsed[k].as_f64(), v.as_f64());
            }
        }
    }
}
