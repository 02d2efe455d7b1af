//! The embedded signature record stored at `metadata.signature`.
//!
//! The record is JSON-encoded into a string:
//!
//! ```json
//! {"algorithm":"ES256","signature":"<base64>","publicKey":"-----BEGIN PUBLIC KEY-----...","keyId":"ops-2026","timestamp":"2026-01-12T09:30:00.000Z"}
//! ```
//!
//! Optional fields are omitted when absent.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use ratecard_seal_core::{CoreError, Document};

use crate::algorithm::Algorithm;
use crate::error::KeyError;

/// Signature record embedded in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    /// Algorithm identifier, e.g. `RS256`.
    pub algorithm: String,
    /// Raw signature, standard base64.
    pub signature: String,
    /// Signer's SPKI PEM public key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Caller-chosen key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    /// RFC 3339 signing time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SignatureInfo {
    /// Parse the record's algorithm identifier.
    pub fn algorithm(&self) -> Result<Algorithm, KeyError> {
        self.algorithm.parse()
    }

    /// Decode the base64 signature.
    pub fn signature_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.signature)
    }

    /// Parse the signing time, if present and well-formed.
    pub fn signed_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Encode to the string stored in the document.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// Parse from the stored string.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read the record from a document.
    ///
    /// `Ok(None)` when the document is unsigned.
    pub fn from_document(document: &Document) -> Result<Option<Self>, CoreError> {
        match document.signature() {
            None => Ok(None),
            Some(serde_json::Value::String(text)) => Self::from_json(text).map(Some),
            Some(_) => Err(CoreError::ParseError(
                "metadata.signature must be a string".into(),
            )),
        }
    }
}

/// Current time in the record's timestamp format.
pub(crate) fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record() -> SignatureInfo {
        SignatureInfo {
            algorithm: "ES256".into(),
            signature: "AAEC".into(),
            public_key: None,
            key_id: Some("ops".into()),
            timestamp: Some("2026-01-12T09:30:00.000Z".into()),
        }
    }

    #[test]
    fn test_field_order_and_omission() {
        assert_eq!(
            record().to_json().unwrap(),
            r#"{"algorithm":"ES256","signature":"AAEC","keyId":"ops","timestamp":"2026-01-12T09:30:00.000Z"}"#
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let r = record();
        assert_eq!(SignatureInfo::from_json(&r.to_json().unwrap()).unwrap(), r);
    }

    #[test]
    fn test_accessors() {
        let r = record();
        assert_eq!(r.algorithm().unwrap(), Algorithm::ES256);
        assert_eq!(r.signature_bytes().unwrap(), vec![0, 1, 2]);
        assert_eq!(
            r.signed_at().unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(at), "2026-01-12T09:30:00.000Z");
    }

    #[test]
    fn test_from_document() {
        let unsigned = Document::from_value(json!({"a": 1})).unwrap();
        assert!(SignatureInfo::from_document(&unsigned).unwrap().is_none());

        let bad = Document::from_value(json!({"metadata": {"signature": 5}})).unwrap();
        assert!(SignatureInfo::from_document(&bad).is_err());

        let signed = Document::from_value(json!({
            "metadata": {"signature": record().to_json().unwrap()}
        }))
        .unwrap();
        assert_eq!(SignatureInfo::from_document(&signed).unwrap(), Some(record()));
    }
}
