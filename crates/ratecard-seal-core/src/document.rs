//! Document: a JSON object that may carry proof of itself.
//!
//! A document is an arbitrary JSON object. Two paths are reserved for
//! integrity artifacts:
//! - `metadata.checksum`: SHA-256 of the canonical form (lowercase hex)
//! - `metadata.signature`: a JSON-encoded signature record
//!
//! All mutating helpers take `&self` and return a new document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{CoreError, Result};

/// Top-level key holding integrity metadata.
pub const METADATA_KEY: &str = "metadata";

/// Metadata key holding the checksum.
pub const CHECKSUM_KEY: &str = "checksum";

/// Metadata key holding the serialized signature record.
pub const SIGNATURE_KEY: &str = "signature";

/// A rate card document (a JSON object).
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value. The value must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::MalformedDocument(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Serialize to compact JSON text (insertion order, not canonical).
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Serialize to indented JSON text.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Consume into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Get a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Return a copy with a top-level field set.
    pub fn with_field(&self, key: impl Into<String>, value: Value) -> Self {
        let mut copy = self.0.clone();
        copy.insert(key.into(), value);
        Self(copy)
    }

    /// The `metadata` object, if present and an object.
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.0.get(METADATA_KEY).and_then(Value::as_object)
    }

    /// The stored checksum, if present and a string.
    pub fn checksum(&self) -> Option<&str> {
        self.metadata()
            .and_then(|m| m.get(CHECKSUM_KEY))
            .and_then(Value::as_str)
    }

    /// The raw stored signature value, if present.
    pub fn signature(&self) -> Option<&Value> {
        self.metadata().and_then(|m| m.get(SIGNATURE_KEY))
    }

    /// Return a copy with `metadata.<key>` set, keeping other metadata.
    ///
    /// Creates `metadata` when absent. Fails if `metadata` exists but is not
    /// an object.
    pub fn with_metadata_field(&self, key: &str, value: Value) -> Result<Self> {
        let mut copy = self.0.clone();
        match copy.get_mut(METADATA_KEY) {
            Some(Value::Object(meta)) => {
                meta.insert(key.to_string(), value);
            }
            Some(other) => {
                return Err(CoreError::MalformedDocument(format!(
                    "metadata must be an object, got {}",
                    kind_of(other)
                )));
            }
            None => {
                let mut meta = Map::new();
                meta.insert(key.to_string(), value);
                copy.insert(METADATA_KEY.to_string(), Value::Object(meta));
            }
        }
        Ok(Self(copy))
    }

    /// Return a copy without `metadata.<key>`.
    ///
    /// The rest of `metadata` is preserved, even when it becomes empty.
    pub fn without_metadata_field(&self, key: &str) -> Self {
        let mut copy = self.0.clone();
        if let Some(Value::Object(meta)) = copy.get_mut(METADATA_KEY) {
            meta.shift_remove(key);
        }
        Self(copy)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document({})", self.to_json())
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Document {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
