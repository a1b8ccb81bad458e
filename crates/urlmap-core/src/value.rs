//! Closed value tree for metadata rewriting.

use serde_json::Value;

/// A metadata value as seen by the structural rewriter.
///
/// Records decoded from stored JSON list their fields sorted by key. Scalars
/// that are not strings (numbers, booleans, null) are carried as
/// [`MetaValue::Other`] and never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    String(String),
    Sequence(Vec<MetaValue>),
    Record(Vec<(String, MetaValue)>),
    Other(Value),
}

impl MetaValue {
    /// Decodes a raw stored row.
    ///
    /// Rows holding a JSON array, object, or string literal are decoded;
    /// anything else is taken verbatim as a plain string.
    pub fn decode_stored(raw: &str) -> Self {
        match parse_structured(raw) {
            Some(value) => MetaValue::from(value),
            None => MetaValue::String(raw.to_string()),
        }
    }

    /// Encodes the value for storage; inverse of [`MetaValue::decode_stored`].
    ///
    /// Plain strings are stored verbatim unless they would decode as
    /// structured data, in which case they are stored as a JSON string.
    pub fn encode_for_storage(&self) -> String {
        match self {
            MetaValue::String(s) if parse_structured(s).is_none() => s.clone(),
            other => Value::from(other.clone()).to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }
}

fn parse_structured(raw: &str) -> Option<Value> {
    let trimmed = raw.trim_start();
    if !trimmed.starts_with(['[', '{', '"']) {
        return None;
    }
    serde_json::from_str::<Value>(raw).ok()
}

impl From<Value> for MetaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => MetaValue::String(s),
            Value::Array(items) => MetaValue::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(fields) => MetaValue::Record(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, MetaValue::from(v)))
                    .collect(),
            ),
            other => MetaValue::Other(other),
        }
    }
}

impl From<MetaValue> for Value {
    fn from(value: MetaValue) -> Self {
        match value {
            MetaValue::String(s) => Value::String(s),
            MetaValue::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            MetaValue::Record(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
            MetaValue::Other(v) => v,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::String(s.to_string())
    }
}
