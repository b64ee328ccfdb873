//! Attribute values and the document wire shape.

use crate::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The nested, field-named representation exchanged with callers.
///
/// Values may be scalars, arrays, or nested documents of the same shape.
pub type Document = serde_json::Map<String, Value>;

/// A value stored as a vertex or edge attribute.
///
/// Storage is schema-free but only accepts scalars and homogeneous string
/// arrays. Nested documents are never stored; they are materialized as
/// linked entities by the mapping layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    StringArray(Vec<String>),
}

impl AttrValue {
    /// Converts a document value into an attribute value.
    ///
    /// Returns `Ok(None)` for JSON null. Array elements are normalized to
    /// strings: null elements become the empty string, numbers and booleans
    /// are rendered as text. Nested documents and nested arrays are rejected.
    pub fn from_json(value: &Value) -> crate::Result<Option<Self>> {
        let converted = match value {
            Value::Null => return Ok(None),
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(match item {
                        Value::Null => String::new(),
                        Value::String(s) => s.clone(),
                        Value::Bool(b) => b.to_string(),
                        Value::Number(n) => n.to_string(),
                        Value::Array(_) | Value::Object(_) => {
                            return Err(Error::UnsupportedValue(
                                "nested value inside an array attribute".into(),
                            ));
                        }
                    });
                }
                Self::StringArray(out)
            }
            Value::Object(_) => {
                return Err(Error::UnsupportedValue(
                    "a nested document cannot be stored as an attribute".into(),
                ));
            }
        };
        Ok(Some(converted))
    }

    /// Converts the attribute into its document representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::String(s) => Value::String(s.clone()),
            Self::StringArray(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(items) => Some(items),
            _ => None,
        }
    }

    /// Returns every textual rendering of this value, one per array element
    /// for arrays. Used by substring and equality filters.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        match self {
            Self::Bool(b) => vec![b.to_string()],
            Self::Int(i) => vec![i.to_string()],
            Self::Float(f) => vec![f.to_string()],
            Self::String(s) => vec![s.clone()],
            Self::StringArray(items) => items.clone(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

/// Which incident edges of a vertex a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

impl Direction {
    /// The direction seen from the other end of the edge.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Outgoing => Self::Incoming,
            Self::Incoming => Self::Outgoing,
            Self::Both => Self::Both,
        }
    }
}
