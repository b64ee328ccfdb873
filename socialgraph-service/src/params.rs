//! Decoding of positional operation arguments.
//!
//! Every argument arrives as a JSON value bound by parameter name; an absent
//! parameter is `null`.

use crate::{ServiceError, ServiceResult};
use serde_json::Value;
use socialgraph_mapping::FieldSelection;
use socialgraph_types::Document;

/// A required, non-empty string (numbers are accepted as their text).
pub fn string(value: &Value, name: &str) -> ServiceResult<String> {
    optional_string(value, name)?.ok_or_else(|| ServiceError::MissingParameter(name.to_string()))
}

/// An optional string. Null and blank strings are absent.
pub fn optional_string(value: &Value, name: &str) -> ServiceResult<Option<String>> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(ServiceError::invalid(name, "expected a string")),
    };
    Ok((!text.is_empty()).then_some(text))
}

/// A list of ids: an array of strings, a comma-separated string, or null
/// (empty list).
pub fn ids(value: &Value, name: &str) -> ServiceResult<Vec<String>> {
    let ids: Vec<String> = match value {
        Value::Null => Vec::new(),
        Value::String(s) => s.split(',').map(|id| id.trim().to_string()).collect(),
        Value::Array(items) => {
            let mut ids = Vec::with_capacity(items.len());
            for item in items {
                if let Some(id) = optional_string(item, name)? {
                    ids.push(id);
                }
            }
            ids
        }
        _ => return Err(ServiceError::invalid(name, "expected a list of ids")),
    };
    Ok(ids.into_iter().filter(|id| !id.is_empty()).collect())
}

/// A required input document.
pub fn document(value: &Value, name: &str) -> ServiceResult<Document> {
    match value {
        Value::Object(doc) => Ok(doc.clone()),
        Value::Null => Err(ServiceError::MissingParameter(name.to_string())),
        _ => Err(ServiceError::invalid(name, "expected an object")),
    }
}

/// An optional options document; null is empty.
pub fn options(value: &Value, name: &str) -> ServiceResult<Document> {
    match value {
        Value::Null => Ok(Document::new()),
        _ => document(value, name),
    }
}

/// The requested-field list.
pub fn fields(value: &Value) -> FieldSelection {
    FieldSelection::from_value(value)
}
