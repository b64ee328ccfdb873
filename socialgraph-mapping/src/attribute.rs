//! Attribute codec: scalar and array attributes of a single vertex or edge.
//!
//! Knows nothing about relationships. Converts between document values and
//! stored [`AttrValue`]s and applies the null-write policy of the caller.

use crate::{MappingError, MappingResult};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_model::NullPolicy;
use socialgraph_types::{AttrValue, Document, EdgeId, NodeId};

/// Reads one attribute as a document value.
pub fn read<G: GraphStore + ?Sized>(graph: &G, node: NodeId, key: &str) -> Option<Value> {
    graph.attribute(node, key).map(AttrValue::to_json)
}

/// Copies every attribute of `node` into `doc`.
pub fn copy_all<G: GraphStore + ?Sized>(
    graph: &G,
    node: NodeId,
    doc: &mut Document,
) -> MappingResult<()> {
    for (key, value) in graph.attributes(node)? {
        doc.insert(key.clone(), value.to_json());
    }
    Ok(())
}

/// Writes a scalar (or array) attribute.
///
/// A null value is handled by `policy`: ignored, or the attribute is removed.
pub fn write<G: GraphStore + ?Sized>(
    graph: &mut G,
    node: NodeId,
    key: &str,
    value: &Value,
    policy: NullPolicy,
) -> MappingResult<()> {
    match convert(key, value)? {
        Some(converted) => graph.set_attribute(node, key, converted)?,
        None => clear_on_null(graph, node, key, policy)?,
    }
    Ok(())
}

/// Writes an array attribute.
///
/// A non-empty array is stored, an empty array removes the attribute, and a
/// lone scalar is stored as a one-element array.
pub fn write_array<G: GraphStore + ?Sized>(
    graph: &mut G,
    node: NodeId,
    key: &str,
    value: &Value,
    policy: NullPolicy,
) -> MappingResult<()> {
    match value {
        Value::Null => clear_on_null(graph, node, key, policy)?,
        Value::Array(items) if items.is_empty() => {
            graph.remove_attribute(node, key)?;
        }
        Value::Array(_) => {
            if let Some(converted) = convert(key, value)? {
                graph.set_attribute(node, key, converted)?;
            }
        }
        Value::Object(_) => {
            return Err(MappingError::invalid(key, "expected an array"));
        }
        scalar => {
            let wrapped = Value::Array(vec![scalar.clone()]);
            if let Some(converted) = convert(key, &wrapped)? {
                graph.set_attribute(node, key, converted)?;
            }
        }
    }
    Ok(())
}

/// Writes an attribute onto an edge. Null removes it.
pub fn write_edge<G: GraphStore + ?Sized>(
    graph: &mut G,
    edge: EdgeId,
    key: &str,
    value: &Value,
) -> MappingResult<()> {
    match convert(key, value)? {
        Some(converted) => graph.set_edge_attribute(edge, key, converted)?,
        None => {
            graph.remove_edge_attribute(edge, key)?;
        }
    }
    Ok(())
}

/// Reads a string array from a document value, normalizing null elements to
/// empty strings. A lone string is a one-element array.
pub(crate) fn string_array(key: &str, value: &Value) -> MappingResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(_) => match convert(key, value)? {
            Some(AttrValue::StringArray(items)) => Ok(items),
            _ => Ok(Vec::new()),
        },
        _ => Err(MappingError::invalid(key, "expected an array of strings")),
    }
}

/// Checks that `value` can be stored as an attribute, without touching the graph.
pub(crate) fn check(key: &str, value: &Value) -> MappingResult<()> {
    convert(key, value).map(drop)
}

fn convert(key: &str, value: &Value) -> MappingResult<Option<AttrValue>> {
    AttrValue::from_json(value).map_err(|e| MappingError::invalid(key, e.to_string()))
}

fn clear_on_null<G: GraphStore + ?Sized>(
    graph: &mut G,
    node: NodeId,
    key: &str,
    policy: NullPolicy,
) -> MappingResult<()> {
    if policy == NullPolicy::ClearOnNull {
        graph.remove_attribute(node, key)?;
    }
    Ok(())
}
