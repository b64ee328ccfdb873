//! List-field codec.
//!
//! A list field (emails, phone numbers, instant messengers, photos) is a list
//! of typed values with an optional primary index. It is stored as parallel
//! `value` and `type` string arrays plus an optional `primary` integer on one
//! companion vertex, linked from the owner by a dedicated edge type.
//!
//! Invariant: `value` and `type` always have equal length, and `primary`,
//! when stored, indexes into them. Inputs violating this are repaired.

use crate::attribute::string_array;
use crate::{MappingError, MappingResult};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_model::EntityKind;
use socialgraph_types::{AttrValue, Direction, Document, NodeId};
use tracing::warn;

pub const VALUE: &str = "value";
pub const TYPE: &str = "type";
pub const PRIMARY: &str = "primary";

/// Returns the companion vertex of a list field, if it was ever written.
pub fn companion<G: GraphStore + ?Sized>(graph: &G, owner: NodeId, edge: &str) -> Option<NodeId> {
    let edge = graph.first_edge(owner, Direction::Outgoing, edge)?;
    graph.edge(edge).map(|record| record.target)
}

/// Decodes a list field. Returns `None` when no `value` array is stored.
pub fn decode<G: GraphStore + ?Sized>(graph: &G, owner: NodeId, edge: &str) -> Option<Document> {
    let companion = companion(graph, owner, edge)?;
    let value = graph.attribute(companion, VALUE)?;

    let mut doc = Document::new();
    doc.insert(VALUE.into(), value.to_json());
    if let Some(types) = graph.attribute(companion, TYPE) {
        doc.insert(TYPE.into(), types.to_json());
    }
    if let Some(primary) = graph.attribute(companion, PRIMARY) {
        doc.insert(PRIMARY.into(), primary.to_json());
    }
    Some(doc)
}

/// Encodes a list field from its document form.
///
/// A missing, null, or empty `value` array clears the field. Otherwise `type`
/// is padded with empty strings (or truncated) to the length of `value`, and
/// `primary` is stored only if it indexes into `value`.
pub fn encode<G: GraphStore + ?Sized>(
    graph: &mut G,
    owner: NodeId,
    edge: &str,
    input: &Document,
) -> MappingResult<()> {
    let values = match input.get(VALUE) {
        Some(value) => string_array(VALUE, value)?,
        None => Vec::new(),
    };
    if values.is_empty() {
        return clear(graph, owner, edge);
    }

    let mut types = match input.get(TYPE) {
        Some(value) => string_array(TYPE, value)?,
        None => Vec::new(),
    };
    if types.len() != values.len() {
        warn!(
            field = edge,
            values = values.len(),
            types = types.len(),
            "resizing list field types"
        );
        types.resize(values.len(), String::new());
    }

    let primary = match input.get(PRIMARY) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let index = primary_index(value)?;
            if usize::try_from(index).is_ok_and(|i| i < values.len()) {
                Some(index)
            } else {
                warn!(field = edge, index, "dropping out-of-range primary index");
                None
            }
        }
    };

    let companion = match companion(graph, owner, edge) {
        Some(existing) => existing,
        None => {
            let created = graph.create_node(EntityKind::ListField.label());
            graph.create_edge(owner, created, edge)?;
            created
        }
    };

    graph.set_attribute(companion, VALUE, AttrValue::StringArray(values))?;
    graph.set_attribute(companion, TYPE, AttrValue::StringArray(types))?;
    match primary {
        Some(index) => graph.set_attribute(companion, PRIMARY, AttrValue::Int(index))?,
        None => {
            graph.remove_attribute(companion, PRIMARY)?;
        }
    }
    Ok(())
}

/// Removes all three stored attributes. The companion vertex is kept.
pub fn clear<G: GraphStore + ?Sized>(
    graph: &mut G,
    owner: NodeId,
    edge: &str,
) -> MappingResult<()> {
    if let Some(companion) = companion(graph, owner, edge) {
        for key in [VALUE, TYPE, PRIMARY] {
            graph.remove_attribute(companion, key)?;
        }
    }
    Ok(())
}

/// Checks that `input` can be encoded, without touching the graph.
pub fn check(input: &Document) -> MappingResult<()> {
    for key in [VALUE, TYPE] {
        if let Some(value) = input.get(key) {
            string_array(key, value)?;
        }
    }
    match input.get(PRIMARY) {
        None | Some(Value::Null) => Ok(()),
        Some(value) => primary_index(value).map(drop),
    }
}

fn primary_index(value: &Value) -> MappingResult<i64> {
    AttrValue::from_json(value)
        .ok()
        .flatten()
        .and_then(|v| v.as_i64())
        .ok_or_else(|| MappingError::invalid(PRIMARY, "expected an integer index"))
}
