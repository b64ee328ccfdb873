//! Filtering engines over already-materialized candidate lists.
//!
//! Every filter retains candidates in place and preserves their relative
//! order. An incomplete filter specification filters nothing.

use crate::list_field;
use socialgraph_graph::GraphStore;
use socialgraph_model::{EntityKind, FieldKind, edges};
use socialgraph_types::{AttrValue, Direction, Document, NodeId};
use std::collections::HashSet;
use tracing::debug;

pub const FILTER_FIELD: &str = "filterField";
pub const FILTER_VALUE: &str = "filterValue";
pub const FILTER_OPERATION: &str = "filterOperation";

/// How a filter value is compared against stored text. Case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperation {
    Equals,
    Contains,
}

impl FilterOperation {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equals" => Some(Self::Equals),
            "contains" => Some(Self::Contains),
            _ => None,
        }
    }

    /// Both arguments are expected lowercased.
    fn matches(self, text: &str, needle: &str) -> bool {
        match self {
            Self::Equals => text == needle,
            Self::Contains => text.contains(needle),
        }
    }
}

/// The recognized filter keys of a collection options document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub field: String,
    pub value: String,
    pub operation: Option<FilterOperation>,
}

impl FilterSpec {
    /// Reads `filterField`, `filterValue` and `filterOperation`. Returns `None`
    /// when the field or the value is missing.
    pub fn from_options(options: &Document) -> Option<Self> {
        let field = options.get(FILTER_FIELD)?.as_str()?.trim();
        let value = match options.get(FILTER_VALUE)? {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        if field.is_empty() || value.is_empty() {
            return None;
        }
        let operation = options
            .get(FILTER_OPERATION)
            .and_then(serde_json::Value::as_str)
            .and_then(FilterOperation::parse);
        Some(Self {
            field: field.to_string(),
            value,
            operation,
        })
    }
}

/// Resolves a person list-field name (`emails`, `phoneNumbers`, `ims`,
/// `photos`) to the edge type of its companion.
pub fn list_field_edge(field: &str) -> Option<&'static str> {
    match EntityKind::Person.schema().field(field)?.kind {
        FieldKind::ListField { edge } => Some(edge),
        _ => None,
    }
}

/// Retains candidates whose list field matches the filter value.
///
/// Unknown fields, a missing operation, or an empty value filter nothing.
pub fn filter_by_list_field<G: GraphStore + ?Sized>(
    graph: &G,
    candidates: &mut Vec<NodeId>,
    spec: &FilterSpec,
) {
    let (Some(edge), Some(operation)) = (list_field_edge(&spec.field), spec.operation) else {
        debug!(field = %spec.field, "list-field filter not applicable");
        return;
    };
    let needle = spec.value.to_lowercase();
    if needle.is_empty() {
        return;
    }

    candidates.retain(|candidate| {
        list_field::companion(graph, *candidate, edge)
            .and_then(|companion| graph.attribute(companion, list_field::VALUE))
            .is_some_and(|value| matches_value(value, &needle, operation))
    });
}

/// Where the free-text filter looks, beyond the candidate's own attributes.
#[derive(Debug, Clone, Copy)]
pub struct FreeTextScope {
    /// Edges to linked address entities; every attribute is searched.
    pub address_edges: &'static [&'static str],
    /// Edges to list-field companions; `type` and `value` are searched.
    pub companion_edges: &'static [&'static str],
    /// Affiliation edges; the edge's and the target's attributes are searched.
    pub affiliation_edges: &'static [&'static str],
}

impl FreeTextScope {
    pub const PERSON: Self = Self {
        address_edges: &[edges::LIVES_AT, edges::LOCATED_AT],
        companion_edges: &[edges::EMAILS, edges::PHONE_NUMBERS],
        affiliation_edges: &[edges::AFFILIATED],
    };
}

/// Retains candidates where `text` occurs, case-insensitively, in their own
/// attributes or in their linked addresses, contact companions, or
/// affiliations. Blank text filters nothing.
pub fn filter_free_text<G: GraphStore + ?Sized>(
    graph: &G,
    candidates: &mut Vec<NodeId>,
    text: &str,
    scope: &FreeTextScope,
) {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return;
    }
    candidates.retain(|candidate| matches_free_text(graph, *candidate, &needle, scope));
}

/// Retains the anchor itself and the targets of its outgoing `edge_type`
/// edges.
pub fn filter_adjacent<G: GraphStore + ?Sized>(
    graph: &G,
    candidates: &mut Vec<NodeId>,
    anchor: NodeId,
    edge_type: &str,
) {
    let mut allowed: HashSet<NodeId> = graph
        .neighbors(anchor, Direction::Outgoing, edge_type)
        .into_iter()
        .collect();
    allowed.insert(anchor);
    candidates.retain(|candidate| allowed.contains(candidate));
}

fn matches_free_text<G: GraphStore + ?Sized>(
    graph: &G,
    node: NodeId,
    needle: &str,
    scope: &FreeTextScope,
) -> bool {
    if any_attribute_matches(graph, node, needle) {
        return true;
    }

    let address_hit = scope.address_edges.iter().any(|edge| {
        graph
            .neighbors(node, Direction::Outgoing, edge)
            .into_iter()
            .any(|address| any_attribute_matches(graph, address, needle))
    });
    if address_hit {
        return true;
    }

    let companion_hit = scope.companion_edges.iter().any(|edge| {
        list_field::companion(graph, node, edge).is_some_and(|companion| {
            [list_field::TYPE, list_field::VALUE].into_iter().any(|key| {
                graph
                    .attribute(companion, key)
                    .is_some_and(|v| matches_value(v, needle, FilterOperation::Contains))
            })
        })
    });
    if companion_hit {
        return true;
    }

    scope.affiliation_edges.iter().any(|edge_type| {
        graph
            .edges(node, Direction::Outgoing, Some(*edge_type))
            .into_iter()
            .filter_map(|edge| graph.edge(edge))
            .any(|record| {
                record
                    .attributes
                    .values()
                    .any(|v| matches_value(v, needle, FilterOperation::Contains))
                    || any_attribute_matches(graph, record.target, needle)
            })
    })
}

fn any_attribute_matches<G: GraphStore + ?Sized>(graph: &G, node: NodeId, needle: &str) -> bool {
    graph.attributes(node).is_ok_and(|attributes| {
        attributes
            .values()
            .any(|v| matches_value(v, needle, FilterOperation::Contains))
    })
}

/// Scalars match on their text; arrays match if any element does.
fn matches_value(value: &AttrValue, needle: &str, operation: FilterOperation) -> bool {
    value
        .texts()
        .iter()
        .any(|text| operation.matches(&text.to_lowercase(), needle))
}
