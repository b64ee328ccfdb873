//! The graph engine seam.
//!
//! The mapping layer never talks to a concrete engine. It receives a
//! `GraphStore` and performs bounded, synchronous traversals and writes
//! through it, inside whatever unit of work the caller opened.

use crate::GraphResult;
use socialgraph_types::{AttrValue, Direction, EdgeId, NodeId};
use std::collections::BTreeMap;

/// Attribute map of a vertex or edge.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A directed, typed edge together with its own attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub edge_type: String,
    pub attributes: Attributes,
}

impl EdgeRecord {
    /// Returns the endpoint that is not `node`. For self-loops, returns `node`.
    #[must_use]
    pub fn other_end(&self, node: NodeId) -> NodeId {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

/// Vertex/edge storage plus entity resolution.
///
/// Vertices carry a label naming the entity kind they were created for. The
/// label is only used for resolution (`find_node`, `nodes_with_label`); the
/// attribute map itself is schema-free.
pub trait GraphStore {
    // ── Vertices ─────────────────────────────────────────────────

    /// Creates an empty vertex with the given label.
    fn create_node(&mut self, label: &str) -> NodeId;

    /// Deletes a vertex. Fails with `NodeHasEdges` while any edge is attached.
    fn delete_node(&mut self, node: NodeId) -> GraphResult<()>;

    fn contains_node(&self, node: NodeId) -> bool;

    fn label(&self, node: NodeId) -> Option<&str>;

    fn attributes(&self, node: NodeId) -> GraphResult<&Attributes>;

    fn set_attribute(&mut self, node: NodeId, key: &str, value: AttrValue) -> GraphResult<()>;

    /// Removes an attribute, returning the previous value if there was one.
    fn remove_attribute(&mut self, node: NodeId, key: &str) -> GraphResult<Option<AttrValue>>;

    // ── Edges ────────────────────────────────────────────────────

    fn create_edge(&mut self, source: NodeId, target: NodeId, edge_type: &str)
    -> GraphResult<EdgeId>;

    /// Deletes an edge and returns what it was.
    fn delete_edge(&mut self, edge: EdgeId) -> GraphResult<EdgeRecord>;

    fn edge(&self, edge: EdgeId) -> Option<&EdgeRecord>;

    /// Incident edges of `node` in creation order, optionally restricted to
    /// one edge type. `Direction::Both` lists outgoing edges before incoming
    /// ones and reports a self-loop once.
    fn edges(&self, node: NodeId, direction: Direction, edge_type: Option<&str>) -> Vec<EdgeId>;

    fn set_edge_attribute(&mut self, edge: EdgeId, key: &str, value: AttrValue)
    -> GraphResult<()>;

    fn remove_edge_attribute(&mut self, edge: EdgeId, key: &str)
    -> GraphResult<Option<AttrValue>>;

    // ── Resolution ───────────────────────────────────────────────

    /// All vertices carrying `label`, in creation order.
    fn nodes_with_label(&self, label: &str) -> Vec<NodeId>;

    /// First vertex with `label` whose attribute `key` equals `value`.
    fn find_node(&self, label: &str, key: &str, value: &AttrValue) -> Option<NodeId> {
        self.nodes_with_label(label)
            .into_iter()
            .find(|node| self.attribute(*node, key) == Some(value))
    }

    // ── Provided helpers ─────────────────────────────────────────

    fn attribute(&self, node: NodeId, key: &str) -> Option<&AttrValue> {
        self.attributes(node).ok()?.get(key)
    }

    fn edge_attribute(&self, edge: EdgeId, key: &str) -> Option<&AttrValue> {
        self.edge(edge)?.attributes.get(key)
    }

    /// First incident edge of the given type, if any.
    fn first_edge(&self, node: NodeId, direction: Direction, edge_type: &str) -> Option<EdgeId> {
        self.edges(node, direction, Some(edge_type)).into_iter().next()
    }

    /// Number of incident edges of any type.
    fn degree(&self, node: NodeId, direction: Direction) -> usize {
        self.edges(node, direction, None).len()
    }

    /// Vertices at the other end of the matching edges, in edge order.
    fn neighbors(&self, node: NodeId, direction: Direction, edge_type: &str) -> Vec<NodeId> {
        self.edges(node, direction, Some(edge_type))
            .into_iter()
            .filter_map(|edge| self.edge(edge).map(|record| record.other_end(node)))
            .collect()
    }

    /// Returns the edge of `edge_type` from `source` to `target`, if one exists.
    fn edge_between(&self, source: NodeId, target: NodeId, edge_type: &str) -> Option<EdgeId> {
        self.edges(source, Direction::Outgoing, Some(edge_type))
            .into_iter()
            .find(|edge| self.edge(*edge).is_some_and(|record| record.target == target))
    }
}
