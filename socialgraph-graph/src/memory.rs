//! Arena-backed in-memory property graph.

use crate::store::{Attributes, EdgeRecord, GraphStore};
use crate::{GraphError, GraphResult};
use socialgraph_types::{AttrValue, Direction, EdgeId, NodeId};
use std::collections::BTreeMap;
use tracing::trace;

#[derive(Debug, Clone, Default)]
struct NodeSlot {
    label: String,
    attributes: Attributes,
    outgoing: Vec<EdgeId>,
    incoming: Vec<EdgeId>,
}

/// In-memory `GraphStore`.
///
/// Vertices and edges live in id-keyed arenas. Ids are allocated from
/// monotonically increasing counters, so iteration order equals creation
/// order and deleted ids are never handed out again.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: BTreeMap<NodeId, NodeSlot>,
    edges: BTreeMap<EdgeId, EdgeRecord>,
    next_node: u64,
    next_edge: u64,
}

impl MemoryGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn slot(&self, node: NodeId) -> GraphResult<&NodeSlot> {
        self.nodes.get(&node).ok_or(GraphError::NodeNotFound(node))
    }

    fn slot_mut(&mut self, node: NodeId) -> GraphResult<&mut NodeSlot> {
        self.nodes.get_mut(&node).ok_or(GraphError::NodeNotFound(node))
    }
}

impl GraphStore for MemoryGraph {
    fn create_node(&mut self, label: &str) -> NodeId {
        self.next_node += 1;
        let id = NodeId::new(self.next_node);
        self.nodes.insert(
            id,
            NodeSlot {
                label: label.to_string(),
                ..NodeSlot::default()
            },
        );
        trace!(node = %id, label, "node created");
        id
    }

    fn delete_node(&mut self, node: NodeId) -> GraphResult<()> {
        let slot = self.slot(node)?;
        if !slot.outgoing.is_empty() || !slot.incoming.is_empty() {
            return Err(GraphError::NodeHasEdges(node));
        }
        self.nodes.remove(&node);
        trace!(node = %node, "node deleted");
        Ok(())
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn label(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|slot| slot.label.as_str())
    }

    fn attributes(&self, node: NodeId) -> GraphResult<&Attributes> {
        Ok(&self.slot(node)?.attributes)
    }

    fn set_attribute(&mut self, node: NodeId, key: &str, value: AttrValue) -> GraphResult<()> {
        self.slot_mut(node)?.attributes.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeId, key: &str) -> GraphResult<Option<AttrValue>> {
        Ok(self.slot_mut(node)?.attributes.remove(key))
    }

    fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: &str,
    ) -> GraphResult<EdgeId> {
        self.slot(source)?;
        self.slot(target)?;

        self.next_edge += 1;
        let id = EdgeId::new(self.next_edge);
        self.edges.insert(
            id,
            EdgeRecord {
                id,
                source,
                target,
                edge_type: edge_type.to_string(),
                attributes: Attributes::new(),
            },
        );
        self.slot_mut(source)?.outgoing.push(id);
        self.slot_mut(target)?.incoming.push(id);
        trace!(edge = %id, %source, %target, edge_type, "edge created");
        Ok(id)
    }

    fn delete_edge(&mut self, edge: EdgeId) -> GraphResult<EdgeRecord> {
        let record = self.edges.remove(&edge).ok_or(GraphError::EdgeNotFound(edge))?;
        if let Some(slot) = self.nodes.get_mut(&record.source) {
            slot.outgoing.retain(|e| *e != edge);
        }
        if let Some(slot) = self.nodes.get_mut(&record.target) {
            slot.incoming.retain(|e| *e != edge);
        }
        trace!(edge = %edge, "edge deleted");
        Ok(record)
    }

    fn edge(&self, edge: EdgeId) -> Option<&EdgeRecord> {
        self.edges.get(&edge)
    }

    fn edges(&self, node: NodeId, direction: Direction, edge_type: Option<&str>) -> Vec<EdgeId> {
        let Some(slot) = self.nodes.get(&node) else {
            return Vec::new();
        };

        let candidates: Vec<EdgeId> = match direction {
            Direction::Outgoing => slot.outgoing.clone(),
            Direction::Incoming => slot.incoming.clone(),
            Direction::Both => {
                let mut all = slot.outgoing.clone();
                all.extend(slot.incoming.iter().filter(|e| !slot.outgoing.contains(e)));
                all
            }
        };

        match edge_type {
            None => candidates,
            Some(wanted) => candidates
                .into_iter()
                .filter(|e| self.edges.get(e).is_some_and(|r| r.edge_type == wanted))
                .collect(),
        }
    }

    fn set_edge_attribute(&mut self, edge: EdgeId, key: &str, value: AttrValue) -> GraphResult<()> {
        let record = self.edges.get_mut(&edge).ok_or(GraphError::EdgeNotFound(edge))?;
        record.attributes.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_edge_attribute(&mut self, edge: EdgeId, key: &str) -> GraphResult<Option<AttrValue>> {
        let record = self.edges.get_mut(&edge).ok_or(GraphError::EdgeNotFound(edge))?;
        Ok(record.attributes.remove(key))
    }

    fn nodes_with_label(&self, label: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, slot)| slot.label == label)
            .map(|(id, _)| *id)
            .collect()
    }
}
