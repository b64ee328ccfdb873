//! Relationship replacement: unlinking, orphan collection, cascading delete.
//!
//! An entity of a dependent kind has no lifetime of its own. Once its last
//! inbound edge is gone it is deleted, together with whatever it alone kept
//! alive. People and groups are never collected. A kind sustained by an
//! outgoing edge type is also deleted once its last such edge is gone.

use crate::MappingResult;
use socialgraph_graph::GraphStore;
use socialgraph_model::{EntityKind, Relation};
use socialgraph_types::{Direction, EdgeId, NodeId};
use tracing::debug;

/// Deletes every edge of `relation` incident to `node`, collecting the targets
/// that are left without inbound edges.
pub fn unlink_all<G: GraphStore + ?Sized>(
    graph: &mut G,
    node: NodeId,
    relation: &Relation,
) -> MappingResult<()> {
    for edge in graph.edges(node, relation.direction, Some(relation.edge)) {
        unlink_edge(graph, node, edge)?;
    }
    Ok(())
}

/// Deletes one edge seen from `from`, then collects its other end if orphaned.
pub fn unlink_edge<G: GraphStore + ?Sized>(
    graph: &mut G,
    from: NodeId,
    edge: EdgeId,
) -> MappingResult<()> {
    let record = graph.delete_edge(edge)?;
    let other = record.other_end(from);
    if other != from {
        collect_garbage(graph, other)?;
    }
    Ok(())
}

/// Deletes `node` if it is a dependent entity with no inbound edge left.
/// Returns whether it was deleted.
pub fn collect_garbage<G: GraphStore + ?Sized>(
    graph: &mut G,
    node: NodeId,
) -> MappingResult<bool> {
    if !graph.contains_node(node) {
        return Ok(false);
    }
    let dependent = graph
        .label(node)
        .and_then(EntityKind::from_label)
        .is_some_and(EntityKind::is_dependent);
    if !dependent || graph.degree(node, Direction::Incoming) > 0 {
        return Ok(false);
    }

    debug!(node = %node, "collecting orphaned entity");
    delete_entity(graph, node)?;
    Ok(true)
}

/// Deletes `node` if its kind is sustained by an outgoing edge type and no
/// such edge is left. Returns whether it was deleted.
pub fn collect_unsustained<G: GraphStore + ?Sized>(
    graph: &mut G,
    node: NodeId,
) -> MappingResult<bool> {
    if !graph.contains_node(node) {
        return Ok(false);
    }
    let Some(edge_type) = graph
        .label(node)
        .and_then(EntityKind::from_label)
        .and_then(EntityKind::sustained_by)
    else {
        return Ok(false);
    };
    if graph.first_edge(node, Direction::Outgoing, edge_type).is_some() {
        return Ok(false);
    }

    debug!(node = %node, edge = edge_type, "collecting unsustained entity");
    delete_entity(graph, node)?;
    Ok(true)
}

/// Deletes `node` and all its edges. Targets of its outgoing edges are
/// collected when nothing else links to them, and sources of its incoming
/// edges when they were sustained by that edge.
pub fn delete_entity<G: GraphStore + ?Sized>(graph: &mut G, node: NodeId) -> MappingResult<()> {
    for edge in graph.edges(node, Direction::Incoming, None) {
        if graph.edge(edge).is_some() {
            let record = graph.delete_edge(edge)?;
            if record.source != node {
                collect_unsustained(graph, record.source)?;
            }
        }
    }

    for edge in graph.edges(node, Direction::Outgoing, None) {
        if graph.edge(edge).is_some() {
            unlink_edge(graph, node, edge)?;
        }
    }

    graph.delete_node(node)?;
    Ok(())
}
