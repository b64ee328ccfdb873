//! Error types for the graph layer.

use socialgraph_types::{EdgeId, NodeId};
use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur in graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Vertex does not exist (never created, or already deleted).
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Edge does not exist.
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// A vertex can only be deleted once all its edges are gone.
    #[error("node {0} still has incident edges")]
    NodeHasEdges(NodeId),
}
