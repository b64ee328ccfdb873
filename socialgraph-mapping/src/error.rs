//! Error types for the mapping layer.

use socialgraph_graph::GraphError;
use socialgraph_types::NodeId;
use thiserror::Error;

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Errors that can occur while projecting or synchronizing entities.
///
/// Absent optional data is never an error: projections omit the field.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Error from the underlying graph store.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// The entity handed to a projector or synchronizer does not exist.
    #[error("entity {0} does not exist")]
    MissingEntity(NodeId),

    /// An input value has a shape the field cannot store.
    #[error("invalid value for field `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl MappingError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
