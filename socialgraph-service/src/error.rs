//! Error types for the operation surface.

use socialgraph_graph::GraphError;
use socialgraph_mapping::MappingError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur while serving an operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Error from the mapping layer.
    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Error from the graph store.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// A referenced entity does not exist.
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },

    /// A required parameter was absent or null.
    #[error("missing parameter `{0}`")]
    MissingParameter(String),

    /// A parameter had an unusable shape or value.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// No operation is registered under the requested name.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    /// The request conflicts with existing state (e.g. a duplicate id).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid configuration or logging setup.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
