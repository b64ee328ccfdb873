//! Core type definitions for the social graph mapping layer.
//!
//! This crate defines the fundamental, kind-agnostic types shared by every
//! layer above the graph engine:
//! - Vertex and edge identifiers (stable arena indices) and external ids (UUID v7)
//! - Attribute values as stored on vertices and edges
//! - The [`Document`] wire shape exchanged with callers
//! - Edge traversal [`Direction`]
//!
//! Entity kinds and their field tables live in `socialgraph-model`, not here.

mod ids;
mod value;

pub use ids::{EdgeId, ExternalId, NodeId};
pub use value::{AttrValue, Direction, Document};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unsupported attribute value: {0}")]
    UnsupportedValue(String),
}
