//! Graph store seam for the social graph mapping layer.
//!
//! The graph engine itself (transactions, indexes, query planning) is an
//! external collaborator. This crate defines the narrow surface the mapping
//! layer needs from it:
//!
//! - [`GraphStore`]: vertex/edge CRUD, typed adjacency, entity resolution
//! - [`MemoryGraph`]: an arena-backed in-memory implementation
//!
//! # Architecture
//!
//! - Vertices carry a label (the entity kind) and a free-form attribute map
//! - Edges are directed, typed, and may carry their own attributes
//! - Identifiers are stable arena indices, so cyclic neighborhoods
//!   (organization ↔ person ↔ manager) need no back-references

mod error;
mod memory;
mod store;

pub use error::{GraphError, GraphResult};
pub use memory::MemoryGraph;
pub use store::{Attributes, EdgeRecord, GraphStore};
