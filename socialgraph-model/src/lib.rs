//! Field classification tables for the social graph.
//!
//! Storage is schema-free; this crate is where the schema lives. Every entity
//! kind declares, field by field, how a document field maps onto the graph:
//! - [`FieldKind::Stored`] / [`FieldKind::StoredArray`]: an attribute of the entity
//! - [`FieldKind::SplitStored`]: a composite spread over several attributes
//! - [`FieldKind::ListField`]: parallel arrays on a companion entity
//! - [`FieldKind::SingleEdge`] / [`FieldKind::MultiEdge`]: linked entities
//! - [`FieldKind::Computed`]: derived at read time, never persisted
//!
//! Null-write behavior is fixed per kind ([`NullPolicy`]) with per-field
//! overrides; relationship fields carry their own [`RelinkPolicy`].

pub mod edges;
mod kinds;
mod schema;

pub use kinds::{
    EntityKind, MESSAGE_STATUS_NEW, PERSON_BODY_TYPE, PERSON_NAME, PERSON_SUMMARY,
};
pub use schema::{
    ComputedField, EntitySchema, FieldDef, FieldKind, NullPolicy, Projection, Relation,
    RelinkPolicy,
};
