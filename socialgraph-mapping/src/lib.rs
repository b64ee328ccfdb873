//! Graph-to-document mapping and synchronization.
//!
//! This crate turns graph entities into nested, field-selectable documents and
//! applies partial documents back onto the graph:
//!
//! - [`Projector`]: entity + neighborhood → document, per requested fields
//! - [`Synchronizer`]: partial document → attribute writes and re-linking
//! - [`relink`]: relationship replacement and orphan collection
//! - [`filter`]: list-field, free-text and adjacency filters
//! - [`attribute`], [`list_field`], [`computed`]: the per-field codecs
//!
//! Everything is synchronous and runs inside the caller's unit of work. Field
//! behavior comes from the tables in `socialgraph-model`.

pub mod attribute;
mod clock;
pub mod computed;
mod error;
pub mod filter;
pub mod list_field;
mod projector;
pub mod relink;
mod synchronizer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{MappingError, MappingResult};
pub use filter::{FilterOperation, FilterSpec, FreeTextScope};
pub use projector::{FieldSelection, Projector};
pub use synchronizer::{Synchronizer, validate_input};
