//! Operation surface of the social graph.
//!
//! [`SocialService`] owns a [`GraphStore`](socialgraph_graph::GraphStore) and
//! exposes one method per remote operation: people, friend requests, groups,
//! traversal queries, activities, app data, messages, albums, media items and
//! skills. [`OperationRegistry`] maps operation names with ordered parameter
//! names onto those methods for callers that dispatch by name.
//!
//! ```ignore
//! let mut service = SocialService::new(MemoryGraph::new(), ServiceConfig::default());
//! let registry = OperationRegistry::standard();
//! let created = registry.dispatch(&mut service, "people.create", &params)?;
//! ```

mod activities;
mod albums;
mod appdata;
mod config;
mod error;
mod friends;
mod groups;
mod logging;
mod messages;
pub mod options;
pub mod params;
mod people;
mod registry;
mod service;
mod skills;
mod traversal;

pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use logging::init_logging;
pub use options::{CollectionOptions, GroupScope, SortOrder};
pub use registry::{Handler, OperationRegistry};
pub use service::{FILTER_ALL, FILTER_IS_FRIENDS_WITH, SocialService};
pub use traversal::MUTUAL_FRIENDS;
