//! The social service: owns the graph and exposes one method per operation.
//!
//! Operation families live in their own modules as further `impl` blocks.

use crate::options::{CollectionOptions, GroupScope, collection};
use crate::{ServiceConfig, ServiceError, ServiceResult};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::{
    Clock, FieldSelection, FilterSpec, FreeTextScope, Projector, Synchronizer, SystemClock, filter,
};
use socialgraph_model::{EntityKind, edges};
use socialgraph_types::{AttrValue, Direction, Document, ExternalId, NodeId};
use std::collections::HashSet;
use tracing::{debug, info};

/// Attribute holding an entity's external id.
pub const ID: &str = "id";

/// `filterField` value selecting the free-text filter.
pub const FILTER_ALL: &str = "@all";
/// `filterField` value selecting the adjacency filter.
pub const FILTER_IS_FRIENDS_WITH: &str = "isFriendsWith";

/// Serves the operation surface over one graph.
///
/// Reads take `&self`, writes take `&mut self`. Each call is one unit of
/// work; transactions are the caller's concern.
pub struct SocialService<G: GraphStore> {
    graph: G,
    config: ServiceConfig,
    clock: Box<dyn Clock>,
}

impl<G: GraphStore> SocialService<G> {
    pub fn new(graph: G, config: ServiceConfig) -> Self {
        Self::with_clock(graph, config, Box::new(SystemClock))
    }

    pub fn with_clock(graph: G, config: ServiceConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            graph,
            config: config.validated(),
            clock,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn into_graph(self) -> G {
        self.graph
    }

    // ── Mapping entry points ─────────────────────────────────────

    pub(crate) fn projector(&self) -> Projector<'_, G> {
        Projector::new(&self.graph, self.clock.as_ref())
    }

    pub(crate) fn synchronizer(&mut self) -> Synchronizer<'_, G> {
        Synchronizer::new(&mut self.graph)
    }

    pub(crate) fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub(crate) fn project(
        &self,
        node: NodeId,
        kind: EntityKind,
        fields: &FieldSelection,
    ) -> ServiceResult<Document> {
        Ok(self.projector().project(node, kind, fields)?)
    }

    /// Sorts, pages and projects `nodes` into a collection document.
    pub(crate) fn project_page(
        &self,
        mut nodes: Vec<NodeId>,
        kind: EntityKind,
        options: &CollectionOptions,
        fields: &FieldSelection,
        default_sort: Option<&str>,
    ) -> ServiceResult<Value> {
        options.sort(&self.graph, &mut nodes, default_sort);
        let page = options.page(&nodes);
        let entries = self.projector().project_all(&page, kind, fields)?;
        Ok(collection(entries, nodes.len(), options.start_index))
    }

    pub(crate) fn options(&self, options: &Document) -> ServiceResult<CollectionOptions> {
        CollectionOptions::parse(options, &self.config)
    }

    // ── Entity resolution ────────────────────────────────────────

    /// Resolves a top-level entity (person or group) by its external id.
    pub(crate) fn resolve(&self, kind: EntityKind, id: &str) -> ServiceResult<NodeId> {
        self.graph
            .find_node(kind.label(), ID, &AttrValue::from(id))
            .ok_or_else(|| ServiceError::not_found(kind.label(), id))
    }

    pub(crate) fn person(&self, id: &str) -> ServiceResult<NodeId> {
        self.resolve(EntityKind::Person, id)
    }

    /// Resolves an entity owned by `owner` through `edge` by its external id.
    pub(crate) fn child(
        &self,
        owner: NodeId,
        edge: &str,
        kind: EntityKind,
        id: &str,
    ) -> ServiceResult<NodeId> {
        self.children(owner, edge)
            .into_iter()
            .find(|node| self.has_id(*node, id))
            .ok_or_else(|| ServiceError::not_found(kind.label(), id))
    }

    pub(crate) fn children(&self, owner: NodeId, edge: &str) -> Vec<NodeId> {
        self.graph.neighbors(owner, Direction::Outgoing, edge)
    }

    /// Keeps only the nodes whose external id is listed. An empty list keeps all.
    pub(crate) fn retain_ids(&self, nodes: &mut Vec<NodeId>, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        nodes.retain(|node| ids.iter().any(|id| self.has_id(*node, id)));
    }

    pub(crate) fn has_id(&self, node: NodeId, id: &str) -> bool {
        self.graph.attribute(node, ID).and_then(AttrValue::as_str) == Some(id)
    }

    pub(crate) fn external_id(&self, node: NodeId) -> Option<String> {
        self.graph
            .attribute(node, ID)
            .and_then(AttrValue::as_str)
            .map(str::to_string)
    }

    /// Every person addressed by `user_ids` under `scope`, de-duplicated in
    /// first-seen order.
    pub(crate) fn scoped_people(
        &self,
        user_ids: &[String],
        scope: &GroupScope,
    ) -> ServiceResult<Vec<NodeId>> {
        let mut seen = HashSet::new();
        let mut people = Vec::new();
        let mut push = |node: NodeId| {
            if seen.insert(node) {
                people.push(node);
            }
        };

        match scope {
            GroupScope::All => {
                for node in self.graph.nodes_with_label(EntityKind::Person.label()) {
                    push(node);
                }
            }
            GroupScope::Group(group_id) => {
                let group = self.resolve(EntityKind::Group, group_id)?;
                for node in self
                    .graph
                    .neighbors(group, Direction::Incoming, edges::MEMBER_OF)
                {
                    push(node);
                }
            }
            GroupScope::SelfOnly | GroupScope::Friends => {
                for id in user_ids {
                    let user = self.person(id)?;
                    if *scope == GroupScope::SelfOnly {
                        push(user);
                        continue;
                    }
                    let friends = self
                        .graph
                        .neighbors(user, Direction::Outgoing, edges::FRIEND_OF);
                    for friend in friends {
                        push(friend);
                    }
                }
            }
        }
        Ok(people)
    }

    /// Applies a person-collection filter in place.
    ///
    /// `@all` searches free text, `isFriendsWith` keeps the anchor's friends,
    /// list-field names match contact values; anything else filters nothing.
    pub(crate) fn apply_filter(&self, people: &mut Vec<NodeId>, spec: &FilterSpec) {
        match spec.field.as_str() {
            FILTER_ALL => {
                filter::filter_free_text(&self.graph, people, &spec.value, &FreeTextScope::PERSON);
            }
            FILTER_IS_FRIENDS_WITH => match self.person(&spec.value) {
                Ok(anchor) => {
                    filter::filter_adjacent(&self.graph, people, anchor, edges::FRIEND_OF);
                }
                Err(_) => {
                    debug!(anchor = %spec.value, "adjacency filter anchor not found");
                    people.clear();
                }
            },
            field if filter::list_field_edge(field).is_some() => {
                filter::filter_by_list_field(&self.graph, people, spec);
            }
            other => debug!(field = other, "ignoring unsupported filter field"),
        }
    }

    // ── Creation ─────────────────────────────────────────────────

    /// Takes the input's id, or assigns a fresh UUID v7, and writes the
    /// normalized id back into the input.
    fn assign_id(input: &mut Document) -> ServiceResult<String> {
        let id = match input.get(ID) {
            None | Some(Value::Null) => ExternalId::new().to_string(),
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            Some(_) => return Err(ServiceError::invalid(ID, "expected a non-empty string")),
        };
        input.insert(ID.into(), Value::String(id.clone()));
        Ok(id)
    }

    /// Creates a top-level entity. A duplicate id is a conflict.
    pub(crate) fn create_top_level(
        &mut self,
        kind: EntityKind,
        mut input: Document,
    ) -> ServiceResult<(NodeId, String)> {
        let id = Self::assign_id(&mut input)?;
        if self.resolve(kind, &id).is_ok() {
            return Err(ServiceError::Conflict(format!("{kind} `{id}` already exists")));
        }
        let node = self.synchronizer().create(kind, &input)?;
        info!(kind = %kind, id = %id, "created entity");
        Ok((node, id))
    }

    /// Creates an entity owned by `owner` through `edge`. Ids are unique per owner.
    pub(crate) fn create_child(
        &mut self,
        owner: NodeId,
        edge: &str,
        kind: EntityKind,
        mut input: Document,
    ) -> ServiceResult<(NodeId, String)> {
        let id = Self::assign_id(&mut input)?;
        if self.child(owner, edge, kind, &id).is_ok() {
            return Err(ServiceError::Conflict(format!("{kind} `{id}` already exists")));
        }
        let node = self.synchronizer().create(kind, &input)?;
        self.graph.create_edge(owner, node, edge)?;
        info!(kind = %kind, id = %id, "created entity");
        Ok((node, id))
    }

    /// Applies an update. Ids are immutable; an `id` key in the input is dropped.
    pub(crate) fn update_entity(
        &mut self,
        node: NodeId,
        kind: EntityKind,
        mut input: Document,
    ) -> ServiceResult<()> {
        input.remove(ID);
        self.synchronizer().apply_update(node, kind, &input)?;
        debug!(kind = %kind, node = %node, "updated entity");
        Ok(())
    }

    /// Deletes an entity and collects whatever only it kept alive.
    pub(crate) fn delete_entity(&mut self, node: NodeId, kind: EntityKind) -> ServiceResult<()> {
        socialgraph_mapping::relink::delete_entity(&mut self.graph, node)?;
        info!(kind = %kind, node = %node, "deleted entity");
        Ok(())
    }
}
