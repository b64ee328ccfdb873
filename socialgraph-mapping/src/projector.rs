//! Entity projector: graph entity + neighborhood → field-selectable document.

use crate::{Clock, MappingError, MappingResult, attribute, computed, list_field};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_model::{EntityKind, EntitySchema, FieldDef, FieldKind, Projection, Relation};
use socialgraph_types::{Document, EdgeId, NodeId};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// The fields requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSelection {
    /// Every stored attribute plus every materialized field.
    #[default]
    All,
    /// Only the named fields. Composite names expand to their sub-fields.
    Only(BTreeSet<String>),
}

impl FieldSelection {
    /// Builds a selection from field names. An empty list selects everything.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let names: BTreeSet<String> = names
            .iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            Self::All
        } else {
            Self::Only(names)
        }
    }

    /// Parses a requested-field parameter: an array of names, a
    /// comma-separated string, or null.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                let names: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                Self::from_names(&names)
            }
            Value::String(s) => {
                let names: Vec<&str> = s.split(',').collect();
                Self::from_names(&names)
            }
            _ => Self::All,
        }
    }

    fn for_relation(relation: &Relation) -> Self {
        match relation.projection {
            Projection::Full => Self::All,
            Projection::Fields(fields) => Self::from_names(fields),
        }
    }
}

/// Projects entities into documents according to their kind's field table.
///
/// Never creates or deletes anything: absent relations and attributes are
/// simply omitted from the output.
pub struct Projector<'a, G: GraphStore + ?Sized> {
    graph: &'a G,
    clock: &'a dyn Clock,
}

impl<'a, G: GraphStore + ?Sized> Projector<'a, G> {
    pub fn new(graph: &'a G, clock: &'a dyn Clock) -> Self {
        Self { graph, clock }
    }

    /// Projects `node` as an entity of `kind`.
    pub fn project(
        &self,
        node: NodeId,
        kind: EntityKind,
        selection: &FieldSelection,
    ) -> MappingResult<Document> {
        if !self.graph.contains_node(node) {
            return Err(MappingError::MissingEntity(node));
        }
        let schema = kind.schema();
        let mut doc = Document::new();

        match selection {
            FieldSelection::All => {
                attribute::copy_all(self.graph, node, &mut doc)?;
                for field in schema.materialized_fields() {
                    self.project_field(node, field, &mut doc)?;
                }
            }
            FieldSelection::Only(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                let mut working = schema.expand(&names);
                for field in schema.materialized_fields() {
                    if working.remove(field.name) {
                        self.project_field(node, field, &mut doc)?;
                    }
                }
                for name in &working {
                    if is_composite(schema, name) {
                        continue;
                    }
                    if let Some(value) = attribute::read(self.graph, node, name) {
                        doc.insert(name.clone(), value);
                    }
                }
            }
        }
        Ok(doc)
    }

    /// Projects several entities of one kind, skipping none.
    pub fn project_all(
        &self,
        nodes: &[NodeId],
        kind: EntityKind,
        selection: &FieldSelection,
    ) -> MappingResult<Vec<Document>> {
        nodes
            .iter()
            .map(|node| self.project(*node, kind, selection))
            .collect()
    }

    fn project_field(
        &self,
        node: NodeId,
        field: &FieldDef,
        doc: &mut Document,
    ) -> MappingResult<()> {
        match &field.kind {
            FieldKind::ListField { edge } => {
                if let Some(list) = list_field::decode(self.graph, node, edge) {
                    doc.insert(field.name.into(), Value::Object(list));
                }
            }
            FieldKind::SingleEdge(relation) => {
                let Some(edge) = self
                    .graph
                    .first_edge(node, relation.direction, relation.edge)
                else {
                    return Ok(());
                };
                if let Some(linked) = self.project_linked(node, edge, relation)? {
                    doc.insert(field.name.into(), Value::Object(linked));
                }
            }
            FieldKind::MultiEdge(relation) => {
                let linked = self.project_many(node, relation)?;
                if !linked.is_empty() {
                    doc.insert(
                        field.name.into(),
                        Value::Array(linked.into_iter().map(Value::Object).collect()),
                    );
                }
            }
            FieldKind::Computed(computed_field) => {
                let value = computed::evaluate(self.graph, node, computed_field, self.clock);
                if let Some(value) = value {
                    doc.insert(field.name.into(), value);
                }
            }
            FieldKind::Stored | FieldKind::StoredArray | FieldKind::SplitStored(_) => {}
        }
        Ok(())
    }

    fn project_many(&self, node: NodeId, relation: &Relation) -> MappingResult<Vec<Document>> {
        let mut linked = Vec::new();
        for edge in self.graph.edges(node, relation.direction, Some(relation.edge)) {
            let Some(record) = self.graph.edge(edge) else {
                continue;
            };
            let target = record.other_end(node);
            if let Some(doc) = self.project_linked(node, edge, relation)? {
                linked.push((target, doc));
            }
        }

        if let Some(key) = relation.sort_by {
            linked.sort_by(|(a, _), (b, _)| self.compare_by(*a, *b, key));
        }
        Ok(linked.into_iter().map(|(_, doc)| doc).collect())
    }

    /// Projects the far end of `edge`, merging the edge's own declared
    /// attributes into the result.
    fn project_linked(
        &self,
        node: NodeId,
        edge: EdgeId,
        relation: &Relation,
    ) -> MappingResult<Option<Document>> {
        let Some(record) = self.graph.edge(edge) else {
            return Ok(None);
        };
        let target = record.other_end(node);
        if !self.graph.contains_node(target) {
            return Ok(None);
        }

        let selection = FieldSelection::for_relation(relation);
        let mut doc = self.project(target, relation.target, &selection)?;
        for key in relation.edge_attributes {
            if let Some(value) = record.attributes.get(*key) {
                doc.insert((*key).to_string(), value.to_json());
            }
        }
        Ok(Some(doc))
    }

    /// Orders targets by an attribute, text-wise; targets lacking it sort last.
    fn compare_by(&self, a: NodeId, b: NodeId, key: &str) -> Ordering {
        let text = |node| {
            self.graph
                .attribute(node, key)
                .and_then(|v| v.texts().into_iter().next())
                .map(|s| s.to_lowercase())
        };
        match (text(a), text(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

fn is_composite(schema: &EntitySchema, name: &str) -> bool {
    matches!(
        schema.field(name),
        Some(FieldDef {
            kind: FieldKind::SplitStored(_),
            ..
        })
    )
}
