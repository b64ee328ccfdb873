//! Entity synchronizer: applies a partial input document onto an entity and
//! its neighborhood.

use crate::{MappingError, MappingResult, attribute, list_field, relink};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_model::{
    EntityKind, EntitySchema, FieldDef, FieldKind, NullPolicy, Relation, RelinkPolicy,
};
use socialgraph_types::{Direction, Document, NodeId};
use tracing::debug;

/// Applies input documents to entities according to their kind's field table.
///
/// The whole document is shape-checked before the first write, so a value of
/// the wrong shape leaves the graph untouched.
pub struct Synchronizer<'a, G: GraphStore + ?Sized> {
    graph: &'a mut G,
}

impl<'a, G: GraphStore + ?Sized> Synchronizer<'a, G> {
    pub fn new(graph: &'a mut G) -> Self {
        Self { graph }
    }

    /// Applies `input` to `node`, an entity of `kind`.
    pub fn apply_update(
        &mut self,
        node: NodeId,
        kind: EntityKind,
        input: &Document,
    ) -> MappingResult<()> {
        if !self.graph.contains_node(node) {
            return Err(MappingError::MissingEntity(node));
        }
        validate_input(kind, input)?;
        self.apply(node, kind.schema(), input)
    }

    /// Creates a new entity of `kind` and populates it from `input`.
    pub fn create(&mut self, kind: EntityKind, input: &Document) -> MappingResult<NodeId> {
        validate_input(kind, input)?;
        let node = self.graph.create_node(kind.label());
        self.apply(node, kind.schema(), input)?;
        Ok(node)
    }

    fn apply(
        &mut self,
        node: NodeId,
        schema: &EntitySchema,
        input: &Document,
    ) -> MappingResult<()> {
        for (key, value) in input {
            if let Some(field) = schema.field(key) {
                self.apply_field(node, schema, field, value)?;
            } else if let Some(composite) = schema.composite_of(key) {
                let policy = schema.null_policy_for(composite);
                attribute::write(self.graph, node, key, value, policy)?;
            } else if schema.open {
                attribute::write(self.graph, node, key, value, schema.null_policy)?;
            } else {
                debug!(kind = %schema.kind, field = %key, "ignoring undeclared input field");
            }
        }
        Ok(())
    }

    fn apply_field(
        &mut self,
        node: NodeId,
        schema: &EntitySchema,
        field: &FieldDef,
        value: &Value,
    ) -> MappingResult<()> {
        let policy = schema.null_policy_for(field);
        match &field.kind {
            FieldKind::Stored => attribute::write(self.graph, node, field.name, value, policy),
            FieldKind::StoredArray => {
                attribute::write_array(self.graph, node, field.name, value, policy)
            }
            FieldKind::SplitStored(sub_fields) => match value {
                Value::Null => {
                    if policy == NullPolicy::ClearOnNull {
                        for sub in *sub_fields {
                            self.graph.remove_attribute(node, sub)?;
                        }
                    }
                    Ok(())
                }
                Value::Object(parts) => {
                    for (sub, part) in parts {
                        if sub_fields.contains(&sub.as_str()) {
                            attribute::write(self.graph, node, sub, part, policy)?;
                        } else {
                            debug!(
                                field = field.name,
                                sub_field = %sub,
                                "ignoring unknown sub-field"
                            );
                        }
                    }
                    Ok(())
                }
                _ => Err(MappingError::invalid(field.name, "expected an object")),
            },
            FieldKind::ListField { edge } => match value {
                Value::Null => {
                    if policy == NullPolicy::ClearOnNull {
                        list_field::clear(self.graph, node, edge)?;
                    }
                    Ok(())
                }
                Value::Object(list) => list_field::encode(self.graph, node, edge, list),
                values => {
                    let mut list = Document::new();
                    list.insert(list_field::VALUE.into(), values.clone());
                    list_field::encode(self.graph, node, edge, &list)
                }
            },
            FieldKind::SingleEdge(relation) => {
                if !relation.writable {
                    debug!(field = field.name, "ignoring read-only relation");
                    return Ok(());
                }
                match value {
                    Value::Null => self.unlink_on_null(node, relation),
                    Value::Object(doc) => self.replace(node, relation, &[doc]),
                    _ => Err(MappingError::invalid(field.name, "expected an object")),
                }
            }
            FieldKind::MultiEdge(relation) => {
                if !relation.writable {
                    debug!(field = field.name, "ignoring read-only relation");
                    return Ok(());
                }
                match value {
                    Value::Null => self.unlink_on_null(node, relation),
                    Value::Object(doc) => self.replace(node, relation, &[doc]),
                    Value::Array(items) => {
                        let docs: Vec<&Document> =
                            items.iter().filter_map(Value::as_object).collect();
                        self.replace(node, relation, &docs)
                    }
                    _ => Err(MappingError::invalid(field.name, "expected an array of objects")),
                }
            }
            FieldKind::Computed(_) => {
                debug!(field = field.name, "ignoring computed input field");
                Ok(())
            }
        }
    }

    fn unlink_on_null(&mut self, node: NodeId, relation: &Relation) -> MappingResult<()> {
        match relation.on_null {
            RelinkPolicy::UnlinkOnNull => relink::unlink_all(self.graph, node, relation),
            RelinkPolicy::KeepOnNull => Ok(()),
        }
    }

    /// Drops the current links of `relation`, then links one entity per
    /// document. This is a replace, not a merge.
    fn replace(
        &mut self,
        node: NodeId,
        relation: &Relation,
        docs: &[&Document],
    ) -> MappingResult<()> {
        relink::unlink_all(self.graph, node, relation)?;
        for doc in docs {
            self.link_new(node, relation, doc)?;
        }
        Ok(())
    }

    fn link_new(
        &mut self,
        node: NodeId,
        relation: &Relation,
        doc: &Document,
    ) -> MappingResult<()> {
        let mut edge_values = Document::new();
        let mut node_values = Document::new();
        for (key, value) in doc {
            if relation.edge_attributes.contains(&key.as_str()) {
                edge_values.insert(key.clone(), value.clone());
            } else {
                node_values.insert(key.clone(), value.clone());
            }
        }

        let target = self.graph.create_node(relation.target.label());
        self.apply(target, relation.target.schema(), &node_values)?;

        let edge = match relation.direction {
            Direction::Incoming => self.graph.create_edge(target, node, relation.edge)?,
            Direction::Outgoing | Direction::Both => {
                self.graph.create_edge(node, target, relation.edge)?
            }
        };
        for (key, value) in &edge_values {
            attribute::write_edge(self.graph, edge, key, value)?;
        }
        Ok(())
    }
}

/// Checks that `input` can be applied to an entity of `kind` without
/// touching the graph. Every value that would be stored is converted,
/// recursing into linked sub-documents and their edge attributes.
pub fn validate_input(kind: EntityKind, input: &Document) -> MappingResult<()> {
    check_document(kind.schema(), input)
}

fn check_document(schema: &EntitySchema, input: &Document) -> MappingResult<()> {
    for (key, value) in input {
        let Some(field) = schema.field(key) else {
            if schema.composite_of(key).is_some() || schema.open {
                attribute::check(key, value)?;
            }
            continue;
        };
        match (&field.kind, value) {
            (_, Value::Null) | (FieldKind::Computed(_), _) => {}
            (FieldKind::Stored, _) => attribute::check(key, value)?,
            (FieldKind::StoredArray, Value::Object(_)) => {
                return Err(MappingError::invalid(key, "expected an array"));
            }
            (FieldKind::StoredArray, _) => attribute::check(key, value)?,
            (FieldKind::SplitStored(sub_fields), Value::Object(parts)) => {
                for (sub, part) in parts {
                    if sub_fields.contains(&sub.as_str()) {
                        attribute::check(sub, part)?;
                    }
                }
            }
            (FieldKind::SplitStored(_), _) => {
                return Err(MappingError::invalid(key, "expected an object"));
            }
            (FieldKind::ListField { .. }, Value::Object(list)) => list_field::check(list)?,
            (FieldKind::ListField { .. }, Value::Bool(_) | Value::Number(_)) => {
                return Err(MappingError::invalid(key, "expected a list field object"));
            }
            (FieldKind::ListField { .. }, values) => {
                attribute::string_array(key, values)?;
            }
            (FieldKind::SingleEdge(relation), Value::Object(doc)) if relation.writable => {
                check_linked(relation, doc)?;
            }
            (FieldKind::SingleEdge(relation), _) if relation.writable => {
                return Err(MappingError::invalid(key, "expected an object"));
            }
            (FieldKind::MultiEdge(relation), Value::Object(doc)) if relation.writable => {
                check_linked(relation, doc)?;
            }
            (FieldKind::MultiEdge(relation), Value::Array(items)) if relation.writable => {
                for item in items {
                    let Value::Object(doc) = item else {
                        return Err(MappingError::invalid(key, "expected an array of objects"));
                    };
                    check_linked(relation, doc)?;
                }
            }
            (FieldKind::MultiEdge(relation), _) if relation.writable => {
                return Err(MappingError::invalid(key, "expected an array of objects"));
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_linked(relation: &Relation, doc: &Document) -> MappingResult<()> {
    for (key, value) in doc {
        if relation.edge_attributes.contains(&key.as_str()) {
            attribute::check(key, value)?;
        }
    }
    check_document(relation.target.schema(), doc)
}
