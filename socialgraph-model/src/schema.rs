use crate::EntityKind;
use serde::{Deserialize, Serialize};
use socialgraph_types::Direction;
use std::collections::BTreeSet;

/// What a present-but-null input value does to a stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Leave the attribute untouched.
    IgnoreNull,
    /// Delete the attribute.
    ClearOnNull,
}

/// What a present-but-null input value does to a relationship field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelinkPolicy {
    /// Remove the current link(s) and garbage-collect orphaned targets.
    UnlinkOnNull,
    /// Keep the current link(s).
    KeepOnNull,
}

/// How much of a linked entity is embedded in the parent document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Recursive full projection of the target.
    Full,
    /// A fixed subset of the target's fields.
    Fields(&'static [&'static str]),
}

/// Declaration of an edge-materialized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub edge: &'static str,
    /// Direction followed from the entity owning the field.
    pub direction: Direction,
    pub target: EntityKind,
    pub projection: Projection,
    pub on_null: RelinkPolicy,
    /// Sub-document keys stored on the edge instead of the target.
    pub edge_attributes: &'static [&'static str],
    /// Attribute of the target used to order multi-valued projections.
    pub sort_by: Option<&'static str>,
    /// Read-only relations are maintained by dedicated operations and ignored on input.
    pub writable: bool,
}

impl Relation {
    /// An outgoing relation whose targets are owned by the source entity.
    #[must_use]
    pub const fn owned(edge: &'static str, target: EntityKind) -> Self {
        Self {
            edge,
            direction: Direction::Outgoing,
            target,
            projection: Projection::Full,
            on_null: RelinkPolicy::UnlinkOnNull,
            edge_attributes: &[],
            sort_by: None,
            writable: true,
        }
    }

    /// A read-only relation followed against the edge direction.
    #[must_use]
    pub const fn incoming(edge: &'static str, target: EntityKind) -> Self {
        Self {
            direction: Direction::Incoming,
            writable: false,
            ..Self::owned(edge, target)
        }
    }

    /// Marks the relation as maintained by dedicated operations only.
    #[must_use]
    pub const fn read_only(self) -> Self {
        Self {
            writable: false,
            ..self
        }
    }

    #[must_use]
    pub const fn narrowed(self, fields: &'static [&'static str]) -> Self {
        Self {
            projection: Projection::Fields(fields),
            ..self
        }
    }

    #[must_use]
    pub const fn keep_on_null(self) -> Self {
        Self {
            on_null: RelinkPolicy::KeepOnNull,
            ..self
        }
    }

    #[must_use]
    pub const fn with_edge_attributes(self, attributes: &'static [&'static str]) -> Self {
        Self {
            edge_attributes: attributes,
            ..self
        }
    }

    #[must_use]
    pub const fn sorted_by(self, key: &'static str) -> Self {
        Self {
            sort_by: Some(key),
            ..self
        }
    }
}

/// A field computed at read time. Never persisted, never accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputedField {
    /// Years since the `birthday` timestamp, falling back to a raw `age` attribute.
    Age,
    /// Number of matching edges.
    EdgeCount {
        edge: &'static str,
        direction: Direction,
    },
    /// Number of matching edges whose `attribute` equals `status`.
    StatusCount {
        edge: &'static str,
        direction: Direction,
        attribute: &'static str,
        status: &'static str,
    },
    /// De-duplicated values of `attribute` across linked children.
    DistinctChildAttribute {
        edge: &'static str,
        direction: Direction,
        attribute: &'static str,
    },
    /// An attribute of the first matching incident edge.
    EdgeAttribute {
        edge: &'static str,
        direction: Direction,
        attribute: &'static str,
    },
}

/// Storage classification of one logical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain scalar attribute.
    Stored,
    /// An attribute holding a string array; an empty input array deletes it.
    StoredArray,
    /// A composite stored as the listed independent attributes.
    SplitStored(&'static [&'static str]),
    /// Parallel `value`/`type`/`primary` arrays on a companion entity.
    ListField { edge: &'static str },
    SingleEdge(Relation),
    MultiEdge(Relation),
    Computed(ComputedField),
}

impl FieldKind {
    /// True for fields that are not read by copying an attribute of the entity.
    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        matches!(
            self,
            Self::ListField { .. } | Self::SingleEdge(_) | Self::MultiEdge(_) | Self::Computed(_)
        )
    }
}

/// One row of a field classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Overrides the kind-level null policy for this field.
    pub null_policy: Option<NullPolicy>,
}

impl FieldDef {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            null_policy: None,
        }
    }

    #[must_use]
    pub const fn stored(name: &'static str) -> Self {
        Self::new(name, FieldKind::Stored)
    }

    #[must_use]
    pub const fn array(name: &'static str) -> Self {
        Self::new(name, FieldKind::StoredArray)
    }

    #[must_use]
    pub const fn split(name: &'static str, sub_fields: &'static [&'static str]) -> Self {
        Self::new(name, FieldKind::SplitStored(sub_fields))
    }

    #[must_use]
    pub const fn list(name: &'static str, edge: &'static str) -> Self {
        Self::new(name, FieldKind::ListField { edge })
    }

    #[must_use]
    pub const fn single(name: &'static str, relation: Relation) -> Self {
        Self::new(name, FieldKind::SingleEdge(relation))
    }

    #[must_use]
    pub const fn multi(name: &'static str, relation: Relation) -> Self {
        Self::new(name, FieldKind::MultiEdge(relation))
    }

    #[must_use]
    pub const fn computed(name: &'static str, field: ComputedField) -> Self {
        Self::new(name, FieldKind::Computed(field))
    }

    #[must_use]
    pub const fn clear_on_null(self) -> Self {
        Self {
            null_policy: Some(NullPolicy::ClearOnNull),
            ..self
        }
    }

    #[must_use]
    pub const fn ignore_null(self) -> Self {
        Self {
            null_policy: Some(NullPolicy::IgnoreNull),
            ..self
        }
    }
}

/// The field classification table of one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub fields: &'static [FieldDef],
    /// Default null-write policy for stored attributes of this kind.
    pub null_policy: NullPolicy,
    /// Open schemas store every undeclared input key as a plain attribute.
    pub open: bool,
}

impl EntitySchema {
    /// Looks up a declared field by name. Sub-fields of composites are not
    /// declared fields; see [`EntitySchema::composite_of`].
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the composite that declares `sub_field`, if any.
    #[must_use]
    pub fn composite_of(&self, sub_field: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| match f.kind {
            FieldKind::SplitStored(subs) => subs.contains(&sub_field),
            _ => false,
        })
    }

    /// Effective null policy of a field.
    #[must_use]
    pub fn null_policy_for(&self, field: &FieldDef) -> NullPolicy {
        field.null_policy.unwrap_or(self.null_policy)
    }

    /// Expands composite names into their sub-fields. The result is the
    /// union of the requested names and every expanded sub-field.
    #[must_use]
    pub fn expand<S: AsRef<str>>(&self, requested: &[S]) -> BTreeSet<String> {
        let mut expanded = BTreeSet::new();
        for name in requested {
            let name = name.as_ref();
            expanded.insert(name.to_string());
            if let Some(FieldDef {
                kind: FieldKind::SplitStored(subs),
                ..
            }) = self.field(name)
            {
                expanded.extend(subs.iter().map(|s| (*s).to_string()));
            }
        }
        expanded
    }

    /// Every field name a caller may request, with composites listed by
    /// their sub-fields.
    #[must_use]
    pub fn supported_fields(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for field in self.fields {
            match field.kind {
                FieldKind::SplitStored(subs) => names.extend_from_slice(subs),
                _ => names.push(field.name),
            }
        }
        names
    }

    /// Declared fields that are read by traversal or computation.
    pub fn materialized_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|f| f.kind.is_materialized())
    }
}
