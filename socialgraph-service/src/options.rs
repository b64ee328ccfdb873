//! Collection options: filtering, sorting and paging of candidate lists.

use crate::{ServiceConfig, ServiceError, ServiceResult};
use serde_json::{Value, json};
use socialgraph_graph::GraphStore;
use socialgraph_mapping::FilterSpec;
use socialgraph_types::{Document, NodeId};
use std::cmp::Ordering;

pub const SORT_FIELD: &str = "sortField";
pub const SORT_ORDER: &str = "sortOrder";
pub const START_INDEX: &str = "startIndex";
pub const COUNT: &str = "count";

/// Whose entities a collection request addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupScope {
    /// `@self`, also the default.
    SelfOnly,
    /// `@friends`: the user's friends.
    Friends,
    /// `@all`: every person.
    All,
    /// Members of the group with this id.
    Group(String),
}

impl GroupScope {
    pub fn parse(group_id: Option<&str>) -> Self {
        match group_id {
            None | Some("@self") => Self::SelfOnly,
            Some("@friends") => Self::Friends,
            Some("@all") => Self::All,
            Some(id) => Self::Group(id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Parsed options document of a collection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOptions {
    pub filter: Option<FilterSpec>,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    pub start_index: usize,
    pub count: usize,
}

impl CollectionOptions {
    /// Reads the recognized keys of `options`. `count` defaults to the
    /// configured page size and is capped at the configured maximum.
    pub fn parse(options: &Document, config: &ServiceConfig) -> ServiceResult<Self> {
        let sort_order = match options.get(SORT_ORDER).and_then(Value::as_str) {
            None => SortOrder::Ascending,
            Some(order) if order.eq_ignore_ascii_case("ascending") => SortOrder::Ascending,
            Some(order) if order.eq_ignore_ascii_case("descending") => SortOrder::Descending,
            Some(other) => {
                return Err(ServiceError::invalid(SORT_ORDER, format!("unknown order `{other}`")));
            }
        };
        let count = index(options, COUNT)?
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        Ok(Self {
            filter: FilterSpec::from_options(options),
            sort_field: options
                .get(SORT_FIELD)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
            sort_order,
            start_index: index(options, START_INDEX)?.unwrap_or(0),
            count,
        })
    }

    /// Stable sort by the requested attribute, or by `default_field` when the
    /// options name none. Text comparison is case-insensitive; entities
    /// lacking the attribute go last.
    pub fn sort<G: GraphStore + ?Sized>(
        &self,
        graph: &G,
        nodes: &mut [NodeId],
        default_field: Option<&str>,
    ) {
        let Some(field) = self.sort_field.as_deref().or(default_field) else {
            return;
        };
        let key = |node: &NodeId| {
            graph
                .attribute(*node, field)
                .and_then(|v| v.texts().into_iter().next())
                .map(|s| s.to_lowercase())
        };
        nodes.sort_by(|a, b| match (key(a), key(b)) {
            (Some(x), Some(y)) => match self.sort_order {
                SortOrder::Ascending => x.cmp(&y),
                SortOrder::Descending => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    /// Returns the requested page of `nodes`.
    pub fn page(&self, nodes: &[NodeId]) -> Vec<NodeId> {
        nodes
            .iter()
            .skip(self.start_index)
            .take(self.count)
            .copied()
            .collect()
    }
}

/// Wraps one page of projected entities into a collection document.
pub fn collection(entries: Vec<Document>, total: usize, start_index: usize) -> Value {
    let items_per_page = entries.len();
    json!({
        "entry": entries,
        "totalResults": total,
        "startIndex": start_index,
        "itemsPerPage": items_per_page,
    })
}

fn index(options: &Document, key: &str) -> ServiceResult<Option<usize>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| ServiceError::invalid(key, "expected a non-negative integer")),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ServiceError::invalid(key, "expected a non-negative integer")),
        Some(_) => Err(ServiceError::invalid(key, "expected a non-negative integer")),
    }
}
