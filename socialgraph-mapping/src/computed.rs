//! Computed fields: pure functions of stored attributes and adjacency.

use crate::Clock;
use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_model::ComputedField;
use socialgraph_types::{AttrValue, NodeId};
use std::collections::HashSet;

/// Attribute holding the birthday as milliseconds since the Unix epoch.
pub const BIRTHDAY: &str = "birthday";
/// Raw age attribute, passed through when no birthday is stored.
pub const AGE: &str = "age";

/// Evaluates a computed field. `None` means the inputs are unavailable and the
/// field is omitted from the document.
pub fn evaluate<G: GraphStore + ?Sized>(
    graph: &G,
    node: NodeId,
    field: &ComputedField,
    clock: &dyn Clock,
) -> Option<Value> {
    match *field {
        ComputedField::Age => age(graph, node, clock.today()),
        ComputedField::EdgeCount { edge, direction } => {
            let count = graph.edges(node, direction, Some(edge)).len();
            Some(Value::from(count as u64))
        }
        ComputedField::StatusCount {
            edge,
            direction,
            attribute,
            status,
        } => {
            let count = graph
                .edges(node, direction, Some(edge))
                .into_iter()
                .filter(|e| {
                    graph
                        .edge_attribute(*e, attribute)
                        .and_then(AttrValue::as_str)
                        == Some(status)
                })
                .count();
            Some(Value::from(count as u64))
        }
        ComputedField::DistinctChildAttribute {
            edge,
            direction,
            attribute,
        } => {
            let mut seen = HashSet::new();
            let mut distinct = Vec::new();
            for child in graph.neighbors(node, direction, edge) {
                let Some(value) = graph.attribute(child, attribute) else {
                    continue;
                };
                for text in value.texts() {
                    if seen.insert(text.clone()) {
                        distinct.push(Value::String(text));
                    }
                }
            }
            (!distinct.is_empty()).then_some(Value::Array(distinct))
        }
        ComputedField::EdgeAttribute {
            edge,
            direction,
            attribute,
        } => {
            let edge = graph.first_edge(node, direction, edge)?;
            graph.edge_attribute(edge, attribute).map(AttrValue::to_json)
        }
    }
}

/// Whole years between `birthday` and `today`.
///
/// The year difference is decremented when this year's birthday has not
/// happened yet: an earlier month in `today`, or the same month with the
/// birthday's day still ahead.
#[must_use]
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> i64 {
    let mut years = i64::from(today.year() - birthday.year());
    let month_diff = i64::from(today.month()) - i64::from(birthday.month());
    let day_diff = i64::from(birthday.day()) - i64::from(today.day());
    if month_diff < 0 || (month_diff == 0 && day_diff > 0) {
        years -= 1;
    }
    years
}

fn age<G: GraphStore + ?Sized>(graph: &G, node: NodeId, today: NaiveDate) -> Option<Value> {
    match graph.attribute(node, BIRTHDAY).and_then(birthday_date) {
        Some(birthday) => Some(Value::from(age_on(birthday, today))),
        None => graph.attribute(node, AGE).map(AttrValue::to_json),
    }
}

/// Birthdays are epoch milliseconds; ISO `YYYY-MM-DD` strings are accepted too.
fn birthday_date(value: &AttrValue) -> Option<NaiveDate> {
    if let Some(millis) = value.as_i64() {
        return DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive());
    }
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}
