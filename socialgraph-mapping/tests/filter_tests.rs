use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use socialgraph_graph::{GraphStore, MemoryGraph};
use socialgraph_mapping::filter::{self, FilterOperation, FilterSpec, FreeTextScope};
use socialgraph_mapping::list_field;
use socialgraph_model::edges;
use socialgraph_types::{Document, NodeId};

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn person(graph: &mut MemoryGraph, name: &str) -> NodeId {
    let node = graph.create_node("person");
    graph.set_attribute(node, "displayName", name.into()).unwrap();
    node
}

fn spec(field: &str, value: &str, operation: Option<FilterOperation>) -> FilterSpec {
    FilterSpec {
        field: field.to_string(),
        value: value.to_string(),
        operation,
    }
}

// ── Filter spec parsing ──────────────────────────────────────────

#[test]
fn spec_from_options() {
    let parsed = FilterSpec::from_options(&doc(json!({
        "filterField": "emails",
        "filterValue": "x@y",
        "filterOperation": "CONTAINS",
    })));
    assert_eq!(
        parsed,
        Some(spec("emails", "x@y", Some(FilterOperation::Contains)))
    );

    let options = doc(json!({"filterField": "emails", "filterOperation": "present"}));
    let no_op = FilterSpec::from_options(&options);
    assert_eq!(no_op, None);

    let unknown_op = FilterSpec::from_options(&doc(json!({
        "filterField": "emails",
        "filterValue": "x",
        "filterOperation": "startsWith",
    })));
    assert_eq!(unknown_op.unwrap().operation, None);
}

#[test]
fn list_field_names_resolve_to_edges() {
    assert_eq!(filter::list_field_edge("emails"), Some(edges::EMAILS));
    assert_eq!(filter::list_field_edge("phoneNumbers"), Some(edges::PHONE_NUMBERS));
    assert_eq!(filter::list_field_edge("ims"), Some(edges::IMS));
    assert_eq!(filter::list_field_edge("photos"), Some(edges::PHOTOS));
    assert_eq!(filter::list_field_edge("displayName"), None);
    assert_eq!(filter::list_field_edge("addresses"), None);
}

// ── List-field filter ────────────────────────────────────────────

fn with_emails(graph: &mut MemoryGraph, name: &str, emails: &[&str]) -> NodeId {
    let node = person(graph, name);
    list_field::encode(graph, node, edges::EMAILS, &doc(json!({"value": emails}))).unwrap();
    node
}

#[test]
fn equals_and_contains_are_case_insensitive() {
    let mut graph = MemoryGraph::new();
    let a = with_emails(&mut graph, "A", &["Ada@Example.org", "ada@home"]);
    let b = with_emails(&mut graph, "B", &["bob@example.org"]);
    let c = person(&mut graph, "C");

    let mut equals = vec![a, b, c];
    filter::filter_by_list_field(
        &graph,
        &mut equals,
        &spec("emails", "ada@example.ORG", Some(FilterOperation::Equals)),
    );
    assert_eq!(equals, vec![a]);

    let mut contains = vec![a, b, c];
    filter::filter_by_list_field(
        &graph,
        &mut contains,
        &spec("emails", "EXAMPLE", Some(FilterOperation::Contains)),
    );
    assert_eq!(contains, vec![a, b]);
}

#[test]
fn incomplete_list_field_filter_is_a_no_op() {
    let mut graph = MemoryGraph::new();
    let a = with_emails(&mut graph, "A", &["a@x"]);
    let b = person(&mut graph, "B");

    let mut unknown_field = vec![a, b];
    filter::filter_by_list_field(
        &graph,
        &mut unknown_field,
        &spec("nickname", "a", Some(FilterOperation::Equals)),
    );
    assert_eq!(unknown_field, vec![a, b]);

    let mut no_operation = vec![a, b];
    filter::filter_by_list_field(&graph, &mut no_operation, &spec("emails", "a@x", None));
    assert_eq!(no_operation, vec![a, b]);
}

// ── Free-text filter ─────────────────────────────────────────────

#[test]
fn free_text_matches_own_and_linked_attributes() {
    let mut graph = MemoryGraph::new();
    let direct = person(&mut graph, "Londoner");
    let via_address = person(&mut graph, "Ada");
    let home = graph.create_node("address");
    graph.set_attribute(home, "locality", "London".into()).unwrap();
    graph.create_edge(via_address, home, edges::LIVES_AT).unwrap();
    let neither = person(&mut graph, "Bob");

    let mut candidates = vec![neither, via_address, direct];
    filter::filter_free_text(&graph, &mut candidates, "LON", &FreeTextScope::PERSON);
    assert_eq!(candidates, vec![via_address, direct]);
}

#[test]
fn free_text_retains_exactly_the_matching_entity() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "Alice");
    let b = person(&mut graph, "Bob");
    let c = person(&mut graph, "Carol");
    let office = graph.create_node("address");
    graph.set_attribute(office, "locality", "Babylon".into()).unwrap();
    graph.create_edge(b, office, edges::LOCATED_AT).unwrap();

    let mut candidates = vec![a, b, c];
    filter::filter_free_text(&graph, &mut candidates, "LON", &FreeTextScope::PERSON);
    assert_eq!(candidates, vec![b]);
}

#[test]
fn free_text_searches_companions_and_affiliations() {
    let mut graph = MemoryGraph::new();
    let by_email = with_emails(&mut graph, "A", &["zed@mail"]);
    let by_org = person(&mut graph, "B");
    let org = graph.create_node("organization");
    graph.set_attribute(org, "name", "Zeppelin Works".into()).unwrap();
    graph.create_edge(by_org, org, edges::AFFILIATED).unwrap();
    let by_title = person(&mut graph, "C");
    let other = graph.create_node("organization");
    let edge = graph.create_edge(by_title, other, edges::AFFILIATED).unwrap();
    graph.set_edge_attribute(edge, "title", "Zealot".into()).unwrap();
    let none = person(&mut graph, "D");

    let mut candidates = vec![by_email, by_org, by_title, none];
    filter::filter_free_text(&graph, &mut candidates, "ze", &FreeTextScope::PERSON);
    assert_eq!(candidates, vec![by_email, by_org, by_title]);
}

#[test]
fn blank_free_text_is_a_no_op() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "A");
    let mut candidates = vec![a];
    filter::filter_free_text(&graph, &mut candidates, "  ", &FreeTextScope::PERSON);
    assert_eq!(candidates, vec![a]);
}

// ── Adjacency filter ─────────────────────────────────────────────

#[test]
fn adjacency_keeps_anchor_and_its_friends() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "A");
    let b = person(&mut graph, "B");
    let c = person(&mut graph, "C");
    graph.create_edge(a, b, edges::FRIEND_OF).unwrap();
    graph.create_edge(c, a, edges::FRIEND_OF).unwrap();

    let mut candidates = vec![a, b, c];
    filter::filter_adjacent(&graph, &mut candidates, a, edges::FRIEND_OF);
    assert_eq!(candidates, vec![a, b]);
}
