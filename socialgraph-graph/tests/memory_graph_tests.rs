use pretty_assertions::assert_eq;
use socialgraph_graph::{GraphError, GraphStore, MemoryGraph};
use socialgraph_types::{AttrValue, Direction};

fn person(graph: &mut MemoryGraph, id: &str) -> socialgraph_types::NodeId {
    let node = graph.create_node("person");
    graph.set_attribute(node, "id", AttrValue::from(id)).unwrap();
    node
}

// ── Vertices ─────────────────────────────────────────────────────

#[test]
fn create_and_read_attributes() {
    let mut graph = MemoryGraph::new();
    let node = person(&mut graph, "ada");
    graph.set_attribute(node, "displayName", "Ada".into()).unwrap();

    assert!(graph.contains_node(node));
    assert_eq!(graph.label(node), Some("person"));
    assert_eq!(graph.attribute(node, "displayName"), Some(&AttrValue::from("Ada")));
    assert_eq!(graph.attributes(node).unwrap().len(), 2);
}

#[test]
fn remove_attribute_returns_previous_value() {
    let mut graph = MemoryGraph::new();
    let node = person(&mut graph, "ada");
    assert_eq!(
        graph.remove_attribute(node, "id").unwrap(),
        Some(AttrValue::from("ada"))
    );
    assert_eq!(graph.remove_attribute(node, "id").unwrap(), None);
}

#[test]
fn missing_node_reports_not_found() {
    let mut graph = MemoryGraph::new();
    let node = graph.create_node("person");
    graph.delete_node(node).unwrap();

    assert!(!graph.contains_node(node));
    assert!(matches!(
        graph.set_attribute(node, "x", AttrValue::Int(1)),
        Err(GraphError::NodeNotFound(_))
    ));
    assert_eq!(graph.attribute(node, "x"), None);
}

#[test]
fn delete_node_with_edges_is_refused() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "a");
    let b = person(&mut graph, "b");
    let edge = graph.create_edge(a, b, "FRIEND_OF").unwrap();

    assert!(matches!(graph.delete_node(b), Err(GraphError::NodeHasEdges(_))));
    graph.delete_edge(edge).unwrap();
    graph.delete_node(b).unwrap();
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn ids_are_not_reused() {
    let mut graph = MemoryGraph::new();
    let first = graph.create_node("x");
    graph.delete_node(first).unwrap();
    let second = graph.create_node("x");
    assert_ne!(first, second);
}

// ── Edges ────────────────────────────────────────────────────────

#[test]
fn edges_filter_by_direction_and_type() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "a");
    let b = person(&mut graph, "b");
    let c = person(&mut graph, "c");
    let ab = graph.create_edge(a, b, "FRIEND_OF").unwrap();
    let ac = graph.create_edge(a, c, "REQUESTED").unwrap();
    let ca = graph.create_edge(c, a, "FRIEND_OF").unwrap();

    assert_eq!(graph.edges(a, Direction::Outgoing, None), vec![ab, ac]);
    assert_eq!(graph.edges(a, Direction::Outgoing, Some("FRIEND_OF")), vec![ab]);
    assert_eq!(graph.edges(a, Direction::Incoming, None), vec![ca]);
    assert_eq!(graph.edges(a, Direction::Both, None), vec![ab, ac, ca]);
    assert_eq!(graph.degree(a, Direction::Both), 3);
    assert_eq!(graph.neighbors(a, Direction::Outgoing, "FRIEND_OF"), vec![b]);
    assert_eq!(graph.neighbors(a, Direction::Incoming, "FRIEND_OF"), vec![c]);
}

#[test]
fn self_loop_is_listed_once_for_both() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "a");
    let edge = graph.create_edge(a, a, "KNOWS").unwrap();
    assert_eq!(graph.edges(a, Direction::Both, None), vec![edge]);
}

#[test]
fn edge_attributes() {
    let mut graph = MemoryGraph::new();
    let a = graph.create_node("messageCollection");
    let b = graph.create_node("message");
    let edge = graph.create_edge(a, b, "CONTAINS").unwrap();
    graph.set_edge_attribute(edge, "status", "NEW".into()).unwrap();

    assert_eq!(graph.edge_attribute(edge, "status"), Some(&AttrValue::from("NEW")));
    assert_eq!(
        graph.remove_edge_attribute(edge, "status").unwrap(),
        Some(AttrValue::from("NEW"))
    );
    assert_eq!(graph.edge_attribute(edge, "status"), None);
}

#[test]
fn delete_edge_detaches_both_ends() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "a");
    let b = person(&mut graph, "b");
    let edge = graph.create_edge(a, b, "FRIEND_OF").unwrap();

    let record = graph.delete_edge(edge).unwrap();
    assert_eq!(record.source, a);
    assert_eq!(record.target, b);
    assert!(graph.edges(a, Direction::Both, None).is_empty());
    assert!(graph.edges(b, Direction::Both, None).is_empty());
    assert!(matches!(graph.delete_edge(edge), Err(GraphError::EdgeNotFound(_))));
}

#[test]
fn edge_between_finds_directed_edge() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "a");
    let b = person(&mut graph, "b");
    let edge = graph.create_edge(a, b, "FRIEND_OF").unwrap();

    assert_eq!(graph.edge_between(a, b, "FRIEND_OF"), Some(edge));
    assert_eq!(graph.edge_between(b, a, "FRIEND_OF"), None);
}

#[test]
fn create_edge_to_missing_node_fails() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "a");
    let b = graph.create_node("person");
    graph.delete_node(b).unwrap();
    assert!(graph.create_edge(a, b, "FRIEND_OF").is_err());
    assert_eq!(graph.edge_count(), 0);
}

// ── Resolution ───────────────────────────────────────────────────

#[test]
fn find_node_by_label_and_attribute() {
    let mut graph = MemoryGraph::new();
    let a = person(&mut graph, "a");
    let b = person(&mut graph, "b");
    let group = graph.create_node("group");
    graph.set_attribute(group, "id", "a".into()).unwrap();

    assert_eq!(graph.find_node("person", "id", &"b".into()), Some(b));
    assert_eq!(graph.find_node("person", "id", &"a".into()), Some(a));
    assert_eq!(graph.find_node("group", "id", &"a".into()), Some(group));
    assert_eq!(graph.find_node("person", "id", &"zzz".into()), None);
    assert_eq!(graph.nodes_with_label("person"), vec![a, b]);
}
