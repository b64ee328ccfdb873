use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use socialgraph_graph::{GraphStore, MemoryGraph};
use socialgraph_mapping::FieldSelection;
use socialgraph_service::{ServiceConfig, ServiceError, SocialService};
use socialgraph_types::{Document, ExternalId};

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn service() -> SocialService<MemoryGraph> {
    let mut service = SocialService::new(MemoryGraph::new(), ServiceConfig::default());
    for (id, name) in [("ada", "Ada Lovelace"), ("bob", "bob Stone"), ("cy", "Cy Young")] {
        service
            .create_person(doc(json!({"id": id, "displayName": name})))
            .unwrap();
    }
    service
}

fn ids(collection: &Value) -> Vec<&str> {
    collection["entry"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect()
}

fn everyone(service: &SocialService<MemoryGraph>, options: Value) -> Value {
    service
        .get_people(
            &[],
            Some("@all"),
            &doc(options),
            &FieldSelection::from_names(&["id", "displayName"]),
        )
        .unwrap()
}

fn befriend(service: &mut SocialService<MemoryGraph>, a: &str, b: &str) {
    service.request_friendship(a, b).unwrap();
    service.accept_friendship(b, a).unwrap();
}

// ── Listing ──────────────────────────────────────────────────────

#[test]
fn sorted_by_display_name_ignoring_case() {
    let service = service();
    assert_eq!(ids(&everyone(&service, json!({}))), vec!["ada", "bob", "cy"]);
    assert_eq!(
        ids(&everyone(&service, json!({"sortOrder": "descending"}))),
        vec!["cy", "bob", "ada"]
    );
}

#[test]
fn paging_reports_totals() {
    let service = service();
    let page = everyone(&service, json!({"startIndex": 1, "count": 1}));
    assert_eq!(
        page,
        json!({
            "entry": [{"id": "bob", "displayName": "bob Stone"}],
            "totalResults": 3,
            "startIndex": 1,
            "itemsPerPage": 1,
        })
    );
}

#[test]
fn count_is_capped_by_config() {
    let mut config = ServiceConfig::default();
    config.max_page_size = 2;
    let mut service = SocialService::new(MemoryGraph::new(), config);
    for id in ["a", "b", "c"] {
        service.create_person(doc(json!({"id": id}))).unwrap();
    }
    let page = everyone(&service, json!({"count": 50}));
    assert_eq!(page["itemsPerPage"], json!(2));
    assert_eq!(page["totalResults"], json!(3));
}

#[test]
fn unknown_sort_order_is_invalid() {
    let service = service();
    let err = service
        .get_people(&[], Some("@all"), &doc(json!({"sortOrder": "sideways"})), &FieldSelection::All)
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidParameter { .. }));
}

#[test]
fn self_scope_lists_the_given_users() {
    let service = service();
    let people = service
        .get_people(
            &["cy".to_string(), "ada".to_string()],
            None,
            &Document::new(),
            &FieldSelection::from_names(&["id"]),
        )
        .unwrap();
    assert_eq!(ids(&people), vec!["ada", "cy"]);
}

#[test]
fn friends_scope_lists_friends() {
    let mut service = service();
    befriend(&mut service, "ada", "cy");
    let people = service
        .get_people(
            &["ada".to_string()],
            Some("@friends"),
            &Document::new(),
            &FieldSelection::from_names(&["id"]),
        )
        .unwrap();
    assert_eq!(ids(&people), vec!["cy"]);
}

#[test]
fn group_scope_lists_members() {
    let mut service = service();
    let group = service
        .create_group("ada", doc(json!({"id": "club", "title": "Club"})))
        .unwrap();
    service.join_group("bob", &group).unwrap();
    let people = service
        .get_people(&[], Some("club"), &Document::new(), &FieldSelection::from_names(&["id"]))
        .unwrap();
    assert_eq!(ids(&people), vec!["ada", "bob"]);
}

#[test]
fn unknown_user_is_not_found() {
    let service = service();
    let err = service
        .get_people(&["zed".to_string()], None, &Document::new(), &FieldSelection::All)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "person", .. }));
}

// ── Filtering ────────────────────────────────────────────────────

#[test]
fn list_field_filter() {
    let mut service = service();
    service
        .update_person("ada", doc(json!({"emails": {"value": ["ada@example.org"]}})))
        .unwrap();
    service
        .update_person("bob", doc(json!({"emails": {"value": ["bob@home.net"]}})))
        .unwrap();

    let hits = everyone(
        &service,
        json!({"filterField": "emails", "filterOperation": "contains", "filterValue": "EXAMPLE"}),
    );
    assert_eq!(ids(&hits), vec!["ada"]);
    assert_eq!(hits["totalResults"], json!(1));
}

#[test]
fn incomplete_filter_is_ignored() {
    let service = service();
    let all = everyone(&service, json!({"filterField": "emails", "filterOperation": "contains"}));
    assert_eq!(ids(&all), vec!["ada", "bob", "cy"]);
}

#[test]
fn free_text_filter_searches_addresses() {
    let mut service = service();
    service
        .update_person("cy", doc(json!({"addresses": [{"locality": "London"}]})))
        .unwrap();
    let hits = everyone(&service, json!({"filterField": "@all", "filterValue": "lon"}));
    assert_eq!(ids(&hits), vec!["cy"]);
}

#[test]
fn is_friends_with_keeps_anchor_and_friends() {
    let mut service = service();
    befriend(&mut service, "ada", "bob");
    let hits = everyone(&service, json!({"filterField": "isFriendsWith", "filterValue": "ada"}));
    assert_eq!(ids(&hits), vec!["ada", "bob"]);

    let none = everyone(&service, json!({"filterField": "isFriendsWith", "filterValue": "zed"}));
    assert_eq!(none["totalResults"], json!(0));
}

// ── Single person ────────────────────────────────────────────────

#[test]
fn get_person_projects_requested_fields() {
    let mut service = service();
    service
        .update_person("ada", doc(json!({"name": {"givenName": "Ada"}, "nickname": "countess"})))
        .unwrap();
    let person = service
        .get_person("ada", &FieldSelection::from_names(&["name", "nickname"]))
        .unwrap();
    assert_eq!(person, doc(json!({"givenName": "Ada", "nickname": "countess"})));
}

#[test]
fn create_assigns_a_uuid_when_no_id_is_given() {
    let mut service = service();
    let id = service
        .create_person(doc(json!({"displayName": "Dee"})))
        .unwrap();
    assert!(ExternalId::parse(&id).is_ok());
    let person = service.get_person(&id, &FieldSelection::All).unwrap();
    assert_eq!(person["displayName"], json!("Dee"));
}

#[test]
fn duplicate_id_is_a_conflict() {
    let mut service = service();
    let err = service
        .create_person(doc(json!({"id": "ada"})))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test]
fn ids_are_immutable() {
    let mut service = service();
    service
        .update_person("ada", doc(json!({"id": "eve", "nickname": "countess"})))
        .unwrap();
    let person = service
        .get_person("ada", &FieldSelection::from_names(&["id", "nickname"]))
        .unwrap();
    assert_eq!(person, doc(json!({"id": "ada", "nickname": "countess"})));
}

#[test]
fn delete_person_collects_owned_entities() {
    let mut service = service();
    service
        .update_person("ada", doc(json!({"addresses": [{"locality": "London"}]})))
        .unwrap();
    let group = service
        .create_group("ada", doc(json!({"title": "Club"})))
        .unwrap();

    service.delete_person("ada").unwrap();

    assert!(service.graph().nodes_with_label("address").is_empty());
    assert!(matches!(
        service.get_person("ada", &FieldSelection::All),
        Err(ServiceError::NotFound { .. })
    ));
    let club = service.get_group(&group, &FieldSelection::All).unwrap();
    assert_eq!(club["memberCount"], json!(0));
    assert!(club.get("owner").is_none());
}

#[test]
fn supported_fields_list_flattened_names() {
    let service = service();
    let fields = service.supported_person_fields();
    for name in ["displayName", "givenName", "emails", "organizations", "age"] {
        assert!(fields.contains(&name), "missing {name}");
    }
}
