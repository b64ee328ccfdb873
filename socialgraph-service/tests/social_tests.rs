use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use socialgraph_graph::MemoryGraph;
use socialgraph_mapping::FieldSelection;
use socialgraph_service::{ServiceConfig, ServiceError, SocialService};
use socialgraph_types::Document;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn service_with(people: &[(&str, &str)]) -> SocialService<MemoryGraph> {
    let mut service = SocialService::new(MemoryGraph::new(), ServiceConfig::default());
    for (id, name) in people {
        service
            .create_person(doc(json!({"id": id, "displayName": name})))
            .unwrap();
    }
    service
}

fn service() -> SocialService<MemoryGraph> {
    service_with(&[
        ("ada", "Ada"),
        ("bob", "Bob"),
        ("cy", "Cy"),
        ("dee", "Dee"),
        ("eve", "Eve"),
    ])
}

fn befriend(service: &mut SocialService<MemoryGraph>, a: &str, b: &str) {
    service.request_friendship(a, b).unwrap();
    service.accept_friendship(b, a).unwrap();
}

fn ids(collection: &Value) -> Vec<&str> {
    collection["entry"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect()
}

fn only_ids() -> FieldSelection {
    FieldSelection::from_names(&["id"])
}

fn friends(service: &SocialService<MemoryGraph>, user: &str) -> Vec<String> {
    let people = service
        .get_people(&[user.to_string()], Some("@friends"), &Document::new(), &only_ids())
        .unwrap();
    ids(&people).into_iter().map(str::to_string).collect()
}

// ── Friend requests ──────────────────────────────────────────────

#[test]
fn request_then_accept() {
    let mut service = service();
    service.request_friendship("bob", "ada").unwrap();
    service.request_friendship("bob", "ada").unwrap();

    let requests = service.get_friend_requests("ada", &only_ids()).unwrap();
    assert_eq!(ids(&requests), vec!["bob"]);
    assert_eq!(requests["totalResults"], json!(1));

    service.accept_friendship("ada", "bob").unwrap();
    assert_eq!(friends(&service, "ada"), vec!["bob"]);
    assert_eq!(friends(&service, "bob"), vec!["ada"]);
    assert_eq!(
        service.get_friend_requests("ada", &only_ids()).unwrap()["totalResults"],
        json!(0)
    );
}

#[test]
fn accepting_clears_crossed_requests() {
    let mut service = service();
    service.request_friendship("ada", "bob").unwrap();
    service.request_friendship("bob", "ada").unwrap();
    service.accept_friendship("ada", "bob").unwrap();

    assert_eq!(
        service.get_friend_requests("bob", &only_ids()).unwrap()["totalResults"],
        json!(0)
    );
    assert_eq!(friends(&service, "bob"), vec!["ada"]);
}

#[test]
fn accept_without_request_is_not_found() {
    let mut service = service();
    let err = service.accept_friendship("ada", "bob").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "friend request", .. }));
}

#[test]
fn cannot_befriend_oneself() {
    let mut service = service();
    let err = service.request_friendship("ada", "ada").unwrap_err();
    assert!(matches!(err, ServiceError::InvalidParameter { .. }));
}

#[test]
fn requesting_an_existing_friend_conflicts() {
    let mut service = service();
    befriend(&mut service, "ada", "bob");
    let err = service.request_friendship("bob", "ada").unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test]
fn deny_drops_the_request() {
    let mut service = service();
    service.request_friendship("bob", "ada").unwrap();
    service.deny_friendship("ada", "bob").unwrap();
    assert_eq!(
        service.get_friend_requests("ada", &only_ids()).unwrap()["totalResults"],
        json!(0)
    );
    assert!(friends(&service, "ada").is_empty());
}

#[test]
fn remove_friend_is_symmetric() {
    let mut service = service();
    befriend(&mut service, "ada", "bob");
    service.remove_friend("bob", "ada").unwrap();
    assert!(friends(&service, "ada").is_empty());
    assert!(friends(&service, "bob").is_empty());

    let err = service.remove_friend("bob", "ada").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "friendship", .. }));
}

// ── Groups ───────────────────────────────────────────────────────

#[test]
fn created_group_has_owner_and_member() {
    let mut service = service();
    let id = service
        .create_group("ada", doc(json!({"id": "club", "title": "Club"})))
        .unwrap();
    assert_eq!(id, "club");

    let group = service.get_group("club", &FieldSelection::All).unwrap();
    assert_eq!(
        group,
        doc(json!({
            "id": "club",
            "title": "Club",
            "owner": {"id": "ada", "displayName": "Ada"},
            "memberCount": 1,
        }))
    );
}

#[test]
fn join_and_leave() {
    let mut service = service();
    service
        .create_group("ada", doc(json!({"id": "club", "title": "Club"})))
        .unwrap();
    service.join_group("bob", "club").unwrap();
    service.join_group("bob", "club").unwrap();
    assert_eq!(
        service.get_group("club", &FieldSelection::All).unwrap()["memberCount"],
        json!(2)
    );

    service.leave_group("bob", "club").unwrap();
    let err = service.leave_group("bob", "club").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "membership", .. }));
}

#[test]
fn groups_of_a_user_sorted_by_title() {
    let mut service = service();
    for (id, title) in [("z", "zebras"), ("a", "Aardvarks")] {
        service
            .create_group("ada", doc(json!({"id": id, "title": title})))
            .unwrap();
    }
    let groups = service
        .get_groups("ada", &Document::new(), &only_ids())
        .unwrap();
    assert_eq!(ids(&groups), vec!["a", "z"]);
}

#[test]
fn update_and_delete_group() {
    let mut service = service();
    service
        .create_group("ada", doc(json!({"id": "club", "title": "Club"})))
        .unwrap();
    service
        .update_group("club", doc(json!({"title": "Chess Club", "description": "weekly"})))
        .unwrap();
    let group = service
        .get_group("club", &FieldSelection::from_names(&["title", "description"]))
        .unwrap();
    assert_eq!(group, doc(json!({"title": "Chess Club", "description": "weekly"})));

    service.delete_group("club").unwrap();
    assert!(matches!(
        service.get_group("club", &FieldSelection::All),
        Err(ServiceError::NotFound { kind: "group", .. })
    ));
    assert_eq!(
        service.get_groups("ada", &Document::new(), &only_ids()).unwrap()["totalResults"],
        json!(0)
    );
    assert!(service.get_person("ada", &FieldSelection::All).is_ok());
}

// ── Traversal ────────────────────────────────────────────────────

fn chain() -> SocialService<MemoryGraph> {
    let mut service = service();
    for (a, b) in [("ada", "bob"), ("bob", "cy"), ("cy", "dee"), ("dee", "eve")] {
        befriend(&mut service, a, b);
    }
    service
}

#[test]
fn shortest_path_follows_friendships() {
    let service = chain();
    let path = service.shortest_path("ada", "cy", &only_ids()).unwrap();
    assert_eq!(ids(&path), vec!["ada", "bob", "cy"]);
    assert_eq!(path["totalResults"], json!(3));
}

#[test]
fn shortest_path_is_bounded_by_depth() {
    let service = chain();
    let reachable = service.shortest_path("ada", "dee", &only_ids()).unwrap();
    assert_eq!(ids(&reachable), vec!["ada", "bob", "cy", "dee"]);

    let too_far = service.shortest_path("ada", "eve", &only_ids()).unwrap();
    assert_eq!(too_far["totalResults"], json!(0));
}

#[test]
fn shortest_path_to_oneself() {
    let service = chain();
    let path = service.shortest_path("ada", "ada", &only_ids()).unwrap();
    assert_eq!(ids(&path), vec!["ada"]);
}

#[test]
fn suggestions_ranked_by_mutual_friends() {
    let mut service = service();
    for (a, b) in [
        ("ada", "bob"),
        ("ada", "cy"),
        ("bob", "dee"),
        ("bob", "eve"),
        ("cy", "dee"),
    ] {
        befriend(&mut service, a, b);
    }

    let suggestions = service.friend_suggestions("ada", &only_ids()).unwrap();
    assert_eq!(
        suggestions["entry"],
        json!([
            {"id": "dee", "mutualFriends": 2},
            {"id": "eve", "mutualFriends": 1},
        ])
    );
}

#[test]
fn common_friends_in_first_users_order() {
    let mut service = service();
    for (a, b) in [("bob", "ada"), ("bob", "dee"), ("bob", "eve"), ("cy", "dee"), ("cy", "ada")] {
        befriend(&mut service, a, b);
    }
    let common = service.common_friends("bob", "cy", &only_ids()).unwrap();
    assert_eq!(ids(&common), vec!["ada", "dee"]);
}
