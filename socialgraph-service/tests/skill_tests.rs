use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use socialgraph_graph::{GraphStore, MemoryGraph};
use socialgraph_mapping::FieldSelection;
use socialgraph_service::{ServiceConfig, ServiceError, SocialService};
use socialgraph_types::Document;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn service() -> SocialService<MemoryGraph> {
    let mut service = SocialService::new(MemoryGraph::new(), ServiceConfig::default());
    for (id, name) in [("ada", "Ada"), ("bob", "Bob"), ("cy", "Cy")] {
        service
            .create_person(doc(json!({"id": id, "displayName": name})))
            .unwrap();
    }
    service
}

fn skills(service: &SocialService<MemoryGraph>, user: &str) -> Value {
    service.get_skills(user, &FieldSelection::All).unwrap()["entry"].clone()
}

#[test]
fn vouchers_listed_by_display_name() {
    let mut service = service();
    service.add_skill("cy", "ada", "rust").unwrap();
    service.add_skill("bob", "ada", "rust").unwrap();
    service.add_skill("bob", "ada", "rust").unwrap();

    assert_eq!(
        skills(&service, "ada"),
        json!([{
            "name": "rust",
            "people": [
                {"id": "bob", "displayName": "Bob"},
                {"id": "cy", "displayName": "Cy"},
            ],
        }])
    );
    assert_eq!(service.graph().nodes_with_label("skill").len(), 1);
}

#[test]
fn skills_are_per_profile() {
    let mut service = service();
    service.add_skill("bob", "ada", "rust").unwrap();
    service.add_skill("ada", "bob", "rust").unwrap();
    service.add_skill("ada", "ada", "chess").unwrap();

    let names: Vec<Value> = skills(&service, "ada")
        .as_array()
        .unwrap()
        .iter()
        .map(|skill| skill["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("rust"), json!("chess")]);
    assert_eq!(service.graph().nodes_with_label("skill").len(), 3);
}

#[test]
fn last_voucher_removal_deletes_the_skill() {
    let mut service = service();
    service.add_skill("bob", "ada", "rust").unwrap();
    service.add_skill("cy", "ada", "rust").unwrap();

    service.remove_skill("bob", "ada", "rust").unwrap();
    assert_eq!(
        skills(&service, "ada")[0]["people"],
        json!([{"id": "cy", "displayName": "Cy"}])
    );

    service.remove_skill("cy", "ada", "rust").unwrap();
    assert_eq!(skills(&service, "ada"), json!([]));
    assert!(service.graph().nodes_with_label("skill").is_empty());
}

#[test]
fn deleting_the_last_voucher_deletes_the_skill() {
    let mut service = service();
    service.add_skill("bob", "ada", "rust").unwrap();
    service.add_skill("bob", "ada", "chess").unwrap();
    service.add_skill("cy", "ada", "chess").unwrap();

    service.delete_person("bob").unwrap();

    assert_eq!(
        skills(&service, "ada"),
        json!([{"name": "chess", "people": [{"id": "cy", "displayName": "Cy"}]}])
    );
    assert_eq!(service.graph().nodes_with_label("skill").len(), 1);
}

#[test]
fn deleting_the_profile_owner_deletes_their_skills() {
    let mut service = service();
    service.add_skill("bob", "ada", "rust").unwrap();
    service.delete_person("ada").unwrap();
    assert!(service.graph().nodes_with_label("skill").is_empty());
}

#[test]
fn remove_errors() {
    let mut service = service();
    service.add_skill("bob", "ada", "rust").unwrap();

    let err = service.remove_skill("bob", "ada", "go").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "skill", .. }));

    let err = service.remove_skill("cy", "ada", "rust").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "skill link", .. }));
}

#[test]
fn blank_name_is_missing() {
    let mut service = service();
    let err = service.add_skill("bob", "ada", "  ").unwrap_err();
    assert!(matches!(err, ServiceError::MissingParameter(_)));
}
