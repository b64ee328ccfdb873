//! People operations.

use crate::options::GroupScope;
use crate::{ServiceResult, SocialService};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::FieldSelection;
use socialgraph_model::EntityKind;
use socialgraph_types::Document;

/// Default sort key of people collections.
pub const DISPLAY_NAME: &str = "displayName";

impl<G: GraphStore> SocialService<G> {
    /// Lists the people addressed by `user_ids` under `group_id`, filtered,
    /// sorted by display name and paged per `options`.
    pub fn get_people(
        &self,
        user_ids: &[String],
        group_id: Option<&str>,
        options: &Document,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let options = self.options(options)?;
        let mut people = self.scoped_people(user_ids, &GroupScope::parse(group_id))?;
        if let Some(spec) = &options.filter {
            self.apply_filter(&mut people, spec);
        }
        self.project_page(people, EntityKind::Person, &options, fields, Some(DISPLAY_NAME))
    }

    pub fn get_person(&self, user_id: &str, fields: &FieldSelection) -> ServiceResult<Document> {
        let person = self.person(user_id)?;
        self.project(person, EntityKind::Person, fields)
    }

    /// Creates a person and returns its id.
    pub fn create_person(&mut self, person: Document) -> ServiceResult<String> {
        let (_, id) = self.create_top_level(EntityKind::Person, person)?;
        Ok(id)
    }

    pub fn update_person(&mut self, user_id: &str, person: Document) -> ServiceResult<()> {
        let node = self.person(user_id)?;
        self.update_entity(node, EntityKind::Person, person)
    }

    /// Deletes a person together with everything only they linked to.
    pub fn delete_person(&mut self, user_id: &str) -> ServiceResult<()> {
        let node = self.person(user_id)?;
        self.delete_entity(node, EntityKind::Person)
    }

    /// Field names a caller may request for people.
    pub fn supported_person_fields(&self) -> Vec<&'static str> {
        EntityKind::Person.schema().supported_fields()
    }
}
