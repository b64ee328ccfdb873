//! Per-application key/value data of a person.
//!
//! Each (person, application) pair has one open-schema entity, linked by a
//! `HAS_APP_DATA` edge that carries the application id.

use crate::activities::APP_ID;
use crate::options::GroupScope;
use crate::{ServiceResult, SocialService};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::FieldSelection;
use socialgraph_model::{EntityKind, edges};
use socialgraph_types::{AttrValue, Direction, Document, NodeId};
use tracing::debug;

impl<G: GraphStore> SocialService<G> {
    /// Returns `{userId: {key: value}}` for every addressed person that has
    /// data in `app_id`.
    pub fn get_app_data(
        &self,
        user_ids: &[String],
        group_id: Option<&str>,
        app_id: &str,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let people = self.scoped_people(user_ids, &GroupScope::parse(group_id))?;
        let mut out = Document::new();
        for person in people {
            let data = self.app_data(person, app_id);
            let (Some(data), Some(user_id)) = (data, self.external_id(person)) else {
                continue;
            };
            let values = self.project(data, EntityKind::AppData, fields)?;
            out.insert(user_id, Value::Object(values));
        }
        Ok(Value::Object(out))
    }

    /// Merges `values` into the data of `user_id` in `app_id`. Null values
    /// delete their key.
    pub fn update_app_data(
        &mut self,
        user_id: &str,
        app_id: &str,
        values: Document,
    ) -> ServiceResult<()> {
        let user = self.person(user_id)?;
        socialgraph_mapping::validate_input(EntityKind::AppData, &values)?;
        let data = match self.app_data(user, app_id) {
            Some(existing) => existing,
            None => {
                let graph = self.graph_mut();
                let data = graph.create_node(EntityKind::AppData.label());
                let edge = graph.create_edge(user, data, edges::HAS_APP_DATA)?;
                graph.set_edge_attribute(edge, APP_ID, AttrValue::from(app_id))?;
                data
            }
        };
        self.synchronizer()
            .apply_update(data, EntityKind::AppData, &values)?;
        Ok(())
    }

    /// Deletes the listed keys, or all data of `app_id` when no key is listed.
    pub fn delete_app_data(
        &mut self,
        user_id: &str,
        app_id: &str,
        keys: &[String],
    ) -> ServiceResult<()> {
        let user = self.person(user_id)?;
        let Some(data) = self.app_data(user, app_id) else {
            debug!(user = %user_id, app = %app_id, "no app data to delete");
            return Ok(());
        };
        if keys.is_empty() {
            return self.delete_entity(data, EntityKind::AppData);
        }
        let graph = self.graph_mut();
        for key in keys {
            graph.remove_attribute(data, key)?;
        }
        Ok(())
    }

    fn app_data(&self, person: NodeId, app_id: &str) -> Option<NodeId> {
        let graph = self.graph();
        graph
            .edges(person, Direction::Outgoing, Some(edges::HAS_APP_DATA))
            .into_iter()
            .filter_map(|edge| graph.edge(edge))
            .find(|record| {
                record.attributes.get(APP_ID).and_then(AttrValue::as_str) == Some(app_id)
            })
            .map(|record| record.target)
    }
}
