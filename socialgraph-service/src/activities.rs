//! Activity operations. Activities hang off the person who performed them.

use crate::options::GroupScope;
use crate::{ServiceError, ServiceResult, SocialService};
use chrono::Utc;
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::FieldSelection;
use socialgraph_model::{EntityKind, edges};
use socialgraph_types::{AttrValue, Document, NodeId};

pub const APP_ID: &str = "appId";
pub const USER_ID: &str = "userId";
const POSTED_TIME: &str = "postedTime";

impl<G: GraphStore> SocialService<G> {
    /// Activities of the people addressed by `user_ids` under `group_id`,
    /// optionally restricted to one application and to explicit ids.
    pub fn get_activities(
        &self,
        user_ids: &[String],
        group_id: Option<&str>,
        app_id: Option<&str>,
        options: &Document,
        fields: &FieldSelection,
        activity_ids: &[String],
    ) -> ServiceResult<Value> {
        let options = self.options(options)?;
        let people = self.scoped_people(user_ids, &GroupScope::parse(group_id))?;

        let mut activities: Vec<NodeId> = people
            .into_iter()
            .flat_map(|person| self.children(person, edges::PERFORMED))
            .collect();
        if let Some(app_id) = app_id {
            activities.retain(|activity| self.attribute_is(*activity, APP_ID, app_id));
        }
        self.retain_ids(&mut activities, activity_ids);
        self.project_page(activities, EntityKind::Activity, &options, fields, None)
    }

    /// Records an activity of `user_id` in `app_id` and returns its id.
    /// `postedTime` defaults to now, in epoch milliseconds.
    pub fn create_activity(
        &mut self,
        user_id: &str,
        app_id: Option<&str>,
        mut activity: Document,
    ) -> ServiceResult<String> {
        let user = self.person(user_id)?;
        activity.insert(USER_ID.into(), Value::String(user_id.to_string()));
        if let Some(app_id) = app_id {
            activity.insert(APP_ID.into(), Value::String(app_id.to_string()));
        }
        if activity.get(POSTED_TIME).is_none_or(Value::is_null) {
            activity.insert(POSTED_TIME.into(), Value::from(Utc::now().timestamp_millis()));
        }
        let (_, id) = self.create_child(user, edges::PERFORMED, EntityKind::Activity, activity)?;
        Ok(id)
    }

    pub fn update_activity(
        &mut self,
        user_id: &str,
        app_id: Option<&str>,
        activity_id: &str,
        activity: Document,
    ) -> ServiceResult<()> {
        let node = self.activity(user_id, app_id, activity_id)?;
        self.update_entity(node, EntityKind::Activity, activity)
    }

    /// Deletes the listed activities. Every id must exist.
    pub fn delete_activities(
        &mut self,
        user_id: &str,
        app_id: Option<&str>,
        activity_ids: &[String],
    ) -> ServiceResult<()> {
        if activity_ids.is_empty() {
            return Err(ServiceError::MissingParameter("activityIds".into()));
        }
        let nodes = activity_ids
            .iter()
            .map(|id| self.activity(user_id, app_id, id))
            .collect::<ServiceResult<Vec<_>>>()?;
        for node in nodes {
            self.delete_entity(node, EntityKind::Activity)?;
        }
        Ok(())
    }

    fn activity(
        &self,
        user_id: &str,
        app_id: Option<&str>,
        activity_id: &str,
    ) -> ServiceResult<NodeId> {
        let user = self.person(user_id)?;
        let node = self.child(user, edges::PERFORMED, EntityKind::Activity, activity_id)?;
        match app_id {
            Some(app_id) if !self.attribute_is(node, APP_ID, app_id) => Err(ServiceError::not_found(
                EntityKind::Activity.label(),
                activity_id,
            )),
            _ => Ok(node),
        }
    }

    pub(crate) fn attribute_is(&self, node: NodeId, key: &str, expected: &str) -> bool {
        self.graph().attribute(node, key).and_then(AttrValue::as_str) == Some(expected)
    }
}
