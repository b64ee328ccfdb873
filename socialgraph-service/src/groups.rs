//! Group operations. A group is owned through `OWNS` and joined through
//! `MEMBER_OF`, both from the person.

use crate::{ServiceError, ServiceResult, SocialService};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::FieldSelection;
use socialgraph_model::{EntityKind, edges};
use socialgraph_types::{Direction, Document};
use tracing::info;

const MEMBERSHIP: &str = "membership";
const TITLE: &str = "title";

impl<G: GraphStore> SocialService<G> {
    /// Groups `user_id` is a member of.
    pub fn get_groups(
        &self,
        user_id: &str,
        options: &Document,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let user = self.person(user_id)?;
        let options = self.options(options)?;
        let groups = self
            .graph()
            .neighbors(user, Direction::Outgoing, edges::MEMBER_OF);
        self.project_page(groups, EntityKind::Group, &options, fields, Some(TITLE))
    }

    pub fn get_group(&self, group_id: &str, fields: &FieldSelection) -> ServiceResult<Document> {
        let group = self.resolve(EntityKind::Group, group_id)?;
        self.project(group, EntityKind::Group, fields)
    }

    /// Creates a group owned by `user_id`, who also becomes its first member.
    pub fn create_group(&mut self, user_id: &str, group: Document) -> ServiceResult<String> {
        let owner = self.person(user_id)?;
        let (node, id) = self.create_top_level(EntityKind::Group, group)?;
        let graph = self.graph_mut();
        graph.create_edge(owner, node, edges::OWNS)?;
        graph.create_edge(owner, node, edges::MEMBER_OF)?;
        Ok(id)
    }

    pub fn update_group(&mut self, group_id: &str, group: Document) -> ServiceResult<()> {
        let node = self.resolve(EntityKind::Group, group_id)?;
        self.update_entity(node, EntityKind::Group, group)
    }

    pub fn delete_group(&mut self, group_id: &str) -> ServiceResult<()> {
        let node = self.resolve(EntityKind::Group, group_id)?;
        self.delete_entity(node, EntityKind::Group)
    }

    /// Adds `user_id` to the group. Joining twice is a no-op.
    pub fn join_group(&mut self, user_id: &str, group_id: &str) -> ServiceResult<()> {
        let user = self.person(user_id)?;
        let group = self.resolve(EntityKind::Group, group_id)?;
        if self.graph().edge_between(user, group, edges::MEMBER_OF).is_none() {
            self.graph_mut().create_edge(user, group, edges::MEMBER_OF)?;
            info!(user = %user_id, group = %group_id, "joined group");
        }
        Ok(())
    }

    pub fn leave_group(&mut self, user_id: &str, group_id: &str) -> ServiceResult<()> {
        let user = self.person(user_id)?;
        let group = self.resolve(EntityKind::Group, group_id)?;
        let membership = self
            .graph()
            .edge_between(user, group, edges::MEMBER_OF)
            .ok_or_else(|| ServiceError::not_found(MEMBERSHIP, group_id))?;
        self.graph_mut().delete_edge(membership)?;
        info!(user = %user_id, group = %group_id, "left group");
        Ok(())
    }
}
