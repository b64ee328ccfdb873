//! Skills on a person's profile, each vouched for by one or more people.
//!
//! The profile owner links to a skill entry through `HAS_SKILL`; the entry
//! links to every person who vouched for it through `LINKED_BY`. An entry
//! nobody vouches for any more is deleted.

use crate::options::collection;
use crate::{ServiceError, ServiceResult, SocialService};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::{FieldSelection, relink};
use socialgraph_model::{EntityKind, edges};
use socialgraph_types::{AttrValue, Document, NodeId};
use tracing::info;

const NAME: &str = "name";
const SKILL_LINK: &str = "skill link";

impl<G: GraphStore> SocialService<G> {
    /// Skills on the profile of `user_id`, in the order they were added.
    pub fn get_skills(&self, user_id: &str, fields: &FieldSelection) -> ServiceResult<Value> {
        let user = self.person(user_id)?;
        let skills = self.children(user, edges::HAS_SKILL);
        let entries = self
            .projector()
            .project_all(&skills, EntityKind::Skill, fields)?;
        Ok(collection(entries, skills.len(), 0))
    }

    /// Links the skill `name` onto the profile of `target_id` on behalf of
    /// `user_id`. Vouching twice is a no-op.
    pub fn add_skill(&mut self, user_id: &str, target_id: &str, name: &str) -> ServiceResult<()> {
        let name = skill_name(name)?;
        let user = self.person(user_id)?;
        let target = self.person(target_id)?;

        let skill = match self.skill(target, name) {
            Some(existing) => existing,
            None => {
                let mut input = Document::new();
                input.insert(NAME.into(), Value::from(name));
                let skill = self.synchronizer().create(EntityKind::Skill, &input)?;
                self.graph_mut().create_edge(target, skill, edges::HAS_SKILL)?;
                skill
            }
        };
        if self.graph().edge_between(skill, user, edges::LINKED_BY).is_none() {
            self.graph_mut().create_edge(skill, user, edges::LINKED_BY)?;
            info!(user = %user_id, target = %target_id, skill = %name, "skill linked");
        }
        Ok(())
    }

    /// Withdraws the vouch of `user_id` for the skill `name` on the profile
    /// of `target_id`.
    pub fn remove_skill(
        &mut self,
        user_id: &str,
        target_id: &str,
        name: &str,
    ) -> ServiceResult<()> {
        let name = skill_name(name)?;
        let user = self.person(user_id)?;
        let target = self.person(target_id)?;
        let skill = self
            .skill(target, name)
            .ok_or_else(|| ServiceError::not_found(EntityKind::Skill.label(), name))?;
        let link = self
            .graph()
            .edge_between(skill, user, edges::LINKED_BY)
            .ok_or_else(|| ServiceError::not_found(SKILL_LINK, name))?;

        self.graph_mut().delete_edge(link)?;
        info!(user = %user_id, target = %target_id, skill = %name, "skill unlinked");
        if relink::collect_unsustained(self.graph_mut(), skill)? {
            info!(target = %target_id, skill = %name, "skill removed");
        }
        Ok(())
    }

    fn skill(&self, owner: NodeId, name: &str) -> Option<NodeId> {
        let wanted = AttrValue::from(name);
        self.children(owner, edges::HAS_SKILL)
            .into_iter()
            .find(|skill| self.graph().attribute(*skill, NAME) == Some(&wanted))
    }
}

fn skill_name(name: &str) -> ServiceResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::MissingParameter(NAME.into()));
    }
    Ok(name)
}
