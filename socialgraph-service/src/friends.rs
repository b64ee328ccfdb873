//! Friend requests and friendships.
//!
//! A pending request is a `REQUESTED` edge from requester to target. A
//! friendship is a pair of `FRIEND_OF` edges, one per direction.

use crate::options::collection;
use crate::{ServiceError, ServiceResult, SocialService};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::FieldSelection;
use socialgraph_model::{EntityKind, edges};
use socialgraph_types::{Direction, NodeId};
use tracing::info;

const FRIEND_REQUEST: &str = "friend request";
const FRIENDSHIP: &str = "friendship";

impl<G: GraphStore> SocialService<G> {
    /// Sends a friend request from `user_id` to `target_id`. A repeated
    /// request is accepted silently.
    pub fn request_friendship(&mut self, user_id: &str, target_id: &str) -> ServiceResult<()> {
        let user = self.person(user_id)?;
        let target = self.person(target_id)?;
        if user == target {
            return Err(ServiceError::invalid("targetId", "cannot befriend oneself"));
        }
        if self.are_friends(user, target) {
            return Err(ServiceError::Conflict(format!(
                "`{user_id}` and `{target_id}` are already friends"
            )));
        }
        if self.graph().edge_between(user, target, edges::REQUESTED).is_none() {
            self.graph_mut().create_edge(user, target, edges::REQUESTED)?;
            info!(from = %user_id, to = %target_id, "friend request sent");
        }
        Ok(())
    }

    /// Accepts the pending request of `requester_id` to `user_id`.
    pub fn accept_friendship(&mut self, user_id: &str, requester_id: &str) -> ServiceResult<()> {
        let user = self.person(user_id)?;
        let requester = self.person(requester_id)?;
        let request = self
            .graph()
            .edge_between(requester, user, edges::REQUESTED)
            .ok_or_else(|| ServiceError::not_found(FRIEND_REQUEST, requester_id))?;

        let graph = self.graph_mut();
        graph.delete_edge(request)?;
        if let Some(reverse) = graph.edge_between(user, requester, edges::REQUESTED) {
            graph.delete_edge(reverse)?;
        }
        for (from, to) in [(user, requester), (requester, user)] {
            if graph.edge_between(from, to, edges::FRIEND_OF).is_none() {
                graph.create_edge(from, to, edges::FRIEND_OF)?;
            }
        }
        info!(user = %user_id, friend = %requester_id, "friend request accepted");
        Ok(())
    }

    /// Drops the pending request of `requester_id` to `user_id`.
    pub fn deny_friendship(&mut self, user_id: &str, requester_id: &str) -> ServiceResult<()> {
        let user = self.person(user_id)?;
        let requester = self.person(requester_id)?;
        let request = self
            .graph()
            .edge_between(requester, user, edges::REQUESTED)
            .ok_or_else(|| ServiceError::not_found(FRIEND_REQUEST, requester_id))?;
        self.graph_mut().delete_edge(request)?;
        info!(user = %user_id, requester = %requester_id, "friend request denied");
        Ok(())
    }

    /// People with a pending request to `user_id`, in request order.
    pub fn get_friend_requests(
        &self,
        user_id: &str,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let user = self.person(user_id)?;
        let requesters = self
            .graph()
            .neighbors(user, Direction::Incoming, edges::REQUESTED);
        let entries = self
            .projector()
            .project_all(&requesters, EntityKind::Person, fields)?;
        Ok(collection(entries, requesters.len(), 0))
    }

    /// Ends the friendship between `user_id` and `friend_id`.
    pub fn remove_friend(&mut self, user_id: &str, friend_id: &str) -> ServiceResult<()> {
        let user = self.person(user_id)?;
        let friend = self.person(friend_id)?;
        if !self.are_friends(user, friend) && !self.are_friends(friend, user) {
            return Err(ServiceError::not_found(FRIENDSHIP, friend_id));
        }

        let graph = self.graph_mut();
        for (from, to) in [(user, friend), (friend, user)] {
            if let Some(edge) = graph.edge_between(from, to, edges::FRIEND_OF) {
                graph.delete_edge(edge)?;
            }
        }
        info!(user = %user_id, friend = %friend_id, "friendship removed");
        Ok(())
    }

    pub(crate) fn are_friends(&self, a: NodeId, b: NodeId) -> bool {
        self.graph().edge_between(a, b, edges::FRIEND_OF).is_some()
    }

    pub(crate) fn friends_of(&self, person: NodeId) -> Vec<NodeId> {
        self.graph()
            .neighbors(person, Direction::Outgoing, edges::FRIEND_OF)
    }
}
