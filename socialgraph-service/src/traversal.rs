//! Graph traversal queries over friendships.

use crate::options::collection;
use crate::{ServiceResult, SocialService};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::FieldSelection;
use socialgraph_model::EntityKind;
use socialgraph_types::NodeId;
use std::collections::{HashMap, HashSet, VecDeque};

/// Number of shared friends, added to every friend suggestion.
pub const MUTUAL_FRIENDS: &str = "mutualFriends";

impl<G: GraphStore> SocialService<G> {
    /// Shortest friendship path from `user_id` to `target_id`, both ends
    /// included. Paths longer than the configured traversal depth are not
    /// searched; an empty collection means no path was found.
    pub fn shortest_path(
        &self,
        user_id: &str,
        target_id: &str,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let from = self.person(user_id)?;
        let to = self.person(target_id)?;
        let path = self.friendship_path(from, to).unwrap_or_default();
        let entries = self
            .projector()
            .project_all(&path, EntityKind::Person, fields)?;
        Ok(collection(entries, path.len(), 0))
    }

    /// Friends of friends who are not yet friends of `user_id`, ranked by the
    /// number of friends they share with `user_id`.
    pub fn friend_suggestions(
        &self,
        user_id: &str,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let user = self.person(user_id)?;
        let friends = self.friends_of(user);
        let known: HashSet<NodeId> = friends.iter().copied().collect();

        let mut order = Vec::new();
        let mut mutual: HashMap<NodeId, usize> = HashMap::new();
        for friend in &friends {
            for candidate in self.friends_of(*friend) {
                if candidate == user || known.contains(&candidate) {
                    continue;
                }
                let count = mutual.entry(candidate).or_insert(0);
                if *count == 0 {
                    order.push(candidate);
                }
                *count += 1;
            }
        }
        let shared = |candidate: &NodeId| mutual.get(candidate).copied().unwrap_or_default();
        order.sort_by_key(|candidate| std::cmp::Reverse(shared(candidate)));

        let mut entries = Vec::with_capacity(order.len());
        for candidate in &order {
            let mut doc = self.project(*candidate, EntityKind::Person, fields)?;
            doc.insert(MUTUAL_FRIENDS.into(), Value::from(shared(candidate)));
            entries.push(doc);
        }
        Ok(collection(entries, order.len(), 0))
    }

    /// Friends shared by `user_id` and `other_id`, in `user_id`'s friend order.
    pub fn common_friends(
        &self,
        user_id: &str,
        other_id: &str,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let user = self.person(user_id)?;
        let other = self.person(other_id)?;
        let theirs: HashSet<NodeId> = self.friends_of(other).into_iter().collect();
        let common: Vec<NodeId> = self
            .friends_of(user)
            .into_iter()
            .filter(|friend| theirs.contains(friend))
            .collect();
        let entries = self
            .projector()
            .project_all(&common, EntityKind::Person, fields)?;
        Ok(collection(entries, common.len(), 0))
    }

    /// Breadth-first search over outgoing friendships, bounded by
    /// `max_traversal_depth` hops.
    fn friendship_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        if from == to {
            return Some(vec![from]);
        }
        let max_depth = self.config().max_traversal_depth;
        let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
        let mut visited = HashSet::from([from]);
        let mut queue = VecDeque::from([(from, 0usize)]);

        while let Some((node, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for next in self.friends_of(node) {
                if !visited.insert(next) {
                    continue;
                }
                parents.insert(next, node);
                if next == to {
                    let mut path = vec![to];
                    let mut current = to;
                    while let Some(parent) = parents.get(&current) {
                        path.push(*parent);
                        current = *parent;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back((next, depth + 1));
            }
        }
        None
    }
}
