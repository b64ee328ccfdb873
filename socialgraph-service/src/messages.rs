//! Message collections and messages.
//!
//! A person owns collections through `HAS_COLLECTION`; a collection holds
//! messages through `CONTAINS`. The read status of a message lives on that
//! edge, so one message can be unread in one collection and read in another.

use crate::{ServiceError, ServiceResult, SocialService};
use chrono::Utc;
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::{FieldSelection, attribute, relink};
use socialgraph_model::{EntityKind, MESSAGE_STATUS_NEW, edges};
use socialgraph_types::{Document, NodeId};
use tracing::info;

pub const STATUS: &str = "status";
const TIME_SENT: &str = "timeSent";
const TITLE: &str = "title";

impl<G: GraphStore> SocialService<G> {
    pub fn get_message_collections(
        &self,
        user_id: &str,
        options: &Document,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let user = self.person(user_id)?;
        let options = self.options(options)?;
        let collections = self.children(user, edges::HAS_COLLECTION);
        self.project_page(collections, EntityKind::MessageCollection, &options, fields, Some(TITLE))
    }

    pub fn create_message_collection(
        &mut self,
        user_id: &str,
        collection: Document,
    ) -> ServiceResult<String> {
        let user = self.person(user_id)?;
        let (_, id) = self.create_child(
            user,
            edges::HAS_COLLECTION,
            EntityKind::MessageCollection,
            collection,
        )?;
        Ok(id)
    }

    pub fn update_message_collection(
        &mut self,
        user_id: &str,
        collection_id: &str,
        collection: Document,
    ) -> ServiceResult<()> {
        let node = self.message_collection(user_id, collection_id)?;
        self.update_entity(node, EntityKind::MessageCollection, collection)
    }

    /// Deletes a collection. Messages filed nowhere else go with it.
    pub fn delete_message_collection(
        &mut self,
        user_id: &str,
        collection_id: &str,
    ) -> ServiceResult<()> {
        let node = self.message_collection(user_id, collection_id)?;
        self.delete_entity(node, EntityKind::MessageCollection)
    }

    pub fn get_messages(
        &self,
        user_id: &str,
        collection_id: &str,
        message_ids: &[String],
        options: &Document,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let collection = self.message_collection(user_id, collection_id)?;
        let options = self.options(options)?;
        let mut messages = self.children(collection, edges::CONTAINS);
        self.retain_ids(&mut messages, message_ids);
        self.project_page(messages, EntityKind::Message, &options, fields, None)
    }

    /// Files a new, unread message into a collection and returns its id.
    /// `timeSent` defaults to now, in epoch milliseconds.
    pub fn create_message(
        &mut self,
        user_id: &str,
        collection_id: &str,
        mut message: Document,
    ) -> ServiceResult<String> {
        let collection = self.message_collection(user_id, collection_id)?;
        if message.get(TIME_SENT).is_none_or(Value::is_null) {
            message.insert(TIME_SENT.into(), Value::from(Utc::now().timestamp_millis()));
        }
        let (node, id) =
            self.create_child(collection, edges::CONTAINS, EntityKind::Message, message)?;
        self.set_message_status(collection, node, &Value::from(MESSAGE_STATUS_NEW))?;
        Ok(id)
    }

    /// Updates a message. A `status` key updates its status in this collection.
    pub fn update_message(
        &mut self,
        user_id: &str,
        collection_id: &str,
        message_id: &str,
        mut message: Document,
    ) -> ServiceResult<()> {
        let collection = self.message_collection(user_id, collection_id)?;
        let node = self.child(collection, edges::CONTAINS, EntityKind::Message, message_id)?;
        let status = message.remove(STATUS);
        if let Some(status) = &status {
            check_status(status)?;
        }
        socialgraph_mapping::validate_input(EntityKind::Message, &message)?;

        if let Some(status) = &status {
            self.set_message_status(collection, node, status)?;
        }
        self.update_entity(node, EntityKind::Message, message)
    }

    /// Removes the listed messages from a collection. A message filed in
    /// another collection survives there.
    pub fn delete_messages(
        &mut self,
        user_id: &str,
        collection_id: &str,
        message_ids: &[String],
    ) -> ServiceResult<()> {
        if message_ids.is_empty() {
            return Err(ServiceError::MissingParameter("messageIds".into()));
        }
        let collection = self.message_collection(user_id, collection_id)?;
        let nodes = message_ids
            .iter()
            .map(|id| self.child(collection, edges::CONTAINS, EntityKind::Message, id))
            .collect::<ServiceResult<Vec<_>>>()?;

        for node in nodes {
            if let Some(edge) = self.graph().edge_between(collection, node, edges::CONTAINS) {
                relink::unlink_edge(self.graph_mut(), collection, edge)?;
            }
        }
        info!(collection = %collection_id, count = message_ids.len(), "messages removed");
        Ok(())
    }

    fn message_collection(&self, user_id: &str, collection_id: &str) -> ServiceResult<NodeId> {
        let user = self.person(user_id)?;
        self.child(
            user,
            edges::HAS_COLLECTION,
            EntityKind::MessageCollection,
            collection_id,
        )
    }

    fn set_message_status(
        &mut self,
        collection: NodeId,
        message: NodeId,
        status: &Value,
    ) -> ServiceResult<()> {
        check_status(status)?;
        let edge = self
            .graph()
            .edge_between(collection, message, edges::CONTAINS)
            .ok_or_else(|| {
                ServiceError::not_found(EntityKind::Message.label(), message.to_string())
            })?;
        attribute::write_edge(self.graph_mut(), edge, STATUS, status)?;
        Ok(())
    }
}

fn check_status(status: &Value) -> ServiceResult<()> {
    if !matches!(status, Value::String(_) | Value::Null) {
        return Err(ServiceError::invalid(STATUS, "expected a string"));
    }
    Ok(())
}
