//! Explicit operation registry.
//!
//! Every remote operation is registered under its name together with the
//! ordered names of its parameters. Dispatch binds a named-parameter document
//! to positional arguments (absent parameters are `null`) and invokes the
//! handler against a [`SocialService`].

use crate::params;
use crate::{ServiceError, ServiceResult, SocialService};
use serde_json::{Value, json};
use socialgraph_graph::GraphStore;
use socialgraph_types::Document;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Handler of one operation, called with its positional arguments.
pub type Handler<G> =
    Box<dyn Fn(&mut SocialService<G>, &[Value]) -> ServiceResult<Value> + Send + Sync>;

struct Operation<G: GraphStore> {
    params: &'static [&'static str],
    handler: Handler<G>,
}

/// Operation name → ordered parameter names + handler.
pub struct OperationRegistry<G: GraphStore> {
    operations: BTreeMap<String, Operation<G>>,
}

impl<G: GraphStore + 'static> Default for OperationRegistry<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GraphStore + 'static> OperationRegistry<G> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            operations: BTreeMap::new(),
        }
    }

    /// Registers `handler` under `name`. A name that is already taken is
    /// logged and skipped; returns whether the operation was registered.
    pub fn register<F>(&mut self, name: &str, params: &'static [&'static str], handler: F) -> bool
    where
        F: Fn(&mut SocialService<G>, &[Value]) -> ServiceResult<Value> + Send + Sync + 'static,
    {
        if self.operations.contains_key(name) {
            warn!(operation = name, "operation already registered, skipping");
            return false;
        }
        self.operations.insert(
            name.to_string(),
            Operation {
                params,
                handler: Box::new(handler),
            },
        );
        true
    }

    /// Invokes the operation `name` with arguments taken from `params`.
    pub fn dispatch(
        &self,
        service: &mut SocialService<G>,
        name: &str,
        params: &Document,
    ) -> ServiceResult<Value> {
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| ServiceError::UnknownOperation(name.to_string()))?;
        let args: Vec<Value> = operation
            .params
            .iter()
            .map(|param| params.get(*param).cloned().unwrap_or(Value::Null))
            .collect();
        debug!(operation = name, "dispatching");
        (operation.handler)(service, &args)
    }

    /// Registered operation names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.operations.keys().map(String::as_str).collect()
    }

    /// Ordered parameter names of `name`.
    pub fn parameters(&self, name: &str) -> Option<&'static [&'static str]> {
        self.operations.get(name).map(|operation| operation.params)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// A registry holding every operation of [`SocialService`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register_people();
        registry.register_friends();
        registry.register_groups();
        registry.register_graph();
        registry.register_activities();
        registry.register_app_data();
        registry.register_messages();
        registry.register_albums();
        registry.register_skills();
        registry
    }

    // ── People ───────────────────────────────────────────────────

    fn register_people(&mut self) {
        self.register(
            "people.get",
            &["userIds", "groupId", "options", "fields"],
            |service, args| {
                let [user_ids, group_id, options, fields] = bind::<4>(args)?;
                service.get_people(
                    &params::ids(user_ids, "userIds")?,
                    params::optional_string(group_id, "groupId")?.as_deref(),
                    &params::options(options, "options")?,
                    &params::fields(fields),
                )
            },
        );
        self.register("people.getPerson", &["userId", "fields"], |service, args| {
            let [user_id, fields] = bind::<2>(args)?;
            let person = service.get_person(
                &params::string(user_id, "userId")?,
                &params::fields(fields),
            )?;
            Ok(Value::Object(person))
        });
        self.register("people.create", &["person"], |service, args| {
            let [person] = bind::<1>(args)?;
            let id = service.create_person(params::document(person, "person")?)?;
            Ok(created(id))
        });
        self.register("people.update", &["userId", "person"], |service, args| {
            let [user_id, person] = bind::<2>(args)?;
            service.update_person(
                &params::string(user_id, "userId")?,
                params::document(person, "person")?,
            )?;
            Ok(success())
        });
        self.register("people.delete", &["userId"], |service, args| {
            let [user_id] = bind::<1>(args)?;
            service.delete_person(&params::string(user_id, "userId")?)?;
            Ok(success())
        });
        self.register("people.supportedFields", &[], |service, _| {
            Ok(json!(service.supported_person_fields()))
        });
    }

    // ── Friends ──────────────────────────────────────────────────

    fn register_friends(&mut self) {
        self.register("friends.request", &["userId", "targetId"], |service, args| {
            let [user_id, target_id] = bind::<2>(args)?;
            service.request_friendship(
                &params::string(user_id, "userId")?,
                &params::string(target_id, "targetId")?,
            )?;
            Ok(success())
        });
        self.register("friends.accept", &["userId", "requesterId"], |service, args| {
            let [user_id, requester_id] = bind::<2>(args)?;
            service.accept_friendship(
                &params::string(user_id, "userId")?,
                &params::string(requester_id, "requesterId")?,
            )?;
            Ok(success())
        });
        self.register("friends.deny", &["userId", "requesterId"], |service, args| {
            let [user_id, requester_id] = bind::<2>(args)?;
            service.deny_friendship(
                &params::string(user_id, "userId")?,
                &params::string(requester_id, "requesterId")?,
            )?;
            Ok(success())
        });
        self.register("friends.getRequests", &["userId", "fields"], |service, args| {
            let [user_id, fields] = bind::<2>(args)?;
            service.get_friend_requests(
                &params::string(user_id, "userId")?,
                &params::fields(fields),
            )
        });
        self.register("friends.remove", &["userId", "friendId"], |service, args| {
            let [user_id, friend_id] = bind::<2>(args)?;
            service.remove_friend(
                &params::string(user_id, "userId")?,
                &params::string(friend_id, "friendId")?,
            )?;
            Ok(success())
        });
    }

    // ── Groups ───────────────────────────────────────────────────

    fn register_groups(&mut self) {
        self.register("groups.get", &["userId", "options", "fields"], |service, args| {
            let [user_id, options, fields] = bind::<3>(args)?;
            service.get_groups(
                &params::string(user_id, "userId")?,
                &params::options(options, "options")?,
                &params::fields(fields),
            )
        });
        self.register("groups.getGroup", &["groupId", "fields"], |service, args| {
            let [group_id, fields] = bind::<2>(args)?;
            let group = service.get_group(
                &params::string(group_id, "groupId")?,
                &params::fields(fields),
            )?;
            Ok(Value::Object(group))
        });
        self.register("groups.create", &["userId", "group"], |service, args| {
            let [user_id, group] = bind::<2>(args)?;
            let id = service.create_group(
                &params::string(user_id, "userId")?,
                params::document(group, "group")?,
            )?;
            Ok(created(id))
        });
        self.register("groups.update", &["groupId", "group"], |service, args| {
            let [group_id, group] = bind::<2>(args)?;
            service.update_group(
                &params::string(group_id, "groupId")?,
                params::document(group, "group")?,
            )?;
            Ok(success())
        });
        self.register("groups.delete", &["groupId"], |service, args| {
            let [group_id] = bind::<1>(args)?;
            service.delete_group(&params::string(group_id, "groupId")?)?;
            Ok(success())
        });
        self.register("groups.join", &["userId", "groupId"], |service, args| {
            let [user_id, group_id] = bind::<2>(args)?;
            service.join_group(
                &params::string(user_id, "userId")?,
                &params::string(group_id, "groupId")?,
            )?;
            Ok(success())
        });
        self.register("groups.leave", &["userId", "groupId"], |service, args| {
            let [user_id, group_id] = bind::<2>(args)?;
            service.leave_group(
                &params::string(user_id, "userId")?,
                &params::string(group_id, "groupId")?,
            )?;
            Ok(success())
        });
    }

    // ── Graph traversal ──────────────────────────────────────────

    fn register_graph(&mut self) {
        self.register(
            "graph.shortestPath",
            &["userId", "targetId", "fields"],
            |service, args| {
                let [user_id, target_id, fields] = bind::<3>(args)?;
                service.shortest_path(
                    &params::string(user_id, "userId")?,
                    &params::string(target_id, "targetId")?,
                    &params::fields(fields),
                )
            },
        );
        self.register("graph.friendSuggestions", &["userId", "fields"], |service, args| {
            let [user_id, fields] = bind::<2>(args)?;
            service.friend_suggestions(&params::string(user_id, "userId")?, &params::fields(fields))
        });
        self.register(
            "graph.commonFriends",
            &["userId", "otherId", "fields"],
            |service, args| {
                let [user_id, other_id, fields] = bind::<3>(args)?;
                service.common_friends(
                    &params::string(user_id, "userId")?,
                    &params::string(other_id, "otherId")?,
                    &params::fields(fields),
                )
            },
        );
    }

    // ── Activities ───────────────────────────────────────────────

    fn register_activities(&mut self) {
        self.register(
            "activities.get",
            &["userIds", "groupId", "appId", "options", "fields", "activityIds"],
            |service, args| {
                let [user_ids, group_id, app_id, options, fields, activity_ids] = bind::<6>(args)?;
                service.get_activities(
                    &params::ids(user_ids, "userIds")?,
                    params::optional_string(group_id, "groupId")?.as_deref(),
                    params::optional_string(app_id, "appId")?.as_deref(),
                    &params::options(options, "options")?,
                    &params::fields(fields),
                    &params::ids(activity_ids, "activityIds")?,
                )
            },
        );
        self.register(
            "activities.create",
            &["userId", "appId", "activity"],
            |service, args| {
                let [user_id, app_id, activity] = bind::<3>(args)?;
                let id = service.create_activity(
                    &params::string(user_id, "userId")?,
                    params::optional_string(app_id, "appId")?.as_deref(),
                    params::document(activity, "activity")?,
                )?;
                Ok(created(id))
            },
        );
        self.register(
            "activities.update",
            &["userId", "appId", "activityId", "activity"],
            |service, args| {
                let [user_id, app_id, activity_id, activity] = bind::<4>(args)?;
                service.update_activity(
                    &params::string(user_id, "userId")?,
                    params::optional_string(app_id, "appId")?.as_deref(),
                    &params::string(activity_id, "activityId")?,
                    params::document(activity, "activity")?,
                )?;
                Ok(success())
            },
        );
        self.register(
            "activities.delete",
            &["userId", "appId", "activityIds"],
            |service, args| {
                let [user_id, app_id, activity_ids] = bind::<3>(args)?;
                service.delete_activities(
                    &params::string(user_id, "userId")?,
                    params::optional_string(app_id, "appId")?.as_deref(),
                    &params::ids(activity_ids, "activityIds")?,
                )?;
                Ok(success())
            },
        );
    }

    // ── App data ─────────────────────────────────────────────────

    fn register_app_data(&mut self) {
        self.register(
            "appdata.get",
            &["userIds", "groupId", "appId", "fields"],
            |service, args| {
                let [user_ids, group_id, app_id, fields] = bind::<4>(args)?;
                service.get_app_data(
                    &params::ids(user_ids, "userIds")?,
                    params::optional_string(group_id, "groupId")?.as_deref(),
                    &params::string(app_id, "appId")?,
                    &params::fields(fields),
                )
            },
        );
        self.register("appdata.update", &["userId", "appId", "values"], |service, args| {
            let [user_id, app_id, values] = bind::<3>(args)?;
            service.update_app_data(
                &params::string(user_id, "userId")?,
                &params::string(app_id, "appId")?,
                params::document(values, "values")?,
            )?;
            Ok(success())
        });
        self.register("appdata.delete", &["userId", "appId", "keys"], |service, args| {
            let [user_id, app_id, keys] = bind::<3>(args)?;
            service.delete_app_data(
                &params::string(user_id, "userId")?,
                &params::string(app_id, "appId")?,
                &params::ids(keys, "keys")?,
            )?;
            Ok(success())
        });
    }

    // ── Messages ─────────────────────────────────────────────────

    fn register_messages(&mut self) {
        self.register(
            "messages.getCollections",
            &["userId", "options", "fields"],
            |service, args| {
                let [user_id, options, fields] = bind::<3>(args)?;
                service.get_message_collections(
                    &params::string(user_id, "userId")?,
                    &params::options(options, "options")?,
                    &params::fields(fields),
                )
            },
        );
        self.register(
            "messages.createCollection",
            &["userId", "collection"],
            |service, args| {
                let [user_id, collection] = bind::<2>(args)?;
                let id = service.create_message_collection(
                    &params::string(user_id, "userId")?,
                    params::document(collection, "collection")?,
                )?;
                Ok(created(id))
            },
        );
        self.register(
            "messages.updateCollection",
            &["userId", "collectionId", "collection"],
            |service, args| {
                let [user_id, collection_id, collection] = bind::<3>(args)?;
                service.update_message_collection(
                    &params::string(user_id, "userId")?,
                    &params::string(collection_id, "collectionId")?,
                    params::document(collection, "collection")?,
                )?;
                Ok(success())
            },
        );
        self.register(
            "messages.deleteCollection",
            &["userId", "collectionId"],
            |service, args| {
                let [user_id, collection_id] = bind::<2>(args)?;
                service.delete_message_collection(
                    &params::string(user_id, "userId")?,
                    &params::string(collection_id, "collectionId")?,
                )?;
                Ok(success())
            },
        );
        self.register(
            "messages.get",
            &["userId", "collectionId", "messageIds", "options", "fields"],
            |service, args| {
                let [user_id, collection_id, message_ids, options, fields] = bind::<5>(args)?;
                service.get_messages(
                    &params::string(user_id, "userId")?,
                    &params::string(collection_id, "collectionId")?,
                    &params::ids(message_ids, "messageIds")?,
                    &params::options(options, "options")?,
                    &params::fields(fields),
                )
            },
        );
        self.register(
            "messages.create",
            &["userId", "collectionId", "message"],
            |service, args| {
                let [user_id, collection_id, message] = bind::<3>(args)?;
                let id = service.create_message(
                    &params::string(user_id, "userId")?,
                    &params::string(collection_id, "collectionId")?,
                    params::document(message, "message")?,
                )?;
                Ok(created(id))
            },
        );
        self.register(
            "messages.update",
            &["userId", "collectionId", "messageId", "message"],
            |service, args| {
                let [user_id, collection_id, message_id, message] = bind::<4>(args)?;
                service.update_message(
                    &params::string(user_id, "userId")?,
                    &params::string(collection_id, "collectionId")?,
                    &params::string(message_id, "messageId")?,
                    params::document(message, "message")?,
                )?;
                Ok(success())
            },
        );
        self.register(
            "messages.delete",
            &["userId", "collectionId", "messageIds"],
            |service, args| {
                let [user_id, collection_id, message_ids] = bind::<3>(args)?;
                service.delete_messages(
                    &params::string(user_id, "userId")?,
                    &params::string(collection_id, "collectionId")?,
                    &params::ids(message_ids, "messageIds")?,
                )?;
                Ok(success())
            },
        );
    }

    // ── Albums & media items ─────────────────────────────────────

    fn register_albums(&mut self) {
        self.register(
            "albums.get",
            &["userId", "albumIds", "options", "fields"],
            |service, args| {
                let [user_id, album_ids, options, fields] = bind::<4>(args)?;
                service.get_albums(
                    &params::string(user_id, "userId")?,
                    &params::ids(album_ids, "albumIds")?,
                    &params::options(options, "options")?,
                    &params::fields(fields),
                )
            },
        );
        self.register("albums.create", &["userId", "album"], |service, args| {
            let [user_id, album] = bind::<2>(args)?;
            let id = service.create_album(
                &params::string(user_id, "userId")?,
                params::document(album, "album")?,
            )?;
            Ok(created(id))
        });
        self.register("albums.update", &["userId", "albumId", "album"], |service, args| {
            let [user_id, album_id, album] = bind::<3>(args)?;
            service.update_album(
                &params::string(user_id, "userId")?,
                &params::string(album_id, "albumId")?,
                params::document(album, "album")?,
            )?;
            Ok(success())
        });
        self.register("albums.delete", &["userId", "albumId"], |service, args| {
            let [user_id, album_id] = bind::<2>(args)?;
            service.delete_album(
                &params::string(user_id, "userId")?,
                &params::string(album_id, "albumId")?,
            )?;
            Ok(success())
        });
        self.register(
            "mediaItems.get",
            &["userId", "albumId", "mediaItemIds", "options", "fields"],
            |service, args| {
                let [user_id, album_id, media_item_ids, options, fields] = bind::<5>(args)?;
                service.get_media_items(
                    &params::string(user_id, "userId")?,
                    &params::string(album_id, "albumId")?,
                    &params::ids(media_item_ids, "mediaItemIds")?,
                    &params::options(options, "options")?,
                    &params::fields(fields),
                )
            },
        );
        self.register(
            "mediaItems.create",
            &["userId", "albumId", "mediaItem"],
            |service, args| {
                let [user_id, album_id, media_item] = bind::<3>(args)?;
                let id = service.create_media_item(
                    &params::string(user_id, "userId")?,
                    &params::string(album_id, "albumId")?,
                    params::document(media_item, "mediaItem")?,
                )?;
                Ok(created(id))
            },
        );
        self.register(
            "mediaItems.update",
            &["userId", "albumId", "mediaItemId", "mediaItem"],
            |service, args| {
                let [user_id, album_id, media_item_id, media_item] = bind::<4>(args)?;
                service.update_media_item(
                    &params::string(user_id, "userId")?,
                    &params::string(album_id, "albumId")?,
                    &params::string(media_item_id, "mediaItemId")?,
                    params::document(media_item, "mediaItem")?,
                )?;
                Ok(success())
            },
        );
        self.register(
            "mediaItems.delete",
            &["userId", "albumId", "mediaItemId"],
            |service, args| {
                let [user_id, album_id, media_item_id] = bind::<3>(args)?;
                service.delete_media_item(
                    &params::string(user_id, "userId")?,
                    &params::string(album_id, "albumId")?,
                    &params::string(media_item_id, "mediaItemId")?,
                )?;
                Ok(success())
            },
        );
    }

    // ── Skills ───────────────────────────────────────────────────

    fn register_skills(&mut self) {
        self.register("skills.get", &["userId", "fields"], |service, args| {
            let [user_id, fields] = bind::<2>(args)?;
            service.get_skills(&params::string(user_id, "userId")?, &params::fields(fields))
        });
        self.register("skills.add", &["userId", "targetId", "name"], |service, args| {
            let [user_id, target_id, name] = bind::<3>(args)?;
            service.add_skill(
                &params::string(user_id, "userId")?,
                &params::string(target_id, "targetId")?,
                &params::string(name, "name")?,
            )?;
            Ok(success())
        });
        self.register("skills.remove", &["userId", "targetId", "name"], |service, args| {
            let [user_id, target_id, name] = bind::<3>(args)?;
            service.remove_skill(
                &params::string(user_id, "userId")?,
                &params::string(target_id, "targetId")?,
                &params::string(name, "name")?,
            )?;
            Ok(success())
        });
    }
}

/// Views the positional arguments as an array of the handler's arity.
fn bind<const N: usize>(args: &[Value]) -> ServiceResult<&[Value; N]> {
    <&[Value; N]>::try_from(args).map_err(|_| {
        ServiceError::invalid(
            "arguments",
            format!("expected {N} arguments, got {}", args.len()),
        )
    })
}

fn success() -> Value {
    json!({ "success": true })
}

fn created(id: String) -> Value {
    json!({ "success": true, "id": id })
}
