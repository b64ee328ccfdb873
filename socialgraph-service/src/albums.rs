//! Albums and the media items they contain.

use crate::{ServiceResult, SocialService};
use serde_json::Value;
use socialgraph_graph::GraphStore;
use socialgraph_mapping::FieldSelection;
use socialgraph_model::{EntityKind, edges};
use socialgraph_types::{Document, NodeId};

const OWNER_ID: &str = "ownerId";
const ALBUM_ID: &str = "albumId";
const TITLE: &str = "title";

impl<G: GraphStore> SocialService<G> {
    pub fn get_albums(
        &self,
        user_id: &str,
        album_ids: &[String],
        options: &Document,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let user = self.person(user_id)?;
        let options = self.options(options)?;
        let mut albums = self.children(user, edges::HAS_ALBUM);
        self.retain_ids(&mut albums, album_ids);
        self.project_page(albums, EntityKind::Album, &options, fields, Some(TITLE))
    }

    /// Creates an album owned by `user_id` and returns its id.
    pub fn create_album(&mut self, user_id: &str, mut album: Document) -> ServiceResult<String> {
        let user = self.person(user_id)?;
        album.insert(OWNER_ID.into(), Value::String(user_id.to_string()));
        let (_, id) = self.create_child(user, edges::HAS_ALBUM, EntityKind::Album, album)?;
        Ok(id)
    }

    pub fn update_album(
        &mut self,
        user_id: &str,
        album_id: &str,
        mut album: Document,
    ) -> ServiceResult<()> {
        let node = self.album(user_id, album_id)?;
        album.remove(OWNER_ID);
        self.update_entity(node, EntityKind::Album, album)
    }

    /// Deletes an album and the media items it contained.
    pub fn delete_album(&mut self, user_id: &str, album_id: &str) -> ServiceResult<()> {
        let node = self.album(user_id, album_id)?;
        self.delete_entity(node, EntityKind::Album)
    }

    pub fn get_media_items(
        &self,
        user_id: &str,
        album_id: &str,
        media_item_ids: &[String],
        options: &Document,
        fields: &FieldSelection,
    ) -> ServiceResult<Value> {
        let album = self.album(user_id, album_id)?;
        let options = self.options(options)?;
        let mut items = self.children(album, edges::CONTAINS);
        self.retain_ids(&mut items, media_item_ids);
        self.project_page(items, EntityKind::MediaItem, &options, fields, None)
    }

    /// Adds a media item to an album and returns its id.
    pub fn create_media_item(
        &mut self,
        user_id: &str,
        album_id: &str,
        mut item: Document,
    ) -> ServiceResult<String> {
        let album = self.album(user_id, album_id)?;
        item.insert(ALBUM_ID.into(), Value::String(album_id.to_string()));
        let (_, id) = self.create_child(album, edges::CONTAINS, EntityKind::MediaItem, item)?;
        Ok(id)
    }

    pub fn update_media_item(
        &mut self,
        user_id: &str,
        album_id: &str,
        media_item_id: &str,
        mut item: Document,
    ) -> ServiceResult<()> {
        let album = self.album(user_id, album_id)?;
        let node = self.child(album, edges::CONTAINS, EntityKind::MediaItem, media_item_id)?;
        item.remove(ALBUM_ID);
        self.update_entity(node, EntityKind::MediaItem, item)
    }

    pub fn delete_media_item(
        &mut self,
        user_id: &str,
        album_id: &str,
        media_item_id: &str,
    ) -> ServiceResult<()> {
        let album = self.album(user_id, album_id)?;
        let node = self.child(album, edges::CONTAINS, EntityKind::MediaItem, media_item_id)?;
        self.delete_entity(node, EntityKind::MediaItem)
    }

    fn album(&self, user_id: &str, album_id: &str) -> ServiceResult<NodeId> {
        let user = self.person(user_id)?;
        self.child(user, edges::HAS_ALBUM, EntityKind::Album, album_id)
    }
}
