//! Edge type names used by the field tables and the operation surface.

/// Person → person, one edge per direction of a friendship.
pub const FRIEND_OF: &str = "FRIEND_OF";
/// Person → person, a pending friend request.
pub const REQUESTED: &str = "REQUESTED";

pub const MEMBER_OF: &str = "MEMBER_OF";
pub const OWNS: &str = "OWNS";

pub const LIVES_AT: &str = "LIVES_AT";
pub const LOCATED_AT: &str = "LOCATED_AT";
pub const AFFILIATED: &str = "AFFILIATED";
pub const HAS_ACCOUNT: &str = "HAS_ACCOUNT";

pub const EMAILS: &str = "EMAILS";
pub const PHONE_NUMBERS: &str = "PHONE_NUMBERS";
pub const IMS: &str = "IMS";
pub const PHOTOS: &str = "PHOTOS";

pub const PERFORMED: &str = "PERFORMED";
pub const HAS_MEDIA: &str = "HAS_MEDIA";

/// Album → media item, message collection → message.
pub const CONTAINS: &str = "CONTAINS";
pub const HAS_ALBUM: &str = "HAS_ALBUM";
pub const HAS_COLLECTION: &str = "HAS_COLLECTION";

/// Person → app data; the edge carries the `appId`.
pub const HAS_APP_DATA: &str = "HAS_APP_DATA";

/// Person → skill entry on their profile.
pub const HAS_SKILL: &str = "HAS_SKILL";
/// Skill entry → person who vouched for it.
pub const LINKED_BY: &str = "LINKED_BY";
