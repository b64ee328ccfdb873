//! Entity kinds and their field classification tables.

use crate::edges;
use crate::schema::{ComputedField, EntitySchema, FieldDef, NullPolicy, Relation};
use serde::{Deserialize, Serialize};
use socialgraph_types::Direction;

/// Sentinel stored in the `status` attribute of a collection → message edge
/// while the message is unread.
pub const MESSAGE_STATUS_NEW: &str = "NEW";

/// Fields of a person embedded in other kinds' documents.
pub const PERSON_SUMMARY: &[&str] = &["id", "displayName", "thumbnailUrl"];

/// Every kind of entity the mapping layer knows how to project and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Person,
    Address,
    Organization,
    Account,
    ListField,
    Group,
    Activity,
    MediaItem,
    Album,
    Message,
    MessageCollection,
    AppData,
    Skill,
}

impl EntityKind {
    pub const ALL: [Self; 13] = [
        Self::Person,
        Self::Address,
        Self::Organization,
        Self::Account,
        Self::ListField,
        Self::Group,
        Self::Activity,
        Self::MediaItem,
        Self::Album,
        Self::Message,
        Self::MessageCollection,
        Self::AppData,
        Self::Skill,
    ];

    /// The vertex label used for entities of this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Address => "address",
            Self::Organization => "organization",
            Self::Account => "account",
            Self::ListField => "listField",
            Self::Group => "group",
            Self::Activity => "activity",
            Self::MediaItem => "mediaItem",
            Self::Album => "album",
            Self::Message => "message",
            Self::MessageCollection => "messageCollection",
            Self::AppData => "appData",
            Self::Skill => "skill",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Dependent entities live only as long as something links to them.
    /// People and groups are top-level and are never garbage-collected.
    #[must_use]
    pub const fn is_dependent(self) -> bool {
        !matches!(self, Self::Person | Self::Group)
    }

    /// Outgoing edge type an entity of this kind cannot outlive. A skill entry
    /// exists only while at least one person vouches for it.
    #[must_use]
    pub const fn sustained_by(self) -> Option<&'static str> {
        match self {
            Self::Skill => Some(edges::LINKED_BY),
            _ => None,
        }
    }

    /// The field classification table of this kind.
    #[must_use]
    pub fn schema(self) -> &'static EntitySchema {
        match self {
            Self::Person => &PERSON,
            Self::Address => &ADDRESS,
            Self::Organization => &ORGANIZATION,
            Self::Account => &ACCOUNT,
            Self::ListField => &LIST_FIELD,
            Self::Group => &GROUP,
            Self::Activity => &ACTIVITY,
            Self::MediaItem => &MEDIA_ITEM,
            Self::Album => &ALBUM,
            Self::Message => &MESSAGE,
            Self::MessageCollection => &MESSAGE_COLLECTION,
            Self::AppData => &APP_DATA,
            Self::Skill => &SKILL,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Person ───────────────────────────────────────────────────────

pub const PERSON_NAME: &[&str] = &[
    "formatted",
    "familyName",
    "givenName",
    "additionalName",
    "honorificPrefix",
    "honorificSuffix",
];

pub const PERSON_BODY_TYPE: &[&str] = &["build", "eyeColor", "hairColor", "height", "weight"];

const AFFILIATION_ATTRIBUTES: &[&str] = &[
    "title",
    "department",
    "startDate",
    "endDate",
    "primary",
    "salary",
    "type",
    "description",
    "managerId",
    "secretaryId",
];

const PERSON_FIELDS: &[FieldDef] = &[
    FieldDef::stored("id"),
    FieldDef::stored("displayName"),
    FieldDef::stored("nickname"),
    FieldDef::stored("preferredUsername"),
    FieldDef::stored("aboutMe"),
    FieldDef::stored("birthday"),
    FieldDef::stored("gender"),
    FieldDef::stored("relationshipStatus"),
    FieldDef::stored("profileUrl"),
    FieldDef::stored("thumbnailUrl"),
    FieldDef::stored("status").clear_on_null(),
    FieldDef::stored("updated"),
    FieldDef::stored("utcOffset"),
    FieldDef::stored("religion"),
    FieldDef::stored("politicalViews"),
    FieldDef::stored("ethnicity"),
    FieldDef::stored("romance"),
    FieldDef::stored("humor"),
    FieldDef::stored("scaredOf"),
    FieldDef::stored("happiestWhen"),
    FieldDef::stored("livingArrangement"),
    FieldDef::stored("lookingFor"),
    FieldDef::stored("jobInterests"),
    FieldDef::stored("fashion"),
    FieldDef::stored("drinker"),
    FieldDef::stored("smoker"),
    FieldDef::stored("children"),
    FieldDef::stored("pets"),
    FieldDef::stored("profileSong"),
    FieldDef::stored("profileVideo"),
    FieldDef::stored("sexualOrientation"),
    FieldDef::stored("networkPresence"),
    FieldDef::stored("hasApp"),
    FieldDef::array("tags"),
    FieldDef::array("interests"),
    FieldDef::array("books"),
    FieldDef::array("movies"),
    FieldDef::array("music"),
    FieldDef::array("tvShows"),
    FieldDef::array("sports"),
    FieldDef::array("heroes"),
    FieldDef::array("food"),
    FieldDef::array("quotes"),
    FieldDef::array("activities"),
    FieldDef::array("languagesSpoken"),
    FieldDef::array("turnOns"),
    FieldDef::array("turnOffs"),
    FieldDef::array("cars"),
    FieldDef::split("name", PERSON_NAME),
    FieldDef::split("bodyType", PERSON_BODY_TYPE),
    FieldDef::list("emails", edges::EMAILS),
    FieldDef::list("phoneNumbers", edges::PHONE_NUMBERS),
    FieldDef::list("ims", edges::IMS),
    FieldDef::list("photos", edges::PHOTOS),
    FieldDef::single(
        "currentLocation",
        Relation::owned(edges::LOCATED_AT, EntityKind::Address).keep_on_null(),
    ),
    FieldDef::multi(
        "addresses",
        Relation::owned(edges::LIVES_AT, EntityKind::Address),
    ),
    FieldDef::multi(
        "accounts",
        Relation::owned(edges::HAS_ACCOUNT, EntityKind::Account),
    ),
    FieldDef::multi(
        "organizations",
        Relation::owned(edges::AFFILIATED, EntityKind::Organization)
            .with_edge_attributes(AFFILIATION_ATTRIBUTES),
    ),
    FieldDef::computed("age", ComputedField::Age),
];

pub static PERSON: EntitySchema = EntitySchema {
    kind: EntityKind::Person,
    fields: PERSON_FIELDS,
    null_policy: NullPolicy::IgnoreNull,
    open: false,
};

// ── Person neighborhood ──────────────────────────────────────────

const ADDRESS_FIELDS: &[FieldDef] = &[
    FieldDef::stored("formatted"),
    FieldDef::stored("streetAddress"),
    FieldDef::stored("locality"),
    FieldDef::stored("region"),
    FieldDef::stored("postalCode"),
    FieldDef::stored("country"),
    FieldDef::stored("latitude"),
    FieldDef::stored("longitude"),
    FieldDef::stored("type"),
    FieldDef::stored("primary"),
];

pub static ADDRESS: EntitySchema = EntitySchema {
    kind: EntityKind::Address,
    fields: ADDRESS_FIELDS,
    null_policy: NullPolicy::ClearOnNull,
    open: false,
};

const ORGANIZATION_FIELDS: &[FieldDef] = &[
    FieldDef::stored("name"),
    FieldDef::stored("field"),
    FieldDef::stored("subField"),
    FieldDef::stored("webpage"),
    FieldDef::stored("site"),
    FieldDef::single(
        "address",
        Relation::owned(edges::LOCATED_AT, EntityKind::Address).keep_on_null(),
    ),
];

pub static ORGANIZATION: EntitySchema = EntitySchema {
    kind: EntityKind::Organization,
    fields: ORGANIZATION_FIELDS,
    null_policy: NullPolicy::ClearOnNull,
    open: false,
};

const ACCOUNT_FIELDS: &[FieldDef] = &[
    FieldDef::stored("domain"),
    FieldDef::stored("userId"),
    FieldDef::stored("username"),
];

pub static ACCOUNT: EntitySchema = EntitySchema {
    kind: EntityKind::Account,
    fields: ACCOUNT_FIELDS,
    null_policy: NullPolicy::ClearOnNull,
    open: false,
};

/// The companion of a list field; its attributes are managed by the
/// list-field codec, never by the generic synchronizer.
const LIST_FIELD_FIELDS: &[FieldDef] = &[
    FieldDef::array("value"),
    FieldDef::array("type"),
    FieldDef::stored("primary"),
];

pub static LIST_FIELD: EntitySchema = EntitySchema {
    kind: EntityKind::ListField,
    fields: LIST_FIELD_FIELDS,
    null_policy: NullPolicy::ClearOnNull,
    open: false,
};

// ── Groups ───────────────────────────────────────────────────────

const GROUP_FIELDS: &[FieldDef] = &[
    FieldDef::stored("id"),
    FieldDef::stored("title"),
    FieldDef::stored("description"),
    FieldDef::stored("type"),
    FieldDef::single(
        "owner",
        Relation::incoming(edges::OWNS, EntityKind::Person).narrowed(PERSON_SUMMARY),
    ),
    FieldDef::computed(
        "memberCount",
        ComputedField::EdgeCount {
            edge: edges::MEMBER_OF,
            direction: Direction::Incoming,
        },
    ),
];

pub static GROUP: EntitySchema = EntitySchema {
    kind: EntityKind::Group,
    fields: GROUP_FIELDS,
    null_policy: NullPolicy::IgnoreNull,
    open: false,
};

// ── Activities & media ───────────────────────────────────────────

const ACTIVITY_FIELDS: &[FieldDef] = &[
    FieldDef::stored("id"),
    FieldDef::stored("appId"),
    FieldDef::stored("userId"),
    FieldDef::stored("title"),
    FieldDef::stored("titleId"),
    FieldDef::stored("body"),
    FieldDef::stored("bodyId"),
    FieldDef::stored("url"),
    FieldDef::stored("externalId"),
    FieldDef::stored("priority"),
    FieldDef::stored("postedTime"),
    FieldDef::stored("streamTitle"),
    FieldDef::stored("streamUrl"),
    FieldDef::stored("streamSourceUrl"),
    FieldDef::stored("streamFaviconUrl"),
    FieldDef::multi(
        "mediaItems",
        Relation::owned(edges::HAS_MEDIA, EntityKind::MediaItem),
    ),
];

pub static ACTIVITY: EntitySchema = EntitySchema {
    kind: EntityKind::Activity,
    fields: ACTIVITY_FIELDS,
    null_policy: NullPolicy::IgnoreNull,
    open: false,
};

const MEDIA_ITEM_FIELDS: &[FieldDef] = &[
    FieldDef::stored("id"),
    FieldDef::stored("albumId"),
    FieldDef::stored("title"),
    FieldDef::stored("description"),
    FieldDef::stored("type"),
    FieldDef::stored("mimeType"),
    FieldDef::stored("url"),
    FieldDef::stored("thumbnailUrl"),
    FieldDef::stored("created"),
    FieldDef::stored("lastUpdate"),
    FieldDef::stored("duration"),
    FieldDef::stored("fileSize"),
    FieldDef::stored("language"),
    FieldDef::stored("numComments"),
    FieldDef::stored("numViews"),
    FieldDef::stored("numVotes"),
    FieldDef::stored("rating"),
    FieldDef::stored("startTime"),
    FieldDef::array("tags"),
    FieldDef::array("taggedPeople"),
    FieldDef::single(
        "location",
        Relation::owned(edges::LOCATED_AT, EntityKind::Address).keep_on_null(),
    ),
];

pub static MEDIA_ITEM: EntitySchema = EntitySchema {
    kind: EntityKind::MediaItem,
    fields: MEDIA_ITEM_FIELDS,
    null_policy: NullPolicy::ClearOnNull,
    open: false,
};

const ALBUM_FIELDS: &[FieldDef] = &[
    FieldDef::stored("id"),
    FieldDef::stored("ownerId"),
    FieldDef::stored("title"),
    FieldDef::stored("description"),
    FieldDef::stored("thumbnailUrl"),
    FieldDef::single(
        "location",
        Relation::owned(edges::LOCATED_AT, EntityKind::Address),
    ),
    FieldDef::computed(
        "mediaItemCount",
        ComputedField::EdgeCount {
            edge: edges::CONTAINS,
            direction: Direction::Outgoing,
        },
    ),
    FieldDef::computed(
        "mediaType",
        ComputedField::DistinctChildAttribute {
            edge: edges::CONTAINS,
            direction: Direction::Outgoing,
            attribute: "type",
        },
    ),
];

pub static ALBUM: EntitySchema = EntitySchema {
    kind: EntityKind::Album,
    fields: ALBUM_FIELDS,
    null_policy: NullPolicy::ClearOnNull,
    open: false,
};

// ── Messaging ────────────────────────────────────────────────────

const MESSAGE_FIELDS: &[FieldDef] = &[
    FieldDef::stored("id"),
    FieldDef::stored("title"),
    FieldDef::stored("titleId"),
    FieldDef::stored("body"),
    FieldDef::stored("bodyId"),
    FieldDef::stored("type"),
    FieldDef::stored("senderId"),
    FieldDef::stored("appUrl"),
    FieldDef::stored("inReplyTo"),
    FieldDef::stored("timeSent"),
    FieldDef::stored("updated"),
    FieldDef::array("recipients"),
    FieldDef::array("replies"),
    FieldDef::array("collectionIds"),
    FieldDef::computed(
        "status",
        ComputedField::EdgeAttribute {
            edge: edges::CONTAINS,
            direction: Direction::Incoming,
            attribute: "status",
        },
    ),
];

pub static MESSAGE: EntitySchema = EntitySchema {
    kind: EntityKind::Message,
    fields: MESSAGE_FIELDS,
    null_policy: NullPolicy::IgnoreNull,
    open: false,
};

const MESSAGE_COLLECTION_FIELDS: &[FieldDef] = &[
    FieldDef::stored("id"),
    FieldDef::stored("title"),
    FieldDef::stored("updated"),
    FieldDef::array("urls"),
    FieldDef::computed(
        "total",
        ComputedField::EdgeCount {
            edge: edges::CONTAINS,
            direction: Direction::Outgoing,
        },
    ),
    FieldDef::computed(
        "unread",
        ComputedField::StatusCount {
            edge: edges::CONTAINS,
            direction: Direction::Outgoing,
            attribute: "status",
            status: MESSAGE_STATUS_NEW,
        },
    ),
];

pub static MESSAGE_COLLECTION: EntitySchema = EntitySchema {
    kind: EntityKind::MessageCollection,
    fields: MESSAGE_COLLECTION_FIELDS,
    null_policy: NullPolicy::IgnoreNull,
    open: false,
};

// ── App data & skills ────────────────────────────────────────────

pub static APP_DATA: EntitySchema = EntitySchema {
    kind: EntityKind::AppData,
    fields: &[],
    null_policy: NullPolicy::ClearOnNull,
    open: true,
};

const SKILL_FIELDS: &[FieldDef] = &[
    FieldDef::stored("name"),
    FieldDef::multi(
        "people",
        Relation::owned(edges::LINKED_BY, EntityKind::Person)
            .read_only()
            .narrowed(PERSON_SUMMARY)
            .sorted_by("displayName"),
    ),
];

pub static SKILL: EntitySchema = EntitySchema {
    kind: EntityKind::Skill,
    fields: SKILL_FIELDS,
    null_policy: NullPolicy::IgnoreNull,
    open: false,
};
