use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use utoipa::ToSchema;

mod activity;
mod content;
mod donation;
mod event;
mod highlight;
mod media;
mod member;
mod message;
mod sponsor;
mod upcoming;
mod user;

pub use activity::{Activity, ActivityDraft, ActivityUpdate, ActivityUpdateDraft, SectionType};
pub use content::PageContent;
pub use donation::{
    BankDetails, Donation, DonationDetails, DonationDraft, DonationPatch, DonationPatchDraft,
};
pub use event::{Event, EventDraft};
pub use highlight::{
    Highlight, HighlightDraft, HighlightEntry, HighlightList, Photo, PhotoDraft, Video, VideoDraft,
};
pub use media::{MediaDraft, MediaItem, MediaType, MediaUpdate, MediaUpdateDraft};
pub use member::{Contact, Member, MemberDocument, MemberDraft, MemberGroup};
pub use message::{ContactMessage, MessageDraft, MessageStatus};
pub use sponsor::{Sponsor, SponsorDraft};
pub use upcoming::{UpcomingEvent, UpcomingEventDraft};
pub use user::{AdminUser, StoredCredentials};

/// Opaque, server generated identifier. Travels as a 24 character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[repr(transparent)]
#[schema(value_type = String)]
pub struct EntityId(ObjectId);

impl EntityId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for EntityId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl From<EntityId> for bson::Bson {
    fn from(value: EntityId) -> Self {
        value.0.into()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("'{0}' is not a valid id")]
pub struct InvalidId(String);

impl FromStr for EntityId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidId(s.to_string()))
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.to_hex().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Text shown on the site in both supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Bilingual {
    pub english: String,
    pub marathi: String,
}

impl Bilingual {
    pub fn new(english: impl Into<String>, marathi: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            marathi: marathi.into(),
        }
    }
}

/// A stored ordered record as it is handed out to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ordered<R> {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub order: i64,
    #[serde(flatten)]
    pub record: R,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<R> Ordered<R> {
    pub fn create(id: EntityId, order: i64, record: R) -> Self {
        let now = Utc::now();
        Self::new(id, order, record, now, now)
    }

    pub fn new(
        id: EntityId,
        order: i64,
        record: R,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order,
            record,
            created_at,
            updated_at,
        }
    }
}

/// A stored record that is not kept in a display sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(flatten)]
    pub record: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T> Stored<T> {
    pub fn create(id: EntityId, record: T) -> Self {
        let now = Utc::now();
        Self::new(id, record, now, now)
    }

    pub fn new(id: EntityId, record: T, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            record,
            created_at,
            updated_at,
        }
    }

    /// Replaces the record and bumps `updated_at`.
    pub fn replace(&mut self, record: T) {
        self.record = record;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_round_trips_through_hex() {
        let id = EntityId::new();
        let parsed: EntityId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert_eq!(24, id.to_string().len());
    }

    #[test]
    fn entity_id_rejects_garbage() {
        assert!("not-an-id".parse::<EntityId>().is_err());
    }

    #[test]
    fn ordered_serializes_flat_with_legacy_id_key() {
        let id = EntityId::new();
        let value = serde_json::to_value(Ordered::create(id, 2, Bilingual::new("a", "b"))).unwrap();

        assert_eq!(id.to_string(), value["_id"]);
        assert_eq!(2, value["order"]);
        assert_eq!("a", value["english"]);
        assert!(value.get("createdAt").is_some());
    }
}
