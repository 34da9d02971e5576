use crate::cloudinary::CloudinaryStore;
use bson::oid::ObjectId;
use bson::{Document, doc};
use chrono::{DateTime, Utc};
use error_stack::{Report, ResultExt};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use trust_core::ContentEngine;
use trust_core::model::{Activity, EntityId, Event, MediaItem, Member, Sponsor, Stored};
use trust_core::ordered::{OrderedRecord, OrderedStore};

mod content;
mod donations;
mod highlights;
mod messages;
mod ordered;
mod upcoming;
mod users;

pub use content::PageContentRepo;
pub use donations::DonationRepo;
pub use highlights::HighlightRepo;
pub use messages::MessageRepo;
pub use ordered::{MongoOrderedRepo, PartitionFilter};
pub use upcoming::UpcomingEventRepo;
pub use users::UserRepo;

pub enum ConnectionDetails {
    Url(String),
}

#[derive(Debug, thiserror::Error)]
#[error("failed to create client connection to mongodb instance")]
pub struct ConnectError;

#[derive(Debug, thiserror::Error)]
#[error("failed to create the indexes the collections rely on")]
pub struct IndexError;

/// Every repository backed by one MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoEngine {
    db: Database,
    images: CloudinaryStore,
}

impl MongoEngine {
    pub fn new(db: Database, images: CloudinaryStore) -> Self {
        Self { db, images }
    }

    /// Connects and pings the server so an unreachable database fails startup.
    #[instrument(skip(connection_details, images))]
    pub async fn connect(
        connection_details: ConnectionDetails,
        db_name: &str,
        images: CloudinaryStore,
    ) -> Result<Self, Report<ConnectError>> {
        let client = match connection_details {
            ConnectionDetails::Url(url) => Client::with_uri_str(url)
                .await
                .change_context(ConnectError)?,
        };

        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .change_context(ConnectError)
            .attach("mongodb did not answer the ping")?;
        info!("connected to mongodb database '{db_name}'");

        Ok(Self::new(db, images))
    }

    /// Unique keys the singleton and account collections rely on.
    pub async fn ensure_indexes(&self) -> Result<(), Report<IndexError>> {
        for (collection, key) in [
            (content::COLLECTION, "sectionName"),
            (highlights::COLLECTION, "year"),
            (users::COLLECTION, "username"),
        ] {
            let mut keys = Document::new();
            keys.insert(key, 1);
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.db
                .collection::<Document>(collection)
                .create_index(index)
                .await
                .change_context(IndexError)
                .attach_with(|| format!("unique index on {collection}.{key}"))?;
            debug!("ensured unique index on {collection}.{key}");
        }

        let mut keys = Document::new();
        keys.insert(users::FIRST_ACCOUNT_FIELD, 1);
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).sparse(true).build())
            .build();
        self.db
            .collection::<Document>(users::COLLECTION)
            .create_index(index)
            .await
            .change_context(IndexError)
            .attach_with(|| format!("sparse unique index on {}", users::FIRST_ACCOUNT_FIELD))?;
        Ok(())
    }

    fn ordered_repo<R: OrderedRecord>(&self) -> MongoOrderedRepo<R> {
        MongoOrderedRepo::new(&self.db)
    }
}

macro_rules! ordered_store {
    ($($record:ty),+ $(,)?) => {
        $(
            impl OrderedStore<$record> for MongoEngine {
                type Repo = MongoOrderedRepo<$record>;

                fn ordered(&self) -> Self::Repo {
                    self.ordered_repo()
                }
            }
        )+
    };
}

ordered_store!(Activity, Event, Sponsor, Member, MediaItem);

impl ContentEngine for MongoEngine {
    type Highlights = HighlightRepo;
    type Messages = MessageRepo;
    type Content = PageContentRepo;
    type Donations = DonationRepo;
    type UpcomingEvents = UpcomingEventRepo;
    type Users = UserRepo;
    type Images = CloudinaryStore;

    fn highlights(&self) -> Self::Highlights {
        HighlightRepo::new(&self.db)
    }

    fn messages(&self) -> Self::Messages {
        MessageRepo::new(&self.db)
    }

    fn content(&self) -> Self::Content {
        PageContentRepo::new(&self.db)
    }

    fn donations(&self) -> Self::Donations {
        DonationRepo::new(&self.db)
    }

    fn upcoming_events(&self) -> Self::UpcomingEvents {
        UpcomingEventRepo::new(&self.db)
    }

    fn users(&self) -> Self::Users {
        UserRepo::new(&self.db)
    }

    fn images(&self) -> Self::Images {
        self.images.clone()
    }
}

/// Storage shape of a record that is not kept in a display sequence.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument<T> {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(flatten)]
    record: T,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl<T> StoredDocument<T> {
    fn create(record: T) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            record,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<T> From<StoredDocument<T>> for Stored<T> {
    fn from(value: StoredDocument<T>) -> Self {
        Stored::new(
            EntityId::from(value.id),
            value.record,
            to_chrono(value.created_at),
            to_chrono(value.updated_at),
        )
    }
}

fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    value.to_chrono()
}

/// The fields of `set` that are missing from it but may be present in storage,
/// as an `$unset` document. Empty when nothing needs removing.
fn unset_missing(set: &Document, clearable: &[&str]) -> Document {
    clearable
        .iter()
        .filter(|field| !set.contains_key(**field))
        .map(|field| (field.to_string(), bson::Bson::String(String::new())))
        .collect()
}

/// Combines `$set` and (when non-empty) `$unset` into one update document.
fn set_and_unset(mut set: Document, clearable: &[&str]) -> Document {
    let unset = unset_missing(&set, clearable);
    set.insert("updatedAt", bson::DateTime::now());
    let mut update = doc! { "$set": set };
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == 11000,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_only_lists_absent_clearable_fields() {
        let set = doc! { "name": "Ramesh", "imageUrl": "https://img.example/r.jpg" };
        let update = set_and_unset(set, &["designation", "imageUrl"]);

        assert_eq!(&doc! { "designation": "" }, update.get_document("$unset").unwrap());
        assert!(update.get_document("$set").unwrap().contains_key("updatedAt"));
    }

    #[test]
    fn no_unset_when_nothing_is_clearable() {
        let update = set_and_unset(doc! { "title": "Aarti" }, &[]);
        assert!(!update.contains_key("$unset"));
    }
}
