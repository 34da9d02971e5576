use super::{set_and_unset, to_chrono};
use bson::oid::ObjectId;
use bson::{Document, doc};
use error_stack::{IntoReport, ResultExt};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tokio_stream::StreamExt;
use tracing::debug;
use trust_core::model::{EntityId, MediaType, MemberGroup, Ordered, SectionType};
use trust_core::ordered::{OrderedRecord, OrderedRepository, Unpartitioned, next_order};
use trust_core::result::{OptRepoResult, RepoError, RepoResult};

/// Narrows a query to the records of one partition.
pub trait PartitionFilter {
    fn filter(&self) -> Document;
}

impl PartitionFilter for SectionType {
    fn filter(&self) -> Document {
        doc! { "sectionType": self.as_str() }
    }
}

impl PartitionFilter for MediaType {
    fn filter(&self) -> Document {
        doc! { "mediaType": self.as_str() }
    }
}

impl PartitionFilter for MemberGroup {
    fn filter(&self) -> Document {
        match self {
            MemberGroup::Featured => doc! { "isFeatured": true },
            // documents written before the flag existed count as regular
            MemberGroup::Regular => doc! { "isFeatured": { "$ne": true } },
        }
    }
}

impl PartitionFilter for Unpartitioned {
    fn filter(&self) -> Document {
        Document::new()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderedDocument<R> {
    #[serde(rename = "_id")]
    id: ObjectId,
    order: i64,
    #[serde(flatten)]
    record: R,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl<R> From<OrderedDocument<R>> for Ordered<R> {
    fn from(value: OrderedDocument<R>) -> Self {
        Ordered::new(
            EntityId::from(value.id),
            value.order,
            value.record,
            to_chrono(value.created_at),
            to_chrono(value.updated_at),
        )
    }
}

/// One collection of ordered records, e.g. `activities`.
#[derive(Debug)]
pub struct MongoOrderedRepo<R> {
    db: Database,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for MongoOrderedRepo<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: OrderedRecord> MongoOrderedRepo<R> {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            _record: PhantomData,
        }
    }

    fn collection(&self) -> Collection<OrderedDocument<R>> {
        self.db.collection(R::COLLECTION)
    }

    async fn highest_order(&self, partition: &R::Partition) -> OptRepoResult<i64>
    where
        R::Partition: PartitionFilter,
    {
        self.collection()
            .find_one(partition.filter())
            .sort(doc! { "order": -1 })
            .await
            .change_context(RepoError::Create(R::KIND))
            .map(|d| d.map(|d| d.order))
    }
}

impl<R> OrderedRepository<R> for MongoOrderedRepo<R>
where
    R: OrderedRecord,
    R::Partition: PartitionFilter,
{
    async fn list(&self, partition: Option<R::Partition>) -> RepoResult<Vec<Ordered<R>>> {
        let filter = partition.map(|p| p.filter()).unwrap_or_default();

        self.collection()
            .find(filter)
            .sort(doc! { "order": 1, "_id": 1 })
            .await
            .change_context(RepoError::List(R::KIND))?
            .map(|d| d.map(From::from))
            .collect::<Result<_, _>>()
            .await
            .change_context(RepoError::List(R::KIND))
    }

    async fn create(&self, record: R) -> RepoResult<Ordered<R>> {
        let order = next_order(self.highest_order(&record.partition()).await?);
        let now = bson::DateTime::now();
        let document = OrderedDocument {
            id: ObjectId::new(),
            order,
            record,
            created_at: now,
            updated_at: now,
        };

        self.collection()
            .insert_one(&document)
            .await
            .change_context(RepoError::Create(R::KIND))?;
        debug!("created {} {} at order {order}", R::KIND, document.id);

        Ok(document.into())
    }

    async fn update(&self, id: EntityId, update: R::Update) -> OptRepoResult<Ordered<R>> {
        let set = bson::to_document(&update).change_context(RepoError::Update(R::KIND))?;

        self.collection()
            .find_one_and_update(doc! { "_id": id }, set_and_unset(set, R::CLEARABLE_FIELDS))
            .return_document(ReturnDocument::After)
            .await
            .change_context(RepoError::Update(R::KIND))
            .map(|d| d.map(From::from))
    }

    async fn delete(&self, id: EntityId) -> OptRepoResult<()> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .change_context(RepoError::Delete(R::KIND))?;

        Ok((result.deleted_count > 0).then_some(()))
    }

    async fn set_order(&self, id: EntityId, order: i64) -> OptRepoResult<()> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "order": order, "updatedAt": bson::DateTime::now() } },
            )
            .await
            .change_context(RepoError::Order(R::KIND))?;

        match result.matched_count {
            0 => Ok(None),
            1 => Ok(Some(())),
            n => Err(RepoError::Order(R::KIND).into_report())
                .attach_with(|| format!("id {id} matched {n} documents")),
        }
    }
}
