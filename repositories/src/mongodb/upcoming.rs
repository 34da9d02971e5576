use super::{StoredDocument, set_and_unset};
use bson::doc;
use error_stack::ResultExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tokio_stream::StreamExt;
use trust_core::model::{EntityId, Stored, UpcomingEvent};
use trust_core::repository::UpcomingEventRepository;
use trust_core::result::{OptRepoResult, RepoError, RepoResult};

const COLLECTION: &str = "upcomingevents";
const KIND: &str = "Event";

#[derive(Debug, Clone)]
pub struct UpcomingEventRepo {
    collection: Collection<StoredDocument<UpcomingEvent>>,
}

impl UpcomingEventRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

impl UpcomingEventRepository for UpcomingEventRepo {
    async fn list(&self) -> RepoResult<Vec<Stored<UpcomingEvent>>> {
        self.collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .await
            .change_context(RepoError::List(KIND))?
            .map(|d| d.map(From::from))
            .collect::<Result<_, _>>()
            .await
            .change_context(RepoError::List(KIND))
    }

    async fn create(&self, event: UpcomingEvent) -> RepoResult<Stored<UpcomingEvent>> {
        let document = StoredDocument::create(event);
        self.collection
            .insert_one(&document)
            .await
            .change_context(RepoError::Create(KIND))?;
        Ok(document.into())
    }

    async fn replace(
        &self,
        id: EntityId,
        event: UpcomingEvent,
    ) -> OptRepoResult<Stored<UpcomingEvent>> {
        let set = bson::to_document(&event).change_context(RepoError::Update(KIND))?;

        self.collection
            .find_one_and_update(doc! { "_id": id }, set_and_unset(set, &[]))
            .return_document(ReturnDocument::After)
            .await
            .change_context(RepoError::Update(KIND))
            .map(|d| d.map(From::from))
    }

    async fn delete(&self, id: EntityId) -> OptRepoResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .change_context(RepoError::Delete(KIND))?;

        Ok((result.deleted_count > 0).then_some(()))
    }
}
