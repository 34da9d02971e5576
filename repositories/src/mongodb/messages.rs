use super::StoredDocument;
use bson::doc;
use error_stack::ResultExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tokio_stream::StreamExt;
use trust_core::model::{ContactMessage, EntityId, Stored};
use trust_core::repository::MessageRepository;
use trust_core::result::{OptRepoResult, RepoError, RepoResult};

const COLLECTION: &str = "contactmessages";
const KIND: &str = "Message";

#[derive(Debug, Clone)]
pub struct MessageRepo {
    collection: Collection<StoredDocument<ContactMessage>>,
}

impl MessageRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

impl MessageRepository for MessageRepo {
    async fn create(&self, message: ContactMessage) -> RepoResult<Stored<ContactMessage>> {
        let document = StoredDocument::create(message);
        self.collection
            .insert_one(&document)
            .await
            .change_context(RepoError::Create(KIND))?;
        Ok(document.into())
    }

    async fn list(&self) -> RepoResult<Vec<Stored<ContactMessage>>> {
        self.collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .change_context(RepoError::List(KIND))?
            .map(|d| d.map(From::from))
            .collect::<Result<_, _>>()
            .await
            .change_context(RepoError::List(KIND))
    }

    async fn set_read(&self, id: EntityId, is_read: bool) -> OptRepoResult<Stored<ContactMessage>> {
        self.collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "isRead": is_read, "updatedAt": bson::DateTime::now() } },
            )
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
