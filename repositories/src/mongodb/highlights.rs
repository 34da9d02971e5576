use super::{StoredDocument, is_duplicate_key};
use bson::{Document, doc};
use error_stack::ResultExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::Deserialize;
use tokio_stream::StreamExt;
use tracing::debug;
use trust_core::model::{EntityId, Highlight, HighlightEntry, HighlightList, Stored};
use trust_core::repository::HighlightRepository;
use trust_core::result::{OptRepoResult, RepoError, RepoResult};

pub(super) const COLLECTION: &str = "highlights";
const KIND: &str = "Highlight";

#[derive(Debug, Deserialize)]
struct YearOnly {
    year: String,
}

#[derive(Debug, Clone)]
pub struct HighlightRepo {
    collection: Collection<StoredDocument<Highlight>>,
}

impl HighlightRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

impl HighlightRepository for HighlightRepo {
    async fn years(&self) -> RepoResult<Vec<String>> {
        self.collection
            .clone_with_type::<YearOnly>()
            .find(doc! {})
            .projection(doc! { "year": 1, "_id": 0 })
            .sort(doc! { "year": -1 })
            .await
            .change_context(RepoError::List(KIND))?
            .map(|y| y.map(|y| y.year))
            .collect::<Result<_, _>>()
            .await
            .change_context(RepoError::List(KIND))
    }

    async fn find(&self, year: String) -> OptRepoResult<Stored<Highlight>> {
        self.collection
            .find_one(doc! { "year": year })
            .await
            .change_context(RepoError::Get(KIND))
            .map(|d| d.map(From::from))
    }

    async fn create(&self, highlight: Highlight) -> OptRepoResult<Stored<Highlight>> {
        let document = StoredDocument::create(highlight);
        match self.collection.insert_one(&document).await {
            Ok(_) => Ok(Some(document.into())),
            Err(e) if is_duplicate_key(&e) => {
                debug!("highlight year {} already exists", document.record.year);
                Ok(None)
            }
            Err(e) => Err(e).change_context(RepoError::Create(KIND)),
        }
    }

    async fn delete(&self, year: String) -> OptRepoResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "year": year })
            .await
            .change_context(RepoError::Delete(KIND))?;

        Ok((result.deleted_count > 0).then_some(()))
    }

    async fn push(&self, year: String, entry: HighlightEntry) -> OptRepoResult<Stored<Highlight>> {
        let mut push = Document::new();
        push.insert(
            entry.list().field(),
            bson::to_bson(&entry).change_context(RepoError::Update(KIND))?,
        );

        self.collection
            .find_one_and_update(
                doc! { "year": year },
                doc! { "$push": push, "$set": { "updatedAt": bson::DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await
            .change_context(RepoError::Update(KIND))
            .map(|d| d.map(From::from))
    }

    async fn pull(
        &self,
        year: String,
        list: HighlightList,
        entry: EntityId,
    ) -> OptRepoResult<Stored<Highlight>> {
        let mut pull = Document::new();
        pull.insert(list.field(), doc! { "_id": entry.to_string() });

        self.collection
            .find_one_and_update(
                doc! { "year": year },
                doc! { "$pull": pull, "$set": { "updatedAt": bson::DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await
            .change_context(RepoError::Update(KIND))
            .map(|d| d.map(From::from))
    }
}
