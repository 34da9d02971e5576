use super::StoredDocument;
use bson::{Bson, doc};
use error_stack::{IntoReport, ResultExt};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde_json::Value;
use trust_core::model::{PageContent, Stored};
use trust_core::repository::PageContentRepository;
use trust_core::result::{RepoError, RepoResult};

pub(super) const COLLECTION: &str = "pagecontents";
const KIND: &str = "PageContent";

#[derive(Debug, Clone)]
pub struct PageContentRepo {
    collection: Collection<StoredDocument<PageContent>>,
}

impl PageContentRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

impl PageContentRepository for PageContentRepo {
    async fn get_or_create(
        &self,
        section_name: String,
        default: Value,
    ) -> RepoResult<Stored<PageContent>> {
        let default = bson::to_bson(&default).change_context(RepoError::Create(KIND))?;
        let now = bson::DateTime::now();

        // writes only when the section is missing
        self.collection
            .find_one_and_update(
                doc! { "sectionName": section_name.as_str() },
                doc! {
                    "$setOnInsert": {
                        "content": default,
                        "createdAt": now,
                        "updatedAt": now,
                    }
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .change_context(RepoError::Get(KIND))?
            .map(From::from)
            .ok_or_else(|| RepoError::Get(KIND).into_report())
            .attach_with(|| format!("upsert of section '{section_name}' returned nothing"))
    }

    async fn upsert(&self, section_name: String, content: Value) -> RepoResult<Stored<PageContent>> {
        let content: Bson = bson::to_bson(&content).change_context(RepoError::Update(KIND))?;
        let now = bson::DateTime::now();

        self.collection
            .find_one_and_update(
                doc! { "sectionName": section_name.as_str() },
                doc! {
                    "$set": { "content": content, "updatedAt": now },
                    "$setOnInsert": { "createdAt": now },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .change_context(RepoError::Update(KIND))?
            .map(From::from)
            .ok_or_else(|| RepoError::Update(KIND).into_report())
            .attach_with(|| format!("upsert of section '{section_name}' returned nothing"))
    }
}
