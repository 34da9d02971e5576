use super::{StoredDocument, set_and_unset};
use bson::doc;
use error_stack::{IntoReport, ResultExt};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use trust_core::model::{Donation, EntityId, Stored};
use trust_core::repository::DonationRepository;
use trust_core::result::{OptRepoResult, RepoError, RepoResult};

const COLLECTION: &str = "donations";
const KIND: &str = "Donation";
const CLEARABLE_FIELDS: &[&str] = &["qrCodeUrl", "upiId"];

#[derive(Debug, Clone)]
pub struct DonationRepo {
    collection: Collection<StoredDocument<Donation>>,
}

impl DonationRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

impl DonationRepository for DonationRepo {
    async fn active_or_create(&self, default: Donation) -> RepoResult<Stored<Donation>> {
        let mut insert = bson::to_document(&default).change_context(RepoError::Create(KIND))?;
        // taken from the filter on insert
        insert.remove("isActive");
        let now = bson::DateTime::now();
        insert.insert("createdAt", now);
        insert.insert("updatedAt", now);

        self.collection
            .find_one_and_update(doc! { "isActive": true }, doc! { "$setOnInsert": insert })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .change_context(RepoError::Get(KIND))?
            .map(From::from)
            .ok_or_else(|| RepoError::Get(KIND).into_report())
            .attach("active donation upsert returned nothing")
    }

    async fn create(&self, donation: Donation) -> RepoResult<Stored<Donation>> {
        let document = StoredDocument::create(donation);
        self.collection
            .insert_one(&document)
            .await
            .change_context(RepoError::Create(KIND))?;
        Ok(document.into())
    }

    async fn replace(&self, id: EntityId, donation: Donation) -> OptRepoResult<Stored<Donation>> {
        let set = bson::to_document(&donation).change_context(RepoError::Update(KIND))?;

        self.collection
            .find_one_and_update(doc! { "_id": id }, set_and_unset(set, CLEARABLE_FIELDS))
            .return_document(ReturnDocument::After)
            .await
            .change_context(RepoError::Update(KIND))
            .map(|d| d.map(From::from))
    }
}
