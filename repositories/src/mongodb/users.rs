use super::is_duplicate_key;
use bson::doc;
use bson::oid::ObjectId;
use error_stack::ResultExt;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use trust_core::model::{AdminUser, EntityId, StoredCredentials};
use trust_core::repository::UserRepository;
use trust_core::result::{OptRepoResult, RepoError, RepoResult};
use tracing::warn;

pub(super) const COLLECTION: &str = "users";
const KIND: &str = "User";
/// Set only on the account created through registration. A sparse unique
/// index on it admits one such account.
pub(super) const FIRST_ACCOUNT_FIELD: &str = "firstAccount";

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    username: String,
    password: String,
    #[serde(rename = "firstAccount", default, skip_serializing_if = "Option::is_none")]
    first_account: Option<bool>,
}

impl From<UserDocument> for StoredCredentials {
    fn from(value: UserDocument) -> Self {
        Self {
            user: AdminUser {
                id: value.id.into(),
                username: value.username,
            },
            password_hash: value.password,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserRepo {
    collection: Collection<UserDocument>,
}

impl UserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

impl UserRepository for UserRepo {
    async fn find(&self, id: EntityId) -> OptRepoResult<AdminUser> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .change_context(RepoError::Get(KIND))
            .map(|u| u.map(|u| StoredCredentials::from(u).user))
    }

    async fn find_credentials(&self, username: String) -> OptRepoResult<StoredCredentials> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .change_context(RepoError::Get(KIND))
            .map(|u| u.map(From::from))
    }

    async fn count(&self) -> RepoResult<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .change_context(RepoError::Get(KIND))
    }

    async fn create(&self, username: String, password_hash: String) -> RepoResult<AdminUser> {
        let document = UserDocument {
            id: ObjectId::new(),
            username,
            password: password_hash,
            first_account: None,
        };
        self.collection
            .insert_one(&document)
            .await
            .change_context(RepoError::Create(KIND))?;

        Ok(StoredCredentials::from(document).user)
    }

    async fn create_first(&self, username: String, password_hash: String) -> OptRepoResult<AdminUser> {
        let document = UserDocument {
            id: ObjectId::new(),
            username,
            password: password_hash,
            first_account: Some(true),
        };
        match self.collection.insert_one(&document).await {
            Ok(_) => Ok(Some(StoredCredentials::from(document).user)),
            Err(e) if is_duplicate_key(&e) => {
                warn!("another registration created the first account");
                Ok(None)
            }
            Err(e) => Err(e).change_context(RepoError::Create(KIND)),
        }
    }
}
