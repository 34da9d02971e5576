use error_stack::IntoReport;
use indexmap::IndexMap;
use routing::ArwLock;
use trust_core::model::{AdminUser, EntityId, StoredCredentials};
use trust_core::repository::UserRepository;
use trust_core::result::{OptRepoResult, RepoError, RepoResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepo {
    db: ArwLock<IndexMap<EntityId, StoredCredentials>>,
}

impl MemoryUserRepo {
    /// Drops an account while tokens issued to it may still be around.
    pub async fn remove(&self, id: EntityId) -> Option<AdminUser> {
        self.db.write().await.shift_remove(&id).map(|c| c.user)
    }
}

impl UserRepository for MemoryUserRepo {
    async fn find(&self, id: EntityId) -> OptRepoResult<AdminUser> {
        Ok(self.db.read().await.get(&id).map(|c| c.user.clone()))
    }

    async fn find_credentials(&self, username: String) -> OptRepoResult<StoredCredentials> {
        let db = self.db.read().await;
        Ok(db.values().find(|c| c.user.username == username).cloned())
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(self.db.read().await.len() as u64)
    }

    async fn create(&self, username: String, password_hash: String) -> RepoResult<AdminUser> {
        let mut db = self.db.write().await;
        if db.values().any(|c| c.user.username == username) {
            return Err(RepoError::Create("User").into_report());
        }
        Ok(insert(&mut db, username, password_hash))
    }

    async fn create_first(&self, username: String, password_hash: String) -> OptRepoResult<AdminUser> {
        let mut db = self.db.write().await;
        if !db.is_empty() {
            return Ok(None);
        }
        Ok(Some(insert(&mut db, username, password_hash)))
    }
}

fn insert(
    db: &mut IndexMap<EntityId, StoredCredentials>,
    username: String,
    password_hash: String,
) -> AdminUser {
    let user = AdminUser {
        id: EntityId::new(),
        username,
    };
    db.insert(
        user.id,
        StoredCredentials {
            user: user.clone(),
            password_hash,
        },
    );
    user
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn usernames_are_unique() {
        let repo = MemoryUserRepo::default();
        repo.create("admin".to_string(), "hash".to_string()).await.unwrap();

        assert!(repo.create("admin".to_string(), "other".to_string()).await.is_err());
        assert_eq!(1, repo.count().await.unwrap());
    }

    #[tokio::test]
    async fn only_the_first_account_is_created_by_create_first() {
        let repo = MemoryUserRepo::default();

        let first = repo
            .create_first("admin".to_string(), "hash".to_string())
            .await
            .unwrap();
        let second = repo
            .create_first("other".to_string(), "hash".to_string())
            .await
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(1, repo.count().await.unwrap());
    }

    #[tokio::test]
    async fn removed_users_are_not_found() {
        let repo = MemoryUserRepo::default();
        let user = repo.create("admin".to_string(), "hash".to_string()).await.unwrap();

        assert_eq!(Some(user.clone()), repo.find(user.id).await.unwrap());
        repo.remove(user.id).await.unwrap();
        assert!(repo.find(user.id).await.unwrap().is_none());
    }
}
