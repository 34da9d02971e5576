use chrono::Utc;
use indexmap::IndexMap;
use routing::ArwLock;
use serde_json::Value;
use trust_core::model::{
    ContactMessage, Donation, EntityId, Highlight, HighlightEntry, HighlightList, PageContent,
    Stored, UpcomingEvent,
};
use trust_core::repository::{
    DonationRepository, HighlightRepository, MessageRepository, PageContentRepository,
    UpcomingEventRepository,
};
use trust_core::result::{OptRepoResult, RepoResult};

/// Unordered records keyed by id, kept in insertion order.
#[derive(Debug, Clone)]
pub struct MemoryStored<T> {
    db: ArwLock<IndexMap<EntityId, Stored<T>>>,
}

impl<T> Default for MemoryStored<T> {
    fn default() -> Self {
        Self {
            db: ArwLock::new(IndexMap::new()),
        }
    }
}

impl<T: Clone> MemoryStored<T> {
    async fn insert(&self, record: T) -> Stored<T> {
        let stored = Stored::create(EntityId::new(), record);
        self.db.write().await.insert(stored.id, stored.clone());
        stored
    }

    async fn replace_by_id(&self, id: EntityId, record: T) -> Option<Stored<T>> {
        let mut db = self.db.write().await;
        db.get_mut(&id).map(|s| {
            s.replace(record);
            s.clone()
        })
    }

    async fn remove(&self, id: EntityId) -> Option<()> {
        self.db.write().await.shift_remove(&id).map(|_| ())
    }
}

impl HighlightRepository for MemoryStored<Highlight> {
    async fn years(&self) -> RepoResult<Vec<String>> {
        let db = self.db.read().await;
        let mut years = db.values().map(|h| h.record.year.clone()).collect::<Vec<_>>();
        years.sort_by(|a, b| b.cmp(a));
        Ok(years)
    }

    async fn find(&self, year: String) -> OptRepoResult<Stored<Highlight>> {
        let db = self.db.read().await;
        Ok(db.values().find(|h| h.record.year == year).cloned())
    }

    async fn create(&self, highlight: Highlight) -> OptRepoResult<Stored<Highlight>> {
        let mut db = self.db.write().await;
        if db.values().any(|h| h.record.year == highlight.year) {
            return Ok(None);
        }

        let stored = Stored::create(EntityId::new(), highlight);
        db.insert(stored.id, stored.clone());
        Ok(Some(stored))
    }

    async fn delete(&self, year: String) -> OptRepoResult<()> {
        let mut db = self.db.write().await;
        let Some(id) = db.values().find(|h| h.record.year == year).map(|h| h.id) else {
            return Ok(None);
        };
        Ok(db.shift_remove(&id).map(|_| ()))
    }

    async fn push(&self, year: String, entry: HighlightEntry) -> OptRepoResult<Stored<Highlight>> {
        let mut db = self.db.write().await;
        Ok(db.values_mut().find(|h| h.record.year == year).map(|h| {
            h.record.push(entry);
            h.updated_at = Utc::now();
            h.clone()
        }))
    }

    async fn pull(
        &self,
        year: String,
        list: HighlightList,
        entry: EntityId,
    ) -> OptRepoResult<Stored<Highlight>> {
        let mut db = self.db.write().await;
        Ok(db.values_mut().find(|h| h.record.year == year).map(|h| {
            h.record.pull(list, entry);
            h.updated_at = Utc::now();
            h.clone()
        }))
    }
}

impl MessageRepository for MemoryStored<ContactMessage> {
    async fn create(&self, message: ContactMessage) -> RepoResult<Stored<ContactMessage>> {
        Ok(self.insert(message).await)
    }

    async fn list(&self) -> RepoResult<Vec<Stored<ContactMessage>>> {
        let db = self.db.read().await;
        let mut messages = db.values().rev().cloned().collect::<Vec<_>>();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn set_read(&self, id: EntityId, is_read: bool) -> OptRepoResult<Stored<ContactMessage>> {
        let mut db = self.db.write().await;
        Ok(db.get_mut(&id).map(|m| {
            m.record.is_read = is_read;
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn delete(&self, id: EntityId) -> OptRepoResult<()> {
        Ok(self.remove(id).await)
    }
}

impl PageContentRepository for MemoryStored<PageContent> {
    async fn get_or_create(
        &self,
        section_name: String,
        default: Value,
    ) -> RepoResult<Stored<PageContent>> {
        let mut db = self.db.write().await;
        if let Some(found) = db.values().find(|c| c.record.section_name == section_name) {
            return Ok(found.clone());
        }

        let stored = Stored::create(EntityId::new(), PageContent::new(section_name, default));
        db.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn upsert(&self, section_name: String, content: Value) -> RepoResult<Stored<PageContent>> {
        let mut db = self.db.write().await;
        if let Some(found) = db
            .values_mut()
            .find(|c| c.record.section_name == section_name)
        {
            found.record.content = content;
            found.updated_at = Utc::now();
            return Ok(found.clone());
        }

        let stored = Stored::create(EntityId::new(), PageContent::new(section_name, content));
        db.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

impl DonationRepository for MemoryStored<Donation> {
    async fn active_or_create(&self, default: Donation) -> RepoResult<Stored<Donation>> {
        let mut db = self.db.write().await;
        if let Some(active) = db.values().find(|d| d.record.is_active) {
            return Ok(active.clone());
        }

        let stored = Stored::create(EntityId::new(), default);
        db.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn create(&self, donation: Donation) -> RepoResult<Stored<Donation>> {
        Ok(self.insert(donation).await)
    }

    async fn replace(&self, id: EntityId, donation: Donation) -> OptRepoResult<Stored<Donation>> {
        Ok(self.replace_by_id(id, donation).await)
    }
}

impl UpcomingEventRepository for MemoryStored<UpcomingEvent> {
    async fn list(&self) -> RepoResult<Vec<Stored<UpcomingEvent>>> {
        let db = self.db.read().await;
        Ok(db.values().cloned().collect())
    }

    async fn create(&self, event: UpcomingEvent) -> RepoResult<Stored<UpcomingEvent>> {
        Ok(self.insert(event).await)
    }

    async fn replace(
        &self,
        id: EntityId,
        event: UpcomingEvent,
    ) -> OptRepoResult<Stored<UpcomingEvent>> {
        Ok(self.replace_by_id(id, event).await)
    }

    async fn delete(&self, id: EntityId) -> OptRepoResult<()> {
        Ok(self.remove(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trust_core::model::Photo;

    fn message(name: &str) -> ContactMessage {
        ContactMessage {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            message: "Namaskar".to_string(),
            is_read: false,
        }
    }

    #[tokio::test]
    async fn highlight_years_are_unique_and_newest_first() {
        let repo = MemoryStored::<Highlight>::default();
        repo.create(Highlight::empty("2023")).await.unwrap().unwrap();
        repo.create(Highlight::empty("2025")).await.unwrap().unwrap();

        assert!(repo.create(Highlight::empty("2023")).await.unwrap().is_none());
        assert_eq!(vec!["2025", "2023"], repo.years().await.unwrap());
    }

    #[tokio::test]
    async fn highlight_entries_are_pushed_and_pulled() {
        let repo = MemoryStored::<Highlight>::default();
        repo.create(Highlight::empty("2024")).await.unwrap().unwrap();
        let photo = Photo {
            id: EntityId::new(),
            title: "Visarjan".to_string(),
            src: "https://img.example/v.jpg".to_string(),
        };

        let pushed = repo
            .push("2024".to_string(), HighlightEntry::Photo(photo.clone()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(vec![photo.clone()], pushed.record.photos);

        let pulled = repo
            .pull("2024".to_string(), HighlightList::Photos, photo.id)
            .await
            .unwrap()
            .unwrap();
        assert!(pulled.record.photos.is_empty());
        assert!(
            repo.push("1999".to_string(), HighlightEntry::Photo(photo))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn messages_are_listed_newest_first() {
        let repo = MemoryStored::<ContactMessage>::default();
        repo.create(message("Asha")).await.unwrap();
        let latest = repo.create(message("Vinay")).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(latest.id, listed[0].id);
        assert_eq!(2, listed.len());
    }

    #[tokio::test]
    async fn content_is_created_once() {
        let repo = MemoryStored::<PageContent>::default();
        let first = repo
            .get_or_create("hero".to_string(), json!({ "title": "default" }))
            .await
            .unwrap();
        let second = repo
            .get_or_create("hero".to_string(), json!({ "title": "other" }))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(json!({ "title": "default" }), second.record.content);

        let updated = repo
            .upsert("hero".to_string(), json!({ "title": "new" }))
            .await
            .unwrap();
        assert_eq!(first.id, updated.id);
        assert_eq!(json!({ "title": "new" }), updated.record.content);
    }

    #[tokio::test]
    async fn inactive_donations_are_not_served() {
        let repo = MemoryStored::<Donation>::default();
        let mut inactive = trust_core::model::DonationDetails::default().to_donation();
        inactive.is_active = false;
        let inactive = repo.create(inactive).await.unwrap();

        let active = repo
            .active_or_create(trust_core::model::DonationDetails::default().to_donation())
            .await
            .unwrap();

        assert_ne!(inactive.id, active.id);
        assert!(active.record.is_active);
    }
}
