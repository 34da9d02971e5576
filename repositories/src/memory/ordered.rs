use chrono::Utc;
use indexmap::IndexMap;
use routing::ArwLock;
use trust_core::model::{EntityId, Ordered};
use trust_core::ordered::{OrderedRecord, OrderedRepository, next_order};
use trust_core::result::{OptRepoResult, RepoResult};

/// Records are kept in insertion order, which breaks ties between equal orders.
#[derive(Debug, Clone)]
pub struct MemoryOrderedRepo<R> {
    db: ArwLock<IndexMap<EntityId, Ordered<R>>>,
}

impl<R> Default for MemoryOrderedRepo<R> {
    fn default() -> Self {
        Self {
            db: ArwLock::new(IndexMap::new()),
        }
    }
}

impl<R: OrderedRecord> OrderedRepository<R> for MemoryOrderedRepo<R> {
    async fn list(&self, partition: Option<R::Partition>) -> RepoResult<Vec<Ordered<R>>> {
        let db = self.db.read().await;

        let mut records = db
            .values()
            .filter(|o| partition.as_ref().is_none_or(|p| *p == o.record.partition()))
            .cloned()
            .collect::<Vec<_>>();
        records.sort_by_key(|o| o.order);

        Ok(records)
    }

    async fn create(&self, record: R) -> RepoResult<Ordered<R>> {
        let mut db = self.db.write().await;

        let partition = record.partition();
        let highest = db
            .values()
            .filter(|o| o.record.partition() == partition)
            .map(|o| o.order)
            .max();
        let created = Ordered::create(EntityId::new(), next_order(highest), record);
        db.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update(&self, id: EntityId, update: R::Update) -> OptRepoResult<Ordered<R>> {
        let mut db = self.db.write().await;

        Ok(db.get_mut(&id).map(|o| {
            o.record.apply(update);
            o.updated_at = Utc::now();
            o.clone()
        }))
    }

    async fn delete(&self, id: EntityId) -> OptRepoResult<()> {
        let mut db = self.db.write().await;
        Ok(db.shift_remove(&id).map(|_| ()))
    }

    async fn set_order(&self, id: EntityId, order: i64) -> OptRepoResult<()> {
        let mut db = self.db.write().await;

        Ok(db.get_mut(&id).map(|o| {
            o.order = order;
            o.updated_at = Utc::now();
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_core::model::{Activity, Bilingual, Event, Member, MemberGroup, SectionType};
    use trust_core::ordered::Unpartitioned;

    fn activity(section_type: SectionType, title: &str) -> Activity {
        Activity {
            section_type,
            title: Bilingual::new(title, title),
            description: Bilingual::new("d", "d"),
            image_url: "https://img.example/a.jpg".to_string(),
            icon: "ri-star-line".to_string(),
        }
    }

    fn event(title: &str) -> Event {
        Event {
            title: Bilingual::new(title, title),
            date: "Day 1".to_string(),
            time: "6:00 AM".to_string(),
            activities: Bilingual::new("Aarti", "आरती"),
        }
    }

    fn basic_member(name: &str) -> Member {
        Member::Basic {
            name: Bilingual::new(name, name),
            image_url: None,
            contact: Default::default(),
        }
    }

    #[tokio::test]
    async fn append_order_is_per_partition() {
        let repo = MemoryOrderedRepo::<Activity>::default();

        let a = repo.create(activity(SectionType::Social, "A")).await.unwrap();
        let b = repo.create(activity(SectionType::Social, "B")).await.unwrap();
        let c = repo.create(activity(SectionType::Cultural, "C")).await.unwrap();

        assert_eq!((0, 1, 0), (a.order, b.order, c.order));
    }

    #[tokio::test]
    async fn delete_leaves_gaps() {
        let repo = MemoryOrderedRepo::<Event>::default();
        let first = repo.create(event("first")).await.unwrap();
        let second = repo.create(event("second")).await.unwrap();
        let third = repo.create(event("third")).await.unwrap();

        repo.delete(second.id).await.unwrap().unwrap();
        let remaining = repo.list(Some(Unpartitioned)).await.unwrap();

        assert_eq!(
            vec![(first.id, 0), (third.id, 2)],
            remaining.iter().map(|o| (o.id, o.order)).collect::<Vec<_>>()
        );
        assert_eq!(3, repo.create(event("fourth")).await.unwrap().order);
    }

    #[tokio::test]
    async fn equal_orders_keep_creation_sequence() {
        let repo = MemoryOrderedRepo::<Event>::default();
        let first = repo.create(event("first")).await.unwrap();
        let second = repo.create(event("second")).await.unwrap();
        repo.set_order(first.id, 5).await.unwrap().unwrap();
        repo.set_order(second.id, 5).await.unwrap().unwrap();

        let listed = repo.list(None).await.unwrap();
        assert_eq!(vec![first.id, second.id], listed.iter().map(|o| o.id).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn update_never_touches_order() {
        let repo = MemoryOrderedRepo::<Member>::default();
        repo.create(basic_member("first")).await.unwrap();
        let second = repo.create(basic_member("second")).await.unwrap();

        let updated = repo
            .update(second.id, basic_member("renamed"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(1, updated.order);
        assert_eq!("renamed", updated.record.name().english);
        assert!(updated.updated_at >= second.updated_at);
    }

    #[tokio::test]
    async fn member_partitions_are_listed_separately() {
        let repo = MemoryOrderedRepo::<Member>::default();
        repo.create(basic_member("regular")).await.unwrap();
        repo.create(Member::Featured {
            name: Bilingual::new("Ramesh", "रमेश"),
            designation: Bilingual::new("President", "अध्यक्ष"),
            image_url: "https://img.example/r.jpg".to_string(),
            contact: Default::default(),
        })
        .await
        .unwrap();

        let featured = repo.list(Some(MemberGroup::Featured)).await.unwrap();
        assert_eq!(1, featured.len());
        assert_eq!(0, featured[0].order);
    }

    #[tokio::test]
    async fn missing_ids_report_none() {
        let repo = MemoryOrderedRepo::<Event>::default();
        let id = EntityId::new();

        assert!(repo.update(id, event("x")).await.unwrap().is_none());
        assert!(repo.delete(id).await.unwrap().is_none());
        assert!(repo.set_order(id, 1).await.unwrap().is_none());
    }
}
