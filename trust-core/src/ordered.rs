use crate::model::{EntityId, InvalidId, Ordered};
use crate::result::{OptRepoResult, RepoResult};
use crate::validation::Validate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use utoipa::ToSchema;

/// A record kept in a display sequence.
///
/// Records live in partitions (e.g. all `social` activities); `order` is only
/// meaningful between records of the same partition.
pub trait OrderedRecord:
    Debug + Clone + PartialEq + Serialize + DeserializeOwned + ToSchema + Send + Sync + 'static
{
    type Partition: Debug + Clone + PartialEq + Send + Sync + 'static;
    /// The fields an update may replace. Never includes `order`.
    type Update: Debug + Clone + Serialize + Send + Sync + 'static;
    type Draft: Validate<Output = Self> + DeserializeOwned + Debug + Send + 'static;
    type UpdateDraft: Validate<Output = Self::Update> + DeserializeOwned + Debug + Send + 'static;

    /// Human name of the record, used in messages (`"Sponsor not found"`).
    const KIND: &'static str;
    const COLLECTION: &'static str;
    /// Stored fields that disappear when an update no longer carries them.
    const CLEARABLE_FIELDS: &'static [&'static str] = &[];

    fn partition(&self) -> Self::Partition;

    fn apply(&mut self, update: Self::Update);
}

pub trait OrderedRepository<R: OrderedRecord> {
    /// `None` lists every partition. Always ascending by `order`.
    fn list(
        &self,
        partition: Option<R::Partition>,
    ) -> impl Future<Output = RepoResult<Vec<Ordered<R>>>> + Send;

    /// Appends to the end of the record's partition.
    fn create(&self, record: R) -> impl Future<Output = RepoResult<Ordered<R>>> + Send;

    fn update(
        &self,
        id: EntityId,
        update: R::Update,
    ) -> impl Future<Output = OptRepoResult<Ordered<R>>> + Send;

    /// Siblings keep their order values; gaps are fine.
    fn delete(&self, id: EntityId) -> impl Future<Output = OptRepoResult<()>> + Send;

    fn set_order(&self, id: EntityId, order: i64) -> impl Future<Output = OptRepoResult<()>> + Send;
}

/// Gives access to the repository of one kind of ordered record.
pub trait OrderedStore<R: OrderedRecord> {
    type Repo: OrderedRepository<R> + Send + Sync + 'static;

    fn ordered(&self) -> Self::Repo;
}

/// The partition of records that are kept in one sequence (events, sponsors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Unpartitioned;

/// Order for a record appended after `highest`, the current maximum of its partition.
pub fn next_order(highest: Option<i64>) -> i64 {
    highest.map_or(0, |order| order + 1)
}

/// One `(id, order)` pair of a bulk reorder. The id is kept as sent; a pair
/// whose id does not parse only fails on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderAssignment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub order: i64,
}

impl OrderAssignment {
    pub fn new(id: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            order,
        }
    }

    pub fn entity_id(&self) -> Result<EntityId, InvalidId> {
        self.id.parse()
    }
}

/// Tally of a best-effort bulk reorder. Assignments are independent, so a
/// failure only leaves that one record with its previous order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReorderOutcome {
    pub requested: usize,
    pub updated: usize,
    pub missing: usize,
    pub failed: usize,
}

impl ReorderOutcome {
    pub fn is_complete(&self) -> bool {
        self.updated == self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_order_starts_at_zero() {
        assert_eq!(0, next_order(None));
    }

    #[test]
    fn next_order_appends_after_highest() {
        assert_eq!(1, next_order(Some(0)));
        assert_eq!(8, next_order(Some(7)));
    }

    #[test]
    fn assignment_accepts_either_id_key() {
        let id = EntityId::new();
        let legacy: OrderAssignment =
            serde_json::from_value(serde_json::json!({ "_id": id.to_string(), "order": 3 }))
                .unwrap();
        let plain: OrderAssignment =
            serde_json::from_value(serde_json::json!({ "id": id.to_string(), "order": 3 }))
                .unwrap();

        assert_eq!(OrderAssignment::new(id.to_string(), 3), legacy);
        assert_eq!(legacy, plain);
        assert_eq!(id, legacy.entity_id().unwrap());
    }

    #[test]
    fn assignment_keeps_ids_that_do_not_parse() {
        let assignment: OrderAssignment =
            serde_json::from_value(serde_json::json!({ "_id": "abc", "order": 0 })).unwrap();

        assert_eq!("abc", assignment.id);
        assert!(assignment.entity_id().is_err());
    }
}
