use crate::error::ServiceError;
use crate::metrics;
use crate::{OptServiceResult, ServiceResult};
use error_stack::{IntoReport, ResultExt};
use futures::future::join_all;
use tracing::{debug, error, instrument, warn};
use trust_core::ContentEngine;
use trust_core::model::{EntityId, Ordered};
use trust_core::ordered::{
    OrderAssignment, OrderedRecord, OrderedRepository, OrderedStore, ReorderOutcome,
};
use trust_core::validation::Validate;

/// List, create, update, delete and reorder for every ordered resource.
#[derive(Debug, Clone)]
pub struct OrderedService<E> {
    engine: E,
}

impl<E: ContentEngine> OrderedService<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    fn repo<R>(&self) -> <E as OrderedStore<R>>::Repo
    where
        R: OrderedRecord,
        E: OrderedStore<R>,
    {
        OrderedStore::<R>::ordered(&self.engine)
    }

    #[instrument(skip_all, name = "service#list", fields(kind = R::KIND, ?partition))]
    pub async fn list<R>(&self, partition: Option<R::Partition>) -> ServiceResult<Vec<Ordered<R>>>
    where
        R: OrderedRecord,
        E: OrderedStore<R>,
    {
        let records = self
            .repo::<R>()
            .list(partition)
            .await
            .change_context(ServiceError::Repository)?;

        debug!("{} records found", records.len());
        metrics::increment_retrieved_by(R::KIND, records.len());
        Ok(records)
    }

    #[instrument(skip_all, name = "service#create", fields(kind = R::KIND))]
    pub async fn create<R>(&self, draft: R::Draft) -> ServiceResult<Ordered<R>>
    where
        R: OrderedRecord,
        E: OrderedStore<R>,
    {
        let record = draft
            .validate()
            .map_err(|e| ServiceError::from(e).into_report())?;

        let created = self
            .repo::<R>()
            .create(record)
            .await
            .change_context(ServiceError::Repository)?;

        debug!("created {} at order {}", created.id, created.order);
        metrics::increment_created(R::KIND);
        Ok(created)
    }

    #[instrument(skip_all, name = "service#update", fields(kind = R::KIND, %id))]
    pub async fn update<R>(&self, id: EntityId, draft: R::UpdateDraft) -> OptServiceResult<Ordered<R>>
    where
        R: OrderedRecord,
        E: OrderedStore<R>,
    {
        let update = draft
            .validate()
            .map_err(|e| ServiceError::from(e).into_report())?;

        let updated = self
            .repo::<R>()
            .update(id, update)
            .await
            .change_context(ServiceError::Repository)?;

        if updated.is_some() {
            debug!("updated {id}");
            metrics::increment_updated(R::KIND);
        }
        Ok(updated)
    }

    #[instrument(skip_all, name = "service#delete", fields(kind = R::KIND, %id))]
    pub async fn delete<R>(&self, id: EntityId) -> OptServiceResult<()>
    where
        R: OrderedRecord,
        E: OrderedStore<R>,
    {
        let deleted = self
            .repo::<R>()
            .delete(id)
            .await
            .change_context(ServiceError::Repository)?;

        if deleted.is_some() {
            debug!("deleted {id}");
            metrics::increment_deleted(R::KIND);
        }
        Ok(deleted)
    }

    /// Applies every assignment independently and waits for all of them.
    /// Nothing is rolled back; the outcome says how many landed. An id that
    /// does not parse cannot name a record and counts as missing.
    #[instrument(skip_all, name = "service#reorder", fields(kind = R::KIND, count = assignments.len()))]
    pub async fn reorder<R>(&self, assignments: Vec<OrderAssignment>) -> ReorderOutcome
    where
        R: OrderedRecord,
        E: OrderedStore<R>,
    {
        let mut outcome = ReorderOutcome {
            requested: assignments.len(),
            ..ReorderOutcome::default()
        };

        let mut moves = Vec::with_capacity(assignments.len());
        for assignment in &assignments {
            match assignment.entity_id() {
                Ok(id) => moves.push((id, assignment.order)),
                Err(e) => {
                    warn!("skipping {} reorder entry: {e}", R::KIND);
                    outcome.missing += 1;
                }
            }
        }

        let repo = self.repo::<R>();
        let results = join_all(moves.iter().map(|(id, order)| repo.set_order(*id, *order))).await;

        for ((id, order), result) in moves.iter().zip(results) {
            match result {
                Ok(Some(())) => outcome.updated += 1,
                Ok(None) => {
                    warn!("no {} with id {id} to reorder", R::KIND);
                    outcome.missing += 1;
                }
                Err(e) => {
                    error!("failed to move {id} to {order}: {e:?}");
                    outcome.failed += 1;
                }
            }
        }

        debug!("{outcome:?}");
        metrics::increment_reordered_by(R::KIND, outcome.updated);
        outcome
    }
}
