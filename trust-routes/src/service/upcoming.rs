use crate::error::ServiceError;
use crate::metrics;
use crate::{OptServiceResult, ServiceResult};
use error_stack::{IntoReport, ResultExt};
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{EntityId, Stored, UpcomingEvent, UpcomingEventDraft};
use trust_core::repository::UpcomingEventRepository;
use trust_core::validation::Validate;

#[derive(Debug, Clone)]
pub struct UpcomingEventService<E> {
    engine: E,
}

impl<E: ContentEngine> UpcomingEventService<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    #[instrument(skip_all, name = "service#list_upcoming")]
    pub async fn list(&self) -> ServiceResult<Vec<Stored<UpcomingEvent>>> {
        let events = self
            .engine
            .upcoming_events()
            .list()
            .await
            .change_context(ServiceError::Repository)?;

        metrics::increment_retrieved_by("UpcomingEvent", events.len());
        Ok(events)
    }

    #[instrument(skip_all, name = "service#create_upcoming")]
    pub async fn create(&self, draft: UpcomingEventDraft) -> ServiceResult<Stored<UpcomingEvent>> {
        let event = draft
            .validate()
            .map_err(|e| ServiceError::from(e).into_report())?;

        let created = self
            .engine
            .upcoming_events()
            .create(event)
            .await
            .change_context(ServiceError::Repository)?;

        metrics::increment_created("UpcomingEvent");
        Ok(created)
    }

    #[instrument(skip(self, draft), name = "service#update_upcoming")]
    pub async fn update(
        &self,
        id: EntityId,
        draft: UpcomingEventDraft,
    ) -> OptServiceResult<Stored<UpcomingEvent>> {
        let event = draft
            .validate()
            .map_err(|e| ServiceError::from(e).into_report())?;

        let updated = self
            .engine
            .upcoming_events()
            .replace(id, event)
            .await
            .change_context(ServiceError::Repository)?;

        if updated.is_some() {
            metrics::increment_updated("UpcomingEvent");
        }
        Ok(updated)
    }

    #[instrument(skip(self), name = "service#delete_upcoming")]
    pub async fn delete(&self, id: EntityId) -> OptServiceResult<()> {
        let deleted = self
            .engine
            .upcoming_events()
            .delete(id)
            .await
            .change_context(ServiceError::Repository)?;

        if deleted.is_some() {
            metrics::increment_deleted("UpcomingEvent");
        }
        Ok(deleted)
    }
}
