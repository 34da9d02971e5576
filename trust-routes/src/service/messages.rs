use crate::error::ServiceError;
use crate::metrics;
use crate::{OptServiceResult, ServiceResult};
use error_stack::{IntoReport, ResultExt};
use tracing::{debug, info, instrument};
use trust_core::ContentEngine;
use trust_core::model::{ContactMessage, EntityId, MessageDraft, Stored};
use trust_core::repository::MessageRepository;
use trust_core::validation::Validate;

const KIND: &str = "Message";

/// The contact form inbox.
#[derive(Debug, Clone)]
pub struct MessageService<E> {
    engine: E,
}

impl<E: ContentEngine> MessageService<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    #[instrument(skip_all, name = "service#submit_message")]
    pub async fn submit(&self, draft: MessageDraft) -> ServiceResult<Stored<ContactMessage>> {
        let message = draft
            .validate()
            .map_err(|e| ServiceError::from(e).into_report())?;

        let stored = self
            .engine
            .messages()
            .create(message)
            .await
            .change_context(ServiceError::Repository)?;

        info!("message {} received", stored.id);
        metrics::increment_messages_received();
        Ok(stored)
    }

    #[instrument(skip_all, name = "service#list_messages")]
    pub async fn list(&self) -> ServiceResult<Vec<Stored<ContactMessage>>> {
        let messages = self
            .engine
            .messages()
            .list()
            .await
            .change_context(ServiceError::Repository)?;

        metrics::increment_retrieved_by(KIND, messages.len());
        Ok(messages)
    }

    #[instrument(skip(self), name = "service#mark_message")]
    pub async fn set_read(&self, id: EntityId, is_read: bool) -> OptServiceResult<Stored<ContactMessage>> {
        let updated = self
            .engine
            .messages()
            .set_read(id, is_read)
            .await
            .change_context(ServiceError::Repository)?;

        if updated.is_some() {
            debug!("message {id} marked read={is_read}");
            metrics::increment_updated(KIND);
        }
        Ok(updated)
    }

    #[instrument(skip(self), name = "service#delete_message")]
    pub async fn delete(&self, id: EntityId) -> OptServiceResult<()> {
        let deleted = self
            .engine
            .messages()
            .delete(id)
            .await
            .change_context(ServiceError::Repository)?;

        if deleted.is_some() {
            metrics::increment_deleted(KIND);
        }
        Ok(deleted)
    }
}
