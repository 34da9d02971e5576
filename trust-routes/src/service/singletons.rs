use crate::error::ServiceError;
use crate::metrics;
use crate::ServiceResult;
use error_stack::ResultExt;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use trust_core::ContentEngine;
use trust_core::defaults::SingletonDefaults;
use trust_core::model::{Donation, DonationDraft, DonationPatch, PageContent, Stored};
use trust_core::repository::{DonationRepository, PageContentRepository};

/// Free-form content blobs, one per page section.
#[derive(Debug, Clone)]
pub struct ContentService<E> {
    engine: E,
    defaults: Arc<SingletonDefaults>,
}

impl<E: ContentEngine> ContentService<E> {
    pub fn new(engine: E, defaults: Arc<SingletonDefaults>) -> Self {
        Self { engine, defaults }
    }

    /// The stored section, or its default which is stored on the way out.
    #[instrument(skip(self), name = "service#section")]
    pub async fn section(&self, section_name: String) -> ServiceResult<Stored<PageContent>> {
        let default = self.defaults.section(&section_name);
        self.engine
            .content()
            .get_or_create(section_name, default)
            .await
            .change_context(ServiceError::Repository)
    }

    #[instrument(skip(self, content), name = "service#update_section")]
    pub async fn update(&self, section_name: String, content: Value) -> ServiceResult<Stored<PageContent>> {
        let updated = self
            .engine
            .content()
            .upsert(section_name, content)
            .await
            .change_context(ServiceError::Repository)?;

        info!("section '{}' updated", updated.record.section_name);
        metrics::increment_updated("PageContent");
        Ok(updated)
    }
}

/// The donation details shown on the site. Only the active document is served.
#[derive(Debug, Clone)]
pub struct DonationService<E> {
    engine: E,
    defaults: Arc<SingletonDefaults>,
}

impl<E: ContentEngine> DonationService<E> {
    pub fn new(engine: E, defaults: Arc<SingletonDefaults>) -> Self {
        Self { engine, defaults }
    }

    #[instrument(skip_all, name = "service#donation")]
    pub async fn active(&self) -> ServiceResult<Stored<Donation>> {
        self.engine
            .donations()
            .active_or_create(self.defaults.donation())
            .await
            .change_context(ServiceError::Repository)
    }

    #[instrument(skip_all, name = "service#create_donation")]
    pub async fn create(&self, draft: DonationDraft) -> ServiceResult<Stored<Donation>> {
        let created = self
            .engine
            .donations()
            .create(draft.into_donation(self.defaults.donation_details()))
            .await
            .change_context(ServiceError::Repository)?;

        metrics::increment_created("Donation");
        Ok(created)
    }

    /// Patches the active donation, creating it from the defaults first if
    /// there is none.
    #[instrument(skip_all, name = "service#update_donation")]
    pub async fn update(&self, patch: DonationPatch) -> ServiceResult<Stored<Donation>> {
        let repo = self.engine.donations();
        let mut current = repo
            .active_or_create(self.defaults.donation())
            .await
            .change_context(ServiceError::Repository)?;
        patch.apply(&mut current.record);

        let updated = match repo
            .replace(current.id, current.record.clone())
            .await
            .change_context(ServiceError::Repository)?
        {
            Some(updated) => updated,
            None => {
                debug!("donation {} vanished while updating, storing a new one", current.id);
                repo.create(current.record)
                    .await
                    .change_context(ServiceError::Repository)?
            }
        };

        metrics::increment_updated("Donation");
        Ok(updated)
    }
}
