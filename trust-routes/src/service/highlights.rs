use crate::error::ServiceError;
use crate::metrics;
use crate::{OptServiceResult, ServiceResult};
use error_stack::{IntoReport, ResultExt};
use tracing::{debug, instrument};
use trust_core::ContentEngine;
use trust_core::model::{
    EntityId, Highlight, HighlightDraft, HighlightList, PhotoDraft, Stored, VideoDraft,
};
use trust_core::repository::HighlightRepository;
use trust_core::validation::Validate;

const KIND: &str = "Highlight";

/// Yearly photo and video highlights. Years are unique.
#[derive(Debug, Clone)]
pub struct HighlightService<E> {
    engine: E,
}

impl<E: ContentEngine> HighlightService<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    #[instrument(skip_all, name = "service#highlight_years")]
    pub async fn years(&self) -> ServiceResult<Vec<String>> {
        self.engine
            .highlights()
            .years()
            .await
            .change_context(ServiceError::Repository)
    }

    #[instrument(skip(self), name = "service#highlight")]
    pub async fn find(&self, year: String) -> OptServiceResult<Stored<Highlight>> {
        let found = self
            .engine
            .highlights()
            .find(year)
            .await
            .change_context(ServiceError::Repository)?;

        if found.is_some() {
            metrics::increment_retrieved_by(KIND, 1);
        }
        Ok(found)
    }

    #[instrument(skip_all, name = "service#create_highlight")]
    pub async fn create(&self, draft: HighlightDraft) -> ServiceResult<Stored<Highlight>> {
        let highlight = draft
            .validate()
            .map_err(|e| ServiceError::from(e).into_report())?;
        let year = highlight.year.clone();

        let created = self
            .engine
            .highlights()
            .create(highlight)
            .await
            .change_context(ServiceError::Repository)?
            .ok_or_else(|| {
                ServiceError::Conflict("Year already exists")
                    .into_report()
                    .attach(format!("year {year}"))
            })?;

        debug!("created highlight for {year}");
        metrics::increment_created(KIND);
        Ok(created)
    }

    #[instrument(skip(self), name = "service#delete_highlight")]
    pub async fn delete(&self, year: String) -> OptServiceResult<()> {
        let deleted = self
            .engine
            .highlights()
            .delete(year)
            .await
            .change_context(ServiceError::Repository)?;

        if deleted.is_some() {
            metrics::increment_deleted(KIND);
        }
        Ok(deleted)
    }

    #[instrument(skip(self, draft), name = "service#add_photo")]
    pub async fn add_photo(&self, year: String, draft: PhotoDraft) -> OptServiceResult<Stored<Highlight>> {
        let entry = draft
            .validate()
            .map_err(|e| ServiceError::from(e).into_report())?;
        self.engine
            .highlights()
            .push(year, entry)
            .await
            .change_context(ServiceError::Repository)
    }

    #[instrument(skip(self, draft), name = "service#add_video")]
    pub async fn add_video(&self, year: String, draft: VideoDraft) -> OptServiceResult<Stored<Highlight>> {
        let entry = draft
            .validate()
            .map_err(|e| ServiceError::from(e).into_report())?;
        self.engine
            .highlights()
            .push(year, entry)
            .await
            .change_context(ServiceError::Repository)
    }

    /// An entry id that is not in the list (or not an id at all) leaves the
    /// highlight unchanged.
    #[instrument(skip(self), name = "service#remove_entry")]
    pub async fn remove(
        &self,
        year: String,
        list: HighlightList,
        entry: &str,
    ) -> OptServiceResult<Stored<Highlight>> {
        let Ok(entry) = entry.parse::<EntityId>() else {
            return self.find(year).await;
        };

        self.engine
            .highlights()
            .pull(year, list, entry)
            .await
            .change_context(ServiceError::Repository)
    }
}
