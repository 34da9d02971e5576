use crate::model::{
    AdminUser, ContactMessage, Donation, EntityId, Highlight, HighlightEntry, HighlightList,
    PageContent, Stored, StoredCredentials, UpcomingEvent,
};
use crate::result::{ImageStoreError, OptRepoResult, RepoResult};
use error_stack::Report;
use serde_json::Value;

pub trait HighlightRepository {
    /// Every year that has a highlight, newest first.
    fn years(&self) -> impl Future<Output = RepoResult<Vec<String>>> + Send;

    fn find(&self, year: String) -> impl Future<Output = OptRepoResult<Stored<Highlight>>> + Send;

    /// `None` when a highlight for the year already exists.
    fn create(
        &self,
        highlight: Highlight,
    ) -> impl Future<Output = OptRepoResult<Stored<Highlight>>> + Send;

    fn delete(&self, year: String) -> impl Future<Output = OptRepoResult<()>> + Send;

    fn push(
        &self,
        year: String,
        entry: HighlightEntry,
    ) -> impl Future<Output = OptRepoResult<Stored<Highlight>>> + Send;

    fn pull(
        &self,
        year: String,
        list: HighlightList,
        entry: EntityId,
    ) -> impl Future<Output = OptRepoResult<Stored<Highlight>>> + Send;
}

pub trait MessageRepository {
    fn create(
        &self,
        message: ContactMessage,
    ) -> impl Future<Output = RepoResult<Stored<ContactMessage>>> + Send;

    /// Newest first.
    fn list(&self) -> impl Future<Output = RepoResult<Vec<Stored<ContactMessage>>>> + Send;

    fn set_read(
        &self,
        id: EntityId,
        is_read: bool,
    ) -> impl Future<Output = OptRepoResult<Stored<ContactMessage>>> + Send;

    fn delete(&self, id: EntityId) -> impl Future<Output = OptRepoResult<()>> + Send;
}

pub trait PageContentRepository {
    /// Returns the section, storing `default` first if it does not exist yet.
    /// Concurrent first reads of a section end up with a single stored document.
    fn get_or_create(
        &self,
        section_name: String,
        default: Value,
    ) -> impl Future<Output = RepoResult<Stored<PageContent>>> + Send;

    fn upsert(
        &self,
        section_name: String,
        content: Value,
    ) -> impl Future<Output = RepoResult<Stored<PageContent>>> + Send;
}

pub trait DonationRepository {
    /// The active donation, stored from `default` if there is none.
    fn active_or_create(
        &self,
        default: Donation,
    ) -> impl Future<Output = RepoResult<Stored<Donation>>> + Send;

    fn create(&self, donation: Donation) -> impl Future<Output = RepoResult<Stored<Donation>>> + Send;

    fn replace(
        &self,
        id: EntityId,
        donation: Donation,
    ) -> impl Future<Output = OptRepoResult<Stored<Donation>>> + Send;
}

pub trait UpcomingEventRepository {
    /// In the order the events were created.
    fn list(&self) -> impl Future<Output = RepoResult<Vec<Stored<UpcomingEvent>>>> + Send;

    fn create(
        &self,
        event: UpcomingEvent,
    ) -> impl Future<Output = RepoResult<Stored<UpcomingEvent>>> + Send;

    fn replace(
        &self,
        id: EntityId,
        event: UpcomingEvent,
    ) -> impl Future<Output = OptRepoResult<Stored<UpcomingEvent>>> + Send;

    fn delete(&self, id: EntityId) -> impl Future<Output = OptRepoResult<()>> + Send;
}

pub trait UserRepository {
    /// The user without its password hash.
    fn find(&self, id: EntityId) -> impl Future<Output = OptRepoResult<AdminUser>> + Send;

    fn find_credentials(
        &self,
        username: String,
    ) -> impl Future<Output = OptRepoResult<StoredCredentials>> + Send;

    fn count(&self) -> impl Future<Output = RepoResult<u64>> + Send;

    fn create(
        &self,
        username: String,
        password_hash: String,
    ) -> impl Future<Output = RepoResult<AdminUser>> + Send;

    /// Creates the account only while there is no other one, in a single step.
    /// `None` when an account already exists.
    fn create_first(
        &self,
        username: String,
        password_hash: String,
    ) -> impl Future<Output = OptRepoResult<AdminUser>> + Send;
}

/// An image received from an admin, about to be handed to the image host.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub trait ImageStore {
    /// Stores the image and returns the public URL it can be fetched from.
    fn upload(
        &self,
        image: ImageUpload,
    ) -> impl Future<Output = Result<String, Report<ImageStoreError>>> + Send;
}
