use error_stack::Report;

pub type RepoResult<T> = Result<T, Report<RepoError>>;
pub type OptRepoResult<T> = Result<Option<T>, Report<RepoError>>;

/// The operation that failed. The `&'static str` names the kind of record
/// (e.g. `Activity`, `Highlight`).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("failed to get {0}")]
    Get(&'static str),
    #[error("failed to list {0} records")]
    List(&'static str),
    #[error("failed to create {0}")]
    Create(&'static str),
    #[error("failed to update {0}")]
    Update(&'static str),
    #[error("failed to delete {0}")]
    Delete(&'static str),
    #[error("failed to change the order of {0}")]
    Order(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("no image host is configured")]
    NotConfigured,
    #[error("the image host rejected the upload")]
    Upload,
}
